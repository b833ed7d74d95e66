//! Member-facing convenience sends.
//!
//! Each helper binds a fixed template and maps a structured payload onto the
//! substitutions that template declares.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::template::defaults::{
    ACCESS_CODE, ACCESS_CODE_RESET, EXPIRY_DATE, MEMBERSHIP_REACTIVATED, MEMBERSHIP_SUSPENDED,
    MEMBER_NAME, RENEWAL_REMINDER, WELCOME,
};
use crate::template::Variables;

use super::dispatcher::SmsDispatcher;
use super::types::DeliveryResult;

/// Who a member SMS goes to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberContact {
    pub name: String,
    pub phone: String,
    pub access_code: String,
}

impl MemberContact {
    pub fn new(
        name: impl Into<String>,
        phone: impl Into<String>,
        access_code: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            phone: phone.into(),
            access_code: access_code.into(),
        }
    }

    fn variables(&self) -> Variables {
        let mut variables = Variables::new();
        variables.insert(MEMBER_NAME.to_string(), self.name.clone());
        variables.insert(ACCESS_CODE.to_string(), self.access_code.clone());
        variables
    }

    fn variables_with_expiry(&self, expiry_date: NaiveDate) -> Variables {
        let mut variables = self.variables();
        variables.insert(EXPIRY_DATE.to_string(), format_date(expiry_date));
        variables
    }
}

/// Membership status transitions that trigger an SMS
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MembershipStatus {
    Suspended,
    Reactivated,
}

impl MembershipStatus {
    pub fn template_id(&self) -> &'static str {
        match self {
            MembershipStatus::Suspended => MEMBERSHIP_SUSPENDED,
            MembershipStatus::Reactivated => MEMBERSHIP_REACTIVATED,
        }
    }
}

fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

impl SmsDispatcher {
    /// Welcome a new member with their access code and expiry date
    pub async fn send_welcome(
        &self,
        member: &MemberContact,
        expiry_date: NaiveDate,
    ) -> DeliveryResult {
        self.render_and_send(
            &member.phone,
            WELCOME,
            member.variables_with_expiry(expiry_date),
        )
        .await
    }

    pub async fn send_renewal_reminder(
        &self,
        member: &MemberContact,
        expiry_date: NaiveDate,
    ) -> DeliveryResult {
        self.render_and_send(
            &member.phone,
            RENEWAL_REMINDER,
            member.variables_with_expiry(expiry_date),
        )
        .await
    }

    pub async fn send_access_code_reset(&self, member: &MemberContact) -> DeliveryResult {
        self.render_and_send(&member.phone, ACCESS_CODE_RESET, member.variables())
            .await
    }

    /// Notify a suspension or reactivation.
    ///
    /// Without an expiry date the `expiryDate` substitution is omitted, so a
    /// reactivation without one fails validation rather than rendering a blank.
    pub async fn send_status_change(
        &self,
        member: &MemberContact,
        status: MembershipStatus,
        expiry_date: Option<NaiveDate>,
    ) -> DeliveryResult {
        let variables = match expiry_date {
            Some(date) => member.variables_with_expiry(date),
            None => member.variables(),
        };

        self.render_and_send(&member.phone, status.template_id(), variables)
            .await
    }
}
