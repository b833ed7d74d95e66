//! Built-in FitAccess member templates

use super::types::Template;

pub const WELCOME: &str = "welcome";
pub const RENEWAL_REMINDER: &str = "renewal_reminder";
pub const ACCESS_CODE_RESET: &str = "access_code_reset";
pub const MEMBERSHIP_SUSPENDED: &str = "membership_suspended";
pub const MEMBERSHIP_REACTIVATED: &str = "membership_reactivated";

pub const MEMBER_NAME: &str = "memberName";
pub const ACCESS_CODE: &str = "accessCode";
pub const EXPIRY_DATE: &str = "expiryDate";

/// The templates every dispatcher starts with
pub fn builtin_templates() -> Vec<Template> {
    vec![
        Template::new(
            WELCOME,
            "Welcome Message",
            "Welcome to FitAccess!",
            "Hi {{memberName}}! Welcome to FitAccess. Your access code is {{accessCode}}. \
             Your membership expires on {{expiryDate}}. Show this code at the entrance to \
             access the gym. Need help? Reply HELP.",
            &[MEMBER_NAME, ACCESS_CODE, EXPIRY_DATE],
        ),
        Template::new(
            RENEWAL_REMINDER,
            "Renewal Reminder",
            "Membership Renewal Reminder",
            "Hi {{memberName}}! Your FitAccess membership expires on {{expiryDate}}. Renew \
             now to avoid interruption. Access code: {{accessCode}}. Visit our website or \
             call us to renew.",
            &[MEMBER_NAME, EXPIRY_DATE, ACCESS_CODE],
        ),
        Template::new(
            ACCESS_CODE_RESET,
            "Access Code Reset",
            "New Access Code",
            "Hi {{memberName}}! Your new FitAccess code is {{accessCode}}. This replaces your \
             previous code. Use this at the gym entrance. Questions? Contact us.",
            &[MEMBER_NAME, ACCESS_CODE],
        ),
        Template::new(
            MEMBERSHIP_SUSPENDED,
            "Membership Suspended",
            "Membership Suspended",
            "Hi {{memberName}}, your FitAccess membership has been temporarily suspended. \
             Please contact us to resolve this issue. Access code: {{accessCode}}.",
            &[MEMBER_NAME, ACCESS_CODE],
        ),
        Template::new(
            MEMBERSHIP_REACTIVATED,
            "Membership Reactivated",
            "Membership Reactivated",
            "Hi {{memberName}}! Your FitAccess membership is now active. Welcome back! Your \
             access code {{accessCode}} is ready to use. Membership valid until {{expiryDate}}.",
            &[MEMBER_NAME, ACCESS_CODE, EXPIRY_DATE],
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::template::substitution::placeholders;

    #[test]
    fn test_builtins_are_valid() {
        for template in builtin_templates() {
            template.validate().unwrap();
        }
    }

    #[test]
    fn test_builtin_bodies_match_declared_variables() {
        for template in builtin_templates() {
            let mut used = placeholders(&template.body);
            let mut declared = template.variables.clone();
            used.sort();
            declared.sort();
            assert_eq!(used, declared, "template {}", template.id);
        }
    }

    #[test]
    fn test_suspended_does_not_need_expiry() {
        let suspended = builtin_templates()
            .into_iter()
            .find(|t| t.id == MEMBERSHIP_SUSPENDED)
            .unwrap();
        assert!(!suspended.variables.iter().any(|v| v == EXPIRY_DATE));
    }
}
