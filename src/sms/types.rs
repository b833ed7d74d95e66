use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::template::{TemplateError, Variables};

use super::provider::ProviderReceipt;

/// A message ready to be handed to a provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutboundMessage {
    /// Destination phone number, validated before dispatch
    pub to: String,
    /// Rendered message body
    pub message: String,
    /// Template the body was rendered from
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template_id: Option<String>,
    /// Substitutions used to render the body
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variables: Option<Variables>,
}

impl OutboundMessage {
    /// Create a raw message not tied to a template
    pub fn new(to: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            to: to.into(),
            message: message.into(),
            template_id: None,
            variables: None,
        }
    }

    /// Attach the originating template and its substitutions
    pub fn with_template(mut self, template_id: impl Into<String>, variables: Variables) -> Self {
        self.template_id = Some(template_id.into());
        self.variables = Some(variables);
        self
    }
}

/// Every way a send can fail
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DeliveryError {
    #[error("Template with ID '{0}' not found")]
    TemplateNotFound(String),

    #[error("Missing required variables: {}", .0.join(", "))]
    MissingVariables(Vec<String>),

    #[error("Invalid phone number format")]
    InvalidDestination,

    #[error("{message}")]
    BackendFailure {
        provider: &'static str,
        message: String,
    },

    #[error("{0}")]
    Unexpected(String),
}

impl DeliveryError {
    pub fn kind(&self) -> DeliveryErrorKind {
        match self {
            DeliveryError::TemplateNotFound(_) => DeliveryErrorKind::TemplateNotFound,
            DeliveryError::MissingVariables(_) => DeliveryErrorKind::MissingVariables,
            DeliveryError::InvalidDestination => DeliveryErrorKind::InvalidDestination,
            DeliveryError::BackendFailure { .. } => DeliveryErrorKind::BackendFailure,
            DeliveryError::Unexpected(_) => DeliveryErrorKind::UnexpectedError,
        }
    }
}

impl From<TemplateError> for DeliveryError {
    fn from(err: TemplateError) -> Self {
        match err {
            TemplateError::NotFound(id) => DeliveryError::TemplateNotFound(id),
            TemplateError::MissingVariables(names) => DeliveryError::MissingVariables(names),
            other => DeliveryError::Unexpected(other.to_string()),
        }
    }
}

/// Machine-readable failure category carried on a failed [`DeliveryResult`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeliveryErrorKind {
    TemplateNotFound,
    MissingVariables,
    InvalidDestination,
    BackendFailure,
    UnexpectedError,
}

impl DeliveryErrorKind {
    /// Label used for metrics
    pub fn as_str(&self) -> &'static str {
        match self {
            DeliveryErrorKind::TemplateNotFound => "template_not_found",
            DeliveryErrorKind::MissingVariables => "missing_variables",
            DeliveryErrorKind::InvalidDestination => "invalid_destination",
            DeliveryErrorKind::BackendFailure => "backend_failure",
            DeliveryErrorKind::UnexpectedError => "unexpected_error",
        }
    }
}

/// Outcome of a single send attempt
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryResult {
    /// Sole signal of outcome
    pub success: bool,
    /// Provider-assigned message ID (success only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message_id: Option<String>,
    /// Human-readable failure description (failure only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Failure category (failure only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_kind: Option<DeliveryErrorKind>,
    /// Unit cost charged by the provider
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cost: Option<f64>,
}

impl DeliveryResult {
    pub fn delivered(receipt: ProviderReceipt) -> Self {
        Self {
            success: true,
            message_id: Some(receipt.message_id),
            error: None,
            error_kind: None,
            cost: Some(receipt.cost),
        }
    }

    pub fn failed(err: &DeliveryError) -> Self {
        Self {
            success: false,
            message_id: None,
            error: Some(err.to_string()),
            error_kind: Some(err.kind()),
            cost: None,
        }
    }
}
