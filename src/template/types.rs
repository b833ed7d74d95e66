//! Template types and error definitions

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Template-specific error type
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TemplateError {
    #[error("Template with ID '{0}' not found")]
    NotFound(String),

    #[error("Template already exists: {0}")]
    AlreadyExists(String),

    #[error("Invalid template ID: {0}")]
    InvalidId(String),

    #[error("Invalid template: {0}")]
    InvalidTemplate(String),

    /// Every declared variable absent from the substitutions, in declaration order
    #[error("Missing required variables: {}", .0.join(", "))]
    MissingVariables(Vec<String>),
}

/// Result type for template operations
pub type TemplateResult<T> = Result<T, TemplateError>;

/// Placeholder name to substituted value
pub type Variables = HashMap<String, String>;

/// An SMS template definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Template {
    /// Unique template identifier (alphanumeric, dash, underscore)
    pub id: String,

    /// Human-readable template name
    pub name: String,

    /// Subject line shown in the dashboard
    pub subject: String,

    /// Message body with {{variable}} placeholders
    pub body: String,

    /// Placeholder names the body requires, in declaration order
    #[serde(default)]
    pub variables: Vec<String>,
}

impl Template {
    /// Create a template from borrowed parts
    pub fn new(id: &str, name: &str, subject: &str, body: &str, variables: &[&str]) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            subject: subject.to_string(),
            body: body.to_string(),
            variables: variables.iter().map(|v| v.to_string()).collect(),
        }
    }

    /// Validate the template
    pub fn validate(&self) -> TemplateResult<()> {
        // Validate ID
        if self.id.is_empty() || self.id.len() > 64 {
            return Err(TemplateError::InvalidId(
                "ID must be 1-64 characters".to_string(),
            ));
        }

        if !self
            .id
            .chars()
            .all(|c| c.is_alphanumeric() || c == '-' || c == '_')
        {
            return Err(TemplateError::InvalidId(
                "ID must contain only alphanumeric, dash, or underscore".to_string(),
            ));
        }

        // Validate name
        if self.name.is_empty() || self.name.len() > 256 {
            return Err(TemplateError::InvalidTemplate(
                "Name must be 1-256 characters".to_string(),
            ));
        }

        if self.body.trim().is_empty() {
            return Err(TemplateError::InvalidTemplate(format!(
                "Template '{}' has an empty body",
                self.id
            )));
        }

        // Validate declared variables
        for (i, var) in self.variables.iter().enumerate() {
            if var.is_empty() || !var.chars().all(|c| c.is_alphanumeric() || c == '_') {
                return Err(TemplateError::InvalidTemplate(format!(
                    "Template '{}' declares invalid variable name '{}'",
                    self.id, var
                )));
            }

            if self.variables[..i].contains(var) {
                return Err(TemplateError::InvalidTemplate(format!(
                    "Template '{}' declares variable '{}' more than once",
                    self.id, var
                )));
            }
        }

        Ok(())
    }

    /// Declared variables that are absent (or empty) in `variables`
    pub fn missing_variables(&self, variables: &Variables) -> Vec<String> {
        self.variables
            .iter()
            .filter(|name| variables.get(*name).is_none_or(|value| value.is_empty()))
            .cloned()
            .collect()
    }
}

/// A rendered template ready to be sent
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedTemplate {
    /// Source template ID
    pub template_id: String,

    /// Subject from template
    pub subject: String,

    /// Body with every declared placeholder substituted
    pub body: String,
}
