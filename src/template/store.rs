//! Read-only template storage

use std::sync::Arc;

use super::defaults::builtin_templates;
use super::substitution::{placeholders, substitute_variables};
use super::types::{RenderedTemplate, Template, TemplateError, TemplateResult, Variables};

/// Immutable template table, fixed at construction
#[derive(Debug, Clone)]
pub struct TemplateStore {
    templates: Vec<Template>,
}

impl Default for TemplateStore {
    fn default() -> Self {
        Self::with_builtins()
    }
}

impl TemplateStore {
    /// Build a store from the given templates, validating each one
    pub fn new(templates: Vec<Template>) -> TemplateResult<Self> {
        let mut store = Self {
            templates: Vec::with_capacity(templates.len()),
        };

        for template in templates {
            template.validate()?;

            if store.exists(&template.id) {
                return Err(TemplateError::AlreadyExists(template.id));
            }

            let undeclared: Vec<String> = placeholders(&template.body)
                .into_iter()
                .filter(|name| !template.variables.contains(name))
                .collect();
            if !undeclared.is_empty() {
                tracing::warn!(
                    template_id = %template.id,
                    tokens = ?undeclared,
                    "Template body contains undeclared placeholders; they will not be substituted"
                );
            }

            store.templates.push(template);
        }

        Ok(store)
    }

    /// Store holding only the built-in FitAccess templates
    pub fn with_builtins() -> Self {
        Self {
            templates: builtin_templates(),
        }
    }

    /// Built-in templates followed by `extra`
    pub fn with_additional(extra: Vec<Template>) -> TemplateResult<Self> {
        let mut templates = builtin_templates();
        templates.extend(extra);
        Self::new(templates)
    }

    /// Get a template by ID
    pub fn get(&self, id: &str) -> TemplateResult<&Template> {
        self.templates
            .iter()
            .find(|t| t.id == id)
            .ok_or_else(|| TemplateError::NotFound(id.to_string()))
    }

    /// List all templates in registration order
    pub fn list(&self) -> Vec<Template> {
        self.templates.clone()
    }

    /// Check if a template exists
    pub fn exists(&self, id: &str) -> bool {
        self.templates.iter().any(|t| t.id == id)
    }

    /// Get the number of templates
    pub fn count(&self) -> usize {
        self.templates.len()
    }

    /// Render a template, rejecting when any declared variable is missing
    pub fn render(&self, id: &str, variables: &Variables) -> TemplateResult<RenderedTemplate> {
        let template = self.get(id)?;

        let missing = template.missing_variables(variables);
        if !missing.is_empty() {
            return Err(TemplateError::MissingVariables(missing));
        }

        Ok(RenderedTemplate {
            template_id: template.id.clone(),
            subject: template.subject.clone(),
            body: substitute_variables(&template.body, &template.variables, variables),
        })
    }
}

/// Create an Arc-wrapped store of the built-in templates plus `extra`
pub fn create_template_store(extra: Vec<Template>) -> TemplateResult<Arc<TemplateStore>> {
    TemplateStore::with_additional(extra).map(Arc::new)
}
