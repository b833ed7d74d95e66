//! SMS template system.
//!
//! This module provides:
//! - Template definition with variable placeholders ({{variable}})
//! - Read-only template storage, fixed when the dispatcher is built
//! - Variable substitution engine keyed by declared names
//! - The built-in FitAccess member templates
//!
//! # Example
//!
//! ```ignore
//! let store = TemplateStore::with_builtins();
//!
//! let mut variables = Variables::new();
//! variables.insert("memberName".to_string(), "John Smith".to_string());
//! variables.insert("accessCode".to_string(), "GYM8124".to_string());
//!
//! let rendered = store.render("access_code_reset", &variables)?;
//! ```

pub mod defaults;
mod store;
mod substitution;
mod types;

pub use store::{create_template_store, TemplateStore};
pub use substitution::{placeholders, substitute_variables};
pub use types::{RenderedTemplate, Template, TemplateError, TemplateResult, Variables};
