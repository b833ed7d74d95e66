//! Variable substitution engine for templates

use super::types::Variables;

/// Substitute {{variable}} placeholders for the given declared names.
///
/// Only names listed in `declared` are replaced; any other `{{token}}` in the
/// body is left as-is. Names without a value are skipped. The body is scanned
/// once, so supplied values are inserted verbatim and never re-expanded.
pub fn substitute_variables(body: &str, declared: &[String], variables: &Variables) -> String {
    let mut result = String::with_capacity(body.len());
    let mut rest = body;

    while let Some(start) = rest.find("{{") {
        let after = &rest[start + 2..];
        let Some(end) = after.find("}}") else {
            break;
        };

        let name = &after[..end];
        result.push_str(&rest[..start]);
        match variables.get(name) {
            Some(value) if declared.iter().any(|d| d == name) => result.push_str(value),
            _ => result.push_str(&rest[start..start + 2 + end + 2]),
        }
        rest = &after[end + 2..];
    }

    result.push_str(rest);
    result
}

/// Names of all {{placeholder}} tokens in a body, in order of first appearance
pub fn placeholders(body: &str) -> Vec<String> {
    let mut found: Vec<String> = Vec::new();
    let mut rest = body;

    while let Some(start) = rest.find("{{") {
        let after = &rest[start + 2..];
        let Some(end) = after.find("}}") else {
            break;
        };

        let name = &after[..end];
        if !name.is_empty() && !found.iter().any(|f| f == name) {
            found.push(name.to_string());
        }
        rest = &after[end + 2..];
    }

    found
}
