use serde::{Deserialize, Serialize};

/// The outcome of validating a string, a batch of fragments, or a whole
/// document.
///
/// `errors` keeps discovery order, so repeated validation of the same input
/// yields an identical value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SecurityValidationResult {
    /// `true` exactly when `errors` is empty.
    pub is_valid: bool,
    /// One entry per detected injection category (location-tagged when the
    /// result comes from a tree walk).
    pub errors: Vec<String>,
    /// Control-character-free copy of the input, present only for
    /// single-string validation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sanitized_content: Option<String>,
}

impl SecurityValidationResult {
    /// A clean result with no errors and no sanitized content.
    pub fn valid() -> Self {
        Self::from_errors(Vec::new())
    }

    /// Build a result whose validity is derived from `errors`.
    pub fn from_errors(errors: Vec<String>) -> Self {
        Self {
            is_valid: errors.is_empty(),
            errors,
            sanitized_content: None,
        }
    }

    pub fn with_sanitized_content(mut self, content: String) -> Self {
        self.sanitized_content = Some(content);
        self
    }

    /// Prefix every error with `location`, producing `"<location>: <error>"`.
    pub fn located_errors(&self, location: &str) -> Vec<String> {
        self.errors
            .iter()
            .map(|e| format!("{location}: {e}"))
            .collect()
    }
}

impl Default for SecurityValidationResult {
    fn default() -> Self {
        Self::valid()
    }
}
