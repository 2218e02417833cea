//! Field-level validation shared by every domain module.

use thiserror::Error;

/// Errors produced when a request or entity fails validation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{field} cannot be empty")]
    Empty { field: &'static str },
    #[error("{field} too short (min {min} characters)")]
    TooShort { field: &'static str, min: usize },
    #[error("{field} too long (max {max} characters)")]
    TooLong { field: &'static str, max: usize },
    #[error("too many {field} (max {max})")]
    TooMany { field: &'static str, max: usize },
    #[error("{field} is invalid: {reason}")]
    Invalid { field: &'static str, reason: String },
}

impl ValidationError {
    /// Name of the offending field.
    pub fn field(&self) -> &'static str {
        match self {
            Self::Empty { field }
            | Self::TooShort { field, .. }
            | Self::TooLong { field, .. }
            | Self::TooMany { field, .. }
            | Self::Invalid { field, .. } => field,
        }
    }
}

/// Requires `value` to be non-blank and at most `max` characters.
///
/// Length is counted in characters, not bytes, so multi-byte names are not
/// penalised.
pub fn require_text(field: &'static str, value: &str, max: usize) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::Empty { field });
    }
    limit_text(field, value, max)
}

/// Rejects `value` when it is longer than `max` characters. Blank is allowed.
pub fn limit_text(field: &'static str, value: &str, max: usize) -> Result<(), ValidationError> {
    if value.chars().count() > max {
        return Err(ValidationError::TooLong { field, max });
    }
    Ok(())
}

/// Validates a list of short labels (topics, animal names, ...).
pub fn require_labels(
    field: &'static str,
    labels: &[String],
    max_items: usize,
    max_len: usize,
) -> Result<(), ValidationError> {
    if labels.len() > max_items {
        return Err(ValidationError::TooMany {
            field,
            max: max_items,
        });
    }
    labels
        .iter()
        .try_for_each(|label| require_text(field, label, max_len))
}

/// Trims every label and drops blanks and case-insensitive duplicates,
/// keeping the first spelling seen.
pub fn normalize_labels(labels: Vec<String>) -> Vec<String> {
    let mut seen = Vec::<String>::with_capacity(labels.len());
    let mut out = Vec::with_capacity(labels.len());
    for label in labels {
        let trimmed = label.trim();
        if trimmed.is_empty() {
            continue;
        }
        let key = trimmed.to_lowercase();
        if seen.contains(&key) {
            continue;
        }
        seen.push(key);
        out.push(trimmed.to_string());
    }
    out
}
