//! Error types for `sleepy-core`.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
  #[error("invalid {field}: {reason}")]
  Validation {
    field:  &'static str,
    reason: String,
  },
}

impl Error {
  pub(crate) fn missing(field: &'static str) -> Self {
    Error::Validation { field, reason: "must not be empty".to_owned() }
  }

  pub(crate) fn nul(field: &'static str) -> Self {
    Error::Validation {
      field,
      reason: "must not contain NUL characters".to_owned(),
    }
  }

  pub(crate) fn too_long(field: &'static str, max: usize) -> Self {
    Error::Validation {
      field,
      reason: format!("must be at most {max} characters"),
    }
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Check a required text field: present, non-empty, free of NULs, and at most
/// `max` chars.
pub(crate) fn require_text(
  field: &'static str,
  value: Option<String>,
  max:   usize,
) -> Result<String> {
  let value = value.filter(|v| !v.is_empty()).ok_or_else(|| Error::missing(field))?;
  if value.contains('\0') {
    return Err(Error::nul(field));
  }
  if value.chars().count() > max {
    return Err(Error::too_long(field, max));
  }
  Ok(value)
}
