//! Request-side plumbing shared by the handlers: the JSON extractor, path id
//! parsing, and the loosely-typed `person_id` field.

use axum::extract::FromRequest;
use serde::{Deserialize, Deserializer};
use sleepy_core::person::PersonId;

use crate::error::ApiError;

/// `axum::Json`, but malformed bodies are reported as [`ApiError::BadRequest`].
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);

/// Parse a numeric path id. Anything unparseable cannot name a stored record,
/// so it is reported as not found.
pub fn parse_id(kind: &str, raw: &str) -> Result<i64, ApiError> {
  raw
    .parse()
    .map_err(|_| ApiError::NotFound(format!("{kind} {raw} not found")))
}

/// A `person_id` as clients send it: a number, or a string holding one.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawPersonId {
  Number(i64),
  Text(String),
}

/// What a `person_id` field asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersonIdInput {
  /// `null`, `""` or `0`.
  Unset,
  Id(PersonId),
  Malformed(String),
}

impl PersonIdInput {
  pub fn from_raw(raw: Option<RawPersonId>) -> Self {
    match raw {
      None | Some(RawPersonId::Number(0)) => Self::Unset,
      Some(RawPersonId::Number(id)) => Self::Id(id),
      Some(RawPersonId::Text(s)) if s.is_empty() => Self::Unset,
      Some(RawPersonId::Text(s)) => match s.parse::<PersonId>() {
        Ok(0) => Self::Unset,
        Ok(id) => Self::Id(id),
        Err(_) => Self::Malformed(s),
      },
    }
  }
}

/// Distinguishes an absent field (`None`) from an explicit `null`
/// (`Some(None)`). Use with `#[serde(default)]`.
pub fn present<'de, D, T>(d: D) -> Result<Option<T>, D::Error>
where
  D: Deserializer<'de>,
  T: Deserialize<'de>,
{
  T::deserialize(d).map(Some)
}
