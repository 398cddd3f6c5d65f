//! People — the owners of items.

use chrono::{DateTime, Utc};

use crate::{Result, error::require_text};

/// Backend-assigned identifier of a [`Person`].
pub type PersonId = i64;

/// Maximum length, in characters, of either name field.
pub const MAX_NAME_LEN: usize = 80;

/// A stored person together with the number of items they own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Person {
  pub id:        PersonId,
  pub firstname: String,
  pub lastname:  String,
  /// Set once when the person is created; never changes.
  pub created:   DateTime<Utc>,
  pub n_items:   u32,
}

impl Person {
  /// `"Last, First"`.
  pub fn display_name(&self) -> String { display_name(&self.firstname, &self.lastname) }
}

pub(crate) fn display_name(firstname: &str, lastname: &str) -> String {
  format!("{lastname}, {firstname}")
}

/// Validated input for creating a person.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPerson {
  firstname: String,
  lastname:  String,
}

impl NewPerson {
  /// Both names are required, non-empty, and at most [`MAX_NAME_LEN`]
  /// characters.
  pub fn new(firstname: Option<String>, lastname: Option<String>) -> Result<Self> {
    Ok(Self {
      firstname: require_text("firstname", firstname, MAX_NAME_LEN)?,
      lastname:  require_text("lastname", lastname, MAX_NAME_LEN)?,
    })
  }

  pub fn firstname(&self) -> &str { &self.firstname }

  pub fn lastname(&self) -> &str { &self.lastname }
}
