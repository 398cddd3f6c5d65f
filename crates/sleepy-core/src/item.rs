//! Items — checkout-able inventory records, optionally owned by a person.

use chrono::{DateTime, TimeDelta, Utc};

use crate::{
  Result,
  error::require_text,
  person::{PersonId, display_name},
};

/// Backend-assigned identifier of an [`Item`].
pub type ItemId = i64;

/// Maximum length, in characters, of an item name.
pub const MAX_ITEM_NAME_LEN: usize = 100;

/// The owner of an item, as embedded in the item itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Owner {
  pub id:        PersonId,
  pub firstname: String,
  pub lastname:  String,
}

impl Owner {
  /// `"Last, First"`.
  pub fn display_name(&self) -> String { display_name(&self.firstname, &self.lastname) }
}

/// A stored item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
  pub id:          ItemId,
  pub name:        String,
  pub checked_out: bool,
  /// Set at creation and refreshed by every update.
  pub updated:     DateTime<Utc>,
  pub owner:       Option<Owner>,
}

/// Validated input for creating an item.
///
/// `person_id` is stored as given; callers resolve it against the store
/// before building a `NewItem`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewItem {
  name:      String,
  person_id: Option<PersonId>,
}

impl NewItem {
  pub fn new(name: Option<String>, person_id: Option<PersonId>) -> Result<Self> {
    Ok(Self {
      name: require_text("name", name, MAX_ITEM_NAME_LEN)?,
      person_id,
    })
  }

  pub fn name(&self) -> &str { &self.name }

  pub fn person_id(&self) -> Option<PersonId> { self.person_id }
}

/// What an update does to an item's owner.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OwnerChange {
  #[default]
  Keep,
  Clear,
  Assign(PersonId),
}

/// A partial update. `None` fields keep their stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemUpdate {
  name:        Option<String>,
  checked_out: Option<bool>,
  owner:       OwnerChange,
}

impl ItemUpdate {
  /// A supplied name is held to the same rules as on creation.
  pub fn new(
    name: Option<String>,
    checked_out: Option<bool>,
    owner: OwnerChange,
  ) -> Result<Self> {
    let name = name
      .map(|n| require_text("name", Some(n), MAX_ITEM_NAME_LEN))
      .transpose()?;
    Ok(Self { name, checked_out, owner })
  }

  /// Replace the owner change, keeping the already-validated fields.
  pub fn with_owner(self, owner: OwnerChange) -> Self { Self { owner, ..self } }

  pub fn name(&self) -> Option<&str> { self.name.as_deref() }

  pub fn checked_out(&self) -> Option<bool> { self.checked_out }

  pub fn owner(&self) -> OwnerChange { self.owner }
}

/// Items updated after this instant count as recent checkouts.
pub fn recent_checkout_cutoff(now: DateTime<Utc>) -> DateTime<Utc> {
  now - TimeDelta::hours(1)
}
