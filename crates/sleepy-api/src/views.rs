//! JSON shapes returned by the API.
//!
//! Records are never serialised directly; these views fix the wire format
//! (`person.name` as `"Last, First"`, `n_items`, and so on).

use chrono::{DateTime, Utc};
use serde::Serialize;
use sleepy_core::{
  item::{Item, ItemId, Owner},
  person::{Person, PersonId},
};

/// An item's owner, embedded in [`ItemView`].
#[derive(Debug, Serialize)]
pub struct OwnerView {
  pub id:   PersonId,
  pub name: String,
}

impl From<Owner> for OwnerView {
  fn from(o: Owner) -> Self {
    Self { name: o.display_name(), id: o.id }
  }
}

#[derive(Debug, Serialize)]
pub struct ItemView {
  pub id:          ItemId,
  pub name:        String,
  pub checked_out: bool,
  pub updated:     DateTime<Utc>,
  pub person:      Option<OwnerView>,
}

impl From<Item> for ItemView {
  fn from(i: Item) -> Self {
    Self {
      id:          i.id,
      name:        i.name,
      checked_out: i.checked_out,
      updated:     i.updated,
      person:      i.owner.map(OwnerView::from),
    }
  }
}

#[derive(Debug, Serialize)]
pub struct PersonView {
  pub id:      PersonId,
  pub name:    String,
  pub created: DateTime<Utc>,
  pub n_items: u32,
}

impl From<Person> for PersonView {
  fn from(p: Person) -> Self {
    Self {
      name:    p.display_name(),
      id:      p.id,
      created: p.created,
      n_items: p.n_items,
    }
  }
}

/// A person as listed by `GET /people/` (no `created`).
#[derive(Debug, Serialize)]
pub struct PersonSummary {
  pub id:      PersonId,
  pub name:    String,
  pub n_items: u32,
}

impl From<Person> for PersonSummary {
  fn from(p: Person) -> Self {
    Self { name: p.display_name(), id: p.id, n_items: p.n_items }
  }
}

// ─── Envelopes ───────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct ItemList {
  pub items: Vec<ItemView>,
}

impl FromIterator<Item> for ItemList {
  fn from_iter<I: IntoIterator<Item = Item>>(iter: I) -> Self {
    Self { items: iter.into_iter().map(ItemView::from).collect() }
  }
}

#[derive(Debug, Serialize)]
pub struct PersonList {
  pub people: Vec<PersonSummary>,
}

/// Response to a successful item create or update.
#[derive(Debug, Serialize)]
pub struct ItemWritten {
  pub message: &'static str,
  pub item:    ItemView,
}

#[derive(Debug, Serialize)]
pub struct PersonCreated {
  pub message: &'static str,
  pub person:  PersonView,
}

#[derive(Debug, Serialize)]
pub struct Deleted {
  pub message: &'static str,
  pub id:      i64,
}
