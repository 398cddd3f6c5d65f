//! Encoding and decoding helpers between Rust domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Timestamps are stored as RFC 3339 UTC strings with a fixed microsecond
//! precision, so string order in SQL matches chronological order.

use chrono::{DateTime, SecondsFormat, SubsecRound as _, Utc};
use sleepy_core::{
  item::{Item, Owner},
  person::Person,
};

use crate::{Error, Result};

// ─── DateTime<Utc> ────────────────────────────────────────────────────────────

/// The current time at the precision the store keeps.
pub fn now() -> DateTime<Utc> { Utc::now().trunc_subsecs(6) }

pub fn encode_dt(dt: DateTime<Utc>) -> String {
  dt.to_rfc3339_opts(SecondsFormat::Micros, true)
}

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── Raw rows ─────────────────────────────────────────────────────────────────

/// Column list matching [`RawItem::from_row`]. Expects `items i` left-joined
/// with `people p` on the owner.
pub const ITEM_COLUMNS: &str =
  "i.id, i.name, i.checked_out, i.updated, p.id, p.firstname, p.lastname";

/// An `items` row joined with its owner, before timestamp decoding.
pub struct RawItem {
  pub id:          i64,
  pub name:        String,
  pub checked_out: bool,
  pub updated:     String,
  pub owner_id:    Option<i64>,
  pub owner_first: Option<String>,
  pub owner_last:  Option<String>,
}

impl RawItem {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:          row.get(0)?,
      name:        row.get(1)?,
      checked_out: row.get(2)?,
      updated:     row.get(3)?,
      owner_id:    row.get(4)?,
      owner_first: row.get(5)?,
      owner_last:  row.get(6)?,
    })
  }

  pub fn into_item(self) -> Result<Item> {
    let owner = match (self.owner_id, self.owner_first, self.owner_last) {
      (Some(id), Some(firstname), Some(lastname)) => Some(Owner { id, firstname, lastname }),
      _ => None,
    };
    Ok(Item {
      id: self.id,
      name: self.name,
      checked_out: self.checked_out,
      updated: decode_dt(&self.updated)?,
      owner,
    })
  }
}

/// Column list matching [`RawPerson::from_row`]. Expects `people p`.
pub const PERSON_COLUMNS: &str = "p.id, p.firstname, p.lastname, p.created,
  (SELECT COUNT(*) FROM items i WHERE i.person_id = p.id)";

/// A `people` row with its item count, before timestamp decoding.
pub struct RawPerson {
  pub id:        i64,
  pub firstname: String,
  pub lastname:  String,
  pub created:   String,
  pub n_items:   u32,
}

impl RawPerson {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:        row.get(0)?,
      firstname: row.get(1)?,
      lastname:  row.get(2)?,
      created:   row.get(3)?,
      n_items:   row.get(4)?,
    })
  }

  pub fn into_person(self) -> Result<Person> {
    Ok(Person {
      id:        self.id,
      firstname: self.firstname,
      lastname:  self.lastname,
      created:   decode_dt(&self.created)?,
      n_items:   self.n_items,
    })
  }
}
