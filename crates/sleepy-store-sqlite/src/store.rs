//! [`SqliteStore`] — the SQLite implementation of [`InventoryStore`].

use std::path::Path;

use chrono::{DateTime, Utc};
use rusqlite::OptionalExtension as _;

use sleepy_core::{
  item::{Item, ItemId, ItemUpdate, NewItem, OwnerChange},
  person::{NewPerson, Person, PersonId},
  store::InventoryStore,
};

use crate::{
  Result,
  encode::{ITEM_COLUMNS, PERSON_COLUMNS, RawItem, RawPerson, encode_dt, now},
  schema::{DROP, SCHEMA},
};

// ─── Row helpers ─────────────────────────────────────────────────────────────

fn item_sql(tail: &str) -> String {
  format!(
    "SELECT {ITEM_COLUMNS}
     FROM items i
     LEFT JOIN people p ON p.id = i.person_id
     {tail}"
  )
}

/// Run an item `SELECT` with `tail` appended (`WHERE` / `ORDER BY`).
fn select_items<P: rusqlite::Params>(
  conn:   &rusqlite::Connection,
  tail:   &str,
  params: P,
) -> rusqlite::Result<Vec<RawItem>> {
  let mut stmt = conn.prepare(&item_sql(tail))?;
  let rows = stmt
    .query_map(params, RawItem::from_row)?
    .collect::<rusqlite::Result<Vec<_>>>()?;
  Ok(rows)
}

fn select_item(conn: &rusqlite::Connection, id: ItemId) -> rusqlite::Result<RawItem> {
  conn.query_row(&item_sql("WHERE i.id = ?1"), rusqlite::params![id], RawItem::from_row)
}

/// Run a person `SELECT` with `tail` appended (`WHERE` / `ORDER BY`).
fn select_people<P: rusqlite::Params>(
  conn:   &rusqlite::Connection,
  tail:   &str,
  params: P,
) -> rusqlite::Result<Vec<RawPerson>> {
  let sql = format!("SELECT {PERSON_COLUMNS} FROM people p {tail}");
  let mut stmt = conn.prepare(&sql)?;
  let rows = stmt
    .query_map(params, RawPerson::from_row)?
    .collect::<rusqlite::Result<Vec<_>>>()?;
  Ok(rows)
}

fn into_items(raws: Vec<RawItem>) -> Result<Vec<Item>> {
  raws.into_iter().map(RawItem::into_item).collect()
}

// ─── Store ───────────────────────────────────────────────────────────────────

/// An inventory store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  pub(crate) conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// Drop every table and recreate the empty schema.
  pub async fn reset(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(DROP)?;
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    tracing::warn!("inventory tables dropped and recreated");
    Ok(())
  }
}

// ─── InventoryStore impl ─────────────────────────────────────────────────────

impl InventoryStore for SqliteStore {
  type Error = crate::Error;

  // ── Items ─────────────────────────────────────────────────────────────────

  async fn list_items(&self) -> Result<Vec<Item>> {
    let raws = self
      .conn
      .call(|conn| {
        Ok(select_items(
          conn,
          "ORDER BY i.updated DESC, i.id DESC",
          rusqlite::params![],
        )?)
      })
      .await?;

    into_items(raws)
  }

  async fn get_item(&self, id: ItemId) -> Result<Option<Item>> {
    let raw = self
      .conn
      .call(move |conn| Ok(select_item(conn, id).optional()?))
      .await?;

    raw.map(RawItem::into_item).transpose()
  }

  async fn create_item(&self, input: NewItem) -> Result<Item> {
    let name      = input.name().to_owned();
    let person_id = input.person_id();
    let at_str    = encode_dt(now());

    let raw = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        tx.execute(
          "INSERT INTO items (name, person_id, checked_out, updated) VALUES (?1, ?2, 0, ?3)",
          rusqlite::params![name, person_id, at_str],
        )?;
        let id = tx.last_insert_rowid();
        let raw = select_item(&tx, id)?;
        tx.commit()?;
        Ok(raw)
      })
      .await?;

    raw.into_item()
  }

  async fn update_item(&self, id: ItemId, update: ItemUpdate) -> Result<Option<Item>> {
    let name        = update.name().map(str::to_owned);
    let checked_out = update.checked_out();
    let owner       = update.owner();
    let at_str      = encode_dt(now());

    let raw = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        let changed = tx.execute(
          "UPDATE items
           SET name        = COALESCE(?2, name),
               checked_out = COALESCE(?3, checked_out),
               updated     = ?4
           WHERE id = ?1",
          rusqlite::params![id, name, checked_out, at_str],
        )?;
        if changed == 0 {
          return Ok(None);
        }

        match owner {
          OwnerChange::Keep => {}
          OwnerChange::Clear => {
            tx.execute(
              "UPDATE items SET person_id = NULL WHERE id = ?1",
              rusqlite::params![id],
            )?;
          }
          OwnerChange::Assign(person_id) => {
            tx.execute(
              "UPDATE items SET person_id = ?2 WHERE id = ?1",
              rusqlite::params![id, person_id],
            )?;
          }
        }

        let raw = select_item(&tx, id)?;
        tx.commit()?;
        Ok(Some(raw))
      })
      .await?;

    raw.map(RawItem::into_item).transpose()
  }

  async fn delete_item(&self, id: ItemId) -> Result<bool> {
    let removed = self
      .conn
      .call(move |conn| {
        Ok(conn.execute("DELETE FROM items WHERE id = ?1", rusqlite::params![id])?)
      })
      .await?;

    Ok(removed > 0)
  }

  async fn recent_checkouts(&self, since: DateTime<Utc>) -> Result<Vec<Item>> {
    let since_str = encode_dt(since);

    let raws = self
      .conn
      .call(move |conn| {
        Ok(select_items(
          conn,
          "WHERE i.checked_out = 1 AND i.updated > ?1
           ORDER BY i.updated DESC, i.id DESC",
          rusqlite::params![since_str],
        )?)
      })
      .await?;

    into_items(raws)
  }

  // ── People ────────────────────────────────────────────────────────────────

  async fn list_people(&self) -> Result<Vec<Person>> {
    let raws = self
      .conn
      .call(|conn| {
        Ok(select_people(
          conn,
          "ORDER BY p.created DESC, p.id DESC",
          rusqlite::params![],
        )?)
      })
      .await?;

    raws.into_iter().map(RawPerson::into_person).collect()
  }

  async fn get_person(&self, id: PersonId) -> Result<Option<Person>> {
    let raw = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!("SELECT {PERSON_COLUMNS} FROM people p WHERE p.id = ?1"),
              rusqlite::params![id],
              RawPerson::from_row,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawPerson::into_person).transpose()
  }

  async fn create_person(&self, input: NewPerson) -> Result<Person> {
    let created = now();
    let first   = input.firstname().to_owned();
    let last    = input.lastname().to_owned();
    let at_str  = encode_dt(created);

    let id = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO people (firstname, lastname, created) VALUES (?1, ?2, ?3)",
          rusqlite::params![first, last, at_str],
        )?;
        Ok(conn.last_insert_rowid())
      })
      .await?;

    Ok(Person {
      id,
      firstname: input.firstname().to_owned(),
      lastname: input.lastname().to_owned(),
      created,
      n_items: 0,
    })
  }

  async fn delete_person(&self, id: PersonId) -> Result<bool> {
    // `ON DELETE SET NULL` detaches the person's items.
    let removed = self
      .conn
      .call(move |conn| {
        Ok(conn.execute("DELETE FROM people WHERE id = ?1", rusqlite::params![id])?)
      })
      .await?;

    Ok(removed > 0)
  }
}
