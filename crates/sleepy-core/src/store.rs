//! The `InventoryStore` trait.
//!
//! The trait is implemented by storage backends (e.g. `sleepy-store-sqlite`).
//! Higher layers (`sleepy-api`, `sleepy-server`) depend on this abstraction,
//! not on any concrete backend.

use std::future::Future;

use chrono::{DateTime, Utc};

use crate::{
  item::{Item, ItemId, ItemUpdate, NewItem},
  person::{NewPerson, Person, PersonId},
};

/// Abstraction over an inventory backend.
///
/// Every write commits atomically. Timestamps (`Person::created`,
/// `Item::updated`) are assigned by the store.
///
/// All methods return `Send` futures so the trait can be used in multi-threaded
/// async runtimes (e.g. tokio with `axum`).
pub trait InventoryStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Items ─────────────────────────────────────────────────────────────

  /// All items, most recently updated first.
  fn list_items(&self) -> impl Future<Output = Result<Vec<Item>, Self::Error>> + Send + '_;

  /// Retrieve an item by id. Returns `None` if not found.
  fn get_item(
    &self,
    id: ItemId,
  ) -> impl Future<Output = Result<Option<Item>, Self::Error>> + Send + '_;

  /// Persist a new item. `checked_out` starts `false`.
  fn create_item(
    &self,
    input: NewItem,
  ) -> impl Future<Output = Result<Item, Self::Error>> + Send + '_;

  /// Apply `update` to an item and refresh its `updated` timestamp.
  /// Returns `None` if the item does not exist.
  fn update_item(
    &self,
    id: ItemId,
    update: ItemUpdate,
  ) -> impl Future<Output = Result<Option<Item>, Self::Error>> + Send + '_;

  /// Delete an item. Returns `false` if it did not exist.
  fn delete_item(&self, id: ItemId) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  /// Checked-out items updated strictly after `since`, most recent first.
  fn recent_checkouts(
    &self,
    since: DateTime<Utc>,
  ) -> impl Future<Output = Result<Vec<Item>, Self::Error>> + Send + '_;

  // ── People ────────────────────────────────────────────────────────────

  /// All people, most recently created first.
  fn list_people(&self) -> impl Future<Output = Result<Vec<Person>, Self::Error>> + Send + '_;

  /// Retrieve a person by id. Returns `None` if not found.
  fn get_person(
    &self,
    id: PersonId,
  ) -> impl Future<Output = Result<Option<Person>, Self::Error>> + Send + '_;

  /// Persist a new person.
  fn create_person(
    &self,
    input: NewPerson,
  ) -> impl Future<Output = Result<Person, Self::Error>> + Send + '_;

  /// Delete a person. Items they owned are kept and become unowned.
  /// Returns `false` if the person did not exist.
  fn delete_person(
    &self,
    id: PersonId,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;
}
