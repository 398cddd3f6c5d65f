//! Integration tests for `SqliteStore` against an in-memory database.

use chrono::{TimeDelta, Utc};
use sleepy_core::{
  item::{ItemId, ItemUpdate, NewItem, OwnerChange, recent_checkout_cutoff},
  person::NewPerson,
  store::InventoryStore,
};

use crate::{SqliteStore, encode::encode_dt};

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

fn new_item(name: &str, person_id: Option<i64>) -> NewItem {
  NewItem::new(Some(name.into()), person_id).unwrap()
}

fn new_person(first: &str, last: &str) -> NewPerson {
  NewPerson::new(Some(first.into()), Some(last.into())).unwrap()
}

fn check_out() -> ItemUpdate {
  ItemUpdate::new(None, Some(true), OwnerChange::Keep).unwrap()
}

/// Move an item's `updated` timestamp into the past.
async fn backdate(s: &SqliteStore, id: ItemId, by: TimeDelta) {
  let at = encode_dt(Utc::now() - by);
  s.conn
    .call(move |conn| {
      conn.execute(
        "UPDATE items SET updated = ?2 WHERE id = ?1",
        rusqlite::params![id, at],
      )?;
      Ok(())
    })
    .await
    .unwrap();
}

// ─── Items ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn create_and_get_item() {
  let s = store().await;

  let item = s.create_item(new_item("Foo", None)).await.unwrap();
  assert_eq!(item.name, "Foo");
  assert!(!item.checked_out);
  assert!(item.owner.is_none());

  let fetched = s.get_item(item.id).await.unwrap().expect("item exists");
  assert_eq!(fetched, item);
}

#[tokio::test]
async fn get_item_missing_returns_none() {
  let s = store().await;
  assert!(s.get_item(42).await.unwrap().is_none());
}

#[tokio::test]
async fn create_item_with_owner() {
  let s = store().await;
  let steve = s.create_person(new_person("Steve", "Loria")).await.unwrap();

  let item = s.create_item(new_item("Ipod", Some(steve.id))).await.unwrap();
  let owner = item.owner.expect("owned");
  assert_eq!(owner.id, steve.id);
  assert_eq!(owner.display_name(), "Loria, Steve");

  let steve = s.get_person(steve.id).await.unwrap().unwrap();
  assert_eq!(steve.n_items, 1);
}

#[tokio::test]
async fn list_items_most_recently_updated_first() {
  let s = store().await;
  let foo = s.create_item(new_item("Foo", None)).await.unwrap();
  let bar = s.create_item(new_item("Bar", None)).await.unwrap();

  let names: Vec<_> = s.list_items().await.unwrap().into_iter().map(|i| i.id).collect();
  assert_eq!(names, vec![bar.id, foo.id]);

  // Touching Foo moves it to the front.
  s.update_item(foo.id, check_out()).await.unwrap();
  let items = s.list_items().await.unwrap();
  assert_eq!(items[0].id, foo.id);
  assert!(items.windows(2).all(|w| w[0].updated >= w[1].updated));
}

#[tokio::test]
async fn update_overwrites_supplied_fields_only() {
  let s = store().await;
  let item = s.create_item(new_item("Foo", None)).await.unwrap();

  let renamed = s
    .update_item(
      item.id,
      ItemUpdate::new(Some("Baz".into()), None, OwnerChange::Keep).unwrap(),
    )
    .await
    .unwrap()
    .unwrap();
  assert_eq!(renamed.name, "Baz");
  assert!(!renamed.checked_out);
  assert!(renamed.updated >= item.updated);

  let checked = s.update_item(item.id, check_out()).await.unwrap().unwrap();
  assert_eq!(checked.name, "Baz");
  assert!(checked.checked_out);
}

#[tokio::test]
async fn update_missing_item_returns_none() {
  let s = store().await;
  assert!(s.update_item(7, check_out()).await.unwrap().is_none());
}

#[tokio::test]
async fn reassigning_owner_moves_membership() {
  let s = store().await;
  let steve = s.create_person(new_person("Steve", "Loria")).await.unwrap();
  let monty = s.create_person(new_person("Monty", "Python")).await.unwrap();
  let item = s.create_item(new_item("Foo", Some(steve.id))).await.unwrap();

  let moved = s
    .update_item(item.id, ItemUpdate::new(None, None, OwnerChange::Assign(monty.id)).unwrap())
    .await
    .unwrap()
    .unwrap();
  assert_eq!(moved.owner.map(|o| o.id), Some(monty.id));

  assert_eq!(s.get_person(steve.id).await.unwrap().unwrap().n_items, 0);
  assert_eq!(s.get_person(monty.id).await.unwrap().unwrap().n_items, 1);

  let cleared = s
    .update_item(item.id, ItemUpdate::new(None, None, OwnerChange::Clear).unwrap())
    .await
    .unwrap()
    .unwrap();
  assert!(cleared.owner.is_none());
  assert_eq!(s.get_person(monty.id).await.unwrap().unwrap().n_items, 0);
}

#[tokio::test]
async fn assigning_unknown_owner_fails_and_changes_nothing() {
  let s = store().await;
  let item = s.create_item(new_item("Foo", None)).await.unwrap();

  let result = s
    .update_item(item.id, ItemUpdate::new(Some("Bar".into()), None, OwnerChange::Assign(99)).unwrap())
    .await;
  assert!(result.is_err());

  let fetched = s.get_item(item.id).await.unwrap().unwrap();
  assert_eq!(fetched, item);
}

#[tokio::test]
async fn delete_item() {
  let s = store().await;
  let item = s.create_item(new_item("Foo", None)).await.unwrap();

  assert!(s.delete_item(item.id).await.unwrap());
  assert!(s.get_item(item.id).await.unwrap().is_none());
  assert!(!s.delete_item(item.id).await.unwrap());
}

// ─── Recent checkouts ────────────────────────────────────────────────────────

#[tokio::test]
async fn recent_checkouts_filters_by_flag_and_age() {
  let s = store().await;
  let fresh = s.create_item(new_item("Fresh", None)).await.unwrap();
  let stale = s.create_item(new_item("Stale", None)).await.unwrap();
  let shelf = s.create_item(new_item("Shelf", None)).await.unwrap();

  s.update_item(fresh.id, check_out()).await.unwrap();
  s.update_item(stale.id, check_out()).await.unwrap();
  backdate(&s, stale.id, TimeDelta::minutes(61)).await;

  let recent = s.recent_checkouts(recent_checkout_cutoff(Utc::now())).await.unwrap();
  let ids: Vec<_> = recent.iter().map(|i| i.id).collect();
  assert_eq!(ids, vec![fresh.id]);
  assert!(!ids.contains(&shelf.id));
}

#[tokio::test]
async fn recent_checkouts_newest_first() {
  let s = store().await;
  let a = s.create_item(new_item("A", None)).await.unwrap();
  let b = s.create_item(new_item("B", None)).await.unwrap();
  s.update_item(a.id, check_out()).await.unwrap();
  s.update_item(b.id, check_out()).await.unwrap();
  backdate(&s, b.id, TimeDelta::minutes(30)).await;

  let recent = s.recent_checkouts(recent_checkout_cutoff(Utc::now())).await.unwrap();
  let ids: Vec<_> = recent.iter().map(|i| i.id).collect();
  assert_eq!(ids, vec![a.id, b.id]);
}

// ─── People ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn create_and_list_people() {
  let s = store().await;
  let steve = s.create_person(new_person("Steve", "Loria")).await.unwrap();
  let monty = s.create_person(new_person("Monty", "Python")).await.unwrap();
  assert_eq!(steve.n_items, 0);

  let people = s.list_people().await.unwrap();
  let ids: Vec<_> = people.iter().map(|p| p.id).collect();
  assert_eq!(ids, vec![monty.id, steve.id]);

  let fetched = s.get_person(steve.id).await.unwrap().unwrap();
  assert_eq!(fetched, steve);
}

#[tokio::test]
async fn deleting_person_keeps_their_items() {
  let s = store().await;
  let steve = s.create_person(new_person("Steve", "Loria")).await.unwrap();
  let item = s.create_item(new_item("Foo", Some(steve.id))).await.unwrap();

  assert!(s.delete_person(steve.id).await.unwrap());
  assert!(s.get_person(steve.id).await.unwrap().is_none());
  assert!(!s.delete_person(steve.id).await.unwrap());

  let orphan = s.get_item(item.id).await.unwrap().expect("item survives");
  assert!(orphan.owner.is_none());
}

#[tokio::test]
async fn reset_empties_both_tables() {
  let s = store().await;
  let steve = s.create_person(new_person("Steve", "Loria")).await.unwrap();
  s.create_item(new_item("Foo", Some(steve.id))).await.unwrap();

  s.reset().await.unwrap();
  assert!(s.list_items().await.unwrap().is_empty());
  assert!(s.list_people().await.unwrap().is_empty());

  // The schema is usable again afterwards.
  s.create_item(new_item("Bar", None)).await.unwrap();
}
