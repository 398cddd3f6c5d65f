//! Handlers for `/items` endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/items/` | Most recently updated first |
//! | `GET`    | `/items/{id}` | 404 if not found |
//! | `POST`   | `/items/` | Body: [`CreateItemBody`]; returns 201 |
//! | `PUT`    | `/items/{id}` | Body: [`UpdateItemBody`] |
//! | `DELETE` | `/items/{id}` | Returns the deleted id |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
};
use serde::Deserialize;
use sleepy_core::{
  item::{ItemUpdate, NewItem, OwnerChange},
  store::InventoryStore,
};

use crate::{
  body::{ApiJson, PersonIdInput, RawPersonId, parse_id, present},
  error::ApiError,
  views::{Deleted, ItemList, ItemView, ItemWritten},
};

// ─── List ─────────────────────────────────────────────────────────────────────

/// `GET /items/`
pub async fn list<S>(State(store): State<Arc<S>>) -> Result<Json<ItemList>, ApiError>
where
  S: InventoryStore,
{
  let items = store.list_items().await.map_err(ApiError::store)?;
  Ok(Json(items.into_iter().collect()))
}

// ─── Get one ──────────────────────────────────────────────────────────────────

/// `GET /items/{id}`
pub async fn get_one<S>(
  State(store): State<Arc<S>>,
  Path(raw_id): Path<String>,
) -> Result<Json<ItemView>, ApiError>
where
  S: InventoryStore,
{
  let id = parse_id("item", &raw_id)?;
  let item = store
    .get_item(id)
    .await
    .map_err(ApiError::store)?
    .ok_or_else(|| ApiError::NotFound(format!("item {id} not found")))?;
  Ok(Json(item.into()))
}

// ─── Create ───────────────────────────────────────────────────────────────────

/// JSON body accepted by `POST /items/`.
#[derive(Debug, Deserialize)]
pub struct CreateItemBody {
  pub name:      Option<String>,
  pub person_id: Option<RawPersonId>,
}

/// `POST /items/` — returns 201 + the stored item.
///
/// A `person_id` that names no stored person leaves the item unowned.
pub async fn create<S>(
  State(store): State<Arc<S>>,
  ApiJson(body): ApiJson<CreateItemBody>,
) -> Result<impl IntoResponse, ApiError>
where
  S: InventoryStore,
{
  let person_id = match PersonIdInput::from_raw(body.person_id) {
    PersonIdInput::Id(pid) => {
      let person = store.get_person(pid).await.map_err(ApiError::store)?;
      if person.is_none() {
        tracing::debug!(person_id = pid, "unknown person_id; creating unowned item");
      }
      person.map(|p| p.id)
    }
    PersonIdInput::Malformed(raw) => {
      tracing::debug!(person_id = %raw, "malformed person_id; creating unowned item");
      None
    }
    PersonIdInput::Unset => None,
  };

  let item = store
    .create_item(NewItem::new(body.name, person_id)?)
    .await
    .map_err(ApiError::store)?;
  tracing::info!(item_id = item.id, "item created");

  Ok((
    StatusCode::CREATED,
    Json(ItemWritten {
      message: "Successfully added new item",
      item:    item.into(),
    }),
  ))
}

// ─── Update ───────────────────────────────────────────────────────────────────

/// JSON body accepted by `PUT /items/{id}`. Every field is optional.
#[derive(Debug, Deserialize)]
pub struct UpdateItemBody {
  pub name:        Option<String>,
  pub checked_out: Option<bool>,
  /// Absent keeps the owner, `null`/`""`/`0` clears it, anything else must
  /// name a stored person.
  #[serde(default, deserialize_with = "present")]
  pub person_id:   Option<Option<RawPersonId>>,
}

/// `PUT /items/{id}` — always refreshes the item's `updated` timestamp.
pub async fn update<S>(
  State(store): State<Arc<S>>,
  Path(raw_id): Path<String>,
  ApiJson(body): ApiJson<UpdateItemBody>,
) -> Result<Json<ItemWritten>, ApiError>
where
  S: InventoryStore,
{
  let id = parse_id("item", &raw_id)?;
  let not_found = || ApiError::NotFound(format!("item {id} not found"));

  store
    .get_item(id)
    .await
    .map_err(ApiError::store)?
    .ok_or_else(not_found)?;

  // Reject a bad body before looking up the requested owner.
  let update = ItemUpdate::new(body.name, body.checked_out, OwnerChange::Keep)?;

  let owner = match body.person_id.map(PersonIdInput::from_raw) {
    None => OwnerChange::Keep,
    Some(PersonIdInput::Unset) => OwnerChange::Clear,
    Some(PersonIdInput::Id(pid)) => {
      store
        .get_person(pid)
        .await
        .map_err(ApiError::store)?
        .ok_or_else(|| ApiError::NotFound(format!("person {pid} not found")))?;
      OwnerChange::Assign(pid)
    }
    Some(PersonIdInput::Malformed(raw)) => {
      return Err(ApiError::NotFound(format!("person {raw} not found")));
    }
  };

  let item = store
    .update_item(id, update.with_owner(owner))
    .await
    .map_err(ApiError::store)?
    .ok_or_else(not_found)?;
  tracing::info!(item_id = id, "item updated");

  Ok(Json(ItemWritten {
    message: "Successfully updated item.",
    item:    item.into(),
  }))
}

// ─── Delete ───────────────────────────────────────────────────────────────────

/// `DELETE /items/{id}`
pub async fn delete<S>(
  State(store): State<Arc<S>>,
  Path(raw_id): Path<String>,
) -> Result<Json<Deleted>, ApiError>
where
  S: InventoryStore,
{
  let id = parse_id("item", &raw_id)?;
  if !store.delete_item(id).await.map_err(ApiError::store)? {
    return Err(ApiError::NotFound(format!("item {id} not found")));
  }
  tracing::info!(item_id = id, "item deleted");

  Ok(Json(Deleted { message: "Successfully deleted item.", id }))
}
