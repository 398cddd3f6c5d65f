//! Handler for `GET /recentcheckouts/`.

use std::sync::Arc;

use axum::{Json, extract::State};
use chrono::Utc;
use sleepy_core::{item::recent_checkout_cutoff, store::InventoryStore};

use crate::{error::ApiError, views::ItemList};

/// Items checked out within the past hour, most recent first.
pub async fn recent<S>(State(store): State<Arc<S>>) -> Result<Json<ItemList>, ApiError>
where
  S: InventoryStore,
{
  let since = recent_checkout_cutoff(Utc::now());
  let items = store.recent_checkouts(since).await.map_err(ApiError::store)?;
  Ok(Json(items.into_iter().collect()))
}
