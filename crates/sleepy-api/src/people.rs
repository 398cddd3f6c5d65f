//! Handlers for `/people` endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/people/` | Newest first; entries omit `created` |
//! | `GET`    | `/people/{id}` | 404 if not found |
//! | `POST`   | `/people/` | Body: `{"firstname":"..","lastname":".."}` |
//! | `DELETE` | `/people/{id}` | Owned items are kept, unowned |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
};
use serde::Deserialize;
use sleepy_core::{person::NewPerson, store::InventoryStore};

use crate::{
  body::{ApiJson, parse_id},
  error::ApiError,
  views::{Deleted, PersonCreated, PersonList, PersonView},
};

/// `GET /people/`
pub async fn list<S>(State(store): State<Arc<S>>) -> Result<Json<PersonList>, ApiError>
where
  S: InventoryStore,
{
  let people = store.list_people().await.map_err(ApiError::store)?;
  Ok(Json(PersonList {
    people: people.into_iter().map(Into::into).collect(),
  }))
}

/// `GET /people/{id}`
pub async fn get_one<S>(
  State(store): State<Arc<S>>,
  Path(raw_id): Path<String>,
) -> Result<Json<PersonView>, ApiError>
where
  S: InventoryStore,
{
  let id = parse_id("person", &raw_id)?;
  let person = store
    .get_person(id)
    .await
    .map_err(ApiError::store)?
    .ok_or_else(|| ApiError::NotFound(format!("person {id} not found")))?;
  Ok(Json(person.into()))
}

#[derive(Debug, Deserialize)]
pub struct CreatePersonBody {
  pub firstname: Option<String>,
  pub lastname:  Option<String>,
}

/// `POST /people/` — both names are required.
pub async fn create<S>(
  State(store): State<Arc<S>>,
  ApiJson(body): ApiJson<CreatePersonBody>,
) -> Result<impl IntoResponse, ApiError>
where
  S: InventoryStore,
{
  let input = NewPerson::new(body.firstname, body.lastname)?;
  let person = store.create_person(input).await.map_err(ApiError::store)?;
  tracing::info!(person_id = person.id, "person created");

  Ok((
    StatusCode::CREATED,
    Json(PersonCreated {
      message: "Successfully added new person.",
      person:  person.into(),
    }),
  ))
}

/// `DELETE /people/{id}`
pub async fn delete<S>(
  State(store): State<Arc<S>>,
  Path(raw_id): Path<String>,
) -> Result<Json<Deleted>, ApiError>
where
  S: InventoryStore,
{
  let id = parse_id("person", &raw_id)?;
  if !store.delete_person(id).await.map_err(ApiError::store)? {
    return Err(ApiError::NotFound(format!("person {id} not found")));
  }
  tracing::info!(person_id = id, "person deleted");

  Ok(Json(Deleted { message: "Successfully deleted person.", id }))
}
