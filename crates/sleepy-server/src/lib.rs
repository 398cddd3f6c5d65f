//! HTTP server wiring for the Sleepy inventory.
//!
//! Mounts [`sleepy_api::api_router`] under `/api/v1` and wraps it in request
//! tracing. Configuration is read from an optional TOML file layered under
//! `SLEEPY_*` environment variables.

use std::{
  path::{Path, PathBuf},
  sync::Arc,
};

use axum::Router;
use serde::Deserialize;
use sleepy_core::store::InventoryStore;
use tower_http::trace::TraceLayer;

/// Path prefix every API route is mounted under.
pub const API_PREFIX: &str = "/api/v1";

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml`.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct ServerConfig {
  #[serde(default = "default_host")]
  pub host:          String,
  #[serde(default = "default_port")]
  pub port:          u16,
  /// SQLite file; `:memory:` keeps everything in memory.
  #[serde(default = "default_database_path")]
  pub database_path: PathBuf,
}

fn default_host() -> String { "127.0.0.1".to_owned() }

fn default_port() -> u16 { 5000 }

fn default_database_path() -> PathBuf { PathBuf::from("inventory.db") }

impl Default for ServerConfig {
  fn default() -> Self {
    Self {
      host:          default_host(),
      port:          default_port(),
      database_path: default_database_path(),
    }
  }
}

impl ServerConfig {
  /// Read `path` (if it exists) and `SLEEPY_*` environment variables.
  pub fn load(path: &Path) -> Result<Self, config::ConfigError> {
    let mut cfg: ServerConfig = config::Config::builder()
      .add_source(config::File::from(path).required(false))
      .add_source(config::Environment::with_prefix("SLEEPY"))
      .build()?
      .try_deserialize()?;
    cfg.database_path = expand_tilde(&cfg.database_path);
    Ok(cfg)
  }

  pub fn address(&self) -> String { format!("{}:{}", self.host, self.port) }
}

/// Expand a leading `~` to the user's home directory.
fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build the full application router for `store`.
pub fn router<S>(store: Arc<S>) -> Router
where
  S: InventoryStore + 'static,
{
  Router::new()
    .nest(API_PREFIX, sleepy_api::api_router(store))
    .layer(TraceLayer::new_for_http())
}

#[cfg(test)]
mod tests {
  use super::*;

  use axum::{
    body::Body,
    http::{Request, StatusCode},
  };
  use sleepy_store_sqlite::SqliteStore;
  use tower::ServiceExt as _;

  async fn get(uri: &str) -> (StatusCode, Vec<u8>) {
    let store = Arc::new(SqliteStore::open_in_memory().await.unwrap());
    let req = Request::builder().uri(uri).body(Body::empty()).unwrap();
    let resp = router(store).oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    (status, bytes.to_vec())
  }

  #[tokio::test]
  async fn api_is_mounted_under_prefix() {
    let (status, body) = get("/api/v1/items/").await;
    assert_eq!(status, StatusCode::OK);
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json, serde_json::json!({ "items": [] }));

    let (status, _) = get("/api/v1/recentcheckouts/").await;
    assert_eq!(status, StatusCode::OK);
  }

  #[tokio::test]
  async fn unprefixed_routes_are_404() {
    let (status, _) = get("/items/").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
  }

  #[test]
  fn missing_config_file_uses_defaults() {
    let path = std::env::temp_dir().join("sleepy-no-such-config.toml");
    let cfg = ServerConfig::load(&path).unwrap();
    assert_eq!(cfg.host, "127.0.0.1");
    assert_eq!(cfg.port, 5000);
    assert_eq!(cfg.address(), "127.0.0.1:5000");
  }

  #[test]
  fn config_file_overrides_defaults() {
    let path = std::env::temp_dir().join(format!("sleepy-config-{}.toml", std::process::id()));
    std::fs::write(&path, "port = 8080\ndatabase_path = \":memory:\"\n").unwrap();

    let cfg = ServerConfig::load(&path).unwrap();
    std::fs::remove_file(&path).ok();

    assert_eq!(cfg.port, 8080);
    assert_eq!(cfg.host, "127.0.0.1");
    assert_eq!(cfg.database_path, PathBuf::from(":memory:"));
  }

  #[test]
  fn tilde_expands_to_home() {
    let Ok(home) = std::env::var("HOME") else { return };
    assert_eq!(
      expand_tilde(Path::new("~/inventory.db")),
      PathBuf::from(home).join("inventory.db")
    );
    assert_eq!(expand_tilde(Path::new("/tmp/x.db")), PathBuf::from("/tmp/x.db"));
  }
}
