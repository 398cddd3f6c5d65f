//! Core types and trait definitions for the Sleepy inventory service.
//!
//! No HTTP or database dependencies live here; every other crate in the
//! workspace builds on these types.

pub mod error;
pub mod item;
pub mod person;
pub mod store;

pub use error::{Error, Result};
