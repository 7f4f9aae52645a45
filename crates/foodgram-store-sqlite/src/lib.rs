//! SQLite backend for the Foodgram recipe store.
//!
//! Wraps [`tokio_rusqlite`] so all database access runs on a dedicated thread
//! without blocking the async runtime. Reads go through
//! [`foodgram_core::store::RecipeStore`]; the `add_*` methods on
//! [`SqliteStore`] populate it.

mod encode;
mod schema;
mod store;

pub mod error;

pub use error::{Error, Result};
pub use store::SqliteStore;

#[cfg(test)]
mod tests;
