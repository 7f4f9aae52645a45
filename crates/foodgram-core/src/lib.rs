//! Core types and trait definitions for the Foodgram read side.
//!
//! This crate is deliberately free of HTTP and database dependencies.
//! It defines the entities, the typed identifiers, the viewer context, the
//! outward documents and the [`store::RecipeStore`] abstraction that every
//! other crate builds on.

pub mod document;
pub mod error;
pub mod id;
pub mod model;
pub mod store;
pub mod viewer;

pub use error::{Error, Result};
pub use id::{IngredientId, RecipeId, TagId, UserId};
