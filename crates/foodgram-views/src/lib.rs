//! Viewer-aware materialization of Foodgram documents.
//!
//! Turns normalized rows from any [`foodgram_core::store::RecipeStore`] into
//! the outward documents of [`foodgram_core::document`], computing the
//! derived fields (`is_favorited`, `is_in_shopping_cart`, `is_subscribed`,
//! `recipes_count`, ingredient amounts) for a given viewer and request
//! intent.
//!
//! ```rust,ignore
//! let ctx = ViewerContext::read(Viewer::User(viewer_id));
//! let doc = Pipeline::new(&store, ctx).recipe(&recipe).await?;
//! ```

pub mod error;
pub mod materialize;
pub mod pipeline;
pub mod resolve;

pub use error::{Error, IntegrityFault, Result};
pub use pipeline::Pipeline;
