//! Handlers for `/recipes` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/recipes` | Newest first |
//! | `GET`  | `/recipes/:id` | 404 if not found |

use axum::{
  Json,
  extract::{Path, State, rejection::PathRejection},
};
use foodgram_core::{RecipeId, document::RecipeDocument, store::RecipeStore};
use foodgram_views::Pipeline;

use crate::{ApiState, error::ApiError, viewer::RequestViewer};

/// `GET /recipes`
pub async fn list<S>(
  State(state): State<ApiState<S>>,
  RequestViewer(ctx): RequestViewer,
) -> Result<Json<Vec<RecipeDocument>>, ApiError>
where
  S: RecipeStore,
{
  let recipes = state
    .store
    .list_recipes()
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  let docs = Pipeline::new(state.store.as_ref(), ctx).recipes(&recipes).await?;
  Ok(Json(docs))
}

/// `GET /recipes/:id`
pub async fn get_one<S>(
  State(state): State<ApiState<S>>,
  RequestViewer(ctx): RequestViewer,
  path: Result<Path<RecipeId>, PathRejection>,
) -> Result<Json<RecipeDocument>, ApiError>
where
  S: RecipeStore,
{
  let Path(id) = path?;
  let recipe = state
    .store
    .get_recipe(id)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?
    .ok_or_else(|| ApiError::NotFound(format!("recipe {id} not found")))?;
  let doc = Pipeline::new(state.store.as_ref(), ctx).recipe(&recipe).await?;
  Ok(Json(doc))
}
