//! Handlers for the reference collections: `/tags` and `/ingredients`.
//!
//! Neither has viewer-dependent fields, but both still go through the
//! pipeline so every document in the API is produced the same way.

use axum::{
  Json,
  extract::{Path, State, rejection::PathRejection},
};
use foodgram_core::{
  IngredientId, TagId,
  document::{IngredientDocument, TagDocument},
  store::RecipeStore,
};
use foodgram_views::Pipeline;

use crate::{ApiState, error::ApiError, viewer::RequestViewer};

/// `GET /tags`
pub async fn list_tags<S>(
  State(state): State<ApiState<S>>,
  RequestViewer(ctx): RequestViewer,
) -> Result<Json<Vec<TagDocument>>, ApiError>
where
  S: RecipeStore,
{
  let tags = state
    .store
    .list_tags()
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(Json(Pipeline::new(state.store.as_ref(), ctx).tags(&tags)))
}

/// `GET /tags/:id`
pub async fn get_tag<S>(
  State(state): State<ApiState<S>>,
  RequestViewer(ctx): RequestViewer,
  path: Result<Path<TagId>, PathRejection>,
) -> Result<Json<TagDocument>, ApiError>
where
  S: RecipeStore,
{
  let Path(id) = path?;
  let tag = state
    .store
    .get_tag(id)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?
    .ok_or_else(|| ApiError::NotFound(format!("tag {id} not found")))?;
  Ok(Json(Pipeline::new(state.store.as_ref(), ctx).tag(&tag)))
}

/// `GET /ingredients`
pub async fn list_ingredients<S>(
  State(state): State<ApiState<S>>,
  RequestViewer(ctx): RequestViewer,
) -> Result<Json<Vec<IngredientDocument>>, ApiError>
where
  S: RecipeStore,
{
  let ingredients = state
    .store
    .list_ingredients()
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(Json(Pipeline::new(state.store.as_ref(), ctx).ingredients(&ingredients)))
}

/// `GET /ingredients/:id`
pub async fn get_ingredient<S>(
  State(state): State<ApiState<S>>,
  RequestViewer(ctx): RequestViewer,
  path: Result<Path<IngredientId>, PathRejection>,
) -> Result<Json<IngredientDocument>, ApiError>
where
  S: RecipeStore,
{
  let Path(id) = path?;
  let ingredient = state
    .store
    .get_ingredient(id)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?
    .ok_or_else(|| ApiError::NotFound(format!("ingredient {id} not found")))?;
  Ok(Json(Pipeline::new(state.store.as_ref(), ctx).ingredient(&ingredient)))
}
