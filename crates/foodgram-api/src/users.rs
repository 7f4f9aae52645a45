//! Handlers for `/users` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/users` | All users |
//! | `GET`  | `/users/me` | 401 for anonymous viewers |
//! | `GET`  | `/users/subscriptions` | Optional `?recipes_limit=N`; 401 for anonymous viewers |
//! | `GET`  | `/users/:id` | 404 if not found |

use axum::{
  Json,
  extract::{
    Path, Query, State,
    rejection::{PathRejection, QueryRejection},
  },
};
use foodgram_core::{
  UserId,
  document::{SubscriptionDocument, UserDocument},
  model::User,
  store::RecipeStore,
};
use foodgram_views::Pipeline;
use serde::Deserialize;

use crate::{ApiState, error::ApiError, viewer::RequestViewer};

async fn fetch_user<S: RecipeStore>(store: &S, id: UserId) -> Result<User, ApiError> {
  store
    .get_user(id)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?
    .ok_or_else(|| ApiError::NotFound(format!("user {id} not found")))
}

// ─── List ─────────────────────────────────────────────────────────────────────

/// `GET /users`
pub async fn list<S>(
  State(state): State<ApiState<S>>,
  RequestViewer(ctx): RequestViewer,
) -> Result<Json<Vec<UserDocument>>, ApiError>
where
  S: RecipeStore,
{
  let users = state
    .store
    .list_users()
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  let docs = Pipeline::new(state.store.as_ref(), ctx).users(&users).await?;
  Ok(Json(docs))
}

// ─── Get one ──────────────────────────────────────────────────────────────────

/// `GET /users/:id`
pub async fn get_one<S>(
  State(state): State<ApiState<S>>,
  RequestViewer(ctx): RequestViewer,
  path: Result<Path<UserId>, PathRejection>,
) -> Result<Json<UserDocument>, ApiError>
where
  S: RecipeStore,
{
  let Path(id) = path?;
  let user = fetch_user(state.store.as_ref(), id).await?;
  let doc = Pipeline::new(state.store.as_ref(), ctx).user(&user).await?;
  Ok(Json(doc))
}

/// `GET /users/me`
pub async fn me<S>(
  State(state): State<ApiState<S>>,
  RequestViewer(ctx): RequestViewer,
) -> Result<Json<UserDocument>, ApiError>
where
  S: RecipeStore,
{
  let id = ctx.viewer.user_id().ok_or(ApiError::Unauthorized)?;
  let user = fetch_user(state.store.as_ref(), id).await?;
  let doc = Pipeline::new(state.store.as_ref(), ctx).user(&user).await?;
  Ok(Json(doc))
}

// ─── Subscriptions ────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize, Default)]
pub struct SubscriptionParams {
  /// Maximum number of recipe summaries per followed user.
  pub recipes_limit: Option<usize>,
}

/// `GET /users/subscriptions[?recipes_limit=N]`
pub async fn subscriptions<S>(
  State(state): State<ApiState<S>>,
  RequestViewer(ctx): RequestViewer,
  query: Result<Query<SubscriptionParams>, QueryRejection>,
) -> Result<Json<Vec<SubscriptionDocument>>, ApiError>
where
  S: RecipeStore,
{
  let Query(params) = query?;
  let follower = ctx.viewer.user_id().ok_or(ApiError::Unauthorized)?;
  let followed = state
    .store
    .followed_users(follower)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;

  let limit = params.recipes_limit.or(state.config.default_recipes_limit);
  let docs = Pipeline::new(state.store.as_ref(), ctx)
    .subscriptions(&followed, limit)
    .await?;
  Ok(Json(docs))
}
