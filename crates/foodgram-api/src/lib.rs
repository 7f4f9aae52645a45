//! JSON REST API for Foodgram read models.
//!
//! Exposes an axum [`Router`] backed by any
//! [`foodgram_core::store::RecipeStore`]. Every response document is produced
//! by [`foodgram_views::Pipeline`] for the viewer named in the
//! [`viewer::VIEWER_HEADER`] header. Authentication, TLS and write endpoints
//! are the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", foodgram_api::api_router(store.clone(), ApiConfig::default()))
//! ```

pub mod error;
pub mod recipes;
pub mod reference;
pub mod users;
pub mod viewer;

use std::sync::Arc;

use axum::{Router, routing::get};
use foodgram_core::store::RecipeStore;
use serde::Deserialize;
use tower_http::trace::TraceLayer;

pub use error::ApiError;

// ─── Configuration ────────────────────────────────────────────────────────────

/// Per-router settings.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct ApiConfig {
  /// Recipe summaries per followed user when the request gives no
  /// `recipes_limit`. `None` lists them all.
  #[serde(default)]
  pub default_recipes_limit: Option<usize>,
}

// ─── Application state ────────────────────────────────────────────────────────

/// Shared state threaded through all handlers.
pub struct ApiState<S> {
  pub store:  Arc<S>,
  pub config: ApiConfig,
}

impl<S> Clone for ApiState<S> {
  fn clone(&self) -> Self {
    Self {
      store:  Arc::clone(&self.store),
      config: self.config,
    }
  }
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build the read-only API router for `store`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(store: Arc<S>, config: ApiConfig) -> Router<()>
where
  S: RecipeStore + 'static,
{
  Router::new()
    // Recipes
    .route("/recipes", get(recipes::list::<S>))
    .route("/recipes/{id}", get(recipes::get_one::<S>))
    // Users
    .route("/users", get(users::list::<S>))
    .route("/users/me", get(users::me::<S>))
    .route("/users/subscriptions", get(users::subscriptions::<S>))
    .route("/users/{id}", get(users::get_one::<S>))
    // Reference data
    .route("/tags", get(reference::list_tags::<S>))
    .route("/tags/{id}", get(reference::get_tag::<S>))
    .route("/ingredients", get(reference::list_ingredients::<S>))
    .route("/ingredients/{id}", get(reference::get_ingredient::<S>))
    .layer(TraceLayer::new_for_http())
    .with_state(ApiState { store, config })
}

// ─── Integration tests ────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use super::*;

  use axum::{
    body::Body,
    http::{Request, StatusCode},
  };
  use foodgram_core::{
    UserId,
    model::{Membership, NewIngredient, NewRecipe, NewTag, NewUser, Recipe, User},
  };
  use foodgram_store_sqlite::SqliteStore;
  use serde_json::{Value, json};
  use tower::ServiceExt as _;

  use crate::viewer::VIEWER_HEADER;

  struct Seed {
    store:    Arc<SqliteStore>,
    alice:    User,
    bob:      User,
    omelette: Recipe,
  }

  fn new_user(username: &str) -> NewUser {
    NewUser {
      email:      format!("{username}@example.com"),
      username:   username.into(),
      first_name: "First".into(),
      last_name:  "Last".into(),
    }
  }

  /// Alice authors an omelette (Breakfast, two eggs) and a salad; Bob
  /// favorites the omelette and follows Alice.
  async fn seed() -> Seed {
    let store = SqliteStore::open_in_memory().await.unwrap();
    let alice = store.add_user(new_user("alice")).await.unwrap();
    let bob = store.add_user(new_user("bob")).await.unwrap();
    let breakfast = store
      .add_tag(NewTag {
        name:  "Breakfast".into(),
        color: "#E26C2D".into(),
        slug:  "breakfast".into(),
      })
      .await
      .unwrap();
    let egg = store
      .add_ingredient(NewIngredient { name: "Egg".into(), measurement_unit: "pcs".into() })
      .await
      .unwrap();

    let mut input = NewRecipe::new(alice.id, "Omelette");
    input.tags = vec![breakfast.id];
    input.ingredients = vec![(egg.id, 2)];
    let omelette = store.add_recipe(input).await.unwrap();
    store.add_recipe(NewRecipe::new(alice.id, "Salad")).await.unwrap();

    store
      .add_membership(Membership::Favorite { user: bob.id, recipe: omelette.id })
      .await
      .unwrap();
    store
      .add_membership(Membership::Subscription { follower: bob.id, following: alice.id })
      .await
      .unwrap();

    Seed { store: Arc::new(store), alice, bob, omelette }
  }

  async fn get_json(
    store:  Arc<SqliteStore>,
    config: ApiConfig,
    uri:    &str,
    viewer: Option<&str>,
  ) -> (StatusCode, Value) {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(v) = viewer {
      builder = builder.header(VIEWER_HEADER, v);
    }
    let req = builder.body(Body::empty()).unwrap();
    let resp = api_router(store, config).oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
  }

  fn as_viewer(user: &User) -> String { user.id.to_string() }

  // ── Recipes ──────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn recipe_for_subscribed_viewer() {
    let s = seed().await;
    let bob = as_viewer(&s.bob);
    let (status, body) = get_json(
      s.store,
      ApiConfig::default(),
      &format!("/recipes/{}", s.omelette.id),
      Some(&bob),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["is_favorited"], true);
    assert_eq!(body["is_in_shopping_cart"], false);
    assert_eq!(body["author"]["username"], "alice");
    assert_eq!(body["author"]["is_subscribed"], true);
    assert_eq!(body["ingredients"][0]["name"], "Egg");
    assert_eq!(body["ingredients"][0]["measurement_unit"], "pcs");
    assert_eq!(body["ingredients"][0]["amount"], 2);
    assert_eq!(
      body["tags"],
      json!([{"id": 1, "name": "Breakfast", "color": "#E26C2D", "slug": "breakfast"}])
    );
  }

  #[tokio::test]
  async fn anonymous_recipe_has_false_flags() {
    let s = seed().await;
    let (status, body) = get_json(
      s.store,
      ApiConfig::default(),
      &format!("/recipes/{}", s.omelette.id),
      None,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["is_favorited"], false);
    assert_eq!(body["author"]["is_subscribed"], false);
  }

  #[tokio::test]
  async fn recipes_list_newest_first() {
    let s = seed().await;
    let (status, body) = get_json(s.store, ApiConfig::default(), "/recipes", None).await;

    assert_eq!(status, StatusCode::OK);
    let names: Vec<&str> = body
      .as_array()
      .unwrap()
      .iter()
      .map(|r| r["name"].as_str().unwrap())
      .collect();
    assert_eq!(names, ["Salad", "Omelette"]);
  }

  #[tokio::test]
  async fn missing_recipe_returns_404() {
    let s = seed().await;
    let (status, body) = get_json(s.store, ApiConfig::default(), "/recipes/999", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "not found: recipe 999 not found");
  }

  #[tokio::test]
  async fn malformed_viewer_header_returns_400() {
    let s = seed().await;
    let (status, _) =
      get_json(s.store, ApiConfig::default(), "/recipes", Some("not-a-number")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
  }

  #[tokio::test]
  async fn malformed_ids_return_json_400() {
    let s = seed().await;
    for uri in ["/recipes/abc", "/users/abc", "/tags/abc", "/ingredients/abc"] {
      let (status, body) = get_json(s.store.clone(), ApiConfig::default(), uri, None).await;
      assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
      assert!(body["error"].as_str().unwrap().starts_with("bad request: "), "{uri}");
    }
  }

  // ── Users ────────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn me_requires_a_viewer() {
    let s = seed().await;
    let (status, _) = get_json(s.store, ApiConfig::default(), "/users/me", None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
  }

  #[tokio::test]
  async fn me_returns_own_document() {
    let s = seed().await;
    let bob = as_viewer(&s.bob);
    let (status, body) =
      get_json(s.store, ApiConfig::default(), "/users/me", Some(&bob)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["username"], "bob");
    assert_eq!(body["is_subscribed"], false);
  }

  #[tokio::test]
  async fn user_document_is_relative_to_viewer() {
    let s = seed().await;
    let uri = format!("/users/{}", s.alice.id);

    let bob = as_viewer(&s.bob);
    let (_, as_bob) = get_json(s.store.clone(), ApiConfig::default(), &uri, Some(&bob)).await;
    assert_eq!(as_bob["is_subscribed"], true);

    let alice = as_viewer(&s.alice);
    let (_, as_alice) = get_json(s.store, ApiConfig::default(), &uri, Some(&alice)).await;
    assert_eq!(as_alice["is_subscribed"], false);
  }

  #[tokio::test]
  async fn subscriptions_require_a_viewer() {
    let s = seed().await;
    let (status, _) =
      get_json(s.store, ApiConfig::default(), "/users/subscriptions", None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
  }

  #[tokio::test]
  async fn subscriptions_list_followed_users_with_recipes() {
    let s = seed().await;
    let bob = as_viewer(&s.bob);
    let (status, body) = get_json(
      s.store,
      ApiConfig::default(),
      "/users/subscriptions?recipes_limit=1",
      Some(&bob),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let listing = body.as_array().unwrap();
    assert_eq!(listing.len(), 1);
    assert_eq!(listing[0]["id"], s.alice.id.get());
    assert_eq!(listing[0]["is_subscribed"], true);
    assert_eq!(listing[0]["recipes_count"], 2);
    assert_eq!(listing[0]["recipes"].as_array().unwrap().len(), 1);
    assert_eq!(listing[0]["recipes"][0]["name"], "Salad");
  }

  #[tokio::test]
  async fn subscriptions_fall_back_to_configured_limit() {
    let s = seed().await;
    let bob = as_viewer(&s.bob);
    let config = ApiConfig { default_recipes_limit: Some(1) };

    let (_, limited) =
      get_json(s.store.clone(), config, "/users/subscriptions", Some(&bob)).await;
    assert_eq!(limited[0]["recipes"].as_array().unwrap().len(), 1);

    let (_, unlimited) =
      get_json(s.store, ApiConfig::default(), "/users/subscriptions", Some(&bob)).await;
    assert_eq!(unlimited[0]["recipes"].as_array().unwrap().len(), 2);
  }

  #[tokio::test]
  async fn malformed_recipes_limit_returns_json_400() {
    let s = seed().await;
    let bob = as_viewer(&s.bob);
    let (status, body) = get_json(
      s.store,
      ApiConfig::default(),
      "/users/subscriptions?recipes_limit=abc",
      Some(&bob),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().starts_with("bad request: "));
  }

  #[tokio::test]
  async fn missing_user_returns_404() {
    let s = seed().await;
    let uri = format!("/users/{}", UserId::new(999));
    let (status, _) = get_json(s.store, ApiConfig::default(), &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
  }

  // ── Reference data ───────────────────────────────────────────────────────────

  #[tokio::test]
  async fn tags_and_ingredients() {
    let s = seed().await;

    let (status, tags) = get_json(s.store.clone(), ApiConfig::default(), "/tags", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(tags[0]["slug"], "breakfast");

    let (status, egg) =
      get_json(s.store.clone(), ApiConfig::default(), "/ingredients/1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(egg, json!({"id": 1, "name": "Egg", "measurement_unit": "pcs"}));

    let (status, _) = get_json(s.store, ApiConfig::default(), "/tags/42", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
  }
}
