//! The `RecipeStore` trait.
//!
//! The trait is implemented by storage backends (e.g. `foodgram-store-sqlite`).
//! The materialization layer depends only on this abstraction. It is
//! read-only: populating the store is a backend concern.
//!
//! The relation primitives are existence, count, get-unique and
//! list-related. Plain entity lookups for API hosts sit alongside them.

use std::future::Future;

use crate::{
  id::{IngredientId, RecipeId, TagId, UserId},
  model::{Ingredient, Membership, Recipe, RecipeIngredient, Tag, User},
};

/// Read access to the normalized recipe relations.
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes (e.g. tokio with `axum`).
pub trait RecipeStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Entity lookups ────────────────────────────────────────────────────

  fn get_user(
    &self,
    id: UserId,
  ) -> impl Future<Output = Result<Option<User>, Self::Error>> + Send + '_;

  /// All users, ordered by id.
  fn list_users(&self) -> impl Future<Output = Result<Vec<User>, Self::Error>> + Send + '_;

  fn get_recipe(
    &self,
    id: RecipeId,
  ) -> impl Future<Output = Result<Option<Recipe>, Self::Error>> + Send + '_;

  /// All recipes, newest first.
  fn list_recipes(&self)
  -> impl Future<Output = Result<Vec<Recipe>, Self::Error>> + Send + '_;

  fn get_tag(
    &self,
    id: TagId,
  ) -> impl Future<Output = Result<Option<Tag>, Self::Error>> + Send + '_;

  /// All tags, ordered by id.
  fn list_tags(&self) -> impl Future<Output = Result<Vec<Tag>, Self::Error>> + Send + '_;

  fn get_ingredient(
    &self,
    id: IngredientId,
  ) -> impl Future<Output = Result<Option<Ingredient>, Self::Error>> + Send + '_;

  /// All ingredients, ordered by id.
  fn list_ingredients(
    &self,
  ) -> impl Future<Output = Result<Vec<Ingredient>, Self::Error>> + Send + '_;

  // ── Existence ─────────────────────────────────────────────────────────

  /// Whether the given membership row exists.
  fn exists(
    &self,
    membership: Membership,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  // ── Count ─────────────────────────────────────────────────────────────

  /// Number of recipes authored by `author`.
  fn count_recipes(
    &self,
    author: UserId,
  ) -> impl Future<Output = Result<usize, Self::Error>> + Send + '_;

  // ── Get-unique ────────────────────────────────────────────────────────

  /// The junction row for `(recipe, ingredient)`, or `None` if the pair is
  /// not associated.
  fn recipe_ingredient(
    &self,
    recipe: RecipeId,
    ingredient: IngredientId,
  ) -> impl Future<Output = Result<Option<RecipeIngredient>, Self::Error>> + Send + '_;

  // ── List-related ──────────────────────────────────────────────────────

  /// Tags attached to `recipe`, ordered by id.
  fn recipe_tags(
    &self,
    recipe: RecipeId,
  ) -> impl Future<Output = Result<Vec<Tag>, Self::Error>> + Send + '_;

  /// Ingredients attached to `recipe`, ordered by id.
  fn recipe_ingredients(
    &self,
    recipe: RecipeId,
  ) -> impl Future<Output = Result<Vec<Ingredient>, Self::Error>> + Send + '_;

  /// Recipes authored by `author`, newest first, at most `limit` of them.
  fn authored_recipes(
    &self,
    author: UserId,
    limit: Option<usize>,
  ) -> impl Future<Output = Result<Vec<Recipe>, Self::Error>> + Send + '_;

  /// Users that `follower` is subscribed to, ordered by id.
  fn followed_users(
    &self,
    follower: UserId,
  ) -> impl Future<Output = Result<Vec<User>, Self::Error>> + Send + '_;
}
