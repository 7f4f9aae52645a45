//! Field resolvers, one per derived field.
//!
//! Each is a read-only function of (subject, viewer) with the store as its
//! only other input. Viewer-dependent resolvers answer `false` for anonymous
//! viewers without touching the store.

use foodgram_core::{
  IngredientId, RecipeId, UserId,
  model::Membership,
  store::RecipeStore,
  viewer::Viewer,
};

use crate::{Error, IntegrityFault, Result};

/// Whether `viewer` follows `candidate`.
///
/// A viewer looking at themselves gets whatever the store says; the core does
/// not exclude self-subscription.
pub async fn is_subscribed<S: RecipeStore>(
  store:     &S,
  candidate: UserId,
  viewer:    Viewer,
) -> Result<bool> {
  membership(store, viewer, |follower| Membership::Subscription {
    follower,
    following: candidate,
  })
  .await
}

/// Whether `viewer` has favorited `recipe`.
pub async fn is_favorited<S: RecipeStore>(
  store:  &S,
  recipe: RecipeId,
  viewer: Viewer,
) -> Result<bool> {
  membership(store, viewer, |user| Membership::Favorite { user, recipe }).await
}

/// Whether `recipe` is in `viewer`'s shopping cart.
pub async fn is_in_shopping_cart<S: RecipeStore>(
  store:  &S,
  recipe: RecipeId,
  viewer: Viewer,
) -> Result<bool> {
  membership(store, viewer, |user| Membership::ShoppingCart { user, recipe }).await
}

/// Number of recipes authored by `author`.
pub async fn recipes_count<S: RecipeStore>(store: &S, author: UserId) -> Result<usize> {
  store.count_recipes(author).await.map_err(Error::store)
}

/// The amount of `ingredient` used by `recipe`.
///
/// Fails with [`IntegrityFault::MissingAmount`] when the pair has no junction
/// row.
pub async fn ingredient_amount<S: RecipeStore>(
  store:      &S,
  recipe:     RecipeId,
  ingredient: IngredientId,
) -> Result<u32> {
  match store
    .recipe_ingredient(recipe, ingredient)
    .await
    .map_err(Error::store)?
  {
    Some(row) => Ok(row.amount),
    None => {
      tracing::warn!(%recipe, %ingredient, "ingredient listed without an amount row");
      Err(IntegrityFault::MissingAmount { recipe, ingredient }.into())
    }
  }
}

async fn membership<S, F>(store: &S, viewer: Viewer, row: F) -> Result<bool>
where
  S: RecipeStore,
  F: FnOnce(UserId) -> Membership,
{
  let Some(user) = viewer.user_id() else {
    return Ok(false);
  };
  store.exists(row(user)).await.map_err(Error::store)
}
