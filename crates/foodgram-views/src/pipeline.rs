//! [`Pipeline`]: one entry point per entity kind.
//!
//! A pipeline pairs a borrowed store with a [`ViewerContext`] and hands both,
//! unchanged, to every materializer it calls. It holds nothing else, so two
//! calls with the same inputs over the same store contents produce the same
//! documents, and collections can be materialized concurrently.

use foodgram_core::{
  document::{
    IngredientDocument, RecipeDocument, SubscriptionDocument, TagDocument, UserDocument,
  },
  model::{Ingredient, Recipe, Tag, User},
  store::RecipeStore,
  viewer::ViewerContext,
};
use futures::future::try_join_all;

use crate::{Result, materialize};

pub struct Pipeline<'s, S> {
  store: &'s S,
  ctx:   ViewerContext,
}

impl<S> Clone for Pipeline<'_, S> {
  fn clone(&self) -> Self { *self }
}

impl<S> Copy for Pipeline<'_, S> {}

impl<'s, S: RecipeStore> Pipeline<'s, S> {
  pub fn new(store: &'s S, ctx: ViewerContext) -> Self { Self { store, ctx } }

  // ── Recipes ───────────────────────────────────────────────────────────────

  pub async fn recipe(&self, recipe: &Recipe) -> Result<RecipeDocument> {
    tracing::debug!(
      recipe = %recipe.id,
      viewer = ?self.ctx.viewer,
      intent = ?self.ctx.intent,
      "materializing recipe"
    );
    materialize::recipe_document(self.store, recipe, self.ctx).await
  }

  pub async fn recipes(&self, recipes: &[Recipe]) -> Result<Vec<RecipeDocument>> {
    tracing::debug!(count = recipes.len(), viewer = ?self.ctx.viewer, "materializing recipes");
    let pending: Vec<_> = recipes
      .iter()
      .map(|recipe| materialize::recipe_document(self.store, recipe, self.ctx))
      .collect();
    try_join_all(pending).await
  }

  // ── Users ─────────────────────────────────────────────────────────────────

  pub async fn user(&self, user: &User) -> Result<UserDocument> {
    tracing::debug!(user = %user.id, viewer = ?self.ctx.viewer, "materializing user");
    materialize::user_document(self.store, user, self.ctx).await
  }

  pub async fn users(&self, users: &[User]) -> Result<Vec<UserDocument>> {
    let pending: Vec<_> = users
      .iter()
      .map(|user| materialize::user_document(self.store, user, self.ctx))
      .collect();
    try_join_all(pending).await
  }

  /// A followed user in subscription-listing shape.
  pub async fn subscription(
    &self,
    user:          &User,
    recipes_limit: Option<usize>,
  ) -> Result<SubscriptionDocument> {
    tracing::debug!(
      user = %user.id,
      viewer = ?self.ctx.viewer,
      ?recipes_limit,
      "materializing subscription"
    );
    materialize::subscription_document(self.store, user, self.ctx, recipes_limit).await
  }

  pub async fn subscriptions(
    &self,
    users:         &[User],
    recipes_limit: Option<usize>,
  ) -> Result<Vec<SubscriptionDocument>> {
    let pending: Vec<_> = users
      .iter()
      .map(|user| materialize::subscription_document(self.store, user, self.ctx, recipes_limit))
      .collect();
    try_join_all(pending).await
  }

  // ── Reference entities ────────────────────────────────────────────────────

  // Tags and ingredients have no viewer-dependent fields.

  pub fn tag(&self, tag: &Tag) -> TagDocument { TagDocument::from(tag) }

  pub fn tags(&self, tags: &[Tag]) -> Vec<TagDocument> {
    tags.iter().map(TagDocument::from).collect()
  }

  pub fn ingredient(&self, ingredient: &Ingredient) -> IngredientDocument {
    IngredientDocument::from(ingredient)
  }

  pub fn ingredients(&self, ingredients: &[Ingredient]) -> Vec<IngredientDocument> {
    ingredients.iter().map(IngredientDocument::from).collect()
  }
}
