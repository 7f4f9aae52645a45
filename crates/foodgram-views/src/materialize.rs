//! Entity materializers.
//!
//! Each function borrows one entity plus the store and returns an owned
//! document. Viewer context is taken by value; the recipe id needed for
//! amount lookups is passed as an argument and goes no further than the
//! ingredients of that one recipe.

use foodgram_core::{
  RecipeId, UserId,
  document::{
    IngredientAmountDocument, RecipeDocument, RecipeSummary, SubscriptionDocument,
    TagDocument, TagsField, UserDocument,
  },
  model::{Ingredient, Recipe, User},
  store::RecipeStore,
  viewer::{RequestIntent, ViewerContext},
};
use futures::future::try_join_all;

use crate::{Error, IntegrityFault, Result, resolve};

// ─── Users ───────────────────────────────────────────────────────────────────

/// The base user fields shared by every user-shaped document.
pub fn base_user(user: &User, is_subscribed: bool) -> UserDocument {
  UserDocument {
    email: user.email.clone(),
    id: user.id,
    username: user.username.clone(),
    first_name: user.first_name.clone(),
    last_name: user.last_name.clone(),
    is_subscribed,
  }
}

pub async fn user_document<S: RecipeStore>(
  store: &S,
  user:  &User,
  ctx:   ViewerContext,
) -> Result<UserDocument> {
  let is_subscribed = resolve::is_subscribed(store, user.id, ctx.viewer).await?;
  Ok(base_user(user, is_subscribed))
}

/// A followed user as listed on the viewer's subscriptions page.
///
/// `recipes_limit` bounds the embedded summaries only; `recipes_count` is
/// always the full total.
pub async fn subscription_document<S: RecipeStore>(
  store:         &S,
  user:          &User,
  ctx:           ViewerContext,
  recipes_limit: Option<usize>,
) -> Result<SubscriptionDocument> {
  let (user_doc, recipes, recipes_count) = futures::try_join!(
    user_document(store, user, ctx),
    recipe_summaries(store, user.id, recipes_limit),
    resolve::recipes_count(store, user.id),
  )?;

  Ok(SubscriptionDocument { user: user_doc, recipes, recipes_count })
}

async fn recipe_summaries<S: RecipeStore>(
  store:  &S,
  author: UserId,
  limit:  Option<usize>,
) -> Result<Vec<RecipeSummary>> {
  let recipes = store
    .authored_recipes(author, limit)
    .await
    .map_err(Error::store)?;
  Ok(recipes.iter().map(RecipeSummary::from).collect())
}

// ─── Recipes ─────────────────────────────────────────────────────────────────

pub async fn recipe_document<S: RecipeStore>(
  store:  &S,
  recipe: &Recipe,
  ctx:    ViewerContext,
) -> Result<RecipeDocument> {
  let (tags, author, ingredients, is_favorited, is_in_shopping_cart) = futures::try_join!(
    tags_field(store, recipe.id, ctx.intent),
    author_document(store, recipe, ctx),
    ingredient_documents(store, recipe.id),
    resolve::is_favorited(store, recipe.id, ctx.viewer),
    resolve::is_in_shopping_cart(store, recipe.id, ctx.viewer),
  )?;

  Ok(RecipeDocument {
    id: recipe.id,
    tags,
    author,
    ingredients,
    is_favorited,
    is_in_shopping_cart,
    name: recipe.name.clone(),
    image: recipe.image.clone(),
    text: recipe.text.clone(),
    cooking_time: recipe.cooking_time,
  })
}

/// The recipe's tags in the shape the request intent calls for.
pub async fn tags_field<S: RecipeStore>(
  store:  &S,
  recipe: RecipeId,
  intent: RequestIntent,
) -> Result<TagsField> {
  let tags = store.recipe_tags(recipe).await.map_err(Error::store)?;
  Ok(match intent {
    RequestIntent::Write => TagsField::Ids(tags.iter().map(|t| t.id).collect()),
    RequestIntent::Read => TagsField::Full(tags.iter().map(TagDocument::from).collect()),
  })
}

async fn author_document<S: RecipeStore>(
  store:  &S,
  recipe: &Recipe,
  ctx:    ViewerContext,
) -> Result<UserDocument> {
  let author = store
    .get_user(recipe.author)
    .await
    .map_err(Error::store)?
    .ok_or(IntegrityFault::MissingAuthor {
      recipe: recipe.id,
      author: recipe.author,
    })?;

  // Same viewer as the recipe: `is_subscribed` is about the requester, not
  // the author.
  user_document(store, &author, ctx).await
}

/// Every ingredient of `recipe` with its amount in that recipe.
pub async fn ingredient_documents<S: RecipeStore>(
  store:  &S,
  recipe: RecipeId,
) -> Result<Vec<IngredientAmountDocument>> {
  let ingredients = store
    .recipe_ingredients(recipe)
    .await
    .map_err(Error::store)?;

  let pending: Vec<_> = ingredients
    .iter()
    .map(|ingredient| ingredient_with_amount(store, recipe, ingredient))
    .collect();
  try_join_all(pending).await
}

async fn ingredient_with_amount<S: RecipeStore>(
  store:      &S,
  recipe:     RecipeId,
  ingredient: &Ingredient,
) -> Result<IngredientAmountDocument> {
  let amount = resolve::ingredient_amount(store, recipe, ingredient.id).await?;
  Ok(IngredientAmountDocument {
    id: ingredient.id,
    name: ingredient.name.clone(),
    measurement_unit: ingredient.measurement_unit.clone(),
    amount,
  })
}
