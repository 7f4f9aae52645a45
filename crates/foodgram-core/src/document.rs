//! Outward documents. Never stored, always derived.
//!
//! Field declaration order is the JSON key order, so these structs double as
//! the wire contract. The viewer-dependent pieces are filled in by
//! `foodgram-views`; the plain reference conversions live here.

use serde::{Deserialize, Serialize};

use crate::{
  id::{IngredientId, RecipeId, TagId, UserId},
  model::{Ingredient, Recipe, Tag},
};

// ─── Reference documents ─────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagDocument {
  pub id:    TagId,
  pub name:  String,
  pub color: String,
  pub slug:  String,
}

impl From<&Tag> for TagDocument {
  fn from(tag: &Tag) -> Self {
    Self {
      id:    tag.id,
      name:  tag.name.clone(),
      color: tag.color.clone(),
      slug:  tag.slug.clone(),
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngredientDocument {
  pub id:               IngredientId,
  pub name:             String,
  pub measurement_unit: String,
}

impl From<&Ingredient> for IngredientDocument {
  fn from(ingredient: &Ingredient) -> Self {
    Self {
      id:               ingredient.id,
      name:             ingredient.name.clone(),
      measurement_unit: ingredient.measurement_unit.clone(),
    }
  }
}

/// An ingredient as listed inside one recipe, with that recipe's amount.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngredientAmountDocument {
  pub id:               IngredientId,
  pub name:             String,
  pub measurement_unit: String,
  pub amount:           u32,
}

// ─── Users ───────────────────────────────────────────────────────────────────

/// The base user document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserDocument {
  pub email:         String,
  pub id:            UserId,
  pub username:      String,
  pub first_name:    String,
  pub last_name:     String,
  /// Whether the current viewer follows this user.
  pub is_subscribed: bool,
}

/// A followed user as shown in the viewer's subscriptions listing.
///
/// Embeds the base document rather than repeating its fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscriptionDocument {
  #[serde(flatten)]
  pub user:          UserDocument,
  pub recipes:       Vec<RecipeSummary>,
  /// Total authored recipes, independent of any limit applied to `recipes`.
  pub recipes_count: usize,
}

// ─── Recipes ─────────────────────────────────────────────────────────────────

/// The minimal recipe shape used inside subscription listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeSummary {
  pub id:           RecipeId,
  pub name:         String,
  pub image:        String,
  pub cooking_time: u32,
}

impl From<&Recipe> for RecipeSummary {
  fn from(recipe: &Recipe) -> Self {
    Self {
      id:           recipe.id,
      name:         recipe.name.clone(),
      image:        recipe.image.clone(),
      cooking_time: recipe.cooking_time,
    }
  }
}

/// The `tags` field of a [`RecipeDocument`].
///
/// Write-intent documents carry bare ids so they can be posted straight back;
/// read-intent documents carry full tag documents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TagsField {
  Ids(Vec<TagId>),
  Full(Vec<TagDocument>),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeDocument {
  pub id:                  RecipeId,
  pub tags:                TagsField,
  pub author:              UserDocument,
  pub ingredients:         Vec<IngredientAmountDocument>,
  pub is_favorited:        bool,
  pub is_in_shopping_cart: bool,
  pub name:                String,
  pub image:               String,
  pub text:                String,
  pub cooking_time:        u32,
}
