//! Normalized entities as they live in the relational store.
//!
//! These are rows, not documents: a [`Recipe`] knows its author by id only and
//! carries no tags, ingredients or viewer-dependent flags. Those are joined in
//! by the materializers in `foodgram-views`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::id::{IngredientId, RecipeId, TagId, UserId};

// ─── Reference entities ──────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
  pub id:         UserId,
  pub email:      String,
  pub username:   String,
  pub first_name: String,
  pub last_name:  String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
  pub id:    TagId,
  pub name:  String,
  /// Hex colour such as `#E26C2D`.
  pub color: String,
  pub slug:  String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ingredient {
  pub id:               IngredientId,
  pub name:             String,
  pub measurement_unit: String,
}

// ─── Recipe ──────────────────────────────────────────────────────────────────

/// A recipe row. Owned by exactly one author.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipe {
  pub id:           RecipeId,
  pub author:       UserId,
  pub name:         String,
  /// Opaque reference to the stored image (path or URL).
  pub image:        String,
  pub text:         String,
  /// Minutes.
  pub cooking_time: u32,
  /// Publication time; only used to order listings.
  pub pub_date:     DateTime<Utc>,
}

/// The junction row between a recipe and one of its ingredients.
///
/// `amount` has no meaning outside the (recipe, ingredient) pair, which is
/// unique in the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeIngredient {
  pub recipe:     RecipeId,
  pub ingredient: IngredientId,
  pub amount:     u32,
}

// ─── Membership junctions ────────────────────────────────────────────────────

/// One row of a membership junction relation.
///
/// Each relation holds at most one row per pair, so the only meaningful
/// question to ask of it is whether a row exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "relation", rename_all = "snake_case")]
pub enum Membership {
  Favorite { user: UserId, recipe: RecipeId },
  ShoppingCart { user: UserId, recipe: RecipeId },
  Subscription { follower: UserId, following: UserId },
}

// ─── Inputs for store backends ───────────────────────────────────────────────

/// Fields for a new [`User`]; the id is assigned by the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewUser {
  pub email:      String,
  pub username:   String,
  pub first_name: String,
  pub last_name:  String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewTag {
  pub name:  String,
  pub color: String,
  pub slug:  String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewIngredient {
  pub name:             String,
  pub measurement_unit: String,
}

/// Fields for a new [`Recipe`] together with its tag links and amounts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewRecipe {
  pub author:       UserId,
  pub name:         String,
  pub image:        String,
  pub text:         String,
  pub cooking_time: u32,
  pub tags:         Vec<TagId>,
  /// `(ingredient, amount)` pairs.
  pub ingredients:  Vec<(IngredientId, u32)>,
}

impl NewRecipe {
  pub fn new(author: UserId, name: impl Into<String>) -> Self {
    Self {
      author,
      name:         name.into(),
      image:        String::new(),
      text:         String::new(),
      cooking_time: 1,
      tags:         Vec::new(),
      ingredients:  Vec::new(),
    }
  }
}
