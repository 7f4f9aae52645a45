//! Encoding and decoding helpers between domain types and SQLite rows.
//!
//! Ids are stored as plain integers. Timestamps are stored as RFC 3339 UTC
//! strings with a fixed microsecond precision so that text order is time
//! order.

use chrono::{DateTime, SecondsFormat, Utc};
use foodgram_core::{
  IngredientId, RecipeId, TagId, UserId,
  model::{Ingredient, Membership, Recipe, Tag, User},
};
use rusqlite::Row;

use crate::{Error, Result};

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339_opts(SecondsFormat::Micros, true) }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── Counts and limits ───────────────────────────────────────────────────────

pub fn decode_count(n: i64) -> Result<usize> {
  usize::try_from(n).map_err(|_| Error::InvalidValue(format!("negative count: {n}")))
}

/// SQLite treats a negative `LIMIT` as "no limit".
pub fn encode_limit(limit: Option<usize>) -> i64 {
  limit.map_or(-1, |l| i64::try_from(l).unwrap_or(i64::MAX))
}

// ─── Membership ──────────────────────────────────────────────────────────────

/// The table and key columns backing one membership relation, plus the key
/// values of a particular row.
pub struct MembershipRow {
  pub table: &'static str,
  pub left:  &'static str,
  pub right: &'static str,
  pub keys:  (i64, i64),
}

pub fn encode_membership(m: Membership) -> MembershipRow {
  match m {
    Membership::Favorite { user, recipe } => MembershipRow {
      table: "favorites",
      left:  "user_id",
      right: "recipe_id",
      keys:  (user.get(), recipe.get()),
    },
    Membership::ShoppingCart { user, recipe } => MembershipRow {
      table: "shopping_cart",
      left:  "user_id",
      right: "recipe_id",
      keys:  (user.get(), recipe.get()),
    },
    Membership::Subscription { follower, following } => MembershipRow {
      table: "subscriptions",
      left:  "follower_id",
      right: "following_id",
      keys:  (follower.get(), following.get()),
    },
  }
}

// ─── Row mappers ─────────────────────────────────────────────────────────────

pub const USER_COLUMNS: &str = "id, email, username, first_name, last_name";

pub fn user_from_row(row: &Row<'_>) -> rusqlite::Result<User> {
  Ok(User {
    id:         UserId::new(row.get(0)?),
    email:      row.get(1)?,
    username:   row.get(2)?,
    first_name: row.get(3)?,
    last_name:  row.get(4)?,
  })
}

pub const TAG_COLUMNS: &str = "id, name, color, slug";

pub fn tag_from_row(row: &Row<'_>) -> rusqlite::Result<Tag> {
  Ok(Tag {
    id:    TagId::new(row.get(0)?),
    name:  row.get(1)?,
    color: row.get(2)?,
    slug:  row.get(3)?,
  })
}

pub const INGREDIENT_COLUMNS: &str = "id, name, measurement_unit";

pub fn ingredient_from_row(row: &Row<'_>) -> rusqlite::Result<Ingredient> {
  Ok(Ingredient {
    id:               IngredientId::new(row.get(0)?),
    name:             row.get(1)?,
    measurement_unit: row.get(2)?,
  })
}

pub const RECIPE_COLUMNS: &str = "id, author_id, name, image, text, cooking_time, pub_date";

/// A `recipes` row before its timestamp is parsed.
pub struct RawRecipe {
  pub id:           i64,
  pub author_id:    i64,
  pub name:         String,
  pub image:        String,
  pub text:         String,
  pub cooking_time: u32,
  pub pub_date:     String,
}

impl RawRecipe {
  pub fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:           row.get(0)?,
      author_id:    row.get(1)?,
      name:         row.get(2)?,
      image:        row.get(3)?,
      text:         row.get(4)?,
      cooking_time: row.get(5)?,
      pub_date:     row.get(6)?,
    })
  }

  pub fn into_recipe(self) -> Result<Recipe> {
    Ok(Recipe {
      id:           RecipeId::new(self.id),
      author:       UserId::new(self.author_id),
      name:         self.name,
      image:        self.image,
      text:         self.text,
      cooking_time: self.cooking_time,
      pub_date:     decode_dt(&self.pub_date)?,
    })
  }
}
