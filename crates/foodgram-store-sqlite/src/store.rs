//! [`SqliteStore`]: the SQLite implementation of [`RecipeStore`].

use std::path::Path;

use chrono::Utc;
use foodgram_core::{
  IngredientId, RecipeId, TagId, UserId,
  model::{
    Ingredient, Membership, NewIngredient, NewRecipe, NewTag, NewUser, Recipe,
    RecipeIngredient, Tag, User,
  },
  store::RecipeStore,
};
use rusqlite::{OptionalExtension as _, Row, params_from_iter};

use crate::{
  Result,
  encode::{
    INGREDIENT_COLUMNS, RECIPE_COLUMNS, RawRecipe, TAG_COLUMNS, USER_COLUMNS, decode_count,
    decode_dt, encode_dt, encode_limit, encode_membership, ingredient_from_row, tag_from_row,
    user_from_row,
  },
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A Foodgram recipe store backed by a single SQLite file.
///
/// Cloning is cheap; the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let path = path.as_ref();
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    tracing::debug!(?path, "opened sqlite store");
    Ok(store)
  }

  /// Open an in-memory store for tests.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// Run `sql` with integer parameters and map every row.
  async fn query_all<T, F>(&self, sql: String, params: Vec<i64>, map: F) -> Result<Vec<T>>
  where
    T: Send + 'static,
    F: Fn(&Row<'_>) -> rusqlite::Result<T> + Send + 'static,
  {
    let rows = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
          .query_map(params_from_iter(params), |row| map(row))?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;
    Ok(rows)
  }

  /// Run `sql` with integer parameters and map the first row, if any.
  async fn query_opt<T, F>(&self, sql: String, params: Vec<i64>, map: F) -> Result<Option<T>>
  where
    T: Send + 'static,
    F: Fn(&Row<'_>) -> rusqlite::Result<T> + Send + 'static,
  {
    let row = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(&sql, params_from_iter(params), |row| map(row))
            .optional()?,
        )
      })
      .await?;
    Ok(row)
  }

  async fn query_recipes(&self, sql: String, params: Vec<i64>) -> Result<Vec<Recipe>> {
    self
      .query_all(sql, params, RawRecipe::from_row)
      .await?
      .into_iter()
      .map(RawRecipe::into_recipe)
      .collect()
  }

  // ── Writes ────────────────────────────────────────────────────────────────

  /// Insert a user and return it with its assigned id.
  pub async fn add_user(&self, input: NewUser) -> Result<User> {
    let row = input.clone();
    let id = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO users (email, username, first_name, last_name)
           VALUES (?1, ?2, ?3, ?4)",
          rusqlite::params![row.email, row.username, row.first_name, row.last_name],
        )?;
        Ok(conn.last_insert_rowid())
      })
      .await?;

    Ok(User {
      id:         UserId::new(id),
      email:      input.email,
      username:   input.username,
      first_name: input.first_name,
      last_name:  input.last_name,
    })
  }

  pub async fn add_tag(&self, input: NewTag) -> Result<Tag> {
    let row = input.clone();
    let id = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO tags (name, color, slug) VALUES (?1, ?2, ?3)",
          rusqlite::params![row.name, row.color, row.slug],
        )?;
        Ok(conn.last_insert_rowid())
      })
      .await?;

    Ok(Tag {
      id:    TagId::new(id),
      name:  input.name,
      color: input.color,
      slug:  input.slug,
    })
  }

  pub async fn add_ingredient(&self, input: NewIngredient) -> Result<Ingredient> {
    let row = input.clone();
    let id = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO ingredients (name, measurement_unit) VALUES (?1, ?2)",
          rusqlite::params![row.name, row.measurement_unit],
        )?;
        Ok(conn.last_insert_rowid())
      })
      .await?;

    Ok(Ingredient {
      id:               IngredientId::new(id),
      name:             input.name,
      measurement_unit: input.measurement_unit,
    })
  }

  /// Insert a recipe with its tag links and ingredient amounts in one
  /// transaction. `pub_date` is set by the store.
  pub async fn add_recipe(&self, input: NewRecipe) -> Result<Recipe> {
    let at_str = encode_dt(Utc::now());
    let pub_date = decode_dt(&at_str)?;
    let row = input.clone();

    let id = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        tx.execute(
          "INSERT INTO recipes (author_id, name, image, text, cooking_time, pub_date)
           VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
          rusqlite::params![
            row.author.get(),
            row.name,
            row.image,
            row.text,
            row.cooking_time,
            at_str,
          ],
        )?;
        let id = tx.last_insert_rowid();

        for tag in &row.tags {
          tx.execute(
            "INSERT INTO recipe_tags (recipe_id, tag_id) VALUES (?1, ?2)",
            rusqlite::params![id, tag.get()],
          )?;
        }
        for (ingredient, amount) in &row.ingredients {
          tx.execute(
            "INSERT INTO recipe_ingredients (recipe_id, ingredient_id, amount)
             VALUES (?1, ?2, ?3)",
            rusqlite::params![id, ingredient.get(), amount],
          )?;
        }

        tx.commit()?;
        Ok(id)
      })
      .await?;

    Ok(Recipe {
      id: RecipeId::new(id),
      author: input.author,
      name: input.name,
      image: input.image,
      text: input.text,
      cooking_time: input.cooking_time,
      pub_date,
    })
  }

  /// Insert a membership row. Fails if the row already exists.
  pub async fn add_membership(&self, membership: Membership) -> Result<()> {
    let row = encode_membership(membership);
    let sql = format!(
      "INSERT INTO {} ({}, {}) VALUES (?1, ?2)",
      row.table, row.left, row.right
    );
    let (a, b) = row.keys;

    self
      .conn
      .call(move |conn| {
        conn.execute(&sql, rusqlite::params![a, b])?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

// ─── RecipeStore impl ────────────────────────────────────────────────────────

impl RecipeStore for SqliteStore {
  type Error = crate::Error;

  // ── Entity lookups ────────────────────────────────────────────────────────

  async fn get_user(&self, id: UserId) -> Result<Option<User>> {
    let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE id = ?1");
    self.query_opt(sql, vec![id.get()], user_from_row).await
  }

  async fn list_users(&self) -> Result<Vec<User>> {
    let sql = format!("SELECT {USER_COLUMNS} FROM users ORDER BY id");
    self.query_all(sql, vec![], user_from_row).await
  }

  async fn get_recipe(&self, id: RecipeId) -> Result<Option<Recipe>> {
    let sql = format!("SELECT {RECIPE_COLUMNS} FROM recipes WHERE id = ?1");
    self
      .query_opt(sql, vec![id.get()], RawRecipe::from_row)
      .await?
      .map(RawRecipe::into_recipe)
      .transpose()
  }

  async fn list_recipes(&self) -> Result<Vec<Recipe>> {
    let sql = format!("SELECT {RECIPE_COLUMNS} FROM recipes ORDER BY pub_date DESC, id DESC");
    self.query_recipes(sql, vec![]).await
  }

  async fn get_tag(&self, id: TagId) -> Result<Option<Tag>> {
    let sql = format!("SELECT {TAG_COLUMNS} FROM tags WHERE id = ?1");
    self.query_opt(sql, vec![id.get()], tag_from_row).await
  }

  async fn list_tags(&self) -> Result<Vec<Tag>> {
    let sql = format!("SELECT {TAG_COLUMNS} FROM tags ORDER BY id");
    self.query_all(sql, vec![], tag_from_row).await
  }

  async fn get_ingredient(&self, id: IngredientId) -> Result<Option<Ingredient>> {
    let sql = format!("SELECT {INGREDIENT_COLUMNS} FROM ingredients WHERE id = ?1");
    self.query_opt(sql, vec![id.get()], ingredient_from_row).await
  }

  async fn list_ingredients(&self) -> Result<Vec<Ingredient>> {
    let sql = format!("SELECT {INGREDIENT_COLUMNS} FROM ingredients ORDER BY id");
    self.query_all(sql, vec![], ingredient_from_row).await
  }

  // ── Existence ─────────────────────────────────────────────────────────────

  async fn exists(&self, membership: Membership) -> Result<bool> {
    let row = encode_membership(membership);
    let sql = format!(
      "SELECT EXISTS (SELECT 1 FROM {} WHERE {} = ?1 AND {} = ?2)",
      row.table, row.left, row.right
    );
    let (a, b) = row.keys;
    let found = self.query_opt(sql, vec![a, b], |r| r.get::<_, bool>(0)).await?;
    Ok(found.unwrap_or(false))
  }

  // ── Count ─────────────────────────────────────────────────────────────────

  async fn count_recipes(&self, author: UserId) -> Result<usize> {
    let n = self
      .query_opt(
        "SELECT COUNT(*) FROM recipes WHERE author_id = ?1".to_owned(),
        vec![author.get()],
        |r| r.get::<_, i64>(0),
      )
      .await?
      .unwrap_or(0);
    decode_count(n)
  }

  // ── Get-unique ────────────────────────────────────────────────────────────

  async fn recipe_ingredient(
    &self,
    recipe: RecipeId,
    ingredient: IngredientId,
  ) -> Result<Option<RecipeIngredient>> {
    self
      .query_opt(
        "SELECT recipe_id, ingredient_id, amount
         FROM recipe_ingredients
         WHERE recipe_id = ?1 AND ingredient_id = ?2"
          .to_owned(),
        vec![recipe.get(), ingredient.get()],
        |r| {
          Ok(RecipeIngredient {
            recipe:     RecipeId::new(r.get(0)?),
            ingredient: IngredientId::new(r.get(1)?),
            amount:     r.get(2)?,
          })
        },
      )
      .await
  }

  // ── List-related ──────────────────────────────────────────────────────────

  async fn recipe_tags(&self, recipe: RecipeId) -> Result<Vec<Tag>> {
    let sql = "SELECT t.id, t.name, t.color, t.slug
               FROM tags t
               JOIN recipe_tags rt ON rt.tag_id = t.id
               WHERE rt.recipe_id = ?1
               ORDER BY t.id";
    self.query_all(sql.to_owned(), vec![recipe.get()], tag_from_row).await
  }

  async fn recipe_ingredients(&self, recipe: RecipeId) -> Result<Vec<Ingredient>> {
    let sql = "SELECT i.id, i.name, i.measurement_unit
               FROM ingredients i
               JOIN recipe_ingredients ri ON ri.ingredient_id = i.id
               WHERE ri.recipe_id = ?1
               ORDER BY i.id";
    self
      .query_all(sql.to_owned(), vec![recipe.get()], ingredient_from_row)
      .await
  }

  async fn authored_recipes(&self, author: UserId, limit: Option<usize>) -> Result<Vec<Recipe>> {
    let sql = format!(
      "SELECT {RECIPE_COLUMNS} FROM recipes
       WHERE author_id = ?1
       ORDER BY pub_date DESC, id DESC
       LIMIT ?2"
    );
    self
      .query_recipes(sql, vec![author.get(), encode_limit(limit)])
      .await
  }

  async fn followed_users(&self, follower: UserId) -> Result<Vec<User>> {
    let sql = "SELECT u.id, u.email, u.username, u.first_name, u.last_name
               FROM users u
               JOIN subscriptions s ON s.following_id = u.id
               WHERE s.follower_id = ?1
               ORDER BY u.id";
    self.query_all(sql.to_owned(), vec![follower.get()], user_from_row).await
  }
}
