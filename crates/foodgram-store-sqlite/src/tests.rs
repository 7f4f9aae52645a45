//! Integration tests for `SqliteStore` against an in-memory database.

use foodgram_core::{
  IngredientId, RecipeId, UserId,
  model::{Membership, NewIngredient, NewRecipe, NewTag, NewUser, User},
  store::RecipeStore,
};

use crate::SqliteStore;

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

fn new_user(username: &str) -> NewUser {
  NewUser {
    email:      format!("{username}@example.com"),
    username:   username.into(),
    first_name: "First".into(),
    last_name:  "Last".into(),
  }
}

async fn user(s: &SqliteStore, username: &str) -> User {
  s.add_user(new_user(username)).await.unwrap()
}

// ─── Entities ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn add_and_get_user() {
  let s = store().await;
  let alice = user(&s, "alice").await;

  let fetched = s.get_user(alice.id).await.unwrap();
  assert_eq!(fetched, Some(alice));
}

#[tokio::test]
async fn get_missing_rows_returns_none() {
  let s = store().await;
  assert!(s.get_user(UserId::new(1)).await.unwrap().is_none());
  assert!(s.get_recipe(RecipeId::new(1)).await.unwrap().is_none());
  assert!(s.get_ingredient(IngredientId::new(1)).await.unwrap().is_none());
}

#[tokio::test]
async fn duplicate_username_is_rejected() {
  let s = store().await;
  user(&s, "alice").await;
  assert!(s.add_user(new_user("alice")).await.is_err());
}

#[tokio::test]
async fn recipe_roundtrip_keeps_pub_date() {
  let s = store().await;
  let alice = user(&s, "alice").await;

  let mut input = NewRecipe::new(alice.id, "Omelette");
  input.image = "recipes/images/omelette.png".into();
  input.text = "Whisk and fry.".into();
  input.cooking_time = 7;
  let recipe = s.add_recipe(input).await.unwrap();

  let fetched = s.get_recipe(recipe.id).await.unwrap().unwrap();
  assert_eq!(fetched, recipe);
}

#[tokio::test]
async fn recipes_list_newest_first() {
  let s = store().await;
  let alice = user(&s, "alice").await;
  let first = s.add_recipe(NewRecipe::new(alice.id, "First")).await.unwrap();
  let second = s.add_recipe(NewRecipe::new(alice.id, "Second")).await.unwrap();

  let ids: Vec<RecipeId> = s.list_recipes().await.unwrap().iter().map(|r| r.id).collect();
  assert_eq!(ids, [second.id, first.id]);
}

#[tokio::test]
async fn tags_and_ingredients_list_by_id() {
  let s = store().await;
  let lunch = s
    .add_tag(NewTag { name: "Lunch".into(), color: "#49B64E".into(), slug: "lunch".into() })
    .await
    .unwrap();
  let breakfast = s
    .add_tag(NewTag {
      name:  "Breakfast".into(),
      color: "#E26C2D".into(),
      slug:  "breakfast".into(),
    })
    .await
    .unwrap();
  let egg = s
    .add_ingredient(NewIngredient { name: "Egg".into(), measurement_unit: "pcs".into() })
    .await
    .unwrap();

  assert_eq!(s.list_tags().await.unwrap(), [lunch.clone(), breakfast]);
  assert_eq!(s.get_tag(lunch.id).await.unwrap(), Some(lunch));
  assert_eq!(s.list_ingredients().await.unwrap(), [egg]);
}

// ─── Relations ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn recipe_links_and_amounts() {
  let s = store().await;
  let alice = user(&s, "alice").await;
  let breakfast = s
    .add_tag(NewTag {
      name:  "Breakfast".into(),
      color: "#E26C2D".into(),
      slug:  "breakfast".into(),
    })
    .await
    .unwrap();
  let egg = s
    .add_ingredient(NewIngredient { name: "Egg".into(), measurement_unit: "pcs".into() })
    .await
    .unwrap();
  let milk = s
    .add_ingredient(NewIngredient { name: "Milk".into(), measurement_unit: "ml".into() })
    .await
    .unwrap();

  let mut input = NewRecipe::new(alice.id, "Omelette");
  input.tags = vec![breakfast.id];
  input.ingredients = vec![(egg.id, 2), (milk.id, 50)];
  let omelette = s.add_recipe(input).await.unwrap();

  let mut input = NewRecipe::new(alice.id, "Boiled egg");
  input.ingredients = vec![(egg.id, 1)];
  let boiled = s.add_recipe(input).await.unwrap();

  assert_eq!(s.recipe_tags(omelette.id).await.unwrap(), [breakfast]);
  assert!(s.recipe_tags(boiled.id).await.unwrap().is_empty());
  assert_eq!(s.recipe_ingredients(omelette.id).await.unwrap(), [egg.clone(), milk.clone()]);

  let row = s.recipe_ingredient(omelette.id, egg.id).await.unwrap().unwrap();
  assert_eq!(row.amount, 2);
  let row = s.recipe_ingredient(boiled.id, egg.id).await.unwrap().unwrap();
  assert_eq!(row.amount, 1);
  assert!(s.recipe_ingredient(boiled.id, milk.id).await.unwrap().is_none());
}

#[tokio::test]
async fn failed_recipe_insert_leaves_nothing_behind() {
  let s = store().await;
  let alice = user(&s, "alice").await;

  let mut input = NewRecipe::new(alice.id, "Broken");
  input.ingredients = vec![(IngredientId::new(999), 1)];
  assert!(s.add_recipe(input).await.is_err());
  assert!(s.list_recipes().await.unwrap().is_empty());
}

#[tokio::test]
async fn memberships_exist_per_relation() {
  let s = store().await;
  let alice = user(&s, "alice").await;
  let bob = user(&s, "bob").await;
  let recipe = s.add_recipe(NewRecipe::new(alice.id, "Omelette")).await.unwrap();

  let favorite = Membership::Favorite { user: bob.id, recipe: recipe.id };
  let cart = Membership::ShoppingCart { user: bob.id, recipe: recipe.id };
  let follows = Membership::Subscription { follower: bob.id, following: alice.id };

  for m in [favorite, cart, follows] {
    assert!(!s.exists(m).await.unwrap());
  }

  s.add_membership(favorite).await.unwrap();
  assert!(s.exists(favorite).await.unwrap());
  assert!(!s.exists(cart).await.unwrap());

  s.add_membership(follows).await.unwrap();
  assert!(s.exists(follows).await.unwrap());
  assert!(
    !s.exists(Membership::Subscription { follower: alice.id, following: bob.id })
      .await
      .unwrap()
  );
}

#[tokio::test]
async fn duplicate_membership_is_rejected() {
  let s = store().await;
  let alice = user(&s, "alice").await;
  let recipe = s.add_recipe(NewRecipe::new(alice.id, "Omelette")).await.unwrap();
  let favorite = Membership::Favorite { user: alice.id, recipe: recipe.id };

  s.add_membership(favorite).await.unwrap();
  assert!(s.add_membership(favorite).await.is_err());
}

#[tokio::test]
async fn self_subscription_is_rejected_by_schema() {
  let s = store().await;
  let alice = user(&s, "alice").await;
  let own = Membership::Subscription { follower: alice.id, following: alice.id };
  assert!(s.add_membership(own).await.is_err());
}

#[tokio::test]
async fn count_matches_authored_recipes() {
  let s = store().await;
  let alice = user(&s, "alice").await;
  let bob = user(&s, "bob").await;
  for name in ["One", "Two", "Three"] {
    s.add_recipe(NewRecipe::new(alice.id, name)).await.unwrap();
  }
  s.add_recipe(NewRecipe::new(bob.id, "Other")).await.unwrap();

  for author in [alice.id, bob.id, UserId::new(42)] {
    let count = s.count_recipes(author).await.unwrap();
    let listed = s.authored_recipes(author, None).await.unwrap();
    assert_eq!(count, listed.len());
  }
  assert_eq!(s.count_recipes(alice.id).await.unwrap(), 3);
}

#[tokio::test]
async fn authored_recipes_respects_limit() {
  let s = store().await;
  let alice = user(&s, "alice").await;
  for name in ["One", "Two", "Three"] {
    s.add_recipe(NewRecipe::new(alice.id, name)).await.unwrap();
  }

  let limited = s.authored_recipes(alice.id, Some(2)).await.unwrap();
  let names: Vec<&str> = limited.iter().map(|r| r.name.as_str()).collect();
  assert_eq!(names, ["Three", "Two"]);
  assert!(s.authored_recipes(alice.id, Some(0)).await.unwrap().is_empty());
}

#[tokio::test]
async fn followed_users_lists_following_side() {
  let s = store().await;
  let alice = user(&s, "alice").await;
  let bob = user(&s, "bob").await;
  let carol = user(&s, "carol").await;

  s.add_membership(Membership::Subscription { follower: bob.id, following: carol.id })
    .await
    .unwrap();
  s.add_membership(Membership::Subscription { follower: bob.id, following: alice.id })
    .await
    .unwrap();

  assert_eq!(s.followed_users(bob.id).await.unwrap(), [alice, carol]);
  assert!(s.followed_users(UserId::new(99)).await.unwrap().is_empty());
}
