//! Newtype identifiers for type-safe entity references.
//!
//! Every entity is keyed by an `i64` row id in the relational store. Wrapping
//! each in its own type keeps a `RecipeId` from being passed where a
//! `UserId` is expected, which matters most in the junction lookups.

use std::str::FromStr;

use crate::Error;

/// Define a transparent `i64` id wrapper named `$name`.
///
/// The generated type serializes as a bare JSON number and parses from a
/// decimal string; `$kind` names the entity in parse errors.
macro_rules! define_id {
  ($name:ident, $kind:literal) => {
    #[derive(
      Debug,
      Clone,
      Copy,
      PartialEq,
      Eq,
      PartialOrd,
      Ord,
      Hash,
      ::serde::Serialize,
      ::serde::Deserialize,
    )]
    #[serde(transparent)]
    pub struct $name(i64);

    impl $name {
      pub const fn new(id: i64) -> Self { Self(id) }

      pub const fn get(self) -> i64 { self.0 }
    }

    impl ::core::fmt::Display for $name {
      fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
        write!(f, "{}", self.0)
      }
    }

    impl From<i64> for $name {
      fn from(id: i64) -> Self { Self(id) }
    }

    impl From<$name> for i64 {
      fn from(id: $name) -> Self { id.0 }
    }

    impl FromStr for $name {
      type Err = Error;

      fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse::<i64>().map(Self).map_err(|_| Error::InvalidId {
          kind:  $kind,
          value: s.to_owned(),
        })
      }
    }
  };
}

define_id!(UserId, "user");
define_id!(RecipeId, "recipe");
define_id!(TagId, "tag");
define_id!(IngredientId, "ingredient");
