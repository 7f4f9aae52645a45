//! Error type for `foodgram-views`.

use foodgram_core::{IngredientId, RecipeId, UserId};
use thiserror::Error;

/// A required row is missing: upstream data was written inconsistently.
///
/// Never retried and never papered over with a default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum IntegrityFault {
  #[error("ingredient {ingredient} is listed on recipe {recipe} but has no amount row")]
  MissingAmount { recipe: RecipeId, ingredient: IngredientId },

  #[error("recipe {recipe} references missing author {author}")]
  MissingAuthor { recipe: RecipeId, author: UserId },
}

#[derive(Debug, Error)]
pub enum Error {
  #[error("integrity fault: {0}")]
  Integrity(#[from] IntegrityFault),

  /// The store failed; passed through untouched.
  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl Error {
  pub(crate) fn store<E>(e: E) -> Self
  where
    E: std::error::Error + Send + Sync + 'static,
  {
    Self::Store(Box::new(e))
  }

  pub fn integrity_fault(&self) -> Option<IntegrityFault> {
    match self {
      Self::Integrity(fault) => Some(*fault),
      Self::Store(_) => None,
    }
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
