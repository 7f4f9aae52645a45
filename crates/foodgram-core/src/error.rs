//! Error types for `foodgram-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("invalid {kind} id: {value:?}")]
  InvalidId { kind: &'static str, value: String },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
