//! Error type for `foodgram-store-sqlite`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("date/time parse error: {0}")]
  DateParse(String),

  /// A stored value does not fit the domain type it decodes into.
  #[error("invalid stored value: {0}")]
  InvalidValue(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
