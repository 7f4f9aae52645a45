//! Who is asking, and why.
//!
//! The viewer identity arrives already resolved by whatever authentication
//! layer sits in front of the API. The request intent is decided once at the
//! edge and then carried by value; nothing downstream inspects the request.

use serde::{Deserialize, Serialize};

use crate::id::UserId;

/// The requesting identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum Viewer {
  #[default]
  Anonymous,
  User(UserId),
}

impl Viewer {
  /// The viewer's user id, or `None` when anonymous.
  pub fn user_id(self) -> Option<UserId> {
    match self {
      Self::Anonymous => None,
      Self::User(id) => Some(id),
    }
  }
}

impl From<Option<UserId>> for Viewer {
  fn from(id: Option<UserId>) -> Self { id.map_or(Self::Anonymous, Self::User) }
}

/// Whether the document is a read projection or an edit-form pre-fill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestIntent {
  #[default]
  Read,
  Write,
}

/// Everything viewer-dependent that a materialization needs.
///
/// `Copy`: every nested materializer receives its own copy, so
/// there is no shared slot for one call to leave state in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ViewerContext {
  pub viewer: Viewer,
  pub intent: RequestIntent,
}

impl ViewerContext {
  pub const fn new(viewer: Viewer, intent: RequestIntent) -> Self {
    Self { viewer, intent }
  }

  /// Read intent on behalf of `viewer`.
  pub const fn read(viewer: Viewer) -> Self { Self::new(viewer, RequestIntent::Read) }

  /// Write intent on behalf of `viewer`.
  pub const fn write(viewer: Viewer) -> Self { Self::new(viewer, RequestIntent::Write) }

  pub const fn anonymous() -> Self { Self::read(Viewer::Anonymous) }
}
