//! Extractor that turns request metadata into a [`ViewerContext`].
//!
//! Authentication happens upstream; by the time a request reaches this router
//! the viewer's user id (if any) is in the [`VIEWER_HEADER`] header. The HTTP
//! method is read exactly once, here, and becomes a [`RequestIntent`].

use axum::{
  extract::FromRequestParts,
  http::{Method, request::Parts},
};
use foodgram_core::{
  UserId,
  viewer::{RequestIntent, Viewer, ViewerContext},
};

use crate::error::ApiError;

/// Header carrying the pre-resolved viewer id.
pub const VIEWER_HEADER: &str = "x-viewer-id";

/// The viewer context of the current request.
#[derive(Debug, Clone, Copy)]
pub struct RequestViewer(pub ViewerContext);

/// `POST`, `PUT` and `PATCH` pre-fill edit forms; everything else reads.
pub fn intent_for(method: &Method) -> RequestIntent {
  if *method == Method::POST || *method == Method::PUT || *method == Method::PATCH {
    RequestIntent::Write
  } else {
    RequestIntent::Read
  }
}

/// Parse the viewer header; absent means anonymous.
pub fn viewer_from_parts(parts: &Parts) -> Result<Viewer, ApiError> {
  let Some(value) = parts.headers.get(VIEWER_HEADER) else {
    return Ok(Viewer::Anonymous);
  };
  let raw = value
    .to_str()
    .map_err(|_| ApiError::BadRequest(format!("{VIEWER_HEADER} is not valid ASCII")))?;
  let id: UserId = raw
    .parse()
    .map_err(|e: foodgram_core::Error| ApiError::BadRequest(e.to_string()))?;
  Ok(Viewer::User(id))
}

impl<S> FromRequestParts<S> for RequestViewer
where
  S: Send + Sync,
{
  type Rejection = ApiError;

  async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
    let viewer = viewer_from_parts(parts)?;
    Ok(Self(ViewerContext::new(viewer, intent_for(&parts.method))))
  }
}
