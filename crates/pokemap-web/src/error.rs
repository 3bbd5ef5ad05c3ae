//! Error types and axum `IntoResponse` implementation.

use axum::{
  http::StatusCode,
  response::{Html, IntoResponse, Response},
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("not found")]
  NotFound,
  #[error("template error: {0}")]
  Template(#[from] handlebars::TemplateError),
  #[error("render error: {0}")]
  Render(#[from] handlebars::RenderError),
  #[error("map error: {0}")]
  Map(#[from] serde_json::Error),
  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl Error {
  pub(crate) fn store<E>(e: E) -> Self
  where
    E: std::error::Error + Send + Sync + 'static,
  {
    Error::Store(Box::new(e))
  }
}

impl IntoResponse for Error {
  fn into_response(self) -> Response {
    match self {
      Error::NotFound => {
        (StatusCode::NOT_FOUND, Html("<h1>Такой покемон не найден</h1>"))
          .into_response()
      }
      other => {
        tracing::error!(error = %other, "page request failed");
        (StatusCode::INTERNAL_SERVER_ERROR, other.to_string()).into_response()
      }
    }
  }
}
