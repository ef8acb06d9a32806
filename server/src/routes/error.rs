//! JSON error responses shared by the API routes.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use panels::wire::ErrorBody;

use crate::services::store::StoreError;

pub const STORE_FAILED: &str = "Panel store unavailable";

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    Unauthorized(&'static str),
    #[error("{0}")]
    Conflict(&'static str),
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ApiError {
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::Store(_) => StatusCode::BAD_GATEWAY,
        }
    }

    /// Message placed in the response body. Store details stay in the log.
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Self::Store(_) => STORE_FAILED.to_owned(),
            other => other.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let Self::Store(e) = &self {
            tracing::error!(error = %e, "panel store request failed");
        }
        (self.status(), Json(ErrorBody { error: self.message() })).into_response()
    }
}
