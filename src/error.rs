//! Service Errors
//!
//! Every operation in the cart engine and order materializer fails with a
//! [`ServiceError`]. The HTTP layer renders it as `{ "error": ..., "details": ... }`.

use crate::{pricing::PricingError, store::StoreError};
use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use tracing::error;

#[derive(Debug, Error)]
pub enum ServiceError {
    /// A referenced session cart, line item, menu item or order does not exist.
    #[error("{message}")]
    NotFound {
        message: String,
        /// Names the id that was searched for, when that helps the caller.
        details: Option<String>,
    },
    #[error("{0}")]
    InvalidArgument(String),
    #[error(transparent)]
    CollaboratorUnavailable(#[from] StoreError),
}

impl ServiceError {
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound { message: message.into(), details: None }
    }

    pub fn not_found_with_details(message: impl Into<String>, details: impl Into<String>) -> Self {
        Self::NotFound { message: message.into(), details: Some(details.into()) }
    }

    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::InvalidArgument(_) => StatusCode::BAD_REQUEST,
            Self::CollaboratorUnavailable(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Wire shape of every error response.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            error!(error = %self, "request failed");
        }
        let body = match self {
            Self::NotFound { message, details } => ErrorBody { error: message, details },
            other => ErrorBody { error: other.to_string(), details: None },
        };
        (status, Json(body)).into_response()
    }
}

impl From<PricingError> for ServiceError {
    fn from(e: PricingError) -> Self {
        Self::InvalidArgument(e.to_string())
    }
}

impl From<JsonRejection> for ServiceError {
    fn from(rejection: JsonRejection) -> Self {
        Self::InvalidArgument(format!("Invalid request body: {}", rejection.body_text()))
    }
}

impl From<QueryRejection> for ServiceError {
    fn from(rejection: QueryRejection) -> Self {
        Self::InvalidArgument(format!("Invalid query string: {}", rejection.body_text()))
    }
}
