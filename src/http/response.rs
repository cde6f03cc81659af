//! Response handling and error mapping.
//!
//! # Responsibilities
//! - Map handler failures to status codes and `{ "message": ... }` bodies
//! - Keep storage details out of client-facing responses
//!
//! # Design Decisions
//! - Validation and not-found both answer 400 with a fixed message
//! - Storage failures answer 500 and are logged with their cause

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::storage::StoreError;

pub const VALIDATION_MESSAGE: &str = "Missing title or description";
pub const NOT_FOUND_MESSAGE: &str = "Task not found";
pub const NO_ROUTE_MESSAGE: &str = "Route not found";
pub const INTERNAL_MESSAGE: &str = "Internal server error";

/// JSON body of every error response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub message: String,
}

/// Errors a request handler can produce.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Missing title or description")]
    Validation,

    #[error("Task not found")]
    NotFound,

    #[error("Route not found")]
    NoRoute,

    #[error("storage failure: {0}")]
    Storage(#[from] StoreError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation | ApiError::NotFound => StatusCode::BAD_REQUEST,
            ApiError::NoRoute => StatusCode::NOT_FOUND,
            ApiError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let message = match &self {
            ApiError::Storage(e) => {
                tracing::error!(error = %e, "Storage failure");
                INTERNAL_MESSAGE.to_string()
            }
            other => other.to_string(),
        };
        (self.status(), Json(ErrorBody { message })).into_response()
    }
}
