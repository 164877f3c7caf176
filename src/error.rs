use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use tracing::error;

use crate::storage::StoreError;

/// Error returned by every handler. Each variant maps to exactly one status.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// No session cookie on the request.
    #[error("Unauthorized")]
    MissingSession,
    /// A session cookie that does not resolve to any user.
    #[error("Unauthorized")]
    UnknownSession,
    /// Absent meal and meal owned by someone else look the same.
    #[error("Meal not found")]
    MealNotFound,
    #[error("{message}")]
    Validation {
        message: String,
        issues: Option<String>,
    },
    #[error("Session already registered")]
    SessionTaken,
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    issues: Option<String>,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::MissingSession | ApiError::MealNotFound => StatusCode::NOT_FOUND,
            ApiError::UnknownSession => StatusCode::UNAUTHORIZED,
            ApiError::Validation { .. } => StatusCode::BAD_REQUEST,
            ApiError::SessionTaken => StatusCode::CONFLICT,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::Validation {
            message: "Invalid request body".into(),
            issues: Some(rejection.body_text()),
        }
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        Self::Validation {
            message: "Invalid path parameter".into(),
            issues: Some(rejection.body_text()),
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::SessionTaken => ApiError::SessionTaken,
            StoreError::UnknownUser(id) => {
                ApiError::Internal(anyhow::anyhow!("meal owner {id} does not exist"))
            }
            StoreError::Backend(e) => ApiError::Internal(e),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match self {
            ApiError::Validation { message, issues } => ErrorBody { message, issues },
            ApiError::Internal(e) => {
                error!(error = %e, "request failed");
                ErrorBody {
                    message: "Internal server error".into(),
                    issues: None,
                }
            }
            other => ErrorBody {
                message: other.to_string(),
                issues: None,
            },
        };
        (status, Json(body)).into_response()
    }
}
