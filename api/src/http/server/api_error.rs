use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use board_core::CoreError;
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    UnprocessableEntity(String),

    #[error("Service unavailable")]
    ServiceUnavailable,

    #[error("Internal server error")]
    InternalServerError,

    #[error("Startup error: {0}")]
    StartupError(String),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::UnprocessableEntity(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::InternalServerError | ApiError::StartupError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            ApiError::NotFound(_) => "not_found",
            ApiError::BadRequest(_) => "bad_request",
            ApiError::UnprocessableEntity(_) => "unprocessable_entity",
            ApiError::ServiceUnavailable => "service_unavailable",
            ApiError::InternalServerError | ApiError::StartupError(_) => "internal_error",
        }
    }
}

impl From<CoreError> for ApiError {
    fn from(error: CoreError) -> Self {
        match error {
            CoreError::MessageNotFound { .. } => ApiError::NotFound(error.to_string()),
            CoreError::InvalidPageSize | CoreError::PageOutOfRange { .. } => {
                ApiError::BadRequest(error.to_string())
            }
            CoreError::Unhealthy | CoreError::ServiceUnavailable(_) => {
                ApiError::ServiceUnavailable
            }
            CoreError::AnonymousUserMissing { .. } => {
                tracing::error!(error = %error, "server is misconfigured");
                ApiError::InternalServerError
            }
            CoreError::DatabaseError { .. } => {
                tracing::error!(error = %error, "store failure");
                ApiError::InternalServerError
            }
        }
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        match rejection {
            JsonRejection::JsonDataError(_) => ApiError::UnprocessableEntity(rejection.body_text()),
            _ => ApiError::BadRequest(rejection.body_text()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = json!({
            "error": self.error_code(),
            "message": self.to_string(),
        });

        (self.status_code(), Json(body)).into_response()
    }
}
