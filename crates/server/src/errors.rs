use autoseo::SeoError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::error;

/// A custom error type for the server application.
///
/// Per-item pipeline failures never get here; they are reported inside a
/// normal `ProcessOutcome` body. This covers listings and bad requests.
pub enum AppError {
    /// Errors originating from `autoseo`.
    Seo(SeoError),
    /// The request was understood but its content is invalid.
    BadRequest(String),
}

impl From<SeoError> for AppError {
    fn from(err: SeoError) -> Self {
        AppError::Seo(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status_code, error_message) = match self {
            AppError::Seo(err) => {
                // Log the original error for debugging purposes
                error!("SeoError: {:?}", err);
                let status = match err {
                    SeoError::PostNotFound(_) | SeoError::ImageNotFound(_) => StatusCode::NOT_FOUND,
                    SeoError::Fetch(_) | SeoError::Generation(_) => StatusCode::BAD_GATEWAY,
                    SeoError::ConfigurationMissing(_)
                    | SeoError::Storage(_)
                    | SeoError::MetaWrite { .. } => StatusCode::INTERNAL_SERVER_ERROR,
                };
                (status, err.user_message())
            }
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status_code, body).into_response()
    }
}
