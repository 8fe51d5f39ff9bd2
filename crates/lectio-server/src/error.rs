use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use lectio_core::CoreError;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Invalid request: {0}")]
    BadRequest(String),

    #[error("{0}")]
    NotFound(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<CoreError> for ServerError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::InvalidMonth(_) | CoreError::Validation(_) => {
                ServerError::BadRequest(err.to_string())
            }
            CoreError::NotFound => ServerError::NotFound("Manual not found".to_string()),
            CoreError::Store(e) => ServerError::Internal(e.to_string()),
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ServerError::BadRequest(_) => (StatusCode::BAD_REQUEST, self.to_string()),
            ServerError::NotFound(_) => (StatusCode::NOT_FOUND, self.to_string()),
            ServerError::Internal(e) => {
                tracing::error!(error = %e, "request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error".to_string())
            }
        };

        // Failure envelope the client application expects.
        let body = serde_json::json!({
            "success": false,
            "message": message,
        });

        (status, axum::Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lectio_store::StoreError;

    #[test]
    fn core_errors_map_to_the_right_variants() {
        assert!(matches!(
            ServerError::from(CoreError::InvalidMonth("Smarch".to_string())),
            ServerError::BadRequest(_)
        ));
        assert!(matches!(
            ServerError::from(CoreError::Validation("title is required".to_string())),
            ServerError::BadRequest(_)
        ));
        assert!(matches!(
            ServerError::from(CoreError::NotFound),
            ServerError::NotFound(_)
        ));
        assert!(matches!(
            ServerError::from(CoreError::Store(StoreError::NoDataDir)),
            ServerError::Internal(_)
        ));
    }
}
