//! Unified error handling with Sentry integration.
//!
//! Handlers return `Result<T, AppError>`. Server-side failures are captured
//! to Sentry before the response is built; client errors are not.

use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::db::RepositoryError;
use crate::services::CatalogError;

/// Application-level error type for the catalog API.
#[derive(Debug, Error)]
pub enum AppError {
    /// Catalog operation failed.
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// Request body was missing or not a valid product.
    #[error(transparent)]
    Json(#[from] JsonRejection),

    /// Path parameter was not a valid identifier.
    #[error(transparent)]
    Path(#[from] PathRejection),
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    message: String,
    status: u16,
}

impl AppError {
    /// HTTP status code for this error.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Catalog(err) => match err {
                CatalogError::MissingCategory => StatusCode::BAD_REQUEST,
                CatalogError::UnresolvedCategory(_) => StatusCode::INTERNAL_SERVER_ERROR,
                CatalogError::Repository(repo) => match repo {
                    RepositoryError::NotFound => StatusCode::NOT_FOUND,
                    RepositoryError::Conflict(_) => StatusCode::CONFLICT,
                    RepositoryError::IntegrityViolation(_) => StatusCode::UNPROCESSABLE_ENTITY,
                    RepositoryError::Database(_) | RepositoryError::DataCorruption(_) => {
                        StatusCode::INTERNAL_SERVER_ERROR
                    }
                },
            },
            Self::Json(rejection) => rejection.status(),
            Self::Path(rejection) => rejection.status(),
        }
    }

    fn is_server_error(&self) -> bool {
        self.status().is_server_error()
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        // Capture server errors to Sentry
        if self.is_server_error() {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        } else {
            tracing::debug!(error = %self, status = status.as_u16(), "Request rejected");
        }

        // Don't expose internal error details to clients
        let message = match &self {
            Self::Catalog(CatalogError::Repository(RepositoryError::IntegrityViolation(_))) => {
                "Referenced category does not exist".to_string()
            }
            _ if self.is_server_error() => "Internal server error".to_string(),
            Self::Json(rejection) => rejection.body_text(),
            Self::Path(rejection) => rejection.body_text(),
            Self::Catalog(err) => err.to_string(),
        };

        let body = ErrorBody {
            message,
            status: status.as_u16(),
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use shop_catalog_core::ProductId;

    use super::*;

    fn get_status(err: impl Into<AppError>) -> StatusCode {
        err.into().into_response().status()
    }

    #[test]
    fn test_app_error_status_codes() {
        assert_eq!(
            get_status(CatalogError::MissingCategory),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            get_status(CatalogError::UnresolvedCategory(ProductId::new(3))),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            get_status(CatalogError::Repository(RepositoryError::NotFound)),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            get_status(CatalogError::Repository(RepositoryError::Conflict(
                "category_name_key".to_string()
            ))),
            StatusCode::CONFLICT
        );
        assert_eq!(
            get_status(CatalogError::Repository(
                RepositoryError::IntegrityViolation("product_categoryid_fkey".to_string())
            )),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            get_status(CatalogError::Repository(RepositoryError::DataCorruption(
                "bad row".to_string()
            ))),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[tokio::test]
    async fn test_server_errors_hide_details() {
        let response = AppError::from(CatalogError::Repository(RepositoryError::DataCorruption(
            "secret column layout".to_string(),
        )))
        .into_response();

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();

        assert_eq!(body["message"], "Internal server error");
        assert_eq!(body["status"], 500);
    }

    #[tokio::test]
    async fn test_client_errors_carry_message() {
        let response = AppError::from(CatalogError::MissingCategory).into_response();

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();

        assert_eq!(body["message"], "product must reference a category");
        assert_eq!(body["status"], 400);
    }
}
