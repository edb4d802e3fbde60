//! HTTP error response mapping.

use axum::Json;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use tyrehub_domain::error::{AuthError, TyreHubError, ValidationError};

/// JSON error body returned by API endpoints.
#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

/// Maps [`TyreHubError`] to an HTTP response with appropriate status code.
#[derive(Debug)]
pub struct ApiError(TyreHubError);

impl ApiError {
    /// The status code this error will be answered with.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            TyreHubError::Validation(_) => StatusCode::BAD_REQUEST,
            TyreHubError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            TyreHubError::Forbidden(_) => StatusCode::FORBIDDEN,
            TyreHubError::NotFound(_) => StatusCode::NOT_FOUND,
            TyreHubError::Storage(_) | TyreHubError::Credential(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl From<TyreHubError> for ApiError {
    fn from(err: TyreHubError) -> Self {
        Self(err)
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        Self(err.into())
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        Self(err.into())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::from(ValidationError::InvalidValue {
            field: "body",
            value: rejection.body_text(),
        })
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::from(ValidationError::InvalidValue {
            field: "query",
            value: rejection.body_text(),
        })
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self.0 {
            TyreHubError::Validation(err) => err.to_string(),
            TyreHubError::Unauthorized(err) => err.to_string(),
            TyreHubError::Forbidden(err) => err.to_string(),
            TyreHubError::NotFound(err) => err.to_string(),
            TyreHubError::Storage(err) => {
                tracing::error!(error = %err, "storage error");
                "internal server error".to_string()
            }
            TyreHubError::Credential(err) => {
                tracing::error!(error = %err, "credential error");
                "internal server error".to_string()
            }
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;
    use tyrehub_domain::error::{ForbiddenError, NotFoundError};
    use tyrehub_domain::user::Role;

    async fn render(err: ApiError) -> (StatusCode, serde_json::Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn should_answer_bad_request_for_validation_errors() {
        let (status, body) = render(ValidationError::UserAlreadyExists.into()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "user already exists");
    }

    #[tokio::test]
    async fn should_hide_role_details_behind_unauthorized() {
        let err = AuthError::WrongRole {
            expected: Role::Admin,
            actual: Role::Customer,
        };
        let (status, body) = render(err.into()).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"], "unauthorized");
    }

    #[tokio::test]
    async fn should_answer_forbidden_and_not_found() {
        let forbidden = TyreHubError::from(ForbiddenError {
            entity: "ServiceBooking",
        });
        let (status, _) = render(forbidden.into()).await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        let missing = TyreHubError::from(NotFoundError {
            entity: "Tyre",
            id: "42".to_string(),
        });
        let (status, body) = render(missing.into()).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Tyre 42 not found");
    }

    #[tokio::test]
    async fn should_mask_internal_failures() {
        let err = TyreHubError::Storage("disk on fire".into());
        let (status, body) = render(err.into()).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "internal server error");
    }
}
