//! HTTP error envelope and mapping from domain errors.
//!
//! The domain stays free of transport concerns; this module translates
//! [`crate::domain::Error`] into Actix responses with a stable
//! machine-readable code, the ambient trace identifier, and structured
//! details for clients that want more than the message.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use utoipa::ToSchema;

use crate::domain::Error as DomainError;
use crate::middleware::trace::{TRACE_ID_HEADER, TraceId};

/// Stable machine-readable error code describing the failure category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ApiErrorCode {
    /// The request is malformed or fails validation.
    InvalidRequest,
    /// The requested stall does not exist.
    NotFound,
    /// The request conflicts with current state (duplicate code, illegal
    /// transition, or concurrent modification).
    Conflict,
    /// The storage backend is unreachable.
    ServiceUnavailable,
    /// An unexpected server-side failure.
    InternalError,
}

/// Standard error envelope returned by the HTTP adapter.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    #[schema(example = "invalid_request")]
    code: ApiErrorCode,
    #[schema(example = "something went wrong")]
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    trace_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<Value>,
}

impl ApiError {
    /// Construct an error, capturing any ambient trace identifier.
    pub fn new(code: ApiErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            trace_id: TraceId::current().map(|id| id.to_string()),
            details: None,
        }
    }

    /// Convenience constructor for validation failures.
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(ApiErrorCode::InvalidRequest, message)
    }

    /// Attach structured details to the error.
    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }

    /// Stable machine-readable error code.
    pub fn code(&self) -> ApiErrorCode {
        self.code
    }

    /// Human readable message.
    pub fn message(&self) -> &str {
        self.message.as_str()
    }

    /// Trace identifier propagated into the response header.
    pub fn trace_id(&self) -> Option<&str> {
        self.trace_id.as_deref()
    }

    /// Supplementary error details for clients.
    pub fn details(&self) -> Option<&Value> {
        self.details.as_ref()
    }

    fn to_status_code(&self) -> StatusCode {
        match self.code {
            ApiErrorCode::InvalidRequest => StatusCode::BAD_REQUEST,
            ApiErrorCode::NotFound => StatusCode::NOT_FOUND,
            ApiErrorCode::Conflict => StatusCode::CONFLICT,
            ApiErrorCode::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            ApiErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<DomainError> for ApiError {
    fn from(error: DomainError) -> Self {
        let message = error.to_string();
        match error {
            DomainError::NotFound { id } => Self::new(ApiErrorCode::NotFound, message)
                .with_details(json!({ "id": id.to_string() })),
            DomainError::DuplicateCode { code } => Self::new(ApiErrorCode::Conflict, message)
                .with_details(json!({
                    "code": "duplicate_code",
                    "stallCode": code.as_str(),
                })),
            DomainError::InvalidTransition { current, attempted } => {
                Self::new(ApiErrorCode::Conflict, message).with_details(json!({
                    "code": "invalid_transition",
                    "currentStatus": current.as_str(),
                    "attempted": attempted.verb(),
                }))
            }
            DomainError::Conflict { id } => Self::new(ApiErrorCode::Conflict, message)
                .with_details(json!({
                    "code": "concurrent_modification",
                    "id": id.to_string(),
                })),
            DomainError::Unavailable { .. } => Self::new(ApiErrorCode::ServiceUnavailable, message),
            DomainError::Internal { .. } => Self::new(ApiErrorCode::InternalError, message),
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ApiError {}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        self.to_status_code()
    }

    fn error_response(&self) -> HttpResponse {
        let mut builder = HttpResponse::build(self.status_code());
        if let Some(id) = &self.trace_id {
            builder.insert_header((TRACE_ID_HEADER, id.clone()));
        }
        if matches!(
            self.code,
            ApiErrorCode::InternalError | ApiErrorCode::ServiceUnavailable
        ) {
            // Backend diagnostics stay in the logs, not in client payloads.
            let mut redacted = self.clone();
            redacted.message = match self.code {
                ApiErrorCode::ServiceUnavailable => "service temporarily unavailable".to_owned(),
                _ => "internal server error".to_owned(),
            };
            redacted.details = None;
            return builder.json(redacted);
        }
        builder.json(self)
    }
}

/// Convenience alias for HTTP handlers.
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::stall::{StallCode, StallId, StallStatus, Transition};
    use rstest::rstest;

    #[rstest]
    fn not_found_maps_to_404() {
        let api: ApiError = DomainError::not_found(StallId::random()).into();
        assert_eq!(api.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(api.code(), ApiErrorCode::NotFound);
    }

    #[rstest]
    fn duplicate_code_maps_to_409_with_details() {
        let code = StallCode::new("A-001").expect("valid code");
        let api: ApiError = DomainError::duplicate_code(code).into();
        assert_eq!(api.status_code(), StatusCode::CONFLICT);
        let details = api.details().and_then(Value::as_object).expect("details");
        assert_eq!(
            details.get("code").and_then(Value::as_str),
            Some("duplicate_code")
        );
        assert_eq!(
            details.get("stallCode").and_then(Value::as_str),
            Some("A-001")
        );
    }

    #[rstest]
    fn invalid_transition_maps_to_409_and_names_the_status() {
        let api: ApiError =
            DomainError::invalid_transition(StallStatus::Available, Transition::Reserve).into();
        assert_eq!(api.status_code(), StatusCode::CONFLICT);
        assert!(api.message().contains("AVAILABLE"));
        let details = api.details().and_then(Value::as_object).expect("details");
        assert_eq!(
            details.get("attempted").and_then(Value::as_str),
            Some("reserve")
        );
    }

    #[rstest]
    fn conflict_maps_to_409() {
        let api: ApiError = DomainError::conflict(StallId::random()).into();
        assert_eq!(api.status_code(), StatusCode::CONFLICT);
    }

    #[actix_web::test]
    async fn internal_errors_are_redacted_in_the_response() {
        let api: ApiError = DomainError::internal("connection string leaked").into();
        let response = api.error_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let bytes = actix_web::body::to_bytes(response.into_body())
            .await
            .expect("body bytes");
        let text = std::str::from_utf8(&bytes).expect("utf8 body");
        assert!(!text.contains("connection string leaked"));
        assert!(text.contains("internal server error"));
    }

    #[rstest]
    fn unavailable_maps_to_503() {
        let api: ApiError = DomainError::unavailable("pool exhausted").into();
        assert_eq!(api.status_code(), StatusCode::SERVICE_UNAVAILABLE);
    }
}
