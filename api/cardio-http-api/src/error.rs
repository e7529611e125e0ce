use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use cardio_app::{
    domain::DomainError, workflow::feedback::FeedbackError, workflow::predict::PredictError,
};
use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum ServiceError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("payload too large: {0}")]
    PayloadTooLarge(String),

    #[error("service unavailable: {0}")]
    Unavailable(String),

    #[error("upstream failure: {0}")]
    BadGateway(String),

    #[error("internal error: {0}")]
    Internal(String),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

impl ServiceError {
    pub fn status(&self) -> StatusCode {
        match self {
            ServiceError::NotFound(_) => StatusCode::NOT_FOUND,
            ServiceError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ServiceError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            ServiceError::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            ServiceError::BadGateway(_) => StatusCode::BAD_GATEWAY,
            ServiceError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<DomainError> for ServiceError {
    fn from(e: DomainError) -> Self {
        ServiceError::BadRequest(e.to_string())
    }
}

/// Bodies that fail to decode are invalid input, reported as 400 with the
/// usual `{"error": ...}` body instead of axum's plain-text 422.
impl From<JsonRejection> for ServiceError {
    fn from(rejection: JsonRejection) -> Self {
        match rejection.status() {
            StatusCode::PAYLOAD_TOO_LARGE => ServiceError::PayloadTooLarge(rejection.body_text()),
            _ => ServiceError::BadRequest(rejection.body_text()),
        }
    }
}

impl From<PredictError> for ServiceError {
    fn from(e: PredictError) -> Self {
        ServiceError::Internal(e.to_string())
    }
}

impl From<FeedbackError> for ServiceError {
    fn from(e: FeedbackError) -> Self {
        match e {
            FeedbackError::EmptyMessage => ServiceError::BadRequest(e.to_string()),
            FeedbackError::MissingSecrets => ServiceError::Unavailable(e.to_string()),
            FeedbackError::Send(_) => ServiceError::BadGateway(e.to_string()),
            FeedbackError::Internal(_) => ServiceError::Internal(e.to_string()),
        }
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let status = self.status();
        let msg = match self {
            ServiceError::NotFound(msg)
            | ServiceError::BadRequest(msg)
            | ServiceError::PayloadTooLarge(msg)
            | ServiceError::Unavailable(msg)
            | ServiceError::BadGateway(msg)
            | ServiceError::Internal(msg) => msg,
        };
        let body = serde_json::json!({ "error": msg });
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use cardio_app::ports::email::SendEmailError;

    use super::*;

    #[test]
    fn test_feedback_errors_map_to_statuses() {
        let cases = [
            (FeedbackError::EmptyMessage, StatusCode::BAD_REQUEST),
            (FeedbackError::MissingSecrets, StatusCode::SERVICE_UNAVAILABLE),
            (
                FeedbackError::Send(SendEmailError::Transport("relay refused".to_string())),
                StatusCode::BAD_GATEWAY,
            ),
        ];
        for (error, status) in cases {
            assert_eq!(ServiceError::from(error).status(), status);
        }
    }
}
