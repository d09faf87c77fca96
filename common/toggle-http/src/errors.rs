use std::any::Any;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use toggle_common::ToggleError;

/// Shown in place of any internal failure.
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

/// JSON body of every error response.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

/// Wraps [`ToggleError`] to provide an Axum [`IntoResponse`] implementation.
#[derive(Debug)]
pub struct ApiError {
    pub err: ToggleError,
}

impl From<ToggleError> for ApiError {
    fn from(value: ToggleError) -> Self {
        Self { err: value }
    }
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self.err {
            ToggleError::InvalidStatus => StatusCode::BAD_REQUEST,
            ToggleError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ToggleError::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            ToggleError::Timestamp { .. } | ToggleError::Serialization { .. } | ToggleError::Body { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Text the caller sees. Internal causes never leave the process.
    pub fn public_message(&self) -> String {
        if self.err.is_internal() {
            INTERNAL_ERROR_MESSAGE.to_string()
        } else {
            self.err.to_string()
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.err.is_internal() {
            tracing::error!(error = %self.err, code = ?self.err.code(), "state api error");
        }

        let status = self.status_code();
        let body = ErrorBody {
            error: self.public_message(),
        };
        (status, Json(body)).into_response()
    }
}

/// Response for a handler that panicked. Used with `CatchPanicLayer::custom`.
pub fn panic_response(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.as_str()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        *s
    } else {
        "unknown panic payload"
    };
    tracing::error!(panic = %detail, "state api error");

    let body = ErrorBody {
        error: INTERNAL_ERROR_MESSAGE.to_string(),
    };
    (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    async fn body_of(resp: Response) -> serde_json::Value {
        let bytes = resp.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn invalid_status_is_a_bad_request_with_fixed_text() {
        let resp = ApiError::from(ToggleError::InvalidStatus).into_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_of(resp).await,
            serde_json::json!({"error": "Invalid status. Must be \"on\" or \"off\""})
        );
    }

    #[tokio::test]
    async fn unsupported_method_is_405() {
        let resp = ApiError::from(ToggleError::MethodNotAllowed).into_response();
        assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(body_of(resp).await, serde_json::json!({"error": "Method not allowed"}));
    }

    #[tokio::test]
    async fn oversized_body_is_413() {
        let resp = ApiError::from(ToggleError::PayloadTooLarge).into_response();
        assert_eq!(resp.status(), StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(body_of(resp).await, serde_json::json!({"error": "Payload too large"}));
    }

    #[tokio::test]
    async fn panic_payload_is_hidden() {
        let resp = panic_response(Box::new("index out of bounds".to_string()));
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_of(resp).await, serde_json::json!({"error": INTERNAL_ERROR_MESSAGE}));
    }

    #[tokio::test]
    async fn internal_cause_is_hidden() {
        let cause = serde_json::from_str::<serde_json::Value>("{oops").unwrap_err();
        let resp = ApiError::from(ToggleError::from(cause)).into_response();

        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_of(resp).await, serde_json::json!({"error": INTERNAL_ERROR_MESSAGE}));
    }
}
