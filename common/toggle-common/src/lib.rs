pub mod clock;
pub mod types;

pub use clock::now_iso8601;
pub use types::{StateChange, StateReport, StateUpdate, SystemStatus};

/// Stable numeric codes for [`ToggleError`] variants.
///
/// The 1xxx range is caller error, 5xxx is internal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum ErrorCode {
    InvalidStatus = 1001,
    MethodNotAllowed = 1002,
    PayloadTooLarge = 1003,
    TimestampFormat = 5001,
    Serialization = 5002,
    BodyRead = 5003,
}

#[derive(thiserror::Error, Debug)]
pub enum ToggleError {
    #[error("Invalid status. Must be \"on\" or \"off\"")]
    InvalidStatus,

    #[error("Method not allowed")]
    MethodNotAllowed,

    #[error("Payload too large")]
    PayloadTooLarge,

    #[error("Body read error ({code:?}): {message}")]
    Body { code: ErrorCode, message: String },

    #[error("Timestamp error ({code:?}): {source}")]
    Timestamp { code: ErrorCode, source: time::error::Format },

    #[error("Serialization error ({code:?}): {source}")]
    Serialization { code: ErrorCode, source: serde_json::Error },
}

impl ToggleError {
    pub fn code(&self) -> ErrorCode {
        match self {
            ToggleError::InvalidStatus => ErrorCode::InvalidStatus,
            ToggleError::MethodNotAllowed => ErrorCode::MethodNotAllowed,
            ToggleError::PayloadTooLarge => ErrorCode::PayloadTooLarge,
            ToggleError::Body { code, .. } => *code,
            ToggleError::Timestamp { code, .. } => *code,
            ToggleError::Serialization { code, .. } => *code,
        }
    }

    /// True for failures the caller did not cause. Their details stay in the logs.
    pub fn is_internal(&self) -> bool {
        matches!(
            self,
            ToggleError::Timestamp { .. } | ToggleError::Serialization { .. } | ToggleError::Body { .. }
        )
    }

    pub fn body(msg: impl Into<String>) -> Self {
        Self::Body {
            code: ErrorCode::BodyRead,
            message: msg.into(),
        }
    }
}

impl From<time::error::Format> for ToggleError {
    fn from(value: time::error::Format) -> Self {
        Self::Timestamp {
            code: ErrorCode::TimestampFormat,
            source: value,
        }
    }
}

impl From<serde_json::Error> for ToggleError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serialization {
            code: ErrorCode::Serialization,
            source: value,
        }
    }
}
