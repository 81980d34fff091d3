//! Error types for the Hangar client

use serde::Deserialize;
use thiserror::Error;

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors that can occur when using the Hangar client
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// API returned an error status code
    #[error("API error (status {status}{}): {message}", code_suffix(.code))]
    ApiError {
        /// HTTP status code
        status: u16,
        /// Structured RPC status code, when the body carried one
        code: Option<RpcCode>,
        /// Error message from the API
        message: String,
    },

    /// Failed to parse response
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// Resource not found
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Invalid request
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Internal error
    #[error("Internal error: {0}")]
    InternalError(String),
}

impl ClientError {
    /// Create an API error from status code and message
    pub fn api_error(status: u16, message: impl Into<String>) -> Self {
        Self::ApiError {
            status,
            code: None,
            message: message.into(),
        }
    }

    /// Create an API error carrying a structured RPC code
    pub fn rpc_error(status: u16, code: RpcCode, message: impl Into<String>) -> Self {
        Self::ApiError {
            status,
            code: Some(code),
            message: message.into(),
        }
    }

    /// Build an API error from a failed response body
    ///
    /// The service answers failures with an RPC status object
    /// (`{"code": 6, "message": "..."}`); anything else is kept verbatim as
    /// the message.
    pub fn from_response_body(status: u16, body: &str) -> Self {
        match serde_json::from_str::<RpcStatus>(body) {
            Ok(rpc) => Self::ApiError {
                status,
                code: rpc.code.and_then(RpcCode::from_i32),
                message: rpc.message.unwrap_or_else(|| body.to_string()),
            },
            Err(_) => Self::api_error(status, body),
        }
    }

    /// Structured RPC code, if the service supplied one
    pub fn rpc_code(&self) -> Option<RpcCode> {
        match self {
            Self::ApiError { code, .. } => *code,
            _ => None,
        }
    }

    /// HTTP status code, if the service answered
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::ApiError { status, .. } => Some(*status),
            Self::RequestFailed(err) => err.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Message supplied by the service, or the error's own description
    pub fn message(&self) -> String {
        match self {
            Self::ApiError { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }

    /// Check if this error is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
            || matches!(self, Self::ApiError { status: 404, .. })
            || self.rpc_code() == Some(RpcCode::NotFound)
    }

    /// Check if this error is an HTTP conflict (409)
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::ApiError { status: 409, .. })
    }

    /// Check if this error is a client error (4xx status)
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::ApiError { status, .. } if *status >= 400 && *status < 500)
    }

    /// Check if this error is a server error (5xx status)
    pub fn is_server_error(&self) -> bool {
        matches!(self, Self::ApiError { status, .. } if *status >= 500)
    }
}

fn code_suffix(code: &Option<RpcCode>) -> String {
    code.map(|c| format!(", code {}", c)).unwrap_or_default()
}

/// RPC status body returned by the service on failure
#[derive(Debug, Deserialize)]
struct RpcStatus {
    #[serde(default)]
    code: Option<i32>,
    #[serde(default)]
    message: Option<String>,
}

/// Canonical RPC status codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RpcCode {
    Cancelled,
    Unknown,
    InvalidArgument,
    DeadlineExceeded,
    NotFound,
    AlreadyExists,
    PermissionDenied,
    ResourceExhausted,
    FailedPrecondition,
    Aborted,
    OutOfRange,
    Unimplemented,
    Internal,
    Unavailable,
    DataLoss,
    Unauthenticated,
    Other(i32),
}

impl RpcCode {
    /// Decode a numeric code; 0 (OK) carries no error and maps to `None`
    pub fn from_i32(code: i32) -> Option<Self> {
        let code = match code {
            0 => return None,
            1 => RpcCode::Cancelled,
            2 => RpcCode::Unknown,
            3 => RpcCode::InvalidArgument,
            4 => RpcCode::DeadlineExceeded,
            5 => RpcCode::NotFound,
            6 => RpcCode::AlreadyExists,
            7 => RpcCode::PermissionDenied,
            8 => RpcCode::ResourceExhausted,
            9 => RpcCode::FailedPrecondition,
            10 => RpcCode::Aborted,
            11 => RpcCode::OutOfRange,
            12 => RpcCode::Unimplemented,
            13 => RpcCode::Internal,
            14 => RpcCode::Unavailable,
            15 => RpcCode::DataLoss,
            16 => RpcCode::Unauthenticated,
            other => RpcCode::Other(other),
        };
        Some(code)
    }

    /// Numeric value of the code
    pub fn as_i32(&self) -> i32 {
        match self {
            RpcCode::Cancelled => 1,
            RpcCode::Unknown => 2,
            RpcCode::InvalidArgument => 3,
            RpcCode::DeadlineExceeded => 4,
            RpcCode::NotFound => 5,
            RpcCode::AlreadyExists => 6,
            RpcCode::PermissionDenied => 7,
            RpcCode::ResourceExhausted => 8,
            RpcCode::FailedPrecondition => 9,
            RpcCode::Aborted => 10,
            RpcCode::OutOfRange => 11,
            RpcCode::Unimplemented => 12,
            RpcCode::Internal => 13,
            RpcCode::Unavailable => 14,
            RpcCode::DataLoss => 15,
            RpcCode::Unauthenticated => 16,
            RpcCode::Other(code) => *code,
        }
    }
}

impl std::fmt::Display for RpcCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RpcCode::Other(code) => write!(f, "{}", code),
            named => write!(f, "{:?}", named),
        }
    }
}
