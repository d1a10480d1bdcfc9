//! Response envelope shared by every boundary call.

use crate::service::person_service::{ErrorKind, ServiceError};
use serde::Serialize;

/// Uniform response body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    /// Short summary of what happened.
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// Detail for failures.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn success(message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: Some(data),
            error: None,
        }
    }

    pub fn success_empty(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: None,
            error: None,
        }
    }

    pub fn error(message: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            data: None,
            error: Some(detail.into()),
        }
    }
}

/// Envelope plus the status code a transport should use.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiReply<T> {
    pub status: u16,
    pub body: ApiResponse<T>,
}

impl<T> ApiReply<T> {
    pub fn ok(message: impl Into<String>, data: T) -> Self {
        Self {
            status: 200,
            body: ApiResponse::success(message, data),
        }
    }

    pub fn created(message: impl Into<String>, data: T) -> Self {
        Self {
            status: 201,
            body: ApiResponse::success(message, data),
        }
    }

    pub fn ok_empty(message: impl Into<String>) -> Self {
        Self {
            status: 200,
            body: ApiResponse::success_empty(message),
        }
    }

    pub fn bad_request(message: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            status: 400,
            body: ApiResponse::error(message, detail),
        }
    }

    /// Maps a service failure to its status code and envelope.
    ///
    /// Storage details are not echoed back to callers.
    pub fn from_service_error(err: &ServiceError) -> Self {
        let kind = err.kind();
        let (message, detail) = match kind {
            ErrorKind::InvalidArgument => ("invalid data", err.to_string()),
            ErrorKind::NotFound => ("person not found", err.to_string()),
            ErrorKind::StorageFault => (
                "internal server error",
                "an unexpected error occurred".to_string(),
            ),
        };
        Self {
            status: status_for(kind),
            body: ApiResponse::error(message, detail),
        }
    }

    pub fn is_success(&self) -> bool {
        self.body.success
    }
}

/// Status code for an error kind.
pub fn status_for(kind: ErrorKind) -> u16 {
    match kind {
        ErrorKind::InvalidArgument => 400,
        ErrorKind::NotFound => 404,
        ErrorKind::StorageFault => 500,
    }
}
