//! Error types for the task API client.
//!
//! # Design
//! Every failed remote call is a single `FetchError`. The HTTP status, when
//! there is one, travels as data inside `FailureReason::Status`; nothing
//! downstream branches on it. The controller shows only the short
//! per-operation message and logs the rest.

use thiserror::Error;

/// The remote operation a `FetchError` came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    List,
    Get,
    Create,
    Update,
    Delete,
}

impl Operation {
    /// Short human-readable message for the error banner.
    pub fn failure_message(self) -> &'static str {
        match self {
            Operation::List => "Failed to fetch tasks",
            Operation::Get => "Failed to fetch task",
            Operation::Create => "Failed to create task",
            Operation::Update => "Failed to update task",
            Operation::Delete => "Failed to delete task",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FailureReason {
    /// The server answered with a status outside 2xx.
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// The request never produced a response.
    #[error("transport failed: {0}")]
    Transport(String),

    #[error("deserialization failed: {0}")]
    Deserialization(String),

    #[error("serialization failed: {0}")]
    Serialization(String),
}

/// Errors returned by `TaskClient` parse methods and the `DataClient`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}: {}", .operation.failure_message(), .reason)]
pub struct FetchError {
    pub operation: Operation,
    pub reason: FailureReason,
}

impl FetchError {
    pub fn new(operation: Operation, reason: FailureReason) -> Self {
        Self { operation, reason }
    }

    pub fn message(&self) -> &'static str {
        self.operation.failure_message()
    }

    pub fn status(&self) -> Option<u16> {
        match self.reason {
            FailureReason::Status { status, .. } => Some(status),
            _ => None,
        }
    }
}

/// Connection-level failure reported by a `Transport`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct TransportError(pub String);
