//! Operation domain types
//!
//! An operation is an opaque handle for asynchronous work the service performs
//! after a mutating call returns.

use serde::{Deserialize, Serialize};

/// A long-running operation owned by the remote service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Operation {
    pub id: String,

    #[serde(default)]
    pub state: OperationState,

    /// Present when the operation terminated with a failure
    #[serde(default)]
    pub error: Option<OperationFailure>,
}

/// Operation lifecycle state
///
/// Decoded from the service's state string. Unrecognized strings are kept in
/// `Unknown` so callers can report them as protocol mismatches.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum OperationState {
    #[default]
    Pending,
    Running,
    Done,
    Unknown(String),
}

impl OperationState {
    /// Whether the operation has finished (successfully or not)
    pub fn is_done(&self) -> bool {
        matches!(self, OperationState::Done)
    }
}

impl From<String> for OperationState {
    fn from(value: String) -> Self {
        match value.as_str() {
            "PENDING" => OperationState::Pending,
            "RUNNING" => OperationState::Running,
            "DONE" => OperationState::Done,
            _ => OperationState::Unknown(value),
        }
    }
}

impl From<OperationState> for String {
    fn from(state: OperationState) -> Self {
        state.to_string()
    }
}

impl std::fmt::Display for OperationState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OperationState::Pending => write!(f, "PENDING"),
            OperationState::Running => write!(f, "RUNNING"),
            OperationState::Done => write!(f, "DONE"),
            OperationState::Unknown(state) => write!(f, "{}", state),
        }
    }
}

/// Error payload embedded in a failed operation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationFailure {
    #[serde(default)]
    pub code: i32,

    #[serde(default)]
    pub message: String,
}
