//! Operation DTOs

use serde::{Deserialize, Serialize};

use crate::domain::operation::Operation;

/// Response to an operation wait
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OperationResponse {
    pub operation: Operation,
}
