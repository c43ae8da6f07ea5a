// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Status taxonomy shared by every graph store
//!
//! Operations return `Result<Outcome, GraphError>`. Collaborators that speak a
//! flat status code (HTTP, replication RPC) map either side into [`StatusCode`].

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Flat status code understood by external collaborators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StatusCode {
    Success,
    NoAction,
    DoesNotExist,
    Invalid,
    NoSpace,
    Error,
    WrongPartition,
    PartitionFail,
}

impl StatusCode {
    pub fn as_str(self) -> &'static str {
        match self {
            StatusCode::Success => "SUCCESS",
            StatusCode::NoAction => "NO_ACTION",
            StatusCode::DoesNotExist => "DOES_NOT_EXIST",
            StatusCode::Invalid => "INVALID",
            StatusCode::NoSpace => "NO_SPACE",
            StatusCode::Error => "ERROR",
            StatusCode::WrongPartition => "WRONG_PARTITION",
            StatusCode::PartitionFail => "PARTITION_FAIL",
        }
    }

    /// True for codes that report a completed call (including valid no-ops)
    pub fn is_ok(self) -> bool {
        matches!(self, StatusCode::Success | StatusCode::NoAction)
    }
}

impl std::fmt::Display for StatusCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Successful result of a mutation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The mutation changed the graph
    Success,
    /// The mutation was valid but the graph already had the requested shape
    NoAction,
}

impl Outcome {
    pub fn status(self) -> StatusCode {
        match self {
            Outcome::Success => StatusCode::Success,
            Outcome::NoAction => StatusCode::NoAction,
        }
    }

    pub fn is_success(self) -> bool {
        self == Outcome::Success
    }
}

/// Errors returned by graph-store operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    #[error("node or edge does not exist")]
    DoesNotExist,
    #[error("invalid request: {0}")]
    Invalid(&'static str),
    #[error("no space left on device")]
    NoSpace,
    #[error("node is owned by another partition")]
    WrongPartition,
    #[error("partition peer failed")]
    PartitionFail,
    #[error("store halted after an unrecoverable storage fault")]
    Halted,
    #[error("storage error: {0}")]
    Storage(String),
}

impl GraphError {
    pub fn status(&self) -> StatusCode {
        match self {
            GraphError::DoesNotExist => StatusCode::DoesNotExist,
            GraphError::Invalid(_) => StatusCode::Invalid,
            GraphError::NoSpace => StatusCode::NoSpace,
            GraphError::WrongPartition => StatusCode::WrongPartition,
            GraphError::PartitionFail => StatusCode::PartitionFail,
            GraphError::Halted | GraphError::Storage(_) => StatusCode::Error,
        }
    }
}

/// Collapse a mutation result into its flat status code
pub fn status_of(result: &Result<Outcome, GraphError>) -> StatusCode {
    match result {
        Ok(outcome) => outcome.status(),
        Err(e) => e.status(),
    }
}

/// Reply a replication peer expects for a chained checkpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CheckpointStatus {
    Success,
    OutOfSpace,
    CheckpointDisabled,
    Fail,
}

impl<T> From<&Result<T, GraphError>> for CheckpointStatus {
    fn from(result: &Result<T, GraphError>) -> Self {
        match result {
            Ok(_) => CheckpointStatus::Success,
            Err(GraphError::NoSpace) => CheckpointStatus::OutOfSpace,
            Err(_) => CheckpointStatus::Fail,
        }
    }
}

#[cfg(test)]
#[path = "status_tests.rs"]
mod tests;
