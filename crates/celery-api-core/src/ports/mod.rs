//! Port definitions (trait abstractions) for external systems.
//!
//! Ports define the interfaces that the core domain expects from infrastructure.
//! They contain no implementation details and use only domain types.
//!
//! # Design Rules
//!
//! - No AMQP client types in any signature
//! - Intent-based methods (publish a task), not transport primitives

pub mod broker;

use thiserror::Error;

pub use broker::{BrokerError, TaskBroker};

use crate::domain::TaskValidationError;

/// Top-level error for core operations.
///
/// Adapters map this to their own error surface (HTTP status, exit code).
#[derive(Debug, Error)]
pub enum CoreError {
    /// Input failed validation.
    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<TaskValidationError> for CoreError {
    fn from(err: TaskValidationError) -> Self {
        Self::Validation(err.to_string())
    }
}
