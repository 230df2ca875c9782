//! Domain error types
//!
//! This module defines error types specific to domain operations,
//! such as identifier validation failures.

use thiserror::Error;

/// Errors that can occur in domain operations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Invalid file guid (source file id)
    #[error("Invalid guid: {0}")]
    InvalidGuid(String),

    /// Invalid record id in the external database
    #[error("Invalid record ID: {0}")]
    InvalidRecordId(String),

    /// Invalid timestamp in a change entry
    #[error("Invalid timestamp: {0}")]
    InvalidTimestamp(String),
}
