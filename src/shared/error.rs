//! Shared Error Types
//!
//! This module defines the errors returned at the boundary of the enhancement
//! controller. They describe requests the controller refuses to act on; the
//! state machine is left untouched whenever one of them is returned.
//!
//! # Error Categories
//!
//! - `EmptySelection` - The selected span has no visible characters
//! - `InvalidRange` - The selection offsets do not address the document
//! - `EmptyInstruction` - A custom directive was given without an instruction
//! - `InvalidTransition` - The command is not valid in the current state
//!
//! `RewriteError` describes failures of the external rewrite service. It is
//! never shown to the user: the controller turns it into a fallback patch.
//!
//! # Usage
//!
//! ```rust
//! use postcraft::shared::error::EnhanceError;
//!
//! let error = EnhanceError::invalid_transition("idle", "accept");
//! assert!(error.to_string().contains("idle"));
//! ```
use std::time::Duration;
use thiserror::Error;

/// Errors raised by the enhancement controller
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EnhanceError {
    /// The selection trims to zero characters
    #[error("Selection is empty")]
    EmptySelection,

    /// The selection offsets are out of bounds or split a character
    #[error("Invalid selection range {start}..{end} for document of {len} bytes")]
    InvalidRange {
        /// Byte offset where the selection starts
        start: usize,
        /// Byte offset where the selection ends
        end: usize,
        /// Length of the document in bytes
        len: usize,
    },

    /// A custom directive carried a blank instruction
    #[error("Custom instruction cannot be empty")]
    EmptyInstruction,

    /// The command does not apply to the current controller state
    #[error("Cannot {action} while {state}")]
    InvalidTransition {
        /// Name of the state the controller was in
        state: &'static str,
        /// The command that was refused
        action: &'static str,
    },
}

impl EnhanceError {
    /// Create a new invalid range error
    pub fn invalid_range(start: usize, end: usize, len: usize) -> Self {
        Self::InvalidRange { start, end, len }
    }

    /// Create a new invalid transition error
    pub fn invalid_transition(state: &'static str, action: &'static str) -> Self {
        Self::InvalidTransition { state, action }
    }

    /// Whether the error is caused by user input rather than by calling order
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            Self::EmptySelection | Self::InvalidRange { .. } | Self::EmptyInstruction
        )
    }
}

/// Failures of a rewrite service call
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RewriteError {
    /// The request could not be sent or the connection dropped
    #[error("Network error: {0}")]
    Network(String),

    /// No answer within the configured timeout
    #[error("Rewrite request timed out after {0:?}")]
    Timeout(Duration),

    /// The service answered with a non-success status
    #[error("Request failed: {status} - {body}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Response body, for logs
        body: String,
    },

    /// The body was not the expected JSON
    #[error("Failed to parse response: {0}")]
    Malformed(String),

    /// The body parsed but carried no usable enhanced text
    #[error("Response did not contain enhanced text")]
    MissingEnhancedText,
}

impl RewriteError {
    /// Create a new status error
    pub fn status(status: u16, body: impl Into<String>) -> Self {
        Self::Status {
            status,
            body: body.into(),
        }
    }
}
