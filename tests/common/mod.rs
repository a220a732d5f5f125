//! Common test utilities and helpers
//!
//! This module provides shared utilities for all tests including:
//! - Sample drafts
//! - Mock rewrite server helpers (wiremock)
//! - An in-process scripted rewrite service
//! - Edit script assertions

#![allow(dead_code)]

pub mod assertions;

// Re-export commonly used utilities
pub use assertions::*;
pub use fixtures::*;
pub use mock_server::*;
