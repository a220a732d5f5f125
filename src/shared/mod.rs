//! Shared Module
//!
//! Types used by both the editor core and the rewrite client: the wire
//! format of the rewrite service, configuration and error types.
//!
//! # Overview
//!
//! Nothing in here performs I/O apart from loading the configuration file.
//! All wire types derive `Serialize`/`Deserialize`.

/// Shared error types
pub mod error;

/// Application configuration
pub mod config;

/// Rewrite directives and the rewrite service's request/response bodies
pub mod enhance;

/// Re-export commonly used types for convenience
pub use config::{AppConfig, AppConfigBuilder, ConfigError};
pub use enhance::{EnhanceDirective, EnhanceRequest, EnhanceResponse, EnhanceType};
pub use error::{EnhanceError, RewriteError};
