//! Rewrite Client Module
//!
//! Connects the editor core to the external rewrite service.
//!
//! - **`config`** - Client configuration (service URL, token storage)
//! - **`rewrite_client`** - `RewriteService` trait and the reqwest-backed client
//! - **`session`** - Controller + service + async plumbing for one document

pub mod config;
pub mod rewrite_client;
pub mod session;

pub use config::Config;
pub use rewrite_client::{RewriteClient, RewriteError, RewriteService};
pub use session::EnhanceSession;
