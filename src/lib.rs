//! PostCraft - Selective Text Enhancement
//!
//! PostCraft lets a writer highlight part of a draft, ask an external AI
//! rewrite service for an improved version, review the change as an inline
//! word diff and then accept or reject it.
//!
//! # Module Structure
//!
//! - **`shared`** - Types shared by every layer
//!   - Rewrite service request/response bodies and directives
//!   - Configuration (defaults, TOML file, environment)
//!   - Error types
//!
//! - **`editor`** - The enhancement engine, free of I/O
//!   - Word tokenizer and diff aligner
//!   - Patch rendering (segments and `[-old-]{+new+}` markup)
//!   - Selection/patch controller state machine
//!
//! - **`client`** - Talking to the rewrite service
//!   - reqwest-backed `RewriteClient`
//!   - `EnhanceSession`: controller + service + tokio plumbing
//!
//! - **`egui_app`** - Native review window (only with the `gui` feature)
//!
//! # Feature Flags
//!
//! - **`gui`** - Builds the egui/eframe review window and the
//!   `postcraft_app` binary
//!
//! # Usage
//!
//! ```rust
//! use postcraft::editor::diff_text;
//! use postcraft::editor::render::to_markup;
//!
//! let script = diff_text("I love AI", "I adore AI");
//! assert_eq!(to_markup(&script), "I [-love-]{+adore+} AI");
//! ```
//!
//! # Error Handling
//!
//! - `EnhanceError` for rejected editor operations; the controller is left
//!   unchanged when one is returned
//! - `RewriteError` for rewrite service failures; these never reach the user
//!   as errors, the controller turns them into a fallback patch
//! - `ConfigError` for configuration loading

/// Shared types and data structures
pub mod shared;

/// Selective enhancement engine
pub mod editor;

/// Rewrite service client and async session
pub mod client;

/// egui native review window
#[cfg(feature = "gui")]
pub mod egui_app;
