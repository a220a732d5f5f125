//! egui Review Window Module
//!
//! Native desktop front end for selective enhancement, built on the
//! `client::EnhanceSession`.
//!
//! # Module Structure
//!
//! ```text
//! egui_app/
//! ├── mod.rs     - Module exports and documentation
//! ├── main.rs    - Binary entry point (postcraft_app)
//! ├── state/     - ReviewState: session, editor buffer, status line
//! ├── theme/     - Colors and frame styles
//! └── views/     - Editor, directive picker and inline diff review
//! ```
//!
//! # Example
//!
//! ```text
//! cargo run --features gui --bin postcraft_app -- draft.txt
//! ```

pub mod state;
pub mod theme;
pub mod views;

pub use state::{ReviewState, StatusKind};
