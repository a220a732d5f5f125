//! Theme Module
//!
//! Color constants and frame builders for the review window.
//!
//! # Usage
//!
//! ```rust,ignore
//! use crate::egui_app::theme::{colors, styles};
//!
//! styles::apply_global_theme(ctx);
//! styles::review_frame().show(ui, |ui| {
//!     ui.colored_label(colors::DIFF_ADDED, "new words");
//! });
//! ```

pub mod colors;
pub mod styles;

pub use colors::*;
pub use styles::*;
