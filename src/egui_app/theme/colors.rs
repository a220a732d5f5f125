//! Color Constants for the Review Window
//!
//! Warm brown/tan scheme for the chrome, plus the red/green pair used by the
//! inline diff.

use eframe::egui::Color32;

/// Top bar background - Dark brown
pub const TOP_BAR_BG: Color32 = Color32::from_rgb(0x3E, 0x2A, 0x24);

/// Main area background - Off-white
pub const MAIN_BG: Color32 = Color32::from_rgb(0xF7, 0xF2, 0xEC);

/// Side panel background - Light tan
pub const PANEL_BG: Color32 = Color32::from_rgb(0xEA, 0xDB, 0xC8);

/// Editor background
pub const INPUT_BG: Color32 = Color32::from_rgb(0xE6, 0xD7, 0xC7);

/// Input border - Muted tan
pub const INPUT_BORDER: Color32 = Color32::from_rgb(0xC3, 0xA9, 0x90);

/// Text on dark backgrounds
pub const TEXT_LIGHT: Color32 = Color32::from_rgb(0xF0, 0xE0, 0xD6);

/// Text on light backgrounds
pub const TEXT_DARK: Color32 = Color32::from_rgb(0x2F, 0x1E, 0x1A);

/// Secondary text color (muted)
pub const TEXT_SECONDARY: Color32 = Color32::from_rgb(0x8B, 0x7B, 0x6B);

/// Removed words: red text, struck through
pub const DIFF_REMOVED: Color32 = Color32::from_rgb(0xC6, 0x28, 0x28);

/// Background behind removed words
pub const DIFF_REMOVED_BG: Color32 = Color32::from_rgb(0xFD, 0xE2, 0xE2);

/// Added words: dark green text
pub const DIFF_ADDED: Color32 = Color32::from_rgb(0x1B, 0x5E, 0x20);

/// Background behind added words
pub const DIFF_ADDED_BG: Color32 = Color32::from_rgb(0xC8, 0xE6, 0xC9);

/// Success color - Green
pub const SUCCESS: Color32 = Color32::from_rgb(0x4C, 0xAF, 0x50);

/// Error color - Red
pub const ERROR: Color32 = Color32::from_rgb(0xE5, 0x73, 0x73);

/// Warning color - Orange
pub const WARNING: Color32 = Color32::from_rgb(0xFF, 0xA7, 0x26);

/// Button primary background
pub const BUTTON_PRIMARY: Color32 = Color32::from_rgb(0x5C, 0x3A, 0x2C);

/// Button secondary background
pub const BUTTON_SECONDARY: Color32 = Color32::from_rgb(0xC7, 0xB2, 0x9A);

/// Selection highlight
pub const SELECTION: Color32 = Color32::from_rgb(0x4A, 0x2E, 0x22);

/// Separator/divider color
pub const SEPARATOR: Color32 = Color32::from_rgb(0xD0, 0xC0, 0xB0);
