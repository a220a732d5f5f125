//! Theme Styling Functions

use eframe::egui::{self, Stroke};
use super::colors;

/// Apply the global theme to the egui context
pub fn apply_global_theme(ctx: &egui::Context) {
    let mut style = (*ctx.style()).clone();

    style.visuals.window_fill = colors::MAIN_BG;
    style.visuals.panel_fill = colors::MAIN_BG;
    style.visuals.extreme_bg_color = colors::INPUT_BG;
    style.visuals.override_text_color = Some(colors::TEXT_DARK);

    style.visuals.widgets.inactive.bg_fill = colors::BUTTON_SECONDARY;
    style.visuals.widgets.inactive.weak_bg_fill = colors::BUTTON_SECONDARY;
    style.visuals.widgets.hovered.bg_fill = colors::PANEL_BG;
    style.visuals.widgets.active.bg_fill = colors::BUTTON_PRIMARY;
    style.visuals.widgets.active.fg_stroke = Stroke::new(1.0, colors::TEXT_LIGHT);

    style.visuals.selection.bg_fill = colors::SELECTION;
    style.visuals.selection.stroke = Stroke::new(1.0, colors::TEXT_LIGHT);

    ctx.set_style(style);
}

/// Create a frame style for the top bar
pub fn top_bar_frame() -> egui::Frame {
    egui::Frame::new()
        .fill(colors::TOP_BAR_BG)
        .inner_margin(egui::Margin::symmetric(12, 8))
}

/// Create a frame style for the main area
pub fn main_frame() -> egui::Frame {
    egui::Frame::new()
        .fill(colors::MAIN_BG)
        .inner_margin(egui::Margin::same(12))
}

/// Frame around the diff review
pub fn review_frame() -> egui::Frame {
    egui::Frame::new()
        .fill(colors::PANEL_BG)
        .stroke(Stroke::new(1.0, colors::INPUT_BORDER))
        .corner_radius(egui::CornerRadius::same(6))
        .inner_margin(egui::Margin::same(10))
}
