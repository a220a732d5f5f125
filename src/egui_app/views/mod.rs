use eframe::egui;

use crate::egui_app::state::ReviewState;
use crate::egui_app::theme::{colors, styles};

pub mod editor_view;
pub mod review_view;

pub fn render_top_bar(ctx: &egui::Context, state: &ReviewState) {
    egui::TopBottomPanel::top("top_panel")
        .frame(styles::top_bar_frame())
        .show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.colored_label(colors::TEXT_LIGHT, egui::RichText::new("✍ PostCraft").size(18.0).strong());

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.add_space(16.0);
                    let phase = state.phase();
                    let color = if state.is_busy() { colors::WARNING } else { colors::TEXT_LIGHT };
                    ui.colored_label(color, phase.name());
                });
            });
        });
}

pub fn render_main_panel(ctx: &egui::Context, state: &mut ReviewState) {
    egui::CentralPanel::default()
        .frame(styles::main_frame())
        .show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                editor_view::render(ui, state);
                ui.add_space(12.0);
                ui.separator();
                ui.add_space(12.0);
                review_view::render(ui, state);
            });
        });
}
