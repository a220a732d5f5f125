use eframe::egui;

use crate::editor::controller::EnhancePhase;
use crate::egui_app::state::{ReviewState, StatusKind};
use crate::egui_app::theme::colors;
use crate::shared::enhance::EnhanceDirective;

pub fn render(ui: &mut egui::Ui, state: &mut ReviewState) {
    ui.label("Document:");
    let editor = egui::TextEdit::multiline(&mut state.editor_text)
        .desired_width(f32::INFINITY)
        .desired_rows(12);
    if ui.add(editor).changed() {
        state.sync_editor();
    }

    ui.add_space(8.0);

    // Selection
    ui.horizontal(|ui| {
        ui.label("Select text:");
        let response = ui.add_sized(
            [320.0, 24.0],
            egui::TextEdit::singleline(&mut state.find_input).hint_text("text to enhance"),
        );
        let submitted = response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
        if ui.button("Select").clicked() || submitted {
            state.select_find();
        }
        if state.phase() == EnhancePhase::Selecting && ui.button("Clear").clicked() {
            state.clear_selection();
        }
    });

    if let Some(selection) = state.session.controller().selection() {
        ui.colored_label(
            colors::TEXT_SECONDARY,
            format!("Selected {:?}: \"{}\"", selection.range(), selection.trimmed()),
        );
    }

    ui.add_space(8.0);

    // Directive picker
    ui.horizontal(|ui| {
        egui::ComboBox::from_id_salt("directive_picker")
            .selected_text(state.directive.label())
            .show_ui(ui, |ui| {
                for preset in EnhanceDirective::PRESETS {
                    let label = preset.label();
                    ui.selectable_value(&mut state.directive, preset, label);
                }
                ui.selectable_value(
                    &mut state.directive,
                    EnhanceDirective::Custom(String::new()),
                    "Custom",
                );
            });

        if matches!(state.directive, EnhanceDirective::Custom(_)) {
            ui.add_sized(
                [260.0, 24.0],
                egui::TextEdit::singleline(&mut state.custom_instruction)
                    .hint_text("e.g. make it rhyme"),
            );
        }

        let can_enhance = state.phase() == EnhancePhase::Selecting;
        let enhance_btn = egui::Button::new(
            egui::RichText::new("✨ Enhance").color(colors::TEXT_LIGHT)
        )
        .fill(colors::BUTTON_PRIMARY);
        if ui.add_enabled(can_enhance, enhance_btn).clicked() {
            state.enhance();
        }

        if state.is_busy() {
            ui.spinner();
        }

        let undo_btn = egui::Button::new("↶ Undo");
        if ui
            .add_enabled(state.session.controller().can_undo(), undo_btn)
            .clicked()
        {
            state.undo();
        }
    });

    if let Some((kind, ref message)) = state.status {
        let color = match kind {
            StatusKind::Info => colors::TEXT_SECONDARY,
            StatusKind::Warning => colors::WARNING,
            StatusKind::Error => colors::ERROR,
        };
        ui.add_space(4.0);
        ui.colored_label(color, message);
    }
}
