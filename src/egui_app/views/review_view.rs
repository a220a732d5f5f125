use eframe::egui::{self, text::LayoutJob, FontId, Stroke, TextFormat};

use crate::editor::diff::EditKind;
use crate::editor::render::DiffSegment;
use crate::egui_app::state::ReviewState;
use crate::egui_app::theme::{colors, styles};

/// Build the inline diff: removed words struck through in red, added words
/// highlighted in green.
pub fn diff_layout(segments: &[DiffSegment], font_id: FontId, wrap_width: f32) -> LayoutJob {
    let mut job = LayoutJob::default();
    job.wrap.max_width = wrap_width;

    for segment in segments {
        let format = match segment.kind {
            EditKind::Unchanged => TextFormat {
                font_id: font_id.clone(),
                color: colors::TEXT_DARK,
                ..Default::default()
            },
            EditKind::Removed => TextFormat {
                font_id: font_id.clone(),
                color: colors::DIFF_REMOVED,
                background: colors::DIFF_REMOVED_BG,
                strikethrough: Stroke::new(1.5, colors::DIFF_REMOVED),
                ..Default::default()
            },
            EditKind::Added => TextFormat {
                font_id: font_id.clone(),
                color: colors::DIFF_ADDED,
                background: colors::DIFF_ADDED_BG,
                ..Default::default()
            },
        };
        job.append(&segment.text, 0.0, format);
    }
    job
}

pub fn render(ui: &mut egui::Ui, state: &mut ReviewState) {
    let Some(patch) = state.session.pending_patch() else {
        ui.colored_label(colors::TEXT_SECONDARY, "No suggestion to review");
        return;
    };

    let stats = patch.stats();
    let fallback = patch.origin.is_fallback();
    let job = diff_layout(
        &patch.segments(),
        FontId::proportional(16.0),
        ui.available_width(),
    );

    styles::review_frame().show(ui, |ui| {
        ui.horizontal(|ui| {
            ui.strong(format!("Suggestion: {}", patch.directive.label()));
            ui.colored_label(
                colors::TEXT_SECONDARY,
                format!(
                    "-{} / +{} words",
                    stats.removed_words, stats.added_words
                ),
            );
            if fallback {
                ui.colored_label(colors::WARNING, "fallback");
            }
        });
        ui.add_space(6.0);

        egui::ScrollArea::vertical()
            .id_salt("diff_scroll")
            .max_height(240.0)
            .show(ui, |ui| {
                ui.label(job);
            });
    });

    ui.add_space(8.0);
    ui.horizontal(|ui| {
        let accept_btn = egui::Button::new(
            egui::RichText::new("✔ Accept").color(colors::TEXT_LIGHT)
        )
        .fill(colors::SUCCESS);
        if ui.add(accept_btn).clicked() {
            state.accept();
        }

        let reject_btn = egui::Button::new(
            egui::RichText::new("✖ Reject").color(colors::TEXT_LIGHT)
        )
        .fill(colors::ERROR);
        if ui.add(reject_btn).clicked() {
            state.reject();
        }
    });
}
