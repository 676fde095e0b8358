// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Saved annotations panel.
//!
//! This module lists the annotations saved for the current video and
//! shows the detail view for the selected one, with its answer choices
//! and the correct answer marked. Replay of a saved segment is reported
//! as an action.

use crate::models::annotation::Annotation;
use crate::util::time::format_time;

/// Result of review-list interaction.
pub enum ReviewAction {
    None,
    Select(usize),
    PlaySegment(usize),
}

/// Display the saved annotations for the current video.
pub fn show(
    ui: &mut egui::Ui,
    annotations: &[Annotation],
    selected: Option<usize>,
    can_play: bool,
) -> ReviewAction {
    let mut action = ReviewAction::None;

    ui.heading("Saved Annotations");
    ui.add_space(4.0);

    if annotations.is_empty() {
        ui.label(egui::RichText::new("No annotations saved yet.").weak());
        return action;
    }

    for (index, annotation) in annotations.iter().enumerate() {
        let label = format!("Q{}: {}", index + 1, truncate(&annotation.question, 50));
        if ui.selectable_label(selected == Some(index), label).clicked() {
            action = ReviewAction::Select(index);
        }
        ui.label(
            egui::RichText::new(format!(
                "{} - {}",
                format_time(annotation.start_time),
                format_time(annotation.stop_time)
            ))
            .weak()
            .small(),
        );
    }

    if let Some(index) = selected {
        if let Some(annotation) = annotations.get(index) {
            ui.separator();
            ui.label(egui::RichText::new(&annotation.question).strong());
            for choice in &annotation.answer_choices {
                let is_correct = choice.id == annotation.correct_answer;
                let text = if is_correct {
                    format!("• {} ✓", choice.text)
                } else {
                    format!("• {}", choice.text)
                };
                let mut rich = egui::RichText::new(text);
                if is_correct {
                    rich = rich.color(egui::Color32::from_rgb(110, 200, 130));
                }
                ui.label(rich);
            }
            ui.add_space(4.0);
            if ui
                .add_enabled(can_play, egui::Button::new("▶ Play Segment"))
                .clicked()
            {
                action = ReviewAction::PlaySegment(index);
            }
            if !can_play {
                ui.label(egui::RichText::new("Media not loaded").weak().small());
            }
        }
    }

    action
}

/// Truncate text with an ellipsis if too long.
fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let head: String = text.chars().take(max_chars).collect();
    format!("{head}...")
}
