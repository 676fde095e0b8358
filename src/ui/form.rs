// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Annotation form panel.
//!
//! This module renders the question editor: the question text, one row
//! per answer choice (correct-answer radio, text field, remove button),
//! and the add/save buttons. Text edits go straight into the form;
//! structural changes are reported as actions.

use crate::models::form::{AnnotationForm, MIN_CHOICES};

/// Result of form interaction.
pub enum FormAction {
    None,
    AddChoice,
    RemoveChoice(u32),
    Save,
}

/// Display the annotation form.
pub fn show(ui: &mut egui::Ui, form: &mut AnnotationForm, enabled: bool) -> FormAction {
    let mut action = FormAction::None;

    ui.heading("Create Annotation");
    ui.add_space(4.0);

    ui.label("Question:");
    ui.add_enabled(
        enabled,
        egui::TextEdit::multiline(&mut form.question)
            .desired_rows(2)
            .hint_text("Ask about the selected segment"),
    );

    ui.add_space(6.0);
    ui.label("Answer choices (mark the correct one):");

    let can_remove = form.choices().len() > MIN_CHOICES;
    // The radio binds to a local copy so the correct mark can be edited
    // while the choice rows borrow the form mutably.
    let mut correct = form.correct_id;
    let mut remove_clicked = None;

    for (index, choice) in form.choices_mut().enumerate() {
        ui.horizontal(|ui| {
            ui.radio_value(&mut correct, Some(choice.id), "");
            ui.add_enabled(
                enabled,
                egui::TextEdit::singleline(&mut choice.text)
                    .hint_text(format!("Answer choice {}", index + 1)),
            );
            if ui
                .add_enabled(can_remove, egui::Button::new("✕").small())
                .clicked()
            {
                remove_clicked = Some(choice.id);
            }
        });
    }
    form.correct_id = correct;

    if let Some(id) = remove_clicked {
        action = FormAction::RemoveChoice(id);
    }

    ui.add_space(4.0);
    ui.horizontal(|ui| {
        if ui.button("+ Add Answer").clicked() {
            action = FormAction::AddChoice;
        }
        if ui
            .add_enabled(enabled, egui::Button::new("Save Annotation"))
            .clicked()
        {
            action = FormAction::Save;
        }
    });
    if !enabled {
        ui.label(egui::RichText::new("Load a video to annotate").weak());
    }

    action
}
