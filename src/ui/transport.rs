// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Playback and selection controls.
//!
//! This module provides the control row under the timeline: play/pause,
//! set-start/set-end at the playhead, segment preview, shot detection,
//! and the time readouts.

use crate::models::session::VideoSession;
use crate::util::time::format_time;

/// Result of transport interaction.
pub enum TransportAction {
    None,
    TogglePlay,
    SetStartHere,
    SetEndHere,
    PreviewSelection,
    DetectShots,
}

/// Display the transport controls for the loaded video.
pub fn show(
    ui: &mut egui::Ui,
    session: &VideoSession,
    playhead: f64,
    playing: bool,
    detecting_shots: bool,
) -> TransportAction {
    let mut action = TransportAction::None;

    ui.horizontal(|ui| {
        let play_label = if playing { "⏸ Pause" } else { "▶ Play" };
        if ui.button(play_label).clicked() {
            action = TransportAction::TogglePlay;
        }

        ui.separator();

        if ui.button("Set Start").clicked() {
            action = TransportAction::SetStartHere;
        }
        if ui.button("Set End").clicked() {
            action = TransportAction::SetEndHere;
        }
        if ui.button("Preview Selection").clicked() {
            action = TransportAction::PreviewSelection;
        }

        ui.separator();

        let detect_label = if detecting_shots { "Detecting..." } else { "Detect Shots" };
        if ui
            .add_enabled(!detecting_shots, egui::Button::new(detect_label))
            .clicked()
        {
            action = TransportAction::DetectShots;
        }
        if detecting_shots {
            ui.spinner();
        }

        ui.separator();

        ui.label(format!(
            "{} / {}",
            format_time(playhead),
            format_time(session.duration)
        ));
    });

    let selection = &session.selection;
    ui.label(
        egui::RichText::new(format!(
            "Selection: {} - {}  ({:.1}s)",
            format_time(selection.start()),
            format_time(selection.end()),
            selection.len_secs()
        ))
        .weak(),
    );

    action
}
