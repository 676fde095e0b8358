// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Timeline track with selection markers.
//!
//! This module paints the timeline for the loaded video: elapsed
//! progress, the selected segment, its two draggable boundary markers,
//! and detected shot boundaries. Interactions are reported as actions
//! for the application to apply; the widget itself mutates nothing.

use crate::models::drag::{Marker, MarkerDrag};
use crate::models::session::VideoSession;
use crate::util::time::{pointer_to_time, time_to_fraction};

const TRACK_HEIGHT: f32 = 28.0;
const MARKER_WIDTH: f32 = 10.0;

/// Result of timeline interaction.
pub enum TimelineAction {
    None,
    /// Click on the track: move the playhead.
    Seek(f64),
    /// Pointer-down on a boundary marker.
    BeginDrag(Marker),
    /// Pointer moved while a marker drag is active.
    DragTo(f64),
    /// Pointer released (anywhere) while a marker drag was active.
    EndDrag,
}

/// Display the timeline track and handle pointer interactions.
pub fn show(
    ui: &mut egui::Ui,
    session: &VideoSession,
    playhead: f64,
    drag: &MarkerDrag,
) -> TimelineAction {
    let (track_rect, track_response) = ui.allocate_exact_size(
        egui::vec2(ui.available_width(), TRACK_HEIGHT),
        egui::Sense::click(),
    );

    let duration = session.duration;
    let fraction_x = |time: f64| -> f32 {
        track_rect.left() + time_to_fraction(time, duration) as f32 * track_rect.width()
    };

    let painter = ui.painter();

    // Track background and elapsed progress.
    painter.rect_filled(track_rect, 4.0, egui::Color32::from_gray(45));
    let progress_rect = egui::Rect::from_min_max(
        track_rect.min,
        egui::pos2(fraction_x(playhead), track_rect.bottom()),
    );
    painter.rect_filled(progress_rect, 4.0, egui::Color32::from_gray(80));

    // Selected segment span.
    let selection = &session.selection;
    let span_rect = egui::Rect::from_min_max(
        egui::pos2(fraction_x(selection.start()), track_rect.top()),
        egui::pos2(fraction_x(selection.end()), track_rect.bottom()),
    );
    painter.rect_filled(
        span_rect,
        0.0,
        egui::Color32::from_rgba_unmultiplied(90, 140, 220, 70),
    );

    // Shot boundary ticks.
    for &shot in &session.shots {
        painter.vline(
            fraction_x(shot),
            track_rect.y_range(),
            egui::Stroke::new(1.0, egui::Color32::from_rgb(220, 190, 60)),
        );
    }

    // Playhead.
    painter.vline(
        fraction_x(playhead),
        track_rect.y_range(),
        egui::Stroke::new(2.0, egui::Color32::WHITE),
    );

    // Boundary markers, drawn last so they sit on top of everything.
    let marker_rect = |time: f64| {
        egui::Rect::from_center_size(
            egui::pos2(fraction_x(time), track_rect.center().y),
            egui::vec2(MARKER_WIDTH, TRACK_HEIGHT),
        )
    };
    let start_rect = marker_rect(selection.start());
    let end_rect = marker_rect(selection.end());
    painter.rect_filled(start_rect, 3.0, egui::Color32::from_rgb(80, 190, 120));
    painter.rect_filled(end_rect, 3.0, egui::Color32::from_rgb(220, 90, 90));

    let start_response = ui
        .interact(start_rect, ui.id().with("selection-start"), egui::Sense::drag())
        .on_hover_cursor(egui::CursorIcon::ResizeHorizontal);
    let end_response = ui
        .interact(end_rect, ui.id().with("selection-end"), egui::Sense::drag())
        .on_hover_cursor(egui::CursorIcon::ResizeHorizontal);

    let pointer_time = |pos: egui::Pos2| {
        pointer_to_time(pos.x, track_rect.left(), track_rect.width(), duration)
    };

    if start_response.drag_started() {
        return TimelineAction::BeginDrag(Marker::Start);
    }
    if end_response.drag_started() {
        return TimelineAction::BeginDrag(Marker::End);
    }

    if drag.is_dragging() {
        // Follow the global pointer while dragging: the drag keeps
        // tracking outside the markers and ends on release anywhere.
        let (primary_down, pointer_pos) =
            ui.input(|i| (i.pointer.primary_down(), i.pointer.interact_pos()));
        if !primary_down {
            return TimelineAction::EndDrag;
        }
        if let Some(pos) = pointer_pos {
            return TimelineAction::DragTo(pointer_time(pos));
        }
        return TimelineAction::None;
    }

    if track_response.clicked() {
        if let Some(pos) = track_response.interact_pointer_pos() {
            return TimelineAction::Seek(pointer_time(pos));
        }
    }

    TimelineAction::None
}
