// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Segment selection state.
//!
//! This module holds the media duration and the current [start, end]
//! selection over it, and enforces the ordering and minimum-gap rules
//! under both programmatic updates and marker drags.

use super::drag::Marker;

/// Minimum distance in seconds kept between the two markers while dragging.
///
/// This is a structural floor for live drags only; saving an annotation
/// applies a separate, larger policy minimum (see `models::form`).
pub const DRAG_MIN_GAP: f64 = 0.1;

/// A [start, end] selection over a fixed media duration.
///
/// All setters clamp silently instead of rejecting out-of-range input, and
/// never panic. When a setter would invert the ordering, the opposite
/// boundary is widened to its extreme rather than the update being refused.
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentSelection {
    duration: f64,
    start: f64,
    end: f64,
}

impl SegmentSelection {
    /// Create a selection spanning the whole media: [0, duration].
    pub fn new(duration: f64) -> Self {
        let duration = duration.max(0.0);
        Self {
            duration,
            start: 0.0,
            end: duration,
        }
    }

    /// Reset for a newly loaded media duration.
    ///
    /// Any selection derived from a previous load is discarded; the
    /// selection defaults back to the full span.
    pub fn reset_for(&mut self, duration: f64) {
        *self = Self::new(duration);
    }

    pub fn duration(&self) -> f64 {
        self.duration
    }

    pub fn start(&self) -> f64 {
        self.start
    }

    pub fn end(&self) -> f64 {
        self.end
    }

    /// Length of the selected segment in seconds.
    pub fn len_secs(&self) -> f64 {
        self.end - self.start
    }

    /// Set the selection start, clamped to [0, duration].
    ///
    /// If the new start would pass the end, the end widens to the full
    /// duration instead of the update being rejected.
    pub fn set_start(&mut self, time: f64) {
        self.start = time.clamp(0.0, self.duration);
        if self.start > self.end {
            self.end = self.duration;
        }
    }

    /// Set the selection end, clamped to [0, duration].
    ///
    /// If the new end would pass the start, the start widens back to zero.
    pub fn set_end(&mut self, time: f64) {
        self.end = time.clamp(0.0, self.duration);
        if self.end < self.start {
            self.start = 0.0;
        }
    }

    /// Move one marker to a dragged time value.
    ///
    /// Unlike the setters, a drag clamps against the opposite boundary's
    /// current position so `end - start >= DRAG_MIN_GAP` holds after every
    /// move, even for pointer jumps that would otherwise invert the
    /// selection mid-drag.
    pub fn drag_to(&mut self, marker: Marker, time: f64) {
        let time = time.clamp(0.0, self.duration);
        match marker {
            Marker::Start => self.start = time.min(self.end - DRAG_MIN_GAP),
            Marker::End => self.end = time.max(self.start + DRAG_MIN_GAP),
        }
    }
}
