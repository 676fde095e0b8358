// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Wall-clock media player.
//!
//! This module provides the host media clock: a playhead advanced by real
//! elapsed time while playing, clamped to the media duration. The
//! application calls `advance` once per frame; everything else goes
//! through the `MediaTransport` trait.

use std::time::Instant;

use super::gate::MediaTransport;

/// Playhead state advanced by wall-clock time.
#[derive(Debug, Clone)]
pub struct ClockPlayer {
    duration: f64,
    position: f64,
    playing: bool,
    last_tick: Instant,
}

impl ClockPlayer {
    pub fn new(duration: f64) -> Self {
        Self {
            duration: duration.max(0.0),
            position: 0.0,
            playing: false,
            last_tick: Instant::now(),
        }
    }

    pub fn duration(&self) -> f64 {
        self.duration
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Advance the playhead by the elapsed wall-clock time.
    ///
    /// Reaching the end of the media pauses playback there; the playhead
    /// never passes the duration.
    pub fn advance(&mut self) {
        let now = Instant::now();
        if self.playing {
            let elapsed = now.duration_since(self.last_tick).as_secs_f64();
            self.position += elapsed;
            if self.position >= self.duration {
                self.position = self.duration;
                self.playing = false;
            }
        }
        self.last_tick = now;
    }
}

impl MediaTransport for ClockPlayer {
    fn current_time(&self) -> f64 {
        self.position
    }

    fn seek(&mut self, time: f64) {
        self.position = time.clamp(0.0, self.duration);
    }

    fn play(&mut self) {
        // Restart the tick base so paused time is not counted as progress.
        self.last_tick = Instant::now();
        self.playing = true;
    }

    fn pause(&mut self) {
        self.playing = false;
    }
}
