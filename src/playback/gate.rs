// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Playback window gating.
//!
//! This module drives playback of a [start, stop] window: seek to the
//! start, play, then pause exactly once when the clock reaches the stop
//! boundary. The stop check is level-triggered on every clock tick rather
//! than scheduled by duration, so it tolerates irregular tick granularity
//! at the cost of overshooting the boundary by up to one tick.

use log::debug;

/// Playback primitives of the host media clock.
///
/// The application supplies the real player; tests supply a fake fed with
/// scripted tick times.
pub trait MediaTransport {
    fn current_time(&self) -> f64;
    fn seek(&mut self, time: f64);
    fn play(&mut self);
    fn pause(&mut self);
}

/// An armed stop boundary. Held by the gate while a window is playing.
#[derive(Debug, Clone, Copy, PartialEq)]
struct WindowMonitor {
    stop: f64,
}

/// Plays [start, stop] windows and guarantees a single pause at the stop
/// boundary.
///
/// At most one monitor is armed at a time: playing a new window while a
/// previous monitor is still armed replaces it, so two stop checks can
/// never race on the same clock.
#[derive(Debug, Default)]
pub struct PlaybackGate {
    monitor: Option<WindowMonitor>,
}

impl PlaybackGate {
    pub fn new() -> Self {
        Self { monitor: None }
    }

    /// Whether a stop boundary is currently armed.
    pub fn is_armed(&self) -> bool {
        self.monitor.is_some()
    }

    /// Seek to `start`, begin playback, and arm the stop boundary.
    ///
    /// A window with `stop <= start` is not rejected: playback starts at
    /// `start` and the very next tick pauses it.
    pub fn play_window(&mut self, start: f64, stop: f64, player: &mut dyn MediaTransport) {
        player.seek(start);
        player.play();
        self.monitor = Some(WindowMonitor { stop });
        debug!("playback window armed: {start:.3} -> {stop:.3}");
    }

    /// Level-triggered stop check, called on every playback progress tick.
    ///
    /// Pauses the player and disarms the monitor the first time the clock
    /// is at or past the stop boundary. Returns true on the tick that
    /// paused. Ticks with no armed monitor are no-ops.
    pub fn tick(&mut self, player: &mut dyn MediaTransport) -> bool {
        match self.monitor {
            Some(monitor) if player.current_time() >= monitor.stop => {
                player.pause();
                self.monitor = None;
                debug!("playback window stopped at {:.3}", player.current_time());
                true
            }
            _ => false,
        }
    }

    /// Disarm without pausing. Safe to call when nothing is armed.
    pub fn cancel(&mut self) {
        self.monitor = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Scripted stand-in for the host media clock.
    struct FakePlayer {
        time: f64,
        playing: bool,
        pause_calls: u32,
        seeks: Vec<f64>,
    }

    impl FakePlayer {
        fn new() -> Self {
            Self {
                time: 0.0,
                playing: false,
                pause_calls: 0,
                seeks: Vec::new(),
            }
        }
    }

    impl MediaTransport for FakePlayer {
        fn current_time(&self) -> f64 {
            self.time
        }

        fn seek(&mut self, time: f64) {
            self.time = time;
            self.seeks.push(time);
        }

        fn play(&mut self) {
            self.playing = true;
        }

        fn pause(&mut self) {
            self.playing = false;
            self.pause_calls += 1;
        }
    }

    #[test]
    fn test_pauses_exactly_once_at_boundary() {
        let mut gate = PlaybackGate::new();
        let mut player = FakePlayer::new();

        gate.play_window(5.0, 10.0, &mut player);
        assert_eq!(player.seeks, vec![5.0]);
        assert!(player.playing);

        for (tick_time, expect_stop) in
            [(5.0, false), (6.0, false), (7.0, false), (9.0, false), (10.2, true)]
        {
            player.time = tick_time;
            assert_eq!(gate.tick(&mut player), expect_stop);
        }
        assert_eq!(player.pause_calls, 1);
        assert!(!player.playing);
        assert!(!gate.is_armed());

        // The monitor deregistered itself: further ticks change nothing.
        player.time = 20.0;
        assert!(!gate.tick(&mut player));
        assert_eq!(player.pause_calls, 1);
    }

    #[test]
    fn test_rearming_replaces_previous_monitor() {
        let mut gate = PlaybackGate::new();
        let mut player = FakePlayer::new();

        gate.play_window(0.0, 100.0, &mut player);
        gate.play_window(2.0, 4.0, &mut player);

        // Past both stop values; only the replacement monitor may fire.
        player.time = 150.0;
        assert!(gate.tick(&mut player));
        assert!(!gate.tick(&mut player));
        assert_eq!(player.pause_calls, 1);
    }

    #[test]
    fn test_degenerate_window_pauses_on_next_tick() {
        let mut gate = PlaybackGate::new();
        let mut player = FakePlayer::new();

        gate.play_window(5.0, 5.0, &mut player);
        assert!(player.playing);
        assert!(gate.tick(&mut player));
        assert_eq!(player.pause_calls, 1);

        gate.play_window(8.0, 3.0, &mut player);
        assert!(gate.tick(&mut player));
        assert_eq!(player.pause_calls, 2);
    }

    #[test]
    fn test_cancel_disarms_without_pausing() {
        let mut gate = PlaybackGate::new();
        let mut player = FakePlayer::new();

        gate.play_window(0.0, 10.0, &mut player);
        gate.cancel();
        assert!(!gate.is_armed());

        player.time = 50.0;
        assert!(!gate.tick(&mut player));
        assert_eq!(player.pause_calls, 0);
        assert!(player.playing);
    }

    #[test]
    fn test_cancel_and_tick_when_unarmed_are_noops() {
        let mut gate = PlaybackGate::new();
        let mut player = FakePlayer::new();
        gate.cancel();
        assert!(!gate.tick(&mut player));
        assert_eq!(player.pause_calls, 0);
    }
}
