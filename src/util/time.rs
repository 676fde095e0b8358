// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Time projection utilities.
//!
//! This module provides the mapping between media time (seconds) and
//! normalized timeline position (0.0 to 1.0) used for marker placement
//! and pointer input, plus time formatting for display.

/// Convert a time in seconds to a normalized timeline fraction (0.0 to 1.0).
///
/// Returns 0.0 for a non-positive duration so that a timeline with no
/// media loaded never produces NaN positions.
pub fn time_to_fraction(time: f64, duration: f64) -> f64 {
    if duration <= 0.0 {
        return 0.0;
    }
    (time / duration).clamp(0.0, 1.0)
}

/// Convert a normalized timeline fraction back to a time in seconds.
pub fn fraction_to_time(fraction: f64, duration: f64) -> f64 {
    fraction.clamp(0.0, 1.0) * duration.max(0.0)
}

/// Convert a pointer x position over the timeline track to a time in seconds.
///
/// The fraction is taken relative to the track's left edge and width and
/// clamped to the track, so pointer positions outside the track map to the
/// timeline ends.
pub fn pointer_to_time(pointer_x: f32, track_left: f32, track_width: f32, duration: f64) -> f64 {
    if track_width <= 0.0 {
        return 0.0;
    }
    let fraction = ((pointer_x - track_left) / track_width) as f64;
    fraction_to_time(fraction, duration)
}

/// Format a time in seconds as M:SS for display.
pub fn format_time(seconds: f64) -> String {
    let total = seconds.max(0.0) as u64;
    let mins = total / 60;
    let secs = total % 60;
    format!("{}:{:02}", mins, secs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fraction_roundtrip() {
        let duration = 120.0;
        for fraction in [0.0, 0.25, 0.5, 0.9, 1.0] {
            let time = fraction_to_time(fraction, duration);
            let back = time_to_fraction(time, duration);
            assert!((back - fraction).abs() < 1e-9);
        }
    }

    #[test]
    fn test_zero_duration_never_nan() {
        assert_eq!(time_to_fraction(0.0, 0.0), 0.0);
        assert_eq!(time_to_fraction(42.0, 0.0), 0.0);
        assert_eq!(time_to_fraction(-3.0, 0.0), 0.0);
        assert_eq!(fraction_to_time(0.5, 0.0), 0.0);
    }

    #[test]
    fn test_time_to_fraction_clamps() {
        assert_eq!(time_to_fraction(-5.0, 100.0), 0.0);
        assert_eq!(time_to_fraction(150.0, 100.0), 1.0);
        assert_eq!(time_to_fraction(25.0, 100.0), 0.25);
    }

    #[test]
    fn test_pointer_to_time() {
        // Track from x=100 to x=300, media 60 seconds long.
        assert_eq!(pointer_to_time(100.0, 100.0, 200.0, 60.0), 0.0);
        assert_eq!(pointer_to_time(200.0, 100.0, 200.0, 60.0), 30.0);
        assert_eq!(pointer_to_time(300.0, 100.0, 200.0, 60.0), 60.0);
        // Positions outside the track clamp to the ends.
        assert_eq!(pointer_to_time(50.0, 100.0, 200.0, 60.0), 0.0);
        assert_eq!(pointer_to_time(400.0, 100.0, 200.0, 60.0), 60.0);
        // A degenerate track maps everything to the start.
        assert_eq!(pointer_to_time(150.0, 100.0, 0.0, 60.0), 0.0);
    }

    #[test]
    fn test_format_time() {
        assert_eq!(format_time(0.0), "0:00");
        assert_eq!(format_time(9.7), "0:09");
        assert_eq!(format_time(65.0), "1:05");
        assert_eq!(format_time(600.0), "10:00");
    }
}
