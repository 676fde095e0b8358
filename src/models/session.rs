// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Per-video annotation session.
//!
//! This module groups everything tied to the currently loaded video: its
//! identity, duration, the segment selection over it, and detected shot
//! boundaries. The session is owned by the application layer and passed
//! down by reference; there is no process-wide state.

use std::path::PathBuf;

use super::selection::SegmentSelection;

/// State for one loaded video.
///
/// Created fresh on every media load, which is what invalidates any
/// selection or shot markers derived from a previous video's duration.
#[derive(Debug, Clone)]
pub struct VideoSession {
    pub video_id: String,
    pub title: String,
    pub path: PathBuf,
    pub duration: f64,
    pub selection: SegmentSelection,
    /// Detected shot boundary times, display-only. Order is whatever the
    /// detector produced.
    pub shots: Vec<f64>,
}

impl VideoSession {
    pub fn new(video_id: String, title: String, path: PathBuf, duration: f64) -> Self {
        Self {
            video_id,
            title,
            path,
            duration,
            selection: SegmentSelection::new(duration),
            shots: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_selects_full_span() {
        let session = VideoSession::new(
            "vid_1".to_string(),
            "Test".to_string(),
            PathBuf::from("videos/vid_1.mp4"),
            90.0,
        );
        assert_eq!(session.selection.start(), 0.0);
        assert_eq!(session.selection.end(), 90.0);
        assert!(session.shots.is_empty());
    }
}
