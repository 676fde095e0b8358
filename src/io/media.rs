// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Media introspection via ffmpeg/ffprobe.
//!
//! This module shells out to ffprobe for the media duration, to ffmpeg's
//! scene-change filter for shot boundaries, and to ffmpeg again for still
//! preview frames, decoding the result with the image crate for display
//! in egui. Output parsing is split into pure helpers so it stays
//! testable without the binaries installed.

use anyhow::{bail, Context, Result};
use std::path::Path;
use std::process::Command;

/// Scene-change score above which a frame starts a new shot.
const SCENE_THRESHOLD: f64 = 0.3;

/// A decoded still frame ready to become an egui texture.
pub struct LoadedFrame {
    pub width: u32,
    pub height: u32,
    /// RGBA8 pixel data, row-major.
    pub pixels: Vec<u8>,
}

/// Read the media duration in seconds with ffprobe.
pub fn probe_duration(path: &Path) -> Result<f64> {
    let output = Command::new("ffprobe")
        .args([
            "-v",
            "error",
            "-show_entries",
            "format=duration",
            "-of",
            "default=noprint_wrappers=1:nokey=1",
        ])
        .arg(path)
        .output()
        .context("failed to run ffprobe (is it installed?)")?;

    if !output.status.success() {
        bail!(
            "ffprobe failed for {}: {}",
            path.display(),
            String::from_utf8_lossy(&output.stderr).trim()
        );
    }
    parse_duration(&String::from_utf8_lossy(&output.stdout))
}

/// Detect shot boundaries and return their start times in seconds.
///
/// Runs ffmpeg's scene-change selection with showinfo and collects the
/// presentation timestamps of the selected frames. The result is a flat
/// list of times; consumers only project them onto the timeline.
pub fn detect_shots(path: &Path) -> Result<Vec<f64>> {
    let filter = format!("select='gt(scene,{SCENE_THRESHOLD})',showinfo");
    let output = Command::new("ffmpeg")
        .args(["-hide_banner", "-i"])
        .arg(path)
        .args(["-vf", &filter, "-f", "null", "-"])
        .output()
        .context("failed to run ffmpeg (is it installed?)")?;

    if !output.status.success() {
        bail!(
            "shot detection failed for {}: {}",
            path.display(),
            String::from_utf8_lossy(&output.stderr).trim()
        );
    }
    // showinfo reports on stderr.
    Ok(parse_shot_times(&String::from_utf8_lossy(&output.stderr)))
}

/// Extract one still frame at the given time and decode it to RGBA8.
pub fn extract_frame(path: &Path, time: f64) -> Result<LoadedFrame> {
    let output = Command::new("ffmpeg")
        .args(["-hide_banner", "-loglevel", "error"])
        .args(["-ss", &format!("{time:.3}")])
        .arg("-i")
        .arg(path)
        .args(["-frames:v", "1", "-f", "image2pipe", "-vcodec", "png", "-"])
        .output()
        .context("failed to run ffmpeg (is it installed?)")?;

    if !output.status.success() || output.stdout.is_empty() {
        bail!(
            "frame extraction failed for {} at {:.3}s: {}",
            path.display(),
            time,
            String::from_utf8_lossy(&output.stderr).trim()
        );
    }

    let decoded = image::load_from_memory(&output.stdout)
        .context("failed to decode extracted frame")?
        .to_rgba8();
    let (width, height) = decoded.dimensions();
    Ok(LoadedFrame {
        width,
        height,
        pixels: decoded.into_raw(),
    })
}

fn parse_duration(text: &str) -> Result<f64> {
    let trimmed = text.trim();
    trimmed
        .parse::<f64>()
        .with_context(|| format!("unparsable ffprobe duration: {trimmed:?}"))
}

fn parse_shot_times(showinfo: &str) -> Vec<f64> {
    let mut times = Vec::new();
    for line in showinfo.lines() {
        let Some(idx) = line.find("pts_time:") else {
            continue;
        };
        let rest = &line[idx + "pts_time:".len()..];
        if let Some(token) = rest.split_whitespace().next() {
            if let Ok(time) = token.parse::<f64>() {
                times.push(time);
            }
        }
    }
    times
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_duration() {
        assert_eq!(parse_duration("123.456\n").unwrap(), 123.456);
        assert_eq!(parse_duration("  7 ").unwrap(), 7.0);
        assert!(parse_duration("N/A").is_err());
        assert!(parse_duration("").is_err());
    }

    #[test]
    fn test_parse_shot_times_from_showinfo() {
        let stderr = "\
[Parsed_showinfo_1 @ 0x55] n:   0 pts:  90090 pts_time:3.003   duration_time:0.04 fmt:yuv420p\n\
[Parsed_showinfo_1 @ 0x55] n:   1 pts: 270270 pts_time:9.009   fmt:yuv420p\n\
frame=    2 fps=0.0 q=-0.0 Lsize=N/A time=00:00:12.01 bitrate=N/A\n\
[Parsed_showinfo_1 @ 0x55] n:   2 pts: 540540 pts_time:18.018  fmt:yuv420p\n";
        let times = parse_shot_times(stderr);
        assert_eq!(times, vec![3.003, 9.009, 18.018]);
    }

    #[test]
    fn test_parse_shot_times_ignores_noise() {
        assert!(parse_shot_times("").is_empty());
        assert!(parse_shot_times("no timestamps here\npts_time:garbage\n").is_empty());
    }
}
