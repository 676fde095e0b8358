// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Video acquisition via yt-dlp.
//!
//! This module downloads a YouTube video to the local media folder and
//! looks up its title. Downloads are capped at 480p mp4 with m4a audio,
//! merged into a single mp4.

use anyhow::{anyhow, bail, Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use uuid::Uuid;

const FORMAT_SELECTION: &str =
    "bestvideo[ext=mp4][height<=480]+bestaudio[ext=m4a]/best[ext=mp4][height<=480][acodec!=none]";

/// A downloaded video ready to annotate.
pub struct DownloadedVideo {
    pub video_id: String,
    pub title: String,
    pub path: PathBuf,
}

/// Download the video behind a YouTube URL into `dest_dir`.
///
/// The stored id is the YouTube id suffixed with a fresh UUID so repeated
/// downloads of the same video never collide on disk or in the store.
pub fn download(url: &str, dest_dir: &Path) -> Result<DownloadedVideo> {
    let youtube_id = parse_youtube_id(url)
        .ok_or_else(|| anyhow!("not a recognizable YouTube URL: {url}"))?;
    let video_id = format!("{youtube_id}_{}", Uuid::new_v4());

    fs::create_dir_all(dest_dir)
        .with_context(|| format!("failed to create {}", dest_dir.display()))?;
    let path = dest_dir.join(format!("{video_id}.mp4"));

    let output = Command::new("yt-dlp")
        .args(["-f", FORMAT_SELECTION, "-o"])
        .arg(&path)
        .args(["--merge-output-format", "mp4"])
        .arg(url)
        .output()
        .context("failed to run yt-dlp (is it installed?)")?;

    if !output.status.success() {
        bail!(
            "download failed: {}",
            String::from_utf8_lossy(&output.stderr).trim()
        );
    }

    let title = fetch_title(url).unwrap_or_else(|_| "Untitled Video".to_string());
    Ok(DownloadedVideo {
        video_id,
        title,
        path,
    })
}

/// Look up the video title. Output is decoded lossily; a title with odd
/// characters must not fail the whole download.
fn fetch_title(url: &str) -> Result<String> {
    let output = Command::new("yt-dlp")
        .args(["--get-title"])
        .arg(url)
        .output()
        .context("failed to run yt-dlp")?;
    if !output.status.success() {
        bail!("title lookup failed");
    }
    let title = String::from_utf8_lossy(&output.stdout).trim().to_string();
    if title.is_empty() {
        bail!("empty title");
    }
    Ok(title)
}

/// Pull the video id out of the common YouTube URL forms
/// (`watch?v=<id>` and `youtu.be/<id>`).
fn parse_youtube_id(url: &str) -> Option<String> {
    if let Some(idx) = url.find("v=") {
        let id: String = url[idx + 2..]
            .chars()
            .take_while(|c| !matches!(c, '&' | '#'))
            .collect();
        if !id.is_empty() {
            return Some(id);
        }
    }
    if let Some(idx) = url.find("youtu.be/") {
        let id: String = url[idx + "youtu.be/".len()..]
            .chars()
            .take_while(|c| !matches!(c, '?' | '&' | '#' | '/'))
            .collect();
        if !id.is_empty() {
            return Some(id);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_watch_url() {
        assert_eq!(
            parse_youtube_id("https://www.youtube.com/watch?v=dQw4w9WgXcQ").as_deref(),
            Some("dQw4w9WgXcQ")
        );
        assert_eq!(
            parse_youtube_id("https://www.youtube.com/watch?v=abc123&t=42s").as_deref(),
            Some("abc123")
        );
    }

    #[test]
    fn test_parse_short_url() {
        assert_eq!(
            parse_youtube_id("https://youtu.be/dQw4w9WgXcQ?si=xyz").as_deref(),
            Some("dQw4w9WgXcQ")
        );
    }

    #[test]
    fn test_unrecognizable_urls() {
        assert_eq!(parse_youtube_id("https://example.com/video.mp4"), None);
        assert_eq!(parse_youtube_id("https://www.youtube.com/watch?v="), None);
    }
}
