// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! vidquiz - Video Quiz Annotation Tool
//!
//! A cross-platform desktop application for marking time segments on a
//! video timeline and attaching multiple-choice quiz questions to them.

mod app;
mod io;
mod models;
mod playback;
mod ui;
mod util;

use app::VidquizApp;
use anyhow::Result;

fn main() -> Result<()> {
    // Initialize logging
    env_logger::init();

    // Configure egui options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 720.0])
            .with_min_inner_size([900.0, 600.0])
            .with_title("vidquiz - Video Quiz Annotation Tool"),
        ..Default::default()
    };

    // Run the application
    eframe::run_native(
        "vidquiz",
        options,
        Box::new(|_cc| Ok(Box::new(VidquizApp::new()))),
    )
    .map_err(|e| anyhow::anyhow!("Application error: {}", e))?;

    Ok(())
}
