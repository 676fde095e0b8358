// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Main application state and egui App implementation.
//!
//! This module contains the main application structure that implements
//! the egui::App trait. It owns the per-video session, the playback
//! clock and gate, the annotation form and store, and coordinates the
//! UI components with background media workers.

use std::path::{Path, PathBuf};
use std::sync::mpsc::{channel, Receiver};
use std::time::{Duration, Instant};

use crate::io::download;
use crate::io::media::{self, LoadedFrame};
use crate::io::store::{self, AnnotationStore, VideoEntry};
use crate::models::annotation::Annotation;
use crate::models::drag::MarkerDrag;
use crate::models::form::AnnotationForm;
use crate::models::session::VideoSession;
use crate::playback::gate::{MediaTransport, PlaybackGate};
use crate::playback::player::ClockPlayer;
use crate::ui::form::{self, FormAction};
use crate::ui::review::{self, ReviewAction};
use crate::ui::timeline::{self, TimelineAction};
use crate::ui::transport::{self, TransportAction};

/// Where downloaded media files land.
const MEDIA_DIR: &str = "videos";
/// Where per-video annotation files live.
const ANNOTATION_DIR: &str = "annotations";
/// How long a status message stays visible.
const STATUS_TTL: Duration = Duration::from_secs(5);
/// Arrow-key seek step in seconds.
const KEY_SEEK_STEP: f64 = 1.0;

/// Result of background video loading (file open or URL download).
struct LoadedVideoData {
    video_id: String,
    title: String,
    path: PathBuf,
    duration: f64,
}

/// Transient status line shown in the bottom bar.
struct StatusLine {
    text: String,
    is_error: bool,
    shown_at: Instant,
}

/// Main application state.
pub struct VidquizApp {
    /// Currently loaded video, if any
    session: Option<VideoSession>,

    /// Playback clock for the loaded video
    player: Option<ClockPlayer>,

    /// Segment window enforcement for previews and saved-segment replay
    gate: PlaybackGate,

    /// Active boundary-marker drag, if any
    drag: MarkerDrag,

    /// In-progress annotation form
    form: AnnotationForm,

    /// Annotation persistence
    store: AnnotationStore,

    /// Annotations shown in the review panel, and the video they belong to
    saved: Vec<Annotation>,
    saved_video_id: Option<String>,

    /// Index of the annotation selected in the review panel
    selected_annotation: Option<usize>,

    /// URL entry for the download row
    url_input: String,

    /// Receiver for background video loading
    video_loader: Option<Receiver<Result<LoadedVideoData, String>>>,

    /// Receiver for background shot detection
    shot_detector: Option<Receiver<Result<Vec<f64>, String>>>,

    /// Receiver for background preview-frame extraction
    frame_loader: Option<Receiver<Result<LoadedFrame, String>>>,

    /// Decoded preview frame for the current playhead area
    preview_texture: Option<egui::TextureHandle>,

    /// Transient status message
    status: Option<StatusLine>,

    /// Library window state
    show_library: bool,
    library: Vec<VideoEntry>,

    /// Playing state on the previous frame, for pause-edge detection
    was_playing: bool,
}

impl Default for VidquizApp {
    fn default() -> Self {
        Self::new()
    }
}

impl VidquizApp {
    /// Create a new vidquiz application instance.
    pub fn new() -> Self {
        Self {
            session: None,
            player: None,
            gate: PlaybackGate::new(),
            drag: MarkerDrag::new(),
            form: AnnotationForm::new(),
            store: AnnotationStore::new(ANNOTATION_DIR),
            saved: Vec::new(),
            saved_video_id: None,
            selected_annotation: None,
            url_input: String::new(),
            video_loader: None,
            shot_detector: None,
            frame_loader: None,
            preview_texture: None,
            status: None,
            show_library: false,
            library: Vec::new(),
            was_playing: false,
        }
    }

    fn set_status(&mut self, text: &str, is_error: bool) {
        if is_error {
            log::warn!("{}", text);
        }
        self.status = Some(StatusLine {
            text: text.to_string(),
            is_error,
            shown_at: Instant::now(),
        });
    }

    /// Probe a local video file in the background and load it.
    fn open_video_file(&mut self, path: PathBuf) {
        let (sender, receiver) = channel();
        self.video_loader = Some(receiver);
        self.set_status("Loading video...", false);

        std::thread::spawn(move || {
            let result = (|| -> Result<LoadedVideoData, String> {
                let duration = media::probe_duration(&path)
                    .map_err(|e| format!("Failed to read video duration: {}", e))?;
                // Local files keep a stable id so reopening one finds its
                // existing annotations.
                let stem = path
                    .file_stem()
                    .and_then(|s| s.to_str())
                    .unwrap_or("video")
                    .to_string();
                log::info!("Opened {} ({:.1}s)", path.display(), duration);
                Ok(LoadedVideoData {
                    video_id: stem.clone(),
                    title: stem,
                    path,
                    duration,
                })
            })();
            let _ = sender.send(result);
        });
    }

    /// Download a YouTube video in the background and load it.
    fn download_from_url(&mut self, url: String) {
        if url.is_empty() {
            self.set_status("Please enter a YouTube URL", true);
            return;
        }
        if !url.contains("youtube.com/") && !url.contains("youtu.be/") {
            self.set_status("Please enter a valid YouTube URL", true);
            return;
        }

        let (sender, receiver) = channel();
        self.video_loader = Some(receiver);
        self.set_status("Downloading video... This may take a while.", false);

        std::thread::spawn(move || {
            let result = (|| -> Result<LoadedVideoData, String> {
                let video = download::download(&url, Path::new(MEDIA_DIR))
                    .map_err(|e| format!("Download failed: {}", e))?;
                let duration = media::probe_duration(&video.path)
                    .map_err(|e| format!("Failed to read video duration: {}", e))?;
                log::info!("Downloaded {} to {}", video.video_id, video.path.display());
                Ok(LoadedVideoData {
                    video_id: video.video_id,
                    title: video.title,
                    path: video.path,
                    duration,
                })
            })();
            let _ = sender.send(result);
        });
    }

    /// Install a freshly loaded video as the current session.
    ///
    /// Everything derived from the previous video's duration is discarded
    /// here: selection, shot markers, playback clock, armed gate, drag.
    fn apply_loaded_video(&mut self, data: LoadedVideoData) {
        self.gate.cancel();
        self.drag.finish();
        self.selected_annotation = None;
        self.preview_texture = None;
        // Drop any in-flight extraction for the previous video; its frame
        // would otherwise land as the new video's preview.
        self.frame_loader = None;
        self.was_playing = false;

        self.saved = match self.store.load(&data.video_id) {
            Ok(annotations) => annotations,
            Err(e) => {
                log::error!("Failed to load saved annotations: {}", e);
                Vec::new()
            }
        };
        self.saved_video_id = Some(data.video_id.clone());

        self.player = Some(ClockPlayer::new(data.duration));
        self.session = Some(VideoSession::new(
            data.video_id,
            data.title,
            data.path,
            data.duration,
        ));
        self.request_preview_frame(0.0);
        self.set_status("Video loaded successfully!", false);
    }

    /// Extract a preview frame at `time` in the background.
    ///
    /// Skipped while a previous extraction is still running; a slightly
    /// stale preview beats a queue of them.
    fn request_preview_frame(&mut self, time: f64) {
        if self.frame_loader.is_some() {
            return;
        }
        let Some(session) = &self.session else { return };
        let path = session.path.clone();

        let (sender, receiver) = channel();
        self.frame_loader = Some(receiver);
        std::thread::spawn(move || {
            let result = media::extract_frame(&path, time)
                .map_err(|e| format!("Failed to extract preview frame: {}", e));
            let _ = sender.send(result);
        });
    }

    /// Run shot detection for the loaded video in the background.
    fn start_shot_detection(&mut self) {
        if self.shot_detector.is_some() {
            return;
        }
        let Some(session) = &self.session else { return };
        let path = session.path.clone();

        let (sender, receiver) = channel();
        self.shot_detector = Some(receiver);
        std::thread::spawn(move || {
            let result =
                media::detect_shots(&path).map_err(|e| format!("Shot detection failed: {}", e));
            let _ = sender.send(result);
        });
    }

    fn toggle_play(&mut self) {
        if let Some(player) = &mut self.player {
            if player.is_playing() {
                player.pause();
            } else {
                player.play();
            }
        }
    }

    fn seek_to(&mut self, time: f64) {
        let Some(player) = &mut self.player else { return };
        player.seek(time);
        let refresh = !player.is_playing();
        if refresh {
            self.request_preview_frame(time);
        }
    }

    /// Play the current selection, pausing at its end.
    fn preview_selection(&mut self) {
        let Some(session) = &self.session else { return };
        let (start, stop) = (session.selection.start(), session.selection.end());
        if let Some(player) = &mut self.player {
            self.gate.play_window(start, stop, player);
        }
    }

    /// Replay a saved annotation's segment, pausing at its end.
    fn play_saved_segment(&mut self, index: usize) {
        let Some(annotation) = self.saved.get(index) else { return };
        let (start, stop) = (annotation.start_time, annotation.stop_time);
        if let Some(player) = &mut self.player {
            self.gate.play_window(start, stop, player);
        }
    }

    /// Validate the form and persist the annotation.
    fn save_annotation(&mut self) {
        let Some(session) = &self.session else { return };
        let video_id = session.video_id.clone();
        let annotation = match self.form.to_annotation(&video_id, &session.selection) {
            Ok(annotation) => annotation,
            Err(e) => {
                self.set_status(&e.to_string(), true);
                return;
            }
        };

        match self.store.append(&annotation) {
            Ok(()) => {
                log::info!("Saved annotation {} for {}", annotation.question_id, video_id);
                self.form.reset();
                self.saved = self.store.load(&video_id).unwrap_or_default();
                self.saved_video_id = Some(video_id);
                self.selected_annotation = None;
                self.set_status("Annotation saved successfully!", false);
            }
            Err(e) => self.set_status(&format!("Failed to save annotation: {}", e), true),
        }
    }

    /// Export the review panel's annotations to a file.
    fn export_annotations(&mut self, path: PathBuf) {
        let extension = path.extension().and_then(|s| s.to_str());
        let result = match extension {
            Some("yaml") | Some("yml") => store::export_yaml(&self.saved, &path),
            Some("json") => store::export_json(&self.saved, &path),
            _ => {
                self.set_status("Unsupported export file extension", true);
                return;
            }
        };

        match result {
            Ok(()) => {
                log::info!("Exported {} annotations to {}", self.saved.len(), path.display());
                self.set_status("Annotations exported!", false);
            }
            Err(e) => self.set_status(&format!("Failed to export annotations: {}", e), true),
        }
    }

    /// Load a library video's annotations into the review panel.
    fn view_library_video(&mut self, video_id: String) {
        match self.store.load(&video_id) {
            Ok(annotations) => {
                self.saved = annotations;
                self.saved_video_id = Some(video_id);
                self.selected_annotation = None;
                self.show_library = false;
            }
            Err(e) => self.set_status(&format!("Failed to load annotations: {}", e), true),
        }
    }

    /// Whether saved segments can be replayed against the loaded media.
    fn can_play_saved(&self) -> bool {
        match (&self.session, &self.saved_video_id) {
            (Some(session), Some(video_id)) => session.video_id == *video_id,
            _ => false,
        }
    }
}

impl eframe::App for VidquizApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Check for completed background work.
        if let Some(receiver) = &self.video_loader {
            if let Ok(result) = receiver.try_recv() {
                self.video_loader = None;
                match result {
                    Ok(data) => self.apply_loaded_video(data),
                    Err(e) => self.set_status(&e, true),
                }
            }
        }

        if let Some(receiver) = &self.shot_detector {
            if let Ok(result) = receiver.try_recv() {
                self.shot_detector = None;
                match result {
                    Ok(shots) => {
                        let count = shots.len();
                        if let Some(session) = &mut self.session {
                            session.shots = shots;
                        }
                        log::info!("Detected {} shot boundaries", count);
                        self.set_status("Shots detected!", false);
                    }
                    Err(e) => self.set_status(&e, true),
                }
            }
        }

        if let Some(receiver) = &self.frame_loader {
            if let Ok(result) = receiver.try_recv() {
                self.frame_loader = None;
                match result {
                    Ok(frame) => {
                        let size = [frame.width as usize, frame.height as usize];
                        let color_image =
                            egui::ColorImage::from_rgba_unmultiplied(size, &frame.pixels);
                        self.preview_texture = Some(ctx.load_texture(
                            "preview_frame",
                            color_image,
                            egui::TextureOptions::LINEAR,
                        ));
                    }
                    Err(e) => log::warn!("{}", e),
                }
            }
        }

        // Advance the playback clock and run the window stop check.
        if let Some(player) = &mut self.player {
            player.advance();
            self.gate.tick(player);
            if player.is_playing() {
                ctx.request_repaint();
            }
        }
        let playing = self.player.as_ref().map(|p| p.is_playing()).unwrap_or(false);
        if self.was_playing && !playing {
            // Just paused (gate, media end, or user): refresh the preview.
            let position = self.player.as_ref().map(|p| p.current_time()).unwrap_or(0.0);
            self.request_preview_frame(position);
        }
        self.was_playing = playing;

        // Top menu bar
        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("File", |ui| {
                    if ui.button("Open Video...").clicked() {
                        if let Some(path) = rfd::FileDialog::new()
                            .add_filter("Videos", &["mp4", "webm", "mkv"])
                            .pick_file()
                        {
                            self.open_video_file(path);
                        }
                        ui.close_menu();
                    }
                    if ui.button("Annotated Videos...").clicked() {
                        match self.store.list_videos() {
                            Ok(library) => {
                                self.library = library;
                                self.show_library = true;
                            }
                            Err(e) => {
                                self.set_status(&format!("Failed to list videos: {}", e), true)
                            }
                        }
                        ui.close_menu();
                    }
                    ui.separator();
                    ui.menu_button("Export Annotations", |ui| {
                        let has_saved = !self.saved.is_empty();
                        if ui
                            .add_enabled(has_saved, egui::Button::new("Export as YAML..."))
                            .clicked()
                        {
                            if let Some(path) = rfd::FileDialog::new()
                                .add_filter("YAML", &["yaml", "yml"])
                                .set_file_name("annotations.yaml")
                                .save_file()
                            {
                                self.export_annotations(path);
                            }
                            ui.close_menu();
                        }
                        if ui
                            .add_enabled(has_saved, egui::Button::new("Export as JSON..."))
                            .clicked()
                        {
                            if let Some(path) = rfd::FileDialog::new()
                                .add_filter("JSON", &["json"])
                                .set_file_name("annotations.json")
                                .save_file()
                            {
                                self.export_annotations(path);
                            }
                            ui.close_menu();
                        }
                    });
                    ui.separator();
                    if ui.button("Quit").clicked() {
                        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                    }
                });
            });
        });

        // Status bar (bottom), with the five-second lifetime.
        let status_expired = self
            .status
            .as_ref()
            .is_some_and(|s| s.shown_at.elapsed() > STATUS_TTL);
        if status_expired {
            self.status = None;
        }
        if let Some(status) = &self.status {
            egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
                let color = if status.is_error {
                    egui::Color32::from_rgb(230, 110, 110)
                } else {
                    egui::Color32::from_rgb(120, 200, 140)
                };
                ui.label(egui::RichText::new(&status.text).color(color));
            });
            ctx.request_repaint_after(Duration::from_millis(250));
        }

        // Annotation panel (right side): form on top, saved list below.
        let has_session = self.session.is_some();
        let can_play = self.can_play_saved();
        let (form_action, review_action) = egui::SidePanel::right("annotation_panel")
            .default_width(300.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical()
                    .auto_shrink(false)
                    .show(ui, |ui| {
                        let form_action = form::show(ui, &mut self.form, has_session);
                        ui.separator();
                        let review_action =
                            review::show(ui, &self.saved, self.selected_annotation, can_play);
                        (form_action, review_action)
                    })
                    .inner
            })
            .inner;

        match form_action {
            FormAction::AddChoice => self.form.add_choice(),
            FormAction::RemoveChoice(id) => self.form.remove_choice(id),
            FormAction::Save => self.save_annotation(),
            FormAction::None => {}
        }
        match review_action {
            ReviewAction::Select(index) => self.selected_annotation = Some(index),
            ReviewAction::PlaySegment(index) => self.play_saved_segment(index),
            ReviewAction::None => {}
        }

        // Main area: download row, preview frame, timeline, transport.
        let (timeline_action, transport_action, download_clicked) =
            egui::CentralPanel::default()
                .show(ctx, |ui| {
                    let mut timeline_action = TimelineAction::None;
                    let mut transport_action = TransportAction::None;
                    let mut download_clicked = false;

                    ui.horizontal(|ui| {
                        ui.label("YouTube URL:");
                        ui.add(
                            egui::TextEdit::singleline(&mut self.url_input)
                                .desired_width(320.0)
                                .hint_text("https://www.youtube.com/watch?v=..."),
                        );
                        let downloading = self.video_loader.is_some();
                        let label = if downloading { "Downloading..." } else { "Download" };
                        if ui
                            .add_enabled(!downloading, egui::Button::new(label))
                            .clicked()
                        {
                            download_clicked = true;
                        }
                        if downloading {
                            ui.spinner();
                        }
                    });
                    ui.separator();

                    if let (Some(session), Some(player)) = (&self.session, &self.player) {
                        ui.heading(&session.title);

                        // Preview frame area, aspect-fit into the reserved space.
                        let available = ui.available_size();
                        let preview_height = (available.y - 110.0).max(120.0);
                        let (frame_rect, _) = ui.allocate_exact_size(
                            egui::vec2(available.x, preview_height),
                            egui::Sense::hover(),
                        );
                        let painter = ui.painter();
                        painter.rect_filled(frame_rect, 4.0, egui::Color32::from_gray(25));
                        if let Some(texture) = &self.preview_texture {
                            let tex_size = texture.size_vec2();
                            let scale = (frame_rect.width() / tex_size.x)
                                .min(frame_rect.height() / tex_size.y);
                            let image_rect = egui::Rect::from_center_size(
                                frame_rect.center(),
                                tex_size * scale,
                            );
                            painter.image(
                                texture.id(),
                                image_rect,
                                egui::Rect::from_min_max(
                                    egui::pos2(0.0, 0.0),
                                    egui::pos2(1.0, 1.0),
                                ),
                                egui::Color32::WHITE,
                            );
                        }

                        timeline_action =
                            timeline::show(ui, session, player.current_time(), &self.drag);
                        transport_action = transport::show(
                            ui,
                            session,
                            player.current_time(),
                            player.is_playing(),
                            self.shot_detector.is_some(),
                        );
                    } else {
                        // Welcome message when no video is loaded.
                        ui.centered_and_justified(|ui| {
                            ui.vertical_centered(|ui| {
                                ui.add_space(20.0);
                                ui.heading(
                                    egui::RichText::new("vidquiz")
                                        .size(32.0)
                                        .color(egui::Color32::from_gray(200)),
                                );
                                ui.label(
                                    egui::RichText::new(
                                        "Mark video segments and attach quiz questions",
                                    )
                                    .size(14.0)
                                    .color(egui::Color32::from_gray(150)),
                                );
                                ui.add_space(20.0);
                                if self.video_loader.is_some() {
                                    ui.spinner();
                                    ui.label(
                                        egui::RichText::new("Loading video...")
                                            .color(egui::Color32::from_gray(180)),
                                    );
                                } else {
                                    ui.label(
                                        egui::RichText::new(
                                            "Open a video file or download one to begin",
                                        )
                                        .color(egui::Color32::from_gray(180)),
                                    );
                                }
                            });
                        });
                    }

                    (timeline_action, transport_action, download_clicked)
                })
                .inner;

        match timeline_action {
            TimelineAction::Seek(time) => self.seek_to(time),
            TimelineAction::BeginDrag(marker) => self.drag.begin(marker),
            TimelineAction::DragTo(time) => {
                if let Some(session) = &mut self.session {
                    self.drag.update(&mut session.selection, time);
                }
            }
            TimelineAction::EndDrag => self.drag.finish(),
            TimelineAction::None => {}
        }

        match transport_action {
            TransportAction::TogglePlay => self.toggle_play(),
            TransportAction::SetStartHere => {
                if let (Some(session), Some(player)) = (&mut self.session, &self.player) {
                    session.selection.set_start(player.current_time());
                }
            }
            TransportAction::SetEndHere => {
                if let (Some(session), Some(player)) = (&mut self.session, &self.player) {
                    session.selection.set_end(player.current_time());
                }
            }
            TransportAction::PreviewSelection => self.preview_selection(),
            TransportAction::DetectShots => self.start_shot_detection(),
            TransportAction::None => {}
        }

        if download_clicked {
            let url = self.url_input.trim().to_string();
            self.download_from_url(url);
        }

        // Library window listing annotated videos.
        if self.show_library {
            let mut open = self.show_library;
            let mut view_clicked: Option<String> = None;
            egui::Window::new("Annotated Videos")
                .open(&mut open)
                .resizable(false)
                .show(ctx, |ui| {
                    if self.library.is_empty() {
                        ui.label("No annotated videos available.");
                    }
                    for entry in &self.library {
                        ui.horizontal(|ui| {
                            let short: String = entry.video_id.chars().take(16).collect();
                            ui.label(format!(
                                "{} ({} annotations)",
                                short, entry.annotation_count
                            ));
                            if ui.button("View").clicked() {
                                view_clicked = Some(entry.video_id.clone());
                            }
                        });
                    }
                });
            self.show_library = open;
            if let Some(video_id) = view_clicked {
                self.view_library_video(video_id);
            }
        }

        // Keyboard shortcuts, only when no text field wants the input.
        if !ctx.wants_keyboard_input() {
            if ctx.input(|i| i.key_pressed(egui::Key::Space)) {
                self.toggle_play();
            }
            let mut step = 0.0;
            if ctx.input(|i| i.key_pressed(egui::Key::ArrowLeft)) {
                step -= KEY_SEEK_STEP;
            }
            if ctx.input(|i| i.key_pressed(egui::Key::ArrowRight)) {
                step += KEY_SEEK_STEP;
            }
            if step != 0.0 {
                let target = self.player.as_ref().map(|p| p.current_time() + step);
                if let Some(time) = target {
                    self.seek_to(time);
                }
            }
        }
    }
}
