// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Annotation persistence and export.
//!
//! This module owns the on-disk representation of saved annotations: one
//! pretty-printed JSON file per video under the store root. The format
//! holds answer choices as a typed list; readers never have to guess
//! whether a field is a string or an array. Export to YAML or JSON writes
//! a user-chosen path.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use crate::models::annotation::Annotation;

/// An annotated video known to the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoEntry {
    pub video_id: String,
    pub annotation_count: usize,
}

/// File-backed annotation storage, one JSON file per video.
pub struct AnnotationStore {
    root: PathBuf,
}

impl AnnotationStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn path_for(&self, video_id: &str) -> PathBuf {
        self.root.join(format!("video_{video_id}.json"))
    }

    /// Load all annotations saved for a video. A video with no file yet
    /// simply has no annotations.
    pub fn load(&self, video_id: &str) -> Result<Vec<Annotation>> {
        let path = self.path_for(video_id);
        if !path.exists() {
            return Ok(Vec::new());
        }
        let json = fs::read_to_string(&path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        serde_json::from_str(&json)
            .with_context(|| format!("failed to parse {}", path.display()))
    }

    /// Append one annotation to its video's file.
    pub fn append(&self, annotation: &Annotation) -> Result<()> {
        fs::create_dir_all(&self.root)
            .with_context(|| format!("failed to create {}", self.root.display()))?;
        let mut annotations = self.load(&annotation.video_id)?;
        annotations.push(annotation.clone());
        let path = self.path_for(&annotation.video_id);
        let json = serde_json::to_string_pretty(&annotations)?;
        fs::write(&path, json).with_context(|| format!("failed to write {}", path.display()))?;
        Ok(())
    }

    /// List every annotated video with its annotation count, sorted by id.
    pub fn list_videos(&self) -> Result<Vec<VideoEntry>> {
        let mut entries = Vec::new();
        let dir = match fs::read_dir(&self.root) {
            Ok(dir) => dir,
            // No store directory yet means no annotated videos.
            Err(_) => return Ok(entries),
        };
        for entry in dir {
            let entry = entry?;
            let name = entry.file_name();
            let Some(name) = name.to_str() else { continue };
            let Some(video_id) = name
                .strip_prefix("video_")
                .and_then(|rest| rest.strip_suffix(".json"))
            else {
                continue;
            };
            let annotation_count = self.load(video_id)?.len();
            entries.push(VideoEntry {
                video_id: video_id.to_string(),
                annotation_count,
            });
        }
        entries.sort_by(|a, b| a.video_id.cmp(&b.video_id));
        Ok(entries)
    }
}

/// Export annotations to YAML format.
pub fn export_yaml(annotations: &[Annotation], path: &Path) -> Result<()> {
    let yaml = serde_yaml::to_string(annotations)?;
    fs::write(path, yaml)?;
    Ok(())
}

/// Export annotations to JSON format.
pub fn export_json(annotations: &[Annotation], path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(annotations)?;
    fs::write(path, json)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::annotation::AnswerChoice;
    use chrono::Utc;
    use uuid::Uuid;

    fn annotation(video_id: &str, question: &str) -> Annotation {
        Annotation {
            question_id: Uuid::new_v4(),
            video_id: video_id.to_string(),
            start_time: 1.0,
            stop_time: 5.0,
            question: question.to_string(),
            answer_choices: vec![
                AnswerChoice { id: 0, text: "Yes".to_string() },
                AnswerChoice { id: 1, text: "No".to_string() },
            ],
            correct_answer: 1,
            created: Utc::now(),
        }
    }

    #[test]
    fn test_load_unknown_video_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = AnnotationStore::new(dir.path());
        assert!(store.load("nope").unwrap().is_empty());
    }

    #[test]
    fn test_append_then_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let store = AnnotationStore::new(dir.path());

        let first = annotation("vid_a", "First?");
        let second = annotation("vid_a", "Second?");
        store.append(&first).unwrap();
        store.append(&second).unwrap();

        let loaded = store.load("vid_a").unwrap();
        assert_eq!(loaded, vec![first, second]);
    }

    #[test]
    fn test_videos_are_isolated() {
        let dir = tempfile::tempdir().unwrap();
        let store = AnnotationStore::new(dir.path());
        store.append(&annotation("vid_a", "A?")).unwrap();
        store.append(&annotation("vid_b", "B?")).unwrap();

        assert_eq!(store.load("vid_a").unwrap().len(), 1);
        assert_eq!(store.load("vid_b").unwrap().len(), 1);
    }

    #[test]
    fn test_list_videos_with_counts() {
        let dir = tempfile::tempdir().unwrap();
        let store = AnnotationStore::new(dir.path());
        assert!(store.list_videos().unwrap().is_empty());

        store.append(&annotation("vid_b", "One?")).unwrap();
        store.append(&annotation("vid_a", "One?")).unwrap();
        store.append(&annotation("vid_a", "Two?")).unwrap();

        let listed = store.list_videos().unwrap();
        assert_eq!(
            listed,
            vec![
                VideoEntry { video_id: "vid_a".to_string(), annotation_count: 2 },
                VideoEntry { video_id: "vid_b".to_string(), annotation_count: 1 },
            ]
        );
    }

    #[test]
    fn test_export_json_and_yaml() {
        let dir = tempfile::tempdir().unwrap();
        let annotations = vec![annotation("vid_a", "Exported?")];

        let json_path = dir.path().join("out.json");
        export_json(&annotations, &json_path).unwrap();
        let back: Vec<Annotation> =
            serde_json::from_str(&fs::read_to_string(&json_path).unwrap()).unwrap();
        assert_eq!(back, annotations);

        let yaml_path = dir.path().join("out.yaml");
        export_yaml(&annotations, &yaml_path).unwrap();
        let back: Vec<Annotation> =
            serde_yaml::from_str(&fs::read_to_string(&yaml_path).unwrap()).unwrap();
        assert_eq!(back, annotations);
    }
}
