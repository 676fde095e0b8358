// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Annotation form state.
//!
//! This module tracks the in-progress question form: the question text, a
//! variable-length set of answer choices, and which choice is marked
//! correct. The form is validated as a whole before an annotation is built
//! from it.

use chrono::Utc;
use uuid::Uuid;

use super::annotation::{Annotation, AnswerChoice};
use super::selection::SegmentSelection;

/// Minimum number of answer choices a question must keep.
pub const MIN_CHOICES: usize = 2;

/// Minimum segment length in seconds accepted at save time.
///
/// Distinct from the 0.1 s structural gap held during drags: a selection
/// can be legal to drag but still too short to save.
pub const MIN_SAVE_LEN: f64 = 1.0;

/// Why a form cannot be saved yet. All variants are user-correctable; the
/// form keeps its contents when validation fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Please enter a question")]
    MissingQuestion,
    #[error("Please fill all answer choices")]
    EmptyChoice,
    #[error("Please select the correct answer")]
    NoCorrectSelected,
    #[error("Please select a video segment of at least 1 second")]
    SelectionTooShort,
}

/// The in-progress annotation form.
pub struct AnnotationForm {
    pub question: String,
    /// Id of the choice marked correct, if one is marked.
    pub correct_id: Option<u32>,
    choices: Vec<AnswerChoice>,
    next_id: u32,
}

impl Default for AnnotationForm {
    fn default() -> Self {
        Self::new()
    }
}

impl AnnotationForm {
    /// Create a form with the minimum two blank choices.
    pub fn new() -> Self {
        let mut form = Self {
            question: String::new(),
            correct_id: None,
            choices: Vec::new(),
            next_id: 0,
        };
        for _ in 0..MIN_CHOICES {
            form.add_choice();
        }
        form
    }

    pub fn choices(&self) -> &[AnswerChoice] {
        &self.choices
    }

    pub fn choices_mut(&mut self) -> impl Iterator<Item = &mut AnswerChoice> {
        self.choices.iter_mut()
    }

    /// Append a blank choice with a fresh id.
    ///
    /// Ids come from a counter that only moves forward, so an id is never
    /// reused even after removals; widget state keyed on a choice id can
    /// never be claimed by a later choice.
    pub fn add_choice(&mut self) {
        let id = self.next_id;
        self.next_id += 1;
        self.choices.push(AnswerChoice {
            id,
            text: String::new(),
        });
    }

    /// Remove the choice with the given id.
    ///
    /// A question needs at least two choices, so removal at the floor is a
    /// no-op. Removing the choice marked correct clears the mark.
    pub fn remove_choice(&mut self, id: u32) {
        if self.choices.len() <= MIN_CHOICES {
            return;
        }
        self.choices.retain(|c| c.id != id);
        if self.correct_id == Some(id) {
            self.correct_id = None;
        }
    }

    /// Check whether the form and selection are ready to save.
    pub fn validate(&self, selection: &SegmentSelection) -> Result<(), ValidationError> {
        if self.question.trim().is_empty() {
            return Err(ValidationError::MissingQuestion);
        }
        if self.choices.iter().any(|c| c.text.trim().is_empty()) {
            return Err(ValidationError::EmptyChoice);
        }
        let correct = self.correct_id.ok_or(ValidationError::NoCorrectSelected)?;
        if !self.choices.iter().any(|c| c.id == correct) {
            return Err(ValidationError::NoCorrectSelected);
        }
        if selection.len_secs() < MIN_SAVE_LEN {
            return Err(ValidationError::SelectionTooShort);
        }
        Ok(())
    }

    /// Validate and build the annotation to persist.
    pub fn to_annotation(
        &self,
        video_id: &str,
        selection: &SegmentSelection,
    ) -> Result<Annotation, ValidationError> {
        self.validate(selection)?;
        Ok(Annotation {
            question_id: Uuid::new_v4(),
            video_id: video_id.to_string(),
            start_time: selection.start(),
            stop_time: selection.end(),
            question: self.question.trim().to_string(),
            answer_choices: self
                .choices
                .iter()
                .map(|c| AnswerChoice {
                    id: c.id,
                    text: c.text.trim().to_string(),
                })
                .collect(),
            // validate() guarantees the mark is set and present in the list.
            correct_answer: self.correct_id.unwrap_or_default(),
            created: Utc::now(),
        })
    }

    /// Clear the form back to two blank choices for the next question.
    ///
    /// The id counter keeps running so choice ids stay unique across
    /// consecutive annotations in one session.
    pub fn reset(&mut self) {
        self.question.clear();
        self.correct_id = None;
        self.choices.clear();
        for _ in 0..MIN_CHOICES {
            self.add_choice();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled_form() -> AnnotationForm {
        let mut form = AnnotationForm::new();
        form.question = "Who scored?".to_string();
        for (i, choice) in form.choices_mut().enumerate() {
            choice.text = format!("Player {}", i + 1);
        }
        form.correct_id = Some(form.choices()[0].id);
        form
    }

    fn selection(len: f64) -> SegmentSelection {
        let mut sel = SegmentSelection::new(100.0);
        sel.set_start(10.0);
        sel.set_end(10.0 + len);
        sel
    }

    #[test]
    fn test_new_form_has_two_choices() {
        let form = AnnotationForm::new();
        assert_eq!(form.choices().len(), 2);
        assert_ne!(form.choices()[0].id, form.choices()[1].id);
    }

    #[test]
    fn test_ids_are_never_reused() {
        let mut form = AnnotationForm::new();
        form.add_choice();
        let removed = form.choices()[2].id;
        form.remove_choice(removed);
        form.add_choice();
        assert!(
            form.choices().iter().all(|c| c.id != removed),
            "removed id came back"
        );
    }

    #[test]
    fn test_remove_at_floor_is_noop() {
        let mut form = AnnotationForm::new();
        let id = form.choices()[0].id;
        form.remove_choice(id);
        assert_eq!(form.choices().len(), 2);
        assert!(form.choices().iter().any(|c| c.id == id));
    }

    #[test]
    fn test_removing_correct_choice_clears_mark() {
        let mut form = filled_form();
        form.add_choice();
        let correct = form.correct_id.unwrap();
        form.remove_choice(correct);
        assert_eq!(form.correct_id, None);
    }

    #[test]
    fn test_validate_failure_kinds() {
        let sel = selection(5.0);

        let mut form = filled_form();
        form.question = "   ".to_string();
        assert_eq!(form.validate(&sel), Err(ValidationError::MissingQuestion));

        let mut form = filled_form();
        for choice in form.choices_mut() {
            choice.text.clear();
            break;
        }
        assert_eq!(form.validate(&sel), Err(ValidationError::EmptyChoice));

        let mut form = filled_form();
        form.correct_id = None;
        assert_eq!(form.validate(&sel), Err(ValidationError::NoCorrectSelected));

        let mut form = filled_form();
        form.correct_id = Some(999);
        assert_eq!(form.validate(&sel), Err(ValidationError::NoCorrectSelected));
    }

    #[test]
    fn test_selection_length_policy_boundary() {
        let form = filled_form();
        assert_eq!(
            form.validate(&selection(0.9)),
            Err(ValidationError::SelectionTooShort)
        );
        assert_eq!(form.validate(&selection(1.0)), Ok(()));
    }

    #[test]
    fn test_to_annotation_carries_selection_and_trims() {
        let mut form = filled_form();
        form.question = "  Who scored?  ".to_string();
        let sel = selection(4.0);
        let annotation = form.to_annotation("vid_1", &sel).unwrap();
        assert_eq!(annotation.video_id, "vid_1");
        assert_eq!(annotation.start_time, 10.0);
        assert_eq!(annotation.stop_time, 14.0);
        assert_eq!(annotation.question, "Who scored?");
        assert_eq!(annotation.correct_answer, form.correct_id.unwrap());
        assert!(annotation.correct_choice().is_some());
    }

    #[test]
    fn test_reset_keeps_counter_running() {
        let mut form = filled_form();
        let max_id = form.choices().iter().map(|c| c.id).max().unwrap();
        form.reset();
        assert_eq!(form.choices().len(), 2);
        assert!(form.question.is_empty());
        assert_eq!(form.correct_id, None);
        assert!(form.choices().iter().all(|c| c.id > max_id));
    }
}
