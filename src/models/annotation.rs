// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Annotation data structures.
//!
//! This module defines the persisted annotation record: a time segment of
//! a video paired with a multiple-choice question. Answer choices are a
//! typed list in every representation; they are never flattened into a
//! string at any storage boundary.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single answer choice with a stable id.
///
/// Ids are assigned by the form with a monotonically increasing counter
/// and are unique within one annotation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerChoice {
    pub id: u32,
    pub text: String,
}

/// A saved segment annotation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    pub question_id: Uuid,
    pub video_id: String,
    pub start_time: f64,
    pub stop_time: f64,
    pub question: String,
    pub answer_choices: Vec<AnswerChoice>,
    /// Id of the correct entry in `answer_choices`.
    pub correct_answer: u32,
    pub created: DateTime<Utc>,
}

impl Annotation {
    /// The answer choice marked correct, if its id is present in the list.
    pub fn correct_choice(&self) -> Option<&AnswerChoice> {
        self.answer_choices.iter().find(|c| c.id == self.correct_answer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Annotation {
        Annotation {
            question_id: Uuid::new_v4(),
            video_id: "abc123_test".to_string(),
            start_time: 4.5,
            stop_time: 9.0,
            question: "What just happened?".to_string(),
            answer_choices: vec![
                AnswerChoice { id: 0, text: "A goal".to_string() },
                AnswerChoice { id: 2, text: "A foul".to_string() },
            ],
            correct_answer: 2,
            created: Utc::now(),
        }
    }

    #[test]
    fn test_correct_choice_lookup() {
        let annotation = sample();
        assert_eq!(annotation.correct_choice().unwrap().text, "A foul");
    }

    #[test]
    fn test_correct_choice_missing_id() {
        let mut annotation = sample();
        annotation.correct_answer = 99;
        assert!(annotation.correct_choice().is_none());
    }

    #[test]
    fn test_answer_choices_serialize_as_typed_list() {
        let annotation = sample();
        let json = serde_json::to_value(&annotation).unwrap();
        // The choices must be a JSON array of objects, not a stringified
        // list that readers would have to sniff and re-parse.
        let choices = json.get("answer_choices").unwrap();
        assert!(choices.is_array());
        assert_eq!(choices[0]["text"], "A goal");
    }
}
