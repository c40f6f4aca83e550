//! Result records returned by the assistant's task methods.
//!
//! Each record wraps the model's free-form text unchanged. Nothing is parsed
//! out of it: `KeyConcepts::concepts` is the raw text, not a list.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::prompts::Difficulty;

/// Fallback text when the model returns no text.
pub const NO_RESPONSE: &str = "No response generated from the model.";

/// Output of `explain_diagram`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiagramExplanation {
    pub explanation: String,
    pub image_path: PathBuf,
}

/// Output of `generate_quiz`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quiz {
    /// Questions, answers and explanations as free text
    pub quiz_content: String,
    pub difficulty: Difficulty,
    pub image_path: PathBuf,
}

/// Output of `identify_key_concepts`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyConcepts {
    pub concepts: String,
    pub image_path: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diagram_explanation_keys() {
        let record = DiagramExplanation {
            explanation: "A flow chart".to_string(),
            image_path: PathBuf::from("diagrams/flow.png"),
        };
        let value = serde_json::to_value(&record).unwrap();
        let keys: Vec<&str> = value.as_object().unwrap().keys().map(|k| k.as_str()).collect();
        assert_eq!(keys, vec!["explanation", "imagePath"]);
        assert_eq!(value["imagePath"], "diagrams/flow.png");
    }

    #[test]
    fn test_quiz_keys() {
        let record = Quiz {
            quiz_content: "Q1".to_string(),
            difficulty: Difficulty::Hard,
            image_path: PathBuf::from("cell.jpg"),
        };
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["quizContent"], "Q1");
        assert_eq!(value["difficulty"], "hard");
        assert_eq!(value.as_object().unwrap().len(), 3);
    }
}
