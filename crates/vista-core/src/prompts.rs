//! Canned instruction templates for the assistant's task methods.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Diagram explanation: what it shows, components, patterns.
pub const EXPLAIN_DIAGRAM: &str = "Analyze this diagram and provide:
1. A clear explanation of what it shows
2. Key components and their relationships
3. Any important patterns or insights
Please structure the response clearly.";

/// Concept identification: name, explanation, relation to the topic.
pub const IDENTIFY_KEY_CONCEPTS: &str = "Identify the main educational concepts in this image.
For each concept provide:
1. The concept name
2. A brief explanation
3. How it relates to the overall topic";

/// Quiz difficulty level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            other => Err(format!(
                "unknown difficulty '{other}' (expected easy, medium, or hard)"
            )),
        }
    }
}

/// Quiz generation prompt for the given difficulty.
pub fn generate_quiz(difficulty: Difficulty) -> String {
    format!(
        "Generate a {difficulty}-level quiz about this image with:
1. 3 multiple choice questions
2. The correct answer for each question
3. A brief explanation for each answer
Format as a structured response."
    )
}
