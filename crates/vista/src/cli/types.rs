//! CLI enum types: output format and quiz difficulty.

use clap::ValueEnum;
use vista_core::Difficulty;

/// How task results are printed.
#[derive(Clone, Copy, Debug, ValueEnum, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// The model's answer as plain text (default)
    #[default]
    Text,
    /// The full result record as pretty JSON
    Json,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

/// Quiz difficulty levels.
#[derive(Clone, Copy, Debug, ValueEnum, Default)]
pub enum DifficultyArg {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl From<DifficultyArg> for Difficulty {
    fn from(arg: DifficultyArg) -> Self {
        match arg {
            DifficultyArg::Easy => Difficulty::Easy,
            DifficultyArg::Medium => Difficulty::Medium,
            DifficultyArg::Hard => Difficulty::Hard,
        }
    }
}
