//! Enumerations for user actions and regeneration feedback.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// Type-safe enumeration of the actions a user can take on a task.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
pub enum ActionType {
    /// User started working on the task
    Start,

    /// User finished the task
    Complete,

    /// User wants a different task in its place
    Skip,

    /// User rated how hard the task was
    RateDifficulty,
}

impl FromStr for ActionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "start" => Ok(ActionType::Start),
            "complete" => Ok(ActionType::Complete),
            "skip" => Ok(ActionType::Skip),
            "rate_difficulty" | "rate-difficulty" | "rate" => Ok(ActionType::RateDifficulty),
            _ => Err(format!("Invalid action type: {s}")),
        }
    }
}

impl ActionType {
    /// Convert to database string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            ActionType::Start => "start",
            ActionType::Complete => "complete",
            ActionType::Skip => "skip",
            ActionType::RateDifficulty => "rate_difficulty",
        }
    }
}

/// Why a task is being regenerated.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
pub enum FeedbackType {
    /// Provide an alternative task
    #[default]
    Skip,

    /// Provide a simpler task
    TooHard,

    /// Learner already finished it; provide the next step up
    Completed,
}

impl FromStr for FeedbackType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "skip" => Ok(FeedbackType::Skip),
            "too_hard" | "too-hard" => Ok(FeedbackType::TooHard),
            "completed" => Ok(FeedbackType::Completed),
            _ => Err(format!("Invalid feedback type: {s}")),
        }
    }
}

impl FeedbackType {
    /// Convert to wire string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            FeedbackType::Skip => "skip",
            FeedbackType::TooHard => "too_hard",
            FeedbackType::Completed => "completed",
        }
    }
}

/// Difficulty rating between 1 (too hard) and 5 (too easy).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(try_from = "u8", into = "u8")]
pub struct DifficultyRating(u8);

impl DifficultyRating {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    /// Validates and wraps a raw rating.
    pub fn new(value: u8) -> Result<Self, String> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Ok(Self(value))
        } else {
            Err(format!(
                "Difficulty rating must be between {} and {}, got {value}",
                Self::MIN,
                Self::MAX
            ))
        }
    }

    /// The raw value.
    pub fn get(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for DifficultyRating {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<DifficultyRating> for u8 {
    fn from(rating: DifficultyRating) -> Self {
        rating.0
    }
}

impl fmt::Display for DifficultyRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.0, Self::MAX)
    }
}
