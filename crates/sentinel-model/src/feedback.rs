use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FeedbackCategory {
    #[default]
    General,
    #[serde(rename = "Bug Report")]
    BugReport,
    #[serde(rename = "Feature Request")]
    FeatureRequest,
}

impl FeedbackCategory {
    pub const ALL: [FeedbackCategory; 3] = [
        FeedbackCategory::General,
        FeedbackCategory::BugReport,
        FeedbackCategory::FeatureRequest,
    ];

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::General => "General",
            Self::BugReport => "Bug Report",
            Self::FeatureRequest => "Feature Request",
        }
    }
}

impl fmt::Display for FeedbackCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for FeedbackCategory {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted: String = s
            .chars()
            .filter(|ch| ch.is_ascii_alphanumeric())
            .collect();
        Self::ALL
            .into_iter()
            .find(|category| {
                category
                    .label()
                    .replace(' ', "")
                    .eq_ignore_ascii_case(&wanted)
            })
            .ok_or_else(|| ModelError::UnknownCategory(s.to_string()))
    }
}

/// A feedback form submission.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Feedback {
    pub category: FeedbackCategory,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// Acknowledgment produced for a feedback submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedbackAck {
    pub acknowledgment: String,
}
