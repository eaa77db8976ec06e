use std::fmt;

use serde::{Deserialize, Serialize};

/// One step of the wizard.
///
/// Declaration order is the intended progression. It is not enforced:
/// reachability depends on which artifacts exist, not on order.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Stage {
    #[default]
    Dashboard,
    Upload,
    Preprocess,
    Train,
    Evaluate,
    Deploy,
}

impl Stage {
    /// All stages in progression order.
    pub const ALL: [Stage; 6] = [
        Stage::Dashboard,
        Stage::Upload,
        Stage::Preprocess,
        Stage::Train,
        Stage::Evaluate,
        Stage::Deploy,
    ];

    /// Sidebar label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Dashboard => "Dashboard",
            Self::Upload => "Data Ingestion",
            Self::Preprocess => "Preprocessing",
            Self::Train => "Model Training",
            Self::Evaluate => "Evaluation",
            Self::Deploy => "Deployment",
        }
    }

    /// The stage that normally follows this one, if any.
    #[must_use]
    pub fn next(self) -> Option<Stage> {
        let index = Self::ALL.iter().position(|stage| *stage == self)?;
        Self::ALL.get(index + 1).copied()
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
