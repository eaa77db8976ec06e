use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Endpoint advertised for the simulated deployment.
pub const DEFAULT_ENDPOINT: &str = "https://api.sentinel-fraud.ai/v1/predict";
/// Version tag of the simulated deployment.
pub const DEFAULT_VERSION: &str = "SENTINEL-1.0-STABLE";

/// Lifecycle of a simulated deployment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeploymentStatus {
    Deploying,
    Active,
    Inactive,
}

impl DeploymentStatus {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Deploying => "Deploying",
            Self::Active => "Active",
            Self::Inactive => "Inactive",
        }
    }
}

impl fmt::Display for DeploymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Deployment {
    pub endpoint: String,
    pub status: DeploymentStatus,
    pub created_at: DateTime<Utc>,
    pub version: String,
}

impl Deployment {
    /// A fresh deployment in the `deploying` state.
    pub fn new(created_at: DateTime<Utc>) -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            status: DeploymentStatus::Deploying,
            created_at,
            version: DEFAULT_VERSION.to_string(),
        }
    }

    pub fn is_active(&self) -> bool {
        self.status == DeploymentStatus::Active
    }
}
