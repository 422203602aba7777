//! Request forms accepted by the API and their acceptance rules

use serde::{Deserialize, Serialize};
use shared::models::{
    ApplicationType, CheckConfigSloAvailability, CheckConfigSloLatency, Prometheus,
    ThresholdOverrides,
};

use super::extractors::Validatable;
use super::validators::{is_slug, is_uri_reference};

// ─────────────────────────────────────────────────────────────────────────────
// Projects
// ─────────────────────────────────────────────────────────────────────────────

/// Create or update a project
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectForm {
    pub name: String,
    pub prometheus: Prometheus,
}

impl Validatable for ProjectForm {
    fn is_valid(&self) -> bool {
        is_slug(&self.name) && is_uri_reference(&self.prometheus.url)
    }
}

/// Mute or unmute an application type for a project
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectStatusForm {
    #[serde(default)]
    pub mute: Option<ApplicationType>,
    #[serde(default)]
    pub unmute: Option<ApplicationType>,
}

impl Validatable for ProjectStatusForm {
    // Any combination of mute/unmute is accepted, including both or neither.
    fn is_valid(&self) -> bool {
        true
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Check configuration
// ─────────────────────────────────────────────────────────────────────────────

/// Threshold for a check at global, project and application level
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CheckConfigForm {
    pub global_threshold: f64,
    #[serde(default)]
    pub project_threshold: Option<f64>,
    #[serde(default)]
    pub application_threshold: Option<f64>,
}

impl CheckConfigForm {
    pub fn overrides(&self) -> ThresholdOverrides {
        ThresholdOverrides {
            global: self.global_threshold,
            project: self.project_threshold,
            application: self.application_threshold,
        }
    }

    /// Threshold that applies to the application after overrides
    pub fn effective_threshold(&self) -> f64 {
        self.overrides().effective()
    }
}

impl Validatable for CheckConfigForm {
    // No range or sign constraints on thresholds at this layer.
    fn is_valid(&self) -> bool {
        true
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CheckConfigSloAvailabilityForm {
    pub configs: Vec<CheckConfigSloAvailability>,
}

impl Validatable for CheckConfigSloAvailabilityForm {
    fn is_valid(&self) -> bool {
        self.configs
            .iter()
            .all(|c| !c.total_requests_query.is_empty() && !c.failed_requests_query.is_empty())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CheckConfigSloLatencyForm {
    pub configs: Vec<CheckConfigSloLatency>,
}

impl Validatable for CheckConfigSloLatencyForm {
    fn is_valid(&self) -> bool {
        self.configs
            .iter()
            .all(|c| !c.histogram_query.is_empty() && !c.objective_bucket.is_empty())
    }
}
