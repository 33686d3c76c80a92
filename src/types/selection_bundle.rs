use serde::Serialize;

use crate::catalog::SchemaError;
use crate::config::ConfigurationError;
use crate::types::identifiers::ProjectId;

/// A selected project returned in the output.
/// Labels are resolved back from the dense indices so the payload is self-contained.
#[derive(Debug, Clone, PartialEq, Serialize, serde::Deserialize)]
pub struct SelectedProject {
    pub id: ProjectId,
    pub theme: String,
    pub country: String,

    pub participants: u64,
    pub budget: u64,
    pub rating: f64,
}

/// Metadata describing the outcome of the selection process.
#[derive(Debug, Clone, PartialEq, Serialize, serde::Deserialize)]
pub struct SelectionMetadata {
    pub max_budget: u64,
    pub theme_diversity_factor: f64,
    pub country_diversity_factor: f64,
    pub max_states: usize,

    pub candidates_considered: usize,
    pub states_retained: usize,

    pub projects_selected: usize,
    pub budget_used: u64,
    pub total_participants: u64,
    pub total_rating: f64,
    pub max_theme_count: u32,
    pub max_country_count: u32,
}

/// The final result of a portfolio selection.
///
/// An empty `projects` list is a legitimate outcome: no subset satisfied the
/// budget and diversity constraints.
#[derive(Debug, Clone, PartialEq, Serialize, serde::Deserialize)]
pub struct SelectionResult {
    pub projects: Vec<SelectedProject>,
    pub selection: SelectionMetadata,
}

impl SelectionResult {
    pub fn selected_ids(&self) -> Vec<ProjectId> {
        self.projects.iter().map(|p| p.id.clone()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SelectionError {
    #[error("Schema error: {0}")]
    Schema(#[from] SchemaError),

    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigurationError),
}
