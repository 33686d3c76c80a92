pub mod feasibility;

use crate::catalog::{Catalog, RawRecord};
use crate::config::SelectionConfig;
use crate::search::search;
use crate::types::selection_bundle::{
	SelectedProject, SelectionError, SelectionMetadata, SelectionResult,
};
pub use feasibility::{check_diversity, diversity_cap, select_best, Selection, SelectionStats};

pub struct PortfolioSelector {
	config: SelectionConfig,
}

impl PortfolioSelector {
	pub fn new(config: SelectionConfig) -> Self {
		Self { config }
	}

	pub fn config(&self) -> &SelectionConfig {
		&self.config
	}

	/// Normalize raw records, then select from the resulting catalog.
	pub fn select(&self, records: &[RawRecord]) -> Result<SelectionResult, SelectionError> {
		// Both fatal error kinds surface before any search work.
		self.config.validate()?;
		let catalog = Catalog::normalize(records)?;
		self.select_catalog(&catalog)
	}

	pub fn select_catalog(&self, catalog: &Catalog) -> Result<SelectionResult, SelectionError> {
		let config = &self.config;
		config.validate()?;

		// 1. State-space search
		let space = search(catalog.items(), catalog.dims(), config.max_budget, config.max_states)?;

		// 2. Feasibility filter
		let best = select_best(
			&space,
			config.theme_diversity_factor,
			config.country_diversity_factor,
		);

		// 3. Resolve ids back to catalog rows
		let projects: Vec<SelectedProject> = best
			.iter()
			.flat_map(|selection| selection.ids.iter())
			.filter_map(|id| catalog.find(id))
			.map(|item| SelectedProject {
				id: item.id.clone(),
				theme: catalog.themes()[item.theme].clone(),
				country: catalog.countries()[item.country].clone(),
				participants: item.participants,
				budget: item.budget,
				rating: item.rating,
			})
			.collect();

		debug_assert_eq!(
			projects.len(),
			best.as_ref().map_or(0, |selection| selection.ids.len())
		);

		let stats = best.as_ref().map(|selection| selection.stats.clone());
		let metadata = SelectionMetadata {
			max_budget: config.max_budget,
			theme_diversity_factor: config.theme_diversity_factor,
			country_diversity_factor: config.country_diversity_factor,
			max_states: config.max_states,
			candidates_considered: space.candidates_considered(),
			states_retained: space.len(),
			projects_selected: projects.len(),
			budget_used: stats.as_ref().map_or(0, |s| s.budget_used),
			total_participants: best.as_ref().map_or(0, |s| s.objective.total_participants),
			total_rating: best.as_ref().map_or(0.0, |s| s.objective.total_rating),
			max_theme_count: stats.as_ref().map_or(0, |s| s.max_theme_count),
			max_country_count: stats.as_ref().map_or(0, |s| s.max_country_count),
		};

		Ok(SelectionResult {
			projects,
			selection: metadata,
		})
	}
}
