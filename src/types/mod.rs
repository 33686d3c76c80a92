pub mod identifiers;
pub mod selection_bundle;

pub use identifiers::{CatalogVersion, ProjectId};
pub use selection_bundle::{SelectedProject, SelectionError, SelectionMetadata, SelectionResult};
