pub mod normalizer;
pub mod raw;

pub use crate::types::identifiers::{CatalogVersion, ProjectId};
pub use normalizer::{CandidateItem, Catalog, ProfileDims, SchemaError, REQUIRED_FIELDS};
pub use raw::{RawRecord, RawValue};
