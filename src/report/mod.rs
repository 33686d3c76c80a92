pub mod comparison;
pub mod writer;

pub use comparison::overlap_coefficient;
pub use writer::{ReportError, ReportWriter, SelectionReport, REPORT_FILE, SELECTED_IDS_FILE};
