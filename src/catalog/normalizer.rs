use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use super::raw::{RawRecord, RawValue};
use crate::types::identifiers::{CatalogVersion, ProjectId};

pub const FIELD_ID: &str = "ID";
pub const FIELD_COUNTRY: &str = "country";
pub const FIELD_THEME: &str = "theme";
pub const FIELD_PARTICIPANTS: &str = "participants";
pub const FIELD_BUDGET: &str = "budget";
pub const FIELD_RATING: &str = "rating";

pub const REQUIRED_FIELDS: [&str; 6] = [
    FIELD_ID,
    FIELD_COUNTRY,
    FIELD_THEME,
    FIELD_PARTICIPANTS,
    FIELD_BUDGET,
    FIELD_RATING,
];

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SchemaError {
    #[error("Record {row} is missing required field `{field}`")]
    MissingField { row: usize, field: &'static str },
    #[error("Record {row} has an invalid `{field}`: {reason}")]
    InvalidValue {
        row: usize,
        field: &'static str,
        reason: String,
    },
    #[error("Record {row} repeats identifier {id}")]
    DuplicateId { row: usize, id: String },
}

/// A candidate project in fixed shape, ready for the search engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateItem {
    pub id: ProjectId,
    /// Dense index into the sorted theme vocabulary.
    pub theme: usize,
    /// Dense index into the sorted country vocabulary.
    pub country: usize,
    pub participants: u64,
    pub budget: u64,
    pub rating: f64,
}

/// Width of the diversity profile: theme slots come first, then country slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ProfileDims {
    pub themes: usize,
    pub countries: usize,
}

impl ProfileDims {
    pub fn new(themes: usize, countries: usize) -> Self {
        Self { themes, countries }
    }

    pub fn slots(&self) -> usize {
        self.themes + self.countries
    }
}

/// The normalized candidate table plus its theme and country vocabularies.
///
/// Vocabularies are sorted lexicographically, so the same set of labels always
/// yields the same numbering regardless of row order.
#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    items: Vec<CandidateItem>,
    themes: Vec<String>,
    countries: Vec<String>,
}

struct StagedRow {
    id: ProjectId,
    theme: String,
    country: String,
    participants: u64,
    budget: u64,
    rating: f64,
}

impl Catalog {
    /// Normalize raw records into a catalog.
    ///
    /// Every record is checked for the required fields before any value is
    /// coerced, so a schema problem anywhere in the table is reported first.
    pub fn normalize(records: &[RawRecord]) -> Result<Self, SchemaError> {
        for (row, record) in records.iter().enumerate() {
            for field in REQUIRED_FIELDS {
                if record.get(field).is_none() {
                    return Err(SchemaError::MissingField { row, field });
                }
            }
        }

        let staged = records
            .iter()
            .enumerate()
            .map(|(row, record)| stage_row(row, record))
            .collect::<Result<Vec<_>, _>>()?;

        {
            let mut seen_ids = BTreeSet::new();
            for (row, staged_row) in staged.iter().enumerate() {
                if !seen_ids.insert(&staged_row.id) {
                    return Err(SchemaError::DuplicateId {
                        row,
                        id: staged_row.id.as_str().to_string(),
                    });
                }
            }
        }

        let themes: Vec<String> = staged
            .iter()
            .map(|r| r.theme.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        let countries: Vec<String> = staged
            .iter()
            .map(|r| r.country.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        let items = staged
            .into_iter()
            .map(|r| CandidateItem {
                // Both labels were collected from `staged` above, so the lookups cannot miss.
                theme: themes.binary_search(&r.theme).unwrap_or_default(),
                country: countries.binary_search(&r.country).unwrap_or_default(),
                id: r.id,
                participants: r.participants,
                budget: r.budget,
                rating: r.rating,
            })
            .collect::<Vec<_>>();

        debug!(
            candidates = items.len(),
            themes = themes.len(),
            countries = countries.len(),
            "normalized candidate catalog"
        );

        Ok(Catalog {
            items,
            themes,
            countries,
        })
    }

    pub fn items(&self) -> &[CandidateItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn dims(&self) -> ProfileDims {
        ProfileDims::new(self.themes.len(), self.countries.len())
    }

    pub fn themes(&self) -> &[String] {
        &self.themes
    }

    pub fn countries(&self) -> &[String] {
        &self.countries
    }

    pub fn theme_index(&self, label: &str) -> Option<usize> {
        self.themes.binary_search_by(|t| t.as_str().cmp(label)).ok()
    }

    pub fn country_index(&self, label: &str) -> Option<usize> {
        self.countries.binary_search_by(|c| c.as_str().cmp(label)).ok()
    }

    pub fn find(&self, id: &ProjectId) -> Option<&CandidateItem> {
        self.items.iter().find(|item| &item.id == id)
    }

    /// Content hash over the normalized rows, in input order.
    pub fn version(&self) -> CatalogVersion {
        let mut canonical = String::new();
        for item in &self.items {
            canonical.push_str(&format!(
                "{}|{}|{}|{}|{}|{}\n",
                item.id,
                self.themes[item.theme],
                self.countries[item.country],
                item.participants,
                item.budget,
                item.rating,
            ));
        }
        CatalogVersion::from_content(canonical.as_bytes())
    }
}

static NULL: RawValue = RawValue::Null;

fn stage_row(row: usize, record: &RawRecord) -> Result<StagedRow, SchemaError> {
    let field = |name: &'static str| record.get(name).unwrap_or(&NULL);

    Ok(StagedRow {
        id: coerce_id(row, field(FIELD_ID))?,
        theme: coerce_label(row, FIELD_THEME, field(FIELD_THEME))?,
        country: coerce_label(row, FIELD_COUNTRY, field(FIELD_COUNTRY))?,
        participants: coerce_count(row, FIELD_PARTICIPANTS, field(FIELD_PARTICIPANTS))?,
        budget: coerce_budget(row, field(FIELD_BUDGET))?,
        rating: coerce_rating(row, field(FIELD_RATING))?,
    })
}

fn invalid(row: usize, field: &'static str, reason: impl Into<String>) -> SchemaError {
    SchemaError::InvalidValue {
        row,
        field,
        reason: reason.into(),
    }
}

fn coerce_id(row: usize, value: &RawValue) -> Result<ProjectId, SchemaError> {
    match value {
        RawValue::Null => Err(invalid(row, FIELD_ID, "identifier is null")),
        RawValue::String(s) => Ok(ProjectId::new(s.as_str())),
        RawValue::Integer(i) => Ok(ProjectId::from(*i)),
        RawValue::Float(f) if f.is_finite() && f.fract() == 0.0 => {
            Ok(ProjectId::new(format!("{}", *f as i64)))
        }
        RawValue::Float(f) => Ok(ProjectId::new(f.to_string())),
    }
}

fn coerce_label(row: usize, field: &'static str, value: &RawValue) -> Result<String, SchemaError> {
    match value {
        RawValue::Null => Err(invalid(row, field, "label is null")),
        RawValue::String(s) => Ok(s.clone()),
        RawValue::Integer(i) => Ok(i.to_string()),
        // Keep the fractional marker so 3.0 and 3 stay distinct labels.
        RawValue::Float(f) => Ok(format!("{f:?}")),
    }
}

/// Participants and budgets: null is zero, floats truncate toward zero.
fn coerce_count(row: usize, field: &'static str, value: &RawValue) -> Result<u64, SchemaError> {
    let number = match value {
        RawValue::Null => return Ok(0),
        RawValue::Integer(i) => {
            return u64::try_from(*i).map_err(|_| invalid(row, field, format!("{i} is negative")));
        }
        RawValue::Float(f) => *f,
        RawValue::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return Ok(0);
            }
            if let Ok(i) = trimmed.parse::<i64>() {
                return u64::try_from(i)
                    .map_err(|_| invalid(row, field, format!("{i} is negative")));
            }
            trimmed
                .parse::<f64>()
                .map_err(|_| invalid(row, field, format!("{trimmed:?} is not a number")))?
        }
    };

    if !number.is_finite() {
        return Err(invalid(row, field, format!("{number} is not finite")));
    }
    let truncated = number.trunc();
    if truncated < 0.0 {
        return Err(invalid(row, field, format!("{number} is negative")));
    }
    Ok(truncated as u64)
}

/// Budgets must also fit the signed budget term of the objective.
fn coerce_budget(row: usize, value: &RawValue) -> Result<u64, SchemaError> {
    let budget = coerce_count(row, FIELD_BUDGET, value)?;
    if i64::try_from(budget).is_err() {
        return Err(invalid(row, FIELD_BUDGET, format!("{budget} exceeds {}", i64::MAX)));
    }
    Ok(budget)
}

fn coerce_rating(row: usize, value: &RawValue) -> Result<f64, SchemaError> {
    let rating = match value {
        RawValue::Null => 0.0,
        RawValue::Integer(i) => *i as f64,
        RawValue::Float(f) => *f,
        RawValue::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                0.0
            } else {
                trimmed
                    .parse::<f64>()
                    .map_err(|_| invalid(row, FIELD_RATING, format!("{trimmed:?} is not a number")))?
            }
        }
    };

    if !rating.is_finite() {
        return Err(invalid(row, FIELD_RATING, format!("{rating} is not finite")));
    }
    // Collapse -0.0 so equal ratings always compare equal under a total order.
    Ok(rating + 0.0)
}
