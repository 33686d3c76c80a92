use serde::{Deserialize, Serialize};
use thiserror::Error;

/// State ceiling used when the caller does not pick one.
pub const DEFAULT_MAX_STATES: usize = 200_000;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigurationError {
    #[error("max_states must be positive")]
    ZeroMaxStates,
    #[error("{name} must lie in [0, 1], got {value}")]
    DiversityFactorOutOfRange { name: &'static str, value: f64 },
    #[error("candidate {id} does not fit a profile of {themes} themes and {countries} countries")]
    ProfileMismatch {
        id: String,
        themes: usize,
        countries: usize,
    },
}

// Serializable, comparable, explicit defaults.
// Budgets are unsigned, so a negative cap is rejected when the config is parsed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectionConfig {
    pub max_budget: u64,
    pub theme_diversity_factor: f64,
    pub country_diversity_factor: f64,
    #[serde(default = "default_max_states")]
    pub max_states: usize,
}

fn default_max_states() -> usize {
    DEFAULT_MAX_STATES
}

impl SelectionConfig {
    pub fn new(max_budget: u64, theme_diversity_factor: f64, country_diversity_factor: f64) -> Self {
        Self {
            max_budget,
            theme_diversity_factor,
            country_diversity_factor,
            max_states: DEFAULT_MAX_STATES,
        }
    }

    pub fn with_max_states(mut self, max_states: usize) -> Self {
        self.max_states = max_states;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if self.max_states == 0 {
            return Err(ConfigurationError::ZeroMaxStates);
        }
        check_factor("theme_diversity_factor", self.theme_diversity_factor)?;
        check_factor("country_diversity_factor", self.country_diversity_factor)?;
        Ok(())
    }
}

fn check_factor(name: &'static str, value: f64) -> Result<(), ConfigurationError> {
    // NaN fails the range check too.
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigurationError::DiversityFactorOutOfRange { name, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_uses_default_ceiling() {
        let config = SelectionConfig::new(9_700, 0.8, 0.95);
        assert_eq!(config.max_states, DEFAULT_MAX_STATES);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn zero_ceiling_is_rejected() {
        let config = SelectionConfig::new(100, 1.0, 1.0).with_max_states(0);
        assert_eq!(config.validate(), Err(ConfigurationError::ZeroMaxStates));
    }

    #[test]
    fn factors_outside_unit_interval_are_rejected() {
        let config = SelectionConfig::new(100, 1.5, 1.0);
        assert!(matches!(
            config.validate(),
            Err(ConfigurationError::DiversityFactorOutOfRange { name: "theme_diversity_factor", .. })
        ));

        let config = SelectionConfig::new(100, 1.0, f64::NAN);
        assert!(matches!(
            config.validate(),
            Err(ConfigurationError::DiversityFactorOutOfRange { name: "country_diversity_factor", .. })
        ));
    }

    #[test]
    fn negative_budget_fails_to_parse() {
        let json = r#"{"max_budget": -5, "theme_diversity_factor": 1.0, "country_diversity_factor": 1.0}"#;
        assert!(serde_json::from_str::<SelectionConfig>(json).is_err());
    }

    #[test]
    fn missing_ceiling_parses_to_default() {
        let json = r#"{"max_budget": 5, "theme_diversity_factor": 1.0, "country_diversity_factor": 1.0}"#;
        let config: SelectionConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.max_states, DEFAULT_MAX_STATES);
    }
}
