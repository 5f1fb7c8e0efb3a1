//! Shared domain types.

use serde::{Deserialize, Serialize};

/// Year against which a property's age is computed.
pub const REFERENCE_YEAR: i32 = 2025;

/// Default seed for synthetic dataset generation.
pub const DEFAULT_SEED: u64 = 42;

/// Number of synthetic samples drawn per task.
pub const SAMPLE_COUNT: usize = 1000;

/// Marital status as submitted by the front-end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Marital {
    #[default]
    Single,
    Married,
}

impl Marital {
    /// Numeric code used in feature vectors (single = 0, married = 1).
    pub fn as_code(self) -> f64 {
        match self {
            Marital::Single => 0.0,
            Marital::Married => 1.0,
        }
    }
}

/// Raw inputs for the readiness and likelihood tasks.
///
/// The readiness task ignores `years` and `rate`; the likelihood task uses
/// every field.
#[derive(Debug, Clone, Copy)]
pub struct PurchaseInputs {
    pub income: f64,
    pub equity: f64,
    pub savings: f64,
    pub target: f64,
    pub years: f64,
    pub rate: f64,
    pub marital: Marital,
    pub kids: u32,
}

/// Raw inputs for the property price task.
///
/// `location` and `condition` arrive as free-form strings from the front-end;
/// unmatched values map to the mid code (city / good).
#[derive(Debug, Clone)]
pub struct PropertyInputs {
    pub sqm: f64,
    pub rooms: f64,
    pub bathrooms: f64,
    pub location: String,
    pub condition: String,
    pub year_built: i32,
}

impl PropertyInputs {
    /// Location premium code: rural = 0, city = 1, premium = 2.
    pub fn location_code(&self) -> f64 {
        match self.location.as_str() {
            "rural" => 0.0,
            "premium" => 2.0,
            _ => 1.0,
        }
    }

    /// Condition code: renovation = 0, good = 1, new = 2.
    pub fn condition_code(&self) -> f64 {
        match self.condition.as_str() {
            "renovation" => 0.0,
            "new" => 2.0,
            _ => 1.0,
        }
    }

    /// Property age in years, never negative.
    pub fn age(&self) -> f64 {
        (REFERENCE_YEAR - self.year_built).max(0) as f64
    }
}

/// Synthesis and fitting configuration.
#[derive(Debug, Clone, Copy)]
pub struct TrainConfig {
    pub sample_count: usize,
    pub seed: u64,
}

impl Default for TrainConfig {
    fn default() -> Self {
        Self {
            sample_count: SAMPLE_COUNT,
            seed: DEFAULT_SEED,
        }
    }
}

/// Readiness score with its companion derived value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadinessPrediction {
    /// Readiness score in [0, 100].
    pub readiness: i64,
    pub current_power: i64,
}

/// Likelihood score with its companion derived value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LikelihoodPrediction {
    /// Likelihood score in [10, 98].
    pub likelihood: i64,
    pub future_equity: i64,
}

/// Output of the combined purchase prediction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PurchasePrediction {
    /// Readiness score in [0, 100].
    pub readiness: i64,
    /// Likelihood score in [10, 98].
    pub likelihood: i64,
    pub current_power: i64,
    pub future_equity: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn categorical_codes_default_to_mid() {
        let inputs = PropertyInputs {
            sqm: 100.0,
            rooms: 3.0,
            bathrooms: 1.0,
            location: "downtown".to_string(),
            condition: "fixer-upper".to_string(),
            year_built: 2000,
        };
        assert_eq!(inputs.location_code(), 1.0);
        assert_eq!(inputs.condition_code(), 1.0);
    }

    #[test]
    fn known_categories_map_to_their_codes() {
        let mut inputs = PropertyInputs {
            sqm: 100.0,
            rooms: 3.0,
            bathrooms: 1.0,
            location: "rural".to_string(),
            condition: "new".to_string(),
            year_built: 2000,
        };
        assert_eq!(inputs.location_code(), 0.0);
        assert_eq!(inputs.condition_code(), 2.0);
        inputs.location = "premium".to_string();
        inputs.condition = "renovation".to_string();
        assert_eq!(inputs.location_code(), 2.0);
        assert_eq!(inputs.condition_code(), 0.0);
    }

    #[test]
    fn age_is_clamped_at_zero_for_future_builds() {
        let inputs = PropertyInputs {
            sqm: 100.0,
            rooms: 3.0,
            bathrooms: 1.0,
            location: "city".to_string(),
            condition: "good".to_string(),
            year_built: REFERENCE_YEAR + 3,
        };
        assert_eq!(inputs.age(), 0.0);
    }

    #[test]
    fn marital_deserializes_lowercase() {
        let m: Marital = serde_json::from_str("\"married\"").unwrap();
        assert_eq!(m, Marital::Married);
        assert_eq!(m.as_code(), 1.0);
        assert_eq!(Marital::default(), Marital::Single);
    }
}
