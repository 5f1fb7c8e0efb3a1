//! Training-domain bounds.
//!
//! The closed intervals below are the ranges the synthesizer draws from. The
//! scoring service consults the same constants to decide whether a request
//! may use the fitted models: outside these intervals the fit has never seen
//! data and extrapolates unreliably, so predictions fall back to the analytic
//! formulas instead. Sampling and checking must share these exact constants.

use crate::domain::PurchaseInputs;

/// A closed interval `[min, max]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval {
    pub min: f64,
    pub max: f64,
}

impl Interval {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn contains(self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

pub const INCOME: Interval = Interval::new(2_000.0, 15_000.0);
pub const EQUITY: Interval = Interval::new(0.0, 200_000.0);
pub const SAVINGS: Interval = Interval::new(0.0, 2_000.0);
pub const TARGET: Interval = Interval::new(100_000.0, 800_000.0);
pub const YEARS: Interval = Interval::new(1.0, 15.0);
pub const RATE: Interval = Interval::new(2.0, 8.0);

pub const SQM: Interval = Interval::new(50.0, 250.0);
pub const ROOMS: Interval = Interval::new(1.0, 6.0);
pub const BATHROOMS: Interval = Interval::new(1.0, 4.0);
pub const LOCATION_PREMIUM: Interval = Interval::new(0.0, 2.0);
pub const CONDITION: Interval = Interval::new(0.0, 2.0);
pub const PROPERTY_AGE: Interval = Interval::new(0.0, 100.0);

/// Whether the readiness model may be used for these inputs.
///
/// Only income, equity and target gate the readiness fit; savings, marital
/// status and kids enter the feature vector but are not part of the domain
/// gate.
pub fn readiness_in_domain(inputs: &PurchaseInputs) -> bool {
    INCOME.contains(inputs.income)
        && EQUITY.contains(inputs.equity)
        && TARGET.contains(inputs.target)
}

/// Whether the likelihood model may be used for these inputs.
pub fn likelihood_in_domain(inputs: &PurchaseInputs) -> bool {
    readiness_in_domain(inputs)
        && YEARS.contains(inputs.years)
        && RATE.contains(inputs.rate)
}
