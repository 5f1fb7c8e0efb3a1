//! Derived-feature computation shared by training and inference.
//!
//! The synthesizer and the scoring service both go through these functions.
//! The fitted models are only valid if both sides agree on every derived
//! value and on the feature-vector ordering, so that contract lives here and
//! nowhere else.

use crate::domain::Marital;

/// Purchasing-power multiplier applied to adjusted monthly income.
pub const INCOME_MULTIPLIER: f64 = 90.0;

/// Fixed monthly deduction for a married household.
const MARRIED_DEDUCTION: f64 = 400.0;
/// Fixed monthly deduction per child.
const KID_DEDUCTION: f64 = 300.0;
/// Adjusted income never drops below this floor.
const ADJUSTED_INCOME_FLOOR: f64 = 1_000.0;

pub const READINESS_DIM: usize = 9;
pub const LIKELIHOOD_DIM: usize = 11;
pub const PROPERTY_DIM: usize = 6;

/// Monthly income after marital/child deductions, floored at 1000.
pub fn adjusted_income(income: f64, marital: Marital, kids: u32) -> f64 {
    let deduction = match marital {
        Marital::Married => MARRIED_DEDUCTION,
        Marital::Single => 0.0,
    } + f64::from(kids) * KID_DEDUCTION;
    (income - deduction).max(ADJUSTED_INCOME_FLOOR)
}

/// Current purchasing power: scaled adjusted income plus equity on hand.
pub fn current_power(adjusted_income: f64, equity: f64) -> f64 {
    adjusted_income * INCOME_MULTIPLIER + equity
}

/// Projected purchasing power at the end of the financing horizon.
pub fn future_power(adjusted_income: f64, future_equity: f64) -> f64 {
    current_power(adjusted_income, future_equity)
}

/// Purchasing power relative to the target price; 0 when the target is unset.
pub fn coverage_ratio(power: f64, target: f64) -> f64 {
    if target > 0.0 { power / target } else { 0.0 }
}

/// Project equity forward with monthly compounding plus monthly savings.
///
/// The month count is truncated, not rounded: 4.9 years compounds 58 times,
/// never 59. The training labels bake this in, so inference must truncate the
/// same way.
pub fn simulate_future_equity(
    equity: f64,
    monthly_savings: f64,
    annual_rate_pct: f64,
    years: f64,
) -> f64 {
    let monthly_rate = annual_rate_pct / 100.0 / 12.0;
    let months = (years * 12.0) as u32;
    let mut value = equity;
    for _ in 0..months {
        value = value * (1.0 + monthly_rate) + monthly_savings;
    }
    value
}

/// Derived values for the readiness task, plus the model input vector.
#[derive(Debug, Clone, Copy)]
pub struct ReadinessFeatures {
    pub adjusted_income: f64,
    pub current_power: f64,
    pub ratio: f64,
    pub vector: [f64; READINESS_DIM],
}

pub fn readiness_features(
    income: f64,
    equity: f64,
    savings: f64,
    target: f64,
    marital: Marital,
    kids: u32,
) -> ReadinessFeatures {
    let adjusted = adjusted_income(income, marital, kids);
    let power = current_power(adjusted, equity);
    let ratio = coverage_ratio(power, target);
    ReadinessFeatures {
        adjusted_income: adjusted,
        current_power: power,
        ratio,
        vector: [
            income,
            equity,
            savings,
            target,
            marital.as_code(),
            f64::from(kids),
            adjusted,
            power,
            ratio,
        ],
    }
}

/// Derived values for the likelihood task, plus the model input vector.
#[derive(Debug, Clone, Copy)]
pub struct LikelihoodFeatures {
    pub adjusted_income: f64,
    pub future_equity: f64,
    pub future_power: f64,
    pub coverage: f64,
    pub vector: [f64; LIKELIHOOD_DIM],
}

#[allow(clippy::too_many_arguments)]
pub fn likelihood_features(
    income: f64,
    equity: f64,
    savings: f64,
    target: f64,
    years: f64,
    rate: f64,
    marital: Marital,
    kids: u32,
) -> LikelihoodFeatures {
    let adjusted = adjusted_income(income, marital, kids);
    let future_equity = simulate_future_equity(equity, savings, rate, years);
    let power = future_power(adjusted, future_equity);
    let coverage = coverage_ratio(power, target);
    LikelihoodFeatures {
        adjusted_income: adjusted,
        future_equity,
        future_power: power,
        coverage,
        vector: [
            income,
            equity,
            savings,
            target,
            years,
            rate,
            marital.as_code(),
            f64::from(kids),
            adjusted,
            future_equity,
            coverage,
        ],
    }
}

/// Model input vector for the property price task.
pub fn property_vector(
    sqm: f64,
    rooms: f64,
    bathrooms: f64,
    location_premium: f64,
    condition: f64,
    age: f64,
) -> [f64; PROPERTY_DIM] {
    [sqm, rooms, bathrooms, location_premium, condition, age]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn adjusted_income_applies_deductions_and_floor() {
        assert_eq!(adjusted_income(5_000.0, Marital::Married, 2), 4_000.0);
        assert_eq!(adjusted_income(5_000.0, Marital::Single, 0), 5_000.0);
        // 1200 - 400 - 900 would be negative; floored instead.
        assert_eq!(adjusted_income(1_200.0, Marital::Married, 3), 1_000.0);
    }

    #[test]
    fn coverage_ratio_handles_unset_target() {
        assert_eq!(coverage_ratio(410_000.0, 0.0), 0.0);
        assert_eq!(coverage_ratio(410_000.0, -5.0), 0.0);
        assert!((coverage_ratio(410_000.0, 350_000.0) - 410.0 / 350.0).abs() < 1e-12);
    }

    #[test]
    fn zero_interest_compounding_is_pure_saving() {
        // 12 monthly deposits of 100 at zero interest.
        assert_eq!(simulate_future_equity(0.0, 100.0, 0.0, 1.0), 1_200.0);
    }

    #[test]
    fn month_count_truncates() {
        // 0.99 years is 11 months, not 12.
        assert_eq!(simulate_future_equity(0.0, 100.0, 0.0, 0.99), 1_100.0);
    }

    #[test]
    fn compounding_grows_with_rate() {
        let flat = simulate_future_equity(10_000.0, 500.0, 0.0, 5.0);
        let compounded = simulate_future_equity(10_000.0, 500.0, 5.0, 5.0);
        assert_eq!(flat, 10_000.0 + 60.0 * 500.0);
        assert!(compounded > flat);
    }

    #[test]
    fn readiness_vector_ordering_is_fixed() {
        let f = readiness_features(5_000.0, 50_000.0, 800.0, 350_000.0, Marital::Married, 2);
        assert_eq!(f.adjusted_income, 4_000.0);
        assert_eq!(f.current_power, 410_000.0);
        assert_eq!(f.vector[0], 5_000.0);
        assert_eq!(f.vector[4], 1.0);
        assert_eq!(f.vector[5], 2.0);
        assert_eq!(f.vector[6], f.adjusted_income);
        assert_eq!(f.vector[7], f.current_power);
        assert_eq!(f.vector[8], f.ratio);
    }

    #[test]
    fn likelihood_vector_ordering_is_fixed() {
        let f = likelihood_features(
            5_000.0,
            50_000.0,
            800.0,
            350_000.0,
            5.0,
            5.0,
            Marital::Married,
            2,
        );
        assert_eq!(f.vector[4], 5.0);
        assert_eq!(f.vector[5], 5.0);
        assert_eq!(f.vector[8], f.adjusted_income);
        assert_eq!(f.vector[9], f.future_equity);
        assert_eq!(f.vector[10], f.coverage);
        assert_eq!(f.future_power, f.adjusted_income * INCOME_MULTIPLIER + f.future_equity);
    }
}
