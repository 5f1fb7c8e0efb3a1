//! Exact generative formulas behind the synthetic datasets.
//!
//! The synthesizer adds Gaussian noise on top of these values to build
//! training labels; the scoring service calls them directly when a request
//! falls outside the training domain. Both uses must agree on every constant,
//! so the formulas live here and nowhere else.

/// Steepness of the likelihood logistic in coverage space.
const LOGISTIC_SLOPE: f64 = 10.0;
/// Coverage level at which the logistic crosses 50.
const LOGISTIC_MIDPOINT: f64 = 0.85;

pub const LIKELIHOOD_MIN: f64 = 10.0;
pub const LIKELIHOOD_MAX: f64 = 98.0;

/// Minimum property price in euros.
pub const PRICE_FLOOR: f64 = 50_000.0;

const BASE_PRICE_PER_SQM: f64 = 3_500.0;
const LOCATION_PREMIUM_STEP: f64 = 2_000.0;
const CONDITION_STEP: f64 = 0.15;
/// Age at which the depreciation factor reaches zero.
const FULL_DEPRECIATION_AGE: f64 = 200.0;
const ROOM_BONUS: f64 = 5_000.0;
const BATHROOM_BONUS: f64 = 8_000.0;

/// Readiness score from the coverage ratio: 100 once the target is covered,
/// quadratic below that.
pub fn readiness_score(ratio: f64) -> f64 {
    if ratio >= 1.0 {
        100.0
    } else {
        (100.0 * ratio * ratio).clamp(0.0, 100.0)
    }
}

/// Likelihood score before clipping.
///
/// Logistic in coverage, floored at [`LIKELIHOOD_MIN`], forced to 98 once the
/// projected power covers the target, then shifted by the risk tier. Callers
/// clamp to `[LIKELIHOOD_MIN, LIKELIHOOD_MAX]`: the synthesizer after noise
/// injection, the fallback path directly. Clamping here instead would distort
/// the label distribution near the 98 cap.
pub fn likelihood_score(coverage: f64, future_power: f64, target: f64, rate: f64) -> f64 {
    let mut likelihood =
        100.0 / (1.0 + (-LOGISTIC_SLOPE * (coverage - LOGISTIC_MIDPOINT)).exp());
    likelihood = likelihood.max(LIKELIHOOD_MIN);
    if future_power >= target {
        likelihood = 98.0;
    }
    likelihood + risk_adjustment(rate)
}

/// Savings-plan risk tiers: conservative plans (< 3.5%) are more predictable
/// and earn +5, aggressive ones (> 6.5%) are more volatile and pay −5.
pub fn risk_adjustment(rate: f64) -> f64 {
    if rate < 3.5 {
        5.0
    } else if rate > 6.5 {
        -5.0
    } else {
        0.0
    }
}

/// Analytic property price before noise and floor.
pub fn property_price(
    sqm: f64,
    rooms: f64,
    bathrooms: f64,
    location_premium: f64,
    condition: f64,
    age: f64,
) -> f64 {
    let price_per_sqm = BASE_PRICE_PER_SQM + location_premium * LOCATION_PREMIUM_STEP;
    let condition_factor = 1.0 + condition * CONDITION_STEP;
    let age_factor = (1.0 - age / FULL_DEPRECIATION_AGE).max(0.0);
    sqm * price_per_sqm * condition_factor * age_factor
        + rooms * ROOM_BONUS
        + bathrooms * BATHROOM_BONUS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn readiness_plateaus_at_full_coverage() {
        assert_eq!(readiness_score(1.0), 100.0);
        assert_eq!(readiness_score(1.5), 100.0);
        assert_eq!(readiness_score(0.0), 0.0);
    }

    #[test]
    fn readiness_is_quadratic_below_coverage() {
        assert!((readiness_score(0.4) - 16.0).abs() < 1e-9);
        assert!((readiness_score(0.9) - 81.0).abs() < 1e-9);
    }

    #[test]
    fn readiness_never_decreases_in_ratio() {
        let mut prev = readiness_score(0.0);
        for i in 1..=30 {
            let next = readiness_score(i as f64 * 0.05);
            assert!(next >= prev);
            prev = next;
        }
    }

    #[test]
    fn likelihood_forces_98_on_full_coverage() {
        // Coverage ≥ 1 always implies future_power ≥ target.
        let score = likelihood_score(1.2, 480_000.0, 400_000.0, 5.0);
        assert_eq!(score, 98.0);
    }

    #[test]
    fn likelihood_risk_tiers_shift_the_score() {
        let base = likelihood_score(0.85, 340_000.0, 400_000.0, 5.0);
        let conservative = likelihood_score(0.85, 340_000.0, 400_000.0, 2.5);
        let aggressive = likelihood_score(0.85, 340_000.0, 400_000.0, 7.5);
        assert!((base - 50.0).abs() < 1e-9);
        assert!((conservative - base - 5.0).abs() < 1e-9);
        assert!((base - aggressive - 5.0).abs() < 1e-9);
    }

    #[test]
    fn likelihood_floor_applies_before_risk_adjustment() {
        // Deep under-coverage with an aggressive plan dips below 10 until the
        // caller clamps.
        let score = likelihood_score(0.1, 40_000.0, 400_000.0, 7.5);
        assert_eq!(score, 5.0);
        assert_eq!(score.clamp(LIKELIHOOD_MIN, LIKELIHOOD_MAX), 10.0);
    }

    #[test]
    fn property_price_matches_hand_computation() {
        // 80 sqm, city (premium 1), good condition (1), 10 years old:
        // 80 · 5500 · 1.15 · 0.95 + 2·5000 + 1·8000 = 498 700.
        let price = property_price(80.0, 2.0, 1.0, 1.0, 1.0, 10.0);
        assert!((price - 498_700.0).abs() < 1e-6);
    }

    #[test]
    fn property_age_factor_bottoms_out_at_zero() {
        let ancient = property_price(100.0, 3.0, 1.0, 1.0, 1.0, 400.0);
        assert_eq!(ancient, 3.0 * 5_000.0 + 8_000.0);
    }
}
