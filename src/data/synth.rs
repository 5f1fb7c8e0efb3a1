//! Synthetic dataset generation for the three scoring tasks.
//!
//! All draws come from one `StdRng` seeded from the training config, in a
//! fixed order, so a given seed reproduces the exact same datasets across
//! processes. Labels are the analytic formulas plus Gaussian noise, clipped
//! to their valid range.
//!
//! The readiness and likelihood tasks share the same drawn households; the
//! likelihood task extends each with a financing horizon and savings rate.

use rand::prelude::*;
use rand::rngs::StdRng;
use rand_distr::Normal;

use crate::domain::bounds::{self, Interval};
use crate::domain::{Marital, TrainConfig};
use crate::error::ScoreError;
use crate::features;
use crate::models::analytic;

/// Label noise, in score points, for readiness and likelihood.
const SCORE_NOISE_SD: f64 = 2.0;
/// Property label noise as a fraction of the analytic price.
const PRICE_NOISE_FRAC: f64 = 0.05;

/// Raw (unexpanded) feature rows paired with labels for one task.
#[derive(Debug, Clone, PartialEq)]
pub struct TrainingDataset {
    pub rows: Vec<Vec<f64>>,
    pub labels: Vec<f64>,
}

impl TrainingDataset {
    fn with_capacity(n: usize) -> Self {
        Self {
            rows: Vec::with_capacity(n),
            labels: Vec::with_capacity(n),
        }
    }
}

/// The three datasets produced by one synthesis pass.
#[derive(Debug, PartialEq)]
pub struct SynthesizedData {
    pub readiness: TrainingDataset,
    pub likelihood: TrainingDataset,
    pub property: TrainingDataset,
}

/// Run one full synthesis pass.
pub fn synthesize(config: &TrainConfig) -> Result<SynthesizedData, ScoreError> {
    if config.sample_count == 0 {
        return Err(ScoreError::computation("sample count must be > 0"));
    }
    let n = config.sample_count;
    let mut rng = StdRng::seed_from_u64(config.seed);

    let score_noise = Normal::new(0.0, SCORE_NOISE_SD)
        .map_err(|e| ScoreError::computation(format!("noise distribution error: {e}")))?;
    let unit_noise = Normal::new(0.0, 1.0)
        .map_err(|e| ScoreError::computation(format!("noise distribution error: {e}")))?;

    // Shared household draws for the two financial tasks.
    let incomes = draw(&mut rng, bounds::INCOME, n);
    let equities = draw(&mut rng, bounds::EQUITY, n);
    let savings = draw(&mut rng, bounds::SAVINGS, n);
    let targets = draw(&mut rng, bounds::TARGET, n);
    let marital: Vec<Marital> = (0..n)
        .map(|_| {
            if rng.gen_range(0..2u8) == 1 {
                Marital::Married
            } else {
                Marital::Single
            }
        })
        .collect();
    let kids: Vec<u32> = (0..n).map(|_| rng.gen_range(0..5u32)).collect();

    let mut readiness = TrainingDataset::with_capacity(n);
    for i in 0..n {
        let f = features::readiness_features(
            incomes[i], equities[i], savings[i], targets[i], marital[i], kids[i],
        );
        let label =
            (analytic::readiness_score(f.ratio) + score_noise.sample(&mut rng)).clamp(0.0, 100.0);
        readiness.rows.push(f.vector.to_vec());
        readiness.labels.push(label);
    }

    let years = draw(&mut rng, bounds::YEARS, n);
    let rates = draw(&mut rng, bounds::RATE, n);

    let mut likelihood = TrainingDataset::with_capacity(n);
    for i in 0..n {
        let f = features::likelihood_features(
            incomes[i], equities[i], savings[i], targets[i], years[i], rates[i], marital[i],
            kids[i],
        );
        let label = (analytic::likelihood_score(f.coverage, f.future_power, targets[i], rates[i])
            + score_noise.sample(&mut rng))
        .clamp(analytic::LIKELIHOOD_MIN, analytic::LIKELIHOOD_MAX);
        likelihood.rows.push(f.vector.to_vec());
        likelihood.labels.push(label);
    }

    // Property draws. Location premium and condition are sampled as
    // continuous codes so the model learns the full 0..2 span; requests later
    // arrive at the integer codes.
    let sqm = draw(&mut rng, bounds::SQM, n);
    let rooms = draw(&mut rng, bounds::ROOMS, n);
    let bathrooms = draw(&mut rng, bounds::BATHROOMS, n);
    let premiums = draw(&mut rng, bounds::LOCATION_PREMIUM, n);
    let conditions = draw(&mut rng, bounds::CONDITION, n);
    let ages = draw(&mut rng, bounds::PROPERTY_AGE, n);

    let mut property = TrainingDataset::with_capacity(n);
    for i in 0..n {
        let truth = analytic::property_price(
            sqm[i],
            rooms[i],
            bathrooms[i],
            premiums[i],
            conditions[i],
            ages[i],
        );
        let label = (truth + unit_noise.sample(&mut rng) * truth * PRICE_NOISE_FRAC)
            .max(analytic::PRICE_FLOOR);
        property.rows.push(
            features::property_vector(
                sqm[i],
                rooms[i],
                bathrooms[i],
                premiums[i],
                conditions[i],
                ages[i],
            )
            .to_vec(),
        );
        property.labels.push(label);
    }

    Ok(SynthesizedData {
        readiness,
        likelihood,
        property,
    })
}

fn draw(rng: &mut StdRng, interval: Interval, n: usize) -> Vec<f64> {
    (0..n)
        .map(|_| rng.gen_range(interval.min..=interval.max))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::{LIKELIHOOD_DIM, PROPERTY_DIM, READINESS_DIM};

    fn small_config(seed: u64) -> TrainConfig {
        TrainConfig {
            sample_count: 200,
            seed,
        }
    }

    #[test]
    fn same_seed_reproduces_identical_datasets() {
        let a = synthesize(&small_config(42)).unwrap();
        let b = synthesize(&small_config(42)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn different_seeds_diverge() {
        let a = synthesize(&small_config(42)).unwrap();
        let b = synthesize(&small_config(43)).unwrap();
        assert_ne!(a.readiness.labels, b.readiness.labels);
    }

    #[test]
    fn row_dimensions_match_the_tasks() {
        let data = synthesize(&small_config(7)).unwrap();
        assert_eq!(data.readiness.rows.len(), 200);
        assert!(data.readiness.rows.iter().all(|r| r.len() == READINESS_DIM));
        assert!(
            data.likelihood
                .rows
                .iter()
                .all(|r| r.len() == LIKELIHOOD_DIM)
        );
        assert!(data.property.rows.iter().all(|r| r.len() == PROPERTY_DIM));
    }

    #[test]
    fn labels_stay_in_range_despite_noise() {
        let data = synthesize(&small_config(11)).unwrap();
        assert!(
            data.readiness
                .labels
                .iter()
                .all(|&l| (0.0..=100.0).contains(&l))
        );
        assert!(
            data.likelihood
                .labels
                .iter()
                .all(|&l| (analytic::LIKELIHOOD_MIN..=analytic::LIKELIHOOD_MAX).contains(&l))
        );
        assert!(data.property.labels.iter().all(|&l| l >= analytic::PRICE_FLOOR));
    }

    #[test]
    fn raw_inputs_respect_the_sampling_intervals() {
        let data = synthesize(&small_config(3)).unwrap();
        for row in &data.readiness.rows {
            assert!(bounds::INCOME.contains(row[0]));
            assert!(bounds::EQUITY.contains(row[1]));
            assert!(bounds::SAVINGS.contains(row[2]));
            assert!(bounds::TARGET.contains(row[3]));
            assert!(row[4] == 0.0 || row[4] == 1.0);
            assert!((0.0..=4.0).contains(&row[5]));
        }
        for row in &data.likelihood.rows {
            assert!(bounds::YEARS.contains(row[4]));
            assert!(bounds::RATE.contains(row[5]));
        }
    }

    #[test]
    fn households_are_shared_between_financial_tasks() {
        let data = synthesize(&small_config(5)).unwrap();
        for (r, l) in data.readiness.rows.iter().zip(data.likelihood.rows.iter()) {
            // income, equity, savings, target match position for position.
            assert_eq!(r[0], l[0]);
            assert_eq!(r[1], l[1]);
            assert_eq!(r[2], l[2]);
            assert_eq!(r[3], l[3]);
        }
    }

    #[test]
    fn zero_sample_count_is_rejected() {
        let config = TrainConfig {
            sample_count: 0,
            seed: 42,
        };
        assert!(synthesize(&config).is_err());
    }
}
