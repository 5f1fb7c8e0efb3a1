//! Scoring orchestration.
//!
//! One service object owns the three fitted models and answers every
//! prediction; the HTTP layer and the tests both drive this module, never the
//! models directly.
//!
//! Concurrency discipline: readers take a wait-free snapshot of the current
//! [`ModelSet`] through `ArcSwap`, so a request sees either entirely the old
//! or entirely the new set. Retraining builds a complete replacement off to
//! the side and swaps it in atomically; a mutex serializes retrains against
//! each other.

use std::sync::{Arc, Mutex};

use arc_swap::ArcSwap;

use crate::data::synth;
use crate::domain::bounds;
use crate::domain::{
    LikelihoodPrediction, PropertyInputs, PurchaseInputs, PurchasePrediction,
    ReadinessPrediction, TrainConfig,
};
use crate::error::ScoreError;
use crate::features;
use crate::models::analytic;
use crate::models::{FeatureMap, LinearModel};

/// The three fitted models, always replaced as a unit.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelSet {
    pub readiness: LinearModel,
    pub likelihood: LinearModel,
    pub property: LinearModel,
}

/// Training-set fit quality, logged after every (re)train.
#[derive(Debug, Clone, Copy)]
pub struct FitReport {
    pub readiness_r2: f64,
    pub likelihood_r2: f64,
    pub property_r2: f64,
}

pub struct ScoringService {
    config: TrainConfig,
    models: ArcSwap<ModelSet>,
    retrain_lock: Mutex<()>,
}

impl ScoringService {
    /// Synthesize datasets and fit all three models.
    ///
    /// Construction fails rather than yielding a service with a missing or
    /// partially fitted model; once a `ScoringService` exists, every task is
    /// servable.
    pub fn train(config: TrainConfig) -> Result<Self, ScoreError> {
        let (set, report) = build_models(&config)?;
        log_fit_report(&report);
        Ok(Self {
            config,
            models: ArcSwap::from_pointee(set),
            retrain_lock: Mutex::new(()),
        })
    }

    /// Rebuild all three models from a fresh synthesis pass and swap them in.
    ///
    /// Predictions issued while this runs keep using the previous set. With
    /// an unchanged seed the rebuilt coefficients are bit-for-bit identical.
    pub fn retrain(&self) -> Result<(), ScoreError> {
        let _guard = self
            .retrain_lock
            .lock()
            .map_err(|_| ScoreError::computation("retrain lock poisoned"))?;
        let (set, report) = build_models(&self.config)?;
        log_fit_report(&report);
        self.models.store(Arc::new(set));
        Ok(())
    }

    /// Readiness score and current purchasing power.
    pub fn predict_readiness(
        &self,
        inputs: &PurchaseInputs,
    ) -> Result<ReadinessPrediction, ScoreError> {
        validate_target(inputs)?;
        readiness_with(&self.models.load_full(), inputs)
    }

    /// Likelihood score and projected equity at the end of the horizon.
    pub fn predict_likelihood(
        &self,
        inputs: &PurchaseInputs,
    ) -> Result<LikelihoodPrediction, ScoreError> {
        validate_target(inputs)?;
        likelihood_with(&self.models.load_full(), inputs)
    }

    /// Readiness and likelihood for one purchase scenario, computed against a
    /// single model snapshot.
    pub fn predict_purchase(
        &self,
        inputs: &PurchaseInputs,
    ) -> Result<PurchasePrediction, ScoreError> {
        validate_target(inputs)?;
        let models = self.models.load_full();
        let readiness = readiness_with(&models, inputs)?;
        let likelihood = likelihood_with(&models, inputs)?;
        Ok(PurchasePrediction {
            readiness: readiness.readiness,
            likelihood: likelihood.likelihood,
            current_power: readiness.current_power,
            future_equity: likelihood.future_equity,
        })
    }

    /// Property price in euros, floored at the market minimum.
    ///
    /// No bounds check here: the property model is the only path, with
    /// categorical inputs collapsed to their integer codes first.
    pub fn predict_property_price(&self, inputs: &PropertyInputs) -> Result<i64, ScoreError> {
        if inputs.sqm <= 0.0 {
            return Err(ScoreError::validation(
                "square meters must be greater than 0",
            ));
        }
        if inputs.rooms < 0.0 || inputs.bathrooms < 0.0 {
            return Err(ScoreError::validation(
                "rooms and bathrooms must be non-negative",
            ));
        }
        let models = self.models.load_full();
        let vector = features::property_vector(
            inputs.sqm,
            inputs.rooms,
            inputs.bathrooms,
            inputs.location_code(),
            inputs.condition_code(),
            inputs.age(),
        );
        let price = models.property.predict(&vector)?.max(analytic::PRICE_FLOOR);
        Ok(price as i64)
    }

    /// Snapshot of the current model set, for diagnostics and tests.
    pub fn model_snapshot(&self) -> Arc<ModelSet> {
        self.models.load_full()
    }
}

fn validate_target(inputs: &PurchaseInputs) -> Result<(), ScoreError> {
    if inputs.target <= 0.0 {
        return Err(ScoreError::validation("target must be greater than 0"));
    }
    Ok(())
}

fn readiness_with(
    models: &ModelSet,
    inputs: &PurchaseInputs,
) -> Result<ReadinessPrediction, ScoreError> {
    let rf = features::readiness_features(
        inputs.income,
        inputs.equity,
        inputs.savings,
        inputs.target,
        inputs.marital,
        inputs.kids,
    );
    // The polynomial fit extrapolates badly outside the sampled ranges; out
    // of domain, score straight from the generative formula.
    let readiness = if bounds::readiness_in_domain(inputs) {
        models.readiness.predict(&rf.vector)?.clamp(0.0, 100.0)
    } else {
        analytic::readiness_score(rf.ratio)
    };
    Ok(ReadinessPrediction {
        readiness: readiness as i64,
        current_power: rf.current_power as i64,
    })
}

fn likelihood_with(
    models: &ModelSet,
    inputs: &PurchaseInputs,
) -> Result<LikelihoodPrediction, ScoreError> {
    let lf = features::likelihood_features(
        inputs.income,
        inputs.equity,
        inputs.savings,
        inputs.target,
        inputs.years,
        inputs.rate,
        inputs.marital,
        inputs.kids,
    );
    let likelihood = if bounds::likelihood_in_domain(inputs) {
        models.likelihood.predict(&lf.vector)?
    } else {
        analytic::likelihood_score(lf.coverage, lf.future_power, inputs.target, inputs.rate)
    }
    .clamp(analytic::LIKELIHOOD_MIN, analytic::LIKELIHOOD_MAX);
    Ok(LikelihoodPrediction {
        likelihood: likelihood as i64,
        future_equity: lf.future_equity as i64,
    })
}

fn build_models(config: &TrainConfig) -> Result<(ModelSet, FitReport), ScoreError> {
    let data = synth::synthesize(config)?;

    let readiness = LinearModel::fit(&data.readiness.rows, &data.readiness.labels, FeatureMap::Poly2)?;
    let likelihood = LinearModel::fit(
        &data.likelihood.rows,
        &data.likelihood.labels,
        FeatureMap::Identity,
    )?;
    let property = LinearModel::fit(
        &data.property.rows,
        &data.property.labels,
        FeatureMap::Identity,
    )?;

    let report = FitReport {
        readiness_r2: readiness.r_squared(&data.readiness.rows, &data.readiness.labels)?,
        likelihood_r2: likelihood.r_squared(&data.likelihood.rows, &data.likelihood.labels)?,
        property_r2: property.r_squared(&data.property.rows, &data.property.labels)?,
    };

    // The datasets are dropped here; only the fitted coefficients survive.
    Ok((
        ModelSet {
            readiness,
            likelihood,
            property,
        },
        report,
    ))
}

fn log_fit_report(report: &FitReport) {
    tracing::info!(
        "models trained (r² readiness {:.4}, likelihood {:.4}, property {:.4})",
        report.readiness_r2,
        report.likelihood_r2,
        report.property_r2
    );
}
