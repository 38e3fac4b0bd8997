//! End-to-end wellness evaluation
//!
//! Runs validation, the metric calculator, feature assembly and score
//! interpretation in sequence for one profile. Each step takes and
//! returns plain data; the model cache is the only state kept between
//! calls.

use crate::calculator::{ActivityLookup, MetricCalculator};
use crate::config::AppConfig;
use crate::error::{HealthError, Result};
use crate::features::{FeatureAssembler, FeatureVector};
use crate::model::{ModelCache, WellnessModel};
use crate::models::{DerivedMetrics, HealthLabels, UserProfile};
use crate::scoring::{PredictionResult, ScoreInterpreter};
use crate::validation::ProfileValidator;
use serde::Serialize;
use std::fs;
use std::path::Path;
use std::sync::Arc;

/// Everything produced for one profile
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Evaluation {
    pub metrics: DerivedMetrics,
    pub labels: HealthLabels,
    pub features: FeatureVector,
    pub prediction: PredictionResult,
}

/// Evaluates profiles against a cached wellness model
pub struct WellnessEvaluator {
    lookup: ActivityLookup,
    interpreter: ScoreInterpreter,
    models: ModelCache,
}

impl WellnessEvaluator {
    /// Evaluator whose model loads from the configured artifact on first use
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            lookup: config.calculator.activity_lookup,
            interpreter: ScoreInterpreter::new(config.model.clamp_score),
            models: ModelCache::new(&config.model.path),
        }
    }

    /// Evaluator using an already constructed model
    pub fn with_model(model: Arc<dyn WellnessModel>) -> Self {
        Self {
            lookup: ActivityLookup::default(),
            interpreter: ScoreInterpreter::default(),
            models: ModelCache::with_model(model),
        }
    }

    pub fn with_activity_lookup(mut self, lookup: ActivityLookup) -> Self {
        self.lookup = lookup;
        self
    }

    pub fn with_interpreter(mut self, interpreter: ScoreInterpreter) -> Self {
        self.interpreter = interpreter;
        self
    }

    pub fn model_cache(&self) -> &ModelCache {
        &self.models
    }

    /// Evaluate a profile
    ///
    /// # Errors
    /// Returns a validation error for out-of-range input. A missing or
    /// failing model is not an error; it shows up as
    /// [`PredictionResult::ModelUnavailable`].
    pub fn evaluate(&self, profile: &UserProfile) -> Result<Evaluation> {
        let span = tracing::debug_span!("evaluate", age = profile.age, goal = ?profile.goal);
        let _guard = span.enter();

        ProfileValidator::validate(profile)?;

        let metrics = MetricCalculator::derive(profile, self.lookup)?;
        let labels = MetricCalculator::labels(profile, &metrics);
        let features = FeatureAssembler::assemble(profile, &metrics);
        let prediction = self.interpreter.interpret_cached(&self.models, &features);

        Ok(Evaluation {
            metrics,
            labels,
            features,
            prediction,
        })
    }
}

/// Read a profile from a JSON or TOML file
///
/// Missing required fields are reported as validation errors rather than
/// parse errors.
pub fn load_profile(path: &Path) -> Result<UserProfile> {
    let content = fs::read_to_string(path)?;

    let is_toml = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map_or(false, |ext| ext.eq_ignore_ascii_case("toml"));

    let value: serde_json::Value = if is_toml {
        toml::from_str(&content).map_err(|e| {
            HealthError::Configuration(format!("Invalid profile {}: {}", path.display(), e))
        })?
    } else {
        serde_json::from_str(&content).map_err(|e| {
            HealthError::Configuration(format!("Invalid profile {}: {}", path.display(), e))
        })?
    };

    ProfileValidator::check_required_fields(&value)?;
    ProfileValidator::check_raw_ranges(&value)?;

    serde_json::from_value(value).map_err(|e| {
        HealthError::Configuration(format!("Invalid profile {}: {}", path.display(), e))
    })
}
