//! Score interpretation
//!
//! The model predicts on a 1-4 scale. Interpretation maps that onto the
//! 0-5 display range with `((raw - 1) / 3) × 5`.

use crate::features::FeatureVector;
use crate::model::{ModelCache, WellnessModel};
use serde::{Deserialize, Serialize};

pub const SCORE_MIN: f64 = 0.0;
pub const SCORE_MAX: f64 = 5.0;

/// Rescale a raw model output onto the display range, without clamping
pub fn rescale(raw: f64) -> f64 {
    ((raw - 1.0) / 3.0) * 5.0
}

/// Outcome of scoring one feature vector
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PredictionResult {
    Scored {
        /// First model output, as returned
        raw: f64,
        /// Display score
        score: f64,
        /// Rescaled value before clamping
        unclamped: f64,
    },
    /// No model, or the model failed; render no score
    ModelUnavailable { reason: String },
}

impl PredictionResult {
    pub fn score(&self) -> Option<f64> {
        match self {
            PredictionResult::Scored { score, .. } => Some(*score),
            PredictionResult::ModelUnavailable { .. } => None,
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, PredictionResult::Scored { .. })
    }

    /// Whole stars to show for the score
    pub fn star_count(&self) -> usize {
        self.score().map_or(0, |s| s.max(0.0).floor() as usize)
    }
}

/// Turns model output into display scores
#[derive(Debug, Clone, Copy)]
pub struct ScoreInterpreter {
    clamp: bool,
}

impl Default for ScoreInterpreter {
    fn default() -> Self {
        Self { clamp: true }
    }
}

impl ScoreInterpreter {
    pub fn new(clamp: bool) -> Self {
        Self { clamp }
    }

    /// Score a row with a model, if there is one
    pub fn interpret(
        &self,
        model: Option<&dyn WellnessModel>,
        features: &FeatureVector,
    ) -> PredictionResult {
        let Some(model) = model else {
            return PredictionResult::ModelUnavailable {
                reason: "no model loaded".to_string(),
            };
        };

        let raw = match model.predict(std::slice::from_ref(features)) {
            Ok(outputs) => match outputs.first() {
                Some(raw) => *raw,
                None => {
                    tracing::warn!(model = model.name(), "Model returned no predictions");
                    return PredictionResult::ModelUnavailable {
                        reason: "model returned no predictions".to_string(),
                    };
                }
            },
            Err(e) => {
                tracing::warn!(model = model.name(), error = %e, "Inference failed");
                return PredictionResult::ModelUnavailable {
                    reason: e.to_string(),
                };
            }
        };

        if !raw.is_finite() {
            tracing::warn!(model = model.name(), raw, "Model returned a non-finite prediction");
            return PredictionResult::ModelUnavailable {
                reason: "prediction is not finite".to_string(),
            };
        }

        let unclamped = rescale(raw);
        let score = if self.clamp {
            unclamped.clamp(SCORE_MIN, SCORE_MAX)
        } else {
            unclamped
        };

        tracing::debug!(model = model.name(), raw, score, "Wellness score computed");

        PredictionResult::Scored {
            raw,
            score,
            unclamped,
        }
    }

    /// Score a row with whatever the cache holds
    pub fn interpret_cached(&self, cache: &ModelCache, features: &FeatureVector) -> PredictionResult {
        match cache.get() {
            Ok(model) => self.interpret(Some(model.as_ref()), features),
            Err(e) => PredictionResult::ModelUnavailable {
                reason: e.to_string(),
            },
        }
    }
}
