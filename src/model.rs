//! Wellness model capability, artifact loading and caching
//!
//! The regression model is external. Anything that can turn feature rows
//! into raw scores implements [`WellnessModel`]; the bundled artifact
//! format is a linear model stored as JSON:
//!
//! ```json
//! {
//!   "name": "wellness-linear",
//!   "version": "1",
//!   "intercept": 1.2,
//!   "coefficients": { "BMI": -0.02, "Water_Intake (liters)": 0.15 }
//! }
//! ```
//!
//! Columns missing from `coefficients` contribute nothing.

use crate::error::ModelError;
use crate::features::{is_known_feature, FeatureVector};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};

/// Opaque prediction capability
pub trait WellnessModel: Send + Sync {
    /// Short name for logs and reports
    fn name(&self) -> &str;

    /// One raw score per input row
    fn predict(&self, rows: &[FeatureVector]) -> Result<Vec<f64>, ModelError>;
}

/// Linear regression over named feature columns
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearModel {
    pub name: String,

    #[serde(default)]
    pub version: String,

    pub intercept: f64,

    pub coefficients: HashMap<String, f64>,
}

impl LinearModel {
    pub fn new(name: impl Into<String>, intercept: f64) -> Self {
        Self {
            name: name.into(),
            version: String::new(),
            intercept,
            coefficients: HashMap::new(),
        }
    }

    /// Add a coefficient for a column
    pub fn with_coefficient(mut self, feature: impl Into<String>, weight: f64) -> Self {
        self.coefficients.insert(feature.into(), weight);
        self
    }

    /// Check every coefficient names a known column and is finite
    pub fn validate_schema(&self) -> Result<(), ModelError> {
        if !self.intercept.is_finite() {
            return Err(ModelError::Malformed {
                reason: "intercept is not finite".to_string(),
            });
        }

        for (feature, weight) in &self.coefficients {
            if !is_known_feature(feature) {
                return Err(ModelError::UnknownFeature {
                    feature: feature.clone(),
                });
            }
            if !weight.is_finite() {
                return Err(ModelError::Malformed {
                    reason: format!("coefficient for {} is not finite", feature),
                });
            }
        }

        Ok(())
    }

    fn predict_row(&self, row: &FeatureVector) -> f64 {
        self.coefficients
            .iter()
            .map(|(feature, weight)| weight * row.get(feature).unwrap_or(0.0))
            .sum::<f64>()
            + self.intercept
    }
}

impl WellnessModel for LinearModel {
    fn name(&self) -> &str {
        &self.name
    }

    fn predict(&self, rows: &[FeatureVector]) -> Result<Vec<f64>, ModelError> {
        rows.iter()
            .map(|row| {
                let raw = self.predict_row(row);
                if raw.is_finite() {
                    Ok(raw)
                } else {
                    Err(ModelError::Inference {
                        reason: "prediction is not finite".to_string(),
                    })
                }
            })
            .collect()
    }
}

/// A model read from disk, with the artifact's SHA-256 fingerprint
pub struct LoadedModel {
    pub model: Arc<dyn WellnessModel>,
    pub path: PathBuf,
    pub fingerprint: String,
}

/// Reads model artifacts from the filesystem
pub struct ModelLoader;

impl ModelLoader {
    /// Load and validate a linear model artifact
    pub fn load(path: &Path) -> Result<LoadedModel, ModelError> {
        if !path.exists() {
            return Err(ModelError::NotFound {
                path: path.to_path_buf(),
            });
        }

        let bytes = fs::read(path).map_err(|e| ModelError::Unreadable {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let fingerprint = format!("{:x}", Sha256::digest(&bytes));

        let model: LinearModel =
            serde_json::from_slice(&bytes).map_err(|e| ModelError::Malformed {
                reason: e.to_string(),
            })?;
        model.validate_schema()?;

        tracing::info!(
            path = %path.display(),
            model = %model.name,
            version = %model.version,
            coefficients = model.coefficients.len(),
            sha256 = %fingerprint,
            "Wellness model loaded"
        );

        Ok(LoadedModel {
            model: Arc::new(model),
            path: path.to_path_buf(),
            fingerprint,
        })
    }
}

struct CachedModel {
    model: Arc<dyn WellnessModel>,
    fingerprint: Option<String>,
}

/// Single-assignment model cache
///
/// The first call to [`ModelCache::get`] loads the artifact; the outcome,
/// success or failure, is kept for the lifetime of the cache.
pub struct ModelCache {
    path: PathBuf,
    cell: OnceLock<Result<CachedModel, ModelError>>,
}

impl ModelCache {
    /// Cache that loads from `path` on first use
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            cell: OnceLock::new(),
        }
    }

    /// Cache already holding a model, for injected or in-memory models
    pub fn with_model(model: Arc<dyn WellnessModel>) -> Self {
        Self {
            path: PathBuf::new(),
            cell: OnceLock::from(Ok(CachedModel {
                model,
                fingerprint: None,
            })),
        }
    }

    /// Artifact path this cache loads from
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether a load has been attempted
    pub fn is_initialized(&self) -> bool {
        self.cell.get().is_some()
    }

    /// SHA-256 of the loaded artifact; `None` before loading, after a
    /// failed load, or for injected models
    pub fn fingerprint(&self) -> Option<&str> {
        match self.cell.get() {
            Some(Ok(cached)) => cached.fingerprint.as_deref(),
            _ => None,
        }
    }

    /// The cached model, loading it on first use
    pub fn get(&self) -> Result<Arc<dyn WellnessModel>, ModelError> {
        self.cell
            .get_or_init(|| match ModelLoader::load(&self.path) {
                Ok(loaded) => Ok(CachedModel {
                    model: loaded.model,
                    fingerprint: Some(loaded.fingerprint),
                }),
                Err(e) => {
                    tracing::warn!(
                        path = %self.path.display(),
                        error = %e,
                        "Wellness model unavailable, scores will be omitted"
                    );
                    Err(e)
                }
            })
            .as_ref()
            .map(|cached| Arc::clone(&cached.model))
            .map_err(Clone::clone)
    }
}
