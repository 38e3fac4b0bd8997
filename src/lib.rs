// Library interface for healthrs modules
// This allows integration tests to access the core functionality

pub mod calculator;
pub mod config;
pub mod error;
pub mod evaluation;
pub mod export;
pub mod features;
pub mod logging;
pub mod model;
pub mod models;
pub mod scoring;
pub mod validation;

// Re-export commonly used types for convenience
pub use calculator::{ActivityLookup, MetricCalculator};
pub use config::AppConfig;
pub use error::{HealthError, ModelError, Result, ValidationError};
pub use evaluation::{load_profile, Evaluation, WellnessEvaluator};
pub use export::{export_features, ExportFormat};
pub use features::{FeatureAssembler, FeatureVector, FEATURE_NAMES};
pub use logging::{DiagnosticReport, LogConfig, LogFormat, LogLevel};
pub use model::{LinearModel, ModelCache, ModelLoader, WellnessModel};
pub use models::*;
pub use scoring::{PredictionResult, ScoreInterpreter};
pub use validation::ProfileValidator;
