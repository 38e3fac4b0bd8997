//! Structured logging and evaluation diagnostics
//!
//! Console output in pretty, JSON or compact form on stderr, an optional
//! JSON log file, and a per-run diagnostic report recording which model
//! scored which profile and how.

use crate::error::HealthError;
use crate::scoring::PredictionResult;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;
use tracing::Level;
use tracing_subscriber::{
    fmt::{self, format::FmtSpan, writer::BoxMakeWriter},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter, Layer,
};

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogConfig {
    pub level: LogLevel,

    pub format: LogFormat,

    /// JSON log file in addition to the console; `None` for console only
    pub file_path: Option<PathBuf>,

    /// Roll the log file over daily instead of appending to one file
    pub rotation: bool,

    /// Emit span enter/close events and span context
    pub include_spans: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::Warn,
            format: LogFormat::Pretty,
            file_path: None,
            rotation: true,
            include_spans: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn to_tracing_level(self) -> Level {
        match self {
            LogLevel::Error => Level::ERROR,
            LogLevel::Warn => Level::WARN,
            LogLevel::Info => Level::INFO,
            LogLevel::Debug => Level::DEBUG,
            LogLevel::Trace => Level::TRACE,
        }
    }

    /// `EnvFilter` directive scoping this level to the crate
    pub fn directive(self) -> String {
        format!(
            "healthrs={}",
            self.to_tracing_level().as_str().to_ascii_lowercase()
        )
    }

    /// Level for a `-v` count, never quieter than `self`
    pub fn raised_by(self, verbosity: u8) -> LogLevel {
        let requested = match verbosity {
            0 => return self,
            1 => LogLevel::Info,
            2 => LogLevel::Debug,
            _ => LogLevel::Trace,
        };
        if requested.to_tracing_level() > self.to_tracing_level() {
            requested
        } else {
            self
        }
    }
}

/// Console output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
    Compact,
}

/// Install the global subscriber
///
/// `RUST_LOG` overrides the configured level when set.
pub fn init_logging(config: &LogConfig) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.level.directive()));

    let console_layer = match config.format {
        LogFormat::Pretty => fmt::layer()
            .with_writer(std::io::stderr)
            .with_line_number(true)
            .with_span_events(if config.include_spans {
                FmtSpan::ENTER | FmtSpan::CLOSE
            } else {
                FmtSpan::NONE
            })
            .boxed(),
        LogFormat::Json => fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .with_current_span(config.include_spans)
            .with_span_list(config.include_spans)
            .boxed(),
        LogFormat::Compact => fmt::layer()
            .compact()
            .with_writer(std::io::stderr)
            .boxed(),
    };

    let file_layer = file_writer(config)?.map(|writer| {
        fmt::layer()
            .json()
            .with_writer(writer)
            .with_current_span(config.include_spans)
            .with_span_list(config.include_spans)
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .with(file_layer)
        .try_init()?;

    tracing::info!(
        level = ?config.level,
        format = ?config.format,
        file = ?config.file_path,
        "Logging initialized"
    );

    Ok(())
}

fn file_writer(config: &LogConfig) -> anyhow::Result<Option<BoxMakeWriter>> {
    let Some(path) = &config.file_path else {
        return Ok(None);
    };

    let directory = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(directory)?;

    if config.rotation {
        let file_name = path
            .file_name()
            .ok_or_else(|| anyhow::anyhow!("Log file path has no file name: {}", path.display()))?;
        let appender = tracing_appender::rolling::daily(directory, file_name);
        Ok(Some(BoxMakeWriter::new(appender)))
    } else {
        let file = fs::OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Some(BoxMakeWriter::new(Mutex::new(file))))
    }
}

/// Record of one CLI evaluation, saved as JSON for troubleshooting
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiagnosticReport {
    pub timestamp: DateTime<Utc>,

    pub healthrs_version: String,

    /// Profile file that was evaluated
    pub profile_path: PathBuf,

    /// Artifact the model was (or would have been) loaded from
    pub model_path: PathBuf,

    /// SHA-256 of the artifact, when a model was loaded
    pub model_fingerprint: Option<String>,

    pub success: bool,

    #[serde(with = "duration_millis")]
    pub duration: Duration,

    /// Outcome of scoring; `None` when the evaluation failed before it
    pub prediction: Option<PredictionResult>,

    pub errors: Vec<ErrorDetail>,

    pub warnings: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub message: String,
    /// Tracing level the error was reported at
    pub severity: String,
    pub user_message: String,
}

impl DiagnosticReport {
    pub fn new(profile_path: impl Into<PathBuf>, model_path: impl Into<PathBuf>) -> Self {
        Self {
            timestamp: Utc::now(),
            healthrs_version: env!("CARGO_PKG_VERSION").to_string(),
            profile_path: profile_path.into(),
            model_path: model_path.into(),
            model_fingerprint: None,
            success: false,
            duration: Duration::ZERO,
            prediction: None,
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    pub fn set_duration(&mut self, duration: Duration) {
        self.duration = duration;
    }

    pub fn set_model_fingerprint(&mut self, fingerprint: Option<&str>) {
        self.model_fingerprint = fingerprint.map(str::to_string);
    }

    /// Record a completed evaluation; a missing score becomes a warning
    pub fn record_prediction(&mut self, prediction: &PredictionResult) {
        self.success = true;
        if let PredictionResult::ModelUnavailable { reason } = prediction {
            self.warnings.push(format!("No wellness score: {}", reason));
        }
        self.prediction = Some(prediction.clone());
    }

    pub fn record_error(&mut self, error: &HealthError) {
        self.success = false;
        self.errors.push(ErrorDetail {
            message: error.to_string(),
            severity: error.severity().to_tracing_level().to_string(),
            user_message: error.user_message(),
        });
    }

    pub fn save_to_file(&self, path: &Path) -> anyhow::Result<()> {
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        tracing::info!(path = %path.display(), "Diagnostic report saved");
        Ok(())
    }

    /// Save under `<local data dir>/healthrs/diagnostics`
    pub fn save_default(&self) -> anyhow::Result<PathBuf> {
        let directory = dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("healthrs")
            .join("diagnostics");
        fs::create_dir_all(&directory)?;

        let path = directory.join(format!(
            "evaluation_{}.json",
            self.timestamp.format("%Y%m%d_%H%M%S")
        ));
        self.save_to_file(&path)?;
        Ok(path)
    }
}

mod duration_millis {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(u64::try_from(duration.as_millis()).unwrap_or(u64::MAX))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}
