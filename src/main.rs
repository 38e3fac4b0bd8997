use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use colored::*;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tabled::{settings::Style, Table, Tabled};

use healthrs::error::ErrorSeverity;
use healthrs::logging::init_logging;
use healthrs::{
    export_features, load_profile, AppConfig, DiagnosticReport, Evaluation, ExportFormat,
    HealthError, PredictionResult, UserProfile, WellnessEvaluator,
};

/// healthrs - Fitness and nutrition wellness scoring
///
/// Derives BMI, BMR, TDEE and macro metrics from a profile and scores it
/// with a pre-trained wellness model.
#[derive(Parser)]
#[command(name = "healthrs")]
#[command(author = "healthrs Contributors")]
#[command(version)]
#[command(about = "Fitness and nutrition wellness scoring", long_about = None)]
struct Cli {
    /// Sets a custom config file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Increase verbosity of output
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate a profile and print metrics and the wellness score
    Evaluate {
        /// Profile file (TOML or JSON)
        #[arg(short, long)]
        profile: PathBuf,

        /// Model artifact, overriding the configured path
        #[arg(short, long)]
        model: Option<PathBuf>,

        /// Output format
        #[arg(short = 'f', long, value_enum, default_value = "table")]
        format: OutputFormat,

        /// Write the model input row to this file (.csv or .json)
        #[arg(long, value_name = "FILE")]
        export_features: Option<PathBuf>,

        /// Save a diagnostic report for this run
        #[arg(long)]
        diagnostics: bool,
    },

    /// Configure application settings
    Config {
        /// Print the effective configuration
        #[arg(short, long)]
        show: bool,

        /// Write a default configuration file
        #[arg(short, long)]
        init: bool,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
}

#[derive(Tabled)]
struct MetricRow {
    #[tabled(rename = "Metric")]
    metric: String,
    #[tabled(rename = "Value")]
    value: String,
    #[tabled(rename = "Note")]
    note: String,
}

impl MetricRow {
    fn new(metric: &str, value: String, note: &str) -> Self {
        Self {
            metric: metric.to_string(),
            value,
            note: note.to_string(),
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => AppConfig::load_from_file(path)?,
        None => AppConfig::load_or_default(),
    };

    let mut log_config = config.logging.clone();
    log_config.level = log_config.level.raised_by(cli.verbose);
    init_logging(&log_config)?;

    match cli.command {
        Commands::Evaluate {
            profile,
            model,
            format,
            export_features: export_path,
            diagnostics,
        } => {
            let mut config = config;
            if let Some(model_path) = model {
                config.model.path = model_path;
            }

            let evaluator = WellnessEvaluator::from_config(&config);
            let mut report = DiagnosticReport::new(&profile, &config.model.path);

            let started = Instant::now();
            let outcome = run_evaluation(&evaluator, &profile, format, export_path.as_deref());
            report.set_duration(started.elapsed());
            report.set_model_fingerprint(evaluator.model_cache().fingerprint());

            match &outcome {
                Ok(evaluation) => report.record_prediction(&evaluation.prediction),
                Err(e) => {
                    log_failure(e);
                    report.record_error(e);
                }
            }

            if diagnostics {
                let path = report.save_default()?;
                eprintln!("{}", format!("Diagnostic report: {}", path.display()).dimmed());
            }

            if let Err(e) = outcome {
                eprintln!("{} {}", "✗".red().bold(), e.user_message().red());
                return Err(e.into());
            }
        }

        Commands::Config { show, init } => {
            if init {
                let mut fresh = AppConfig::default();
                let path = match cli.config {
                    Some(path) => {
                        fresh.save_to_file(&path)?;
                        path
                    }
                    None => {
                        fresh.save_default()?;
                        AppConfig::default_config_path()
                    }
                };
                println!(
                    "{}",
                    format!("✓ Configuration written to {}", path.display()).green()
                );
            }
            if show || !init {
                let toml_content = toml::to_string_pretty(&config)
                    .context("Failed to serialize configuration")?;
                println!("{}", toml_content);
            }
        }
    }

    Ok(())
}

fn log_failure(error: &HealthError) {
    match error.severity() {
        ErrorSeverity::Critical | ErrorSeverity::Error => {
            tracing::error!(error = %error, "Evaluation failed")
        }
        ErrorSeverity::Warning => tracing::warn!(error = %error, "Evaluation rejected"),
    }
}

fn run_evaluation(
    evaluator: &WellnessEvaluator,
    profile_path: &Path,
    format: OutputFormat,
    export_path: Option<&Path>,
) -> healthrs::Result<Evaluation> {
    let profile = load_profile(profile_path)?;
    let evaluation = evaluator.evaluate(&profile)?;

    if let Some(path) = export_path {
        let export_format = ExportFormat::from_path(path)?;
        export_features(&evaluation.features, path, export_format)?;
        tracing::info!(path = %path.display(), "Feature row exported");
    }

    match format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&evaluation)
                .map_err(|e| HealthError::Internal(e.to_string()))?;
            println!("{}", json);
        }
        OutputFormat::Table => print_evaluation(&profile, &evaluation),
    }

    Ok(evaluation)
}

fn print_evaluation(profile: &UserProfile, evaluation: &Evaluation) {
    let metrics = &evaluation.metrics;
    let labels = &evaluation.labels;

    println!("{}", "Health Metrics".green().bold());
    let body_rows = vec![
        MetricRow::new("BMI", format!("{:.1}", metrics.bmi), labels.bmi.label()),
        MetricRow::new(
            "Body Fat",
            format!("{:.1}%", profile.body_fat_pct),
            labels.body_fat.label(),
        ),
        MetricRow::new("BMR", format!("{:.0} kcal", metrics.bmr), ""),
        MetricRow::new("TDEE", format!("{:.0} kcal", metrics.tdee), ""),
        MetricRow::new(
            "Experience",
            format!("{}/5", profile.experience_level),
            labels.experience.label(),
        ),
        MetricRow::new(
            "Calories Burned",
            format!("{} kcal", profile.calories_burned),
            labels.workout_intensity.label(),
        ),
        MetricRow::new(
            "Weekly Training",
            format!(
                "{:.1} h, ~{} kcal",
                metrics.weekly.total_hours, metrics.weekly.estimated_calories
            ),
            "",
        ),
    ];
    println!("{}", Table::new(body_rows).with(Style::rounded()));

    println!("{}", "Nutrition".blue().bold());
    let nutrition_rows = vec![
        MetricRow::new(
            "Recommended Calories",
            format!("{:.0} kcal", metrics.recommended_calories),
            "",
        ),
        MetricRow::new(
            "Calorie Balance",
            format!("{:+.0} kcal", metrics.calorie_balance),
            labels.calorie_balance.label(),
        ),
        MetricRow::new(
            "Protein",
            format!("{:.0} g", profile.protein_g),
            &format!("{:.0}% of target", metrics.adequacy.protein * 100.0),
        ),
        MetricRow::new(
            "Carbs",
            format!("{:.0} g", profile.carbs_g),
            &format!("{:.0}% of target", metrics.adequacy.carbs * 100.0),
        ),
        MetricRow::new(
            "Fat",
            format!("{:.0} g", profile.fat_g),
            &format!("{:.0}% of target", metrics.adequacy.fat * 100.0),
        ),
        MetricRow::new(
            "Water",
            format!("{:.1} L", profile.water_intake_l),
            &format!("target {:.1} L", metrics.water_target_l),
        ),
        MetricRow::new(
            "Meals",
            profile.meals_per_day.to_string(),
            labels.meal_pattern.label(),
        ),
        MetricRow::new(
            "Macro Balance",
            format!("{:.0}/100", metrics.macro_balance_score),
            profile.diet_type.label(),
        ),
    ];
    println!("{}", Table::new(nutrition_rows).with(Style::rounded()));

    match &evaluation.prediction {
        PredictionResult::Scored { score, .. } => {
            let stars = "★".repeat(evaluation.prediction.star_count());
            println!(
                "{} {} {}",
                "AI Health Score:".cyan().bold(),
                format!("{:.3}/5", score).bold(),
                stars.yellow()
            );
        }
        PredictionResult::ModelUnavailable { reason } => {
            println!(
                "{} {}",
                "AI Health Score:".cyan().bold(),
                "unavailable".dimmed()
            );
            println!("{}", format!("  {}", reason).dimmed());
        }
    }
}
