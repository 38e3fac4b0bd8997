//! Integration tests for model artifacts on disk
//!
//! Artifacts and configs are written to temporary directories and loaded
//! through the same paths the CLI uses.

use healthrs::features::{BMI, DIET_VEGAN, WATER_INTAKE};
use healthrs::{
    export_features, load_profile, AppConfig, ExportFormat, LinearModel, ModelError,
    ModelLoader, PredictionResult, UserProfile, WellnessEvaluator, FEATURE_NAMES,
};
use std::fs;
use std::path::Path;
use tempfile::tempdir;

fn write_model(path: &Path, model: &LinearModel) {
    fs::write(path, serde_json::to_string_pretty(model).unwrap()).unwrap();
}

fn config_for(model_path: &Path) -> AppConfig {
    let mut config = AppConfig::default();
    config.model.path = model_path.to_path_buf();
    config
}

#[test]
fn test_artifact_scores_profile() {
    let dir = tempdir().unwrap();
    let model_path = dir.path().join("wellness_model.json");
    let model = LinearModel::new("wellness-linear", 1.0)
        .with_coefficient(WATER_INTAKE, 0.5)
        .with_coefficient(DIET_VEGAN, 0.5);
    write_model(&model_path, &model);

    let evaluator = WellnessEvaluator::from_config(&config_for(&model_path));
    let evaluation = evaluator.evaluate(&UserProfile::default()).unwrap();

    // raw = 1 + 0.5 × 2.0 + 0.5 × 1 = 2.5
    match evaluation.prediction {
        PredictionResult::Scored { raw, score, .. } => {
            assert!((raw - 2.5).abs() < 1e-12);
            assert!((score - 2.5).abs() < 1e-12);
        }
        other => panic!("expected a score, got {:?}", other),
    }
    assert!(evaluator.model_cache().is_initialized());
}

#[test]
fn test_artifact_with_unknown_column_degrades() {
    let dir = tempdir().unwrap();
    let model_path = dir.path().join("wellness_model.json");
    write_model(
        &model_path,
        &LinearModel::new("stale", 1.0).with_coefficient("Avg_BPM", 0.01),
    );

    assert_eq!(
        ModelLoader::load(&model_path).err(),
        Some(ModelError::UnknownFeature {
            feature: "Avg_BPM".to_string()
        })
    );

    let evaluation = WellnessEvaluator::from_config(&config_for(&model_path))
        .evaluate(&UserProfile::default())
        .unwrap();
    match evaluation.prediction {
        PredictionResult::ModelUnavailable { reason } => assert!(reason.contains("Avg_BPM")),
        other => panic!("expected no score, got {:?}", other),
    }
}

#[test]
fn test_truncated_artifact_degrades() {
    let dir = tempdir().unwrap();
    let model_path = dir.path().join("wellness_model.json");
    fs::write(&model_path, r#"{ "name": "cut", "intercept": 1.0, "coeff"#).unwrap();

    let evaluation = WellnessEvaluator::from_config(&config_for(&model_path))
        .evaluate(&UserProfile::default())
        .unwrap();
    assert!(!evaluation.prediction.is_available());
    assert!(evaluation.metrics.tdee > 0.0);
}

#[test]
fn test_fingerprint_tracks_contents() {
    let dir = tempdir().unwrap();
    let first = dir.path().join("a.json");
    let second = dir.path().join("b.json");
    write_model(&first, &LinearModel::new("m", 1.0).with_coefficient(BMI, 0.1));
    write_model(&second, &LinearModel::new("m", 1.0).with_coefficient(BMI, 0.2));

    let a = ModelLoader::load(&first).unwrap();
    let a_again = ModelLoader::load(&first).unwrap();
    let b = ModelLoader::load(&second).unwrap();

    assert_eq!(a.fingerprint, a_again.fingerprint);
    assert_ne!(a.fingerprint, b.fingerprint);
    assert_eq!(b.model.name(), "m");
}

#[test]
fn test_config_file_selects_model_and_lookup() {
    let dir = tempdir().unwrap();
    let model_path = dir.path().join("model.json");
    write_model(&model_path, &LinearModel::new("flat", 4.0));

    let config_path = dir.path().join("config.toml");
    let mut config = config_for(&model_path);
    config.calculator.activity_lookup = healthrs::ActivityLookup::Legacy;
    config.save_to_file(&config_path).unwrap();

    let loaded = AppConfig::load_from_file(&config_path).unwrap();
    let profile = UserProfile {
        experience_level: 5,
        ..UserProfile::default()
    };
    let evaluation = WellnessEvaluator::from_config(&loaded)
        .evaluate(&profile)
        .unwrap();

    assert_eq!(evaluation.metrics.activity_multiplier, 1.375);
    assert_eq!(evaluation.prediction.score(), Some(5.0));
}

#[test]
fn test_profile_file_to_exported_row() {
    let dir = tempdir().unwrap();
    let profile_path = dir.path().join("profile.json");
    fs::write(
        &profile_path,
        r#"{
            "age": 42, "gender": "Female", "height_cm": 165.0, "weight_kg": 60.0,
            "body_fat_pct": 24.0, "workout_frequency": 4, "session_duration_hours": 1.5,
            "calories_burned": 600, "experience_level": 4, "goal": "Weight Loss",
            "calories_consumed": 1900, "protein_g": 120.0, "carbs_g": 180.0,
            "fat_g": 60.0, "water_intake_l": 2.5, "meals_per_day": 4,
            "diet_type": "low-carb"
        }"#,
    )
    .unwrap();

    let profile = load_profile(&profile_path).unwrap();
    let evaluation = WellnessEvaluator::from_config(&config_for(&dir.path().join("none.json")))
        .evaluate(&profile)
        .unwrap();

    let csv_path = dir.path().join("features.csv");
    export_features(&evaluation.features, &csv_path, ExportFormat::Csv).unwrap();

    let content = fs::read_to_string(&csv_path).unwrap();
    let mut lines = content.lines();
    assert_eq!(lines.next().unwrap(), FEATURE_NAMES.join(","));

    let values: Vec<f64> = lines
        .next()
        .unwrap()
        .split(',')
        .map(|v| v.parse().unwrap())
        .collect();
    assert_eq!(values.len(), 20);
    assert_eq!(values[0], 42.0);
    // Gender_Male, then Keto, Low-Carb
    assert_eq!(values[14], 0.0);
    assert_eq!(values[15], 0.0);
    assert_eq!(values[16], 1.0);
}

#[test]
fn test_bundled_model_and_sample_profile() {
    let root = Path::new(env!("CARGO_MANIFEST_DIR"));
    let profile = load_profile(&root.join("profiles").join("sample.toml")).unwrap();
    assert_eq!(profile, UserProfile::default());

    let loaded = ModelLoader::load(&root.join("models").join("wellness_model.json")).unwrap();
    let evaluation = WellnessEvaluator::with_model(loaded.model)
        .evaluate(&profile)
        .unwrap();

    let score = evaluation.prediction.score().unwrap();
    assert!((0.0..=5.0).contains(&score));
}
