//! Range validation for user profiles
//!
//! Every field has a documented range. Values outside it are reported,
//! never clamped or silently replaced.

use crate::error::ValidationError;
use crate::models::UserProfile;
use std::ops::RangeInclusive;

pub const AGE_RANGE: RangeInclusive<f64> = 18.0..=100.0;
pub const HEIGHT_CM_RANGE: RangeInclusive<f64> = 100.0..=250.0;
pub const WEIGHT_KG_RANGE: RangeInclusive<f64> = 30.0..=200.0;
pub const BODY_FAT_RANGE: RangeInclusive<f64> = 5.0..=50.0;
pub const WORKOUT_FREQUENCY_RANGE: RangeInclusive<f64> = 0.0..=7.0;
pub const SESSION_HOURS_RANGE: RangeInclusive<f64> = 0.0..=4.0;
pub const CALORIES_BURNED_RANGE: RangeInclusive<f64> = 0.0..=2000.0;
pub const EXPERIENCE_RANGE: RangeInclusive<f64> = 1.0..=5.0;
pub const CALORIES_CONSUMED_RANGE: RangeInclusive<f64> = 0.0..=5000.0;
pub const PROTEIN_G_RANGE: RangeInclusive<f64> = 0.0..=300.0;
pub const CARBS_G_RANGE: RangeInclusive<f64> = 0.0..=500.0;
pub const FAT_G_RANGE: RangeInclusive<f64> = 0.0..=200.0;
pub const WATER_L_RANGE: RangeInclusive<f64> = 0.0..=5.0;
pub const MEALS_RANGE: RangeInclusive<f64> = 1.0..=8.0;

/// Fields a serialized profile must carry. `goal` falls back to Maintenance.
pub const REQUIRED_FIELDS: [&str; 16] = [
    "age",
    "gender",
    "height_cm",
    "weight_kg",
    "body_fat_pct",
    "workout_frequency",
    "session_duration_hours",
    "calories_burned",
    "experience_level",
    "calories_consumed",
    "protein_g",
    "carbs_g",
    "fat_g",
    "water_intake_l",
    "meals_per_day",
    "diet_type",
];

/// Numeric profile fields and their accepted ranges
pub const NUMERIC_FIELDS: [(&str, RangeInclusive<f64>); 14] = [
    ("age", AGE_RANGE),
    ("height_cm", HEIGHT_CM_RANGE),
    ("weight_kg", WEIGHT_KG_RANGE),
    ("body_fat_pct", BODY_FAT_RANGE),
    ("workout_frequency", WORKOUT_FREQUENCY_RANGE),
    ("session_duration_hours", SESSION_HOURS_RANGE),
    ("calories_burned", CALORIES_BURNED_RANGE),
    ("experience_level", EXPERIENCE_RANGE),
    ("calories_consumed", CALORIES_CONSUMED_RANGE),
    ("protein_g", PROTEIN_G_RANGE),
    ("carbs_g", CARBS_G_RANGE),
    ("fat_g", FAT_G_RANGE),
    ("water_intake_l", WATER_L_RANGE),
    ("meals_per_day", MEALS_RANGE),
];

/// Validates profiles before any metric is derived
pub struct ProfileValidator;

impl ProfileValidator {
    /// Validate every field of a profile, stopping at the first failure
    pub fn validate(profile: &UserProfile) -> Result<(), ValidationError> {
        Self::check("age", f64::from(profile.age), AGE_RANGE)?;
        Self::check("height_cm", profile.height_cm, HEIGHT_CM_RANGE)?;
        Self::check("weight_kg", profile.weight_kg, WEIGHT_KG_RANGE)?;
        Self::check("body_fat_pct", profile.body_fat_pct, BODY_FAT_RANGE)?;
        Self::check(
            "workout_frequency",
            f64::from(profile.workout_frequency),
            WORKOUT_FREQUENCY_RANGE,
        )?;
        Self::check(
            "session_duration_hours",
            profile.session_duration_hours,
            SESSION_HOURS_RANGE,
        )?;
        Self::check(
            "calories_burned",
            f64::from(profile.calories_burned),
            CALORIES_BURNED_RANGE,
        )?;
        Self::check(
            "experience_level",
            f64::from(profile.experience_level),
            EXPERIENCE_RANGE,
        )?;
        Self::check(
            "calories_consumed",
            f64::from(profile.calories_consumed),
            CALORIES_CONSUMED_RANGE,
        )?;
        Self::check("protein_g", profile.protein_g, PROTEIN_G_RANGE)?;
        Self::check("carbs_g", profile.carbs_g, CARBS_G_RANGE)?;
        Self::check("fat_g", profile.fat_g, FAT_G_RANGE)?;
        Self::check("water_intake_l", profile.water_intake_l, WATER_L_RANGE)?;
        Self::check(
            "meals_per_day",
            f64::from(profile.meals_per_day),
            MEALS_RANGE,
        )?;

        Ok(())
    }

    /// Report the first required field missing from a serialized profile
    pub fn check_required_fields(value: &serde_json::Value) -> Result<(), ValidationError> {
        let object = value.as_object().ok_or_else(|| ValidationError::MissingField {
            field: "profile".to_string(),
        })?;

        match REQUIRED_FIELDS
            .iter()
            .find(|field| object.get(**field).map_or(true, |v| v.is_null()))
        {
            Some(field) => Err(ValidationError::MissingField {
                field: field.to_string(),
            }),
            None => Ok(()),
        }
    }

    /// Range-check the numeric fields of a serialized profile
    ///
    /// Runs before the typed decode, so a negative or oversized value in an
    /// integer field is reported against its range instead of as a decode
    /// failure. Non-numeric values are left for the decoder.
    pub fn check_raw_ranges(value: &serde_json::Value) -> Result<(), ValidationError> {
        for (field, range) in NUMERIC_FIELDS {
            if let Some(number) = value.get(field).and_then(serde_json::Value::as_f64) {
                Self::check(field, number, range)?;
            }
        }
        Ok(())
    }

    /// Check that a value is finite and inside the accepted range
    pub fn check(
        field: &'static str,
        value: f64,
        range: RangeInclusive<f64>,
    ) -> Result<(), ValidationError> {
        if !value.is_finite() {
            return Err(ValidationError::NotFinite { field });
        }

        if !range.contains(&value) {
            return Err(ValidationError::OutOfRange {
                field,
                value,
                min: *range.start(),
                max: *range.end(),
            });
        }

        Ok(())
    }
}
