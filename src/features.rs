//! Feature vector assembly
//!
//! Builds the named, fixed-schema row the wellness model was trained on.
//! Columns are addressed by name so the model never depends on position.

use crate::models::{DerivedMetrics, DietType, Gender, UserProfile};
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::collections::HashMap;

pub const AGE: &str = "Age";
pub const SESSION_DURATION: &str = "Session_Duration (hours)";
pub const CALORIES_BURNED: &str = "Calories_Burned";
pub const FAT_PERCENTAGE: &str = "Fat_Percentage";
pub const WATER_INTAKE: &str = "Water_Intake (liters)";
pub const WORKOUT_FREQUENCY: &str = "Workout_Frequency (days/week)";
pub const EXPERIENCE_LEVEL: &str = "Experience_Level";
pub const BMI: &str = "BMI";
pub const DAILY_MEALS: &str = "Daily meals frequency";
pub const CARBS: &str = "Carbs";
pub const PROTEINS: &str = "Proteins";
pub const FATS: &str = "Fats";
pub const CALORIES: &str = "Calories";
pub const WEIGHT: &str = "Weight (kg)";
pub const GENDER_MALE: &str = "Gender_Male";
pub const DIET_KETO: &str = "diet_type_Keto";
pub const DIET_LOW_CARB: &str = "diet_type_Low-Carb";
pub const DIET_PALEO: &str = "diet_type_Paleo";
pub const DIET_VEGAN: &str = "diet_type_Vegan";
pub const DIET_VEGETARIAN: &str = "diet_type_Vegetarian";

/// Diet indicator columns known to the model
pub const DIET_COLUMNS: [&str; 5] = [
    DIET_KETO,
    DIET_LOW_CARB,
    DIET_PALEO,
    DIET_VEGAN,
    DIET_VEGETARIAN,
];

/// Every column, in model schema order
pub const FEATURE_NAMES: [&str; 20] = [
    AGE,
    SESSION_DURATION,
    CALORIES_BURNED,
    FAT_PERCENTAGE,
    WATER_INTAKE,
    WORKOUT_FREQUENCY,
    EXPERIENCE_LEVEL,
    BMI,
    DAILY_MEALS,
    CARBS,
    PROTEINS,
    FATS,
    CALORIES,
    WEIGHT,
    GENDER_MALE,
    DIET_KETO,
    DIET_LOW_CARB,
    DIET_PALEO,
    DIET_VEGAN,
    DIET_VEGETARIAN,
];

/// Whether a column name belongs to the schema
pub fn is_known_feature(name: &str) -> bool {
    FEATURE_NAMES.contains(&name)
}

/// Indicator column for a diet type, if the model knows one
///
/// Balanced diets and unrecognized labels have no column.
pub fn diet_column(diet: &DietType) -> Option<&'static str> {
    let column = format!("diet_type_{}", diet.label());
    DIET_COLUMNS.iter().copied().find(|c| *c == column)
}

/// Single model input row keyed by column name
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureVector {
    values: HashMap<&'static str, f64>,
}

impl FeatureVector {
    /// A row with every column set to zero
    pub fn zeroed() -> Self {
        Self {
            values: FEATURE_NAMES.iter().map(|name| (*name, 0.0)).collect(),
        }
    }

    /// Value of a column, `None` for names outside the schema
    pub fn get(&self, name: &str) -> Option<f64> {
        self.values.get(name).copied()
    }

    /// Set a schema column; names outside the schema are ignored
    fn set(&mut self, name: &'static str, value: f64) {
        if let Some(slot) = self.values.get_mut(name) {
            *slot = value;
        }
    }

    /// Columns and values in schema order
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, f64)> + '_ {
        FEATURE_NAMES
            .iter()
            .map(move |name| (*name, self.values.get(*name).copied().unwrap_or(0.0)))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Number of diet indicator columns set
    pub fn active_diet_indicators(&self) -> usize {
        DIET_COLUMNS
            .iter()
            .filter(|c| self.get(**c).unwrap_or(0.0) == 1.0)
            .count()
    }
}

impl Serialize for FeatureVector {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(FEATURE_NAMES.len()))?;
        for (name, value) in self.iter() {
            map.serialize_entry(name, &value)?;
        }
        map.end()
    }
}

/// Maps profiles and derived metrics onto model rows
pub struct FeatureAssembler;

impl FeatureAssembler {
    /// Assemble the model row for a profile
    pub fn assemble(profile: &UserProfile, metrics: &DerivedMetrics) -> FeatureVector {
        let mut row = FeatureVector::zeroed();

        row.set(AGE, f64::from(profile.age));
        row.set(SESSION_DURATION, profile.session_duration_hours);
        row.set(CALORIES_BURNED, f64::from(profile.calories_burned));
        row.set(FAT_PERCENTAGE, profile.body_fat_pct);
        row.set(WATER_INTAKE, profile.water_intake_l);
        row.set(WORKOUT_FREQUENCY, f64::from(profile.workout_frequency));
        row.set(EXPERIENCE_LEVEL, metrics.experience_level);
        row.set(BMI, metrics.bmi);
        row.set(DAILY_MEALS, f64::from(profile.meals_per_day));
        row.set(CARBS, profile.carbs_g);
        row.set(PROTEINS, profile.protein_g);
        row.set(FATS, profile.fat_g);
        row.set(CALORIES, f64::from(profile.calories_consumed));
        row.set(WEIGHT, profile.weight_kg);

        row.set(
            GENDER_MALE,
            if profile.gender == Gender::Male { 1.0 } else { 0.0 },
        );

        match diet_column(&profile.diet_type) {
            Some(column) => row.set(column, 1.0),
            None => tracing::debug!(
                diet = %profile.diet_type,
                "No diet indicator for diet type"
            ),
        }

        row
    }
}
