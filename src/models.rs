use serde::{Deserialize, Serialize};
use std::fmt;

/// Gender as collected by the profile form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
    Other,
    #[serde(rename = "Prefer not to say", alias = "PreferNotToSay")]
    PreferNotToSay,
}

/// Primary fitness goal, drives calorie adjustment and macro split
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Goal {
    #[serde(rename = "Weight Loss", alias = "WeightLoss")]
    WeightLoss,
    #[default]
    Maintenance,
    #[serde(rename = "Muscle Gain", alias = "MuscleGain")]
    MuscleGain,
}

/// Dietary pattern
///
/// Parsed leniently from its display label. Labels that match no known
/// pattern are kept as `Unrecognized` instead of failing.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum DietType {
    Vegan,
    Vegetarian,
    Paleo,
    Keto,
    LowCarb,
    Balanced,
    Unrecognized(String),
}

impl DietType {
    /// Parse a diet label such as `"Low-Carb"`, ignoring case and separators
    pub fn from_label(label: &str) -> Self {
        let normalized: String = label
            .chars()
            .filter(|c| !matches!(c, '-' | '_' | ' '))
            .collect::<String>()
            .to_lowercase();

        match normalized.as_str() {
            "vegan" => DietType::Vegan,
            "vegetarian" => DietType::Vegetarian,
            "paleo" => DietType::Paleo,
            "keto" => DietType::Keto,
            "lowcarb" => DietType::LowCarb,
            "balanced" => DietType::Balanced,
            _ => DietType::Unrecognized(label.to_string()),
        }
    }

    /// Display label, matching the training data spelling
    pub fn label(&self) -> &str {
        match self {
            DietType::Vegan => "Vegan",
            DietType::Vegetarian => "Vegetarian",
            DietType::Paleo => "Paleo",
            DietType::Keto => "Keto",
            DietType::LowCarb => "Low-Carb",
            DietType::Balanced => "Balanced",
            DietType::Unrecognized(label) => label,
        }
    }

    pub fn is_recognized(&self) -> bool {
        !matches!(self, DietType::Unrecognized(_))
    }
}

impl From<String> for DietType {
    fn from(label: String) -> Self {
        DietType::from_label(&label)
    }
}

impl From<DietType> for String {
    fn from(diet: DietType) -> Self {
        diet.label().to_string()
    }
}

impl fmt::Display for DietType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Raw inputs for a single evaluation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Age in whole years
    pub age: u32,

    pub gender: Gender,

    /// Height in centimeters
    pub height_cm: f64,

    /// Weight in kilograms
    pub weight_kg: f64,

    /// Estimated body fat percentage
    pub body_fat_pct: f64,

    /// Training days per week
    pub workout_frequency: u8,

    /// Average session length in hours
    pub session_duration_hours: f64,

    /// Calories burned in today's workout
    pub calories_burned: u32,

    /// Raw experience slider value (1-5)
    pub experience_level: u8,

    #[serde(default)]
    pub goal: Goal,

    /// Calories actually consumed today
    pub calories_consumed: u32,

    pub protein_g: f64,
    pub carbs_g: f64,
    pub fat_g: f64,

    /// Water intake in liters
    pub water_intake_l: f64,

    pub meals_per_day: u8,

    pub diet_type: DietType,
}

impl UserProfile {
    /// Experience level rescaled from the 1-5 slider onto 1.0-3.0
    pub fn rescaled_experience_level(&self) -> f64 {
        ((f64::from(self.experience_level) - 1.0) / 4.0) * 2.0 + 1.0
    }
}

impl Default for UserProfile {
    /// Form defaults for a first visit
    fn default() -> Self {
        Self {
            age: 30,
            gender: Gender::Male,
            height_cm: 170.0,
            weight_kg: 70.0,
            body_fat_pct: 20.0,
            workout_frequency: 3,
            session_duration_hours: 1.0,
            calories_burned: 350,
            experience_level: 3,
            goal: Goal::Maintenance,
            calories_consumed: 2500,
            protein_g: 155.0,
            carbs_g: 280.0,
            fat_g: 83.0,
            water_intake_l: 2.0,
            meals_per_day: 3,
            diet_type: DietType::Vegan,
        }
    }
}

/// Activity buckets used to pick a TDEE multiplier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActivityLevel {
    Beginner,
    Intermediate,
    Advanced,
    Athlete,
}

/// Protein/carb/fat split as fractions of total calories
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MacroRatios {
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
}

impl MacroRatios {
    pub fn sum(&self) -> f64 {
        self.protein + self.carbs + self.fat
    }
}

/// Macro targets in grams
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MacroTargets {
    pub protein_g: f64,
    pub carbs_g: f64,
    pub fat_g: f64,
}

/// Share of consumed calories coming from each macro, in percent
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct MacroPercentages {
    pub protein_pct: f64,
    pub carbs_pct: f64,
    pub fat_pct: f64,
}

/// Intake relative to target, each capped at 1.5
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AdequacyRatios {
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
    pub water: f64,
}

/// Weekly training volume extrapolated from a typical session
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeeklySummary {
    pub total_hours: f64,
    pub estimated_calories: u32,
}

/// Everything computed from a profile before the model is consulted
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DerivedMetrics {
    pub bmi: f64,
    pub bmr: f64,
    pub tdee: f64,

    /// Experience level on the 1.0-3.0 scale
    pub experience_level: f64,

    /// Bucket used for the TDEE multiplier, `None` when the default applied
    pub activity_level: Option<ActivityLevel>,
    pub activity_multiplier: f64,

    /// TDEE adjusted for goal plus today's exercise
    pub recommended_calories: f64,

    /// Consumed minus recommended calories
    pub calorie_balance: f64,

    pub macro_ratios: MacroRatios,
    pub ideal_macros: MacroTargets,
    pub actual_macros: MacroPercentages,
    pub adequacy: AdequacyRatios,

    /// Daily water target in liters
    pub water_target_l: f64,

    /// 0-100, how closely the actual split matches the goal split
    pub macro_balance_score: f64,

    pub weekly: WeeklySummary,
}

/// BMI category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BmiCategory {
    Underweight,
    Healthy,
    Overweight,
    Obese,
}

impl BmiCategory {
    pub fn label(&self) -> &'static str {
        match self {
            BmiCategory::Underweight => "Underweight",
            BmiCategory::Healthy => "Healthy weight",
            BmiCategory::Overweight => "Overweight",
            BmiCategory::Obese => "Obese",
        }
    }
}

/// Body fat category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BodyFatCategory {
    Athletic,
    Healthy,
    High,
    VeryHigh,
}

impl BodyFatCategory {
    pub fn label(&self) -> &'static str {
        match self {
            BodyFatCategory::Athletic => "Athletic",
            BodyFatCategory::Healthy => "Healthy",
            BodyFatCategory::High => "High",
            BodyFatCategory::VeryHigh => "Very High",
        }
    }
}

/// Feedback tier for the raw experience slider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExperienceTier {
    Starter,
    Progressing,
    HighPerformance,
    Elite,
}

impl ExperienceTier {
    pub fn label(&self) -> &'static str {
        match self {
            ExperienceTier::Starter => "Great start!",
            ExperienceTier::Progressing => "Making progress!",
            ExperienceTier::HighPerformance => "High performance!",
            ExperienceTier::Elite => "Elite level!",
        }
    }
}

/// Consumed vs recommended calories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CalorieBalanceCategory {
    SignificantDeficit,
    ModerateDeficit,
    OnTarget,
    ModerateSurplus,
    SignificantSurplus,
}

impl CalorieBalanceCategory {
    pub fn label(&self) -> &'static str {
        match self {
            CalorieBalanceCategory::SignificantDeficit => "Significant deficit",
            CalorieBalanceCategory::ModerateDeficit => "Moderate deficit",
            CalorieBalanceCategory::OnTarget => "On target",
            CalorieBalanceCategory::ModerateSurplus => "Moderate surplus",
            CalorieBalanceCategory::SignificantSurplus => "Significant surplus",
        }
    }
}

/// Session intensity judged by calories burned
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorkoutIntensity {
    Light,
    Moderate,
    Intense,
}

impl WorkoutIntensity {
    pub fn label(&self) -> &'static str {
        match self {
            WorkoutIntensity::Light => "Light activity",
            WorkoutIntensity::Moderate => "Moderate workout",
            WorkoutIntensity::Intense => "Intense session",
        }
    }
}

/// Meal frequency feedback
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MealPattern {
    Infrequent,
    Balanced,
    Frequent,
}

impl MealPattern {
    pub fn label(&self) -> &'static str {
        match self {
            MealPattern::Infrequent => "Consider more frequent meals",
            MealPattern::Balanced => "Balanced meal frequency",
            MealPattern::Frequent => "Frequent feeding pattern",
        }
    }
}

/// Category labels handed to the presentation layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthLabels {
    pub bmi: BmiCategory,
    pub body_fat: BodyFatCategory,
    pub experience: ExperienceTier,
    pub calorie_balance: CalorieBalanceCategory,
    pub workout_intensity: WorkoutIntensity,
    pub meal_pattern: MealPattern,
}
