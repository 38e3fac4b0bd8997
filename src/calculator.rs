//! Health metric calculator
//!
//! Pure formulas behind the wellness evaluation: body mass index, resting
//! and total energy expenditure, calorie and macronutrient targets,
//! hydration, and the category thresholds used for feedback.
//!
//! # Formulas
//!
//! - BMI: `weight_kg / (height_cm / 100)^2`
//! - BMR (Mifflin-St Jeor): `10 × weight + 6.25 × height - 5 × age + 5`
//! - TDEE: `BMR × activity multiplier`
//! - Target calories: `TDEE + goal adjustment + calories burned`
//! - Macro grams: `calories × ratio / 4` for protein and carbs, `/ 9` for fat

use crate::error::ValidationError;
use crate::models::{
    ActivityLevel, AdequacyRatios, BmiCategory, BodyFatCategory, CalorieBalanceCategory,
    DerivedMetrics, ExperienceTier, Goal, HealthLabels, MacroPercentages, MacroRatios,
    MacroTargets, MealPattern, UserProfile, WeeklySummary, WorkoutIntensity,
};
use serde::{Deserialize, Serialize};

/// Upper bound for any adequacy ratio (150% of target)
pub const ADEQUACY_CAP: f64 = 1.5;

/// Multiplier used when no activity bucket applies
pub const DEFAULT_ACTIVITY_MULTIPLIER: f64 = 1.375;

/// Daily water need per kilogram of body weight, in liters
pub const WATER_LITERS_PER_KG: f64 = 0.033;

/// Protein need per kilogram of body weight, in grams
pub const PROTEIN_GRAMS_PER_KG: f64 = 1.6;

const KCAL_PER_GRAM_PROTEIN: f64 = 4.0;
const KCAL_PER_GRAM_CARBS: f64 = 4.0;
const KCAL_PER_GRAM_FAT: f64 = 9.0;

/// How the rescaled experience level selects an activity multiplier
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityLookup {
    /// Map 0.5-wide ranges of the 1.0-3.0 scale onto the four buckets
    #[default]
    Bucketed,
    /// Never match a bucket; always use the default multiplier
    Legacy,
}

/// Health metric formulas and classifiers
pub struct MetricCalculator;

impl MetricCalculator {
    /// Body mass index from weight (kg) and height (cm)
    ///
    /// # Errors
    /// Height or weight that is not a positive finite number.
    pub fn bmi(weight_kg: f64, height_cm: f64) -> Result<f64, ValidationError> {
        if !height_cm.is_finite() {
            return Err(ValidationError::NotFinite { field: "height_cm" });
        }
        if !weight_kg.is_finite() {
            return Err(ValidationError::NotFinite { field: "weight_kg" });
        }
        if height_cm <= 0.0 {
            return Err(ValidationError::NonPositive {
                field: "height_cm",
                value: height_cm,
            });
        }
        if weight_kg <= 0.0 {
            return Err(ValidationError::NonPositive {
                field: "weight_kg",
                value: weight_kg,
            });
        }

        let height_m = height_cm / 100.0;
        Ok(weight_kg / (height_m * height_m))
    }

    /// BMI category
    ///
    /// - Underweight: < 18.5
    /// - Healthy: 18.5 - 24.9
    /// - Overweight: 25 - 29.9
    /// - Obese: >= 30
    pub fn classify_bmi(bmi: f64) -> BmiCategory {
        if bmi < 18.5 {
            BmiCategory::Underweight
        } else if bmi < 25.0 {
            BmiCategory::Healthy
        } else if bmi < 30.0 {
            BmiCategory::Overweight
        } else {
            BmiCategory::Obese
        }
    }

    /// Body fat category
    ///
    /// - Athletic: < 14%
    /// - Healthy: 14 - 23.9%
    /// - High: 24 - 31.9%
    /// - Very high: >= 32%
    pub fn classify_body_fat(pct: f64) -> BodyFatCategory {
        if pct < 14.0 {
            BodyFatCategory::Athletic
        } else if pct < 24.0 {
            BodyFatCategory::Healthy
        } else if pct < 32.0 {
            BodyFatCategory::High
        } else {
            BodyFatCategory::VeryHigh
        }
    }

    /// Basal metabolic rate (kcal/day), Mifflin-St Jeor with the +5 offset
    pub fn bmr(weight_kg: f64, height_cm: f64, age: u32) -> f64 {
        10.0 * weight_kg + 6.25 * height_cm - 5.0 * f64::from(age) + 5.0
    }

    /// Activity bucket for a rescaled (1.0-3.0) experience level
    pub fn activity_level(experience_level: f64, lookup: ActivityLookup) -> Option<ActivityLevel> {
        match lookup {
            ActivityLookup::Legacy => None,
            ActivityLookup::Bucketed => {
                if !(1.0..=3.0).contains(&experience_level) {
                    None
                } else if experience_level < 1.5 {
                    Some(ActivityLevel::Beginner)
                } else if experience_level < 2.0 {
                    Some(ActivityLevel::Intermediate)
                } else if experience_level < 2.5 {
                    Some(ActivityLevel::Advanced)
                } else {
                    Some(ActivityLevel::Athlete)
                }
            }
        }
    }

    /// TDEE multiplier for an activity bucket
    pub fn activity_multiplier(level: Option<ActivityLevel>) -> f64 {
        match level {
            Some(ActivityLevel::Beginner) => 1.2,
            Some(ActivityLevel::Intermediate) => 1.375,
            Some(ActivityLevel::Advanced) => 1.55,
            Some(ActivityLevel::Athlete) => 1.725,
            None => DEFAULT_ACTIVITY_MULTIPLIER,
        }
    }

    /// Total daily energy expenditure (kcal/day)
    pub fn tdee(bmr: f64, experience_level: f64, lookup: ActivityLookup) -> f64 {
        bmr * Self::activity_multiplier(Self::activity_level(experience_level, lookup))
    }

    /// Calorie adjustment applied for a goal
    pub fn goal_adjustment(goal: Goal) -> f64 {
        match goal {
            Goal::WeightLoss => -500.0,
            Goal::Maintenance => 0.0,
            Goal::MuscleGain => 300.0,
        }
    }

    /// Recommended intake: TDEE plus goal adjustment plus exercise burn
    pub fn target_calories(tdee: f64, goal: Goal, calories_burned: u32) -> f64 {
        tdee + Self::goal_adjustment(goal) + f64::from(calories_burned)
    }

    /// Macro split for a goal
    pub fn macro_ratios(goal: Goal) -> MacroRatios {
        match goal {
            Goal::WeightLoss => MacroRatios {
                protein: 0.35,
                carbs: 0.40,
                fat: 0.25,
            },
            Goal::MuscleGain => MacroRatios {
                protein: 0.30,
                carbs: 0.50,
                fat: 0.20,
            },
            Goal::Maintenance => MacroRatios {
                protein: 0.25,
                carbs: 0.45,
                fat: 0.30,
            },
        }
    }

    /// Ideal macro grams for a calorie budget and goal
    pub fn macro_targets(calories: f64, goal: Goal) -> MacroTargets {
        let ratios = Self::macro_ratios(goal);
        MacroTargets {
            protein_g: calories * ratios.protein / KCAL_PER_GRAM_PROTEIN,
            carbs_g: calories * ratios.carbs / KCAL_PER_GRAM_CARBS,
            fat_g: calories * ratios.fat / KCAL_PER_GRAM_FAT,
        }
    }

    /// Daily protein target from body weight
    pub fn protein_target_by_weight(weight_kg: f64) -> f64 {
        weight_kg * PROTEIN_GRAMS_PER_KG
    }

    /// `actual / ideal` capped at 150%; a non-positive ideal yields 0
    pub fn adequacy_ratio(actual: f64, ideal: f64) -> f64 {
        Self::adequacy_ratio_capped(actual, ideal, ADEQUACY_CAP)
    }

    /// `actual / ideal` capped at `cap`; a non-positive ideal yields 0
    pub fn adequacy_ratio_capped(actual: f64, ideal: f64, cap: f64) -> f64 {
        if ideal <= 0.0 {
            return 0.0;
        }
        (actual / ideal).min(cap)
    }

    /// Daily water target in liters
    pub fn water_target(weight_kg: f64) -> f64 {
        weight_kg * WATER_LITERS_PER_KG
    }

    /// Percent of consumed calories from each macro; all zero without calories
    pub fn macro_percentages(
        protein_g: f64,
        carbs_g: f64,
        fat_g: f64,
        calories: f64,
    ) -> MacroPercentages {
        if calories <= 0.0 {
            return MacroPercentages::default();
        }

        MacroPercentages {
            protein_pct: protein_g * KCAL_PER_GRAM_PROTEIN / calories * 100.0,
            carbs_pct: carbs_g * KCAL_PER_GRAM_CARBS / calories * 100.0,
            fat_pct: fat_g * KCAL_PER_GRAM_FAT / calories * 100.0,
        }
    }

    /// 100 minus the summed percentage-point gaps to the ideal split, floored at 0
    pub fn macro_balance_score(actual: &MacroPercentages, ideal: &MacroRatios) -> f64 {
        let gap = (actual.protein_pct - ideal.protein * 100.0).abs()
            + (actual.carbs_pct - ideal.carbs * 100.0).abs()
            + (actual.fat_pct - ideal.fat * 100.0).abs();

        (100.0 - gap).max(0.0)
    }

    /// Calorie balance category
    ///
    /// - Significant deficit: < -300
    /// - Moderate deficit: -300 to -100
    /// - On target: within ±100
    /// - Moderate surplus: 100 to 300
    /// - Significant surplus: > 300
    pub fn classify_calorie_balance(balance: f64) -> CalorieBalanceCategory {
        if balance < -300.0 {
            CalorieBalanceCategory::SignificantDeficit
        } else if balance < -100.0 {
            CalorieBalanceCategory::ModerateDeficit
        } else if balance.abs() <= 100.0 {
            CalorieBalanceCategory::OnTarget
        } else if balance > 300.0 {
            CalorieBalanceCategory::SignificantSurplus
        } else {
            CalorieBalanceCategory::ModerateSurplus
        }
    }

    pub fn classify_workout_intensity(calories_burned: u32) -> WorkoutIntensity {
        if calories_burned < 200 {
            WorkoutIntensity::Light
        } else if calories_burned < 500 {
            WorkoutIntensity::Moderate
        } else {
            WorkoutIntensity::Intense
        }
    }

    /// Feedback tier for the raw 1-5 experience slider
    pub fn classify_experience(raw_level: u8) -> ExperienceTier {
        match raw_level {
            0 | 1 => ExperienceTier::Starter,
            2 => ExperienceTier::Progressing,
            3 => ExperienceTier::HighPerformance,
            _ => ExperienceTier::Elite,
        }
    }

    pub fn classify_meal_pattern(meals_per_day: u8) -> MealPattern {
        if meals_per_day < 3 {
            MealPattern::Infrequent
        } else if meals_per_day > 5 {
            MealPattern::Frequent
        } else {
            MealPattern::Balanced
        }
    }

    /// Weekly hours and calories from a typical session
    pub fn weekly_summary(
        workout_frequency: u8,
        session_duration_hours: f64,
        calories_burned: u32,
    ) -> WeeklySummary {
        WeeklySummary {
            total_hours: f64::from(workout_frequency) * session_duration_hours,
            estimated_calories: u32::from(workout_frequency) * calories_burned,
        }
    }

    /// Derive every metric for a profile
    ///
    /// Macro targets are sized from the calories actually consumed, so the
    /// adequacy ratios describe how the day's intake is composed. Protein
    /// adequacy is measured against the body-weight target instead.
    pub fn derive(
        profile: &UserProfile,
        lookup: ActivityLookup,
    ) -> Result<DerivedMetrics, ValidationError> {
        let bmi = Self::bmi(profile.weight_kg, profile.height_cm)?;
        let bmr = Self::bmr(profile.weight_kg, profile.height_cm, profile.age);

        let experience_level = profile.rescaled_experience_level();
        let activity_level = Self::activity_level(experience_level, lookup);
        let activity_multiplier = Self::activity_multiplier(activity_level);
        let tdee = bmr * activity_multiplier;

        let recommended_calories =
            Self::target_calories(tdee, profile.goal, profile.calories_burned);
        let consumed = f64::from(profile.calories_consumed);

        let macro_ratios = Self::macro_ratios(profile.goal);
        let ideal_macros = Self::macro_targets(consumed, profile.goal);
        let actual_macros =
            Self::macro_percentages(profile.protein_g, profile.carbs_g, profile.fat_g, consumed);

        let water_target_l = Self::water_target(profile.weight_kg);

        let adequacy = AdequacyRatios {
            protein: Self::adequacy_ratio(
                profile.protein_g,
                Self::protein_target_by_weight(profile.weight_kg),
            ),
            carbs: Self::adequacy_ratio(profile.carbs_g, ideal_macros.carbs_g),
            fat: Self::adequacy_ratio(profile.fat_g, ideal_macros.fat_g),
            water: Self::adequacy_ratio(profile.water_intake_l, water_target_l),
        };

        let metrics = DerivedMetrics {
            bmi,
            bmr,
            tdee,
            experience_level,
            activity_level,
            activity_multiplier,
            recommended_calories,
            calorie_balance: consumed - recommended_calories,
            macro_ratios,
            ideal_macros,
            actual_macros,
            adequacy,
            water_target_l,
            macro_balance_score: Self::macro_balance_score(&actual_macros, &macro_ratios),
            weekly: Self::weekly_summary(
                profile.workout_frequency,
                profile.session_duration_hours,
                profile.calories_burned,
            ),
        };

        tracing::debug!(
            bmi = metrics.bmi,
            bmr = metrics.bmr,
            tdee = metrics.tdee,
            recommended_calories = metrics.recommended_calories,
            macro_balance = metrics.macro_balance_score,
            "Derived health metrics"
        );

        Ok(metrics)
    }

    /// Category labels for a profile and its derived metrics
    pub fn labels(profile: &UserProfile, metrics: &DerivedMetrics) -> HealthLabels {
        HealthLabels {
            bmi: Self::classify_bmi(metrics.bmi),
            body_fat: Self::classify_body_fat(profile.body_fat_pct),
            experience: Self::classify_experience(profile.experience_level),
            calorie_balance: Self::classify_calorie_balance(metrics.calorie_balance),
            workout_intensity: Self::classify_workout_intensity(profile.calories_burned),
            meal_pattern: Self::classify_meal_pattern(profile.meals_per_day),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_bmi_reference_value() {
        let bmi = MetricCalculator::bmi(70.0, 170.0).unwrap();
        // 70 / 1.7^2 = 24.221...
        assert!((bmi - 24.22).abs() < 0.01);
        assert_eq!(MetricCalculator::classify_bmi(bmi), BmiCategory::Healthy);
    }

    #[test]
    fn test_bmi_rejects_non_positive_height() {
        assert_eq!(
            MetricCalculator::bmi(70.0, 0.0),
            Err(ValidationError::NonPositive {
                field: "height_cm",
                value: 0.0
            })
        );
        assert!(MetricCalculator::bmi(70.0, -170.0).is_err());
        assert!(MetricCalculator::bmi(70.0, f64::INFINITY).is_err());
    }

    #[test]
    fn test_bmi_classification_thresholds() {
        assert_eq!(MetricCalculator::classify_bmi(18.4), BmiCategory::Underweight);
        assert_eq!(MetricCalculator::classify_bmi(18.5), BmiCategory::Healthy);
        assert_eq!(MetricCalculator::classify_bmi(25.0), BmiCategory::Overweight);
        assert_eq!(MetricCalculator::classify_bmi(30.0), BmiCategory::Obese);
    }

    #[test]
    fn test_body_fat_classification_thresholds() {
        assert_eq!(MetricCalculator::classify_body_fat(13.9), BodyFatCategory::Athletic);
        assert_eq!(MetricCalculator::classify_body_fat(14.0), BodyFatCategory::Healthy);
        assert_eq!(MetricCalculator::classify_body_fat(24.0), BodyFatCategory::High);
        assert_eq!(MetricCalculator::classify_body_fat(32.0), BodyFatCategory::VeryHigh);
    }

    #[test]
    fn test_bmr_mifflin_st_jeor() {
        // 700 + 1062.5 - 150 + 5
        assert!(approx_eq(MetricCalculator::bmr(70.0, 170.0, 30), 1617.5));
    }

    #[test]
    fn test_activity_buckets() {
        let lookup = ActivityLookup::Bucketed;
        assert_eq!(
            MetricCalculator::activity_level(1.0, lookup),
            Some(ActivityLevel::Beginner)
        );
        assert_eq!(
            MetricCalculator::activity_level(1.5, lookup),
            Some(ActivityLevel::Intermediate)
        );
        assert_eq!(
            MetricCalculator::activity_level(2.0, lookup),
            Some(ActivityLevel::Advanced)
        );
        assert_eq!(
            MetricCalculator::activity_level(2.5, lookup),
            Some(ActivityLevel::Athlete)
        );
        assert_eq!(
            MetricCalculator::activity_level(3.0, lookup),
            Some(ActivityLevel::Athlete)
        );
        assert_eq!(MetricCalculator::activity_level(3.5, lookup), None);
    }

    #[test]
    fn test_legacy_lookup_always_uses_default() {
        for level in [1.0, 1.5, 2.0, 2.5, 3.0] {
            assert_eq!(
                MetricCalculator::activity_level(level, ActivityLookup::Legacy),
                None
            );
            assert!(approx_eq(
                MetricCalculator::tdee(1000.0, level, ActivityLookup::Legacy),
                1375.0
            ));
        }
    }

    #[test]
    fn test_tdee_uses_bucket_multiplier() {
        assert!(approx_eq(
            MetricCalculator::tdee(1617.5, 1.0, ActivityLookup::Bucketed),
            1617.5 * 1.2
        ));
        assert!(approx_eq(
            MetricCalculator::tdee(1617.5, 3.0, ActivityLookup::Bucketed),
            1617.5 * 1.725
        ));
    }

    #[test]
    fn test_target_calories() {
        assert!(approx_eq(
            MetricCalculator::target_calories(2000.0, Goal::WeightLoss, 300),
            1800.0
        ));
        assert!(approx_eq(
            MetricCalculator::target_calories(2000.0, Goal::Maintenance, 0),
            2000.0
        ));
        assert!(approx_eq(
            MetricCalculator::target_calories(2000.0, Goal::MuscleGain, 200),
            2500.0
        ));
    }

    #[test]
    fn test_macro_ratios_sum_to_one() {
        for goal in [Goal::WeightLoss, Goal::Maintenance, Goal::MuscleGain] {
            assert!(approx_eq(MetricCalculator::macro_ratios(goal).sum(), 1.0));
        }
    }

    #[test]
    fn test_macro_targets() {
        let targets = MetricCalculator::macro_targets(2000.0, Goal::Maintenance);
        assert!(approx_eq(targets.protein_g, 125.0));
        assert!(approx_eq(targets.carbs_g, 225.0));
        assert!(approx_eq(targets.fat_g, 2000.0 * 0.30 / 9.0));
    }

    #[test]
    fn test_adequacy_ratio() {
        assert!(approx_eq(MetricCalculator::adequacy_ratio(120.0, 120.0), 1.0));
        assert!(approx_eq(MetricCalculator::adequacy_ratio(60.0, 120.0), 0.5));
        assert!(approx_eq(MetricCalculator::adequacy_ratio(500.0, 120.0), 1.5));
        assert_eq!(MetricCalculator::adequacy_ratio(50.0, 0.0), 0.0);
        assert_eq!(MetricCalculator::adequacy_ratio(50.0, -10.0), 0.0);
        assert!(approx_eq(
            MetricCalculator::adequacy_ratio_capped(500.0, 100.0, 2.0),
            2.0
        ));
    }

    #[test]
    fn test_water_target() {
        assert!(approx_eq(MetricCalculator::water_target(70.0), 2.31));
    }

    #[test]
    fn test_macro_percentages_without_calories() {
        let pct = MetricCalculator::macro_percentages(100.0, 200.0, 50.0, 0.0);
        assert_eq!(pct, MacroPercentages::default());
    }

    #[test]
    fn test_macro_balance_score() {
        let ideal = MetricCalculator::macro_ratios(Goal::Maintenance);
        let perfect = MacroPercentages {
            protein_pct: 25.0,
            carbs_pct: 45.0,
            fat_pct: 30.0,
        };
        assert!(approx_eq(
            MetricCalculator::macro_balance_score(&perfect, &ideal),
            100.0
        ));

        let skewed = MacroPercentages {
            protein_pct: 35.0,
            carbs_pct: 40.0,
            fat_pct: 25.0,
        };
        // gaps: 10 + 5 + 5
        assert!(approx_eq(
            MetricCalculator::macro_balance_score(&skewed, &ideal),
            80.0
        ));

        let extreme = MacroPercentages {
            protein_pct: 100.0,
            carbs_pct: 0.0,
            fat_pct: 0.0,
        };
        assert_eq!(MetricCalculator::macro_balance_score(&extreme, &ideal), 0.0);
    }

    #[test]
    fn test_calorie_balance_categories() {
        assert_eq!(
            MetricCalculator::classify_calorie_balance(-301.0),
            CalorieBalanceCategory::SignificantDeficit
        );
        assert_eq!(
            MetricCalculator::classify_calorie_balance(-150.0),
            CalorieBalanceCategory::ModerateDeficit
        );
        assert_eq!(
            MetricCalculator::classify_calorie_balance(-100.0),
            CalorieBalanceCategory::OnTarget
        );
        assert_eq!(
            MetricCalculator::classify_calorie_balance(100.0),
            CalorieBalanceCategory::OnTarget
        );
        assert_eq!(
            MetricCalculator::classify_calorie_balance(250.0),
            CalorieBalanceCategory::ModerateSurplus
        );
        assert_eq!(
            MetricCalculator::classify_calorie_balance(301.0),
            CalorieBalanceCategory::SignificantSurplus
        );
    }

    #[test]
    fn test_feedback_categories() {
        assert_eq!(
            MetricCalculator::classify_workout_intensity(199),
            WorkoutIntensity::Light
        );
        assert_eq!(
            MetricCalculator::classify_workout_intensity(350),
            WorkoutIntensity::Moderate
        );
        assert_eq!(
            MetricCalculator::classify_workout_intensity(500),
            WorkoutIntensity::Intense
        );

        assert_eq!(MetricCalculator::classify_experience(1), ExperienceTier::Starter);
        assert_eq!(MetricCalculator::classify_experience(2), ExperienceTier::Progressing);
        assert_eq!(MetricCalculator::classify_experience(3), ExperienceTier::HighPerformance);
        assert_eq!(MetricCalculator::classify_experience(4), ExperienceTier::Elite);
        assert_eq!(MetricCalculator::classify_experience(5), ExperienceTier::Elite);

        assert_eq!(MetricCalculator::classify_meal_pattern(2), MealPattern::Infrequent);
        assert_eq!(MetricCalculator::classify_meal_pattern(4), MealPattern::Balanced);
        assert_eq!(MetricCalculator::classify_meal_pattern(6), MealPattern::Frequent);
    }

    #[test]
    fn test_weekly_summary() {
        let summary = MetricCalculator::weekly_summary(3, 1.25, 350);
        assert!(approx_eq(summary.total_hours, 3.75));
        assert_eq!(summary.estimated_calories, 1050);
    }

    #[test]
    fn test_derive_default_profile() {
        let profile = UserProfile::default();
        let metrics = MetricCalculator::derive(&profile, ActivityLookup::Bucketed).unwrap();

        assert!(approx_eq(metrics.bmr, 1617.5));
        assert!(approx_eq(metrics.experience_level, 2.0));
        assert_eq!(metrics.activity_level, Some(ActivityLevel::Advanced));
        assert!(approx_eq(metrics.tdee, 1617.5 * 1.55));
        assert!(approx_eq(
            metrics.recommended_calories,
            1617.5 * 1.55 + 350.0
        ));
        assert!(approx_eq(
            metrics.calorie_balance,
            2500.0 - metrics.recommended_calories
        ));
        // 155g protein against a 112g body-weight target
        assert!(approx_eq(metrics.adequacy.protein, 155.0 / 112.0));
        assert!(metrics.adequacy.water < 1.0);
        assert!(metrics.macro_balance_score > 90.0);
    }

    #[test]
    fn test_derive_propagates_invalid_height() {
        let mut profile = UserProfile::default();
        profile.height_cm = 0.0;
        assert!(MetricCalculator::derive(&profile, ActivityLookup::Bucketed).is_err());
    }

    // Property-based tests using proptest
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn test_bmi_monotonic_in_weight(
            height in 100.0f64..250.0,
            weight in 30.0f64..199.0,
            delta in 0.1f64..50.0
        ) {
            let lighter = MetricCalculator::bmi(weight, height).unwrap();
            let heavier = MetricCalculator::bmi(weight + delta, height).unwrap();
            prop_assert!(heavier > lighter);
        }

        #[test]
        fn test_bmi_monotonic_in_height(
            height in 100.0f64..249.0,
            weight in 30.0f64..200.0,
            delta in 0.1f64..50.0
        ) {
            let shorter = MetricCalculator::bmi(weight, height).unwrap();
            let taller = MetricCalculator::bmi(weight, height + delta).unwrap();
            prop_assert!(taller < shorter);
        }

        #[test]
        fn test_adequacy_ratio_bounds(
            actual in 0.0f64..10_000.0,
            ideal in 0.001f64..5_000.0
        ) {
            let ratio = MetricCalculator::adequacy_ratio(actual, ideal);
            prop_assert!(ratio >= 0.0);
            prop_assert!(ratio <= ADEQUACY_CAP);
        }

        #[test]
        fn test_adequacy_of_exact_intake_is_one(ideal in 0.001f64..5_000.0) {
            prop_assert!((MetricCalculator::adequacy_ratio(ideal, ideal) - 1.0).abs() < 1e-12);
        }

        #[test]
        fn test_macro_balance_score_bounds(
            protein in 0.0f64..200.0,
            carbs in 0.0f64..200.0,
            fat in 0.0f64..200.0
        ) {
            let actual = MacroPercentages { protein_pct: protein, carbs_pct: carbs, fat_pct: fat };
            for goal in [Goal::WeightLoss, Goal::Maintenance, Goal::MuscleGain] {
                let score = MetricCalculator::macro_balance_score(
                    &actual,
                    &MetricCalculator::macro_ratios(goal),
                );
                prop_assert!((0.0..=100.0).contains(&score));
            }
        }
    }
}
