//! # Calculation Engine Module
//!
//! Deterministic nutrition plan calculation: BMR, TDEE, goal-adjusted calorie
//! target and the default macro split.
//!
//! ## Pipeline
//!
//! 1. BMR from the profile (Mifflin-St Jeor by default, Harris-Benedict on request)
//! 2. TDEE = BMR x activity multiplier
//! 3. Target calories = TDEE adjusted for the goal, clamped to 75%..115% of TDEE
//! 4. Protein and fat allocated per kg of body weight, carbohydrate takes the rest
//!
//! All functions are pure; nothing here touches I/O or shared state.

use crate::nutrition_constants::{
    activity_multiplier, goal_adjustment, FAT_PER_KG, HARRIS_FEMALE, HARRIS_MALE,
    MAX_TARGET_TDEE_RATIO, MIN_TARGET_TDEE_RATIO, MSJ_AGE_COEF, MSJ_FEMALE_OFFSET,
    MSJ_HEIGHT_COEF, MSJ_MALE_OFFSET, MSJ_WEIGHT_COEF, PROTEIN_PER_KG,
};
use crate::nutrition_errors::NutritionError;
use crate::nutrition_model::{
    ActivityLevel, Goal, MacroSplit, Nutrient, NutritionPlan, Profile, Sex,
};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::{debug, info};

/// BMR estimation formula
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BmrFormula {
    /// Mifflin-St Jeor (1990)
    #[default]
    MifflinStJeor,
    /// Harris-Benedict, revised by Roza and Shizgal (1984)
    HarrisBenedict,
}

impl FromStr for BmrFormula {
    type Err = NutritionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "mifflin" | "mifflin_st_jeor" => Ok(BmrFormula::MifflinStJeor),
            "harris" | "harris_benedict" => Ok(BmrFormula::HarrisBenedict),
            other => Err(NutritionError::InvalidInput(format!(
                "unknown BMR formula '{other}'"
            ))),
        }
    }
}

/// Round to the nearest 0.1
pub fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Calculate basal metabolic rate with the Mifflin-St Jeor equation
///
/// `10 x weight_kg + 6.25 x height_cm - 5 x age`, then `+5` for men and
/// `-161` for women, rounded to whole kcal.
///
/// # Examples
///
/// ```rust
/// use nutrition_coach::calculation_engine::calculate_bmr;
/// use nutrition_coach::nutrition_model::{ActivityLevel, Goal, Profile, Sex};
///
/// let profile = Profile {
///     age: 30,
///     sex: Sex::Male,
///     height_cm: 180.0,
///     weight_kg: 80.0,
///     activity: ActivityLevel::Moderate,
///     goal: Goal::Maintain,
/// };
/// assert_eq!(calculate_bmr(&profile), 1780);
/// ```
pub fn calculate_bmr(profile: &Profile) -> i32 {
    calculate_bmr_with(profile, BmrFormula::MifflinStJeor)
}

/// Calculate basal metabolic rate with the chosen formula
pub fn calculate_bmr_with(profile: &Profile, formula: BmrFormula) -> i32 {
    bmr_estimate(profile, formula).round() as i32
}

fn bmr_estimate(profile: &Profile, formula: BmrFormula) -> f64 {
    let age = f64::from(profile.age);
    let bmr = match formula {
        BmrFormula::MifflinStJeor => {
            let offset = match profile.sex {
                Sex::Male => MSJ_MALE_OFFSET,
                Sex::Female => MSJ_FEMALE_OFFSET,
            };
            MSJ_WEIGHT_COEF * profile.weight_kg
                + MSJ_HEIGHT_COEF * profile.height_cm
                + MSJ_AGE_COEF * age
                + offset
        }
        BmrFormula::HarrisBenedict => {
            let (constant, weight_coef, height_coef, age_coef) = match profile.sex {
                Sex::Male => HARRIS_MALE,
                Sex::Female => HARRIS_FEMALE,
            };
            constant
                + weight_coef * profile.weight_kg
                + height_coef * profile.height_cm
                + age_coef * age
        }
    };

    debug!(?formula, sex = %profile.sex, bmr, "Calculated BMR");
    bmr
}

/// Calculate total daily energy expenditure, rounded to whole kcal
pub fn calculate_tdee(bmr: i32, activity: ActivityLevel) -> i32 {
    tdee_estimate(bmr, activity).round() as i32
}

fn tdee_estimate(bmr: i32, activity: ActivityLevel) -> f64 {
    f64::from(bmr) * activity_multiplier(activity)
}

/// Round an energy value to whole kcal, rejecting values an `i32` cannot hold
fn whole_kcal(value: f64, what: &str) -> Result<i32, NutritionError> {
    let rounded = value.round();
    if rounded.is_finite() && rounded >= f64::from(i32::MIN) && rounded <= f64::from(i32::MAX) {
        Ok(rounded as i32)
    } else {
        Err(NutritionError::InvalidProfile(format!(
            "profile yields an out-of-range {what} ({value} kcal)"
        )))
    }
}

/// Calculate the goal-adjusted calorie target
///
/// The nominal goal adjustment is clamped to `[0.75 x tdee, 1.15 x tdee]`; the
/// clamp wins whenever the two disagree. The result is not rounded.
pub fn calculate_target_calories(tdee: i32, goal: Goal) -> f64 {
    let tdee = f64::from(tdee);
    let nominal = tdee * (1.0 + goal_adjustment(goal));
    let min_calories = tdee * MIN_TARGET_TDEE_RATIO;
    let max_calories = tdee * MAX_TARGET_TDEE_RATIO;

    nominal.max(min_calories).min(max_calories)
}

/// Carbohydrate grams that fill the calorie budget left by protein and fat
///
/// Never negative: when protein and fat already exceed the target, carbs is zero.
pub fn carbs_remainder(target_kcal: f64, protein_g: f64, fat_g: f64) -> f64 {
    let remaining = target_kcal
        - protein_g * Nutrient::Protein.kcal_per_gram()
        - fat_g * Nutrient::Fat.kcal_per_gram();
    (remaining / Nutrient::Carbs.kcal_per_gram()).max(0.0)
}

/// Calculate the default macro split for a calorie target
///
/// Protein 1.6 g/kg (kept within 1.4..2.2 g/kg), fat 0.8 g/kg (kept within
/// 0.6..1.2 g/kg), carbohydrate as the remainder. Values are rounded to 0.1 g.
pub fn calculate_default_macros(target_calories: f64, weight_kg: f64) -> MacroSplit {
    let protein_g = PROTEIN_PER_KG.default_grams(weight_kg);
    let fat_g = FAT_PER_KG.default_grams(weight_kg);
    let carbs_g = carbs_remainder(target_calories, protein_g, fat_g);

    if carbs_g == 0.0 {
        debug!(
            target_calories,
            protein_g, fat_g, "Protein and fat exhaust the calorie target, carbs set to zero"
        );
    }

    MacroSplit {
        protein_g: round_to_tenth(protein_g),
        fat_g: round_to_tenth(fat_g),
        carbs_g: round_to_tenth(carbs_g),
    }
}

/// Calculate a complete nutrition plan for a profile
///
/// # Errors
///
/// Returns [`NutritionError::InvalidProfile`] when age, height or weight is not
/// positive, or when the profile yields a non-positive BMR.
///
/// # Examples
///
/// ```rust
/// use nutrition_coach::calculation_engine::calculate_nutrition_plan;
/// use nutrition_coach::nutrition_model::{ActivityLevel, Goal, Profile, Sex};
///
/// let profile = Profile {
///     age: 30,
///     sex: Sex::Male,
///     height_cm: 180.0,
///     weight_kg: 80.0,
///     activity: ActivityLevel::Moderate,
///     goal: Goal::Maintain,
/// };
/// let plan = calculate_nutrition_plan(&profile)?;
/// assert_eq!(plan.tdee, 2759);
/// assert_eq!(plan.kcal, 2759);
/// assert_eq!(plan.protein_g, 128.0);
/// # Ok::<(), nutrition_coach::nutrition_errors::NutritionError>(())
/// ```
pub fn calculate_nutrition_plan(profile: &Profile) -> Result<NutritionPlan, NutritionError> {
    calculate_nutrition_plan_with(profile, BmrFormula::MifflinStJeor)
}

/// Calculate a complete nutrition plan using the chosen BMR formula
pub fn calculate_nutrition_plan_with(
    profile: &Profile,
    formula: BmrFormula,
) -> Result<NutritionPlan, NutritionError> {
    profile.validate()?;

    let bmr = whole_kcal(bmr_estimate(profile, formula), "BMR")?;
    if bmr <= 0 {
        return Err(NutritionError::InvalidProfile(format!(
            "profile yields a non-positive BMR ({bmr} kcal)"
        )));
    }

    let tdee = whole_kcal(tdee_estimate(bmr, profile.activity), "TDEE")?;
    let target_calories = calculate_target_calories(tdee, profile.goal);
    let macros = calculate_default_macros(target_calories, profile.weight_kg);

    let plan = NutritionPlan {
        bmr,
        tdee,
        kcal: whole_kcal(target_calories, "calorie target")?,
        protein_g: macros.protein_g,
        fat_g: macros.fat_g,
        carbs_g: macros.carbs_g,
    };

    info!(
        bmr = plan.bmr,
        tdee = plan.tdee,
        kcal = plan.kcal,
        activity = %profile.activity,
        goal = %profile.goal,
        "Calculated nutrition plan"
    );
    Ok(plan)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn baseline_profile() -> Profile {
        Profile {
            age: 30,
            sex: Sex::Male,
            height_cm: 180.0,
            weight_kg: 80.0,
            activity: ActivityLevel::Moderate,
            goal: Goal::Maintain,
        }
    }

    #[test]
    fn test_bmr_sex_offset() {
        let male = baseline_profile();
        let female = Profile {
            sex: Sex::Female,
            ..baseline_profile()
        };
        assert_eq!(calculate_bmr(&male) - calculate_bmr(&female), 166);
    }

    #[test]
    fn test_bmr_rounds_to_nearest() {
        // 10*60 + 6.25*165 - 5*25 - 161 = 1345.25
        let profile = Profile {
            age: 25,
            sex: Sex::Female,
            height_cm: 165.0,
            weight_kg: 60.0,
            ..baseline_profile()
        };
        assert_eq!(calculate_bmr(&profile), 1345);
    }

    #[test]
    fn test_harris_benedict_differs_from_mifflin() {
        let profile = baseline_profile();
        // 88.362 + 13.397*80 + 4.799*180 - 5.677*30 = 1853.632
        assert_eq!(calculate_bmr_with(&profile, BmrFormula::HarrisBenedict), 1854);
        assert_eq!(calculate_bmr_with(&profile, BmrFormula::MifflinStJeor), 1780);
    }

    #[test]
    fn test_tdee_monotonic_in_activity() {
        let tdees: Vec<i32> = ActivityLevel::ALL
            .iter()
            .map(|level| calculate_tdee(1780, *level))
            .collect();
        for pair in tdees.windows(2) {
            assert!(pair[0] < pair[1]);
        }
        assert_eq!(tdees[0], 2136);
        assert_eq!(tdees[2], 2759);
    }

    #[test]
    fn test_target_calories_per_goal() {
        assert!((calculate_target_calories(2000, Goal::FatLoss) - 1700.0).abs() < 1e-9);
        assert!((calculate_target_calories(2000, Goal::Maintain) - 2000.0).abs() < 1e-9);
        assert!((calculate_target_calories(2000, Goal::Gain) - 2200.0).abs() < 1e-9);
    }

    #[test]
    fn test_target_calories_within_clamp() {
        for tdee in [1200, 1850, 2759, 4100] {
            for goal in Goal::ALL {
                let target = calculate_target_calories(tdee, goal);
                let tdee = f64::from(tdee);
                assert!(target >= tdee * 0.75 - 1e-9);
                assert!(target <= tdee * 1.15 + 1e-9);
            }
        }
    }

    #[test]
    fn test_default_macros_baseline() {
        let macros = calculate_default_macros(2759.0, 80.0);
        assert_eq!(macros.protein_g, 128.0);
        assert_eq!(macros.fat_g, 64.0);
        assert_eq!(macros.carbs_g, 417.8);
    }

    #[test]
    fn test_default_macros_carbs_never_negative() {
        // 150 kg: protein 240 g (960 kcal) + fat 120 g (1080 kcal) > 1500 kcal
        let macros = calculate_default_macros(1500.0, 150.0);
        assert_eq!(macros.carbs_g, 0.0);
        assert_eq!(macros.protein_g, 240.0);
        assert_eq!(macros.fat_g, 120.0);
    }

    #[test]
    fn test_nutrition_plan_baseline() {
        let plan = calculate_nutrition_plan(&baseline_profile()).unwrap();
        assert_eq!(plan.bmr, 1780);
        assert_eq!(plan.tdee, 2759);
        assert_eq!(plan.kcal, 2759);
        assert_eq!(plan.protein_g, 128.0);
        assert_eq!(plan.fat_g, 64.0);
        assert_eq!(plan.carbs_g, 417.8);
    }

    #[test]
    fn test_nutrition_plan_rejects_invalid_profile() {
        let profile = Profile {
            weight_kg: 0.0,
            ..baseline_profile()
        };
        assert!(matches!(
            calculate_nutrition_plan(&profile),
            Err(NutritionError::InvalidProfile(_))
        ));
    }

    #[test]
    fn test_nutrition_plan_rejects_non_positive_bmr() {
        // 10*1 + 6.25*1 - 5*120 - 161 < 0
        let profile = Profile {
            age: 120,
            sex: Sex::Female,
            height_cm: 1.0,
            weight_kg: 1.0,
            ..baseline_profile()
        };
        let err = calculate_nutrition_plan(&profile).unwrap_err();
        assert!(err.to_string().contains("non-positive BMR"));
    }

    #[test]
    fn test_nutrition_plan_rejects_energy_beyond_i32() {
        let huge = Profile {
            age: u32::MAX,
            height_cm: 1e300,
            weight_kg: 1e300,
            ..baseline_profile()
        };
        let err = calculate_nutrition_plan(&huge).unwrap_err();
        assert!(matches!(err, NutritionError::InvalidProfile(_)));
        assert!(err.to_string().contains("BMR"));

        // BMR ~1.5e9 still fits, x1.9 for TDEE does not
        let heavy = Profile {
            weight_kg: 1.5e8,
            activity: ActivityLevel::VeryHigh,
            ..baseline_profile()
        };
        let err = calculate_nutrition_plan(&heavy).unwrap_err();
        assert!(matches!(err, NutritionError::InvalidProfile(_)));
        assert!(err.to_string().contains("TDEE"));
    }

    #[test]
    fn test_whole_kcal_bounds() {
        assert_eq!(whole_kcal(2758.6, "TDEE").unwrap(), 2759);
        assert_eq!(whole_kcal(f64::from(i32::MAX), "TDEE").unwrap(), i32::MAX);
        assert!(whole_kcal(f64::from(i32::MAX) + 1.0, "TDEE").is_err());
        assert!(whole_kcal(f64::NAN, "BMR").is_err());
        assert!(whole_kcal(f64::INFINITY, "BMR").is_err());
    }

    #[test]
    fn test_formula_parsing() {
        assert_eq!("harris".parse::<BmrFormula>().unwrap(), BmrFormula::HarrisBenedict);
        assert_eq!("Mifflin".parse::<BmrFormula>().unwrap(), BmrFormula::MifflinStJeor);
        assert!("katch".parse::<BmrFormula>().is_err());
        assert_eq!(BmrFormula::default(), BmrFormula::MifflinStJeor);
    }
}
