//! # Nutrition Constants Module
//!
//! Fixed lookup tables and coefficients used by the calculator. Tables are
//! indexed by the enum discriminant (`ActivityLevel::index`, `Goal::index`).

use crate::nutrition_model::{ActivityLevel, Goal};

/// Activity multipliers applied to BMR, ordered like `ActivityLevel::ALL`
pub const ACTIVITY_MULTIPLIERS: [f64; 5] = [
    1.2,   // sedentary
    1.375, // light
    1.55,  // moderate
    1.725, // high
    1.9,   // very_high
];

/// Fractional calorie adjustment per goal, ordered like `Goal::ALL`
pub const GOAL_ADJUSTMENTS: [f64; 3] = [
    -0.15, // fat_loss
    0.0,   // maintain
    0.10,  // gain
];

/// Target calories never go below this share of TDEE
pub const MIN_TARGET_TDEE_RATIO: f64 = 0.75;
/// Target calories never exceed this share of TDEE
pub const MAX_TARGET_TDEE_RATIO: f64 = 1.15;

pub const KCAL_PER_GRAM_PROTEIN: f64 = 4.0;
pub const KCAL_PER_GRAM_FAT: f64 = 9.0;
pub const KCAL_PER_GRAM_CARBS: f64 = 4.0;

/// Per-kilogram allocation for one macro
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PerKgRange {
    /// Default grams per kg of body weight
    pub default: f64,
    /// Floor in grams per kg; adjustments are clamped up to it
    pub min: f64,
    /// Ceiling in grams per kg for the default allocation
    pub max: f64,
}

impl PerKgRange {
    /// Default allocation in grams for `weight_kg`, kept inside `[min, max]`
    pub fn default_grams(&self, weight_kg: f64) -> f64 {
        // max/min instead of clamp: a negative weight must not panic
        (self.default * weight_kg)
            .max(self.min * weight_kg)
            .min(self.max * weight_kg)
    }

    /// Floor in grams for `weight_kg`
    ///
    /// Never negative. A weight that is not finite gives a floor of zero.
    pub fn floor_grams(&self, weight_kg: f64) -> f64 {
        if weight_kg.is_finite() {
            (self.min * weight_kg).max(0.0)
        } else {
            0.0
        }
    }
}

pub const PROTEIN_PER_KG: PerKgRange = PerKgRange {
    default: 1.6,
    min: 1.4,
    max: 2.2,
};

pub const FAT_PER_KG: PerKgRange = PerKgRange {
    default: 0.8,
    min: 0.6,
    max: 1.2,
};

/// Mifflin-St Jeor coefficients
pub const MSJ_WEIGHT_COEF: f64 = 10.0;
pub const MSJ_HEIGHT_COEF: f64 = 6.25;
pub const MSJ_AGE_COEF: f64 = -5.0;
pub const MSJ_MALE_OFFSET: f64 = 5.0;
pub const MSJ_FEMALE_OFFSET: f64 = -161.0;

/// Revised Harris-Benedict coefficients: (constant, weight, height, age)
pub const HARRIS_MALE: (f64, f64, f64, f64) = (88.362, 13.397, 4.799, -5.677);
pub const HARRIS_FEMALE: (f64, f64, f64, f64) = (447.593, 9.247, 3.098, -4.330);

/// Multiplier for an activity level
pub fn activity_multiplier(activity: ActivityLevel) -> f64 {
    ACTIVITY_MULTIPLIERS[activity.index()]
}

/// Fractional calorie adjustment for a goal
pub fn goal_adjustment(goal: Goal) -> f64 {
    GOAL_ADJUSTMENTS[goal.index()]
}
