//! # Nutrition Data Model
//!
//! This module defines the data structures the calculator works on: the user's
//! biometric profile, the computed nutrition plan, and macro adjustment requests.
//!
//! ## Core Concepts
//!
//! - **Profile**: age, sex, height, weight, activity level and goal of one user
//! - **NutritionPlan**: BMR, TDEE, target calories and the macro split in grams
//! - **MacroAdjustment**: a requested change to one macro, in grams or percent
//! - **AdjustmentSet**: up to one adjustment per macro, keyed by nutrient
//!
//! ## Usage
//!
//! ```rust
//! use nutrition_coach::nutrition_model::{AdjustmentSet, MacroAdjustment, Nutrient};
//!
//! let set = AdjustmentSet::new()
//!     .with(Nutrient::Protein, MacroAdjustment::percent(20.0))
//!     .with(Nutrient::Fat, MacroAdjustment::grams(70.0));
//! assert_eq!(set.len(), 2);
//! ```

use crate::nutrition_errors::NutritionError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Biological sex, used for the BMR offset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sex {
    Male,
    Female,
}

/// Activity level; the discriminant indexes the activity multiplier table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityLevel {
    /// Little or no exercise
    Sedentary = 0,
    /// Light exercise 1-3 times a week
    Light = 1,
    /// Moderate exercise 3-5 times a week
    Moderate = 2,
    /// Hard exercise 6-7 times a week
    High = 3,
    /// Training twice a day or physical job
    VeryHigh = 4,
}

/// Stated goal; the discriminant indexes the goal adjustment table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Goal {
    FatLoss = 0,
    Maintain = 1,
    Gain = 2,
}

/// Macronutrient
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Nutrient {
    Protein,
    Fat,
    Carbs,
}

/// Unit of a macro adjustment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdjustmentUnit {
    /// Absolute grams per day, replaces the current value
    Grams,
    /// Relative change of the current value, e.g. `+20` or `-10`
    Percent,
}

/// User biometric profile, immutable per calculation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    /// Age in full years
    pub age: u32,
    pub sex: Sex,
    /// Height in centimeters
    pub height_cm: f64,
    /// Body weight in kilograms
    pub weight_kg: f64,
    pub activity: ActivityLevel,
    pub goal: Goal,
}

/// Daily calorie target and macro split
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NutritionPlan {
    /// Basal metabolic rate, kcal/day
    pub bmr: i32,
    /// Total daily energy expenditure, kcal/day
    pub tdee: i32,
    /// Goal-adjusted calorie target, kcal/day
    pub kcal: i32,
    pub protein_g: f64,
    pub fat_g: f64,
    pub carbs_g: f64,
}

/// Protein/fat/carbs grams without the energy figures
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MacroSplit {
    pub protein_g: f64,
    pub fat_g: f64,
    pub carbs_g: f64,
}

/// A requested change to a single macro
///
/// Serialized as `{"value": 30, "type": "grams"}`, the shape stored as
/// adjustment rules alongside a user's plan.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MacroAdjustment {
    pub value: f64,
    #[serde(rename = "type")]
    pub unit: AdjustmentUnit,
}

/// Sparse set of macro adjustments, at most one per nutrient
///
/// A missing nutrient means "no change requested", never zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AdjustmentSet {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub protein: Option<MacroAdjustment>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fat: Option<MacroAdjustment>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub carbs: Option<MacroAdjustment>,
}

impl Sex {
    pub fn as_str(self) -> &'static str {
        match self {
            Sex::Male => "male",
            Sex::Female => "female",
        }
    }
}

impl ActivityLevel {
    /// All levels from least to most active
    pub const ALL: [ActivityLevel; 5] = [
        ActivityLevel::Sedentary,
        ActivityLevel::Light,
        ActivityLevel::Moderate,
        ActivityLevel::High,
        ActivityLevel::VeryHigh,
    ];

    /// Position of this level in the activity tables
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ActivityLevel::Sedentary => "sedentary",
            ActivityLevel::Light => "light",
            ActivityLevel::Moderate => "moderate",
            ActivityLevel::High => "high",
            ActivityLevel::VeryHigh => "very_high",
        }
    }
}

impl Goal {
    pub const ALL: [Goal; 3] = [Goal::FatLoss, Goal::Maintain, Goal::Gain];

    /// Position of this goal in the goal adjustment table
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Goal::FatLoss => "fat_loss",
            Goal::Maintain => "maintain",
            Goal::Gain => "gain",
        }
    }
}

impl Nutrient {
    /// Nutrients in reporting order
    pub const ALL: [Nutrient; 3] = [Nutrient::Protein, Nutrient::Fat, Nutrient::Carbs];

    /// Energy density in kcal per gram
    pub fn kcal_per_gram(self) -> f64 {
        match self {
            Nutrient::Protein => crate::nutrition_constants::KCAL_PER_GRAM_PROTEIN,
            Nutrient::Fat => crate::nutrition_constants::KCAL_PER_GRAM_FAT,
            Nutrient::Carbs => crate::nutrition_constants::KCAL_PER_GRAM_CARBS,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Nutrient::Protein => "protein",
            Nutrient::Fat => "fat",
            Nutrient::Carbs => "carbs",
        }
    }
}

macro_rules! impl_display_via_as_str {
    ($($ty:ty),*) => {
        $(
            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(self.as_str())
                }
            }
        )*
    };
}

impl_display_via_as_str!(Sex, ActivityLevel, Goal, Nutrient);

impl FromStr for Sex {
    type Err = NutritionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "male" | "m" | "м" | "мужской" | "мужчина" => Ok(Sex::Male),
            "female" | "f" | "ж" | "женский" | "женщина" => Ok(Sex::Female),
            other => Err(NutritionError::InvalidInput(format!("unknown sex '{other}'"))),
        }
    }
}

impl FromStr for ActivityLevel {
    type Err = NutritionError;

    /// Accepts canonical names and the `active`/`very_active` names used by
    /// earlier profile records.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "sedentary" => Ok(ActivityLevel::Sedentary),
            "light" => Ok(ActivityLevel::Light),
            "moderate" => Ok(ActivityLevel::Moderate),
            "high" | "active" => Ok(ActivityLevel::High),
            "very_high" | "very_active" => Ok(ActivityLevel::VeryHigh),
            other => Err(NutritionError::InvalidInput(format!(
                "unknown activity level '{other}'"
            ))),
        }
    }
}

impl FromStr for Goal {
    type Err = NutritionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "fat_loss" | "lose" => Ok(Goal::FatLoss),
            "maintain" => Ok(Goal::Maintain),
            "gain" => Ok(Goal::Gain),
            other => Err(NutritionError::InvalidInput(format!("unknown goal '{other}'"))),
        }
    }
}

impl Profile {
    /// Check the preconditions every calculation relies on
    ///
    /// Physiological range checks belong to `profile_input`; this only rejects
    /// values that would make the formulas meaningless.
    pub fn validate(&self) -> Result<(), NutritionError> {
        if self.age == 0 {
            return Err(NutritionError::InvalidProfile(
                "age must be positive".to_string(),
            ));
        }
        if !self.height_cm.is_finite() || self.height_cm <= 0.0 {
            return Err(NutritionError::InvalidProfile(format!(
                "height_cm must be positive, got {}",
                self.height_cm
            )));
        }
        if !self.weight_kg.is_finite() || self.weight_kg <= 0.0 {
            return Err(NutritionError::InvalidProfile(format!(
                "weight_kg must be positive, got {}",
                self.weight_kg
            )));
        }
        Ok(())
    }
}

impl NutritionPlan {
    /// Grams of the given macro
    pub fn grams(&self, nutrient: Nutrient) -> f64 {
        match nutrient {
            Nutrient::Protein => self.protein_g,
            Nutrient::Fat => self.fat_g,
            Nutrient::Carbs => self.carbs_g,
        }
    }

    pub fn macros(&self) -> MacroSplit {
        MacroSplit {
            protein_g: self.protein_g,
            fat_g: self.fat_g,
            carbs_g: self.carbs_g,
        }
    }

    /// Energy implied by the macro split, kcal/day
    pub fn macro_kcal(&self) -> f64 {
        self.macros().kcal()
    }
}

impl MacroSplit {
    /// Energy of this split using 4/9/4 kcal per gram
    pub fn kcal(&self) -> f64 {
        self.protein_g * Nutrient::Protein.kcal_per_gram()
            + self.fat_g * Nutrient::Fat.kcal_per_gram()
            + self.carbs_g * Nutrient::Carbs.kcal_per_gram()
    }
}

impl MacroAdjustment {
    pub fn grams(value: f64) -> Self {
        Self {
            value,
            unit: AdjustmentUnit::Grams,
        }
    }

    pub fn percent(value: f64) -> Self {
        Self {
            value,
            unit: AdjustmentUnit::Percent,
        }
    }

    /// Value after applying this adjustment to `current` grams
    pub fn apply_to(&self, current: f64) -> f64 {
        match self.unit {
            AdjustmentUnit::Grams => self.value,
            AdjustmentUnit::Percent => current * (1.0 + self.value / 100.0),
        }
    }
}

impl AdjustmentSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the adjustment for a nutrient, replacing any previous one
    pub fn with(mut self, nutrient: Nutrient, adjustment: MacroAdjustment) -> Self {
        self.set(nutrient, adjustment);
        self
    }

    pub fn set(&mut self, nutrient: Nutrient, adjustment: MacroAdjustment) {
        *self.slot_mut(nutrient) = Some(adjustment);
    }

    pub fn get(&self, nutrient: Nutrient) -> Option<&MacroAdjustment> {
        match nutrient {
            Nutrient::Protein => self.protein.as_ref(),
            Nutrient::Fat => self.fat.as_ref(),
            Nutrient::Carbs => self.carbs.as_ref(),
        }
    }

    fn slot_mut(&mut self, nutrient: Nutrient) -> &mut Option<MacroAdjustment> {
        match nutrient {
            Nutrient::Protein => &mut self.protein,
            Nutrient::Fat => &mut self.fat,
            Nutrient::Carbs => &mut self.carbs,
        }
    }

    /// Present adjustments in protein, fat, carbs order
    pub fn iter(&self) -> impl Iterator<Item = (Nutrient, &MacroAdjustment)> + '_ {
        Nutrient::ALL
            .into_iter()
            .filter_map(move |nutrient| self.get(nutrient).map(|adj| (nutrient, adj)))
    }

    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.protein.is_none() && self.fat.is_none() && self.carbs.is_none()
    }

    /// Adjustment rules in the JSON shape persisted next to a plan
    pub fn to_rules_json(&self) -> serde_json::Value {
        // Serializing a struct of plain numbers and unit enums cannot fail
        serde_json::to_value(self).unwrap_or_else(|_| serde_json::json!({}))
    }

    /// Restore adjustment rules previously produced by [`AdjustmentSet::to_rules_json`]
    pub fn from_rules_json(value: &serde_json::Value) -> Result<Self, NutritionError> {
        serde_json::from_value(value.clone())
            .map_err(|e| NutritionError::InvalidInput(format!("malformed adjustment rules: {e}")))
    }
}
