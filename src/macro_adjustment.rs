//! # Macro Adjustment Module
//!
//! Applies user-requested macro changes to an existing plan. The calorie
//! target never changes: protein and fat take the requested values (clamped up
//! to their per-kg floors) and carbohydrate is recomputed as the remainder.
//!
//! Floor breaches are not errors. The value is corrected and a [`FloorWarning`]
//! is returned alongside the revised plan.

use crate::calculation_engine::{carbs_remainder, round_to_tenth};
use crate::nutrition_constants::{PerKgRange, FAT_PER_KG, PROTEIN_PER_KG};
use crate::nutrition_model::{AdjustmentSet, Nutrient, NutritionPlan};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, info, warn};

/// A macro was below its safe minimum and has been raised to it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FloorWarning {
    pub nutrient: Nutrient,
    /// Value before correction, grams
    pub requested_g: f64,
    /// Value after correction, grams
    pub floor_g: f64,
    /// Floor in grams per kg of body weight
    pub floor_per_kg: f64,
}

impl fmt::Display for FloorWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let subject = match self.nutrient {
            Nutrient::Protein => "Белок слишком низкий",
            Nutrient::Fat => "Жиры слишком низкие",
            Nutrient::Carbs => "Углеводы слишком низкие",
        };
        write!(
            f,
            "{subject} ({:.1} г). Минимум {:.1} г ({} г/кг) - исправляю автоматически.",
            self.requested_g, self.floor_g, self.floor_per_kg
        )
    }
}

/// Revised plan plus the corrections made on the way
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdjustmentOutcome {
    pub plan: NutritionPlan,
    /// Protein warning first, then fat
    pub warnings: Vec<FloorWarning>,
}

impl AdjustmentOutcome {
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Human-readable warning texts in order
    pub fn warning_messages(&self) -> Vec<String> {
        self.warnings.iter().map(ToString::to_string).collect()
    }
}

/// Apply adjustments to a plan, enforce macro floors and rebalance carbs
///
/// - grams replace the current value, percent scales it by `1 + value/100`
/// - protein is kept at or above 1.4 g/kg, fat at or above 0.6 g/kg, whether
///   or not the caller touched them
/// - carbs becomes `max(0, (kcal - protein*4 - fat*9) / 4)`, so a requested
///   carbs value is always superseded
/// - `kcal`, `bmr` and `tdee` are carried over unchanged
///
/// This never fails.
///
/// # Examples
///
/// ```rust
/// use nutrition_coach::macro_adjustment::validate_and_adjust_macros;
/// use nutrition_coach::nutrition_model::{AdjustmentSet, MacroAdjustment, Nutrient, NutritionPlan};
///
/// let plan = NutritionPlan {
///     bmr: 1780, tdee: 2759, kcal: 2759,
///     protein_g: 128.0, fat_g: 64.0, carbs_g: 417.8,
/// };
/// let adjustments = AdjustmentSet::new().with(Nutrient::Protein, MacroAdjustment::percent(20.0));
/// let outcome = validate_and_adjust_macros(&plan, &adjustments, 80.0);
///
/// assert_eq!(outcome.plan.protein_g, 153.6);
/// assert_eq!(outcome.plan.kcal, 2759);
/// assert!(outcome.warnings.is_empty());
/// ```
pub fn validate_and_adjust_macros(
    plan: &NutritionPlan,
    adjustments: &AdjustmentSet,
    weight_kg: f64,
) -> AdjustmentOutcome {
    let mut protein_g = plan.protein_g;
    let mut fat_g = plan.fat_g;

    for (nutrient, adjustment) in adjustments.iter() {
        if !adjustment.value.is_finite() {
            warn!(%nutrient, value = adjustment.value, "Ignoring non-finite macro adjustment");
            continue;
        }
        let current = plan.grams(nutrient);
        let adjusted = adjustment.apply_to(current);
        debug!(%nutrient, current, adjusted, unit = ?adjustment.unit, "Applying macro adjustment");
        match nutrient {
            Nutrient::Protein => protein_g = adjusted,
            Nutrient::Fat => fat_g = adjusted,
            Nutrient::Carbs => {
                debug!(adjusted, "Carbs adjustment superseded by calorie remainder");
            }
        }
    }

    let mut warnings = Vec::new();
    protein_g = enforce_floor(Nutrient::Protein, protein_g, &PROTEIN_PER_KG, weight_kg, &mut warnings);
    fat_g = enforce_floor(Nutrient::Fat, fat_g, &FAT_PER_KG, weight_kg, &mut warnings);

    let carbs_g = carbs_remainder(f64::from(plan.kcal), protein_g, fat_g);

    let revised = NutritionPlan {
        protein_g: round_to_tenth(protein_g),
        fat_g: round_to_tenth(fat_g),
        carbs_g: round_to_tenth(carbs_g),
        ..plan.clone()
    };

    info!(
        kcal = revised.kcal,
        protein_g = revised.protein_g,
        fat_g = revised.fat_g,
        carbs_g = revised.carbs_g,
        warnings = warnings.len(),
        "Adjusted macro split"
    );

    AdjustmentOutcome {
        plan: revised,
        warnings,
    }
}

/// Raise `value` to the floor for `weight_kg`, recording a warning if it was below
///
/// Compared at the 0.1 g resolution plans are stored with, so a value that
/// already rounds to the floor is left alone.
fn enforce_floor(
    nutrient: Nutrient,
    value: f64,
    range: &PerKgRange,
    weight_kg: f64,
    warnings: &mut Vec<FloorWarning>,
) -> f64 {
    let floor_g = range.floor_grams(weight_kg);
    if round_to_tenth(value) < round_to_tenth(floor_g) {
        warn!(%nutrient, value, floor_g, "Macro below floor, clamping");
        warnings.push(FloorWarning {
            nutrient,
            requested_g: value,
            floor_g,
            floor_per_kg: range.min,
        });
        floor_g
    } else {
        value
    }
}
