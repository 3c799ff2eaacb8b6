//! # Adjustment Parser Module
//!
//! Extracts macro adjustment requests from free-form Russian chat text such as
//! "белка 150 г, жиров -10%".
//!
//! ## Features
//!
//! - Nutrient detection by word stem: `белк*`/`белок` (protein), `жир*` (fat), `углевод*` (carbs)
//! - Absolute values in grams: "белка 150 г", "углеводов 200г"
//! - Relative values in percent: "жиры +10%", "белок -5 %"
//! - Grams take priority over percent when both are present for one nutrient

use crate::nutrition_model::{AdjustmentSet, MacroAdjustment, Nutrient};
use lazy_static::lazy_static;
use log::{debug, info, trace};
use regex::Regex;

/// Nutrient word stems; the trailing `[а-яё]*` absorbs case endings.
/// Protein also accepts the nominative "белок", which drops the stem's `к`.
const PROTEIN_STEM: &str = r"бел(?:ок|к[а-яё]*)";
const FAT_STEM: &str = r"жир[а-яё]*";
const CARBS_STEM: &str = r"углевод[а-яё]*";

/// Compiled grams and percent patterns for one nutrient
struct NutrientPatterns {
    nutrient: Nutrient,
    grams: Regex,
    percent: Regex,
}

impl NutrientPatterns {
    fn new(nutrient: Nutrient, stem: &str) -> Self {
        Self {
            nutrient,
            grams: Regex::new(&format!(r"(?i){stem}\s*([0-9]+)\s*г"))
                .expect("Grams adjustment pattern should be valid"),
            percent: Regex::new(&format!(r"(?i){stem}\s*([+-]?[0-9]+)\s*%"))
                .expect("Percent adjustment pattern should be valid"),
        }
    }

    /// First capture of `pattern` parsed as a number
    fn capture_value(pattern: &Regex, text: &str) -> Option<f64> {
        let captures = pattern.captures(text)?;
        let raw = captures.get(1)?.as_str();
        match raw.parse::<i64>() {
            Ok(value) => Some(value as f64),
            Err(e) => {
                debug!("Discarding unparseable adjustment value '{}': {}", raw, e);
                None
            }
        }
    }

    fn find(&self, text: &str) -> Option<MacroAdjustment> {
        if let Some(value) = Self::capture_value(&self.grams, text) {
            trace!("Matched {} grams pattern: {}", self.nutrient, value);
            return Some(MacroAdjustment::grams(value));
        }
        if let Some(value) = Self::capture_value(&self.percent, text) {
            trace!("Matched {} percent pattern: {}", self.nutrient, value);
            return Some(MacroAdjustment::percent(value));
        }
        None
    }
}

// Lazy static patterns to avoid recompilation
lazy_static! {
    static ref NUTRIENT_PATTERNS: [NutrientPatterns; 3] = [
        NutrientPatterns::new(Nutrient::Protein, PROTEIN_STEM),
        NutrientPatterns::new(Nutrient::Fat, FAT_STEM),
        NutrientPatterns::new(Nutrient::Carbs, CARBS_STEM),
    ];
}

/// Parse macro adjustments from user text
///
/// Each nutrient is matched independently; a nutrient that is not mentioned
/// with a number is absent from the result.
///
/// # Examples
///
/// ```rust
/// use nutrition_coach::adjustment_parser::parse_macro_adjustments;
/// use nutrition_coach::nutrition_model::{AdjustmentUnit, Nutrient};
///
/// let set = parse_macro_adjustments("Хочу белка 150 г и жиров -10%");
///
/// let protein = set.get(Nutrient::Protein).unwrap();
/// assert_eq!(protein.value, 150.0);
/// assert_eq!(protein.unit, AdjustmentUnit::Grams);
///
/// let fat = set.get(Nutrient::Fat).unwrap();
/// assert_eq!(fat.value, -10.0);
/// assert_eq!(fat.unit, AdjustmentUnit::Percent);
///
/// assert!(set.get(Nutrient::Carbs).is_none());
/// ```
pub fn parse_macro_adjustments(text: &str) -> AdjustmentSet {
    let mut adjustments = AdjustmentSet::new();

    for patterns in NUTRIENT_PATTERNS.iter() {
        if let Some(adjustment) = patterns.find(text) {
            adjustments.set(patterns.nutrient, adjustment);
        }
    }

    info!(
        "Parsed {} macro adjustments from text of {} chars",
        adjustments.len(),
        text.chars().count()
    );
    adjustments
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nutrition_model::AdjustmentUnit;

    #[test]
    fn test_grams_for_all_nutrients() {
        let set = parse_macro_adjustments("белки 150 г, жиры 70 г, углеводы 250 г");
        assert_eq!(set.protein, Some(MacroAdjustment::grams(150.0)));
        assert_eq!(set.fat, Some(MacroAdjustment::grams(70.0)));
        assert_eq!(set.carbs, Some(MacroAdjustment::grams(250.0)));
    }

    #[test]
    fn test_grams_without_space() {
        let set = parse_macro_adjustments("углеводов 200г");
        assert_eq!(set.carbs, Some(MacroAdjustment::grams(200.0)));
    }

    #[test]
    fn test_signed_percent() {
        let set = parse_macro_adjustments("белок +20% жир -15 %");
        assert_eq!(set.protein, Some(MacroAdjustment::percent(20.0)));
        assert_eq!(set.fat, Some(MacroAdjustment::percent(-15.0)));
        assert!(set.carbs.is_none());
    }

    #[test]
    fn test_grams_take_priority_over_percent() {
        let set = parse_macro_adjustments("белка +10%, а лучше белка 30 г");
        let protein = set.protein.unwrap();
        assert_eq!(protein.value, 30.0);
        assert_eq!(protein.unit, AdjustmentUnit::Grams);
    }

    #[test]
    fn test_case_insensitive() {
        let set = parse_macro_adjustments("БЕЛКА 120 Г");
        assert_eq!(set.protein, Some(MacroAdjustment::grams(120.0)));
    }

    #[test]
    fn test_no_match_leaves_set_empty() {
        assert!(parse_macro_adjustments("хочу больше белка").is_empty());
        assert!(parse_macro_adjustments("").is_empty());
        assert!(parse_macro_adjustments("protein 150 g").is_empty());
    }

    #[test]
    fn test_overflowing_number_is_a_miss() {
        let set = parse_macro_adjustments("жиры 99999999999999999999999 г");
        assert!(set.fat.is_none());
    }
}
