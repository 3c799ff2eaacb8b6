//! # Adjustment Parser Tests
//!
//! Integration tests for extracting macro adjustments from chat messages,
//! including grams-over-percent priority and the persisted rules format.

use nutrition_coach::{parse_macro_adjustments, AdjustmentSet, AdjustmentUnit, MacroAdjustment};
use serde_json::json;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grams_win_over_percent() {
        let set = parse_macro_adjustments("белка 30 г или белка +10%");
        assert_eq!(set.protein, Some(MacroAdjustment::grams(30.0)));

        let set = parse_macro_adjustments("белка +10%, нет, белка 30 г");
        assert_eq!(set.protein.map(|p| p.unit), Some(AdjustmentUnit::Grams));
    }

    #[test]
    fn test_each_nutrient_matched_independently() {
        let set = parse_macro_adjustments("углеводов -20%, жиров 60 г");
        assert!(set.protein.is_none());
        assert_eq!(set.fat, Some(MacroAdjustment::grams(60.0)));
        assert_eq!(set.carbs, Some(MacroAdjustment::percent(-20.0)));
    }

    #[test]
    fn test_realistic_chat_messages() {
        let cases = [
            ("Давай белки 180г", Some(MacroAdjustment::grams(180.0))),
            ("можно белок +15 %?", Some(MacroAdjustment::percent(15.0))),
            ("Белков поменьше, -10%", None),
            ("увеличь белки на 20%", None),
        ];

        for (text, expected) in cases {
            assert_eq!(parse_macro_adjustments(text).protein, expected, "text: {text}");
        }
    }

    #[test]
    fn test_unrelated_text_yields_empty_set() {
        for text in ["привет", "съел 200 г гречки", "20%", "жир"] {
            assert!(parse_macro_adjustments(text).is_empty(), "text: {text}");
        }
    }

    #[test]
    fn test_parsed_set_to_rules_json() {
        let set = parse_macro_adjustments("жиры 70 г, углеводы +5%");
        let rules = set.to_rules_json();

        assert_eq!(
            rules,
            json!({
                "fat": { "value": 70.0, "type": "grams" },
                "carbs": { "value": 5.0, "type": "percent" }
            })
        );
        assert_eq!(AdjustmentSet::from_rules_json(&rules).unwrap(), set);
    }
}
