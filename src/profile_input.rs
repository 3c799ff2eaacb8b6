//! # Profile Input Module
//!
//! Parses raw values typed by a user during onboarding into typed profile
//! fields. Ranges are the physiological bounds the bot accepts; messages are
//! the Russian texts shown back to the user.

use crate::nutrition_errors::NutritionError;
use crate::nutrition_model::{ActivityLevel, Goal, Profile, Sex};
use std::ops::RangeInclusive;
use tracing::debug;

pub const AGE_RANGE: RangeInclusive<u32> = 10..=120;
pub const WEIGHT_RANGE_KG: RangeInclusive<f64> = 30.0..=300.0;
pub const HEIGHT_RANGE_CM: RangeInclusive<f64> = 100.0..=250.0;
pub const CALORIES_RANGE: RangeInclusive<u32> = 500..=10_000;
pub const MACRO_GRAMS_RANGE: RangeInclusive<f64> = 0.0..=1000.0;

const NOT_A_NUMBER: &str = "Пожалуйста, введите корректное число";

/// Parse a decimal number, accepting a comma as the decimal separator
fn parse_decimal(raw: &str) -> Result<f64, NutritionError> {
    let normalized = raw.trim().replace(',', ".");
    match normalized.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => {
            debug!(raw, "Rejected non-numeric input");
            Err(NutritionError::InvalidInput(NOT_A_NUMBER.to_string()))
        }
    }
}

fn parse_integer(raw: &str) -> Result<u32, NutritionError> {
    raw.trim().parse::<u32>().map_err(|_| {
        debug!(raw, "Rejected non-integer input");
        NutritionError::InvalidInput(NOT_A_NUMBER.to_string())
    })
}

/// Age in full years, 10 to 120
pub fn parse_age(raw: &str) -> Result<u32, NutritionError> {
    let age = parse_integer(raw)?;
    if AGE_RANGE.contains(&age) {
        Ok(age)
    } else {
        Err(NutritionError::InvalidInput(
            "Возраст должен быть от 10 до 120 лет".to_string(),
        ))
    }
}

/// Body weight in kilograms, 30 to 300
pub fn parse_weight(raw: &str) -> Result<f64, NutritionError> {
    let weight = parse_decimal(raw)?;
    if WEIGHT_RANGE_KG.contains(&weight) {
        Ok(weight)
    } else {
        Err(NutritionError::InvalidInput(
            "Вес должен быть от 30 до 300 кг".to_string(),
        ))
    }
}

/// Height in centimeters, 100 to 250
pub fn parse_height(raw: &str) -> Result<f64, NutritionError> {
    let height = parse_decimal(raw)?;
    if HEIGHT_RANGE_CM.contains(&height) {
        Ok(height)
    } else {
        Err(NutritionError::InvalidInput(
            "Рост должен быть от 100 до 250 см".to_string(),
        ))
    }
}

/// Manually entered calorie target, 500 to 10000 kcal
pub fn parse_calories(raw: &str) -> Result<u32, NutritionError> {
    let calories = parse_integer(raw)?;
    if CALORIES_RANGE.contains(&calories) {
        Ok(calories)
    } else {
        Err(NutritionError::InvalidInput(
            "Калорийность должна быть от 500 до 10000 ккал".to_string(),
        ))
    }
}

/// Manually entered macro amount, 0 to 1000 g
pub fn parse_macro_grams(raw: &str) -> Result<f64, NutritionError> {
    let grams = parse_decimal(raw)?;
    if MACRO_GRAMS_RANGE.contains(&grams) {
        Ok(grams)
    } else {
        Err(NutritionError::InvalidInput(
            "Значение должно быть от 0 до 1000 грамм".to_string(),
        ))
    }
}

/// Raw onboarding answers, one string per question
#[derive(Debug, Clone, Default)]
pub struct ProfileInput {
    pub age: String,
    pub sex: String,
    pub height_cm: String,
    pub weight_kg: String,
    pub activity: String,
    pub goal: String,
}

impl ProfileInput {
    /// Validate every answer and assemble a [`Profile`]
    ///
    /// Stops at the first invalid field, checking them in question order.
    pub fn build(&self) -> Result<Profile, NutritionError> {
        let profile = Profile {
            age: parse_age(&self.age)?,
            sex: self.sex.parse::<Sex>()?,
            height_cm: parse_height(&self.height_cm)?,
            weight_kg: parse_weight(&self.weight_kg)?,
            activity: self.activity.parse::<ActivityLevel>()?,
            goal: self.goal.parse::<Goal>()?,
        };
        profile.validate()?;
        Ok(profile)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_age_bounds() {
        assert_eq!(parse_age("30").unwrap(), 30);
        assert_eq!(parse_age(" 10 ").unwrap(), 10);
        assert_eq!(parse_age("120").unwrap(), 120);
        assert!(parse_age("9").is_err());
        assert!(parse_age("121").is_err());
        assert!(parse_age("-5").is_err());
        assert!(parse_age("тридцать").is_err());
    }

    #[test]
    fn test_weight_accepts_decimal_comma() {
        assert_eq!(parse_weight("72,5").unwrap(), 72.5);
        assert_eq!(parse_weight("80").unwrap(), 80.0);
        assert!(parse_weight("29.9").is_err());
        assert!(parse_weight("inf").is_err());
    }

    #[test]
    fn test_height_messages() {
        let err = parse_height("99").unwrap_err();
        assert_eq!(
            err,
            NutritionError::InvalidInput("Рост должен быть от 100 до 250 см".to_string())
        );

        let err = parse_height("abc").unwrap_err();
        assert_eq!(err, NutritionError::InvalidInput(NOT_A_NUMBER.to_string()));
    }

    #[test]
    fn test_calories_and_macros() {
        assert_eq!(parse_calories("2200").unwrap(), 2200);
        assert!(parse_calories("499").is_err());
        assert_eq!(parse_macro_grams("0").unwrap(), 0.0);
        assert_eq!(parse_macro_grams("150,5").unwrap(), 150.5);
        assert!(parse_macro_grams("1000.1").is_err());
    }

    #[test]
    fn test_build_profile() {
        let input = ProfileInput {
            age: "30".to_string(),
            sex: "м".to_string(),
            height_cm: "180".to_string(),
            weight_kg: "80,0".to_string(),
            activity: "moderate".to_string(),
            goal: "maintain".to_string(),
        };
        let profile = input.build().unwrap();
        assert_eq!(profile.sex, Sex::Male);
        assert_eq!(profile.weight_kg, 80.0);
        assert_eq!(profile.activity, ActivityLevel::Moderate);
    }

    #[test]
    fn test_build_reports_first_invalid_field() {
        let input = ProfileInput {
            age: "5".to_string(),
            goal: "nonsense".to_string(),
            ..Default::default()
        };
        let err = input.build().unwrap_err();
        assert!(err.to_string().contains("Возраст"));
    }
}
