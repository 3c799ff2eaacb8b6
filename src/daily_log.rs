//! # Daily Log Module
//!
//! Sums logged meals for one day and compares them with the active plan.
//! Entries come from the food log store; nutrient values the food analysis
//! could not determine are `None` and count as zero.

use crate::nutrition_model::NutritionPlan;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Meal slot of a log entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MealType {
    Breakfast,
    Lunch,
    Dinner,
    Snack,
}

/// One logged meal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoodLogEntry {
    pub meal_type: MealType,
    pub description: String,
    pub calories: Option<f64>,
    pub protein_g: Option<f64>,
    pub fat_g: Option<f64>,
    pub carbs_g: Option<f64>,
    pub logged_at: DateTime<Utc>,
}

/// Calories and macros, either consumed or remaining
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MacroBalance {
    pub calories: f64,
    pub protein_g: f64,
    pub fat_g: f64,
    pub carbs_g: f64,
}

/// Totals for one UTC calendar day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailySummary {
    pub date: NaiveDate,
    pub consumed: MacroBalance,
    /// Number of entries logged that day
    pub count: usize,
}

impl MacroBalance {
    /// True when no value is below zero
    ///
    /// Meaningful on the balance returned by [`DailySummary::remaining`], where a
    /// negative value means that target was overshot.
    pub fn nothing_exceeded(&self) -> bool {
        self.calories >= 0.0 && self.protein_g >= 0.0 && self.fat_g >= 0.0 && self.carbs_g >= 0.0
    }
}

impl DailySummary {
    /// Sum the entries logged on `date`; entries from other days are skipped
    pub fn for_date<'a, I>(entries: I, date: NaiveDate) -> Self
    where
        I: IntoIterator<Item = &'a FoodLogEntry>,
    {
        let mut consumed = MacroBalance::default();
        let mut count = 0;

        for entry in entries
            .into_iter()
            .filter(|entry| entry.logged_at.date_naive() == date)
        {
            consumed.calories += entry.calories.unwrap_or(0.0);
            consumed.protein_g += entry.protein_g.unwrap_or(0.0);
            consumed.fat_g += entry.fat_g.unwrap_or(0.0);
            consumed.carbs_g += entry.carbs_g.unwrap_or(0.0);
            count += 1;
        }

        debug!(%date, count, calories = consumed.calories, "Summarised daily food log");
        Self {
            date,
            consumed,
            count,
        }
    }

    /// What is left of the plan for the day; negative values mean over target
    pub fn remaining(&self, plan: &NutritionPlan) -> MacroBalance {
        MacroBalance {
            calories: f64::from(plan.kcal) - self.consumed.calories,
            protein_g: plan.protein_g - self.consumed.protein_g,
            fat_g: plan.fat_g - self.consumed.fat_g,
            carbs_g: plan.carbs_g - self.consumed.carbs_g,
        }
    }
}
