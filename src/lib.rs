//! # Nutrition Coach
//!
//! Deterministic core of a Telegram nutrition bot: calorie targets from
//! anthropometric formulas, default macro allocation, user macro adjustments
//! with safety floors, and parsing of adjustment requests from chat text.

pub mod adjustment_parser;
pub mod calculation_engine;
pub mod config;
pub mod daily_log;
pub mod logging;
pub mod macro_adjustment;
pub mod nutrition_constants;
pub mod nutrition_errors;
pub mod nutrition_model;
pub mod profile_input;

pub use adjustment_parser::parse_macro_adjustments;
pub use calculation_engine::{
    calculate_bmr, calculate_default_macros, calculate_nutrition_plan, calculate_target_calories,
    calculate_tdee, BmrFormula,
};
pub use macro_adjustment::{validate_and_adjust_macros, AdjustmentOutcome, FloorWarning};
pub use nutrition_errors::NutritionError;
pub use nutrition_model::{
    ActivityLevel, AdjustmentSet, AdjustmentUnit, Goal, MacroAdjustment, MacroSplit, Nutrient,
    NutritionPlan, Profile, Sex,
};
