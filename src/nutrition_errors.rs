//! # Nutrition Error Types Module
//!
//! This module defines the error type returned by the nutrition calculator.
//! Only hard precondition failures become errors; macro floor breaches are
//! reported as warnings by the adjustment validator instead.

/// Custom error types for nutrition calculations
#[derive(Debug, Clone, PartialEq)]
pub enum NutritionError {
    /// Profile cannot be used for a calculation (non-positive age, height or weight)
    InvalidProfile(String),
    /// Raw user input failed to parse or is outside the accepted range
    InvalidInput(String),
    /// Configuration value is missing or not recognised
    Config(String),
}

impl std::fmt::Display for NutritionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NutritionError::InvalidProfile(msg) => write!(f, "Invalid profile: {msg}"),
            NutritionError::InvalidInput(msg) => write!(f, "Invalid input: {msg}"),
            NutritionError::Config(msg) => write!(f, "Configuration error: {msg}"),
        }
    }
}

impl std::error::Error for NutritionError {}
