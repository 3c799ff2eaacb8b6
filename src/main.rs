use anyhow::{Context, Result};
use nutrition_coach::calculation_engine::calculate_nutrition_plan_with;
use nutrition_coach::config::AppConfig;
use nutrition_coach::logging::init_logging;
use nutrition_coach::profile_input::ProfileInput;
use nutrition_coach::{parse_macro_adjustments, validate_and_adjust_macros};
use serde_json::json;
use std::env;
use tracing::info;

const USAGE: &str =
    "usage: nutrition-coach <age> <sex> <height_cm> <weight_kg> <activity> <goal> [adjustment text...]";

fn main() -> Result<()> {
    // Load configuration (.env first, then the environment)
    let config = AppConfig::from_env().context("Failed to load configuration")?;

    init_logging(&config)?;

    info!("Starting Nutrition Coach calculator");

    let args: Vec<String> = env::args().skip(1).collect();
    if args.len() < 6 {
        anyhow::bail!(USAGE);
    }

    let input = ProfileInput {
        age: args[0].clone(),
        sex: args[1].clone(),
        height_cm: args[2].clone(),
        weight_kg: args[3].clone(),
        activity: args[4].clone(),
        goal: args[5].clone(),
    };
    let profile = input.build().context("Invalid profile")?;

    let plan = calculate_nutrition_plan_with(&profile, config.bmr_formula)?;

    let adjustment_text = args[6..].join(" ");
    let adjustments = parse_macro_adjustments(&adjustment_text);

    let output = if adjustments.is_empty() {
        json!({ "plan": plan, "profile": profile })
    } else {
        info!("Applying {} macro adjustments", adjustments.len());
        let outcome = validate_and_adjust_macros(&plan, &adjustments, profile.weight_kg);
        json!({
            "plan": outcome.plan,
            "initial_plan": plan,
            "profile": profile,
            "rules": adjustments.to_rules_json(),
            "warnings": outcome.warning_messages(),
        })
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
