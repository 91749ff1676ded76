use chrono::{Local, NaiveDate};
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{self, Read};
use tracing::info;

use crate::brewing::calculator::{RecipeCalculations, calculate_recipe_with};
use crate::brewing::starter::{StarterPlan, plan_starter};
use crate::chemistry::mash_ph::PhAdjustment;
use crate::error::AppError;
use crate::models::{Assumptions, Recipe};

#[derive(Parser, Debug)]
#[command(author, version, about = "Beer recipe calculator, optional JSON output", long_about = None)]
pub struct Args {
    #[arg(long)]
    json: bool,
    #[arg(
        long,
        value_name = "FILE",
        help = "JSON file with a recipe and optional assumptions; '-' reads from stdin"
    )]
    input: Option<String>,
    #[arg(
        long,
        value_name = "JSON",
        help = "Inline JSON for the recipe (overrides --input)"
    )]
    recipe_json: Option<String>,
    #[arg(
        long,
        value_name = "JSON",
        help = "Inline JSON for assumptions (optional, supplements --recipe-json)"
    )]
    assumptions_json: Option<String>,
    #[arg(
        long,
        value_name = "YYYY-MM-DD",
        help = "Date used for yeast viability (defaults to today)"
    )]
    today: Option<String>,
}

fn parse_inline_inputs(
    recipe_json: &str,
    assumptions_json: Option<&String>,
) -> Result<(Recipe, Assumptions), AppError> {
    let recipe: Recipe =
        serde_json::from_str(recipe_json).map_err(|source| AppError::ParseRecipeJson { source })?;

    let assumptions = match assumptions_json {
        Some(s) => serde_json::from_str::<Assumptions>(s)
            .map_err(|source| AppError::ParseAssumptionsJson { source })?,
        None => Assumptions::default(),
    };

    Ok((recipe, assumptions))
}

fn parse_cmd_input_doc(doc: &str) -> Result<(Recipe, Assumptions), AppError> {
    let parsed: CmdInput =
        serde_json::from_str(doc).map_err(|source| AppError::ParseCmdInputJson { source })?;
    Ok((parsed.recipe, parsed.assumptions.unwrap_or_default()))
}

pub fn parse_inputs(args: &Args) -> Result<(Recipe, Assumptions), AppError> {
    match (&args.recipe_json, &args.input) {
        (Some(recipe_json), _) => parse_inline_inputs(recipe_json, args.assumptions_json.as_ref()),
        (None, Some(path)) if path == "-" => {
            let mut s = String::new();
            io::stdin()
                .read_to_string(&mut s)
                .map_err(|source| AppError::ReadStdin { source })?;
            parse_cmd_input_doc(&s)
        }
        (None, Some(path)) => {
            let s = fs::read_to_string(path).map_err(|source| AppError::ReadFile {
                path: path.clone(),
                source,
            })?;
            parse_cmd_input_doc(&s)
        }
        (None, None) => Err(AppError::MissingInputData),
    }
}

pub fn parse_today(args: &Args) -> Result<NaiveDate, AppError> {
    match &args.today {
        Some(value) => NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|source| {
            AppError::InvalidDate {
                value: value.clone(),
                source,
            }
        }),
        None => Ok(Local::now().date_naive()),
    }
}

#[derive(Deserialize)]
struct CmdInput {
    recipe: Recipe,
    #[serde(default)]
    assumptions: Option<Assumptions>,
}

#[derive(Serialize, Debug, Clone)]
pub struct YeastStarterReport {
    pub yeast: String,
    pub plan: StarterPlan,
}

#[derive(Serialize, Debug, Clone)]
pub struct CalculationOutput {
    pub calculations: RecipeCalculations,
    pub starters: Vec<YeastStarterReport>,
}

/// Recipe calculations plus a starter plan for every yeast that has one.
pub fn compute_output(recipe: &Recipe, ass: &Assumptions, today: NaiveDate) -> CalculationOutput {
    let ass = ass.clone().normalized();
    let calculations = calculate_recipe_with(recipe, &ass);
    let starters = recipe
        .yeasts
        .iter()
        .filter_map(|y| {
            y.starter.as_ref().map(|info| YeastStarterReport {
                yeast: y.name.clone(),
                plan: plan_starter(info, recipe.batch_volume_l, calculations.og, &ass, today),
            })
        })
        .collect::<Vec<_>>();
    info!(recipe = %recipe.name, starters = starters.len(), "calculated");
    CalculationOutput {
        calculations,
        starters,
    }
}

pub fn print_output(out: &CalculationOutput, args: &Args) -> Result<(), AppError> {
    if args.json {
        let s = serde_json::to_string_pretty(&out)
            .map_err(|source| AppError::SerializeOutput { source })?;
        println!("{}", s);
        return Ok(());
    }

    let c = &out.calculations;
    println!("OG: {:.3}", c.og);
    println!("FG: {:.3}", c.fg);
    println!("ABV: {:.1}%", c.abv);
    println!("IBU: {:.1}", c.ibu);
    println!("SRM: {:.1}", c.srm);
    println!("Calories: {:.0} kcal / {:.1} g carbs per 355 mL", c.calories, c.carbs);
    println!(
        "Water: {:.1} L mash + {:.1} L sparge = {:.1} L (pre-boil {:.1} L)",
        c.mash_water_l, c.sparge_water_l, c.total_water_l, c.pre_boil_volume_l
    );
    if let Some(t) = c.strike_temp_c {
        println!("Strike water: {:.1} °C", t);
    }
    if let Some(ph) = c.estimated_mash_ph {
        println!("Mash pH: {:.2}", ph);
    }
    match c.ph_adjustment {
        Some(PhAdjustment::LacticAcid { ml }) => println!("Add {:.1} mL lactic acid (88%)", ml),
        Some(PhAdjustment::BakingSoda { grams }) => println!("Add {:.1} g baking soda", grams),
        None => {}
    }
    for s in &out.starters {
        println!(
            "Starter '{}': {:.0}B available, {:.0}B after starter, {:.0}B needed",
            s.yeast, s.plan.cells_available, s.plan.final_billion, s.plan.cells_required
        );
    }

    Ok(())
}
