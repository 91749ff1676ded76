pub mod adapters;
pub mod brewing;
pub mod chemistry;
pub mod error;
pub mod models;
pub mod units;

pub use crate::brewing::calculator::{
    Nutrition, RecipeCalculations, WaterReport, calculate_abv, calculate_fg, calculate_ibu,
    calculate_nutrition, calculate_og, calculate_recipe, calculate_recipe_with, calculate_srm,
};
pub use crate::brewing::starter::{StarterPlan, plan_starter, simulate_starter};
pub use crate::chemistry::mash_ph::{
    GrainPhCategory, PhAdjustment, calculate_grain_only_ph, calculate_ph_adjustment,
    classify_grain_for_ph,
};
pub use crate::chemistry::{SaltAdditions, WaterProfile};
pub use crate::error::AppError;
pub use crate::models::{Assumptions, Recipe};
