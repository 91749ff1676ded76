//! Recipe-level calculators: volumes, yeast starters and the orchestrator that
//! assembles a full `RecipeCalculations`.

pub mod calculator;
pub mod starter;
pub mod volume;
