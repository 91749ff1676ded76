//! Yeast pitch sizing and multi-step starter growth.
//!
//! Cell counts are in billions throughout. Two growth models are available per
//! step: Chris White's inoculation-rate curve (bounded by a per-step
//! saturation density) and Kai Troester's linear stir-plate model.

use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::{trace, warn};

use crate::models::{Assumptions, GrowthModel, StarterInfo, StarterStep, YeastPackage};
use crate::units::{G_PER_LB, MIN_VOLUME_L, liters_to_gallons};

/// Extract potential of dry malt extract, points per pound per gallon.
pub const DME_PPG: f64 = 45.0;
/// Only the first three starter steps are simulated.
pub const MAX_STARTER_STEPS: usize = 3;

/// Viability lost per day since manufacture.
pub const VIABILITY_LOSS_PER_DAY: f64 = 0.007;

pub const DRY_GRAMS_PER_PACK: f64 = 11.0;
pub const DRY_BILLION_PER_GRAM: f64 = 6.0;
pub const LIQUID_BILLION_PER_PACK: f64 = 100.0;
pub const LIQUID_POUCH_BILLION_PER_PACK: f64 = 200.0;

// White growth curve: g = A·x^P + C, x = inoculation rate in billion/L.
const WHITE_A: f64 = 12.547_937_76;
const WHITE_P: f64 = -0.459_485_832_4;
const WHITE_C: f64 = -0.999_499_490_6;
const WHITE_SHAKING_BOOST: f64 = 0.5;
const WHITE_MAX_GROWTH: f64 = 6.0;
/// Cell density ceiling of a starter, billion per liter.
pub const WHITE_SATURATION_BILLION_PER_L: f64 = 200.0;

/// New cells per gram of extract on a stir plate, billion.
pub const BRAUKAISER_BILLION_PER_GRAM: f64 = 1.4;

/// Degrees Plato from specific gravity (ASBC cubic fit).
pub fn sg_to_plato(sg: f64) -> f64 {
    -616.868 + 1111.14 * sg - 630.272 * sg.powi(2) + 135.997 * sg.powi(3)
}

/// Grams of dry extract that bring `liters` of water to `gravity`.
pub fn dme_grams_for_gravity(liters: f64, gravity: f64, ppg: f64) -> f64 {
    let points = (gravity - 1.0) * 1000.0;
    if points <= 0.0 || liters <= MIN_VOLUME_L || ppg <= 0.0 {
        return 0.0;
    }
    points * liters_to_gallons(liters) / ppg * G_PER_LB
}

fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(s).ok().map(|d| d.date_naive()))
}

/// Fraction of viable cells in a liquid package made on `manufacture_date`.
///
/// Missing or unparsable dates count as fresh.
pub fn calculate_viability(manufacture_date: Option<&str>, today: NaiveDate) -> f64 {
    let Some(made) = manufacture_date.and_then(parse_date) else {
        return 1.0;
    };
    let days = (today - made).num_days() as f64;
    (1.0 - VIABILITY_LOSS_PER_DAY * days).clamp(0.0, 1.0)
}

/// Cells in hand before any starter, billion.
///
/// Dry yeast ignores `viability`; slurry ignores `packs`.
pub fn calculate_cells_available(
    package: YeastPackage,
    packs: f64,
    viability: f64,
    slurry_liters: f64,
    slurry_billion_per_ml: f64,
) -> f64 {
    let whole_packs = packs.max(0.0).floor();
    let viability = viability.clamp(0.0, 1.0);
    match package {
        YeastPackage::Dry => whole_packs * DRY_GRAMS_PER_PACK * DRY_BILLION_PER_GRAM,
        YeastPackage::Liquid => whole_packs * LIQUID_BILLION_PER_PACK * viability,
        YeastPackage::LiquidPouch => whole_packs * LIQUID_POUCH_BILLION_PER_PACK * viability,
        YeastPackage::Slurry => {
            slurry_liters.max(0.0) * 1000.0 * slurry_billion_per_ml.max(0.0)
        }
    }
}

/// Cells needed to pitch `volume_l` of wort at `og`, billion.
pub fn calculate_required_cells(volume_l: f64, og: f64, pitch_rate: f64) -> f64 {
    (pitch_rate * volume_l * sg_to_plato(og)).max(0.0)
}

/// White growth factor (new cells per existing cell) for one step.
pub fn white_growth_factor(current_billion: f64, step_liters: f64, shaking: bool) -> f64 {
    let inoculation_rate = current_billion / step_liters;
    let boost = if shaking { WHITE_SHAKING_BOOST } else { 0.0 };
    let raw = WHITE_A * inoculation_rate.powf(WHITE_P) + WHITE_C + boost;
    if raw.is_nan() {
        return 0.0;
    }
    raw.clamp(0.0, WHITE_MAX_GROWTH)
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StarterStepResult {
    /// 1-based position in the schedule.
    pub step: usize,
    pub dme_grams: f64,
    pub start_billion: f64,
    pub end_billion: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StarterSimulation {
    pub initial_billion: f64,
    pub steps: Vec<StarterStepResult>,
    pub final_billion: f64,
}

fn grow_step(current: f64, step: &StarterStep, ppg: f64) -> (f64, f64) {
    if step.volume_liters <= MIN_VOLUME_L {
        return (0.0, current);
    }
    let dme = dme_grams_for_gravity(step.volume_liters, step.gravity, ppg);
    let end = match step.model {
        GrowthModel::White { shaking } => {
            let saturation = WHITE_SATURATION_BILLION_PER_L * step.volume_liters;
            if current >= saturation {
                current
            } else {
                let g = white_growth_factor(current, step.volume_liters, shaking);
                (current * (1.0 + g)).min(saturation)
            }
        }
        GrowthModel::Braukaiser => current + dme * BRAUKAISER_BILLION_PER_GRAM,
    };
    (dme, end)
}

/// Run the starter steps in order, each one seeded by the previous result.
pub fn simulate_starter(initial_billion: f64, steps: &[StarterStep], ppg: f64) -> StarterSimulation {
    if steps.len() > MAX_STARTER_STEPS {
        warn!(
            steps = steps.len(),
            max = MAX_STARTER_STEPS,
            "starter has too many steps, ignoring the rest"
        );
    }
    let initial = initial_billion.max(0.0);
    let mut current = initial;
    let mut results = Vec::with_capacity(steps.len().min(MAX_STARTER_STEPS));
    for (i, step) in steps.iter().take(MAX_STARTER_STEPS).enumerate() {
        let (dme_grams, end) = grow_step(current, step, ppg);
        trace!(step = i + 1, start = current, end, dme_grams, "starter step");
        results.push(StarterStepResult {
            step: i + 1,
            dme_grams,
            start_billion: current,
            end_billion: end,
        });
        current = end;
    }
    StarterSimulation {
        initial_billion: initial,
        steps: results,
        final_billion: current,
    }
}

/// Everything needed to decide whether a yeast is ready to pitch.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StarterPlan {
    pub viability: f64,
    pub cells_available: f64,
    pub cells_required: f64,
    pub steps: Vec<StarterStepResult>,
    pub final_billion: f64,
    pub pitch_ok: bool,
}

/// Combine package viability, pitch requirement and step growth for one yeast.
pub fn plan_starter(
    info: &StarterInfo,
    batch_volume_l: f64,
    og: f64,
    assumptions: &Assumptions,
    today: NaiveDate,
) -> StarterPlan {
    let viability = calculate_viability(info.manufacture_date.as_deref(), today);
    let cells_available = calculate_cells_available(
        info.package,
        info.packs,
        viability,
        info.slurry_liters,
        info.slurry_billion_per_ml,
    );
    let cells_required = calculate_required_cells(batch_volume_l, og, assumptions.pitch_rate);
    let sim = simulate_starter(cells_available, &info.steps, assumptions.dme_ppg);
    StarterPlan {
        viability,
        cells_available,
        cells_required,
        pitch_ok: sim.final_billion >= cells_required,
        steps: sim.steps,
        final_billion: sim.final_billion,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn plato_of_common_gravities() {
        assert!(sg_to_plato(1.000).abs() < 0.01);
        assert!((sg_to_plato(1.040) - 10.0).abs() < 0.1);
        assert!((sg_to_plato(1.050) - 12.4).abs() < 0.1);
    }

    #[test]
    fn dme_for_one_liter_starter() {
        let g = dme_grams_for_gravity(1.0, 1.040, DME_PPG);
        assert!(g > 95.0 && g < 115.0, "{g}");
        assert_eq!(dme_grams_for_gravity(1.0, 0.998, DME_PPG), 0.0);
        assert_eq!(dme_grams_for_gravity(0.0, 1.040, DME_PPG), 0.0);
    }

    #[test]
    fn viability_decays_linearly_and_clamps() {
        let today = day("2024-06-01");
        assert_eq!(calculate_viability(Some("2024-06-01"), today), 1.0);
        let v = calculate_viability(Some("2024-05-02"), today);
        assert!((v - (1.0 - 0.007 * 30.0)).abs() < 1e-12);
        assert_eq!(calculate_viability(Some("2020-01-01"), today), 0.0);
        assert_eq!(calculate_viability(Some("2024-07-01"), today), 1.0);
        assert_eq!(calculate_viability(Some("not a date"), today), 1.0);
        assert_eq!(calculate_viability(None, today), 1.0);
        let v = calculate_viability(Some("2024-05-02T08:00:00Z"), today);
        assert!((v - 0.79).abs() < 1e-12);
    }

    #[test]
    fn cells_available_per_package() {
        assert_eq!(
            calculate_cells_available(YeastPackage::Dry, 2.7, 0.1, 0.0, 0.0),
            132.0
        );
        assert_eq!(
            calculate_cells_available(YeastPackage::Liquid, 1.0, 0.5, 0.0, 0.0),
            50.0
        );
        assert_eq!(
            calculate_cells_available(YeastPackage::LiquidPouch, 1.0, 1.0, 0.0, 0.0),
            200.0
        );
        assert_eq!(
            calculate_cells_available(YeastPackage::Slurry, 5.0, 1.0, 0.2, 1.5),
            300.0
        );
    }

    #[test]
    fn required_cells_for_ale() {
        let r = calculate_required_cells(20.0, 1.050, 0.75);
        assert!(r > 180.0 && r < 190.0, "{r}");
    }

    #[test]
    fn white_growth_is_capped() {
        assert_eq!(white_growth_factor(0.0, 1.0, false), WHITE_MAX_GROWTH);
        assert_eq!(white_growth_factor(1000.0, 1.0, false), 0.0);
        let plain = white_growth_factor(100.0, 2.0, false);
        let shaken = white_growth_factor(100.0, 2.0, true);
        assert!(shaken > plain);
    }

    #[test]
    fn saturated_step_does_not_shrink_count() {
        let step = StarterStep {
            volume_liters: 0.5,
            gravity: 1.040,
            model: GrowthModel::White { shaking: false },
        };
        let sim = simulate_starter(150.0, &[step], DME_PPG);
        assert_eq!(sim.final_billion, 150.0);
    }

    #[test]
    fn extra_steps_are_ignored() {
        let step = StarterStep {
            volume_liters: 1.0,
            gravity: 1.040,
            model: GrowthModel::Braukaiser,
        };
        let sim = simulate_starter(100.0, &vec![step; 5], DME_PPG);
        assert_eq!(sim.steps.len(), MAX_STARTER_STEPS);
    }
}
