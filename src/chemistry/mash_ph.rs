//! Mash pH from a proton balance over grist, water and acid/base additions.
//!
//! Every grain is assigned a distilled-water pH (the pH it reaches mashed on its
//! own in pure water) and all grains share one buffer capacity. The mash settles
//! where the charge balance
//!
//! ```text
//! f(pH) = water_alk + Σ w·B·(pH − pH_di) − acid + base = 0
//! ```
//!
//! holds. `f` is monotonic in pH, so bisection over a fixed bracket converges.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::chemistry::{M_BAKING_SODA, mash_water_profile, residual_alkalinity_meq_l};
use crate::models::{Fermentable, OtherIngredient, OtherUnit, OtherUsage, Recipe};
use crate::units::round_to;

/// Malt buffer capacity, mEq per kg per pH unit.
pub const MALT_BUFFER_CAPACITY: f64 = -35.0;

pub const PH_BRACKET_LOW: f64 = 3.0;
pub const PH_BRACKET_HIGH: f64 = 8.0;
pub const PH_TOLERANCE: f64 = 0.001;
pub const PH_MAX_ITERATIONS: usize = 50;
/// Estimates within this distance of the target need no dosing.
pub const PH_ADJUSTMENT_TOLERANCE: f64 = 0.02;

const M_LACTIC: f64 = 90.08;
const LACTIC_88_DENSITY_G_ML: f64 = 1.209;
/// 88% lactic acid, mEq per mL.
pub const LACTIC_88_MEQ_PER_ML: f64 = LACTIC_88_DENSITY_G_ML * 0.88 / M_LACTIC * 1000.0;
const M_PHOSPHORIC: f64 = 97.995;
const PHOSPHORIC_10_DENSITY_G_ML: f64 = 1.053;
/// 10% phosphoric acid, first proton only, mEq per mL.
pub const PHOSPHORIC_10_MEQ_PER_ML: f64 =
    PHOSPHORIC_10_DENSITY_G_ML * 0.10 / M_PHOSPHORIC * 1000.0;
/// Sodium bicarbonate, mEq per gram.
pub const BAKING_SODA_MEQ_PER_G: f64 = 1000.0 / M_BAKING_SODA;
const ML_PER_TSP: f64 = 4.929;
const BAKING_SODA_G_PER_TSP: f64 = 4.6;

/// Acidity class of a grain, used only to pick its distilled-water pH.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GrainPhCategory {
    Base,
    Wheat,
    Munich,
    Crystal,
    Roasted,
    Acidulated,
    Adjunct,
}

/// Distilled-water pH span of a category. `ph_light` belongs to `color_light`,
/// `ph_dark` to `color_dark`.
#[derive(Clone, Copy, Debug)]
struct PhRange {
    ph_light: f64,
    ph_dark: f64,
    color_light: f64,
    color_dark: f64,
    by_color: bool,
}

impl GrainPhCategory {
    fn range(self) -> PhRange {
        let fixed = |ph_light: f64, ph_dark: f64| PhRange {
            ph_light,
            ph_dark,
            color_light: 0.0,
            color_dark: 0.0,
            by_color: false,
        };
        let colored = |ph_light, ph_dark, color_light, color_dark| PhRange {
            ph_light,
            ph_dark,
            color_light,
            color_dark,
            by_color: true,
        };
        match self {
            GrainPhCategory::Base => fixed(5.72, 5.65),
            GrainPhCategory::Wheat => fixed(6.05, 5.95),
            GrainPhCategory::Acidulated => fixed(3.5, 3.3),
            GrainPhCategory::Adjunct => fixed(6.1, 5.9),
            GrainPhCategory::Munich => colored(5.60, 5.25, 3.0, 30.0),
            GrainPhCategory::Crystal => colored(5.25, 4.60, 10.0, 120.0),
            GrainPhCategory::Roasted => colored(4.75, 4.45, 300.0, 600.0),
        }
    }

    /// pH of this grain mashed alone in distilled water.
    pub fn distilled_water_ph(self, color_lovibond: f64) -> f64 {
        let r = self.range();
        if !r.by_color {
            return (r.ph_light + r.ph_dark) / 2.0;
        }
        let c = color_lovibond.clamp(r.color_light, r.color_dark);
        let t = (c - r.color_light) / (r.color_dark - r.color_light);
        r.ph_light + (r.ph_dark - r.ph_light) * t
    }
}

pub(crate) fn has_any(name: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|k| name.contains(k))
}

fn is_acidulated(name: &str, _color: f64) -> bool {
    has_any(name, &["acidulated", "acid malt", "sauer"])
}

fn is_roasted(name: &str, color: f64) -> bool {
    color >= 200.0
        || has_any(
            name,
            &["roast", "black", "chocolate", "carafa", "patent", "coffee", "midnight"],
        )
}

fn is_crystal(name: &str, _color: f64) -> bool {
    has_any(name, &["crystal", "caramel", "cara", "special b"])
}

fn is_wheat(name: &str, _color: f64) -> bool {
    has_any(name, &["wheat", "weizen"])
}

fn is_kilned(name: &str, color: f64) -> bool {
    color > 10.0
        || has_any(
            name,
            &["munich", "vienna", "victory", "biscuit", "aromatic", "melanoidin", "amber", "brown"],
        )
}

fn is_adjunct(name: &str, _color: f64) -> bool {
    has_any(
        name,
        &["flaked", "torrified", "oat", "rice", "corn", "maize", "unmalted"],
    )
}

type GrainRule = (fn(&str, f64) -> bool, GrainPhCategory);

/// Evaluated top to bottom; the first match wins. "Chocolate Wheat" must land
/// on roasted, so the order is load-bearing.
const GRAIN_PH_RULES: [GrainRule; 6] = [
    (is_acidulated, GrainPhCategory::Acidulated),
    (is_roasted, GrainPhCategory::Roasted),
    (is_crystal, GrainPhCategory::Crystal),
    (is_wheat, GrainPhCategory::Wheat),
    (is_kilned, GrainPhCategory::Munich),
    (is_adjunct, GrainPhCategory::Adjunct),
];

pub fn classify_grain_for_ph(name: &str, color_lovibond: f64) -> GrainPhCategory {
    let lower = name.to_lowercase();
    GRAIN_PH_RULES
        .iter()
        .find(|(matches, _)| matches(lower.as_str(), color_lovibond))
        .map(|(_, category)| *category)
        .unwrap_or(GrainPhCategory::Base)
}

const NON_MASHABLE_KEYWORDS: [&str; 12] = [
    "extract",
    "dme",
    "lme",
    "sugar",
    "lactose",
    "maltodextrin",
    "dextrose",
    "sucrose",
    "candi",
    "syrup",
    "molasses",
    "agave",
];

/// Extracts, sugars and other kettle additions never see the mash.
pub fn is_mashable(name: &str) -> bool {
    let lower = name.to_lowercase();
    if has_any(&lower, &NON_MASHABLE_KEYWORDS) {
        return false;
    }
    !(lower.contains("honey") && !lower.contains("malt"))
}

/// A fermentable that takes part in the mash, with its derived acidity.
#[derive(Clone, Debug, PartialEq)]
pub struct MashGrain {
    pub weight_kg: f64,
    pub category: GrainPhCategory,
    pub distilled_ph: f64,
}

impl MashGrain {
    pub fn from_fermentable(f: &Fermentable) -> Self {
        let category = classify_grain_for_ph(&f.name, f.color_lovibond);
        Self {
            weight_kg: f.weight_kg.max(0.0),
            category,
            distilled_ph: category.distilled_water_ph(f.color_lovibond),
        }
    }
}

/// The mashable part of a grain bill.
pub fn mash_grains(fermentables: &[Fermentable]) -> Vec<MashGrain> {
    fermentables
        .iter()
        .filter(|f| is_mashable(&f.name) && f.weight_kg > 0.0)
        .map(MashGrain::from_fermentable)
        .collect()
}

/// Root of `f` on `[lower, upper]` by bisection.
///
/// Stops once the half-width drops below `tolerance` or after `max_iterations`.
/// When the bracket has no sign change the bound with the smaller `|f|` is
/// returned instead.
pub fn bisect<F>(f: F, lower: f64, upper: f64, tolerance: f64, max_iterations: usize) -> f64
where
    F: Fn(f64) -> f64,
{
    let mut lo = lower;
    let mut hi = upper;
    let mut f_lo = f(lo);
    let f_hi = f(hi);

    if f_lo == 0.0 {
        return lo;
    }
    if f_hi == 0.0 {
        return hi;
    }
    if f_lo.signum() == f_hi.signum() {
        debug!(f_lo, f_hi, "no sign change in bracket, returning closer bound");
        return if f_lo.abs() <= f_hi.abs() { lo } else { hi };
    }

    let mut mid = (lo + hi) / 2.0;
    for i in 0..max_iterations {
        mid = (lo + hi) / 2.0;
        let f_mid = f(mid);
        if f_mid == 0.0 || (hi - lo) / 2.0 < tolerance {
            debug!(iterations = i + 1, root = mid, "bisection converged");
            return mid;
        }
        if f_mid.signum() == f_lo.signum() {
            lo = mid;
            f_lo = f_mid;
        } else {
            hi = mid;
        }
    }
    debug!(max_iterations, root = mid, "bisection hit iteration cap");
    mid
}

/// Acid and base strength of the recognised mash additions, mEq.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct AcidBaseAdditions {
    pub acid_meq: f64,
    pub base_meq: f64,
}

/// Liquid acid volume, converting grams through the solution density.
fn acid_ml(other: &OtherIngredient, density_g_ml: f64) -> Option<f64> {
    match other.unit {
        OtherUnit::Ml => Some(other.amount),
        OtherUnit::Tsp => Some(other.amount * ML_PER_TSP),
        OtherUnit::G => Some(other.amount / density_g_ml),
        OtherUnit::Items => None,
    }
}

fn baking_soda_grams(other: &OtherIngredient) -> Option<f64> {
    match other.unit {
        OtherUnit::G => Some(other.amount),
        OtherUnit::Tsp => Some(other.amount * BAKING_SODA_G_PER_TSP),
        OtherUnit::Ml | OtherUnit::Items => None,
    }
}

/// Lactic acid, phosphoric acid and baking soda added to the mash.
pub fn acid_base_from_others(others: &[OtherIngredient]) -> AcidBaseAdditions {
    let mut totals = AcidBaseAdditions::default();
    for other in others.iter().filter(|o| o.usage == OtherUsage::Mash) {
        let name = other.name.to_lowercase();
        let (meq, is_acid) = if name.contains("lactic") {
            (
                acid_ml(other, LACTIC_88_DENSITY_G_ML).map(|ml| ml * LACTIC_88_MEQ_PER_ML),
                true,
            )
        } else if name.contains("phosphoric") {
            (
                acid_ml(other, PHOSPHORIC_10_DENSITY_G_ML)
                    .map(|ml| ml * PHOSPHORIC_10_MEQ_PER_ML),
                true,
            )
        } else if name.contains("baking soda") || name.contains("bicarbonate") {
            (
                baking_soda_grams(other).map(|g| g * BAKING_SODA_MEQ_PER_G),
                false,
            )
        } else {
            continue;
        };

        match meq {
            Some(meq) if is_acid => totals.acid_meq += meq.max(0.0),
            Some(meq) => totals.base_meq += meq.max(0.0),
            None => debug!(
                name = %other.name,
                unit = ?other.unit,
                "mash addition unit cannot be converted, skipped"
            ),
        }
    }
    totals
}

/// Equilibrium pH of `grains` against the given water alkalinity and additions.
///
/// Returns `None` for an empty or weightless grist.
pub fn solve_mash_ph(
    grains: &[MashGrain],
    water_alkalinity_meq: f64,
    additions: AcidBaseAdditions,
) -> Option<f64> {
    let total_kg: f64 = grains.iter().map(|g| g.weight_kg).sum();
    if grains.is_empty() || total_kg <= 0.0 {
        return None;
    }
    let balance = |ph: f64| {
        let malt: f64 = grains
            .iter()
            .map(|g| g.weight_kg * MALT_BUFFER_CAPACITY * (ph - g.distilled_ph))
            .sum();
        water_alkalinity_meq + malt - additions.acid_meq + additions.base_meq
    };
    Some(bisect(
        balance,
        PH_BRACKET_LOW,
        PH_BRACKET_HIGH,
        PH_TOLERANCE,
        PH_MAX_ITERATIONS,
    ))
}

/// Grist pH in distilled water without additions.
pub fn calculate_grain_only_ph(grains: &[MashGrain]) -> Option<f64> {
    solve_mash_ph(grains, 0.0, AcidBaseAdditions::default())
}

/// Estimated mash pH for a recipe whose mash and sparge volumes are known.
///
/// Without a water profile the mash water is treated as distilled.
pub fn estimate_mash_ph(recipe: &Recipe, mash_volume_l: f64, sparge_volume_l: f64) -> Option<f64> {
    let grains = mash_grains(&recipe.fermentables);
    if grains.is_empty() {
        return None;
    }
    let water_alkalinity_meq = recipe
        .water_chemistry
        .as_ref()
        .map(|chem| {
            let profile =
                mash_water_profile(&chem.source, &chem.salts, mash_volume_l, sparge_volume_l);
            residual_alkalinity_meq_l(&profile) * mash_volume_l.max(0.0)
        })
        .unwrap_or(0.0);
    let additions = acid_base_from_others(&recipe.others);
    let ph = solve_mash_ph(&grains, water_alkalinity_meq, additions)?;
    debug!(
        ph,
        water_alkalinity_meq,
        acid_meq = additions.acid_meq,
        base_meq = additions.base_meq,
        "estimated mash pH"
    );
    Some(round_to(ph, 2))
}

/// Dose that moves the mash toward the target pH.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PhAdjustment {
    /// 88% lactic acid, mL.
    LacticAcid { ml: f64 },
    /// Sodium bicarbonate, g.
    BakingSoda { grams: f64 },
}

/// Lactic acid when the mash is too alkaline, baking soda when too acidic,
/// nothing within `PH_ADJUSTMENT_TOLERANCE` of the target.
pub fn calculate_ph_adjustment(
    current_ph: f64,
    target_ph: f64,
    total_grain_kg: f64,
) -> Option<PhAdjustment> {
    let delta = current_ph - target_ph;
    if delta.abs() <= PH_ADJUSTMENT_TOLERANCE || total_grain_kg <= 0.0 {
        return None;
    }
    let meq = total_grain_kg * MALT_BUFFER_CAPACITY.abs() * delta.abs();
    if delta > 0.0 {
        Some(PhAdjustment::LacticAcid {
            ml: round_to(meq / LACTIC_88_MEQ_PER_ML, 2),
        })
    } else {
        Some(PhAdjustment::BakingSoda {
            grams: round_to(meq / BAKING_SODA_MEQ_PER_G, 2),
        })
    }
}
