use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::brewing::starter::sg_to_plato;
use crate::brewing::volume::{
    mash_water, pre_boil_volume, sparge_water, strike_temp, total_grain_kg, total_water,
};
use crate::chemistry::mash_ph::{PhAdjustment, calculate_ph_adjustment, estimate_mash_ph, has_any};
use crate::chemistry::{
    SaltAdditions, WaterProfile, chloride_to_sulfate_ratio, mash_water_profile,
    residual_alkalinity_as_caco3, split_salts_proportionally,
};
use crate::models::{
    Assumptions, FermentationStepType, Fermentable, HopAddition, MashStepType, Recipe,
};
use crate::units::{MIN_VOLUME_L, grams_to_oz, kg_to_lbs, liters_to_gallons, round_to};

pub const ABV_FACTOR: f64 = 131.25;

// Effective attenuation calibration.
pub const REFERENCE_MASH_TEMP_C: f64 = 66.0;
pub const MASH_TEMP_COEFF_PER_C: f64 = 0.006;
pub const DECOCTION_BONUS_PER_STEP: f64 = 0.005;
pub const REFERENCE_MASH_MIN: f64 = 60.0;
pub const MASH_TIME_COEFF_PER_MIN: f64 = 0.0005;
pub const MASH_TIME_CAP: f64 = 0.03;
pub const REFERENCE_FERMENT_TEMP_C: f64 = 20.0;
pub const FERMENT_TEMP_COEFF_PER_C: f64 = 0.004;
pub const REFERENCE_FERMENT_DAYS: f64 = 10.0;
pub const FERMENT_DAYS_COEFF_PER_DAY: f64 = 0.002;
pub const MIN_EFFECTIVE_ATTENUATION: f64 = 0.60;
pub const MAX_EFFECTIVE_ATTENUATION: f64 = 0.95;

// Bitterness.
pub const IBU_METRIC_FACTOR: f64 = 75.0;
pub const FIRST_WORT_BONUS_MIN: f64 = 20.0;
pub const WHIRLPOOL_MIN_TEMP_C: f64 = 60.0;
pub const WHIRLPOOL_FULL_TEMP_C: f64 = 100.0;
pub const WHIRLPOOL_TEMP_EXPONENT: f64 = 1.8;
pub const DRY_HOP_UTILIZATION: f64 = 0.05;
pub const MASH_HOP_UTILIZATION: f64 = 0.02;

pub const SERVING_ML: f64 = 355.0;

/// Everything the engine derives from a recipe.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RecipeCalculations {
    pub og: f64,
    pub fg: f64,
    pub abv: f64,
    pub ibu: f64,
    pub srm: f64,
    /// Per 355 mL serving.
    pub calories: f64,
    /// Grams per 355 mL serving.
    pub carbs: f64,
    pub pre_boil_volume_l: f64,
    pub mash_water_l: f64,
    pub sparge_water_l: f64,
    pub total_water_l: f64,
    pub estimated_mash_ph: Option<f64>,
    pub ph_adjustment: Option<PhAdjustment>,
    pub effective_attenuation: f64,
    pub bu_gu_ratio: f64,
    pub strike_temp_c: Option<f64>,
    pub water_report: Option<WaterReport>,
}

/// Where the salts end up and what the mash water looks like afterwards.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WaterReport {
    pub mash_salts: SaltAdditions,
    pub sparge_salts: SaltAdditions,
    pub mash_profile: WaterProfile,
    /// ppm as CaCO3.
    pub residual_alkalinity: f64,
    pub chloride_to_sulfate: Option<f64>,
}

fn batch_gallons(recipe: &Recipe) -> Option<f64> {
    if recipe.batch_volume_l <= MIN_VOLUME_L {
        None
    } else {
        Some(liters_to_gallons(recipe.batch_volume_l))
    }
}

/// Gravity points each fermentable brings to the batch.
fn gravity_points(recipe: &Recipe) -> Vec<(f64, &Fermentable)> {
    let Some(gal) = batch_gallons(recipe) else {
        return Vec::new();
    };
    let efficiency = recipe.equipment.mash_efficiency_percent / 100.0;
    recipe
        .fermentables
        .iter()
        .map(|f| (f.ppg * kg_to_lbs(f.weight_kg) * efficiency / gal, f))
        .collect()
}

pub fn calculate_og(recipe: &Recipe) -> f64 {
    let points: f64 = gravity_points(recipe).iter().map(|(p, _)| p).sum();
    1.0 + points / 1000.0
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum FermentableCategory {
    NonFermentable,
    Sugar,
    Extract,
    Roasted,
    Crystal,
    Kilned,
    Adjunct,
    Base,
}

impl FermentableCategory {
    fn default_fermentability(self) -> f64 {
        match self {
            FermentableCategory::NonFermentable => 0.0,
            FermentableCategory::Sugar => 1.0,
            FermentableCategory::Extract => 0.8,
            FermentableCategory::Roasted => 0.6,
            FermentableCategory::Crystal => 0.5,
            FermentableCategory::Kilned => 0.95,
            FermentableCategory::Adjunct => 0.85,
            FermentableCategory::Base => 1.0,
        }
    }
}

fn is_non_fermentable(name: &str, _color: f64) -> bool {
    has_any(name, &["lactose", "maltodextrin"])
}

fn is_sugar(name: &str, _color: f64) -> bool {
    has_any(
        name,
        &["sugar", "dextrose", "sucrose", "candi", "syrup", "molasses", "agave"],
    ) || (name.contains("honey") && !name.contains("malt"))
}

fn is_extract(name: &str, _color: f64) -> bool {
    has_any(name, &["extract", "dme", "lme"])
}

fn is_roasted(name: &str, color: f64) -> bool {
    color >= 200.0 || has_any(name, &["roast", "black", "chocolate", "carafa", "patent"])
}

fn is_crystal(name: &str, _color: f64) -> bool {
    has_any(name, &["crystal", "caramel", "cara", "special b"])
}

fn is_kilned(name: &str, _color: f64) -> bool {
    has_any(name, &["munich", "vienna", "aromatic", "melanoidin"])
}

fn is_adjunct(name: &str, _color: f64) -> bool {
    has_any(name, &["flaked", "torrified", "oat"])
}

type FermentableRule = (fn(&str, f64) -> bool, FermentableCategory);

const FERMENTABLE_RULES: [FermentableRule; 7] = [
    (is_non_fermentable, FermentableCategory::NonFermentable),
    (is_sugar, FermentableCategory::Sugar),
    (is_extract, FermentableCategory::Extract),
    (is_roasted, FermentableCategory::Roasted),
    (is_crystal, FermentableCategory::Crystal),
    (is_kilned, FermentableCategory::Kilned),
    (is_adjunct, FermentableCategory::Adjunct),
];

fn classify_fermentable(f: &Fermentable) -> FermentableCategory {
    let lower = f.name.to_lowercase();
    FERMENTABLE_RULES
        .iter()
        .find(|(matches, _)| matches(lower.as_str(), f.color_lovibond))
        .map(|(_, category)| *category)
        .unwrap_or(FermentableCategory::Base)
}

/// Share of a fermentable's extract that yeast can eat, 0..=1.
pub fn fermentability_of(f: &Fermentable) -> f64 {
    match f.fermentability {
        Some(v) if v.is_finite() => v.clamp(0.0, 1.0),
        _ => classify_fermentable(f).default_fermentability(),
    }
}

fn mean(values: impl Iterator<Item = f64>) -> Option<f64> {
    let (sum, n) = values.fold((0.0, 0usize), |(s, n), v| (s + v, n + 1));
    if n == 0 { None } else { Some(sum / n as f64) }
}

/// Yeast attenuation shifted by mash and fermentation conditions.
pub fn effective_attenuation(recipe: &Recipe, base_attenuation: f64) -> f64 {
    let steps = &recipe.mash_steps;

    let mash_temp_adj = mean(steps.iter().map(|s| s.temperature_c))
        .map(|t| -MASH_TEMP_COEFF_PER_C * (t - REFERENCE_MASH_TEMP_C))
        .unwrap_or(0.0);

    let decoctions = steps
        .iter()
        .filter(|s| s.step_type == MashStepType::Decoction)
        .count();
    let decoction_adj = DECOCTION_BONUS_PER_STEP * decoctions as f64;

    let mash_time_adj = if steps.is_empty() {
        0.0
    } else {
        let minutes: f64 = steps.iter().map(|s| s.duration_min).sum();
        (MASH_TIME_COEFF_PER_MIN * (minutes - REFERENCE_MASH_MIN))
            .clamp(-MASH_TIME_CAP, MASH_TIME_CAP)
    };

    let ferment_temp_adj = mean(
        recipe
            .fermentation_steps
            .iter()
            .filter(|s| s.step_type == FermentationStepType::Primary)
            .map(|s| s.temperature_c),
    )
    .map(|t| FERMENT_TEMP_COEFF_PER_C * (t - REFERENCE_FERMENT_TEMP_C))
    .unwrap_or(0.0);

    let active: Vec<_> = recipe
        .fermentation_steps
        .iter()
        .filter(|s| {
            matches!(
                s.step_type,
                FermentationStepType::Primary
                    | FermentationStepType::Secondary
                    | FermentationStepType::DiacetylRest
            )
        })
        .collect();
    let ferment_days_adj = if active.is_empty() {
        0.0
    } else {
        let days: f64 = active.iter().map(|s| s.duration_days).sum();
        FERMENT_DAYS_COEFF_PER_DAY * (days - REFERENCE_FERMENT_DAYS)
    };

    let total = base_attenuation
        + mash_temp_adj
        + decoction_adj
        + mash_time_adj
        + ferment_temp_adj
        + ferment_days_adj;
    debug!(
        base_attenuation,
        mash_temp_adj,
        decoction_adj,
        mash_time_adj,
        ferment_temp_adj,
        ferment_days_adj,
        "effective attenuation"
    );
    total.clamp(MIN_EFFECTIVE_ATTENUATION, MAX_EFFECTIVE_ATTENUATION)
}

/// Highest attenuation among the recipe's yeasts, or the assumed default.
pub fn base_attenuation(recipe: &Recipe, assumptions: &Assumptions) -> f64 {
    recipe
        .yeasts
        .iter()
        .map(|y| y.attenuation)
        .filter(|a| a.is_finite())
        .reduce(f64::max)
        .unwrap_or(assumptions.default_attenuation)
}

/// Final gravity from per-ingredient fermentability and the given attenuation.
pub fn calculate_fg_with_attenuation(recipe: &Recipe, attenuation: f64) -> f64 {
    let (fermentable, non_fermentable) = gravity_points(recipe).iter().fold(
        (0.0, 0.0),
        |(ferm, non), (points, f)| {
            let share = fermentability_of(f);
            (ferm + points * share, non + points * (1.0 - share))
        },
    );
    1.0 + (non_fermentable + fermentable * (1.0 - attenuation)) / 1000.0
}

pub fn calculate_fg(recipe: &Recipe) -> f64 {
    let ass = Assumptions::default();
    let att = effective_attenuation(recipe, base_attenuation(recipe, &ass));
    calculate_fg_with_attenuation(recipe, att)
}

pub fn calculate_abv(og: f64, fg: f64) -> f64 {
    (og - fg) * ABV_FACTOR
}

/// Tinseth utilization for `minutes` of contact at `gravity`.
pub fn tinseth_utilization(minutes: f64, gravity: f64) -> f64 {
    if minutes <= 0.0 {
        return 0.0;
    }
    let bigness = 1.65 * 0.000_125_f64.powf(gravity - 1.0);
    let time_factor = (1.0 - (-0.04 * minutes).exp()) / 4.15;
    bigness * time_factor
}

/// Fraction of full utilization reached at a whirlpool temperature.
pub fn whirlpool_temperature_factor(temperature_c: f64) -> f64 {
    if temperature_c < WHIRLPOOL_MIN_TEMP_C {
        return 0.0;
    }
    let span = WHIRLPOOL_FULL_TEMP_C - WHIRLPOOL_MIN_TEMP_C;
    ((temperature_c - WHIRLPOOL_MIN_TEMP_C) / span)
        .powf(WHIRLPOOL_TEMP_EXPONENT)
        .min(1.0)
}

pub fn hop_utilization(addition: &HopAddition, og: f64, boil_time_min: f64) -> f64 {
    match addition {
        HopAddition::Boil { time_minutes } => tinseth_utilization(*time_minutes, og),
        HopAddition::FirstWort { time_minutes } => {
            let minutes = time_minutes.unwrap_or(boil_time_min);
            tinseth_utilization(minutes + FIRST_WORT_BONUS_MIN, og)
        }
        HopAddition::Whirlpool {
            time_minutes,
            temperature_c,
        } => tinseth_utilization(*time_minutes, og) * whirlpool_temperature_factor(*temperature_c),
        HopAddition::DryHop { .. } => DRY_HOP_UTILIZATION,
        HopAddition::Mash => MASH_HOP_UTILIZATION,
    }
}

/// Tinseth IBU summed over all additions, rounded to 0.1.
pub fn calculate_ibu(recipe: &Recipe, og: f64) -> f64 {
    let Some(gal) = batch_gallons(recipe) else {
        return 0.0;
    };
    let total: f64 = recipe
        .hops
        .iter()
        .map(|hop| {
            let aau = grams_to_oz(hop.grams) * hop.alpha_acid;
            let util = hop_utilization(&hop.addition, og, recipe.equipment.boil_time_min);
            let ibu = aau * util * IBU_METRIC_FACTOR / gal;
            trace!(hop = %hop.name, util, ibu, "hop addition");
            ibu
        })
        .sum();
    round_to(total, 1)
}

/// Morey color, SRM.
pub fn calculate_srm(recipe: &Recipe) -> f64 {
    let Some(gal) = batch_gallons(recipe) else {
        return 0.0;
    };
    if recipe.fermentables.is_empty() {
        return 0.0;
    }
    let mcu: f64 = recipe
        .fermentables
        .iter()
        .map(|f| f.color_lovibond * kg_to_lbs(f.weight_kg))
        .sum::<f64>()
        / gal;
    if mcu <= 0.0 {
        return 0.0;
    }
    1.4922 * mcu.powf(0.6859)
}

/// Calories and carbohydrate grams per serving.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Nutrition {
    pub calories: f64,
    pub carbs: f64,
}

pub fn calculate_nutrition(og: f64, fg: f64) -> Nutrition {
    let original_extract = sg_to_plato(og);
    let apparent_extract = sg_to_plato(fg);
    let real_extract = 0.1808 * original_extract + 0.8192 * apparent_extract;
    let abw = (original_extract - real_extract) / (2.0665 - 0.010665 * original_extract);
    let calories_per_l = (6.9 * abw + 4.0 * (real_extract - 0.1)) * fg * 10.0;
    let carbs_per_l = (real_extract - 0.1) * fg * 10.0;
    let serving = SERVING_ML / 1000.0;
    Nutrition {
        calories: (calories_per_l * serving).max(0.0),
        carbs: (carbs_per_l * serving).max(0.0),
    }
}

fn bu_gu_ratio(ibu: f64, og: f64) -> f64 {
    let gu = (og - 1.0) * 1000.0;
    if gu <= 0.0 { 0.0 } else { ibu / gu }
}

fn first_infusion_strike_temp(recipe: &Recipe, assumptions: &Assumptions) -> Option<f64> {
    recipe
        .mash_steps
        .iter()
        .find(|s| s.step_type == MashStepType::Infusion)
        .map(|s| {
            round_to(
                strike_temp(
                    s.temperature_c,
                    recipe.equipment.mash_thickness_l_per_kg,
                    assumptions.grain_temp_c,
                ),
                1,
            )
        })
}

fn water_report(recipe: &Recipe, mash_l: f64, sparge_l: f64) -> Option<WaterReport> {
    let chem = recipe.water_chemistry.as_ref()?;
    let (mash_salts, sparge_salts) = split_salts_proportionally(&chem.salts, mash_l, sparge_l);
    let mash_profile = mash_water_profile(&chem.source, &chem.salts, mash_l, sparge_l);
    Some(WaterReport {
        mash_salts,
        sparge_salts,
        mash_profile,
        residual_alkalinity: residual_alkalinity_as_caco3(&mash_profile),
        chloride_to_sulfate: chloride_to_sulfate_ratio(&mash_profile),
    })
}

/// Full calculation with default assumptions.
pub fn calculate_recipe(recipe: &Recipe) -> RecipeCalculations {
    calculate_recipe_with(recipe, &Assumptions::default())
}

/// Full calculation. Deterministic: the same inputs always give the same output.
pub fn calculate_recipe_with(recipe: &Recipe, assumptions: &Assumptions) -> RecipeCalculations {
    let ass = assumptions.clone().normalized();

    let og = calculate_og(recipe);
    let attenuation = effective_attenuation(recipe, base_attenuation(recipe, &ass));
    let fg = calculate_fg_with_attenuation(recipe, attenuation);
    let ibu = calculate_ibu(recipe, og);
    let nutrition = calculate_nutrition(og, fg);

    let mash_l = mash_water(recipe);
    let sparge_l = sparge_water(recipe);
    let estimated_mash_ph = estimate_mash_ph(recipe, mash_l, sparge_l);
    let target_ph = recipe
        .water_chemistry
        .as_ref()
        .and_then(|c| c.target_mash_ph)
        .unwrap_or(ass.target_mash_ph);
    let ph_adjustment = estimated_mash_ph
        .and_then(|ph| calculate_ph_adjustment(ph, target_ph, total_grain_kg(recipe)));

    debug!(recipe = %recipe.name, og, fg, ibu, "recipe calculated");

    RecipeCalculations {
        og,
        fg,
        abv: calculate_abv(og, fg),
        ibu,
        srm: calculate_srm(recipe),
        calories: nutrition.calories,
        carbs: nutrition.carbs,
        pre_boil_volume_l: pre_boil_volume(recipe),
        mash_water_l: mash_l,
        sparge_water_l: sparge_l,
        total_water_l: total_water(recipe),
        estimated_mash_ph,
        ph_adjustment,
        effective_attenuation: attenuation,
        bu_gu_ratio: bu_gu_ratio(ibu, og),
        strike_temp_c: first_infusion_strike_temp(recipe, &ass),
        water_report: water_report(recipe, mash_l, sparge_l),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{FermentationStep, Hop, MashStep, Yeast};

    fn pale_ale() -> Recipe {
        let mut r = Recipe::new("pale", 20.0);
        r.fermentables.push(Fermentable::new("Pale Malt", 5.0, 3.0, 37.0));
        r
    }

    #[test]
    fn og_for_five_kilo_grist() {
        let og = calculate_og(&pale_ale());
        assert!(og > 1.055 && og < 1.060, "{og}");
    }

    #[test]
    fn zero_batch_volume_is_neutral() {
        let mut r = pale_ale();
        r.batch_volume_l = 0.0;
        assert_eq!(calculate_og(&r), 1.0);
        assert_eq!(calculate_srm(&r), 0.0);
        assert_eq!(calculate_ibu(&r, 1.050), 0.0);
    }

    #[test]
    fn fermentability_rules() {
        assert_eq!(fermentability_of(&Fermentable::new("Lactose", 0.5, 0.0, 35.0)), 0.0);
        assert_eq!(
            fermentability_of(&Fermentable::new("Crystal 60", 0.5, 60.0, 34.0)),
            0.5
        );
        assert_eq!(
            fermentability_of(&Fermentable::new("Table Sugar", 0.5, 0.0, 46.0)),
            1.0
        );
        assert_eq!(
            fermentability_of(&Fermentable::new("Pilsner", 4.0, 1.6, 37.0)),
            1.0
        );
        let mut f = Fermentable::new("Lactose", 0.5, 0.0, 35.0);
        f.fermentability = Some(1.4);
        assert_eq!(fermentability_of(&f), 1.0);
    }

    #[test]
    fn lactose_raises_fg() {
        let plain = pale_ale();
        let mut sweet = pale_ale();
        sweet
            .fermentables
            .push(Fermentable::new("Lactose", 0.5, 0.0, 35.0));
        assert!(calculate_fg(&sweet) > calculate_fg(&plain));
    }

    #[test]
    fn attenuation_responds_to_process() {
        let mut r = pale_ale();
        r.yeasts.push(Yeast {
            name: "US-05".into(),
            attenuation: 0.78,
            starter: None,
        });
        assert!((effective_attenuation(&r, 0.78) - 0.78).abs() < 1e-12);

        r.mash_steps.push(MashStep {
            step_type: MashStepType::Infusion,
            temperature_c: 69.0,
            duration_min: 60.0,
            infusion_volume_l: None,
            decoction_volume_l: None,
        });
        let hot = effective_attenuation(&r, 0.78);
        assert!((hot - (0.78 - 0.018)).abs() < 1e-9, "{hot}");

        r.mash_steps.push(MashStep {
            step_type: MashStepType::Infusion,
            temperature_c: 77.0,
            duration_min: 10.0,
            infusion_volume_l: None,
            decoction_volume_l: None,
        });
        // Mean of 69 and 77 is 73 °C over 70 minutes total.
        let stepped = effective_attenuation(&r, 0.78);
        assert!((stepped - (0.78 - 0.042 + 0.005)).abs() < 1e-9, "{stepped}");

        r.fermentation_steps.push(FermentationStep {
            step_type: FermentationStepType::Primary,
            duration_days: 14.0,
            temperature_c: 22.0,
        });
        let warm = effective_attenuation(&r, 0.78);
        assert!((warm - (stepped + 0.008 + 0.008)).abs() < 1e-9, "{warm}");

        assert_eq!(effective_attenuation(&r, 0.2), MIN_EFFECTIVE_ATTENUATION);
        assert_eq!(effective_attenuation(&r, 1.2), MAX_EFFECTIVE_ATTENUATION);
    }

    #[test]
    fn mash_out_step_counts_toward_mash_profile() {
        let mut r = pale_ale();
        for (temperature_c, duration_min) in [(66.0, 60.0), (76.0, 10.0)] {
            r.mash_steps.push(MashStep {
                step_type: MashStepType::Infusion,
                temperature_c,
                duration_min,
                infusion_volume_l: None,
                decoction_volume_l: None,
            });
        }
        let a = effective_attenuation(&r, 0.75);
        assert!((a - 0.725).abs() < 1e-9, "{a}");
    }

    #[test]
    fn mash_time_adjustment_is_capped() {
        let mut r = pale_ale();
        r.mash_steps.push(MashStep {
            step_type: MashStepType::Temperature,
            temperature_c: 66.0,
            duration_min: 300.0,
            infusion_volume_l: None,
            decoction_volume_l: None,
        });
        assert!((effective_attenuation(&r, 0.75) - 0.78).abs() < 1e-12);
    }

    #[test]
    fn whirlpool_below_threshold_adds_nothing() {
        assert_eq!(whirlpool_temperature_factor(55.0), 0.0);
        assert_eq!(whirlpool_temperature_factor(100.0), 1.0);
        let warm = whirlpool_temperature_factor(80.0);
        assert!(warm > 0.0 && warm < 1.0);
    }

    #[test]
    fn first_wort_beats_plain_boil() {
        let boil = hop_utilization(&HopAddition::Boil { time_minutes: 60.0 }, 1.050, 60.0);
        let fwh = hop_utilization(&HopAddition::FirstWort { time_minutes: None }, 1.050, 60.0);
        assert!(fwh > boil);
        assert_eq!(
            hop_utilization(&HopAddition::DryHop { days: 3.0 }, 1.050, 60.0),
            DRY_HOP_UTILIZATION
        );
        assert_eq!(
            hop_utilization(&HopAddition::Mash, 1.050, 60.0),
            MASH_HOP_UTILIZATION
        );
    }

    #[test]
    fn ibu_is_rounded_to_one_decimal() {
        let mut r = pale_ale();
        r.hops.push(Hop {
            name: "Magnum".into(),
            alpha_acid: 12.3,
            grams: 17.0,
            addition: HopAddition::Boil { time_minutes: 60.0 },
        });
        let ibu = calculate_ibu(&r, 1.055);
        assert_eq!(ibu, round_to(ibu, 1));
        assert!(ibu > 0.0);
    }

    #[test]
    fn nutrition_for_typical_ale() {
        let n = calculate_nutrition(1.050, 1.010);
        assert!(n.calories > 140.0 && n.calories < 180.0, "{}", n.calories);
        assert!(n.carbs > 10.0 && n.carbs < 18.0, "{}", n.carbs);
        let n = calculate_nutrition(1.0, 1.0);
        assert_eq!(n.carbs, 0.0);
        assert_eq!(n.calories, 0.0);
    }

    #[test]
    fn srm_morey_for_pale_grist() {
        let srm = calculate_srm(&pale_ale());
        assert!(srm > 4.0 && srm < 7.0, "{srm}");
    }
}
