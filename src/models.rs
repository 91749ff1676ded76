use serde::{Deserialize, Serialize};

use crate::chemistry::{SaltAdditions, WaterProfile};

/// Tunable defaults for the calculators. Anything not carried on the recipe
/// itself lives here so a caller can override it in one place.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Assumptions {
    /// Grain temperature used for strike water, °C.
    pub grain_temp_c: f64,
    /// Pitch rate in billion cells per liter per °Plato.
    pub pitch_rate: f64,
    /// Attenuation used when the recipe lists no yeast.
    pub default_attenuation: f64,
    /// Mash pH the dosing recommendation aims for when the water profile has none.
    pub target_mash_ph: f64,
    /// Extract potential of dry malt extract used for starters.
    pub dme_ppg: f64,
}

impl Default for Assumptions {
    fn default() -> Self {
        Self {
            grain_temp_c: 20.0,
            pitch_rate: 0.75,
            default_attenuation: 0.75,
            target_mash_ph: 5.4,
            dme_ppg: 45.0,
        }
    }
}

impl Assumptions {
    /// Replace non-finite or non-positive values with their defaults.
    pub fn normalized(mut self) -> Self {
        let d = Self::default();
        if !self.grain_temp_c.is_finite() {
            self.grain_temp_c = d.grain_temp_c;
        }
        if !(self.pitch_rate.is_finite() && self.pitch_rate > 0.0) {
            self.pitch_rate = d.pitch_rate;
        }
        if !(self.default_attenuation.is_finite() && self.default_attenuation > 0.0) {
            self.default_attenuation = d.default_attenuation;
        }
        if !(self.target_mash_ph.is_finite() && self.target_mash_ph > 0.0) {
            self.target_mash_ph = d.target_mash_ph;
        }
        if !(self.dme_ppg.is_finite() && self.dme_ppg > 0.0) {
            self.dme_ppg = d.dme_ppg;
        }
        self
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Recipe {
    #[serde(default)]
    pub name: String,
    pub batch_volume_l: f64,
    #[serde(default)]
    pub equipment: Equipment,
    #[serde(default)]
    pub fermentables: Vec<Fermentable>,
    #[serde(default)]
    pub hops: Vec<Hop>,
    #[serde(default)]
    pub yeasts: Vec<Yeast>,
    #[serde(default)]
    pub mash_steps: Vec<MashStep>,
    #[serde(default)]
    pub fermentation_steps: Vec<FermentationStep>,
    #[serde(default)]
    pub water_chemistry: Option<WaterChemistry>,
    #[serde(default)]
    pub others: Vec<OtherIngredient>,
}

impl Recipe {
    /// An empty recipe on default equipment.
    pub fn new(name: impl Into<String>, batch_volume_l: f64) -> Self {
        Self {
            name: name.into(),
            batch_volume_l,
            equipment: Equipment::default(),
            fermentables: Vec::new(),
            hops: Vec::new(),
            yeasts: Vec::new(),
            mash_steps: Vec::new(),
            fermentation_steps: Vec::new(),
            water_chemistry: None,
            others: Vec::new(),
        }
    }
}

/// Brewhouse losses and process settings.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Equipment {
    pub boil_time_min: f64,
    pub boil_off_rate_l_per_hr: f64,
    pub mash_efficiency_percent: f64,
    pub mash_thickness_l_per_kg: f64,
    pub grain_absorption_l_per_kg: f64,
    pub mash_tun_deadspace_l: f64,
    pub kettle_loss_l: f64,
    pub chiller_loss_l: f64,
    pub fermenter_loss_l: f64,
    pub cooling_shrinkage_percent: f64,
    pub hops_absorption_l_per_kg: f64,
}

impl Default for Equipment {
    fn default() -> Self {
        Self {
            boil_time_min: 60.0,
            boil_off_rate_l_per_hr: 4.0,
            mash_efficiency_percent: 75.0,
            mash_thickness_l_per_kg: 3.0,
            grain_absorption_l_per_kg: 1.0,
            mash_tun_deadspace_l: 0.0,
            kettle_loss_l: 0.0,
            chiller_loss_l: 0.0,
            fermenter_loss_l: 0.0,
            cooling_shrinkage_percent: 4.0,
            hops_absorption_l_per_kg: 0.7,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Fermentable {
    pub name: String,
    pub weight_kg: f64,
    #[serde(default)]
    pub color_lovibond: f64,
    /// Gravity points per pound per gallon at full extraction.
    pub ppg: f64,
    /// Explicit fermentable fraction of the extract, 0..=1.
    #[serde(default)]
    pub fermentability: Option<f64>,
}

impl Fermentable {
    pub fn new(name: impl Into<String>, weight_kg: f64, color_lovibond: f64, ppg: f64) -> Self {
        Self {
            name: name.into(),
            weight_kg,
            color_lovibond,
            ppg,
            fermentability: None,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Hop {
    pub name: String,
    /// Alpha acid, percent.
    pub alpha_acid: f64,
    pub grams: f64,
    #[serde(flatten)]
    pub addition: HopAddition,
}

/// When and how a hop addition is used. Only the fields relevant to each
/// addition type exist on its variant.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum HopAddition {
    Boil {
        time_minutes: f64,
    },
    Whirlpool {
        time_minutes: f64,
        temperature_c: f64,
    },
    DryHop {
        #[serde(default)]
        days: f64,
    },
    FirstWort {
        /// Falls back to the equipment boil time.
        #[serde(default)]
        time_minutes: Option<f64>,
    },
    Mash,
}

impl HopAddition {
    /// Boil, whirlpool and first-wort hops sit in the kettle and soak up wort.
    pub fn is_kettle(&self) -> bool {
        match self {
            HopAddition::Boil { .. }
            | HopAddition::Whirlpool { .. }
            | HopAddition::FirstWort { .. } => true,
            HopAddition::DryHop { .. } | HopAddition::Mash => false,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Yeast {
    #[serde(default)]
    pub name: String,
    /// Apparent attenuation as a fraction, e.g. 0.75.
    pub attenuation: f64,
    #[serde(default)]
    pub starter: Option<StarterInfo>,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum YeastPackage {
    /// 11 g sachet.
    Dry,
    /// Standard liquid pack, about 100 billion cells when fresh.
    Liquid,
    /// High-count liquid pouch, about 200 billion cells when fresh.
    LiquidPouch,
    /// Harvested slurry measured by volume and density.
    Slurry,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct StarterInfo {
    pub package: YeastPackage,
    #[serde(default = "one")]
    pub packs: f64,
    /// ISO date, `YYYY-MM-DD`.
    #[serde(default)]
    pub manufacture_date: Option<String>,
    #[serde(default)]
    pub slurry_liters: f64,
    #[serde(default)]
    pub slurry_billion_per_ml: f64,
    #[serde(default)]
    pub steps: Vec<StarterStep>,
}

fn one() -> f64 {
    1.0
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct StarterStep {
    pub volume_liters: f64,
    pub gravity: f64,
    pub model: GrowthModel,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GrowthModel {
    /// Chris White's inoculation-rate curve, optionally with intermittent shaking.
    White {
        #[serde(default)]
        shaking: bool,
    },
    /// Kai Troester's stir-plate model: growth proportional to extract.
    Braukaiser,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum MashStepType {
    Infusion,
    Temperature,
    Decoction,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct MashStep {
    pub step_type: MashStepType,
    pub temperature_c: f64,
    pub duration_min: f64,
    #[serde(default)]
    pub infusion_volume_l: Option<f64>,
    #[serde(default)]
    pub decoction_volume_l: Option<f64>,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FermentationStepType {
    Primary,
    Secondary,
    Conditioning,
    ColdCrash,
    DiacetylRest,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct FermentationStep {
    pub step_type: FermentationStepType,
    pub duration_days: f64,
    pub temperature_c: f64,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct WaterChemistry {
    #[serde(default)]
    pub source: WaterProfile,
    /// Whole-batch salt totals; the mash/sparge split is derived.
    #[serde(default)]
    pub salts: SaltAdditions,
    #[serde(default)]
    pub target_style: Option<String>,
    #[serde(default)]
    pub target_mash_ph: Option<f64>,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum OtherUnit {
    Ml,
    G,
    Tsp,
    Items,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum OtherUsage {
    Mash,
    Sparge,
    Boil,
    Fermentation,
    Packaging,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct OtherIngredient {
    pub name: String,
    pub amount: f64,
    pub unit: OtherUnit,
    pub usage: OtherUsage,
}
