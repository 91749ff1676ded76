//! Chemistry module: brewing water ion profiles, salt additions and alkalinity.
//!
//! This module provides:
//! - Molar masses (g/mol) for the ions and brewing salts in common use
//! - Per-salt ion yields derived from molar-mass ratios
//! - `WaterProfile` algebra (add, scale, clamp) for ion vectors
//! - Proportional mash/sparge split of whole-batch salt doses
//! - Residual alkalinity after Kolbach
//!
//! Units conventions:
//! - Ion concentrations are mg/L
//! - Salt additions are grams for the whole volume they are dissolved in
//! - Alkalinity helpers return mEq/L unless the name says `as_caco3`
//!
//! Design notes:
//! - Salt yields are mg of ion per gram of salt per liter of water, i.e.
//!   1000 × mass fraction of the ion in the hydrated salt
//! - Volumes at or below `MIN_VOLUME_L` yield an empty delta instead of dividing
//!
//! # Examples
//! ```rust
//! use brewcalc_rs::chemistry::{ion_delta_from_salts, SaltAdditions};
//!
//! let salts = SaltAdditions { gypsum: 5.0, ..Default::default() };
//! let delta = ion_delta_from_salts(&salts, 20.0);
//! assert!(delta.calcium > 50.0 && delta.sulfate > 130.0);
//! ```
//!
//! # Panics
//! None of the functions panic.

pub mod mash_ph;

use serde::{Deserialize, Serialize};

use crate::units::MIN_VOLUME_L;

/// Molar / mass constants (g/mol).
pub const M_CA: f64 = 40.078;
pub const M_MG: f64 = 24.305;
pub const M_NA: f64 = 22.989_769_28;
pub const M_CL: f64 = 35.453;
pub const M_SO4: f64 = 96.06;
pub const M_HCO3: f64 = 61.017;
pub const M_H2O: f64 = 18.015;

/// CaSO4·2H2O
pub const M_GYPSUM: f64 = M_CA + M_SO4 + 2.0 * M_H2O;
/// CaCl2·2H2O
pub const M_CALCIUM_CHLORIDE: f64 = M_CA + 2.0 * M_CL + 2.0 * M_H2O;
/// MgSO4·7H2O
pub const M_EPSOM: f64 = M_MG + M_SO4 + 7.0 * M_H2O;
/// NaCl
pub const M_TABLE_SALT: f64 = M_NA + M_CL;
/// NaHCO3
pub const M_BAKING_SODA: f64 = M_NA + M_HCO3;

/// Equivalent weights (mg/mEq) of the hardness ions.
pub const EQ_WEIGHT_CA: f64 = M_CA / 2.0;
pub const EQ_WEIGHT_MG: f64 = M_MG / 2.0;
/// mg per mEq as CaCO3 equivalent.
pub const MG_PER_MEQ_AS_CACO3: f64 = 50.043;

/// Kolbach: 3.5 mEq of calcium neutralise 1 mEq of alkalinity.
pub const KOLBACH_CA_DIVISOR: f64 = 3.5;
/// Kolbach: magnesium is half as effective as calcium.
pub const KOLBACH_MG_DIVISOR: f64 = 7.0;

/// Ion concentrations in mg/L.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct WaterProfile {
    pub calcium: f64,
    pub magnesium: f64,
    pub sodium: f64,
    pub sulfate: f64,
    pub chloride: f64,
    pub bicarbonate: f64,
}

/// Brewing salt masses in grams.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SaltAdditions {
    pub gypsum: f64,
    pub calcium_chloride: f64,
    pub epsom: f64,
    pub table_salt: f64,
    pub baking_soda: f64,
}

impl SaltAdditions {
    pub fn total_grams(&self) -> f64 {
        self.gypsum + self.calcium_chloride + self.epsom + self.table_salt + self.baking_soda
    }

    pub fn scaled(&self, factor: f64) -> Self {
        Self {
            gypsum: self.gypsum * factor,
            calcium_chloride: self.calcium_chloride * factor,
            epsom: self.epsom * factor,
            table_salt: self.table_salt * factor,
            baking_soda: self.baking_soda * factor,
        }
    }
}

/// mg/L of each ion contributed by 1 g of salt in 1 L of water.
fn yield_mg_l(ion_mass: f64, salt_mass: f64) -> f64 {
    1000.0 * ion_mass / salt_mass
}

/// Ion yield table for one gram of each salt per liter.
pub fn salt_yields() -> [(f64, WaterProfile); 5] {
    [
        (
            M_GYPSUM,
            WaterProfile {
                calcium: yield_mg_l(M_CA, M_GYPSUM),
                sulfate: yield_mg_l(M_SO4, M_GYPSUM),
                ..Default::default()
            },
        ),
        (
            M_CALCIUM_CHLORIDE,
            WaterProfile {
                calcium: yield_mg_l(M_CA, M_CALCIUM_CHLORIDE),
                chloride: yield_mg_l(2.0 * M_CL, M_CALCIUM_CHLORIDE),
                ..Default::default()
            },
        ),
        (
            M_EPSOM,
            WaterProfile {
                magnesium: yield_mg_l(M_MG, M_EPSOM),
                sulfate: yield_mg_l(M_SO4, M_EPSOM),
                ..Default::default()
            },
        ),
        (
            M_TABLE_SALT,
            WaterProfile {
                sodium: yield_mg_l(M_NA, M_TABLE_SALT),
                chloride: yield_mg_l(M_CL, M_TABLE_SALT),
                ..Default::default()
            },
        ),
        (
            M_BAKING_SODA,
            WaterProfile {
                sodium: yield_mg_l(M_NA, M_BAKING_SODA),
                bicarbonate: yield_mg_l(M_HCO3, M_BAKING_SODA),
                ..Default::default()
            },
        ),
    ]
}

/// Ion concentration change (mg/L) from dissolving `additions` in `volume_l` liters.
pub fn ion_delta_from_salts(additions: &SaltAdditions, volume_l: f64) -> WaterProfile {
    if volume_l <= MIN_VOLUME_L {
        return WaterProfile::default();
    }
    let grams = [
        additions.gypsum,
        additions.calcium_chloride,
        additions.epsom,
        additions.table_salt,
        additions.baking_soda,
    ];
    salt_yields()
        .iter()
        .zip(grams)
        .fold(WaterProfile::default(), |acc, ((_, y), g)| {
            add_profiles(&acc, &scale_profile(y, g / volume_l))
        })
}

pub fn add_profiles(a: &WaterProfile, b: &WaterProfile) -> WaterProfile {
    WaterProfile {
        calcium: a.calcium + b.calcium,
        magnesium: a.magnesium + b.magnesium,
        sodium: a.sodium + b.sodium,
        sulfate: a.sulfate + b.sulfate,
        chloride: a.chloride + b.chloride,
        bicarbonate: a.bicarbonate + b.bicarbonate,
    }
}

pub fn scale_profile(p: &WaterProfile, factor: f64) -> WaterProfile {
    WaterProfile {
        calcium: p.calcium * factor,
        magnesium: p.magnesium * factor,
        sodium: p.sodium * factor,
        sulfate: p.sulfate * factor,
        chloride: p.chloride * factor,
        bicarbonate: p.bicarbonate * factor,
    }
}

/// Floor every ion at zero.
pub fn clamp_profile(p: &WaterProfile) -> WaterProfile {
    WaterProfile {
        calcium: p.calcium.max(0.0),
        magnesium: p.magnesium.max(0.0),
        sodium: p.sodium.max(0.0),
        sulfate: p.sulfate.max(0.0),
        chloride: p.chloride.max(0.0),
        bicarbonate: p.bicarbonate.max(0.0),
    }
}

/// Allocate a whole-batch salt dose to mash and sparge water in proportion to volume.
///
/// Returns `(mash, sparge)`. With no usable total volume everything goes to the mash.
pub fn split_salts_proportionally(
    additions: &SaltAdditions,
    mash_volume_l: f64,
    sparge_volume_l: f64,
) -> (SaltAdditions, SaltAdditions) {
    let mash = mash_volume_l.max(0.0);
    let sparge = sparge_volume_l.max(0.0);
    let total = mash + sparge;
    if total <= MIN_VOLUME_L {
        return (*additions, SaltAdditions::default());
    }
    let mash_share = mash / total;
    (
        additions.scaled(mash_share),
        additions.scaled(1.0 - mash_share),
    )
}

/// Chloride:sulfate mass ratio, `None` without sulfate.
pub fn chloride_to_sulfate_ratio(p: &WaterProfile) -> Option<f64> {
    if p.sulfate <= 0.0 {
        None
    } else {
        Some(p.chloride / p.sulfate)
    }
}

/// Total alkalinity carried by bicarbonate, mEq/L.
pub fn alkalinity_meq_l(p: &WaterProfile) -> f64 {
    p.bicarbonate.max(0.0) / M_HCO3
}

/// Residual alkalinity (Kolbach), mEq/L. Negative values mean the hardness
/// more than offsets the alkalinity.
pub fn residual_alkalinity_meq_l(p: &WaterProfile) -> f64 {
    let ca_meq = p.calcium.max(0.0) / EQ_WEIGHT_CA;
    let mg_meq = p.magnesium.max(0.0) / EQ_WEIGHT_MG;
    alkalinity_meq_l(p) - (ca_meq / KOLBACH_CA_DIVISOR + mg_meq / KOLBACH_MG_DIVISOR)
}

/// Residual alkalinity expressed as ppm CaCO3.
pub fn residual_alkalinity_as_caco3(p: &WaterProfile) -> f64 {
    residual_alkalinity_meq_l(p) * MG_PER_MEQ_AS_CACO3
}

/// Source water plus the mash share of the salts, dissolved in the mash water.
pub fn mash_water_profile(
    source: &WaterProfile,
    salts: &SaltAdditions,
    mash_volume_l: f64,
    sparge_volume_l: f64,
) -> WaterProfile {
    let (mash_salts, _) = split_salts_proportionally(salts, mash_volume_l, sparge_volume_l);
    clamp_profile(&add_profiles(
        source,
        &ion_delta_from_salts(&mash_salts, mash_volume_l),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64, tol: f64) -> bool {
        (a - b).abs() < tol
    }

    #[test]
    fn gypsum_yields_match_molar_ratios() {
        let d = ion_delta_from_salts(
            &SaltAdditions {
                gypsum: 1.0,
                ..Default::default()
            },
            1.0,
        );
        assert!(close(d.calcium, 232.8, 0.5), "{}", d.calcium);
        assert!(close(d.sulfate, 557.9, 0.5), "{}", d.sulfate);
        assert_eq!(d.chloride, 0.0);
    }

    #[test]
    fn baking_soda_adds_sodium_and_bicarbonate() {
        let d = ion_delta_from_salts(
            &SaltAdditions {
                baking_soda: 2.0,
                ..Default::default()
            },
            10.0,
        );
        assert!(close(d.sodium, 54.7, 0.5), "{}", d.sodium);
        assert!(close(d.bicarbonate, 145.3, 0.5), "{}", d.bicarbonate);
    }

    #[test]
    fn zero_volume_gives_empty_delta() {
        let salts = SaltAdditions {
            table_salt: 3.0,
            ..Default::default()
        };
        assert_eq!(ion_delta_from_salts(&salts, 0.0), WaterProfile::default());
    }

    #[test]
    fn split_follows_volume_share() {
        let salts = SaltAdditions {
            gypsum: 6.0,
            calcium_chloride: 3.0,
            ..Default::default()
        };
        let (mash, sparge) = split_salts_proportionally(&salts, 15.0, 15.0);
        assert!(close(mash.gypsum, 3.0, 1e-12));
        assert!(close(sparge.calcium_chloride, 1.5, 1e-12));

        let (mash, sparge) = split_salts_proportionally(&salts, 0.0, 0.0);
        assert_eq!(mash, salts);
        assert_eq!(sparge.total_grams(), 0.0);
    }

    #[test]
    fn clamp_floors_negative_ions() {
        let p = WaterProfile {
            calcium: -5.0,
            sulfate: 10.0,
            ..Default::default()
        };
        let c = clamp_profile(&p);
        assert_eq!(c.calcium, 0.0);
        assert_eq!(c.sulfate, 10.0);
    }

    #[test]
    fn chloride_sulfate_ratio_guards_zero_sulfate() {
        let p = WaterProfile {
            chloride: 50.0,
            ..Default::default()
        };
        assert_eq!(chloride_to_sulfate_ratio(&p), None);
        let p = WaterProfile {
            chloride: 50.0,
            sulfate: 100.0,
            ..Default::default()
        };
        assert_eq!(chloride_to_sulfate_ratio(&p), Some(0.5));
    }

    #[test]
    fn residual_alkalinity_drops_with_calcium() {
        let soft = WaterProfile {
            bicarbonate: 200.0,
            ..Default::default()
        };
        let hard = WaterProfile {
            calcium: 100.0,
            ..soft
        };
        assert!(residual_alkalinity_meq_l(&soft) > 3.0);
        assert!(residual_alkalinity_meq_l(&hard) < residual_alkalinity_meq_l(&soft));
        assert_eq!(residual_alkalinity_meq_l(&WaterProfile::default()), 0.0);
    }
}
