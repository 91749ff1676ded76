//! Unit conversion constants and small numeric helpers shared by every calculator.
//!
//! The engine keeps recipe quantities in metric units (liters, kilograms, grams)
//! and converts to US units only where the brewing formulas were fitted in them
//! (gravity points per pound per gallon, AAU in ounces, MCU in lbs/gal).

/// Liters per US gallon.
pub const L_PER_GAL: f64 = 3.785_411_784;
/// Pounds per kilogram.
pub const LB_PER_KG: f64 = 2.204_622_62;
/// Grams per avoirdupois ounce.
pub const G_PER_OZ: f64 = 28.349_523_125;
/// Grams per pound.
pub const G_PER_LB: f64 = 453.592_37;

/// Volumes at or below this are treated as empty to keep divisions finite.
pub const MIN_VOLUME_L: f64 = 1e-9;

pub fn liters_to_gallons(liters: f64) -> f64 {
    liters / L_PER_GAL
}

pub fn kg_to_lbs(kg: f64) -> f64 {
    kg * LB_PER_KG
}

pub fn grams_to_oz(grams: f64) -> f64 {
    grams / G_PER_OZ
}

/// Round a floating-point value to a specified number of decimal digits.
pub fn round_to(x: f64, digits: i32) -> f64 {
    let p = 10f64.powi(digits);
    (x * p).round() / p
}
