//! Water volumes derived from equipment losses and the grain bill.

use crate::chemistry::mash_ph::is_mashable;
use crate::models::Recipe;
use crate::units::round_to;

/// Strike-water heat balance constant for thickness in L/kg.
pub const STRIKE_TEMP_FACTOR: f64 = 0.41;

/// Mass of everything that goes into the mash tun, kg.
pub fn total_grain_kg(recipe: &Recipe) -> f64 {
    recipe
        .fermentables
        .iter()
        .filter(|f| is_mashable(&f.name))
        .map(|f| f.weight_kg.max(0.0))
        .sum()
}

/// Wort lost to hop material left in the kettle, L.
pub fn kettle_hop_absorption(recipe: &Recipe) -> f64 {
    let kettle_kg: f64 = recipe
        .hops
        .iter()
        .filter(|h| h.addition.is_kettle())
        .map(|h| h.grams.max(0.0) / 1000.0)
        .sum();
    kettle_kg * recipe.equipment.hops_absorption_l_per_kg
}

/// Volume in the kettle before the boil, L.
///
/// Shrinkage applies to the post-boil volume only, so boil-off is added after it.
pub fn pre_boil_volume(recipe: &Recipe) -> f64 {
    let eq = &recipe.equipment;
    let boil_off = eq.boil_off_rate_l_per_hr * eq.boil_time_min / 60.0;
    let losses =
        eq.kettle_loss_l + kettle_hop_absorption(recipe) + eq.chiller_loss_l + eq.fermenter_loss_l;
    let post_boil = (recipe.batch_volume_l + losses) * (1.0 + eq.cooling_shrinkage_percent / 100.0);
    round_to(post_boil + boil_off, 1)
}

pub fn mash_water(recipe: &Recipe) -> f64 {
    let eq = &recipe.equipment;
    round_to(
        total_grain_kg(recipe) * eq.mash_thickness_l_per_kg + eq.mash_tun_deadspace_l,
        1,
    )
}

/// Sparge water needed to reach the pre-boil volume, never negative.
pub fn sparge_water(recipe: &Recipe) -> f64 {
    let eq = &recipe.equipment;
    let absorbed = total_grain_kg(recipe) * eq.grain_absorption_l_per_kg;
    let runoff = mash_water(recipe) - absorbed - eq.mash_tun_deadspace_l;
    round_to((pre_boil_volume(recipe) - runoff).max(0.0), 1)
}

pub fn total_water(recipe: &Recipe) -> f64 {
    round_to(mash_water(recipe) + sparge_water(recipe), 1)
}

/// Strike water temperature, °C, to land the mash at `target_mash_temp_c`.
pub fn strike_temp(target_mash_temp_c: f64, thickness_l_per_kg: f64, grain_temp_c: f64) -> f64 {
    if thickness_l_per_kg <= 0.0 {
        return target_mash_temp_c;
    }
    (target_mash_temp_c - grain_temp_c) * (STRIKE_TEMP_FACTOR / thickness_l_per_kg)
        + target_mash_temp_c
}
