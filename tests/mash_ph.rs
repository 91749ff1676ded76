use brewcalc_rs::chemistry::mash_ph::{MashGrain, estimate_mash_ph, mash_grains};
use brewcalc_rs::models::{Fermentable, OtherIngredient, OtherUnit, OtherUsage, WaterChemistry};
use brewcalc_rs::{
    GrainPhCategory, PhAdjustment, Recipe, WaterProfile, calculate_grain_only_ph,
    calculate_recipe, classify_grain_for_ph,
};

fn pale_grist() -> Vec<MashGrain> {
    mash_grains(&[
        Fermentable::new("Pale Malt 2-Row", 4.0, 1.8, 37.0),
        Fermentable::new("Maris Otter", 1.0, 3.0, 38.0),
    ])
}

fn amber_recipe() -> Recipe {
    let mut r = Recipe::new("amber", 20.0);
    r.fermentables
        .push(Fermentable::new("Pale Malt", 4.5, 3.0, 37.0));
    r.fermentables
        .push(Fermentable::new("Crystal 120", 0.5, 120.0, 33.0));
    r
}

#[test]
fn pale_grist_converges_to_base_malt_ph() {
    let ph = calculate_grain_only_ph(&pale_grist()).expect("non-empty grist");
    assert!((ph - 5.685).abs() < 0.01, "pH {ph}");
}

#[test]
fn empty_grist_has_no_ph() {
    assert_eq!(calculate_grain_only_ph(&[]), None);
    let grains = mash_grains(&[Fermentable::new("Light DME", 2.0, 4.0, 44.0)]);
    assert!(grains.is_empty());
}

#[test]
fn chocolate_wheat_is_roasted() {
    assert_eq!(
        classify_grain_for_ph("Chocolate Wheat", 400.0),
        GrainPhCategory::Roasted
    );
}

#[test]
fn extract_does_not_move_mash_ph() {
    let mut with_extract = amber_recipe();
    with_extract
        .fermentables
        .push(Fermentable::new("Amber Liquid Extract", 1.5, 10.0, 36.0));
    let base = estimate_mash_ph(&amber_recipe(), 15.0, 15.0);
    assert_eq!(estimate_mash_ph(&with_extract, 15.0, 15.0), base);
}

#[test]
fn alkaline_water_raises_ph_and_calls_for_acid() {
    let soft = amber_recipe();
    let mut hard = amber_recipe();
    hard.water_chemistry = Some(WaterChemistry {
        source: WaterProfile {
            calcium: 20.0,
            bicarbonate: 300.0,
            ..Default::default()
        },
        ..Default::default()
    });
    let soft_ph = calculate_recipe(&soft).estimated_mash_ph.unwrap();
    let calc = calculate_recipe(&hard);
    let hard_ph = calc.estimated_mash_ph.unwrap();
    assert!(hard_ph > soft_ph, "{hard_ph} <= {soft_ph}");
    assert!(matches!(
        calc.ph_adjustment,
        Some(PhAdjustment::LacticAcid { .. })
    ));
}

#[test]
fn lactic_acid_in_mash_lowers_ph() {
    let mut r = amber_recipe();
    let before = estimate_mash_ph(&r, 15.0, 15.0).unwrap();
    r.others.push(OtherIngredient {
        name: "Lactic Acid 88%".into(),
        amount: 3.0,
        unit: OtherUnit::Ml,
        usage: OtherUsage::Mash,
    });
    let after = estimate_mash_ph(&r, 15.0, 15.0).unwrap();
    assert!(after < before);

    // Acid added at packaging never reaches the mash.
    let mut late = amber_recipe();
    late.others.push(OtherIngredient {
        name: "Lactic Acid 88%".into(),
        amount: 3.0,
        unit: OtherUnit::Ml,
        usage: OtherUsage::Packaging,
    });
    assert_eq!(estimate_mash_ph(&late, 15.0, 15.0), Some(before));
}

#[test]
fn very_dark_grist_recommends_baking_soda() {
    let mut r = Recipe::new("black", 20.0);
    r.fermentables
        .push(Fermentable::new("Pale Malt", 2.0, 3.0, 37.0));
    r.fermentables
        .push(Fermentable::new("Crystal 120", 1.5, 120.0, 33.0));
    r.fermentables
        .push(Fermentable::new("Black Patent", 1.0, 500.0, 25.0));
    let calc = calculate_recipe(&r);
    let ph = calc.estimated_mash_ph.unwrap();
    assert!(ph < 5.38, "{ph}");
    assert!(matches!(
        calc.ph_adjustment,
        Some(PhAdjustment::BakingSoda { .. })
    ));
}
