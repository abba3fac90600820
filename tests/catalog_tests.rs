use std::path::Path;

use darkroad::craft::aggregate;
use darkroad::data::validate::{validate_craft, validate_medals};
use darkroad::data::{craft, medal, Catalogs};
use darkroad::scoring::{damage_potential, ScoreOptions};

fn approx_eq(a: f64, b: f64, tol: f64) {
    assert!((a - b).abs() <= tol, "expected {b}, got {a}");
}

fn load() -> Catalogs {
    Catalogs::load_from_dir(Path::new("data")).unwrap()
}

#[test]
fn shipped_catalogs_load() {
    let catalogs = load();
    assert_eq!(catalogs.medals.len(), 10);
    assert_eq!(catalogs.craft.accessories().count(), 38);
    assert_eq!(catalogs.craft.materials().count(), 22);
}

#[test]
fn medal_lookup_respects_id_holes() {
    let catalogs = load();
    assert_eq!(catalogs.medals.get(1).unwrap().name, "Training Dummy");
    assert!(catalogs.medals.get(10).is_none());
    assert_eq!(catalogs.medals.get(11).unwrap().name, "Moogle");
}

#[test]
fn shipped_medals_score_without_errors() {
    let catalogs = load();
    let everything = ScoreOptions {
        include_general_attack_up: true,
        include_attribute_attack_up: true,
        include_supernova: true,
    };
    for medal in catalogs.medals.iter() {
        assert!(
            damage_potential(medal, everything).is_ok(),
            "medal {} failed to score",
            medal.id
        );
    }
}

#[test]
fn training_dummy_scores_its_raw_strength() {
    let catalogs = load();
    let medal = catalogs.medals.get(1).unwrap();
    assert_eq!(damage_potential(medal, ScoreOptions::default()).unwrap(), 100.0);
}

#[test]
fn sora_scores_strength_times_special_attack() {
    let catalogs = load();
    let medal = catalogs.medals.get(2).unwrap();
    let score = damage_potential(medal, ScoreOptions::default()).unwrap();
    approx_eq(score, 1200.0 * 1.8, 1e-9);
}

#[test]
fn badge_recipe_aggregates_to_its_raw_materials() {
    let catalogs = load();
    let summary = aggregate(&catalogs.craft, 1).unwrap();
    assert_eq!(summary.total_bp, 5000);
    assert_eq!(summary.material_totals.get(&1), Some(&5));
    assert_eq!(summary.material_totals.get(&2), Some(&5));
    assert!(summary.accessory_totals.is_empty());
}

#[test]
fn badge_ii_expands_through_three_badges() {
    // Badge II: 3 x Badge + 3 + 3 shards; each Badge is 5 + 5 shards.
    let catalogs = load();
    let summary = aggregate(&catalogs.craft, 6).unwrap();
    assert_eq!(summary.total_bp, 10_000 + 3 * 5_000);
    assert_eq!(summary.material_totals.get(&1), Some(&18));
    assert_eq!(summary.material_totals.get(&2), Some(&18));
}

#[test]
fn every_shipped_accessory_aggregates_without_errors() {
    let catalogs = load();
    let ids: Vec<u32> = catalogs.craft.accessories().map(|a| a.id).collect();
    for id in ids {
        assert!(
            aggregate(&catalogs.craft, id).is_ok(),
            "accessory {id} failed to aggregate"
        );
    }
}

#[test]
fn shipped_data_passes_validation() {
    let dir = Path::new("data");
    let medal_file = medal::load_medal_file(&dir.join(medal::MEDALS_FILE)).unwrap();
    let report = validate_medals(&medal_file.medals);
    assert!(!report.has_errors(), "{:?}", report.diagnostics);

    let accessories = craft::load_accessory_file(&dir.join(craft::ACCESSORIES_FILE))
        .unwrap()
        .accessories;
    let materials = craft::load_material_file(&dir.join(craft::MATERIALS_FILE))
        .unwrap()
        .materials;
    let report = validate_craft(&accessories, &materials);
    assert!(!report.has_errors(), "{:?}", report.diagnostics);
}

#[test]
fn registry_names_all_three_datasets() {
    let catalogs = load();
    assert_eq!(catalogs.registry.len(), 3);
    let medals = catalogs.registry.get("medals").unwrap();
    assert_eq!(medals.data_version.as_deref(), Some("2021.04"));
    assert!(catalogs.registry.contains_key("accessories"));
    assert!(catalogs.registry.contains_key("materials"));
}

#[test]
fn missing_registry_falls_back_to_empty() {
    let registry =
        darkroad::data::registry::load_registry(Path::new("data/definitely-missing.json"));
    assert!(registry.is_empty());
}
