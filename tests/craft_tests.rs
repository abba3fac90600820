use darkroad::craft::{aggregate, direct_components, CraftError};
use darkroad::data::craft::{
    Accessory, ComponentRef, ComponentSlot, CraftCatalog, Material,
};

fn accessory(id: u32, bp_cost: u64, components: Vec<ComponentSlot>) -> Accessory {
    Accessory {
        id,
        name: format!("Accessory {id}"),
        name_jp: None,
        rarity: 3,
        effect: None,
        bp_cost,
        uncraftable: false,
        components,
    }
}

fn uncraftable(id: u32, bp_cost: u64) -> Accessory {
    Accessory {
        uncraftable: true,
        ..accessory(id, bp_cost, Vec::new())
    }
}

fn material(id: u32) -> Material {
    Material {
        id,
        name: format!("Material {id}"),
        name_jp: None,
        text: String::new(),
    }
}

fn mslot(material_id: u32, quantity: u32) -> ComponentSlot {
    ComponentSlot {
        material_id: Some(material_id),
        accessory_id: None,
        quantity,
    }
}

fn aslot(accessory_id: u32, quantity: u32) -> ComponentSlot {
    ComponentSlot {
        material_id: None,
        accessory_id: Some(accessory_id),
        quantity,
    }
}

#[test]
fn recipe_with_no_components_costs_only_its_own_bp() {
    let catalog = CraftCatalog::from_parts(vec![accessory(1, 5000, Vec::new())], Vec::new());
    let summary = aggregate(&catalog, 1).unwrap();
    assert_eq!(summary.total_bp, 5000);
    assert!(summary.material_totals.is_empty());
    assert!(summary.accessory_totals.is_empty());
}

#[test]
fn uncraftable_components_accumulate_without_contributing_bp() {
    // The leaf carries a nonzero bp_cost, which must never be charged.
    let catalog = CraftCatalog::from_parts(
        vec![accessory(1, 1000, vec![aslot(2, 5)]), uncraftable(2, 999)],
        Vec::new(),
    );
    let summary = aggregate(&catalog, 1).unwrap();
    assert_eq!(summary.total_bp, 1000);
    assert!(summary.material_totals.is_empty());
    assert_eq!(summary.accessory_totals.get(&2), Some(&5));
}

#[test]
fn nested_recipes_multiply_quantities_and_sum_bp() {
    // root -> 2 x child, child -> 3 x material 7
    let catalog = CraftCatalog::from_parts(
        vec![
            accessory(1, 100, vec![aslot(2, 2)]),
            accessory(2, 30, vec![mslot(7, 3)]),
        ],
        vec![material(7)],
    );
    let summary = aggregate(&catalog, 1).unwrap();
    assert_eq!(summary.total_bp, 100 + 2 * 30);
    assert_eq!(summary.material_totals.get(&7), Some(&6));
    assert!(summary.accessory_totals.is_empty());
}

#[test]
fn multipliers_compound_down_a_three_level_chain() {
    // root -> 2 x mid, mid -> 3 x inner, inner -> 4 x material 9
    let catalog = CraftCatalog::from_parts(
        vec![
            accessory(1, 500, vec![aslot(2, 2)]),
            accessory(2, 200, vec![aslot(3, 3)]),
            accessory(3, 50, vec![mslot(9, 4)]),
        ],
        vec![material(9)],
    );
    let summary = aggregate(&catalog, 1).unwrap();
    assert_eq!(summary.total_bp, 500 + 2 * 200 + 6 * 50);
    assert_eq!(summary.material_totals.get(&9), Some(&24));
}

#[test]
fn repeated_leaves_sum_across_branches() {
    // Both branches bottom out on material 7.
    let catalog = CraftCatalog::from_parts(
        vec![
            accessory(1, 100, vec![mslot(7, 2), aslot(2, 1)]),
            accessory(2, 40, vec![mslot(7, 3)]),
        ],
        vec![material(7)],
    );
    let summary = aggregate(&catalog, 1).unwrap();
    assert_eq!(summary.material_totals.get(&7), Some(&5));
    assert_eq!(summary.total_bp, 140);
}

#[test]
fn craftable_child_with_empty_recipe_still_charges_its_bp() {
    let catalog = CraftCatalog::from_parts(
        vec![accessory(1, 100, vec![aslot(2, 4)]), accessory(2, 25, Vec::new())],
        Vec::new(),
    );
    let summary = aggregate(&catalog, 1).unwrap();
    assert_eq!(summary.total_bp, 100 + 4 * 25);
    assert!(summary.accessory_totals.is_empty());
}

#[test]
fn mixed_recipe_splits_leaves_by_kind() {
    let catalog = CraftCatalog::from_parts(
        vec![
            accessory(1, 100, vec![mslot(7, 1), aslot(2, 2), aslot(3, 3)]),
            uncraftable(2, 0),
            accessory(3, 10, vec![mslot(8, 2)]),
        ],
        vec![material(7), material(8)],
    );
    let summary = aggregate(&catalog, 1).unwrap();
    assert_eq!(summary.total_bp, 100 + 3 * 10);
    assert_eq!(summary.material_totals.get(&7), Some(&1));
    assert_eq!(summary.material_totals.get(&8), Some(&6));
    assert_eq!(summary.accessory_totals.get(&2), Some(&2));
}

#[test]
fn unknown_root_is_rejected() {
    let catalog = CraftCatalog::from_parts(Vec::new(), Vec::new());
    assert_eq!(
        aggregate(&catalog, 42).unwrap_err(),
        CraftError::UnknownAccessory(42)
    );
}

#[test]
fn unknown_material_reference_is_rejected() {
    let catalog = CraftCatalog::from_parts(vec![accessory(1, 100, vec![mslot(7, 1)])], Vec::new());
    assert_eq!(
        aggregate(&catalog, 1).unwrap_err(),
        CraftError::UnknownMaterial {
            material_id: 7,
            accessory_id: 1
        }
    );
}

#[test]
fn unknown_accessory_reference_is_rejected() {
    let catalog = CraftCatalog::from_parts(vec![accessory(1, 100, vec![aslot(2, 1)])], Vec::new());
    assert_eq!(
        aggregate(&catalog, 1).unwrap_err(),
        CraftError::UnknownAccessory(2)
    );
}

#[test]
fn slot_naming_both_kinds_is_malformed() {
    let slot = ComponentSlot {
        material_id: Some(7),
        accessory_id: Some(2),
        quantity: 1,
    };
    let catalog = CraftCatalog::from_parts(
        vec![accessory(1, 100, vec![mslot(7, 1), slot])],
        vec![material(7)],
    );
    assert_eq!(
        aggregate(&catalog, 1).unwrap_err(),
        CraftError::MalformedSlot {
            accessory_id: 1,
            slot: 1
        }
    );
}

#[test]
fn slot_naming_neither_kind_is_malformed() {
    let slot = ComponentSlot {
        material_id: None,
        accessory_id: None,
        quantity: 1,
    };
    let catalog = CraftCatalog::from_parts(vec![accessory(1, 100, vec![slot])], Vec::new());
    assert_eq!(
        aggregate(&catalog, 1).unwrap_err(),
        CraftError::MalformedSlot {
            accessory_id: 1,
            slot: 0
        }
    );
}

#[test]
fn two_node_cycle_is_reported_not_recursed() {
    let catalog = CraftCatalog::from_parts(
        vec![
            accessory(1, 100, vec![aslot(2, 1)]),
            accessory(2, 100, vec![aslot(1, 1)]),
        ],
        Vec::new(),
    );
    assert_eq!(
        aggregate(&catalog, 1).unwrap_err(),
        CraftError::CyclicRecipe {
            path: vec![1, 2],
            repeated: 1
        }
    );
}

#[test]
fn self_referential_recipe_is_reported() {
    let catalog = CraftCatalog::from_parts(vec![accessory(1, 100, vec![aslot(1, 1)])], Vec::new());
    assert_eq!(
        aggregate(&catalog, 1).unwrap_err(),
        CraftError::CyclicRecipe {
            path: vec![1],
            repeated: 1
        }
    );
}

#[test]
fn diamond_sharing_is_not_a_cycle() {
    // root -> a and b, both -> shared; shared is on two paths but never on
    // the same path twice.
    let catalog = CraftCatalog::from_parts(
        vec![
            accessory(1, 100, vec![aslot(2, 1), aslot(3, 1)]),
            accessory(2, 10, vec![aslot(4, 1)]),
            accessory(3, 20, vec![aslot(4, 2)]),
            accessory(4, 5, vec![mslot(7, 1)]),
        ],
        vec![material(7)],
    );
    let summary = aggregate(&catalog, 1).unwrap();
    assert_eq!(summary.total_bp, 100 + 10 + 20 + 3 * 5);
    assert_eq!(summary.material_totals.get(&7), Some(&3));
}

#[test]
fn direct_components_list_one_level_only() {
    let catalog = CraftCatalog::from_parts(
        vec![
            accessory(1, 100, vec![mslot(7, 5), aslot(2, 2), aslot(3, 1)]),
            accessory(2, 30, vec![mslot(7, 3)]),
            uncraftable(3, 0),
        ],
        vec![material(7)],
    );
    let lines = direct_components(&catalog, 1).unwrap();
    assert_eq!(lines.len(), 3);

    assert_eq!(lines[0].reference, ComponentRef::Material(7));
    assert_eq!(lines[0].name, "Material 7");
    assert_eq!(lines[0].quantity, 5);
    assert!(!lines[0].craftable);

    assert_eq!(lines[1].reference, ComponentRef::Accessory(2));
    assert_eq!(lines[1].quantity, 2);
    assert!(lines[1].craftable);

    assert_eq!(lines[2].reference, ComponentRef::Accessory(3));
    assert!(!lines[2].craftable);
}

#[test]
fn repeated_aggregation_of_the_same_root_is_stable() {
    let catalog = CraftCatalog::from_parts(
        vec![
            accessory(1, 100, vec![aslot(2, 2)]),
            accessory(2, 30, vec![mslot(7, 3)]),
        ],
        vec![material(7)],
    );
    let first = aggregate(&catalog, 1).unwrap();
    let second = aggregate(&catalog, 1).unwrap();
    assert_eq!(first, second);
    assert_eq!(second.material_totals.get(&7), Some(&6));
}
