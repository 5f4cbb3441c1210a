use crate::data::moves::MoveCategory;
use crate::data::types::{effectiveness, effectiveness_dual, Type};
use crate::data::{normalize_id, Dex};

#[test]
fn normalize_id_strips_case_and_punctuation() {
    assert_eq!(normalize_id("Quick Attack"), "quickattack");
    assert_eq!(normalize_id("double-edge"), "doubleedge");
    assert_eq!(normalize_id("Sitrus Berry"), "sitrusberry");
}

#[test]
fn species_lookup_finds_known_entries() {
    let dex = Dex::gen3();
    let charizard = dex.species("Charizard").expect("species exists");
    assert_eq!(charizard.base_stats.hp, 78);
    assert_eq!(charizard.base_stats.spa, 109);
    assert_eq!(charizard.types, ["Fire", "Flying"]);

    let snorlax = dex.species("snorlax").expect("species exists");
    assert_eq!(snorlax.base_stats.hp, 160);
    assert_eq!(snorlax.types, ["Normal"]);

    assert!(dex.species("missingno").is_none());
}

#[test]
fn move_lookup_carries_gen3_values() {
    let dex = Dex::gen3();

    let thunderbolt = dex.move_data("Thunderbolt").expect("move exists");
    assert_eq!(thunderbolt.power, 95);
    assert_eq!(thunderbolt.category, MoveCategory::Special);
    assert!(!thunderbolt.flags.contact);

    let quick_attack = dex.move_data("Quick Attack").expect("move exists");
    assert_eq!(quick_attack.priority, 1);
    assert_eq!(quick_attack.category, MoveCategory::Physical);

    // Typed damage categories: Shadow Ball is physical here, Crunch special.
    assert_eq!(
        dex.move_data("shadowball").unwrap().category,
        MoveCategory::Physical
    );
    assert_eq!(
        dex.move_data("crunch").unwrap().category,
        MoveCategory::Special
    );

    let aerial_ace = dex.move_data("aerialace").expect("move exists");
    assert_eq!(aerial_ace.accuracy, None);
}

#[test]
fn chart_matches_ruby_sapphire() {
    assert_eq!(effectiveness(Type::Normal, Type::Ghost), 0.0);
    assert_eq!(effectiveness(Type::Electric, Type::Ground), 0.0);
    assert_eq!(effectiveness(Type::Psychic, Type::Dark), 0.0);
    assert_eq!(effectiveness(Type::Ghost, Type::Steel), 1.0);
    assert_eq!(effectiveness(Type::Dark, Type::Steel), 0.5);
    assert_eq!(effectiveness(Type::Ice, Type::Dragon), 2.0);
}

#[test]
fn dual_typing_multiplies_and_monotypes_count_once() {
    // Ice into Dragon/Flying stacks to a quad hit.
    assert_eq!(
        effectiveness_dual(Type::Ice, [Type::Dragon, Type::Flying]),
        4.0
    );
    // Ground into Ghost/Poison: the Ghost half is neutral, Poison doubles.
    assert_eq!(
        effectiveness_dual(Type::Ground, [Type::Ghost, Type::Poison]),
        2.0
    );
    // A monotype stored twice still only counts once.
    assert_eq!(
        effectiveness_dual(Type::Fire, [Type::Grass, Type::Grass]),
        2.0
    );
}

#[test]
fn capability_entries_declare_expected_hooks() {
    let dex = Dex::gen3();

    let intimidate = dex.ability("Intimidate").expect("ability exists");
    let drop = intimidate
        .on_switch_in
        .and_then(|r| r.foe_stat_drop)
        .expect("declares a stat drop");
    assert_eq!(drop.stat, "atk");
    assert_eq!(drop.delta, -1);

    let stat = dex.ability("static").expect("ability exists");
    let contact = stat.on_after_damage.expect("declares a contact response");
    assert_eq!(contact.inflict_status, Some("par"));
    assert_eq!(contact.chance.unwrap().denominator, 3);

    let leftovers = dex.item("Leftovers").expect("item exists");
    assert_eq!(
        leftovers.on_end_of_turn.unwrap().recover_frac,
        Some(16)
    );

    let quick_claw = dex.item("quickclaw").expect("item exists");
    assert!(quick_claw.priority_bonus.unwrap().bonus < 1.0);

    assert!(dex.ability("wonderguard").is_none());
}
