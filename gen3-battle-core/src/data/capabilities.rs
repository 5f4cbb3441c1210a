//! Ability and item catalog.
//!
//! Both kinds share one record type. An entry is pure data: per hook point
//! it declares which primitive fires and with what parameters, and the
//! interpreter in `sim::capability` reads the declared keys at runtime.
//! Statuses, weathers and stats are referenced by their short ids so the
//! tables stay plain tables.

use phf::phf_map;

use crate::data::types::Type;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Fraction {
    pub numerator: u32,
    pub denominator: u32,
}

#[derive(Clone, Copy, Debug)]
pub struct WeatherSet {
    pub kind: &'static str,
    pub turns: u8,
}

#[derive(Clone, Copy, Debug)]
pub struct StatStageDrop {
    pub stat: &'static str,
    pub delta: i8,
    /// Suppressed while every opposing active hides behind a substitute.
    pub ignore_if_foes_behind_substitute: bool,
}

#[derive(Clone, Copy, Debug)]
pub struct OnStart {
    /// Announce the capability without any field effect.
    pub announce: bool,
    pub trap_all_foes: bool,
    /// Owner starts ready to act, loafing on alternate turns.
    pub init_loaf_cycle: bool,
}

#[derive(Clone, Copy, Debug)]
pub struct OnSwitchIn {
    pub weather: Option<WeatherSet>,
    pub foe_stat_drop: Option<StatStageDrop>,
}

#[derive(Clone, Copy, Debug)]
pub struct AccuracyScale {
    pub numerator: u32,
    pub denominator: u32,
    /// Only moves of these types are scaled.
    pub move_types: &'static [Type],
}

#[derive(Clone, Copy, Debug)]
pub struct OnBeforeMove {
    pub accuracy_scale: Option<AccuracyScale>,
    pub skip_when_loafing: bool,
}

#[derive(Clone, Copy, Debug)]
pub struct OnTryHit {
    /// Incoming move type this record reacts to.
    pub move_type: Type,
    /// Move ids exempted from the reaction.
    pub exclude_moves: &'static [&'static str],
    /// Volatile granted to the owner when the hit is absorbed.
    pub absorb_volatile: Option<&'static str>,
    /// Heal 1/n of max HP when the hit is absorbed.
    pub absorb_heal_frac: Option<u16>,
}

impl OnTryHit {
    /// With neither absorb effect declared, a matching hit simply fails.
    pub fn absorbs(&self) -> bool {
        self.absorb_volatile.is_some() || self.absorb_heal_frac.is_some()
    }
}

#[derive(Clone, Copy, Debug)]
pub struct OnFoeRedirect {
    pub move_type: Type,
}

#[derive(Clone, Copy, Debug)]
pub struct OnFoeTrap {
    pub trap_all_foes: bool,
}

#[derive(Clone, Copy, Debug)]
pub struct OnAfterDamage {
    /// Only react to moves that make contact.
    pub requires_contact: bool,
    pub chance: Option<Fraction>,
    pub add_volatile: Option<&'static str>,
    pub inflict_status: Option<&'static str>,
    /// Attacker loses 1/n of its own max HP.
    pub recoil_frac: Option<u16>,
}

#[derive(Clone, Copy, Debug)]
pub struct OnEndOfTurn {
    /// Restore 1/n of max HP.
    pub recover_frac: Option<u16>,
    /// Recovery fires only under one of these weather ids.
    pub weather_only: Option<&'static [&'static str]>,
    /// Recovery fires only at or below 1/n of max HP.
    pub hp_threshold_frac: Option<u16>,
    /// The capability is used up when it fires.
    pub consumes: bool,
    pub toggle_loaf_cycle: bool,
}

#[derive(Clone, Copy, Debug)]
pub struct PriorityBonus {
    pub chance: Fraction,
    /// Fractional so it breaks priority ties without jumping a full bracket.
    pub bonus: f64,
}

#[derive(Clone, Copy, Debug)]
pub struct DamageModifier {
    pub move_type: Type,
    pub numerator: u32,
    pub denominator: u32,
}

/// One catalog entry. Abilities and held items are the same shape; they
/// differ only in which table they live in and when the battle consults
/// them (ability before item at every shared hook point).
#[derive(Clone, Copy, Debug)]
pub struct CapabilityData {
    pub name: &'static str,
    pub on_start: Option<OnStart>,
    pub on_switch_in: Option<OnSwitchIn>,
    pub on_before_move: Option<OnBeforeMove>,
    pub on_try_hit: Option<OnTryHit>,
    pub on_foe_redirect: Option<OnFoeRedirect>,
    pub on_foe_trap: Option<OnFoeTrap>,
    pub on_after_damage: Option<OnAfterDamage>,
    pub on_end_of_turn: Option<OnEndOfTurn>,
    pub priority_bonus: Option<PriorityBonus>,
    pub damage_modifier: Option<DamageModifier>,
}

/// Every hook empty. Unknown names resolve to this record, and entries
/// below override just the hooks they declare.
pub const INERT: CapabilityData = CapabilityData {
    name: "",
    on_start: None,
    on_switch_in: None,
    on_before_move: None,
    on_try_hit: None,
    on_foe_redirect: None,
    on_foe_trap: None,
    on_after_damage: None,
    on_end_of_turn: None,
    priority_bonus: None,
    damage_modifier: None,
};

const GEN3_PHYSICAL_TYPES: &[Type] = &[
    Type::Normal,
    Type::Fighting,
    Type::Flying,
    Type::Ground,
    Type::Rock,
    Type::Bug,
    Type::Ghost,
    Type::Poison,
    Type::Steel,
];

pub static ABILITIES: phf::Map<&'static str, CapabilityData> = phf_map! {
    "intimidate" => CapabilityData {
        name: "Intimidate",
        on_switch_in: Some(OnSwitchIn {
            weather: None,
            foe_stat_drop: Some(StatStageDrop {
                stat: "atk",
                delta: -1,
                ignore_if_foes_behind_substitute: true,
            }),
        }),
        ..INERT
    },
    "drought" => CapabilityData {
        name: "Drought",
        on_switch_in: Some(OnSwitchIn {
            weather: Some(WeatherSet { kind: "sun", turns: 5 }),
            foe_stat_drop: None,
        }),
        ..INERT
    },
    "drizzle" => CapabilityData {
        name: "Drizzle",
        on_switch_in: Some(OnSwitchIn {
            weather: Some(WeatherSet { kind: "rain", turns: 5 }),
            foe_stat_drop: None,
        }),
        ..INERT
    },
    "levitate" => CapabilityData {
        name: "Levitate",
        on_try_hit: Some(OnTryHit {
            move_type: Type::Ground,
            exclude_moves: &[],
            absorb_volatile: None,
            absorb_heal_frac: None,
        }),
        ..INERT
    },
    "flashfire" => CapabilityData {
        name: "Flash Fire",
        on_try_hit: Some(OnTryHit {
            move_type: Type::Fire,
            exclude_moves: &[],
            absorb_volatile: Some("flashfire"),
            absorb_heal_frac: None,
        }),
        ..INERT
    },
    "voltabsorb" => CapabilityData {
        name: "Volt Absorb",
        on_try_hit: Some(OnTryHit {
            move_type: Type::Electric,
            exclude_moves: &[],
            absorb_volatile: None,
            absorb_heal_frac: Some(4),
        }),
        ..INERT
    },
    "lightningrod" => CapabilityData {
        name: "Lightning Rod",
        on_foe_redirect: Some(OnFoeRedirect { move_type: Type::Electric }),
        ..INERT
    },
    "static" => CapabilityData {
        name: "Static",
        on_after_damage: Some(OnAfterDamage {
            requires_contact: true,
            chance: Some(Fraction { numerator: 1, denominator: 3 }),
            add_volatile: None,
            inflict_status: Some("par"),
            recoil_frac: None,
        }),
        ..INERT
    },
    "poisonpoint" => CapabilityData {
        name: "Poison Point",
        on_after_damage: Some(OnAfterDamage {
            requires_contact: true,
            chance: Some(Fraction { numerator: 1, denominator: 3 }),
            add_volatile: None,
            inflict_status: Some("psn"),
            recoil_frac: None,
        }),
        ..INERT
    },
    "cutecharm" => CapabilityData {
        name: "Cute Charm",
        on_after_damage: Some(OnAfterDamage {
            requires_contact: true,
            chance: Some(Fraction { numerator: 1, denominator: 3 }),
            add_volatile: Some("attract"),
            inflict_status: None,
            recoil_frac: None,
        }),
        ..INERT
    },
    "roughskin" => CapabilityData {
        name: "Rough Skin",
        on_after_damage: Some(OnAfterDamage {
            requires_contact: true,
            chance: None,
            add_volatile: None,
            inflict_status: None,
            recoil_frac: Some(16),
        }),
        ..INERT
    },
    "raindish" => CapabilityData {
        name: "Rain Dish",
        on_end_of_turn: Some(OnEndOfTurn {
            recover_frac: Some(16),
            weather_only: Some(&["rain"]),
            hp_threshold_frac: None,
            consumes: false,
            toggle_loaf_cycle: false,
        }),
        ..INERT
    },
    "shadowtag" => CapabilityData {
        name: "Shadow Tag",
        on_start: Some(OnStart {
            announce: false,
            trap_all_foes: true,
            init_loaf_cycle: false,
        }),
        on_foe_trap: Some(OnFoeTrap { trap_all_foes: true }),
        ..INERT
    },
    "truant" => CapabilityData {
        name: "Truant",
        on_start: Some(OnStart {
            announce: false,
            trap_all_foes: false,
            init_loaf_cycle: true,
        }),
        on_before_move: Some(OnBeforeMove {
            accuracy_scale: None,
            skip_when_loafing: true,
        }),
        on_end_of_turn: Some(OnEndOfTurn {
            recover_frac: None,
            weather_only: None,
            hp_threshold_frac: None,
            consumes: false,
            toggle_loaf_cycle: true,
        }),
        ..INERT
    },
    "hustle" => CapabilityData {
        name: "Hustle",
        on_before_move: Some(OnBeforeMove {
            accuracy_scale: Some(AccuracyScale {
                numerator: 4,
                denominator: 5,
                move_types: GEN3_PHYSICAL_TYPES,
            }),
            skip_when_loafing: false,
        }),
        ..INERT
    },
    "pressure" => CapabilityData {
        name: "Pressure",
        on_start: Some(OnStart {
            announce: true,
            trap_all_foes: false,
            init_loaf_cycle: false,
        }),
        ..INERT
    },
    // Consulted by name in the damage formula, no hooks of its own.
    "guts" => CapabilityData { name: "Guts", ..INERT },
};

pub static ITEMS: phf::Map<&'static str, CapabilityData> = phf_map! {
    "leftovers" => CapabilityData {
        name: "Leftovers",
        on_end_of_turn: Some(OnEndOfTurn {
            recover_frac: Some(16),
            weather_only: None,
            hp_threshold_frac: None,
            consumes: false,
            toggle_loaf_cycle: false,
        }),
        ..INERT
    },
    "sitrusberry" => CapabilityData {
        name: "Sitrus Berry",
        on_end_of_turn: Some(OnEndOfTurn {
            recover_frac: Some(4),
            weather_only: None,
            hp_threshold_frac: Some(2),
            consumes: true,
            toggle_loaf_cycle: false,
        }),
        ..INERT
    },
    "quickclaw" => CapabilityData {
        name: "Quick Claw",
        priority_bonus: Some(PriorityBonus {
            chance: Fraction { numerator: 1, denominator: 5 },
            bonus: 0.1,
        }),
        ..INERT
    },
    "charcoal" => CapabilityData {
        name: "Charcoal",
        damage_modifier: Some(DamageModifier {
            move_type: Type::Fire,
            numerator: 11,
            denominator: 10,
        }),
        ..INERT
    },
    "mysticwater" => CapabilityData {
        name: "Mystic Water",
        damage_modifier: Some(DamageModifier {
            move_type: Type::Water,
            numerator: 11,
            denominator: 10,
        }),
        ..INERT
    },
    "magnet" => CapabilityData {
        name: "Magnet",
        damage_modifier: Some(DamageModifier {
            move_type: Type::Electric,
            numerator: 11,
            denominator: 10,
        }),
        ..INERT
    },
    "miracleseed" => CapabilityData {
        name: "Miracle Seed",
        damage_modifier: Some(DamageModifier {
            move_type: Type::Grass,
            numerator: 11,
            denominator: 10,
        }),
        ..INERT
    },
    "silkscarf" => CapabilityData {
        name: "Silk Scarf",
        damage_modifier: Some(DamageModifier {
            move_type: Type::Normal,
            numerator: 11,
            denominator: 10,
        }),
        ..INERT
    },
    "spelltag" => CapabilityData {
        name: "Spell Tag",
        damage_modifier: Some(DamageModifier {
            move_type: Type::Ghost,
            numerator: 11,
            denominator: 10,
        }),
        ..INERT
    },
};
