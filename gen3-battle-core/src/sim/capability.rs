//! Runtime side of abilities and items.
//!
//! A [`Capability`] is a display name plus a borrowed catalog record.
//! There is no per-ability code: every hook below reads whichever
//! primitives the record declares and applies them. Abilities and items
//! run through the same functions; the battle controls the order in
//! which the two slots are consulted.

use rand::rngs::SmallRng;
use rand::Rng;

use crate::battle_logger::BattleLogger;
use crate::data::capabilities::{CapabilityData, Fraction, INERT};
use crate::data::moves::MoveData;
use crate::data::types::Type;
use crate::data::Dex;
use crate::sim::battle::Weather;
use crate::sim::pokemon::{Pokemon, Status};
use crate::sim::stats::stage_index;

#[derive(Clone, Debug)]
pub struct Capability {
    pub name: String,
    pub data: &'static CapabilityData,
}

impl Capability {
    /// Resolves an ability name. Unknown names keep their label but carry
    /// the inert record, so a catalog gap never aborts a battle.
    pub fn ability(dex: &Dex, name: Option<&str>) -> Capability {
        Self::resolve(name, |n| dex.ability(n))
    }

    pub fn item(dex: &Dex, name: Option<&str>) -> Capability {
        Self::resolve(name, |n| dex.item(n))
    }

    pub fn none() -> Capability {
        Capability {
            name: String::new(),
            data: &INERT,
        }
    }

    fn resolve(
        name: Option<&str>,
        lookup: impl Fn(&str) -> Option<&'static CapabilityData>,
    ) -> Capability {
        match name {
            Some(given) => match lookup(given) {
                Some(data) => Capability {
                    name: data.name.to_string(),
                    data,
                },
                None => Capability {
                    name: given.to_string(),
                    data: &INERT,
                },
            },
            None => Capability::none(),
        }
    }
}

/// Which of the owner's two capability slots a hook invocation reads.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Slot {
    Ability,
    Item,
}

/// What a defender's `on_try_hit` reaction did with the incoming move.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum TryHitOutcome {
    /// No reaction, the move resolves normally.
    Continue,
    /// The move fails outright (type immunity).
    Fail,
    /// The move is soaked up, possibly healing or empowering the owner.
    Absorb,
}

/// Mutable view a hook gets of the battle: the capability owner, the
/// opposing active, the shared field state, the log and the dice.
pub struct HookContext<'a> {
    pub owner: &'a mut Pokemon,
    pub owner_ident: &'a str,
    pub foe: &'a mut Pokemon,
    pub foe_ident: &'a str,
    pub weather: &'a mut Option<Weather>,
    pub weather_turns: &'a mut u8,
    pub log: &'a mut BattleLogger,
    pub rng: &'a mut SmallRng,
}

fn slot_data(slot: Slot, owner: &Pokemon) -> &'static CapabilityData {
    match slot {
        Slot::Ability => owner.ability.data,
        Slot::Item => owner.item.data,
    }
}

fn slot_name(slot: Slot, owner: &Pokemon) -> String {
    match slot {
        Slot::Ability => owner.ability.name.clone(),
        Slot::Item => owner.item.name.clone(),
    }
}

fn slot_label(slot: Slot, name: &str) -> String {
    match slot {
        Slot::Ability => format!("ability: {}", name),
        Slot::Item => format!("item: {}", name),
    }
}

/// `numerator`-in-`denominator` dice roll.
pub fn roll_chance(rng: &mut SmallRng, fraction: Fraction) -> bool {
    rng.gen_range(0..fraction.denominator) < fraction.numerator
}

/// Battle-start announcements and field claims.
pub fn fire_on_start(slot: Slot, ctx: &mut HookContext<'_>) {
    let data = slot_data(slot, ctx.owner);
    let Some(record) = data.on_start else { return };
    let name = slot_name(slot, ctx.owner);

    if record.announce {
        ctx.log.log_ability(ctx.owner_ident, &name);
    }
    if record.trap_all_foes {
        ctx.foe.trapped = true;
        ctx.log.log_activate(ctx.foe_ident, "trapped");
    }
    if record.init_loaf_cycle {
        ctx.owner.loafing = false;
    }
}

/// Entry effects: weather claims and stat drops aimed at the opposition.
pub fn fire_on_switch_in(slot: Slot, ctx: &mut HookContext<'_>) {
    let data = slot_data(slot, ctx.owner);
    let Some(record) = data.on_switch_in else { return };
    let name = slot_name(slot, ctx.owner);

    if let Some(weather_set) = record.weather {
        if let Some(weather) = Weather::from_id(weather_set.kind) {
            *ctx.weather = Some(weather);
            *ctx.weather_turns = weather_set.turns;
            ctx.log
                .log_weather_start(weather.log_name(), &slot_label(slot, &name), ctx.owner_ident);
        }
    }

    if let Some(drop) = record.foe_stat_drop {
        let shielded =
            drop.ignore_if_foes_behind_substitute && ctx.foe.has_volatile("substitute");
        if !shielded {
            if let Some(index) = stage_index(drop.stat) {
                ctx.foe.change_stage(index, drop.delta);
                ctx.log.log_ability(ctx.owner_ident, &name);
                ctx.log
                    .log_unboost(ctx.foe_ident, drop.stat, drop.delta.unsigned_abs());
            }
        }
    }
}

/// Pre-action gate. Returns `false` when the owner loafs the turn away.
pub fn fire_on_before_move(slot: Slot, ctx: &mut HookContext<'_>) -> bool {
    let data = slot_data(slot, ctx.owner);
    let Some(record) = data.on_before_move else { return true };

    if record.skip_when_loafing && ctx.owner.loafing {
        let name = slot_name(slot, ctx.owner);
        ctx.log
            .log_cant(ctx.owner_ident, &slot_label(slot, &name));
        return false;
    }
    true
}

/// Accuracy scaling declared by either of a combatant's capabilities,
/// folded into one rational factor. Applied transiently at hit time, the
/// catalog accuracy is never touched.
pub fn accuracy_scale(attacker: &Pokemon, move_type: Type) -> (u32, u32) {
    let mut numerator = 1;
    let mut denominator = 1;
    for data in [attacker.ability.data, attacker.item.data] {
        let Some(record) = data.on_before_move else { continue };
        let Some(scale) = record.accuracy_scale else { continue };
        if scale.move_types.contains(&move_type) {
            numerator *= scale.numerator;
            denominator *= scale.denominator;
        }
    }
    (numerator, denominator)
}

/// Defender-side reaction to an incoming move. The owner of the consulted
/// capability is the defender.
pub fn fire_on_try_hit(slot: Slot, move_data: &MoveData, ctx: &mut HookContext<'_>) -> TryHitOutcome {
    let data = slot_data(slot, ctx.owner);
    let Some(record) = data.on_try_hit else {
        return TryHitOutcome::Continue;
    };
    if record.move_type != move_data.move_type {
        return TryHitOutcome::Continue;
    }
    let move_id = crate::data::normalize_id(move_data.name);
    if record.exclude_moves.contains(&move_id.as_str()) {
        return TryHitOutcome::Continue;
    }

    let name = slot_name(slot, ctx.owner);
    if !record.absorbs() {
        ctx.log
            .log_immune(ctx.owner_ident, &slot_label(slot, &name));
        return TryHitOutcome::Fail;
    }

    if let Some(volatile) = record.absorb_volatile {
        ctx.owner
            .add_volatile(volatile, Some(&ctx.foe.species), None);
        ctx.log
            .log_start(ctx.owner_ident, &slot_label(slot, &name));
    }
    if let Some(frac) = record.absorb_heal_frac {
        let amount = ctx.owner.max_hp() / frac;
        ctx.owner.heal(amount);
        let (hp, max) = (ctx.owner.current_hp, ctx.owner.max_hp());
        ctx.log
            .log_heal_from(ctx.owner_ident, hp, max, &slot_label(slot, &name));
    }
    TryHitOutcome::Absorb
}

/// Ability-only target override. Returns the side index the move finally
/// lands on; with one combatant per side the defender can only pull the
/// move onto itself.
pub fn redirect_target(defender_side: usize, defender: &Pokemon, move_data: &MoveData) -> usize {
    if let Some(record) = defender.ability.data.on_foe_redirect {
        if record.move_type == move_data.move_type {
            return defender_side;
        }
    }
    defender_side
}

/// Marks a freshly switched-in foe as unable to leave.
pub fn fire_on_foe_trap(slot: Slot, ctx: &mut HookContext<'_>) {
    let data = slot_data(slot, ctx.owner);
    let Some(record) = data.on_foe_trap else { return };
    if record.trap_all_foes && !ctx.foe.trapped {
        ctx.foe.trapped = true;
        ctx.log.log_activate(ctx.foe_ident, "trapped");
    }
}

/// Post-hit reactions. Fires only for records owned by the combatant the
/// move just damaged; the attacker is `ctx.foe` from that point of view.
pub fn fire_on_after_damage(
    slot: Slot,
    move_data: &MoveData,
    damage_dealt: u32,
    owner_was_target: bool,
    ctx: &mut HookContext<'_>,
) {
    let data = slot_data(slot, ctx.owner);
    let Some(record) = data.on_after_damage else { return };
    if !owner_was_target || damage_dealt == 0 {
        return;
    }
    if record.requires_contact && !move_data.flags.contact {
        return;
    }
    let name = slot_name(slot, ctx.owner);

    if let Some(fraction) = record.chance {
        if roll_chance(ctx.rng, fraction) {
            if let Some(volatile) = record.add_volatile {
                ctx.foe
                    .add_volatile(volatile, Some(&ctx.owner.species), None);
                ctx.log.log_start(ctx.foe_ident, volatile);
            }
            if let Some(status_id) = record.inflict_status {
                if let Some(status) = Status::from_id(status_id) {
                    if ctx.foe.try_set_status(status) {
                        ctx.log.log_status(ctx.foe_ident, status.id());
                    }
                }
            }
        }
    }

    if let Some(frac) = record.recoil_frac {
        if record.inflict_status.is_none() {
            let amount = ctx.foe.max_hp() / frac;
            ctx.foe.take_damage(amount);
            let (hp, max) = (ctx.foe.current_hp, ctx.foe.max_hp());
            ctx.log
                .log_damage_from(ctx.foe_ident, hp, max, &slot_label(slot, &name));
            if ctx.foe.is_fainted() {
                ctx.log.log_faint(ctx.foe_ident);
            }
        }
    }
}

/// End-of-turn upkeep: conditional recovery and the loaf toggle.
pub fn fire_on_end_of_turn(slot: Slot, ctx: &mut HookContext<'_>) {
    let data = slot_data(slot, ctx.owner);
    let Some(record) = data.on_end_of_turn else { return };
    if ctx.owner.is_fainted() {
        return;
    }

    if let Some(frac) = record.recover_frac {
        let weather_ok = match record.weather_only {
            None => true,
            Some(kinds) => ctx
                .weather
                .map(|w| kinds.contains(&w.id()))
                .unwrap_or(false),
        };
        let threshold_ok = match record.hp_threshold_frac {
            None => true,
            Some(threshold) => ctx.owner.current_hp <= ctx.owner.max_hp() / threshold,
        };
        if weather_ok && threshold_ok && ctx.owner.current_hp < ctx.owner.max_hp() {
            let name = slot_name(slot, ctx.owner);
            let amount = ctx.owner.max_hp() / frac;
            ctx.owner.heal(amount);
            let (hp, max) = (ctx.owner.current_hp, ctx.owner.max_hp());
            ctx.log
                .log_heal_from(ctx.owner_ident, hp, max, &slot_label(slot, &name));
            if record.consumes {
                ctx.log.log_end_item(ctx.owner_ident, &name);
                ctx.owner.consume_item();
            }
        }
    }

    if record.toggle_loaf_cycle {
        ctx.owner.loafing = !ctx.owner.loafing;
    }
}

/// A held item's chance at a fractional priority bump this turn. Both
/// slots are consulted so the sum stays well defined if an ability ever
/// declares one.
pub fn priority_bonus(owner: &Pokemon, rng: &mut SmallRng) -> f64 {
    let mut total = 0.0;
    for data in [owner.ability.data, owner.item.data] {
        let Some(record) = data.priority_bonus else { continue };
        if roll_chance(rng, record.chance) {
            total += record.bonus;
        }
    }
    total
}

/// Type-boost items scale their holder's own attacks; the hook is still
/// consulted for both ends of the hit.
pub fn item_damage_modifier(
    owner: &Pokemon,
    owner_is_attacker: bool,
    move_type: Type,
    damage: u32,
) -> u32 {
    let Some(modifier) = owner.item.data.damage_modifier else {
        return damage;
    };
    if !owner_is_attacker || modifier.move_type != move_type {
        return damage;
    }
    damage * modifier.numerator / modifier.denominator
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn dex_mon(species: &str, ability: Option<&str>, item: Option<&str>) -> Pokemon {
        let dex = Dex::gen3();
        Pokemon::new(&dex, species, 100, [31; 6], [0; 6], &[], ability, item)
            .expect("species exists")
    }

    #[test]
    fn unknown_names_resolve_to_inert_records() {
        let dex = Dex::gen3();
        let capability = Capability::ability(&dex, Some("Wonder Guard"));
        assert_eq!(capability.name, "Wonder Guard");
        assert!(capability.data.on_try_hit.is_none());

        let none = Capability::item(&dex, None);
        assert!(none.name.is_empty());
    }

    #[test]
    fn resolution_normalizes_and_restores_display_names() {
        let dex = Dex::gen3();
        let capability = Capability::ability(&dex, Some("flash fire"));
        assert_eq!(capability.name, "Flash Fire");
        assert!(capability.data.on_try_hit.is_some());
    }

    #[test]
    fn accuracy_scale_only_covers_listed_types() {
        let hustler = dex_mon("slaking", Some("Hustle"), None);
        assert_eq!(accuracy_scale(&hustler, Type::Normal), (4, 5));
        // Fire is special in this generation, so it goes unscaled.
        assert_eq!(accuracy_scale(&hustler, Type::Fire), (1, 1));

        let plain = dex_mon("slaking", None, None);
        assert_eq!(accuracy_scale(&plain, Type::Normal), (1, 1));
    }

    #[test]
    fn redirect_claims_only_matching_types() {
        let dex = Dex::gen3();
        let rod = dex_mon("manectric", Some("Lightning Rod"), None);
        let thunderbolt = dex.move_data("Thunderbolt").unwrap();
        let surf = dex.move_data("Surf").unwrap();
        assert_eq!(redirect_target(1, &rod, thunderbolt), 1);
        assert_eq!(redirect_target(1, &rod, surf), 1);
    }

    #[test]
    fn item_modifier_boosts_matching_attacks_only() {
        let holder = dex_mon("charizard", None, Some("Charcoal"));
        assert_eq!(item_damage_modifier(&holder, true, Type::Fire, 100), 110);
        assert_eq!(item_damage_modifier(&holder, true, Type::Water, 100), 100);
        // The defender's copy of the same item does nothing.
        assert_eq!(item_damage_modifier(&holder, false, Type::Fire, 100), 100);
    }

    #[test]
    fn chance_rolls_hit_at_observed_rates() {
        let mut rng = SmallRng::seed_from_u64(99);
        let fraction = Fraction {
            numerator: 1,
            denominator: 3,
        };
        let hits = (0..3000)
            .filter(|_| roll_chance(&mut rng, fraction))
            .count();
        assert!(hits > 800 && hits < 1200, "got {} hits", hits);
    }

    #[test]
    fn priority_bonus_is_fractional_and_chance_gated() {
        let holder = dex_mon("snorlax", None, Some("Quick Claw"));
        let mut rng = SmallRng::seed_from_u64(7);
        let mut fired = 0;
        for _ in 0..2000 {
            let bonus = priority_bonus(&holder, &mut rng);
            assert!(bonus == 0.0 || bonus == 0.1);
            if bonus > 0.0 {
                fired += 1;
            }
        }
        assert!(fired > 250 && fired < 550, "got {} activations", fired);
    }
}
