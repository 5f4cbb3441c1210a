//! The Gen 3 damage formula, split into the level/stat core and the
//! modifier chain that produces the roll window.

use crate::data::moves::{MoveCategory, MoveData};
use crate::data::types::{effectiveness_dual, Type};
use crate::sim::battle::Weather;
use crate::sim::pokemon::{Pokemon, Status};

/// Critical hits are a flat doubling here; there is no crit roll in the
/// turn machine, callers opt in explicitly.
pub const CRIT_MULTIPLIER: f64 = 2.0;

/// `floor(floor(floor(2L/5 + 2) * P * A / D) / 50)` with stage-modified
/// attack and defense already folded into `attack`/`defense`.
pub fn initial_damage(level: u8, power: u16, attack: u16, defense: u16) -> u32 {
    let scale = 2 * level as u32 / 5 + 2;
    scale * power as u32 * attack as u32 / defense.max(1) as u32 / 50
}

/// Applies burn, the flat `+2`, the multiplier chain and the 217..=255
/// roll window. Returns the inclusive `(min, max)` damage bounds; both
/// are zero exactly when the defender is immune.
pub fn damage_range(
    initial: u32,
    attacker: &Pokemon,
    defender: &Pokemon,
    move_data: &MoveData,
    is_crit: bool,
    weather: Option<Weather>,
) -> (u32, u32) {
    let type_effectiveness = effectiveness_dual(move_data.move_type, defender.types);
    if type_effectiveness == 0.0 {
        return (0, 0);
    }

    let mut damage = initial;
    if matches!(attacker.status, Some(Status::Burn))
        && move_data.category == MoveCategory::Physical
        && !attacker.has_ability("Guts")
    {
        damage /= 2;
    }
    damage = damage.max(1) + 2;

    let mut modifier = 1.0f64;
    match (weather, move_data.move_type) {
        (Some(Weather::Sun), Type::Fire) | (Some(Weather::Rain), Type::Water) => modifier *= 1.5,
        (Some(Weather::Sun), Type::Water) | (Some(Weather::Rain), Type::Fire) => modifier *= 0.5,
        _ => {}
    }
    if is_crit {
        modifier *= CRIT_MULTIPLIER;
    }
    if attacker.has_type(move_data.move_type) {
        modifier *= 1.5;
    }
    modifier *= type_effectiveness as f64;

    let base = (damage as f64 * modifier).floor() as u64;
    let min = (base * 217 / 255).max(1) as u32;
    let max = base.max(1) as u32;
    (min, max)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::types::Type;
    use crate::data::Dex;

    fn mon(species: &str) -> Pokemon {
        let dex = Dex::gen3();
        Pokemon::new(&dex, species, 100, [31; 6], [0; 6], &[], None, None)
            .expect("species exists")
    }

    fn mon_with_ability(species: &str, ability: &str) -> Pokemon {
        let dex = Dex::gen3();
        Pokemon::new(&dex, species, 100, [31; 6], [0; 6], &[], Some(ability), None)
            .expect("species exists")
    }

    fn move_data(name: &str) -> &'static MoveData {
        Dex::gen3().move_data(name).expect("move exists")
    }

    #[test]
    fn initial_damage_reference_point() {
        assert_eq!(initial_damage(100, 80, 100, 100), 67);
        assert_eq!(initial_damage(50, 60, 120, 80), 39);
    }

    #[test]
    fn zero_defense_does_not_divide_by_zero() {
        assert!(initial_damage(100, 80, 100, 0) > 0);
    }

    #[test]
    fn immunity_short_circuits_to_zero() {
        let attacker = mon("pikachu");
        let defender = mon("flygon");
        let (min, max) = damage_range(67, &attacker, &defender, move_data("Thunderbolt"), false, None);
        assert_eq!((min, max), (0, 0));
    }

    #[test]
    fn neutral_hit_rolls_between_217_and_255() {
        let attacker = mon("snorlax");
        let defender = mon("machamp");
        // Snorlax is Normal, Earthquake is not: no STAB, neutral hit.
        let (min, max) = damage_range(100, &attacker, &defender, move_data("Earthquake"), false, None);
        assert_eq!(max, 102);
        assert_eq!(min, 102 * 217 / 255);
    }

    #[test]
    fn tiny_base_damage_still_deals_one() {
        let attacker = mon("pikachu");
        let defender = mon("snorlax");
        // initial 0 is lifted to 1, +2 = 3; the low roll floors to 2.
        let (min, max) = damage_range(0, &attacker, &defender, move_data("Earthquake"), false, None);
        assert_eq!((min, max), (2, 3));
    }

    #[test]
    fn burn_halves_physical_before_the_add() {
        let healthy = mon("machamp");
        let mut burned = mon("machamp");
        burned.set_status(Status::Burn).unwrap();
        let defender = mon("snorlax");

        let (_, healthy_max) =
            damage_range(100, &healthy, &defender, move_data("Earthquake"), false, None);
        let (_, burned_max) =
            damage_range(100, &burned, &defender, move_data("Earthquake"), false, None);
        assert_eq!(healthy_max, 102);
        assert_eq!(burned_max, 52);
    }

    #[test]
    fn guts_ignores_the_burn_penalty() {
        let mut attacker = mon_with_ability("machamp", "Guts");
        attacker.set_status(Status::Burn).unwrap();
        let defender = mon("snorlax");
        let (_, max) = damage_range(100, &attacker, &defender, move_data("Earthquake"), false, None);
        assert_eq!(max, 102);
    }

    #[test]
    fn burn_leaves_special_moves_alone() {
        let mut attacker = mon("alakazam");
        attacker.set_status(Status::Burn).unwrap();
        let defender = mon("machamp");
        let (_, max) = damage_range(100, &attacker, &defender, move_data("Psychic"), false, None);
        // STAB 1.5 and a 2x matchup on the post-+2 base.
        assert_eq!(max, 306);
    }

    #[test]
    fn stab_weather_and_effectiveness_chain_multiplies() {
        let attacker = mon("charizard");
        let defender = mon("sceptile");
        let flamethrower = move_data("Flamethrower");

        // STAB 1.5 x super effective 2.0 on base 102.
        let (_, clear_max) = damage_range(100, &attacker, &defender, flamethrower, false, None);
        assert_eq!(clear_max, 306);

        // Sun adds another 1.5.
        let (_, sun_max) =
            damage_range(100, &attacker, &defender, flamethrower, false, Some(Weather::Sun));
        assert_eq!(sun_max, 459);

        // Rain halves Fire instead.
        let (_, rain_max) =
            damage_range(100, &attacker, &defender, flamethrower, false, Some(Weather::Rain));
        assert_eq!(rain_max, 153);
    }

    #[test]
    fn crit_flag_doubles_the_chain() {
        let attacker = mon("snorlax");
        let defender = mon("machamp");
        let (_, plain) = damage_range(100, &attacker, &defender, move_data("Earthquake"), false, None);
        let (_, crit) = damage_range(100, &attacker, &defender, move_data("Earthquake"), true, None);
        assert_eq!(crit, plain * 2);
    }

    #[test]
    fn dual_type_immunity_wins_over_the_other_half() {
        let attacker = mon("machamp");
        let defender = mon("gengar");
        // Fighting into Ghost/Poison: the Ghost half zeroes everything.
        assert_eq!(effectiveness_dual(Type::Fighting, defender.types), 0.0);
        let (min, max) =
            damage_range(150, &attacker, &defender, move_data("Cross Chop"), false, None);
        assert_eq!((min, max), (0, 0));
    }
}
