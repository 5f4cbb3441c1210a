//! Gen 3 stat derivation and stage arithmetic.

use crate::data::species::BaseStats;

pub const STAGE_ATK: usize = 0;
pub const STAGE_DEF: usize = 1;
pub const STAGE_SPA: usize = 2;
pub const STAGE_SPD: usize = 3;
pub const STAGE_SPE: usize = 4;

pub const STAGE_MIN: i8 = -6;
pub const STAGE_MAX: i8 = 6;

/// Maps the short stat ids used by the capability catalog onto stage
/// array slots.
pub fn stage_index(stat: &str) -> Option<usize> {
    Some(match stat {
        "atk" => STAGE_ATK,
        "def" => STAGE_DEF,
        "spa" => STAGE_SPA,
        "spd" => STAGE_SPD,
        "spe" => STAGE_SPE,
        _ => return None,
    })
}

/// HP at a given level: `(2*base + iv + ev/4) * level / 100 + level + 10`.
pub fn calc_hp(base: u16, iv: u8, ev: u8, level: u8) -> u16 {
    (2 * base + iv as u16 + ev as u16 / 4) * level as u16 / 100 + level as u16 + 10
}

/// Any other stat: same core term, `+ 5` instead of the level bonus.
/// Natures are not modeled, so there is no trailing multiplier.
pub fn calc_stat(base: u16, iv: u8, ev: u8, level: u8) -> u16 {
    (2 * base + iv as u16 + ev as u16 / 4) * level as u16 / 100 + 5
}

/// `(2+s)/2` for boosts, `2/(2-s)` for drops.
pub fn stage_multiplier(stage: i8) -> f32 {
    if stage >= 0 {
        (2 + stage) as f32 / 2.0
    } else {
        2.0 / (2 - stage) as f32
    }
}

/// Accuracy and evasion use thirds: `(3+s)/3` and `3/(3-s)`.
pub fn accuracy_multiplier(stage: i8) -> f32 {
    if stage >= 0 {
        (3 + stage) as f32 / 3.0
    } else {
        3.0 / (3 - stage) as f32
    }
}

/// Stat after its stage, truncated like the original tables.
pub fn apply_stage_multiplier(value: u16, stage: i8) -> u16 {
    (value as f32 * stage_multiplier(stage)).floor() as u16
}

/// Full derived spread for one combatant.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct StatsSet {
    pub hp: u16,
    pub atk: u16,
    pub def: u16,
    pub spa: u16,
    pub spd: u16,
    pub spe: u16,
}

impl StatsSet {
    /// IVs and EVs are ordered hp/atk/def/spa/spd/spe.
    pub fn from_base(base: &BaseStats, ivs: [u8; 6], evs: [u8; 6], level: u8) -> StatsSet {
        StatsSet {
            hp: calc_hp(base.hp, ivs[0], evs[0], level),
            atk: calc_stat(base.atk, ivs[1], evs[1], level),
            def: calc_stat(base.def, ivs[2], evs[2], level),
            spa: calc_stat(base.spa, ivs[3], evs[3], level),
            spd: calc_stat(base.spd, ivs[4], evs[4], level),
            spe: calc_stat(base.spe, ivs[5], evs[5], level),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_100_charizard_spread() {
        let base = BaseStats {
            hp: 78,
            atk: 84,
            def: 78,
            spa: 109,
            spd: 85,
            spe: 100,
        };
        let stats = StatsSet::from_base(&base, [31; 6], [0; 6], 100);
        assert_eq!(stats.hp, 297);
        assert_eq!(stats.atk, 204);
        assert_eq!(stats.spa, 254);
        assert_eq!(stats.spe, 236);
    }

    #[test]
    fn ev_quarters_round_down() {
        // 252 EVs add 63 points at level 100.
        assert_eq!(calc_stat(100, 31, 252, 100), 299);
        assert_eq!(calc_stat(100, 31, 255, 100), 299);
    }

    #[test]
    fn stage_multipliers_cover_the_whole_range() {
        assert_eq!(stage_multiplier(0), 1.0);
        assert_eq!(stage_multiplier(2), 2.0);
        assert_eq!(stage_multiplier(6), 4.0);
        assert_eq!(stage_multiplier(-2), 0.5);
        assert_eq!(stage_multiplier(-6), 0.25);

        assert_eq!(accuracy_multiplier(0), 1.0);
        assert_eq!(accuracy_multiplier(6), 3.0);
        assert_eq!(accuracy_multiplier(-3), 0.5);
        assert_eq!(accuracy_multiplier(-6), 1.0 / 3.0);
    }

    #[test]
    fn applying_stages_truncates() {
        assert_eq!(apply_stage_multiplier(101, 1), 151);
        assert_eq!(apply_stage_multiplier(101, -1), 67);
    }
}
