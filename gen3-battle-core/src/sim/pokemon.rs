//! A single combatant: derived stats, status, stages, volatiles, moveset.

use std::collections::HashMap;

use anyhow::{anyhow, bail, Result};

use crate::data::moves::{self, MoveData};
use crate::data::types::Type;
use crate::data::Dex;
use crate::sim::capability::Capability;
use crate::sim::stats::{StatsSet, STAGE_MAX, STAGE_MIN};

/// Major status conditions. At most one at a time.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Status {
    Burn,
    Paralysis,
    Poison,
    Toxic,
    Sleep,
    Freeze,
}

impl Status {
    pub fn from_id(id: &str) -> Option<Status> {
        Some(match id {
            "brn" => Status::Burn,
            "par" => Status::Paralysis,
            "psn" => Status::Poison,
            "tox" => Status::Toxic,
            "slp" => Status::Sleep,
            "frz" => Status::Freeze,
            _ => return None,
        })
    }

    pub fn id(self) -> &'static str {
        match self {
            Status::Burn => "brn",
            Status::Paralysis => "par",
            Status::Poison => "psn",
            Status::Toxic => "tox",
            Status::Sleep => "slp",
            Status::Freeze => "frz",
        }
    }
}

/// Transient in-battle condition. `duration` of `None` lasts until the
/// holder leaves the field.
#[derive(Clone, Debug)]
pub struct Volatile {
    pub source: Option<String>,
    pub duration: Option<u8>,
}

#[derive(Clone, Debug)]
pub struct MoveSlot {
    pub data: &'static MoveData,
    pub pp: u8,
}

impl MoveSlot {
    pub fn new(data: &'static MoveData) -> MoveSlot {
        MoveSlot { data, pp: data.pp }
    }
}

#[derive(Clone, Debug)]
pub struct Pokemon {
    pub species: String,
    pub level: u8,
    pub types: [Type; 2],
    pub stats: StatsSet,
    pub current_hp: u16,
    pub status: Option<Status>,
    pub sleep_counter: u8,
    pub toxic_counter: u8,
    /// atk/def/spa/spd/spe, each clamped to -6..=6.
    pub stat_stages: [i8; 5],
    pub accuracy_stage: i8,
    pub evasion_stage: i8,
    pub volatiles: HashMap<String, Volatile>,
    pub moves: Vec<MoveSlot>,
    /// Lazily created fallback slot, see [`Pokemon::select_move`].
    pub fallback: Option<MoveSlot>,
    pub ability: Capability,
    pub item: Capability,
    pub trapped: bool,
    /// Truant bookkeeping: `true` means the owner loafs this turn.
    pub loafing: bool,
}

impl Pokemon {
    /// Builds a combatant from catalog entries. Unknown species or moves
    /// are hard errors; unknown ability or item names degrade to inert
    /// capabilities that keep their display name.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        dex: &Dex,
        species: &str,
        level: u8,
        ivs: [u8; 6],
        evs: [u8; 6],
        move_names: &[String],
        ability: Option<&str>,
        item: Option<&str>,
    ) -> Result<Pokemon> {
        let info = dex
            .species(species)
            .ok_or_else(|| anyhow!("species '{}' not found in the catalog", species))?;

        let primary = Type::from_name(info.types[0])
            .ok_or_else(|| anyhow!("species '{}' has unknown type '{}'", species, info.types[0]))?;
        let secondary = info
            .types
            .get(1)
            .and_then(|name| Type::from_name(name))
            .unwrap_or(primary);

        let mut move_slots = Vec::with_capacity(move_names.len());
        for name in move_names {
            let data = dex
                .move_data(name)
                .ok_or_else(|| anyhow!("move '{}' not found in the catalog", name))?;
            move_slots.push(MoveSlot::new(data));
        }

        let stats = StatsSet::from_base(&info.base_stats, ivs, evs, level);

        Ok(Pokemon {
            species: info.name.to_string(),
            level,
            types: [primary, secondary],
            current_hp: stats.hp,
            stats,
            status: None,
            sleep_counter: 0,
            toxic_counter: 0,
            stat_stages: [0; 5],
            accuracy_stage: 0,
            evasion_stage: 0,
            volatiles: HashMap::new(),
            moves: move_slots,
            fallback: None,
            ability: Capability::ability(dex, ability),
            item: Capability::item(dex, item),
            trapped: false,
            loafing: false,
        })
    }

    pub fn max_hp(&self) -> u16 {
        self.stats.hp
    }

    pub fn is_fainted(&self) -> bool {
        self.current_hp == 0
    }

    pub fn take_damage(&mut self, amount: u16) {
        self.current_hp = self.current_hp.saturating_sub(amount);
    }

    pub fn heal(&mut self, amount: u16) {
        self.current_hp = (self.current_hp + amount).min(self.stats.hp);
    }

    /// Applies a major status. Refuses if one is already present.
    pub fn set_status(&mut self, status: Status) -> Result<()> {
        if let Some(current) = self.status {
            bail!(
                "{} already has status {}",
                self.species,
                current.id()
            );
        }
        self.status = Some(status);
        match status {
            Status::Toxic => self.toxic_counter = 1,
            Status::Sleep => self.sleep_counter = 2,
            _ => {}
        }
        Ok(())
    }

    /// Like [`set_status`](Self::set_status) but silently loses out to an
    /// existing condition. Returns whether the status stuck.
    pub fn try_set_status(&mut self, status: Status) -> bool {
        self.set_status(status).is_ok()
    }

    pub fn clear_status(&mut self) {
        self.status = None;
        self.toxic_counter = 0;
        self.sleep_counter = 0;
    }

    pub fn change_stage(&mut self, index: usize, delta: i8) {
        let stage = &mut self.stat_stages[index];
        *stage = stage.saturating_add(delta).clamp(STAGE_MIN, STAGE_MAX);
    }

    pub fn has_ability(&self, name: &str) -> bool {
        self.ability.name.eq_ignore_ascii_case(name)
    }

    pub fn add_volatile(&mut self, name: &str, source: Option<&str>, duration: Option<u8>) {
        self.volatiles.insert(
            name.to_string(),
            Volatile {
                source: source.map(str::to_string),
                duration,
            },
        );
    }

    pub fn has_volatile(&self, name: &str) -> bool {
        self.volatiles.contains_key(name)
    }

    pub fn remove_volatile(&mut self, name: &str) -> bool {
        self.volatiles.remove(name).is_some()
    }

    /// Counts down timed volatiles, dropping the ones that expire.
    /// Untimed ones stay until cleared by a switch.
    pub fn tick_volatiles(&mut self) {
        self.volatiles.retain(|_, v| match v.duration.as_mut() {
            Some(turns) => {
                *turns = turns.saturating_sub(1);
                *turns > 0
            }
            None => true,
        });
    }

    /// True once no listed move has PP left (or none were listed).
    pub fn moveset_exhausted(&self) -> bool {
        self.moves.iter().all(|slot| slot.pp == 0)
    }

    /// Resolves an action index to move data, spending one PP. A slot at
    /// zero PP can still be picked deliberately (the PP just stays at
    /// zero); only full exhaustion reroutes to the fallback move, which
    /// draws on its own pool.
    pub fn select_move(&mut self, index: usize) -> Result<&'static MoveData> {
        if self.moveset_exhausted() {
            let slot = self
                .fallback
                .get_or_insert_with(|| MoveSlot::new(moves::struggle()));
            slot.pp = slot.pp.saturating_sub(1);
            return Ok(slot.data);
        }
        let slot = self
            .moves
            .get_mut(index)
            .ok_or_else(|| anyhow!("move index {} out of range for {}", index, self.species))?;
        slot.pp = slot.pp.saturating_sub(1);
        Ok(slot.data)
    }

    /// Drops the held item, leaving an inert slot behind.
    pub fn consume_item(&mut self) {
        self.item = Capability::none();
    }

    pub fn has_type(&self, ty: Type) -> bool {
        self.types[0] == ty || self.types[1] == ty
    }
}
