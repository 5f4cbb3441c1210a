//! One side of the field: the roster, its active slot, and side conditions.

use std::collections::BTreeMap;

use anyhow::{bail, Result};

use crate::sim::pokemon::Pokemon;

/// Entry hazards laid on a side. Damage scales with stacked layers.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd)]
pub enum HazardKind {
    Spikes,
}

impl HazardKind {
    pub fn display_name(self) -> &'static str {
        match self {
            HazardKind::Spikes => "Spikes",
        }
    }

    pub fn max_layers(self) -> u8 {
        match self {
            HazardKind::Spikes => 3,
        }
    }
}

/// Damage-halving walls with a turn countdown.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd)]
pub enum ScreenKind {
    Reflect,
    LightScreen,
}

impl ScreenKind {
    pub fn display_name(self) -> &'static str {
        match self {
            ScreenKind::Reflect => "Reflect",
            ScreenKind::LightScreen => "Light Screen",
        }
    }
}

#[derive(Clone, Debug)]
pub struct Team {
    pub members: Vec<Pokemon>,
    pub active_index: usize,
    hazards: BTreeMap<HazardKind, u8>,
    screens: BTreeMap<ScreenKind, u8>,
}

impl Team {
    /// The first roster slot starts active.
    pub fn new(members: Vec<Pokemon>) -> Result<Team> {
        if members.is_empty() {
            bail!("a team needs at least one member");
        }
        Ok(Team {
            members,
            active_index: 0,
            hazards: BTreeMap::new(),
            screens: BTreeMap::new(),
        })
    }

    pub fn active(&self) -> &Pokemon {
        &self.members[self.active_index]
    }

    pub fn active_mut(&mut self) -> &mut Pokemon {
        &mut self.members[self.active_index]
    }

    /// Moves the active slot. Out-of-range targets, fainted targets and
    /// the currently active slot are all rejected.
    pub fn switch(&mut self, index: usize) -> Result<()> {
        let Some(target) = self.members.get(index) else {
            bail!("switch target {} out of range", index);
        };
        if index == self.active_index {
            bail!("{} is already in battle", target.species);
        }
        if target.is_fainted() {
            bail!("cannot switch to fainted {}", target.species);
        }
        self.active_index = index;
        Ok(())
    }

    pub fn all_fainted(&self) -> bool {
        self.members.iter().all(Pokemon::is_fainted)
    }

    /// Adds one layer, up to the hazard's cap. Returns the layer count
    /// afterwards.
    pub fn add_hazard_layer(&mut self, kind: HazardKind) -> u8 {
        let layers = self.hazards.entry(kind).or_insert(0);
        *layers = (*layers + 1).min(kind.max_layers());
        *layers
    }

    pub fn hazard_layers(&self, kind: HazardKind) -> u8 {
        self.hazards.get(&kind).copied().unwrap_or(0)
    }

    pub fn clear_hazards(&mut self) {
        self.hazards.clear();
    }

    /// Raises a screen for `turns` end-of-turn ticks. Re-raising resets
    /// the countdown.
    pub fn set_screen(&mut self, kind: ScreenKind, turns: u8) {
        self.screens.insert(kind, turns);
    }

    pub fn screen_active(&self, kind: ScreenKind) -> bool {
        self.screens.contains_key(&kind)
    }

    /// Counts every screen down one turn and reports the ones that just
    /// wore off, in a stable order.
    pub fn tick_screens(&mut self) -> Vec<ScreenKind> {
        let mut expired = Vec::new();
        self.screens.retain(|kind, turns| {
            *turns = turns.saturating_sub(1);
            if *turns == 0 {
                expired.push(*kind);
                false
            } else {
                true
            }
        });
        expired
    }
}
