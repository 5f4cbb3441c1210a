//! Static Gen 3 catalog: species, moves, abilities and items.

pub mod capabilities;
pub mod moves;
pub mod species;
pub mod types;

#[cfg(test)]
mod tests;

use crate::data::capabilities::CapabilityData;
use crate::data::moves::MoveData;
use crate::data::species::SpeciesInfo;

/// Lowercase a display name and strip everything that is not a letter or
/// digit, so "Quick Attack", "quick-attack" and "quickattack" all match.
pub fn normalize_id(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// Handle over the catalog tables. Everything that needs a lookup takes one
/// of these explicitly; nothing reaches for the tables behind the caller's
/// back, which keeps swapping in a different ruleset a local change.
#[derive(Clone, Copy, Debug)]
pub struct Dex {
    species: &'static phf::Map<&'static str, SpeciesInfo>,
    moves: &'static phf::Map<&'static str, MoveData>,
    abilities: &'static phf::Map<&'static str, CapabilityData>,
    items: &'static phf::Map<&'static str, CapabilityData>,
}

impl Dex {
    pub fn gen3() -> Dex {
        Dex {
            species: &species::POKEDEX,
            moves: &moves::MOVES,
            abilities: &capabilities::ABILITIES,
            items: &capabilities::ITEMS,
        }
    }

    pub fn species(&self, name: &str) -> Option<&'static SpeciesInfo> {
        self.species.get(normalize_id(name).as_str())
    }

    pub fn move_data(&self, name: &str) -> Option<&'static MoveData> {
        self.moves.get(normalize_id(name).as_str())
    }

    pub fn ability(&self, name: &str) -> Option<&'static CapabilityData> {
        self.abilities.get(normalize_id(name).as_str())
    }

    pub fn item(&self, name: &str) -> Option<&'static CapabilityData> {
        self.items.get(normalize_id(name).as_str())
    }
}
