//! Move catalog. Power, accuracy and PP are the Ruby/Sapphire values.

use once_cell::sync::Lazy;
use phf::phf_map;

use crate::data::types::Type;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum MoveCategory {
    Physical,
    Special,
    Status,
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct MoveFlags {
    pub contact: bool,
    pub sound: bool,
}

#[derive(Clone, Copy, Debug)]
pub struct MoveData {
    pub name: &'static str,
    pub move_type: Type,
    pub category: MoveCategory,
    pub power: u16,
    /// `None` means the move cannot miss.
    pub accuracy: Option<u8>,
    pub priority: i8,
    pub pp: u8,
    pub flags: MoveFlags,
}

macro_rules! move_entry {
    ($name:literal, $ty:ident, $power:literal, $acc:expr, $pp:literal, prio $prio:literal, contact $contact:literal) => {
        MoveData {
            name: $name,
            move_type: Type::$ty,
            category: if Type::$ty.is_physical() {
                MoveCategory::Physical
            } else {
                MoveCategory::Special
            },
            power: $power,
            accuracy: $acc,
            priority: $prio,
            pp: $pp,
            flags: MoveFlags {
                contact: $contact,
                sound: false,
            },
        }
    };
}

pub static MOVES: phf::Map<&'static str, MoveData> = phf_map! {
    "tackle" => move_entry!("Tackle", Normal, 35, Some(95), 35, prio 0, contact true),
    "quickattack" => move_entry!("Quick Attack", Normal, 40, Some(100), 30, prio 1, contact true),
    "extremespeed" => move_entry!("Extreme Speed", Normal, 80, Some(100), 5, prio 1, contact true),
    "bodyslam" => move_entry!("Body Slam", Normal, 85, Some(100), 15, prio 0, contact true),
    "doubleedge" => move_entry!("Double-Edge", Normal, 120, Some(100), 15, prio 0, contact true),
    "slash" => move_entry!("Slash", Normal, 70, Some(100), 20, prio 0, contact true),
    "swift" => move_entry!("Swift", Normal, 60, None, 20, prio 0, contact false),
    "earthquake" => move_entry!("Earthquake", Ground, 100, Some(100), 10, prio 0, contact false),
    "rockslide" => move_entry!("Rock Slide", Rock, 75, Some(90), 10, prio 0, contact false),
    "brickbreak" => move_entry!("Brick Break", Fighting, 75, Some(100), 15, prio 0, contact true),
    "crosschop" => move_entry!("Cross Chop", Fighting, 100, Some(80), 5, prio 0, contact true),
    "shadowball" => move_entry!("Shadow Ball", Ghost, 80, Some(100), 15, prio 0, contact false),
    "sludgebomb" => move_entry!("Sludge Bomb", Poison, 90, Some(100), 10, prio 0, contact false),
    "meteormash" => move_entry!("Meteor Mash", Steel, 100, Some(85), 10, prio 0, contact true),
    "aerialace" => move_entry!("Aerial Ace", Flying, 60, None, 20, prio 0, contact true),
    "drillpeck" => move_entry!("Drill Peck", Flying, 80, Some(100), 20, prio 0, contact true),
    "megahorn" => move_entry!("Megahorn", Bug, 120, Some(85), 10, prio 0, contact true),
    "flamethrower" => move_entry!("Flamethrower", Fire, 95, Some(100), 15, prio 0, contact false),
    "fireblast" => move_entry!("Fire Blast", Fire, 120, Some(85), 5, prio 0, contact false),
    "surf" => move_entry!("Surf", Water, 95, Some(100), 15, prio 0, contact false),
    "hydropump" => move_entry!("Hydro Pump", Water, 120, Some(80), 5, prio 0, contact false),
    "thunderbolt" => move_entry!("Thunderbolt", Electric, 95, Some(100), 15, prio 0, contact false),
    "thunder" => move_entry!("Thunder", Electric, 120, Some(70), 10, prio 0, contact false),
    "icebeam" => move_entry!("Ice Beam", Ice, 95, Some(100), 10, prio 0, contact false),
    "psychic" => move_entry!("Psychic", Psychic, 90, Some(100), 10, prio 0, contact false),
    "crunch" => move_entry!("Crunch", Dark, 80, Some(100), 15, prio 0, contact true),
    "dragonclaw" => move_entry!("Dragon Claw", Dragon, 80, Some(100), 15, prio 0, contact true),
    "gigadrain" => move_entry!("Giga Drain", Grass, 60, Some(100), 5, prio 0, contact false),
    "leafblade" => move_entry!("Leaf Blade", Grass, 70, Some(100), 15, prio 0, contact true),
};

/// Fallback move used once a combatant's whole moveset has run dry. It has
/// its own PP pool so repeated use never touches the real slots.
static STRUGGLE: Lazy<MoveData> = Lazy::new(|| MoveData {
    name: "Struggle",
    move_type: Type::Normal,
    category: MoveCategory::Physical,
    power: 50,
    accuracy: Some(100),
    priority: 0,
    pp: 255,
    flags: MoveFlags {
        contact: true,
        sound: false,
    },
});

pub fn struggle() -> &'static MoveData {
    Lazy::force(&STRUGGLE)
}
