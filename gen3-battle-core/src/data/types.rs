//! The seventeen Gen 3 types and their matchup chart.

/// A single elemental type. The chart below is the Ruby/Sapphire one: no
/// Fairy, Steel still resists Ghost and Dark, Shadow Ball is physical
/// because its type is, and so on.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Type {
    Normal,
    Fire,
    Water,
    Electric,
    Grass,
    Ice,
    Fighting,
    Poison,
    Ground,
    Flying,
    Psychic,
    Bug,
    Rock,
    Ghost,
    Dragon,
    Dark,
    Steel,
}

impl Type {
    /// Case-insensitive lookup by English name.
    pub fn from_name(name: &str) -> Option<Type> {
        use Type::*;
        let lowered = name.trim().to_ascii_lowercase();
        Some(match lowered.as_str() {
            "normal" => Normal,
            "fire" => Fire,
            "water" => Water,
            "electric" => Electric,
            "grass" => Grass,
            "ice" => Ice,
            "fighting" => Fighting,
            "poison" => Poison,
            "ground" => Ground,
            "flying" => Flying,
            "psychic" => Psychic,
            "bug" => Bug,
            "rock" => Rock,
            "ghost" => Ghost,
            "dragon" => Dragon,
            "dark" => Dark,
            "steel" => Steel,
            _ => return None,
        })
    }

    pub fn name(self) -> &'static str {
        use Type::*;
        match self {
            Normal => "Normal",
            Fire => "Fire",
            Water => "Water",
            Electric => "Electric",
            Grass => "Grass",
            Ice => "Ice",
            Fighting => "Fighting",
            Poison => "Poison",
            Ground => "Ground",
            Flying => "Flying",
            Psychic => "Psychic",
            Bug => "Bug",
            Rock => "Rock",
            Ghost => "Ghost",
            Dragon => "Dragon",
            Dark => "Dark",
            Steel => "Steel",
        }
    }

    /// In Gen 3 the damage category is a property of the type, not the move.
    pub const fn is_physical(self) -> bool {
        use Type::*;
        matches!(
            self,
            Normal | Fighting | Flying | Ground | Rock | Bug | Ghost | Poison | Steel
        )
    }
}

/// Multiplier for one attacking type hitting one defending type.
/// Anything not listed is neutral.
pub fn effectiveness(attack: Type, defend: Type) -> f32 {
    use Type::*;
    match (attack, defend) {
        (Normal, Rock) => 0.5,
        (Normal, Ghost) => 0.0,
        (Normal, Steel) => 0.5,

        (Fire, Fire) => 0.5,
        (Fire, Water) => 0.5,
        (Fire, Grass) => 2.0,
        (Fire, Ice) => 2.0,
        (Fire, Bug) => 2.0,
        (Fire, Rock) => 0.5,
        (Fire, Dragon) => 0.5,
        (Fire, Steel) => 2.0,

        (Water, Fire) => 2.0,
        (Water, Water) => 0.5,
        (Water, Grass) => 0.5,
        (Water, Ground) => 2.0,
        (Water, Rock) => 2.0,
        (Water, Dragon) => 0.5,

        (Electric, Water) => 2.0,
        (Electric, Electric) => 0.5,
        (Electric, Grass) => 0.5,
        (Electric, Ground) => 0.0,
        (Electric, Flying) => 2.0,
        (Electric, Dragon) => 0.5,

        (Grass, Fire) => 0.5,
        (Grass, Water) => 2.0,
        (Grass, Electric) => 0.5,
        (Grass, Grass) => 0.5,
        (Grass, Poison) => 0.5,
        (Grass, Ground) => 2.0,
        (Grass, Flying) => 0.5,
        (Grass, Bug) => 0.5,
        (Grass, Rock) => 2.0,
        (Grass, Dragon) => 0.5,
        (Grass, Steel) => 0.5,

        (Ice, Fire) => 0.5,
        (Ice, Water) => 0.5,
        (Ice, Grass) => 2.0,
        (Ice, Ice) => 0.5,
        (Ice, Ground) => 2.0,
        (Ice, Flying) => 2.0,
        (Ice, Dragon) => 2.0,
        (Ice, Steel) => 0.5,

        (Fighting, Normal) => 2.0,
        (Fighting, Ice) => 2.0,
        (Fighting, Poison) => 0.5,
        (Fighting, Flying) => 0.5,
        (Fighting, Psychic) => 0.5,
        (Fighting, Bug) => 0.5,
        (Fighting, Rock) => 2.0,
        (Fighting, Ghost) => 0.0,
        (Fighting, Dark) => 2.0,
        (Fighting, Steel) => 2.0,

        (Poison, Grass) => 2.0,
        (Poison, Poison) => 0.5,
        (Poison, Ground) => 0.5,
        (Poison, Rock) => 0.5,
        (Poison, Ghost) => 0.5,
        (Poison, Steel) => 0.0,

        (Ground, Fire) => 2.0,
        (Ground, Electric) => 2.0,
        (Ground, Grass) => 0.5,
        (Ground, Poison) => 2.0,
        (Ground, Flying) => 0.0,
        (Ground, Bug) => 0.5,
        (Ground, Rock) => 2.0,
        (Ground, Steel) => 2.0,

        (Flying, Electric) => 0.5,
        (Flying, Grass) => 2.0,
        (Flying, Fighting) => 2.0,
        (Flying, Bug) => 2.0,
        (Flying, Rock) => 0.5,
        (Flying, Steel) => 0.5,

        (Psychic, Fighting) => 2.0,
        (Psychic, Poison) => 2.0,
        (Psychic, Psychic) => 0.5,
        (Psychic, Dark) => 0.0,
        (Psychic, Steel) => 0.5,

        (Bug, Fire) => 0.5,
        (Bug, Grass) => 2.0,
        (Bug, Fighting) => 0.5,
        (Bug, Poison) => 0.5,
        (Bug, Flying) => 0.5,
        (Bug, Psychic) => 2.0,
        (Bug, Ghost) => 0.5,
        (Bug, Dark) => 2.0,
        (Bug, Steel) => 0.5,

        (Rock, Fire) => 2.0,
        (Rock, Ice) => 2.0,
        (Rock, Fighting) => 0.5,
        (Rock, Ground) => 0.5,
        (Rock, Flying) => 2.0,
        (Rock, Bug) => 2.0,
        (Rock, Steel) => 0.5,

        (Ghost, Normal) => 0.0,
        (Ghost, Psychic) => 2.0,
        (Ghost, Ghost) => 2.0,
        (Ghost, Dark) => 0.5,

        (Dragon, Dragon) => 2.0,
        (Dragon, Steel) => 0.5,

        (Dark, Fighting) => 0.5,
        (Dark, Psychic) => 2.0,
        (Dark, Ghost) => 2.0,
        (Dark, Dark) => 0.5,
        (Dark, Steel) => 0.5,

        (Steel, Fire) => 0.5,
        (Steel, Water) => 0.5,
        (Steel, Electric) => 0.5,
        (Steel, Ice) => 2.0,
        (Steel, Rock) => 2.0,
        (Steel, Steel) => 0.5,

        _ => 1.0,
    }
}

/// Combined multiplier against a possibly dual-typed defender. Monotyped
/// combatants store their type twice, so the second factor is skipped when
/// it repeats the first.
pub fn effectiveness_dual(attack: Type, defend: [Type; 2]) -> f32 {
    let mut multiplier = effectiveness(attack, defend[0]);
    if defend[1] != defend[0] {
        multiplier *= effectiveness(attack, defend[1]);
    }
    multiplier
}
