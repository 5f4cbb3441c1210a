//! Species catalog with Gen 3 base stats.

use phf::phf_map;

#[derive(Clone, Copy, Debug)]
pub struct BaseStats {
    pub hp: u16,
    pub atk: u16,
    pub def: u16,
    pub spa: u16,
    pub spd: u16,
    pub spe: u16,
}

#[derive(Clone, Copy, Debug)]
pub struct SpeciesInfo {
    pub name: &'static str,
    pub base_stats: BaseStats,
    /// One entry for monotyped species, two otherwise.
    pub types: &'static [&'static str],
}

macro_rules! species {
    ($name:literal, [$($ty:literal),+], $hp:literal/$atk:literal/$def:literal/$spa:literal/$spd:literal/$spe:literal) => {
        SpeciesInfo {
            name: $name,
            base_stats: BaseStats {
                hp: $hp,
                atk: $atk,
                def: $def,
                spa: $spa,
                spd: $spd,
                spe: $spe,
            },
            types: &[$($ty),+],
        }
    };
}

pub static POKEDEX: phf::Map<&'static str, SpeciesInfo> = phf_map! {
    "venusaur" => species!("Venusaur", ["Grass", "Poison"], 80/82/83/100/100/80),
    "charizard" => species!("Charizard", ["Fire", "Flying"], 78/84/78/109/85/100),
    "blastoise" => species!("Blastoise", ["Water"], 79/83/100/85/105/78),
    "pikachu" => species!("Pikachu", ["Electric"], 35/55/30/50/40/90),
    "alakazam" => species!("Alakazam", ["Psychic"], 55/50/45/135/95/120),
    "machamp" => species!("Machamp", ["Fighting"], 90/130/80/65/85/55),
    "gengar" => species!("Gengar", ["Ghost", "Poison"], 60/65/60/130/75/110),
    "gyarados" => species!("Gyarados", ["Water", "Flying"], 95/125/79/60/100/81),
    "snorlax" => species!("Snorlax", ["Normal"], 160/110/65/65/110/30),
    "zapdos" => species!("Zapdos", ["Electric", "Flying"], 90/90/85/125/90/100),
    "heracross" => species!("Heracross", ["Bug", "Fighting"], 80/125/75/40/95/85),
    "wobbuffet" => species!("Wobbuffet", ["Psychic"], 190/33/58/33/58/33),
    "sceptile" => species!("Sceptile", ["Grass"], 70/85/65/105/85/120),
    "blaziken" => species!("Blaziken", ["Fire", "Fighting"], 80/120/70/110/70/80),
    "swampert" => species!("Swampert", ["Water", "Ground"], 100/110/90/85/90/60),
    "ludicolo" => species!("Ludicolo", ["Water", "Grass"], 80/70/70/90/100/70),
    "slaking" => species!("Slaking", ["Normal"], 150/160/100/95/65/100),
    "manectric" => species!("Manectric", ["Electric"], 70/75/60/105/60/105),
    "flygon" => species!("Flygon", ["Ground", "Dragon"], 80/100/80/80/80/100),
    "dusclops" => species!("Dusclops", ["Ghost"], 40/70/130/60/130/25),
    "salamence" => species!("Salamence", ["Dragon", "Flying"], 95/135/80/110/80/100),
    "metagross" => species!("Metagross", ["Steel", "Psychic"], 80/135/130/95/90/70),
    "kyogre" => species!("Kyogre", ["Water"], 100/100/90/150/140/90),
    "groudon" => species!("Groudon", ["Ground"], 100/150/140/100/90/90),
};
