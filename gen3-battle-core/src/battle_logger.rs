//! Append-only battle transcript in the pipe-delimited message format
//! used by Showdown-style tooling. Lines are never rewritten, so two
//! battles from the same seed produce byte-identical transcripts.

use serde_json::json;

/// Identifier for an active combatant, e.g. `p1a: Charizard`.
pub fn showdown_ident(side: usize, species: &str) -> String {
    format!("{}a: {}", side_label(side), species)
}

pub fn side_label(side: usize) -> &'static str {
    if side == 0 {
        "p1"
    } else {
        "p2"
    }
}

#[derive(Clone, Debug, Default)]
pub struct BattleLogger {
    formatid: String,
    log: Vec<String>,
}

impl BattleLogger {
    pub fn new() -> BattleLogger {
        BattleLogger {
            formatid: "gen3customgame".to_string(),
            log: Vec::new(),
        }
    }

    pub fn push(&mut self, line: String) {
        self.log.push(line);
    }

    pub fn log_switch(&mut self, ident: &str, species: &str, level: u8, hp: u16, max_hp: u16) {
        self.push(format!(
            "|switch|{}|{}, L{}|{}/{}",
            ident, species, level, hp, max_hp
        ));
    }

    pub fn log_turn(&mut self, turn: u32) {
        self.push(format!("|turn|{}", turn));
    }

    pub fn log_move(&mut self, source: &str, move_name: &str, target: &str) {
        self.push(format!("|move|{}|{}|{}", source, move_name, target));
    }

    pub fn log_damage(&mut self, target: &str, hp: u16, max_hp: u16) {
        self.push(format!("|-damage|{}|{}/{}", target, hp, max_hp));
    }

    pub fn log_damage_from(&mut self, target: &str, hp: u16, max_hp: u16, source: &str) {
        self.push(format!(
            "|-damage|{}|{}/{}|[from] {}",
            target, hp, max_hp, source
        ));
    }

    pub fn log_heal_from(&mut self, target: &str, hp: u16, max_hp: u16, source: &str) {
        self.push(format!(
            "|-heal|{}|{}/{}|[from] {}",
            target, hp, max_hp, source
        ));
    }

    pub fn log_miss(&mut self, source: &str, target: &str) {
        self.push(format!("|-miss|{}|{}", source, target));
    }

    pub fn log_faint(&mut self, ident: &str) {
        self.push(format!("|faint|{}", ident));
    }

    pub fn log_status(&mut self, ident: &str, status: &str) {
        self.push(format!("|-status|{}|{}", ident, status));
    }

    pub fn log_cure_status(&mut self, ident: &str, status: &str) {
        self.push(format!("|-curestatus|{}|{}", ident, status));
    }

    /// A combatant was prevented from acting (flinch, loafing, ...).
    pub fn log_cant(&mut self, ident: &str, reason: &str) {
        self.push(format!("|cant|{}|{}", ident, reason));
    }

    pub fn log_start(&mut self, ident: &str, effect: &str) {
        self.push(format!("|-start|{}|{}", ident, effect));
    }

    pub fn log_unboost(&mut self, ident: &str, stat: &str, by: u8) {
        self.push(format!("|-unboost|{}|{}|{}", ident, stat, by));
    }

    pub fn log_ability(&mut self, ident: &str, ability: &str) {
        self.push(format!("|-ability|{}|{}", ident, ability));
    }

    pub fn log_immune(&mut self, ident: &str, source: &str) {
        self.push(format!("|-immune|{}|[from] {}", ident, source));
    }

    pub fn log_activate(&mut self, ident: &str, effect: &str) {
        self.push(format!("|-activate|{}|{}", ident, effect));
    }

    pub fn log_weather_start(&mut self, weather: &str, source: &str, ident: &str) {
        self.push(format!(
            "|-weather|{}|[from] {}|[of] {}",
            weather, source, ident
        ));
    }

    pub fn log_weather_end(&mut self) {
        self.push("|-weather|none".to_string());
    }

    pub fn log_side_end(&mut self, side: &str, effect: &str) {
        self.push(format!("|-sideend|{}|{}", side, effect));
    }

    pub fn log_end_item(&mut self, ident: &str, item: &str) {
        self.push(format!("|-enditem|{}|{}|[eat]", ident, item));
    }

    pub fn log_lines(&self) -> &[String] {
        &self.log
    }

    pub fn to_json(&self) -> serde_json::Value {
        json!({
            "formatid": self.formatid,
            "log": self.log,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn idents_name_side_and_species() {
        assert_eq!(showdown_ident(0, "Charizard"), "p1a: Charizard");
        assert_eq!(showdown_ident(1, "Snorlax"), "p2a: Snorlax");
    }

    #[test]
    fn lines_accumulate_in_order() {
        let mut logger = BattleLogger::new();
        logger.log_switch("p1a: Charizard", "Charizard", 100, 297, 297);
        logger.log_move("p1a: Charizard", "Flamethrower", "p2a: Snorlax");
        logger.log_damage("p2a: Snorlax", 300, 461);

        assert_eq!(
            logger.log_lines(),
            [
                "|switch|p1a: Charizard|Charizard, L100|297/297",
                "|move|p1a: Charizard|Flamethrower|p2a: Snorlax",
                "|-damage|p2a: Snorlax|300/461",
            ]
        );
    }

    #[test]
    fn json_carries_format_and_log() {
        let mut logger = BattleLogger::new();
        logger.log_faint("p2a: Snorlax");
        let value = logger.to_json();
        assert_eq!(value["formatid"], "gen3customgame");
        assert_eq!(value["log"][0], "|faint|p2a: Snorlax");
    }
}
