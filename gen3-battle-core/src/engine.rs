//! Step-based facade over [`Battle`](crate::sim::battle::Battle).
//!
//! The turn machine itself never declares a winner; this wrapper polls
//! the rosters after every step and surfaces the outcome alongside the
//! transcript lines the step produced.

use anyhow::Result;
use serde::Serialize;

use crate::sim::battle::{Action, Battle, Weather};
use crate::sim::team::Team;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Player {
    A,
    B,
}

impl Player {
    fn side(self) -> usize {
        match self {
            Player::A => 0,
            Player::B => 1,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub enum BattleResult {
    TeamAWins,
    TeamBWins,
    Draw,
}

/// What one engine call produced: the transcript lines appended during
/// the call, and the outcome if the battle is now decided.
#[derive(Clone, Debug)]
pub struct StepResult {
    pub events: Vec<String>,
    pub outcome: Option<BattleResult>,
}

pub struct BattleEngine {
    battle: Battle,
}

impl BattleEngine {
    pub fn new(team_a: Team, team_b: Team, seed: u64) -> BattleEngine {
        BattleEngine {
            battle: Battle::new(team_a, team_b, seed),
        }
    }

    pub fn start(&mut self) -> Result<StepResult> {
        let mark = self.battle.logger.log_lines().len();
        self.battle.start()?;
        Ok(self.step_result(mark))
    }

    pub fn play_turn(&mut self, action_a: Action, action_b: Action) -> Result<StepResult> {
        let mark = self.battle.logger.log_lines().len();
        self.battle.play_turn(action_a, action_b)?;
        Ok(self.step_result(mark))
    }

    /// Brings in a replacement for a fainted active between turns.
    pub fn replace_fainted(&mut self, player: Player, index: usize) -> Result<StepResult> {
        let mark = self.battle.logger.log_lines().len();
        self.battle.replace_fainted(player.side(), index)?;
        Ok(self.step_result(mark))
    }

    /// `None` while both rosters still have a standing member.
    pub fn outcome(&self) -> Option<BattleResult> {
        let a_out = self.battle.sides[0].all_fainted();
        let b_out = self.battle.sides[1].all_fainted();
        match (a_out, b_out) {
            (false, false) => None,
            (true, true) => Some(BattleResult::Draw),
            (true, false) => Some(BattleResult::TeamBWins),
            (false, true) => Some(BattleResult::TeamAWins),
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.outcome().is_some()
    }

    /// Everything the player may legally declare right now: each move
    /// slot with PP left (or the fallback when the whole set ran dry),
    /// plus a switch to every healthy benched member while not trapped.
    pub fn legal_actions(&self, player: Player) -> Vec<Action> {
        let team = &self.battle.sides[player.side()];
        let active = team.active();

        let mut actions: Vec<Action> = active
            .moves
            .iter()
            .enumerate()
            .filter(|(_, slot)| slot.pp > 0)
            .map(|(index, _)| Action::Move(index))
            .collect();
        if actions.is_empty() {
            actions.push(Action::Move(0));
        }

        if !active.trapped {
            for (index, member) in team.members.iter().enumerate() {
                if index != team.active_index && !member.is_fainted() {
                    actions.push(Action::Switch(index));
                }
            }
        }
        actions
    }

    pub fn turn(&self) -> u32 {
        self.battle.turn
    }

    pub fn weather(&self) -> Option<Weather> {
        self.battle.weather
    }

    pub fn team(&self, player: Player) -> &Team {
        &self.battle.sides[player.side()]
    }

    pub fn log_lines(&self) -> &[String] {
        self.battle.logger.log_lines()
    }

    pub fn log_json(&self) -> serde_json::Value {
        self.battle.logger.to_json()
    }

    fn step_result(&self, mark: usize) -> StepResult {
        StepResult {
            events: self.battle.logger.log_lines()[mark..].to_vec(),
            outcome: self.outcome(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Dex;
    use crate::sim::pokemon::Pokemon;

    fn team(specs: &[(&str, &[&str])]) -> Team {
        let dex = Dex::gen3();
        let members = specs
            .iter()
            .map(|(species, moves)| {
                let names: Vec<String> = moves.iter().map(|m| m.to_string()).collect();
                Pokemon::new(&dex, species, 100, [31; 6], [0; 6], &names, None, None)
                    .expect("species exists")
            })
            .collect();
        Team::new(members).unwrap()
    }

    #[test]
    fn legal_actions_enumerate_moves_and_bench() {
        let team_a = team(&[("pikachu", &["Tackle", "Thunderbolt"]), ("snorlax", &["Tackle"])]);
        let team_b = team(&[("snorlax", &["Tackle"])]);
        let engine = BattleEngine::new(team_a, team_b, 5);

        let actions = engine.legal_actions(Player::A);
        assert_eq!(
            actions,
            vec![Action::Move(0), Action::Move(1), Action::Switch(1)]
        );

        // The lone snorlax has nowhere to go.
        assert_eq!(engine.legal_actions(Player::B), vec![Action::Move(0)]);
    }

    #[test]
    fn exhausted_movesets_still_offer_an_action() {
        let team_a = team(&[("pikachu", &["Tackle"])]);
        let team_b = team(&[("snorlax", &["Tackle"])]);
        let mut engine = BattleEngine::new(team_a, team_b, 5);
        engine.battle.sides[0].active_mut().moves[0].pp = 0;

        assert_eq!(engine.legal_actions(Player::A), vec![Action::Move(0)]);
    }

    #[test]
    fn trapped_actives_lose_their_switches() {
        let team_a = team(&[("pikachu", &["Tackle"]), ("snorlax", &["Tackle"])]);
        let team_b = team(&[("snorlax", &["Tackle"])]);
        let mut engine = BattleEngine::new(team_a, team_b, 5);

        assert!(engine
            .legal_actions(Player::A)
            .contains(&Action::Switch(1)));
        engine.battle.sides[0].active_mut().trapped = true;
        assert!(!engine
            .legal_actions(Player::A)
            .iter()
            .any(|a| matches!(a, Action::Switch(_))));
    }

    #[test]
    fn outcome_follows_the_rosters() {
        let team_a = team(&[("pikachu", &["Tackle"])]);
        let team_b = team(&[("snorlax", &["Tackle"])]);
        let mut engine = BattleEngine::new(team_a, team_b, 5);

        assert_eq!(engine.outcome(), None);
        engine.battle.sides[0].active_mut().current_hp = 0;
        assert_eq!(engine.outcome(), Some(BattleResult::TeamBWins));
        assert!(engine.is_terminal());

        engine.battle.sides[1].active_mut().current_hp = 0;
        assert_eq!(engine.outcome(), Some(BattleResult::Draw));
    }
}
