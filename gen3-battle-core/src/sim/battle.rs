//! The turn state machine: switch handling, action ordering, the hit
//! pipeline and end-of-turn upkeep.

use anyhow::{bail, Result};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::battle_logger::{showdown_ident, side_label, BattleLogger};
use crate::data::moves::{MoveCategory, MoveData};
use crate::sim::capability::{self, HookContext, Slot, TryHitOutcome};
use crate::sim::damage::{damage_range, initial_damage};
use crate::sim::pokemon::{Pokemon, Status};
use crate::sim::stats::{
    accuracy_multiplier, apply_stage_multiplier, STAGE_ATK, STAGE_DEF, STAGE_SPA, STAGE_SPD,
    STAGE_SPE,
};
use crate::sim::team::{HazardKind, ScreenKind, Team};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Weather {
    Sun,
    Rain,
}

impl Weather {
    pub fn from_id(id: &str) -> Option<Weather> {
        match id {
            "sun" => Some(Weather::Sun),
            "rain" => Some(Weather::Rain),
            _ => None,
        }
    }

    pub fn id(self) -> &'static str {
        match self {
            Weather::Sun => "sun",
            Weather::Rain => "rain",
        }
    }

    /// Name used in transcript lines.
    pub fn log_name(self) -> &'static str {
        match self {
            Weather::Sun => "SunnyDay",
            Weather::Rain => "RainDance",
        }
    }
}

/// One side's declaration for a turn.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Action {
    /// Use the move in this slot of the active combatant's moveset.
    Move(usize),
    /// Bring in this roster slot instead of acting.
    Switch(usize),
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Phase {
    NotStarted,
    InProgress,
    Ended,
}

/// A running battle. The machine resolves turns and records events; it
/// deliberately does not decide the winner, callers read the rosters
/// (or use the engine facade) for that.
#[derive(Clone, Debug)]
pub struct Battle {
    pub sides: [Team; 2],
    pub weather: Option<Weather>,
    pub weather_turns: u8,
    pub turn: u32,
    pub logger: BattleLogger,
    phase: Phase,
    rng: SmallRng,
}

impl Battle {
    pub fn new(team_a: Team, team_b: Team, seed: u64) -> Battle {
        Battle {
            sides: [team_a, team_b],
            weather: None,
            weather_turns: 0,
            turn: 0,
            logger: BattleLogger::new(),
            phase: Phase::NotStarted,
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    /// Announces the leads and runs battle-start hooks: abilities for both
    /// sides first, then items.
    pub fn start(&mut self) -> Result<()> {
        if self.phase != Phase::NotStarted {
            bail!("battle has already started");
        }
        self.phase = Phase::InProgress;
        self.turn = 1;

        for side in 0..2 {
            let active = self.sides[side].active();
            let ident = showdown_ident(side, &active.species);
            let (species, level, hp, max_hp) = (
                active.species.clone(),
                active.level,
                active.current_hp,
                active.max_hp(),
            );
            self.logger.log_switch(&ident, &species, level, hp, max_hp);
        }
        for side in 0..2 {
            self.with_hook(side, |ctx| capability::fire_on_start(Slot::Ability, ctx));
        }
        for side in 0..2 {
            self.with_hook(side, |ctx| capability::fire_on_start(Slot::Item, ctx));
        }
        self.logger.log_turn(self.turn);
        Ok(())
    }

    pub fn is_over(&self) -> bool {
        self.phase == Phase::Ended
    }

    /// Resolves one declared turn for both sides.
    ///
    /// Switches preempt everything: if either side switches, the turn ends
    /// right after the switch-ins resolve. No moves execute, no upkeep
    /// runs and the turn counter stays put.
    pub fn play_turn(&mut self, action_a: Action, action_b: Action) -> Result<()> {
        match self.phase {
            Phase::NotStarted => bail!("battle has not been started"),
            Phase::Ended => bail!("battle is already over"),
            Phase::InProgress => {}
        }

        // Both declarations are vetted before anything mutates, so a
        // rejected turn leaves the battle exactly as it was.
        self.validate_action(0, action_a)?;
        self.validate_action(1, action_b)?;

        for side in 0..2 {
            self.sides[side].active_mut().tick_volatiles();
        }

        let mut chosen: [Option<&'static MoveData>; 2] = [None, None];
        let mut switched = false;
        for (side, action) in [(0, action_a), (1, action_b)] {
            match action {
                Action::Switch(index) => {
                    self.perform_switch(side, index)?;
                    switched = true;
                }
                Action::Move(index) => {
                    chosen[side] = Some(self.sides[side].active_mut().select_move(index)?);
                }
            }
        }
        if switched {
            self.refresh_phase();
            return Ok(());
        }

        let (Some(move_a), Some(move_b)) = (chosen[0], chosen[1]) else {
            return Ok(());
        };

        let first = self.first_to_act(move_a, move_b);
        let order = if first == 0 {
            [(0, move_a), (1, move_b)]
        } else {
            [(1, move_b), (0, move_a)]
        };
        for (side, move_data) in order {
            self.resolve_action(side, move_data);
        }

        for side in 0..2 {
            self.with_hook(side, |ctx| capability::fire_on_end_of_turn(Slot::Ability, ctx));
        }
        for side in 0..2 {
            self.with_hook(side, |ctx| capability::fire_on_end_of_turn(Slot::Item, ctx));
        }

        self.apply_residuals();
        self.tick_weather();
        self.tick_screens();

        self.turn += 1;
        self.refresh_phase();
        if self.phase == Phase::InProgress {
            self.logger.log_turn(self.turn);
        }
        Ok(())
    }

    /// Brings a replacement in for a fainted active between turns. Runs
    /// the same entry sequence as a declared switch but is exempt from
    /// trapping.
    pub fn replace_fainted(&mut self, side: usize, index: usize) -> Result<()> {
        if self.phase != Phase::InProgress {
            bail!("battle is not in progress");
        }
        if !self.sides[side].active().is_fainted() {
            bail!(
                "{} has not fainted and cannot be replaced",
                self.sides[side].active().species
            );
        }
        self.switch_in(side, index)?;
        self.refresh_phase();
        Ok(())
    }

    fn validate_action(&self, side: usize, action: Action) -> Result<()> {
        let team = &self.sides[side];
        let active = team.active();
        match action {
            Action::Move(index) => {
                // Any index is fine once the set is dry, the fallback
                // move takes over regardless.
                if !active.moveset_exhausted() && index >= active.moves.len() {
                    bail!("move index {} out of range for {}", index, active.species);
                }
            }
            Action::Switch(index) => {
                if active.trapped {
                    bail!("{} is trapped and cannot switch out", active.species);
                }
                let Some(target) = team.members.get(index) else {
                    bail!("switch target {} out of range", index);
                };
                if index == team.active_index {
                    bail!("{} is already in battle", target.species);
                }
                if target.is_fainted() {
                    bail!("cannot switch to fainted {}", target.species);
                }
            }
        }
        Ok(())
    }

    fn perform_switch(&mut self, side: usize, index: usize) -> Result<()> {
        if self.sides[side].active().trapped {
            bail!(
                "{} is trapped and cannot switch out",
                self.sides[side].active().species
            );
        }
        self.switch_in(side, index)
    }

    /// Shared switch path: clear the outgoing combatant's volatiles, flip
    /// the slot, run entry hooks (ability then item), let the opposing
    /// active claim its trap, then apply entry hazards.
    fn switch_in(&mut self, side: usize, index: usize) -> Result<()> {
        self.sides[side].active_mut().volatiles.clear();
        self.sides[side].switch(index)?;

        let ident = self.ident(side);
        {
            let incoming = self.sides[side].active();
            let (species, level, hp, max_hp) = (
                incoming.species.clone(),
                incoming.level,
                incoming.current_hp,
                incoming.max_hp(),
            );
            self.logger.log_switch(&ident, &species, level, hp, max_hp);
        }

        self.with_hook(side, |ctx| {
            capability::fire_on_switch_in(Slot::Ability, ctx);
            capability::fire_on_switch_in(Slot::Item, ctx);
        });
        self.with_hook(1 - side, |ctx| {
            capability::fire_on_foe_trap(Slot::Ability, ctx);
            capability::fire_on_foe_trap(Slot::Item, ctx);
        });

        let layers = self.sides[side].hazard_layers(HazardKind::Spikes);
        if layers > 0 {
            let (hp, max_hp) = {
                let incoming = self.sides[side].active_mut();
                let damage = (incoming.max_hp() as u32 * layers as u32 / 8).max(1) as u16;
                incoming.take_damage(damage);
                (incoming.current_hp, incoming.max_hp())
            };
            self.logger.log_damage_from(&ident, hp, max_hp, "Spikes");
            if self.sides[side].active().is_fainted() {
                self.logger.log_faint(&ident);
            }
        }
        Ok(())
    }

    /// Who moves first this turn: higher effective priority, then higher
    /// paralysis-adjusted speed. Side 2 wins exact ties.
    fn first_to_act(&mut self, move_a: &MoveData, move_b: &MoveData) -> usize {
        let bonus_a = capability::priority_bonus(self.sides[0].active(), &mut self.rng);
        let bonus_b = capability::priority_bonus(self.sides[1].active(), &mut self.rng);
        let priority_a = move_a.priority as f64 + bonus_a;
        let priority_b = move_b.priority as f64 + bonus_b;
        if priority_a != priority_b {
            return if priority_a > priority_b { 0 } else { 1 };
        }

        let speed_a = ordering_speed(self.sides[0].active());
        let speed_b = ordering_speed(self.sides[1].active());
        if speed_a > speed_b {
            0
        } else {
            1
        }
    }

    fn resolve_action(&mut self, side: usize, move_data: &'static MoveData) {
        let foe_side = 1 - side;
        if self.sides[side].active().is_fainted() || self.sides[foe_side].active().is_fainted() {
            return;
        }

        let ident = self.ident(side);

        if self.sides[side].active_mut().remove_volatile("flinch") {
            self.logger.log_cant(&ident, "flinch");
            return;
        }

        let proceed = self.with_hook(side, |ctx| {
            capability::fire_on_before_move(Slot::Ability, ctx)
                && capability::fire_on_before_move(Slot::Item, ctx)
        });
        if !proceed {
            return;
        }

        let defender_ident = self.ident(foe_side);
        self.logger.log_move(&ident, move_data.name, &defender_ident);

        let outcome = self.with_hook(foe_side, |ctx| {
            match capability::fire_on_try_hit(Slot::Ability, move_data, ctx) {
                TryHitOutcome::Continue => capability::fire_on_try_hit(Slot::Item, move_data, ctx),
                blocked => blocked,
            }
        });
        if outcome != TryHitOutcome::Continue {
            return;
        }

        let target_side =
            capability::redirect_target(foe_side, self.sides[foe_side].active(), move_data);
        let target_ident = self.ident(target_side);

        if let Some(base_accuracy) = move_data.accuracy {
            let (scale_num, scale_den) =
                capability::accuracy_scale(self.sides[side].active(), move_data.move_type);
            let attacker_stage = self.sides[side].active().accuracy_stage;
            let target_stage = self.sides[target_side].active().evasion_stage;
            let to_hit = base_accuracy as f64 * scale_num as f64 / scale_den as f64
                * accuracy_multiplier(attacker_stage) as f64
                / accuracy_multiplier(target_stage) as f64;
            if self.rng.gen_range(0.0..100.0) > to_hit {
                self.logger.log_miss(&ident, &target_ident);
                return;
            }
        }

        let weather = self.weather;
        let (low, high) = {
            let attacker = self.sides[side].active();
            let target = self.sides[target_side].active();
            let (attack, defense) = match move_data.category {
                MoveCategory::Physical => (
                    apply_stage_multiplier(attacker.stats.atk, attacker.stat_stages[STAGE_ATK]),
                    apply_stage_multiplier(target.stats.def, target.stat_stages[STAGE_DEF]),
                ),
                _ => (
                    apply_stage_multiplier(attacker.stats.spa, attacker.stat_stages[STAGE_SPA]),
                    apply_stage_multiplier(target.stats.spd, target.stat_stages[STAGE_SPD]),
                ),
            };
            let initial = initial_damage(attacker.level, move_data.power, attack, defense);
            damage_range(initial, attacker, target, move_data, false, weather)
        };
        let mut damage = self.rng.gen_range(low..=high);

        damage = capability::item_damage_modifier(
            self.sides[side].active(),
            true,
            move_data.move_type,
            damage,
        );
        damage = capability::item_damage_modifier(
            self.sides[target_side].active(),
            false,
            move_data.move_type,
            damage,
        );

        let screen = match move_data.category {
            MoveCategory::Physical => Some(ScreenKind::Reflect),
            MoveCategory::Special => Some(ScreenKind::LightScreen),
            MoveCategory::Status => None,
        };
        if let Some(kind) = screen {
            if self.sides[target_side].screen_active(kind) {
                damage /= 2;
            }
        }

        let dealt = damage.min(u16::MAX as u32) as u16;
        self.sides[target_side].active_mut().take_damage(dealt);
        let (hp, max_hp) = {
            let target = self.sides[target_side].active();
            (target.current_hp, target.max_hp())
        };
        self.logger.log_damage(&target_ident, hp, max_hp);

        let dealt = dealt as u32;
        self.with_hook(side, |ctx| {
            capability::fire_on_after_damage(Slot::Ability, move_data, dealt, false, ctx)
        });
        self.with_hook(target_side, |ctx| {
            capability::fire_on_after_damage(Slot::Ability, move_data, dealt, true, ctx)
        });
        self.with_hook(side, |ctx| {
            capability::fire_on_after_damage(Slot::Item, move_data, dealt, false, ctx)
        });
        self.with_hook(target_side, |ctx| {
            capability::fire_on_after_damage(Slot::Item, move_data, dealt, true, ctx)
        });

        if self.sides[target_side].active().is_fainted() {
            self.logger.log_faint(&target_ident);
        }
    }

    /// Burn, poison, toxic, sleep and freeze bookkeeping, side 1 first.
    fn apply_residuals(&mut self) {
        for side in 0..2 {
            let ident = self.ident(side);
            let Battle { sides, logger, rng, .. } = self;
            let active = sides[side].active_mut();
            if active.is_fainted() {
                continue;
            }
            match active.status {
                Some(Status::Burn) => {
                    let damage = (active.max_hp() / 16).max(1);
                    active.take_damage(damage);
                    logger.log_damage_from(&ident, active.current_hp, active.max_hp(), "brn");
                }
                Some(Status::Poison) => {
                    let damage = (active.max_hp() / 8).max(1);
                    active.take_damage(damage);
                    logger.log_damage_from(&ident, active.current_hp, active.max_hp(), "psn");
                }
                Some(Status::Toxic) => {
                    active.toxic_counter += 1;
                    let damage =
                        (active.max_hp() as u32 * active.toxic_counter as u32 / 16).max(1) as u16;
                    active.take_damage(damage);
                    logger.log_damage_from(&ident, active.current_hp, active.max_hp(), "psn");
                }
                Some(Status::Sleep) => {
                    if active.sleep_counter > 0 {
                        active.sleep_counter -= 1;
                    }
                    if active.sleep_counter == 0 {
                        active.clear_status();
                        logger.log_cure_status(&ident, "slp");
                    }
                }
                Some(Status::Freeze) => {
                    if rng.gen_bool(0.2) {
                        active.clear_status();
                        logger.log_cure_status(&ident, "frz");
                    }
                }
                Some(Status::Paralysis) | None => {}
            }
            if active.is_fainted() {
                logger.log_faint(&ident);
            }
        }
    }

    fn tick_weather(&mut self) {
        if self.weather_turns > 0 {
            self.weather_turns -= 1;
            if self.weather_turns == 0 && self.weather.take().is_some() {
                self.logger.log_weather_end();
            }
        }
    }

    fn tick_screens(&mut self) {
        for side in 0..2 {
            for kind in self.sides[side].tick_screens() {
                self.logger.log_side_end(side_label(side), kind.display_name());
            }
        }
    }

    fn refresh_phase(&mut self) {
        if self.sides.iter().any(Team::all_fainted) {
            self.phase = Phase::Ended;
        }
    }

    fn ident(&self, side: usize) -> String {
        showdown_ident(side, &self.sides[side].active().species)
    }

    /// Builds the hook view for `side`'s active: disjoint mutable borrows
    /// of both actives plus the shared field state.
    fn with_hook<R>(&mut self, side: usize, f: impl FnOnce(&mut HookContext<'_>) -> R) -> R {
        let idents = [self.ident(0), self.ident(1)];
        let Battle {
            sides,
            weather,
            weather_turns,
            logger,
            rng,
            ..
        } = self;
        let (left, right) = sides.split_at_mut(1);
        let (own, foe) = if side == 0 {
            (&mut left[0], &mut right[0])
        } else {
            (&mut right[0], &mut left[0])
        };
        let mut ctx = HookContext {
            owner: own.active_mut(),
            owner_ident: idents[side].as_str(),
            foe: foe.active_mut(),
            foe_ident: idents[1 - side].as_str(),
            weather,
            weather_turns,
            log: logger,
            rng,
        };
        f(&mut ctx)
    }
}

/// Stage-modified speed, quartered by paralysis. Only used for ordering;
/// the stored stat never changes.
fn ordering_speed(pokemon: &Pokemon) -> u32 {
    let mut speed = apply_stage_multiplier(pokemon.stats.spe, pokemon.stat_stages[STAGE_SPE]) as u32;
    if matches!(pokemon.status, Some(Status::Paralysis)) {
        speed /= 4;
    }
    speed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Dex;

    fn mon(species: &str, moves: &[&str]) -> Pokemon {
        let dex = Dex::gen3();
        let names: Vec<String> = moves.iter().map(|m| m.to_string()).collect();
        Pokemon::new(&dex, species, 100, [31; 6], [0; 6], &names, None, None)
            .expect("species exists")
    }

    fn duel(a: Pokemon, b: Pokemon) -> Battle {
        let team_a = Team::new(vec![a]).unwrap();
        let team_b = Team::new(vec![b]).unwrap();
        Battle::new(team_a, team_b, 0xBA77)
    }

    fn started(a: Pokemon, b: Pokemon) -> Battle {
        let mut battle = duel(a, b);
        battle.start().unwrap();
        battle
    }

    #[test]
    fn start_runs_once() {
        let mut battle = duel(mon("pikachu", &["Tackle"]), mon("snorlax", &["Tackle"]));
        battle.start().unwrap();
        assert!(battle.start().is_err());
        assert_eq!(battle.turn, 1);
    }

    #[test]
    fn play_turn_requires_a_started_battle() {
        let mut battle = duel(mon("pikachu", &["Tackle"]), mon("snorlax", &["Tackle"]));
        assert!(battle
            .play_turn(Action::Move(0), Action::Move(0))
            .is_err());
    }

    #[test]
    fn faster_side_acts_first() {
        let mut battle = started(
            mon("alakazam", &["Psychic"]),
            mon("snorlax", &["Body Slam"]),
        );
        let psychic = battle.sides[0].active().moves[0].data;
        let body_slam = battle.sides[1].active().moves[0].data;
        assert_eq!(battle.first_to_act(psychic, body_slam), 0);
    }

    #[test]
    fn priority_beats_raw_speed() {
        let mut battle = started(
            mon("snorlax", &["Quick Attack"]),
            mon("alakazam", &["Psychic"]),
        );
        let quick_attack = battle.sides[0].active().moves[0].data;
        let psychic = battle.sides[1].active().moves[0].data;
        assert_eq!(battle.first_to_act(quick_attack, psychic), 0);
    }

    #[test]
    fn side_two_wins_exact_ties() {
        let mut battle = started(mon("pikachu", &["Tackle"]), mon("pikachu", &["Tackle"]));
        let tackle_a = battle.sides[0].active().moves[0].data;
        let tackle_b = battle.sides[1].active().moves[0].data;
        assert_eq!(battle.first_to_act(tackle_a, tackle_b), 1);
    }

    #[test]
    fn paralysis_quarters_ordering_speed_only() {
        let mut fast = mon("alakazam", &[]);
        fast.set_status(Status::Paralysis).unwrap();
        let stored = fast.stats.spe;
        assert_eq!(ordering_speed(&fast), stored as u32 / 4);
        assert_eq!(fast.stats.spe, stored);

        let slow = mon("snorlax", &[]);
        assert!(ordering_speed(&fast) < ordering_speed(&slow) * 4);
    }

    #[test]
    fn toxic_counter_grows_each_residual() {
        let mut battle = started(mon("snorlax", &["Tackle"]), mon("snorlax", &["Tackle"]));
        let max_hp = battle.sides[1].active().max_hp();
        battle.sides[1].active_mut().set_status(Status::Toxic).unwrap();

        battle.apply_residuals();
        let after_first = battle.sides[1].active().current_hp;
        assert_eq!(after_first, max_hp - max_hp * 2 / 16);

        battle.apply_residuals();
        let after_second = battle.sides[1].active().current_hp;
        assert_eq!(after_second, after_first - max_hp * 3 / 16);
    }

    #[test]
    fn sleep_counts_down_and_wakes() {
        let mut battle = started(mon("snorlax", &["Tackle"]), mon("snorlax", &["Tackle"]));
        battle.sides[0].active_mut().set_status(Status::Sleep).unwrap();
        assert_eq!(battle.sides[0].active().sleep_counter, 2);

        battle.apply_residuals();
        assert_eq!(battle.sides[0].active().status, Some(Status::Sleep));

        battle.apply_residuals();
        assert_eq!(battle.sides[0].active().status, None);
        assert!(battle
            .logger
            .log_lines()
            .iter()
            .any(|l| l.contains("-curestatus") && l.contains("slp")));
    }

    #[test]
    fn burn_residual_is_a_sixteenth() {
        let mut battle = started(mon("snorlax", &["Tackle"]), mon("snorlax", &["Tackle"]));
        let max_hp = battle.sides[0].active().max_hp();
        battle.sides[0].active_mut().set_status(Status::Burn).unwrap();
        battle.apply_residuals();
        assert_eq!(
            battle.sides[0].active().current_hp,
            max_hp - (max_hp / 16).max(1)
        );
    }

    #[test]
    fn residual_faints_are_logged() {
        let mut battle = started(mon("snorlax", &["Tackle"]), mon("snorlax", &["Tackle"]));
        battle.sides[0].active_mut().current_hp = 5;
        battle.sides[0].active_mut().set_status(Status::Burn).unwrap();
        battle.apply_residuals();

        assert!(battle.sides[0].active().is_fainted());
        assert!(battle
            .logger
            .log_lines()
            .iter()
            .any(|l| l == "|faint|p1a: Snorlax"));
    }

    #[test]
    fn weather_expires_after_its_last_turn() {
        let mut battle = started(mon("snorlax", &["Tackle"]), mon("snorlax", &["Tackle"]));
        battle.weather = Some(Weather::Rain);
        battle.weather_turns = 2;

        battle.tick_weather();
        assert_eq!(battle.weather, Some(Weather::Rain));
        battle.tick_weather();
        assert_eq!(battle.weather, None);
        assert!(battle
            .logger
            .log_lines()
            .iter()
            .any(|l| l == "|-weather|none"));
    }

    #[test]
    fn trapped_combatants_cannot_switch() {
        let mut battle = {
            let team_a = Team::new(vec![mon("pikachu", &["Tackle"]), mon("snorlax", &["Tackle"])])
                .unwrap();
            let team_b = Team::new(vec![mon("snorlax", &["Tackle"])]).unwrap();
            Battle::new(team_a, team_b, 1)
        };
        battle.start().unwrap();
        battle.sides[0].active_mut().trapped = true;
        let err = battle
            .play_turn(Action::Switch(1), Action::Move(0))
            .unwrap_err();
        assert!(err.to_string().contains("trapped"));
    }

    #[test]
    fn replace_fainted_rejects_healthy_actives() {
        let team_a = Team::new(vec![mon("pikachu", &["Tackle"]), mon("snorlax", &["Tackle"])])
            .unwrap();
        let team_b = Team::new(vec![mon("snorlax", &["Tackle"])]).unwrap();
        let mut battle = Battle::new(team_a, team_b, 1);
        battle.start().unwrap();

        assert!(battle.replace_fainted(0, 1).is_err());

        battle.sides[0].active_mut().current_hp = 0;
        battle.replace_fainted(0, 1).unwrap();
        assert_eq!(battle.sides[0].active().species, "Snorlax");
    }
}
