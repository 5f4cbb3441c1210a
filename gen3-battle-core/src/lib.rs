//! Deterministic Gen 3 battle engine.
//!
//! Two single-active sides fight under the Ruby/Sapphire rules carried
//! by the [`data`] catalog: the classic damage formula with its 217..255
//! roll window, stat stages, major statuses, entry hazards, screens and
//! weather. Abilities and held items are one capability type driven by
//! declarative hook records, interpreted in [`sim::capability`].
//!
//! Battles are reproducible: all randomness flows from the seed handed
//! to [`engine::BattleEngine::new`], and the transcript for a seed never
//! changes.

pub mod battle_logger;
pub mod data;
pub mod engine;
pub mod sim;

/// The handful of types most callers need.
pub mod prelude {
    pub use crate::data::Dex;
    pub use crate::engine::{BattleEngine, BattleResult, Player, StepResult};
    pub use crate::sim::battle::{Action, Battle, Weather};
    pub use crate::sim::{Pokemon, Status, Team};
}
