//! Battle simulation: combatants, teams, the damage formula, capability
//! hooks and the turn machine.

pub mod battle;
pub mod capability;
pub mod damage;
pub mod pokemon;
pub mod stats;
pub mod team;

pub use pokemon::{Pokemon, Status};
pub use team::Team;
