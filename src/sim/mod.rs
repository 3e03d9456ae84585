//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay pure and
//! deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod director;
pub mod player;
pub mod world;

pub use director::{GAME_OVER_TEXT, GamePhase, SpawnDirector};
pub use player::PlayerAvoider;
pub use world::{Body, BodyKey, BodyKind, ObstacleTemplate, World};
