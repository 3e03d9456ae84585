//! Drop Dodge - a falling-object dodging arcade game
//!
//! Core modules:
//! - `sim`: deterministic simulation (body arena, spawning, scoring, game over)
//! - `app`: explicit game-loop driver (fixed-timestep physics, per-frame scoring)
//! - `config`: validated, serde-backed tuning values
//! - `hud`: text display sink consumed by whatever front end drives the game
//! - `input`: input-source boundary plus the self-playing demo pilot
//! - `scores`: best-survival-times table

pub mod app;
pub mod config;
pub mod hud;
pub mod input;
pub mod scores;
pub mod sim;

pub use app::App;
pub use config::{ConfigError, ConfigViolation, GameConfig};
pub use scores::BestTimes;

/// Game loop constants
pub mod consts {
    /// Fixed physics timestep (50 Hz)
    pub const SIM_DT: f32 = 0.02;
    /// Maximum physics substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest frame delta the loop will honor; slower frames are clamped
    pub const MAX_FRAME_DT: f32 = 0.1;
}
