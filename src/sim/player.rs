//! Player paddle control
//!
//! One horizontal degree of freedom. The frame loop samples an axis signal
//! once per frame; the physics step consumes it at the fixed timestep, so
//! paddle speed never depends on frame rate. On contact with a falling body
//! the avoider hands the run over to the director's game-over latch.

use super::director::SpawnDirector;
use super::world::{BodyKey, BodyKind, World};
use crate::config::{ConfigError, ConfigViolation, GameConfig};
use crate::hud::Hud;

#[derive(Debug)]
pub struct PlayerAvoider {
    config: GameConfig,
    body: BodyKey,
    signal: f32,
}

impl PlayerAvoider {
    /// Validate the setup and build the avoider.
    ///
    /// Same aggregated, fail-closed reporting as the director: every check
    /// runs, every violation is returned.
    pub fn new(config: GameConfig, body: BodyKey, world: &World) -> Result<Self, ConfigError> {
        let mut violations = Vec::new();
        if config.min_x > config.max_x {
            violations.push(ConfigViolation::InvertedBand {
                min_x: config.min_x,
                max_x: config.max_x,
            });
        }
        if !(config.move_speed > 0.0) {
            violations.push(ConfigViolation::NonPositiveMoveSpeed(config.move_speed));
        }
        if !(config.player_radius > 0.0) {
            violations.push(ConfigViolation::NonPositivePlayerRadius(
                config.player_radius,
            ));
        }
        if !world.contains(body) {
            violations.push(ConfigViolation::MissingPlayerBody);
        }
        if !violations.is_empty() {
            return Err(ConfigError::new(violations));
        }

        Ok(Self {
            config,
            body,
            signal: 0.0,
        })
    }

    /// Handle of the paddle body
    pub fn body(&self) -> BodyKey {
        self.body
    }

    /// The stored axis signal
    pub fn signal(&self) -> f32 {
        self.signal
    }

    /// Store the frame's axis sample, clamped to [-1, 1]. Not acted on
    /// until the next physics step.
    pub fn sample_input(&mut self, axis: f32) {
        self.signal = axis.clamp(-1.0, 1.0);
    }

    /// Advance one physics step: clamped linear translation along the band.
    ///
    /// `dt` must be the fixed physics step, not the frame delta. The
    /// vertical coordinate is left untouched, and positions already inside
    /// the band pass through the clamp exactly.
    pub fn fixed_step(&mut self, dt: f32, world: &mut World) {
        let Some(body) = world.get_mut(self.body) else {
            return;
        };
        let next_x = (body.pos.x + self.signal * self.config.move_speed * dt)
            .clamp(self.config.min_x, self.config.max_x);
        body.pos.x = next_x;
    }

    /// Contact callback: a falling body ends the run. Repeat contacts are
    /// absorbed by the director's idempotent latch.
    pub fn handle_contact(&self, kind: BodyKind, director: &mut SpawnDirector, hud: &mut Hud) {
        if kind == BodyKind::FallingObject {
            director.game_over(hud);
        }
    }
}
