//! Spawn scheduling, survival scoring, and the game-over latch
//!
//! The director owns the repeating spawn timer, tracks every falling body it
//! has created, accrues survival time into the score display, and holds the
//! run's single one-way state transition.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::world::{BodyKey, ObstacleTemplate, World};
use crate::config::{ConfigError, ConfigViolation, GameConfig};
use crate::hud::{Hud, TextId};

/// Run phase. The only transition is `Running -> GameOver`; the way back is
/// a full restart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    Running,
    GameOver,
}

/// Fixed banner shown when the run ends
pub const GAME_OVER_TEXT: &str = "Game Over\nPress R to Restart";

#[derive(Debug)]
pub struct SpawnDirector {
    config: GameConfig,
    template: ObstacleTemplate,
    score_text: TextId,
    banner: TextId,
    rng: Pcg32,
    phase: GamePhase,
    elapsed: f32,
    spawn_timer: f32,
    live: Vec<BodyKey>,
}

impl SpawnDirector {
    /// Validate the setup and build the director.
    ///
    /// Every check runs; all violations come back in one report, and the
    /// caller is expected to fail closed on `Err` rather than construct a
    /// half-working director.
    pub fn new(
        config: GameConfig,
        template: ObstacleTemplate,
        score_text: TextId,
        banner: TextId,
        hud: &mut Hud,
        seed: u64,
    ) -> Result<Self, ConfigError> {
        let mut violations = Vec::new();
        if !(config.spawn_interval > 0.0) {
            violations.push(ConfigViolation::NonPositiveSpawnInterval(
                config.spawn_interval,
            ));
        }
        if config.min_x > config.max_x {
            violations.push(ConfigViolation::InvertedBand {
                min_x: config.min_x,
                max_x: config.max_x,
            });
        }
        if config.spawn_y <= config.destroy_y {
            violations.push(ConfigViolation::SpawnBelowDestroyLine {
                spawn_y: config.spawn_y,
                destroy_y: config.destroy_y,
            });
        }
        if !(template.fall_speed > 0.0) {
            violations.push(ConfigViolation::NonPositiveFallSpeed(template.fall_speed));
        }
        if !(template.radius > 0.0) {
            violations.push(ConfigViolation::NonPositiveObstacleRadius(template.radius));
        }
        if !hud.contains(score_text) {
            violations.push(ConfigViolation::MissingScoreDisplay);
        }
        if !hud.contains(banner) {
            violations.push(ConfigViolation::MissingGameOverDisplay);
        }
        if !violations.is_empty() {
            return Err(ConfigError::new(violations));
        }

        hud.set_text(score_text, format_score(0.0));
        hud.set_text(banner, GAME_OVER_TEXT);
        hud.set_visible(banner, false);

        Ok(Self {
            config,
            template,
            score_text,
            banner,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Running,
            elapsed: 0.0,
            spawn_timer: 0.0,
            live: Vec::new(),
        })
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// Survival time in seconds; frozen once the run ends
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// Keys of the falling bodies currently tracked
    pub fn tracked(&self) -> &[BodyKey] {
        &self.live
    }

    /// Per-frame update.
    ///
    /// While running: accrue survival time, refresh the score display, and
    /// fire the spawn timer once per elapsed interval. Pruning runs
    /// regardless of phase so bodies keep draining after the run ends.
    pub fn tick(&mut self, dt: f32, world: &mut World, hud: &mut Hud) {
        if self.phase == GamePhase::Running {
            self.elapsed += dt;
            hud.set_text(self.score_text, format_score(self.elapsed));

            self.spawn_timer += dt;
            while self.spawn_timer >= self.config.spawn_interval {
                self.spawn_timer -= self.config.spawn_interval;
                self.spawn(world);
            }
        }

        self.prune(world);
    }

    /// Spawn one falling body at a random column along the band.
    ///
    /// The column is drawn from the inclusive range `min_x..=max_x`: the
    /// band's upper edge is a legal spawn column, not an open bound.
    /// A no-op once the run is over.
    pub fn spawn(&mut self, world: &mut World) {
        if self.phase == GamePhase::GameOver {
            return;
        }
        let x = self.rng.random_range(self.config.min_x..=self.config.max_x);
        let body = self
            .template
            .instantiate(Vec2::new(x, self.config.spawn_y));
        self.live.push(world.spawn(body));
    }

    /// Latch the run into game over and show the banner. Safe to call any
    /// number of times; only the first call has an effect.
    pub fn game_over(&mut self, hud: &mut Hud) {
        if self.phase == GamePhase::GameOver {
            return;
        }
        self.phase = GamePhase::GameOver;
        hud.set_visible(self.banner, true);
    }

    /// Drop vanished bodies and destroy any that fell past the floor line.
    ///
    /// Walks the list in reverse index order so removal never skips or
    /// double-processes an entry.
    fn prune(&mut self, world: &mut World) {
        for i in (0..self.live.len()).rev() {
            let key = self.live[i];
            match world.position_of(key) {
                None => {
                    // Destroyed by someone else; just stop tracking it.
                    self.live.remove(i);
                }
                Some(pos) if pos.y < self.config.destroy_y => {
                    world.despawn(key);
                    self.live.remove(i);
                }
                Some(_) => {}
            }
        }
    }
}

fn format_score(elapsed: f32) -> String {
    format!("Score: {elapsed:.1}")
}
