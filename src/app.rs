//! Game-loop driver
//!
//! Owns the run aggregate and the frame cadence: a variable-rate frame tick
//! feeding a fixed-timestep physics accumulator, then exactly one director
//! tick per frame after the physics pass. Within a frame that order
//! guarantees the score and pruning observe any game-over raised by this
//! frame's contacts, and that input sampled this frame is consumed by the
//! next physics step.

use glam::Vec2;

use crate::config::{ConfigError, GameConfig};
use crate::consts::{MAX_FRAME_DT, MAX_SUBSTEPS, SIM_DT};
use crate::hud::{Hud, TextId};
use crate::input::InputSource;
use crate::scores::BestTimes;
use crate::sim::{
    Body, BodyKind, GamePhase, ObstacleTemplate, PlayerAvoider, SpawnDirector, World,
};

/// Seed increment between restarts (the 64-bit golden ratio): every run gets
/// its own spawn sequence while the whole session stays reproducible from
/// the first seed.
const RESEED: u64 = 0x9E37_79B9_7F4A_7C15;

/// Everything a single run owns. Restart drops it wholesale and rebuilds
/// from configuration.
#[derive(Debug)]
struct Run {
    hud: Hud,
    world: World,
    director: SpawnDirector,
    avoider: PlayerAvoider,
    score_text: TextId,
    banner: TextId,
    last_phase: GamePhase,
}

impl Run {
    fn build(config: &GameConfig, seed: u64) -> Result<Run, ConfigError> {
        let mut hud = Hud::new();
        let score_text = hud.create_text("");
        let banner = hud.create_text("");

        let mut world = World::new();
        let player = world.spawn(Body {
            kind: BodyKind::Player,
            pos: Vec2::new(0.0, config.player_y),
            vel: Vec2::ZERO,
            radius: config.player_radius,
        });

        let template = ObstacleTemplate {
            radius: config.obstacle_radius,
            fall_speed: config.fall_speed,
        };
        let director = SpawnDirector::new(config.clone(), template, score_text, banner, &mut hud, seed);
        let avoider = PlayerAvoider::new(config.clone(), player, &world);

        match (director, avoider) {
            (Ok(director), Ok(avoider)) => Ok(Run {
                hud,
                world,
                director,
                avoider,
                score_text,
                banner,
                last_phase: GamePhase::Running,
            }),
            (director, avoider) => Err(ConfigError::merge(director.err(), avoider.err())),
        }
    }
}

/// The game aggregate plus its loop state
#[derive(Debug)]
pub struct App {
    config: GameConfig,
    seed: u64,
    accumulator: f32,
    /// Best survival times across runs; the driver loads and saves it
    pub best: BestTimes,
    run: Run,
}

impl App {
    /// Validate the configuration and build the first run.
    ///
    /// `Err` carries every violation from every component; the caller is
    /// expected to log them and decline to run.
    pub fn new(config: GameConfig, seed: u64) -> Result<Self, ConfigError> {
        let run = Run::build(&config, seed)?;
        Ok(Self {
            config,
            seed,
            accumulator: 0.0,
            best: BestTimes::new(),
            run,
        })
    }

    /// Tear down the current run and rebuild everything from configuration.
    pub fn restart(&mut self, seed: u64) {
        match Run::build(&self.config, seed) {
            Ok(run) => {
                self.run = run;
                self.seed = seed;
                self.accumulator = 0.0;
                log::info!("Restarted with seed {seed}");
            }
            // Config is immutable after the initial validation, so this arm
            // is unreachable in practice.
            Err(err) => log::error!("Restart rejected: {err}"),
        }
    }

    /// Advance one rendered frame.
    ///
    /// Order within the frame: restart edge check, input sampling, up to
    /// `MAX_SUBSTEPS` fixed physics steps (paddle movement, descent, contact
    /// delivery), then one director tick (score and pruning).
    pub fn frame(&mut self, dt: f32, input: &impl InputSource) {
        if input.restart_pressed() {
            self.restart(self.seed.wrapping_add(RESEED));
            return;
        }

        self.run.avoider.sample_input(input.horizontal_axis());

        let dt = dt.min(MAX_FRAME_DT);
        self.accumulator += dt;
        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            self.run.avoider.fixed_step(SIM_DT, &mut self.run.world);
            self.run.world.step(SIM_DT);
            for (_key, kind) in self.run.world.contacts_with(self.run.avoider.body()) {
                self.run
                    .avoider
                    .handle_contact(kind, &mut self.run.director, &mut self.run.hud);
            }
            self.accumulator -= SIM_DT;
            substeps += 1;
        }

        self.run
            .director
            .tick(dt, &mut self.run.world, &mut self.run.hud);

        // Record the survival on the frame the run ends.
        let phase = self.run.director.phase();
        if phase == GamePhase::GameOver && self.run.last_phase == GamePhase::Running {
            let survived = self.run.director.elapsed();
            match self.best.record(survived, self.seed) {
                Some(rank) => log::info!("Run over after {survived:.1}s (best-times rank {rank})"),
                None => log::info!("Run over after {survived:.1}s"),
            }
        }
        self.run.last_phase = phase;
    }

    pub fn is_game_over(&self) -> bool {
        self.run.director.is_game_over()
    }

    /// Survival time of the current run in seconds
    pub fn survival_time(&self) -> f32 {
        self.run.director.elapsed()
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Current paddle x position
    pub fn player_x(&self) -> f32 {
        self.run
            .world
            .position_of(self.run.avoider.body())
            .map(|pos| pos.x)
            .unwrap_or_default()
    }

    /// Positions of every falling body currently in the world
    pub fn obstacle_positions(&self) -> Vec<Vec2> {
        self.run
            .world
            .iter()
            .filter(|(_, body)| body.kind == BodyKind::FallingObject)
            .map(|(_, body)| body.pos)
            .collect()
    }

    /// The score line as the display shows it
    pub fn score_line(&self) -> &str {
        self.run.hud.text(self.run.score_text).unwrap_or("")
    }

    /// The game-over banner, if it is currently shown
    pub fn banner_text(&self) -> Option<&str> {
        if self.run.hud.is_visible(self.run.banner) {
            self.run.hud.text(self.run.banner)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigViolation;
    use crate::input::FrameInput;

    /// Band collapsed to a single column so every spawn falls straight onto
    /// the stationary paddle.
    fn collision_course_config() -> GameConfig {
        GameConfig {
            min_x: 0.0,
            max_x: 0.0,
            ..GameConfig::default()
        }
    }

    fn run_seconds(app: &mut App, input: &FrameInput, seconds: f32) {
        let frames = (seconds / 0.02).ceil() as usize;
        for _ in 0..frames {
            app.frame(0.02, input);
        }
    }

    #[test]
    fn test_invalid_config_reports_from_both_components() {
        let config = GameConfig {
            spawn_interval: -1.0,
            min_x: 5.0,
            max_x: -5.0,
            ..GameConfig::default()
        };
        let err = App::new(config, 1).unwrap_err();
        // Director: interval + band. Avoider: band again, independently.
        assert_eq!(err.violations.len(), 3);
        let band_reports = err
            .violations
            .iter()
            .filter(|v| matches!(v, ConfigViolation::InvertedBand { .. }))
            .count();
        assert_eq!(band_reports, 2);
    }

    #[test]
    fn test_survival_time_tracks_frames() {
        let mut app = App::new(GameConfig::default(), 11).unwrap();
        let input = FrameInput::default();
        run_seconds(&mut app, &input, 0.5);
        assert!((app.survival_time() - 0.5).abs() < 0.03);
        assert!(!app.is_game_over());
    }

    #[test]
    fn test_stationary_paddle_eventually_loses() {
        let mut app = App::new(collision_course_config(), 11).unwrap();
        let input = FrameInput::default();

        // First body spawns at t=1 at y=6 and falls at 6 u/s straight down
        // column 0; the paddle sits at (0, -4.5). Four seconds is plenty.
        run_seconds(&mut app, &input, 4.0);
        assert!(app.is_game_over());
        assert!(app.survival_time() > 1.0);
        assert_eq!(
            app.banner_text(),
            Some("Game Over\nPress R to Restart")
        );
        assert!(!app.best.is_empty());
    }

    #[test]
    fn test_no_spawns_after_game_over_and_world_drains() {
        let mut app = App::new(collision_course_config(), 11).unwrap();
        let input = FrameInput::default();
        run_seconds(&mut app, &input, 4.0);
        assert!(app.is_game_over());

        // Leftover bodies keep falling and get pruned; nothing new appears.
        run_seconds(&mut app, &input, 5.0);
        assert!(app.obstacle_positions().is_empty());
    }

    #[test]
    fn test_score_freezes_at_game_over() {
        let mut app = App::new(collision_course_config(), 11).unwrap();
        let input = FrameInput::default();
        run_seconds(&mut app, &input, 4.0);

        let frozen = app.survival_time();
        let line = app.score_line().to_owned();
        run_seconds(&mut app, &input, 1.0);
        assert_eq!(app.survival_time(), frozen);
        assert_eq!(app.score_line(), line);
    }

    #[test]
    fn test_restart_rebuilds_the_run() {
        let mut app = App::new(collision_course_config(), 11).unwrap();
        let input = FrameInput::default();
        run_seconds(&mut app, &input, 4.0);
        assert!(app.is_game_over());
        let old_seed = app.seed();

        app.frame(0.02, &FrameInput {
            axis: 0.0,
            restart: true,
        });
        assert!(!app.is_game_over());
        assert_eq!(app.survival_time(), 0.0);
        assert_eq!(app.score_line(), "Score: 0.0");
        assert_eq!(app.banner_text(), None);
        assert!(app.obstacle_positions().is_empty());
        assert_ne!(app.seed(), old_seed);

        // The new run is live again.
        run_seconds(&mut app, &input, 0.5);
        assert!((app.survival_time() - 0.5).abs() < 0.03);
    }

    #[test]
    fn test_dodging_pilot_outlives_the_stationary_one() {
        let config = collision_course_config();
        let mut still = App::new(config.clone(), 42).unwrap();
        run_seconds(&mut still, &FrameInput::default(), 10.0);
        let still_time = still.survival_time();

        // Hold the axis hard left; column 0 can never be hit from x=-7.
        let mut dodger = App::new(config, 42).unwrap();
        run_seconds(
            &mut dodger,
            &FrameInput {
                axis: -1.0,
                restart: false,
            },
            10.0,
        );
        assert!(still.is_game_over());
        assert!(!dodger.is_game_over());
        assert!(dodger.survival_time() > still_time);
    }
}
