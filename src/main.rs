//! Drop Dodge entry point
//!
//! Headless demo: the self-playing pilot dodges falling bodies while the HUD
//! is logged once per survived second. After the first run ends, a restart is
//! driven through the same edge-triggered path a front end would use, so the
//! full teardown/rebuild cycle sees real use.

use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use drop_dodge::app::App;
use drop_dodge::config::GameConfig;
use drop_dodge::input::{FrameInput, dodge_axis};
use drop_dodge::scores::BestTimes;

const CONFIG_PATH: &str = "drop_dodge_config.json";
const SCORES_PATH: &str = "drop_dodge_scores.json";

/// Simulated frame cadence of the demo (60 fps worth of time per frame)
const FRAME_DT: f32 = 1.0 / 60.0;
/// Cap per run so a lucky pilot cannot spin forever
const MAX_RUN_SECONDS: f32 = 120.0;

fn main() {
    env_logger::init();

    let config = GameConfig::load_or_default(Path::new(CONFIG_PATH));
    let seed = time_seed();
    let mut app = match App::new(config, seed) {
        Ok(app) => app,
        Err(err) => {
            for violation in &err.violations {
                log::error!("{violation}");
            }
            log::error!("Configuration invalid, not starting");
            std::process::exit(1);
        }
    };
    app.best = BestTimes::load_or_default(Path::new(SCORES_PATH));
    log::info!("Starting with seed {seed}");

    run_until_game_over(&mut app);

    // One press of R: full teardown, fresh spawn sequence.
    app.frame(FRAME_DT, &FrameInput {
        axis: 0.0,
        restart: true,
    });
    run_until_game_over(&mut app);

    if let Some(best) = app.best.top() {
        log::info!("Best survival: {:.1}s (seed {})", best.seconds, best.seed);
    }
    app.best.save(Path::new(SCORES_PATH));
}

fn run_until_game_over(app: &mut App) {
    let (player_y, min_x, max_x) = {
        let config = app.config();
        (config.player_y, config.min_x, config.max_x)
    };

    let mut input = FrameInput::default();
    let mut last_logged = -1;
    while !app.is_game_over() && app.survival_time() < MAX_RUN_SECONDS {
        input.axis = dodge_axis(
            app.player_x(),
            player_y,
            min_x,
            max_x,
            &app.obstacle_positions(),
        );
        app.frame(FRAME_DT, &input);

        let second = app.survival_time() as i32;
        if second > last_logged {
            log::info!("{}", app.score_line());
            last_logged = second;
        }
    }

    if let Some(banner) = app.banner_text() {
        for line in banner.lines() {
            log::info!("{line}");
        }
    }
    log::info!("Final {}", app.score_line());
}

fn time_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
