//! Headless attract mode: plays one run with a scripted held direction and records the result.

use std::env;
use std::process::ExitCode;

use arcade_app::app_loop::{AppMode, AppState};
use arcade_app::best_scores_file::BestScoresFile;
use arcade_app::feedback::FeedbackRouter;
use arcade_app::input::GestureDecoder;
use arcade_app::launch::{generate_runtime_seed, parse_launch_args};
use arcade_app::settings_file::SettingsFile;
use arcade_app::{format_snapshot_hash, outcome_code};
use arcade_core::{Direction, GameId, Intent, new_session};

const FRAME_SECONDS: f32 = 1.0 / 60.0;
const MAX_FRAMES: u32 = 60 * 60 * 5;
const SCREEN_WIDTH: f32 = 390.0;
/// Frames the demo holds each direction before turning.
const TURN_FRAMES: u32 = 90;
const DEMO_PATTERN: [Direction; 4] =
    [Direction::Right, Direction::Up, Direction::Left, Direction::Down];

fn load_settings() -> SettingsFile {
    let Some(path) = SettingsFile::get_default_path() else {
        return SettingsFile::default();
    };
    SettingsFile::load_or_default(&path).unwrap_or_else(|err| {
        eprintln!("ignoring settings at {}: {err}", path.display());
        SettingsFile::default()
    })
}

fn load_best_scores() -> BestScoresFile {
    let Some(path) = BestScoresFile::get_default_path() else {
        return BestScoresFile::default();
    };
    BestScoresFile::load_or_default(&path).unwrap_or_else(|err| {
        eprintln!("ignoring best scores at {}: {err}", path.display());
        BestScoresFile::default()
    })
}

fn main() -> ExitCode {
    let args: Vec<String> = env::args().collect();
    let launch = match parse_launch_args(&args, generate_runtime_seed()) {
        Ok(launch) => launch,
        Err(err) => {
            eprintln!("{err}");
            return ExitCode::from(2);
        }
    };

    let settings = load_settings();
    let mut app = AppState::new(load_best_scores());
    let best = app.best_scores.best(launch.game);
    let (maze, climb) = (settings.maze.clone(), settings.climb.clone());
    let mut sim = new_session(launch.game, launch.seed.value(), best, maze, climb);
    let hold_repeat_seconds = match launch.game {
        GameId::GlyphRunner => settings.maze.hold_repeat_seconds,
        GameId::RivetClimb => settings.climb.hold_repeat_seconds,
    };
    let mut decoder = GestureDecoder::new(SCREEN_WIDTH, hold_repeat_seconds);
    let mut router = FeedbackRouter::new(&settings);

    // Resume out of the initial pause.
    app.frame(sim.as_mut(), 0.0, &[Intent::Pause], &mut router);
    let mut held = None;
    for frame in 0..MAX_FRAMES {
        let mut intents = Vec::new();
        let direction = DEMO_PATTERN[(frame / TURN_FRAMES) as usize % DEMO_PATTERN.len()];
        if held != Some(direction) {
            if let Some(previous) = held {
                decoder.key_up(previous);
            }
            intents.push(decoder.key_down(direction));
            held = Some(direction);
        }
        intents.extend(decoder.update(FRAME_SECONDS));
        app.frame(sim.as_mut(), FRAME_SECONDS, &intents, &mut router);
        router.drain();
        if matches!(app.mode, AppMode::Finished(_)) {
            break;
        }
    }

    if app.best_score_changed
        && let Some(path) = BestScoresFile::get_default_path()
        && let Err(err) = app.best_scores.write_atomic(&path)
    {
        eprintln!("could not save best scores to {}: {err}", path.display());
    }

    let outcome = match &app.mode {
        AppMode::Finished(outcome) => outcome_code(outcome),
        AppMode::Paused | AppMode::Playing => "IN_PROGRESS",
    };
    println!("game={}", launch.game.as_str());
    println!("seed={}", launch.seed.value());
    println!("tick={}", sim.current_tick());
    println!("score={}", sim.score());
    println!("level={}", sim.level());
    println!("outcome={outcome}");
    println!("snapshot_hash={}", format_snapshot_hash(sim.snapshot_hash()));
    ExitCode::SUCCESS
}
