use anyhow::{Context, Result, anyhow, bail};
use arcade_core::{
    AdvanceStopReason, ClimbTuning, Direction, GameId, Intent, MazeTuning, NullSink, RunOutcome,
    TapZone, new_session,
};
use clap::{Parser, ValueEnum};
use rand_chacha::{
    ChaCha8Rng,
    rand_core::{Rng, SeedableRng},
};
use serde::Serialize;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum GameArg {
    GlyphRunner,
    RivetClimb,
}

impl From<GameArg> for GameId {
    fn from(game: GameArg) -> Self {
        match game {
            GameArg::GlyphRunner => GameId::GlyphRunner,
            GameArg::RivetClimb => GameId::RivetClimb,
        }
    }
}

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Which game to simulate
    #[arg(short, long, value_enum, default_value_t = GameArg::GlyphRunner)]
    game: GameArg,
    #[arg(short, long, default_value_t = 42)]
    seed: u64,
    /// Upper bound on simulated ticks
    #[arg(short, long, default_value_t = 3600)]
    ticks: u32,
    /// Seed for the random intent stream; defaults to the game seed
    #[arg(long)]
    input_seed: Option<u64>,
    /// Print the summary as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
struct RunSummary {
    game: &'static str,
    seed: u64,
    tick: u64,
    score: u64,
    lives: u8,
    level: u32,
    outcome: String,
    snapshot_hash: String,
}

const INTENTS: [Intent; 6] = [
    Intent::Move(Direction::Up),
    Intent::Move(Direction::Down),
    Intent::Move(Direction::Left),
    Intent::Move(Direction::Right),
    Intent::Tap(TapZone::LeftHalf),
    Intent::Tap(TapZone::RightHalf),
];

fn main() -> Result<()> {
    let args = Args::parse();
    if args.ticks == 0 {
        bail!("--ticks must be at least 1");
    }
    let game = GameId::from(args.game);
    let mut sim = new_session(game, args.seed, 0, MazeTuning::default(), ClimbTuning::default());
    let mut inputs = ChaCha8Rng::seed_from_u64(args.input_seed.unwrap_or(args.seed));

    let mut outcome = None;
    let mut total_ticks = 0;
    while total_ticks < args.ticks {
        // Roughly one fresh intent every quarter second of play.
        let intent = INTENTS[inputs.next_u64() as usize % INTENTS.len()];
        sim.apply_intent(intent)
            .map_err(|err| anyhow!("run rejected an intent before it finished: {err:?}"))?;
        let result = sim.advance(15.min(args.ticks - total_ticks), &mut NullSink);
        total_ticks += result.simulated_ticks;
        if let AdvanceStopReason::Finished(finished) = result.stop_reason {
            outcome = Some(finished);
            break;
        }
    }

    let summary = RunSummary {
        game: game.as_str(),
        seed: args.seed,
        tick: sim.current_tick(),
        score: sim.score(),
        lives: sim.lives(),
        level: sim.level(),
        outcome: match outcome {
            Some(RunOutcome::LivesExhausted { .. }) => "lives_exhausted".to_string(),
            None => "in_progress".to_string(),
        },
        snapshot_hash: format!("0x{:016x}", sim.snapshot_hash()),
    };

    if args.json {
        let json =
            serde_json::to_string_pretty(&summary).context("Failed to serialize run summary")?;
        println!("{json}");
        return Ok(());
    }
    println!("Run complete.");
    println!("Game: {}", summary.game);
    println!("Tick: {}", summary.tick);
    println!("Score: {}", summary.score);
    println!("Lives: {}", summary.lives);
    println!("Level: {}", summary.level);
    println!("Outcome: {}", summary.outcome);
    println!("Snapshot Hash: {}", summary.snapshot_hash);
    Ok(())
}
