use anyhow::{Result, anyhow, ensure};
use arcade_core::{
    AdvanceStopReason, ClimbGame, ClimbTuning, Direction, Intent, MazeGame, MazeTuning, NullSink,
    Simulation, TapZone,
};
use clap::Parser;
use rand_chacha::{
    ChaCha8Rng,
    rand_core::{Rng, SeedableRng},
};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// First seed of the sweep
    #[arg(short, long, default_value_t = 42)]
    seed: u64,
    /// Number of consecutive seeds per game
    #[arg(short, long, default_value_t = 25)]
    runs: u64,
    #[arg(short, long, default_value_t = 3000)]
    ticks: u32,
}

const INTENTS: [Intent; 6] = [
    Intent::Move(Direction::Up),
    Intent::Move(Direction::Down),
    Intent::Move(Direction::Left),
    Intent::Move(Direction::Right),
    Intent::Tap(TapZone::LeftHalf),
    Intent::Tap(TapZone::RightHalf),
];

fn choose<T: Copy>(rng: &mut ChaCha8Rng, slice: &[T]) -> T {
    slice[rng.next_u64() as usize % slice.len()]
}

/// Feeds random intents in random-sized chunks, checking `check` after every chunk.
fn drive<S: Simulation>(
    sim: &mut S,
    input_seed: u64,
    max_ticks: u32,
    check: impl Fn(&S) -> Result<()>,
) -> Result<u32> {
    let mut rng = ChaCha8Rng::seed_from_u64(input_seed);
    let mut total_ticks = 0;
    let mut last_score = 0;
    while total_ticks < max_ticks {
        if rng.next_u64() % 2 == 0 {
            sim.apply_intent(choose(&mut rng, &INTENTS))
                .map_err(|err| anyhow!("intent rejected mid-run: {err:?}"))?;
        }
        let budget = 1 + (rng.next_u64() % 20) as u32;
        let result = sim.advance(budget, &mut NullSink);
        total_ticks += result.simulated_ticks;

        ensure!(sim.score() >= last_score, "Invariant failed: score decreased");
        last_score = sim.score();
        check(sim)?;
        if let AdvanceStopReason::Finished(_) = result.stop_reason {
            ensure!(sim.lives() == 0, "Invariant failed: finished with lives left");
            break;
        }
    }
    Ok(total_ticks)
}

fn check_maze(game: &MazeGame) -> Result<()> {
    let map = game.map();
    ensure!(map.is_walkable(game.runner().cell()), "Invariant failed: runner inside a wall");
    for enemy in game.enemies() {
        ensure!(map.is_walkable(enemy.cell()), "Invariant failed: pursuer inside a wall");
        let progress = enemy.motion.progress();
        ensure!((0.0..=1.0).contains(&progress), "Invariant failed: progress out of range");
    }
    ensure!(game.lives() <= MazeTuning::default().max_lives, "Invariant failed: lives over cap");
    Ok(())
}

fn check_climb(game: &ClimbGame) -> Result<()> {
    let map = game.map();
    ensure!(map.in_bounds(game.climber().cell()), "Invariant failed: climber left the grid");
    for obstacle in game.obstacles() {
        ensure!(!obstacle.is_off_grid(map), "Invariant failed: off-grid obstacle kept");
    }
    let cap = ClimbTuning::default().max_obstacles;
    ensure!(game.obstacles().count() <= cap, "Invariant failed: obstacle cap exceeded");
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();

    println!(
        "Starting fuzz sweep over {} seeds from {} for max {} ticks...",
        args.runs, args.seed, args.ticks
    );
    for seed in args.seed..args.seed.saturating_add(args.runs) {
        let mut maze = MazeGame::new(seed, 0, MazeTuning::default());
        let ticks = drive(&mut maze, seed ^ 0xA5A5, args.ticks, check_maze)?;
        println!("glyphRunner seed {seed}: {ticks} ticks, score {}", maze.score());

        let mut climb = ClimbGame::new(seed, 0, ClimbTuning::default());
        let ticks = drive(&mut climb, seed ^ 0x5A5A, args.ticks, check_climb)?;
        println!("rivetClimb seed {seed}: {ticks} ticks, score {}", climb.score());
    }

    println!("Fuzzing completed successfully.");
    Ok(())
}
