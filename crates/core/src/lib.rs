pub mod ai;
pub mod climb;
pub mod climber;
pub mod clock;
pub mod collision;
pub mod config;
pub mod difficulty;
pub mod enemy;
pub mod events;
pub mod grid;
pub mod maze;
pub mod motion;
pub mod obstacle;
pub mod rng;
pub mod score;
pub mod sim;
pub mod types;

#[cfg(test)]
mod test_support;

pub use climb::ClimbGame;
pub use config::{ClimbTuning, MazeTuning};
pub use events::{EventSink, GameEvent, HapticKind, LogEvent, NullSink, SoundKind};
pub use maze::MazeGame;
pub use sim::Simulation;
pub use types::*;

/// Starts a fresh run of `game` behind the common simulation surface.
pub fn new_session(
    game: GameId,
    seed: u64,
    best_score: u64,
    maze: MazeTuning,
    climb: ClimbTuning,
) -> Box<dyn Simulation> {
    match game {
        GameId::GlyphRunner => Box::new(MazeGame::new(seed, best_score, maze)),
        GameId::RivetClimb => Box::new(ClimbGame::new(seed, best_score, climb)),
    }
}
