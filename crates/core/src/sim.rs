//! The surface every game scene exposes to a host loop.

use crate::events::{EventSink, LogEvent};
use crate::types::{AdvanceResult, GameError, GameId, Intent};

pub trait Simulation {
    fn game_id(&self) -> GameId;

    /// Feeds one decoded intent. Invalid moves are silently ignored; only a finished run is
    /// reported back.
    fn apply_intent(&mut self, intent: Intent) -> Result<(), GameError>;

    /// Runs up to `max_ticks` fixed ticks, stopping early on a pause boundary or a finished run.
    fn advance(&mut self, max_ticks: u32, sink: &mut dyn EventSink) -> AdvanceResult;

    /// Honored at the start of the next tick boundary.
    fn request_pause(&mut self);

    fn score(&self) -> u64;
    fn lives(&self) -> u8;
    fn level(&self) -> u32;
    fn current_tick(&self) -> u64;
    fn snapshot_hash(&self) -> u64;
    fn log(&self) -> &[LogEvent];
}
