use arcade_core::clock::FrameClock;
use arcade_core::{AdvanceStopReason, EventSink, GameEvent, Intent, RunOutcome, Simulation};

use crate::best_scores_file::BestScoresFile;

#[derive(Debug, PartialEq, Eq, Default)]
pub enum AppMode {
    #[default]
    Paused,
    Playing,
    Finished(RunOutcome),
}

/// Drives one session frame by frame: decoded intents in, fixed ticks out.
#[derive(Debug, Default)]
pub struct AppState {
    pub mode: AppMode,
    pub best_scores: BestScoresFile,
    /// Set on the frame a finished run beat the stored best; the caller persists the file.
    pub best_score_changed: bool,
    clock: FrameClock,
}

/// Forwards events while noting whether the run ended this frame.
struct EndWatch<'a> {
    inner: &'a mut dyn EventSink,
    final_score: Option<u64>,
}

impl EventSink for EndWatch<'_> {
    fn emit(&mut self, event: GameEvent) {
        if let GameEvent::GameEnded { final_score } = event {
            self.final_score = Some(final_score);
        }
        self.inner.emit(event);
    }
}

impl AppState {
    pub fn new(best_scores: BestScoresFile) -> Self {
        Self { best_scores, ..Self::default() }
    }

    /// Process one rendered frame. While paused only a pause intent (resume) is honored, and
    /// the time spent paused never turns into a backlog of ticks.
    pub fn frame(
        &mut self,
        sim: &mut dyn Simulation,
        frame_seconds: f32,
        intents: &[Intent],
        events: &mut dyn EventSink,
    ) {
        self.best_score_changed = false;
        match self.mode {
            AppMode::Finished(_) => return,
            AppMode::Paused => {
                if intents.contains(&Intent::Pause) {
                    self.mode = AppMode::Playing;
                    self.clock = FrameClock::new();
                }
                return;
            }
            AppMode::Playing => {}
        }

        for intent in intents {
            match intent {
                Intent::Pause => sim.request_pause(),
                other => {
                    if sim.apply_intent(*other).is_err() {
                        break;
                    }
                }
            }
        }

        let due = self.clock.accumulate(frame_seconds);
        let mut watch = EndWatch { inner: events, final_score: None };
        let result = sim.advance(due, &mut watch);
        if let Some(final_score) = watch.final_score {
            self.best_score_changed = self.best_scores.record(sim.game_id(), final_score);
        }
        self.apply_stop_reason(result.stop_reason);
    }

    pub fn apply_stop_reason(&mut self, stop_reason: AdvanceStopReason) {
        match stop_reason {
            AdvanceStopReason::PausedAtBoundary { .. } => {
                self.mode = AppMode::Paused;
            }
            AdvanceStopReason::Finished(outcome) => {
                self.mode = AppMode::Finished(outcome);
            }
            AdvanceStopReason::BudgetExhausted => {
                // Keep playing on the next frame
            }
        }
    }
}
