pub mod app_loop;
pub mod best_scores_file;
pub mod feedback;
pub mod input;
pub mod launch;
pub mod settings_file;

use arcade_core::RunOutcome;

/// Directory name used for everything the app persists.
pub const APP_NAME: &str = "ArcadeGrid";

/// Format a snapshot hash as `0x` followed by exactly 16 lowercase hex digits.
pub fn format_snapshot_hash(hash: u64) -> String {
    format!("0x{hash:016x}")
}

/// Map a `RunOutcome` to its reason code string.
pub fn outcome_code(outcome: &RunOutcome) -> &'static str {
    match outcome {
        RunOutcome::LivesExhausted { .. } => "LIVES_EXHAUSTED",
    }
}
