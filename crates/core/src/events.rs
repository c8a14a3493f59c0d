//! Outbound notifications and the structured simulation log.
//! `GameEvent` is what the presentation layer hears about; `LogEvent` is the in-memory trace
//! the games keep for tests and tooling. Neither carries any delivery guarantee beyond
//! same-tick causal order.

use crate::types::{EnemyId, GridCell, ObstacleId};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HapticKind {
    Light,
    Medium,
    Heavy,
    Success,
    Warning,
    Error,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SoundKind {
    MenuSelect,
    GameStart,
    Collect,
    Hit,
    GameOver,
    PowerUp,
    WaveComplete,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameEvent {
    ScoreChanged { score: u64 },
    GameEnded { final_score: u64 },
    HapticRequested(HapticKind),
    SoundRequested(SoundKind),
    PauseRequested,
}

/// Injected receiver for outbound notifications.
pub trait EventSink {
    fn emit(&mut self, event: GameEvent);
}

impl EventSink for Vec<GameEvent> {
    fn emit(&mut self, event: GameEvent) {
        self.push(event);
    }
}

/// Discards everything; handy for headless stepping.
pub struct NullSink;

impl EventSink for NullSink {
    fn emit(&mut self, _event: GameEvent) {}
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PickupLogKind {
    Glyph,
    PowerGlyph,
    Rivet,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClimberLogState {
    Grounded,
    Climbing,
    Falling,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LogEvent {
    EnemyReleased { enemy: EnemyId },
    EnemyLeftHome { enemy: EnemyId, cell: GridCell },
    PhaseToggled { chase: bool },
    PowerActivated { frightened: u8 },
    FlashWarning,
    PowerExpired,
    EnemyEaten { enemy: EnemyId, points: u64 },
    EnemyHome { enemy: EnemyId },
    PickupCollected { kind: PickupLogKind, cell: GridCell, points: u64 },
    LifeLost { lives_left: u8 },
    ExtraLife { lives: u8 },
    LevelCleared { level: u32, bonus: u64 },
    LevelStarted { level: u32 },
    ClimberStateChanged { state: ClimberLogState, cell: GridCell },
    FellOff { cell: GridCell },
    ObstacleSpawned { obstacle: ObstacleId, cell: GridCell, rolling: bool },
    ObstacleDespawned { obstacle: ObstacleId },
    NearMiss { obstacle: ObstacleId },
    GoalReached { bonus: u64 },
}
