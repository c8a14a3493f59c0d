//! Per-tick simulation loop for the climb: spawns, climber, obstacles, contacts.

use super::*;
use crate::climber::ClimberTick;
use crate::clock::TICK_SECONDS;
use crate::collision::{
    CollisionOutcome, CollisionProbe, ContactRef, OccupantRole, PickupKind, resolve_contacts,
};
use crate::events::{GameEvent, HapticKind, PickupLogKind, SoundKind};
use crate::obstacle::ObstacleStep;

impl ClimbGame {
    pub(super) fn advance_ticks(
        &mut self,
        max_ticks: u32,
        sink: &mut dyn EventSink,
    ) -> AdvanceResult {
        let mut ticks = 0;
        if let Some(outcome) = self.finished {
            return AdvanceResult {
                simulated_ticks: 0,
                stop_reason: AdvanceStopReason::Finished(outcome),
            };
        }
        while ticks < max_ticks {
            if self.pause_requested {
                self.pause_requested = false;
                sink.emit(GameEvent::PauseRequested);
                return AdvanceResult {
                    simulated_ticks: ticks,
                    stop_reason: AdvanceStopReason::PausedAtBoundary { tick: self.tick },
                };
            }
            self.step(sink);
            ticks += 1;
            if let Some(outcome) = self.finished {
                return AdvanceResult {
                    simulated_ticks: ticks,
                    stop_reason: AdvanceStopReason::Finished(outcome),
                };
            }
        }
        AdvanceResult { simulated_ticks: ticks, stop_reason: AdvanceStopReason::BudgetExhausted }
    }

    fn step(&mut self, sink: &mut dyn EventSink) {
        let dt = TICK_SECONDS;
        self.tick += 1;
        if self.level_transition.is_running() {
            if self.level_transition.tick(dt) {
                self.start_next_level();
            }
            return;
        }

        self.tick_spawner(dt);
        if !self.move_climber(dt, sink) {
            return;
        }
        self.move_obstacles(dt);
        self.level_elapsed += dt;
        self.resolve_collisions(sink);
    }

    /// Returns false when the climber fell out of the level this tick.
    fn move_climber(&mut self, dt: f32, sink: &mut dyn EventSink) -> bool {
        match self.climber.update(&self.map, dt) {
            ClimberTick::StateChanged(state) => {
                let (log_state, cell) = (state.log_state(), state.cell());
                self.log.push(LogEvent::ClimberStateChanged { state: log_state, cell });
                true
            }
            ClimberTick::FellOff(cell) => {
                self.log.push(LogEvent::FellOff { cell });
                self.lose_life(sink);
                false
            }
            ClimberTick::Idle | ClimberTick::Moving | ClimberTick::Stepped => true,
        }
    }

    fn move_obstacles(&mut self, dt: f32) {
        for obstacle in self.obstacles.values_mut() {
            obstacle.animate(dt);
        }
        let steps = self.obstacle_clock.tick(dt);
        let drop_through = self.difficulty.drop_through_percent();
        for _ in 0..steps {
            let mut gone = Vec::new();
            for (id, obstacle) in &mut self.obstacles {
                if obstacle.step(&self.map, drop_through, &mut self.rng) == ObstacleStep::Despawn {
                    gone.push(id);
                }
            }
            for id in gone {
                self.obstacles.remove(id);
                self.log.push(LogEvent::ObstacleDespawned { obstacle: id });
            }
        }
    }

    fn resolve_collisions(&mut self, sink: &mut dyn EventSink) {
        let mut probe = CollisionProbe::new(self.climber.cell())
            .shielded(self.climber.is_invincible())
            .near_miss_radius(self.tuning.near_miss_radius);
        for (id, cell) in &self.rivets {
            probe.push(ContactRef::Pickup(id), *cell, OccupantRole::Pickup(PickupKind::Rivet));
        }
        for (id, obstacle) in &self.obstacles {
            let role = OccupantRole::Hazard { vulnerable: false };
            probe.push(ContactRef::Obstacle(id), obstacle.cell(), role);
        }
        probe.push(ContactRef::Goal, self.map.goal(), OccupantRole::Goal);

        for outcome in resolve_contacts(&probe) {
            match outcome {
                CollisionOutcome::Collected { contact: ContactRef::Pickup(id), cell, .. } => {
                    self.collect_rivet(id, cell, sink);
                }
                CollisionOutcome::NearMiss { contact: ContactRef::Obstacle(id) } => {
                    self.score.award(self.tuning.danger_bonus);
                    self.log.push(LogEvent::NearMiss { obstacle: id });
                    sink.emit(GameEvent::ScoreChanged { score: self.score.score() });
                }
                CollisionOutcome::Damaged { .. } => {
                    self.lose_life(sink);
                    return;
                }
                CollisionOutcome::GoalReached => {
                    self.reach_goal(sink);
                    return;
                }
                _ => {}
            }
        }
    }

    fn collect_rivet(&mut self, id: PickupId, cell: GridCell, sink: &mut dyn EventSink) {
        if self.rivets.remove(id).is_none() {
            return;
        }
        let points = self.score.record_collect(self.tuning.rivet_points, self.tuning.streak_bonus);
        self.log.push(LogEvent::PickupCollected { kind: PickupLogKind::Rivet, cell, points });
        sink.emit(GameEvent::SoundRequested(SoundKind::Collect));
        sink.emit(GameEvent::HapticRequested(HapticKind::Light));
        if self.rivets.is_empty() {
            self.score.award(self.tuning.all_rivets_bonus);
            sink.emit(GameEvent::SoundRequested(SoundKind::PowerUp));
        }
        sink.emit(GameEvent::ScoreChanged { score: self.score.score() });
    }

    fn reach_goal(&mut self, sink: &mut dyn EventSink) {
        let level = u64::from(self.difficulty.level());
        let time_bonus = self.seconds_left() * self.tuning.time_bonus_per_second;
        let bonus = self.score.award(self.tuning.level_complete_per_level * level + time_bonus);
        self.log.push(LogEvent::GoalReached { bonus });
        sink.emit(GameEvent::SoundRequested(SoundKind::WaveComplete));
        sink.emit(GameEvent::HapticRequested(HapticKind::Success));
        sink.emit(GameEvent::ScoreChanged { score: self.score.score() });
        self.level_transition.start(self.tuning.level_transition_seconds);
    }

    /// Breaks the streak and either ends the run or respawns the climber at the start with a
    /// short shield and a cleared neighborhood.
    fn lose_life(&mut self, sink: &mut dyn EventSink) {
        self.lives = self.lives.saturating_sub(1);
        self.score.break_streak();
        self.log.push(LogEvent::LifeLost { lives_left: self.lives });
        sink.emit(GameEvent::SoundRequested(SoundKind::Hit));
        sink.emit(GameEvent::HapticRequested(HapticKind::Heavy));
        if self.lives == 0 {
            self.finish(sink);
            return;
        }
        let start = self.map.start();
        self.climber.respawn(start);
        self.climber.grant_invincibility(self.tuning.invincibility_seconds);
        self.clear_obstacles_near(start, self.tuning.respawn_clear_radius);
    }

    fn finish(&mut self, sink: &mut dyn EventSink) {
        let final_score = self.score.score();
        self.score.finalize();
        self.finished = Some(RunOutcome::LivesExhausted { final_score });
        sink.emit(GameEvent::SoundRequested(SoundKind::GameOver));
        sink.emit(GameEvent::HapticRequested(HapticKind::Error));
        sink.emit(GameEvent::GameEnded { final_score });
    }

    fn start_next_level(&mut self) {
        self.difficulty = self.difficulty.next();
        self.load_level();
        self.log.push(LogEvent::LevelStarted { level: self.difficulty.level() });
    }
}
