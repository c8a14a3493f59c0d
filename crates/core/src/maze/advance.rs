//! Per-tick simulation loop for the maze: timers, release, phases, power, motion, contacts.

use super::*;
use crate::ai::TargetContext;
use crate::clock::TICK_SECONDS;
use crate::collision::{
    CollisionOutcome, CollisionProbe, ContactRef, OccupantRole, resolve_contacts,
};
use crate::enemy::{EnemyMode, EnemyTick, Phase};
use crate::events::{GameEvent, HapticKind, PickupLogKind, SoundKind};
use crate::grid::MoveRule;
use crate::motion::StepStatus;

impl MazeGame {
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
        if self.death_pause.is_running() {
            if self.death_pause.tick(dt) {
                self.reset_board();
            }
            return;
        }

        self.tick_release();
        self.tick_phase(dt);
        self.tick_power(dt);
        self.move_runner(dt);
        self.move_enemies(dt);
        self.resolve_collisions(sink);
        let settled = self.finished.is_none() && !self.death_pause.is_running();
        if settled && self.glyphs.is_empty() {
            self.clear_level(sink);
        }
    }

    fn tick_release(&mut self) {
        if !self.release.tick(TICK_SECONDS) {
            return;
        }
        let penned = self.enemies.values_mut().find(|enemy| enemy.mode() == EnemyMode::Home);
        if let Some(enemy) = penned
            && enemy.release()
        {
            self.log.push(LogEvent::EnemyReleased { enemy: enemy.id });
        }
    }

    fn tick_phase(&mut self, dt: f32) {
        let Some(phase) = self.phase.tick(dt) else {
            return;
        };
        for enemy in self.enemies.values_mut() {
            enemy.apply_phase(phase);
        }
        self.log.push(LogEvent::PhaseToggled { chase: phase == Phase::Chase });
    }

    fn tick_power(&mut self, dt: f32) {
        if !self.power.is_running() {
            return;
        }
        if self.power.tick(dt) {
            let phase = self.phase.phase();
            for enemy in self.enemies.values_mut() {
                enemy.end_frighten(phase);
            }
            self.score.reset_combo();
            self.log.push(LogEvent::PowerExpired);
            return;
        }
        let remaining = self.power.remaining();
        let warning = self.tuning.power_warning_seconds;
        let mut started = false;
        for enemy in self.enemies.values_mut() {
            started |= enemy.update_flash(remaining, warning);
        }
        if started {
            self.log.push(LogEvent::FlashWarning);
        }
    }

    /// Queued turn first, then straight ahead, else stop. Chains into the next step on the
    /// tick the previous one lands.
    fn move_runner(&mut self, dt: f32) {
        if self.runner.advance(dt) == StepStatus::InFlight {
            return;
        }
        if let Some(queued) = self.runner.queued()
            && self.runner.request_step(&self.map, queued, MoveRule::Open)
        {
            self.runner.clear_queue();
            self.heading = Some(queued);
            return;
        }
        let continued = self
            .heading
            .is_some_and(|heading| self.runner.request_step(&self.map, heading, MoveRule::Open));
        if !continued {
            self.heading = None;
        }
    }

    fn move_enemies(&mut self, dt: f32) {
        let context =
            TargetContext { opponent: self.runner.cell(), opponent_facing: self.heading };
        let phase = self.phase.phase();
        for enemy in self.enemies.values_mut() {
            match enemy.update(&self.map, dt, phase, context, &mut self.rng) {
                EnemyTick::LeftHome => {
                    let cell = enemy.cell();
                    self.log.push(LogEvent::EnemyLeftHome { enemy: enemy.id, cell });
                }
                EnemyTick::ReachedHome => self.log.push(LogEvent::EnemyHome { enemy: enemy.id }),
                EnemyTick::Idle | EnemyTick::Moving | EnemyTick::Stepped => {}
            }
        }
    }

    fn resolve_collisions(&mut self, sink: &mut dyn EventSink) {
        let mut probe = CollisionProbe::new(self.runner.cell());
        for (id, glyph) in &self.glyphs {
            probe.push(ContactRef::Pickup(id), glyph.cell, OccupantRole::Pickup(glyph.kind));
        }
        for (id, enemy) in &self.enemies {
            let mode = enemy.mode();
            if mode == EnemyMode::Home || !(mode.is_harmful() || mode.is_vulnerable()) {
                continue;
            }
            let role = OccupantRole::Hazard { vulnerable: mode.is_vulnerable() };
            probe.push(ContactRef::Enemy(id), enemy.cell(), role);
        }

        for outcome in resolve_contacts(&probe) {
            match outcome {
                CollisionOutcome::Collected { contact: ContactRef::Pickup(id), kind, cell } => {
                    self.collect(id, kind, cell, sink);
                }
                CollisionOutcome::Devoured { contact: ContactRef::Enemy(id) } => {
                    self.devour(id, sink);
                }
                CollisionOutcome::Damaged { .. } => {
                    self.lose_life(sink);
                    return;
                }
                _ => {}
            }
        }
    }

    fn collect(
        &mut self,
        id: PickupId,
        kind: PickupKind,
        cell: GridCell,
        sink: &mut dyn EventSink,
    ) {
        if self.glyphs.remove(id).is_none() {
            return;
        }
        let (points, log_kind) = match kind {
            PickupKind::PowerGlyph => {
                (self.tuning.power_glyph_points, PickupLogKind::PowerGlyph)
            }
            PickupKind::Glyph | PickupKind::Rivet => {
                (self.tuning.glyph_points, PickupLogKind::Glyph)
            }
        };
        let points = self.score.record_collect(points, 0);
        self.log.push(LogEvent::PickupCollected { kind: log_kind, cell, points });
        if kind == PickupKind::PowerGlyph {
            self.activate_power();
            sink.emit(GameEvent::SoundRequested(SoundKind::PowerUp));
            sink.emit(GameEvent::HapticRequested(HapticKind::Medium));
        } else {
            sink.emit(GameEvent::SoundRequested(SoundKind::Collect));
        }
        self.score_changed(sink);
    }

    fn activate_power(&mut self) {
        self.power.start(self.tuning.power_seconds);
        self.score.reset_combo();
        let mut frightened = 0u8;
        for enemy in self.enemies.values_mut() {
            if enemy.frighten() {
                frightened += 1;
            }
        }
        self.log.push(LogEvent::PowerActivated { frightened });
    }

    fn devour(&mut self, id: EnemyId, sink: &mut dyn EventSink) {
        let Some(enemy) = self.enemies.get_mut(id) else {
            return;
        };
        if !enemy.capture() {
            return;
        }
        let points = self.score.record_kill(self.tuning.enemy_base_points);
        self.log.push(LogEvent::EnemyEaten { enemy: id, points });
        sink.emit(GameEvent::SoundRequested(SoundKind::Collect));
        sink.emit(GameEvent::HapticRequested(HapticKind::Medium));
        self.score_changed(sink);
    }

    fn lose_life(&mut self, sink: &mut dyn EventSink) {
        self.lives = self.lives.saturating_sub(1);
        self.log.push(LogEvent::LifeLost { lives_left: self.lives });
        sink.emit(GameEvent::SoundRequested(SoundKind::Hit));
        sink.emit(GameEvent::HapticRequested(HapticKind::Heavy));
        if self.lives == 0 {
            self.finish(sink);
            return;
        }
        self.death_pause.start(self.tuning.death_pause_seconds);
    }

    fn finish(&mut self, sink: &mut dyn EventSink) {
        let final_score = self.score.score();
        self.score.finalize();
        self.finished = Some(RunOutcome::LivesExhausted { final_score });
        sink.emit(GameEvent::SoundRequested(SoundKind::GameOver));
        sink.emit(GameEvent::HapticRequested(HapticKind::Error));
        sink.emit(GameEvent::GameEnded { final_score });
    }

    fn clear_level(&mut self, sink: &mut dyn EventSink) {
        let level = self.difficulty.level();
        let bonus = self.score.award(self.tuning.level_bonus_per_level * u64::from(level));
        self.log.push(LogEvent::LevelCleared { level, bonus });
        sink.emit(GameEvent::SoundRequested(SoundKind::WaveComplete));
        sink.emit(GameEvent::HapticRequested(HapticKind::Success));
        self.score_changed(sink);
        self.level_transition.start(self.tuning.level_transition_seconds);
    }

    fn start_next_level(&mut self) {
        self.difficulty = self.difficulty.next();
        self.map = GridMap::from_rows(&GLYPH_MAZE, Legend::Maze);
        self.populate_level();
        self.log.push(LogEvent::LevelStarted { level: self.difficulty.level() });
    }

    fn score_changed(&mut self, sink: &mut dyn EventSink) {
        sink.emit(GameEvent::ScoreChanged { score: self.score.score() });
        if self.extra_life_awarded || self.score.score() < self.tuning.extra_life_score {
            return;
        }
        self.extra_life_awarded = true;
        if self.lives < self.tuning.max_lives {
            self.lives += 1;
        }
        self.log.push(LogEvent::ExtraLife { lives: self.lives });
        sink.emit(GameEvent::SoundRequested(SoundKind::PowerUp));
    }
}
