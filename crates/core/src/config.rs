//! Tuning knobs for both games. Defaults reproduce the shipped feel; any subset can be
//! overridden from a settings file because every struct is `#[serde(default)]`.

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MazeTuning {
    pub runner_step_seconds: f32,
    pub enemy_base_step_seconds: f32,
    pub enemy_step_decrease_per_level: f32,
    pub enemy_min_step_seconds: f32,
    pub eaten_speed_multiplier: f32,
    pub enemy_count: usize,
    pub power_seconds: f32,
    pub power_warning_seconds: f32,
    pub first_release_seconds: f32,
    pub release_interval_seconds: f32,
    pub scatter_seconds: f32,
    pub chase_seconds: f32,
    pub level_transition_seconds: f32,
    pub death_pause_seconds: f32,
    pub glyph_points: u64,
    pub power_glyph_points: u64,
    pub enemy_base_points: u64,
    pub level_bonus_per_level: u64,
    pub starting_lives: u8,
    pub max_lives: u8,
    pub extra_life_score: u64,
    pub hold_repeat_seconds: f32,
}

impl Default for MazeTuning {
    fn default() -> Self {
        Self {
            runner_step_seconds: 0.15,
            enemy_base_step_seconds: 0.20,
            enemy_step_decrease_per_level: 0.015,
            enemy_min_step_seconds: 0.10,
            eaten_speed_multiplier: 2.0,
            enemy_count: 4,
            power_seconds: 8.0,
            power_warning_seconds: 2.0,
            first_release_seconds: 2.0,
            release_interval_seconds: 3.0,
            scatter_seconds: 7.0,
            chase_seconds: 20.0,
            level_transition_seconds: 2.0,
            death_pause_seconds: 1.5,
            glyph_points: 10,
            power_glyph_points: 50,
            enemy_base_points: 100,
            level_bonus_per_level: 1000,
            starting_lives: 3,
            max_lives: 5,
            extra_life_score: 10_000,
            hold_repeat_seconds: 0.2,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClimbTuning {
    pub walk_step_seconds: f32,
    pub climb_step_seconds: f32,
    pub fall_step_seconds: f32,
    pub obstacle_step_seconds: f32,
    pub obstacle_animation_seconds: f32,
    pub base_spawn_interval: f32,
    pub spawn_interval_decrease_per_level: f32,
    pub min_spawn_interval: f32,
    pub max_obstacles: usize,
    pub spawn_safety_buffer: u32,
    pub rivet_points: u64,
    pub streak_bonus: u64,
    pub all_rivets_bonus: u64,
    pub level_complete_per_level: u64,
    pub time_bonus_per_second: u64,
    pub time_limit_seconds: f32,
    pub danger_bonus: u64,
    pub near_miss_radius: u32,
    pub starting_lives: u8,
    pub max_lives: u8,
    pub invincibility_seconds: f32,
    pub respawn_clear_radius: u32,
    pub level_transition_seconds: f32,
    pub hold_repeat_seconds: f32,
}

impl Default for ClimbTuning {
    fn default() -> Self {
        Self {
            walk_step_seconds: 0.12,
            climb_step_seconds: 0.18,
            fall_step_seconds: 0.08,
            obstacle_step_seconds: 0.3,
            obstacle_animation_seconds: 0.15,
            base_spawn_interval: 2.5,
            spawn_interval_decrease_per_level: 0.2,
            min_spawn_interval: 1.0,
            max_obstacles: 10,
            spawn_safety_buffer: 1,
            rivet_points: 100,
            streak_bonus: 50,
            all_rivets_bonus: 500,
            level_complete_per_level: 1000,
            time_bonus_per_second: 10,
            time_limit_seconds: 60.0,
            danger_bonus: 25,
            near_miss_radius: 1,
            starting_lives: 3,
            max_lives: 5,
            invincibility_seconds: 2.0,
            respawn_clear_radius: 2,
            level_transition_seconds: 2.0,
            hold_repeat_seconds: 0.15,
        }
    }
}
