//! Data-driven game balance
//!
//! Every gameplay number that is not play field geometry lives here, so a
//! run can be re-balanced from a JSON file without recompiling.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::SimError;

/// Gameplay tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Timers (seconds) ===
    /// One brick spawns per elapsed interval
    pub spawn_interval: f64,
    /// Bullet integration gate
    pub bullet_tick: f64,
    /// Brick integration gate (shared by both lanes)
    pub brick_tick: f64,
    /// Minimum gap between bullets while fire is held
    pub fire_cooldown: f64,
    /// Minimum gap between two neutral bricks, across both lanes
    pub neutral_cooldown: f64,

    // === Bullets ===
    /// Distance a bullet travels per bullet tick
    pub bullet_step: f32,
    pub bullet_capacity: usize,

    // === Bricks ===
    pub brick_capacity: usize,
    /// Chance a spawn lands in the left lane
    pub left_lane_chance: f64,
    /// Chance a spawn asks for a neutral brick (subject to the cooldown)
    pub neutral_chance: f64,
    /// Bricks at or below this height take an extra `gap_jump` per tick
    pub gap_band_y: f32,
    pub gap_jump: f32,
    /// Bricks below this height leave the field
    pub retire_y: f32,
    /// Extra drop applied when a bin judges a brick
    pub bin_nudge: f32,

    // === Speed ===
    /// Floor and reset value of the brick speed factor
    pub base_speed: f32,
    /// Per-frame change while speed intents are held, and per scoring tier
    pub speed_step: f32,
    /// Score points per speed tier
    pub points_per_speed_step: i32,

    // === Scoring ===
    pub neutral_shot_points: i32,
    pub colored_shot_points: i32,
    pub sort_points: i32,
    pub starting_lives: i32,

    // === Controls (per frame while held) ===
    pub laser_move_step: f32,
    pub laser_rotate_step: f32,
    pub bin_move_step: f32,
    pub pan_step: f32,
    pub zoom_step: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            spawn_interval: 1.0,
            bullet_tick: 0.01,
            brick_tick: 0.01,
            fire_cooldown: 0.5,
            neutral_cooldown: 2.0,

            bullet_step: 0.025,
            bullet_capacity: 100,

            brick_capacity: 100_000,
            left_lane_chance: 0.5,
            neutral_chance: 0.5,
            gap_band_y: -2.2,
            gap_jump: 0.4,
            retire_y: -7.0,
            bin_nudge: 2.0,

            base_speed: 0.02,
            speed_step: 0.002,
            points_per_speed_step: 25,

            neutral_shot_points: 2,
            colored_shot_points: -1,
            sort_points: 2,
            starting_lives: 3,

            laser_move_step: 0.02,
            laser_rotate_step: 0.1,
            bin_move_step: 0.02,
            pan_step: 0.1,
            zoom_step: 0.01,
        }
    }
}

impl Tuning {
    /// Parse tuning from JSON; missing fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, SimError> {
        let tuning = serde_json::from_str(json)?;
        Ok(tuning)
    }

    /// Load tuning from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SimError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let tuning = Self::from_json(&json)?;
        log::info!("Loaded tuning from {}", path.display());
        Ok(tuning)
    }

    /// Speed factor implied by a score: base plus one step per scoring tier
    pub fn speed_for_score(&self, score: i32) -> f32 {
        let tiers = score.max(0) / self.points_per_speed_step.max(1);
        self.base_speed + tiers as f32 * self.speed_step
    }
}
