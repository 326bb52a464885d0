//! Read-only view of a frame for rendering and tooling

use glam::Vec2;
use serde::Serialize;

use super::state::{Bin, Brick, Bullet, GameState, GameWorld, Lane, Mirror, Viewport};
use crate::error::SimError;

/// Laser as the renderer draws it
#[derive(Debug, Clone, Serialize)]
pub struct LaserView {
    pub pivot: Vec2,
    pub muzzle: Vec2,
    pub angle_deg: f32,
}

/// Everything a renderer needs for one frame. Owns its data, so the
/// simulation can keep running while a snapshot is being drawn.
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub time: f64,
    pub seed: u64,
    pub bullets: Vec<Bullet>,
    pub left_bricks: Vec<Brick>,
    pub right_bricks: Vec<Brick>,
    pub mirrors: Vec<Mirror>,
    pub red_bin: Bin,
    pub green_bin: Bin,
    pub laser: LaserView,
    pub viewport: Viewport,
    pub state: GameState,
}

impl Snapshot {
    /// Copy the live entities out of the world
    pub fn capture(world: &GameWorld) -> Self {
        let live_bricks = |lane| {
            world
                .bricks(lane)
                .iter()
                .filter(|b| b.alive)
                .cloned()
                .collect::<Vec<_>>()
        };
        Self {
            time: world.clock.now(),
            seed: world.rng.seed(),
            bullets: world.bullets.iter().filter(|b| b.alive).cloned().collect(),
            left_bricks: live_bricks(Lane::Left),
            right_bricks: live_bricks(Lane::Right),
            mirrors: world.mirrors.to_vec(),
            red_bin: world.red_bin.clone(),
            green_bin: world.green_bin.clone(),
            laser: LaserView {
                pivot: world.laser.pivot(),
                muzzle: world.laser.muzzle(),
                angle_deg: world.laser.angle_deg(),
            },
            viewport: world.viewport.clone(),
            state: world.state.clone(),
        }
    }

    pub fn bricks(&self, lane: Lane) -> &[Brick] {
        match lane {
            Lane::Left => &self.left_bricks,
            Lane::Right => &self.right_bricks,
        }
    }

    pub fn bin(&self, lane: Lane) -> &Bin {
        match lane {
            Lane::Left => &self.red_bin,
            Lane::Right => &self.green_bin,
        }
    }

    pub fn to_json(&self) -> Result<String, SimError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
