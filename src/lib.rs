//! Laser Sort - a falling-brick sorting arcade game
//!
//! Core modules:
//! - `sim`: Simulation (entity stores, physics, collisions, scoring, game clock)
//! - `tuning`: Data-driven game balance
//! - `audio`: Sound cue dispatch for simulation events
//! - `autopilot`: Scripted player used by the headless runner

pub mod audio;
pub mod autopilot;
pub mod error;
pub mod sim;
pub mod tuning;

pub use error::SimError;
pub use tuning::Tuning;

use glam::Vec2;

/// Play field geometry
pub mod consts {
    /// Half extent of the square play field; bullets outside `[-4, 4]²` are gone
    pub const FIELD_HALF_EXTENT: f32 = 4.0;

    /// Bullet shape (length along heading, width across it)
    pub const BULLET_LENGTH: f32 = 0.4;
    pub const BULLET_WIDTH: f32 = 0.05;

    /// Brick shape; `x, y` is the top-left corner, the brick hangs down by `BRICK_WIDTH`
    pub const BRICK_LENGTH: f32 = 0.2;
    pub const BRICK_WIDTH: f32 = 0.6;
    /// Bricks enter at the top of the field
    pub const BRICK_SPAWN_Y: f32 = 4.0;
    /// Horizontal spawn band of the left lane
    pub const LEFT_LANE_X: (f32, f32) = (-2.392, -1.168);
    /// Horizontal spawn band of the right lane
    pub const RIGHT_LANE_X: (f32, f32) = (0.488, 2.232);

    /// Laser pivot x; pivot y is `offset + LASER_PIVOT_Y`
    pub const LASER_PIVOT_X: f32 = -3.375;
    pub const LASER_PIVOT_Y: f32 = 0.75;
    /// Distance from pivot to the muzzle where bullets appear
    pub const LASER_BARREL_LENGTH: f32 = 0.625;
    pub const LASER_OFFSET_RANGE: (f32, f32) = (-3.0, 3.0);
    /// One rotation step is this many degrees
    pub const LASER_DEGREES_PER_STEP: f32 = 5.0;
    pub const LASER_MAX_STEPS: f32 = 18.0;
    /// Click-aim is rejected beyond this angle
    pub const LASER_MAX_AIM_DEG: f32 = 80.0;

    /// Bin rectangles (left edge before pan, width); both span the capture band
    pub const RED_BIN_X: f32 = -1.75;
    pub const GREEN_BIN_X: f32 = 1.5;
    pub const BIN_WIDTH: f32 = 1.0;
    pub const RED_BIN_PAN_RANGE: (f32, f32) = (-1.178, 0.038);
    pub const GREEN_BIN_PAN_RANGE: (f32, f32) = (-1.764, 0.212);
    /// Vertical band (brick bottom edge) in which bins judge bricks
    pub const CAPTURE_BAND: (f32, f32) = (-4.0, -2.5);
}

/// Normalize an angle in degrees to [-180, 180)
#[inline]
pub fn normalize_degrees(mut angle: f32) -> f32 {
    while angle >= 180.0 {
        angle -= 360.0;
    }
    while angle < -180.0 {
        angle += 360.0;
    }
    angle
}

/// Unit vector for a heading given in degrees
#[inline]
pub fn heading(angle_deg: f32) -> Vec2 {
    let rad = angle_deg.to_radians();
    Vec2::new(rad.cos(), rad.sin())
}
