//! Player intents and the controls they drive
//!
//! The host polls its keyboard and mouse and fills one `TickInput` per frame.
//! Held keys are booleans; the cursor arrives already mapped to world
//! coordinates.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::{Bullet, GameEvent, GameWorld};
use crate::consts::LASER_MAX_AIM_DEG;
use crate::error::SimError;

/// Input intents for a single frame
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TickInput {
    /// Fire held (gated by the fire cooldown)
    pub fire: bool,
    pub pan_left: bool,
    pub pan_right: bool,
    pub pan_up: bool,
    pub pan_down: bool,
    pub zoom_in: bool,
    pub zoom_out: bool,
    pub laser_up: bool,
    pub laser_down: bool,
    pub laser_rot_up: bool,
    pub laser_rot_down: bool,
    pub increase_speed: bool,
    pub decrease_speed: bool,
    pub left_bin_left: bool,
    pub left_bin_right: bool,
    pub right_bin_left: bool,
    pub right_bin_right: bool,
    pub pause_toggle: bool,
    /// Cursor position in world coordinates, if known this frame
    pub cursor: Option<Vec2>,
    /// Primary button went down at this world position
    pub press: Option<Vec2>,
    /// Primary button went up
    pub release: bool,
    /// Secondary button held: cursor motion pans the camera
    pub camera_drag: bool,
    /// Wheel delta; positive zooms in
    pub scroll: f32,
}

/// Object held by the primary button
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Grab {
    Laser,
    RedBin,
    GreenBin,
}

/// Pointer bookkeeping carried between frames
#[derive(Debug, Clone, Default)]
pub struct PointerState {
    pub grab: Option<Grab>,
    last_cursor: Option<Vec2>,
}

/// Keyboard and wheel controls: laser, bins and camera
pub fn apply_controls(world: &mut GameWorld, input: &TickInput) {
    let tuning = &world.tuning;

    if input.laser_up {
        world.laser.nudge(tuning.laser_move_step);
    }
    if input.laser_down {
        world.laser.nudge(-tuning.laser_move_step);
    }
    if input.laser_rot_up {
        world.laser.rotate(tuning.laser_rotate_step);
    }
    if input.laser_rot_down {
        world.laser.rotate(-tuning.laser_rotate_step);
    }

    if input.left_bin_left {
        world.red_bin.nudge(-tuning.bin_move_step);
    }
    if input.left_bin_right {
        world.red_bin.nudge(tuning.bin_move_step);
    }
    if input.right_bin_left {
        world.green_bin.nudge(-tuning.bin_move_step);
    }
    if input.right_bin_right {
        world.green_bin.nudge(tuning.bin_move_step);
    }

    let mut pan = Vec2::ZERO;
    if input.pan_left {
        pan.x -= tuning.pan_step;
    }
    if input.pan_right {
        pan.x += tuning.pan_step;
    }
    if input.pan_up {
        pan.y += tuning.pan_step;
    }
    if input.pan_down {
        pan.y -= tuning.pan_step;
    }
    if pan != Vec2::ZERO {
        world.viewport.pan_by(pan);
    }

    let mut zoom = -input.scroll * tuning.zoom_step;
    if input.zoom_in {
        zoom -= tuning.zoom_step;
    }
    if input.zoom_out {
        zoom += tuning.zoom_step;
    }
    if zoom != 0.0 {
        world.viewport.zoom_by(zoom);
    }
}

/// Press, drag and release handling for the primary and secondary buttons
pub fn apply_pointer(world: &mut GameWorld, input: &TickInput) {
    if let Some(at) = input.press {
        match hit_test(world, at) {
            Some(grab) => {
                log::debug!("Grabbed {grab:?}");
                world.pointer.grab = Some(grab);
            }
            None => match click_fire(world, at) {
                Ok(()) => {}
                Err(err @ SimError::AimOutOfRange { .. }) => log::debug!("Shot rejected: {err}"),
                Err(err) => log::warn!("Shot dropped: {err}"),
            },
        }
        // Drags measure from the press point
        world.pointer.last_cursor = Some(at);
    }

    if let Some(cursor) = input.cursor {
        if let Some(last) = world.pointer.last_cursor {
            let delta = cursor - last;
            match world.pointer.grab {
                Some(Grab::Laser) => world.laser.drag(delta.y),
                Some(Grab::RedBin) => world.red_bin.drag(delta.x),
                Some(Grab::GreenBin) => world.green_bin.drag(delta.x),
                None => {}
            }
            if input.camera_drag {
                world.viewport.pan_by(-delta);
            }
        }
        world.pointer.last_cursor = Some(cursor);
    }

    if input.release {
        world.pointer.grab = None;
    }
}

/// Follow the pointer without moving anything.
///
/// Paused frames still see the cursor and button releases, so a drag resumes
/// from where the pointer is rather than from where it was at pause time.
pub fn track_pointer(world: &mut GameWorld, input: &TickInput) {
    if let Some(cursor) = input.cursor {
        world.pointer.last_cursor = Some(cursor);
    }
    if input.release {
        world.pointer.grab = None;
    }
}

/// Laser first, then the red and green bins
fn hit_test(world: &GameWorld, at: Vec2) -> Option<Grab> {
    if world.laser.contains(at) {
        Some(Grab::Laser)
    } else if world.red_bin.contains(at) {
        Some(Grab::RedBin)
    } else if world.green_bin.contains(at) {
        Some(Grab::GreenBin)
    } else {
        None
    }
}

/// Aim the laser at `target` and fire immediately.
///
/// Targets behind the pivot or more than 80° off horizontal are rejected
/// without firing. Not gated by the fire cooldown.
pub fn click_fire(world: &mut GameWorld, target: Vec2) -> Result<(), SimError> {
    let to = target - world.laser.pivot();
    let angle_deg = to.y.atan2(to.x).to_degrees();
    if to.x < 0.0 || angle_deg.abs() > LASER_MAX_AIM_DEG {
        return Err(SimError::AimOutOfRange { angle_deg });
    }
    world.laser.aim(angle_deg);
    fire_bullet(world)?;
    Ok(())
}

/// Held fire: one bullet per elapsed cooldown
pub fn fire_held(world: &mut GameWorld, input: &TickInput) -> bool {
    if !input.fire {
        return false;
    }
    let now = world.clock.now();
    if !world.clock.fire.fire(now) {
        return false;
    }
    match fire_bullet(world) {
        Ok(_) => true,
        Err(err) => {
            log::warn!("Dropping new bullet: {err}");
            false
        }
    }
}

/// Spawn a bullet at the muzzle along the laser's heading
pub fn fire_bullet(world: &mut GameWorld) -> Result<u64, SimError> {
    let muzzle = world.laser.muzzle();
    let angle_deg = world.laser.angle_deg();
    let index = world.bullets.push(Bullet::new(muzzle, angle_deg))?;
    log::debug!(
        "Fired bullet #{index} from ({:.3}, {:.3}) at {angle_deg:.1}°",
        muzzle.x,
        muzzle.y
    );
    world.events.push(GameEvent::BulletFired);
    Ok(index)
}
