//! Per-frame simulation step
//!
//! One call per rendered frame with that frame's wall-clock sample. The
//! integrators and the spawner gate themselves on their own timers; the
//! collision pass runs every frame.

use super::input::{self, TickInput};
use super::state::GameWorld;
use super::{collision, physics, spawner};

/// What happened during one frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameReport {
    /// The frame ran (not paused, not over)
    pub advanced: bool,
    pub fired: bool,
    pub spawned: bool,
    pub bullets_ticked: bool,
    pub bricks_ticked: bool,
}

/// Advance the world by one frame
pub fn tick(world: &mut GameWorld, input: &TickInput, now: f64) -> FrameReport {
    let mut report = FrameReport::default();

    // Game over is terminal: nothing moves, nothing scores
    if world.state.game_over {
        return report;
    }

    if input.pause_toggle {
        world.state.paused = !world.state.paused;
        log::info!("{}", if world.state.paused { "Paused" } else { "Resumed" });
    }
    // Paused frames do not sample the clock, so no timer advances
    if world.state.paused {
        input::track_pointer(world, input);
        return report;
    }

    world.clock.sample(now);
    report.advanced = true;

    input::apply_controls(world, input);
    input::apply_pointer(world, input);
    report.fired = input::fire_held(world, input);
    physics::apply_speed_intents(world, input.increase_speed, input.decrease_speed);

    report.spawned = spawner::update(world).is_some();
    report.bullets_ticked = physics::update_bullets(world);
    report.bricks_ticked = physics::update_bricks(world);

    collision::resolve(world);

    report
}
