//! Brick spawning
//!
//! One brick per elapsed spawn interval, in a random lane. Neutral bricks
//! share a cooldown across both lanes; a neutral draw during the cooldown
//! falls back to the lane's colored kind.

use glam::Vec2;

use super::state::{Brick, ColorKind, GameWorld, Lane};
use crate::consts::BRICK_SPAWN_Y;

/// Spawn a brick if the spawn interval has elapsed. Returns the lane used.
pub fn update(world: &mut GameWorld) -> Option<Lane> {
    let now = world.clock.now();
    if !world.clock.spawn.fire(now) {
        return None;
    }
    spawn_brick(world)
}

/// Spawn one brick unconditionally (the neutral cooldown still applies)
pub fn spawn_brick(world: &mut GameWorld) -> Option<Lane> {
    let now = world.clock.now();
    let lane = if world.rng.chance(world.tuning.left_lane_chance) {
        Lane::Left
    } else {
        Lane::Right
    };

    let wants_neutral = world.rng.chance(world.tuning.neutral_chance);
    let kind = if wants_neutral && world.clock.neutral.fire(now) {
        ColorKind::Neutral
    } else {
        lane.colored_kind()
    };

    let (lo, hi) = lane.spawn_band();
    let x = world.rng.uniform(lo, hi);
    let brick = Brick::new(kind, Vec2::new(x, BRICK_SPAWN_Y));

    match world.bricks_mut(lane).push(brick) {
        Ok(index) => {
            log::debug!("Spawned {:?} brick #{index} in {} lane at x={x:.3}", kind, lane.as_str());
            Some(lane)
        }
        Err(err) => {
            log::warn!("Dropping new brick: {err}");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuning::Tuning;

    fn world_with(tuning: Tuning) -> GameWorld {
        GameWorld::new(4242, tuning, 0.0)
    }

    #[test]
    fn test_spawn_waits_for_interval() {
        let mut world = world_with(Tuning::default());
        world.clock.sample(0.5);
        assert_eq!(update(&mut world), None);
        world.clock.sample(1.0);
        assert!(update(&mut world).is_some());
        assert_eq!(world.left_bricks.len() + world.right_bricks.len(), 1);
        // Same sample again does not spawn twice
        assert_eq!(update(&mut world), None);
    }

    #[test]
    fn test_spawned_bricks_sit_in_their_lane_band() {
        let mut world = world_with(Tuning::default());
        for i in 1..=200 {
            world.clock.sample(i as f64);
            update(&mut world);
        }
        for lane in [Lane::Left, Lane::Right] {
            let (lo, hi) = lane.spawn_band();
            for brick in world.bricks(lane).iter() {
                assert!(brick.pos.x >= lo && brick.pos.x <= hi);
                assert_eq!(brick.pos.y, BRICK_SPAWN_Y);
                assert!(!brick.visited);
                assert!(brick.kind == ColorKind::Neutral || brick.kind == lane.colored_kind());
            }
        }
    }

    #[test]
    fn test_neutral_cooldown_is_shared_across_lanes() {
        let tuning = Tuning {
            neutral_chance: 1.0,
            ..Tuning::default()
        };
        let mut world = world_with(tuning);
        let mut neutral_times = Vec::new();
        for i in 1..=40 {
            let now = i as f64 * 0.5;
            world.clock.sample(now);
            let lane = spawn_brick(&mut world).expect("room for brick");
            let kind = world.bricks(lane).iter().last().map(|b| b.kind);
            if kind == Some(ColorKind::Neutral) {
                neutral_times.push(now);
            }
        }
        // Every spawn asked for neutral; only one per 2 seconds got it
        assert_eq!(neutral_times.len(), 10);
        for pair in neutral_times.windows(2) {
            assert!(pair[1] - pair[0] >= 2.0);
        }
    }

    #[test]
    fn test_full_lane_drops_new_brick() {
        let tuning = Tuning {
            brick_capacity: 1,
            left_lane_chance: 1.0,
            ..Tuning::default()
        };
        let mut world = world_with(tuning);
        assert_eq!(spawn_brick(&mut world), Some(Lane::Left));
        assert_eq!(spawn_brick(&mut world), None);
        assert_eq!(world.left_bricks.len(), 1);
    }
}
