//! Scripted player for demo and soak runs
//!
//! Reads a `Snapshot` and answers with the `TickInput` a reasonable player
//! would give: shoot the lowest neutral brick, slide each bin under the
//! lowest brick of its color.

use glam::Vec2;

use crate::consts::CAPTURE_BAND;
use crate::sim::{Brick, ColorKind, Lane, Snapshot, TickInput};

/// World units a bullet covers per second at the default step and tick
const BULLET_SPEED: f32 = 2.5;
/// Brick ticks per second
const BRICK_TICKS_PER_SECOND: f32 = 100.0;

#[derive(Debug, Clone)]
pub struct Autopilot {
    /// Minimum time between click shots
    shot_interval: f64,
    last_shot: Option<f64>,
    /// Bins stop adjusting within this distance of their target
    bin_tolerance: f32,
}

impl Default for Autopilot {
    fn default() -> Self {
        Self::new(0.3)
    }
}

impl Autopilot {
    pub fn new(shot_interval: f64) -> Self {
        Self {
            shot_interval,
            last_shot: None,
            bin_tolerance: 0.03,
        }
    }

    /// Decide this frame's input
    pub fn plan(&mut self, snapshot: &Snapshot, now: f64) -> TickInput {
        let mut input = TickInput::default();
        if snapshot.state.game_over {
            return input;
        }

        let ready = self
            .last_shot
            .is_none_or(|last| now - last >= self.shot_interval);
        if ready {
            if let Some(target) = shot_target(snapshot) {
                input.press = Some(target);
                self.last_shot = Some(now);
            }
        }
        // A shot that lands on a bin grabs it instead; let go straight away
        input.release = true;

        let (left, right) = self.steer_bin(snapshot, Lane::Left);
        input.left_bin_left = left;
        input.left_bin_right = right;
        let (left, right) = self.steer_bin(snapshot, Lane::Right);
        input.right_bin_left = left;
        input.right_bin_right = right;

        input
    }

    /// Nudge directions moving a bin under its lane's lowest colored brick
    fn steer_bin(&self, snapshot: &Snapshot, lane: Lane) -> (bool, bool) {
        let Some(brick) = lowest(snapshot.bricks(lane), lane.colored_kind()) else {
            return (false, false);
        };
        let bin = snapshot.bin(lane);
        let (lo, hi) = bin.span();
        let offset = brick.center().x - (lo + hi) / 2.0;
        if offset < -self.bin_tolerance {
            (true, false)
        } else if offset > self.bin_tolerance {
            (false, true)
        } else {
            (false, false)
        }
    }
}

/// Lowest live brick of a kind that has not reached the capture band yet
fn lowest(bricks: &[Brick], kind: ColorKind) -> Option<&Brick> {
    bricks
        .iter()
        .filter(|b| b.kind == kind && b.bottom_corners().0.y > CAPTURE_BAND.1)
        .min_by(|a, b| a.pos.y.total_cmp(&b.pos.y))
}

/// Where to click to hit the most urgent neutral brick, leading its fall
fn shot_target(snapshot: &Snapshot) -> Option<Vec2> {
    let brick = [Lane::Left, Lane::Right]
        .into_iter()
        .filter_map(|lane| lowest(snapshot.bricks(lane), ColorKind::Neutral))
        .min_by(|a, b| a.pos.y.total_cmp(&b.pos.y))?;

    let center = brick.center();
    let flight = (center - snapshot.laser.muzzle).length() / BULLET_SPEED;
    let fall = snapshot.state.speed_factor * BRICK_TICKS_PER_SECOND * flight;
    let aim = center - Vec2::new(0.0, fall);
    (aim.x > snapshot.laser.pivot.x).then_some(aim)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::GameWorld;
    use crate::tuning::Tuning;

    fn world_with(bricks: &[(Lane, ColorKind, Vec2)]) -> GameWorld {
        let mut world = GameWorld::new(8, Tuning::default(), 0.0);
        for &(lane, kind, pos) in bricks {
            world.bricks_mut(lane).push(Brick::new(kind, pos)).unwrap();
        }
        world
    }

    #[test]
    fn test_shoots_lowest_neutral_with_lead() {
        let world = world_with(&[
            (Lane::Left, ColorKind::Neutral, Vec2::new(-2.0, 3.0)),
            (Lane::Right, ColorKind::Neutral, Vec2::new(1.0, 1.0)),
            (Lane::Right, ColorKind::Green, Vec2::new(1.5, -1.0)),
        ]);
        let mut pilot = Autopilot::default();
        let input = pilot.plan(&Snapshot::capture(&world), 0.0);
        let target = input.press.expect("neutral brick in range");
        assert!((target.x - 1.1).abs() < 1e-5);
        // Aimed well below the brick center to meet it on the way down
        assert!(target.y < -2.0 && target.y > -2.8);
    }

    #[test]
    fn test_shot_interval() {
        let world = world_with(&[(Lane::Left, ColorKind::Neutral, Vec2::new(-2.0, 2.0))]);
        let snapshot = Snapshot::capture(&world);
        let mut pilot = Autopilot::new(0.3);
        assert!(pilot.plan(&snapshot, 1.0).press.is_some());
        assert!(pilot.plan(&snapshot, 1.1).press.is_none());
        assert!(pilot.plan(&snapshot, 1.3).press.is_some());
    }

    #[test]
    fn test_no_targets_no_shot() {
        let world = world_with(&[(Lane::Left, ColorKind::Red, Vec2::new(-2.0, 2.0))]);
        let input = Autopilot::default().plan(&Snapshot::capture(&world), 0.0);
        assert!(input.press.is_none());
    }

    #[test]
    fn test_bins_follow_colored_bricks() {
        let world = world_with(&[
            (Lane::Left, ColorKind::Red, Vec2::new(-2.3, 0.0)),
            (Lane::Right, ColorKind::Green, Vec2::new(2.2, 0.0)),
        ]);
        let input = Autopilot::default().plan(&Snapshot::capture(&world), 0.0);
        assert!(input.left_bin_left && !input.left_bin_right);
        assert!(input.right_bin_right && !input.right_bin_left);
    }

    #[test]
    fn test_bin_holds_when_aligned() {
        // Red bin spans [-1.75, -0.75] at rest; brick center lands on -1.25
        let world = world_with(&[(Lane::Left, ColorKind::Red, Vec2::new(-1.35, 0.0))]);
        let input = Autopilot::default().plan(&Snapshot::capture(&world), 0.0);
        assert!(!input.left_bin_left && !input.left_bin_right);
    }

    #[test]
    fn test_idle_after_game_over() {
        let mut world = world_with(&[(Lane::Left, ColorKind::Neutral, Vec2::new(-2.0, 2.0))]);
        world.state.game_over = true;
        let input = Autopilot::default().plan(&Snapshot::capture(&world), 0.0);
        assert!(input.press.is_none());
    }
}
