//! Bullet and brick integration
//!
//! Both streams advance only when their own gate has elapsed. Retirement only
//! ever pops the head of a store, so it is contiguous: a spent entity behind
//! a live head waits its turn.

use super::state::{Brick, Bullet, GameWorld};
use crate::heading;
use crate::tuning::Tuning;

/// Advance live bullets one step along their heading, then retire spent
/// bullets from the head. Returns whether the bullet gate fired.
pub fn update_bullets(world: &mut GameWorld) -> bool {
    let now = world.clock.now();
    if !world.clock.bullets.fire(now) {
        return false;
    }
    let step = world.tuning.bullet_step;
    for bullet in world.bullets.iter_mut().filter(|b| b.alive) {
        advance_bullet(bullet, step);
    }
    let retired = world.bullets.retire_while(bullet_spent);
    if retired > 0 {
        log::trace!("Retired {retired} bullets");
    }
    true
}

/// Drop live bricks by the speed factor in both lanes, then retire spent
/// bricks from each head. Returns whether the brick gate fired.
pub fn update_bricks(world: &mut GameWorld) -> bool {
    let now = world.clock.now();
    if !world.clock.bricks.fire(now) {
        return false;
    }
    let speed = world.state.speed_factor;
    let tuning = &world.tuning;
    for store in [&mut world.left_bricks, &mut world.right_bricks] {
        for brick in store.iter_mut().filter(|b| b.alive) {
            advance_brick(brick, speed, tuning);
        }
        let retire_y = tuning.retire_y;
        store.retire_while(|brick| brick_spent(brick, retire_y));
    }
    true
}

/// Held speed intents nudge the speed factor every frame
pub fn apply_speed_intents(world: &mut GameWorld, increase: bool, decrease: bool) {
    let tuning = &world.tuning;
    let state = &mut world.state;
    if increase {
        state.speed_factor += tuning.speed_step;
    }
    if decrease {
        state.speed_factor = (state.speed_factor - tuning.speed_step).max(tuning.base_speed);
    }
}

pub fn advance_bullet(bullet: &mut Bullet, step: f32) {
    bullet.pos += heading(bullet.angle_deg) * step;
}

/// Descend by `speed`; below the gap band a brick also jumps the gap
pub fn advance_brick(brick: &mut Brick, speed: f32, tuning: &Tuning) {
    brick.pos.y -= speed;
    if brick.pos.y <= tuning.gap_band_y {
        brick.pos.y -= tuning.gap_jump;
    }
}

/// Dead or out of the play field
pub fn bullet_spent(bullet: &Bullet) -> bool {
    !bullet.alive || bullet.is_out_of_bounds()
}

/// Dead or fallen past the bottom
pub fn brick_spent(brick: &Brick, retire_y: f32) -> bool {
    !brick.alive || brick.pos.y < retire_y
}

#[cfg(test)]
mod tests {
    use glam::Vec2;

    use super::*;
    use crate::sim::state::ColorKind;

    fn world() -> GameWorld {
        GameWorld::new(1, Tuning::default(), 0.0)
    }

    #[test]
    fn test_bullet_gate() {
        let mut world = world();
        world.bullets.push(Bullet::new(Vec2::ZERO, 0.0)).unwrap();
        world.clock.sample(0.005);
        assert!(!update_bullets(&mut world));
        assert_eq!(world.bullets.front().unwrap().pos, Vec2::ZERO);
        world.clock.sample(0.02);
        assert!(update_bullets(&mut world));
        assert!((world.bullets.front().unwrap().pos.x - 0.025).abs() < 1e-6);
    }

    #[test]
    fn test_bullet_heading_up() {
        let mut bullet = Bullet::new(Vec2::ZERO, 90.0);
        advance_bullet(&mut bullet, 0.025);
        assert!(bullet.pos.x.abs() < 1e-6);
        assert!((bullet.pos.y - 0.025).abs() < 1e-6);
    }

    #[test]
    fn test_head_only_bullet_retirement() {
        let mut world = world();
        // Head is in play, the one behind it has already left the field
        world.bullets.push(Bullet::new(Vec2::new(0.0, 0.0), 0.0)).unwrap();
        world.bullets.push(Bullet::new(Vec2::new(3.99, 0.0), 0.0)).unwrap();
        world.clock.sample(0.02);
        update_bullets(&mut world);
        assert_eq!(world.bullets.len(), 2);
        assert!(world.bullets.iter().nth(1).unwrap().is_out_of_bounds());

        // Once the head goes, both leave together
        world.bullets.iter_mut().next().unwrap().kill();
        world.clock.sample(0.04);
        update_bullets(&mut world);
        assert!(world.bullets.is_empty());
        assert_eq!(world.bullets.start(), 2);
    }

    #[test]
    fn test_dead_bullets_do_not_move() {
        let mut world = world();
        let mut bullet = Bullet::new(Vec2::new(1.0, 1.0), 0.0);
        bullet.kill();
        world.bullets.push(Bullet::new(Vec2::ZERO, 0.0)).unwrap();
        world.bullets.push(bullet).unwrap();
        world.clock.sample(0.02);
        update_bullets(&mut world);
        assert_eq!(world.bullets.iter().nth(1).unwrap().pos, Vec2::new(1.0, 1.0));
    }

    #[test]
    fn test_brick_descent_and_gap_jump() {
        let tuning = Tuning::default();
        let mut brick = Brick::new(ColorKind::Red, Vec2::new(0.0, 1.0));
        advance_brick(&mut brick, 0.02, &tuning);
        assert!((brick.pos.y - 0.98).abs() < 1e-6);

        let mut low = Brick::new(ColorKind::Red, Vec2::new(0.0, -2.19));
        advance_brick(&mut low, 0.02, &tuning);
        assert!((low.pos.y - (-2.61)).abs() < 1e-5);
    }

    #[test]
    fn test_head_only_brick_retirement() {
        let mut world = world();
        world
            .left_bricks
            .push(Brick::new(ColorKind::Red, Vec2::new(-2.0, 2.0)))
            .unwrap();
        world
            .left_bricks
            .push(Brick::new(ColorKind::Red, Vec2::new(-2.0, -7.5)))
            .unwrap();
        world.clock.sample(0.02);
        update_bricks(&mut world);
        assert_eq!(world.left_bricks.len(), 2);

        world.left_bricks.iter_mut().next().unwrap().pos.y = -6.99;
        world.clock.sample(0.04);
        update_bricks(&mut world);
        assert!(world.left_bricks.is_empty());
    }

    #[test]
    fn test_speed_intents() {
        let mut world = world();
        apply_speed_intents(&mut world, true, false);
        apply_speed_intents(&mut world, true, false);
        assert!((world.state.speed_factor - 0.024).abs() < 1e-6);
        for _ in 0..10 {
            apply_speed_intents(&mut world, false, true);
        }
        assert_eq!(world.state.speed_factor, world.tuning.base_speed);
    }
}
