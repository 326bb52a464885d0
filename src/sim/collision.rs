//! Collision detection and response
//!
//! Runs every frame after integration, in a fixed order:
//! 1. bullet × brick (left lane, then right lane)
//! 2. bullet × mirror, mirrors in layout order
//! 3. brick × bin
//!
//! Hits are reported as `Outcome`s and handed to the scoreboard together at
//! the end of the pass, so every event raised here is matched by its score
//! change even in the frame that ends the game.

use super::geometry::{Line, line_intersection, reflect, straddles, within};
use super::scoring::Outcome;
use super::state::{Bin, Brick, Bullet, GameEvent, GameWorld, Lane, Mirror};
use crate::consts::CAPTURE_BAND;
use crate::error::SimError;
use crate::normalize_degrees;

/// Resolve every interaction for this frame and apply the scoring outcomes
pub fn resolve(world: &mut GameWorld) {
    let mut outcomes = Vec::new();
    bullets_vs_bricks(world, &mut outcomes);
    bullets_vs_mirrors(world);
    bricks_vs_bins(world, &mut outcomes);
    world.state.apply_frame(outcomes, &world.tuning);
}

/// Coarse proximity test between a bullet and a brick.
///
/// Compares the bullet's centerline midpoint with the brick's center using
/// an axis-aligned box of the combined half sizes. The bullet's rotation is
/// ignored here on purpose; it keeps hits generous for thin bolts.
pub fn bullet_hits_brick(bullet: &Bullet, brick: &Brick) -> bool {
    let delta = bullet.center() - brick.center();
    delta.x.abs() <= (bullet.length + brick.length) / 2.0
        && delta.y.abs() <= (bullet.width + brick.width) / 2.0
}

/// Bullets destroy the first live brick they touch; both are retired
pub fn bullets_vs_bricks(world: &mut GameWorld, outcomes: &mut Vec<Outcome>) {
    let GameWorld {
        bullets,
        left_bricks,
        right_bricks,
        events,
        ..
    } = world;

    for (lane, bricks) in [(Lane::Left, left_bricks), (Lane::Right, right_bricks)] {
        for bullet in bullets.iter_mut().filter(|b| b.alive) {
            let Some(brick) = bricks
                .iter_mut()
                .filter(|b| b.alive)
                .find(|brick| bullet_hits_brick(bullet, brick))
            else {
                continue;
            };
            bullet.kill();
            brick.kill();
            log::debug!(
                "Bullet destroyed {:?} brick in {} lane at ({:.2}, {:.2})",
                brick.kind,
                lane.as_str(),
                brick.pos.x,
                brick.pos.y
            );
            events.push(GameEvent::BulletDestroyedBrick);
            outcomes.push(Outcome::BrickShot(brick.kind));
        }
    }
}

/// Reflect a bullet off a mirror if it is crossing the mirror segment.
///
/// The bullet must straddle the mirror's line, have at least one corner at
/// the segment's height, not have bounced off this mirror last, and its
/// path must meet the line within the segment's height. On success the
/// bullet moves to the contact point with its heading reflected.
pub fn reflect_off_mirror(bullet: &mut Bullet, mirror: &Mirror) -> Result<bool, SimError> {
    let line = mirror.line();
    let corners = bullet.corners();
    if !straddles(&corners, &line) {
        return Ok(false);
    }
    if !corners.iter().any(|c| mirror.spans_height(c.y)) {
        return Ok(false);
    }
    if bullet.last_mirror == Some(mirror.id) {
        return Ok(false);
    }

    let path = Line::through(bullet.pos, bullet.angle_deg);
    let contact = line_intersection(&line, &path)?;
    if !mirror.spans_height(contact.y) {
        return Ok(false);
    }

    bullet.pos = contact;
    bullet.angle_deg = normalize_degrees(reflect(mirror.angle_deg, bullet.angle_deg));
    bullet.last_mirror = Some(mirror.id);
    Ok(true)
}

pub fn bullets_vs_mirrors(world: &mut GameWorld) {
    let GameWorld {
        bullets,
        mirrors,
        events,
        ..
    } = world;

    for mirror in mirrors.iter() {
        for bullet in bullets.iter_mut().filter(|b| b.alive) {
            match reflect_off_mirror(bullet, mirror) {
                Ok(true) => {
                    log::debug!(
                        "Bullet reflected off mirror {} at ({:.2}, {:.2}), heading {:.1}°",
                        mirror.id,
                        bullet.pos.x,
                        bullet.pos.y,
                        bullet.angle_deg
                    );
                    events.push(GameEvent::BulletReflected);
                }
                Ok(false) => {}
                Err(err) => log::trace!("Skipping mirror {}: {err}", mirror.id),
            }
        }
    }
}

/// Both bottom corners inside the bin's span and the capture band
pub fn brick_in_bin(brick: &Brick, bin: &Bin) -> bool {
    let (left, right) = bin.span();
    let (front, back) = brick.bottom_corners();
    [front, back]
        .iter()
        .all(|p| within(p.x, left, right) && within(p.y, CAPTURE_BAND.0, CAPTURE_BAND.1))
}

/// Judge bricks reaching their lane's bin.
///
/// Neutral bricks cost the lane a life. Colored bricks score once, guarded by
/// `visited`. Every judged brick is pushed further down so it clears the
/// capture band.
pub fn bricks_vs_bins(world: &mut GameWorld, outcomes: &mut Vec<Outcome>) {
    let GameWorld {
        left_bricks,
        right_bricks,
        red_bin,
        green_bin,
        events,
        tuning,
        ..
    } = world;

    let lanes = [
        (Lane::Left, left_bricks, &*red_bin),
        (Lane::Right, right_bricks, &*green_bin),
    ];
    for (lane, bricks, bin) in lanes {
        for brick in bricks.iter_mut().filter(|b| b.alive) {
            if !brick_in_bin(brick, bin) {
                continue;
            }
            if brick.kind.is_neutral() {
                log::debug!("Neutral brick reached the {} bin", lane.as_str());
                events.push(GameEvent::BrickMissed);
                outcomes.push(Outcome::BrickMissed(lane));
            } else if brick.kind == lane.colored_kind() && !brick.visited {
                brick.visited = true;
                log::debug!("{:?} brick sorted into the {} bin", brick.kind, lane.as_str());
                events.push(GameEvent::BrickSorted);
                outcomes.push(Outcome::BrickSorted(lane));
            }
            brick.pos.y -= tuning.bin_nudge;
        }
    }
}
