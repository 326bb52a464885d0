//! Simulation module
//!
//! All gameplay logic lives here. Nothing in this module renders, plays
//! sound or reads the system clock:
//! - Time arrives as a per-frame sample
//! - Randomness comes from the world's seeded RNG
//! - Entities are visited head to tail in a fixed order

pub mod clock;
pub mod collision;
pub mod geometry;
pub mod input;
pub mod physics;
pub mod ring;
pub mod scoring;
pub mod snapshot;
pub mod spawner;
pub mod state;
pub mod tick;

pub use clock::{GameClock, Timer};
pub use geometry::{Line, Side, classify_point, line_intersection, reflect};
pub use input::{Grab, PointerState, TickInput, click_fire};
pub use ring::RingBuffer;
pub use scoring::Outcome;
pub use snapshot::Snapshot;
pub use state::{
    Bin, Brick, Bullet, ColorKind, GameEvent, GameRng, GameState, GameWorld, Lane, Laser, Mirror,
    MirrorId, Viewport,
};
pub use tick::{FrameReport, tick};
