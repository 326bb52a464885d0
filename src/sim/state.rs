//! Game state and core simulation types
//!
//! `GameWorld` owns everything the frame loop mutates: entity stores, the
//! static field furniture (mirrors, bins, laser), timers, RNG and the
//! scoreboard. Nothing in the simulation is global.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::clock::GameClock;
use super::geometry::{Line, rect_corners, within};
use super::input::PointerState;
use super::ring::RingBuffer;
use crate::consts::*;
use crate::heading;
use crate::tuning::Tuning;

/// One of the two vertical columns bricks fall along
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Lane {
    Left,
    Right,
}

impl Lane {
    /// Horizontal band new bricks spawn in
    pub fn spawn_band(self) -> (f32, f32) {
        match self {
            Lane::Left => LEFT_LANE_X,
            Lane::Right => RIGHT_LANE_X,
        }
    }

    /// The colored kind this lane's bin accepts
    pub fn colored_kind(self) -> ColorKind {
        match self {
            Lane::Left => ColorKind::Red,
            Lane::Right => ColorKind::Green,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Lane::Left => "left",
            Lane::Right => "right",
        }
    }
}

/// Brick color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColorKind {
    /// Black brick: must be shot; reaching a bin costs a life
    Neutral,
    /// Must be sorted into the red (left) bin; shooting it costs points
    Red,
    /// Must be sorted into the green (right) bin; shooting it costs points
    Green,
}

impl ColorKind {
    pub fn is_neutral(self) -> bool {
        self == ColorKind::Neutral
    }
}

/// A laser bolt
#[derive(Debug, Clone, Serialize)]
pub struct Bullet {
    /// Rear reference corner; the bolt extends `length` along its heading
    pub pos: Vec2,
    pub length: f32,
    pub width: f32,
    /// Heading in degrees
    pub angle_deg: f32,
    pub alive: bool,
    /// Mirror this bullet bounced off most recently
    pub last_mirror: Option<MirrorId>,
}

impl Bullet {
    pub fn new(pos: Vec2, angle_deg: f32) -> Self {
        Self {
            pos,
            length: BULLET_LENGTH,
            width: BULLET_WIDTH,
            angle_deg,
            alive: true,
            last_mirror: None,
        }
    }

    /// Midpoint of the bolt's centerline
    pub fn center(&self) -> Vec2 {
        self.pos + heading(self.angle_deg) * (self.length / 2.0)
    }

    /// Rotated rectangle corners (rear, tip, rear-side, tip-side)
    pub fn corners(&self) -> [Vec2; 4] {
        rect_corners(self.pos, self.length, self.width, self.angle_deg)
    }

    /// Outside the `[-4, 4]²` play field
    pub fn is_out_of_bounds(&self) -> bool {
        self.pos.x.abs() > FIELD_HALF_EXTENT || self.pos.y.abs() > FIELD_HALF_EXTENT
    }

    pub fn kill(&mut self) {
        self.alive = false;
    }
}

/// A falling brick
#[derive(Debug, Clone, Serialize)]
pub struct Brick {
    pub kind: ColorKind,
    /// Top-left corner
    pub pos: Vec2,
    /// Horizontal size
    pub length: f32,
    /// Vertical size; the brick hangs below `pos.y`
    pub width: f32,
    /// Already scored by a bin
    pub visited: bool,
    pub alive: bool,
}

impl Brick {
    pub fn new(kind: ColorKind, pos: Vec2) -> Self {
        Self {
            kind,
            pos,
            length: BRICK_LENGTH,
            width: BRICK_WIDTH,
            visited: false,
            alive: true,
        }
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.pos.x + self.length / 2.0, self.pos.y - self.width / 2.0)
    }

    /// Bottom edge corners (front, back)
    pub fn bottom_corners(&self) -> (Vec2, Vec2) {
        let bottom = self.pos.y - self.width;
        (
            Vec2::new(self.pos.x, bottom),
            Vec2::new(self.pos.x + self.length, bottom),
        )
    }

    pub fn kill(&mut self) {
        self.alive = false;
    }
}

pub type MirrorId = u8;

/// A static reflector
#[derive(Debug, Clone, Serialize)]
pub struct Mirror {
    pub id: MirrorId,
    pub anchor: Vec2,
    pub angle_deg: f32,
    /// Vertical extent of the reflective segment
    pub y_min: f32,
    pub y_max: f32,
}

impl Mirror {
    pub fn new(id: MirrorId, anchor: Vec2, angle_deg: f32, y_min: f32, y_max: f32) -> Self {
        Self {
            id,
            anchor,
            angle_deg,
            y_min,
            y_max,
        }
    }

    /// The four field mirrors, in resolution order
    pub fn layout() -> [Mirror; 4] {
        [
            Mirror::new(1, Vec2::new(-0.75, 0.0), 60.0, 0.0, 0.664),
            Mirror::new(2, Vec2::new(2.75, -1.5), 60.0, -1.5, -0.85),
            Mirror::new(3, Vec2::new(-0.25, 3.0), 120.0, 3.0, 3.649),
            Mirror::new(4, Vec2::new(3.0, 2.0), 120.0, 2.0, 2.649),
        ]
    }

    /// Infinite line the mirror lies on
    pub fn line(&self) -> Line {
        Line::through(self.anchor, self.angle_deg)
    }

    pub fn spans_height(&self, y: f32) -> bool {
        within(y, self.y_min, self.y_max)
    }
}

/// A pannable sorting bin at the bottom of a lane
#[derive(Debug, Clone, Serialize)]
pub struct Bin {
    pub lane: Lane,
    /// Left edge before panning
    pub x: f32,
    /// Top edge
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// Horizontal pan offset
    pub pan: f32,
    /// Allowed pan offsets
    pub pan_range: (f32, f32),
}

impl Bin {
    pub fn red() -> Self {
        Self::new(Lane::Left, RED_BIN_X, RED_BIN_PAN_RANGE)
    }

    pub fn green() -> Self {
        Self::new(Lane::Right, GREEN_BIN_X, GREEN_BIN_PAN_RANGE)
    }

    fn new(lane: Lane, x: f32, pan_range: (f32, f32)) -> Self {
        Self {
            lane,
            x,
            y: CAPTURE_BAND.1,
            width: BIN_WIDTH,
            height: CAPTURE_BAND.1 - CAPTURE_BAND.0,
            pan: 0.0,
            pan_range,
        }
    }

    /// Current horizontal span `[left, right]`
    pub fn span(&self) -> (f32, f32) {
        let left = self.x + self.pan;
        (left, left + self.width)
    }

    /// Point inside the bin rectangle
    pub fn contains(&self, p: Vec2) -> bool {
        let (left, right) = self.span();
        within(p.x, left, right) && within(p.y, self.y - self.height, self.y)
    }

    /// Keyboard nudge: a step that would leave the travel range is undone
    pub fn nudge(&mut self, delta: f32) {
        let next = self.pan + delta;
        if within(next, self.pan_range.0, self.pan_range.1) {
            self.pan = next;
        }
    }

    /// Drag: follow the cursor, clamped to the travel range
    pub fn drag(&mut self, delta: f32) {
        self.pan = (self.pan + delta).clamp(self.pan_range.0, self.pan_range.1);
    }
}

/// The player's cannon
#[derive(Debug, Clone, Default, Serialize)]
pub struct Laser {
    /// Vertical offset of the cannon
    pub offset: f32,
    /// Rotation in steps of `LASER_DEGREES_PER_STEP`
    pub rotation_steps: f32,
}

impl Laser {
    pub fn pivot(&self) -> Vec2 {
        Vec2::new(LASER_PIVOT_X, self.offset + LASER_PIVOT_Y)
    }

    pub fn angle_deg(&self) -> f32 {
        self.rotation_steps * LASER_DEGREES_PER_STEP
    }

    /// Where new bullets appear
    pub fn muzzle(&self) -> Vec2 {
        self.pivot() + heading(self.angle_deg()) * LASER_BARREL_LENGTH
    }

    /// Keyboard move: a step that would leave the range is undone
    pub fn nudge(&mut self, delta: f32) {
        let next = self.offset + delta;
        if within(next, LASER_OFFSET_RANGE.0, LASER_OFFSET_RANGE.1) {
            self.offset = next;
        }
    }

    /// Drag: follow the cursor, clamped to the range
    pub fn drag(&mut self, delta: f32) {
        self.offset = (self.offset + delta).clamp(LASER_OFFSET_RANGE.0, LASER_OFFSET_RANGE.1);
    }

    pub fn rotate(&mut self, delta_steps: f32) {
        self.rotation_steps =
            (self.rotation_steps + delta_steps).clamp(-LASER_MAX_STEPS, LASER_MAX_STEPS);
    }

    pub fn aim(&mut self, angle_deg: f32) {
        self.rotation_steps =
            (angle_deg / LASER_DEGREES_PER_STEP).clamp(-LASER_MAX_STEPS, LASER_MAX_STEPS);
    }

    /// Hit test against the cannon body and its rotated barrel
    pub fn contains(&self, p: Vec2) -> bool {
        let body = within(p.x, -FIELD_HALF_EXTENT, -3.25)
            && within(p.y, self.offset + 0.5, self.offset + 1.0);
        if body {
            return true;
        }
        // Barrel is a 0.5 × 0.25 box centered on the heading; test in its frame
        let local = p - self.pivot();
        let dir = heading(self.angle_deg());
        let along = local.dot(dir);
        let across = local.dot(Vec2::new(-dir.y, dir.x));
        within(along, 0.0, LASER_BARREL_LENGTH) && within(across, -0.125, 0.125)
    }
}

/// Camera window over the play field
#[derive(Debug, Clone, Serialize)]
pub struct Viewport {
    /// 1.0 shows the whole field, 0.5 is the closest zoom
    pub zoom: f32,
    pub pan: Vec2,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            zoom: 1.0,
            pan: Vec2::ZERO,
        }
    }
}

impl Viewport {
    pub const MIN_ZOOM: f32 = 0.5;
    pub const MAX_ZOOM: f32 = 1.0;

    pub fn zoom_by(&mut self, delta: f32) {
        self.zoom = (self.zoom + delta).clamp(Self::MIN_ZOOM, Self::MAX_ZOOM);
        self.clamp_pan();
    }

    pub fn pan_by(&mut self, delta: Vec2) {
        self.pan += delta;
        self.clamp_pan();
    }

    /// Keep the visible window inside the play field
    fn clamp_pan(&mut self) {
        let slack = FIELD_HALF_EXTENT * (1.0 - self.zoom);
        self.pan = self.pan.clamp(Vec2::splat(-slack), Vec2::splat(slack));
    }

    /// Visible world rectangle `(min, max)`
    pub fn bounds(&self) -> (Vec2, Vec2) {
        let half = Vec2::splat(FIELD_HALF_EXTENT * self.zoom);
        (self.pan - half, self.pan + half)
    }
}

/// Discrete notifications for external collaborators (audio, HUD)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum GameEvent {
    BulletFired,
    BulletDestroyedBrick,
    BulletReflected,
    BrickMissed,
    BrickSorted,
}

/// Score, lives and flow flags
#[derive(Debug, Clone, Serialize)]
pub struct GameState {
    /// Never negative
    pub score: i32,
    pub left_lives: i32,
    pub right_lives: i32,
    /// Brick descent per brick tick
    pub speed_factor: f32,
    /// Terminal once set
    pub game_over: bool,
    pub paused: bool,
}

impl GameState {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            score: 0,
            left_lives: tuning.starting_lives,
            right_lives: tuning.starting_lives,
            speed_factor: tuning.base_speed,
            game_over: false,
            paused: false,
        }
    }

    pub fn lives(&self, lane: Lane) -> i32 {
        match lane {
            Lane::Left => self.left_lives,
            Lane::Right => self.right_lives,
        }
    }
}

/// Seeded once per run; the only source of randomness in the simulation
#[derive(Debug, Clone)]
pub struct GameRng {
    seed: u64,
    rng: Pcg32,
}

impl GameRng {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Uniform in `[lo, hi)`; `lo` when the range is empty
    pub fn uniform(&mut self, lo: f32, hi: f32) -> f32 {
        if hi > lo {
            self.rng.random_range(lo..hi)
        } else {
            lo
        }
    }

    /// True with the given probability
    pub fn chance(&mut self, probability: f64) -> bool {
        self.rng.random_bool(probability.clamp(0.0, 1.0))
    }
}

/// Complete simulation state
#[derive(Debug, Clone)]
pub struct GameWorld {
    pub tuning: Tuning,
    pub state: GameState,
    pub bullets: RingBuffer<Bullet>,
    pub left_bricks: RingBuffer<Brick>,
    pub right_bricks: RingBuffer<Brick>,
    pub mirrors: [Mirror; 4],
    pub red_bin: Bin,
    pub green_bin: Bin,
    pub laser: Laser,
    pub viewport: Viewport,
    pub clock: GameClock,
    pub rng: GameRng,
    pub pointer: PointerState,
    /// Events raised since the last drain
    pub events: Vec<GameEvent>,
}

impl GameWorld {
    /// Fresh world whose timers all start at `start_time`
    pub fn new(seed: u64, tuning: Tuning, start_time: f64) -> Self {
        log::info!("New game (seed {seed})");
        Self {
            state: GameState::new(&tuning),
            bullets: RingBuffer::new("bullet", tuning.bullet_capacity),
            left_bricks: RingBuffer::new("left brick", tuning.brick_capacity),
            right_bricks: RingBuffer::new("right brick", tuning.brick_capacity),
            mirrors: Mirror::layout(),
            red_bin: Bin::red(),
            green_bin: Bin::green(),
            laser: Laser::default(),
            viewport: Viewport::default(),
            clock: GameClock::new(&tuning, start_time),
            rng: GameRng::new(seed),
            pointer: PointerState::default(),
            events: Vec::new(),
            tuning,
        }
    }

    pub fn bricks(&self, lane: Lane) -> &RingBuffer<Brick> {
        match lane {
            Lane::Left => &self.left_bricks,
            Lane::Right => &self.right_bricks,
        }
    }

    pub fn bricks_mut(&mut self, lane: Lane) -> &mut RingBuffer<Brick> {
        match lane {
            Lane::Left => &mut self.left_bricks,
            Lane::Right => &mut self.right_bricks,
        }
    }

    pub fn bin(&self, lane: Lane) -> &Bin {
        match lane {
            Lane::Left => &self.red_bin,
            Lane::Right => &self.green_bin,
        }
    }

    /// Take all events raised since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Final score once the game has ended
    pub fn final_score(&self) -> Option<i32> {
        self.state.game_over.then_some(self.state.score)
    }
}
