//! Simulation error types

use thiserror::Error;

/// Errors raised by the simulation core and its configuration loading.
///
/// None of these are fatal to a running game: the frame loop skips or rejects
/// the offending action and keeps going.
#[derive(Debug, Error)]
pub enum SimError {
    /// A bounded entity store has no room for another entity
    #[error("{store} store is full (capacity {capacity})")]
    StoreFull {
        store: &'static str,
        capacity: usize,
    },

    /// Two lines handed to an intersection are (nearly) parallel
    #[error("degenerate geometry: lines do not intersect")]
    DegenerateGeometry,

    /// Click-aim outside the laser's firing arc
    #[error("aim angle {angle_deg:.1}° outside the firing arc")]
    AimOutOfRange { angle_deg: f32 },

    /// Tuning file could not be read
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Tuning file is not valid JSON for `Tuning`
    #[error("tuning error: {0}")]
    Tuning(#[from] serde_json::Error),
}
