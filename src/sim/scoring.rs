//! Score and lives bookkeeping
//!
//! The collision resolver reports what happened as `Outcome`s; this module
//! is the only place that turns them into score, lives, speed and the
//! game-over transition.

use super::state::{ColorKind, GameState, Lane};
use crate::tuning::Tuning;

/// Scoring-relevant result of a collision
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// A bullet destroyed a brick of this kind
    BrickShot(ColorKind),
    /// A colored brick reached its matching bin for the first time
    BrickSorted(Lane),
    /// A neutral brick reached the bin of this lane
    BrickMissed(Lane),
}

impl GameState {
    /// Apply one outcome. Ignored once the game is over.
    pub fn apply(&mut self, outcome: Outcome, tuning: &Tuning) {
        if !self.game_over {
            self.settle(outcome, tuning);
        }
    }

    /// Apply every outcome of one frame.
    ///
    /// A frame that ends the game still settles in full: a sort in one lane
    /// scores even when the other lane loses its last life in the same pass.
    pub fn apply_frame(&mut self, outcomes: impl IntoIterator<Item = Outcome>, tuning: &Tuning) {
        if self.game_over {
            return;
        }
        for outcome in outcomes {
            self.settle(outcome, tuning);
        }
    }

    fn settle(&mut self, outcome: Outcome, tuning: &Tuning) {
        match outcome {
            Outcome::BrickShot(kind) => {
                let delta = if kind.is_neutral() {
                    tuning.neutral_shot_points
                } else {
                    tuning.colored_shot_points
                };
                self.add_score(delta, tuning);
            }
            Outcome::BrickSorted(_) => self.add_score(tuning.sort_points, tuning),
            Outcome::BrickMissed(lane) => self.lose_life(lane),
        }
    }

    /// Score never drops below zero; every scoring event re-derives the speed
    fn add_score(&mut self, delta: i32, tuning: &Tuning) {
        self.score = (self.score + delta).max(0);
        self.speed_factor = tuning.speed_for_score(self.score);
    }

    fn lose_life(&mut self, lane: Lane) {
        let lives = match lane {
            Lane::Left => &mut self.left_lives,
            Lane::Right => &mut self.right_lives,
        };
        *lives = (*lives - 1).max(0);
        log::debug!("{} lane lost a life ({} left)", lane.as_str(), *lives);
        if *lives == 0 && !self.game_over {
            self.game_over = true;
            log::info!("Game over: {} lane out of lives", lane.as_str());
        }
    }
}
