//! Ground deformation: paths appear where settlers walk and grow back
//! where they stop.
//!
//! Each tile carries one signed byte. Walking adds to it; once it passes
//! [`FLATTEN_THRESHOLD`] the tile turns into flattened ground. Flattened
//! tiles sit in the decay queue and lose one point per sweep until the
//! counter reaches [`DECAY_THRESHOLD`], at which point they turn back into
//! grass. The gap between the two thresholds is the hysteresis that keeps
//! lightly used tiles from flickering.
//!
//! [`DEFORMATION_PINNED`] marks ground flattened on purpose by
//! construction. Sweeps drop pinned tiles without touching them.
//!
//! There are no timers. An external scheduler calls
//! [`LandscapeGrid::run_decay_sweep`] once per cycle, or drives
//! [`LandscapeGrid::step_decay`] per tile itself.

use std::ops::Range;

use rand::Rng;

use super::{LandscapeGrid, TilePos};
use crate::landscape::LandscapeType;

/// Counter value of tiles flattened by construction; never decays.
pub const DEFORMATION_PINNED: i8 = i8::MAX;

/// Added per walk.
pub const WALK_INCREMENT: i8 = 3;

/// Walks stop counting once the counter reaches this value.
pub const WALK_SATURATION: i8 = 100;

/// A walk that leaves the counter above this flattens the tile.
pub const FLATTEN_THRESHOLD: i8 = 20;

/// A decay step that brings the counter to or below this reverts the tile.
pub const DECAY_THRESHOLD: i8 = -30;

/// Range the counter is reseeded from when a tile loses protection.
pub const REARM_RANGE: Range<i8> = 40..120;

/// Types a tile's neighborhood must consist of for traffic to flatten it.
const FLATTENABLE: [LandscapeType; 2] = [LandscapeType::Grass, LandscapeType::Flattened];

/// Tiles waiting for decay steps, in enrollment order.
#[derive(Debug, Clone, Default)]
pub(crate) struct DecayQueue {
    pending: Vec<TilePos>,
    enrolled: Vec<bool>,
}

impl DecayQueue {
    pub(crate) fn new(tile_count: usize) -> Self {
        Self {
            pending: Vec::new(),
            enrolled: vec![false; tile_count],
        }
    }

    /// Add a tile unless it is already queued.
    pub(crate) fn enroll(&mut self, index: usize, pos: TilePos) {
        if !self.enrolled[index] {
            self.enrolled[index] = true;
            self.pending.push(pos);
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.pending.len()
    }
}

/// Outcome of one [`LandscapeGrid::run_decay_sweep`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SweepStats {
    /// Tiles stepped this sweep.
    pub visited: usize,
    /// Tiles that finished and left the queue.
    pub finished: usize,
    /// Tiles still queued after the sweep.
    pub remaining: usize,
}

impl LandscapeGrid {
    /// Record that a settler walked over a tile.
    ///
    /// Once enough walks accumulate, the tile turns into flattened ground
    /// provided it and its six neighbors are all grass or flattened.
    pub fn walk_on(&mut self, x: u16, y: u16) {
        let index = self.index(x, y);
        let counter = self.deformation[index];
        if counter >= WALK_SATURATION {
            return;
        }

        let counter = counter + WALK_INCREMENT;
        self.deformation[index] = counter;
        if counter > FLATTEN_THRESHOLD {
            self.flatten(x, y);
        }
    }

    fn flatten(&mut self, x: u16, y: u16) {
        if self.landscape_type(x, y) == LandscapeType::Flattened {
            return;
        }
        if self.is_hex_area_of_type(x, y, 1, &FLATTENABLE)
            && self.set_landscape_type(x, y, LandscapeType::Flattened, true)
        {
            tracing::debug!(x, y, "Tile flattened by traffic");
        }
    }

    /// Advance decay of one tile by a single step.
    ///
    /// Returns `true` when the tile is done and should not be stepped
    /// again: it is protected, pinned, or just turned back into grass.
    /// Returns `false` while it keeps decaying.
    pub fn step_decay(&mut self, x: u16, y: u16) -> bool {
        if self.protected.is_protected(x, y) {
            return true;
        }

        let index = self.index(x, y);
        let counter = self.deformation[index];
        if counter == DEFORMATION_PINNED {
            return true;
        }

        let counter = counter.saturating_sub(1);
        if counter <= DECAY_THRESHOLD {
            self.deformation[index] = 0;
            if self.set_landscape_type(x, y, LandscapeType::Grass, true) {
                tracing::debug!(x, y, "Flattened tile grew back");
            }
            return true;
        }

        self.deformation[index] = counter;
        false
    }

    /// Re-arm decay on a tile that just lost its protection.
    ///
    /// Only flattened ground is affected; mountains, deserts and anything
    /// else are left alone and `false` is returned. The counter is reseeded
    /// from [`REARM_RANGE`] using the grid's seeded generator so all
    /// lockstep peers pick the same value.
    pub fn activate_unflattening(&mut self, x: u16, y: u16) -> bool {
        if !self.landscape_type(x, y).is_flattened() {
            return false;
        }

        let index = self.index(x, y);
        self.deformation[index] = self.rng.gen_range(REARM_RANGE);
        self.decay_queue.enroll(index, TilePos::new(x, y));
        true
    }

    /// Hook for the protection system: a tile stopped or started being
    /// protected.
    pub fn protected_changed(&mut self, x: u16, y: u16, now_protected: bool) {
        if !now_protected {
            self.activate_unflattening(x, y);
        }
    }

    /// Step every queued tile once and drop the ones that finished.
    ///
    /// Tiles keep their enrollment order. Tiles enrolled while the sweep
    /// runs are kept for the next sweep.
    pub fn run_decay_sweep(&mut self) -> SweepStats {
        let mut pending = std::mem::take(&mut self.decay_queue.pending);
        let visited = pending.len();
        let mut finished = 0;

        pending.retain(|pos| {
            let done = self.step_decay(pos.x, pos.y);
            if done {
                let index = self.index(pos.x, pos.y);
                self.decay_queue.enrolled[index] = false;
                finished += 1;
            }
            !done
        });

        pending.append(&mut self.decay_queue.pending);
        self.decay_queue.pending = pending;

        let stats = SweepStats {
            visited,
            finished,
            remaining: self.decay_queue.len(),
        };
        if stats.finished > 0 {
            tracing::debug!(
                visited = stats.visited,
                finished = stats.finished,
                remaining = stats.remaining,
                "Decay sweep"
            );
        }
        stats
    }

    /// Number of tiles waiting for decay steps.
    #[must_use]
    pub fn decay_queue_len(&self) -> usize {
        self.decay_queue.len()
    }

    /// Current deformation counter of a tile.
    #[must_use]
    pub fn deformation(&self, x: u16, y: u16) -> i8 {
        self.deformation[self.index(x, y)]
    }
}
