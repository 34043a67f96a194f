//! Determinism testing utilities.
//!
//! Provides a harness for verifying that a grid driven by the same
//! operations in the same order ends in the same state.
//!
//! # Testing Strategy
//!
//! Lockstep peers each hold their own grid and must agree bit for bit.
//! Sources of non-determinism include:
//!
//! - **Floating-point math**: Different CPUs can produce different results.
//!   Spell tuning goes through [`tilegrid_core::math::Fixed`] instead.
//!
//! - **System randomness**: Re-arming decay draws from a generator seeded
//!   by the grid config, never from the OS.
//!
//! - **Queue order**: The decay queue keeps enrollment order, so two
//!   peers step tiles in the same order.
//!
//! Operations are scripted as [`GridOp`] values so the same script can be
//! replayed on any number of grids and generated by proptest.

use std::thread;

use tilegrid_core::config::GridConfig;
use tilegrid_core::grid::{LandscapeGrid, TilePos};
use tilegrid_core::landscape::{LandscapeType, ResourceType};

use crate::fixtures::grid_with_config;

/// One scripted mutation of a grid.
///
/// Coordinates are wrapped into the grid they are applied to, so any
/// script fits any grid size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridOp {
    /// A settler walks over a tile.
    WalkOn(u16, u16),
    /// Set the terrain height.
    SetHeight(u16, u16, i8),
    /// Change the landscape type.
    SetLandscape {
        /// Column.
        x: u16,
        /// Row.
        y: u16,
        /// New type.
        landscape: LandscapeType,
        /// Enforce neighbor legality.
        checked: bool,
    },
    /// Place a resource.
    SetResource(u16, u16, ResourceType, u8),
    /// Take one unit of a resource.
    ConsumeOne(u16, u16, ResourceType),
    /// Curse a tile.
    Curse(u16, u16),
    /// Summon fish into a tile.
    SummonFish(u16, u16),
    /// Store a partition id.
    SetPartition(u16, u16, i16),
    /// Flatten for construction toward a height.
    FlattenTowards(u16, u16, i8),
    /// A tile lost its protection.
    Unprotect(u16, u16),
    /// Run one decay sweep.
    DecaySweep,
}

impl GridOp {
    /// Apply the operation to a grid.
    pub fn apply(self, grid: &mut LandscapeGrid) {
        let (width, height) = (grid.width(), grid.height());
        let wrap = move |x: u16, y: u16| (x % width, y % height);
        match self {
            Self::WalkOn(x, y) => {
                let (x, y) = wrap(x, y);
                grid.walk_on(x, y);
            }
            Self::SetHeight(x, y, height) => {
                let (x, y) = wrap(x, y);
                grid.set_height_at(x, y, height);
            }
            Self::SetLandscape {
                x,
                y,
                landscape,
                checked,
            } => {
                let (x, y) = wrap(x, y);
                grid.set_landscape_type(x, y, landscape, checked);
            }
            Self::SetResource(x, y, resource, amount) => {
                let (x, y) = wrap(x, y);
                grid.set_resource(x, y, resource, amount);
            }
            Self::ConsumeOne(x, y, resource) => {
                let (x, y) = wrap(x, y);
                grid.try_consume_one(TilePos::new(x, y), resource);
            }
            Self::Curse(x, y) => {
                let (x, y) = wrap(x, y);
                grid.try_cursing_location(TilePos::new(x, y));
            }
            Self::SummonFish(x, y) => {
                let (x, y) = wrap(x, y);
                grid.try_summon_fish(TilePos::new(x, y));
            }
            Self::SetPartition(x, y, partition) => {
                let (x, y) = wrap(x, y);
                grid.set_blocked_partition(x, y, partition);
            }
            Self::FlattenTowards(x, y, height) => {
                let (x, y) = wrap(x, y);
                grid.flatten_and_change_height_towards(x, y, height);
            }
            Self::Unprotect(x, y) => {
                let (x, y) = wrap(x, y);
                grid.protected_changed(x, y, false);
            }
            Self::DecaySweep => {
                grid.run_decay_sweep();
            }
        }
    }
}

/// Apply every operation of a script in order.
pub fn apply_all(grid: &mut LandscapeGrid, ops: &[GridOp]) {
    for op in ops {
        op.apply(grid);
    }
}

/// Result of a determinism test.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeterminismResult {
    /// Whether all runs produced identical results.
    pub is_deterministic: bool,
    /// Hashes from each run.
    pub hashes: Vec<u64>,
    /// Number of operations applied per run.
    pub steps: usize,
}

impl DeterminismResult {
    /// Get all unique hashes (should be 1 for a deterministic grid).
    #[must_use]
    pub fn unique_hashes(&self) -> Vec<u64> {
        let mut unique: Vec<u64> = self.hashes.clone();
        unique.sort_unstable();
        unique.dedup();
        unique
    }

    /// Assert that the runs were deterministic, with a detailed error message.
    ///
    /// # Panics
    ///
    /// Panics if the runs produced different hashes.
    pub fn assert_deterministic(&self) {
        if !self.is_deterministic {
            let unique = self.unique_hashes();
            panic!(
                "Grid is non-deterministic!\n\
                 Runs: {}\n\
                 Steps: {}\n\
                 Unique hashes: {} (expected 1)\n\
                 All hashes: {:?}",
                self.hashes.len(),
                self.steps,
                unique.len(),
                self.hashes
            );
        }
    }
}

/// Build a grid `runs` times, replay `ops` on each and compare state
/// hashes.
///
/// # Example
///
/// ```ignore
/// use tilegrid_core::config::GridConfig;
/// use tilegrid_test_utils::determinism::{verify_determinism, GridOp};
///
/// let ops = [GridOp::WalkOn(3, 3), GridOp::DecaySweep];
/// let result = verify_determinism(3, &GridConfig::new(16, 16), &ops);
/// result.assert_deterministic();
/// ```
#[must_use]
pub fn verify_determinism(runs: usize, config: &GridConfig, ops: &[GridOp]) -> DeterminismResult {
    let hashes: Vec<u64> = (0..runs)
        .map(|_| {
            let mut grid = grid_with_config(config);
            apply_all(&mut grid, ops);
            grid.state_hash()
        })
        .collect();

    let is_deterministic = hashes.windows(2).all(|w| w[0] == w[1]);
    DeterminismResult {
        is_deterministic,
        hashes,
        steps: ops.len(),
    }
}

/// Replay `ops` on `num_grids` grids in parallel using scoped threads.
///
/// # Panics
///
/// Panics if a worker thread panics.
#[must_use]
pub fn verify_parallel_determinism(
    num_grids: usize,
    config: &GridConfig,
    ops: &[GridOp],
) -> DeterminismResult {
    let hashes: Vec<u64> = thread::scope(|s| {
        let handles: Vec<_> = (0..num_grids)
            .map(|_| {
                s.spawn(|| {
                    let mut grid = grid_with_config(config);
                    apply_all(&mut grid, ops);
                    grid.state_hash()
                })
            })
            .collect();

        handles
            .into_iter()
            .map(|h| match h.join() {
                Ok(hash) => hash,
                Err(_) => panic!("grid worker thread panicked"),
            })
            .collect()
    });

    let is_deterministic = hashes.windows(2).all(|w| w[0] == w[1]);
    DeterminismResult {
        is_deterministic,
        hashes,
        steps: ops.len(),
    }
}

/// Replay `ops` on two grids in lockstep, finding the first divergence.
///
/// Useful for debugging non-determinism by finding exactly which
/// operation makes the grids differ.
///
/// # Returns
///
/// `None` if the grids agree after every operation, `Some(i)` if they
/// differ right after operation `i`.
#[must_use]
pub fn find_first_divergence(
    config_a: &GridConfig,
    config_b: &GridConfig,
    ops: &[GridOp],
) -> Option<usize> {
    let mut a = grid_with_config(config_a);
    let mut b = grid_with_config(config_b);

    for (i, op) in ops.iter().enumerate() {
        op.apply(&mut a);
        op.apply(&mut b);
        if a.state_hash() != b.state_hash() {
            tracing::warn!(step = i, ?op, "Grids diverged");
            return Some(i);
        }
    }
    None
}

/// Proptest strategies for grid testing.
pub mod strategies {
    use proptest::prelude::*;
    use tilegrid_core::landscape::{LandscapeType, ResourceType};

    use super::GridOp;

    /// Generate any landscape type.
    pub fn arb_landscape_type() -> impl Strategy<Value = LandscapeType> {
        proptest::sample::select(LandscapeType::ALL.to_vec())
    }

    /// Generate any resource type, including `Nothing`.
    pub fn arb_resource_type() -> impl Strategy<Value = ResourceType> {
        proptest::sample::select(ResourceType::ALL.to_vec())
    }

    /// Generate resource amounts, including values above the per-tile cap.
    pub fn arb_amount() -> impl Strategy<Value = u8> {
        any::<u8>()
    }

    /// Generate a coordinate pair inside a `width` x `height` grid.
    pub fn arb_tile(width: u16, height: u16) -> impl Strategy<Value = (u16, u16)> {
        (0..width, 0..height)
    }

    /// Generate any grid operation on a `width` x `height` grid.
    ///
    /// Walks are weighted up so scripts actually produce paths.
    pub fn arb_grid_op(width: u16, height: u16) -> impl Strategy<Value = GridOp> {
        prop_oneof![
            4 => arb_tile(width, height).prop_map(|(x, y)| GridOp::WalkOn(x, y)),
            1 => (arb_tile(width, height), any::<i8>())
                .prop_map(|((x, y), h)| GridOp::SetHeight(x, y, h)),
            2 => (arb_tile(width, height), arb_landscape_type(), any::<bool>()).prop_map(
                |((x, y), landscape, checked)| GridOp::SetLandscape {
                    x,
                    y,
                    landscape,
                    checked,
                }
            ),
            1 => (arb_tile(width, height), arb_resource_type(), arb_amount())
                .prop_map(|((x, y), r, a)| GridOp::SetResource(x, y, r, a)),
            1 => (arb_tile(width, height), arb_resource_type())
                .prop_map(|((x, y), r)| GridOp::ConsumeOne(x, y, r)),
            2 => (arb_tile(width, height), any::<bool>()).prop_map(|((x, y), curse)| {
                if curse {
                    GridOp::Curse(x, y)
                } else {
                    GridOp::SummonFish(x, y)
                }
            }),
            1 => (arb_tile(width, height), any::<i16>())
                .prop_map(|((x, y), p)| GridOp::SetPartition(x, y, p)),
            1 => (arb_tile(width, height), -8i8..8)
                .prop_map(|((x, y), h)| GridOp::FlattenTowards(x, y, h)),
            1 => arb_tile(width, height).prop_map(|(x, y)| GridOp::Unprotect(x, y)),
            2 => Just(GridOp::DecaySweep),
        ]
    }

    /// Generate a script of grid operations.
    pub fn arb_op_sequence(
        width: u16,
        height: u16,
        max_len: usize,
    ) -> impl Strategy<Value = Vec<GridOp>> {
        proptest::collection::vec(arb_grid_op(width, height), 0..max_len)
    }
}
