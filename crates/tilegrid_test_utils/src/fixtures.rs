//! Test fixtures and helpers.
//!
//! Pre-built grids and collaborators that record what the grid tells
//! them, for consistent testing.

use std::collections::BTreeSet;
use std::sync::{Arc, Mutex, PoisonError};

use tilegrid_core::config::GridConfig;
use tilegrid_core::grid::{LandscapeGrid, TilePos};
use tilegrid_core::landscape::LandscapeType;
use tilegrid_core::notify::{ChangeListener, ProtectedProvider};

/// Create a grass grid of the given size.
///
/// # Panics
///
/// Panics if the dimensions are invalid.
#[must_use]
pub fn grid(width: u16, height: u16) -> LandscapeGrid {
    grid_with_config(&GridConfig::new(width, height))
}

/// Create a grid from a config.
///
/// # Panics
///
/// Panics if the config is invalid.
#[must_use]
pub fn grid_with_config(config: &GridConfig) -> LandscapeGrid {
    match LandscapeGrid::new(config) {
        Ok(grid) => grid,
        Err(e) => panic!("fixture config rejected: {e}"),
    }
}

/// Paint a rectangle of tiles with one landscape type, unchecked.
pub fn paint_rect(
    grid: &mut LandscapeGrid,
    x: u16,
    y: u16,
    width: u16,
    height: u16,
    landscape: LandscapeType,
) {
    for ty in y..y + height {
        for tx in x..x + width {
            grid.set_landscape_type(tx, ty, landscape, false);
        }
    }
}

/// Walk over every tile of `path` `walks` times, tile by tile.
pub fn tread_path(grid: &mut LandscapeGrid, path: &[TilePos], walks: usize) {
    for _ in 0..walks {
        for pos in path {
            grid.walk_on(pos.x, pos.y);
        }
    }
}

/// Run decay sweeps until the queue empties or `max_sweeps` is reached.
///
/// Returns the number of sweeps run.
pub fn sweep_until_idle(grid: &mut LandscapeGrid, max_sweeps: usize) -> usize {
    for sweep in 0..max_sweeps {
        if grid.decay_queue_len() == 0 {
            return sweep;
        }
        grid.run_decay_sweep();
    }
    max_sweeps
}

// =========================================================================
// Recording collaborators
// =========================================================================

/// Change listener that records every notification.
///
/// Clones share storage, so keep one clone and hand the other to the grid.
#[derive(Debug, Clone, Default)]
pub struct ChangeLog {
    events: Arc<Mutex<Vec<(u16, u16, u16)>>>,
}

impl ChangeLog {
    /// Create an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a log and install a clone of it on `grid`.
    #[must_use]
    pub fn attach(grid: &mut LandscapeGrid) -> Self {
        let log = Self::new();
        grid.set_change_listener(Some(Box::new(log.clone())));
        log
    }

    /// All notifications so far, as `(x, y, line_length)`.
    #[must_use]
    pub fn events(&self) -> Vec<(u16, u16, u16)> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Number of notifications so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// True if nothing was recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Forget recorded notifications.
    pub fn clear(&self) {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

impl ChangeListener for ChangeLog {
    fn on_row_changed(&mut self, x: u16, y: u16, line_length: u16) {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((x, y, line_length));
    }
}

/// Protection provider backed by a shared set of tiles.
///
/// Clones share the set, so tests can protect and release tiles after
/// installing a clone on the grid.
#[derive(Debug, Clone, Default)]
pub struct ProtectedSet {
    tiles: Arc<Mutex<BTreeSet<TilePos>>>,
}

impl ProtectedSet {
    /// Create a set and install a clone of it on `grid`.
    #[must_use]
    pub fn attach(grid: &mut LandscapeGrid) -> Self {
        let set = Self::default();
        grid.set_protected_provider(Some(Box::new(set.clone())));
        set
    }

    /// Protect a tile.
    pub fn protect(&self, pos: TilePos) {
        self.tiles
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(pos);
    }

    /// Stop protecting a tile.
    pub fn release(&self, pos: TilePos) {
        self.tiles
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&pos);
    }
}

impl ProtectedProvider for ProtectedSet {
    fn is_protected(&self, x: u16, y: u16) -> bool {
        self.tiles
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(&TilePos::new(x, y))
    }
}
