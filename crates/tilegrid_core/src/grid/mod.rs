//! The per-tile world state aggregate.
//!
//! [`LandscapeGrid`] owns every per-tile array of a match: height,
//! landscape type, resources, blocked partitions and ground deformation.
//! It is created once from a [`GridConfig`], handed by reference to the
//! systems that need it and dropped when the match ends.
//!
//! All arrays are flat, sized `width * height` and indexed by
//! `x + y * width`. Operations are split by concern:
//!
//! - [`terrain`] - height, landscape type, neighbor legality, hex areas
//! - [`resources`] - deposits and the resource spells
//! - [`blocking`] - blocked-partition ids
//! - [`deformation`] - flatten-on-walk and decay back to grass
//! - [`snapshot`] - persisted form
//!
//! # Threading
//!
//! The simulation thread owns the grid and is the only caller of `&mut`
//! methods. Other threads learn about changes through the installed
//! [`ChangeListener`] or work from a [`GridSnapshot`].
//!
//! # Coordinates
//!
//! Coordinates outside the grid are a caller bug. Debug builds assert on
//! them; release builds only rely on slice bounds checks, so an `x` past
//! the row end can alias into the next row.

use std::collections::hash_map::DefaultHasher;
use std::fmt;
use std::hash::{Hash, Hasher};

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::config::{GridConfig, SpellTuning};
use crate::error::Result;
use crate::landscape::{LandscapeType, ResourceType};
use crate::notify::{ChangeListener, NullListener, ProtectedProvider, Unprotected};

pub mod blocking;
mod debug_overlay;
pub mod deformation;
pub mod resources;
pub mod snapshot;
pub mod terrain;

pub use debug_overlay::DebugOverlay;
pub use deformation::{SweepStats, DEFORMATION_PINNED};
use deformation::DecayQueue;
pub use resources::MAX_RESOURCE_AMOUNT_PER_POSITION;
pub use snapshot::{GridSnapshot, SNAPSHOT_VERSION};

/// Integer coordinate of a tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct TilePos {
    /// Column.
    pub x: u16,
    /// Row.
    pub y: u16,
}

impl TilePos {
    /// Create a tile position.
    #[must_use]
    pub const fn new(x: u16, y: u16) -> Self {
        Self { x, y }
    }

    /// Position shifted by a signed offset.
    ///
    /// Returns `None` if the result is negative or does not fit in `u16`.
    /// The result is not checked against any grid.
    #[must_use]
    pub fn offset(self, dx: i32, dy: i32) -> Option<Self> {
        let x = u16::try_from(i32::from(self.x) + dx).ok()?;
        let y = u16::try_from(i32::from(self.y) + dy).ok()?;
        Some(Self { x, y })
    }
}

impl From<(u16, u16)> for TilePos {
    fn from((x, y): (u16, u16)) -> Self {
        Self::new(x, y)
    }
}

/// Per-tile world state of one match.
pub struct LandscapeGrid {
    width: u16,
    height: u16,

    heights: Vec<i8>,
    landscape: Vec<LandscapeType>,
    resource_types: Vec<ResourceType>,
    resource_amounts: Vec<u8>,
    blocked_partitions: Vec<i16>,

    // transient: never persisted
    deformation: Vec<i8>,
    decay_queue: DecayQueue,
    debug_overlay: DebugOverlay,

    spells: SpellTuning,
    rng: ChaCha8Rng,
    listener: Box<dyn ChangeListener>,
    protected: Box<dyn ProtectedProvider>,
}

impl LandscapeGrid {
    /// Create a zero-initialized grid: grass everywhere, height 0, no
    /// resources, every tile blocked (partition 0).
    ///
    /// # Errors
    ///
    /// Returns [`GridError::InvalidDimensions`](crate::error::GridError::InvalidDimensions)
    /// if the config dimensions are unusable.
    pub fn new(config: &GridConfig) -> Result<Self> {
        config.validate()?;
        let tiles = config.tile_count();

        tracing::info!(
            width = config.width,
            height = config.height,
            debug_colors = config.debug_colors,
            "Created landscape grid"
        );

        Ok(Self {
            width: config.width,
            height: config.height,
            heights: vec![0; tiles],
            landscape: vec![LandscapeType::Grass; tiles],
            resource_types: vec![ResourceType::Nothing; tiles],
            resource_amounts: vec![0; tiles],
            blocked_partitions: vec![0; tiles],
            deformation: vec![0; tiles],
            decay_queue: DecayQueue::new(tiles),
            debug_overlay: DebugOverlay::new(config.debug_colors, tiles),
            spells: config.spells,
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            listener: Box::new(NullListener),
            protected: Box::new(Unprotected),
        })
    }

    /// Grid width in tiles.
    #[must_use]
    pub const fn width(&self) -> u16 {
        self.width
    }

    /// Grid height in tiles.
    #[must_use]
    pub const fn height(&self) -> u16 {
        self.height
    }

    /// Number of tiles.
    #[must_use]
    pub fn tile_count(&self) -> usize {
        self.heights.len()
    }

    /// Check if coordinates are within grid bounds.
    #[must_use]
    pub const fn in_bounds(&self, x: u16, y: u16) -> bool {
        x < self.width && y < self.height
    }

    /// Install a change listener. `None` restores the no-op listener.
    pub fn set_change_listener(&mut self, listener: Option<Box<dyn ChangeListener>>) {
        self.listener = listener.unwrap_or_else(|| Box::new(NullListener));
    }

    /// Install the provider consulted by decay steps. `None` restores
    /// [`Unprotected`].
    pub fn set_protected_provider(&mut self, provider: Option<Box<dyn ProtectedProvider>>) {
        self.protected = provider.unwrap_or_else(|| Box::new(Unprotected));
    }

    /// Hash of all per-tile state, including deformation counters.
    ///
    /// Two grids driven by the same calls in the same order hash equal;
    /// lockstep peers compare this to detect desyncs.
    #[must_use]
    pub fn state_hash(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        self.width.hash(&mut hasher);
        self.height.hash(&mut hasher);
        self.heights.hash(&mut hasher);
        self.landscape.hash(&mut hasher);
        self.resource_types.hash(&mut hasher);
        self.resource_amounts.hash(&mut hasher);
        self.blocked_partitions.hash(&mut hasher);
        self.deformation.hash(&mut hasher);
        hasher.finish()
    }

    // ------------------------------------------------------------------------
    // Debug overlay
    // ------------------------------------------------------------------------

    /// Whether the debug color overlay is allocated.
    #[must_use]
    pub fn has_debug_colors(&self) -> bool {
        self.debug_overlay.is_enabled()
    }

    /// Set the debug color of a tile. No-op when the overlay is disabled.
    pub fn set_debug_color(&mut self, x: u16, y: u16, argb: u32) {
        let index = self.index(x, y);
        self.debug_overlay.set(index, argb);
    }

    /// Debug color of a tile, 0 when unset or disabled.
    #[must_use]
    pub fn debug_color(&self, x: u16, y: u16) -> u32 {
        self.debug_overlay.get(self.index(x, y))
    }

    /// Clear every debug color.
    pub fn reset_debug_colors(&mut self) {
        self.debug_overlay.reset();
    }

    // ------------------------------------------------------------------------
    // Internal helpers
    // ------------------------------------------------------------------------

    #[inline]
    fn index(&self, x: u16, y: u16) -> usize {
        debug_assert!(
            self.in_bounds(x, y),
            "tile ({x}, {y}) outside {}x{} grid",
            self.width,
            self.height
        );
        x as usize + y as usize * self.width as usize
    }

    /// Index of signed coordinates, `None` outside the grid.
    #[inline]
    fn checked_index(&self, x: i32, y: i32) -> Option<usize> {
        let x = u16::try_from(x).ok()?;
        let y = u16::try_from(y).ok()?;
        self.in_bounds(x, y).then(|| self.index(x, y))
    }

    #[inline]
    fn notify(&mut self, x: u16, y: u16) {
        self.listener.on_row_changed(x, y, 1);
    }
}

impl fmt::Debug for LandscapeGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LandscapeGrid")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("decay_queue", &self.decay_queue.len())
            .field("debug_colors", &self.debug_overlay.is_enabled())
            .field("spells", &self.spells)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GridError;
    use std::sync::{Arc, Mutex};

    /// Listener that records into shared storage so tests can inspect it.
    #[derive(Clone, Default)]
    pub(crate) struct Recorder(pub Arc<Mutex<Vec<(u16, u16, u16)>>>);

    impl ChangeListener for Recorder {
        fn on_row_changed(&mut self, x: u16, y: u16, line_length: u16) {
            self.0.lock().unwrap().push((x, y, line_length));
        }
    }

    #[test]
    fn test_new_grid_is_zeroed() {
        let grid = LandscapeGrid::new(&GridConfig::new(8, 6)).unwrap();

        assert_eq!(grid.width(), 8);
        assert_eq!(grid.height(), 6);
        assert_eq!(grid.tile_count(), 48);
        for y in 0..6 {
            for x in 0..8 {
                assert_eq!(grid.height_at(x, y), 0);
                assert_eq!(grid.landscape_type(x, y), LandscapeType::Grass);
                assert_eq!(grid.resource_amount(x, y), 0);
                assert_eq!(grid.resource_type(x, y), ResourceType::Nothing);
                assert!(grid.is_blocked(x, y));
            }
        }
    }

    #[test]
    fn test_invalid_dimensions() {
        let result = LandscapeGrid::new(&GridConfig::new(0, 0));
        assert!(matches!(result, Err(GridError::InvalidDimensions { .. })));
    }

    #[test]
    fn test_bounds() {
        let grid = LandscapeGrid::new(&GridConfig::new(4, 3)).unwrap();
        assert!(grid.in_bounds(3, 2));
        assert!(!grid.in_bounds(4, 2));
        assert!(!grid.in_bounds(3, 3));
        assert_eq!(grid.checked_index(-1, 0), None);
        assert_eq!(grid.checked_index(0, 3), None);
        assert_eq!(grid.checked_index(2, 1), Some(6));
    }

    #[test]
    fn test_tile_pos_offset() {
        let pos = TilePos::new(5, 5);
        assert_eq!(pos.offset(-5, 2), Some(TilePos::new(0, 7)));
        assert_eq!(pos.offset(-6, 0), None);
        assert_eq!(TilePos::new(u16::MAX, 0).offset(1, 0), None);
    }

    #[test]
    fn test_listener_can_be_reset() {
        let mut grid = LandscapeGrid::new(&GridConfig::new(4, 4)).unwrap();
        let recorder = Recorder::default();
        grid.set_change_listener(Some(Box::new(recorder.clone())));

        grid.set_height_at(1, 1, 3);
        grid.set_change_listener(None);
        grid.set_height_at(2, 2, 3);

        assert_eq!(*recorder.0.lock().unwrap(), vec![(1, 1, 1)]);
    }

    #[test]
    fn test_debug_overlay_disabled_by_default() {
        let mut grid = LandscapeGrid::new(&GridConfig::new(4, 4)).unwrap();
        assert!(!grid.has_debug_colors());

        grid.set_debug_color(1, 1, 0xff00_ff00);
        assert_eq!(grid.debug_color(1, 1), 0);
    }

    #[test]
    fn test_debug_overlay_enabled() {
        let config = GridConfig::new(4, 4).with_debug_colors(true);
        let mut grid = LandscapeGrid::new(&config).unwrap();
        assert!(grid.has_debug_colors());

        grid.set_debug_color(1, 2, 0xff00_ff00);
        assert_eq!(grid.debug_color(1, 2), 0xff00_ff00);
        assert_eq!(grid.debug_color(2, 1), 0);

        grid.reset_debug_colors();
        assert_eq!(grid.debug_color(1, 2), 0);
    }

    #[test]
    fn test_state_hash_tracks_changes() {
        let config = GridConfig::new(8, 8);
        let mut a = LandscapeGrid::new(&config).unwrap();
        let b = LandscapeGrid::new(&config).unwrap();
        assert_eq!(a.state_hash(), b.state_hash());

        a.walk_on(3, 3);
        assert_ne!(a.state_hash(), b.state_hash());
    }
}
