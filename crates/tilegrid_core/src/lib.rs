//! # Tilegrid Core
//!
//! Deterministic tile-grid world state for a settlement simulation.
//!
//! This crate owns the shared per-tile substrate every other subsystem
//! reads and writes:
//! - Terrain height and landscape type, with neighbor-legality checks
//! - Resource deposits, clamped per tile
//! - Blocked-partition ids used by pathfinding and connectivity
//! - Ground deformation: grass flattens under foot traffic and grows
//!   back after disuse
//!
//! The crate never initiates pathfinding or drawing. It answers queries
//! and pushes change notifications to whoever listens.
//!
//! Like any lockstep simulation core it contains no system randomness,
//! no floating point math and no IO outside of explicit config and
//! snapshot loading.
//!
//! ## Crate Structure
//!
//! - [`grid`] - The [`LandscapeGrid`](grid::LandscapeGrid) aggregate
//! - [`landscape`] - Landscape and resource type tables
//! - [`hex`] - Hex directions and the ring-walk area iterator
//! - [`notify`] - Change listeners, protection and blocking seams
//! - [`config`] - Grid configuration (RON)
//! - [`math`] - Fixed-point helpers

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic)]

pub mod config;
pub mod error;
pub mod grid;
pub mod hex;
pub mod landscape;
pub mod math;
pub mod notify;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::config::{GridConfig, SpellTuning};
    pub use crate::error::{GridError, Result};
    pub use crate::grid::{
        GridSnapshot, LandscapeGrid, SweepStats, TilePos, MAX_RESOURCE_AMOUNT_PER_POSITION,
    };
    pub use crate::hex::{Direction, HexAreaWalk};
    pub use crate::landscape::{LandscapeFamily, LandscapeType, ResourceType};
    pub use crate::math::Fixed;
    pub use crate::notify::{
        BlockingProvider, ChangeListener, NullListener, ProtectedProvider, Unprotected,
    };
}
