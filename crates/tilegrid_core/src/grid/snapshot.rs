//! Persisted form of a grid.
//!
//! A [`GridSnapshot`] holds the durable per-tile arrays only. Deformation
//! counters and debug colors are transient and start fresh after a load.
//! Flattened tiles are queued for decay again on restore, so paths worn
//! before a save still grow back.

use std::path::Path;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use super::{DebugOverlay, DecayQueue, LandscapeGrid, TilePos, MAX_RESOURCE_AMOUNT_PER_POSITION};
use crate::config::GridConfig;
use crate::error::{GridError, Result};
use crate::landscape::{LandscapeType, ResourceType};
use crate::notify::{NullListener, Unprotected};

/// Snapshot format version for compatibility.
pub const SNAPSHOT_VERSION: u32 = 1;

/// Durable state of a [`LandscapeGrid`].
///
/// Landscape and resource types are stored as ordinals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridSnapshot {
    /// Snapshot format version.
    pub version: u32,
    /// Grid width in tiles.
    pub width: u16,
    /// Grid height in tiles.
    pub height: u16,
    /// Terrain heights.
    pub heights: Vec<i8>,
    /// Landscape type ordinals.
    pub landscape: Vec<u8>,
    /// Resource type ordinals.
    pub resource_types: Vec<u8>,
    /// Resource amounts.
    pub resource_amounts: Vec<u8>,
    /// Blocked-partition ids.
    pub blocked_partitions: Vec<i16>,
}

impl GridSnapshot {
    /// Encode to bytes.
    ///
    /// # Errors
    /// Returns an error if serialization fails.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        Ok(bincode::serialize(self)?)
    }

    /// Decode from bytes and check the format version.
    ///
    /// # Errors
    /// Returns an error if the bytes do not decode or were written by a
    /// different format version.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let snapshot: Self = bincode::deserialize(bytes)?;
        if snapshot.version != SNAPSHOT_VERSION {
            return Err(GridError::SnapshotVersion {
                expected: SNAPSHOT_VERSION,
                found: snapshot.version,
            });
        }
        Ok(snapshot)
    }

    /// Save the snapshot to a file.
    ///
    /// # Errors
    /// Returns an error if serialization or file writing fails.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let bytes = self.to_bytes()?;
        std::fs::write(path, bytes).map_err(|source| GridError::SnapshotIo {
            path: path.display().to_string(),
            source,
        })
    }

    /// Load a snapshot from a file.
    ///
    /// # Errors
    /// Returns an error if file reading or decoding fails.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|source| GridError::SnapshotIo {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_bytes(&bytes)
    }

    fn check_len(&self, name: &str, len: usize) -> Result<()> {
        let expected = usize::from(self.width) * usize::from(self.height);
        if len == expected {
            Ok(())
        } else {
            Err(GridError::CorruptSnapshot(format!(
                "{name} has {len} entries, expected {expected}"
            )))
        }
    }
}

impl LandscapeGrid {
    /// Capture the durable state of the grid.
    #[must_use]
    pub fn snapshot(&self) -> GridSnapshot {
        GridSnapshot {
            version: SNAPSHOT_VERSION,
            width: self.width,
            height: self.height,
            heights: self.heights.clone(),
            landscape: self.landscape.iter().map(|l| l.ordinal()).collect(),
            resource_types: self.resource_types.iter().map(|r| r.ordinal()).collect(),
            resource_amounts: self.resource_amounts.clone(),
            blocked_partitions: self.blocked_partitions.clone(),
        }
    }

    /// Rebuild a grid from a snapshot.
    ///
    /// `config` supplies everything the snapshot does not carry: the
    /// generator seed, the debug overlay switch and spell tuning. Its
    /// dimensions must match the snapshot.
    ///
    /// # Errors
    /// Returns an error if the config is invalid, the dimensions disagree,
    /// or the snapshot arrays are malformed.
    pub fn from_snapshot(snapshot: GridSnapshot, config: &GridConfig) -> Result<Self> {
        config.validate()?;
        if snapshot.version != SNAPSHOT_VERSION {
            return Err(GridError::SnapshotVersion {
                expected: SNAPSHOT_VERSION,
                found: snapshot.version,
            });
        }
        if (snapshot.width, snapshot.height) != (config.width, config.height) {
            return Err(GridError::DimensionMismatch {
                snapshot_width: snapshot.width,
                snapshot_height: snapshot.height,
                config_width: config.width,
                config_height: config.height,
            });
        }

        snapshot.check_len("heights", snapshot.heights.len())?;
        snapshot.check_len("landscape", snapshot.landscape.len())?;
        snapshot.check_len("resource_types", snapshot.resource_types.len())?;
        snapshot.check_len("resource_amounts", snapshot.resource_amounts.len())?;
        snapshot.check_len("blocked_partitions", snapshot.blocked_partitions.len())?;

        let landscape = snapshot
            .landscape
            .iter()
            .map(|&ordinal| {
                LandscapeType::from_ordinal(ordinal).ok_or_else(|| {
                    GridError::CorruptSnapshot(format!("unknown landscape ordinal {ordinal}"))
                })
            })
            .collect::<Result<Vec<_>>>()?;
        let resource_types = snapshot
            .resource_types
            .iter()
            .map(|&ordinal| {
                ResourceType::from_ordinal(ordinal).ok_or_else(|| {
                    GridError::CorruptSnapshot(format!("unknown resource ordinal {ordinal}"))
                })
            })
            .collect::<Result<Vec<_>>>()?;
        if let Some(amount) = snapshot
            .resource_amounts
            .iter()
            .find(|&&amount| amount > MAX_RESOURCE_AMOUNT_PER_POSITION)
        {
            return Err(GridError::CorruptSnapshot(format!(
                "resource amount {amount} exceeds {MAX_RESOURCE_AMOUNT_PER_POSITION}"
            )));
        }

        let tiles = config.tile_count();
        tracing::info!(
            width = config.width,
            height = config.height,
            "Restored landscape grid from snapshot"
        );

        let mut grid = Self {
            width: snapshot.width,
            height: snapshot.height,
            heights: snapshot.heights,
            landscape,
            resource_types,
            resource_amounts: snapshot.resource_amounts,
            blocked_partitions: snapshot.blocked_partitions,
            deformation: vec![0; tiles],
            decay_queue: DecayQueue::new(tiles),
            debug_overlay: DebugOverlay::new(config.debug_colors, tiles),
            spells: config.spells,
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            listener: Box::new(NullListener),
            protected: Box::new(Unprotected),
        };
        grid.enroll_flattened_tiles();
        Ok(grid)
    }

    /// Queue every flattened tile for decay, with counters starting at 0.
    fn enroll_flattened_tiles(&mut self) {
        for y in 0..self.height {
            for x in 0..self.width {
                let index = self.index(x, y);
                if self.landscape[index] == LandscapeType::Flattened {
                    self.decay_queue.enroll(index, TilePos::new(x, y));
                }
            }
        }
    }

    /// Encode the durable state to bytes.
    ///
    /// # Errors
    /// Returns an error if serialization fails.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        self.snapshot().to_bytes()
    }

    /// Rebuild a grid from bytes produced by [`LandscapeGrid::to_bytes`].
    ///
    /// # Errors
    /// Returns an error if decoding fails or the snapshot does not fit
    /// `config`.
    pub fn from_bytes(bytes: &[u8], config: &GridConfig) -> Result<Self> {
        Self::from_snapshot(GridSnapshot::from_bytes(bytes)?, config)
    }
}
