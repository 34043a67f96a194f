//! Grid configuration.
//!
//! A [`GridConfig`] fixes the grid dimensions for the lifetime of a match
//! and carries the few tuning values the grid itself applies. Configs are
//! plain data and can be written as RON:
//!
//! ```ron
//! GridConfig(
//!     width: 256,
//!     height: 256,
//!     seed: 7,
//!     debug_colors: false,
//!     spells: SpellTuning(
//!         curse_mountain_percent: 50,
//!         summon_fish_amount: 10,
//!     ),
//! )
//! ```

use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{GridError, Result};
use crate::math::{percent, Fixed};

/// Largest width or height a grid may have.
pub const MAX_GRID_SIDE: u16 = i16::MAX as u16;

/// Tuning for spells that act on tile resources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpellTuning {
    /// Multiplier applied to a mountain's resource amount when cursed
    /// (100 = unchanged).
    pub curse_mountain_percent: u16,
    /// Fish added to a shallow water tile by the summon spell.
    pub summon_fish_amount: u8,
}

impl Default for SpellTuning {
    fn default() -> Self {
        Self {
            curse_mountain_percent: 50,
            summon_fish_amount: 10,
        }
    }
}

impl SpellTuning {
    /// Curse multiplier as a fixed-point factor.
    #[must_use]
    pub fn curse_factor(&self) -> Fixed {
        percent(self.curse_mountain_percent)
    }
}

/// Configuration for a [`LandscapeGrid`](crate::grid::LandscapeGrid).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    /// Grid width in tiles.
    pub width: u16,
    /// Grid height in tiles.
    pub height: u16,
    /// Seed for the deterministic generator used when re-arming decay.
    pub seed: u64,
    /// Allocate the per-tile debug color overlay.
    pub debug_colors: bool,
    /// Spell tuning.
    pub spells: SpellTuning,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            width: 128,
            height: 128,
            seed: 12345,
            debug_colors: false,
            spells: SpellTuning::default(),
        }
    }
}

impl GridConfig {
    /// Create a config for the given dimensions with default tuning.
    #[must_use]
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            ..Default::default()
        }
    }

    /// Small map (64x64 tiles).
    #[must_use]
    pub fn small() -> Self {
        Self::new(64, 64)
    }

    /// Large map (512x512 tiles).
    #[must_use]
    pub fn large() -> Self {
        Self::new(512, 512)
    }

    /// Set the random seed.
    #[must_use]
    pub const fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Enable or disable the debug color overlay.
    #[must_use]
    pub const fn with_debug_colors(mut self, enabled: bool) -> Self {
        self.debug_colors = enabled;
        self
    }

    /// Replace the spell tuning.
    #[must_use]
    pub const fn with_spells(mut self, spells: SpellTuning) -> Self {
        self.spells = spells;
        self
    }

    /// Number of tiles a grid built from this config holds.
    #[must_use]
    pub const fn tile_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Check that the dimensions are usable.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::InvalidDimensions`] if either side is zero or
    /// larger than [`MAX_GRID_SIDE`].
    pub fn validate(&self) -> Result<()> {
        let side_ok = |side: u16| side > 0 && side <= MAX_GRID_SIDE;
        if side_ok(self.width) && side_ok(self.height) {
            Ok(())
        } else {
            Err(GridError::InvalidDimensions {
                width: self.width,
                height: self.height,
                max: MAX_GRID_SIDE,
            })
        }
    }

    /// Parse a config from RON text and validate it.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not a valid config.
    pub fn from_ron_str(text: &str) -> Result<Self> {
        Self::parse(text, "<inline>")
    }

    /// Load a config from a RON file and validate it.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let path_str = path.display().to_string();

        let mut file = std::fs::File::open(path).map_err(|e| GridError::ConfigIo {
            path: path_str.clone(),
            source: e,
        })?;

        let mut contents = String::new();
        file.read_to_string(&mut contents)
            .map_err(|e| GridError::ConfigIo {
                path: path_str.clone(),
                source: e,
            })?;

        let config = Self::parse(&contents, &path_str)?;
        tracing::info!(
            "Loaded grid config '{}' ({}x{})",
            path_str,
            config.width,
            config.height
        );
        Ok(config)
    }

    fn parse(text: &str, path: &str) -> Result<Self> {
        let config: Self = ron::from_str(text).map_err(|e| GridError::ConfigParse {
            path: path.to_string(),
            source: e,
        })?;
        config.validate()?;
        Ok(config)
    }
}
