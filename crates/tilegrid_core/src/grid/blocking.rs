//! Blocked-partition ids.
//!
//! The connectivity system assigns every tile a partition id; tiles in
//! the same partition can reach each other. Id
//! [`BLOCKED_PARTITION`] marks a tile nothing can enter. This module only
//! stores and reports the ids.

use super::LandscapeGrid;
use crate::notify::BlockingProvider;

/// Partition id of tiles nothing can enter.
pub const BLOCKED_PARTITION: i16 = 0;

impl LandscapeGrid {
    /// Store the partition id of a tile.
    ///
    /// Partition ids are routing metadata and do not notify the change
    /// listener.
    pub fn set_blocked_partition(&mut self, x: u16, y: u16, partition: i16) {
        let index = self.index(x, y);
        self.blocked_partitions[index] = partition;
    }

    /// Partition id of a tile.
    #[must_use]
    pub fn blocked_partition(&self, x: u16, y: u16) -> i16 {
        self.blocked_partitions[self.index(x, y)]
    }

    /// True if the tile is in the blocked partition.
    #[must_use]
    pub fn is_blocked(&self, x: u16, y: u16) -> bool {
        self.blocked_partition(x, y) == BLOCKED_PARTITION
    }
}

impl BlockingProvider for LandscapeGrid {
    fn is_blocked(&self, x: u16, y: u16) -> bool {
        LandscapeGrid::is_blocked(self, x, y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GridConfig;
    use crate::grid::tests::Recorder;

    #[test]
    fn test_partition_round_trip() {
        let mut grid = LandscapeGrid::new(&GridConfig::new(5, 5)).unwrap();

        grid.set_blocked_partition(1, 2, 7);
        grid.set_blocked_partition(3, 3, -4);

        assert_eq!(grid.blocked_partition(1, 2), 7);
        assert_eq!(grid.blocked_partition(3, 3), -4);
        assert!(!grid.is_blocked(1, 2));
        assert!(grid.is_blocked(0, 0));

        grid.set_blocked_partition(1, 2, BLOCKED_PARTITION);
        assert!(grid.is_blocked(1, 2));
    }

    #[test]
    fn test_blocking_provider_matches_grid() {
        let mut grid = LandscapeGrid::new(&GridConfig::new(5, 5)).unwrap();
        grid.set_blocked_partition(2, 2, 1);

        let provider: &dyn BlockingProvider = &grid;
        assert!(!provider.is_blocked(2, 2));
        assert!(provider.is_blocked(2, 3));
    }

    #[test]
    fn test_partition_writes_are_silent() {
        let mut grid = LandscapeGrid::new(&GridConfig::new(5, 5)).unwrap();
        let recorder = Recorder::default();
        grid.set_change_listener(Some(Box::new(recorder.clone())));

        grid.set_blocked_partition(2, 2, 3);
        assert!(recorder.0.lock().unwrap().is_empty());
    }
}
