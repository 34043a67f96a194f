//! Hex directions and the ring-walk area iterator.
//!
//! The grid is stored as a square array but tiles are hexagons: every
//! tile has six neighbors reached through the deltas in [`Direction`].
//!
//! Area checks walk concentric rings around a center tile with a fixed
//! six-entry step table. The visiting order is part of the contract:
//! construction placement checks short-circuit on the first mismatch, so
//! callers depend on which tile is looked at first.

use serde::{Deserialize, Serialize};

/// One of the six hex directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Up and to the right.
    NorthEast,
    /// Right.
    East,
    /// Down and to the right.
    SouthEast,
    /// Down and to the left.
    SouthWest,
    /// Left.
    West,
    /// Up and to the left.
    NorthWest,
}

impl Direction {
    /// Number of hex directions.
    pub const COUNT: usize = 6;

    /// All directions in clockwise order starting at north-east.
    pub const ALL: [Self; Self::COUNT] = [
        Self::NorthEast,
        Self::East,
        Self::SouthEast,
        Self::SouthWest,
        Self::West,
        Self::NorthWest,
    ];

    /// Grid offset to the neighbor in this direction.
    #[must_use]
    pub const fn grid_delta(self) -> (i32, i32) {
        match self {
            Self::NorthEast => (0, -1),
            Self::East => (1, 0),
            Self::SouthEast => (1, 1),
            Self::SouthWest => (0, 1),
            Self::West => (-1, 0),
            Self::NorthWest => (-1, -1),
        }
    }

    /// Coordinates of the neighbor in this direction (may be out of bounds).
    #[must_use]
    pub const fn neighbor_of(self, x: i32, y: i32) -> (i32, i32) {
        let (dx, dy) = self.grid_delta();
        (x + dx, y + dy)
    }
}

/// X step applied per ring side, in walk order.
pub const RING_STEP_X: [i32; Direction::COUNT] = [1, 0, -1, -1, 0, 1];

/// Y step applied per ring side, in walk order.
pub const RING_STEP_Y: [i32; Direction::COUNT] = [1, 1, 0, -1, -1, 0];

/// Iterator over a filled hex disk in ring-walk order.
///
/// Yields the center first, then every ring from radius 1 up to
/// `max_radius`. Each ring starts one tile north-east of the previous
/// ring's start and is walked as six sides of `radius` steps, so the
/// starting tile of a ring is the last one yielded for that ring.
/// Coordinates are signed and may lie outside any grid.
#[derive(Debug, Clone)]
pub struct HexAreaWalk {
    x: i32,
    y: i32,
    max_radius: u32,
    radius: u32,
    direction: usize,
    step: u32,
    center_pending: bool,
}

impl HexAreaWalk {
    /// Walk the disk of `max_radius` around `(x, y)`.
    #[must_use]
    pub const fn new(x: i32, y: i32, max_radius: u32) -> Self {
        Self {
            x,
            y,
            max_radius,
            radius: 0,
            direction: 0,
            step: 0,
            center_pending: true,
        }
    }

    /// Number of tiles in a disk of the given radius.
    #[must_use]
    pub const fn area(max_radius: u32) -> usize {
        let r = max_radius as usize;
        1 + 3 * r * (r + 1)
    }
}

impl Iterator for HexAreaWalk {
    type Item = (i32, i32);

    fn next(&mut self) -> Option<Self::Item> {
        if self.center_pending {
            self.center_pending = false;
            return Some((self.x, self.y));
        }

        loop {
            if self.radius > self.max_radius {
                return None;
            }

            if self.step < self.radius {
                self.x += RING_STEP_X[self.direction];
                self.y += RING_STEP_Y[self.direction];
                self.step += 1;
                return Some((self.x, self.y));
            }

            self.step = 0;
            self.direction += 1;
            if self.direction == Direction::COUNT {
                self.direction = 0;
                // next ring starts one step north-east
                self.y -= 1;
                self.radius += 1;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_radius_zero_is_center_only() {
        let tiles: Vec<_> = HexAreaWalk::new(5, 5, 0).collect();
        assert_eq!(tiles, vec![(5, 5)]);
    }

    #[test]
    fn test_radius_one_visits_neighbors_in_ring_order() {
        let tiles: Vec<_> = HexAreaWalk::new(5, 5, 1).collect();
        assert_eq!(
            tiles,
            vec![
                (5, 5),
                (6, 5),
                (6, 6),
                (5, 6),
                (4, 5),
                (4, 4),
                (5, 4),
            ]
        );
    }

    #[test]
    fn test_ring_one_equals_direction_neighbors() {
        let ring: HashSet<_> = HexAreaWalk::new(0, 0, 1).skip(1).collect();
        let neighbors: HashSet<_> = Direction::ALL
            .iter()
            .map(|d| d.neighbor_of(0, 0))
            .collect();
        assert_eq!(ring, neighbors);
    }

    #[test]
    fn test_area_sizes_and_uniqueness() {
        for radius in 0..6 {
            let tiles: Vec<_> = HexAreaWalk::new(10, 10, radius).collect();
            let unique: HashSet<_> = tiles.iter().copied().collect();
            assert_eq!(tiles.len(), HexAreaWalk::area(radius));
            assert_eq!(unique.len(), tiles.len(), "radius {radius} repeats a tile");
        }
    }

    #[test]
    fn test_second_ring_starts_two_north() {
        let tiles: Vec<_> = HexAreaWalk::new(0, 0, 2).collect();
        // ring 2 starts from (0, -2) and its first step goes south-east
        assert_eq!(tiles[7], (1, -1));
        assert_eq!(tiles.last(), Some(&(0, -2)));
    }

    #[test]
    fn test_opposite_directions_cancel() {
        for (a, b) in [
            (Direction::NorthEast, Direction::SouthWest),
            (Direction::East, Direction::West),
            (Direction::SouthEast, Direction::NorthWest),
        ] {
            let (ax, ay) = a.grid_delta();
            let (bx, by) = b.grid_delta();
            assert_eq!((ax + bx, ay + by), (0, 0));
        }
    }
}
