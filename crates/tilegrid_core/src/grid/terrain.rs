//! Height and landscape type of each tile.

use super::{LandscapeGrid, TilePos, DEFORMATION_PINNED};
use crate::hex::{Direction, HexAreaWalk};
use crate::landscape::LandscapeType;

impl LandscapeGrid {
    /// Terrain height of a tile.
    #[must_use]
    pub fn height_at(&self, x: u16, y: u16) -> i8 {
        self.heights[self.index(x, y)]
    }

    /// Set the terrain height of a tile.
    ///
    /// Construction sets heights directly, so any jump is allowed.
    pub fn set_height_at(&mut self, x: u16, y: u16, height: i8) {
        let index = self.index(x, y);
        self.heights[index] = height;
        self.notify(x, y);
    }

    /// Landscape type of a tile.
    #[must_use]
    pub fn landscape_type(&self, x: u16, y: u16) -> LandscapeType {
        self.landscape[self.index(x, y)]
    }

    /// Whether every in-bounds hex neighbor accepts `landscape` next to it.
    #[must_use]
    pub fn can_change_landscape_to(&self, x: u16, y: u16, landscape: LandscapeType) -> bool {
        Direction::ALL.iter().all(|direction| {
            let (nx, ny) = direction.neighbor_of(i32::from(x), i32::from(y));
            self.checked_index(nx, ny)
                .map_or(true, |index| self.landscape[index].is_allowed_neighbor(landscape))
        })
    }

    /// Change the landscape type of a tile.
    ///
    /// With `checked`, an illegal change is silently dropped and `false`
    /// is returned. Otherwise the change always commits.
    ///
    /// Turning a tile into [`LandscapeType::Flattened`] enrolls it in the
    /// decay sweep.
    pub fn set_landscape_type(
        &mut self,
        x: u16,
        y: u16,
        landscape: LandscapeType,
        checked: bool,
    ) -> bool {
        if checked && !self.can_change_landscape_to(x, y, landscape) {
            tracing::trace!(x, y, ?landscape, "Rejected landscape change");
            return false;
        }

        let index = self.index(x, y);
        if landscape == LandscapeType::Flattened && self.landscape[index] != LandscapeType::Flattened
        {
            self.decay_queue.enroll(index, TilePos::new(x, y));
        }

        self.landscape[index] = landscape;
        self.notify(x, y);
        true
    }

    /// Whether the tile and every tile within `max_radius` hex rings have
    /// one of `types`.
    ///
    /// Tiles are visited in ring-walk order (see [`HexAreaWalk`]) and the
    /// first mismatch ends the check. Tiles outside the grid count as a
    /// mismatch.
    #[must_use]
    pub fn is_hex_area_of_type(
        &self,
        x: u16,
        y: u16,
        max_radius: u32,
        types: &[LandscapeType],
    ) -> bool {
        HexAreaWalk::new(i32::from(x), i32::from(y), max_radius).all(|(cx, cy)| {
            self.checked_index(cx, cy)
                .is_some_and(|index| types.contains(&self.landscape[index]))
        })
    }

    /// Move a tile's height one unit toward `target_height` and flatten it
    /// for construction.
    ///
    /// The tile becomes [`LandscapeType::Flattened`] where that is legal and
    /// [`LandscapeType::FlattenedDesert`] otherwise. Its deformation counter
    /// is pinned so it never grows back on its own.
    pub fn flatten_and_change_height_towards(&mut self, x: u16, y: u16, target_height: i8) {
        let index = self.index(x, y);
        let current = self.heights[index];
        let step = (i16::from(target_height) - i16::from(current)).signum() as i8;
        self.heights[index] = current + step;

        if self.can_change_landscape_to(x, y, LandscapeType::Flattened) {
            self.set_landscape_type(x, y, LandscapeType::Flattened, true);
        } else {
            self.set_landscape_type(x, y, LandscapeType::FlattenedDesert, false);
        }
        self.deformation[index] = DEFORMATION_PINNED;

        self.notify(x, y);
    }

    /// Whether a building footprint is flattened at the expected height.
    ///
    /// Every offset from `origin` must sit at `expected_height` and be
    /// [`LandscapeType::Flattened`], unless flattened ground is not legal
    /// on that tile at all. Offsets leaving the grid fail the check.
    #[must_use]
    pub fn is_area_flattened_at_height(
        &self,
        origin: TilePos,
        offsets: &[(i16, i16)],
        expected_height: i8,
    ) -> bool {
        offsets.iter().all(|&(dx, dy)| {
            let Some(pos) = origin.offset(i32::from(dx), i32::from(dy)) else {
                return false;
            };
            if !self.in_bounds(pos.x, pos.y) {
                return false;
            }

            let index = self.index(pos.x, pos.y);
            self.heights[index] == expected_height
                && (self.landscape[index] == LandscapeType::Flattened
                    || !self.can_change_landscape_to(pos.x, pos.y, LandscapeType::Flattened))
        })
    }
}
