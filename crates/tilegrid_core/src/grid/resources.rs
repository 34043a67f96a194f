//! Resource deposits per tile.
//!
//! Each tile holds at most one resource type and a small amount of it.
//! Amounts are clamped on every write and only ever decrease one unit at
//! a time through [`LandscapeGrid::try_consume_one`].

use super::{LandscapeGrid, TilePos};
use crate::landscape::{LandscapeType, ResourceType};
use crate::math::scale_amount;

/// Largest resource amount a single tile can hold.
pub const MAX_RESOURCE_AMOUNT_PER_POSITION: u8 = 16;

impl LandscapeGrid {
    /// Place a resource on a tile, replacing what was there.
    ///
    /// `amount` is clamped to [`MAX_RESOURCE_AMOUNT_PER_POSITION`].
    pub fn set_resource(&mut self, x: u16, y: u16, resource: ResourceType, amount: u8) {
        let index = self.index(x, y);
        self.resource_types[index] = resource;
        self.resource_amounts[index] = amount.min(MAX_RESOURCE_AMOUNT_PER_POSITION);
        self.notify(x, y);
    }

    /// Remaining resource amount on a tile (0 means none).
    #[must_use]
    pub fn resource_amount(&self, x: u16, y: u16) -> u8 {
        self.resource_amounts[self.index(x, y)]
    }

    /// Resource type on a tile.
    #[must_use]
    pub fn resource_type(&self, x: u16, y: u16) -> ResourceType {
        self.resource_types[self.index(x, y)]
    }

    /// Total amount of `resource` over the given tiles.
    ///
    /// Tiles holding a different resource contribute nothing.
    #[must_use]
    pub fn sum_resource<I>(&self, resource: ResourceType, positions: I) -> u32
    where
        I: IntoIterator<Item = TilePos>,
    {
        positions
            .into_iter()
            .map(|pos| self.index(pos.x, pos.y))
            .filter(|&index| self.resource_types[index] == resource)
            .map(|index| u32::from(self.resource_amounts[index]))
            .sum()
    }

    /// Take one unit of `resource` from a tile.
    ///
    /// Succeeds only if the tile holds that resource with a positive
    /// amount. Nothing changes on failure.
    pub fn try_consume_one(&mut self, pos: TilePos, resource: ResourceType) -> bool {
        let index = self.index(pos.x, pos.y);
        if self.resource_types[index] != resource || self.resource_amounts[index] == 0 {
            return false;
        }

        self.resource_amounts[index] -= 1;
        self.notify(pos.x, pos.y);
        true
    }

    /// Curse a mountain tile, scaling its resource amount by the configured
    /// curse factor.
    ///
    /// Only mountains can be cursed; any other tile is left untouched and
    /// `false` is returned.
    pub fn try_cursing_location(&mut self, pos: TilePos) -> bool {
        let index = self.index(pos.x, pos.y);
        if self.landscape[index] != LandscapeType::Mountain {
            return false;
        }

        let amount = scale_amount(self.resource_amounts[index], self.spells.curse_factor());
        let resource = self.resource_types[index];
        self.set_resource(pos.x, pos.y, resource, amount);
        true
    }

    /// Summon fish into a shallow water tile.
    ///
    /// Adds the configured amount on top of what the tile holds and makes
    /// the tile a fish deposit. Fails on anything but
    /// [`LandscapeType::Water1`].
    pub fn try_summon_fish(&mut self, pos: TilePos) -> bool {
        let index = self.index(pos.x, pos.y);
        if self.landscape[index] != LandscapeType::Water1 {
            return false;
        }

        let amount = self.resource_amounts[index].saturating_add(self.spells.summon_fish_amount);
        self.set_resource(pos.x, pos.y, ResourceType::Fish, amount);
        true
    }
}
