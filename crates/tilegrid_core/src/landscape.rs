//! Landscape and resource type tables.
//!
//! Both enumerations are closed and stored per tile as their `u8`
//! ordinal. Everything else about a variant (its family, display name,
//! minimap color, which types may border it) lives in static tables so
//! the grid never stores more than one byte per tile for either.

use serde::{Deserialize, Serialize};

// ============================================================================
// Landscape Families
// ============================================================================

/// Coarse grouping of landscape types used by the neighbor relation.
///
/// Two tiles may only touch when their families are the same or are
/// listed as compatible in [`LandscapeFamily::can_border`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LandscapeFamily {
    /// Open water deeper than the shoreline band.
    DeepWater,
    /// The shallow band directly at the shore.
    ShallowWater,
    /// Rivers crossing land.
    River,
    /// Beach sand between water and land.
    Sand,
    /// Grass, earth and the ground types derived from them.
    Green,
    /// Desert and its flattened forms.
    Desert,
    /// Mountain and the border ring around it.
    Mountain,
    /// Snow caps on top of mountains.
    Snow,
}

impl LandscapeFamily {
    /// Whether tiles of these two families may be adjacent.
    ///
    /// The relation is symmetric.
    #[must_use]
    pub const fn can_border(self, other: Self) -> bool {
        use LandscapeFamily::*;

        matches!(
            (self, other),
            (DeepWater, DeepWater)
                | (ShallowWater, ShallowWater)
                | (River, River)
                | (Sand, Sand)
                | (Green, Green)
                | (Desert, Desert)
                | (Mountain, Mountain)
                | (Snow, Snow)
                | (DeepWater, ShallowWater)
                | (ShallowWater, DeepWater)
                | (ShallowWater, Sand)
                | (Sand, ShallowWater)
                | (ShallowWater, River)
                | (River, ShallowWater)
                | (River, Green)
                | (Green, River)
                | (Sand, Green)
                | (Green, Sand)
                | (Sand, Desert)
                | (Desert, Sand)
                | (Green, Desert)
                | (Desert, Green)
                | (Green, Mountain)
                | (Mountain, Green)
                | (Desert, Mountain)
                | (Mountain, Desert)
                | (Mountain, Snow)
                | (Snow, Mountain)
        )
    }
}

// ============================================================================
// Landscape Types
// ============================================================================

/// Landscape type of a single tile.
///
/// The discriminant is the stored ordinal. `Grass` is ordinal 0 so a
/// zero-initialized grid is all grass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[repr(u8)]
pub enum LandscapeType {
    /// Plain grass.
    #[default]
    Grass = 0,
    /// Dry grass.
    DryGrass,
    /// Bare earth.
    Earth,
    /// Dry, cracked earth.
    DryEarth,
    /// Gravel.
    Gravel,
    /// Moorland.
    Moor,
    /// Mud.
    Mud,
    /// Ground flattened by traffic or construction.
    Flattened,
    /// Desert sand.
    Desert,
    /// Flattened desert.
    FlattenedDesert,
    /// Flattened desert with a hard edge, used under large buildings.
    SharpFlattenedDesert,
    /// Beach sand.
    Sand,
    /// Transition ring around mountains.
    MountainBorder,
    /// Mountain; the only type holding minable resources.
    Mountain,
    /// Snow.
    Snow,
    /// River, narrowest.
    River1,
    /// River.
    River2,
    /// River.
    River3,
    /// River, widest.
    River4,
    /// Shallow water at the shore; fish can be summoned here.
    Water1,
    /// Water.
    Water2,
    /// Water.
    Water3,
    /// Water.
    Water4,
    /// Water.
    Water5,
    /// Water.
    Water6,
    /// Water.
    Water7,
    /// Deepest water.
    Water8,
}

/// Static data attached to every [`LandscapeType`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LandscapeInfo {
    /// Family used for neighbor legality.
    pub family: LandscapeFamily,
    /// Human readable name.
    pub display_name: &'static str,
    /// RGB color used for minimaps and preview images.
    pub minimap_color: [u8; 3],
}

const fn info(
    family: LandscapeFamily,
    display_name: &'static str,
    minimap_color: [u8; 3],
) -> LandscapeInfo {
    LandscapeInfo {
        family,
        display_name,
        minimap_color,
    }
}

/// Indexed by ordinal; order must match the enum declaration.
static LANDSCAPE_INFO: [LandscapeInfo; LandscapeType::COUNT] = {
    use LandscapeFamily::*;
    [
        info(Green, "Grass", [0x3c, 0x8c, 0x28]),
        info(Green, "Dry grass", [0x7a, 0x8c, 0x3a]),
        info(Green, "Earth", [0x6e, 0x50, 0x2c]),
        info(Green, "Dry earth", [0x8a, 0x6c, 0x44]),
        info(Green, "Gravel", [0x84, 0x84, 0x7c]),
        info(Green, "Moor", [0x4a, 0x40, 0x30]),
        info(Green, "Mud", [0x5a, 0x44, 0x28]),
        info(Green, "Flattened", [0x90, 0x78, 0x50]),
        info(Desert, "Desert", [0xd8, 0xc0, 0x78]),
        info(Desert, "Flattened desert", [0xc8, 0xb0, 0x70]),
        info(Desert, "Sharp flattened desert", [0xc0, 0xa8, 0x68]),
        info(Sand, "Sand", [0xe8, 0xd8, 0x98]),
        info(Mountain, "Mountain border", [0x78, 0x70, 0x68]),
        info(Mountain, "Mountain", [0x60, 0x58, 0x50]),
        info(Snow, "Snow", [0xf0, 0xf0, 0xf8]),
        info(River, "River", [0x40, 0x70, 0xc0]),
        info(River, "River", [0x3c, 0x6c, 0xbc]),
        info(River, "River", [0x38, 0x68, 0xb8]),
        info(River, "River", [0x34, 0x64, 0xb4]),
        info(ShallowWater, "Shallow water", [0x40, 0x80, 0xd0]),
        info(DeepWater, "Water", [0x38, 0x78, 0xc8]),
        info(DeepWater, "Water", [0x34, 0x70, 0xc0]),
        info(DeepWater, "Water", [0x30, 0x68, 0xb8]),
        info(DeepWater, "Water", [0x2c, 0x60, 0xb0]),
        info(DeepWater, "Water", [0x28, 0x58, 0xa8]),
        info(DeepWater, "Water", [0x24, 0x50, 0xa0]),
        info(DeepWater, "Deep water", [0x20, 0x48, 0x98]),
    ]
};

impl LandscapeType {
    /// Number of landscape types.
    pub const COUNT: usize = 27;

    /// All landscape types in ordinal order.
    pub const ALL: [Self; Self::COUNT] = [
        Self::Grass,
        Self::DryGrass,
        Self::Earth,
        Self::DryEarth,
        Self::Gravel,
        Self::Moor,
        Self::Mud,
        Self::Flattened,
        Self::Desert,
        Self::FlattenedDesert,
        Self::SharpFlattenedDesert,
        Self::Sand,
        Self::MountainBorder,
        Self::Mountain,
        Self::Snow,
        Self::River1,
        Self::River2,
        Self::River3,
        Self::River4,
        Self::Water1,
        Self::Water2,
        Self::Water3,
        Self::Water4,
        Self::Water5,
        Self::Water6,
        Self::Water7,
        Self::Water8,
    ];

    /// Stored ordinal of this type.
    #[must_use]
    pub const fn ordinal(self) -> u8 {
        self as u8
    }

    /// Look up a type by ordinal.
    /// Returns `None` for ordinals outside the table.
    #[must_use]
    pub const fn from_ordinal(ordinal: u8) -> Option<Self> {
        if (ordinal as usize) < Self::COUNT {
            Some(Self::ALL[ordinal as usize])
        } else {
            None
        }
    }

    /// Static data for this type.
    #[must_use]
    pub fn info(self) -> &'static LandscapeInfo {
        &LANDSCAPE_INFO[self as usize]
    }

    /// Family of this type.
    #[must_use]
    pub fn family(self) -> LandscapeFamily {
        self.info().family
    }

    /// True for rivers and all water tiers.
    #[must_use]
    pub fn is_water(self) -> bool {
        matches!(
            self.family(),
            LandscapeFamily::DeepWater | LandscapeFamily::ShallowWater | LandscapeFamily::River
        )
    }

    /// True for the two flattened types that decay back over time.
    #[must_use]
    pub const fn is_flattened(self) -> bool {
        matches!(self, Self::Flattened | Self::FlattenedDesert)
    }

    /// Whether a tile of type `other` may sit next to a tile of this type.
    ///
    /// Family compatibility applies first. On top of that, flattened grass
    /// refuses desert and beach neighbors; those borders need
    /// [`LandscapeType::FlattenedDesert`] instead.
    #[must_use]
    pub fn is_allowed_neighbor(self, other: Self) -> bool {
        if self.flattened_grass_conflict(other) || other.flattened_grass_conflict(self) {
            return false;
        }
        self.family().can_border(other.family())
    }

    fn flattened_grass_conflict(self, other: Self) -> bool {
        self == Self::Flattened
            && matches!(
                other.family(),
                LandscapeFamily::Desert | LandscapeFamily::Sand
            )
    }
}

// ============================================================================
// Resource Types
// ============================================================================

/// Resource deposited on a tile.
///
/// `Nothing` is ordinal 0 so a zero-initialized grid holds no resources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[repr(u8)]
pub enum ResourceType {
    /// No resource.
    #[default]
    Nothing = 0,
    /// Fish, found in water.
    Fish,
    /// Coal, found in mountains.
    Coal,
    /// Iron ore, found in mountains.
    IronOre,
    /// Gold ore, found in mountains.
    GoldOre,
    /// Gemstones, found in mountains.
    Gemstone,
    /// Brimstone, found in mountains.
    Brimstone,
}

impl ResourceType {
    /// Number of resource types.
    pub const COUNT: usize = 7;

    /// All resource types in ordinal order.
    pub const ALL: [Self; Self::COUNT] = [
        Self::Nothing,
        Self::Fish,
        Self::Coal,
        Self::IronOre,
        Self::GoldOre,
        Self::Gemstone,
        Self::Brimstone,
    ];

    /// Stored ordinal of this type.
    #[must_use]
    pub const fn ordinal(self) -> u8 {
        self as u8
    }

    /// Look up a type by ordinal.
    #[must_use]
    pub const fn from_ordinal(ordinal: u8) -> Option<Self> {
        if (ordinal as usize) < Self::COUNT {
            Some(Self::ALL[ordinal as usize])
        } else {
            None
        }
    }

    /// Short display name.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Nothing => "Nothing",
            Self::Fish => "Fish",
            Self::Coal => "Coal",
            Self::IronOre => "Iron ore",
            Self::GoldOre => "Gold ore",
            Self::Gemstone => "Gemstone",
            Self::Brimstone => "Brimstone",
        }
    }
}
