//! Block types.
//!
//! The kernel knows exactly four block types. [`BlockType::Air`] is the only
//! empty value; everything else collides and occludes.

use serde::{Deserialize, Serialize};

use crate::{BlockPos, CoreError};

/// Voxel material.
///
/// Discriminants are stable and used by tooling output and event logs.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum BlockType {
    /// Empty space.
    #[default]
    Air = 0,
    /// Surface layer.
    Grass = 1,
    /// Sub-surface layers.
    Dirt = 2,
    /// Bulk terrain.
    Stone = 3,
}

impl BlockType {
    /// Every block type, in discriminant order.
    pub const ALL: [Self; 4] = [Self::Air, Self::Grass, Self::Dirt, Self::Stone];

    /// Convert to the stable numeric representation.
    pub const fn as_u8(self) -> u8 {
        self as u8
    }

    /// Try to convert from the stable numeric representation.
    pub const fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::Air),
            1 => Some(Self::Grass),
            2 => Some(Self::Dirt),
            3 => Some(Self::Stone),
            _ => None,
        }
    }

    /// Returns true for every block except air.
    #[inline]
    pub const fn is_solid(self) -> bool {
        !matches!(self, Self::Air)
    }

    /// Returns true for air.
    #[inline]
    pub const fn is_air(self) -> bool {
        matches!(self, Self::Air)
    }

    /// Canonical string key used in configs/logs.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Air => "air",
            Self::Grass => "grass",
            Self::Dirt => "dirt",
            Self::Stone => "stone",
        }
    }
}

impl TryFrom<u8> for BlockType {
    type Error = CoreError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::from_u8(value).ok_or(CoreError::UnknownBlockType(value))
    }
}

/// A single voxel with its world position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Block {
    /// Material.
    #[serde(rename = "type")]
    pub block_type: BlockType,
    /// World X.
    pub x: i32,
    /// World Y.
    pub y: i32,
    /// World Z.
    pub z: i32,
}

impl Block {
    /// Build a block at `pos`.
    pub const fn new(block_type: BlockType, pos: BlockPos) -> Self {
        Self {
            block_type,
            x: pos.x,
            y: pos.y,
            z: pos.z,
        }
    }

    /// World position of this block.
    pub const fn pos(&self) -> BlockPos {
        BlockPos::new(self.x, self.y, self.z)
    }
}
