//! World, chunk and chunk-local coordinates.

use std::fmt;

use glam::{DVec3, IVec3};
use serde::{Deserialize, Serialize};

use crate::{CHUNK_SIZE, WORLD_HEIGHT};

/// Integer world coordinate of a voxel.
///
/// Implements Ord so ledgers keyed by position iterate deterministically.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub struct BlockPos {
    /// World X.
    pub x: i32,
    /// World Y.
    pub y: i32,
    /// World Z.
    pub z: i32,
}

impl BlockPos {
    /// Construct from components.
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Voxel containing the world-space point (per-axis floor).
    pub fn containing(point: DVec3) -> Self {
        Self {
            x: point.x.floor() as i32,
            y: point.y.floor() as i32,
            z: point.z.floor() as i32,
        }
    }

    /// Owning chunk (floor division, so negative coordinates map correctly).
    #[inline]
    pub fn chunk(self) -> ChunkPos {
        ChunkPos::from_block(self.x, self.z)
    }

    /// Chunk-local position, or `None` when Y lies outside the world.
    pub fn local(self) -> Option<LocalPos> {
        if self.y < 0 || self.y >= WORLD_HEIGHT as i32 {
            return None;
        }
        Some(LocalPos {
            x: self.x.rem_euclid(CHUNK_SIZE as i32) as usize,
            y: self.y as usize,
            z: self.z.rem_euclid(CHUNK_SIZE as i32) as usize,
        })
    }

    /// Returns true when Y is inside `[0, WORLD_HEIGHT)`.
    #[inline]
    pub fn in_world(self) -> bool {
        self.local().is_some()
    }

    /// Offset by a delta.
    pub const fn offset(self, dx: i32, dy: i32, dz: i32) -> Self {
        Self::new(self.x + dx, self.y + dy, self.z + dz)
    }

    /// Minimum corner as a world-space point.
    pub fn as_dvec3(self) -> DVec3 {
        DVec3::new(self.x as f64, self.y as f64, self.z as f64)
    }
}

impl From<IVec3> for BlockPos {
    fn from(v: IVec3) -> Self {
        Self::new(v.x, v.y, v.z)
    }
}

impl From<BlockPos> for IVec3 {
    fn from(p: BlockPos) -> Self {
        IVec3::new(p.x, p.y, p.z)
    }
}

impl fmt::Display for BlockPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

/// Chunk coordinate (X,Z) in chunk space.
/// Implements Ord for deterministic iteration in BTreeMap/BTreeSet (sorts by x, then z).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub struct ChunkPos {
    /// Chunk X.
    pub x: i32,
    /// Chunk Z.
    pub z: i32,
}

impl ChunkPos {
    /// Construct from components.
    pub const fn new(x: i32, z: i32) -> Self {
        Self { x, z }
    }

    /// Chunk owning the world column `(x, z)`.
    #[inline]
    pub fn from_block(x: i32, z: i32) -> Self {
        Self {
            x: x.div_euclid(CHUNK_SIZE as i32),
            z: z.div_euclid(CHUNK_SIZE as i32),
        }
    }

    /// Chunk containing a world-space point.
    pub fn containing(x: f64, z: f64) -> Self {
        Self::from_block(x.floor() as i32, z.floor() as i32)
    }

    /// World X of the chunk's local origin.
    #[inline]
    pub fn origin_x(self) -> i32 {
        self.x * CHUNK_SIZE as i32
    }

    /// World Z of the chunk's local origin.
    #[inline]
    pub fn origin_z(self) -> i32 {
        self.z * CHUNK_SIZE as i32
    }

    /// World position of a chunk-local voxel.
    pub fn world_pos(self, local: LocalPos) -> BlockPos {
        BlockPos::new(
            self.origin_x() + local.x as i32,
            local.y as i32,
            self.origin_z() + local.z as i32,
        )
    }

    /// Chebyshev distance in chunks.
    pub fn chebyshev_distance(self, other: Self) -> i32 {
        (self.x - other.x).abs().max((self.z - other.z).abs())
    }
}

impl fmt::Display for ChunkPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.z)
    }
}

/// Chunk-local position (X, Y, Z).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LocalPos {
    /// Local X in `[0, CHUNK_SIZE)`.
    pub x: usize,
    /// World Y in `[0, WORLD_HEIGHT)`.
    pub y: usize,
    /// Local Z in `[0, CHUNK_SIZE)`.
    pub z: usize,
}

impl LocalPos {
    /// Construct from components.
    pub const fn new(x: usize, y: usize, z: usize) -> Self {
        Self { x, y, z }
    }

    /// Linear index into a chunk grid laid out `[x][y][z]`.
    #[inline]
    pub fn index(self) -> usize {
        debug_assert!(self.x < CHUNK_SIZE);
        debug_assert!(self.y < WORLD_HEIGHT);
        debug_assert!(self.z < CHUNK_SIZE);
        (self.x * WORLD_HEIGHT + self.y) * CHUNK_SIZE + self.z
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negative_coordinates_floor_into_previous_chunk() {
        assert_eq!(ChunkPos::from_block(-1, -16), ChunkPos::new(-1, -1));
        assert_eq!(ChunkPos::from_block(-17, 15), ChunkPos::new(-2, 0));
        assert_eq!(ChunkPos::from_block(16, 0), ChunkPos::new(1, 0));

        let local = BlockPos::new(-1, 5, -16).local().unwrap();
        assert_eq!(local, LocalPos::new(15, 5, 0));
    }

    #[test]
    fn world_pos_roundtrips_through_local() {
        for pos in [
            BlockPos::new(0, 0, 0),
            BlockPos::new(-33, 12, 47),
            BlockPos::new(15, 63, -1),
        ] {
            let local = pos.local().unwrap();
            assert_eq!(pos.chunk().world_pos(local), pos);
        }
    }

    #[test]
    fn out_of_world_y_has_no_local() {
        assert!(BlockPos::new(0, -1, 0).local().is_none());
        assert!(BlockPos::new(0, WORLD_HEIGHT as i32, 0).local().is_none());
        assert!(BlockPos::new(0, WORLD_HEIGHT as i32 - 1, 0).in_world());
    }

    #[test]
    fn containing_floors_each_axis() {
        let pos = BlockPos::containing(DVec3::new(-0.5, 5.99, 2.0));
        assert_eq!(pos, BlockPos::new(-1, 5, 2));
    }

    #[test]
    fn test_local_pos_index() {
        assert_eq!(LocalPos::new(0, 0, 0).index(), 0);
        assert_eq!(LocalPos::new(0, 0, 15).index(), 15);
        assert_eq!(LocalPos::new(0, 1, 0).index(), CHUNK_SIZE);
        assert_eq!(LocalPos::new(1, 0, 0).index(), WORLD_HEIGHT * CHUNK_SIZE);
        assert_eq!(
            LocalPos::new(CHUNK_SIZE - 1, WORLD_HEIGHT - 1, CHUNK_SIZE - 1).index(),
            crate::CHUNK_VOLUME - 1
        );
    }

    #[test]
    fn test_chunk_pos_display() {
        assert_eq!(format!("{}", ChunkPos::new(5, -3)), "(5, -3)");
        assert_eq!(format!("{}", BlockPos::new(1, 2, 3)), "(1, 2, 3)");
    }

    #[test]
    fn test_chunk_pos_ordering() {
        let pos1 = ChunkPos::new(0, 0);
        let pos2 = ChunkPos::new(1, 0);
        let pos3 = ChunkPos::new(0, 1);

        assert!(pos1 < pos2);
        assert!(pos1 < pos3);
        assert_eq!(pos2.chebyshev_distance(pos3), 1);
    }

    #[test]
    fn ivec_conversion() {
        let pos = BlockPos::new(4, -2, 9);
        let v: IVec3 = pos.into();
        assert_eq!(BlockPos::from(v), pos);
    }
}
