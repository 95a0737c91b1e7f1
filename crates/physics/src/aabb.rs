use glam::DVec3;
use voxkernel_core::BlockPos;

use crate::{PLAYER_HEIGHT, PLAYER_WIDTH};

/// Axis-aligned bounding box used for collisions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    /// Minimum corner (x, y, z).
    pub min: DVec3,
    /// Maximum corner (x, y, z).
    pub max: DVec3,
}

impl Aabb {
    /// Create a new AABB ensuring min <= max per axis.
    pub fn new(min: DVec3, max: DVec3) -> Self {
        debug_assert!(min.cmple(max).all());
        Self { min, max }
    }

    /// Player box standing with its feet centred on `feet`.
    pub fn player(feet: DVec3) -> Self {
        let half = PLAYER_WIDTH / 2.0;
        Self {
            min: DVec3::new(feet.x - half, feet.y, feet.z - half),
            max: DVec3::new(feet.x + half, feet.y + PLAYER_HEIGHT, feet.z + half),
        }
    }

    /// Unit cube occupying the block at `pos`.
    pub fn block(pos: BlockPos) -> Self {
        let min = pos.as_dvec3();
        Self {
            min,
            max: min + DVec3::ONE,
        }
    }

    /// Tests strict overlap with another AABB; touching faces do not count.
    pub fn intersects(&self, other: &Self) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
            && self.min.z < other.max.z
            && self.max.z > other.min.z
    }

    /// The same box moved by `offset`.
    pub fn translated(&self, offset: DVec3) -> Self {
        Self {
            min: self.min + offset,
            max: self.max + offset,
        }
    }

    /// Inclusive range of block positions the box may touch.
    pub fn block_span(&self) -> (BlockPos, BlockPos) {
        (BlockPos::containing(self.min), BlockPos::containing(self.max))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn player_box_dimensions() {
        let aabb = Aabb::player(DVec3::new(1.0, 2.0, 3.0));
        assert!((aabb.min.x - 0.7).abs() < 1e-12);
        assert!((aabb.max.x - 1.3).abs() < 1e-12);
        assert_eq!(aabb.min.y, 2.0);
        assert!((aabb.max.y - 3.8).abs() < 1e-12);
        assert!((aabb.max.z - aabb.min.z - PLAYER_WIDTH).abs() < 1e-12);
    }

    #[test]
    fn block_box_is_unit_cube() {
        let aabb = Aabb::block(BlockPos::new(-2, 5, 7));
        assert_eq!(aabb.min, DVec3::new(-2.0, 5.0, 7.0));
        assert_eq!(aabb.max, DVec3::new(-1.0, 6.0, 8.0));
    }

    #[test]
    fn touching_faces_do_not_intersect() {
        let a = Aabb::block(BlockPos::new(0, 0, 0));
        let b = Aabb::block(BlockPos::new(1, 0, 0));
        assert!(!a.intersects(&b));
        assert!(!b.intersects(&a));

        let c = a.translated(DVec3::new(0.5, 0.0, 0.0));
        assert!(a.intersects(&c));
        assert!(c.intersects(&b));
    }

    #[test]
    fn block_span_floors_corners() {
        let aabb = Aabb::player(DVec3::new(0.5, 21.0, -0.5));
        let (lo, hi) = aabb.block_span();
        assert_eq!(lo, BlockPos::new(0, 21, -1));
        assert_eq!(hi, BlockPos::new(0, 22, -1));
    }
}
