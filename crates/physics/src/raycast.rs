//! Voxel picking by fixed-step ray marching.
//!
//! The ray is sampled every [`RAY_STEP`] units and the first sample landing
//! in a solid voxel wins. The face normal is the per-axis difference between
//! the previous sample's voxel and the hit voxel, so a ray grazing an edge
//! can report a diagonal normal or none at all.

use glam::{DVec3, IVec3};
use serde::{Deserialize, Serialize};
use tracing::trace;
use voxkernel_core::BlockPos;
use voxkernel_world::TerrainGenerator;

/// Distance between consecutive ray samples.
pub const RAY_STEP: f64 = 0.1;
/// Default pick distance.
pub const DEFAULT_REACH: f64 = 6.0;

/// Result of a raycast against the voxel world.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RaycastHit {
    /// World-space sample that landed in the hit block.
    pub point: DVec3,
    /// Integer normal of the entered face; may be zero or diagonal.
    ///
    /// Not unit length: a diagonal hit yields components on several axes,
    /// e.g. `(1, 1, 0)`.
    pub normal: IVec3,
    /// The block that was hit.
    pub block_position: BlockPos,
    /// Voxel of the sample before the hit, where a placed block would go.
    pub adjacent_block_position: BlockPos,
}

/// Ray marcher with a configurable reach and step.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Raycaster {
    /// Maximum distance sampled along the ray.
    pub reach: f64,
    /// Distance between samples.
    pub step: f64,
}

impl Default for Raycaster {
    fn default() -> Self {
        Self {
            reach: DEFAULT_REACH,
            step: RAY_STEP,
        }
    }
}

impl Raycaster {
    /// Cast with this marcher's reach.
    pub fn cast(
        &self,
        terrain: &mut TerrainGenerator,
        origin: DVec3,
        direction: DVec3,
    ) -> Option<RaycastHit> {
        march(terrain, origin, direction, self.reach, self.step)
    }
}

/// Cast from `origin` along `direction` for at most `max_distance`.
///
/// Returns `None` for a zero direction or when nothing solid lies within
/// reach. Edits are honoured; voxels above or below the world are empty.
pub fn cast(
    terrain: &mut TerrainGenerator,
    origin: DVec3,
    direction: DVec3,
    max_distance: f64,
) -> Option<RaycastHit> {
    march(terrain, origin, direction, max_distance, RAY_STEP)
}

/// [`cast`] with [`DEFAULT_REACH`].
pub fn cast_default(
    terrain: &mut TerrainGenerator,
    origin: DVec3,
    direction: DVec3,
) -> Option<RaycastHit> {
    cast(terrain, origin, direction, DEFAULT_REACH)
}

fn march(
    terrain: &mut TerrainGenerator,
    origin: DVec3,
    direction: DVec3,
    max_distance: f64,
    step: f64,
) -> Option<RaycastHit> {
    let direction = direction.try_normalize()?;
    if !step.is_finite() || step <= 0.0 || !max_distance.is_finite() {
        return None;
    }
    // Samples are indexed so the previous sample is recomputed exactly.
    let sample = |i: i64| origin + direction * (i as f64 * step);

    let mut i: i64 = 0;
    loop {
        let distance = i as f64 * step;
        if distance >= max_distance {
            return None;
        }

        let point = sample(i);
        let block_position = BlockPos::containing(point);
        if terrain.is_block_solid_at(block_position) {
            let adjacent_block_position = BlockPos::containing(sample(i - 1));
            let normal = IVec3::from(adjacent_block_position) - IVec3::from(block_position);
            trace!(block = %block_position, distance, "Ray hit");
            return Some(RaycastHit {
                point,
                normal,
                block_position,
                adjacent_block_position,
            });
        }
        i += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use voxkernel_core::{BlockType, WORLD_HEIGHT};
    use voxkernel_world::TerrainConfig;

    fn flat(height: f64) -> TerrainGenerator {
        TerrainGenerator::with_config(TerrainConfig {
            amplitude: 0.0,
            base_height: height,
            ..TerrainConfig::default()
        })
    }

    #[test]
    fn test_raycast_hit_from_side() {
        let mut terrain = flat(20.0);
        terrain
            .set_block(BlockPos::new(3, 25, 0), BlockType::Stone)
            .unwrap();

        let hit = cast_default(
            &mut terrain,
            DVec3::new(0.5, 25.5, 0.5),
            DVec3::new(1.0, 0.0, 0.0),
        )
        .expect("block within reach");
        assert_eq!(hit.block_position, BlockPos::new(3, 25, 0));
        assert_eq!(hit.normal, IVec3::new(-1, 0, 0));
        assert_eq!(hit.adjacent_block_position, BlockPos::new(2, 25, 0));
        assert!(hit.point.x >= 3.0 && hit.point.x < 3.1);
    }

    #[test]
    fn test_raycast_miss() {
        let mut terrain = flat(20.0);
        let hit = cast_default(
            &mut terrain,
            DVec3::new(0.5, 30.5, 0.5),
            DVec3::new(0.0, 1.0, 0.0),
        );
        assert!(hit.is_none());
    }

    #[test]
    fn test_raycast_max_distance() {
        let mut terrain = flat(20.0);
        terrain
            .set_block(BlockPos::new(5, 25, 0), BlockType::Stone)
            .unwrap();
        let origin = DVec3::new(0.5, 25.5, 0.5);
        let east = DVec3::new(1.0, 0.0, 0.0);

        assert!(cast(&mut terrain, origin, east, 3.0).is_none());
        assert!(cast(&mut terrain, origin, east, 6.0).is_some());
    }

    #[test]
    fn zero_direction_never_hits() {
        let mut terrain = flat(20.0);
        assert!(cast_default(&mut terrain, DVec3::new(0.5, 20.5, 0.5), DVec3::ZERO).is_none());
    }

    #[test]
    fn direction_is_normalized() {
        let mut terrain = flat(20.0);
        let hit = cast_default(
            &mut terrain,
            DVec3::new(0.5, 23.5, 0.5),
            DVec3::new(0.0, -40.0, 0.0),
        )
        .expect("surface below");
        assert_eq!(hit.block_position, BlockPos::new(0, 20, 0));
        assert_eq!(hit.normal, IVec3::new(0, 1, 0));
    }

    #[test]
    fn ignores_space_above_world() {
        let mut terrain = flat(20.0);
        let top = WORLD_HEIGHT as f64 - 0.5;
        let hit = cast_default(
            &mut terrain,
            DVec3::new(0.5, top, 0.5),
            DVec3::new(0.0, 1.0, 0.0),
        );
        assert!(hit.is_none());
    }

    #[test]
    fn removed_blocks_are_transparent() {
        let mut terrain = flat(20.0);
        terrain.remove_block(BlockPos::new(0, 20, 0)).unwrap();
        let hit = cast_default(
            &mut terrain,
            DVec3::new(0.5, 22.5, 0.5),
            DVec3::new(0.0, -1.0, 0.0),
        )
        .expect("dirt below the removed grass");
        assert_eq!(hit.block_position, BlockPos::new(0, 19, 0));
        assert_eq!(hit.adjacent_block_position, BlockPos::new(0, 20, 0));
    }

    #[test]
    fn raycaster_uses_configured_reach() {
        let mut terrain = flat(20.0);
        let short = Raycaster {
            reach: 1.0,
            ..Raycaster::default()
        };
        let origin = DVec3::new(0.5, 23.5, 0.5);
        let down = DVec3::new(0.0, -1.0, 0.0);
        assert!(short.cast(&mut terrain, origin, down).is_none());
        assert!(Raycaster::default().cast(&mut terrain, origin, down).is_some());
    }
}
