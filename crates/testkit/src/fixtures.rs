//! Hand-shaped worlds for scenario tests.

use voxkernel_core::{BlockPos, BlockType, WORLD_HEIGHT};
use voxkernel_world::{EditError, TerrainConfig, TerrainGenerator};

/// Terrain with the grass cap at `height` in every column.
///
/// The surface is clamped like any other terrain, so heights outside
/// `[1, WORLD_HEIGHT - 1]` are pinned to the nearest bound.
pub fn flat_terrain(height: i32) -> TerrainGenerator {
    TerrainGenerator::with_config(TerrainConfig {
        amplitude: 0.0,
        base_height: height as f64,
        ..TerrainConfig::default()
    })
}

/// Clear the whole column through `pos` to air, then place `block` at `pos`.
pub fn isolate_block(
    terrain: &mut TerrainGenerator,
    pos: BlockPos,
    block: BlockType,
) -> Result<(), EditError> {
    for y in 0..WORLD_HEIGHT as i32 {
        terrain.remove_block(BlockPos::new(pos.x, y, pos.z))?;
    }
    terrain.set_block(pos, block)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flat_terrain_surface_everywhere() {
        let terrain = flat_terrain(12);
        for (x, z) in [(0, 0), (-40, 17), (1000, -999)] {
            assert_eq!(terrain.terrain_height(x, z), 12);
        }
    }

    #[test]
    fn isolated_block_is_only_solid_in_column() {
        let mut terrain = flat_terrain(20);
        let pos = BlockPos::new(0, 5, 0);
        isolate_block(&mut terrain, pos, BlockType::Stone).expect("in world");

        for y in 0..WORLD_HEIGHT as i32 {
            let solid = terrain.is_block_solid_at(BlockPos::new(0, y, 0));
            assert_eq!(solid, y == 5, "y={}", y);
        }
        assert!(terrain.is_block_solid_at(BlockPos::new(1, 5, 0)));
    }
}
