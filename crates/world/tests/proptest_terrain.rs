//! Property-based tests for generated terrain
//!
//! Critical invariants:
//! - Every column is stone, then dirt, then a single grass cap, then air
//! - Surface heights stay inside the world
//! - A block is rendered iff it is solid and has an air or out-of-chunk face

use std::collections::BTreeSet;

use proptest::prelude::*;
use voxkernel_world::{
    BlockType, ChunkPos, LocalPos, TerrainGenerator, CHUNK_SIZE, DIRT_DEPTH, WORLD_HEIGHT,
};

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    /// Property: generated columns follow the layer rule for their height.
    #[test]
    fn columns_follow_layer_rule(
        seed in 0.0f64..100_000.0,
        chunk_x in -50i32..50,
        chunk_z in -50i32..50,
    ) {
        let mut terrain = TerrainGenerator::new(seed);
        let pos = ChunkPos::new(chunk_x, chunk_z);
        let chunk = terrain.generate_chunk(pos).clone();

        for x in 0..CHUNK_SIZE {
            for z in 0..CHUNK_SIZE {
                let h = terrain.terrain_height(pos.origin_x() + x as i32, pos.origin_z() + z as i32);
                prop_assert!((1..WORLD_HEIGHT as i32).contains(&h));
                for y in 0..WORLD_HEIGHT as i32 {
                    let expected = if y > h {
                        BlockType::Air
                    } else if y == h {
                        BlockType::Grass
                    } else if y >= h - DIRT_DEPTH {
                        BlockType::Dirt
                    } else {
                        BlockType::Stone
                    };
                    prop_assert_eq!(chunk.block(LocalPos::new(x, y as usize, z)), expected);
                }
            }
        }
    }

    /// Property: the render list is exactly the set of exposed solid blocks.
    #[test]
    fn rendered_blocks_are_exposed(
        seed in 0.0f64..100_000.0,
        chunk_x in -50i32..50,
        chunk_z in -50i32..50,
    ) {
        let mut terrain = TerrainGenerator::new(seed);
        let pos = ChunkPos::new(chunk_x, chunk_z);
        let chunk = terrain.generate_chunk(pos).clone();
        let visible = chunk.blocks_for_rendering();
        prop_assert!(!visible.is_empty());

        let faces = [(1, 0, 0), (-1, 0, 0), (0, 1, 0), (0, -1, 0), (0, 0, 1), (0, 0, -1)];
        let mut expected = BTreeSet::new();
        for x in 0..CHUNK_SIZE as i32 {
            for y in 0..WORLD_HEIGHT as i32 {
                for z in 0..CHUNK_SIZE as i32 {
                    if chunk.block_at(x, y, z).is_air() {
                        continue;
                    }
                    // block_at reads air outside the grid.
                    let exposed = faces
                        .iter()
                        .any(|(dx, dy, dz)| chunk.block_at(x + dx, y + dy, z + dz).is_air());
                    if exposed {
                        expected.insert((pos.origin_x() + x, y, pos.origin_z() + z));
                    }
                }
            }
        }

        let rendered: BTreeSet<_> = visible.iter().map(|b| (b.x, b.y, b.z)).collect();
        prop_assert_eq!(rendered.len(), visible.len());
        prop_assert_eq!(rendered, expected);

    }
}
