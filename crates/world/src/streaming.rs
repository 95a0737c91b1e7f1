//! Set of chunks kept loaded around a moving viewer.

use std::collections::BTreeSet;

use serde::Serialize;
use voxkernel_core::ChunkPos;

/// Chunks entering and leaving the window after a move.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct ChunkDelta {
    /// Newly loaded chunks, in position order.
    pub loaded: Vec<ChunkPos>,
    /// Chunks dropped from the window, in position order.
    pub unloaded: Vec<ChunkPos>,
}

impl ChunkDelta {
    /// Returns true if nothing changed.
    pub fn is_empty(&self) -> bool {
        self.loaded.is_empty() && self.unloaded.is_empty()
    }
}

/// Square load window with hysteresis.
///
/// Chunks within `render_distance` (Chebyshev) of the centre are loaded;
/// they stay loaded until the centre moves more than `unload_distance` away.
#[derive(Debug, Clone)]
pub struct ChunkWindow {
    render_distance: i32,
    unload_distance: i32,
    loaded: BTreeSet<ChunkPos>,
}

impl ChunkWindow {
    /// Create an empty window. `unload_distance` is raised to at least `render_distance`.
    pub fn new(render_distance: i32, unload_distance: i32) -> Self {
        let render_distance = render_distance.max(0);
        Self {
            render_distance,
            unload_distance: unload_distance.max(render_distance),
            loaded: BTreeSet::new(),
        }
    }

    /// Chunk containing the world-space point `(x, z)`.
    pub fn chunk_of(x: f64, z: f64) -> ChunkPos {
        ChunkPos::containing(x, z)
    }

    /// Re-centre the window and report what changed.
    pub fn update(&mut self, center: ChunkPos) -> ChunkDelta {
        let mut delta = ChunkDelta::default();
        let r = self.render_distance;

        for x in center.x - r..=center.x + r {
            for z in center.z - r..=center.z + r {
                let pos = ChunkPos::new(x, z);
                if self.loaded.insert(pos) {
                    delta.loaded.push(pos);
                }
            }
        }

        let unload_distance = self.unload_distance;
        self.loaded.retain(|pos| {
            let keep = pos.chebyshev_distance(center) <= unload_distance;
            if !keep {
                delta.unloaded.push(*pos);
            }
            keep
        });

        delta.loaded.sort();
        delta
    }

    /// Loaded chunks in position order.
    pub fn loaded(&self) -> impl Iterator<Item = ChunkPos> + '_ {
        self.loaded.iter().copied()
    }

    /// Number of loaded chunks.
    pub fn len(&self) -> usize {
        self.loaded.len()
    }

    /// Returns true when nothing is loaded.
    pub fn is_empty(&self) -> bool {
        self.loaded.is_empty()
    }
}

impl Default for ChunkWindow {
    fn default() -> Self {
        Self::new(1, 2)
    }
}
