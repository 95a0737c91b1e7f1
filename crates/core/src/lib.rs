#![warn(missing_docs)]
//! Core primitives shared across the workspace.

pub mod block;
pub mod coords;

use serde::{Deserialize, Serialize};
use thiserror::Error;

// Re-export commonly used types
pub use block::{Block, BlockType};
pub use coords::{BlockPos, ChunkPos, LocalPos};

/// Chunk width and depth (X and Z axes) in voxels.
pub const CHUNK_SIZE: usize = 16;
/// World height (Y axis) in voxels. Chunks span the full height.
pub const WORLD_HEIGHT: usize = 64;
/// Total voxel count per chunk.
pub const CHUNK_VOLUME: usize = CHUNK_SIZE * WORLD_HEIGHT * CHUNK_SIZE;

/// Fixed tick type (20 TPS => 50 ms per tick).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SimTick(pub u64);

impl SimTick {
    /// First tick in any deterministic timeline.
    pub const ZERO: Self = Self(0);

    /// Ticks simulated per second.
    pub const PER_SECOND: u64 = 20;

    /// Advance by `delta` ticks.
    pub fn advance(self, delta: u64) -> Self {
        Self(self.0 + delta)
    }

    /// Fixed timestep in seconds.
    pub fn delta_seconds() -> f64 {
        1.0 / Self::PER_SECOND as f64
    }
}

/// Errors raised by core conversions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CoreError {
    /// A numeric block discriminant did not map to a known block type.
    #[error("unknown block type discriminant {0}")]
    UnknownBlockType(u8),
}
