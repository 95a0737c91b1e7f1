//! Terrain generation with a bounded chunk cache and a persistent edit ledger.
//!
//! Chunks are a pure function of the seed and the ledger: the cache only
//! memoizes them, so eviction is always safe.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, instrument, trace};
use voxkernel_core::{Block, BlockPos, BlockType, ChunkPos, LocalPos, CHUNK_SIZE, WORLD_HEIGHT};

use crate::chunk::Chunk;
use crate::edits::EditLedger;
use crate::events::{BlockChange, BlockObservers, Subscription};
use crate::noise::NoiseField;
use crate::storage::ChunkCache;

/// Layers of dirt between stone and the grass cap.
pub const DIRT_DEPTH: i32 = 3;

/// Terrain shape parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerrainConfig {
    /// Noise seed; fractional values are normalized.
    pub seed: f64,
    /// Horizontal noise frequency.
    pub scale: f64,
    /// Height swing around `base_height`.
    pub amplitude: f64,
    /// Mean surface height.
    pub base_height: f64,
    /// Maximum number of resident chunks.
    pub chunk_cache_capacity: usize,
}

impl Default for TerrainConfig {
    fn default() -> Self {
        Self {
            seed: 42.0,
            scale: 0.05,
            amplitude: 8.0,
            base_height: 20.0,
            chunk_cache_capacity: 100,
        }
    }
}

impl TerrainConfig {
    /// Default shape with a different seed.
    pub fn with_seed(seed: f64) -> Self {
        Self {
            seed,
            ..Self::default()
        }
    }
}

/// Errors from world edits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum EditError {
    /// The target lies above or below the world.
    #[error("cannot edit block at {0}: outside the world height range")]
    OutOfWorld(BlockPos),
}

/// Terrain generator that fills, caches and edits chunks.
pub struct TerrainGenerator {
    config: TerrainConfig,
    noise: NoiseField,
    chunks: ChunkCache,
    edits: EditLedger,
    observers: BlockObservers,
}

impl TerrainGenerator {
    /// Create a generator with default shape parameters.
    pub fn new(seed: f64) -> Self {
        Self::with_config(TerrainConfig::with_seed(seed))
    }

    /// Create a generator from explicit parameters.
    pub fn with_config(config: TerrainConfig) -> Self {
        Self {
            noise: NoiseField::new(config.seed),
            chunks: ChunkCache::new(config.chunk_cache_capacity),
            edits: EditLedger::new(),
            observers: BlockObservers::new(),
            config,
        }
    }

    /// Active parameters.
    pub fn config(&self) -> &TerrainConfig {
        &self.config
    }

    /// Underlying noise field.
    pub fn noise(&self) -> &NoiseField {
        &self.noise
    }

    /// Return the chunk at `pos`, building and caching it on a miss.
    ///
    /// Building evicts the oldest cached chunk when the cache is full.
    pub fn generate_chunk(&mut self, pos: ChunkPos) -> &Chunk {
        if !self.chunks.contains(&pos) {
            let chunk = self.build_chunk(pos);
            if let Some((evicted, _)) = self.chunks.insert(pos, chunk) {
                debug!(chunk = %evicted, "Evicted chunk from cache");
            }
        }
        self.chunks
            .get(&pos)
            .expect("chunk resident after insertion")
    }

    /// Build a chunk from noise plus ledger overlay, bypassing the cache.
    #[instrument(skip(self), fields(seed = self.noise.normalized_seed()))]
    fn build_chunk(&self, pos: ChunkPos) -> Chunk {
        let mut chunk = Chunk::new(pos);

        for local_x in 0..CHUNK_SIZE {
            for local_z in 0..CHUNK_SIZE {
                let world_x = pos.origin_x() + local_x as i32;
                let world_z = pos.origin_z() + local_z as i32;
                let height = self.terrain_height(world_x, world_z);
                Self::fill_column(&mut chunk, local_x, local_z, height);
            }
        }

        let mut overlaid = 0usize;
        for (block_pos, block) in self.edits.in_chunk(pos) {
            if let Some(local) = block_pos.local() {
                chunk.set_block(local, block);
                overlaid += 1;
            }
        }

        debug!(overlaid, "Chunk generated");
        chunk
    }

    /// Stone up to three blocks under the surface, dirt, then a grass cap.
    fn fill_column(chunk: &mut Chunk, x: usize, z: usize, height: i32) {
        for y in 0..=height {
            let block = if y == height {
                BlockType::Grass
            } else if y >= height - DIRT_DEPTH {
                BlockType::Dirt
            } else {
                BlockType::Stone
            };
            chunk.set_block(LocalPos::new(x, y as usize, z), block);
        }
    }

    /// Surface height of a world column, clamped to `[1, WORLD_HEIGHT - 1]`.
    pub fn terrain_height(&self, world_x: i32, world_z: i32) -> i32 {
        let noise = self.noise.noise_2d(
            world_x as f64 * self.config.scale,
            world_z as f64 * self.config.scale,
        );
        let height = (self.config.base_height + noise * self.config.amplitude).floor() as i32;
        height.clamp(1, WORLD_HEIGHT as i32 - 1)
    }

    /// Whether the voxel at `pos` is solid, honouring edits.
    ///
    /// Positions above or below the world are never solid.
    pub fn is_block_solid_at(&mut self, pos: BlockPos) -> bool {
        if let Some(block) = self.edits.get(pos) {
            return block.is_solid();
        }
        self.generated_block(pos).is_solid()
    }

    /// Block stored in the (possibly regenerated) chunk at `pos`.
    ///
    /// Includes edits already applied to the chunk; positions outside the
    /// world read as air.
    pub fn generated_block(&mut self, pos: BlockPos) -> BlockType {
        match pos.local() {
            Some(local) => self.generate_chunk(pos.chunk()).block(local),
            None => BlockType::Air,
        }
    }

    /// Resolved block at `pos`: the edit if there is one, else generated terrain.
    pub fn block_at(&mut self, pos: BlockPos) -> BlockType {
        match self.edits.get(pos) {
            Some(block) => block,
            None => self.generated_block(pos),
        }
    }

    /// Ledger override at `pos`, without generating anything.
    pub fn get_modified_block(&self, pos: BlockPos) -> Option<BlockType> {
        self.edits.get(pos)
    }

    /// Place `block` at `pos` and notify observers.
    pub fn set_block(&mut self, pos: BlockPos, block: BlockType) -> Result<BlockChange, EditError> {
        let local = pos.local().ok_or(EditError::OutOfWorld(pos))?;
        let chunk_pos = pos.chunk();

        self.edits.record(pos, block);
        if let Some(chunk) = self.chunks.get_mut(&chunk_pos) {
            chunk.set_block(local, block);
        }

        let change = BlockChange {
            pos,
            chunk: chunk_pos,
            block,
        };
        trace!(pos = %pos, block = block.as_str(), "Block edited");
        self.observers.notify(&change);
        Ok(change)
    }

    /// Clear the block at `pos` to air and notify observers.
    pub fn remove_block(&mut self, pos: BlockPos) -> Result<BlockChange, EditError> {
        self.set_block(pos, BlockType::Air)
    }

    /// Register a callback run after every successful edit.
    pub fn on_block_change<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&BlockChange) + Send + Sync + 'static,
    {
        self.observers.subscribe(callback)
    }

    /// Visible blocks of the chunk at `pos`, generating it if needed.
    pub fn blocks_for_rendering(&mut self, pos: ChunkPos) -> Vec<Block> {
        self.generate_chunk(pos).blocks_for_rendering()
    }

    /// Mutable access to a resident chunk (e.g. to drain dirty flags).
    pub fn cached_chunk_mut(&mut self, pos: ChunkPos) -> Option<&mut Chunk> {
        self.chunks.get_mut(&pos)
    }

    /// Returns true if the chunk at `pos` is currently cached.
    pub fn is_chunk_cached(&self, pos: ChunkPos) -> bool {
        self.chunks.contains(&pos)
    }

    /// Number of resident chunks.
    pub fn cached_chunk_count(&self) -> usize {
        self.chunks.len()
    }

    /// Resident chunk positions, oldest insertion first.
    pub fn cached_chunks(&self) -> Vec<ChunkPos> {
        self.chunks.keys_oldest_first()
    }

    /// Number of ledger entries.
    pub fn modified_block_count(&self) -> usize {
        self.edits.len()
    }
}
