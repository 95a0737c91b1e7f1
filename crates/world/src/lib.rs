mod chunk;
mod edits;
mod events;
mod noise;
mod storage;
mod streaming;
mod terrain;

pub use chunk::*;
pub use edits::*;
pub use events::*;
pub use self::noise::*;
pub use storage::*;
pub use streaming::*;
pub use terrain::*;

pub use voxkernel_core::{
    Block, BlockPos, BlockType, ChunkPos, LocalPos, CHUNK_SIZE, CHUNK_VOLUME, WORLD_HEIGHT,
};
