//! Stable content hashes for chunks.

use voxkernel_world::Chunk;

/// Hex-encoded BLAKE3 digest of a chunk's position and block grid.
pub fn chunk_digest(chunk: &Chunk) -> String {
    let mut hasher = blake3::Hasher::new();
    let pos = chunk.position();
    hasher.update(&pos.x.to_le_bytes());
    hasher.update(&pos.z.to_le_bytes());
    let bytes: Vec<u8> = chunk.blocks().iter().map(|block| block.as_u8()).collect();
    hasher.update(&bytes);
    hasher.finalize().to_hex().to_string()
}
