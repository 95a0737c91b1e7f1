use voxkernel_core::{Block, BlockType, ChunkPos, LocalPos, CHUNK_SIZE, CHUNK_VOLUME, WORLD_HEIGHT};

bitflags::bitflags! {
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    /// Dirty flags set whenever chunk data changes.
    pub struct DirtyFlags: u8 {
        const MESH = 0b0000_0001;
    }
}

impl Default for DirtyFlags {
    fn default() -> Self {
        DirtyFlags::empty()
    }
}

/// Offsets of the six face neighbours.
const FACE_NEIGHBORS: [(i32, i32, i32); 6] = [
    (1, 0, 0),
    (-1, 0, 0),
    (0, 1, 0),
    (0, -1, 0),
    (0, 0, 1),
    (0, 0, -1),
];

/// Full-height column-major voxel grid for a 16×16 footprint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    position: ChunkPos,
    blocks: Vec<BlockType>,
    dirty: DirtyFlags,
}

impl Chunk {
    /// Allocate a fresh chunk filled with air.
    pub fn new(position: ChunkPos) -> Self {
        Self {
            position,
            blocks: vec![BlockType::Air; CHUNK_VOLUME],
            dirty: DirtyFlags::all(),
        }
    }

    /// Chunk coordinate.
    #[inline]
    pub fn position(&self) -> ChunkPos {
        self.position
    }

    /// Fetch the block at a local position.
    #[inline]
    pub fn block(&self, local: LocalPos) -> BlockType {
        self.blocks[local.index()]
    }

    /// Fetch by local components; anything outside the grid reads as air.
    pub fn block_at(&self, x: i32, y: i32, z: i32) -> BlockType {
        match Self::local_in_bounds(x, y, z) {
            Some(local) => self.block(local),
            None => BlockType::Air,
        }
    }

    /// Set a block and mark the mesh dirty if it changed.
    pub fn set_block(&mut self, local: LocalPos, block: BlockType) {
        let idx = local.index();
        if self.blocks[idx] != block {
            self.blocks[idx] = block;
            self.dirty.insert(DirtyFlags::MESH);
        }
    }

    /// Borrow raw block storage, laid out `[x][y][z]`.
    pub fn blocks(&self) -> &[BlockType] {
        &self.blocks
    }

    /// Consume and return the current dirty flags.
    pub fn take_dirty_flags(&mut self) -> DirtyFlags {
        let flags = self.dirty;
        self.dirty = DirtyFlags::empty();
        flags
    }

    /// Every solid block with at least one face touching air.
    ///
    /// Neighbours outside this chunk's grid (other chunks, or above/below the
    /// world) count as exposed; the neighbouring chunk is never consulted.
    pub fn blocks_for_rendering(&self) -> Vec<Block> {
        let mut visible = Vec::new();
        for x in 0..CHUNK_SIZE {
            for y in 0..WORLD_HEIGHT {
                for z in 0..CHUNK_SIZE {
                    let local = LocalPos::new(x, y, z);
                    let block = self.block(local);
                    if block.is_air() {
                        continue;
                    }
                    if self.is_exposed(x as i32, y as i32, z as i32) {
                        visible.push(Block::new(block, self.position.world_pos(local)));
                    }
                }
            }
        }
        visible
    }

    fn is_exposed(&self, x: i32, y: i32, z: i32) -> bool {
        FACE_NEIGHBORS.iter().any(|(dx, dy, dz)| {
            match Self::local_in_bounds(x + dx, y + dy, z + dz) {
                Some(neighbor) => self.block(neighbor).is_air(),
                None => true,
            }
        })
    }

    fn local_in_bounds(x: i32, y: i32, z: i32) -> Option<LocalPos> {
        let in_bounds = (0..CHUNK_SIZE as i32).contains(&x)
            && (0..WORLD_HEIGHT as i32).contains(&y)
            && (0..CHUNK_SIZE as i32).contains(&z);
        in_bounds.then(|| LocalPos::new(x as usize, y as usize, z as usize))
    }
}
