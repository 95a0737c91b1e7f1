//! Persistent ledger of player edits.
//!
//! Generated chunks can be evicted and rebuilt at any time; the ledger is the
//! source of truth for every block a player placed or removed, and is
//! overlaid on top of freshly generated terrain.

use std::collections::BTreeMap;

use voxkernel_core::{BlockPos, BlockType, ChunkPos};

/// Sparse block overrides, sharded by owning chunk.
#[derive(Debug, Default, Clone)]
pub struct EditLedger {
    shards: BTreeMap<ChunkPos, BTreeMap<BlockPos, BlockType>>,
    len: usize,
}

impl EditLedger {
    /// Create an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an override, replacing any previous one at `pos`.
    pub fn record(&mut self, pos: BlockPos, block: BlockType) -> Option<BlockType> {
        let previous = self.shards.entry(pos.chunk()).or_default().insert(pos, block);
        if previous.is_none() {
            self.len += 1;
        }
        previous
    }

    /// Override at `pos`, if one was recorded.
    pub fn get(&self, pos: BlockPos) -> Option<BlockType> {
        self.shards
            .get(&pos.chunk())
            .and_then(|shard| shard.get(&pos))
            .copied()
    }

    /// Overrides inside one chunk, in position order.
    pub fn in_chunk(&self, chunk: ChunkPos) -> impl Iterator<Item = (BlockPos, BlockType)> + '_ {
        self.shards
            .get(&chunk)
            .into_iter()
            .flat_map(|shard| shard.iter().map(|(pos, block)| (*pos, *block)))
    }

    /// Number of recorded overrides.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true when nothing was edited.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_and_lookup() {
        let mut ledger = EditLedger::new();
        let pos = BlockPos::new(5, 5, 5);
        assert_eq!(ledger.get(pos), None);
        assert_eq!(ledger.record(pos, BlockType::Stone), None);
        assert_eq!(ledger.get(pos), Some(BlockType::Stone));
        assert_eq!(ledger.record(pos, BlockType::Air), Some(BlockType::Stone));
        assert_eq!(ledger.get(pos), Some(BlockType::Air));
        assert_eq!(ledger.len(), 1);
    }

    #[test]
    fn shards_by_owning_chunk() {
        let mut ledger = EditLedger::new();
        ledger.record(BlockPos::new(-1, 3, 0), BlockType::Dirt);
        ledger.record(BlockPos::new(0, 3, 0), BlockType::Grass);
        ledger.record(BlockPos::new(15, 4, 15), BlockType::Stone);

        let origin: Vec<_> = ledger.in_chunk(ChunkPos::new(0, 0)).collect();
        assert_eq!(
            origin,
            vec![
                (BlockPos::new(0, 3, 0), BlockType::Grass),
                (BlockPos::new(15, 4, 15), BlockType::Stone),
            ]
        );

        let west: Vec<_> = ledger.in_chunk(ChunkPos::new(-1, 0)).collect();
        assert_eq!(west, vec![(BlockPos::new(-1, 3, 0), BlockType::Dirt)]);
        assert_eq!(ledger.in_chunk(ChunkPos::new(9, 9)).count(), 0);
        assert_eq!(ledger.len(), 3);
        assert!(!ledger.is_empty());
    }
}
