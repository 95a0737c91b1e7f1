//! Player-versus-terrain collision and ground queries.

use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

use glam::DVec3;
use parking_lot::Mutex;
use tracing::{debug, trace};
use voxkernel_core::BlockPos;
use voxkernel_world::{FifoCache, Subscription, TerrainGenerator};

use crate::aabb::Aabb;
use crate::PLAYER_WIDTH;

/// Default number of cached ground heights.
pub const GROUND_CACHE_CAPACITY: usize = 200;

/// Lowering applied to the player box when probing for ground contact.
const GROUND_PROBE: f64 = 0.01;
/// Inset of the corner probes from the footprint edge.
const FOOT_INSET: f64 = 0.1;
/// Extra rows scanned above the surface for placed blocks.
const GROUND_SCAN_HEADROOM: i32 = 10;

bitflags::bitflags! {
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    /// Axes on which a move was blocked.
    pub struct CollisionAxes: u8 {
        /// Blocked along X.
        const X = 0b001;
        /// Blocked along Y.
        const Y = 0b010;
        /// Blocked along Z.
        const Z = 0b100;
    }
}

/// Outcome of [`CollisionSystem::move_with_collision`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoveResult {
    /// Final feet position.
    pub position: DVec3,
    /// Axes whose movement was rejected.
    pub collided: CollisionAxes,
}

type Column = (i32, i32);

/// Collision queries plus a bounded cache of per-column ground heights.
///
/// The terrain is passed into every call rather than owned, so one world
/// can be shared by any number of systems.
pub struct CollisionSystem {
    ground_cache: FifoCache<Column, i32>,
    invalidated: Arc<Mutex<BTreeSet<Column>>>,
    watch: Option<Subscription>,
}

impl CollisionSystem {
    /// Create a system with the default ground cache size.
    pub fn new() -> Self {
        Self::with_ground_cache_capacity(GROUND_CACHE_CAPACITY)
    }

    /// Create a system caching at most `capacity` ground heights.
    pub fn with_ground_cache_capacity(capacity: usize) -> Self {
        Self {
            ground_cache: FifoCache::new(capacity),
            invalidated: Arc::new(Mutex::new(BTreeSet::new())),
            watch: None,
        }
    }

    /// Solid blocks inside the inclusive block span of `aabb`.
    pub fn colliding_blocks(&self, terrain: &mut TerrainGenerator, aabb: &Aabb) -> Vec<BlockPos> {
        let (lo, hi) = aabb.block_span();
        let mut blocks = Vec::new();
        for x in lo.x..=hi.x {
            for y in lo.y..=hi.y {
                for z in lo.z..=hi.z {
                    let pos = BlockPos::new(x, y, z);
                    if terrain.is_block_solid_at(pos) {
                        blocks.push(pos);
                    }
                }
            }
        }
        blocks
    }

    /// Whether a player standing at `feet` would overlap solid terrain.
    pub fn would_collide(&self, terrain: &mut TerrainGenerator, feet: DVec3) -> bool {
        let player = Aabb::player(feet);
        self.colliding_blocks(terrain, &player)
            .into_iter()
            .any(|pos| player.intersects(&Aabb::block(pos)))
    }

    /// Move the player by `delta`, resolving X, then Z, then Y.
    ///
    /// Each axis is tried from the position already resolved on the earlier
    /// axes; a blocked axis keeps its starting coordinate. Axes with a zero
    /// delta are skipped and never report a collision.
    pub fn move_with_collision(
        &self,
        terrain: &mut TerrainGenerator,
        from: DVec3,
        delta: DVec3,
    ) -> MoveResult {
        let mut position = from;
        let mut collided = CollisionAxes::empty();

        if delta.x != 0.0 {
            let candidate = DVec3::new(position.x + delta.x, position.y, position.z);
            if self.would_collide(terrain, candidate) {
                collided |= CollisionAxes::X;
            } else {
                position = candidate;
            }
        }

        if delta.z != 0.0 {
            let candidate = DVec3::new(position.x, position.y, position.z + delta.z);
            if self.would_collide(terrain, candidate) {
                collided |= CollisionAxes::Z;
            } else {
                position = candidate;
            }
        }

        if delta.y != 0.0 {
            let candidate = DVec3::new(position.x, position.y + delta.y, position.z);
            if self.would_collide(terrain, candidate) {
                collided |= CollisionAxes::Y;
            } else {
                position = candidate;
            }
        }

        if !collided.is_empty() {
            trace!(?from, ?delta, ?collided, "Move blocked");
        }
        MoveResult { position, collided }
    }

    /// Whether the player at `feet` counts as standing on something.
    ///
    /// True if the box lowered by a hair collides, or if any of five foot
    /// probes (four inset corners and the centre) finds a solid block at
    /// `floor(y)` or `floor(y - 0.5)`. The probes also fire for a player
    /// embedded in a block or hovering up to half a block above one.
    pub fn is_on_ground(&self, terrain: &mut TerrainGenerator, feet: DVec3) -> bool {
        if self.would_collide(terrain, feet - DVec3::new(0.0, GROUND_PROBE, 0.0)) {
            return true;
        }

        let reach = PLAYER_WIDTH / 2.0 - FOOT_INSET;
        let probes = [
            (feet.x - reach, feet.z - reach),
            (feet.x + reach, feet.z - reach),
            (feet.x - reach, feet.z + reach),
            (feet.x + reach, feet.z + reach),
            (feet.x, feet.z),
        ];
        let below = (feet.y - 0.5).floor() as i32;
        let level = feet.y.floor() as i32;

        probes.iter().any(|&(x, z)| {
            let bx = x.floor() as i32;
            let bz = z.floor() as i32;
            terrain.is_block_solid_at(BlockPos::new(bx, below, bz))
                || terrain.is_block_solid_at(BlockPos::new(bx, level, bz))
        })
    }

    /// Y the player's feet rest at in the column containing `(x, z)`.
    ///
    /// Scans down from ten blocks above the generated surface for the first
    /// solid block and returns the row above it. Results are cached per
    /// column; edits only invalidate entries when [`watch_edits`] is active.
    ///
    /// [`watch_edits`]: Self::watch_edits
    pub fn ground_height(&mut self, terrain: &mut TerrainGenerator, x: f64, z: f64) -> i32 {
        self.drain_invalidated();

        let column = (x.floor() as i32, z.floor() as i32);
        if let Some(height) = self.ground_cache.get(&column) {
            return *height;
        }

        let (bx, bz) = column;
        let surface = terrain.terrain_height(bx, bz);
        let height = (0..=surface + GROUND_SCAN_HEADROOM)
            .rev()
            .find(|&y| terrain.is_block_solid_at(BlockPos::new(bx, y, bz)))
            .map(|y| y + 1)
            .unwrap_or(surface + 1);

        if let Some((evicted, _)) = self.ground_cache.insert(column, height) {
            trace!(column = ?evicted, "Evicted ground height");
        }
        height
    }

    /// Subscribe to `terrain` edits so edited columns are re-scanned.
    ///
    /// Replaces any earlier subscription held by this system.
    pub fn watch_edits(&mut self, terrain: &TerrainGenerator) {
        self.unwatch();
        let invalidated = Arc::clone(&self.invalidated);
        self.watch = Some(terrain.on_block_change(move |change| {
            invalidated.lock().insert((change.pos.x, change.pos.z));
        }));
        debug!("Ground cache now tracks block edits");
    }

    /// Stop tracking edits. Cached heights may go stale again.
    pub fn unwatch(&mut self) {
        if let Some(subscription) = self.watch.take() {
            subscription.unsubscribe();
        }
    }

    /// Returns true while edits invalidate cached heights.
    pub fn is_watching(&self) -> bool {
        self.watch.is_some()
    }

    /// Number of cached ground heights.
    pub fn ground_cache_len(&self) -> usize {
        self.ground_cache.len()
    }

    /// Drop every cached ground height.
    pub fn clear_ground_cache(&mut self) {
        self.ground_cache.clear();
        self.invalidated.lock().clear();
    }

    fn drain_invalidated(&mut self) {
        let columns = std::mem::take(&mut *self.invalidated.lock());
        for column in columns {
            self.ground_cache.remove(&column);
        }
    }
}

impl Default for CollisionSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for CollisionSystem {
    fn drop(&mut self) {
        self.unwatch();
    }
}

impl fmt::Debug for CollisionSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CollisionSystem")
            .field("ground_cache_len", &self.ground_cache.len())
            .field("ground_cache_capacity", &self.ground_cache.capacity())
            .field("watching", &self.watch.is_some())
            .finish()
    }
}
