//! Breaking and placing the block under the crosshair.

use glam::DVec3;
use serde::{Deserialize, Serialize};
use tracing::debug;
use voxkernel_core::BlockType;
use voxkernel_world::{BlockChange, EditError, TerrainGenerator};

use crate::aabb::Aabb;
use crate::raycast::{RaycastHit, Raycaster};
use crate::PLAYER_EYE_HEIGHT;

/// What to do with the targeted block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockAction {
    /// Remove the hit block.
    Break,
    /// Put a block against the hit face.
    Place(BlockType),
}

/// An applied interaction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlockEdit {
    /// Ray result that selected the target.
    pub hit: RaycastHit,
    /// The edit as reported to observers.
    pub change: BlockChange,
}

/// Apply `action` to whatever the player at `feet` is looking at.
///
/// Returns `Ok(None)` when nothing is within reach, when placing air, or
/// when the placed block would overlap the player.
pub fn interact(
    terrain: &mut TerrainGenerator,
    raycaster: &Raycaster,
    feet: DVec3,
    look: DVec3,
    action: BlockAction,
) -> Result<Option<BlockEdit>, EditError> {
    let eye = feet + DVec3::new(0.0, PLAYER_EYE_HEIGHT, 0.0);
    let Some(hit) = raycaster.cast(terrain, eye, look) else {
        return Ok(None);
    };

    let change = match action {
        BlockAction::Break => terrain.remove_block(hit.block_position)?,
        BlockAction::Place(BlockType::Air) => return Ok(None),
        BlockAction::Place(block) => {
            let target = hit.adjacent_block_position;
            if Aabb::block(target).intersects(&Aabb::player(feet)) {
                debug!(target = %target, "Placement blocked by player");
                return Ok(None);
            }
            terrain.set_block(target, block)?
        }
    };
    Ok(Some(BlockEdit { hit, change }))
}
