#![warn(missing_docs)]
//! Physics primitives (AABB, collisions, picking) over voxel terrain.
//!
//! Everything here reads the world through `&mut TerrainGenerator`: a
//! query may build (and cache) the chunks it touches, but never edits them.
//! The only writer is [`interact`], which goes through the regular
//! `set_block`/`remove_block` path.

mod aabb;
mod collision;
mod interaction;
mod player;
mod raycast;

pub use aabb::*;
pub use collision::*;
pub use interaction::*;
pub use player::*;
pub use raycast::*;

/// Player footprint along X and Z.
pub const PLAYER_WIDTH: f64 = 0.6;
/// Player height from feet to crown.
pub const PLAYER_HEIGHT: f64 = 1.8;
/// Camera height above the feet.
pub const PLAYER_EYE_HEIGHT: f64 = 1.62;
