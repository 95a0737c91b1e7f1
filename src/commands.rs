//! One-shot inspection commands.

use std::fmt::Write as _;

use anyhow::{bail, Result};
use glam::DVec3;
use voxkernel_physics::{CollisionSystem, Raycaster};
use voxkernel_world::{BlockPos, BlockType, TerrainGenerator, WORLD_HEIGHT};

/// Height ramp from lowest to highest surface.
const HEIGHT_RAMP: &[u8] = b" .:-=+*#%@";

/// Inclusive rectangle of world columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    pub min_x: i32,
    pub min_z: i32,
    pub max_x: i32,
    pub max_z: i32,
}

/// Parse `minx,minz,maxx,maxz`.
pub fn parse_region(s: &str) -> Result<Region, String> {
    let parts: Vec<i32> = s
        .split(',')
        .map(|p| p.trim().parse::<i32>())
        .collect::<Result<_, _>>()
        .map_err(|err| format!("invalid region {s:?}: {err}"))?;
    match parts.as_slice() {
        &[min_x, min_z, max_x, max_z] if min_x <= max_x && min_z <= max_z => Ok(Region {
            min_x,
            min_z,
            max_x,
            max_z,
        }),
        [_, _, _, _] => Err(format!("region {s:?} has min greater than max")),
        _ => Err(format!("region {s:?} needs four comma-separated integers")),
    }
}

/// Parse `x,y,z`.
pub fn parse_vec3(s: &str) -> Result<DVec3, String> {
    let parts: Vec<f64> = s
        .split(',')
        .map(|p| p.trim().parse::<f64>())
        .collect::<Result<_, _>>()
        .map_err(|err| format!("invalid vector {s:?}: {err}"))?;
    match parts.as_slice() {
        &[x, y, z] => Ok(DVec3::new(x, y, z)),
        _ => Err(format!("vector {s:?} needs three comma-separated numbers")),
    }
}

/// ASCII heightmap, one row per Z, darker glyphs for higher ground.
pub fn heightmap(terrain: &TerrainGenerator, region: Region) -> String {
    let mut out = String::new();
    let top = (WORLD_HEIGHT - 1) as f64;
    for z in region.min_z..=region.max_z {
        for x in region.min_x..=region.max_x {
            let h = terrain.terrain_height(x, z) as f64;
            let idx = ((h / top) * (HEIGHT_RAMP.len() - 1) as f64).round() as usize;
            out.push(HEIGHT_RAMP[idx.min(HEIGHT_RAMP.len() - 1)] as char);
        }
        out.push('\n');
    }
    out
}

/// Block stack of one column, top solid block first, plus its ground height.
pub fn column(
    terrain: &mut TerrainGenerator,
    collision: &mut CollisionSystem,
    x: i32,
    z: i32,
) -> String {
    let mut out = String::new();
    let surface = terrain.terrain_height(x, z);
    let ground = collision.ground_height(terrain, x as f64, z as f64);
    let _ = writeln!(out, "column ({x}, {z}): surface {surface}, ground {ground}");

    let mut run: Option<(BlockType, i32, i32)> = None;
    for y in (0..WORLD_HEIGHT as i32).rev() {
        let block = terrain.block_at(BlockPos::new(x, y, z));
        run = match run {
            Some((kind, hi, _)) if kind == block => Some((kind, hi, y)),
            Some(done) => {
                write_run(&mut out, done);
                Some((block, y, y))
            }
            None => Some((block, y, y)),
        };
    }
    if let Some(done) = run {
        write_run(&mut out, done);
    }
    out
}

fn write_run(out: &mut String, (block, hi, lo): (BlockType, i32, i32)) {
    if hi == lo {
        let _ = writeln!(out, "  y {hi:>2}       {}", block.as_str());
    } else {
        let _ = writeln!(out, "  y {hi:>2}..{lo:>2}   {}", block.as_str());
    }
}

/// Describe the first block hit from `origin` along `direction`.
pub fn raycast(
    terrain: &mut TerrainGenerator,
    raycaster: &Raycaster,
    origin: DVec3,
    direction: DVec3,
) -> Result<String> {
    if direction.length_squared() == 0.0 {
        bail!("ray direction must be non-zero");
    }
    let out = match raycaster.cast(terrain, origin, direction) {
        Some(hit) => {
            let block = terrain.block_at(hit.block_position);
            format!(
                "hit {} {} at ({:.2}, {:.2}, {:.2}), normal ({}, {}, {}), place at {}",
                block.as_str(),
                hit.block_position,
                hit.point.x,
                hit.point.y,
                hit.point.z,
                hit.normal.x,
                hit.normal.y,
                hit.normal.z,
                hit.adjacent_block_position
            )
        }
        None => format!("no block within {:.1}", raycaster.reach),
    };
    Ok(out)
}
