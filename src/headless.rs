//! Scripted headless simulation at a fixed tick rate.

use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use anyhow::{Context, Result};
use glam::DVec3;
use serde::Serialize;
use tracing::{debug, info};
use voxkernel_core::{BlockType, SimTick};
use voxkernel_physics::{interact, BlockAction, CollisionSystem, PlayerBody, PlayerInput};
use voxkernel_testkit::{EventRecord, JsonlSink};
use voxkernel_world::{ChunkPos, ChunkWindow, TerrainGenerator};

use crate::config::KernelConfig;

/// Ticks spent in each leg of the walking script.
const LEG_TICKS: u64 = 40;
/// Ticks between block interactions.
const EDIT_INTERVAL: u64 = 25;
/// Ticks between position samples in the event log.
const POSITION_INTERVAL: u64 = 20;

#[derive(Debug, Clone, Serialize)]
pub struct SimulationSummary {
    pub ticks: u64,
    pub final_position: [f64; 3],
    pub grounded: bool,
    pub edits: usize,
    pub refused_edits: usize,
    pub chunks_loaded: usize,
    pub chunks_cached: usize,
    pub events_written: usize,
}

#[derive(Serialize)]
struct PositionPayload {
    position: [f64; 3],
    velocity: [f64; 3],
    grounded: bool,
}

#[derive(Serialize)]
struct ChunkPayload<'a> {
    center: ChunkPos,
    loaded: &'a [ChunkPos],
    unloaded: &'a [ChunkPos],
}

struct EventLog {
    sink: Option<JsonlSink>,
}

impl EventLog {
    fn record<P: Serialize>(&mut self, tick: SimTick, kind: &str, payload: P) -> Result<()> {
        if let Some(sink) = self.sink.as_mut() {
            sink.write(&EventRecord {
                tick,
                kind,
                payload,
            })?;
        }
        Ok(())
    }

    fn finish(mut self) -> Result<usize> {
        match self.sink.as_mut() {
            Some(sink) => {
                sink.flush()?;
                Ok(sink.written())
            }
            None => Ok(0),
        }
    }
}

/// Scripted input for `tick`: walk east, north while hopping, west, then idle.
fn scripted_input(tick: u64) -> PlayerInput {
    match (tick / LEG_TICKS) % 4 {
        0 => PlayerInput::walk(1.0, 0.0),
        1 => PlayerInput::walk(0.0, 1.0).with_jump(),
        2 => PlayerInput::walk(-1.0, 0.0),
        _ => PlayerInput::default(),
    }
}

/// Run the walking script for `ticks` ticks, optionally logging JSONL events.
pub fn simulate(
    config: &KernelConfig,
    ticks: u64,
    events: Option<&Path>,
) -> Result<SimulationSummary> {
    let sink = match events {
        Some(path) => Some(
            JsonlSink::create(path)
                .with_context(|| format!("failed to create event log {}", path.display()))?,
        ),
        None => None,
    };
    let mut log = EventLog { sink };

    let mut terrain = TerrainGenerator::with_config(config.terrain.clone());
    let mut collision =
        CollisionSystem::with_ground_cache_capacity(config.collision.ground_cache_capacity);
    if config.collision.invalidate_on_edit {
        collision.watch_edits(&terrain);
    }
    let raycaster = config.raycast;
    let mut window: ChunkWindow = config.streaming.window();

    let observed = Arc::new(AtomicUsize::new(0));
    let subscription = {
        let observed = Arc::clone(&observed);
        terrain.on_block_change(move |change| {
            observed.fetch_add(1, Ordering::Relaxed);
            debug!(pos = %change.pos, block = change.block.as_str(), "Observed edit");
        })
    };

    let mut body = PlayerBody::spawn(&mut terrain, &mut collision, 0.5, 0.5);
    let mut tick = SimTick::ZERO;
    log.record(tick, "spawn", body.position.to_array())?;
    info!(position = ?body.position, ticks, "Simulation started");

    let mut center = ChunkWindow::chunk_of(body.position.x, body.position.z);
    let delta = window.update(center);
    log.record(
        tick,
        "chunks",
        ChunkPayload {
            center,
            loaded: &delta.loaded,
            unloaded: &delta.unloaded,
        },
    )?;

    let dt = SimTick::delta_seconds();
    let mut refused_edits = 0usize;

    for t in 0..ticks {
        tick = SimTick(t + 1);
        body.step(&mut terrain, &collision, scripted_input(t), dt);

        let now = ChunkWindow::chunk_of(body.position.x, body.position.z);
        if now != center {
            center = now;
            let delta = window.update(center);
            for pos in &delta.loaded {
                terrain.generate_chunk(*pos);
            }
            log.record(
                tick,
                "chunks",
                ChunkPayload {
                    center,
                    loaded: &delta.loaded,
                    unloaded: &delta.unloaded,
                },
            )?;
        }

        if t % EDIT_INTERVAL == EDIT_INTERVAL - 1 {
            let action = if (t / EDIT_INTERVAL) % 2 == 0 {
                BlockAction::Break
            } else {
                BlockAction::Place(BlockType::Dirt)
            };
            let look = DVec3::new(1.0, -1.0, 0.0);
            match interact(&mut terrain, &raycaster, body.position, look, action)? {
                Some(edit) => log.record(tick, "edit", edit.change)?,
                None => {
                    refused_edits += 1;
                    log.record(tick, "edit_refused", action)?;
                }
            }
        }

        if t % POSITION_INTERVAL == POSITION_INTERVAL - 1 {
            log.record(
                tick,
                "move",
                PositionPayload {
                    position: body.position.to_array(),
                    velocity: body.velocity.to_array(),
                    grounded: body.grounded,
                },
            )?;
        }
    }

    subscription.unsubscribe();
    let summary = SimulationSummary {
        ticks,
        final_position: body.position.to_array(),
        grounded: body.grounded,
        edits: observed.load(Ordering::Relaxed),
        refused_edits,
        chunks_loaded: window.len(),
        chunks_cached: terrain.cached_chunk_count(),
        events_written: log.finish()?,
    };
    info!(?summary, "Simulation finished");
    Ok(summary)
}
