//! voxkernel - A deterministic voxel terrain, collision and picking kernel
//!
//! Command-line driver for inspecting terrain and running headless simulations.

mod commands;
mod config;
mod headless;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use config::KernelConfig;
use glam::DVec3;
use tracing::info;
use voxkernel_physics::CollisionSystem;
use voxkernel_world::TerrainGenerator;

#[derive(Parser, Debug)]
#[command(author, version, about = "Voxel terrain kernel driver", long_about = None)]
struct Cli {
    /// Kernel configuration file (TOML)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Override the terrain seed from the configuration
    #[arg(long, global = true, allow_hyphen_values = true)]
    seed: Option<f64>,

    /// Log at info level unless RUST_LOG says otherwise
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print an ASCII heightmap of terrain surface heights
    Heightmap {
        /// Columns to draw as minx,minz,maxx,maxz
        #[arg(long, default_value = "-32,-16,31,15", value_parser = commands::parse_region, allow_hyphen_values = true)]
        region: commands::Region,
    },
    /// Print the block stack and ground height of one column
    Column {
        #[arg(long, allow_hyphen_values = true)]
        x: i32,
        #[arg(long, allow_hyphen_values = true)]
        z: i32,
    },
    /// Cast a picking ray and print what it hits
    Raycast {
        /// Ray origin as x,y,z
        #[arg(long, value_parser = commands::parse_vec3, allow_hyphen_values = true)]
        origin: DVec3,
        /// Ray direction as x,y,z
        #[arg(long, value_parser = commands::parse_vec3, allow_hyphen_values = true)]
        dir: DVec3,
        /// Maximum distance; defaults to the configured reach
        #[arg(long)]
        reach: Option<f64>,
    },
    /// Run the scripted player loop at 20 ticks per second
    Simulate {
        #[arg(long, default_value_t = 600)]
        ticks: u64,
        /// Write events as JSON lines to this path
        #[arg(long)]
        events: Option<PathBuf>,
    },
    /// Write the active configuration as TOML
    WriteConfig {
        #[arg(long, default_value = config::DEFAULT_CONFIG_PATH)]
        path: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing with WARN level by default (can be overridden via RUST_LOG env var)
    let default_level = if cli.verbose { "info" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .init();

    info!("Starting voxkernel v{}", env!("CARGO_PKG_VERSION"));

    let mut kernel = match &cli.config {
        Some(path) => KernelConfig::load_from_path(path),
        None => KernelConfig::load(),
    };
    if let Some(seed) = cli.seed {
        kernel.terrain.seed = seed;
    }

    match cli.command {
        Command::Heightmap { region } => {
            let terrain = TerrainGenerator::with_config(kernel.terrain.clone());
            print!("{}", commands::heightmap(&terrain, region));
        }
        Command::Column { x, z } => {
            let mut terrain = TerrainGenerator::with_config(kernel.terrain.clone());
            let mut collision =
                CollisionSystem::with_ground_cache_capacity(kernel.collision.ground_cache_capacity);
            print!("{}", commands::column(&mut terrain, &mut collision, x, z));
        }
        Command::Raycast { origin, dir, reach } => {
            let mut terrain = TerrainGenerator::with_config(kernel.terrain.clone());
            let mut raycaster = kernel.raycast;
            if let Some(reach) = reach {
                raycaster.reach = reach;
            }
            println!("{}", commands::raycast(&mut terrain, &raycaster, origin, dir)?);
        }
        Command::Simulate { ticks, events } => {
            let summary = headless::simulate(&kernel, ticks, events.as_deref())?;
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
        Command::WriteConfig { path } => {
            kernel.save_to_path(&path)?;
            println!("Wrote {}", path.display());
        }
    }

    Ok(())
}
