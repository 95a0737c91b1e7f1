use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::{fs, path::Path};
use tracing::warn;
use voxkernel_physics::{Raycaster, GROUND_CACHE_CAPACITY};
use voxkernel_world::{ChunkWindow, TerrainConfig};

pub const DEFAULT_CONFIG_PATH: &str = "config/kernel.toml";

/// Top-level kernel configuration, one TOML table per subsystem.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct KernelConfig {
    pub terrain: TerrainConfig,
    pub collision: CollisionConfig,
    pub raycast: Raycaster,
    pub streaming: StreamingConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct CollisionConfig {
    /// Number of columns whose ground height is remembered.
    pub ground_cache_capacity: usize,
    /// Re-scan columns after edits instead of serving cached heights.
    pub invalidate_on_edit: bool,
}

impl Default for CollisionConfig {
    fn default() -> Self {
        Self {
            ground_cache_capacity: GROUND_CACHE_CAPACITY,
            invalidate_on_edit: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct StreamingConfig {
    /// Chunk radius loaded around the player.
    pub render_distance: i32,
    /// Chunk radius past which loaded chunks are dropped.
    pub unload_distance: i32,
}

impl Default for StreamingConfig {
    fn default() -> Self {
        Self {
            render_distance: 1,
            unload_distance: 2,
        }
    }
}

impl StreamingConfig {
    pub fn window(&self) -> ChunkWindow {
        ChunkWindow::new(self.render_distance, self.unload_distance)
    }
}

impl KernelConfig {
    /// Load configuration from the default path.
    pub fn load() -> Self {
        Self::load_from_path(Path::new(DEFAULT_CONFIG_PATH))
    }

    /// Load configuration from an explicit path, falling back to defaults on errors.
    pub fn load_from_path(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(contents) => match toml::from_str::<KernelConfig>(&contents) {
                Ok(cfg) => cfg,
                Err(err) => {
                    warn!("Failed to parse {}: {err}. Using defaults", path.display());
                    KernelConfig::default()
                }
            },
            Err(err) => {
                if path != Path::new(DEFAULT_CONFIG_PATH)
                    || err.kind() != std::io::ErrorKind::NotFound
                {
                    warn!("Failed to read {}: {err}. Using defaults", path.display());
                } else {
                    warn!(
                        "Kernel config not found at {}. Using defaults",
                        path.display()
                    );
                }
                KernelConfig::default()
            }
        }
    }

    /// Save configuration to an explicit path.
    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        let toml = toml::to_string_pretty(self)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml)?;
        Ok(())
    }
}
