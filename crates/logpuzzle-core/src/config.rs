use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use crate::sequencer::{default_conventions, Sequencer, SuffixConvention};

/// Global configuration loaded from `~/.config/logpuzzle/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PuzzleConfig {
    /// Seconds allowed for establishing each connection.
    pub connect_timeout_secs: u64,
    /// Overall per-image transfer timeout in seconds (None = no limit).
    pub timeout_secs: Option<u64>,
    /// Maximum redirects followed per image.
    pub max_redirections: u32,
    /// Open `index.html` in a viewer after a successful download.
    pub open_viewer: bool,
    /// Program used to open the index page (None = platform opener).
    pub viewer_command: Option<String>,
    /// Suffix conventions for ordering; if missing, the built-in table is used.
    pub conventions: Option<Vec<SuffixConvention>>,
}

impl Default for PuzzleConfig {
    fn default() -> Self {
        Self {
            connect_timeout_secs: 30,
            timeout_secs: None,
            max_redirections: 10,
            open_viewer: true,
            viewer_command: None,
            conventions: None,
        }
    }
}

impl PuzzleConfig {
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    /// Sequencer over the configured convention table.
    pub fn sequencer(&self) -> Sequencer {
        Sequencer::new(
            self.conventions
                .clone()
                .unwrap_or_else(default_conventions),
        )
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("logpuzzle")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<PuzzleConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = PuzzleConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(&path)?;
    let cfg: PuzzleConfig = toml::from_str(&data)?;
    Ok(cfg)
}
