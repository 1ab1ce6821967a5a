//! Project configuration stored in `.ecm-graph/config.json`.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;

/// Directory holding the configuration, relative to the project root.
pub const CONFIG_DIR: &str = ".ecm-graph";

const CONFIG_FILE: &str = "config.json";

/// Settings written by `ecm-graph init`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CliConfig {
    pub version: String,

    /// Snapshot to load when `--snapshot` is not given. Relative paths are
    /// resolved against the project root.
    pub snapshot: PathBuf,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            version: "1.0".to_string(),
            snapshot: PathBuf::from("graph.json"),
        }
    }
}

impl CliConfig {
    /// Location of the config file under `root`.
    pub fn path(root: &Path) -> PathBuf {
        root.join(CONFIG_DIR).join(CONFIG_FILE)
    }

    /// Reads the config under `root`, if there is one.
    pub fn load(root: &Path) -> Result<Option<Self>> {
        let path = Self::path(root);
        if !path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&path)?;
        let config: CliConfig = serde_json::from_str(&content)?;
        Ok(Some(config))
    }

    /// Writes the config under `root` and returns the file path.
    pub fn save(&self, root: &Path) -> Result<PathBuf> {
        let path = Self::path(root);
        fs::create_dir_all(root.join(CONFIG_DIR))?;
        fs::write(&path, serde_json::to_string_pretty(self)?)?;
        Ok(path)
    }
}

/// Picks the snapshot file: the `--snapshot` flag wins, then the config.
pub fn resolve_snapshot(flag: Option<&Path>, root: &Path) -> Result<PathBuf> {
    if let Some(path) = flag {
        return Ok(path.to_path_buf());
    }

    match CliConfig::load(root)? {
        Some(config) if config.snapshot.is_absolute() => Ok(config.snapshot),
        Some(config) => Ok(root.join(config.snapshot)),
        None => Err("No snapshot given. Pass --snapshot <file> or run `ecm-graph init`".into()),
    }
}
