//! Radar configuration.
//!
//! Loaded from `~/.radar/config.toml` when present. Every field is optional.
//!
//! The audit database path is resolved through a chain:
//!
//! 1. `--database <path>`: explicit per-command override
//! 2. `RADAR_DATABASE` env var: process/session level
//! 3. `database = "..."` in `~/.radar/config.toml`
//! 4. `~/.radar/audit.sqlite`

use std::path::{Path, PathBuf};
use std::{env, fs, io};

use serde::{Deserialize, Serialize};

/// Environment variable that overrides the configured database path.
pub const DATABASE_ENV: &str = "RADAR_DATABASE";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Config {
    /// Path to the audit database.
    pub database: Option<PathBuf>,
}

impl Config {
    /// Load config from `~/.radar/config.toml`.
    /// A missing file yields the defaults; an unreadable or invalid one is an error.
    pub fn load() -> Result<Self, String> {
        match Self::path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load config from a specific file.
    pub fn load_from(path: &Path) -> Result<Self, String> {
        let contents = match fs::read_to_string(path) {
            Ok(s) => s,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => return Err(format!("failed to read {}: {e}", path.display())),
        };

        toml::from_str(&contents).map_err(|e| format!("invalid config at {}: {e}", path.display()))
    }

    /// The config file path: `~/.radar/config.toml`.
    pub fn path() -> Option<PathBuf> {
        radar_home().map(|h| h.join("config.toml"))
    }

    /// Resolve the audit database path from the chain above.
    pub fn database_path(&self, explicit: Option<&Path>) -> Result<PathBuf, String> {
        let from_env = env::var_os(DATABASE_ENV).map(PathBuf::from);
        self.resolve_database(explicit, from_env)
    }

    fn resolve_database(
        &self,
        explicit: Option<&Path>,
        from_env: Option<PathBuf>,
    ) -> Result<PathBuf, String> {
        if let Some(path) = explicit {
            return Ok(path.to_path_buf());
        }
        if let Some(path) = from_env
            && !path.as_os_str().is_empty()
        {
            return Ok(path);
        }
        if let Some(path) = &self.database {
            return Ok(path.clone());
        }
        radar_home()
            .map(|h| h.join("audit.sqlite"))
            .ok_or_else(|| {
                format!("could not determine home directory; pass --database or set {DATABASE_ENV}")
            })
    }
}

fn radar_home() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".radar"))
}
