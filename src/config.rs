// ⚙️ Configuration - defaults, cinema.toml, then CINEMA_* environment

use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Seat capacity of a hall in production
pub const DEFAULT_MAX_SEATS_PER_HALL: usize = 300;

/// A floor never holds more than two restrooms
pub const MAX_WCS_PER_FLOOR: usize = 2;

pub const DEFAULT_CONFIG_FILE: &str = "cinema.toml";

pub const ENV_PREFIX: &str = "CINEMA_";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Directory holding the persisted extent documents
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    #[serde(default = "default_max_seats_per_hall")]
    pub max_seats_per_hall: usize,

    /// Filter used when RUST_LOG is not set
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            data_dir: default_data_dir(),
            max_seats_per_hall: default_max_seats_per_hall(),
            log_filter: default_log_filter(),
        }
    }
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("data")
}

fn default_max_seats_per_hall() -> usize {
    DEFAULT_MAX_SEATS_PER_HALL
}

fn default_log_filter() -> String {
    "info".to_string()
}

impl Config {
    /// Load from `cinema.toml` in the working directory plus the environment
    pub fn load() -> Result<Self, figment::Error> {
        Self::load_from(DEFAULT_CONFIG_FILE)
    }

    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, figment::Error> {
        Figment::from(Serialized::defaults(Config::default()))
            .merge(Toml::file(path.as_ref()))
            .merge(Env::prefixed(ENV_PREFIX))
            .extract()
    }

    pub fn limits(&self) -> Limits {
        Limits {
            max_seats_per_hall: self.max_seats_per_hall,
        }
    }
}

// ============================================================================
// LIMITS
// ============================================================================

/// Multiplicity bounds enforced by the association managers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    pub max_seats_per_hall: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Limits {
            max_seats_per_hall: DEFAULT_MAX_SEATS_PER_HALL,
        }
    }
}
