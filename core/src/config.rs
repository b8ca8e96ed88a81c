use crate::{
    calendar::midnight,
    error::{GenError, GenResult},
};
use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_RECORD_COUNT: usize = 50_000;
pub const DEFAULT_USER_POOL_SIZE: usize = 40_000;
pub const DEFAULT_SEED: u64 = 42;
pub const DEFAULT_OUTPUT_PATH: &str = "data.csv";

/// Run settings. Every field has a default so a config file only needs
/// to name what it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Rows to generate.
    pub record_count: usize,
    /// Distinct user ids, reused across rows to simulate renewals.
    pub user_pool_size: usize,
    pub random_seed: u64,
    pub output_path: String,
    /// First instant a subscription may start.
    pub window_start: NaiveDateTime,
    /// Last instant a subscription may start, inclusive.
    pub window_end: NaiveDateTime,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            record_count: DEFAULT_RECORD_COUNT,
            user_pool_size: DEFAULT_USER_POOL_SIZE,
            random_seed: DEFAULT_SEED,
            output_path: DEFAULT_OUTPUT_PATH.into(),
            window_start: midnight(2021, 1, 1),
            window_end: midnight(2025, 9, 1) - Duration::seconds(1),
        }
    }
}

impl GeneratorConfig {
    /// Load from a JSON file. Missing keys keep their defaults.
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Cannot read {path}: {e}"))?;
        let config: GeneratorConfig = serde_json::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Cannot parse {path}: {e}"))?;
        Ok(config)
    }

    /// Small run for tests; caller picks the output path.
    pub fn default_test(output_path: impl Into<String>) -> Self {
        Self {
            record_count: 500,
            user_pool_size: 200,
            output_path: output_path.into(),
            ..Self::default()
        }
    }

    /// Checks that must pass before any record is generated.
    pub fn validate(&self) -> GenResult<()> {
        if self.user_pool_size == 0 {
            return Err(GenError::InvalidConfig(
                "user_pool_size must be at least 1".into(),
            ));
        }
        if self.window_end < self.window_start {
            return Err(GenError::InvalidConfig(format!(
                "window_end {} is before window_start {}",
                self.window_end, self.window_start
            )));
        }
        self.check_output_path()
    }

    fn check_output_path(&self) -> GenResult<()> {
        if self.output_path.trim().is_empty() {
            return Err(GenError::InvalidConfig("output_path is empty".into()));
        }
        let path = Path::new(&self.output_path);
        if path.is_dir() {
            return Err(GenError::InvalidConfig(format!(
                "output path {} is a directory",
                path.display()
            )));
        }
        match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() && !parent.is_dir() => {
                Err(GenError::InvalidConfig(format!(
                    "output directory {} does not exist",
                    parent.display()
                )))
            }
            _ => Ok(()),
        }
    }
}
