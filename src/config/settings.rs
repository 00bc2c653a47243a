use std::fs;
use std::path::Path;

use anyhow::{Context, Result, anyhow, ensure};
use icu_locid::Locale;
use log::info;
use serde::{Deserialize, Serialize};

use super::tees::TeeSettings;

const DEFAULT_DATABASE_PATH: &str = "fairway_handicap.db";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HandicapSettings {
    pub reference_slope: f64,
    pub window: usize,
    pub best_of: usize,
    pub history_cap: usize,
    pub min_index: f64,
    pub max_index: f64,
    pub formula_version: String,
}

impl Default for HandicapSettings {
    fn default() -> Self {
        Self {
            reference_slope: 113.0,
            window: 5,
            best_of: 2,
            history_cap: 50,
            min_index: 0.0,
            max_index: 48.0,
            formula_version: "v1".to_string(),
        }
    }
}

impl HandicapSettings {
    /// Rejects settings the aggregation cannot work with.
    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.reference_slope.is_finite() && self.reference_slope > 0.0,
            "handicap.reference_slope must be positive, got {}",
            self.reference_slope
        );
        ensure!(self.window >= 1, "handicap.window must be at least 1");
        ensure!(self.best_of >= 1, "handicap.best_of must be at least 1");
        ensure!(self.history_cap >= 1, "handicap.history_cap must be at least 1");
        ensure!(
            self.min_index.is_finite() && self.max_index.is_finite() && self.min_index <= self.max_index,
            "handicap index bounds [{}, {}] are invalid",
            self.min_index,
            self.max_index
        );
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MemoSettings {
    pub enabled: bool,
    pub capacity: usize,
}

impl Default for MemoSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            capacity: 10_000,
        }
    }
}

/// Plausibility band for a nine-hole half, used only for warnings on import.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EntrySettings {
    pub min_half_score: i32,
    pub max_half_score: i32,
}

impl Default for EntrySettings {
    fn default() -> Self {
        Self {
            min_half_score: 30,
            max_half_score: 80,
        }
    }
}

impl EntrySettings {
    pub fn is_plausible_half(&self, score: i32) -> bool {
        (self.min_half_score..=self.max_half_score).contains(&score)
    }
}

/// Locale used to order names that tie on both scores.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RankingSettings {
    pub collation: String,
}

impl Default for RankingSettings {
    fn default() -> Self {
        Self {
            collation: "ja".to_string(),
        }
    }
}

impl RankingSettings {
    pub fn validate(&self) -> Result<()> {
        self.collation
            .parse::<Locale>()
            .map_err(|e| anyhow!("ranking.collation '{}' is not a locale: {}", self.collation, e))?;
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub handicap: HandicapSettings,
    pub tees: TeeSettings,
    pub memo: MemoSettings,
    pub entry: EntrySettings,
    pub ranking: RankingSettings,
}

impl AppConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads a JSON override file; missing keys keep their defaults.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: Self = serde_json::from_str(&json)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        config
            .validate()
            .with_context(|| format!("Invalid config file {}", path.display()))?;
        info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.handicap.validate()?;
        self.ranking.validate()?;
        ensure!(
            self.entry.min_half_score <= self.entry.max_half_score,
            "entry half-score band is empty"
        );
        Ok(())
    }

    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => Self::from_file(p),
            None => Ok(Self::new()),
        }
    }
}

pub fn database_path() -> String {
    std::env::var("DATABASE_PATH").unwrap_or_else(|_| DEFAULT_DATABASE_PATH.to_string())
}
