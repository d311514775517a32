//! Configuration system for the pipeline simulator.
//!
//! This module defines the configuration structures used to parameterize a
//! run. It provides:
//! 1. **Defaults:** Baseline limits and timing constants.
//! 2. **Structures:** Hierarchical config for general, pipeline, and cache settings.
//! 3. **Run modes:** The three named optimization levels compared by the simulator.
//!
//! Configuration is supplied as JSON or built with `Config::default()` and
//! [`Config::for_mode`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::common::{Result, SimError};

/// Default configuration constants for the simulator.
mod defaults {
    use crate::common::constants;

    /// Cycle cap after which a run is reported as non-terminating.
    pub const MAX_CYCLES: u64 = constants::DEFAULT_MAX_CYCLES;

    /// Total cycles a cache miss spends in memory.
    pub const MISS_PENALTY: u64 = constants::CACHE_MISS_PENALTY;

    /// Address of the first instruction fetched.
    pub const START_PC: u8 = 0;
}

/// Optimization level of a run.
///
/// Each mode fixes the pair (forwarding enabled, cache enabled).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize, Serialize)]
pub enum RunMode {
    /// Stall on every load-use hazard; no cache.
    #[serde(rename = "no-optimization", alias = "none", alias = "NoOptimization")]
    NoOptimization,
    /// Forward loaded values; no cache.
    #[default]
    #[serde(rename = "forwarding-only", alias = "forwarding", alias = "ForwardingOnly")]
    ForwardingOnly,
    /// Forward loaded values and route data accesses through the cache.
    #[serde(
        rename = "forwarding+cache",
        alias = "forwarding-cache",
        alias = "ForwardingCache"
    )]
    ForwardingCache,
}

impl RunMode {
    /// All modes, in comparison order.
    pub const ALL: [Self; 3] = [
        Self::NoOptimization,
        Self::ForwardingOnly,
        Self::ForwardingCache,
    ];

    /// Whether forwarding is enabled in this mode.
    pub const fn forwarding(self) -> bool {
        !matches!(self, Self::NoOptimization)
    }

    /// Whether the data cache is enabled in this mode.
    pub const fn cache(self) -> bool {
        matches!(self, Self::ForwardingCache)
    }

    /// Canonical name, as accepted on the command line.
    pub const fn name(self) -> &'static str {
        match self {
            Self::NoOptimization => "no-optimization",
            Self::ForwardingOnly => "forwarding-only",
            Self::ForwardingCache => "forwarding+cache",
        }
    }
}

impl fmt::Display for RunMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for RunMode {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "no-optimization" | "none" => Ok(Self::NoOptimization),
            "forwarding-only" | "forwarding" => Ok(Self::ForwardingOnly),
            "forwarding+cache" | "forwarding-cache" | "cache" => Ok(Self::ForwardingCache),
            other => Err(SimError::Config(format!("unknown run mode `{other}`"))),
        }
    }
}

/// Root configuration.
///
/// # Examples
///
/// ```
/// use pipesim_core::config::{Config, RunMode};
///
/// let json = r#"{
///     "general": { "max_cycles": 500, "record_events": true },
///     "pipeline": { "forwarding": false }
/// }"#;
///
/// let config: Config = serde_json::from_str(json).unwrap();
/// assert_eq!(config.general.max_cycles, 500);
/// assert!(!config.pipeline.forwarding);
/// assert!(!config.cache.enabled);
/// assert_eq!(config.cache.miss_penalty, 5);
///
/// let cached = config.for_mode(RunMode::ForwardingCache);
/// assert!(cached.pipeline.forwarding && cached.cache.enabled);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Config {
    /// General simulation settings.
    #[serde(default)]
    pub general: GeneralConfig,
    /// Pipeline settings.
    #[serde(default)]
    pub pipeline: PipelineConfig,
    /// Data cache settings.
    #[serde(default)]
    pub cache: CacheConfig,
}

impl Config {
    /// Parses a JSON configuration document.
    ///
    /// # Errors
    ///
    /// [`SimError::Json`] if the document is malformed, or
    /// [`SimError::Config`] if a value fails [`Config::validate`].
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Returns a copy with the forwarding and cache toggles set for `mode`.
    #[must_use]
    pub fn for_mode(&self, mode: RunMode) -> Self {
        let mut config = self.clone();
        config.pipeline.forwarding = mode.forwarding();
        config.cache.enabled = mode.cache();
        config
    }

    /// The run mode matching the current toggles.
    ///
    /// A validated config never enables the cache without forwarding.
    pub const fn mode(&self) -> RunMode {
        match (self.pipeline.forwarding, self.cache.enabled) {
            (true, true) => RunMode::ForwardingCache,
            (true, false) => RunMode::ForwardingOnly,
            (false, _) => RunMode::NoOptimization,
        }
    }

    /// Rejects settings the simulator cannot honour.
    ///
    /// # Errors
    ///
    /// [`SimError::Config`] if `max_cycles` or `miss_penalty` is zero, or if
    /// the cache is enabled without forwarding (no run mode has that shape).
    pub fn validate(&self) -> Result<()> {
        if self.general.max_cycles == 0 {
            return Err(SimError::Config("max_cycles must be at least 1".into()));
        }
        if self.cache.miss_penalty == 0 {
            return Err(SimError::Config("miss_penalty must be at least 1".into()));
        }
        if self.cache.enabled && !self.pipeline.forwarding {
            return Err(SimError::Config("cache.enabled requires pipeline.forwarding".into()));
        }
        Ok(())
    }
}

/// General simulation settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct GeneralConfig {
    /// Cycle cap; reaching it aborts the run with [`SimError::NonTermination`].
    #[serde(default = "GeneralConfig::default_max_cycles")]
    pub max_cycles: u64,

    /// Keep every trace event in memory for later inspection.
    #[serde(default)]
    pub record_events: bool,

    /// Address of the first instruction fetched.
    #[serde(default = "GeneralConfig::default_start_pc")]
    pub start_pc: u8,
}

impl GeneralConfig {
    const fn default_max_cycles() -> u64 {
        defaults::MAX_CYCLES
    }

    const fn default_start_pc() -> u8 {
        defaults::START_PC
    }
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            max_cycles: defaults::MAX_CYCLES,
            record_events: false,
            start_pc: defaults::START_PC,
        }
    }
}

/// Pipeline settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct PipelineConfig {
    /// Forward loaded values instead of stalling on load-use hazards.
    #[serde(default = "PipelineConfig::default_forwarding")]
    pub forwarding: bool,
}

impl PipelineConfig {
    const fn default_forwarding() -> bool {
        true
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self { forwarding: true }
    }
}

/// Data cache settings. The geometry is fixed at 8 one-byte lines.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct CacheConfig {
    /// Route LOAD/STORE through the cache.
    #[serde(default)]
    pub enabled: bool,

    /// Total cycles a miss spends in memory, including the access cycle.
    #[serde(default = "CacheConfig::default_miss_penalty")]
    pub miss_penalty: u64,
}

impl CacheConfig {
    const fn default_miss_penalty() -> u64 {
        defaults::MISS_PENALTY
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            miss_penalty: defaults::MISS_PENALTY,
        }
    }
}
