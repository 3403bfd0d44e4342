//! CLI configuration
//!
//! Stored as TOML. Values here sit between the built-in defaults and the
//! flags given on the command line.

use std::path::{Path, PathBuf};

use anyhow::Context;
use kinnet_core::{KinshipFilterOptions, KinshipFilterOverrides};
use serde::{Deserialize, Serialize};

/// Get default config file path
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("kinnet")
        .join("config.toml")
}

/// Get default database path
pub fn default_database_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("kinnet")
        .join("kinnet.db")
}

/// Default traversal limits and switches
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ancestors: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub descendants: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub collateral: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub marriage: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub depth: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mourning: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub simplify: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reciprocal: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub derived: Option<bool>,
}

/// Configuration for the CLI
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// SQLite database with the kinship tables
    #[serde(skip_serializing_if = "Option::is_none")]
    pub database: Option<PathBuf>,

    /// Abandon an exploration after this many milliseconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_ms: Option<u64>,

    pub filters: FilterConfig,
}

const KEYS: &[&str] = &[
    "database",
    "timeout_ms",
    "filters.ancestors",
    "filters.descendants",
    "filters.collateral",
    "filters.marriage",
    "filters.depth",
    "filters.mourning",
    "filters.simplify",
    "filters.reciprocal",
    "filters.derived",
];

impl Config {
    /// Config with every filter spelled out, as written by `config init`
    pub fn with_builtin_filters() -> Self {
        let defaults = KinshipFilterOptions::default();
        Self {
            database: None,
            timeout_ms: None,
            filters: FilterConfig {
                ancestors: Some(defaults.max_ancestor_gen),
                descendants: Some(defaults.max_descend_gen),
                collateral: Some(defaults.max_collateral_links),
                marriage: Some(defaults.max_marriage_links),
                depth: Some(defaults.max_loop_depth),
                mourning: Some(defaults.mourning_circle),
                simplify: Some(defaults.simplify_terms),
                reciprocal: Some(defaults.include_reciprocal),
                derived: Some(defaults.include_derived),
            },
        }
    }

    /// Load from a file; a missing file yields the empty config
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            tracing::debug!("No config file at {}", path.display());
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("Invalid config file {}", path.display()))
    }

    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, toml::to_string_pretty(self)?)
            .with_context(|| format!("Failed to write config file {}", path.display()))?;
        Ok(())
    }

    pub fn keys() -> &'static [&'static str] {
        KEYS
    }

    /// Value of a key, `None` when unset
    pub fn get(&self, key: &str) -> anyhow::Result<Option<String>> {
        fn show<T: ToString>(value: Option<T>) -> Option<String> {
            value.map(|v| v.to_string())
        }

        let f = &self.filters;
        let value = match key {
            "database" => self.database.as_ref().map(|p| p.display().to_string()),
            "timeout_ms" => show(self.timeout_ms),
            "filters.ancestors" => show(f.ancestors),
            "filters.descendants" => show(f.descendants),
            "filters.collateral" => show(f.collateral),
            "filters.marriage" => show(f.marriage),
            "filters.depth" => show(f.depth),
            "filters.mourning" => show(f.mourning),
            "filters.simplify" => show(f.simplify),
            "filters.reciprocal" => show(f.reciprocal),
            "filters.derived" => show(f.derived),
            _ => anyhow::bail!(
                "Unknown config key: {}. Available keys: {}",
                key,
                KEYS.join(", ")
            ),
        };
        Ok(value)
    }

    /// Set a key from its string form; `none` clears it
    pub fn set(&mut self, key: &str, value: &str) -> anyhow::Result<()> {
        fn parse<T: std::str::FromStr>(key: &str, value: &str) -> anyhow::Result<Option<T>>
        where
            T::Err: std::fmt::Display,
        {
            if value.eq_ignore_ascii_case("none") {
                return Ok(None);
            }
            value
                .parse()
                .map(Some)
                .map_err(|e| anyhow::anyhow!("Invalid value '{}' for {}: {}", value, key, e))
        }

        let f = &mut self.filters;
        match key {
            "database" => {
                self.database = parse::<String>(key, value)?.map(PathBuf::from);
            }
            "timeout_ms" => self.timeout_ms = parse(key, value)?,
            "filters.ancestors" => f.ancestors = parse(key, value)?,
            "filters.descendants" => f.descendants = parse(key, value)?,
            "filters.collateral" => f.collateral = parse(key, value)?,
            "filters.marriage" => f.marriage = parse(key, value)?,
            "filters.depth" => f.depth = parse(key, value)?,
            "filters.mourning" => f.mourning = parse(key, value)?,
            "filters.simplify" => f.simplify = parse(key, value)?,
            "filters.reciprocal" => f.reciprocal = parse(key, value)?,
            "filters.derived" => f.derived = parse(key, value)?,
            _ => anyhow::bail!(
                "Unknown config key: {}. Available keys: {}",
                key,
                KEYS.join(", ")
            ),
        }
        Ok(())
    }

    /// Filter values present in the file
    pub fn overrides(&self) -> KinshipFilterOverrides {
        let f = &self.filters;
        KinshipFilterOverrides {
            max_ancestor_gen: f.ancestors,
            max_descend_gen: f.descendants,
            max_collateral_links: f.collateral,
            max_marriage_links: f.marriage,
            max_loop_depth: f.depth,
            mourning_circle: f.mourning,
            simplify_terms: f.simplify,
            include_reciprocal: f.reciprocal,
            include_derived: f.derived,
        }
    }

    /// Built-in defaults with this config applied
    pub fn filter_defaults(&self) -> KinshipFilterOptions {
        KinshipFilterOptions::default().merged(&self.overrides())
    }

    pub fn database_path(&self) -> PathBuf {
        self.database.clone().unwrap_or_else(default_database_path)
    }
}
