//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.zico/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::Tab;
use crate::core::catalog::Catalog;
use crate::core::resources::{
    DEFAULT_BASE_URL, DEFAULT_RESOURCE_COUNT, DEFAULT_VIEWER_URL, MAX_RESOURCE_COUNT,
    ResourceConfig,
};
use crate::core::selection::Variant;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ZicoConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub resources: ResourcesConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    pub browser: Option<Catalog>,
    pub quiz: Option<Catalog>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    pub start_tab: Option<Tab>,
    pub updates_url: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ResourcesConfig {
    pub base_url: Option<String>,
    pub count: Option<usize>,
    pub viewer_url: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct StorageConfig {
    pub path: Option<String>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_UPDATES_URL: &str = "https://xarohub.vercel.app";

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub start_tab: Tab,
    pub resources: ResourceConfig,
    /// `None` = no home directory and no override; fall back to memory.
    pub storage_path: Option<PathBuf>,
    pub browser_catalog: Catalog,
    pub quiz_catalog: Catalog,
    pub updates_url: String,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            start_tab: Tab::default(),
            resources: ResourceConfig::default(),
            storage_path: crate::core::store::FileStore::default_path(),
            browser_catalog: Catalog::browser_default(),
            quiz_catalog: Catalog::quiz_default(),
            updates_url: DEFAULT_UPDATES_URL.to_string(),
        }
    }
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.zico/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".zico").join("config.toml"))
}

/// Load config from `path`, or `~/.zico/config.toml` when `path` is `None`.
///
/// If the default file doesn't exist, generates a commented-out default and
/// returns `ZicoConfig::default()`. A missing explicit `path` is an
/// `ConfigError::Io` and nothing is written. If the file exists but is
/// malformed, returns `ConfigError::Parse`.
pub fn load_config(path: Option<&Path>) -> Result<ZicoConfig, ConfigError> {
    let path = match path {
        Some(p) if !p.exists() => {
            return Err(ConfigError::Io(io::Error::new(
                io::ErrorKind::NotFound,
                format!("config file {} not found", p.display()),
            )));
        }
        Some(p) => p.to_path_buf(),
        None => match config_path() {
            Some(p) => p,
            None => {
                warn!("Could not determine home directory, using default config");
                return Ok(ZicoConfig::default());
            }
        },
    };

    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(&path);
        return Ok(ZicoConfig::default());
    }

    let contents = fs::read_to_string(&path).map_err(ConfigError::Io)?;
    let config = parse_config(&contents)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

pub fn parse_config(contents: &str) -> Result<ZicoConfig, ConfigError> {
    toml::from_str(contents).map_err(ConfigError::Parse)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &Path) {
    let default_content = r#"# Zico Configuration
# All settings are optional — defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [general]
# start_tab = "home"                 # "home", "subjects", "quiz", "settings"
# updates_url = "https://xarohub.vercel.app"

# [resources]
# base_url = "https://example.com/pdf"   # Or set ZICO_BASE_URL env var
# count = 5                              # Documents per subject and mode
# viewer_url = "https://docs.google.com/gview"

# [storage]
# path = "/home/me/.zico/storage.json"   # Or set ZICO_STORAGE_PATH env var

# [browser]
# levels = ["1bac", "2bac"]
# [browser.subjects]
# "1bac" = ["Math", "SVT"]
# "2bac" = ["Math"]

# [quiz]
# levels = ["1BAC", "2BAC"]
# lessons = ["Lesson 1", "Lesson 2"]
# [quiz.subjects]
# "1BAC" = ["English", "Math"]
# "2BAC" = ["English", "Math"]
"#;

    if let Some(parent) = path.parent() {
        if let Err(e) = fs::create_dir_all(parent) {
            warn!("Failed to create config directory: {}", e);
            return;
        }
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Environment overrides, read once so resolution stays testable.
#[derive(Debug, Default, Clone)]
pub struct EnvOverrides {
    pub base_url: Option<String>,
    pub resource_count: Option<String>,
    pub viewer_url: Option<String>,
    pub storage_path: Option<String>,
}

impl EnvOverrides {
    pub fn from_env() -> Self {
        Self {
            base_url: std::env::var("ZICO_BASE_URL").ok(),
            resource_count: std::env::var("ZICO_RESOURCE_COUNT").ok(),
            viewer_url: std::env::var("ZICO_VIEWER_URL").ok(),
            storage_path: std::env::var("ZICO_STORAGE_PATH").ok(),
        }
    }
}

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
pub fn resolve(config: &ZicoConfig, env: &EnvOverrides, cli_tab: Option<Tab>) -> ResolvedConfig {
    let defaults = ResolvedConfig::default();

    // Start tab: CLI → config → default
    let start_tab = cli_tab
        .or(config.general.start_tab)
        .unwrap_or(defaults.start_tab);

    // Base URL: env → config → default
    let base_url = env
        .base_url
        .clone()
        .or_else(|| config.resources.base_url.clone())
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

    // Count: env → config → default; zero, garbage or too many is rejected
    let env_count = env.resource_count.as_deref().and_then(|raw| match raw.parse() {
        Ok(n) => Some(n),
        Err(_) => {
            warn!("Ignoring ZICO_RESOURCE_COUNT={raw}: not a number");
            None
        }
    });
    let count = match env_count.or(config.resources.count) {
        Some(0) => {
            warn!("Resource count must be at least 1, using {DEFAULT_RESOURCE_COUNT}");
            DEFAULT_RESOURCE_COUNT
        }
        Some(n) if n > MAX_RESOURCE_COUNT => {
            warn!(
                "Resource count {n} exceeds {MAX_RESOURCE_COUNT}, using {DEFAULT_RESOURCE_COUNT}"
            );
            DEFAULT_RESOURCE_COUNT
        }
        Some(n) => n,
        None => DEFAULT_RESOURCE_COUNT,
    };

    let viewer_url = env
        .viewer_url
        .clone()
        .or_else(|| config.resources.viewer_url.clone())
        .unwrap_or_else(|| DEFAULT_VIEWER_URL.to_string());

    // Storage path: env → config → ~/.zico/storage.json
    let storage_path = env
        .storage_path
        .clone()
        .or_else(|| config.storage.path.clone())
        .map(PathBuf::from)
        .or(defaults.storage_path);

    ResolvedConfig {
        start_tab,
        resources: ResourceConfig {
            base_url,
            count,
            viewer_url,
        },
        storage_path,
        browser_catalog: resolve_catalog(
            Variant::Browser,
            config.browser.as_ref(),
            defaults.browser_catalog,
        ),
        quiz_catalog: resolve_catalog(Variant::Quiz, config.quiz.as_ref(), defaults.quiz_catalog),
        updates_url: config
            .general
            .updates_url
            .clone()
            .unwrap_or(defaults.updates_url),
    }
}

/// A configured catalog replaces the default only if `variant` can use it.
fn resolve_catalog(variant: Variant, configured: Option<&Catalog>, default: Catalog) -> Catalog {
    match configured {
        Some(catalog) if catalog.is_usable_for(variant) => {
            info!(
                "Using configured {:?} catalog ({} levels)",
                variant,
                catalog.levels.len()
            );
            catalog.clone()
        }
        Some(_) => {
            warn!("Configured {variant:?} catalog is incomplete, using defaults");
            default
        }
        None => default,
    }
}
