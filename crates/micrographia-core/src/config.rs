//! Configuration types for micrographia.
//!
//! [`Config::load`] reads `~/.config/micrographia/config.toml`, creating it
//! with the built-in defaults if it does not yet exist. [`Config::defaults`]
//! returns the same defaults without touching the filesystem.

use serde::Deserialize;
use std::path::PathBuf;

// ---------------------------------------------------------------------------
// Embedded defaults
// ---------------------------------------------------------------------------

pub const DEFAULT_BASE_URL: &str = "https://micrographia-kavehs-projects-7d3a910a.vercel.app";

const DEFAULT_CONFIG: &str = r#"
[api]
base_url   = "https://micrographia-kavehs-projects-7d3a910a.vercel.app"
user_agent = "micrographia"

[ui]
results_pane_width_pct = 35
theme                  = "default"

[keybindings]
search_focus     = "/"
toggle_compare   = " "
compare          = "c"
clear_comparison = "x"
cycle_filter     = "f"
"#;

// ---------------------------------------------------------------------------
// Public config types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub keybindings: KeybindingsConfig,
}

/// `[api]` section of `config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_base_url() -> String { DEFAULT_BASE_URL.to_string() }
fn default_user_agent() -> String { "micrographia".to_string() }

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            user_agent: default_user_agent(),
        }
    }
}

/// `[ui]` section of `config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct UiConfig {
    #[serde(default = "default_results_pane_width_pct")]
    pub results_pane_width_pct: u16,
    #[serde(default = "default_theme")]
    pub theme: String,
}

fn default_results_pane_width_pct() -> u16 { 35 }
fn default_theme() -> String { "default".to_string() }

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            results_pane_width_pct: default_results_pane_width_pct(),
            theme: default_theme(),
        }
    }
}

/// `[keybindings]` section of `config.toml`. Each value is a single key.
#[derive(Debug, Clone, Deserialize)]
pub struct KeybindingsConfig {
    #[serde(default = "default_search_focus")]
    pub search_focus: String,
    #[serde(default = "default_toggle_compare")]
    pub toggle_compare: String,
    #[serde(default = "default_compare")]
    pub compare: String,
    #[serde(default = "default_clear_comparison")]
    pub clear_comparison: String,
    #[serde(default = "default_cycle_filter")]
    pub cycle_filter: String,
}

fn default_search_focus() -> String { "/".to_string() }
fn default_toggle_compare() -> String { " ".to_string() }
fn default_compare() -> String { "c".to_string() }
fn default_clear_comparison() -> String { "x".to_string() }
fn default_cycle_filter() -> String { "f".to_string() }

impl Default for KeybindingsConfig {
    fn default() -> Self {
        Self {
            search_focus: default_search_focus(),
            toggle_compare: default_toggle_compare(),
            compare: default_compare(),
            clear_comparison: default_clear_comparison(),
            cycle_filter: default_cycle_filter(),
        }
    }
}

impl KeybindingsConfig {
    /// First character of a binding, if it has one.
    pub fn key(binding: &str) -> Option<char> {
        binding.chars().next()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::defaults()
    }
}

impl Config {
    /// Load from `~/.config/micrographia/config.toml`, layered on top of the
    /// built-in defaults. Creates the file with defaults if it does not exist.
    pub fn load() -> anyhow::Result<Self> {
        let path = config_path();

        if !path.exists() {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(&path, DEFAULT_CONFIG.trim_start())?;
        }

        Self::layered(Some(path))
    }

    /// Built-in defaults with an optional file on top. A missing file is not
    /// an error.
    pub fn layered(path: Option<PathBuf>) -> anyhow::Result<Self> {
        let mut builder = config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml));
        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path.as_path()).required(false));
        }
        builder.build()?.try_deserialize().map_err(Into::into)
    }

    /// Return the built-in defaults without touching the filesystem.
    pub fn defaults() -> Self {
        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .build()
            .expect("built-in default config must be valid TOML")
            .try_deserialize()
            .expect("built-in default config must deserialize correctly")
    }
}

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

pub fn config_path() -> PathBuf {
    std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".to_string()))
                .join(".config")
        })
        .join("micrographia")
        .join("config.toml")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
