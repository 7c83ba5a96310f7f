use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::graph::LayoutStrategy;
use crate::layout::LayoutConfig;
use crate::nav::ProgressPolicy;
use crate::theme::ThemeMode;

const FILENAME: &str = "config.yaml";
const APP_DIR: &str = "folio";

pub const KEYS: &[&str] = &[
    "defaults.theme",
    "defaults.progress",
    "defaults.strategy",
    "defaults.splash",
    "defaults.deck",
    "layout.unit_width",
    "layout.unit_height",
    "layout.gap",
    "layout.satellite_size",
    "layout.orbit_margin",
    "layout.phase",
];

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub defaults: Option<DefaultsConfig>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layout: Option<LayoutOverrides>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DefaultsConfig {
    /// Initial theme when no preference has been saved yet.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub progress: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strategy: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub splash: Option<bool>,

    /// Deck opened when none is given on the command line.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deck: Option<PathBuf>,
}

/// Partial [`LayoutConfig`]; unset fields keep their defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LayoutOverrides {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit_width: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit_height: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gap: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub satellite_size: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub orbit_margin: Option<f64>,

    /// Degrees.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phase: Option<f64>,
}

impl Config {
    pub fn path() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|d| d.join(APP_DIR).join(FILENAME))
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))
    }

    pub fn load() -> Result<Self> {
        let path = Self::path()?;
        Self::load_from(&path)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                anyhow::anyhow!("No config found. Run `folio config show` to see defaults.")
            } else {
                anyhow::anyhow!("Failed to read config: {e}")
            }
        })?;
        let config: Config = serde_yaml::from_str(&contents)?;
        Ok(config)
    }

    pub fn load_or_default() -> Self {
        match Self::load() {
            Ok(config) => config,
            Err(e) => {
                log::debug!("using default config: {e}");
                Self::default()
            }
        }
    }

    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::path()?;
        self.save_to(&path)?;
        Ok(path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let yaml = serde_yaml::to_string(self)?;
        let contents = format!("# folio configuration\n{yaml}");
        std::fs::write(path, contents)?;
        Ok(())
    }

    pub fn theme(&self) -> Option<ThemeMode> {
        self.defaults
            .as_ref()
            .and_then(|d| d.theme.as_deref())
            .and_then(ThemeMode::from_name)
    }

    pub fn progress_policy(&self) -> ProgressPolicy {
        self.defaults
            .as_ref()
            .and_then(|d| d.progress.as_deref())
            .and_then(ProgressPolicy::from_name)
            .unwrap_or_default()
    }

    pub fn strategy(&self) -> LayoutStrategy {
        self.defaults
            .as_ref()
            .and_then(|d| d.strategy.as_deref())
            .and_then(LayoutStrategy::from_name)
            .unwrap_or_default()
    }

    pub fn splash_enabled(&self) -> bool {
        self.defaults.as_ref().and_then(|d| d.splash).unwrap_or(true)
    }

    pub fn deck(&self) -> Option<&Path> {
        self.defaults.as_ref().and_then(|d| d.deck.as_deref())
    }

    pub fn layout_config(&self) -> LayoutConfig {
        let mut cfg = LayoutConfig::default();
        if let Some(o) = &self.layout {
            cfg.unit_width = o.unit_width.unwrap_or(cfg.unit_width);
            cfg.unit_height = o.unit_height.unwrap_or(cfg.unit_height);
            cfg.gap = o.gap.unwrap_or(cfg.gap);
            cfg.satellite_size = o.satellite_size.unwrap_or(cfg.satellite_size);
            cfg.orbit_margin = o.orbit_margin.unwrap_or(cfg.orbit_margin);
            cfg.phase = o.phase.map(f64::to_radians).unwrap_or(cfg.phase);
        }
        cfg
    }

    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "defaults.theme" => {
                if ThemeMode::from_name(value).is_none() {
                    anyhow::bail!("Invalid theme: {value}. Must be 'light', 'dark', or 'system'.");
                }
                self.defaults_mut().theme = Some(value.to_string());
            }
            "defaults.progress" => {
                if ProgressPolicy::from_name(value).is_none() {
                    anyhow::bail!("Invalid progress policy: {value}. Must be 'endpoints' or 'ordinal'.");
                }
                self.defaults_mut().progress = Some(value.to_string());
            }
            "defaults.strategy" => {
                if LayoutStrategy::from_name(value).is_none() {
                    anyhow::bail!("Invalid layout strategy: {value}. Must be 'grid' or 'traversal'.");
                }
                self.defaults_mut().strategy = Some(value.to_string());
            }
            "defaults.splash" => {
                let enabled = match value {
                    "true" | "on" | "yes" => true,
                    "false" | "off" | "no" => false,
                    _ => anyhow::bail!("Invalid splash setting: {value}. Must be 'true' or 'false'."),
                };
                self.defaults_mut().splash = Some(enabled);
            }
            "defaults.deck" => {
                if value.is_empty() {
                    anyhow::bail!("Deck path must not be empty.");
                }
                self.defaults_mut().deck = Some(PathBuf::from(value));
            }
            _ if key.starts_with("layout.") => {
                let field = &key["layout.".len()..];
                let number: f64 = value
                    .parse()
                    .map_err(|_| anyhow::anyhow!("Invalid number for {key}: {value}"))?;
                if !number.is_finite() {
                    anyhow::bail!("Invalid number for {key}: {value}");
                }
                if field != "phase" && number < 0.0 {
                    anyhow::bail!("{key} must not be negative.");
                }
                let layout = self.layout.get_or_insert_with(LayoutOverrides::default);
                let slot = match field {
                    "unit_width" => &mut layout.unit_width,
                    "unit_height" => &mut layout.unit_height,
                    "gap" => &mut layout.gap,
                    "satellite_size" => &mut layout.satellite_size,
                    "orbit_margin" => &mut layout.orbit_margin,
                    "phase" => &mut layout.phase,
                    _ => anyhow::bail!("Unknown config key: {key}. Valid keys: {}", KEYS.join(", ")),
                };
                *slot = Some(number);
            }
            _ => anyhow::bail!("Unknown config key: {key}. Valid keys: {}", KEYS.join(", ")),
        }
        Ok(())
    }

    fn defaults_mut(&mut self) -> &mut DefaultsConfig {
        self.defaults.get_or_insert_with(DefaultsConfig::default)
    }
}
