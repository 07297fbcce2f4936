//! Configuration loading from TOML files
//!
//! The binary picks the file with `--config` (default `config/dev.toml`).
//! Every section is optional; missing keys fall back to the defaults below.

use crate::domain::error::NavError;
use crate::domain::geometry::{GeometryKit, DEFAULT_STAY_THRESHOLD_M, DEFAULT_STEP_LENGTH_M};
use crate::domain::types::{Direction, Position};
use crate::services::confirmation::DEFAULT_SENSITIVITY_M;
use anyhow::Context;
use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Deserialize)]
pub struct SiteConfig {
    /// Store identifier written into session reports
    #[serde(default = "default_site_id")]
    pub id: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self { id: default_site_id() }
    }
}

fn default_site_id() -> String {
    "store".to_string()
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct CatalogConfig {
    /// JSON catalog file; the built-in demo store is used when absent
    #[serde(default)]
    pub file: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NavigationConfig {
    #[serde(default = "default_step_length")]
    pub step_length_m: f64,
    #[serde(default = "default_stay_threshold")]
    pub stay_threshold_m: f64,
    #[serde(default)]
    pub start_x: f64,
    #[serde(default)]
    pub start_y: f64,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            step_length_m: default_step_length(),
            stay_threshold_m: default_stay_threshold(),
            start_x: 0.0,
            start_y: 0.0,
        }
    }
}

fn default_step_length() -> f64 {
    DEFAULT_STEP_LENGTH_M
}

fn default_stay_threshold() -> f64 {
    DEFAULT_STAY_THRESHOLD_M
}

/// Spoken phrase for each heading
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DirectionsConfig {
    #[serde(default = "default_straight")]
    pub straight: String,
    #[serde(default = "default_left")]
    pub left: String,
    #[serde(default = "default_right")]
    pub right: String,
    #[serde(default = "default_reverse")]
    pub reverse: String,
    #[serde(default = "default_stay")]
    pub stay: String,
}

impl Default for DirectionsConfig {
    fn default() -> Self {
        Self {
            straight: default_straight(),
            left: default_left(),
            right: default_right(),
            reverse: default_reverse(),
            stay: default_stay(),
        }
    }
}

fn default_straight() -> String {
    "go straight ahead".to_string()
}

fn default_left() -> String {
    "turn left".to_string()
}

fn default_right() -> String {
    "turn right".to_string()
}

fn default_reverse() -> String {
    "turn around".to_string()
}

fn default_stay() -> String {
    "stay where you are".to_string()
}

impl DirectionsConfig {
    pub fn label(&self, direction: Direction) -> &str {
        match direction {
            Direction::Straight => &self.straight,
            Direction::Left => &self.left,
            Direction::Right => &self.right,
            Direction::Reverse => &self.reverse,
            Direction::Stay => &self.stay,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScannerConfig {
    #[serde(default = "default_scanner_range")]
    pub range_m: f64,
    #[serde(default = "default_noise_prob")]
    pub noise_prob: f64,
    /// Fixed RNG seed for reproducible sessions
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self { range_m: default_scanner_range(), noise_prob: default_noise_prob(), seed: None }
    }
}

fn default_scanner_range() -> f64 {
    2.5
}

fn default_noise_prob() -> f64 {
    0.05
}

#[derive(Debug, Clone, Deserialize)]
pub struct DeviceConfig {
    #[serde(default = "default_sensitivity")]
    pub sensitivity_m: f64,
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self { sensitivity_m: default_sensitivity() }
    }
}

fn default_sensitivity() -> f64 {
    DEFAULT_SENSITIVITY_M
}

#[derive(Debug, Clone, Deserialize)]
pub struct EgressConfig {
    /// File path for session reports (JSONL format)
    #[serde(default = "default_egress_file")]
    pub file: String,
}

impl Default for EgressConfig {
    fn default() -> Self {
        Self { file: default_egress_file() }
    }
}

fn default_egress_file() -> String {
    "sessions.jsonl".to_string()
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct TomlConfig {
    #[serde(default)]
    pub site: SiteConfig,
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub navigation: NavigationConfig,
    #[serde(default)]
    pub directions: DirectionsConfig,
    #[serde(default)]
    pub scanner: ScannerConfig,
    #[serde(default)]
    pub device: DeviceConfig,
    #[serde(default)]
    pub egress: EgressConfig,
}

/// Main configuration struct used throughout the application
#[derive(Debug, Clone)]
pub struct Config {
    site_id: String,
    catalog_file: Option<String>,
    step_length_m: f64,
    stay_threshold_m: f64,
    start: Position,
    directions: DirectionsConfig,
    scanner_range_m: f64,
    scanner_noise_prob: f64,
    scanner_seed: Option<u64>,
    device_sensitivity_m: f64,
    egress_file: String,
    config_file: String,
}

impl Default for Config {
    fn default() -> Self {
        Self::from_toml(TomlConfig::default(), "default")
    }
}

impl Config {
    fn from_toml(toml_config: TomlConfig, config_file: &str) -> Self {
        Self {
            site_id: toml_config.site.id,
            catalog_file: toml_config.catalog.file,
            step_length_m: toml_config.navigation.step_length_m,
            stay_threshold_m: toml_config.navigation.stay_threshold_m,
            start: Position::new(toml_config.navigation.start_x, toml_config.navigation.start_y),
            directions: toml_config.directions,
            scanner_range_m: toml_config.scanner.range_m,
            scanner_noise_prob: toml_config.scanner.noise_prob,
            scanner_seed: toml_config.scanner.seed,
            device_sensitivity_m: toml_config.device.sensitivity_m,
            egress_file: toml_config.egress.file,
            config_file: config_file.to_string(),
        }
    }

    /// Load and validate configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;

        let toml_config: TomlConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;

        let config = Self::from_toml(toml_config, &path.display().to_string());
        config
            .validate()
            .with_context(|| format!("Invalid config file {}", path.display()))?;
        Ok(config)
    }

    /// Load configuration - tries TOML file first, falls back to defaults
    pub fn load_from_path(path: &str) -> Self {
        match Self::from_file(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Warning: {:#}. Using defaults.", e);
                Self::default()
            }
        }
    }

    /// Range checks for numeric settings
    pub fn validate(&self) -> Result<(), NavError> {
        let non_negative = [
            ("navigation.stay_threshold_m", self.stay_threshold_m),
            ("scanner.range_m", self.scanner_range_m),
            ("device.sensitivity_m", self.device_sensitivity_m),
        ];
        for (key, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(NavError::InvalidConfig(format!("{key} = {value} must be >= 0")));
            }
        }
        if !self.step_length_m.is_finite() || self.step_length_m <= 0.0 {
            return Err(NavError::InvalidConfig(format!(
                "navigation.step_length_m = {} must be > 0",
                self.step_length_m
            )));
        }
        if !(0.0..=1.0).contains(&self.scanner_noise_prob) {
            return Err(NavError::InvalidConfig(format!(
                "scanner.noise_prob = {} must be within [0, 1]",
                self.scanner_noise_prob
            )));
        }
        if !self.start.is_finite() {
            return Err(NavError::InvalidConfig("navigation start position must be finite".to_string()));
        }
        Ok(())
    }

    /// Geometry settings as a ready-to-use kit
    pub fn geometry_kit(&self) -> GeometryKit {
        GeometryKit::new(self.step_length_m, self.stay_threshold_m)
    }

    /// Spoken phrase for a heading
    pub fn direction_label(&self, direction: Direction) -> &str {
        self.directions.label(direction)
    }

    // Getters for all config fields
    pub fn site_id(&self) -> &str {
        &self.site_id
    }

    pub fn catalog_file(&self) -> Option<&str> {
        self.catalog_file.as_deref()
    }

    pub fn step_length_m(&self) -> f64 {
        self.step_length_m
    }

    pub fn stay_threshold_m(&self) -> f64 {
        self.stay_threshold_m
    }

    pub fn start(&self) -> Position {
        self.start
    }

    pub fn directions(&self) -> &DirectionsConfig {
        &self.directions
    }

    pub fn scanner_range_m(&self) -> f64 {
        self.scanner_range_m
    }

    pub fn scanner_noise_prob(&self) -> f64 {
        self.scanner_noise_prob
    }

    pub fn scanner_seed(&self) -> Option<u64> {
        self.scanner_seed
    }

    pub fn device_sensitivity_m(&self) -> f64 {
        self.device_sensitivity_m
    }

    pub fn egress_file(&self) -> &str {
        &self.egress_file
    }

    pub fn config_file(&self) -> &str {
        &self.config_file
    }

    /// Builder method for tests and demos that need reproducible scans
    pub fn with_scanner(mut self, range_m: f64, noise_prob: f64, seed: Option<u64>) -> Self {
        self.scanner_range_m = range_m;
        self.scanner_noise_prob = noise_prob;
        self.scanner_seed = seed;
        self
    }

    /// Builder method to redirect session reports
    pub fn with_egress_file(mut self, file: &str) -> Self {
        self.egress_file = file.to_string();
        self
    }

    /// Builder method to point at a catalog file
    pub fn with_catalog_file(mut self, file: &str) -> Self {
        self.catalog_file = Some(file.to_string());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.site_id(), "store");
        assert_eq!(config.catalog_file(), None);
        assert_eq!(config.step_length_m(), 0.75);
        assert_eq!(config.stay_threshold_m(), 0.3);
        assert_eq!(config.start(), Position::ORIGIN);
        assert_eq!(config.scanner_range_m(), 2.5);
        assert_eq!(config.scanner_noise_prob(), 0.05);
        assert_eq!(config.scanner_seed(), None);
        assert_eq!(config.device_sensitivity_m(), 0.6);
        assert_eq!(config.egress_file(), "sessions.jsonl");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_direction_labels() {
        let config = Config::default();
        assert_eq!(config.direction_label(Direction::Straight), "go straight ahead");
        assert_eq!(config.direction_label(Direction::Left), "turn left");
        assert_eq!(config.direction_label(Direction::Stay), "stay where you are");
    }

    #[test]
    fn test_partial_sections_use_defaults() {
        let toml_config: TomlConfig = toml::from_str(
            r#"
[directions]
left = "vire à esquerda"

[scanner]
seed = 42
"#,
        )
        .unwrap();
        let config = Config::from_toml(toml_config, "inline");

        assert_eq!(config.direction_label(Direction::Left), "vire à esquerda");
        assert_eq!(config.direction_label(Direction::Right), "turn right");
        assert_eq!(config.scanner_seed(), Some(42));
        assert_eq!(config.scanner_range_m(), 2.5);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let bad_noise = Config::default().with_scanner(2.5, 1.2, None);
        assert!(matches!(bad_noise.validate(), Err(NavError::InvalidConfig(_))));

        let bad_range = Config::default().with_scanner(-1.0, 0.1, None);
        assert!(bad_range.validate().is_err());

        let mut bad_step = Config::default();
        bad_step.step_length_m = 0.0;
        assert!(bad_step.validate().is_err());
    }

    #[test]
    fn test_egress_file_default() {
        let egress = EgressConfig::default();
        assert_eq!(egress.file, "sessions.jsonl");
    }
}
