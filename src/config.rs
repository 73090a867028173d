//! Application configuration loaded from TOML
//!
//! Every section is optional; missing values fall back to the defaults that
//! reproduce the standard county map.

use std::path::Path;
use std::str::FromStr;

use serde::Deserialize;
use thiserror::Error;

use crate::data::Sources;
use crate::renderer::{LegendConfig, MapConfig, SvgConfig};
use crate::RenderConfig;

/// Errors that can occur when loading or parsing configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse config TOML: {0}")]
    ParseError(#[from] toml::de::Error),
}

/// Text shown above the map
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct PageConfig {
    pub title: String,
    pub description: String,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            title: "Choropleth Map of US Counties".to_string(),
            description: "Map showing the percentage of people with a bachelor's degree in each county in the US.".to_string(),
        }
    }
}

/// Complete application configuration
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub sources: Sources,
    pub page: PageConfig,
    pub map: MapConfig,
    pub legend: LegendConfig,
    pub svg: SvgConfig,
}

impl AppConfig {
    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        content.parse()
    }

    /// Renderer settings carried by this configuration
    pub fn render_config(&self) -> RenderConfig {
        RenderConfig::new()
            .with_map(self.map.clone())
            .with_legend(self.legend.clone())
            .with_svg(self.svg.clone())
    }

    /// Replace the topology source
    pub fn with_topology(mut self, source: impl Into<String>) -> Self {
        self.sources.topology = source.into();
        self
    }

    /// Replace the education source
    pub fn with_education(mut self, source: impl Into<String>) -> Self {
        self.sources.education = source.into();
        self
    }
}

impl FromStr for AppConfig {
    type Err = ConfigError;

    fn from_str(content: &str) -> Result<Self, Self::Err> {
        Ok(toml::from_str(content)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::loader::DEFAULT_EDUCATION_URL;
    use std::io::Write;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: AppConfig = "".parse().expect("Should parse");
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.map.width, 1024.0);
        assert_eq!(config.page.title, "Choropleth Map of US Counties");
    }

    #[test]
    fn test_partial_sections() {
        let toml_str = r#"
[sources]
topology = "data/counties.json"

[map]
width = 960
precision = 1

[legend.margin]
left = 30

[page]
title = "Degrees"
"#;
        let config: AppConfig = toml_str.parse().expect("Should parse");
        assert_eq!(config.sources.topology, "data/counties.json");
        assert_eq!(config.sources.education, DEFAULT_EDUCATION_URL);
        assert_eq!(config.map.width, 960.0);
        assert_eq!(config.map.height, 768.0);
        assert_eq!(config.map.precision, 1);
        assert_eq!(config.legend.margin.left, 30.0);
        assert_eq!(config.legend.margin.top, 10.0);
        assert_eq!(config.page.title, "Degrees");
        assert!(config.page.description.contains("bachelor's degree"));
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[svg]\npretty_print = false").unwrap();
        let config = AppConfig::from_file(file.path()).expect("Should load");
        assert!(!config.svg.pretty_print);
        assert!(!config.render_config().svg.pretty_print);
    }

    #[test]
    fn test_source_overrides() {
        let config = AppConfig::default()
            .with_topology("a.json")
            .with_education("b.json");
        assert_eq!(config.sources, Sources::new("a.json", "b.json"));
    }

    #[test]
    fn test_invalid_toml_error() {
        let result: Result<AppConfig, _> = "this is not valid toml {{{{".parse();
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn test_missing_file() {
        let result = AppConfig::from_file(Path::new("/nonexistent/choropleth.toml"));
        assert!(matches!(result, Err(ConfigError::IoError(_))));
    }
}
