use crate::catalog::{CatalogBuilder, DEFAULT_SEARCH_LIMIT};
use crate::color::{Palette, DEFAULT_COLORS};
use crate::matcher::{default_rules, CatalogMatcher, MatchRule};
use crate::parser::TimeRange;
use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub palette: PaletteConfig,
    #[serde(default)]
    pub matcher: MatcherConfig,
    #[serde(default)]
    pub calendar: CalendarConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaletteConfig {
    pub colors: Vec<String>,
}

impl Default for PaletteConfig {
    fn default() -> Self {
        Self {
            colors: DEFAULT_COLORS.iter().map(|c| c.to_string()).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatcherConfig {
    pub rules: Vec<MatchRule>,
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self {
            rules: default_rules(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalendarConfig {
    pub time_range: TimeRange,
    pub search_limit: usize,
}

impl Default for CalendarConfig {
    fn default() -> Self {
        Self {
            time_range: TimeRange::default(),
            search_limit: DEFAULT_SEARCH_LIMIT,
        }
    }
}

impl Config {
    /// Load from the platform config directory, writing defaults on first use
    pub fn load() -> Result<Self> {
        let config_path = get_config_path()?;
        Self::load_from(&config_path)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        // If config doesn't exist, create default
        if !path.exists() {
            let default_config = Config::default();
            default_config.save_to(path)?;
            return Ok(default_config);
        }

        let content = fs::read_to_string(path).context("Failed to read config file")?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse config file")
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&get_config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        fs::write(path, content).context("Failed to write config file")?;

        Ok(())
    }

    pub fn palette(&self) -> Result<Palette> {
        Palette::new(self.palette.colors.iter().cloned())
            .context("Invalid palette configuration")
    }

    pub fn matcher(&self) -> Result<CatalogMatcher> {
        CatalogMatcher::new(self.matcher.rules.clone())
            .context("Invalid matcher rules")
    }

    pub fn catalog_builder(&self) -> Result<CatalogBuilder> {
        Ok(CatalogBuilder::new(self.palette()?))
    }
}

fn get_config_path() -> Result<PathBuf> {
    let proj_dirs = ProjectDirs::from("com", "classgrid", "classgrid")
        .context("Failed to determine config directory")?;

    Ok(proj_dirs.config_dir().join("config.toml"))
}
