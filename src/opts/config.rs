use std::fs::read_to_string;
use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::Deserialize;

#[derive(Deserialize, Debug, Default, PartialEq, Eq, Clone)]
#[serde(default, rename_all = "kebab-case")]
pub struct FontsSection {
    pub family: Option<String>,
    pub path: Option<String>,
    /// Where the built-in Roboto files live. Defaults to `fonts`
    pub builtin_dir: Option<PathBuf>,
}

#[derive(Deserialize, Debug, Default, PartialEq, Eq, Clone)]
#[serde(default, rename_all = "kebab-case")]
pub struct CatalogSection {
    pub enabled: Option<bool>,
    pub url: Option<String>,
    pub timeout_secs: Option<u64>,
    pub cache_dir: Option<PathBuf>,
}

#[derive(Deserialize, Debug, Default, PartialEq, Eq)]
#[serde(default, rename_all = "kebab-case")]
pub struct Config {
    pub fonts: FontsSection,
    pub catalog: CatalogSection,
}

impl Config {
    pub fn load_from_file(path: &Path) -> anyhow::Result<Self> {
        let config_content = read_to_string(path).context(format!(
            "Failed to read configuration file at '{}'",
            path.display()
        ))?;

        Ok(toml::from_str(&config_content)?)
    }

    pub fn load_from_system() -> anyhow::Result<Self> {
        let config_dir =
            dirs::config_dir().context("Failed to find the configuration directory")?;

        let config_path = config_dir.join("posterfont").join("posterfont.toml");

        if !config_path.is_file() {
            return Ok(Self::default());
        }

        Self::load_from_file(&config_path)
    }
}
