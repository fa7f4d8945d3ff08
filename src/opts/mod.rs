mod cli;
mod config;

use std::{path::PathBuf, time::Duration};

use crate::fonts::{remote::GOOGLE_FONTS_CSS_URL, FontRequest};

use anyhow::Context;
use url::Url;

pub use self::cli::Args;
pub use self::config::Config;

const DEFAULT_BUILTIN_DIR: &str = "fonts";
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// How to reach the remote font catalog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogOpts {
    pub url: Url,
    pub timeout: Duration,
    /// Downloaded families get cached under here
    pub cache_dir: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Opts {
    pub request: FontRequest,
    pub builtin_dir: PathBuf,
    /// `None` when the catalog is disabled
    pub catalog: Option<CatalogOpts>,
}

impl Opts {
    pub fn parse_and_load_from(args: &Args, config: Config) -> anyhow::Result<Self> {
        let system_cache_dir = dirs::cache_dir().map(|dir| dir.join("posterfont"));
        Self::parse_and_load_inner(args, config, system_cache_dir)
    }

    #[cfg(test)]
    pub fn parse_and_load_with_cache_dir(
        args: &Args,
        config: Config,
        system_cache_dir: Option<PathBuf>,
    ) -> anyhow::Result<Self> {
        Self::parse_and_load_inner(args, config, system_cache_dir)
    }

    fn parse_and_load_inner(
        args: &Args,
        config: Config,
        system_cache_dir: Option<PathBuf>,
    ) -> anyhow::Result<Self> {
        let Config {
            fonts:
                config::FontsSection {
                    family: config_family,
                    path: config_path,
                    builtin_dir: config_builtin_dir,
                },
            catalog:
                config::CatalogSection {
                    enabled: config_catalog_enabled,
                    url: config_catalog_url,
                    timeout_secs: config_timeout_secs,
                    cache_dir: config_cache_dir,
                },
        } = config;

        let request = FontRequest {
            family_name: args.font_family.clone().or(config_family),
            local_path: args.font_path.clone().or(config_path),
        };
        let builtin_dir = config_builtin_dir.unwrap_or_else(|| DEFAULT_BUILTIN_DIR.into());

        let catalog_enabled = !args.offline && config_catalog_enabled.unwrap_or(true);
        let catalog = if catalog_enabled {
            let raw_url = config_catalog_url.as_deref().unwrap_or(GOOGLE_FONTS_CSS_URL);
            let url = Url::parse(raw_url)
                .with_context(|| format!("Invalid font catalog url '{raw_url}'"))?;
            let timeout = Duration::from_secs(config_timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS));
            let cache_dir = config_cache_dir
                .or(system_cache_dir)
                .context("Failed to find the cache directory. Set `catalog.cache-dir` instead")?;
            Some(CatalogOpts {
                url,
                timeout,
                cache_dir,
            })
        } else {
            None
        };

        Ok(Self {
            request,
            builtin_dir,
            catalog,
        })
    }
}
