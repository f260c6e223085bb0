//! Configuration loader
//!
//! Sources are merged in this order (later sources override earlier):
//! 1. `CatalogConfig::default()`
//! 2. TOML file: `--config <path>`, else `folio.toml` in the working
//!    directory when it exists
//! 3. Environment variables prefixed `FOLIO_`, nested keys separated by a
//!    double underscore (`FOLIO_LOOKUP`, `FOLIO_LABELS__VIEW_DETAILS`)

use std::path::{Path, PathBuf};

use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use folio_core::{CatalogConfig, Error, Result};
use tracing::debug;

pub const DEFAULT_CONFIG_FILENAME: &str = "folio.toml";
pub const CONFIG_ENV_PREFIX: &str = "FOLIO_";

#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config_path: Option<PathBuf>,
    env_prefix: String,
}

impl ConfigLoader {
    pub fn new() -> Self {
        Self {
            config_path: None,
            env_prefix: CONFIG_ENV_PREFIX.to_string(),
        }
    }

    /// Use an explicit configuration file; it must exist
    pub fn with_config_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.config_path = Some(path.as_ref().to_path_buf());
        self
    }

    pub fn load(&self) -> Result<CatalogConfig> {
        let mut figment = Figment::new().merge(Serialized::defaults(CatalogConfig::default()));

        match &self.config_path {
            Some(path) if path.exists() => {
                debug!(path = %path.display(), "loading configuration file");
                figment = figment.merge(Toml::file(path));
            }
            Some(path) => {
                return Err(Error::Config(format!(
                    "configuration file not found: {}",
                    path.display()
                )));
            }
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_FILENAME);
                if default_path.exists() {
                    debug!(path = DEFAULT_CONFIG_FILENAME, "loading default configuration file");
                    figment = figment.merge(Toml::file(default_path));
                }
            }
        }

        figment = figment.merge(Env::prefixed(&self.env_prefix).split("__"));

        let config: CatalogConfig = figment
            .extract()
            .map_err(|e| Error::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}
