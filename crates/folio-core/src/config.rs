//! Catalog configuration
//!
//! Plain serde types with defaults that reproduce the site's fixed
//! behavior. Loading them from files or the environment is the caller's
//! job (the CLI layers `folio.toml` and `FOLIO_*` variables on top).

use serde::{Deserialize, Serialize};

use crate::scroll::ScrollConfig;
use crate::{Error, Result};

/// How a detail-page identifier is matched against the catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LookupMode {
    /// Match the raw record's own `id` only. Records without one are
    /// unreachable even though the listing gave them a synthesized id.
    #[default]
    Strict,
    /// Match the id the listing exposes, synthesized ids included
    Listing,
}

impl std::str::FromStr for LookupMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "strict" => Ok(LookupMode::Strict),
            "listing" => Ok(LookupMode::Listing),
            other => Err(Error::Config(format!(
                "unknown lookup mode '{}', expected 'strict' or 'listing'",
                other
            ))),
        }
    }
}

impl std::fmt::Display for LookupMode {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            LookupMode::Strict => write!(f, "strict"),
            LookupMode::Listing => write!(f, "listing"),
        }
    }
}

/// Fallback strings used when a record leaves a field out
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Labels {
    pub default_category: String,
    pub view_details: String,
    /// `Project` → titles `Project 1`, `Project 2`, …
    pub title_prefix: String,
    /// `project` → ids `project-0`, `project-1`, …
    pub id_prefix: String,
}

impl Default for Labels {
    fn default() -> Self {
        Self {
            default_category: "Project".into(),
            view_details: "View Details".into(),
            title_prefix: "Project".into(),
            id_prefix: "project".into(),
        }
    }
}

impl Labels {
    /// Positional id for the record at zero-based `index`
    pub fn synthesized_id(&self, index: usize) -> String {
        format!("{}-{}", self.id_prefix, index)
    }

    /// Positional title for the record at zero-based `index` (one-based text)
    pub fn placeholder_title(&self, index: usize) -> String {
        format!("{} {}", self.title_prefix, index + 1)
    }

    fn validate(&self) -> Result<()> {
        let blank = [
            ("default_category", &self.default_category),
            ("view_details", &self.view_details),
            ("title_prefix", &self.title_prefix),
            ("id_prefix", &self.id_prefix),
        ]
        .into_iter()
        .find(|(_, value)| value.trim().is_empty());

        match blank {
            Some((name, _)) => Err(Error::Config(format!("labels.{} must not be empty", name))),
            None => Ok(()),
        }
    }
}

/// Complete catalog configuration
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    pub lookup: LookupMode,
    pub labels: Labels,
    pub scroll: ScrollConfig,
}

impl CatalogConfig {
    /// Reject values that would break the listing's guarantees
    /// (non-empty titles, well-formed ids) or the scroll animation.
    pub fn validate(&self) -> Result<()> {
        self.labels.validate()?;
        self.scroll.validate()
    }
}
