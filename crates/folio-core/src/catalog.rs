//! Project catalog — the loaded data file plus listing and lookup
//!
//! A `Catalog` owns the raw store for the lifetime of the process and never
//! mutates it. Every read recomputes the canonical form from the raw value;
//! there is no cache to invalidate.

use std::path::Path;

use serde_json::Value;
use tracing::debug;

use crate::config::{CatalogConfig, LookupMode};
use crate::detail::{build_detail, ProjectDetail};
use crate::normalizer::{map_raw, normalize_optional, DisplayProject};
use crate::record::RawProjectRecord;
use crate::store::{detect_shape, unwrap_optional, StoreShape};
use crate::{Error, Result};

/// Immutable view over a raw project store
#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    store: Option<Value>,
    config: CatalogConfig,
}

impl Catalog {
    /// Wrap an already-parsed store with the default configuration
    pub fn new(store: Value) -> Self {
        Self::with_config(Some(store), CatalogConfig::default())
    }

    /// Catalog for a site bundled without a data file
    pub fn empty() -> Self {
        Self::with_config(None, CatalogConfig::default())
    }

    pub fn with_config(store: Option<Value>, config: CatalogConfig) -> Self {
        Self { store, config }
    }

    /// Parse a catalog from JSON text
    ///
    /// # Errors
    /// Returns `Parse` if the text is not valid JSON. Any valid JSON value
    /// is an acceptable store.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(Self::new(serde_json::from_str(json)?))
    }

    /// Read and parse the data file at `path`
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| Error::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        debug!(path = %path.display(), bytes = text.len(), "loaded project data file");
        Self::from_json_str(&text)
    }

    /// Replace the configuration, keeping the store
    pub fn configured(mut self, config: CatalogConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &CatalogConfig {
        &self.config
    }

    pub fn store(&self) -> Option<&Value> {
        self.store.as_ref()
    }

    /// Shape of the underlying store, `None` if there is no store at all
    pub fn shape(&self) -> Option<StoreShape> {
        self.store.as_ref().map(detect_shape)
    }

    /// Unwrapped raw records in store order
    pub fn raw_records(&self) -> Vec<&Value> {
        unwrap_optional(self.store.as_ref())
    }

    /// Canonical listing, recomputed on every call
    pub fn projects(&self) -> Vec<DisplayProject> {
        normalize_optional(self.store.as_ref(), &self.config.labels)
    }

    pub fn len(&self) -> usize {
        self.raw_records().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// First raw record whose own `id` equals `id`, with its position
    ///
    /// Only the explicit `id` field is compared: exact, case-sensitive.
    pub fn find_raw(&self, id: &str) -> Option<(usize, &Value)> {
        self.raw_records()
            .into_iter()
            .enumerate()
            .find(|(_, value)| RawProjectRecord::from_value(value).id.as_deref() == Some(id))
    }

    /// Look up one project for the detail view
    ///
    /// In [`LookupMode::Strict`] only explicit ids match. In
    /// [`LookupMode::Listing`] a miss on explicit ids falls back to the ids
    /// the listing exposes, synthesized ones included.
    pub fn find(&self, id: &str) -> Option<DisplayProject> {
        self.locate(id)
            .map(|(index, record)| map_raw(&record, index, &self.config.labels))
    }

    /// Look up one project and build its full detail view
    pub fn detail(&self, id: &str) -> Option<ProjectDetail> {
        self.locate(id)
            .map(|(index, record)| build_detail(&record, index, &self.config.labels))
    }

    fn locate(&self, id: &str) -> Option<(usize, RawProjectRecord)> {
        if let Some((index, value)) = self.find_raw(id) {
            return Some((index, RawProjectRecord::from_value(value)));
        }

        let found = match self.config.lookup {
            LookupMode::Strict => None,
            LookupMode::Listing => self
                .raw_records()
                .into_iter()
                .map(RawProjectRecord::from_value)
                .enumerate()
                .find(|(index, record)| {
                    record.id.is_none() && self.config.labels.synthesized_id(*index) == id
                }),
        };
        if found.is_none() {
            debug!(%id, lookup = %self.config.lookup, "project not found");
        }
        found
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn foo_bar() -> Catalog {
        Catalog::new(json!([{"id": "x1", "name": "Foo"}, {"name": "Bar"}]))
    }

    fn listing_mode(catalog: Catalog) -> Catalog {
        catalog.configured(CatalogConfig {
            lookup: LookupMode::Listing,
            ..CatalogConfig::default()
        })
    }

    #[test]
    fn test_lookup_by_explicit_id() {
        let project = foo_bar().find("x1").unwrap();
        assert_eq!(project.title, "Foo");
        assert_eq!(project.id, "x1");
    }

    #[test]
    fn test_synthesized_id_not_found_in_strict_mode() {
        let catalog = foo_bar();
        let listing_ids: Vec<_> = catalog.projects().into_iter().map(|p| p.id).collect();
        assert_eq!(listing_ids, vec!["x1", "project-1"]);
        assert_eq!(catalog.find("project-1"), None);
        assert_eq!(catalog.detail("project-1"), None);
    }

    #[test]
    fn test_synthesized_id_found_in_listing_mode() {
        let catalog = listing_mode(foo_bar());
        let project = catalog.find("project-1").unwrap();
        assert_eq!(project.title, "Bar");
        assert_eq!(project.id, "project-1");
        assert_eq!(catalog.find("x1").unwrap().title, "Foo");
    }

    #[test]
    fn test_listing_mode_prefers_explicit_ids() {
        // An explicit id equal to another record's synthesized id wins
        let catalog = listing_mode(Catalog::new(json!([
            {"name": "Positional"},
            {"id": "project-0", "name": "Explicit"}
        ])));
        assert_eq!(catalog.find("project-0").unwrap().title, "Explicit");
    }

    #[test]
    fn test_lookup_is_exact() {
        let catalog = foo_bar();
        assert_eq!(catalog.find("X1"), None);
        assert_eq!(catalog.find("x"), None);
        assert_eq!(catalog.find(""), None);
    }

    #[test]
    fn test_first_match_wins() {
        let catalog = Catalog::new(json!([
            {"id": "dup", "name": "First"},
            {"id": "dup", "name": "Second"}
        ]));
        assert_eq!(catalog.find("dup").unwrap().title, "First");
        assert_eq!(catalog.find_raw("dup").unwrap().0, 0);
    }

    #[test]
    fn test_found_project_keeps_listing_position() {
        let catalog = Catalog::new(json!([{"name": "A"}, {"id": "b"}]));
        let found = catalog.find("b").unwrap();
        assert_eq!(found.title, "Project 2");
        assert_eq!(found, catalog.projects()[1]);
    }

    #[test]
    fn test_numeric_ids_match_their_text() {
        let catalog = Catalog::new(json!([{"id": 42, "name": "Answer"}]));
        assert_eq!(catalog.projects()[0].id, "42");
        assert_eq!(catalog.find("42").unwrap().title, "Answer");
    }

    #[test]
    fn test_wrapped_store_lookup() {
        let catalog = Catalog::new(json!({"projects": [{"id": "w", "name": "Wrapped"}]}));
        assert_eq!(catalog.shape(), Some(StoreShape::Wrapped));
        assert_eq!(catalog.find("w").unwrap().title, "Wrapped");
    }

    #[test]
    fn test_empty_catalogs() {
        let catalog = Catalog::new(json!([]));
        assert!(catalog.projects().is_empty());
        assert!(catalog.is_empty());
        assert_eq!(catalog.find("anything"), None);

        let absent = Catalog::empty();
        assert_eq!(absent.shape(), None);
        assert!(absent.projects().is_empty());
    }

    #[test]
    fn test_detail_lookup() {
        let catalog = Catalog::new(json!([{
            "id": "atlas",
            "name": "Atlas Maps",
            "ui": {"hero": {"image": "hero.png"}}
        }]));
        let detail = catalog.detail("atlas").unwrap();
        assert_eq!(detail.summary.id, "atlas");
        assert_eq!(detail.title_rest, "Maps");
        assert_eq!(detail.hero_image.as_deref(), Some("hero.png"));
    }

    #[test]
    fn test_from_json_str_errors() {
        assert!(matches!(
            Catalog::from_json_str("[{\"id\": }"),
            Err(Error::Parse(_))
        ));
        assert_eq!(Catalog::from_json_str("null").unwrap().len(), 1);
    }

    #[test]
    fn test_from_path_missing_file() {
        let err = Catalog::from_path("/nonexistent/folio/projects.json").unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
    }

    #[test]
    fn test_from_path_reads_file() {
        let path = std::env::temp_dir()
            .join(format!("folio_catalog_from_path_{}.json", std::process::id()));
        std::fs::write(&path, r#"{"projects": [{"id": "t", "name": "Temp"}]}"#).expect("write temp");
        let catalog = Catalog::from_path(&path).unwrap();
        assert_eq!(catalog.projects()[0].title, "Temp");
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_projects_recomputed_identically() {
        let catalog = foo_bar();
        let first = catalog.projects();
        for i in 0..100 {
            assert_eq!(first, catalog.projects(), "Determinism failure at iteration {}", i);
        }
    }
}
