//! Catalog verifier — reports data problems the normalizer silently absorbs
//!
//! Normalization never fails, so a data file can be broken in ways nobody
//! notices until a visitor clicks a card. The verifier accumulates every
//! diagnostic instead of stopping at the first one.
//!
//! # Checks
//!
//! 1. **Identity** — listing ids are unique; records without an explicit id
//!    cannot be reached by strict lookup
//! 2. **Presentation** — missing images, placeholder titles
//! 3. **Navigation** — previous/next links name projects that lookup reaches
//! 4. **Content** — the catalog is not empty

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;
use tracing::debug;

use crate::catalog::Catalog;
use crate::config::LookupMode;
use crate::normalizer::map_raw;
use crate::record::RawProjectRecord;

// ── Verification Result Types ─────────────────────────────

/// Result of catalog verification — accumulates all diagnostics
#[derive(Debug, Clone, Default, Serialize)]
pub struct VerificationResult {
    pub diagnostics: Vec<Diagnostic>,
}

impl VerificationResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if no errors were found (warnings are OK)
    pub fn is_valid(&self) -> bool {
        !self.diagnostics.iter().any(|d| d.severity == Severity::Error)
    }

    pub fn errors(&self) -> Vec<&Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Error)
            .collect()
    }

    pub fn warnings(&self) -> Vec<&Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Warning)
            .collect()
    }

    fn add_error(&mut self, kind: DiagnosticKind, message: String, index: Option<usize>) {
        self.push(Severity::Error, kind, message, index);
    }

    fn add_warning(&mut self, kind: DiagnosticKind, message: String, index: Option<usize>) {
        self.push(Severity::Warning, kind, message, index);
    }

    fn push(&mut self, severity: Severity, kind: DiagnosticKind, message: String, index: Option<usize>) {
        self.diagnostics.push(Diagnostic {
            severity,
            kind,
            message,
            index,
        });
    }
}

/// A single verification diagnostic
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub severity: Severity,
    pub kind: DiagnosticKind,
    pub message: String,
    /// Position of the offending record in the unwrapped store
    pub index: Option<usize>,
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let prefix = match self.severity {
            Severity::Error => "error",
            Severity::Warning => "warning",
        };
        match self.index {
            Some(index) => write!(f, "{} [{}] at record {}: {}", prefix, self.kind, index, self.message),
            None => write!(f, "{} [{}]: {}", prefix, self.kind, self.message),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

/// Category of catalog issue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum DiagnosticKind {
    DuplicateId,
    Unreachable,
    MissingImage,
    MissingTitle,
    DanglingLink,
    NumericId,
    EmptyCatalog,
}

impl std::fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            DiagnosticKind::DuplicateId => write!(f, "duplicate-id"),
            DiagnosticKind::Unreachable => write!(f, "unreachable"),
            DiagnosticKind::MissingImage => write!(f, "missing-image"),
            DiagnosticKind::MissingTitle => write!(f, "missing-title"),
            DiagnosticKind::DanglingLink => write!(f, "dangling-link"),
            DiagnosticKind::NumericId => write!(f, "numeric-id"),
            DiagnosticKind::EmptyCatalog => write!(f, "empty-catalog"),
        }
    }
}

// ── Public API ────────────────────────────────────────────

/// Verify a catalog and return every diagnostic found
pub fn verify(catalog: &Catalog) -> VerificationResult {
    let mut result = VerificationResult::new();
    let labels = &catalog.config().labels;
    let raw = catalog.raw_records();
    let records: Vec<RawProjectRecord> = raw.iter().map(|v| RawProjectRecord::from_value(v)).collect();

    if records.is_empty() {
        result.add_warning(
            DiagnosticKind::EmptyCatalog,
            "catalog has no projects, the listing will be empty".into(),
            None,
        );
        return result;
    }

    let mut first_seen: BTreeMap<String, usize> = BTreeMap::new();
    for (index, record) in records.iter().enumerate() {
        let project = map_raw(record, index, labels);

        match first_seen.get(&project.id) {
            Some(first) => result.add_error(
                DiagnosticKind::DuplicateId,
                format!("id '{}' already used by record {}", project.id, first),
                Some(index),
            ),
            None => {
                first_seen.insert(project.id.clone(), index);
            }
        }

        if let Some(number) = raw[index].get("id").filter(|id| id.is_number()) {
            result.add_warning(
                DiagnosticKind::NumericId,
                format!(
                    "id {} is a number; it is listed and looked up as the text '{}'",
                    number, project.id
                ),
                Some(index),
            );
        }

        if record.id.is_none() && catalog.config().lookup == LookupMode::Strict {
            result.add_warning(
                DiagnosticKind::Unreachable,
                format!(
                    "no explicit id; listed as '{}' but its detail page cannot be looked up",
                    project.id
                ),
                Some(index),
            );
        }

        if project.image.is_none() {
            result.add_warning(
                DiagnosticKind::MissingImage,
                format!("'{}' has no thumbnail, hero image or images", project.id),
                Some(index),
            );
        }

        if record.name.is_none() && record.title.is_none() {
            result.add_warning(
                DiagnosticKind::MissingTitle,
                format!("no name or title, shown as '{}'", project.title),
                Some(index),
            );
        }
    }

    // Links only work when lookup can resolve their target
    let reachable: BTreeSet<&str> = match catalog.config().lookup {
        LookupMode::Strict => records.iter().filter_map(|r| r.id.as_deref()).collect(),
        LookupMode::Listing => first_seen.keys().map(String::as_str).collect(),
    };
    verify_navigation(&records, &reachable, &mut result);

    debug!(
        errors = result.errors().len(),
        warnings = result.warnings().len(),
        "verified catalog"
    );
    result
}

fn verify_navigation(
    records: &[RawProjectRecord],
    reachable: &BTreeSet<&str>,
    result: &mut VerificationResult,
) {
    for (index, record) in records.iter().enumerate() {
        let Some(navigation) = record.ui.as_ref().and_then(|u| u.navigation.as_ref()) else {
            continue;
        };
        for (direction, link) in [("previous", &navigation.previous), ("next", &navigation.next)] {
            let Some(target) = link.as_ref().and_then(|l| l.id.as_deref()) else {
                continue;
            };
            if !reachable.contains(target) {
                result.add_warning(
                    DiagnosticKind::DanglingLink,
                    format!("{} link points to '{}', which lookup cannot find", direction, target),
                    Some(index),
                );
            }
        }
    }
}
