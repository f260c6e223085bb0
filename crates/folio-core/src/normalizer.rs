//! Canonical normalizer — converts raw project records to display form
//!
//! # Pipeline
//!
//! `raw store → unwrap_store → RawProjectRecord::from_value → map_record → DisplayProject`
//!
//! # Fallback chains (first present value wins, left to right)
//!
//! | field | chain | default |
//! |---|---|---|
//! | id | `id` | `project-<index>` |
//! | title | `name`, `title` | `Project <index + 1>` |
//! | category | `category`, `type` | `Project` |
//! | description | `card.shortDescription`, `details.description`, `description` | `""` |
//! | image | `card.thumbnail`, `ui.hero.image`, `images[0]` | absent |
//! | liveSite | `details.links.liveSite`, `links.liveSite` | absent |
//! | viewText | `card.viewDetailsText` | `View Details` |
//!
//! `technologies` is frontend ++ backend ++ tools, in that order, with no
//! sorting and no de-duplication.
//!
//! # Guarantees
//!
//! - **Total**: every input shape produces a well-formed sequence
//! - **Order preserving**: output length and order match the unwrapped input
//! - **Deterministic**: same input always produces the same output

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, trace};

use crate::config::Labels;
use crate::record::RawProjectRecord;
use crate::store::{unwrap_optional, unwrap_store};

/// Canonical project entity consumed by the listing and detail views
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayProject {
    pub id: String,
    pub title: String,
    pub category: String,
    pub description: String,
    pub image: Option<String>,
    pub technologies: Vec<String>,
    pub live_site: Option<String>,
    pub view_text: String,
}

// ── Public API ─────────────────────────────────────────────

/// Normalize a raw store into the canonical listing
pub fn normalize(store: &Value) -> Vec<DisplayProject> {
    normalize_with(store, &Labels::default())
}

/// Normalize a raw store using custom fallback labels
pub fn normalize_with(store: &Value, labels: &Labels) -> Vec<DisplayProject> {
    map_all(unwrap_store(store), labels)
}

/// Normalize a store that may be missing; an absent store lists nothing
pub fn normalize_optional(store: Option<&Value>, labels: &Labels) -> Vec<DisplayProject> {
    map_all(unwrap_optional(store), labels)
}

/// Map one raw JSON record at zero-based `index`
pub fn map_record(record: &Value, index: usize) -> DisplayProject {
    map_raw(&RawProjectRecord::from_value(record), index, &Labels::default())
}

/// Map an already-typed record at zero-based `index`
pub fn map_raw(record: &RawProjectRecord, index: usize, labels: &Labels) -> DisplayProject {
    let id = match &record.id {
        Some(id) => id.clone(),
        None => {
            let id = labels.synthesized_id(index);
            debug!(index, %id, "record has no id, synthesized one from position");
            id
        }
    };

    let card = record.card.as_ref();

    let title = first_present([record.name.as_deref(), record.title.as_deref()])
        .unwrap_or_else(|| labels.placeholder_title(index));

    let category = first_present([record.category.as_deref(), record.kind.as_deref()])
        .unwrap_or_else(|| labels.default_category.clone());

    let description = first_present([
        card.and_then(|c| c.short_description.as_deref()),
        record.details.as_ref().and_then(|d| d.description.as_deref()),
        record.description.as_deref(),
    ])
    .unwrap_or_default();

    let image = first_present([
        card.and_then(|c| c.thumbnail.as_deref()),
        record.hero_image(),
        record.first_image.as_deref(),
    ]);

    let live_site = first_present([
        record.details_links().and_then(|l| l.live_site.as_deref()),
        record.links.as_ref().and_then(|l| l.live_site.as_deref()),
    ]);

    let view_text = card
        .and_then(|c| c.view_details_text.clone())
        .unwrap_or_else(|| labels.view_details.clone());

    let project = DisplayProject {
        id,
        title,
        category,
        description,
        image,
        technologies: technologies(record),
        live_site,
        view_text,
    };
    trace!(index, id = %project.id, "mapped project record");
    project
}

/// Concatenate frontend, backend and tools in that fixed order
pub fn technologies(record: &RawProjectRecord) -> Vec<String> {
    let Some(stack) = record.technology_stack() else {
        return Vec::new();
    };
    [&stack.frontend, &stack.backend, &stack.tools]
        .into_iter()
        .flatten()
        .flat_map(|list| list.iter().cloned())
        .collect()
}

// ── Internals ──────────────────────────────────────────────

fn map_all(records: Vec<&Value>, labels: &Labels) -> Vec<DisplayProject> {
    records
        .into_iter()
        .enumerate()
        .map(|(index, value)| map_raw(&RawProjectRecord::from_value(value), index, labels))
        .collect()
}

fn first_present<const N: usize>(chain: [Option<&str>; N]) -> Option<String> {
    chain.into_iter().flatten().next().map(str::to_string)
}
