//! Project detail view model
//!
//! The detail page shows everything the listing card does plus the case
//! study sections. Its hero image prefers `ui.hero.image` over
//! `card.thumbnail`, the reverse of the listing's image chain.

use serde::{Deserialize, Serialize};

use crate::config::Labels;
use crate::normalizer::{map_raw, DisplayProject};
use crate::record::{NeighbourRef, RawProjectRecord};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectDetail {
    #[serde(flatten)]
    pub summary: DisplayProject,
    /// First word of the title, rendered in the heading's plain color
    pub title_lead: String,
    /// Remaining words of the title, rendered highlighted
    pub title_rest: String,
    pub hero_image: Option<String>,
    pub repo: Option<String>,
    pub features: Vec<FeatureCard>,
    pub challenges: Vec<String>,
    pub solutions: Vec<String>,
    pub roadmap: Vec<RoadmapEntry>,
    pub meta: Vec<MetaEntry>,
    pub previous: Option<NeighbourLink>,
    pub next: Option<NeighbourLink>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureCard {
    pub icon: Option<String>,
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoadmapEntry {
    pub step: Option<String>,
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetaEntry {
    pub label: String,
    pub value: String,
}

/// Previous/next navigation target
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NeighbourLink {
    pub id: String,
    pub title: String,
}

/// Build the detail view for a record at zero-based `index`
pub fn build_detail(record: &RawProjectRecord, index: usize, labels: &Labels) -> ProjectDetail {
    let summary = map_raw(record, index, labels);
    let (title_lead, title_rest) = split_title(&summary.title);
    let details = record.details.as_ref();
    let ui = record.ui.as_ref();

    let hero_image = record
        .hero_image()
        .or_else(|| record.card.as_ref()?.thumbnail.as_deref())
        .map(str::to_string);

    let features = details
        .and_then(|d| d.features.as_ref())
        .map(|features| {
            features
                .iter()
                .map(|f| FeatureCard {
                    icon: f.icon.clone(),
                    title: f.title.clone().unwrap_or_default(),
                    description: f.description.clone().unwrap_or_default(),
                })
                .collect()
        })
        .unwrap_or_default();

    let roadmap = details
        .and_then(|d| d.roadmap.as_ref())
        .map(|steps| {
            steps
                .iter()
                .map(|r| RoadmapEntry {
                    step: r.step.clone(),
                    title: r.title.clone().unwrap_or_default(),
                    description: r.description.clone().unwrap_or_default(),
                })
                .collect()
        })
        .unwrap_or_default();

    let meta = ui
        .and_then(|u| u.meta.as_ref())
        .map(|pairs| {
            pairs
                .iter()
                .map(|(label, value)| MetaEntry {
                    label: label.clone(),
                    value: value.clone(),
                })
                .collect()
        })
        .unwrap_or_default();

    let navigation = ui.and_then(|u| u.navigation.as_ref());

    ProjectDetail {
        title_lead,
        title_rest,
        hero_image,
        repo: record
            .details_links()
            .and_then(|l| l.client_repo.clone()),
        features,
        challenges: details
            .and_then(|d| d.challenges.clone())
            .unwrap_or_default(),
        solutions: details
            .and_then(|d| d.solutions.clone())
            .unwrap_or_default(),
        roadmap,
        meta,
        previous: navigation.and_then(|n| neighbour(n.previous.as_ref())),
        next: navigation.and_then(|n| neighbour(n.next.as_ref())),
        summary,
    }
}

/// Split a title at its first space: `"Atlas Maps Pro"` → `("Atlas", "Maps Pro")`
pub fn split_title(title: &str) -> (String, String) {
    match title.split_once(' ') {
        Some((lead, rest)) => (lead.to_string(), rest.to_string()),
        None => (title.to_string(), String::new()),
    }
}

/// A neighbour link is only usable when it names a target id
fn neighbour(link: Option<&NeighbourRef>) -> Option<NeighbourLink> {
    let link = link?;
    let id = link.id.clone()?;
    Some(NeighbourLink {
        title: link.title.clone().unwrap_or_else(|| id.clone()),
        id,
    })
}
