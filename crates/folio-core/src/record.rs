//! Raw project records — the loosely shaped input as a typed optional model
//!
//! Every source field is `Option`: present or absent, never assumed. The
//! per-field deserializers in [`loose`] never fail; a slot holding the wrong
//! kind of JSON value simply reads as absent.
//!
//! # Presence rule
//!
//! - scalar: non-empty string, or a number rendered as decimal text
//! - list: a JSON array; absent entries inside it are dropped
//! - nested object: a JSON object; anything else is absent

use serde::Deserialize;
use serde_json::Value;

// ── Record model ──────────────────────────────────────────

/// One entry of the raw project store
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RawProjectRecord {
    #[serde(deserialize_with = "loose::text")]
    pub id: Option<String>,
    #[serde(deserialize_with = "loose::text")]
    pub name: Option<String>,
    #[serde(deserialize_with = "loose::text")]
    pub title: Option<String>,
    #[serde(deserialize_with = "loose::text")]
    pub category: Option<String>,
    #[serde(rename = "type", deserialize_with = "loose::text")]
    pub kind: Option<String>,
    #[serde(deserialize_with = "loose::text")]
    pub description: Option<String>,
    /// First entry of the `images` list
    #[serde(rename = "images", deserialize_with = "loose::first_text")]
    pub first_image: Option<String>,
    #[serde(deserialize_with = "loose::nested")]
    pub card: Option<Card>,
    #[serde(deserialize_with = "loose::nested")]
    pub details: Option<Details>,
    #[serde(deserialize_with = "loose::nested")]
    pub ui: Option<Ui>,
    #[serde(deserialize_with = "loose::nested")]
    pub links: Option<Links>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Card {
    #[serde(deserialize_with = "loose::text")]
    pub short_description: Option<String>,
    #[serde(deserialize_with = "loose::text")]
    pub thumbnail: Option<String>,
    #[serde(deserialize_with = "loose::text")]
    pub view_details_text: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Details {
    #[serde(deserialize_with = "loose::text")]
    pub description: Option<String>,
    #[serde(deserialize_with = "loose::nested")]
    pub technology_stack: Option<TechnologyStack>,
    #[serde(deserialize_with = "loose::nested")]
    pub links: Option<Links>,
    #[serde(deserialize_with = "loose::nested_list")]
    pub features: Option<Vec<Feature>>,
    #[serde(deserialize_with = "loose::text_list")]
    pub challenges: Option<Vec<String>>,
    #[serde(deserialize_with = "loose::text_list")]
    pub solutions: Option<Vec<String>>,
    #[serde(deserialize_with = "loose::nested_list")]
    pub roadmap: Option<Vec<RoadmapStep>>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct TechnologyStack {
    #[serde(deserialize_with = "loose::text_list")]
    pub frontend: Option<Vec<String>>,
    #[serde(deserialize_with = "loose::text_list")]
    pub backend: Option<Vec<String>>,
    #[serde(deserialize_with = "loose::text_list")]
    pub tools: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Links {
    #[serde(deserialize_with = "loose::text")]
    pub live_site: Option<String>,
    #[serde(deserialize_with = "loose::text")]
    pub client_repo: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Feature {
    #[serde(deserialize_with = "loose::text")]
    pub icon: Option<String>,
    #[serde(deserialize_with = "loose::text")]
    pub title: Option<String>,
    #[serde(deserialize_with = "loose::text")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct RoadmapStep {
    #[serde(deserialize_with = "loose::text")]
    pub step: Option<String>,
    #[serde(deserialize_with = "loose::text")]
    pub title: Option<String>,
    #[serde(deserialize_with = "loose::text")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Ui {
    #[serde(deserialize_with = "loose::nested")]
    pub hero: Option<Hero>,
    #[serde(deserialize_with = "loose::nested")]
    pub navigation: Option<Navigation>,
    /// `label → value` pairs in file order
    #[serde(deserialize_with = "loose::text_pairs")]
    pub meta: Option<Vec<(String, String)>>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Hero {
    #[serde(deserialize_with = "loose::text")]
    pub image: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Navigation {
    #[serde(deserialize_with = "loose::nested")]
    pub previous: Option<NeighbourRef>,
    #[serde(deserialize_with = "loose::nested")]
    pub next: Option<NeighbourRef>,
}

/// Link to a sibling project shown at the bottom of a detail page
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct NeighbourRef {
    #[serde(deserialize_with = "loose::text")]
    pub id: Option<String>,
    #[serde(deserialize_with = "loose::text")]
    pub title: Option<String>,
}

impl RawProjectRecord {
    /// Read a record out of any JSON value. Never fails.
    ///
    /// Only objects carry fields; `null`, scalars and arrays yield a record
    /// with every field absent.
    pub fn from_value(value: &Value) -> Self {
        match value {
            Value::Object(_) => Self::deserialize(value).unwrap_or_default(),
            _ => Self::default(),
        }
    }

    pub(crate) fn technology_stack(&self) -> Option<&TechnologyStack> {
        self.details.as_ref()?.technology_stack.as_ref()
    }

    pub(crate) fn details_links(&self) -> Option<&Links> {
        self.details.as_ref()?.links.as_ref()
    }

    pub(crate) fn hero_image(&self) -> Option<&str> {
        self.ui.as_ref()?.hero.as_ref()?.image.as_deref()
    }
}

// ── Lenient field deserializers ───────────────────────────

pub(crate) mod loose {
    use serde::de::DeserializeOwned;
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    /// Scalar presence rule shared by every text slot
    pub fn as_text(value: &Value) -> Option<String> {
        match value {
            Value::String(s) if !s.is_empty() => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }

    pub fn text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(as_text(&Value::deserialize(deserializer)?))
    }

    pub fn text_list<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Value::deserialize(deserializer)? {
            Value::Array(items) => Some(items.iter().filter_map(as_text).collect()),
            _ => None,
        })
    }

    pub fn first_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Value::deserialize(deserializer)? {
            Value::Array(items) => items.first().and_then(as_text),
            _ => None,
        })
    }

    pub fn text_pairs<'de, D>(deserializer: D) -> Result<Option<Vec<(String, String)>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Value::deserialize(deserializer)? {
            Value::Object(map) => Some(
                map.iter()
                    .filter_map(|(k, v)| as_text(v).map(|v| (k.clone(), v)))
                    .collect(),
            ),
            _ => None,
        })
    }

    pub fn nested<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
    where
        D: Deserializer<'de>,
        T: DeserializeOwned,
    {
        Ok(object_as(Value::deserialize(deserializer)?))
    }

    pub fn nested_list<'de, D, T>(deserializer: D) -> Result<Option<Vec<T>>, D::Error>
    where
        D: Deserializer<'de>,
        T: DeserializeOwned,
    {
        Ok(match Value::deserialize(deserializer)? {
            Value::Array(items) => Some(items.into_iter().filter_map(object_as).collect()),
            _ => None,
        })
    }

    fn object_as<T: DeserializeOwned>(value: Value) -> Option<T> {
        match value {
            Value::Object(_) => serde_json::from_value(value).ok(),
            _ => None,
        }
    }
}
