//! Request and response types for the service operations.
//!
//! Drafts and patches carry `month` as a plain string because month names
//! arrive unvalidated from callers; [`ManualService`](crate::ManualService)
//! normalizes and validates them against the [`Month`] enumeration before
//! anything touches the store.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use lectio_store::{MainPoint, Manual, Month};

/// Fields accepted when creating a manual.
///
/// `title`, `month`, and `order` are required; everything else is optional
/// lesson content.  `slug` defaults to `<month>_<order>_<epoch-millis>` when
/// omitted.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManualDraft {
    pub slug: Option<String>,
    pub title: Option<String>,
    pub theme: Option<String>,
    pub week: Option<i64>,
    pub date: Option<String>,
    pub memory_verse: Option<String>,
    pub text: Option<String>,
    pub introduction: Option<String>,
    #[serde(default)]
    pub main_points: Vec<MainPoint>,
    pub class_discussion: Option<String>,
    pub conclusion: Option<String>,
    pub image_url: Option<String>,
    pub sub_topic: Option<String>,
    #[serde(default)]
    pub sub_topics: Vec<String>,
    pub cover_banner_img: Option<String>,
    pub declaration: Option<String>,
    #[serde(default)]
    pub recommended_books: Vec<String>,
    pub feedback_link: Option<String>,
    pub month: Option<String>,
    pub order: Option<i64>,
}

/// Partial field set for updating a manual.
///
/// Absent fields keep their stored value; supplied fields replace it.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManualPatch {
    pub slug: Option<String>,
    pub title: Option<String>,
    pub theme: Option<String>,
    pub week: Option<i64>,
    pub date: Option<String>,
    pub memory_verse: Option<String>,
    pub text: Option<String>,
    pub introduction: Option<String>,
    pub main_points: Option<Vec<MainPoint>>,
    pub class_discussion: Option<String>,
    pub conclusion: Option<String>,
    pub image_url: Option<String>,
    pub sub_topic: Option<String>,
    pub sub_topics: Option<Vec<String>>,
    pub cover_banner_img: Option<String>,
    pub declaration: Option<String>,
    pub recommended_books: Option<Vec<String>>,
    pub feedback_link: Option<String>,
    pub month: Option<String>,
    pub order: Option<i64>,
}

/// The recommendation result: up to 4 manuals plus the resolved periods,
/// reported back for caller transparency.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    /// Up to 3 manuals from the current month plus 1 preview from the next
    /// (or a 4th from the current month when the next is empty).
    pub manuals: Vec<Manual>,
    /// The active month resolved from the request timestamp.
    pub current_month: Month,
    /// The preview month (`current_month.next()`).
    pub next_month: Month,
    /// The timestamp the rotation was computed from.
    pub resolved_at: DateTime<Utc>,
}

/// Every manual, partitioned by month.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupedManuals {
    /// All 12 months in calendar order, each with its ordered manuals
    /// (possibly empty).
    pub months: BTreeMap<Month, Vec<Manual>>,
    /// Total number of manuals across all months.
    pub total: usize,
}
