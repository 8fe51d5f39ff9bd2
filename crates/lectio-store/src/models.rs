//! Domain model structs persisted in the local SQLite database.
//!
//! Every struct derives `Serialize` and `Deserialize` so it can be handed
//! directly to the API layer.  Field names are renamed to camelCase on the
//! wire to match what the client application expects.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::month::Month;

// ---------------------------------------------------------------------------
// MainPoint
// ---------------------------------------------------------------------------

/// One teaching point inside a manual.
///
/// Main points are embedded in their parent [`Manual`] and have no identity
/// or lifecycle of their own; they are stored as a JSON column.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct MainPoint {
    /// Point heading.
    #[serde(default)]
    pub title: String,
    /// Explanatory text for the point.
    #[serde(default)]
    pub description: String,
    /// Scripture citations backing the point, in display order.
    #[serde(default)]
    pub references: Vec<String>,
}

// ---------------------------------------------------------------------------
// Manual
// ---------------------------------------------------------------------------

/// One weekly lesson document.
///
/// Each manual is self-contained: no foreign keys to other manuals, no
/// versioning, no soft-delete.  `id` is the store's internal key; `slug` is
/// the externally meaningful label (conventionally unique, not enforced).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Manual {
    /// Store-internal identifier (UUID v4, generated at insert).
    pub id: Uuid,
    /// Human-assigned external label, e.g. `"jan_2026_01"`.  Not unique.
    pub slug: String,
    /// Lesson title.
    pub title: String,
    /// Monthly theme the lesson belongs to.
    pub theme: Option<String>,
    /// Week number within the theme (display only).
    pub week: Option<i64>,
    /// Free-text date label, e.g. `"January 4, 2026"`.
    pub date: Option<String>,
    /// Memory verse with citation.
    pub memory_verse: Option<String>,
    /// Scripture reference string for the lesson text.
    pub text: Option<String>,
    pub introduction: Option<String>,
    /// Teaching points in display order.
    pub main_points: Vec<MainPoint>,
    pub class_discussion: Option<String>,
    pub conclusion: Option<String>,
    pub image_url: Option<String>,
    pub sub_topic: Option<String>,
    pub sub_topics: Vec<String>,
    pub cover_banner_img: Option<String>,
    pub declaration: Option<String>,
    pub recommended_books: Vec<String>,
    pub feedback_link: Option<String>,
    /// Calendar month this manual belongs to.
    pub month: Month,
    /// 1-based position within the month.  Not unique within a month.
    pub order: i64,
    /// When the record was inserted.
    pub created_at: DateTime<Utc>,
    /// Refreshed on every update.
    pub updated_at: DateTime<Utc>,
}
