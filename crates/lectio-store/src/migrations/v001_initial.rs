//! v001 -- Initial schema creation.
//!
//! Creates the single `manuals` table plus its month/order index.

use rusqlite::Connection;

/// SQL executed when upgrading from version 0 to version 1.
const UP_SQL: &str = r#"
-- ----------------------------------------------------------------
-- Manuals (weekly lesson documents)
-- ----------------------------------------------------------------
CREATE TABLE IF NOT EXISTS manuals (
    id                TEXT PRIMARY KEY NOT NULL,  -- UUID v4, store-internal key
    slug              TEXT NOT NULL,              -- human-assigned label, not unique
    title             TEXT NOT NULL,
    theme             TEXT,
    week              INTEGER,
    date              TEXT,                       -- free-text display label
    memory_verse      TEXT,
    text              TEXT,                       -- scripture reference string
    introduction      TEXT,
    main_points       TEXT NOT NULL,              -- JSON: [{title, description, references}]
    class_discussion  TEXT,
    conclusion        TEXT,
    image_url         TEXT,
    sub_topic         TEXT,
    sub_topics        TEXT NOT NULL,              -- JSON array of strings
    cover_banner_img  TEXT,
    declaration       TEXT,
    recommended_books TEXT NOT NULL,              -- JSON array of strings
    feedback_link     TEXT,
    month             INTEGER NOT NULL,           -- 0 = January .. 11 = December
    ord               INTEGER NOT NULL,           -- 1-based position within the month
    created_at        TEXT NOT NULL,              -- ISO-8601 / RFC-3339
    updated_at        TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_manuals_month_ord ON manuals(month, ord);
"#;

/// Apply the initial migration.
pub fn up(conn: &Connection) -> Result<(), rusqlite::Error> {
    conn.execute_batch(UP_SQL)
}
