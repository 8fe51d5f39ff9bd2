//! CRUD operations for [`Manual`] records.

use chrono::{DateTime, Utc};
use rusqlite::params;
use uuid::Uuid;

use crate::database::Database;
use crate::error::{Result, StoreError};
use crate::models::Manual;
use crate::month::Month;

/// Column list shared by every SELECT; must stay in sync with
/// [`row_to_manual`].
const COLUMNS: &str = "id, slug, title, theme, week, date, memory_verse, text, introduction, \
     main_points, class_discussion, conclusion, image_url, sub_topic, sub_topics, \
     cover_banner_img, declaration, recommended_books, feedback_link, month, ord, \
     created_at, updated_at";

impl Database {
    // ------------------------------------------------------------------
    // Create
    // ------------------------------------------------------------------

    /// Insert a new manual.
    pub fn insert_manual(&self, manual: &Manual) -> Result<()> {
        self.conn().execute(
            "INSERT INTO manuals (id, slug, title, theme, week, date, memory_verse, text, \
             introduction, main_points, class_discussion, conclusion, image_url, sub_topic, \
             sub_topics, cover_banner_img, declaration, recommended_books, feedback_link, \
             month, ord, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, \
             ?17, ?18, ?19, ?20, ?21, ?22, ?23)",
            params![
                manual.id.to_string(),
                manual.slug,
                manual.title,
                manual.theme,
                manual.week,
                manual.date,
                manual.memory_verse,
                manual.text,
                manual.introduction,
                serde_json::to_string(&manual.main_points)?,
                manual.class_discussion,
                manual.conclusion,
                manual.image_url,
                manual.sub_topic,
                serde_json::to_string(&manual.sub_topics)?,
                manual.cover_banner_img,
                manual.declaration,
                serde_json::to_string(&manual.recommended_books)?,
                manual.feedback_link,
                manual.month.index() as i64,
                manual.order,
                manual.created_at.to_rfc3339(),
                manual.updated_at.to_rfc3339(),
            ],
        )?;
        Ok(())
    }

    // ------------------------------------------------------------------
    // Read
    // ------------------------------------------------------------------

    /// Fetch a single manual by its internal UUID.
    pub fn get_manual(&self, id: Uuid) -> Result<Manual> {
        self.conn()
            .query_row(
                &format!("SELECT {COLUMNS} FROM manuals WHERE id = ?1"),
                params![id.to_string()],
                row_to_manual,
            )
            .map_err(|e| match e {
                rusqlite::Error::QueryReturnedNoRows => StoreError::NotFound,
                other => StoreError::Sqlite(other),
            })
    }

    /// List manuals for one month, ordered by their sequence number.
    ///
    /// `limit` caps the result; `None` returns the whole month (SQLite
    /// treats the negative LIMIT we substitute as unlimited).
    pub fn list_manuals_for_month(&self, month: Month, limit: Option<u32>) -> Result<Vec<Manual>> {
        let mut stmt = self.conn().prepare(&format!(
            "SELECT {COLUMNS} FROM manuals WHERE month = ?1 ORDER BY ord ASC LIMIT ?2"
        ))?;

        let limit = limit.map_or(-1i64, i64::from);
        let rows = stmt.query_map(params![month.index() as i64, limit], row_to_manual)?;

        let mut manuals = Vec::new();
        for row in rows {
            manuals.push(row?);
        }
        Ok(manuals)
    }

    /// List every manual, ordered by (month, sequence number).
    ///
    /// `month` is stored as its 0-11 calendar index, so this ordering follows
    /// the calendar rather than the alphabet.
    pub fn list_all_manuals(&self) -> Result<Vec<Manual>> {
        let mut stmt = self.conn().prepare(&format!(
            "SELECT {COLUMNS} FROM manuals ORDER BY month ASC, ord ASC"
        ))?;

        let rows = stmt.query_map([], row_to_manual)?;
        rows.collect::<std::result::Result<Vec<_>, _>>()
            .map_err(StoreError::Sqlite)
    }

    /// Total number of stored manuals.
    pub fn count_manuals(&self) -> Result<usize> {
        let count: i64 =
            self.conn()
                .query_row("SELECT COUNT(*) FROM manuals", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    // ------------------------------------------------------------------
    // Update
    // ------------------------------------------------------------------

    /// Rewrite an existing manual row.  Returns `true` if a row was updated.
    ///
    /// The caller supplies the fully merged record (partial-update merging
    /// happens in the service layer); `created_at` is written as-is so it
    /// survives updates.
    pub fn update_manual(&self, manual: &Manual) -> Result<bool> {
        let affected = self.conn().execute(
            "UPDATE manuals SET slug = ?2, title = ?3, theme = ?4, week = ?5, date = ?6, \
             memory_verse = ?7, text = ?8, introduction = ?9, main_points = ?10, \
             class_discussion = ?11, conclusion = ?12, image_url = ?13, sub_topic = ?14, \
             sub_topics = ?15, cover_banner_img = ?16, declaration = ?17, \
             recommended_books = ?18, feedback_link = ?19, month = ?20, ord = ?21, \
             created_at = ?22, updated_at = ?23
             WHERE id = ?1",
            params![
                manual.id.to_string(),
                manual.slug,
                manual.title,
                manual.theme,
                manual.week,
                manual.date,
                manual.memory_verse,
                manual.text,
                manual.introduction,
                serde_json::to_string(&manual.main_points)?,
                manual.class_discussion,
                manual.conclusion,
                manual.image_url,
                manual.sub_topic,
                serde_json::to_string(&manual.sub_topics)?,
                manual.cover_banner_img,
                manual.declaration,
                serde_json::to_string(&manual.recommended_books)?,
                manual.feedback_link,
                manual.month.index() as i64,
                manual.order,
                manual.created_at.to_rfc3339(),
                manual.updated_at.to_rfc3339(),
            ],
        )?;
        Ok(affected > 0)
    }

    // ------------------------------------------------------------------
    // Delete
    // ------------------------------------------------------------------

    /// Delete a manual by UUID.  Returns `true` if a row was deleted.
    pub fn delete_manual(&self, id: Uuid) -> Result<bool> {
        let affected = self
            .conn()
            .execute("DELETE FROM manuals WHERE id = ?1", params![id.to_string()])?;
        Ok(affected > 0)
    }

    /// Delete every manual belonging to one month.  Returns the count removed.
    pub fn delete_manuals_for_month(&self, month: Month) -> Result<usize> {
        let affected = self.conn().execute(
            "DELETE FROM manuals WHERE month = ?1",
            params![month.index() as i64],
        )?;
        Ok(affected)
    }

    /// Delete every manual.  Returns the count removed.
    pub fn delete_all_manuals(&self) -> Result<usize> {
        let affected = self.conn().execute("DELETE FROM manuals", [])?;
        Ok(affected)
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Map a `rusqlite::Row` to a [`Manual`].
fn row_to_manual(row: &rusqlite::Row<'_>) -> rusqlite::Result<Manual> {
    let id_str: String = row.get(0)?;
    let main_points_json: String = row.get(9)?;
    let sub_topics_json: String = row.get(14)?;
    let recommended_books_json: String = row.get(17)?;
    let month_idx: i64 = row.get(19)?;
    let created_str: String = row.get(21)?;
    let updated_str: String = row.get(22)?;

    let id = Uuid::parse_str(&id_str).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(e))
    })?;

    let main_points = serde_json::from_str(&main_points_json).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(9, rusqlite::types::Type::Text, Box::new(e))
    })?;
    let sub_topics = serde_json::from_str(&sub_topics_json).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(14, rusqlite::types::Type::Text, Box::new(e))
    })?;
    let recommended_books = serde_json::from_str(&recommended_books_json).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(17, rusqlite::types::Type::Text, Box::new(e))
    })?;

    let created_at: DateTime<Utc> = DateTime::parse_from_rfc3339(&created_str)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(21, rusqlite::types::Type::Text, Box::new(e))
        })?;
    let updated_at: DateTime<Utc> = DateTime::parse_from_rfc3339(&updated_str)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(22, rusqlite::types::Type::Text, Box::new(e))
        })?;

    Ok(Manual {
        id,
        slug: row.get(1)?,
        title: row.get(2)?,
        theme: row.get(3)?,
        week: row.get(4)?,
        date: row.get(5)?,
        memory_verse: row.get(6)?,
        text: row.get(7)?,
        introduction: row.get(8)?,
        main_points,
        class_discussion: row.get(10)?,
        conclusion: row.get(11)?,
        image_url: row.get(12)?,
        sub_topic: row.get(13)?,
        sub_topics,
        cover_banner_img: row.get(15)?,
        declaration: row.get(16)?,
        recommended_books,
        feedback_link: row.get(18)?,
        month: Month::from_index(month_idx as usize),
        order: row.get(20)?,
        created_at,
        updated_at,
    })
}
