//! The manual service: recommendation, retrieval, and mutation operations.

use chrono::Utc;
use uuid::Uuid;

use lectio_store::{Database, Manual, Month};

use crate::error::{CoreError, Result};
use crate::models::{GroupedManuals, ManualDraft, ManualPatch, Recommendation};
use crate::rotation;

/// How many manuals the current month contributes at most.
const PRIMARY_LIMIT: u32 = 4;
/// How many of those are shown before the next-month preview slot.
const PRIMARY_SHOWN: usize = 3;

/// Service exposing every operation of the manuals API.
///
/// Owns the long-lived [`Database`] handle; holds no other state, so
/// concurrent requests only contend on the store itself.
pub struct ManualService {
    db: Database,
}

impl ManualService {
    /// Create a service over an open database.
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    // ------------------------------------------------------------------
    // Recommendation
    // ------------------------------------------------------------------

    /// Recommended manuals for the current instant.
    pub fn recommended(&self) -> Result<Recommendation> {
        self.recommended_at(Utc::now())
    }

    /// Recommended manuals for an explicit timestamp.
    ///
    /// Up to 3 manuals from the active month plus a 1-manual preview of the
    /// next month; if the next month is empty the active month's 4th manual
    /// fills the slot instead.  Missing data shrinks the list, it never
    /// fails.
    pub fn recommended_at(&self, now: chrono::DateTime<Utc>) -> Result<Recommendation> {
        let current_month = rotation::active_month(now);
        let next_month = current_month.next();

        let mut primary = self
            .db
            .list_manuals_for_month(current_month, Some(PRIMARY_LIMIT))?;
        let secondary = self.db.list_manuals_for_month(next_month, Some(1))?;

        // First 3 of the primary list; the leftover 4th (if any) is the
        // fallback for an empty preview slot.
        let leftover = primary.split_off(primary.len().min(PRIMARY_SHOWN));
        let mut manuals = primary;
        match secondary.into_iter().next() {
            Some(preview) => manuals.push(preview),
            None => manuals.extend(leftover.into_iter().take(1)),
        }

        tracing::debug!(
            current = %current_month,
            next = %next_month,
            count = manuals.len(),
            "computed recommendation"
        );

        Ok(Recommendation {
            manuals,
            current_month,
            next_month,
            resolved_at: now,
        })
    }

    // ------------------------------------------------------------------
    // Retrieval
    // ------------------------------------------------------------------

    /// All manuals for one month, ordered by sequence number.
    ///
    /// The name is case-normalized and validated against the 12-month
    /// enumeration; the resolved [`Month`] is returned alongside the list.
    pub fn by_month(&self, name: &str) -> Result<(Month, Vec<Manual>)> {
        let month = parse_month(name)?;
        let manuals = self.db.list_manuals_for_month(month, None)?;
        Ok((month, manuals))
    }

    /// A single manual by its internal identifier.
    pub fn by_id(&self, id: Uuid) -> Result<Manual> {
        Ok(self.db.get_manual(id)?)
    }

    /// Every manual, partitioned into the 12 months in calendar order.
    pub fn all_grouped(&self) -> Result<GroupedManuals> {
        let all = self.db.list_all_manuals()?;
        let total = all.len();

        let mut months: std::collections::BTreeMap<Month, Vec<Manual>> = Month::ALL
            .iter()
            .map(|m| (*m, Vec::new()))
            .collect();
        for manual in all {
            months
                .entry(manual.month)
                .or_default()
                .push(manual);
        }

        Ok(GroupedManuals { months, total })
    }

    /// Total number of stored manuals.
    pub fn count(&self) -> Result<usize> {
        Ok(self.db.count_manuals()?)
    }

    // ------------------------------------------------------------------
    // Mutation
    // ------------------------------------------------------------------

    /// Create a manual from the supplied fields.
    ///
    /// `title`, `month`, and `order` are required; the month must be one of
    /// the 12 canonical names.
    pub fn create(&self, draft: ManualDraft) -> Result<Manual> {
        let title = match draft.title {
            Some(t) if !t.trim().is_empty() => t,
            _ => return Err(CoreError::Validation("title is required".to_string())),
        };
        let month = match draft.month {
            Some(name) => parse_month(&name)?,
            None => return Err(CoreError::Validation("month is required".to_string())),
        };
        let order = draft
            .order
            .ok_or_else(|| CoreError::Validation("order is required".to_string()))?;

        let now = Utc::now();
        let slug = draft.slug.unwrap_or_else(|| {
            format!(
                "{}_{}_{}",
                month.name().to_lowercase(),
                order,
                now.timestamp_millis()
            )
        });

        let manual = Manual {
            id: Uuid::new_v4(),
            slug,
            title,
            theme: draft.theme,
            week: draft.week,
            date: draft.date,
            memory_verse: draft.memory_verse,
            text: draft.text,
            introduction: draft.introduction,
            main_points: draft.main_points,
            class_discussion: draft.class_discussion,
            conclusion: draft.conclusion,
            image_url: draft.image_url,
            sub_topic: draft.sub_topic,
            sub_topics: draft.sub_topics,
            cover_banner_img: draft.cover_banner_img,
            declaration: draft.declaration,
            recommended_books: draft.recommended_books,
            feedback_link: draft.feedback_link,
            month,
            order,
            created_at: now,
            updated_at: now,
        };

        self.db.insert_manual(&manual)?;
        tracing::info!(id = %manual.id, slug = %manual.slug, month = %month, "manual created");
        Ok(manual)
    }

    /// Merge a partial field set onto an existing manual.
    ///
    /// Validates a supplied month before touching the store, refreshes
    /// `updated_at`, and never creates a document.
    pub fn update(&self, id: Uuid, patch: ManualPatch) -> Result<Manual> {
        let month = patch.month.as_deref().map(parse_month).transpose()?;
        if let Some(title) = &patch.title {
            if title.trim().is_empty() {
                return Err(CoreError::Validation("title must not be empty".to_string()));
            }
        }

        let mut manual = self.db.get_manual(id)?;

        if let Some(slug) = patch.slug {
            manual.slug = slug;
        }
        if let Some(title) = patch.title {
            manual.title = title;
        }
        if patch.theme.is_some() {
            manual.theme = patch.theme;
        }
        if patch.week.is_some() {
            manual.week = patch.week;
        }
        if patch.date.is_some() {
            manual.date = patch.date;
        }
        if patch.memory_verse.is_some() {
            manual.memory_verse = patch.memory_verse;
        }
        if patch.text.is_some() {
            manual.text = patch.text;
        }
        if patch.introduction.is_some() {
            manual.introduction = patch.introduction;
        }
        if let Some(main_points) = patch.main_points {
            manual.main_points = main_points;
        }
        if patch.class_discussion.is_some() {
            manual.class_discussion = patch.class_discussion;
        }
        if patch.conclusion.is_some() {
            manual.conclusion = patch.conclusion;
        }
        if patch.image_url.is_some() {
            manual.image_url = patch.image_url;
        }
        if patch.sub_topic.is_some() {
            manual.sub_topic = patch.sub_topic;
        }
        if let Some(sub_topics) = patch.sub_topics {
            manual.sub_topics = sub_topics;
        }
        if patch.cover_banner_img.is_some() {
            manual.cover_banner_img = patch.cover_banner_img;
        }
        if patch.declaration.is_some() {
            manual.declaration = patch.declaration;
        }
        if let Some(recommended_books) = patch.recommended_books {
            manual.recommended_books = recommended_books;
        }
        if patch.feedback_link.is_some() {
            manual.feedback_link = patch.feedback_link;
        }
        if let Some(month) = month {
            manual.month = month;
        }
        if let Some(order) = patch.order {
            manual.order = order;
        }
        manual.updated_at = Utc::now();

        // A concurrent delete between the read and the write surfaces here.
        if !self.db.update_manual(&manual)? {
            return Err(CoreError::NotFound);
        }

        tracing::info!(id = %manual.id, "manual updated");
        Ok(manual)
    }

    /// Delete a manual, returning the removed document.
    pub fn delete(&self, id: Uuid) -> Result<Manual> {
        let manual = self.db.get_manual(id)?;
        if !self.db.delete_manual(id)? {
            return Err(CoreError::NotFound);
        }
        tracing::info!(id = %id, "manual deleted");
        Ok(manual)
    }

    /// Delete every manual belonging to one month.  Administrative.
    pub fn delete_by_month(&self, name: &str) -> Result<(Month, usize)> {
        let month = parse_month(name)?;
        let removed = self.db.delete_manuals_for_month(month)?;
        tracing::info!(month = %month, removed, "month cleared");
        Ok((month, removed))
    }

    /// Delete every manual.  Administrative reset.
    pub fn delete_all(&self) -> Result<usize> {
        let removed = self.db.delete_all_manuals()?;
        tracing::info!(removed, "all manuals cleared");
        Ok(removed)
    }
}

/// Validate a caller-supplied month name against the enumeration.
fn parse_month(name: &str) -> Result<Month> {
    Month::parse(name).ok_or_else(|| CoreError::InvalidMonth(name.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn service() -> ManualService {
        ManualService::new(Database::open_in_memory().unwrap())
    }

    fn draft(month: &str, order: i64) -> ManualDraft {
        ManualDraft {
            title: Some(format!("{month} lesson {order}")),
            month: Some(month.to_string()),
            order: Some(order),
            ..ManualDraft::default()
        }
    }

    fn at(month: u32, day: u32) -> chrono::DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, month, day, 9, 0, 0).unwrap()
    }

    // -- recommendation --------------------------------------------------

    #[test]
    fn recommendation_is_three_primary_plus_preview() {
        let svc = service();
        for order in 1..=4 {
            svc.create(draft("January", order)).unwrap();
        }
        svc.create(draft("February", 1)).unwrap();

        let rec = svc.recommended_at(at(1, 15)).unwrap();
        assert_eq!(rec.current_month, Month::January);
        assert_eq!(rec.next_month, Month::February);
        assert_eq!(rec.manuals.len(), 4);
        assert_eq!(
            rec.manuals
                .iter()
                .map(|m| (m.month, m.order))
                .collect::<Vec<_>>(),
            vec![
                (Month::January, 1),
                (Month::January, 2),
                (Month::January, 3),
                (Month::February, 1),
            ]
        );
    }

    #[test]
    fn empty_next_month_falls_back_to_fourth_primary() {
        let svc = service();
        for order in 1..=4 {
            svc.create(draft("January", order)).unwrap();
        }

        let rec = svc.recommended_at(at(1, 15)).unwrap();
        assert_eq!(rec.manuals.len(), 4);
        assert!(rec.manuals.iter().all(|m| m.month == Month::January));
        assert_eq!(
            rec.manuals.iter().map(|m| m.order).collect::<Vec<_>>(),
            vec![1, 2, 3, 4]
        );
    }

    #[test]
    fn sparse_months_shrink_the_list() {
        let svc = service();
        svc.create(draft("January", 1)).unwrap();
        svc.create(draft("January", 2)).unwrap();

        let rec = svc.recommended_at(at(1, 15)).unwrap();
        assert_eq!(rec.manuals.len(), 2);
    }

    #[test]
    fn empty_store_recommends_nothing_but_still_reports_months() {
        let svc = service();
        let rec = svc.recommended_at(at(6, 1)).unwrap();
        assert!(rec.manuals.is_empty());
        assert_eq!(rec.current_month, Month::June);
        assert_eq!(rec.next_month, Month::July);
    }

    #[test]
    fn december_previews_january() {
        let svc = service();
        svc.create(draft("December", 1)).unwrap();
        svc.create(draft("January", 1)).unwrap();

        let rec = svc.recommended_at(at(12, 20)).unwrap();
        assert_eq!(rec.next_month, Month::January);
        assert_eq!(rec.manuals.len(), 2);
        assert_eq!(rec.manuals[1].month, Month::January);
    }

    #[test]
    fn recommendation_reports_the_timestamp_used() {
        let svc = service();
        let now = at(3, 3);
        let rec = svc.recommended_at(now).unwrap();
        assert_eq!(rec.resolved_at, now);
    }

    // -- retrieval -------------------------------------------------------

    #[test]
    fn by_month_normalizes_and_filters() {
        let svc = service();
        svc.create(draft("January", 2)).unwrap();
        svc.create(draft("January", 1)).unwrap();
        svc.create(draft("February", 1)).unwrap();

        let (month, manuals) = svc.by_month("jAnUaRy").unwrap();
        assert_eq!(month, Month::January);
        assert_eq!(manuals.iter().map(|m| m.order).collect::<Vec<_>>(), vec![1, 2]);
        assert!(manuals.iter().all(|m| m.month == Month::January));
    }

    #[test]
    fn by_month_rejects_unknown_names() {
        let svc = service();
        assert!(matches!(
            svc.by_month("Smarch").unwrap_err(),
            CoreError::InvalidMonth(_)
        ));
    }

    #[test]
    fn grouped_view_covers_all_months_and_matches_totals() {
        let svc = service();
        svc.create(draft("March", 1)).unwrap();
        svc.create(draft("March", 2)).unwrap();
        svc.create(draft("October", 1)).unwrap();

        let grouped = svc.all_grouped().unwrap();
        assert_eq!(grouped.months.len(), 12);
        assert_eq!(grouped.total, 3);
        assert_eq!(grouped.months[&Month::March].len(), 2);
        assert_eq!(grouped.months[&Month::October].len(), 1);
        assert!(grouped.months[&Month::July].is_empty());

        // Concatenating the slices in calendar order reproduces the full
        // (month, order)-sorted store content.
        let concatenated: Vec<_> = grouped
            .months
            .values()
            .flatten()
            .map(|m| (m.month, m.order))
            .collect();
        assert_eq!(
            concatenated,
            vec![(Month::March, 1), (Month::March, 2), (Month::October, 1)]
        );
    }

    // -- mutation --------------------------------------------------------

    #[test]
    fn create_requires_title_month_and_order() {
        let svc = service();

        let missing_title = ManualDraft {
            month: Some("March".to_string()),
            order: Some(1),
            ..ManualDraft::default()
        };
        assert!(matches!(
            svc.create(missing_title).unwrap_err(),
            CoreError::Validation(_)
        ));

        let missing_order = ManualDraft {
            title: Some("A lesson".to_string()),
            month: Some("March".to_string()),
            ..ManualDraft::default()
        };
        assert!(matches!(
            svc.create(missing_order).unwrap_err(),
            CoreError::Validation(_)
        ));

        assert_eq!(svc.count().unwrap(), 0);
    }

    #[test]
    fn create_rejects_invalid_month() {
        let svc = service();
        let err = svc.create(draft("Smarch", 1)).unwrap_err();
        assert!(matches!(err, CoreError::InvalidMonth(_)));
    }

    #[test]
    fn create_defaults_the_slug() {
        let svc = service();
        let manual = svc.create(draft("March", 2)).unwrap();
        assert!(!manual.slug.is_empty());
        assert!(manual.slug.starts_with("march_2_"));

        let fetched = svc.by_id(manual.id).unwrap();
        assert_eq!(fetched.slug, manual.slug);
    }

    #[test]
    fn create_keeps_an_explicit_slug() {
        let svc = service();
        let explicit = ManualDraft {
            slug: Some("jan_2026_01".to_string()),
            ..draft("January", 1)
        };
        let manual = svc.create(explicit).unwrap();
        assert_eq!(manual.slug, "jan_2026_01");
    }

    #[test]
    fn update_merges_partial_fields() {
        let svc = service();
        let created = svc.create(draft("April", 1)).unwrap();

        let patch = ManualPatch {
            theme: Some("New theme".to_string()),
            order: Some(3),
            ..ManualPatch::default()
        };
        let updated = svc.update(created.id, patch).unwrap();

        assert_eq!(updated.theme.as_deref(), Some("New theme"));
        assert_eq!(updated.order, 3);
        // Unsupplied fields survive.
        assert_eq!(updated.title, created.title);
        assert_eq!(updated.month, Month::April);
        assert_eq!(updated.created_at, created.created_at);
        assert!(updated.updated_at >= created.updated_at);
    }

    #[test]
    fn update_validates_a_supplied_month() {
        let svc = service();
        let created = svc.create(draft("April", 1)).unwrap();

        let patch = ManualPatch {
            month: Some("Aprill".to_string()),
            ..ManualPatch::default()
        };
        assert!(matches!(
            svc.update(created.id, patch).unwrap_err(),
            CoreError::InvalidMonth(_)
        ));

        let patch = ManualPatch {
            month: Some("may".to_string()),
            ..ManualPatch::default()
        };
        let updated = svc.update(created.id, patch).unwrap();
        assert_eq!(updated.month, Month::May);
    }

    #[test]
    fn update_missing_manual_is_not_found_and_creates_nothing() {
        let svc = service();
        let err = svc.update(Uuid::new_v4(), ManualPatch::default()).unwrap_err();
        assert!(matches!(err, CoreError::NotFound));
        assert_eq!(svc.count().unwrap(), 0);
    }

    #[test]
    fn delete_returns_the_document_and_is_visible() {
        let svc = service();
        let created = svc.create(draft("August", 1)).unwrap();

        let deleted = svc.delete(created.id).unwrap();
        assert_eq!(deleted.id, created.id);

        assert!(matches!(svc.by_id(created.id).unwrap_err(), CoreError::NotFound));
        assert!(matches!(svc.delete(created.id).unwrap_err(), CoreError::NotFound));
    }

    #[test]
    fn delete_by_month_only_touches_that_month() {
        let svc = service();
        svc.create(draft("January", 1)).unwrap();
        svc.create(draft("January", 2)).unwrap();
        svc.create(draft("February", 1)).unwrap();

        let (month, removed) = svc.delete_by_month("january").unwrap();
        assert_eq!(month, Month::January);
        assert_eq!(removed, 2);
        assert_eq!(svc.count().unwrap(), 1);

        assert!(matches!(
            svc.delete_by_month("Smarch").unwrap_err(),
            CoreError::InvalidMonth(_)
        ));
    }

    #[test]
    fn delete_all_reports_the_count() {
        let svc = service();
        for order in 1..=3 {
            svc.create(draft("September", order)).unwrap();
        }
        assert_eq!(svc.delete_all().unwrap(), 3);
        assert_eq!(svc.delete_all().unwrap(), 0);
    }
}
