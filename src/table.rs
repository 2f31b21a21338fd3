// src/table.rs
// The in-memory merged dataset handed to the presentation layer. Owned by the
// caller once returned; filtering produces new tables, never mutates.

use std::collections::HashSet;

use crate::record::ReviewRecord;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ReviewTable {
    records: Vec<ReviewRecord>,
}

impl ReviewTable {
    pub fn new(records: Vec<ReviewRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[ReviewRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Stable sort, most recent first. Stability keeps first-seen order among
    /// equal timestamps, which dedup relies on.
    pub fn sort_newest_first(&mut self) {
        self.records
            .sort_by(|a, b| b.timestamp_utc.cmp(&a.timestamp_utc));
    }

    /// Drop all but the first occurrence of each review id. Idempotent.
    pub fn dedup(&mut self) {
        let mut seen: HashSet<String> = HashSet::with_capacity(self.records.len());
        self.records.retain(|r| seen.insert(r.review_id.clone()));
    }

    /// Histogram over ratings 1..=5; unrated records count nowhere.
    pub fn star_counts(&self) -> [usize; 5] {
        let mut counts = [0usize; 5];
        for r in &self.records {
            if let Some(star) = r.rating {
                if (1..=5).contains(&star) {
                    counts[star as usize - 1] += 1;
                }
            }
        }
        counts
    }

    /// Canonical column names, in export order.
    pub fn headers() -> Vec<String> {
        [
            "review_id",
            "author_name",
            "body",
            "rating",
            "thumbs_up",
            "app_version",
            "timestamp_utc",
            "country",
            "language",
            "reply_body",
            "replied_at_utc",
        ]
        .iter()
        .map(|h| s!(*h))
        .collect()
    }

    /// Rows as display strings matching `headers()`.
    pub fn rows(&self) -> Vec<Vec<String>> {
        self.records
            .iter()
            .map(|r| {
                vec![
                    r.review_id.clone(),
                    r.author_name.clone(),
                    r.body.clone(),
                    r.rating.map(|v| v.to_string()).unwrap_or_default(),
                    r.thumbs_up.map(|v| v.to_string()).unwrap_or_default(),
                    r.app_version.clone(),
                    r.timestamp_utc.to_rfc3339(),
                    r.country.clone(),
                    r.language.clone(),
                    r.reply_body.clone(),
                    r.replied_at_utc.map(|t| t.to_rfc3339()).unwrap_or_default(),
                ]
            })
            .collect()
    }
}

/// Row-level styling hint derived from the rating. Informational only; not
/// part of the data contract.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RatingBand {
    Low,     // 1-2
    Mid,     // 3-4
    High,    // 5
    Unrated,
}

impl RatingBand {
    pub fn of(rating: Option<u8>) -> Self {
        match rating {
            Some(1 | 2) => RatingBand::Low,
            Some(3 | 4) => RatingBand::Mid,
            Some(5) => RatingBand::High,
            _ => RatingBand::Unrated,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn rec(id: &str, star: Option<u8>, at_secs: i64) -> ReviewRecord {
        ReviewRecord {
            review_id: s!(id),
            author_name: s!("A"),
            body: s!("b"),
            rating: star,
            thumbs_up: None,
            app_version: s!(),
            timestamp_utc: Utc.timestamp_opt(at_secs, 0).unwrap(),
            country: s!("United States"),
            language: s!("English"),
            reply_body: s!(),
            replied_at_utc: None,
        }
    }

    #[test]
    fn dedup_is_idempotent() {
        let mut t = ReviewTable::new(vec![
            rec("a", Some(5), 30),
            rec("b", Some(4), 20),
            rec("a", Some(5), 30),
        ]);
        t.sort_newest_first();
        t.dedup();
        let once = t.clone();
        t.dedup();
        assert_eq!(t, once);
        assert_eq!(t.len(), 2);
    }

    #[test]
    fn sort_is_newest_first() {
        let mut t = ReviewTable::new(vec![rec("a", None, 10), rec("b", None, 30), rec("c", None, 20)]);
        t.sort_newest_first();
        let ids: Vec<&str> = t.records().iter().map(|r| r.review_id.as_str()).collect();
        assert_eq!(ids, ["b", "c", "a"]);
    }

    #[test]
    fn star_counts_ignore_unrated() {
        let t = ReviewTable::new(vec![
            rec("a", Some(5), 1),
            rec("b", Some(5), 2),
            rec("c", Some(1), 3),
            rec("d", None, 4),
        ]);
        assert_eq!(t.star_counts(), [1, 0, 0, 0, 2]);
    }

    #[test]
    fn rating_bands() {
        assert_eq!(RatingBand::of(Some(1)), RatingBand::Low);
        assert_eq!(RatingBand::of(Some(2)), RatingBand::Low);
        assert_eq!(RatingBand::of(Some(3)), RatingBand::Mid);
        assert_eq!(RatingBand::of(Some(4)), RatingBand::Mid);
        assert_eq!(RatingBand::of(Some(5)), RatingBand::High);
        assert_eq!(RatingBand::of(None), RatingBand::Unrated);
    }
}
