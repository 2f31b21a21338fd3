// src/record.rs
// Canonical data shapes shared by the fetch/merge pipeline.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};
use serde::Serialize;

/// Which remote review feed a fetch targets.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StoreKind {
    GooglePlay,
    AppleAppStore,
    MicrosoftStore,
    Amazon,
}

impl StoreKind {
    pub fn label(&self) -> &'static str {
        match self {
            StoreKind::GooglePlay => "Google Play",
            StoreKind::AppleAppStore => "Apple App Store",
            StoreKind::MicrosoftStore => "Microsoft Store",
            StoreKind::Amazon => "Amazon",
        }
    }

    /// CLI-facing short names.
    pub fn parse(s: &str) -> Option<StoreKind> {
        match s.to_ascii_lowercase().as_str() {
            "play" | "google" | "google-play" => Some(StoreKind::GooglePlay),
            "apple" | "appstore" | "app-store" => Some(StoreKind::AppleAppStore),
            "microsoft" | "ms" => Some(StoreKind::MicrosoftStore),
            "amazon" => Some(StoreKind::Amazon),
            _ => None,
        }
    }
}

/// One review exactly as a store spec emitted it, before normalization.
/// Everything except the timestamp is best-effort: absent fields stay `None`
/// and must never fail a fetch.
#[derive(Clone, Debug, PartialEq)]
pub struct RawReview {
    pub review_id: Option<String>,
    pub author: Option<String>,
    pub title: Option<String>,
    pub body: Option<String>,
    pub rating: Option<u8>,
    pub thumbs_up: Option<u32>,
    pub app_version: Option<String>,
    pub at: DateTime<Utc>,
    pub reply_body: Option<String>,
    pub replied_at: Option<DateTime<Utc>>,
}

impl RawReview {
    /// A record with only the timestamp set; specs fill in what the source has.
    pub fn at(at: DateTime<Utc>) -> Self {
        Self {
            review_id: None,
            author: None,
            title: None,
            body: None,
            rating: None,
            thumbs_up: None,
            app_version: None,
            at,
            reply_body: None,
            replied_at: None,
        }
    }
}

/// One review in the canonical post-normalization schema.
///
/// `review_id` is the store's own id where the source supplies a stable one,
/// otherwise a key derived from author + timestamp + body (see `derived_key`).
/// After deduplication it is unique within a merged table.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct ReviewRecord {
    pub review_id: String,
    pub author_name: String,
    pub body: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbs_up: Option<u32>,
    pub app_version: String,
    pub timestamp_utc: DateTime<Utc>,
    pub country: String,
    pub language: String,
    pub reply_body: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub replied_at_utc: Option<DateTime<Utc>>,
}

/// Dedup key for sources without a stable review id.
/// Two genuinely distinct reviews with identical author, second-resolution
/// timestamp and body text would collide; accepted as negligible.
pub fn derived_key(author: &str, at: DateTime<Utc>, body: &str) -> String {
    let mut h = DefaultHasher::new();
    author.hash(&mut h);
    at.timestamp_millis().hash(&mut h);
    body.hash(&mut h);
    format!("d{:016x}", h.finish())
}

/// Inclusive UTC time range bounding which reviews are retained.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FetchWindow {
    pub start_utc: DateTime<Utc>,
    pub end_utc: DateTime<Utc>,
}

impl FetchWindow {
    /// From an inclusive calendar-date range: midnight of the first day up to
    /// the last instant of the last day.
    pub fn from_dates(first: NaiveDate, last: NaiveDate) -> Self {
        let start_utc = first.and_time(NaiveTime::MIN).and_utc();
        let end_utc = match last.succ_opt() {
            Some(next) => next.and_time(NaiveTime::MIN).and_utc() - Duration::nanoseconds(1),
            None => DateTime::<Utc>::MAX_UTC,
        };
        Self { start_utc, end_utc }
    }

    /// Last `days` days ending now.
    pub fn last_days(days: u32) -> Self {
        let end_utc = Utc::now();
        Self {
            start_utc: end_utc - Duration::days(i64::from(days)),
            end_utc,
        }
    }

    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        at >= self.start_utc && at <= self.end_utc
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn window_is_inclusive_on_both_ends() {
        let w = FetchWindow::from_dates(date(2025, 3, 1), date(2025, 3, 7));
        assert!(w.contains(w.start_utc));
        assert!(w.contains(w.end_utc));
        assert!(!w.contains(w.start_utc - Duration::nanoseconds(1)));
        assert!(!w.contains(w.end_utc + Duration::nanoseconds(1)));
    }

    #[test]
    fn window_end_covers_the_whole_last_day() {
        let w = FetchWindow::from_dates(date(2025, 3, 1), date(2025, 3, 1));
        let late = date(2025, 3, 1).and_hms_opt(23, 59, 59).unwrap().and_utc();
        assert!(w.contains(late));
        let next_day = date(2025, 3, 2).and_time(NaiveTime::MIN).and_utc();
        assert!(!w.contains(next_day));
    }

    #[test]
    fn derived_key_is_stable_and_field_sensitive() {
        let at = date(2025, 1, 1).and_time(NaiveTime::MIN).and_utc();
        let a = derived_key("Ana", at, "great app");
        assert_eq!(a, derived_key("Ana", at, "great app"));
        assert_ne!(a, derived_key("Ana", at, "bad app"));
        assert_ne!(a, derived_key("Bob", at, "great app"));
        assert_ne!(a, derived_key("Ana", at + Duration::seconds(1), "great app"));
    }

    #[test]
    fn store_kind_parses_cli_names() {
        assert_eq!(StoreKind::parse("play"), Some(StoreKind::GooglePlay));
        assert_eq!(StoreKind::parse("Apple"), Some(StoreKind::AppleAppStore));
        assert_eq!(StoreKind::parse("ms"), Some(StoreKind::MicrosoftStore));
        assert_eq!(StoreKind::parse("amazon"), Some(StoreKind::Amazon));
        assert_eq!(StoreKind::parse("steam"), None);
    }
}
