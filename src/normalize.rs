// src/normalize.rs
// Maps store-specific raw records into the canonical schema. Absent text
// fields become empty strings, absent ratings stay absent; nothing here can
// fail a fetch.

use crate::catalog::{language_name, Storefront};
use crate::record::{derived_key, RawReview, ReviewRecord, StoreKind};

/// Normalize one storefront's batch. The storefront supplies the country and
/// language display names; the store kind decides how titles fold into the
/// body text.
pub fn normalize(raw: Vec<RawReview>, kind: StoreKind, sf: &Storefront) -> Vec<ReviewRecord> {
    raw.into_iter().map(|r| normalize_one(r, kind, sf)).collect()
}

fn normalize_one(r: RawReview, kind: StoreKind, sf: &Storefront) -> ReviewRecord {
    let author_name = r.author.unwrap_or_default();
    let body = fold_title(kind, r.title, r.body);
    let rating = r.rating.filter(|v| (1..=5).contains(v));

    let review_id = match r.review_id.filter(|id| !id.is_empty()) {
        Some(id) => id,
        None => derived_key(&author_name, r.at, &body),
    };

    ReviewRecord {
        review_id,
        author_name,
        body,
        rating,
        thumbs_up: r.thumbs_up,
        app_version: r.app_version.unwrap_or_default(),
        timestamp_utc: r.at,
        country: s!(sf.country_name),
        language: language_name(sf.language_code),
        reply_body: r.reply_body.unwrap_or_default(),
        replied_at_utc: r.replied_at,
    }
}

/// Title-bearing sources (Apple, Amazon, Microsoft) publish a headline plus a
/// body; the canonical body is their concatenation. Google Play has no
/// separate title field.
fn fold_title(kind: StoreKind, title: Option<String>, body: Option<String>) -> String {
    let title = title.unwrap_or_default();
    let body = body.unwrap_or_default();
    match kind {
        StoreKind::AppleAppStore | StoreKind::Amazon | StoreKind::MicrosoftStore => {
            if title.is_empty() {
                body
            } else if body.is_empty() {
                title
            } else {
                join!(title, ": ", &body)
            }
        }
        StoreKind::GooglePlay => {
            if body.is_empty() { title } else { body }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn sf() -> &'static Storefront {
        crate::catalog::find("de").unwrap()
    }

    fn raw(at_secs: i64) -> RawReview {
        RawReview::at(Utc.timestamp_opt(at_secs, 0).unwrap())
    }

    #[test]
    fn missing_fields_become_empty_or_absent() {
        let rec = normalize(vec![raw(1_700_000_000)], StoreKind::GooglePlay, sf())
            .pop()
            .unwrap();
        assert_eq!(rec.author_name, "");
        assert_eq!(rec.body, "");
        assert_eq!(rec.rating, None);
        assert_eq!(rec.app_version, "");
        assert_eq!(rec.country, "Germany");
        assert_eq!(rec.language, "German");
        assert!(rec.review_id.starts_with('d'));
    }

    #[test]
    fn out_of_range_rating_is_dropped() {
        let mut r = raw(1_700_000_000);
        r.rating = Some(9);
        let rec = normalize(vec![r], StoreKind::GooglePlay, sf()).pop().unwrap();
        assert_eq!(rec.rating, None);
    }

    #[test]
    fn apple_title_folds_into_body() {
        let mut r = raw(1_700_000_000);
        r.title = Some(s!("Great"));
        r.body = Some(s!("My kid loves it"));
        let rec = normalize(vec![r], StoreKind::AppleAppStore, sf()).pop().unwrap();
        assert_eq!(rec.body, "Great: My kid loves it");
    }

    #[test]
    fn supplied_review_id_wins_over_derived() {
        let mut r = raw(1_700_000_000);
        r.review_id = Some(s!("gp:abc123"));
        let rec = normalize(vec![r], StoreKind::GooglePlay, sf()).pop().unwrap();
        assert_eq!(rec.review_id, "gp:abc123");
    }
}
