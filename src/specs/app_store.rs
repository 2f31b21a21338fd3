// src/specs/app_store.rs
//! Apple App Store reviews via the iTunes customer-reviews RSS feed (JSON
//! rendering). Pagination is a 1-based page number; the feed serves at most
//! `APP_STORE_PAGE_CAP` pages per storefront. Entries carry a title and a
//! body, and ratings are always present.

use chrono::{DateTime, Utc};
use serde_json::Value;
use ureq::Agent;

use crate::catalog::Storefront;
use crate::config::consts::{APP_STORE_PAGE_CAP, ITUNES_RSS_HOST};
use crate::core::http;
use crate::error::FetchError;
use crate::fetch::{Cursor, PageSource, RawPage, Store};
use crate::record::{RawReview, StoreKind};

pub struct AppStoreStore {
    agent: Agent,
}

impl AppStoreStore {
    pub fn new(agent: Agent) -> Self {
        Self { agent }
    }
}

impl Store for AppStoreStore {
    fn kind(&self) -> StoreKind {
        StoreKind::AppleAppStore
    }

    fn page_source(&self, app_id: &str, sf: &Storefront) -> Option<Box<dyn PageSource>> {
        Some(Box::new(AppStoreSource {
            agent: self.agent.clone(),
            app_id: s!(app_id),
            country: sf.country_code,
        }))
    }
}

struct AppStoreSource {
    agent: Agent,
    app_id: String,
    country: &'static str,
}

impl PageSource for AppStoreSource {
    fn first_cursor(&self) -> Cursor {
        Cursor::Page(1)
    }

    fn fetch_page(&self, cursor: &Cursor) -> Result<RawPage, FetchError> {
        let page = match cursor {
            Cursor::Page(n) => *n,
            _ => 1,
        };
        let url = format!(
            "{ITUNES_RSS_HOST}/{}/rss/customerreviews/page={page}/id={}/sortby=mostrecent/json",
            self.country, self.app_id
        );
        let doc = http::get_json(&self.agent, &url)?;
        let records = parse_feed(&doc);
        let next = (!records.is_empty() && page < APP_STORE_PAGE_CAP).then(|| Cursor::Page(page + 1));
        Ok(RawPage { records, next })
    }
}

/// `feed.entry` is absent on an empty page, an object for a single entry, or
/// an array otherwise. The app's own metadata sometimes rides along as an
/// entry without a rating; those are skipped.
fn parse_feed(doc: &Value) -> Vec<RawReview> {
    let entry = doc.get("feed").and_then(|f| f.get("entry"));
    let entries: Vec<&Value> = match entry {
        Some(Value::Array(items)) => items.iter().collect(),
        Some(obj @ Value::Object(_)) => vec![obj],
        _ => Vec::new(),
    };
    entries.into_iter().filter_map(parse_entry).collect()
}

fn parse_entry(entry: &Value) -> Option<RawReview> {
    let rating: u8 = label(entry, &["im:rating"])?.parse().ok()?;
    let updated = label(entry, &["updated"])?;
    let at = DateTime::parse_from_rfc3339(&updated)
        .ok()?
        .with_timezone(&Utc);

    let mut rec = RawReview::at(at);
    rec.review_id = label(entry, &["id"]);
    rec.author = label(entry, &["author", "name"]);
    rec.rating = Some(rating);
    rec.title = label(entry, &["title"]);
    rec.body = label(entry, &["content"]);
    rec.app_version = label(entry, &["im:version"]);
    Some(rec)
}

/// Every leaf in the feed is wrapped as `{"label": ...}`.
fn label(v: &Value, path: &[&str]) -> Option<String> {
    let mut cur = v;
    for key in path {
        cur = cur.get(key)?;
    }
    cur.get("label").and_then(Value::as_str).map(|s| s!(s))
}
