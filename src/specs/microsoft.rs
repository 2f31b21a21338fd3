// src/specs/microsoft.rs
//! Microsoft Store reviews, best-effort. The store has no public review API;
//! the product detail page embeds a `schema.org` JSON-LD block whose `review`
//! array carries the most recent reviews. One page only: there is no
//! pagination cursor to follow, so the feed is exhausted after the first
//! request. Brittle by nature; a markup change empties the result rather
//! than failing the run.

use chrono::{NaiveDate, NaiveTime};
use scraper::{Html, Selector};
use serde_json::Value;
use ureq::Agent;

use crate::catalog::Storefront;
use crate::config::consts::MS_STORE_HOST;
use crate::core::http;
use crate::core::sanitize::clean_text;
use crate::error::FetchError;
use crate::fetch::{Cursor, PageSource, RawPage, Store};
use crate::record::{RawReview, StoreKind};

pub struct MicrosoftStore {
    agent: Agent,
}

impl MicrosoftStore {
    pub fn new(agent: Agent) -> Self {
        Self { agent }
    }
}

impl Store for MicrosoftStore {
    fn kind(&self) -> StoreKind {
        StoreKind::MicrosoftStore
    }

    fn page_source(&self, app_id: &str, sf: &Storefront) -> Option<Box<dyn PageSource>> {
        Some(Box::new(MicrosoftSource {
            agent: self.agent.clone(),
            product_id: s!(app_id),
            lang: sf.language_code,
            country: sf.country_code,
        }))
    }
}

struct MicrosoftSource {
    agent: Agent,
    product_id: String,
    lang: &'static str,
    country: &'static str,
}

impl PageSource for MicrosoftSource {
    fn first_cursor(&self) -> Cursor {
        Cursor::Page(1)
    }

    fn fetch_page(&self, _cursor: &Cursor) -> Result<RawPage, FetchError> {
        let url = format!(
            "{MS_STORE_HOST}/detail/{}?hl={}-{}&gl={}",
            self.product_id,
            self.lang,
            self.country,
            self.country.to_ascii_uppercase()
        );
        let html = http::get_string(&self.agent, &url)?;
        let records = parse_detail_page(&html)?;
        Ok(RawPage { records, next: None })
    }
}

fn sel(s: &'static str) -> Result<Selector, FetchError> {
    Selector::parse(s).map_err(|_| FetchError::Parse(format!("bad selector: {s}")))
}

/// Scan every JSON-LD block on the page for a `review` array.
pub(crate) fn parse_detail_page(html: &str) -> Result<Vec<RawReview>, FetchError> {
    let doc = Html::parse_document(html);
    let scripts = sel(r#"script[type="application/ld+json"]"#)?;

    let mut out = Vec::new();
    for script in doc.select(&scripts) {
        let Ok(data) = serde_json::from_str::<Value>(&script.inner_html()) else {
            continue;
        };
        if let Some(reviews) = data.get("review").and_then(Value::as_array) {
            out.extend(reviews.iter().filter_map(parse_review));
        }
    }
    Ok(out)
}

fn parse_review(r: &Value) -> Option<RawReview> {
    // datePublished is a bare date; midnight UTC by convention.
    let date = r.get("datePublished").and_then(Value::as_str)?;
    let at = NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .ok()?
        .and_time(NaiveTime::MIN)
        .and_utc();

    let mut rec = RawReview::at(at);
    rec.author = author_name(r);
    rec.title = r
        .get("name")
        .and_then(Value::as_str)
        .map(clean_text)
        .filter(|s| !s.is_empty());
    rec.body = r
        .get("reviewBody")
        .and_then(Value::as_str)
        .map(clean_text)
        .filter(|s| !s.is_empty());
    rec.rating = rating_value(r);
    Some(rec)
}

/// `author` appears both as `{"name": ...}` and as a bare string in the wild.
fn author_name(r: &Value) -> Option<String> {
    match r.get("author")? {
        Value::String(s) => Some(clean_text(s)),
        obj => obj
            .get("name")
            .and_then(Value::as_str)
            .map(clean_text),
    }
}

/// `reviewRating.ratingValue` is a number or a numeric string.
fn rating_value(r: &Value) -> Option<u8> {
    let v = r.get("reviewRating")?.get("ratingValue")?;
    let f = match v {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    let rounded = f.round();
    (rounded.is_finite() && (0.0..=255.0).contains(&rounded)).then(|| rounded as u8)
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"<!doctype html><html><head>
      <script type="application/ld+json">
      {"@type":"SoftwareApplication","name":"Example",
       "review":[
         {"author":{"name":"Pat"},"datePublished":"2024-03-05",
          "reviewBody":"Solid &amp; fast","name":"Good",
          "reviewRating":{"ratingValue":4}},
         {"author":"Lee","datePublished":"2024-03-01",
          "reviewBody":"Crashes on start",
          "reviewRating":{"ratingValue":"1"}}
       ]}
      </script>
      <script type="application/ld+json">{"@type":"BreadcrumbList"}</script>
      </head><body></body></html>"#;

    #[test]
    fn extracts_reviews_from_json_ld() {
        let recs = parse_detail_page(PAGE).unwrap();
        assert_eq!(recs.len(), 2);

        assert_eq!(recs[0].author.as_deref(), Some("Pat"));
        assert_eq!(recs[0].title.as_deref(), Some("Good"));
        assert_eq!(recs[0].body.as_deref(), Some("Solid & fast"));
        assert_eq!(recs[0].rating, Some(4));
        assert_eq!(recs[0].at.to_rfc3339(), "2024-03-05T00:00:00+00:00");

        // bare-string author and string rating
        assert_eq!(recs[1].author.as_deref(), Some("Lee"));
        assert_eq!(recs[1].rating, Some(1));
    }

    #[test]
    fn page_without_reviews_is_empty_not_an_error() {
        let recs = parse_detail_page("<html><body>nothing here</body></html>").unwrap();
        assert!(recs.is_empty());
    }

    #[test]
    fn review_without_date_is_dropped() {
        let page = r#"<script type="application/ld+json">
          {"review":[{"author":"X","reviewBody":"no date"}]}
        </script>"#;
        assert!(parse_detail_page(page).unwrap().is_empty());
    }
}
