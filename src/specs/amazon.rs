// src/specs/amazon.rs
//! Amazon Appstore reviews, best-effort, scraped from the product-reviews
//! page of the country's marketplace. Pagination is a 1-based `pageNumber`
//! with a fixed ceiling; storefronts without a marketplace are skipped
//! outright. Amazon answers scrapers with a robot check often enough that
//! the blocked case is part of the contract (`FetchError::Blocked`), not an
//! exceptional path.
//!
//! Review dates are locale-formatted text; only the English pattern
//! ("January 3, 2024") is parsed, and records whose date does not parse are
//! dropped since they cannot be windowed.

use chrono::{NaiveDate, NaiveTime};
use scraper::{ElementRef, Html, Selector};
use ureq::Agent;

use crate::catalog::Storefront;
use crate::config::consts::SCRAPE_PAGE_CAP;
use crate::core::http;
use crate::core::sanitize::clean_text;
use crate::error::FetchError;
use crate::fetch::{Cursor, PageSource, RawPage, Store};
use crate::record::{RawReview, StoreKind};

/// Country code → marketplace host. Storefronts missing here have no Amazon
/// presence and contribute nothing.
const MARKETPLACES: &[(&str, &str)] = &[
    ("us", "www.amazon.com"),
    ("ca", "www.amazon.ca"),
    ("mx", "www.amazon.com.mx"),
    ("gb", "www.amazon.co.uk"),
    ("ie", "www.amazon.co.uk"),
    ("fr", "www.amazon.fr"),
    ("de", "www.amazon.de"),
    ("at", "www.amazon.de"),
    ("ch", "www.amazon.de"),
    ("it", "www.amazon.it"),
    ("es", "www.amazon.es"),
    ("pt", "www.amazon.es"),
    ("nl", "www.amazon.nl"),
    ("be", "www.amazon.com.be"),
    ("se", "www.amazon.se"),
    ("pl", "www.amazon.pl"),
    ("jp", "www.amazon.co.jp"),
    ("in", "www.amazon.in"),
    ("sg", "www.amazon.sg"),
    ("au", "www.amazon.com.au"),
    ("br", "www.amazon.com.br"),
    ("tr", "www.amazon.com.tr"),
    ("ae", "www.amazon.ae"),
    ("sa", "www.amazon.sa"),
    ("eg", "www.amazon.eg"),
];

fn marketplace(country_code: &str) -> Option<&'static str> {
    MARKETPLACES
        .iter()
        .find(|(cc, _)| country_code.eq_ignore_ascii_case(cc))
        .map(|(_, host)| *host)
}

pub struct AmazonStore {
    agent: Agent,
}

impl AmazonStore {
    pub fn new(agent: Agent) -> Self {
        Self { agent }
    }
}

impl Store for AmazonStore {
    fn kind(&self) -> StoreKind {
        StoreKind::Amazon
    }

    fn page_source(&self, app_id: &str, sf: &Storefront) -> Option<Box<dyn PageSource>> {
        let host = marketplace(sf.country_code)?;
        Some(Box::new(AmazonSource {
            agent: self.agent.clone(),
            asin: s!(app_id),
            host,
        }))
    }
}

struct AmazonSource {
    agent: Agent,
    asin: String,
    host: &'static str,
}

impl PageSource for AmazonSource {
    fn first_cursor(&self) -> Cursor {
        Cursor::Page(1)
    }

    fn fetch_page(&self, cursor: &Cursor) -> Result<RawPage, FetchError> {
        let page = match cursor {
            Cursor::Page(n) => *n,
            _ => 1,
        };
        let url = format!(
            "https://{}/product-reviews/{}/?sortBy=recent&pageNumber={page}",
            self.host, self.asin
        );
        let html = http::get_string(&self.agent, &url)?;
        if is_blocked(&html) {
            return Err(FetchError::Blocked);
        }
        let records = parse_review_page(&html)?;
        let next = (!records.is_empty() && page < SCRAPE_PAGE_CAP).then(|| Cursor::Page(page + 1));
        Ok(RawPage { records, next })
    }
}

pub(crate) fn is_blocked(html: &str) -> bool {
    html.contains("/errors/validateCaptcha")
        || html.contains("Enter the characters you see below")
        || html.contains("api-services-support@amazon.com")
}

fn sel(s: &'static str) -> Result<Selector, FetchError> {
    Selector::parse(s).map_err(|_| FetchError::Parse(format!("bad selector: {s}")))
}

pub(crate) fn parse_review_page(html: &str) -> Result<Vec<RawReview>, FetchError> {
    let doc = Html::parse_document(html);
    let review_sel = sel(r#"div[data-hook="review"]"#)?;
    let author_sel = sel("span.a-profile-name")?;
    let title_sel = sel(r#"a[data-hook="review-title"] span"#)?;
    let body_sel = sel(r#"span[data-hook="review-body"]"#)?;
    let star_sel = sel("i.a-icon-star span.a-icon-alt")?;
    let date_sel = sel(r#"span[data-hook="review-date"]"#)?;

    let mut out = Vec::new();
    for review in doc.select(&review_sel) {
        let Some(at) = first_text(&review, &date_sel).and_then(|t| parse_review_date(&t)) else {
            logd!("amazon review without a parseable date, skipped");
            continue;
        };

        let mut rec = RawReview::at(at);
        rec.review_id = review.value().attr("id").map(|id| s!(id));
        rec.author = first_text(&review, &author_sel);
        // the title anchor nests the star caption first; the headline is last
        rec.title = review
            .select(&title_sel)
            .filter_map(|el| non_empty(el))
            .last();
        rec.body = first_text(&review, &body_sel);
        rec.rating = first_text(&review, &star_sel).and_then(|t| parse_star_text(&t));
        out.push(rec);
    }
    Ok(out)
}

fn non_empty(el: ElementRef) -> Option<String> {
    let text = clean_text(&el.text().collect::<String>());
    (!text.is_empty()).then_some(text)
}

fn first_text(review: &ElementRef, selector: &Selector) -> Option<String> {
    review.select(selector).find_map(non_empty)
}

/// "4.0 out of 5 stars" (or "4,0" on continental marketplaces).
pub(crate) fn parse_star_text(text: &str) -> Option<u8> {
    let first = text.split_whitespace().next()?;
    let value: f32 = first.replace(',', ".").parse().ok()?;
    let rounded = value.round();
    (0.0..=5.0).contains(&rounded).then(|| rounded as u8)
}

/// "Reviewed in the United States on January 3, 2024"; the date follows the
/// last " on ".
pub(crate) fn parse_review_date(text: &str) -> Option<chrono::DateTime<chrono::Utc>> {
    let date_part = text.rsplit(" on ").next()?.trim();
    NaiveDate::parse_from_str(date_part, "%B %d, %Y")
        .ok()
        .map(|d| d.and_time(NaiveTime::MIN).and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r##"<html><body>
      <div id="R1AAA" data-hook="review">
        <span class="a-profile-name">Kay</span>
        <i data-hook="review-star-rating" class="a-icon a-icon-star a-star-4">
          <span class="a-icon-alt">4.0 out of 5 stars</span>
        </i>
        <a data-hook="review-title" href="#"><span>4.0 out of 5 stars</span><span>Kids favourite</span></a>
        <span data-hook="review-date">Reviewed in the United States on January 3, 2024</span>
        <span data-hook="review-body"><span>Plays  well &amp; loads fast</span></span>
      </div>
      <div id="R2BBB" data-hook="review">
        <span class="a-profile-name">Jo</span>
        <span data-hook="review-date">Reviewed in Germany on 3. Januar 2024</span>
        <span data-hook="review-body"><span>Unparseable date</span></span>
      </div>
    </body></html>"##;

    #[test]
    fn parses_review_cards() {
        let recs = parse_review_page(PAGE).unwrap();
        // the German-dated card cannot be windowed and is dropped
        assert_eq!(recs.len(), 1);
        let r = &recs[0];
        assert_eq!(r.review_id.as_deref(), Some("R1AAA"));
        assert_eq!(r.author.as_deref(), Some("Kay"));
        assert_eq!(r.title.as_deref(), Some("Kids favourite"));
        assert_eq!(r.body.as_deref(), Some("Plays well & loads fast"));
        assert_eq!(r.rating, Some(4));
        assert_eq!(r.at.to_rfc3339(), "2024-01-03T00:00:00+00:00");
    }

    #[test]
    fn star_text_variants() {
        assert_eq!(parse_star_text("4.0 out of 5 stars"), Some(4));
        assert_eq!(parse_star_text("4,5 von 5 Sternen"), Some(5));
        assert_eq!(parse_star_text("stars"), None);
    }

    #[test]
    fn captcha_page_is_blocked() {
        assert!(is_blocked(r#"<form action="/errors/validateCaptcha">"#));
        assert!(is_blocked("Enter the characters you see below"));
        assert!(!is_blocked("<html>regular page</html>"));
    }

    #[test]
    fn storefronts_without_marketplace_are_unmapped() {
        assert_eq!(marketplace("us"), Some("www.amazon.com"));
        assert_eq!(marketplace("ke"), None);
    }
}
