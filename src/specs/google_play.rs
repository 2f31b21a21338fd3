// src/specs/google_play.rs
//! Google Play reviews via the `batchexecute` endpoint.
//!
//! One POST per page; pagination is an opaque continuation token. The
//! response wraps a JSON document inside a JSON string inside an array
//! envelope, behind an anti-JSON prefix line. Review fields sit at fixed
//! positions in a nested array (see `parse_review`).

use chrono::DateTime;
use serde_json::Value;
use ureq::Agent;

use crate::catalog::Storefront;
use crate::config::consts::{PLAY_BATCH_URL, PLAY_PAGE_SIZE};
use crate::core::http;
use crate::error::FetchError;
use crate::fetch::{Cursor, PageSource, RawPage, Store};
use crate::record::{RawReview, StoreKind};

pub struct GooglePlayStore {
    agent: Agent,
}

impl GooglePlayStore {
    pub fn new(agent: Agent) -> Self {
        Self { agent }
    }
}

impl Store for GooglePlayStore {
    fn kind(&self) -> StoreKind {
        StoreKind::GooglePlay
    }

    fn page_source(&self, app_id: &str, sf: &Storefront) -> Option<Box<dyn PageSource>> {
        Some(Box::new(GooglePlaySource {
            agent: self.agent.clone(),
            app_id: s!(app_id),
            lang: sf.language_code,
            country: sf.country_code,
        }))
    }
}

struct GooglePlaySource {
    agent: Agent,
    app_id: String,
    lang: &'static str,
    country: &'static str,
}

impl PageSource for GooglePlaySource {
    fn first_cursor(&self) -> Cursor {
        Cursor::Start
    }

    fn fetch_page(&self, cursor: &Cursor) -> Result<RawPage, FetchError> {
        let token = match cursor {
            Cursor::Token(t) => Some(t.as_str()),
            _ => None,
        };
        let url = format!("{PLAY_BATCH_URL}?hl={}&gl={}", self.lang, self.country);
        let body = request_body(&self.app_id, PLAY_PAGE_SIZE, token);
        let text = http::post_form(&self.agent, &url, &body)?;
        parse_page(&text)
    }
}

/// Build the form body. The inner payload is itself a JSON document carried
/// as a string inside the `f.req` envelope; sort mode 2 = newest first.
fn request_body(app_id: &str, count: usize, token: Option<&str>) -> String {
    let inner = match token {
        None => format!(r#"[null,null,[2,2,[{count},null,null],null,[]],["{app_id}",7]]"#),
        Some(t) => {
            let tok = Value::String(s!(t)).to_string(); // JSON-escaped, quoted
            format!(r#"[null,null,[2,2,[{count},null,{tok}],null,[]],["{app_id}",7]]"#)
        }
    };
    let freq = serde_json::json!([[["UsvDTd", inner, Value::Null, "generic"]]]);
    url::form_urlencoded::Serializer::new(String::new())
        .append_pair("f.req", &freq.to_string())
        .finish()
}

/// Peel the envelope: skip the `)]}'` prefix line, take the payload string at
/// `[0][2]`, parse it again, then read reviews at `[0]` and the continuation
/// token at `[1][1]`.
fn parse_page(text: &str) -> Result<RawPage, FetchError> {
    let json_part = match text.find('\n') {
        Some(i) => &text[i..],
        None => text,
    };
    let envelope: Value = serde_json::from_str(json_part.trim())?;

    let payload = envelope
        .get(0)
        .and_then(|v| v.get(2))
        .and_then(Value::as_str)
        .unwrap_or("null");
    let data: Value = serde_json::from_str(payload)?;

    let records = data
        .get(0)
        .and_then(Value::as_array)
        .map(|arr| arr.iter().filter_map(parse_review).collect())
        .unwrap_or_default();

    let next = data
        .get(1)
        .and_then(|v| v.get(1))
        .and_then(Value::as_str)
        .filter(|t| !t.is_empty())
        .map(|t| Cursor::Token(s!(t)));

    Ok(RawPage { records, next })
}

/// Fixed positions within one review entry. A record without a readable
/// timestamp cannot be windowed and is dropped.
fn parse_review(r: &Value) -> Option<RawReview> {
    let secs = r.get(5)?.get(0)?.as_i64()?;
    let at = DateTime::from_timestamp(secs, 0)?;

    let mut rec = RawReview::at(at);
    rec.review_id = text_at(r, &[0]);
    rec.author = text_at(r, &[1, 0]);
    rec.rating = r
        .get(2)
        .and_then(Value::as_u64)
        .and_then(|v| u8::try_from(v).ok());
    rec.body = text_at(r, &[4]);
    rec.thumbs_up = r
        .get(6)
        .and_then(Value::as_u64)
        .and_then(|v| u32::try_from(v).ok());
    rec.reply_body = text_at(r, &[7, 1]);
    rec.replied_at = r
        .get(7)
        .and_then(|v| v.get(2))
        .and_then(|v| v.get(0))
        .and_then(Value::as_i64)
        .and_then(|s| DateTime::from_timestamp(s, 0));
    rec.app_version = text_at(r, &[10]);
    Some(rec)
}

fn text_at(v: &Value, path: &[usize]) -> Option<String> {
    let mut cur = v;
    for &i in path {
        cur = cur.get(i)?;
    }
    cur.as_str().map(|s| s!(s))
}
