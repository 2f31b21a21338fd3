// src/fetch/pager.rs
// Walks one storefront's paged review feed until the time window is left
// behind, the feed runs dry, or the page ceiling is hit.

use crate::error::FetchError;
use crate::record::{FetchWindow, RawReview};

/// Position in a paged feed. Sources differ only in which primitive they use.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Cursor {
    /// First request of a token-paged feed (no token yet).
    Start,
    /// Opaque continuation token from the previous page.
    Token(String),
    /// 1-based page number.
    Page(u32),
}

/// One page of raw records plus the cursor for the page after it, if any.
pub struct RawPage {
    pub records: Vec<RawReview>,
    pub next: Option<Cursor>,
}

/// One storefront's paged feed: returns zero or more raw records, or fails.
/// Implementations live in `specs::*`; tests substitute fakes.
pub trait PageSource {
    fn first_cursor(&self) -> Cursor;
    fn fetch_page(&self, cursor: &Cursor) -> Result<RawPage, FetchError>;
}

/// Accumulate every in-window record reachable from the head of the feed.
///
/// Pages are assumed newest-first: once a record falls before `window.start`
/// no later page can hold in-window records, so paging stops. Records after
/// `window.end` are skipped without stopping since in-window ones may follow
/// on the same page. `max_pages` guarantees termination even for sources that
/// never signal exhaustion.
///
/// A failure on the first page is the storefront's failure. A failure after
/// at least one good page degrades to "stop with what we have"; partial
/// results beat discarding pages already fetched.
pub fn fetch_page_window(
    source: &dyn PageSource,
    window: &FetchWindow,
    max_pages: u32,
) -> Result<Vec<RawReview>, FetchError> {
    let mut out = Vec::new();
    let mut cursor = source.first_cursor();
    let mut pages = 0u32;

    while pages < max_pages {
        let page = match source.fetch_page(&cursor) {
            Ok(p) => p,
            Err(e) if pages == 0 => return Err(e),
            Err(e) => {
                loge!("page {} failed mid-pagination: {e}", pages + 1);
                break;
            }
        };
        pages += 1;

        if page.records.is_empty() {
            break;
        }

        let mut boundary = false;
        for rec in page.records {
            if rec.at < window.start_utc {
                boundary = true;
                continue;
            }
            if rec.at > window.end_utc {
                continue;
            }
            out.push(rec);
        }

        if boundary {
            break;
        }
        match page.next {
            Some(next) => cursor = next,
            None => break,
        }
    }

    Ok(out)
}
