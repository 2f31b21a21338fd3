// src/fetch/collect.rs
// Drives the pager once per storefront, in catalog order, and merges the
// results into one deduplicated table. One unreachable region never aborts
// the run; every storefront ends up with an explicit outcome in the manifest.

use ureq::Agent;

use crate::catalog::{Storefront, ALL_STOREFRONTS};
use crate::error::FetchError;
use crate::normalize::normalize;
use crate::progress::Progress;
use crate::record::{FetchWindow, ReviewRecord, StoreKind};
use crate::specs;
use crate::table::ReviewTable;

use super::pager::{fetch_page_window, PageSource};

/// One store kind's ability to open a paged feed per storefront.
pub trait Store {
    fn kind(&self) -> StoreKind;

    /// `None` when the store has no presence for this storefront (e.g. no
    /// Amazon marketplace for that country); the collector records `Skipped`.
    fn page_source(&self, app_id: &str, sf: &Storefront) -> Option<Box<dyn PageSource>>;
}

/// Build the live store implementation for a kind.
pub fn store_for(kind: StoreKind, agent: Agent) -> Box<dyn Store> {
    match kind {
        StoreKind::GooglePlay => Box::new(specs::google_play::GooglePlayStore::new(agent)),
        StoreKind::AppleAppStore => Box::new(specs::app_store::AppStoreStore::new(agent)),
        StoreKind::MicrosoftStore => Box::new(specs::microsoft::MicrosoftStore::new(agent)),
        StoreKind::Amazon => Box::new(specs::amazon::AmazonStore::new(agent)),
    }
}

/// What one storefront contributed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    Fetched(usize),
    Empty,
    /// Store has no feed for this region; nothing was requested.
    Skipped,
    /// The source answered with a robot check; a notice row was emitted.
    Blocked,
    Failed(String),
}

#[derive(Clone, Debug)]
pub struct StorefrontOutcome {
    pub storefront: Storefront,
    pub outcome: Outcome,
}

/// A merged run: the deduplicated table plus the per-storefront manifest.
pub struct Collection {
    pub table: ReviewTable,
    pub manifest: Vec<StorefrontOutcome>,
}

impl Collection {
    pub fn failed_count(&self) -> usize {
        self.manifest
            .iter()
            .filter(|o| matches!(o.outcome, Outcome::Failed(_) | Outcome::Blocked))
            .count()
    }
}

/// Fetch, merge and deduplicate across every storefront in the catalog.
///
/// Sequential by design: one storefront at a time, one page in flight.
/// Stateless and idempotent given the same inputs; the returned table is
/// owned by the caller for the rest of the session.
pub fn collect_all(
    store: &dyn Store,
    app_id: &str,
    window: &FetchWindow,
    max_pages: u32,
    mut progress: Option<&mut dyn Progress>,
) -> Collection {
    let total = ALL_STOREFRONTS.len();
    let mut rows: Vec<ReviewRecord> = Vec::new();
    let mut manifest: Vec<StorefrontOutcome> = Vec::with_capacity(total);

    if let Some(p) = progress.as_deref_mut() {
        p.begin(total);
    }

    for (i, sf) in ALL_STOREFRONTS.iter().enumerate() {
        if let Some(p) = progress.as_deref_mut() {
            p.log(&format!(
                "Collecting: {} ({}) {}/{}",
                sf.country_name,
                sf.country_code,
                i + 1,
                total
            ));
        }

        let outcome = match store.page_source(app_id, sf) {
            None => Outcome::Skipped,
            Some(source) => match fetch_page_window(source.as_ref(), window, max_pages) {
                Ok(batch) if batch.is_empty() => Outcome::Empty,
                Ok(batch) => {
                    let n = batch.len();
                    rows.extend(normalize(batch, store.kind(), sf));
                    Outcome::Fetched(n)
                }
                Err(FetchError::Blocked) => {
                    loge!("{} {}: blocked by robot check", store.kind().label(), sf.country_code);
                    rows.push(blocked_notice(store.kind(), sf, window));
                    Outcome::Blocked
                }
                Err(e) => {
                    loge!("{} {}: {e}", store.kind().label(), sf.country_code);
                    Outcome::Failed(e.to_string())
                }
            },
        };

        if let Some(p) = progress.as_deref_mut() {
            match outcome {
                Outcome::Failed(_) | Outcome::Blocked => p.item_failed(i, sf.country_name),
                _ => p.item_done(i, sf.country_name),
            }
        }
        manifest.push(StorefrontOutcome { storefront: *sf, outcome });
    }

    if let Some(p) = progress.as_deref_mut() {
        p.finish();
    }

    let mut table = ReviewTable::new(rows);
    table.sort_newest_first();
    table.dedup();

    Collection { table, manifest }
}

/// A known, common, non-recoverable block is reported as data: one synthetic
/// review-shaped row explaining itself, so the caller's happy path needs no
/// error handling for it.
fn blocked_notice(kind: StoreKind, sf: &Storefront, window: &FetchWindow) -> ReviewRecord {
    ReviewRecord {
        review_id: format!("blocked:{}:{}", kind.label(), sf.country_code),
        author_name: s!(),
        body: format!(
            "{} answered with a robot check for this storefront; reviews could not be fetched.",
            kind.label()
        ),
        rating: None,
        thumbs_up: None,
        app_version: s!(),
        timestamp_utc: window.end_utc,
        country: s!(sf.country_name),
        language: crate::catalog::language_name(sf.language_code),
        reply_body: s!(),
        replied_at_utc: None,
    }
}
