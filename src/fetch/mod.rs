// src/fetch/mod.rs
mod collect;
mod pager;

pub use collect::{collect_all, store_for, Collection, Outcome, Store, StorefrontOutcome};
pub use pager::{fetch_page_window, Cursor, PageSource, RawPage};
