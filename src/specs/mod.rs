// src/specs/mod.rs
//! # Store "specs" module
//!
//! Per-store page-reading specifications. Each spec focuses on one remote
//! review feed and encodes *where the ground truth lives in the response*
//! and *how to extract it tolerantly*.
//!
//! ## What lives here
//! - The request shape for one page of one storefront's feed (endpoint,
//!   pagination primitive, parameters).
//! - Payload parsing: JSON traversal for the API-shaped stores (Google Play,
//!   Apple), selector-based markup scraping for the best-effort stores
//!   (Microsoft, Amazon).
//! - Light shaping of results into `RawReview` records; missing fields stay
//!   `None` rather than failing the page.
//!
//! ## What does **not** live here
//! - Window cutoffs and page-walk termination (`fetch::pager`).
//! - Cross-storefront merging, dedup, manifests (`fetch::collect`).
//! - Canonical-schema mapping and display names (`normalize`).
//!
//! Each spec implements `fetch::PageSource` per storefront plus a
//! `fetch::Store` factory, so the collector never needs to know which
//! pagination primitive a store uses.
//!
//! Payload parsers are testable offline against captured fixtures; only
//! `fetch_page` touches the network.

pub mod amazon;
pub mod app_store;
pub mod google_play;
pub mod microsoft;
