// src/config/consts.rs

// Net config
pub const USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) review_scrape/0.3";
pub const TIMEOUT_SECS: u64 = 15;

// Paging
pub const MAX_PAGES: u32 = 50; // hard ceiling per storefront
pub const PLAY_PAGE_SIZE: usize = 200; // reviews per batchexecute page
pub const APP_STORE_PAGE_CAP: u32 = 10; // the RSS feed serves at most 10 pages
pub const SCRAPE_PAGE_CAP: u32 = 10; // page-numbered HTML sources

// Store endpoints
pub const PLAY_BATCH_URL: &str = "https://play.google.com/_/PlayStoreUi/data/batchexecute";
pub const ITUNES_RSS_HOST: &str = "https://itunes.apple.com";
pub const MS_STORE_HOST: &str = "https://apps.microsoft.com";

// Export
pub const DEFAULT_OUT_STEM: &str = "reviews";
