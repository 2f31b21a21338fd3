// src/config/options.rs
use std::path::{Path, PathBuf};

use chrono::NaiveDate;

use super::consts::{DEFAULT_OUT_STEM, MAX_PAGES};
use crate::record::{FetchWindow, StoreKind};

#[derive(Clone, Debug, PartialEq)]
pub struct AppOptions {
    pub fetch: FetchOptions,
    pub filter: FilterOptions,
    pub export: ExportOptions,
}

impl Default for AppOptions {
    fn default() -> Self {
        Self {
            fetch: FetchOptions::default(),
            filter: FilterOptions::default(),
            export: ExportOptions::default(),
        }
    }
}

/// Which feed to walk and how far.
#[derive(Clone, Debug, PartialEq)]
pub struct FetchOptions {
    pub store: StoreKind,
    /// Days back from now; ignored when an explicit date range is set.
    pub days: u32,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    pub max_pages: u32,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            store: StoreKind::GooglePlay,
            days: 7,
            from: None,
            to: None,
            max_pages: MAX_PAGES,
        }
    }
}

impl FetchOptions {
    pub fn window(&self) -> FetchWindow {
        match (self.from, self.to) {
            (Some(a), Some(b)) if a <= b => FetchWindow::from_dates(a, b),
            (Some(a), Some(b)) => FetchWindow::from_dates(b, a),
            _ => FetchWindow::last_days(self.days),
        }
    }
}

/// View filters; applied after fetch, never refetching.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FilterOptions {
    /// Accepted ratings; empty keeps everything.
    pub stars: Vec<u8>,
    /// Literal, case-insensitive substring over body and reply body.
    pub search: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Tsv,
    Json,
}

impl ExportFormat {
    pub fn ext(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Tsv => "tsv",
            ExportFormat::Json => "json",
        }
    }

    /// Cell separator for the delimited formats.
    pub fn delim(&self) -> Option<char> {
        match self {
            ExportFormat::Csv => Some(','),
            ExportFormat::Tsv => Some('\t'),
            ExportFormat::Json => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportOptions {
    pub format: ExportFormat,
    pub out: Option<PathBuf>,
    pub include_headers: bool,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            format: ExportFormat::Csv,
            out: None,
            include_headers: true,
        }
    }
}

impl ExportOptions {
    /// Resolve the output path: explicit file wins; an explicit directory or
    /// no path at all gets the default stem plus the format's extension.
    pub fn out_path(&self) -> PathBuf {
        let default_name = join!(DEFAULT_OUT_STEM, ".", self.format.ext());
        match &self.out {
            None => PathBuf::from(default_name),
            Some(p) if p.is_dir() || looks_like_dir_hint(p) => p.join(default_name),
            Some(p) => p.clone(),
        }
    }
}

fn looks_like_dir_hint(p: &Path) -> bool {
    let s = p.to_string_lossy();
    s.ends_with('/') || s.ends_with('\\')
}
