// src/cli.rs
// Thin console frontend over the engine: argument parsing, a stderr progress
// sink, and the fetch → filter → export drive. The engine itself never
// prints; everything user-facing lives here.

use std::env;
use std::io::Write;
use std::path::PathBuf;

use chrono::NaiveDate;
use color_eyre::eyre::{bail, eyre, Result};

use crate::apps::{package_for, KNOWN_APPS};
use crate::catalog::ALL_STOREFRONTS;
use crate::config::options::{AppOptions, ExportFormat};
use crate::core::http;
use crate::export;
use crate::fetch::{self, Outcome};
use crate::filter;
use crate::ids;
use crate::progress::Progress;
use crate::record::StoreKind;

pub struct Params {
    pub opts: AppOptions,
    pub app: Option<String>,
    pub url: Option<String>,
    pub list_apps: bool,
    pub list_storefronts: bool,
    pub quiet: bool,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            opts: AppOptions::default(),
            app: None,
            url: None,
            list_apps: false,
            list_storefronts: false,
            quiet: false,
        }
    }
}

pub fn parse_cli() -> Result<Params> {
    let mut params = Params::default();

    let mut args = env::args().skip(1);
    while let Some(a) = args.next() {
        match a.as_str() {
            "--store" => {
                let v = args.next().ok_or_else(|| eyre!("Missing value for --store"))?;
                params.opts.fetch.store = StoreKind::parse(&v)
                    .ok_or_else(|| eyre!("Unknown store: {} (play|apple|microsoft|amazon)", v))?;
            }
            "-a" | "--app" => params.app = Some(args.next().ok_or_else(|| eyre!("Missing app name or identifier"))?),
            "-u" | "--url" => params.url = Some(args.next().ok_or_else(|| eyre!("Missing store URL"))?),
            "--days" => {
                let v = args.next().ok_or_else(|| eyre!("Missing value for --days"))?;
                params.opts.fetch.days = v.parse()?;
            }
            "--from" => params.opts.fetch.from = Some(parse_date(&args.next().ok_or_else(|| eyre!("Missing value for --from"))?)?),
            "--to" => params.opts.fetch.to = Some(parse_date(&args.next().ok_or_else(|| eyre!("Missing value for --to"))?)?),
            "--max-pages" => {
                let v = args.next().ok_or_else(|| eyre!("Missing value for --max-pages"))?;
                params.opts.fetch.max_pages = v.parse()?;
            }
            "--stars" => {
                let v = args.next().ok_or_else(|| eyre!("Missing value for --stars"))?;
                params.opts.filter.stars = parse_stars_list(&v)?;
            }
            "-s" | "--search" => params.opts.filter.search = args.next().ok_or_else(|| eyre!("Missing search text"))?,
            "-o" | "--out" => params.opts.export.out = Some(PathBuf::from(args.next().ok_or_else(|| eyre!("Missing output path"))?)),
            "--format" => {
                let v = args.next().ok_or_else(|| eyre!("Missing value for --format"))?;
                params.opts.export.format = match v.to_ascii_lowercase().as_str() {
                    "csv" => ExportFormat::Csv,
                    "tsv" => ExportFormat::Tsv,
                    "json" => ExportFormat::Json,
                    other => bail!("Unknown format: {}", other),
                };
            }
            "--no-headers" => params.opts.export.include_headers = false,
            "--list-apps" => params.list_apps = true,
            "--list-storefronts" => params.list_storefronts = true,
            "-q" | "--quiet" => params.quiet = true,
            "-h" | "--help" => {
                eprintln!("{}", include_str!("cli_help.txt"));
                std::process::exit(0);
            }
            _ => bail!("Unknown arg: {}", a),
        }
    }

    Ok(params)
}

pub fn run(params: Params) -> Result<()> {
    if params.list_apps {
        for (name, package) in KNOWN_APPS {
            println!("{}\t{}", package, name);
        }
        return Ok(());
    }
    if params.list_storefronts {
        for sf in ALL_STOREFRONTS {
            println!("{}\t{}\t{}", sf.country_code, sf.language_code, sf.country_name);
        }
        return Ok(());
    }

    let store_kind = params.opts.fetch.store;
    let app_id = match (&params.url, &params.app) {
        (Some(url), _) => ids::extract(store_kind, url)?,
        (None, Some(app)) => package_for(app).map(|p| s!(p)).unwrap_or_else(|| app.clone()),
        (None, None) => bail!("Specify --app <name-or-identifier> or --url <store-url> (see --help)"),
    };

    let window = params.opts.fetch.window();
    let store = fetch::store_for(store_kind, http::agent());

    let mut progress = ConsoleProgress::default();
    let collection = fetch::collect_all(
        store.as_ref(),
        &app_id,
        &window,
        params.opts.fetch.max_pages,
        if params.quiet { None } else { Some(&mut progress) },
    );

    if !params.quiet {
        print_summary(&collection);
    }

    let filtered = filter::filter(&collection.table, &params.opts.filter);
    let path = export::write_export(&filtered, &params.opts.export)?;
    eprintln!(
        "Wrote {} reviews to {} ({} merged before filters)",
        filtered.len(),
        path.display(),
        collection.table.len()
    );
    Ok(())
}

fn print_summary(collection: &fetch::Collection) {
    let mut fetched = 0usize;
    let mut empty = 0usize;
    let mut skipped = 0usize;
    let mut failed = 0usize;
    for o in &collection.manifest {
        match &o.outcome {
            Outcome::Fetched(_) => fetched += 1,
            Outcome::Empty => empty += 1,
            Outcome::Skipped => skipped += 1,
            Outcome::Blocked | Outcome::Failed(_) => failed += 1,
        }
    }
    eprintln!(
        "Storefronts: {} with reviews, {} empty, {} skipped, {} failed",
        fetched, empty, skipped, failed
    );

    let counts = collection.table.star_counts();
    eprintln!(
        "Stars: 1:{} 2:{} 3:{} 4:{} 5:{}",
        counts[0], counts[1], counts[2], counts[3], counts[4]
    );
}

fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|_| eyre!("Invalid date: {} (expected YYYY-MM-DD)", s))
}

/// "1-3,5" → [1, 2, 3, 5]
fn parse_stars_list(s: &str) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    for part in s.split(',') {
        let part = part.trim();
        if part.is_empty() { continue; }
        if let Some(dash) = part.find('-') {
            let a: u8 = part[..dash].trim().parse()?;
            let b: u8 = part[dash + 1..].trim().parse()?;
            if a > b { bail!("Invalid range: {}", part); }
            for v in a..=b {
                if (1..=5).contains(&v) { out.push(v); }
            }
        } else {
            let v: u8 = part.parse()?;
            if (1..=5).contains(&v) { out.push(v); }
        }
    }
    out.sort_unstable();
    out.dedup();
    Ok(out)
}

/// Progress sink writing transient status lines to stderr.
#[derive(Default)]
struct ConsoleProgress {
    done: usize,
    total: usize,
}

impl Progress for ConsoleProgress {
    fn begin(&mut self, total: usize) {
        self.total = total;
    }
    fn log(&mut self, msg: &str) {
        eprint!("\r{:<70}", msg);
        let _ = std::io::stderr().flush();
    }
    fn item_done(&mut self, _index: usize, _name: &str) {
        self.done += 1;
    }
    fn item_failed(&mut self, _index: usize, name: &str) {
        self.done += 1;
        eprintln!("\r{:<70}", format!("Failed: {}", name));
    }
    fn finish(&mut self) {
        eprintln!("\r{:<70}", format!("Collected {}/{} storefronts", self.done, self.total));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stars_list_parses_ranges_and_singles() {
        assert_eq!(parse_stars_list("1-3,5").unwrap(), vec![1, 2, 3, 5]);
        assert_eq!(parse_stars_list("5,5,1").unwrap(), vec![1, 5]);
        assert_eq!(parse_stars_list("9").unwrap(), Vec::<u8>::new());
        assert!(parse_stars_list("3-1").is_err());
    }

    #[test]
    fn dates_parse_iso_only() {
        assert!(parse_date("2025-03-01").is_ok());
        assert!(parse_date("01/03/2025").is_err());
    }
}
