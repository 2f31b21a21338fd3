// src/filter.rs
// View filters over a merged table. Non-destructive: always builds a new
// table, never touches the one the session caches.

use regex::{Regex, RegexBuilder};

use crate::config::options::FilterOptions;
use crate::table::ReviewTable;

/// Keep records whose rating is in `opts.stars` (empty set keeps all) and
/// whose body or reply body contains `opts.search` as a case-insensitive
/// literal substring.
pub fn filter(table: &ReviewTable, opts: &FilterOptions) -> ReviewTable {
    let matcher = build_matcher(&opts.search);

    let records = table
        .records()
        .iter()
        .filter(|r| {
            if !opts.stars.is_empty() {
                match r.rating {
                    Some(star) if opts.stars.contains(&star) => {}
                    _ => return false,
                }
            }
            match &matcher {
                Some(re) => re.is_match(&r.body) || re.is_match(&r.reply_body),
                None => true,
            }
        })
        .cloned()
        .collect();

    ReviewTable::new(records)
}

/// The search text is a literal, not a pattern: escape it before compiling,
/// so "a.b" matches only the three characters a.b.
fn build_matcher(search: &str) -> Option<Regex> {
    let needle = search.trim();
    if needle.is_empty() {
        return None;
    }
    RegexBuilder::new(&regex::escape(needle))
        .case_insensitive(true)
        .build()
        .ok()
}
