// benches/merge.rs
use chrono::{DateTime, TimeZone, Utc};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

use review_scrape::record::ReviewRecord;
use review_scrape::table::ReviewTable;

fn at(secs: i64) -> DateTime<Utc> {
    Utc.timestamp_opt(secs, 0).unwrap()
}

/// Synthetic merged input: ~55 storefronts worth of rows with heavy overlap,
/// the shape dedup sees right after concatenation. Deterministic LCG so runs
/// compare.
fn synthetic_rows(n: usize) -> Vec<ReviewRecord> {
    let mut seed: u64 = 0x5eed;
    let mut next = move || {
        seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
        seed >> 33
    };

    (0..n)
        .map(|_| {
            let id = next() % (n as u64 / 3); // ~3x duplication
            ReviewRecord {
                review_id: format!("gp:{id:08x}"),
                author_name: format!("user{}", next() % 500),
                body: "some review text of plausible length for a mobile app".into(),
                rating: Some((next() % 5 + 1) as u8),
                thumbs_up: None,
                app_version: "4.1.2".into(),
                timestamp_utc: at(1_700_000_000 + (next() % 1_000_000) as i64),
                country: "United States".into(),
                language: "English".into(),
                reply_body: String::new(),
                replied_at_utc: None,
            }
        })
        .collect()
}

fn bench_merge(c: &mut Criterion) {
    let rows = synthetic_rows(10_000);

    c.bench_function("sort_dedup_10k", |b| {
        b.iter(|| {
            let mut table = ReviewTable::new(black_box(rows.clone()));
            table.sort_newest_first();
            table.dedup();
            black_box(table.len())
        })
    });

    c.bench_function("star_counts_10k", |b| {
        let table = ReviewTable::new(rows.clone());
        b.iter(|| black_box(table.star_counts()))
    });
}

criterion_group!(benches, bench_merge);
criterion_main!(benches);
