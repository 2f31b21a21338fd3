// src/ids.rs
// Store-URL → canonical app identifier. Pure pattern matching, no network.

use url::Url;

use crate::error::MalformedUrlError;
use crate::record::StoreKind;

/// Extract the canonical identifier from a pasted store URL.
///
/// * Google Play: the `id` query parameter (`.../details?id=com.example.app`)
/// * Apple: digits following `/id` in the path (`.../app/example/id1234567890`)
/// * Microsoft: the path segment after `/detail/`
/// * Amazon: the 10-character ASIN after `/dp/`
pub fn extract(kind: StoreKind, text: &str) -> Result<String, MalformedUrlError> {
    let err = || MalformedUrlError {
        store: kind.label(),
        expected: expected_shape(kind),
    };
    let url = Url::parse(text.trim()).map_err(|_| err())?;

    match kind {
        StoreKind::GooglePlay => url
            .query_pairs()
            .find(|(k, _)| k.as_ref() == "id")
            .map(|(_, v)| v.into_owned())
            .filter(|v| !v.is_empty())
            .ok_or_else(err),

        StoreKind::AppleAppStore => path_segments(&url)
            .into_iter()
            .rev()
            .find_map(|seg| {
                let digits = seg.strip_prefix("id")?;
                (!digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()))
                    .then(|| s!(digits))
            })
            .ok_or_else(err),

        StoreKind::MicrosoftStore => {
            let segs = path_segments(&url);
            segs.iter()
                .position(|seg| seg.eq_ignore_ascii_case("detail"))
                .and_then(|i| segs.get(i + 1))
                .filter(|seg| !seg.is_empty())
                .map(|seg| s!(*seg))
                .ok_or_else(err)
        }

        StoreKind::Amazon => {
            let segs = path_segments(&url);
            segs.iter()
                .position(|seg| seg.eq_ignore_ascii_case("dp"))
                .and_then(|i| segs.get(i + 1))
                .filter(|seg| seg.len() == 10 && seg.bytes().all(|b| b.is_ascii_alphanumeric()))
                .map(|seg| seg.to_ascii_uppercase())
                .ok_or_else(err)
        }
    }
}

fn expected_shape(kind: StoreKind) -> &'static str {
    match kind {
        StoreKind::GooglePlay => "https://play.google.com/store/apps/details?id=<package>",
        StoreKind::AppleAppStore => "https://apps.apple.com/<cc>/app/<name>/id<digits>",
        StoreKind::MicrosoftStore => "https://apps.microsoft.com/detail/<product-id>",
        StoreKind::Amazon => "https://www.amazon.com/<name>/dp/<ASIN>",
    }
}

fn path_segments(url: &Url) -> Vec<&str> {
    url.path_segments()
        .map(|segs| segs.filter(|s| !s.is_empty()).collect())
        .unwrap_or_default()
}
