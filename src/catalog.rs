// src/catalog.rs
// Static storefront catalog: one (country, language) pairing per regional
// review feed. Defined once, read-only. Collection walks this list in order.

/// One regional storefront of an app's review feed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Storefront {
    pub country_code: &'static str,
    pub language_code: &'static str,
    pub country_name: &'static str,
}

const fn sf(country_code: &'static str, language_code: &'static str, country_name: &'static str) -> Storefront {
    Storefront { country_code, language_code, country_name }
}

/// Full storefront list, grouped roughly by region.
pub const ALL_STOREFRONTS: &[Storefront] = &[
    sf("us", "en", "United States"),
    sf("ca", "en", "Canada"),
    sf("mx", "es", "Mexico"),

    sf("gb", "en", "United Kingdom"),
    sf("ie", "en", "Ireland"),
    sf("fr", "fr", "France"),
    sf("de", "de", "Germany"),
    sf("it", "it", "Italy"),
    sf("es", "es", "Spain"),
    sf("pt", "pt", "Portugal"),
    sf("nl", "nl", "Netherlands"),
    sf("be", "fr", "Belgium"),
    sf("ch", "de", "Switzerland"),
    sf("at", "de", "Austria"),

    sf("se", "sv", "Sweden"),
    sf("no", "no", "Norway"),
    sf("fi", "fi", "Finland"),
    sf("dk", "da", "Denmark"),
    sf("pl", "pl", "Poland"),
    sf("cz", "cs", "Czech Republic"),
    sf("sk", "sk", "Slovakia"),
    sf("hu", "hu", "Hungary"),
    sf("ro", "ro", "Romania"),
    sf("bg", "bg", "Bulgaria"),
    sf("ua", "uk", "Ukraine"),
    sf("ru", "ru", "Russia"),

    sf("in", "en", "India"),
    sf("pk", "en", "Pakistan"),
    sf("bd", "bn", "Bangladesh"),
    sf("np", "ne", "Nepal"),
    sf("lk", "si", "Sri Lanka"),

    sf("id", "id", "Indonesia"),
    sf("ph", "en", "Philippines"),
    sf("vn", "vi", "Vietnam"),
    sf("th", "th", "Thailand"),
    sf("my", "ms", "Malaysia"),
    sf("sg", "en", "Singapore"),

    sf("jp", "ja", "Japan"),
    sf("kr", "ko", "South Korea"),
    sf("tw", "zh", "Taiwan"),
    sf("hk", "zh", "Hong Kong"),

    sf("tr", "tr", "Turkey"),
    sf("sa", "ar", "Saudi Arabia"),
    sf("ae", "ar", "United Arab Emirates"),
    sf("eg", "ar", "Egypt"),
    sf("il", "iw", "Israel"),

    sf("za", "en", "South Africa"),
    sf("ng", "en", "Nigeria"),
    sf("ke", "sw", "Kenya"),

    sf("br", "pt", "Brazil"),
    sf("ar", "es", "Argentina"),
    sf("cl", "es", "Chile"),
    sf("co", "es", "Colombia"),
    sf("pe", "es", "Peru"),

    sf("au", "en", "Australia"),
    sf("nz", "en", "New Zealand"),
];

/// Language display names for the codes used in the catalog.
/// Unknown codes fall back to the upper-cased raw code.
const LANGUAGE_NAMES: &[(&str, &str)] = &[
    ("en", "English"),
    ("es", "Spanish"),
    ("fr", "French"),
    ("de", "German"),
    ("it", "Italian"),
    ("pt", "Portuguese"),
    ("nl", "Dutch"),
    ("sv", "Swedish"),
    ("no", "Norwegian"),
    ("fi", "Finnish"),
    ("da", "Danish"),
    ("pl", "Polish"),
    ("cs", "Czech"),
    ("sk", "Slovak"),
    ("hu", "Hungarian"),
    ("ro", "Romanian"),
    ("bg", "Bulgarian"),
    ("uk", "Ukrainian"),
    ("ru", "Russian"),
    ("bn", "Bengali"),
    ("ne", "Nepali"),
    ("si", "Sinhala"),
    ("id", "Indonesian"),
    ("vi", "Vietnamese"),
    ("th", "Thai"),
    ("ms", "Malay"),
    ("ja", "Japanese"),
    ("ko", "Korean"),
    ("zh", "Chinese"),
    ("tr", "Turkish"),
    ("ar", "Arabic"),
    ("iw", "Hebrew"),
    ("sw", "Swahili"),
];

pub fn language_name(code: &str) -> String {
    for (c, name) in LANGUAGE_NAMES {
        if code.eq_ignore_ascii_case(c) {
            return s!(*name);
        }
    }
    code.to_ascii_uppercase()
}

pub fn find(country_code: &str) -> Option<&'static Storefront> {
    ALL_STOREFRONTS.iter().find(|sf| sf.country_code.eq_ignore_ascii_case(country_code))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_has_no_duplicate_countries() {
        let mut codes: Vec<&str> = ALL_STOREFRONTS.iter().map(|sf| sf.country_code).collect();
        codes.sort_unstable();
        let before = codes.len();
        codes.dedup();
        assert_eq!(before, codes.len());
    }

    #[test]
    fn every_catalog_language_has_a_display_name() {
        for sf in ALL_STOREFRONTS {
            let name = language_name(sf.language_code);
            assert_ne!(name, sf.language_code.to_ascii_uppercase(), "missing name for {}", sf.language_code);
        }
    }

    #[test]
    fn unknown_language_code_falls_back_to_uppercase() {
        assert_eq!(language_name("tlh"), "TLH");
    }
}
