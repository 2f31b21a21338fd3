// src/core/sanitize.rs

pub fn normalize_entities(s: &str) -> String {
    s.replace("&nbsp;", " ").replace("&amp;", "&")
}

pub fn normalize_ws(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_space = false;
    for ch in s.chars() {
        if ch.is_whitespace() {
            if !prev_space { out.push(' '); prev_space = true; }
        } else { out.push(ch); prev_space = false; }
    }
    out.trim().to_string()
}

/// Entity + whitespace cleanup for text lifted out of page markup.
pub fn clean_text(s: &str) -> String {
    normalize_ws(&normalize_entities(s))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_text_collapses_entities_and_runs() {
        assert_eq!(clean_text("a&nbsp;&nbsp;b\n\t c &amp; d"), "a b c & d");
    }
}
