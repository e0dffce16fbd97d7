// src/text.rs
use once_cell::sync::Lazy;
use regex::Regex;

static DISALLOWED_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^A-Za-z0-9\s-]").unwrap());

/// Drop everything outside letters, digits, whitespace and hyphens, then trim.
pub fn clean_text(s: &str) -> String {
    DISALLOWED_RE.replace_all(s, "").trim().to_string()
}

/// "sYSTEMS" -> "Systems". Callers pass ASCII-alphabetic tokens.
pub fn title_case(w: &str) -> String {
    let mut chars = w.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn allowed(c: char) -> bool {
        c.is_ascii_alphanumeric() || c.is_whitespace() || c == '-'
    }

    #[test]
    fn strips_punctuation_and_trims() {
        assert_eq!(
            clean_text("  Edge-AI: Fast (and cheap!) inference, v2.0  "),
            "Edge-AI Fast and cheap inference v20"
        );
    }

    #[test]
    fn empty_stays_empty() {
        assert_eq!(clean_text(""), "");
        assert_eq!(clean_text("  !!  "), "");
    }

    #[test]
    fn drops_non_ascii_letters() {
        assert_eq!(clean_text("Réseau — système"), "Rseau  systme");
    }

    #[test]
    fn output_is_restricted_and_idempotent() {
        let samples = [
            "“Quoted” title — with dashes",
            "\tTabs\tand\nnewlines\n",
            "<b>HTML</b> &amp; entities",
            "Method & apparatus for 5G/6G handover",
            "",
        ];
        for s in samples {
            let once = clean_text(s);
            assert!(once.chars().all(allowed), "{once:?}");
            assert_eq!(once, once.trim());
            assert_eq!(clean_text(&once), once);
        }
    }

    #[test]
    fn title_cases_tokens() {
        assert_eq!(title_case("SYSTEMS"), "Systems");
        assert_eq!(title_case("network"), "Network");
        assert_eq!(title_case("iOT"), "Iot");
        assert_eq!(title_case(""), "");
    }
}
