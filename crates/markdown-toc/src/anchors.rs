use once_cell::sync::Lazy;
use regex::Regex;

static DISALLOWED: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^\w\s-]").expect("static anchor pattern"));
static SEPARATORS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[-\s]+").expect("static anchor pattern"));

/// Convert heading text into an anchor fragment.
///
/// Lowercases, drops everything but word characters, whitespace and hyphens,
/// folds each run of whitespace/hyphens into one `-`, then trims `-` and `_`
/// from both ends. Duplicate headings map to duplicate anchors.
pub fn slugify(text: &str) -> String {
    let lowered = text.to_lowercase();
    let kept = DISALLOWED.replace_all(&lowered, "");
    let joined = SEPARATORS.replace_all(&kept, "-");
    joined
        .trim_matches(|ch: char| ch == '-' || ch == '_')
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn is_case_insensitive() {
        assert_eq!(slugify("Hello World"), "hello-world");
        assert_eq!(slugify("hello world"), "hello-world");
    }

    #[test]
    fn strips_punctuation_and_collapses_separators() {
        assert_eq!(slugify("What's new in v2.0?"), "whats-new-in-v20");
        assert_eq!(slugify("  a -- b\t c  "), "a-b-c");
        assert_eq!(slugify("Links: [docs](http://x)"), "links-docshttpx");
    }

    #[test]
    fn trims_hyphens_and_underscores_at_edges() {
        assert_eq!(slugify("__private__"), "private");
        assert_eq!(slugify("- leading and trailing -"), "leading-and-trailing");
        assert_eq!(slugify("snake_case_name"), "snake_case_name");
    }

    #[test]
    fn keeps_unicode_word_characters() {
        assert_eq!(slugify("Über Straße"), "über-straße");
        assert_eq!(slugify("日本語 ドキュメント"), "日本語-ドキュメント");
    }

    #[test]
    fn is_idempotent() {
        for input in [
            "Hello World",
            "  -- Mixed_Case & Symbols!! --",
            "Über Straße",
            "",
        ] {
            let once = slugify(input);
            assert_eq!(slugify(&once), once, "input {input:?}");
        }
    }
}
