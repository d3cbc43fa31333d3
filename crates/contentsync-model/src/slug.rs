use regex::Regex;
use std::sync::LazyLock;

/// Default maximum slug length.
pub const DEFAULT_SLUG_LEN: usize = 60;

static NON_SLUG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-z0-9]+").expect("valid regex"));

/// Convert free text into a filesystem- and URL-safe slug.
///
/// The result contains only `[a-z0-9-]`, never starts or ends with a hyphen,
/// and never contains two hyphens in a row. A `max_len` of 0 disables
/// truncation. Returns an empty string when the input has no ASCII
/// alphanumerics; callers decide the fallback.
pub fn slugify(text: &str, max_len: usize) -> String {
    let lower = text.trim().to_lowercase();
    let collapsed = NON_SLUG_RE.replace_all(&lower, "-");
    let mut slug = collapsed.trim_matches('-');

    // Every remaining char is ASCII, so byte slicing lands on a boundary.
    if max_len > 0 && slug.len() > max_len {
        slug = slug[..max_len].trim_end_matches('-');
    }

    slug.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn is_well_formed(slug: &str) -> bool {
        let re = Regex::new(r"^[a-z0-9]+(-[a-z0-9]+)*$").unwrap();
        slug.is_empty() || re.is_match(slug)
    }

    #[test]
    fn test_basic_slug() {
        assert_eq!(slugify("Hello, World!", DEFAULT_SLUG_LEN), "hello-world");
        assert_eq!(slugify("  Space   Game 2  ", DEFAULT_SLUG_LEN), "space-game-2");
        assert_eq!(slugify("1234.5678", DEFAULT_SLUG_LEN), "1234-5678");
    }

    #[test]
    fn test_empty_and_symbol_only() {
        assert_eq!(slugify("", DEFAULT_SLUG_LEN), "");
        assert_eq!(slugify("!!! ??? ---", DEFAULT_SLUG_LEN), "");
        assert_eq!(slugify("日本語", DEFAULT_SLUG_LEN), "");
    }

    #[test]
    fn test_non_ascii_collapses() {
        assert_eq!(slugify("Café Noir", DEFAULT_SLUG_LEN), "caf-noir");
    }

    #[test]
    fn test_truncation_never_ends_in_hyphen() {
        let slug = slugify("aaaa bbbb", 5);
        assert_eq!(slug, "aaaa");
        assert!(slugify(&"word ".repeat(40), DEFAULT_SLUG_LEN).len() <= DEFAULT_SLUG_LEN);
    }

    #[test]
    fn test_zero_disables_truncation() {
        let long = "x".repeat(200);
        assert_eq!(slugify(&long, 0).len(), 200);
    }

    #[test]
    fn test_url_fallback_shape() {
        assert_eq!(
            slugify("https://someone.itch.io/my-game", DEFAULT_SLUG_LEN),
            "https-someone-itch-io-my-game"
        );
    }

    #[test]
    fn test_properties_over_samples() {
        let samples = [
            "Hello World",
            "--leading and trailing--",
            "MiXeD CaSe 123",
            "tabs\tand\nnewlines",
            "ünïcödé  ßtuff",
            "a-b--c---d",
            "   ",
            "https://export.arxiv.org/abs/hep-th/9901001v1",
            "The quick brown fox jumps over the lazy dog near the riverbank at dawn",
        ];
        for max_len in [0, 1, 5, 13, DEFAULT_SLUG_LEN] {
            for sample in samples {
                let slug = slugify(sample, max_len);
                assert!(is_well_formed(&slug), "{sample:?} -> {slug:?}");
                if max_len > 0 {
                    assert!(slug.len() <= max_len, "{sample:?} -> {slug:?}");
                }
                assert_eq!(slugify(&slug, max_len), slug, "not idempotent for {sample:?}");
            }
        }
    }
}
