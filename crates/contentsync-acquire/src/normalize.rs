use scraper::ElementRef;
use unicode_normalization::UnicodeNormalization;

/// Normalize Unicode text to NFC form.
///
/// Scraped pages mix precomposed and combining accents; NFC keeps titles
/// and summaries byte-stable across runs.
pub fn normalize_text(input: &str) -> String {
    input.nfc().collect()
}

/// Text content of an element with each text node stripped and the pieces
/// joined without separators.
pub fn stripped_text(element: ElementRef) -> String {
    let joined: String = element
        .text()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect();
    normalize_text(&joined)
}
