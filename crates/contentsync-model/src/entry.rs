use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A game listed on a creator's profile page.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProjectEntry {
    pub title: String,
    /// Link to the game's own page. Empty when the cell had no anchor.
    pub url: String,
    /// Short blurb shown under the cell. Empty when the cell had none.
    pub summary: String,
}

/// Metadata for a single preprint, one per queried identifier.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PublicationEntry {
    /// Source identifier, including any version suffix (e.g., "2101.00001v2").
    pub id: String,
    pub title: String,
    pub summary: String,
    pub published: DateTime<Utc>,
    /// Author names in feed order.
    pub authors: Vec<String>,
    pub pdf_url: String,
    pub abs_url: String,
    /// Primary subject category (e.g., "astro-ph.HE"). Empty when absent.
    pub category: String,
}

/// Entries produced by scraping a listing page, plus how many cells the
/// cell policy rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scraped<T> {
    pub entries: Vec<T>,
    pub skipped: usize,
}

impl<T> Default for Scraped<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            skipped: 0,
        }
    }
}

impl<T> Scraped<T> {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
