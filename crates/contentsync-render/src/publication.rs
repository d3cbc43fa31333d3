use crate::front_matter::{quoted, quoted_list};
use anyhow::{Context, Result};
use contentsync_model::{slugify, PublicationEntry, DEFAULT_SLUG_LEN};
use std::fs;
use std::path::{Path, PathBuf};

/// Summary field value when the feed entry had no abstract.
pub const PLACEHOLDER_SUMMARY: &str = "Preprint metadata fetched from arXiv.";

/// Write `<publication_dir>/<slug>.md`, replacing any existing file.
///
/// Identifiers are unique per query, so slugs are not checked for collisions.
/// An entry whose identifier yields no slug is skipped and `None` returned.
pub fn write_publication(
    entry: &PublicationEntry,
    publication_dir: &Path,
) -> Result<Option<PathBuf>> {
    let slug = slugify(&entry.id, DEFAULT_SLUG_LEN);
    if slug.is_empty() {
        tracing::warn!(id = %entry.id, title = %entry.title, "Skipping publication without a usable identifier");
        return Ok(None);
    }

    fs::create_dir_all(publication_dir)
        .with_context(|| format!("Failed to create {}", publication_dir.display()))?;

    let path = publication_dir.join(format!("{slug}.md"));
    fs::write(&path, render_publication(entry))
        .with_context(|| format!("Failed to write {}", path.display()))?;
    tracing::debug!(path = %path.display(), id = %entry.id, "Wrote publication page");

    Ok(Some(path))
}

/// Render the publication page: front matter, then the abstract as body.
pub fn render_publication(entry: &PublicationEntry) -> String {
    let title = if entry.title.is_empty() {
        &entry.id
    } else {
        &entry.title
    };
    let summary = entry.summary.trim();

    let mut lines = vec![
        "---".to_string(),
        format!("title: {}", quoted(title)),
        format!("authors: {}", quoted_list(&entry.authors)),
        format!("date: {}", entry.published.to_rfc3339()),
        "publication_types: [\"3\"]".to_string(),
        "publication: \"*arXiv e-prints*\"".to_string(),
        format!("url_pdf: {}", quoted(&entry.pdf_url)),
        format!("url_source: {}", quoted(&entry.abs_url)),
    ];
    if !entry.category.is_empty() {
        lines.push(format!("tags: {}", quoted_list([&entry.category])));
    }
    let summary_field = if summary.is_empty() {
        PLACEHOLDER_SUMMARY
    } else {
        summary
    };
    lines.push(format!("summary: {}", quoted(summary_field)));
    lines.push("---".to_string());
    if !summary.is_empty() {
        lines.push(String::new());
        lines.push(summary.to_string());
    }

    let mut text = lines.join("\n");
    text.push('\n');
    text
}
