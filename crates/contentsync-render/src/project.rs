use crate::front_matter::quoted;
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use contentsync_model::{slugify, ProjectEntry, DEFAULT_SLUG_LEN};
use std::fs;
use std::path::{Path, PathBuf};

/// Summary written when the listing cell had none.
pub const PLACEHOLDER_SUMMARY: &str = "Game description pending update.";

/// Slug for a project page: the title, or the URL when the title has no
/// usable characters.
pub fn project_slug(entry: &ProjectEntry) -> String {
    let slug = slugify(&entry.title, DEFAULT_SLUG_LEN);
    if slug.is_empty() {
        slugify(&entry.url, DEFAULT_SLUG_LEN)
    } else {
        slug
    }
}

/// Write `<project_dir>/<slug>/index.md`, replacing any existing file.
///
/// Returns the path written, or `None` when neither title nor URL yields a
/// slug and the entry was skipped.
pub fn write_project(
    entry: &ProjectEntry,
    project_dir: &Path,
    timestamp: DateTime<Utc>,
) -> Result<Option<PathBuf>> {
    let slug = project_slug(entry);
    if slug.is_empty() {
        tracing::warn!(title = %entry.title, url = %entry.url, "Skipping project with neither a usable title nor URL");
        return Ok(None);
    }

    let dir = project_dir.join(&slug);
    fs::create_dir_all(&dir)
        .with_context(|| format!("Failed to create {}", dir.display()))?;

    let path = dir.join("index.md");
    fs::write(&path, render_project(entry, timestamp))
        .with_context(|| format!("Failed to write {}", path.display()))?;
    tracing::debug!(path = %path.display(), title = %entry.title, "Wrote project page");

    Ok(Some(path))
}

/// Render the Hugo Academic project page for `entry`.
pub fn render_project(entry: &ProjectEntry, timestamp: DateTime<Utc>) -> String {
    let summary = if entry.summary.is_empty() {
        PLACEHOLDER_SUMMARY
    } else {
        entry.summary.as_str()
    };

    format!(
        r##"---
# Documentation: https://sourcethemes.com/academic/docs/managing-content/

title: {title}
summary: {summary}
authors: []
tags: ["game"]
categories: []
date: {date}

# Optional external URL for project (replaces project detail page).
external_link: {link}

# Featured image
# To use, add an image named `featured.jpg/png` to your page's folder.
# Focal points: Smart, Center, TopLeft, Top, TopRight, Left, Right, BottomLeft, Bottom, BottomRight.
image:
  caption: ""
  focal_point: ""
  preview_only: false

# Custom links (optional).
#   Uncomment and edit lines below to show custom links.
# links:
# - name: Follow
#   url: https://twitter.com
#   icon_pack: fab
#   icon: twitter

url_code: ""
url_pdf: ""
url_slides: ""
url_video: ""

# Slides (optional).
#   Associate this project with Markdown slides.
#   Simply enter your slide deck's filename without extension.
#   E.g. `slides = "example-slides"` references `content/slides/example-slides.md`.
#   Otherwise, set `slides = ""`.
slides: ""
---
"##,
        title = quoted(&entry.title),
        summary = quoted(summary),
        date = timestamp.to_rfc3339(),
        link = quoted(&entry.url),
    )
}
