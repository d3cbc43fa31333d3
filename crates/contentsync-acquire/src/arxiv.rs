use crate::http;
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use contentsync_model::PublicationEntry;
use quick_xml::events::{BytesStart, Event};
use quick_xml::name::{Namespace, ResolveResult};
use quick_xml::NsReader;

const ATOM_NS: &[u8] = b"http://www.w3.org/2005/Atom";
const ARXIV_NS: &[u8] = b"http://arxiv.org/schemas/atom";

const ABS_BASE: &str = "https://arxiv.org/abs";
const PDF_BASE: &str = "https://arxiv.org/pdf";

/// Fetch metadata for `ids` in a single batched query.
///
/// Returns an empty list without touching the network when `ids` is empty.
pub async fn fetch(
    client: &reqwest::Client,
    api_url: &str,
    ids: &[String],
) -> Result<Vec<PublicationEntry>> {
    if ids.is_empty() {
        tracing::debug!("No arXiv identifiers given, skipping query");
        return Ok(Vec::new());
    }

    let url = query_url(api_url, ids);
    tracing::info!(url = %url, ids = ids.len(), "Fetching arXiv metadata");
    let xml = http::fetch_text(client, &url).await?;
    tracing::info!(bytes = xml.len(), "Received feed");

    let entries = parse_feed(&xml, Utc::now())?;
    tracing::info!(publications = entries.len(), "Parsed feed entries");
    Ok(entries)
}

/// Build the query URL. `max_results` is set to the number of identifiers
/// so the API does not cut the batch at its default page size.
pub fn query_url(api_url: &str, ids: &[String]) -> String {
    format!(
        "{api_url}?id_list={}&max_results={}",
        ids.join(","),
        ids.len()
    )
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Ns {
    Atom,
    Arxiv,
    Other,
}

impl Ns {
    fn classify(resolved: &ResolveResult) -> Self {
        match resolved {
            ResolveResult::Bound(Namespace(ns)) if *ns == ATOM_NS => Ns::Atom,
            ResolveResult::Bound(Namespace(ns)) if *ns == ARXIV_NS => Ns::Arxiv,
            _ => Ns::Other,
        }
    }
}

/// Text-bearing fields collected from an `<entry>`.
#[derive(Debug, Clone, Copy)]
enum Field {
    Id,
    Title,
    Summary,
    Published,
    AuthorName,
}

#[derive(Debug, Default)]
struct RawEntry {
    id_url: String,
    title: String,
    summary: String,
    published: String,
    authors: Vec<String>,
    pdf_url: Option<String>,
    category: String,
}

/// An `<entry>` currently being read, with the depths needed to tell its
/// direct children apart from nested elements.
struct OpenEntry {
    depth: usize,
    author_depth: Option<usize>,
    field: Option<(Field, usize)>,
    text: String,
    raw: RawEntry,
}

impl OpenEntry {
    fn new(depth: usize) -> Self {
        Self {
            depth,
            author_depth: None,
            field: None,
            text: String::new(),
            raw: RawEntry::default(),
        }
    }

    fn start(&mut self, ns: Ns, e: &BytesStart, depth: usize) -> Result<()> {
        let local = e.local_name();
        let is_child = depth == self.depth + 1;
        let field = match (ns, local.as_ref()) {
            (Ns::Atom, b"id") if is_child => Some(Field::Id),
            (Ns::Atom, b"title") if is_child => Some(Field::Title),
            (Ns::Atom, b"summary") if is_child => Some(Field::Summary),
            (Ns::Atom, b"published") if is_child => Some(Field::Published),
            (Ns::Atom, b"name") if self.author_depth == Some(depth - 1) => Some(Field::AuthorName),
            (Ns::Atom, b"author") if is_child => {
                self.author_depth = Some(depth);
                None
            }
            _ => {
                self.attributes_only(ns, e, depth)?;
                None
            }
        };
        if let Some(field) = field {
            self.field = Some((field, depth));
            self.text.clear();
        }
        Ok(())
    }

    /// Handle elements whose data lives entirely in attributes.
    fn attributes_only(&mut self, ns: Ns, e: &BytesStart, depth: usize) -> Result<()> {
        if depth != self.depth + 1 {
            return Ok(());
        }
        match (ns, e.local_name().as_ref()) {
            (Ns::Atom, b"link") if self.raw.pdf_url.is_none() => {
                let mut is_pdf = false;
                let mut href = String::new();
                for attr in e.attributes() {
                    let attr = attr?;
                    let value = attr.unescape_value()?;
                    match attr.key.as_ref() {
                        b"title" if value == "pdf" => is_pdf = true,
                        b"type" if value == "application/pdf" => is_pdf = true,
                        b"href" => href = value.into_owned(),
                        _ => {}
                    }
                }
                if is_pdf {
                    self.raw.pdf_url = Some(href);
                }
            }
            (Ns::Arxiv, b"primary_category") => {
                for attr in e.attributes() {
                    let attr = attr?;
                    if attr.key.as_ref() == b"term" {
                        self.raw.category = attr.unescape_value()?.into_owned();
                    }
                }
            }
            _ => {}
        }
        Ok(())
    }

    fn push_text(&mut self, text: &str) {
        if self.field.is_some() {
            self.text.push_str(text);
        }
    }

    fn end(&mut self, depth: usize) {
        if let Some((field, field_depth)) = self.field {
            if field_depth == depth {
                let value = self.text.trim().to_string();
                match field {
                    Field::Id => self.raw.id_url = value,
                    Field::Title => self.raw.title = value,
                    Field::Summary => self.raw.summary = value,
                    Field::Published => self.raw.published = value,
                    Field::AuthorName => self.raw.authors.push(value),
                }
                self.field = None;
                self.text.clear();
            }
        }
        if self.author_depth == Some(depth) {
            self.author_depth = None;
        }
    }
}

impl RawEntry {
    fn finish(self, fallback_time: DateTime<Utc>) -> PublicationEntry {
        let id = self.id_url.rsplit('/').next().unwrap_or_default().to_string();
        let published = parse_published(&id, &self.published, fallback_time);
        let pdf_url = self
            .pdf_url
            .filter(|href| !href.is_empty())
            .unwrap_or_else(|| format!("{PDF_BASE}/{id}"));

        PublicationEntry {
            abs_url: format!("{ABS_BASE}/{id}"),
            id,
            title: self.title,
            summary: self.summary,
            published,
            authors: self.authors,
            pdf_url,
            category: self.category,
        }
    }
}

/// Parse an RFC 3339 timestamp, substituting `fallback_time` when the
/// field is missing or malformed.
fn parse_published(id: &str, raw: &str, fallback_time: DateTime<Utc>) -> DateTime<Utc> {
    if raw.is_empty() {
        tracing::warn!(id = %id, "Entry has no published date, using current time");
        return fallback_time;
    }
    match DateTime::parse_from_rfc3339(raw) {
        Ok(ts) => ts.with_timezone(&Utc),
        Err(e) => {
            tracing::warn!(id = %id, published = %raw, error = %e, "Unparseable published date, using current time");
            fallback_time
        }
    }
}

/// Parse an Atom feed from the arXiv API into publication entries, in feed
/// order. `fallback_time` stands in for missing or malformed dates.
pub fn parse_feed(xml: &str, fallback_time: DateTime<Utc>) -> Result<Vec<PublicationEntry>> {
    let mut reader = NsReader::from_str(xml);
    let mut depth = 0usize;
    let mut open: Option<OpenEntry> = None;
    let mut entries = Vec::new();

    loop {
        let (resolved, event) = reader
            .read_resolved_event()
            .context("Malformed feed XML")?;
        let ns = Ns::classify(&resolved);

        match event {
            Event::Start(e) => {
                depth += 1;
                if let Some(entry) = open.as_mut() {
                    entry.start(ns, &e, depth)?;
                } else if ns == Ns::Atom && e.local_name().as_ref() == b"entry" {
                    open = Some(OpenEntry::new(depth));
                }
            }
            Event::Empty(e) => {
                if let Some(entry) = open.as_mut() {
                    entry.attributes_only(ns, &e, depth + 1)?;
                } else if ns == Ns::Atom && e.local_name().as_ref() == b"entry" {
                    // A self-closing entry still counts, with every field empty.
                    entries.push(RawEntry::default().finish(fallback_time));
                }
            }
            Event::Text(e) => {
                if let Some(entry) = open.as_mut() {
                    entry.push_text(&e.unescape()?);
                }
            }
            Event::CData(e) => {
                if let Some(entry) = open.as_mut() {
                    entry.push_text(&String::from_utf8_lossy(&e));
                }
            }
            Event::End(_) => {
                if let Some(mut entry) = open.take() {
                    if entry.depth == depth {
                        entries.push(entry.raw.finish(fallback_time));
                    } else {
                        entry.end(depth);
                        open = Some(entry);
                    }
                }
                depth = depth.saturating_sub(1);
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(entries)
}
