//! Orchestration of one sync run: fetch both sources, then either report
//! counts (dry run) or write every page.

use anyhow::Result;
use chrono::{DateTime, Utc};
use contentsync_acquire::{arxiv, http, itch};
use contentsync_model::{ProjectEntry, PublicationEntry, Scraped, SyncConfig};
use contentsync_render::{project, publication};
use serde::Serialize;
use std::io::Write;
use std::path::PathBuf;

/// Everything fetched in a run, before anything is written.
#[derive(Debug, Clone)]
pub struct Fetched {
    pub projects: Scraped<ProjectEntry>,
    pub publications: Vec<PublicationEntry>,
}

/// Outcome of a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum RunReport {
    DryRun {
        projects: usize,
        publications: usize,
    },
    Written {
        projects: Vec<PathBuf>,
        publications: Vec<PathBuf>,
    },
}

impl RunReport {
    /// Human-readable report: one summary line for a dry run, otherwise one
    /// line per file written.
    pub fn write_lines(&self, out: &mut impl Write) -> std::io::Result<()> {
        match self {
            RunReport::DryRun {
                projects,
                publications,
            } => writeln!(
                out,
                "Fetched {projects} projects and {publications} publications (dry run)."
            ),
            RunReport::Written {
                projects,
                publications,
            } => {
                for path in projects {
                    writeln!(out, "Wrote project: {}", path.display())?;
                }
                for path in publications {
                    writeln!(out, "Wrote publication: {}", path.display())?;
                }
                Ok(())
            }
        }
    }

    /// The report as a single line of JSON.
    pub fn write_json(&self, out: &mut impl Write) -> Result<()> {
        let json = serde_json::to_string(self)?;
        writeln!(out, "{json}")?;
        Ok(())
    }
}

/// Fetch the listing page and the publication feed, one after the other.
/// Any fetch error aborts the run.
pub async fn fetch_all(config: &SyncConfig) -> Result<Fetched> {
    let client = http::build_client(config)?;

    let projects = itch::fetch(&client, &config.listing_url).await?;
    if projects.skipped > 0 {
        tracing::info!(skipped = projects.skipped, "Skipped listing cells without a title");
    }
    let publications = arxiv::fetch(&client, &config.arxiv_api_url, &config.arxiv_ids).await?;

    Ok(Fetched {
        projects,
        publications,
    })
}

/// Write every fetched entry. Project pages share one `date` stamp.
pub fn write_all(
    fetched: &Fetched,
    config: &SyncConfig,
    timestamp: DateTime<Utc>,
) -> Result<RunReport> {
    let mut project_paths = Vec::with_capacity(fetched.projects.len());
    for entry in &fetched.projects.entries {
        if let Some(path) = project::write_project(entry, &config.project_dir, timestamp)? {
            project_paths.push(path);
        }
    }

    let mut publication_paths = Vec::with_capacity(fetched.publications.len());
    for entry in &fetched.publications {
        if let Some(path) = publication::write_publication(entry, &config.publication_dir)? {
            publication_paths.push(path);
        }
    }

    tracing::info!(
        projects = project_paths.len(),
        publications = publication_paths.len(),
        "Wrote content pages"
    );

    Ok(RunReport::Written {
        projects: project_paths,
        publications: publication_paths,
    })
}

/// Run a full sync. With `dry_run` set nothing touches the filesystem.
pub async fn run(config: &SyncConfig, dry_run: bool) -> Result<RunReport> {
    let timestamp = Utc::now();
    let fetched = fetch_all(config).await?;

    if dry_run {
        return Ok(RunReport::DryRun {
            projects: fetched.projects.len(),
            publications: fetched.publications.len(),
        });
    }

    write_all(&fetched, config, timestamp)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dry_run_report_is_one_line() {
        let report = RunReport::DryRun {
            projects: 3,
            publications: 2,
        };
        let mut out = Vec::new();
        report.write_lines(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text, "Fetched 3 projects and 2 publications (dry run).\n");
    }

    #[test]
    fn test_written_report_lines() {
        let report = RunReport::Written {
            projects: vec![PathBuf::from("content/project/orbit-dash/index.md")],
            publications: vec![PathBuf::from("content/publication/1234-5678.md")],
        };
        let mut out = Vec::new();
        report.write_lines(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(
            text,
            "Wrote project: content/project/orbit-dash/index.md\n\
             Wrote publication: content/publication/1234-5678.md\n"
        );
    }

    #[test]
    fn test_json_report() {
        let report = RunReport::DryRun {
            projects: 1,
            publications: 0,
        };
        let mut out = Vec::new();
        report.write_json(&mut out).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["mode"], "dry_run");
        assert_eq!(value["projects"], 1);
        assert_eq!(value["publications"], 0);
    }
}
