//! Run configuration.
//!
//! Values come from three layers: built-in defaults, an optional TOML file,
//! and command-line flags. Later layers override earlier ones; the CLI crate
//! applies the flag layer on top of what [`SyncConfig::load`] returns.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const DEFAULT_LISTING_URL: &str = "https://avivajpeyi.itch.io/";
pub const DEFAULT_ARXIV_API_URL: &str = "https://export.arxiv.org/api/query";
pub const DEFAULT_PROJECT_DIR: &str = "content/project";
pub const DEFAULT_PUBLICATION_DIR: &str = "content/publication";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_USER_AGENT: &str = "contentsync/0.1 (static content fetcher)";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Everything a run needs to know about where to fetch from and write to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SyncConfig {
    /// Creator profile page listing the games.
    pub listing_url: String,
    /// arXiv identifiers to fetch metadata for.
    pub arxiv_ids: Vec<String>,
    /// Query endpoint of the arXiv export API.
    pub arxiv_api_url: String,
    /// Project pages land at `<project_dir>/<slug>/index.md`.
    pub project_dir: PathBuf,
    /// Publication pages land at `<publication_dir>/<slug>.md`.
    pub publication_dir: PathBuf,
    /// Per-request bound, in seconds.
    pub timeout_secs: u64,
    pub user_agent: String,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            listing_url: DEFAULT_LISTING_URL.to_string(),
            arxiv_ids: Vec::new(),
            arxiv_api_url: DEFAULT_ARXIV_API_URL.to_string(),
            project_dir: PathBuf::from(DEFAULT_PROJECT_DIR),
            publication_dir: PathBuf::from(DEFAULT_PUBLICATION_DIR),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl SyncConfig {
    /// Load a config file, or return the defaults when `path` is `None`.
    ///
    /// Keys missing from the file keep their default values.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let Some(path) = path else {
            return Ok(Self::default());
        };

        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let mut config: Self = toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.arxiv_ids = clean_arxiv_ids(&config.arxiv_ids);
        Ok(config)
    }

    /// Reject values that would make a run meaningless.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.listing_url.trim().is_empty() {
            return Err(ConfigError::Invalid("listing_url is empty".into()));
        }
        if self.arxiv_api_url.trim().is_empty() {
            return Err(ConfigError::Invalid("arxiv_api_url is empty".into()));
        }
        if self.project_dir.as_os_str().is_empty() {
            return Err(ConfigError::Invalid("project_dir is empty".into()));
        }
        if self.publication_dir.as_os_str().is_empty() {
            return Err(ConfigError::Invalid("publication_dir is empty".into()));
        }
        if self.timeout_secs == 0 {
            return Err(ConfigError::Invalid("timeout_secs must be positive".into()));
        }
        Ok(())
    }

    pub fn timeout(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.timeout_secs)
    }
}

/// Trim identifiers and drop blank ones, keeping order.
pub fn clean_arxiv_ids<S: AsRef<str>>(ids: &[S]) -> Vec<String> {
    ids.iter()
        .map(|id| id.as_ref().trim())
        .filter(|id| !id.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SyncConfig::load(None).unwrap();
        assert_eq!(config.listing_url, "https://avivajpeyi.itch.io/");
        assert!(config.arxiv_ids.is_empty());
        assert_eq!(config.project_dir, PathBuf::from("content/project"));
        assert_eq!(config.publication_dir, PathBuf::from("content/publication"));
        assert_eq!(config.timeout_secs, 30);
        config.validate().unwrap();
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("contentsync.toml");
        std::fs::write(
            &path,
            "arxiv_ids = [\"2101.00001\", \"2202.00002\"]\nproject_dir = \"site/content/project\"\n",
        )
        .unwrap();

        let config = SyncConfig::load(Some(&path)).unwrap();
        assert_eq!(config.arxiv_ids, vec!["2101.00001", "2202.00002"]);
        assert_eq!(config.project_dir, PathBuf::from("site/content/project"));
        assert_eq!(config.publication_dir, PathBuf::from("content/publication"));
        assert_eq!(config.listing_url, DEFAULT_LISTING_URL);
    }

    #[test]
    fn test_file_ids_are_cleaned() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("contentsync.toml");
        std::fs::write(&path, "arxiv_ids = [\" 2101.00001 \", \"\", \"  \"]\n").unwrap();

        let config = SyncConfig::load(Some(&path)).unwrap();
        assert_eq!(config.arxiv_ids, vec!["2101.00001"]);
    }

    #[test]
    fn test_missing_file() {
        let err = SyncConfig::load(Some(Path::new("/nonexistent/contentsync.toml"))).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn test_malformed_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "timeout_secs = \"soon\"").unwrap();
        let err = SyncConfig::load(Some(&path)).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_validate_rejects_zero_timeout() {
        let config = SyncConfig {
            timeout_secs: 0,
            ..SyncConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_validate_rejects_empty_dir() {
        let config = SyncConfig {
            publication_dir: PathBuf::new(),
            ..SyncConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
