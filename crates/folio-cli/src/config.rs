//! Layered `.folio.toml` configuration
//!
//! Precedence order (highest to lowest):
//! 1. Command-line arguments (`--asset-prefix`, `--timeout`, ...)
//! 2. Project config (`./.folio.toml`)
//! 3. User config (`~/.folio.toml`)
//! 4. Built-in defaults

use folio_notebook::LoadOptions;
use folio_render::RenderOptions;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Configuration file name, looked up in the working directory and the home directory
pub const CONFIG_FILE_NAME: &str = ".folio.toml";

/// Root that relative catalog URLs are joined onto
pub const DEFAULT_DOCUMENT_ROOT: &str = "https://folio-rs.github.io";

/// Commented template written by `folio config init`
pub const CONFIG_TEMPLATE: &str = r#"# Folio configuration file

# Rendering defaults
[render]
# Prefix that images/... references are re-rooted under
# asset_prefix = "/notebooks/images"

# Clip shown in place of outputs that embedded a video player
# video_placeholder_url = "/notebooks/media/video-placeholder.mp4"

# Syntax highlighting for code cells
# highlight = true
# theme = "InspiredGitHub"

# Document fetching
[fetch]
# Request timeout in seconds (unset = wait indefinitely)
# timeout_secs = 30

# Root that relative catalog URLs are joined onto (URL or local directory)
# document_root = "https://folio-rs.github.io"

# Catalog entries: add new slugs or override built-in ones
# [notebooks.my-analysis]
# title = "My Analysis"
# url = "notebooks/my_analysis.ipynb"
"#;

/// Error reading a configuration file
#[derive(Error, Debug)]
pub enum ConfigError {
    /// File could not be read
    #[error("Failed to read config file {path}: {source}")]
    Io {
        /// Config file path
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// File is not valid TOML or has unexpected fields
    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        /// Config file path
        path: PathBuf,
        /// TOML error with line/column information
        #[source]
        source: toml::de::Error,
    },
}

/// Effective configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// Rendering defaults
    #[serde(skip_serializing_if = "Option::is_none")]
    pub render: Option<RenderConfig>,

    /// Fetch defaults
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fetch: Option<FetchConfig>,

    /// Catalog additions and overrides, keyed by slug
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notebooks: Option<BTreeMap<String, NotebookConfig>>,
}

/// `[render]` section
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Image asset prefix
    #[serde(skip_serializing_if = "Option::is_none")]
    pub asset_prefix: Option<String>,

    /// Placeholder clip URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video_placeholder_url: Option<String>,

    /// Highlight code cells
    #[serde(skip_serializing_if = "Option::is_none")]
    pub highlight: Option<bool>,

    /// Highlighting theme name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub theme: Option<String>,
}

/// `[fetch]` section
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    /// Request timeout in seconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,

    /// Root for relative catalog URLs
    #[serde(skip_serializing_if = "Option::is_none")]
    pub document_root: Option<String>,
}

/// `[notebooks.<slug>]` section
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NotebookConfig {
    /// Display title
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Document URL or path
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl Config {
    /// Load configuration from file
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file cannot be read or parsed.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// `~/.folio.toml`, if a home directory is known
    #[must_use]
    pub fn user_config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(CONFIG_FILE_NAME))
    }

    /// `./.folio.toml`
    #[must_use]
    pub fn project_config_path() -> PathBuf {
        PathBuf::from(CONFIG_FILE_NAME)
    }

    /// Find and load configuration files
    /// Returns (`user_config`, `project_config`)
    #[must_use]
    pub fn discover_configs() -> (Option<Self>, Option<Self>) {
        let user_config = Self::user_config_path().and_then(|path| Self::load_optional(&path));
        let project_config = Self::load_optional(&Self::project_config_path());
        (user_config, project_config)
    }

    /// Discover and merge in one step
    #[must_use]
    pub fn discover() -> Self {
        let (user_config, project_config) = Self::discover_configs();
        Self::merge(user_config, project_config)
    }

    fn load_optional(path: &Path) -> Option<Self> {
        if !path.exists() {
            return None;
        }
        match Self::load_from_file(path) {
            Ok(config) => {
                log::debug!("Loaded config from {}", path.display());
                Some(config)
            }
            Err(e) => {
                log::warn!("Ignoring config file: {e}");
                None
            }
        }
    }

    /// Merge configs with precedence project > user > defaults
    ///
    /// Fields merge one by one; a project value replaces the user value only
    /// where the project sets it. Catalog entries merge per slug.
    #[must_use]
    pub fn merge(user_config: Option<Self>, project_config: Option<Self>) -> Self {
        let mut merged = user_config.unwrap_or_default();

        let Some(project) = project_config else {
            return merged;
        };

        if let Some(render) = project.render {
            let merged_render = merged.render.get_or_insert_with(RenderConfig::default);
            if let Some(asset_prefix) = render.asset_prefix {
                merged_render.asset_prefix = Some(asset_prefix);
            }
            if let Some(url) = render.video_placeholder_url {
                merged_render.video_placeholder_url = Some(url);
            }
            if let Some(highlight) = render.highlight {
                merged_render.highlight = Some(highlight);
            }
            if let Some(theme) = render.theme {
                merged_render.theme = Some(theme);
            }
        }

        if let Some(fetch) = project.fetch {
            let merged_fetch = merged.fetch.get_or_insert_with(FetchConfig::default);
            if let Some(timeout_secs) = fetch.timeout_secs {
                merged_fetch.timeout_secs = Some(timeout_secs);
            }
            if let Some(document_root) = fetch.document_root {
                merged_fetch.document_root = Some(document_root);
            }
        }

        if let Some(notebooks) = project.notebooks {
            let merged_notebooks = merged.notebooks.get_or_insert_with(BTreeMap::new);
            for (slug, entry) in notebooks {
                let merged_entry = merged_notebooks.entry(slug).or_default();
                if let Some(title) = entry.title {
                    merged_entry.title = Some(title);
                }
                if let Some(url) = entry.url {
                    merged_entry.url = Some(url);
                }
            }
        }

        merged
    }

    /// Renderer options from the `[render]` section over the defaults
    #[must_use]
    pub fn render_options(&self) -> RenderOptions {
        let mut options = RenderOptions::default();
        let Some(render) = &self.render else {
            return options;
        };
        if let Some(prefix) = &render.asset_prefix {
            options = options.with_asset_prefix(prefix.as_str());
        }
        if let Some(url) = &render.video_placeholder_url {
            options = options.with_video_placeholder(url.as_str());
        }
        if let Some(highlight) = render.highlight {
            options = options.with_highlight(highlight);
        }
        if let Some(theme) = &render.theme {
            options = options.with_theme(theme.as_str());
        }
        options
    }

    /// Load options from the `[fetch]` section
    #[must_use]
    pub fn load_options(&self) -> LoadOptions {
        let timeout = self
            .fetch
            .as_ref()
            .and_then(|fetch| fetch.timeout_secs)
            .map(Duration::from_secs);
        LoadOptions::default().with_timeout(timeout)
    }

    /// Root for relative catalog URLs
    #[must_use]
    pub fn document_root(&self) -> &str {
        self.fetch
            .as_ref()
            .and_then(|fetch| fetch.document_root.as_deref())
            .unwrap_or(DEFAULT_DOCUMENT_ROOT)
    }
}
