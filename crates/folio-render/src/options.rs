//! Renderer options

/// Default root for notebook images on the static asset host
pub const DEFAULT_ASSET_PREFIX: &str = "/notebooks/images";

/// Default clip shown in place of embedded video players
pub const DEFAULT_VIDEO_PLACEHOLDER_URL: &str = "/notebooks/media/video-placeholder.mp4";

/// Default syntect theme for code cells
pub const DEFAULT_THEME: &str = "InspiredGitHub";

/// Options for notebook rendering
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    /// Prefix that `images/...` references and stray absolute paths are re-rooted under
    pub asset_prefix: String,

    /// Source of the `<video>` that replaces outputs embedding a video player
    pub video_placeholder_url: String,

    /// Highlight code cell sources (plain escaped `<pre>` when disabled)
    pub highlight: bool,

    /// Name of the syntect theme used for highlighting
    pub theme: String,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            asset_prefix: DEFAULT_ASSET_PREFIX.to_string(),
            video_placeholder_url: DEFAULT_VIDEO_PLACEHOLDER_URL.to_string(),
            highlight: true,
            theme: DEFAULT_THEME.to_string(),
        }
    }
}

impl RenderOptions {
    /// Create options with a different asset prefix (trailing `/` is dropped)
    #[must_use = "returns options with the asset prefix configured"]
    pub fn with_asset_prefix(mut self, prefix: impl Into<String>) -> Self {
        let prefix = prefix.into();
        self.asset_prefix = prefix.trim_end_matches('/').to_string();
        self
    }

    /// Create options with a different video placeholder
    #[must_use = "returns options with the video placeholder configured"]
    pub fn with_video_placeholder(mut self, url: impl Into<String>) -> Self {
        self.video_placeholder_url = url.into();
        self
    }

    /// Create options with highlighting enabled or disabled
    #[inline]
    #[must_use = "returns options with the highlight setting configured"]
    pub const fn with_highlight(mut self, enable: bool) -> Self {
        self.highlight = enable;
        self
    }

    /// Create options with a different highlighting theme
    #[must_use = "returns options with the theme configured"]
    pub fn with_theme(mut self, theme: impl Into<String>) -> Self {
        self.theme = theme.into();
        self
    }

    /// Asset URL for a bare filename
    #[must_use]
    pub fn asset_url(&self, filename: &str) -> String {
        format!("{}/{}", self.asset_prefix, filename.trim_start_matches('/'))
    }
}
