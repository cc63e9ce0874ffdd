//! Syntax highlighting for code cell sources

use crate::html::{escape_attr, escape_html};
use std::sync::LazyLock;
use syntect::highlighting::{Theme, ThemeSet};
use syntect::html::highlighted_html_for_string;
use syntect::parsing::{SyntaxReference, SyntaxSet};

static SYNTAX_SET: LazyLock<SyntaxSet> = LazyLock::new(SyntaxSet::load_defaults_newlines);
static THEME_SET: LazyLock<ThemeSet> = LazyLock::new(ThemeSet::load_defaults);

/// Highlights code to HTML with a fixed syntect theme
#[derive(Debug, Clone)]
pub struct CodeHighlighter {
    theme: Option<Theme>,
}

impl CodeHighlighter {
    /// Highlighter using the named theme; falls back to plain output if the theme is unknown
    #[must_use]
    pub fn new(theme_name: &str) -> Self {
        let theme = THEME_SET.themes.get(theme_name).cloned();
        if theme.is_none() {
            log::warn!("Unknown highlighting theme '{theme_name}', code cells render unhighlighted");
        }
        Self { theme }
    }

    /// Highlighter that only escapes
    #[inline]
    #[must_use]
    pub const fn plain() -> Self {
        Self { theme: None }
    }

    /// Render `source` as a highlighted `<pre>` block
    ///
    /// `language` is matched against syntect's syntax names, tokens and file
    /// extensions; unknown languages use the plain text syntax.
    #[must_use]
    pub fn highlight(&self, source: &str, language: &str) -> String {
        let Some(theme) = &self.theme else {
            return plain_block(source, language);
        };

        let syntax = find_syntax(language);
        match highlighted_html_for_string(source, &SYNTAX_SET, syntax, theme) {
            Ok(html) => html,
            Err(e) => {
                log::warn!("Highlighting failed for {language} source: {e}");
                plain_block(source, language)
            }
        }
    }
}

fn find_syntax(language: &str) -> &'static SyntaxReference {
    let set: &'static SyntaxSet = &SYNTAX_SET;
    set.find_syntax_by_token(language)
        .or_else(|| set.find_syntax_by_name(language))
        .or_else(|| set.find_syntax_by_extension(&language.to_lowercase()))
        .unwrap_or_else(|| set.find_syntax_plain_text())
}

fn plain_block(source: &str, language: &str) -> String {
    format!(
        "<pre><code class=\"language-{}\">{}</code></pre>",
        escape_attr(&language.to_lowercase()),
        escape_html(source)
    )
}
