//! Markdown cell rendering
//!
//! Source text goes through the substitution table, then asset path
//! rewriting, then pulldown-cmark. Raw HTML in the source passes through
//! unchanged, which is what notebooks rely on for sized `<img>` tags.

use crate::options::RenderOptions;
use crate::paths::rewrite_asset_paths;
use crate::substitutions::apply_substitutions;
use pulldown_cmark::{html, Options, Parser};

/// HTML for a markdown cell plus any substitution blocks that follow it
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MarkdownRender {
    /// Rendered cell body
    pub html: String,
    /// Replacement blocks to place immediately after the cell
    pub replacements: Vec<String>,
}

/// Preprocess and render a markdown cell source
#[must_use]
pub fn render_markdown_cell(source: &str, options: &RenderOptions) -> MarkdownRender {
    let outcome = apply_substitutions(source, options);
    let text = rewrite_asset_paths(&outcome.text, options);
    MarkdownRender {
        html: markdown_to_html(&text),
        replacements: outcome.replacements,
    }
}

/// Convert markdown to HTML with raw HTML passthrough
#[must_use]
pub fn markdown_to_html(markdown: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TASKLISTS);
    options.insert(Options::ENABLE_FOOTNOTES);

    let parser = Parser::new_ext(markdown, options);
    let mut output = String::with_capacity(markdown.len() * 3 / 2);
    html::push_html(&mut output, parser);
    output
}
