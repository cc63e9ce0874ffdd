//! Notebook → display blocks

use crate::dispatch::{dispatch, OutputBody};
use crate::highlight::CodeHighlighter;
use crate::html::escape_html;
use crate::markdown::render_markdown_cell;
use crate::options::RenderOptions;
use folio_notebook::{Cell, CodeCell, Notebook, Output};
use regex::Regex;
use std::fmt::Write;
use std::sync::LazyLock;

static RE_ANSI_ESCAPE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\x1b\[[0-9;]*[A-Za-z]").expect("regex is compile-time constant")
});

/// Top-level display block
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    /// Rendered markdown cell
    Markdown {
        /// Cell HTML
        html: String,
    },
    /// Hand-authored replacement placed after a markdown cell
    Substitution {
        /// Replacement HTML
        html: String,
    },
    /// Code cell with its outputs
    Code(CodeBlock),
    /// Raw cell text
    Raw {
        /// Unformatted text
        text: String,
    },
}

impl Block {
    /// HTML markup for this block
    #[must_use]
    pub fn to_html(&self) -> String {
        match self {
            Self::Markdown { html } => {
                format!("<section class=\"nb-cell nb-markdown\">{html}</section>")
            }
            Self::Substitution { html } => {
                format!("<section class=\"nb-cell nb-substitution-block\">{html}</section>")
            }
            Self::Code(code) => code.to_html(),
            Self::Raw { text } => format!(
                "<section class=\"nb-cell nb-raw\"><pre>{}</pre></section>",
                escape_html(text)
            ),
        }
    }
}

/// Rendered code cell
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeBlock {
    /// Execution order, shown as `In [n]`
    pub execution_count: Option<i64>,
    /// Highlighted source
    pub source_html: String,
    /// Rendered outputs in source order; skipped outputs are absent
    pub outputs: Vec<RenderedOutput>,
}

impl CodeBlock {
    /// HTML markup for the cell and its outputs
    #[must_use]
    pub fn to_html(&self) -> String {
        let mut html = String::new();
        let _ = write!(
            html,
            "<section class=\"nb-cell nb-code\">\
             <div class=\"nb-input\"><div class=\"nb-prompt\">{}</div>\
             <div class=\"nb-source\">{}</div></div>",
            prompt("In", self.execution_count),
            self.source_html
        );
        for output in &self.outputs {
            html.push_str(&output.to_html());
        }
        html.push_str("</section>");
        html
    }
}

/// One rendered output framed with the cell's `Out [n]` label
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedOutput {
    /// Execution order of the originating cell
    pub execution_count: Option<i64>,
    /// Chosen representation
    pub body: OutputBody,
}

impl RenderedOutput {
    /// HTML markup including the `Out [n]` frame
    #[must_use]
    pub fn to_html(&self) -> String {
        format!(
            "<div class=\"nb-output\"><div class=\"nb-prompt\">{}</div>\
             <div class=\"nb-output-body\">{}</div></div>",
            prompt("Out", self.execution_count),
            self.body.to_html()
        )
    }
}

/// Rendered notebook: blocks in document order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderedNotebook {
    /// Title from notebook metadata, if any
    pub title: Option<String>,
    /// Display blocks
    pub blocks: Vec<Block>,
}

impl RenderedNotebook {
    /// Concatenated block HTML (no page chrome)
    #[must_use]
    pub fn to_html(&self) -> String {
        self.blocks.iter().map(Block::to_html).collect()
    }
}

/// Renders notebooks to display blocks
#[derive(Debug, Clone)]
pub struct Renderer {
    options: RenderOptions,
    highlighter: CodeHighlighter,
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new(RenderOptions::default())
    }
}

impl Renderer {
    /// Create a renderer
    #[must_use]
    pub fn new(options: RenderOptions) -> Self {
        let highlighter = if options.highlight {
            CodeHighlighter::new(&options.theme)
        } else {
            CodeHighlighter::plain()
        };
        Self {
            options,
            highlighter,
        }
    }

    /// Options in effect
    #[inline]
    #[must_use]
    pub const fn options(&self) -> &RenderOptions {
        &self.options
    }

    /// Render every cell in order
    ///
    /// Produces one block per cell. A markdown cell that hit the substitution
    /// table is followed by one replacement block per matching table row, so a
    /// cell mentioning both the diagram and the graph marker gets two.
    #[must_use]
    pub fn render(&self, notebook: &Notebook) -> RenderedNotebook {
        let language = notebook.language();
        let mut blocks = Vec::with_capacity(notebook.cells.len());

        for cell in &notebook.cells {
            match cell {
                Cell::Markdown(markdown) => {
                    let rendered = render_markdown_cell(&markdown.source, &self.options);
                    blocks.push(Block::Markdown {
                        html: rendered.html,
                    });
                    blocks.extend(
                        rendered
                            .replacements
                            .into_iter()
                            .map(|html| Block::Substitution { html }),
                    );
                }
                Cell::Code(code) => blocks.push(Block::Code(self.render_code(code, language))),
                Cell::Raw(raw) => blocks.push(Block::Raw {
                    text: raw.source.clone(),
                }),
            }
        }

        RenderedNotebook {
            title: notebook.metadata.title.clone(),
            blocks,
        }
    }

    fn render_code(&self, cell: &CodeCell, language: &str) -> CodeBlock {
        CodeBlock {
            execution_count: cell.execution_count,
            source_html: self.highlighter.highlight(&cell.source, language),
            outputs: cell
                .outputs
                .iter()
                .filter_map(|output| self.render_output(output, cell.execution_count))
                .collect(),
        }
    }

    /// Render one output; `None` when nothing in it is renderable
    #[must_use]
    pub fn render_output(
        &self,
        output: &Output,
        execution_count: Option<i64>,
    ) -> Option<RenderedOutput> {
        let body = match output {
            Output::Stream { text, .. } => OutputBody::Text(text.clone()),
            Output::ExecuteResult { data, .. } | Output::DisplayData { data } => {
                dispatch(data, &self.options)?
            }
            Output::Error {
                ename,
                evalue,
                traceback,
            } => OutputBody::Traceback(format_traceback(ename, evalue, traceback)),
        };
        Some(RenderedOutput {
            execution_count,
            body,
        })
    }
}

fn prompt(label: &str, execution_count: Option<i64>) -> String {
    match execution_count {
        Some(n) => format!("{label} [{n}]:"),
        None => format!("{label} [ ]:"),
    }
}

fn format_traceback(ename: &str, evalue: &str, traceback: &[String]) -> String {
    if traceback.is_empty() {
        return format!("{ename}: {evalue}");
    }
    RE_ANSI_ESCAPE
        .replace_all(&traceback.join("\n"), "")
        .into_owned()
}
