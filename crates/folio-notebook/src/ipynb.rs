use crate::error::{LoadError, Result};
use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Parsed Jupyter Notebook content
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Notebook {
    /// Notebook-level metadata
    pub metadata: NotebookMetadata,
    /// Cells in document order
    pub cells: Vec<Cell>,
}

impl Notebook {
    /// Number of code cells in the notebook
    #[must_use]
    pub fn code_cell_count(&self) -> usize {
        self.cells
            .iter()
            .filter(|cell| matches!(cell, Cell::Code(_)))
            .count()
    }

    /// Language used to highlight code cells, `python` when the notebook does not say
    #[must_use]
    pub fn language(&self) -> &str {
        self.metadata.language.as_deref().unwrap_or("python")
    }
}

/// Notebook-level metadata
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NotebookMetadata {
    /// Notebook title if specified
    pub title: Option<String>,
    /// Kernel name (e.g., "python3", "ir")
    pub kernel_name: Option<String>,
    /// Programming language name (e.g., "python", "R")
    pub language: Option<String>,
}

/// Individual notebook cell
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cell {
    /// Markdown documentation cell
    Markdown(MarkdownCell),
    /// Executable code cell
    Code(CodeCell),
    /// Raw text cell (no formatting)
    Raw(RawCell),
}

impl Cell {
    /// Type tag of this cell
    #[inline]
    #[must_use]
    pub const fn cell_type(&self) -> CellType {
        match self {
            Self::Markdown(_) => CellType::Markdown,
            Self::Code(_) => CellType::Code,
            Self::Raw(_) => CellType::Raw,
        }
    }

    /// Cell source text
    #[inline]
    #[must_use]
    pub fn source(&self) -> &str {
        match self {
            Self::Markdown(cell) => &cell.source,
            Self::Code(cell) => &cell.source,
            Self::Raw(cell) => &cell.source,
        }
    }
}

/// Markdown cell with optional inline attachments
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MarkdownCell {
    /// Markdown/HTML source
    pub source: String,
    /// Attachments keyed by the name used in `attachment:<key>` references
    pub attachments: BTreeMap<String, Attachment>,
}

impl MarkdownCell {
    /// Replace every `attachment:<key>` token in the source with a `data:` URI.
    ///
    /// Longer keys are substituted first so that `attachment:plot.png` is not
    /// clobbered by a sibling key named `plot`. Returns the number of keys that
    /// were referenced.
    pub fn inline_attachments(&mut self) -> usize {
        let mut keys: Vec<&String> = self.attachments.keys().collect();
        keys.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));

        let mut replaced = 0;
        for key in keys {
            let token = format!("attachment:{key}");
            if self.source.contains(&token) {
                let uri = self.attachments[key].data_uri();
                self.source = self.source.replace(&token, &uri);
                replaced += 1;
            }
        }
        replaced
    }
}

/// Binary attachment stored inside a markdown cell
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attachment {
    /// MIME type of the payload (e.g., "image/png")
    pub mime_type: String,
    /// Base64 payload
    pub data: String,
}

impl Attachment {
    /// `data:` URI for this attachment
    #[must_use]
    pub fn data_uri(&self) -> String {
        data_uri(&self.mime_type, &self.data)
    }
}

/// Build a base64 `data:` URI, dropping the line breaks nbformat keeps in payloads
#[must_use]
pub fn data_uri(mime_type: &str, payload: &str) -> String {
    let compact: String = payload.split_whitespace().collect();
    format!("data:{mime_type};base64,{compact}")
}

/// Code cell with its outputs
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CodeCell {
    /// Cell source
    pub source: String,
    /// Execution order shown as `In [n]`
    pub execution_count: Option<i64>,
    /// Outputs in source order
    pub outputs: Vec<Output>,
}

/// Raw cell
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawCell {
    /// Cell source
    pub source: String,
}

/// Type of notebook cell
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum CellType {
    /// Executable code cell
    #[default]
    Code,
    /// Markdown documentation cell
    Markdown,
    /// Raw text cell (no formatting)
    Raw,
}

impl std::fmt::Display for CellType {
    #[inline]
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Code => "code",
            Self::Markdown => "markdown",
            Self::Raw => "raw",
        };
        write!(f, "{s}")
    }
}

/// Single output of a code cell
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Output {
    /// stdout/stderr text
    Stream {
        /// Stream name ("stdout" or "stderr")
        name: String,
        /// Stream text
        text: String,
    },
    /// Result of the last expression in a cell
    ExecuteResult {
        /// Execution count recorded on the output itself
        execution_count: Option<i64>,
        /// MIME-keyed payloads
        data: MimeBundle,
    },
    /// Rich display output
    DisplayData {
        /// MIME-keyed payloads
        data: MimeBundle,
    },
    /// Exception raised while executing the cell
    Error {
        /// Exception name
        ename: String,
        /// Exception value
        evalue: String,
        /// Traceback lines, possibly with ANSI colour codes
        traceback: Vec<String>,
    },
}

impl Output {
    /// Type tag of this output
    #[inline]
    #[must_use]
    pub const fn output_type(&self) -> OutputType {
        match self {
            Self::Stream { .. } => OutputType::Stream,
            Self::ExecuteResult { .. } => OutputType::ExecuteResult,
            Self::DisplayData { .. } => OutputType::DisplayData,
            Self::Error { .. } => OutputType::Error,
        }
    }

    /// MIME bundle of rich outputs
    #[inline]
    #[must_use]
    pub const fn data(&self) -> Option<&MimeBundle> {
        match self {
            Self::ExecuteResult { data, .. } | Self::DisplayData { data } => Some(data),
            Self::Stream { .. } | Self::Error { .. } => None,
        }
    }
}

/// Type of cell output
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum OutputType {
    /// Stream output (stdout/stderr)
    #[default]
    Stream,
    /// Rich display data (images, HTML, etc.)
    DisplayData,
    /// Result of code execution
    ExecuteResult,
    /// Error traceback
    Error,
}

impl std::fmt::Display for OutputType {
    #[inline]
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Stream => "stream",
            Self::DisplayData => "display_data",
            Self::ExecuteResult => "execute_result",
            Self::Error => "error",
        };
        write!(f, "{s}")
    }
}

/// MIME type → payload map of a rich output
///
/// Payloads are text: markup for `text/*` and SVG, base64 for binary media.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MimeBundle(BTreeMap<String, String>);

impl MimeBundle {
    /// Create an empty bundle
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Add or replace a payload
    pub fn insert(&mut self, mime_type: impl Into<String>, payload: impl Into<String>) {
        self.0.insert(mime_type.into(), payload.into());
    }

    /// Payload for a MIME type
    #[inline]
    #[must_use]
    pub fn get(&self, mime_type: &str) -> Option<&str> {
        self.0.get(mime_type).map(String::as_str)
    }

    /// Whether a payload for the MIME type is present
    #[inline]
    #[must_use]
    pub fn contains(&self, mime_type: &str) -> bool {
        self.0.contains_key(mime_type)
    }

    /// First MIME type of `preference` present in the bundle, with its payload
    #[must_use]
    pub fn first_of<'p>(&self, preference: &[&'p str]) -> Option<(&'p str, &str)> {
        preference
            .iter()
            .find_map(|&mime| self.get(mime).map(|payload| (mime, payload)))
    }

    /// Whether any MIME type of `mime_types` is present
    #[must_use]
    pub fn contains_any(&self, mime_types: &[&str]) -> bool {
        mime_types.iter().any(|mime| self.contains(mime))
    }

    /// MIME types present in the bundle
    pub fn mime_types(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Number of payloads
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the bundle is empty
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for MimeBundle {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

// nbformat stores multi-line text either as one string or as a list of lines.
#[derive(Deserialize)]
#[serde(untagged)]
enum MultilineString {
    Single(String),
    Lines(Vec<String>),
}

impl MultilineString {
    fn into_string(self) -> String {
        match self {
            Self::Single(s) => s,
            Self::Lines(lines) => lines.concat(),
        }
    }
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct JsonMetadata {
    title: Option<String>,
    kernelspec: Option<JsonKernelspec>,
    language_info: Option<JsonLanguageInfo>,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct JsonKernelspec {
    name: Option<String>,
    language: Option<String>,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct JsonLanguageInfo {
    name: Option<String>,
}

#[derive(Deserialize)]
#[serde(tag = "cell_type", rename_all = "lowercase")]
enum JsonCell {
    Markdown {
        source: MultilineString,
        #[serde(default)]
        attachments: Option<Value>,
    },
    Code {
        source: MultilineString,
        #[serde(default)]
        execution_count: Option<i64>,
        #[serde(default)]
        outputs: Option<Value>,
    },
    Raw {
        source: MultilineString,
    },
}

#[derive(Deserialize)]
#[serde(tag = "output_type", rename_all = "snake_case")]
enum JsonOutput {
    Stream {
        #[serde(default = "default_stream_name")]
        name: String,
        text: MultilineString,
    },
    ExecuteResult {
        #[serde(default)]
        execution_count: Option<i64>,
        data: BTreeMap<String, Value>,
    },
    DisplayData {
        data: BTreeMap<String, Value>,
    },
    Error {
        #[serde(default)]
        ename: String,
        #[serde(default)]
        evalue: String,
        #[serde(default)]
        traceback: Vec<String>,
    },
}

fn default_stream_name() -> String {
    "stdout".to_string()
}

/// Parse a Jupyter Notebook from a file path
///
/// # Errors
///
/// Returns an error if:
/// - The file cannot be read (I/O error)
/// - The notebook JSON is malformed
pub fn parse_notebook<P: AsRef<Path>>(path: P) -> Result<Notebook> {
    let content = fs::read_to_string(path)?;
    parse_notebook_from_str(&content)
}

/// Parse a Jupyter Notebook from a string
///
/// Cells and outputs that do not have the expected shape are skipped; only a
/// document that is not JSON, or not an object with a `cells` array, fails.
/// Markdown attachments are inlined before the notebook is returned.
///
/// # Errors
///
/// Returns [`LoadError::Json`] for invalid JSON and
/// [`LoadError::InvalidFormat`] when the top-level shape is wrong.
pub fn parse_notebook_from_str(content: &str) -> Result<Notebook> {
    let value: Value = serde_json::from_str(content)?;

    let Some(root) = value.as_object() else {
        return Err(LoadError::InvalidFormat(
            "top-level value is not an object".to_string(),
        ));
    };
    let Some(raw_cells) = root.get("cells").and_then(Value::as_array) else {
        return Err(LoadError::InvalidFormat(
            "missing `cells` array".to_string(),
        ));
    };

    let metadata = root
        .get("metadata")
        .map(extract_metadata)
        .unwrap_or_default();

    let cells = raw_cells
        .iter()
        .enumerate()
        .filter_map(|(index, raw)| extract_cell(index, raw))
        .collect();

    Ok(Notebook { metadata, cells })
}

fn extract_metadata(value: &Value) -> NotebookMetadata {
    let raw = match JsonMetadata::deserialize(value) {
        Ok(raw) => raw,
        Err(e) => {
            log::warn!("Ignoring malformed notebook metadata: {e}");
            return NotebookMetadata::default();
        }
    };

    let kernel_language = raw.kernelspec.as_ref().and_then(|ks| ks.language.clone());
    let language = raw
        .language_info
        .and_then(|li| li.name)
        .or(kernel_language);

    NotebookMetadata {
        title: raw.title,
        kernel_name: raw.kernelspec.and_then(|ks| ks.name),
        language,
    }
}

fn extract_cell(index: usize, value: &Value) -> Option<Cell> {
    let raw = match JsonCell::deserialize(value) {
        Ok(raw) => raw,
        Err(e) => {
            log::warn!("Skipping malformed cell {index}: {e}");
            return None;
        }
    };

    let cell = match raw {
        JsonCell::Markdown {
            source,
            attachments,
        } => {
            let attachments: BTreeMap<String, Attachment> = attachments
                .as_ref()
                .and_then(Value::as_object)
                .map(|entries| {
                    entries
                        .iter()
                        .filter_map(|(key, bundle)| extract_attachment(index, key, bundle))
                        .collect()
                })
                .unwrap_or_default();
            let mut cell = MarkdownCell {
                source: source.into_string(),
                attachments,
            };
            cell.inline_attachments();
            Cell::Markdown(cell)
        }
        JsonCell::Code {
            source,
            execution_count,
            outputs,
        } => Cell::Code(CodeCell {
            source: source.into_string(),
            execution_count,
            outputs: outputs
                .as_ref()
                .and_then(Value::as_array)
                .map(|raw_outputs| {
                    raw_outputs
                        .iter()
                        .enumerate()
                        .filter_map(|(output_index, raw)| {
                            extract_output(index, output_index, raw)
                        })
                        .collect()
                })
                .unwrap_or_default(),
        }),
        JsonCell::Raw { source } => Cell::Raw(RawCell {
            source: source.into_string(),
        }),
    };

    Some(cell)
}

/// First MIME entry of an attachment bundle whose payload is text
fn extract_attachment(
    cell_index: usize,
    key: &str,
    bundle: &Value,
) -> Option<(String, Attachment)> {
    let attachment = bundle.as_object().and_then(|entries| {
        entries.iter().find_map(|(mime_type, payload)| {
            let data = MultilineString::deserialize(payload).ok()?;
            Some(Attachment {
                mime_type: mime_type.clone(),
                data: data.into_string(),
            })
        })
    });
    if attachment.is_none() {
        log::warn!("Skipping malformed attachment '{key}' of cell {cell_index}");
    }
    attachment.map(|attachment| (key.to_string(), attachment))
}

fn extract_output(cell_index: usize, output_index: usize, value: &Value) -> Option<Output> {
    let raw = match JsonOutput::deserialize(value) {
        Ok(raw) => raw,
        Err(e) => {
            log::warn!("Skipping malformed output {output_index} of cell {cell_index}: {e}");
            return None;
        }
    };

    let output = match raw {
        JsonOutput::Stream { name, text } => Output::Stream {
            name,
            text: text.into_string(),
        },
        JsonOutput::ExecuteResult {
            execution_count,
            data,
        } => Output::ExecuteResult {
            execution_count,
            data: mime_bundle(data),
        },
        JsonOutput::DisplayData { data } => Output::DisplayData {
            data: mime_bundle(data),
        },
        JsonOutput::Error {
            ename,
            evalue,
            traceback,
        } => Output::Error {
            ename,
            evalue,
            traceback,
        },
    };

    Some(output)
}

fn mime_bundle(data: BTreeMap<String, Value>) -> MimeBundle {
    data.into_iter()
        .map(|(mime, value)| (mime, payload_text(value)))
        .collect()
}

/// Strings pass through, line lists are joined, anything else (e.g. `application/json`)
/// keeps its compact JSON text.
fn payload_text(value: Value) -> String {
    match value {
        Value::String(s) => s,
        Value::Array(items) if items.iter().all(Value::is_string) => items
            .iter()
            .filter_map(Value::as_str)
            .collect::<Vec<_>>()
            .concat(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_notebook() {
        let notebook_json = r##"{
            "nbformat": 4,
            "nbformat_minor": 5,
            "metadata": {
                "kernelspec": {
                    "name": "python3",
                    "display_name": "Python 3"
                },
                "language_info": {
                    "name": "python",
                    "version": "3.9.0"
                }
            },
            "cells": [
                {
                    "cell_type": "markdown",
                    "metadata": {},
                    "source": ["# Hello World\n", "This is a test notebook."]
                },
                {
                    "cell_type": "code",
                    "metadata": {},
                    "execution_count": 1,
                    "source": ["print(\"Hello, World!\")"],
                    "outputs": [
                        {
                            "output_type": "stream",
                            "name": "stdout",
                            "text": ["Hello, World!\n"]
                        }
                    ]
                }
            ]
        }"##;

        let notebook = parse_notebook_from_str(notebook_json).expect("valid notebook");
        assert_eq!(notebook.cells.len(), 2);
        assert_eq!(notebook.cells[0].cell_type(), CellType::Markdown);
        assert_eq!(
            notebook.cells[0].source(),
            "# Hello World\nThis is a test notebook."
        );
        assert_eq!(notebook.cells[1].cell_type(), CellType::Code);
        assert_eq!(notebook.metadata.kernel_name, Some("python3".to_string()));
        assert_eq!(notebook.language(), "python");

        let Cell::Code(code) = &notebook.cells[1] else {
            panic!("expected code cell");
        };
        assert_eq!(code.execution_count, Some(1));
        assert_eq!(
            code.outputs,
            vec![Output::Stream {
                name: "stdout".to_string(),
                text: "Hello, World!\n".to_string()
            }]
        );
    }

    #[test]
    fn test_extract_execute_result_bundle() {
        let notebook_json = r#"{
            "cells": [
                {
                    "cell_type": "code",
                    "execution_count": 3,
                    "source": "df.head()",
                    "outputs": [
                        {
                            "output_type": "execute_result",
                            "execution_count": 3,
                            "data": {
                                "text/plain": ["   a  b\n", "0  1  2"],
                                "text/html": "<table></table>",
                                "application/json": {"a": 1}
                            },
                            "metadata": {}
                        }
                    ]
                }
            ]
        }"#;

        let notebook = parse_notebook_from_str(notebook_json).unwrap();
        let Cell::Code(code) = &notebook.cells[0] else {
            panic!("expected code cell");
        };
        let data = code.outputs[0].data().unwrap();
        assert_eq!(code.outputs[0].output_type(), OutputType::ExecuteResult);
        assert_eq!(data.get("text/plain"), Some("   a  b\n0  1  2"));
        assert_eq!(data.get("text/html"), Some("<table></table>"));
        assert_eq!(data.get("application/json"), Some(r#"{"a":1}"#));
    }

    #[test]
    fn test_error_output() {
        let notebook_json = r#"{
            "cells": [
                {
                    "cell_type": "code",
                    "execution_count": 1,
                    "source": ["1 / 0"],
                    "outputs": [
                        {
                            "output_type": "error",
                            "ename": "ZeroDivisionError",
                            "evalue": "division by zero",
                            "traceback": [
                                "Traceback (most recent call last):",
                                "ZeroDivisionError: division by zero"
                            ]
                        }
                    ]
                }
            ]
        }"#;

        let notebook = parse_notebook_from_str(notebook_json).unwrap();
        let Cell::Code(code) = &notebook.cells[0] else {
            panic!("expected code cell");
        };
        assert_eq!(code.outputs[0].output_type(), OutputType::Error);
        assert!(code.outputs[0].data().is_none());
    }

    #[test]
    fn test_code_cell_without_outputs() {
        let notebook = parse_notebook_from_str(
            r#"{"cells": [{"cell_type": "code", "source": "x = 1"}]}"#,
        )
        .unwrap();

        let Cell::Code(code) = &notebook.cells[0] else {
            panic!("expected code cell");
        };
        assert!(code.outputs.is_empty());
        assert_eq!(code.execution_count, None);
    }

    #[test]
    fn test_malformed_cells_and_outputs_are_skipped() {
        let notebook_json = r#"{
            "cells": [
                {"source": "no cell type"},
                {"cell_type": "widget", "source": "unknown type"},
                {"cell_type": "markdown"},
                {
                    "cell_type": "code",
                    "source": "print(1)",
                    "outputs": [
                        {"name": "stdout", "text": "missing output_type"},
                        {"output_type": "stream", "name": "stdout"},
                        {"output_type": "display_data", "metadata": {}},
                        {"output_type": "stream", "name": "stdout", "text": "1\n"}
                    ]
                },
                {"cell_type": "raw", "source": "kept"}
            ]
        }"#;

        let notebook = parse_notebook_from_str(notebook_json).unwrap();
        assert_eq!(notebook.cells.len(), 2);
        let Cell::Code(code) = &notebook.cells[0] else {
            panic!("expected code cell");
        };
        assert_eq!(code.outputs.len(), 1);
        assert_eq!(notebook.cells[1].cell_type(), CellType::Raw);
    }

    #[test]
    fn test_bad_attachment_keeps_markdown_cell() {
        let notebook = parse_notebook_from_str(
            r#"{"cells": [{
                "cell_type": "markdown",
                "source": "Important prose ![x](attachment:a) ![y](attachment:b)",
                "attachments": {"a": {"image/png": 123}, "b": {"image/png": "R0lG"}}
            }]}"#,
        )
        .unwrap();

        assert_eq!(notebook.cells.len(), 1);
        let Cell::Markdown(markdown) = &notebook.cells[0] else {
            panic!("expected markdown cell");
        };
        assert_eq!(markdown.attachments.len(), 1);
        assert_eq!(
            markdown.source,
            "Important prose ![x](attachment:a) ![y](data:image/png;base64,R0lG)"
        );
    }

    #[test]
    fn test_non_object_attachments_are_ignored() {
        let notebook = parse_notebook_from_str(
            r#"{"cells": [{"cell_type": "markdown", "source": "text", "attachments": null}]}"#,
        )
        .unwrap();
        assert_eq!(notebook.cells[0].source(), "text");
    }

    #[test]
    fn test_null_or_non_array_outputs_render_as_empty() {
        let notebook = parse_notebook_from_str(
            r#"{"cells": [
                {"cell_type": "code", "source": "x=1", "outputs": null},
                {"cell_type": "code", "source": "y=2", "outputs": {"oops": true}}
            ]}"#,
        )
        .unwrap();

        assert_eq!(notebook.cells.len(), 2);
        for cell in &notebook.cells {
            let Cell::Code(code) = cell else {
                panic!("expected code cell");
            };
            assert!(code.outputs.is_empty());
        }
        assert_eq!(notebook.cells[0].source(), "x=1");
    }

    #[test]
    fn test_top_level_shape_errors() {
        assert!(matches!(
            parse_notebook_from_str("not json"),
            Err(LoadError::Json(_))
        ));
        assert!(matches!(
            parse_notebook_from_str("[1, 2]"),
            Err(LoadError::InvalidFormat(_))
        ));
        assert!(matches!(
            parse_notebook_from_str(r#"{"metadata": {}}"#),
            Err(LoadError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_attachments_are_inlined() {
        let notebook_json = r#"{
            "cells": [
                {
                    "cell_type": "markdown",
                    "source": ["![chart](attachment:chart.png)\n", "<img src=\"attachment:chart\">"],
                    "attachments": {
                        "chart.png": {"image/png": "iVBORw0KGgo=\n"},
                        "chart": {"image/jpeg": "/9j/4AAQ"}
                    }
                }
            ]
        }"#;

        let notebook = parse_notebook_from_str(notebook_json).unwrap();
        assert_eq!(
            notebook.cells[0].source(),
            "![chart](data:image/png;base64,iVBORw0KGgo=)\n<img src=\"data:image/jpeg;base64,/9j/4AAQ\">"
        );
    }

    #[test]
    fn test_language_falls_back_to_kernelspec() {
        let notebook = parse_notebook_from_str(
            r#"{"metadata": {"kernelspec": {"name": "ir", "language": "R"}}, "cells": []}"#,
        )
        .unwrap();
        assert_eq!(notebook.language(), "R");
        assert_eq!(notebook.code_cell_count(), 0);
    }

    #[test]
    fn test_output_type_display() {
        assert_eq!(format!("{}", OutputType::Stream), "stream");
        assert_eq!(format!("{}", OutputType::DisplayData), "display_data");
        assert_eq!(format!("{}", OutputType::ExecuteResult), "execute_result");
        assert_eq!(format!("{}", OutputType::Error), "error");
    }

    #[test]
    fn test_mime_bundle_preference() {
        let bundle: MimeBundle = [("image/gif", "R0lG"), ("image/jpeg", "/9j/")]
            .into_iter()
            .collect();
        assert_eq!(
            bundle.first_of(&["image/png", "image/jpeg", "image/gif"]),
            Some(("image/jpeg", "/9j/"))
        );
        assert!(bundle.first_of(&["text/plain"]).is_none());
        assert!(bundle.contains_any(&["text/plain", "image/gif"]));
    }
}
