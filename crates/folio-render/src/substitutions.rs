//! Hand-authored replacements for notebook assets known to be unrenderable
//!
//! Whether an asset is broken cannot be detected without loading it, so this
//! is a fixed table keyed by content markers. Each entry removes the broken
//! reference from the markdown text and contributes a replacement block that
//! is rendered right after the cell. Any new broken asset needs a new entry.

use crate::html::escape_attr;
use crate::options::RenderOptions;
use regex::Regex;

/// One row of the substitution table
#[derive(Clone, Copy)]
pub struct Substitution {
    /// Short identifier used in logs
    pub name: &'static str,
    /// Content marker whose presence triggers the substitution
    pub marker: &'static str,
    /// Predicate over the markdown text
    pub matches: fn(&str) -> bool,
    /// Builds the replacement block markup
    pub build: fn(&RenderOptions) -> String,
}

impl std::fmt::Debug for Substitution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Substitution")
            .field("name", &self.name)
            .field("marker", &self.marker)
            .finish_non_exhaustive()
    }
}

/// Result of applying the table to one markdown cell
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubstitutionOutcome {
    /// Markdown text with broken references removed
    pub text: String,
    /// Replacement blocks, in table order
    pub replacements: Vec<String>,
}

const DIAGRAM_MARKER: &str = "model_architecture.drawio";
const GRAPH_MARKER: &str = "network_graph.png";

/// Substitutions, evaluated in order
pub static SUBSTITUTIONS: &[Substitution] = &[
    Substitution {
        name: "architecture-diagram",
        marker: DIAGRAM_MARKER,
        matches: mentions_diagram,
        build: architecture_diagram,
    },
    Substitution {
        name: "network-graph",
        marker: GRAPH_MARKER,
        matches: mentions_graph,
        build: network_graph_placeholder,
    },
];

/// Run the substitution table over a markdown cell's text
#[must_use]
pub fn apply_substitutions(text: &str, options: &RenderOptions) -> SubstitutionOutcome {
    let mut outcome = SubstitutionOutcome {
        text: text.to_string(),
        replacements: Vec::new(),
    };

    for substitution in SUBSTITUTIONS {
        if !(substitution.matches)(&outcome.text) {
            continue;
        }
        log::debug!("Applying substitution '{}'", substitution.name);
        outcome.text = strip_reference(&outcome.text, substitution.marker);
        outcome.replacements.push((substitution.build)(options));
    }

    outcome
}

/// Remove markdown images, `<img>` tags and links that mention `marker`,
/// then any bare mention left over.
fn strip_reference(text: &str, marker: &str) -> String {
    let marker = regex::escape(marker);
    let patterns = [
        format!(r"!\[[^\]]*\]\([^)]*{marker}[^)]*\)"),
        format!(r"(?i)<img\b[^>]*{marker}[^>]*>"),
        format!(r"\[[^\]]*\]\([^)]*{marker}[^)]*\)"),
        marker,
    ];

    patterns.iter().fold(text.to_string(), |acc, pattern| {
        match Regex::new(pattern) {
            Ok(re) => re.replace_all(&acc, "").into_owned(),
            Err(e) => {
                log::warn!("Invalid substitution pattern {pattern}: {e}");
                acc
            }
        }
    })
}

fn mentions_diagram(text: &str) -> bool {
    text.contains(DIAGRAM_MARKER)
}

fn mentions_graph(text: &str) -> bool {
    text.contains(GRAPH_MARKER)
}

fn architecture_diagram(options: &RenderOptions) -> String {
    let src = escape_attr(&options.asset_url("model_architecture.png"));
    format!(
        "<figure class=\"nb-substitution\">\
         <img src=\"{src}\" alt=\"Model architecture diagram\" loading=\"lazy\">\
         <figcaption>Model architecture diagram</figcaption>\
         </figure>"
    )
}

fn network_graph_placeholder(_options: &RenderOptions) -> String {
    concat!(
        "<figure class=\"nb-substitution\">",
        "<svg xmlns=\"http://www.w3.org/2000/svg\" viewBox=\"0 0 240 140\" width=\"240\" height=\"140\" role=\"img\" aria-label=\"Network graph\">",
        "<g stroke=\"#94a3b8\" stroke-width=\"2\">",
        "<line x1=\"40\" y1=\"70\" x2=\"120\" y2=\"30\"/>",
        "<line x1=\"40\" y1=\"70\" x2=\"120\" y2=\"110\"/>",
        "<line x1=\"120\" y1=\"30\" x2=\"200\" y2=\"70\"/>",
        "<line x1=\"120\" y1=\"110\" x2=\"200\" y2=\"70\"/>",
        "<line x1=\"120\" y1=\"30\" x2=\"120\" y2=\"110\"/>",
        "</g>",
        "<g fill=\"#2563eb\">",
        "<circle cx=\"40\" cy=\"70\" r=\"10\"/>",
        "<circle cx=\"120\" cy=\"30\" r=\"10\"/>",
        "<circle cx=\"120\" cy=\"110\" r=\"10\"/>",
        "<circle cx=\"200\" cy=\"70\" r=\"10\"/>",
        "</g>",
        "</svg>",
        "<figcaption>Network graph (illustrative; the original figure is not available)</figcaption>",
        "</figure>"
    )
    .to_string()
}
