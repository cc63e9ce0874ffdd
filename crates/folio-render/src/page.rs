//! Standalone HTML pages: rendered notebook, load error, not found

use crate::html::escape_html;
use crate::renderer::RenderedNotebook;
use folio_notebook::LoadError;

const STYLESHEET: &str = "\
body{margin:0 auto;max-width:960px;padding:2rem 1rem;font-family:system-ui,sans-serif;line-height:1.55;color:#1f2933}\
.nb-cell{margin:1.25rem 0}\
.nb-input,.nb-output{display:flex;gap:.75rem}\
.nb-prompt{flex:0 0 5.5rem;text-align:right;font-family:ui-monospace,monospace;font-size:.8rem;color:#64748b;padding-top:.4rem}\
.nb-source,.nb-output-body{flex:1;min-width:0;overflow-x:auto}\
.nb-source pre{margin:0;padding:.5rem .75rem;border-radius:6px;border:1px solid #e2e8f0}\
.nb-output .nb-prompt{color:#b45309}\
pre.nb-text,pre.nb-error{margin:0;padding:.4rem .75rem;white-space:pre-wrap}\
pre.nb-error{background:#fef2f2;color:#991b1b}\
.nb-output-body img,.nb-output-body video,.nb-markdown img,.nb-substitution img{max-width:100%}\
figure{margin:1rem 0}figcaption{font-size:.85rem;color:#64748b}\
.nb-load-error{padding:1rem 1.25rem;border:1px solid #fecaca;background:#fef2f2;border-radius:6px;color:#991b1b}";

/// Full page for a rendered notebook
#[must_use]
pub fn render_page(title: &str, notebook: &RenderedNotebook) -> String {
    let body = format!(
        "<header><h1 class=\"nb-title\">{}</h1></header>\n<main class=\"nb-notebook\">{}</main>",
        escape_html(title),
        notebook.to_html()
    );
    document(title, &body)
}

/// Full page showing a visible load error in place of the notebook
#[must_use]
pub fn render_error_page(title: &str, error: &LoadError) -> String {
    let detail = if error.is_not_found() {
        "The notebook could not be found."
    } else {
        "The notebook could not be loaded."
    };
    let body = format!(
        "<header><h1 class=\"nb-title\">{}</h1></header>\n\
         <main><div class=\"nb-load-error\" role=\"alert\"><p><strong>{}</strong></p><p><code>{}</code></p></div></main>",
        escape_html(title),
        detail,
        escape_html(&error.to_string())
    );
    document(title, &body)
}

/// Full page for an unknown notebook slug
#[must_use]
pub fn render_not_found(slug: &str) -> String {
    let body = format!(
        "<main><div class=\"nb-load-error\" role=\"alert\"><p><strong>Not found</strong></p>\
         <p>No notebook is published under <code>{}</code>.</p></div></main>",
        escape_html(slug)
    );
    document("Notebook not found", &body)
}

fn document(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
         <title>{}</title>\n<style>{STYLESHEET}</style>\n</head>\n<body>\n{body}\n</body>\n</html>\n",
        escape_html(title)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::Block;

    #[test]
    fn test_page_contains_blocks() {
        let notebook = RenderedNotebook {
            title: None,
            blocks: vec![Block::Markdown {
                html: "<p>hello</p>".to_string(),
            }],
        };
        let page = render_page("Sales <2024>", &notebook);
        assert!(page.starts_with("<!DOCTYPE html>"));
        assert!(page.contains("<title>Sales &lt;2024&gt;</title>"));
        assert!(page.contains("<p>hello</p>"));
    }

    #[test]
    fn test_error_page_is_visible() {
        let error = LoadError::Status {
            url: "https://example.com/missing.ipynb".to_string(),
            status: 404,
        };
        let page = render_error_page("Missing", &error);
        assert!(page.contains("role=\"alert\""));
        assert!(page.contains("could not be found"));
        assert!(page.contains("HTTP 404"));
    }

    #[test]
    fn test_not_found_page() {
        let page = render_not_found("<nope>");
        assert!(page.contains("<code>&lt;nope&gt;</code>"));
    }
}
