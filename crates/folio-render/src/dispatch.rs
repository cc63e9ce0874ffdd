//! MIME-priority dispatch for rich cell outputs
//!
//! A rich output carries several representations of the same value. Exactly
//! one is rendered, chosen by walking [`MIME_DISPATCH`] top to bottom and
//! taking the first entry whose predicate accepts the bundle.

use crate::html::{escape_attr, escape_html};
use crate::options::RenderOptions;
use folio_notebook::{data_uri, MimeBundle};

const VIDEO_MIME_TYPES: &[&str] = &["video/mp4", "video/webm"];
const AUDIO_MIME_TYPES: &[&str] = &["audio/wav", "audio/mp3", "audio/mpeg"];
const IMAGE_MIME_TYPES: &[&str] = &["image/png", "image/jpeg", "image/gif"];

/// Video files that notebooks in the collection embed through HTML players
const KNOWN_VIDEO_FILENAMES: &[&str] = &["training_animation.mp4", "simulation.mp4"];

/// Caption shown under the placeholder video
pub const VIDEO_PLACEHOLDER_CAPTION: &str = "This output embedded a video player that only works \
     inside a live notebook session. A sample clip is shown in its place.";

/// Rendered body of a single output, before framing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputBody {
    /// Raw HTML inlined as-is
    Html(String),
    /// Fixed placeholder replacing HTML that embedded a video player
    VideoPlaceholder {
        /// Placeholder clip URL
        src: String,
    },
    /// Native video element with a `data:` source
    Video {
        /// MIME type of the payload
        mime_type: String,
        /// `data:` URI
        src: String,
    },
    /// Native audio element with a `data:` source
    Audio {
        /// MIME type of the payload
        mime_type: String,
        /// `data:` URI
        src: String,
    },
    /// Literal SVG markup inlined as-is
    InlineSvg(String),
    /// Image element with a `data:` source
    Image {
        /// `data:` URI
        src: String,
    },
    /// Preformatted text (escaped on output)
    Text(String),
    /// Preformatted error traceback (escaped on output)
    Traceback(String),
}

impl OutputBody {
    /// HTML markup for this body
    #[must_use]
    pub fn to_html(&self) -> String {
        match self {
            Self::Html(html) | Self::InlineSvg(html) => html.clone(),
            Self::VideoPlaceholder { src } => format!(
                "<figure class=\"nb-video-placeholder\">\
                 <video controls preload=\"metadata\" src=\"{}\"></video>\
                 <figcaption>{}</figcaption>\
                 </figure>",
                escape_attr(src),
                escape_html(VIDEO_PLACEHOLDER_CAPTION)
            ),
            Self::Video { mime_type, src } => format!(
                "<video controls><source src=\"{}\" type=\"{}\"></video>",
                escape_attr(src),
                escape_attr(mime_type)
            ),
            Self::Audio { mime_type, src } => format!(
                "<audio controls><source src=\"{}\" type=\"{}\"></audio>",
                escape_attr(src),
                escape_attr(mime_type)
            ),
            Self::Image { src } => format!("<img src=\"{}\" alt=\"output\">", escape_attr(src)),
            Self::Text(text) => format!("<pre class=\"nb-text\">{}</pre>", escape_html(text)),
            Self::Traceback(text) => {
                format!("<pre class=\"nb-error\">{}</pre>", escape_html(text))
            }
        }
    }
}

/// One dispatch rule: a predicate over the bundle's MIME keys and its renderer
#[derive(Clone, Copy)]
pub struct MimeRule {
    /// Short identifier used in logs
    pub name: &'static str,
    /// Whether this rule applies to the bundle
    pub applies: fn(&MimeBundle) -> bool,
    /// Render the bundle
    pub render: fn(&MimeBundle, &RenderOptions) -> Option<OutputBody>,
}

impl std::fmt::Debug for MimeRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MimeRule")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// Dispatch rules in priority order; the first applicable rule wins
pub static MIME_DISPATCH: &[MimeRule] = &[
    MimeRule {
        name: "html",
        applies: has_html,
        render: render_html,
    },
    MimeRule {
        name: "video",
        applies: has_video,
        render: render_video,
    },
    MimeRule {
        name: "audio",
        applies: has_audio,
        render: render_audio,
    },
    MimeRule {
        name: "svg",
        applies: has_svg,
        render: render_svg,
    },
    MimeRule {
        name: "image",
        applies: has_image,
        render: render_image,
    },
    MimeRule {
        name: "text",
        applies: has_text,
        render: render_text,
    },
];

/// Select and render exactly one representation of a rich output
///
/// Returns `None` when no rule applies; the output is then skipped.
#[must_use]
pub fn dispatch(bundle: &MimeBundle, options: &RenderOptions) -> Option<OutputBody> {
    let Some(rule) = MIME_DISPATCH.iter().find(|rule| (rule.applies)(bundle)) else {
        log::debug!(
            "No renderer for output with MIME types [{}]",
            bundle.mime_types().collect::<Vec<_>>().join(", ")
        );
        return None;
    };
    (rule.render)(bundle, options)
}

/// Best-effort check for HTML that embeds a video player
///
/// Matches a known video filename, a `blob:` URI, a `<video` tag, or the
/// words "player" and "controls" together. Non-video HTML that happens to use
/// both words also matches.
#[must_use]
pub fn has_video_signal(html: &str) -> bool {
    let lower = html.to_lowercase();
    KNOWN_VIDEO_FILENAMES
        .iter()
        .any(|name| lower.contains(name))
        || lower.contains("blob:")
        || lower.contains("<video")
        || (lower.contains("player") && lower.contains("controls"))
}

fn has_html(bundle: &MimeBundle) -> bool {
    bundle.contains("text/html")
}

fn has_video(bundle: &MimeBundle) -> bool {
    bundle.contains_any(VIDEO_MIME_TYPES)
}

fn has_audio(bundle: &MimeBundle) -> bool {
    bundle.contains_any(AUDIO_MIME_TYPES)
}

fn has_svg(bundle: &MimeBundle) -> bool {
    bundle.contains("image/svg+xml")
}

fn has_image(bundle: &MimeBundle) -> bool {
    bundle.contains_any(IMAGE_MIME_TYPES)
}

fn has_text(bundle: &MimeBundle) -> bool {
    bundle.contains("text/plain")
}

fn render_html(bundle: &MimeBundle, options: &RenderOptions) -> Option<OutputBody> {
    let html = bundle.get("text/html")?;
    if has_video_signal(html) {
        log::debug!("Replacing embedded video player with placeholder");
        return Some(OutputBody::VideoPlaceholder {
            src: options.video_placeholder_url.clone(),
        });
    }
    Some(OutputBody::Html(html.to_string()))
}

fn render_video(bundle: &MimeBundle, _options: &RenderOptions) -> Option<OutputBody> {
    let (mime_type, payload) = bundle.first_of(VIDEO_MIME_TYPES)?;
    Some(OutputBody::Video {
        mime_type: mime_type.to_string(),
        src: data_uri(mime_type, payload),
    })
}

fn render_audio(bundle: &MimeBundle, _options: &RenderOptions) -> Option<OutputBody> {
    let (mime_type, payload) = bundle.first_of(AUDIO_MIME_TYPES)?;
    Some(OutputBody::Audio {
        mime_type: mime_type.to_string(),
        src: data_uri(mime_type, payload),
    })
}

fn render_svg(bundle: &MimeBundle, _options: &RenderOptions) -> Option<OutputBody> {
    let payload = bundle.get("image/svg+xml")?;
    if payload.trim_start().starts_with("<svg") {
        Some(OutputBody::InlineSvg(payload.to_string()))
    } else {
        Some(OutputBody::Image {
            src: data_uri("image/svg+xml", payload),
        })
    }
}

fn render_image(bundle: &MimeBundle, _options: &RenderOptions) -> Option<OutputBody> {
    let (mime_type, payload) = bundle.first_of(IMAGE_MIME_TYPES)?;
    Some(OutputBody::Image {
        src: data_uri(mime_type, payload),
    })
}

fn render_text(bundle: &MimeBundle, _options: &RenderOptions) -> Option<OutputBody> {
    bundle
        .get("text/plain")
        .map(|text| OutputBody::Text(text.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bundle(entries: &[(&str, &str)]) -> MimeBundle {
        entries.iter().copied().collect()
    }

    fn render(entries: &[(&str, &str)]) -> Option<OutputBody> {
        dispatch(&bundle(entries), &RenderOptions::default())
    }

    #[test]
    fn test_html_wins_over_image() {
        let body = render(&[
            ("image/png", "iVBORw0KGgo="),
            ("text/html", "<table><tr><td>1</td></tr></table>"),
            ("text/plain", "1"),
        ]);
        assert_eq!(
            body,
            Some(OutputBody::Html(
                "<table><tr><td>1</td></tr></table>".to_string()
            ))
        );
    }

    #[test]
    fn test_video_tag_in_html_uses_placeholder() {
        let body = render(&[("text/html", "<video src=\"clip.mp4\" controls></video>")]).unwrap();
        assert_eq!(
            body,
            OutputBody::VideoPlaceholder {
                src: "/notebooks/media/video-placeholder.mp4".to_string()
            }
        );
        let html = body.to_html();
        assert!(html.contains("<video controls"));
        assert!(html.contains("video-placeholder.mp4"));
        assert!(!html.contains("clip.mp4"));
        assert!(html.contains("<figcaption>"));
    }

    #[test]
    fn test_video_signals() {
        assert!(has_video_signal("<img src=\"blob:https://x/123\">"));
        assert!(has_video_signal("<a href=\"training_animation.mp4\">clip</a>"));
        assert!(has_video_signal("<div class=\"player\"><button class=\"controls\"></button></div>"));
        assert!(!has_video_signal("<div class=\"player\">Top scorer</div>"));
        assert!(!has_video_signal("<table><tr><td>1</td></tr></table>"));
    }

    #[test]
    fn test_video_payload() {
        let body = render(&[("video/webm", "GkXf\no6E=")]).unwrap();
        assert_eq!(
            body,
            OutputBody::Video {
                mime_type: "video/webm".to_string(),
                src: "data:video/webm;base64,GkXfo6E=".to_string()
            }
        );
        assert!(body.to_html().starts_with("<video controls><source"));
    }

    #[test]
    fn test_audio_preference_order() {
        let body = render(&[("audio/mpeg", "SUQz"), ("audio/wav", "UklG")]).unwrap();
        assert_eq!(
            body,
            OutputBody::Audio {
                mime_type: "audio/wav".to_string(),
                src: "data:audio/wav;base64,UklG".to_string()
            }
        );
    }

    #[test]
    fn test_video_prefers_mp4_over_webm() {
        let body = render(&[("video/webm", "GkXf"), ("video/mp4", "AAAA")]).unwrap();
        assert_eq!(
            body,
            OutputBody::Video {
                mime_type: "video/mp4".to_string(),
                src: "data:video/mp4;base64,AAAA".to_string()
            }
        );
    }

    #[test]
    fn test_audio_prefers_mp3_over_mpeg() {
        let body = render(&[("audio/mpeg", "SUQz"), ("audio/mp3", "//uQ")]).unwrap();
        assert_eq!(
            body,
            OutputBody::Audio {
                mime_type: "audio/mp3".to_string(),
                src: "data:audio/mp3;base64,//uQ".to_string()
            }
        );
    }

    #[test]
    fn test_svg_markup_is_inlined() {
        let body = render(&[("image/svg+xml", "<svg><rect/></svg>")]).unwrap();
        assert_eq!(body, OutputBody::InlineSvg("<svg><rect/></svg>".to_string()));
        assert!(!body.to_html().contains("<img"));
    }

    #[test]
    fn test_svg_base64_uses_img() {
        let body = render(&[("image/svg+xml", "PHN2ZyAvPg==")]).unwrap();
        assert_eq!(
            body.to_html(),
            "<img src=\"data:image/svg+xml;base64,PHN2ZyAvPg==\" alt=\"output\">"
        );
    }

    #[test]
    fn test_image_preference_order() {
        let body = render(&[("image/gif", "R0lG"), ("image/jpeg", "/9j/")]).unwrap();
        assert_eq!(
            body,
            OutputBody::Image {
                src: "data:image/jpeg;base64,/9j/".to_string()
            }
        );
    }

    #[test]
    fn test_plain_text_is_escaped() {
        let body = render(&[("text/plain", "<Figure size 640x480>")]).unwrap();
        assert_eq!(
            body.to_html(),
            "<pre class=\"nb-text\">&lt;Figure size 640x480&gt;</pre>"
        );
    }

    #[test]
    fn test_unknown_mime_types_are_skipped() {
        assert_eq!(render(&[("application/vnd.custom+json", "{}")]), None);
        assert_eq!(render(&[]), None);
    }
}
