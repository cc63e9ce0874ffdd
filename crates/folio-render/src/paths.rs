//! Asset path rewriting for markdown cell sources
//!
//! Notebook exports reference images relative to the notebook (`images/...`)
//! or, when authored carelessly, by the author's local absolute path. The static
//! site serves all of them from a single prefix, so references are rewritten
//! before markdown parsing:
//!
//! 1. `src="images/..."` / `src='images/...'` attributes
//! 2. markdown images `![alt](images/file)`
//! 3. `<img>` tags with spaced or `./images/` sources
//! 4. `src` attributes holding absolute local paths, reduced to the filename

use crate::options::RenderOptions;
use regex::{Captures, Regex};
use std::sync::LazyLock;

static RE_SRC_IMAGES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"src=(["'])images/"#).expect("regex is compile-time constant"));

static RE_MD_IMAGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"!\[([^\]]*)\]\((?:\./)?images/([^)\s]+)((?:\s+"[^"]*")?)\)"#)
        .expect("regex is compile-time constant")
});

static RE_IMG_TAG_SRC: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)(<img\b[^>]*?\bsrc\s*=\s*["'])(?:\./)?images/"#)
        .expect("regex is compile-time constant")
});

static RE_SRC_ATTR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"\bsrc\s*=\s*(?:"([^"]*)"|'([^']*)')"#).expect("regex is compile-time constant")
});

static RE_WINDOWS_DRIVE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z]:[\\/]").expect("regex is compile-time constant"));

/// Roots that only ever appear in a `src` when a local path leaked into the notebook
const LOCAL_ROOTS: &[&str] = &[
    "/Users/",
    "/home/",
    "/root/",
    "/tmp/",
    "/mnt/",
    "/var/folders/",
    "/private/",
];

/// Apply all four rewrites, in order
#[must_use]
pub fn rewrite_asset_paths(source: &str, options: &RenderOptions) -> String {
    let prefix = options.asset_prefix.as_str();

    let text = RE_SRC_IMAGES.replace_all(source, |caps: &Captures<'_>| {
        format!("src={}{prefix}/", &caps[1])
    });

    let text = RE_MD_IMAGE.replace_all(&text, |caps: &Captures<'_>| {
        format!("![{}]({prefix}/{}{})", &caps[1], &caps[2], &caps[3])
    });

    let text = RE_IMG_TAG_SRC.replace_all(&text, |caps: &Captures<'_>| {
        format!("{}{prefix}/", &caps[1])
    });

    let text = RE_SRC_ATTR.replace_all(&text, |caps: &Captures<'_>| {
        let (quote, value) = match (caps.get(1), caps.get(2)) {
            (Some(value), _) => ('"', value.as_str()),
            (None, Some(value)) => ('\'', value.as_str()),
            (None, None) => return caps[0].to_string(),
        };
        if value.starts_with(prefix) || !is_local_absolute_path(value) {
            return caps[0].to_string();
        }
        match trailing_filename(value) {
            Some(filename) => {
                log::debug!("Re-rooting local image path {value}");
                format!("src={quote}{prefix}/{filename}{quote}")
            }
            None => caps[0].to_string(),
        }
    });

    text.into_owned()
}

/// Whether a `src` value is a path on the author's machine rather than a URL
fn is_local_absolute_path(value: &str) -> bool {
    if value.starts_with("file://") || RE_WINDOWS_DRIVE.is_match(value) {
        return true;
    }
    LOCAL_ROOTS.iter().any(|root| value.starts_with(root))
}

fn trailing_filename(value: &str) -> Option<&str> {
    value
        .rsplit(['/', '\\'])
        .next()
        .filter(|name| !name.is_empty())
}
