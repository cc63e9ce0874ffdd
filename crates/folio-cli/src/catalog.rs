//! Slug → notebook routing

use crate::config::NotebookConfig;
use std::collections::BTreeMap;
use std::path::Path;
use thiserror::Error;

/// Published notebooks: (slug, title, document URL relative to the document root)
const BUILTIN_NOTEBOOKS: &[(&str, &str, &str)] = &[
    (
        "titanic-survival",
        "Titanic Survival Analysis",
        "notebooks/titanic_survival.ipynb",
    ),
    (
        "image-classifier",
        "CNN Image Classifier",
        "notebooks/image_classifier.ipynb",
    ),
    (
        "social-network",
        "Social Network Analysis",
        "notebooks/social_network.ipynb",
    ),
    (
        "cartpole-agent",
        "Reinforcement Learning: CartPole Agent",
        "notebooks/cartpole_agent.ipynb",
    ),
    (
        "sales-forecast",
        "Retail Sales Forecasting",
        "notebooks/sales_forecast.ipynb",
    ),
];

/// Routing failure
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// No notebook is published under the slug
    #[error("No notebook named '{slug}'")]
    NotFound {
        /// Requested slug
        slug: String,
    },
}

/// One routable notebook
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEntry {
    /// Short identifier used in routes
    pub slug: String,
    /// Display title
    pub title: String,
    /// Document URL or path, possibly relative to the document root
    pub url: String,
}

impl CatalogEntry {
    /// Location to load, with relative URLs joined onto `document_root`
    #[must_use]
    pub fn location(&self, document_root: &str) -> String {
        if is_absolute_location(&self.url) {
            self.url.clone()
        } else {
            format!(
                "{}/{}",
                document_root.trim_end_matches('/'),
                self.url.trim_start_matches("./")
            )
        }
    }
}

/// Slug table
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    entries: BTreeMap<String, CatalogEntry>,
}

impl Catalog {
    /// Catalog of the published notebooks
    #[must_use]
    pub fn builtin() -> Self {
        let entries = BUILTIN_NOTEBOOKS
            .iter()
            .map(|&(slug, title, url)| {
                (
                    slug.to_string(),
                    CatalogEntry {
                        slug: slug.to_string(),
                        title: title.to_string(),
                        url: url.to_string(),
                    },
                )
            })
            .collect();
        Self { entries }
    }

    /// Apply configured entries over this catalog
    ///
    /// A configured slug that already exists has its title and/or URL
    /// replaced. A new slug without a URL is ignored.
    #[must_use = "returns the catalog with the overrides applied"]
    pub fn with_overrides(mut self, overrides: &BTreeMap<String, NotebookConfig>) -> Self {
        for (slug, entry) in overrides {
            if let Some(existing) = self.entries.get_mut(slug) {
                if let Some(title) = &entry.title {
                    existing.title.clone_from(title);
                }
                if let Some(url) = &entry.url {
                    existing.url.clone_from(url);
                }
                continue;
            }
            let Some(url) = &entry.url else {
                log::warn!("Ignoring notebook '{slug}' from config: no url set");
                continue;
            };
            self.entries.insert(
                slug.clone(),
                CatalogEntry {
                    slug: slug.clone(),
                    title: entry.title.clone().unwrap_or_else(|| slug.clone()),
                    url: url.clone(),
                },
            );
        }
        self
    }

    /// Look up a slug
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::NotFound`] for an unknown slug.
    pub fn resolve(&self, slug: &str) -> Result<&CatalogEntry, CatalogError> {
        self.entries.get(slug).ok_or_else(|| CatalogError::NotFound {
            slug: slug.to_string(),
        })
    }

    /// Entries ordered by slug
    pub fn entries(&self) -> impl Iterator<Item = &CatalogEntry> {
        self.entries.values()
    }

    /// Number of entries
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the catalog has no entries
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Page title derived from a location: its file stem, or "Notebook"
#[must_use]
pub fn title_from_location(location: &str) -> String {
    let path = location.split(['?', '#']).next().unwrap_or(location);
    Path::new(path)
        .file_stem()
        .and_then(|stem| stem.to_str())
        .filter(|stem| !stem.is_empty())
        .map_or_else(|| "Notebook".to_string(), |stem| stem.replace(['_', '-'], " "))
}

fn is_absolute_location(url: &str) -> bool {
    url.contains("://") || Path::new(url).is_absolute()
}
