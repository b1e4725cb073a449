//! # Resource Deriver
//!
//! Turns a complete selection into the ordered list of document locations.
//! Pure: no I/O, same selection in, same list out.
//!
//! ```text
//! {base_url}/{level}/{subject}/{mode}/pdf{index}.pdf     index = 1..=count
//! ```
//!
//! Whether a document actually exists at every index is not checked here;
//! that is the viewer's problem.

use std::fmt;

use url::Url;

use crate::core::selection::{Selection, SelectionError, Slot};

pub const DEFAULT_BASE_URL: &str =
    "https://nflfmetecmieafgpmwre.supabase.co/storage/v1/object/public/zicoexampdf/mobile/pdf";
pub const DEFAULT_RESOURCE_COUNT: usize = 5;
/// Upper bound on documents per subject and mode.
pub const MAX_RESOURCE_COUNT: usize = 100;
pub const DEFAULT_VIEWER_URL: &str = "https://docs.google.com/gview";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceConfig {
    pub base_url: String,
    /// Documents per level/subject/mode combination.
    pub count: usize,
    /// Embedded document viewer the resource URL is handed to.
    pub viewer_url: String,
}

impl Default for ResourceConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            count: DEFAULT_RESOURCE_COUNT,
            viewer_url: DEFAULT_VIEWER_URL.to_string(),
        }
    }
}

impl ResourceConfig {
    /// Wrap a resource in the embedded viewer link
    /// (`{viewer}?embedded=true&url={percent-encoded resource}`).
    pub fn viewer_link(&self, resource: &ResourceRef) -> Result<String, url::ParseError> {
        let link = Url::parse_with_params(
            &self.viewer_url,
            &[("embedded", "true"), ("url", resource.url.as_str())],
        )?;
        Ok(link.into())
    }
}

/// A single document location. `index` is 1-based.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResourceRef {
    pub index: usize,
    pub url: String,
}

impl ResourceRef {
    pub fn file_name(&self) -> String {
        format!("pdf{}.pdf", self.index)
    }
}

impl fmt::Display for ResourceRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.url)
    }
}

/// Derive the document list for a selection.
///
/// Requires `level` and `subject`; `mode` always has a value.
pub fn derive_resources(
    selection: &Selection,
    config: &ResourceConfig,
) -> Result<Vec<ResourceRef>, SelectionError> {
    let level = selection.level().ok_or(SelectionError::IncompleteSelection {
        missing: Slot::Level,
    })?;
    let subject = selection.subject().ok_or(SelectionError::IncompleteSelection {
        missing: Slot::Subject,
    })?;
    let base = config.base_url.trim_end_matches('/');
    let mode = selection.mode();

    Ok((1..=config.count)
        .map(|index| ResourceRef {
            index,
            url: format!("{base}/{level}/{subject}/{mode}/pdf{index}.pdf"),
        })
        .collect())
}
