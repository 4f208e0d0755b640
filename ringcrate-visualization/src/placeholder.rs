//! Loading placeholder and deferred viewer start-up
//!
//! The page first receives a lightweight container showing the part label.
//! The viewer is built into it later, once the page is ready to draw.

use crate::config::ViewerConfig;
use crate::host::Host;
use crate::viewer::{init_viewer, ViewerHandles};
use ringcrate_core::{Result, RingParams};
use tracing::debug;

/// Element id of the viewer container for a part
pub fn container_id(part_id: &str) -> String {
    let mut slug = String::with_capacity(part_id.len());
    for c in part_id.trim().chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
        } else if !slug.ends_with('-') {
            slug.push('-');
        }
    }
    let slug = slug.trim_matches('-');
    if slug.is_empty() {
        "ring-viewer".to_string()
    } else {
        format!("ring-viewer-{}", slug)
    }
}

/// Escape text for use inside HTML content and attribute values
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Content shown in the container until the viewer is ready
pub fn placeholder_markup(params: &RingParams) -> String {
    format!(
        "<div class=\"ring-viewer-loading\"><span class=\"ring-viewer-spinner\"></span><p>Loading 3D view of {}</p></div>",
        escape_html(&params.label())
    )
}

/// A container that has been placed on the page but not yet initialised
#[derive(Debug, Clone)]
pub struct PendingViewer {
    pub container_id: String,
    pub params: RingParams,
}

/// Create the viewer container inside `parent_id` showing the placeholder
///
/// Returns `None` when the parent element does not exist or the part is
/// already mounted.
pub fn mount<H: Host + ?Sized>(
    host: &mut H,
    parent_id: &str,
    params: &RingParams,
) -> Option<PendingViewer> {
    let id = container_id(&params.part_id);
    if !host.create_container(parent_id, &id, &placeholder_markup(params)) {
        debug!(parent = parent_id, container = %id, "could not create viewer container");
        return None;
    }
    Some(PendingViewer {
        container_id: id,
        params: params.clone(),
    })
}

impl PendingViewer {
    /// Build the viewer, replacing the placeholder
    ///
    /// `Ok(None)` means the container disappeared before start-up.
    pub fn initialize<H: Host + ?Sized>(
        self,
        host: &mut H,
        config: &ViewerConfig,
    ) -> Result<Option<ViewerHandles>> {
        init_viewer(host, &self.container_id, &self.params, config)
    }
}
