//! The page a viewer is embedded in
//!
//! Elements are addressed by id. The viewer only needs to measure a
//! container and replace or extend its markup.

use std::collections::HashMap;

/// Operations the viewer performs on its host page
pub trait Host {
    /// Layout size of element `id` in CSS pixels, `None` if it does not exist
    fn container_size(&self, id: &str) -> Option<(u32, u32)>;

    /// Replace the content of `id`; false if it does not exist
    fn set_inner_html(&mut self, id: &str, html: &str) -> bool;

    /// Append markup to the content of `id`; false if it does not exist
    fn append_html(&mut self, id: &str, html: &str) -> bool;

    /// Create element `id` as the last child of `parent_id`
    ///
    /// The new element starts with `html` as content and the parent's size.
    /// Returns false if the parent is missing or `id` is already taken.
    fn create_container(&mut self, parent_id: &str, id: &str, html: &str) -> bool;

    fn inner_html(&self, id: &str) -> Option<String>;

    fn device_pixel_ratio(&self) -> f32 {
        1.0
    }
}

#[derive(Debug, Clone, Default)]
struct Element {
    size: (u32, u32),
    html: String,
    children: Vec<String>,
}

/// A page kept in memory, used by the CLI and in tests
#[derive(Debug, Clone)]
pub struct MemoryHost {
    elements: HashMap<String, Element>,
    pixel_ratio: f32,
}

impl MemoryHost {
    pub fn new() -> Self {
        Self {
            elements: HashMap::new(),
            pixel_ratio: 1.0,
        }
    }

    pub fn with_pixel_ratio(mut self, pixel_ratio: f32) -> Self {
        self.pixel_ratio = pixel_ratio;
        self
    }

    /// Add (or replace) a top-level element
    pub fn add_container<S: Into<String>>(&mut self, id: S, width: u32, height: u32) {
        self.elements.insert(
            id.into(),
            Element {
                size: (width, height),
                ..Element::default()
            },
        );
    }

    /// Change the layout size of `id`; false if it does not exist
    pub fn resize_container(&mut self, id: &str, width: u32, height: u32) -> bool {
        match self.elements.get_mut(id) {
            Some(element) => {
                element.size = (width, height);
                true
            }
            None => false,
        }
    }

    /// Remove `id` and everything created inside it
    pub fn remove_container(&mut self, id: &str) -> bool {
        let Some(element) = self.elements.remove(id) else {
            return false;
        };
        for child in element.children {
            self.remove_container(&child);
        }
        true
    }

    pub fn contains(&self, id: &str) -> bool {
        self.elements.contains_key(id)
    }

    /// Ids created inside `id`, in creation order
    pub fn children(&self, id: &str) -> Vec<String> {
        self.elements
            .get(id)
            .map(|e| e.children.clone())
            .unwrap_or_default()
    }
}

impl Default for MemoryHost {
    fn default() -> Self {
        Self::new()
    }
}

impl Host for MemoryHost {
    fn container_size(&self, id: &str) -> Option<(u32, u32)> {
        self.elements.get(id).map(|e| e.size)
    }

    fn set_inner_html(&mut self, id: &str, html: &str) -> bool {
        match self.elements.get_mut(id) {
            Some(element) => {
                element.html = html.to_string();
                true
            }
            None => false,
        }
    }

    fn append_html(&mut self, id: &str, html: &str) -> bool {
        match self.elements.get_mut(id) {
            Some(element) => {
                element.html.push_str(html);
                true
            }
            None => false,
        }
    }

    fn create_container(&mut self, parent_id: &str, id: &str, html: &str) -> bool {
        if self.elements.contains_key(id) {
            return false;
        }
        let Some(parent) = self.elements.get_mut(parent_id) else {
            return false;
        };
        parent.children.push(id.to_string());
        let size = parent.size;
        self.elements.insert(
            id.to_string(),
            Element {
                size,
                html: html.to_string(),
                children: Vec::new(),
            },
        );
        true
    }

    fn inner_html(&self, id: &str) -> Option<String> {
        self.elements.get(id).map(|e| e.html.clone())
    }

    fn device_pixel_ratio(&self) -> f32 {
        self.pixel_ratio
    }
}
