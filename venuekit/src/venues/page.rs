//! Minimal page model: elements with `data-*` attributes and click events.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A control on the page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Element {
    /// Element id.
    pub id: String,
    /// `data-*` attributes keyed without the `data-` prefix.
    #[serde(default)]
    pub dataset: HashMap<String, String>,
}

impl Element {
    /// Creates an element with no data attributes.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            dataset: HashMap::new(),
        }
    }

    /// Sets a data attribute.
    #[must_use]
    pub fn with_data(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.dataset.insert(key.into(), value.into());
        self
    }

    /// Reads a data attribute.
    #[must_use]
    pub fn data(&self, key: &str) -> Option<&str> {
        self.dataset.get(key).map(String::as_str)
    }
}

/// A click on an element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClickEvent {
    /// The clicked element, read at click time.
    pub target: Element,
}

impl ClickEvent {
    /// Creates a click on `target`.
    #[must_use]
    pub fn on(target: Element) -> Self {
        Self { target }
    }
}

/// Element lookup.
pub trait Page: Send + Sync {
    /// Finds an element by id.
    fn element_by_id(&self, id: &str) -> Option<Element>;
}

/// A page backed by a fixed set of elements.
#[derive(Debug, Clone, Default)]
pub struct StaticPage {
    elements: HashMap<String, Element>,
}

impl StaticPage {
    /// Creates an empty page.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an element, replacing any element with the same id.
    #[must_use]
    pub fn with_element(mut self, element: Element) -> Self {
        self.elements.insert(element.id.clone(), element);
        self
    }

    /// Clicks the element with `id`, if present.
    #[must_use]
    pub fn click(&self, id: &str) -> Option<ClickEvent> {
        self.element_by_id(id).map(ClickEvent::on)
    }
}

impl Page for StaticPage {
    fn element_by_id(&self, id: &str) -> Option<Element> {
        self.elements.get(id).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_element_data() {
        let el = Element::new("deleteBtn").with_data("id", "42");
        assert_eq!(el.data("id"), Some("42"));
        assert_eq!(el.data("name"), None);
    }

    #[test]
    fn test_static_page_lookup_and_click() {
        let page = StaticPage::new().with_element(Element::new("deleteBtn").with_data("id", "7"));
        assert!(page.element_by_id("deleteBtn").is_some());
        assert!(page.element_by_id("editBtn").is_none());

        let click = page.click("deleteBtn").unwrap();
        assert_eq!(click.target.data("id"), Some("7"));
    }
}
