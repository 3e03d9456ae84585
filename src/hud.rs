//! Text display sink
//!
//! Game logic never prints; it writes strings and visibility flags into this
//! table and whatever front end drives the game decides how to show them.
//! Handles are generational, so a stale id simply stops resolving instead of
//! dangling.

use slotmap::{SlotMap, new_key_type};

new_key_type! {
    /// Handle to one text element
    pub struct TextId;
}

#[derive(Debug, Clone)]
struct TextElement {
    text: String,
    visible: bool,
}

/// In-memory table of text elements
#[derive(Debug, Default)]
pub struct Hud {
    elements: SlotMap<TextId, TextElement>,
}

impl Hud {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate a new visible text element.
    pub fn create_text(&mut self, initial: &str) -> TextId {
        self.elements.insert(TextElement {
            text: initial.to_owned(),
            visible: true,
        })
    }

    /// Replace an element's text. Stale ids are ignored.
    pub fn set_text(&mut self, id: TextId, text: impl Into<String>) {
        if let Some(element) = self.elements.get_mut(id) {
            element.text = text.into();
        }
    }

    /// Show or hide an element. Stale ids are ignored.
    pub fn set_visible(&mut self, id: TextId, visible: bool) {
        if let Some(element) = self.elements.get_mut(id) {
            element.visible = visible;
        }
    }

    pub fn text(&self, id: TextId) -> Option<&str> {
        self.elements.get(id).map(|e| e.text.as_str())
    }

    /// Visibility of an element; stale ids read as hidden.
    pub fn is_visible(&self, id: TextId) -> bool {
        self.elements.get(id).is_some_and(|e| e.visible)
    }

    pub fn contains(&self, id: TextId) -> bool {
        self.elements.contains_key(id)
    }
}
