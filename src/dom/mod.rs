//! Host DOM abstraction.
//!
//! The renderer only needs a handful of DOM calls, collected in [`Host`]. Two
//! hosts ship with the crate:
//!
//! - [`Document`]: an in-memory DOM used for tests, server-side rendering and
//!   anywhere without a browser.
//! - `WebHost` (feature `web`): the browser DOM through `web-sys`.

mod document;
#[cfg(feature = "web")]
mod web;

use std::fmt;
use std::rc::Rc;

pub use document::{Document, NodeId};
#[cfg(feature = "web")]
pub use web::WebHost;

use crate::error::DomError;

/// An event listener attached to a DOM node.
pub type Listener = Rc<dyn Fn(&Event)>;

/// An event delivered to a [`Listener`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Event {
    event_type: String,
}

impl Event {
    pub fn new(event_type: impl Into<String>) -> Self {
        Self {
            event_type: event_type.into(),
        }
    }

    /// The event type, e.g. `"click"`.
    pub fn event_type(&self) -> &str {
        &self.event_type
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.event_type)
    }
}

/// The DOM operations a render pass performs.
///
/// Implementations are cheap handles (clone = same document). Every method
/// takes `&self` so that listeners fired by the host may trigger a new render
/// pass against the same host.
pub trait Host: 'static {
    /// Handle to a node owned by this host.
    type Node: Clone + fmt::Debug + 'static;

    /// Find the element with the given `id` attribute.
    fn get_element_by_id(&self, id: &str) -> Option<Self::Node>;

    /// Create a detached element.
    fn create_element(&self, tag: &str) -> Result<Self::Node, DomError>;

    /// Create a detached text node.
    fn create_text_node(&self, text: &str) -> Self::Node;

    /// Set (or replace) an attribute on an element.
    fn set_attribute(&self, element: &Self::Node, name: &str, value: &str)
    -> Result<(), DomError>;

    /// Register a listener for `event_type` on an element.
    fn add_event_listener(
        &self,
        element: &Self::Node,
        event_type: &str,
        listener: Listener,
    ) -> Result<(), DomError>;

    /// Append `child` as the last child of `parent`, detaching it from any previous parent.
    fn append_child(&self, parent: &Self::Node, child: &Self::Node) -> Result<(), DomError>;

    /// Remove every child of `parent`.
    fn clear_children(&self, parent: &Self::Node) -> Result<(), DomError>;

    /// Release a node that will never be attached, together with its subtree.
    ///
    /// Called for the partial output of a failed render. Hosts whose nodes
    /// are garbage-collected need not do anything.
    fn discard(&self, _node: &Self::Node) {}
}

/// Whether `name` is acceptable as a tag or attribute name.
///
/// Follows the XML `Name` production the DOM uses for `createElement` and
/// `setAttribute`: a letter, `_` or `:` followed by letters, digits, `-`,
/// `.`, `_` or `:`. Any non-ASCII character is accepted.
pub(crate) fn is_valid_name(name: &str) -> bool {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    let start_ok = first.is_ascii_alphabetic() || first == '_' || first == ':' || !first.is_ascii();
    start_ok
        && chars.all(|c| {
            c.is_ascii_alphanumeric() || matches!(c, '-' | '.' | '_' | ':') || !c.is_ascii()
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_names() {
        for name in ["div", "h1", "my-widget", "x:y", "_private", "data-count", "é"] {
            assert!(is_valid_name(name), "{name} should be valid");
        }
    }

    #[test]
    fn test_invalid_names() {
        for name in ["", "1div", "-x", "a b", "<p>", "on click", "a=b"] {
            assert!(!is_valid_name(name), "{name:?} should be invalid");
        }
    }

    #[test]
    fn test_event_type() {
        let event = Event::new("click");
        assert_eq!(event.event_type(), "click");
        assert_eq!(event.to_string(), "click");
    }
}
