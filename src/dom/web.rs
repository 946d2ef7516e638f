//! Browser host backed by `web-sys`.

use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, Node};

use super::{Event, Host, Listener};
use crate::error::DomError;

impl From<JsValue> for DomError {
    fn from(value: JsValue) -> Self {
        value
            .as_string()
            .map_or_else(|| Self::Host(format!("{value:?}")), Self::Host)
    }
}

/// The page DOM of the current browser window.
#[derive(Debug, Clone)]
pub struct WebHost {
    document: Document,
}

impl WebHost {
    /// Attach to `window.document`.
    pub fn new() -> Result<Self, DomError> {
        let document = web_sys::window()
            .and_then(|window| window.document())
            .ok_or_else(|| DomError::Host("DOM is not available".to_string()))?;
        Ok(Self { document })
    }

    pub fn document(&self) -> &Document {
        &self.document
    }
}

fn as_element(node: &Node) -> Result<&Element, DomError> {
    node.dyn_ref::<Element>()
        .ok_or_else(|| DomError::NotAnElement(node.node_name()))
}

impl Host for WebHost {
    type Node = Node;

    fn get_element_by_id(&self, id: &str) -> Option<Node> {
        self.document.get_element_by_id(id).map(Node::from)
    }

    fn create_element(&self, tag: &str) -> Result<Node, DomError> {
        Ok(self.document.create_element(tag)?.into())
    }

    fn create_text_node(&self, text: &str) -> Node {
        self.document.create_text_node(text).into()
    }

    fn set_attribute(&self, element: &Node, name: &str, value: &str) -> Result<(), DomError> {
        as_element(element)?.set_attribute(name, value)?;
        Ok(())
    }

    fn add_event_listener(
        &self,
        element: &Node,
        event_type: &str,
        listener: Listener,
    ) -> Result<(), DomError> {
        let callback = Closure::wrap(Box::new(move |event: web_sys::Event| {
            listener(&Event::new(event.type_()));
        }) as Box<dyn FnMut(web_sys::Event)>);
        element.add_event_listener_with_callback(event_type, callback.as_ref().unchecked_ref())?;
        // The browser owns the node; the callback has to live as long as it does.
        callback.forget();
        Ok(())
    }

    fn append_child(&self, parent: &Node, child: &Node) -> Result<(), DomError> {
        parent.append_child(child)?;
        Ok(())
    }

    fn clear_children(&self, parent: &Node) -> Result<(), DomError> {
        while let Some(child) = parent.first_child() {
            parent.remove_child(&child)?;
        }
        Ok(())
    }
}
