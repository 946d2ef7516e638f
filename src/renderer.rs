//! Element tree → host DOM.
//!
//! There is no reconciliation: every call allocates fresh nodes. The caller
//! discards the previous subtree (and its listeners) before appending the
//! new one.

use std::rc::Rc;

use crate::dom::Host;
use crate::element::{Element, Node};
use crate::error::DomError;

/// Build the DOM for `node` and return its root.
///
/// Host failures (an invalid tag or attribute name, for instance) abort the
/// walk immediately. Nodes created so far are handed to [`Host::discard`].
pub fn render_element<H: Host>(host: &H, node: &Node) -> Result<H::Node, DomError> {
    match node {
        Node::Text(text) => Ok(host.create_text_node(text)),
        Node::Element(element) => render_tag(host, element),
    }
}

fn render_tag<H: Host>(host: &H, element: &Element) -> Result<H::Node, DomError> {
    let dom = host.create_element(element.tag())?;
    if let Err(err) = fill(host, &dom, element) {
        host.discard(&dom);
        return Err(err);
    }
    Ok(dom)
}

fn fill<H: Host>(host: &H, dom: &H::Node, element: &Element) -> Result<(), DomError> {
    for (key, value) in element.props().iter() {
        if key == "children" {
            continue;
        }
        match (key.strip_prefix("on"), value.as_listener()) {
            (Some(event), Some(listener)) => {
                host.add_event_listener(dom, &event.to_lowercase(), Rc::clone(listener))?;
            }
            _ => host.set_attribute(dom, key, &value.to_attribute_value())?,
        }
    }

    for child in element.children() {
        let child = render_element(host, child)?;
        if let Err(err) = host.append_child(dom, &child) {
            host.discard(&child);
            return Err(err);
        }
    }
    Ok(())
}
