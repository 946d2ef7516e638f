//! Declarative element trees.
//!
//! A component returns a [`Node`]: either literal text or an [`Element`]
//! with a tag, props and ordered children. Trees are plain values; a new one
//! is built on every render pass.
//!
//! ```
//! use sprig::element::{button, div, p};
//!
//! let tree = div()
//!     .prop("class", "counter")
//!     .child(p().child("Count: 0"))
//!     .child(button().on("click", |_| {}).child("Increment"));
//! assert_eq!(tree.children().len(), 2);
//! ```

mod children;
mod json;
mod props;

pub use children::{IntoChildren, ManyChildren, SingleChild};
pub use props::{PropValue, Props};
pub(crate) use props::js_number_to_string;

use crate::dom::Event;

/// One node of an element tree.
#[derive(Clone, Debug, PartialEq)]
pub enum Node {
    Text(String),
    Element(Element),
}

impl Node {
    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Self::Element(element) => Some(element),
            Self::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            Self::Element(_) => None,
        }
    }
}

impl From<Element> for Node {
    fn from(value: Element) -> Self {
        Self::Element(value)
    }
}

impl From<String> for Node {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&str> for Node {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<&String> for Node {
    fn from(value: &String) -> Self {
        Self::Text(value.clone())
    }
}

/// An element description: `{ type, props: { children, .. } }`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Element {
    tag: String,
    props: Props,
    children: Vec<Node>,
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            props: Props::new(),
            children: Vec::new(),
        }
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn props(&self) -> &Props {
        &self.props
    }

    pub fn props_mut(&mut self) -> &mut Props {
        &mut self.props
    }

    pub fn children(&self) -> &[Node] {
        &self.children
    }

    /// Set a prop. Keys named `on<event>` holding a listener become event
    /// handlers when rendered; everything else becomes an attribute.
    pub fn prop(mut self, key: impl Into<String>, value: impl Into<PropValue>) -> Self {
        self.props.set(key, value);
        self
    }

    /// Attach a handler for `event`, stored under the `on<event>` prop.
    pub fn on(mut self, event: &str, handler: impl Fn(&Event) + 'static) -> Self {
        self.props
            .set(format!("on{event}"), PropValue::listener(handler));
        self
    }

    /// Append one child, or every child of an iterator.
    pub fn child<M>(mut self, child: impl IntoChildren<M>) -> Self {
        child.append_to(&mut self.children);
        self
    }

    /// Append a sequence of children.
    pub fn children_from<I>(mut self, children: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Node>,
    {
        self.children.extend(children.into_iter().map(Into::into));
        self
    }
}

/// Create an element with the given tag.
pub fn element(tag: impl Into<String>) -> Element {
    Element::new(tag)
}

/// Create a text node.
pub fn text(content: impl Into<String>) -> Node {
    Node::Text(content.into())
}

macro_rules! tag_constructors {
    ($($name:ident),* $(,)?) => {
        $(
            #[doc = concat!("Create a `<", stringify!($name), ">` element.")]
            pub fn $name() -> Element {
                Element::new(stringify!($name))
            }
        )*
    };
}

tag_constructors!(div, span, p, h1, h2, button, input, ul, li);
