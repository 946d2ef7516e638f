//! A small declarative DOM renderer with state hooks.
//!
//! A component is a function from its [`Hooks`] to an element tree. A
//! [`Root`] renders it into a container element, and every accepted state
//! change renders it again: the container is emptied and the DOM is rebuilt
//! from the new tree. There is no diffing.
//!
//! ```
//! use sprig::prelude::*;
//!
//! fn counter(hooks: &Hooks) -> Element {
//!     let (count, set_count) = hooks.use_state(0);
//!     div()
//!         .child(p().child(format!("Count: {count}")))
//!         .child(
//!             button()
//!                 .on("click", move |_| set_count.update(|n| n + 1))
//!                 .child("Increment"),
//!         )
//! }
//!
//! let document = Document::with_mount_point("root");
//! let root = Root::mount(document.clone(), RootConfig::default()).unwrap();
//! root.render(counter).unwrap();
//!
//! let button = document.elements_by_tag_name(document.body(), "button")[0];
//! document.click(button).unwrap();
//! assert_eq!(
//!     document.inner_html(*root.container()),
//!     "<div><p>Count: 1</p><button>Increment</button></div>"
//! );
//! ```
//!
//! Hosts other than the bundled in-memory [`Document`](dom::Document)
//! implement [`Host`](dom::Host). With the `web` feature the browser DOM is
//! available as `dom::WebHost`.

pub mod dom;
pub mod element;
pub mod error;
pub mod hooks;
pub mod renderer;
pub mod root;

pub use error::{DomError, HookError, ParseError, RenderError};
pub use hooks::{Hooks, SetState, Shared};
pub use root::{Component, Root, RootConfig, create_root};

pub mod prelude {
    pub use crate::dom::{Document, Event, Host};
    pub use crate::element::{
        Element, Node, PropValue, button, div, element, h1, h2, input, li, p, span, text, ul,
    };
    pub use crate::hooks::{Hooks, SetState, Shared};
    pub use crate::root::{Component, Root, RootConfig, create_root};
}
