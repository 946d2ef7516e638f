//! Error types shared by the DOM hosts, the hook container and the root.

use thiserror::Error;

/// Failures raised by a [`Host`](crate::dom::Host) while building the DOM.
///
/// These mirror the DOM exceptions a browser would throw for the same call,
/// so a malformed element tree fails the same way in every host.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomError {
    /// A tag or attribute name is not a valid XML name (`InvalidCharacterError`).
    #[error("`{0}` is not a valid element or attribute name")]
    InvalidCharacter(String),
    /// The node was removed from the document or never belonged to it.
    #[error("node {0} does not exist in this document")]
    NodeNotFound(String),
    /// An element-only operation was attempted on a text node.
    #[error("node {0} is not an element")]
    NotAnElement(String),
    /// The requested insertion would produce an invalid tree (`HierarchyRequestError`).
    #[error("hierarchy request error: {0}")]
    HierarchyRequest(&'static str),
    /// The node to remove is not a child of the given parent (`NotFoundError`).
    #[error("node {child} is not a child of {parent}")]
    NotAChild {
        /// The node passed as parent.
        parent: String,
        /// The node that was expected to be a child.
        child: String,
    },
    /// Error reported by the underlying platform (e.g. a JavaScript exception).
    #[error("host error: {0}")]
    Host(String),
}

/// Misuse of the hook container.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HookError {
    /// `use_state` was called while no render pass was active.
    #[error("use_state can only be called inside a component while it renders")]
    OutsideRender,
    /// The slot at `index` was seeded with a different type on an earlier pass.
    ///
    /// This is what a conditional or reordered hook call looks like.
    #[error("hook slot {index} holds `{found}` but `{expected}` was requested; hooks must be called in the same order on every render")]
    SlotTypeMismatch {
        /// Call-order index of the offending hook.
        index: usize,
        /// Type requested by the current call.
        expected: &'static str,
        /// Type stored in the slot.
        found: &'static str,
    },
}

/// Failures of a render pass or of mounting a root.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenderError {
    /// Converting the element tree into DOM nodes failed.
    #[error(transparent)]
    Dom(#[from] DomError),
    /// No element with the configured id exists in the host document.
    #[error("mount point with id `{0}` not found")]
    ContainerNotFound(String),
    /// State kept changing during rendering for more passes than allowed.
    #[error("component kept updating its state while rendering ({limit} re-renders)")]
    RenderLoop {
        /// The configured `max_rerenders` that was exceeded.
        limit: usize,
    },
}

/// Failures decoding an element tree from its JSON form.
#[derive(Debug, Error)]
pub enum ParseError {
    /// The input is not valid JSON.
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    /// The value has no properties to read a node from (`null`).
    #[error("{0} cannot describe a node")]
    InvalidNode(&'static str),
}
