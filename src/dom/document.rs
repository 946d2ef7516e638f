//! In-memory DOM.
//!
//! Nodes live in a sparse-set arena with generational indices:
//!
//! - **Dense storage**: node data is kept contiguously and removed with
//!   swap-remove, so teardown never leaves holes.
//! - **Sparse map**: `NodeId` → dense slot in O(1).
//! - **Generations**: a freed slot bumps its generation, so a `NodeId` held
//!   across a re-render can never alias the node that reused its slot.
//!
//! [`Document`] is a shared handle (`Rc<RefCell<_>>`). Borrows never span a
//! listener call, which lets a listener re-render into the same document.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use super::{Event, Host, Listener, is_valid_name};
use crate::error::DomError;

/// Elements that never have children or an end tag when serialized.
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

/// Handle to a node in a [`Document`].
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct NodeId {
    index: u32,
    generation: u32,
}

impl NodeId {
    fn new(index: u32, generation: u32) -> Self {
        Self { index, generation }
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}v{}", self.index, self.generation)
    }
}

enum NodeKind {
    Element {
        tag: String,
        attributes: Vec<(String, String)>,
    },
    Text(String),
}

struct NodeData {
    kind: NodeKind,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    listeners: Vec<(String, Listener)>,
    /// Back-pointer to the sparse slot (for swap-remove fixup)
    sparse_index: u32,
}

struct SparseEntry {
    dense_index: Option<usize>,
    generation: u32,
}

#[derive(Default)]
struct Arena {
    dense: Vec<NodeData>,
    sparse: Vec<SparseEntry>,
    free_indices: Vec<u32>,
}

impl Arena {
    fn insert(&mut self, kind: NodeKind) -> NodeId {
        let (sparse_index, generation) = if let Some(index) = self.free_indices.pop() {
            let entry = &mut self.sparse[index as usize];
            entry.generation = entry.generation.wrapping_add(1);
            (index, entry.generation)
        } else {
            let index = self.sparse.len() as u32;
            self.sparse.push(SparseEntry {
                dense_index: None,
                generation: 0,
            });
            (index, 0)
        };

        self.sparse[sparse_index as usize].dense_index = Some(self.dense.len());
        self.dense.push(NodeData {
            kind,
            parent: None,
            children: Vec::new(),
            listeners: Vec::new(),
            sparse_index,
        });

        NodeId::new(sparse_index, generation)
    }

    fn dense_index(&self, id: NodeId) -> Option<usize> {
        self.sparse
            .get(id.index as usize)
            .filter(|entry| entry.generation == id.generation)
            .and_then(|entry| entry.dense_index)
    }

    fn get(&self, id: NodeId) -> Option<&NodeData> {
        self.dense_index(id).map(|idx| &self.dense[idx])
    }

    fn get_mut(&mut self, id: NodeId) -> Option<&mut NodeData> {
        self.dense_index(id).map(|idx| &mut self.dense[idx])
    }

    fn node(&self, id: NodeId) -> Result<&NodeData, DomError> {
        self.get(id)
            .ok_or_else(|| DomError::NodeNotFound(id.to_string()))
    }

    fn element_mut(&mut self, id: NodeId) -> Result<&mut NodeData, DomError> {
        let node = self
            .get_mut(id)
            .ok_or_else(|| DomError::NodeNotFound(id.to_string()))?;
        match node.kind {
            NodeKind::Element { .. } => Ok(node),
            NodeKind::Text(_) => Err(DomError::NotAnElement(id.to_string())),
        }
    }

    /// Swap-remove a single node. Its children are left dangling.
    fn remove(&mut self, id: NodeId) -> Option<NodeData> {
        let dense_index = self.dense_index(id)?;
        let last = self.dense.len() - 1;
        let removed = self.dense.swap_remove(dense_index);

        if dense_index != last {
            let moved = self.dense[dense_index].sparse_index;
            self.sparse[moved as usize].dense_index = Some(dense_index);
        }

        self.sparse[id.index as usize].dense_index = None;
        self.free_indices.push(id.index);
        Some(removed)
    }

    /// Remove a node and all its descendants, handing the data back so the
    /// caller can drop listeners outside the borrow.
    fn remove_subtree(&mut self, root: NodeId, removed: &mut Vec<NodeData>) {
        let mut stack = vec![root];
        while let Some(id) = stack.pop() {
            if let Some(mut node) = self.remove(id) {
                stack.append(&mut node.children);
                removed.push(node);
            }
        }
    }

    fn detach(&mut self, child: NodeId) {
        let parent = self.get(child).and_then(|node| node.parent);
        if let Some(parent) = parent.and_then(|parent| self.get_mut(parent)) {
            parent.children.retain(|&c| c != child);
        }
        if let Some(node) = self.get_mut(child) {
            node.parent = None;
        }
    }

    fn is_inclusive_ancestor(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.get(id).and_then(|n| n.parent);
        }
        false
    }

    /// Descendants of `root` in document order, `root` excluded.
    fn descendants(&self, root: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self
            .get(root)
            .map(|node| node.children.iter().rev().copied().collect())
            .unwrap_or_default();
        while let Some(id) = stack.pop() {
            out.push(id);
            if let Some(node) = self.get(id) {
                stack.extend(node.children.iter().rev().copied());
            }
        }
        out
    }

    fn attribute(&self, id: NodeId, name: &str) -> Option<&str> {
        match &self.get(id)?.kind {
            NodeKind::Element { attributes, .. } => attributes
                .iter()
                .find(|(key, _)| key == name)
                .map(|(_, value)| value.as_str()),
            NodeKind::Text(_) => None,
        }
    }

    fn write_text_content(&self, id: NodeId, out: &mut String) {
        let Some(node) = self.get(id) else {
            return;
        };
        match &node.kind {
            NodeKind::Text(text) => out.push_str(text),
            NodeKind::Element { .. } => {
                for &child in &node.children {
                    self.write_text_content(child, out);
                }
            }
        }
    }

    fn write_html(&self, id: NodeId, out: &mut String) {
        let Some(node) = self.get(id) else {
            return;
        };
        match &node.kind {
            NodeKind::Text(text) => escape_text(text, out),
            NodeKind::Element { tag, attributes } => {
                out.push('<');
                out.push_str(tag);
                for (name, value) in attributes {
                    out.push(' ');
                    out.push_str(name);
                    out.push_str("=\"");
                    escape_attribute(value, out);
                    out.push('"');
                }
                out.push('>');
                if VOID_ELEMENTS.contains(&tag.as_str()) {
                    return;
                }
                for &child in &node.children {
                    self.write_html(child, out);
                }
                out.push_str("</");
                out.push_str(tag);
                out.push('>');
            }
        }
    }
}

fn escape_text(text: &str, out: &mut String) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '\u{a0}' => out.push_str("&nbsp;"),
            _ => out.push(c),
        }
    }
}

fn escape_attribute(value: &str, out: &mut String) {
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '\u{a0}' => out.push_str("&nbsp;"),
            _ => out.push(c),
        }
    }
}

/// An in-memory HTML document.
///
/// Cloning yields another handle to the same document.
#[derive(Clone)]
pub struct Document {
    arena: Rc<RefCell<Arena>>,
    body: NodeId,
}

impl Document {
    /// Create a document containing an empty `<body>`.
    pub fn new() -> Self {
        let mut arena = Arena::default();
        let body = arena.insert(NodeKind::Element {
            tag: "body".to_string(),
            attributes: Vec::new(),
        });
        Self {
            arena: Rc::new(RefCell::new(arena)),
            body,
        }
    }

    /// Create a document whose body holds a single `<div id="{id}">`,
    /// the page layout a root is usually mounted into.
    pub fn with_mount_point(id: &str) -> Self {
        let document = Self::new();
        document.with_arena_mut(|arena| {
            let mount = arena.insert(NodeKind::Element {
                tag: "div".to_string(),
                attributes: vec![("id".to_string(), id.to_string())],
            });
            if let Some(node) = arena.get_mut(mount) {
                node.parent = Some(document.body);
            }
            if let Some(body) = arena.get_mut(document.body) {
                body.children.push(mount);
            }
        });
        document
    }

    fn with_arena<R>(&self, f: impl FnOnce(&Arena) -> R) -> R {
        f(&self.arena.borrow())
    }

    fn with_arena_mut<R>(&self, f: impl FnOnce(&mut Arena) -> R) -> R {
        f(&mut self.arena.borrow_mut())
    }

    /// The `<body>` element; the root of every connected node.
    pub fn body(&self) -> NodeId {
        self.body
    }

    /// Whether `id` still refers to a live node.
    pub fn contains(&self, id: NodeId) -> bool {
        self.with_arena(|arena| arena.get(id).is_some())
    }

    /// Number of live nodes, attached or not.
    pub fn node_count(&self) -> usize {
        self.with_arena(|arena| arena.dense.len())
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.with_arena(|arena| arena.get(id).and_then(|node| node.parent))
    }

    /// Children of a node in order. Empty for unknown ids.
    pub fn children(&self, id: NodeId) -> Vec<NodeId> {
        self.with_arena(|arena| {
            arena
                .get(id)
                .map(|node| node.children.clone())
                .unwrap_or_default()
        })
    }

    pub fn first_child(&self, id: NodeId) -> Option<NodeId> {
        self.with_arena(|arena| arena.get(id).and_then(|node| node.children.first().copied()))
    }

    /// Lower-case tag name, or `None` for text nodes and unknown ids.
    pub fn tag_name(&self, id: NodeId) -> Option<String> {
        self.with_arena(|arena| match &arena.get(id)?.kind {
            NodeKind::Element { tag, .. } => Some(tag.clone()),
            NodeKind::Text(_) => None,
        })
    }

    /// Data of a text node, or `None` for elements and unknown ids.
    pub fn text(&self, id: NodeId) -> Option<String> {
        self.with_arena(|arena| match &arena.get(id)?.kind {
            NodeKind::Text(text) => Some(text.clone()),
            NodeKind::Element { .. } => None,
        })
    }

    pub fn attribute(&self, id: NodeId, name: &str) -> Option<String> {
        self.with_arena(|arena| arena.attribute(id, name).map(str::to_string))
    }

    /// All attributes of an element in the order they were first set.
    pub fn attributes(&self, id: NodeId) -> Vec<(String, String)> {
        self.with_arena(|arena| match arena.get(id).map(|node| &node.kind) {
            Some(NodeKind::Element { attributes, .. }) => attributes.clone(),
            _ => Vec::new(),
        })
    }

    /// Number of listeners registered for `event_type` directly on `id`.
    pub fn listener_count(&self, id: NodeId, event_type: &str) -> usize {
        self.with_arena(|arena| {
            arena.get(id).map_or(0, |node| {
                node.listeners
                    .iter()
                    .filter(|(ty, _)| ty == event_type)
                    .count()
            })
        })
    }

    /// Concatenated text of all descendant text nodes.
    pub fn text_content(&self, id: NodeId) -> String {
        let mut out = String::new();
        self.with_arena(|arena| arena.write_text_content(id, &mut out));
        out
    }

    /// HTML serialization of the node itself.
    pub fn outer_html(&self, id: NodeId) -> String {
        let mut out = String::new();
        self.with_arena(|arena| arena.write_html(id, &mut out));
        out
    }

    /// HTML serialization of the node's children.
    pub fn inner_html(&self, id: NodeId) -> String {
        let mut out = String::new();
        self.with_arena(|arena| {
            if let Some(node) = arena.get(id) {
                for &child in &node.children {
                    arena.write_html(child, &mut out);
                }
            }
        });
        out
    }

    /// Descendant elements of `root` with the given tag, in document order.
    pub fn elements_by_tag_name(&self, root: NodeId, tag: &str) -> Vec<NodeId> {
        let tag = tag.to_ascii_lowercase();
        self.with_arena(|arena| {
            arena
                .descendants(root)
                .into_iter()
                .filter(|&id| {
                    matches!(arena.get(id).map(|n| &n.kind), Some(NodeKind::Element { tag: t, .. }) if *t == tag)
                })
                .collect()
        })
    }

    /// Remove `child` from `parent` and free it together with its subtree.
    ///
    /// Ids of the freed nodes go stale; there is no garbage collector to keep
    /// a removed node alive for re-insertion.
    pub fn remove_child(&self, parent: NodeId, child: NodeId) -> Result<(), DomError> {
        self.with_arena(|arena| {
            arena.node(parent)?;
            if arena.node(child)?.parent != Some(parent) {
                return Err(DomError::NotAChild {
                    parent: parent.to_string(),
                    child: child.to_string(),
                });
            }
            Ok(())
        })?;
        self.free_subtree(child);
        Ok(())
    }

    /// Detach `id` and free it with everything below it. Returns the number
    /// of nodes freed.
    fn free_subtree(&self, id: NodeId) -> usize {
        let removed = self.with_arena_mut(|arena| {
            arena.detach(id);
            let mut removed = Vec::new();
            arena.remove_subtree(id, &mut removed);
            removed
        });
        let count = removed.len();
        // Listeners may own arbitrary state; drop them with the arena released.
        drop(removed);
        count
    }

    /// Dispatch a bubbling event at `target`.
    ///
    /// The propagation path (target, then each ancestor) and its listeners are
    /// captured before any listener runs, so listeners that rebuild the tree
    /// do not change who receives this event. Returns the number of listeners
    /// invoked.
    pub fn dispatch_event(&self, target: NodeId, event_type: &str) -> Result<usize, DomError> {
        let listeners: Vec<Listener> = self.with_arena(|arena| {
            arena.node(target)?;
            let mut listeners = Vec::new();
            let mut current = Some(target);
            while let Some(id) = current {
                let Some(node) = arena.get(id) else {
                    break;
                };
                listeners.extend(
                    node.listeners
                        .iter()
                        .filter(|(ty, _)| ty == event_type)
                        .map(|(_, listener)| Rc::clone(listener)),
                );
                current = node.parent;
            }
            Ok::<_, DomError>(listeners)
        })?;

        log::trace!(
            "dispatching `{event_type}` at {target} to {} listener(s)",
            listeners.len()
        );

        let event = Event::new(event_type);
        for listener in &listeners {
            listener(&event);
        }
        Ok(listeners.len())
    }

    /// Simulate a click on `target`.
    pub fn click(&self, target: NodeId) -> Result<usize, DomError> {
        self.dispatch_event(target, "click")
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Document")
            .field("body", &self.body)
            .field("nodes", &self.node_count())
            .finish()
    }
}

impl Host for Document {
    type Node = NodeId;

    fn get_element_by_id(&self, id: &str) -> Option<NodeId> {
        self.with_arena(|arena| {
            std::iter::once(self.body)
                .chain(arena.descendants(self.body))
                .find(|&node| arena.attribute(node, "id") == Some(id))
        })
    }

    fn create_element(&self, tag: &str) -> Result<NodeId, DomError> {
        if !is_valid_name(tag) {
            return Err(DomError::InvalidCharacter(tag.to_string()));
        }
        Ok(self.with_arena_mut(|arena| {
            arena.insert(NodeKind::Element {
                tag: tag.to_ascii_lowercase(),
                attributes: Vec::new(),
            })
        }))
    }

    fn create_text_node(&self, text: &str) -> NodeId {
        self.with_arena_mut(|arena| arena.insert(NodeKind::Text(text.to_string())))
    }

    fn set_attribute(&self, element: &NodeId, name: &str, value: &str) -> Result<(), DomError> {
        if !is_valid_name(name) {
            return Err(DomError::InvalidCharacter(name.to_string()));
        }
        let name = name.to_ascii_lowercase();
        self.with_arena_mut(|arena| {
            let node = arena.element_mut(*element)?;
            if let NodeKind::Element { attributes, .. } = &mut node.kind {
                match attributes.iter_mut().find(|(key, _)| *key == name) {
                    Some((_, existing)) => *existing = value.to_string(),
                    None => attributes.push((name, value.to_string())),
                }
            }
            Ok(())
        })
    }

    fn add_event_listener(
        &self,
        element: &NodeId,
        event_type: &str,
        listener: Listener,
    ) -> Result<(), DomError> {
        self.with_arena_mut(|arena| {
            let node = arena
                .get_mut(*element)
                .ok_or_else(|| DomError::NodeNotFound(element.to_string()))?;
            let registered = node
                .listeners
                .iter()
                .any(|(ty, existing)| ty == event_type && Rc::ptr_eq(existing, &listener));
            if !registered {
                node.listeners.push((event_type.to_string(), listener));
            }
            Ok(())
        })
    }

    fn append_child(&self, parent: &NodeId, child: &NodeId) -> Result<(), DomError> {
        let (parent, child) = (*parent, *child);
        self.with_arena_mut(|arena| {
            arena.node(child)?;
            if let NodeKind::Text(_) = arena.node(parent)?.kind {
                return Err(DomError::HierarchyRequest("text nodes cannot have children"));
            }
            if arena.is_inclusive_ancestor(child, parent) {
                return Err(DomError::HierarchyRequest(
                    "a node cannot be inserted into itself or its descendants",
                ));
            }
            arena.detach(child);
            if let Some(node) = arena.get_mut(child) {
                node.parent = Some(parent);
            }
            if let Some(node) = arena.get_mut(parent) {
                node.children.push(child);
            }
            Ok(())
        })
    }

    fn clear_children(&self, parent: &NodeId) -> Result<(), DomError> {
        let children = self.with_arena(|arena| {
            arena
                .get(*parent)
                .map(|node| node.children.clone())
                .ok_or_else(|| DomError::NodeNotFound(parent.to_string()))
        })?;
        let freed: usize = children.into_iter().map(|child| self.free_subtree(child)).sum();
        log::trace!("freed {freed} node(s) below {parent}");
        Ok(())
    }

    fn discard(&self, node: &NodeId) {
        let freed = self.free_subtree(*node);
        log::trace!("discarded {node} ({freed} node(s))");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn append_text(doc: &Document, parent: NodeId, text: &str) -> NodeId {
        let node = doc.create_text_node(text);
        doc.append_child(&parent, &node).unwrap();
        node
    }

    #[test]
    fn test_build_and_serialize() {
        let doc = Document::new();
        let div = doc.create_element("DIV").unwrap();
        doc.set_attribute(&div, "Class", "box").unwrap();
        let p = doc.create_element("p").unwrap();
        append_text(&doc, p, "hi");
        doc.append_child(&div, &p).unwrap();
        doc.append_child(&doc.body(), &div).unwrap();

        assert_eq!(doc.tag_name(div).as_deref(), Some("div"));
        assert_eq!(doc.attribute(div, "class").as_deref(), Some("box"));
        assert_eq!(doc.outer_html(div), r#"<div class="box"><p>hi</p></div>"#);
        assert_eq!(doc.inner_html(doc.body()), r#"<div class="box"><p>hi</p></div>"#);
        assert_eq!(doc.text_content(div), "hi");
    }

    #[test]
    fn test_invalid_tag_is_rejected() {
        let doc = Document::new();
        assert_eq!(
            doc.create_element("1abc"),
            Err(DomError::InvalidCharacter("1abc".to_string()))
        );
        let div = doc.create_element("div").unwrap();
        assert!(matches!(
            doc.set_attribute(&div, "bad name", "x"),
            Err(DomError::InvalidCharacter(_))
        ));
    }

    #[test]
    fn test_set_attribute_on_text_fails() {
        let doc = Document::new();
        let text = doc.create_text_node("x");
        assert!(matches!(
            doc.set_attribute(&text, "id", "a"),
            Err(DomError::NotAnElement(_))
        ));
    }

    #[test]
    fn test_set_attribute_replaces_in_place() {
        let doc = Document::new();
        let div = doc.create_element("div").unwrap();
        doc.set_attribute(&div, "a", "1").unwrap();
        doc.set_attribute(&div, "b", "2").unwrap();
        doc.set_attribute(&div, "a", "3").unwrap();
        assert_eq!(
            doc.attributes(div),
            vec![("a".to_string(), "3".to_string()), ("b".to_string(), "2".to_string())]
        );
    }

    #[test]
    fn test_clear_children_frees_subtree() {
        let doc = Document::with_mount_point("root");
        let root = doc.get_element_by_id("root").unwrap();
        let before = doc.node_count();

        let ul = doc.create_element("ul").unwrap();
        for i in 0..3 {
            let li = doc.create_element("li").unwrap();
            append_text(&doc, li, &i.to_string());
            doc.append_child(&ul, &li).unwrap();
        }
        doc.append_child(&root, &ul).unwrap();
        assert_eq!(doc.node_count(), before + 7);

        doc.clear_children(&root).unwrap();
        assert_eq!(doc.node_count(), before);
        assert!(!doc.contains(ul));
        assert!(doc.children(root).is_empty());
        assert!(doc.contains(root));
    }

    #[test]
    fn test_stale_id_does_not_alias_reused_slot() {
        let doc = Document::new();
        let old = doc.create_element("span").unwrap();
        doc.append_child(&doc.body(), &old).unwrap();
        doc.clear_children(&doc.body()).unwrap();

        let new = doc.create_element("em").unwrap();
        assert_ne!(old, new);
        assert!(!doc.contains(old));
        assert_eq!(doc.tag_name(old), None);
        assert_eq!(doc.tag_name(new).as_deref(), Some("em"));
        assert!(matches!(
            doc.append_child(&doc.body(), &old),
            Err(DomError::NodeNotFound(_))
        ));
    }

    #[test]
    fn test_append_reparents() {
        let doc = Document::new();
        let a = doc.create_element("a").unwrap();
        let b = doc.create_element("b").unwrap();
        let child = doc.create_element("i").unwrap();
        doc.append_child(&a, &child).unwrap();
        doc.append_child(&b, &child).unwrap();
        assert!(doc.children(a).is_empty());
        assert_eq!(doc.children(b), vec![child]);
        assert_eq!(doc.parent(child), Some(b));
    }

    #[test]
    fn test_hierarchy_errors() {
        let doc = Document::new();
        let outer = doc.create_element("div").unwrap();
        let inner = doc.create_element("div").unwrap();
        doc.append_child(&outer, &inner).unwrap();
        assert!(matches!(
            doc.append_child(&inner, &outer),
            Err(DomError::HierarchyRequest(_))
        ));
        assert!(matches!(
            doc.append_child(&outer, &outer),
            Err(DomError::HierarchyRequest(_))
        ));
        let text = doc.create_text_node("t");
        assert!(matches!(
            doc.append_child(&text, &outer),
            Err(DomError::HierarchyRequest(_))
        ));
    }

    #[test]
    fn test_remove_child_frees_subtree() {
        let doc = Document::new();
        let div = doc.create_element("div").unwrap();
        let span = doc.create_element("span").unwrap();
        let inner = append_text(&doc, span, "x");
        doc.append_child(&div, &span).unwrap();
        let before = doc.node_count();

        doc.remove_child(div, span).unwrap();
        assert!(doc.children(div).is_empty());
        assert!(!doc.contains(span));
        assert!(!doc.contains(inner));
        assert_eq!(doc.node_count(), before - 2);
        assert!(matches!(
            doc.remove_child(div, span),
            Err(DomError::NodeNotFound(_))
        ));
    }

    #[test]
    fn test_remove_child_requires_parent() {
        let doc = Document::new();
        let div = doc.create_element("div").unwrap();
        let stray = doc.create_element("span").unwrap();
        assert!(matches!(
            doc.remove_child(div, stray),
            Err(DomError::NotAChild { .. })
        ));
        assert!(doc.contains(stray));
    }

    #[test]
    fn test_discard_frees_detached_and_attached_nodes() {
        let doc = Document::new();
        let before = doc.node_count();
        let detached = doc.create_element("ul").unwrap();
        append_text(&doc, detached, "a");
        doc.discard(&detached);
        assert_eq!(doc.node_count(), before);

        let attached = doc.create_element("p").unwrap();
        doc.append_child(&doc.body(), &attached).unwrap();
        doc.discard(&attached);
        assert!(doc.children(doc.body()).is_empty());
        assert_eq!(doc.node_count(), before);
    }

    #[test]
    fn test_get_element_by_id_only_finds_connected_nodes() {
        let doc = Document::with_mount_point("app");
        assert!(doc.get_element_by_id("app").is_some());
        let detached = doc.create_element("div").unwrap();
        doc.set_attribute(&detached, "id", "ghost").unwrap();
        assert_eq!(doc.get_element_by_id("ghost"), None);
        doc.append_child(&doc.body(), &detached).unwrap();
        assert_eq!(doc.get_element_by_id("ghost"), Some(detached));
    }

    #[test]
    fn test_click_bubbles_to_ancestors() {
        let doc = Document::new();
        let div = doc.create_element("div").unwrap();
        let button = doc.create_element("button").unwrap();
        doc.append_child(&div, &button).unwrap();

        let order = Rc::new(RefCell::new(Vec::new()));
        let o = order.clone();
        doc.add_event_listener(&button, "click", Rc::new(move |_: &Event| o.borrow_mut().push("button")))
            .unwrap();
        let o = order.clone();
        doc.add_event_listener(&div, "click", Rc::new(move |_: &Event| o.borrow_mut().push("div")))
            .unwrap();

        assert_eq!(doc.click(button).unwrap(), 2);
        assert_eq!(*order.borrow(), vec!["button", "div"]);
        assert_eq!(doc.dispatch_event(button, "input").unwrap(), 0);
    }

    #[test]
    fn test_same_listener_registered_once() {
        let doc = Document::new();
        let button = doc.create_element("button").unwrap();
        let hits = Rc::new(Cell::new(0));
        let h = hits.clone();
        let listener: Listener = Rc::new(move |_: &Event| h.set(h.get() + 1));
        doc.add_event_listener(&button, "click", listener.clone()).unwrap();
        doc.add_event_listener(&button, "click", listener).unwrap();
        assert_eq!(doc.listener_count(button, "click"), 1);
        doc.click(button).unwrap();
        assert_eq!(hits.get(), 1);
    }

    #[test]
    fn test_listener_may_mutate_document() {
        let doc = Document::with_mount_point("root");
        let root = doc.get_element_by_id("root").unwrap();
        let button = doc.create_element("button").unwrap();
        doc.append_child(&root, &button).unwrap();

        let handle = doc.clone();
        doc.add_event_listener(
            &button,
            "click",
            Rc::new(move |_: &Event| {
                handle.clear_children(&root).unwrap();
                let p = handle.create_element("p").unwrap();
                handle.append_child(&root, &p).unwrap();
            }),
        )
        .unwrap();

        doc.click(button).unwrap();
        assert!(!doc.contains(button));
        assert_eq!(doc.inner_html(root), "<p></p>");
    }

    #[test]
    fn test_escaping_and_void_elements() {
        let doc = Document::new();
        let div = doc.create_element("div").unwrap();
        doc.set_attribute(&div, "title", "a \"b\" & c").unwrap();
        append_text(&doc, div, "1 < 2 & 3 > 2");
        let input = doc.create_element("input").unwrap();
        doc.set_attribute(&input, "value", "x").unwrap();
        doc.append_child(&div, &input).unwrap();
        assert_eq!(
            doc.outer_html(div),
            r#"<div title="a &quot;b&quot; &amp; c">1 &lt; 2 &amp; 3 &gt; 2<input value="x"></div>"#
        );
    }

    #[test]
    fn test_elements_by_tag_name_in_document_order() {
        let doc = Document::new();
        let outer = doc.create_element("div").unwrap();
        let first = doc.create_element("button").unwrap();
        let inner = doc.create_element("div").unwrap();
        let second = doc.create_element("BUTTON").unwrap();
        doc.append_child(&outer, &first).unwrap();
        doc.append_child(&outer, &inner).unwrap();
        doc.append_child(&inner, &second).unwrap();
        assert_eq!(doc.elements_by_tag_name(outer, "button"), vec![first, second]);
        assert_eq!(doc.elements_by_tag_name(outer, "div"), vec![inner]);
    }
}
