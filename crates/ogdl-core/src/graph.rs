//! Ordered, labeled graph nodes
//!
//! A [`Graph`] is a handle to a node holding an optional scalar and an
//! ordered list of children. Cloning the handle does not copy the node:
//! both handles see the same content and children. Composition
//! ([`Graph::add_node`], [`Graph::add_nodes`]) records shared handles, so a
//! node may be reachable from several parents, or from itself. Use
//! [`Graph::deep_copy`] for an independent clone.
//!
//! Handles are `!Send`; a graph belongs to one thread.

use std::cell::{Ref, RefCell, RefMut};
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::rc::Rc;

use crate::limits::MAX_DEPTH;
use crate::scalar::{Scalar, Value};

#[derive(Default)]
pub(crate) struct Node {
    content: Option<Scalar>,
    children: Vec<Graph>,
}

/// Handle to a node of an ordered graph
#[derive(Clone, Default)]
pub struct Graph(Rc<RefCell<Node>>);

pub(crate) type NodeKey = *const RefCell<Node>;

impl Graph {
    /// Create a transparent node with no children
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a node holding `content`
    pub fn with(content: impl Into<Scalar>) -> Self {
        Self::from_content(Some(content.into()))
    }

    pub fn from_content(content: Option<Scalar>) -> Self {
        Self(Rc::new(RefCell::new(Node {
            content,
            children: Vec::new(),
        })))
    }

    fn inner(&self) -> Ref<'_, Node> {
        self.0.borrow()
    }

    fn inner_mut(&self) -> RefMut<'_, Node> {
        self.0.borrow_mut()
    }

    /// Identity of the node behind this handle
    pub(crate) fn key(&self) -> NodeKey {
        Rc::as_ptr(&self.0)
    }

    pub fn content(&self) -> Option<Scalar> {
        self.inner().content.clone()
    }

    pub fn set_content(&self, content: Option<Scalar>) {
        self.inner_mut().content = content;
    }

    /// Text of the content, empty for a transparent node
    pub fn label(&self) -> String {
        self.inner()
            .content
            .as_ref()
            .map(Scalar::label)
            .unwrap_or_default()
    }

    /// A node without content: its children splice into a composing parent
    pub fn is_transparent(&self) -> bool {
        self.inner().content.is_none()
    }

    /// Number of children (out degree)
    pub fn len(&self) -> usize {
        self.inner().children.len()
    }

    /// True for a leaf
    pub fn is_empty(&self) -> bool {
        self.inner().children.is_empty()
    }

    /// Handles to the children, in order
    pub fn children(&self) -> Vec<Graph> {
        self.inner().children.clone()
    }

    /// Whether both handles point at the same node
    pub fn ptr_eq(&self, other: &Graph) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    /// Append a new leaf holding `content` and return it
    pub fn add(&self, content: impl Into<Scalar>) -> Graph {
        let node = Graph::with(content);
        self.push(node.clone());
        node
    }

    /// Compose `node` into this one
    ///
    /// A transparent node is not added itself; its children are appended
    /// instead. Either way the handles are shared, not copied.
    pub fn add_node(&self, node: &Graph) -> Graph {
        if node.is_transparent() {
            let children = node.children();
            self.inner_mut().children.extend(children);
        } else {
            self.push(node.clone());
        }
        node.clone()
    }

    /// Append a dynamically typed value: scalars become leaves, graphs are
    /// composed and `Nil` becomes an empty transparent child.
    pub fn add_value(&self, value: Value) -> Graph {
        match value {
            Value::Nil => {
                let node = Graph::new();
                self.push(node.clone());
                node
            }
            Value::Graph(g) => self.add_node(&g),
            other => match other.to_scalar() {
                Some(s) => self.add(s),
                None => Graph::new(),
            },
        }
    }

    /// Append `node` as a single child, transparent or not
    pub(crate) fn push(&self, node: Graph) {
        self.inner_mut().children.push(node);
    }

    /// Append the children of `other`, sharing them
    pub fn add_nodes(&self, other: &Graph) -> &Self {
        let children = other.children();
        self.inner_mut().children.extend(children);
        self
    }

    /// Append the children of `other` whose label equals `key`, optionally
    /// searching all descendants of `other` as well
    pub fn add_equal_nodes(&self, other: &Graph, key: &str, recurse: bool) -> &Self {
        let mut seen = HashSet::new();
        self.add_equal_nodes_inner(other, key, recurse, &mut seen);
        self
    }

    fn add_equal_nodes_inner(
        &self,
        other: &Graph,
        key: &str,
        recurse: bool,
        seen: &mut HashSet<NodeKey>,
    ) {
        if !seen.insert(other.key()) {
            return;
        }
        for node in other.children() {
            if node.label() == key {
                self.push(node.clone());
            }
            if recurse {
                self.add_equal_nodes_inner(&node, key, true, seen);
            }
        }
    }

    /// Append deep copies of the children of `other`
    pub fn copy_from(&self, other: &Graph) {
        let mut copies = HashMap::new();
        for node in other.children() {
            let copy = node.copy_with(&mut copies);
            self.push(copy);
        }
    }

    /// Independent clone of this subtree
    ///
    /// Nodes shared inside the subtree stay shared in the copy, and cycles
    /// are reproduced rather than unrolled.
    pub fn deep_copy(&self) -> Graph {
        self.copy_with(&mut HashMap::new())
    }

    fn copy_with(&self, copies: &mut HashMap<NodeKey, Graph>) -> Graph {
        if let Some(copy) = copies.get(&self.key()) {
            return copy.clone();
        }
        let copy = Graph::from_content(self.content());
        copies.insert(self.key(), copy.clone());
        for node in self.children() {
            let child = node.copy_with(copies);
            copy.push(child);
        }
        copy
    }

    /// First child whose label equals `name`
    pub fn node(&self, name: &str) -> Option<Graph> {
        self.inner()
            .children
            .iter()
            .find(|node| node.label() == name)
            .cloned()
    }

    /// Child at position `i`
    pub fn get_at(&self, i: usize) -> Option<Graph> {
        self.inner().children.get(i).cloned()
    }

    /// Remove every child whose content equals `content`
    pub fn delete(&self, content: &Scalar) {
        let kept: Vec<Graph> = self
            .children()
            .into_iter()
            .filter(|node| node.inner().content.as_ref() != Some(content))
            .collect();
        self.inner_mut().children = kept;
    }

    /// Remove the child at position `i`; out of range is a no-op
    pub fn delete_at(&self, i: usize) {
        let mut node = self.inner_mut();
        if i < node.children.len() {
            node.children.remove(i);
        }
    }

    /// Drop all children
    pub fn clear(&self) {
        self.inner_mut().children.clear();
    }

    /// Grow the children list to at least `len`, padding with fresh nodes
    pub(crate) fn grow(&self, len: usize) {
        let mut node = self.inner_mut();
        if node.children.len() < len {
            node.children.resize_with(len, Graph::new);
        }
    }

    pub(crate) fn replace_at(&self, i: usize, child: Graph) {
        if let Some(slot) = self.inner_mut().children.get_mut(i) {
            *slot = child;
        }
    }

    /// Replace the content of every node below this one whose label
    /// equals `key`. Each node is visited once, so cycles terminate.
    pub fn substitute(&self, key: &str, content: impl Into<Scalar>) {
        let content = content.into();
        let mut seen = HashSet::new();
        seen.insert(self.key());
        self.substitute_inner(key, &content, &mut seen);
    }

    fn substitute_inner(&self, key: &str, content: &Scalar, seen: &mut HashSet<NodeKey>) {
        for node in self.children() {
            if !seen.insert(node.key()) {
                continue;
            }
            if node.label() == key {
                node.set_content(Some(content.clone()));
            }
            node.substitute_inner(key, content, seen);
        }
    }

    /// Depth of the graph, `None` once it exceeds [`MAX_DEPTH`]
    ///
    /// A leaf has depth 0. This does not track visited nodes: a cycle shows
    /// up as depth overflow, and so does a legitimately deep tree.
    pub fn depth(&self) -> Option<usize> {
        self.depth_at(0)
    }

    fn depth_at(&self, level: usize) -> Option<usize> {
        if self.is_empty() {
            return Some(0);
        }
        if level > MAX_DEPTH {
            return None;
        }
        let mut max = 0;
        for node in self.children() {
            max = max.max(node.depth_at(level + 1)?);
        }
        if max > MAX_DEPTH {
            return None;
        }
        Some(max + 1)
    }

    /// Whether any node is reachable from itself
    pub fn has_cycle(&self) -> bool {
        let mut on_path = HashSet::new();
        let mut done = HashSet::new();
        self.has_cycle_inner(&mut on_path, &mut done)
    }

    fn has_cycle_inner(&self, on_path: &mut HashSet<NodeKey>, done: &mut HashSet<NodeKey>) -> bool {
        if done.contains(&self.key()) {
            return false;
        }
        if !on_path.insert(self.key()) {
            return true;
        }
        for node in self.children() {
            if node.has_cycle_inner(on_path, done) {
                return true;
            }
        }
        on_path.remove(&self.key());
        done.insert(self.key());
        false
    }

    /// Structural equality: same content, same children in the same order
    ///
    /// A pair of nodes already under comparison is assumed equal, so two
    /// cyclic graphs compare equal when they unfold to the same tree.
    pub fn equals(&self, other: &Graph) -> bool {
        self.equals_inner(other, &mut HashSet::new())
    }

    fn equals_inner(&self, other: &Graph, assumed: &mut HashSet<(NodeKey, NodeKey)>) -> bool {
        if self.ptr_eq(other) || !assumed.insert((self.key(), other.key())) {
            return true;
        }
        let a = self.inner();
        let b = other.inner();
        a.content == b.content
            && a.children.len() == b.children.len()
            && a
                .children
                .iter()
                .zip(&b.children)
                .all(|(x, y)| x.equals_inner(y, assumed))
    }
}

impl PartialEq for Graph {
    fn eq(&self, other: &Self) -> bool {
        self.equals(other)
    }
}

impl fmt::Debug for Graph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        DebugNode {
            graph: self,
            level: 0,
            parent: None,
        }
        .fmt(f)
    }
}

struct DebugNode<'a> {
    graph: &'a Graph,
    level: usize,
    parent: Option<&'a DebugNode<'a>>,
}

impl DebugNode<'_> {
    /// Whether `graph` is this node or one of its ancestors
    fn on_path(&self, graph: &Graph) -> bool {
        let mut current = Some(self);
        while let Some(node) = current {
            if node.graph.ptr_eq(graph) {
                return true;
            }
            current = node.parent;
        }
        false
    }
}

impl fmt::Debug for DebugNode<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let node = self.graph.inner();
        let mut s = f.debug_struct("Graph");
        s.field("content", &node.content);
        let cyclic = node.children.iter().any(|child| self.on_path(child));
        if cyclic || self.level >= MAX_DEPTH {
            // Back edges and overly deep levels print as a child count
            s.field("children", &node.children.len());
        } else {
            let children: Vec<_> = node
                .children
                .iter()
                .map(|graph| DebugNode {
                    graph,
                    level: self.level + 1,
                    parent: Some(self),
                })
                .collect();
            s.field("children", &children);
        }
        s.finish()
    }
}

impl fmt::Display for Graph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&crate::emit::text(self))
    }
}
