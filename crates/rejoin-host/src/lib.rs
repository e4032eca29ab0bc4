//! In-memory host platform for Rejoin.
//!
//! [`TreeHost`] is a retained node tree implementing the five-capability
//! [`HostBackend`] contract, plus what the runtime itself never needs but
//! tests and demos do: a log of every mutation the engine issues, event
//! dispatch into attached listeners, read accessors, and a tree printer.

use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap};
use std::fmt::Write as _;
use std::rc::Rc;

use rejoin_core::{Event, HostBackend, HostNodeId, Listener, PropValue, TEXT_VALUE};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum HostError {
    #[error("unknown host node {0:?}")]
    UnknownNode(HostNodeId),
    #[error("no {event} listener on host node {node:?}")]
    NoListener { node: HostNodeId, event: String },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NodeKind {
    Element(&'static str),
    Text,
}

pub struct Node {
    pub kind: NodeKind,
    pub props: BTreeMap<String, PropValue>,
    pub children: Vec<HostNodeId>,
    pub parent: Option<HostNodeId>,
    listeners: HashMap<String, Listener>,
}

impl Node {
    fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            props: BTreeMap::new(),
            children: Vec::new(),
            parent: None,
            listeners: HashMap::new(),
        }
    }
}

/// One recorded host mutation, in the order the engine issued it.
#[derive(Clone, Debug, PartialEq)]
pub enum Mutation {
    CreateNode { node: HostNodeId, tag: &'static str },
    CreateText { node: HostNodeId },
    Insert { parent: HostNodeId, child: HostNodeId, index: usize },
    Remove { parent: HostNodeId, child: HostNodeId },
    SetProp { node: HostNodeId, name: String, value: PropValue },
    ClearProp { node: HostNodeId, name: String },
    AddListener { node: HostNodeId, event: String },
    RemoveListener { node: HostNodeId, event: String },
}

impl Mutation {
    /// Structural mutations change which nodes exist or where they sit.
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            Mutation::CreateNode { .. }
                | Mutation::CreateText { .. }
                | Mutation::Insert { .. }
                | Mutation::Remove { .. }
        )
    }
}

pub struct TreeHost {
    nodes: HashMap<HostNodeId, Node>,
    container: HostNodeId,
    next: u64,
    mutations: Vec<Mutation>,
}

impl TreeHost {
    pub fn new() -> Self {
        let container = HostNodeId(0);
        let mut nodes = HashMap::new();
        nodes.insert(container, Node::new(NodeKind::Element("#root")));
        Self { nodes, container, next: 0, mutations: Vec::new() }
    }

    pub fn container(&self) -> HostNodeId {
        self.container
    }

    pub fn node(&self, id: HostNodeId) -> Option<&Node> {
        self.nodes.get(&id)
    }

    pub fn children(&self, id: HostNodeId) -> &[HostNodeId] {
        self.nodes.get(&id).map(|n| n.children.as_slice()).unwrap_or_default()
    }

    pub fn prop(&self, id: HostNodeId, name: &str) -> Option<&PropValue> {
        self.nodes.get(&id).and_then(|n| n.props.get(name))
    }

    pub fn text_value(&self, id: HostNodeId) -> Option<&PropValue> {
        self.prop(id, TEXT_VALUE)
    }

    pub fn listener(&self, node: HostNodeId, event: &str) -> Result<Listener, HostError> {
        let found = self
            .nodes
            .get(&node)
            .ok_or(HostError::UnknownNode(node))?
            .listeners
            .get(event);
        found.cloned().ok_or_else(|| HostError::NoListener {
            node,
            event: event.to_owned(),
        })
    }

    /// Attached element nodes with the given tag, in tree order.
    pub fn find_all(&self, tag: &str) -> Vec<HostNodeId> {
        let mut found = Vec::new();
        self.collect(self.container, tag, &mut found);
        found
    }

    fn collect(&self, id: HostNodeId, tag: &str, out: &mut Vec<HostNodeId>) {
        let Some(node) = self.nodes.get(&id) else {
            return;
        };
        if matches!(node.kind, NodeKind::Element(t) if t == tag) {
            out.push(id);
        }
        for child in &node.children {
            self.collect(*child, tag, out);
        }
    }

    /// Attached text nodes, in tree order.
    pub fn find_texts(&self) -> Vec<HostNodeId> {
        let mut found = Vec::new();
        self.collect_texts(self.container, &mut found);
        found
    }

    fn collect_texts(&self, id: HostNodeId, out: &mut Vec<HostNodeId>) {
        let Some(node) = self.nodes.get(&id) else {
            return;
        };
        if node.kind == NodeKind::Text {
            out.push(id);
        }
        for child in &node.children {
            self.collect_texts(*child, out);
        }
    }

    /// Drains the mutation log recorded since the last call.
    pub fn take_mutations(&mut self) -> Vec<Mutation> {
        std::mem::take(&mut self.mutations)
    }

    /// Indented rendition of the attached tree, for demos and debugging.
    pub fn dump(&self) -> String {
        let mut out = String::new();
        self.dump_node(self.container, 0, &mut out);
        out
    }

    fn dump_node(&self, id: HostNodeId, depth: usize, out: &mut String) {
        let Some(node) = self.nodes.get(&id) else {
            return;
        };
        let indent = "  ".repeat(depth);
        match node.kind {
            NodeKind::Element(tag) => {
                let _ = write!(out, "{indent}{tag}");
                for (name, value) in &node.props {
                    let _ = write!(out, " {name}={value:?}");
                }
                for event in node.listeners.keys() {
                    let _ = write!(out, " on:{event}");
                }
                out.push('\n');
                for child in &node.children {
                    self.dump_node(*child, depth + 1, out);
                }
            }
            NodeKind::Text => {
                let value = node.props.get(TEXT_VALUE).cloned().unwrap_or(PropValue::Null);
                let _ = writeln!(out, "{indent}\"{value}\"");
            }
        }
    }

    fn alloc(&mut self, kind: NodeKind) -> HostNodeId {
        self.next += 1;
        let id = HostNodeId(self.next);
        self.nodes.insert(id, Node::new(kind));
        id
    }

    fn detach(&mut self, parent: HostNodeId, child: HostNodeId) {
        if let Some(p) = self.nodes.get_mut(&parent) {
            p.children.retain(|c| *c != child);
        }
        if let Some(c) = self.nodes.get_mut(&child) {
            c.parent = None;
        }
    }
}

impl Default for TreeHost {
    fn default() -> Self {
        Self::new()
    }
}

impl HostBackend for TreeHost {
    fn create_node(&mut self, tag: &'static str) -> HostNodeId {
        let id = self.alloc(NodeKind::Element(tag));
        self.mutations.push(Mutation::CreateNode { node: id, tag });
        id
    }

    fn create_text(&mut self) -> HostNodeId {
        let id = self.alloc(NodeKind::Text);
        self.mutations.push(Mutation::CreateText { node: id });
        id
    }

    fn insert_child(&mut self, parent: HostNodeId, child: HostNodeId, index: usize) {
        if !self.nodes.contains_key(&parent) || !self.nodes.contains_key(&child) {
            log::warn!("insert_child on unknown node ({parent:?} <- {child:?}); ignoring");
            return;
        }
        if let Some(old_parent) = self.nodes[&child].parent {
            self.detach(old_parent, child);
        }
        self.mutations.push(Mutation::Insert { parent, child, index });
        if let Some(n) = self.nodes.get_mut(&parent) {
            if index < n.children.len() {
                n.children.insert(index, child);
            } else {
                n.children.push(child);
            }
        }
        if let Some(c) = self.nodes.get_mut(&child) {
            c.parent = Some(parent);
        }
    }

    fn remove_child(&mut self, parent: HostNodeId, child: HostNodeId) {
        self.mutations.push(Mutation::Remove { parent, child });
        self.detach(parent, child);
    }

    fn set_prop(&mut self, node: HostNodeId, name: &str, value: &PropValue) {
        self.mutations.push(Mutation::SetProp {
            node,
            name: name.to_owned(),
            value: value.clone(),
        });
        if let Some(n) = self.nodes.get_mut(&node) {
            n.props.insert(name.to_owned(), value.clone());
        }
    }

    fn clear_prop(&mut self, node: HostNodeId, name: &str) {
        self.mutations.push(Mutation::ClearProp { node, name: name.to_owned() });
        if let Some(n) = self.nodes.get_mut(&node) {
            n.props.remove(name);
        }
    }

    fn add_listener(&mut self, node: HostNodeId, event: &str, listener: Listener) {
        self.mutations.push(Mutation::AddListener { node, event: event.to_owned() });
        if let Some(n) = self.nodes.get_mut(&node) {
            n.listeners.insert(event.to_owned(), listener);
        }
    }

    fn remove_listener(&mut self, node: HostNodeId, event: &str) {
        self.mutations.push(Mutation::RemoveListener { node, event: event.to_owned() });
        if let Some(n) = self.nodes.get_mut(&node) {
            n.listeners.remove(event);
        }
    }
}

/// Fires the listener registered for `event.name` on `node`. The listener
/// is cloned out before the call so it may re-enter the host (every state
/// update does, to commit the resulting pass).
pub fn dispatch(
    host: &Rc<RefCell<TreeHost>>,
    node: HostNodeId,
    event: &Event,
) -> Result<(), HostError> {
    let listener = host.borrow().listener(node, &event.name)?;
    log::debug!("dispatch {} on {node:?}", event.name);
    listener.call(event);
    Ok(())
}
