use crate::element::{Listener, PropValue};

/// Opaque handle to one node in the host tree. Allocated by the backend,
/// never reused within a backend's lifetime.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HostNodeId(pub u64);

/// The full capability set the runtime needs from a host platform:
/// node creation, positioned insertion, removal, field assignment and
/// listener attachment. The core performs no host operations beyond these.
///
/// Operations are assumed to succeed; there is no rollback path for a
/// partially applied commit.
pub trait HostBackend {
    /// Creates a detached node for a primitive kind.
    fn create_node(&mut self, tag: &'static str) -> HostNodeId;

    /// Creates a detached text node.
    fn create_text(&mut self) -> HostNodeId;

    /// Inserts `child` under `parent` at `index`, appending when `index`
    /// is past the current child count.
    fn insert_child(&mut self, parent: HostNodeId, child: HostNodeId, index: usize);

    fn remove_child(&mut self, parent: HostNodeId, child: HostNodeId);

    fn set_prop(&mut self, node: HostNodeId, name: &str, value: &PropValue);

    /// Resets a field to its empty/default value.
    fn clear_prop(&mut self, node: HostNodeId, name: &str);

    /// At most one listener per event name per node is ever attached.
    fn add_listener(&mut self, node: HostNodeId, event: &str, listener: Listener);

    fn remove_listener(&mut self, node: HostNodeId, event: &str);
}
