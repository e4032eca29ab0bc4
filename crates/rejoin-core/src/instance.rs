use slotmap::{SlotMap, new_key_type};

use crate::element::{Element, ElementKind, PropValue, Props, TEXT_VALUE};
use crate::hooks::HookList;
use crate::host_api::HostNodeId;

new_key_type! {
    /// Arena key of one instance. Generational, so links left over from a
    /// swept pass resolve to `None` instead of aliasing a new node.
    pub struct InstanceKey;
}

pub type Arena = SlotMap<InstanceKey, Instance>;

/// Operation decided for a node during reconciliation, consumed during
/// commit. Set exactly once per pass, read exactly once.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Op {
    Create,
    Update,
    Unmount,
}

/// One rendered occurrence of a descriptor. `host` is owned by this
/// instance; `parent` and `prev` are non-owning arena links.
pub struct Instance {
    pub kind: ElementKind,
    pub props: Props,
    pub host: Option<HostNodeId>,
    pub parent: Option<InstanceKey>,
    pub prev: Option<InstanceKey>,
    pub hooks: HookList,
    pub op: Op,
    pub children: Vec<InstanceKey>,
}

impl Instance {
    pub(crate) fn child_of(
        parent: InstanceKey,
        element: Element,
        op: Op,
        host: Option<HostNodeId>,
        prev: Option<InstanceKey>,
    ) -> Self {
        Self {
            kind: element.kind,
            props: element.props,
            host,
            parent: Some(parent),
            prev,
            hooks: HookList::new(),
            op,
            children: Vec::new(),
        }
    }

    /// Text slot whose value renders nothing. The instance still occupies
    /// its position so sibling indices stay aligned.
    pub(crate) fn suppressed_text(&self) -> bool {
        self.kind == ElementKind::Text
            && matches!(
                self.props.get(TEXT_VALUE),
                None | Some(PropValue::Bool(_)) | Some(PropValue::Null)
            )
    }
}

/// Nearest ancestor bearing a real host handle. The root wrapper always
/// holds the container, so the walk terminates.
pub(crate) fn host_parent_of(arena: &Arena, key: InstanceKey) -> HostNodeId {
    let mut cursor = arena[key].parent;
    while let Some(k) = cursor {
        if let Some(node) = arena[k].host {
            return node;
        }
        cursor = arena[k].parent;
    }
    unreachable!("instance has no host-bearing ancestor")
}

/// Frees a committed-over tree. Runs after commit, once `prev` links and
/// pending unmounts no longer need the old instances.
pub(crate) fn sweep(arena: &mut Arena, root: InstanceKey) {
    let Some(instance) = arena.remove(root) else {
        return;
    };
    for child in instance.children {
        sweep(arena, child);
    }
}
