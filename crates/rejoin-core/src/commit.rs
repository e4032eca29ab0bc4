use crate::element::{PropValue, Props};
use crate::host_api::{HostBackend, HostNodeId};
use crate::instance::{InstanceKey, Op, host_parent_of};
use crate::reconcile::RenderCtx;

const EVENT_PREFIX: &str = "on";

/// Applies one reconciled node to the host tree, then its children.
/// Creates attach at `slot` (the backend appends when it is past the end);
/// updates sync props in place; unmounts are terminal and detach the
/// nearest owned handles. Handle-less nodes are transparent for
/// positioning: the incoming slot threads through them unchanged.
pub(crate) fn commit(ctx: &mut RenderCtx<'_>, key: InstanceKey, slot: usize) {
    let host_parent = host_parent_of(ctx.arena, key);
    let op = ctx.arena[key].op;
    let handle = ctx.arena[key].host;

    match op {
        Op::Create => {
            if let Some(node) = handle {
                ctx.host.borrow_mut().insert_child(host_parent, node, slot);
                let props = ctx.arena[key].props.clone();
                sync_props(&mut *ctx.host.borrow_mut(), node, &Props::default(), &props);
            }
        }
        Op::Update => {
            if let Some(node) = handle {
                let prev_props = ctx.arena[key]
                    .prev
                    .and_then(|p| ctx.arena.get(p))
                    .map(|p| p.props.clone())
                    .unwrap_or_default();
                let props = ctx.arena[key].props.clone();
                sync_props(&mut *ctx.host.borrow_mut(), node, &prev_props, &props);
            }
        }
        Op::Unmount => {
            remove_handles(ctx, key, host_parent);
            return;
        }
    }

    // Children restart at 0 under an owned handle; otherwise this node is
    // invisible to the host and its children fill the parent's slots.
    let mut index = if handle.is_some() { 0 } else { slot };
    let children = ctx.arena[key].children.clone();
    for child in children {
        commit(ctx, child, index);
        index += 1;
    }
}

/// Detaches the handles owned by this subtree: the node's own handle if it
/// has one, else the handles of its nearest handle-bearing descendants.
fn remove_handles(ctx: &mut RenderCtx<'_>, key: InstanceKey, host_parent: HostNodeId) {
    if let Some(node) = ctx.arena[key].host {
        ctx.host.borrow_mut().remove_child(host_parent, node);
    } else {
        let children = ctx.arena[key].children.clone();
        for child in children {
            remove_handles(ctx, child, host_parent);
        }
    }
}

/// Prop and listener sync between two prop bags. Values compare by
/// equality, listeners by identity. `on`-prefixed names are listeners:
/// a removed or changed one detaches first, an added or changed one
/// attaches after. Other removed names reset the host field; added or
/// changed names assign directly. Children are not props.
pub(crate) fn sync_props(
    host: &mut dyn HostBackend,
    node: HostNodeId,
    prev: &Props,
    next: &Props,
) {
    for (name, old) in prev.entries() {
        let new = next.get(name);
        if let Some(event) = listener_event(name) {
            if new != Some(old) {
                host.remove_listener(node, &event);
            }
        } else if new.is_none() {
            host.clear_prop(node, name);
        }
    }

    for (name, value) in next.entries() {
        if prev.get(name) == Some(value) {
            continue;
        }
        if let Some(event) = listener_event(name) {
            if let PropValue::Listener(listener) = value {
                host.add_listener(node, &event, listener.clone());
            }
        } else {
            host.set_prop(node, name, value);
        }
    }
}

fn listener_event(name: &str) -> Option<String> {
    name.strip_prefix(EVENT_PREFIX)
        .map(|event| event.to_ascii_lowercase())
}
