use std::cell::RefCell;
use std::rc::Rc;

use smallvec::SmallVec;

use crate::element::{Element, ElementKind};
use crate::hooks::FrameGuard;
use crate::host_api::HostBackend;
use crate::instance::{Arena, Instance, InstanceKey, Op};
use crate::runtime::Runtime;

/// Everything one pass mutates, threaded explicitly through the walk.
pub(crate) struct RenderCtx<'a> {
    pub arena: &'a mut Arena,
    pub host: &'a Rc<RefCell<dyn HostBackend>>,
    pub pending_unmounts: &'a mut SmallVec<[InstanceKey; 8]>,
    pub runtime: &'a Runtime,
}

/// Builds the subtree under `key`: invokes the component function for
/// function kinds (its single result becomes the sole child), creates
/// detached host nodes for new primitive/text kinds, then descends.
/// Nothing is attached to the host tree until commit.
pub(crate) fn reconcile(ctx: &mut RenderCtx<'_>, key: InstanceKey) {
    match ctx.arena[key].kind.clone() {
        ElementKind::Component(component) => {
            let prev_hooks = ctx.arena[key]
                .prev
                .and_then(|p| ctx.arena.get(p))
                .map(|p| p.hooks.clone())
                .unwrap_or_default();
            let props = ctx.arena[key].props.clone();

            let guard = FrameGuard::enter(prev_hooks, ctx.runtime.clone());
            let produced = component(&props);
            ctx.arena[key].hooks = guard.finish();

            reconcile_children(ctx, key, vec![produced]);
        }
        kind => {
            let needs_node = {
                let instance = &ctx.arena[key];
                instance.host.is_none() && !instance.suppressed_text()
            };
            if needs_node {
                let node = match kind {
                    ElementKind::Host(tag) => ctx.host.borrow_mut().create_node(tag),
                    _ => ctx.host.borrow_mut().create_text(),
                };
                ctx.arena[key].host = Some(node);
            }
            let children = ctx.arena[key].props.children.clone();
            reconcile_children(ctx, key, children);
        }
    }

    let children = ctx.arena[key].children.clone();
    for child in children {
        reconcile(ctx, child);
    }
}

/// Positional child diff: new and previous child lists are walked by index
/// up to the longer length. Matching kinds update in place and keep the
/// previous host handle; anything else is a create plus an unmount of the
/// old occupant. No keyed matching: reordering without kind changes is
/// seen as pairwise updates.
pub(crate) fn reconcile_children(ctx: &mut RenderCtx<'_>, parent: InstanceKey, new: Vec<Element>) {
    let prev_children: Vec<InstanceKey> = ctx.arena[parent]
        .prev
        .and_then(|p| ctx.arena.get(p))
        .map(|p| p.children.clone())
        .unwrap_or_default();

    let max = new.len().max(prev_children.len());
    let mut new_slots: Vec<Option<Element>> = new.into_iter().map(Some).collect();
    let mut result = Vec::with_capacity(new_slots.len());

    for index in 0..max {
        let new_el = new_slots.get_mut(index).and_then(Option::take);
        let prev_key = prev_children
            .get(index)
            .copied()
            .filter(|k| ctx.arena.contains_key(*k));

        let matched = match (&new_el, prev_key) {
            (Some(el), Some(pk)) if ctx.arena[pk].kind == el.kind => Some(pk),
            _ => None,
        };

        if let Some(el) = new_el {
            let (op, host, prev_link) = match matched {
                Some(pk) => (Op::Update, ctx.arena[pk].host, Some(pk)),
                None => (Op::Create, None, None),
            };
            let child = ctx
                .arena
                .insert(Instance::child_of(parent, el, op, host, prev_link));
            result.push(child);
        }

        if matched.is_none() {
            if let Some(pk) = prev_key {
                ctx.arena[pk].op = Op::Unmount;
                ctx.pending_unmounts.push(pk);
            }
        }
    }

    ctx.arena[parent].children = result;
}
