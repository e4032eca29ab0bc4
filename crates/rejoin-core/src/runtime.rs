use std::cell::RefCell;
use std::rc::Rc;

use smallvec::SmallVec;

use crate::commit::commit;
use crate::element::{Element, ElementKind, Props};
use crate::error::RuntimeError;
use crate::hooks::HookList;
use crate::host_api::{HostBackend, HostNodeId};
use crate::instance::{Arena, Instance, InstanceKey, Op, sweep};
use crate::reconcile::{RenderCtx, reconcile, reconcile_children};

/// Cloneable handle to one mounted root. Hook setters hold one of these;
/// every state update re-enters it for a full synchronous pass.
#[derive(Clone)]
pub struct Runtime {
    inner: Rc<RefCell<RuntimeInner>>,
}

struct RuntimeInner {
    host: Rc<RefCell<dyn HostBackend>>,
    arena: Arena,
    entry: Option<Element>,
    container: Option<HostNodeId>,
    root: Option<InstanceKey>,
}

/// Binds a descriptor tree to a host container and runs the first
/// synchronization pass. Subsequent passes are driven entirely by hook
/// setters; `render` is not called again.
pub fn render(
    element: Element,
    host: Rc<RefCell<dyn HostBackend>>,
    container: HostNodeId,
) -> Runtime {
    let runtime = Runtime::new(host);
    {
        let mut inner = runtime.inner.borrow_mut();
        inner.entry = Some(element);
        inner.container = Some(container);
    }
    runtime.rerender();
    runtime
}

impl Runtime {
    pub fn new(host: Rc<RefCell<dyn HostBackend>>) -> Self {
        Self {
            inner: Rc::new(RefCell::new(RuntimeInner {
                host,
                arena: Arena::with_key(),
                entry: None,
                container: None,
                root: None,
            })),
        }
    }

    /// One full pass over the unchanged entry descriptor: reconcile against
    /// the committed tree, commit every pending unmount, commit the fresh
    /// tree, swap roots. Synchronous and non-coalescing: it runs to
    /// completion before returning to whatever triggered it.
    ///
    /// Triggering it while a pass is already running is a precondition
    /// violation and faults immediately.
    pub fn rerender(&self) {
        let Ok(mut inner) = self.inner.try_borrow_mut() else {
            panic!("{}", RuntimeError::ReentrantRender)
        };
        let inner = &mut *inner;
        let (Some(entry), Some(container)) = (inner.entry.clone(), inner.container) else {
            log::debug!("rerender with nothing mounted; ignoring");
            return;
        };

        let prev_root = inner.root;
        let wrapper = inner.arena.insert(Instance {
            kind: ElementKind::Host("#container"),
            props: Props::default(),
            host: Some(container),
            parent: None,
            prev: prev_root,
            hooks: HookList::new(),
            op: Op::Update,
            children: Vec::new(),
        });

        let host = inner.host.clone();
        let mut pending: SmallVec<[InstanceKey; 8]> = SmallVec::new();
        {
            let mut ctx = RenderCtx {
                arena: &mut inner.arena,
                host: &host,
                pending_unmounts: &mut pending,
                runtime: self,
            };

            reconcile_children(&mut ctx, wrapper, vec![entry]);
            let top = ctx.arena[wrapper].children.clone();
            for key in top {
                reconcile(&mut ctx, key);
            }

            // All unmounts land before any create/update of this pass, so a
            // fresh node never shares a slot with the old occupant.
            let unmounts = std::mem::take(ctx.pending_unmounts);
            log::debug!(
                "pass: {} live instances, {} unmounts",
                ctx.arena.len(),
                unmounts.len()
            );
            for key in unmounts {
                commit(&mut ctx, key, 0);
            }

            if let Some(first) = ctx.arena[wrapper].children.first().copied() {
                commit(&mut ctx, first, 0);
            }
        }

        if let Some(old) = prev_root {
            sweep(&mut inner.arena, old);
        }
        inner.root = Some(wrapper);
    }
}
