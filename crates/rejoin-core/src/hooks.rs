use std::any::Any;
use std::cell::RefCell;
use std::marker::PhantomData;
use std::rc::Rc;

use smallvec::SmallVec;

use crate::error::RuntimeError;
use crate::runtime::Runtime;

/// One per-call-site state slot. The cell object never migrates between
/// renders: each pass builds a fresh cell from the previous cell's settled
/// state plus whatever its queue accumulated since.
pub struct HookCell {
    pub(crate) state: Box<dyn Any>,
    pub(crate) queue: Vec<Box<dyn Any>>,
}

pub(crate) type HookList = SmallVec<[Rc<RefCell<HookCell>>; 4]>;

/// Queued update: a literal replacement or a transform of the current value.
pub(crate) enum Pending<T> {
    Replace(T),
    Transform(Rc<dyn Fn(&T) -> T>),
}

thread_local! {
    // The one process-wide hook context. Occupied only while a component
    // function runs; `use_state` is the only reader.
    static FRAME: RefCell<Option<HookFrame>> = const { RefCell::new(None) };
}

struct HookFrame {
    prev: HookList,
    built: HookList,
    index: usize,
    runtime: Runtime,
}

/// Scopes one component invocation. Entering asserts the frame slot is
/// vacant, which is what makes re-entrant component calls detectable.
pub(crate) struct FrameGuard {
    _priv: (),
}

impl FrameGuard {
    pub(crate) fn enter(prev: HookList, runtime: Runtime) -> Self {
        FRAME.with(|f| {
            let mut slot = f.borrow_mut();
            assert!(slot.is_none(), "{}", RuntimeError::NestedHookFrame);
            *slot = Some(HookFrame {
                prev,
                built: HookList::new(),
                index: 0,
                runtime,
            });
        });
        FrameGuard { _priv: () }
    }

    /// Ends the invocation and hands back the cells built during it.
    pub(crate) fn finish(self) -> HookList {
        FRAME.with(|f| f.borrow_mut().take())
            .map(|frame| frame.built)
            .unwrap_or_default()
    }
}

impl Drop for FrameGuard {
    fn drop(&mut self) {
        // Clears the slot when a component panics mid-invocation.
        FRAME.with(|f| {
            f.borrow_mut().take();
        });
    }
}

/// Folds a previous cell into this pass's starting state: settled state
/// first, then every queued update in enqueue order.
pub(crate) fn settle<T: Clone + 'static>(cell: &HookCell, index: usize, fallback: T) -> T {
    let Some(start) = cell.state.downcast_ref::<T>() else {
        log::warn!("use_state: hook slot {index} changed type; resetting to the initial value");
        return fallback;
    };
    let mut state = start.clone();
    for entry in &cell.queue {
        match entry.downcast_ref::<Pending<T>>() {
            Some(Pending::Replace(v)) => state = v.clone(),
            Some(Pending::Transform(f)) => state = f(&state),
            None => {
                log::warn!("use_state: discarding queued update of a foreign type at hook slot {index}");
            }
        }
    }
    state
}

/// Per-call-site state, callable only while a component function runs.
/// The Nth call in an invocation always reads the Nth slot of the previous
/// render, so call order must be stable across renders.
///
/// ```
/// use rejoin_core::*;
///
/// fn counter(_props: &Props) -> Element {
///     let (count, set_count) = use_state(0i64);
///     Element::host("div", Props::new(), vec![
///         Element::text(count).into(),
///         Element::host(
///             "button",
///             Props::new().on("click", move |_| set_count.update(|n| n + 1)),
///             vec!["increment".into()],
///         )
///         .into(),
///     ])
/// }
/// # let _ = counter;
/// ```
pub fn use_state<T: Clone + 'static>(initial: T) -> (T, SetState<T>) {
    FRAME.with(|f| {
        let mut slot = f.borrow_mut();
        let Some(frame) = slot.as_mut() else {
            panic!("{}", RuntimeError::HookOutsideRender)
        };
        let index = frame.index;
        frame.index += 1;

        let state = match frame.prev.get(index) {
            Some(prev) => settle(&prev.borrow(), index, initial),
            None => initial,
        };

        let cell = Rc::new(RefCell::new(HookCell {
            state: Box::new(state.clone()),
            queue: Vec::new(),
        }));
        frame.built.push(cell.clone());

        let setter = SetState {
            cell,
            runtime: frame.runtime.clone(),
            _value: PhantomData,
        };
        (state, setter)
    })
}

/// Setter half of [`use_state`]. Cloneable; every call enqueues on the cell
/// it was created with and immediately runs a full synchronous re-render.
pub struct SetState<T> {
    cell: Rc<RefCell<HookCell>>,
    runtime: Runtime,
    _value: PhantomData<T>,
}

impl<T> Clone for SetState<T> {
    fn clone(&self) -> Self {
        Self {
            cell: self.cell.clone(),
            runtime: self.runtime.clone(),
            _value: PhantomData,
        }
    }
}

impl<T: Clone + 'static> SetState<T> {
    pub fn set(&self, value: T) {
        self.enqueue(Pending::Replace(value));
    }

    pub fn update(&self, f: impl Fn(&T) -> T + 'static) {
        self.enqueue(Pending::Transform(Rc::new(f)));
    }

    fn enqueue(&self, pending: Pending<T>) {
        self.cell.borrow_mut().queue.push(Box::new(pending));
        self.runtime.rerender();
    }
}
