//! # Descriptors, reconciliation, and hooks
//!
//! Rejoin keeps a live host tree in sync with a declarative description of
//! it. There are three main pieces:
//!
//! - [`Element`] — immutable descriptor of desired structure.
//! - The reconciler/commit engine — diffs the new description against the
//!   committed tree and applies the difference to the host.
//! - [`use_state`] — per-call-site state threaded across re-renders.
//!
//! ## Descriptors
//!
//! Descriptors are pure data built by a stateless factory. Bare values in a
//! child list become text descriptors; nested lists flatten; `None` becomes
//! a suppressed slot that renders nothing but keeps sibling positions
//! stable:
//!
//! ```rust
//! use rejoin_core::*;
//!
//! let el = Element::host("div", Props::new().set("title", "greeting"), vec![
//!     "hello".into(),
//!     vec![Child::from(Element::text(1i64)), Child::from(Element::text(2i64))].into(),
//!     Child::from(None::<Element>),
//! ]);
//! assert_eq!(el.props.children.len(), 4);
//! ```
//!
//! ## Components and state
//!
//! A component is a plain `fn(&Props) -> Element`. During its invocation it
//! may call [`use_state`] any number of times with stable call order; the
//! Nth call always refers to the Nth slot of the previous render:
//!
//! ```rust
//! use rejoin_core::*;
//!
//! fn counter(_props: &Props) -> Element {
//!     let (count, set_count) = use_state(0i64);
//!     Element::host("div", Props::new(), vec![
//!         Element::text(count).into(),
//!         Element::host(
//!             "button",
//!             Props::new().on("click", move |_| set_count.update(|n| n + 1)),
//!             vec!["increment".into()],
//!         )
//!         .into(),
//!     ])
//! }
//! # let _ = Element::component(counter, Props::new(), vec![]);
//! ```
//!
//! Setter calls run a full synchronous pass immediately; there is no
//! batching and no coalescing. Calling a setter while a pass is already
//! running (i.e. from inside a component body) is a precondition violation
//! and faults at once.
//!
//! ## Hosts
//!
//! The target structure is abstracted behind [`HostBackend`], five
//! capabilities: create a node, insert at a position (or append), remove,
//! assign/clear a field, attach/detach a listener. Mounting is one call:
//!
//! ```text
//! let runtime = render(Element::component(counter, Props::new(), vec![]),
//!                      host, container);
//! ```
//!
//! after which every update is driven by hook setters. See `rejoin-host`
//! for an in-memory backend with a mutation log.
//!
//! Reconciliation is positional: children pair up by index, kinds compare
//! by identity, and there is no keyed matching. Reordering a list without
//! changing kinds reads as pairwise updates at each index.

pub mod element;
pub mod error;
pub mod hooks;
pub mod host_api;
pub mod instance;
pub mod prelude;
pub mod runtime;
pub mod tests;

mod commit;
mod reconcile;

pub use element::*;
pub use error::*;
pub use hooks::{HookCell, SetState, use_state};
pub use host_api::*;
pub use instance::{Arena, Instance, InstanceKey, Op};
pub use prelude::*;
pub use runtime::*;
