pub use crate::element::{
    Child, ComponentFn, Element, ElementKind, Event, Listener, PropValue, Props, TEXT_VALUE,
};
pub use crate::error::RuntimeError;
pub use crate::hooks::{SetState, use_state};
pub use crate::host_api::{HostBackend, HostNodeId};
pub use crate::runtime::{Runtime, render};
