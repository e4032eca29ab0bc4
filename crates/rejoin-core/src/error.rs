use thiserror::Error;

/// Precondition violations of the render protocol. These are programming
/// errors: the runtime faults immediately (panics with the message below)
/// instead of continuing with corrupted shared render state.
#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("use_state called outside of a component render")]
    HookOutsideRender,
    #[error("re-entrant render: state updated while a render pass is in progress")]
    ReentrantRender,
    #[error("component invoked while another hook frame is active")]
    NestedHookFrame,
}
