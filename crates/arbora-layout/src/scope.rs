//! Scoped container activation.

use crate::queue::{DeltaQueue, DeltaSink};
use crate::session::{ContainerHandle, Session};
use crate::tree::BlockId;
use std::ops::{Deref, DerefMut};

/// Guard that keeps a container active.
///
/// Created by [`Session::enter`]. While the guard lives, blocks and elements
/// are added to its container. Dropping the guard pops exactly one stack
/// entry and closes the container, on normal exit, on `?` early return and
/// during panic unwinding alike.
///
/// The guard dereferences to the session, so nested scopes are entered from
/// the outer guard:
///
/// ```
/// use arbora_layout::Session;
///
/// let mut session = Session::new();
/// let tab = session.tabs(["Overview"])?[0];
/// {
///     let mut outer = session.enter(tab)?;
///     let panel = outer.expander("Details")?;
///     let mut inner = outer.enter(panel)?;
///     inner.text("nested");
/// }
/// assert_eq!(session.depth(), 1);
/// # Ok::<(), arbora_core::LayoutError>(())
/// ```
#[must_use = "the container is exited as soon as the scope is dropped"]
pub struct ContainerScope<'s, S: DeltaSink = DeltaQueue> {
    session: &'s mut Session<S>,
    id: BlockId,
    run: u64,
}

impl<'s, S: DeltaSink> ContainerScope<'s, S> {
    pub(crate) fn new(session: &'s mut Session<S>, id: BlockId) -> Self {
        let run = session.run_id();
        Self { session, id, run }
    }

    /// Handle of the container this scope was opened on.
    #[must_use]
    pub const fn handle(&self) -> ContainerHandle {
        ContainerHandle::new(self.id, self.run)
    }
}

impl<S: DeltaSink> Deref for ContainerScope<'_, S> {
    type Target = Session<S>;

    fn deref(&self) -> &Session<S> {
        self.session
    }
}

impl<S: DeltaSink> DerefMut for ContainerScope<'_, S> {
    fn deref_mut(&mut self) -> &mut Session<S> {
        self.session
    }
}

impl<S: DeltaSink> Drop for ContainerScope<'_, S> {
    fn drop(&mut self) {
        self.session.exit(self.id, self.run);
    }
}

impl<S: DeltaSink> std::fmt::Debug for ContainerScope<'_, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContainerScope")
            .field("id", &self.id)
            .field("run", &self.run)
            .finish_non_exhaustive()
    }
}
