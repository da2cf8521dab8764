#![allow(clippy::missing_const_for_fn)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::module_name_repetitions)]
//! Block tree and delta emission for Arbora.
//!
//! A [`Session`] holds the block tree of one render pass. Layout calls
//! (`columns`, `expander`, `tabs`, `container`) add containers under the
//! active container and emit one [`Delta`](arbora_core::Delta) per block, in
//! call order, into a [`DeltaSink`]. Containers become the active insertion
//! point through a [`ContainerScope`] guard.
//!
//! - **Block tree**: arena of containers with index-based parent links
//! - **Delta queue**: append-only, ordered; drained at the end of a render pass
//! - **Scopes**: RAII guards; dropping one always restores the previous container

mod queue;
mod scope;
mod session;
mod tree;

pub use queue::{DeltaQueue, DeltaSink};
pub use scope::ContainerScope;
pub use session::{ContainerHandle, Session};
pub use tree::{BlockId, BlockTree, ChildSlot, Container};
