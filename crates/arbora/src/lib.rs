//! Arbora: declarative block layouts streamed as ordered deltas.
//!
//! A script describes a page with layout calls on a [`Session`]. Each call
//! validates its arguments, adds containers to the session's block tree and
//! queues one [`Delta`] per block for the client to apply in order.
//!
//! ```
//! use arbora::Session;
//!
//! let mut session = Session::new();
//! let columns = session.columns(2_usize)?;
//! session.with_container(columns[0], |s| Ok(s.write("left")))?;
//! let mut scope = session.enter(columns[1])?;
//! let tabs = scope.tabs(["Chart", "Data"])?;
//! drop(scope);
//! assert_eq!(tabs.len(), 2);
//! # Ok::<(), arbora::LayoutError>(())
//! ```

#![allow(clippy::doc_markdown, clippy::missing_const_for_fn, clippy::module_name_repetitions)]

pub use arbora_core::*;
pub use arbora_layout as layout;
pub use arbora_layout::{ContainerHandle, ContainerScope, DeltaQueue, DeltaSink, Session};

use std::path::Path;

/// Open a session using the `.arbora.toml` found in `dir`, or the default
/// rules when there is none.
///
/// # Errors
///
/// Returns an error if the config file exists but cannot be read or parsed.
pub fn open_session(dir: &Path) -> Result<Session> {
    let config = LayoutConfig::load_or_default(dir)?;
    tracing::debug!(
        max_column_nesting = config.max_column_nesting,
        allow_nested_expanders = config.allow_nested_expanders,
        "session opened"
    );
    Ok(Session::with_config(config))
}

/// Commonly used types.
pub mod prelude {
    pub use crate::{
        BlockPayload, Columns, ContainerHandle, ContainerScope, Delta, DeltaPath, Expander, Gap,
        LayoutConfig, LayoutError, LayoutSpec, Session, Tabs,
    };
}
