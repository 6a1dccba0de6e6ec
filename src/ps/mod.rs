/*!
 * Process Listing Client
 * Collects a bounded snapshot through the enumeration request and renders it
 * as a flat listing or a parent/child tree
 */

pub mod forest;
pub mod render;
pub mod snapshot;
pub mod source;

// Re-export for convenience
pub use forest::{build_forest, select_root, ForestNode};
pub use render::{render, render_flat, render_json, render_tree, Mode, RenderError, NO_PROCESSES};
pub use snapshot::{collect, CollectError, Snapshot};
pub use source::{FaultError, ProcSource, SyscallSource};
