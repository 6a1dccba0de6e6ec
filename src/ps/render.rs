/*!
 * Listing Renderers
 * Flat table, indented tree and JSON output for a snapshot
 */

use super::forest::build_forest;
use super::snapshot::Snapshot;
use crate::core::limits::TREE_INDENT;
use crate::core::types::Pid;
use crate::process::ProcessRecord;
use miette::Diagnostic;
use serde::Serialize;
use std::fmt::Write as _;
use thiserror::Error;
use tracing::debug;

/// Text printed instead of a listing when the snapshot is empty
pub const NO_PROCESSES: &str = "no processes";

/// Header line of the flat listing
pub const FLAT_HEADER: &str = "PID\tCommand\t\tSize of Process Memory";

/// Output mode of the `ps` command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum Mode {
    /// One record per line in scan order
    #[default]
    Flat,
    /// Indented parent/child tree from the root process
    Tree,
    /// JSON array of records
    Json,
}

#[derive(Error, Debug, Diagnostic)]
pub enum RenderError {
    #[error("failed to encode listing as JSON: {0}")]
    #[diagnostic(code(ps::render_json))]
    Json(#[from] serde_json::Error),
}

/// Render `snapshot` in `mode`
pub fn render(snapshot: &Snapshot, mode: Mode) -> Result<String, RenderError> {
    match mode {
        Mode::Flat => Ok(render_flat(snapshot)),
        Mode::Tree => Ok(render_tree(snapshot)),
        Mode::Json => render_json(snapshot),
    }
}

/// Every record, one per line, in the order the scan produced them
pub fn render_flat(snapshot: &Snapshot) -> String {
    if snapshot.is_empty() {
        return format!("{NO_PROCESSES}\n");
    }

    let mut out = String::with_capacity(32 * (snapshot.len() + 1));
    out.push_str(FLAT_HEADER);
    out.push('\n');
    for record in snapshot {
        let _ = writeln!(out, "{}\t{}\t\t{}", record.pid, record.name, record.size);
    }
    out
}

/// Tree rooted at the init process (or the smallest identifier)
///
/// Two spaces of indentation per level. Orphans and disconnected trees are
/// not printed.
pub fn render_tree(snapshot: &Snapshot) -> String {
    let Some(tree) = build_forest(snapshot) else {
        return format!("{NO_PROCESSES}\n");
    };

    let unreachable = snapshot.len().saturating_sub(tree.len());
    if unreachable > 0 {
        debug!(unreachable, root = tree.record.pid, "Records not reachable from root");
    }

    let mut out = String::new();
    tree.walk(|depth, record| {
        let _ = writeln!(out, "{}{}", TREE_INDENT.repeat(depth), tree_line(record));
    });
    out
}

/// One tree line without indentation
pub fn tree_line(record: &ProcessRecord) -> String {
    format!(
        "{} ({}) sz={} state={} name={}",
        record.pid,
        record.ppid,
        record.size,
        record.state_name(),
        record.name
    )
}

#[derive(Serialize)]
struct RecordView {
    pid: Pid,
    ppid: Pid,
    size: u64,
    state: &'static str,
    name: String,
}

impl From<&ProcessRecord> for RecordView {
    fn from(record: &ProcessRecord) -> Self {
        Self {
            pid: record.pid,
            ppid: record.ppid,
            size: record.size,
            state: record.state_name(),
            name: record.name.to_string(),
        }
    }
}

/// Pretty-printed JSON array; an empty snapshot is `[]`
pub fn render_json(snapshot: &Snapshot) -> Result<String, RenderError> {
    let views: Vec<RecordView> = snapshot.records().iter().map(RecordView::from).collect();
    let mut out = serde_json::to_string_pretty(&views)?;
    out.push('\n');
    Ok(out)
}
