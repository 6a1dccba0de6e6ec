/*!
 * Forest Reconstruction
 * Rebuilds the parent/child tree from a flat snapshot
 *
 * The tree is whatever is reachable from the chosen root through the
 * parent-identifier relation as captured in the snapshot. Records whose
 * parent is missing from the snapshot (it exited before the scan reached it,
 * or fell past the capacity) are not reachable and are left out, as are
 * trees disconnected from the root. Every record is placed at most once, so a
 * hand-built snapshot with repeated identifiers or a parent cycle still
 * produces a tree no larger than the snapshot.
 */

use super::snapshot::Snapshot;
use crate::core::limits::INIT_PID;
use crate::core::types::Pid;
use crate::process::ProcessRecord;
use std::collections::HashMap;

/// A record and its children, in snapshot order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForestNode {
    pub record: ProcessRecord,
    pub children: Vec<ForestNode>,
}

impl ForestNode {
    /// Number of nodes in this subtree, including itself
    pub fn len(&self) -> usize {
        1 + self.children.iter().map(ForestNode::len).sum::<usize>()
    }

    /// Always false: a node holds at least its own record
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Pre-order traversal, calling `visit(depth, record)` for every node
    pub fn walk<F: FnMut(usize, &ProcessRecord)>(&self, mut visit: F) {
        self.walk_at(0, &mut visit);
    }

    fn walk_at<F: FnMut(usize, &ProcessRecord)>(&self, depth: usize, visit: &mut F) {
        visit(depth, &self.record);
        for child in &self.children {
            child.walk_at(depth + 1, visit);
        }
    }

    /// Identifiers in pre-order
    pub fn pids(&self) -> Vec<Pid> {
        let mut pids = Vec::with_capacity(self.len());
        self.walk(|_, record| pids.push(record.pid));
        pids
    }
}

/// Root choice: the init process if captured, else the smallest identifier
pub fn select_root(snapshot: &Snapshot) -> Option<&ProcessRecord> {
    root_position(snapshot.records()).map(|position| &snapshot.records()[position])
}

fn root_position(records: &[ProcessRecord]) -> Option<usize> {
    records
        .iter()
        .position(|record| record.pid == INIT_PID)
        .or_else(|| {
            records
                .iter()
                .enumerate()
                .min_by_key(|(_, record)| record.pid)
                .map(|(position, _)| position)
        })
}

/// One-pass parent → children index, positions kept in snapshot order
struct ChildIndex(HashMap<Pid, Vec<usize>>);

impl ChildIndex {
    fn new(records: &[ProcessRecord]) -> Self {
        let mut index: HashMap<Pid, Vec<usize>> = HashMap::with_capacity(records.len());
        for (position, record) in records.iter().enumerate() {
            index.entry(record.ppid).or_default().push(position);
        }
        Self(index)
    }

    fn children(&self, pid: Pid) -> &[usize] {
        self.0.get(&pid).map_or(&[], Vec::as_slice)
    }
}

/// Build the tree hanging off [`select_root`]; `None` for an empty snapshot
pub fn build_forest(snapshot: &Snapshot) -> Option<ForestNode> {
    let records = snapshot.records();
    let root = root_position(records)?;
    let index = ChildIndex::new(records);
    let mut placed = vec![false; records.len()];
    placed[root] = true;
    Some(build_node(records, &index, root, &mut placed))
}

fn build_node(
    records: &[ProcessRecord],
    index: &ChildIndex,
    position: usize,
    placed: &mut [bool],
) -> ForestNode {
    let record = records[position];
    let mut children = Vec::new();
    for &child in index.children(record.pid) {
        if placed[child] {
            continue;
        }
        placed[child] = true;
        children.push(build_node(records, index, child, placed));
    }

    ForestNode { record, children }
}
