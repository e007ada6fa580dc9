// Snapshot management for timeline playback

use crate::memory::{CallStack, StackMemory};
use crate::tree::{CallTree, Frame, FrameId};
use chrono::Local;

/// Kind of a user-facing log entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogKind {
    Info,
    Success,
    Error,
    System,
}

impl LogKind {
    pub fn label(self) -> &'static str {
        match self {
            LogKind::Info => "INFO",
            LogKind::Success => "SUCCESS",
            LogKind::Error => "ERROR",
            LogKind::System => "SYSTEM",
        }
    }
}

/// A single immutable log entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub id: u64,
    pub timestamp: String,
    pub message: String,
    pub kind: LogKind,
}

/// Append-only event log shown next to the visualization
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventLog {
    entries: Vec<LogEntry>,
    next_id: u64,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry stamped with the current local time
    pub fn push(&mut self, kind: LogKind, message: impl Into<String>) {
        let timestamp = Local::now().format("%H:%M:%S").to_string();
        self.entries.push(LogEntry {
            id: self.next_id,
            timestamp,
            message: message.into(),
            kind,
        });
        self.next_id += 1;
    }

    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    pub fn last(&self) -> Option<&LogEntry> {
        self.entries.last()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether any entry of `kind` carries exactly `message`
    pub fn contains(&self, kind: LogKind, message: &str) -> bool {
        self.entries
            .iter()
            .any(|e| e.kind == kind && e.message == message)
    }
}

/// Snapshot of the visualized state at one step
///
/// Every field is owned, so a snapshot never shares storage with the live
/// state or with another snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub tree: CallTree,
    pub memory: StackMemory,
    pub stack: CallStack,
    pub log: EventLog,
    /// 0-based line in the algorithm's source listing
    pub active_line: Option<usize>,
}

impl Snapshot {
    /// The state shown before anything has run
    pub fn blank(log: EventLog) -> Self {
        Snapshot {
            tree: CallTree::new(),
            memory: StackMemory::new(),
            stack: CallStack::new(),
            log,
            active_line: None,
        }
    }

    pub fn frames(&self) -> &[Frame] {
        self.tree.frames()
    }

    pub fn root(&self) -> Option<FrameId> {
        self.tree.root()
    }

    /// Estimate the memory usage of this snapshot in bytes
    pub fn estimated_size(&self) -> usize {
        // Rough figures per element, enough for a status-bar readout
        let tree_size = self.tree.len() * 96;
        let memory_size = self.memory.capacity() * 48;
        let stack_size = self.stack.depth() * 80;
        let log_size = self.log.len() * 64;

        tree_size + memory_size + stack_size + log_size
    }
}

/// Ordered history of snapshots for the current run
#[derive(Debug, Default)]
pub struct SnapshotManager {
    snapshots: Vec<Snapshot>,
    current_memory: usize,
}

impl SnapshotManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a snapshot, returning its step index
    pub fn push(&mut self, snapshot: Snapshot) -> usize {
        self.current_memory += snapshot.estimated_size();
        self.snapshots.push(snapshot);
        self.snapshots.len() - 1
    }

    /// Get a snapshot by index
    pub fn get(&self, index: usize) -> Option<&Snapshot> {
        self.snapshots.get(index)
    }

    pub fn last(&self) -> Option<&Snapshot> {
        self.snapshots.last()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Snapshot> {
        self.snapshots.iter()
    }

    /// Get the number of snapshots
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Drop every snapshot
    pub fn clear(&mut self) {
        self.snapshots.clear();
        self.current_memory = 0;
    }

    /// Estimated bytes held by the history
    pub fn memory_usage(&self) -> usize {
        self.current_memory
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::FrameStatus;

    #[test]
    fn log_entries_get_sequential_ids() {
        let mut log = EventLog::new();
        log.push(LogKind::System, "ready");
        log.push(LogKind::Success, "Return: 1");

        let ids: Vec<u64> = log.entries().iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![0, 1]);
        assert!(log.contains(LogKind::Success, "Return: 1"));
        assert!(!log.contains(LogKind::Info, "Return: 1"));
        assert_eq!(log.last().map(|e| e.timestamp.len()), Some(8));
    }

    #[test]
    fn stored_snapshots_do_not_follow_later_mutation() {
        let mut tree = CallTree::new();
        let root = tree.create_frame("fact", "n=1", None, 1);
        let mut snapshot = Snapshot::blank(EventLog::new());
        snapshot.tree = tree.clone();

        let mut history = SnapshotManager::new();
        history.push(snapshot);

        tree.update_frame(
            root,
            crate::tree::FrameUpdate::new().status(FrameStatus::Completed),
        );

        let stored = history.get(0).and_then(|s| s.tree.get(root)).unwrap();
        assert_eq!(stored.status, FrameStatus::Active);
    }

    #[test]
    fn clear_resets_memory_estimate() {
        let mut history = SnapshotManager::new();
        assert_eq!(history.push(Snapshot::blank(EventLog::new())), 0);
        assert!(history.memory_usage() > 0);

        history.clear();
        assert!(history.is_empty());
        assert_eq!(history.memory_usage(), 0);
    }
}
