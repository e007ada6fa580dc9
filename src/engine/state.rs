// Authoritative live state mutated by the runners

use crate::memory::{CallStack, StackMemory};
use crate::snapshot::{EventLog, LogKind, Snapshot};
use crate::tree::{CallTree, FrameId, FrameStatus, FrameUpdate};

/// The single mutable copy of everything a run touches
///
/// Only the recorder writes to it. The presentation layer never sees it
/// directly; it reads snapshots captured from it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LiveState {
    pub tree: CallTree,
    pub memory: StackMemory,
    pub stack: CallStack,
    pub log: EventLog,
}

impl LiveState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a frame, claim its memory slot and bind it to the innermost call
    pub fn create_frame(
        &mut self,
        name: &str,
        args: impl Into<String>,
        parent: Option<FrameId>,
        depth: usize,
    ) -> FrameId {
        let id = self.tree.create_frame(name, args, parent, depth);
        self.memory.allocate(depth, id, name);
        self.stack.bind_top(id);
        id
    }

    pub fn update_frame(&mut self, id: FrameId, update: FrameUpdate) {
        self.tree.update_frame(id, update);
    }

    /// Finish a frame: status `Completed`, note cleared, slot freed, entry popped
    pub fn complete_frame(&mut self, id: FrameId, depth: usize) {
        self.tree.update_frame(
            id,
            FrameUpdate::new()
                .status(FrameStatus::Completed)
                .clear_note(),
        );
        self.memory.free(depth);
        self.stack.pop();
    }

    pub fn log(&mut self, kind: LogKind, message: impl Into<String>) {
        self.log.push(kind, message);
    }

    /// Freeze the current state into an independent snapshot
    pub fn capture(&self, active_line: usize) -> Snapshot {
        Snapshot {
            tree: self.tree.clone(),
            memory: self.memory.clone(),
            stack: self.stack.clone(),
            log: self.log.clone(),
            active_line: Some(active_line),
        }
    }

    /// Whether `snapshot` shows exactly this state
    pub fn matches(&self, snapshot: &Snapshot) -> bool {
        self.tree == snapshot.tree
            && self.memory == snapshot.memory
            && self.stack == snapshot.stack
            && self.log == snapshot.log
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_and_complete_keep_memory_and_stack_in_step() {
        let mut live = LiveState::new();
        live.stack.push("factorial", vec![("n".into(), "2".into())], Some(0));
        let root = live.create_frame("fact", "n=2", None, 1);

        assert_eq!(live.memory.occupied_indices(), vec![0]);
        assert_eq!(live.stack.bound_count(), 1);

        live.complete_frame(root, 1);
        assert!(live.memory.occupied_indices().is_empty());
        assert!(live.stack.is_empty());
        assert_eq!(live.tree.get(root).map(|f| f.status), Some(FrameStatus::Completed));
    }

    #[test]
    fn capture_matches_live_state() {
        let mut live = LiveState::new();
        live.log(LogKind::System, "Prepare: Power(0)");
        let snapshot = live.capture(3);

        assert!(live.matches(&snapshot));
        assert_eq!(snapshot.active_line, Some(3));

        live.log(LogKind::Info, "later");
        assert!(!live.matches(&snapshot));
    }
}
