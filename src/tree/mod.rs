//! Call-tree model
//!
//! The tree is stored as a flat list of [`Frame`]s in creation order. A
//! [`FrameId`] is the frame's index into that list, so lookups are O(1) and
//! ids stay stable for the whole run. Parent/child links are kept on the
//! parent as an ordered `children` list (call order, not completion order).
//!
//! # Lifecycle
//!
//! ```text
//! Active ──▶ Pending ──▶ Active ──▶ Returning ──▶ Completed
//!    │                                  ▲
//!    └──────────── (base case) ─────────┘
//! ```
//!
//! Transitions are driven by the runners. [`CallTree::update_frame`] merges
//! whatever fields it is given and does not check legality.

use std::fmt;

/// Identifier of a frame within a single run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FrameId(usize);

impl fmt::Display for FrameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Lifecycle status of a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameStatus {
    /// Waiting on one or more child calls
    Pending,
    /// Currently executing (just entered, or combining child results)
    Active,
    /// Terminal: result delivered, memory freed, stack entry popped
    Completed,
    /// Result computed and attached, about to complete
    Returning,
}

impl FrameStatus {
    pub fn label(self) -> &'static str {
        match self {
            FrameStatus::Pending => "pending",
            FrameStatus::Active => "active",
            FrameStatus::Completed => "completed",
            FrameStatus::Returning => "returning",
        }
    }
}

/// One node of the call tree
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub id: FrameId,
    pub name: String,
    pub args: String,
    pub return_value: Option<String>,
    pub note: Option<String>,
    pub children: Vec<FrameId>,
    pub status: FrameStatus,
    pub depth: usize,
}

impl Frame {
    pub fn is_completed(&self) -> bool {
        self.status == FrameStatus::Completed
    }
}

/// Partial update merged into a frame by [`CallTree::update_frame`]
///
/// `None` leaves a field untouched. For the optional fields, `Some(None)`
/// clears the value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameUpdate {
    pub status: Option<FrameStatus>,
    pub return_value: Option<Option<String>>,
    pub note: Option<Option<String>>,
}

impl FrameUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(mut self, status: FrameStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn return_value(mut self, value: impl Into<String>) -> Self {
        self.return_value = Some(Some(value.into()));
        self
    }

    pub fn note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(Some(note.into()));
        self
    }

    pub fn clear_note(mut self) -> Self {
        self.note = Some(None);
        self
    }
}

/// The call tree of one run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CallTree {
    frames: Vec<Frame>,
    root: Option<FrameId>,
}

impl CallTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a new `Active` frame and link it under `parent`, or make it the
    /// root when `parent` is `None`. An unknown parent leaves the frame unlinked.
    pub fn create_frame(
        &mut self,
        name: impl Into<String>,
        args: impl Into<String>,
        parent: Option<FrameId>,
        depth: usize,
    ) -> FrameId {
        let id = FrameId(self.frames.len());
        self.frames.push(Frame {
            id,
            name: name.into(),
            args: args.into(),
            return_value: None,
            note: None,
            children: Vec::new(),
            status: FrameStatus::Active,
            depth,
        });

        match parent {
            Some(parent) => {
                if let Some(parent_frame) = self.frames.get_mut(parent.0) {
                    parent_frame.children.push(id);
                }
            }
            None => self.root = Some(id),
        }

        id
    }

    /// Merge `update` into the frame. Unknown ids are ignored.
    pub fn update_frame(&mut self, id: FrameId, update: FrameUpdate) {
        let Some(frame) = self.frames.get_mut(id.0) else {
            return;
        };
        if let Some(status) = update.status {
            frame.status = status;
        }
        if let Some(value) = update.return_value {
            frame.return_value = value;
        }
        if let Some(note) = update.note {
            frame.note = note;
        }
    }

    pub fn get(&self, id: FrameId) -> Option<&Frame> {
        self.frames.get(id.0)
    }

    pub fn root(&self) -> Option<FrameId> {
        self.root
    }

    pub fn root_frame(&self) -> Option<&Frame> {
        self.root.and_then(|id| self.get(id))
    }

    /// All frames in creation order
    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn count_with_status(&self, status: FrameStatus) -> usize {
        self.frames.iter().filter(|f| f.status == status).count()
    }

    /// Frames that have not reached `Completed`
    pub fn live_frames(&self) -> impl Iterator<Item = &Frame> {
        self.frames.iter().filter(|f| !f.is_completed())
    }

    /// Pre-order walk from the root, yielding each frame with its nesting level
    pub fn walk(&self) -> Vec<(usize, &Frame)> {
        let mut out = Vec::with_capacity(self.frames.len());
        let mut pending: Vec<(usize, FrameId)> = self.root.into_iter().map(|r| (0, r)).collect();

        while let Some((level, id)) = pending.pop() {
            let Some(frame) = self.get(id) else { continue };
            out.push((level, frame));
            // Reverse so the first child is visited first
            for child in frame.children.iter().rev() {
                pending.push((level + 1, *child));
            }
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_frame_without_parent_becomes_root() {
        let mut tree = CallTree::new();
        let root = tree.create_frame("fib", "n=2", None, 1);
        assert_eq!(tree.root(), Some(root));
        assert_eq!(tree.get(root).map(|f| f.status), Some(FrameStatus::Active));
    }

    #[test]
    fn children_keep_call_order() {
        let mut tree = CallTree::new();
        let root = tree.create_frame("fib", "n=2", None, 1);
        let left = tree.create_frame("fib", "n=1", Some(root), 2);
        let right = tree.create_frame("fib", "n=0", Some(root), 2);

        // Completing the right child first must not reorder children
        tree.update_frame(right, FrameUpdate::new().status(FrameStatus::Completed));
        tree.update_frame(left, FrameUpdate::new().status(FrameStatus::Completed));

        assert_eq!(tree.get(root).map(|f| f.children.clone()), Some(vec![left, right]));
    }

    #[test]
    fn update_merges_only_given_fields() {
        let mut tree = CallTree::new();
        let id = tree.create_frame("fact", "n=3", None, 1);
        tree.update_frame(id, FrameUpdate::new().note("3 * 2"));
        tree.update_frame(id, FrameUpdate::new().status(FrameStatus::Returning).return_value("6"));

        let frame = tree.get(id).unwrap();
        assert_eq!(frame.note.as_deref(), Some("3 * 2"));
        assert_eq!(frame.return_value.as_deref(), Some("6"));

        tree.update_frame(id, FrameUpdate::new().clear_note());
        let frame = tree.get(id).unwrap();
        assert_eq!(frame.note, None);
        assert_eq!(frame.return_value.as_deref(), Some("6"));
        assert_eq!(frame.status, FrameStatus::Returning);
    }

    #[test]
    fn walk_is_preorder() {
        let mut tree = CallTree::new();
        let a = tree.create_frame("f", "a", None, 1);
        let b = tree.create_frame("f", "b", Some(a), 2);
        let _c = tree.create_frame("f", "c", Some(b), 3);
        let _d = tree.create_frame("f", "d", Some(a), 2);

        let order: Vec<(usize, &str)> = tree
            .walk()
            .into_iter()
            .map(|(level, f)| (level, f.args.as_str()))
            .collect();
        assert_eq!(order, vec![(0, "a"), (1, "b"), (2, "c"), (1, "d")]);
    }

    #[test]
    fn unknown_parent_does_not_replace_root() {
        let mut tree = CallTree::new();
        let root = tree.create_frame("fact", "n=2", None, 1);
        let orphan = tree.create_frame("fact", "n=1", Some(FrameId(42)), 2);

        assert_eq!(tree.root(), Some(root));
        assert_eq!(tree.len(), 2);
        assert!(tree.get(root).is_some_and(|f| f.children.is_empty()));
        assert!(tree.get(orphan).is_some());
        // Unlinked frames are not reachable from the root
        assert_eq!(tree.walk().len(), 1);
    }

    #[test]
    fn counts_frames_by_status() {
        let mut tree = CallTree::new();
        let root = tree.create_frame("fib", "n=2", None, 1);
        let left = tree.create_frame("fib", "n=1", Some(root), 2);
        tree.create_frame("fib", "n=0", Some(root), 2);
        tree.update_frame(root, FrameUpdate::new().status(FrameStatus::Pending));
        tree.update_frame(left, FrameUpdate::new().status(FrameStatus::Completed));

        assert_eq!(tree.count_with_status(FrameStatus::Active), 1);
        assert_eq!(tree.count_with_status(FrameStatus::Pending), 1);
        assert_eq!(tree.count_with_status(FrameStatus::Completed), 1);
        assert_eq!(tree.count_with_status(FrameStatus::Returning), 0);
    }
}
