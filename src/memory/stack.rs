//! Call stack of in-flight calls
//!
//! - [`CallStack`]: LIFO of entries, one per call that has started and not
//!   yet completed
//! - [`CallStackEntry`]: a single activation as shown in the call-stack pane
//!
//! # Binding
//!
//! An entry is pushed before its call-tree frame exists, so it starts
//! unbound. [`CallStack::bind_top`] attaches the frame id once the frame is
//! created. Apart from that short window, the number of bound entries always
//! equals the number of non-completed frames.

use crate::tree::FrameId;

/// One in-flight call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallStackEntry {
    pub id: u64,
    pub function_name: String,
    /// Parameter name to rendered value, in declaration order
    pub args: Vec<(String, String)>,
    pub line: Option<usize>,
    /// Set on the innermost entry only
    pub highlight: bool,
    pub frame: Option<FrameId>,
}

impl CallStackEntry {
    /// Render as `name(a=1, b=2)`
    pub fn signature(&self) -> String {
        let args = self
            .args
            .iter()
            .map(|(name, value)| format!("{name}={value}"))
            .collect::<Vec<_>>()
            .join(", ");
        format!("{}({})", self.function_name, args)
    }
}

/// The call stack
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CallStack {
    entries: Vec<CallStackEntry>,
    next_id: u64,
}

impl CallStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Push a new entry and make it the highlighted one
    pub fn push(
        &mut self,
        function_name: impl Into<String>,
        args: Vec<(String, String)>,
        line: Option<usize>,
    ) -> u64 {
        for entry in &mut self.entries {
            entry.highlight = false;
        }

        let id = self.next_id;
        self.next_id += 1;
        self.entries.push(CallStackEntry {
            id,
            function_name: function_name.into(),
            args,
            line,
            highlight: true,
            frame: None,
        });
        id
    }

    /// Pop the top entry; the caller's entry becomes highlighted again
    pub fn pop(&mut self) -> Option<CallStackEntry> {
        let popped = self.entries.pop();
        if let Some(top) = self.entries.last_mut() {
            top.highlight = true;
        }
        popped
    }

    /// Attach the frame created for the innermost call
    pub fn bind_top(&mut self, frame: FrameId) {
        if let Some(top) = self.entries.last_mut() {
            top.frame = Some(frame);
        }
    }

    pub fn top(&self) -> Option<&CallStackEntry> {
        self.entries.last()
    }

    /// Entries from outermost to innermost
    pub fn entries(&self) -> &[CallStackEntry] {
        &self.entries
    }

    pub fn depth(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn bound_count(&self) -> usize {
        self.entries.iter().filter(|e| e.frame.is_some()).count()
    }
}
