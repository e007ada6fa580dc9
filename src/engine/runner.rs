//! Shared recursion skeleton
//!
//! Every built-in algorithm runs through [`execute`]. The skeleton owns the
//! step sequence (stack push, frame creation, base case, recursive calls,
//! combination, completion) and the commits between those steps; a
//! [`Recursion`] descriptor supplies the algorithm-specific parts.
//!
//! # Step sequence for one call
//!
//! ```text
//! push entry ─ commit(entry)
//! create frame ─ commit(entry)
//! base case?  ─ Returning ─ commit(base) ─ Completed ─ commit(base)
//! otherwise   ─ Pending ─ commit(call[0]) ─ child 0
//!             ─ Active "Wait..." ─ commit(call[1]) ─ Pending ─ child 1 ...
//!             ─ Active <note> ─ commit(return)
//!             ─ Returning ─ commit(return)
//!             ─ Completed ─ commit(return)
//! ```

use crate::engine::recorder::Recorder;
use crate::snapshot::LogKind;
use crate::tree::{FrameId, FrameStatus, FrameUpdate};
use std::fmt;

/// Note shown on a frame between two of its child calls
pub const WAIT_NOTE: &str = "Wait...";

/// Source-listing lines highlighted by the skeleton
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceLines {
    /// Function header, highlighted on entry
    pub entry: usize,
    /// Line of each recursive call, in call order
    pub calls: &'static [usize],
    /// Line of the combining return statement
    pub combine: usize,
}

impl SourceLines {
    /// Line for the `child`-th recursive call
    pub fn call_line(&self, child: usize) -> usize {
        self.calls
            .get(child)
            .or(self.calls.last())
            .copied()
            .unwrap_or(self.entry)
    }
}

/// A base case that fired
#[derive(Debug, Clone, PartialEq)]
pub struct BaseCase<T> {
    pub value: T,
    pub note: &'static str,
    pub line: usize,
}

/// Result of combining child results
#[derive(Debug, Clone, PartialEq)]
pub struct Combination<T> {
    pub value: T,
    /// Expression shown on the frame while combining, e.g. `5 * 24`
    pub note: String,
}

/// Algorithm-specific half of a runner
pub trait Recursion {
    type Arg;
    type Output: Copy + fmt::Display;

    /// Name pushed on the call stack
    fn function_name(&self) -> &'static str;

    /// Short label on call-tree frames and memory slots
    fn frame_name(&self) -> &'static str;

    fn lines(&self) -> SourceLines;

    fn stack_args(&self, arg: &Self::Arg) -> Vec<(String, String)>;

    fn frame_args(&self, arg: &Self::Arg) -> String;

    fn base_case(&self, arg: &Self::Arg) -> Option<BaseCase<Self::Output>>;

    /// Arguments of the recursive calls, in the order they are made
    fn subproblems(&self, arg: &Self::Arg) -> Vec<Self::Arg>;

    /// Note attached while waiting on the first child
    fn pending_note(&self, _arg: &Self::Arg) -> Option<String> {
        None
    }

    fn combine(&self, arg: &Self::Arg, results: &[Self::Output]) -> Combination<Self::Output>;
}

/// Run `algorithm` on `arg` as the root call
pub fn execute<R: Recursion>(algorithm: &R, rec: &mut Recorder<'_>, arg: R::Arg) -> R::Output {
    call(algorithm, rec, arg, None, 1)
}

fn call<R: Recursion>(
    algorithm: &R,
    rec: &mut Recorder<'_>,
    arg: R::Arg,
    parent: Option<FrameId>,
    depth: usize,
) -> R::Output {
    let lines = algorithm.lines();

    rec.push_call(algorithm.function_name(), algorithm.stack_args(&arg), lines.entry);
    rec.commit(lines.entry);

    let frame_args = algorithm.frame_args(&arg);
    let id = rec.create_frame(algorithm.frame_name(), frame_args.clone(), parent, depth);
    rec.commit(lines.entry);

    if let Some(base) = algorithm.base_case(&arg) {
        rec.log(
            LogKind::Info,
            format!("{}: {} -> return {}", base.note, frame_args, base.value),
        );
        rec.update(
            id,
            FrameUpdate::new()
                .status(FrameStatus::Returning)
                .return_value(base.value.to_string())
                .note(base.note),
        );
        rec.commit(base.line);

        rec.complete(id, depth);
        rec.commit(base.line);
        return base.value;
    }

    let subproblems = algorithm.subproblems(&arg);
    let mut results = Vec::with_capacity(subproblems.len());

    for (child, sub) in subproblems.into_iter().enumerate() {
        let line = lines.call_line(child);
        if child == 0 {
            let mut update = FrameUpdate::new().status(FrameStatus::Pending);
            if let Some(note) = algorithm.pending_note(&arg) {
                update = update.note(note);
            }
            rec.update(id, update);
            rec.commit(line);
        } else {
            rec.update(
                id,
                FrameUpdate::new().status(FrameStatus::Active).note(WAIT_NOTE),
            );
            rec.commit(line);
            rec.update(id, FrameUpdate::new().status(FrameStatus::Pending));
        }

        results.push(call(algorithm, rec, sub, Some(id), depth + 1));
    }

    let combination = algorithm.combine(&arg, &results);
    rec.log(LogKind::System, format!("Combine: {}", combination.note));
    rec.update(
        id,
        FrameUpdate::new()
            .status(FrameStatus::Active)
            .note(combination.note),
    );
    rec.commit(lines.combine);

    rec.log(LogKind::Success, format!("Return: {}", combination.value));
    rec.update(
        id,
        FrameUpdate::new()
            .status(FrameStatus::Returning)
            .return_value(combination.value.to_string())
            .clear_note(),
    );
    rec.commit(lines.combine);

    rec.complete(id, depth);
    rec.commit(lines.combine);
    combination.value
}
