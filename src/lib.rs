//! # Introduction
//!
//! RecurTTY runs small recursive algorithms (factorial, Fibonacci, power,
//! palindrome check) while recording a snapshot of the full visualized state
//! at every meaningful step. The snapshot history is then played back live
//! or scrubbed forward and backward through a terminal UI built with
//! [ratatui](https://docs.rs/ratatui).
//!
//! ## Execution pipeline
//!
//! ```text
//! Input → Invocation → Runner → Recorder → Snapshots → Controller → TUI
//! ```
//!
//! 1. [`engine::algorithms`]: resolves raw input into an
//!    [`engine::Invocation`] and describes each algorithm to the runner.
//! 2. [`engine::runner`]: the shared recursion skeleton that mutates the
//!    live state and commits after every step.
//! 3. [`tree`] and [`memory`]: the call tree, the simulated stack memory
//!    and the call stack being visualized.
//! 4. [`snapshot`]: immutable snapshots, the history that stores them and
//!    the [`snapshot::EventLog`] shown beside the visualization.
//! 5. [`engine::playback`]: the [`engine::Controller`] that runs, resets,
//!    paces and seeks.
//! 6. [`ui`]: ratatui-based TUI; not part of the stable library API.

pub mod engine;
pub mod memory;
pub mod snapshot;
pub mod tree;
pub mod ui;
