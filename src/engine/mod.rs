//! Execution recording and playback
//!
//! This module provides the engine behind the visualizer:
//! - [`state`]: the single authoritative live state of a run
//! - [`recorder`]: the commit primitive that freezes live state into history
//! - [`runner`]: the recursion skeleton shared by every algorithm
//! - [`algorithms`]: the four built-in algorithm descriptors and their listings
//! - [`pacing`]: speed, pacing delay and the [`pacing::Pacer`] hook
//! - [`playback`]: the controller (run, reset, seek, speed)
//! - [`errors`]: rejected controller operations
//!
//! # Execution Model
//!
//! A run is single-threaded. The runner recurses depth-first and calls
//! `commit` after each visible mutation; commit appends a snapshot and hands
//! it to the pacer, which is the only place the run can pause. Seeking reads
//! recorded snapshots and never re-executes anything.

pub mod algorithms;
pub mod errors;
pub mod pacing;
pub mod playback;
pub mod recorder;
pub mod runner;
pub mod state;

pub use algorithms::{Algorithm, Invocation};
pub use errors::PlaybackError;
pub use pacing::{NoPacing, Pacer, PlaybackConfig, Progress, Speed};
pub use playback::{Controller, RunSummary};
