//! Memory model of a recursive run
//!
//! This module provides the two stack-shaped structures that mirror each
//! other during a run:
//! - [`slots`]: the simulated stack region, one fixed slot per recursion depth
//! - [`stack`]: the call stack of in-flight calls
//!
//! # Invariant
//!
//! A slot is occupied exactly while the frame at that depth is not
//! `Completed`, and the frame's call-stack entry is popped in the same step
//! that frees the slot.

pub mod slots;
pub mod stack;

pub use slots::{MemorySlot, StackMemory, MEMORY_CAPACITY};
pub use stack::{CallStack, CallStackEntry};
