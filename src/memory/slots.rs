//! Simulated stack memory
//!
//! A fixed array of [`MEMORY_CAPACITY`] slots. Slot `depth - 1` holds the
//! activation record of the live call at that recursion depth. Addresses are
//! synthetic display labels assigned once at construction.
//!
//! Out-of-range depths are silently clipped: `allocate` and `free` ignore
//! them rather than erroring. Runners clamp their inputs so real runs stay
//! inside the array.

use crate::tree::FrameId;

/// Number of slots in the simulated stack region
pub const MEMORY_CAPACITY: usize = 64;

/// Base of the synthetic address range
pub const SLOT_ADDRESS_BASE: usize = 1000;

/// Bytes between two consecutive slot addresses
pub const SLOT_STRIDE: usize = 4;

/// The call that currently owns a slot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Occupant {
    pub frame_id: FrameId,
    pub value: String,
    pub depth: usize,
}

/// One activation-record slot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemorySlot {
    pub address: String,
    pub occupant: Option<Occupant>,
}

impl MemorySlot {
    fn new(index: usize) -> Self {
        MemorySlot {
            address: format!("0x{:X}", index * SLOT_STRIDE + SLOT_ADDRESS_BASE),
            occupant: None,
        }
    }

    pub fn is_occupied(&self) -> bool {
        self.occupant.is_some()
    }

    pub fn frame_id(&self) -> Option<FrameId> {
        self.occupant.as_ref().map(|o| o.frame_id)
    }

    /// Display string of the occupant, empty when free
    pub fn value(&self) -> &str {
        self.occupant.as_ref().map_or("", |o| o.value.as_str())
    }

    /// Owning depth, `None` when free
    pub fn depth(&self) -> Option<usize> {
        self.occupant.as_ref().map(|o| o.depth)
    }
}

/// Fixed-capacity slot array indexed by recursion depth
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StackMemory {
    slots: Vec<MemorySlot>,
}

impl StackMemory {
    pub fn new() -> Self {
        StackMemory {
            slots: (0..MEMORY_CAPACITY).map(MemorySlot::new).collect(),
        }
    }

    fn index_for(&self, depth: usize) -> Option<usize> {
        depth.checked_sub(1).filter(|idx| *idx < self.slots.len())
    }

    /// Claim slot `depth - 1` for `frame_id`
    pub fn allocate(&mut self, depth: usize, frame_id: FrameId, value: impl Into<String>) {
        if let Some(idx) = self.index_for(depth) {
            self.slots[idx].occupant = Some(Occupant {
                frame_id,
                value: value.into(),
                depth,
            });
        }
    }

    /// Return slot `depth - 1` to the unoccupied default
    pub fn free(&mut self, depth: usize) {
        if let Some(idx) = self.index_for(depth) {
            self.slots[idx].occupant = None;
        }
    }

    pub fn slots(&self) -> &[MemorySlot] {
        &self.slots
    }

    pub fn slot(&self, index: usize) -> Option<&MemorySlot> {
        self.slots.get(index)
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Indices of occupied slots, ascending
    pub fn occupied_indices(&self) -> Vec<usize> {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, slot)| slot.is_occupied())
            .map(|(idx, _)| idx)
            .collect()
    }

    pub fn occupied_count(&self) -> usize {
        self.slots.iter().filter(|s| s.is_occupied()).count()
    }
}

impl Default for StackMemory {
    fn default() -> Self {
        Self::new()
    }
}
