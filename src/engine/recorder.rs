// Commit primitive shared by all runners

use crate::engine::algorithms::Algorithm;
use crate::engine::pacing::{Pacer, Progress, Speed};
use crate::engine::state::LiveState;
use crate::snapshot::{LogKind, SnapshotManager};
use crate::tree::{FrameId, FrameUpdate};
use std::time::Duration;
use tracing::trace;

/// Mutable view of the controller handed to a runner for one run
///
/// Runners mutate the live state through it and call [`Recorder::commit`]
/// after every visible change.
pub struct Recorder<'a> {
    live: &'a mut LiveState,
    history: &'a mut SnapshotManager,
    speed: &'a mut Speed,
    base_delay: Duration,
    algorithm: Algorithm,
    pacer: &'a mut dyn Pacer,
}

impl<'a> Recorder<'a> {
    pub fn new(
        live: &'a mut LiveState,
        history: &'a mut SnapshotManager,
        speed: &'a mut Speed,
        base_delay: Duration,
        algorithm: Algorithm,
        pacer: &'a mut dyn Pacer,
    ) -> Self {
        Recorder {
            live,
            history,
            speed,
            base_delay,
            algorithm,
            pacer,
        }
    }

    /// Record the live state as the next step, present it, then pace
    pub fn commit(&mut self, line: usize) {
        let step = self.history.push(self.live.capture(line));
        trace!(step, line, "commit");

        if let Some(snapshot) = self.history.get(step) {
            self.pacer.present(&Progress {
                snapshot,
                step,
                total: step + 1,
                algorithm: self.algorithm,
                speed: *self.speed,
                history_bytes: self.history.memory_usage(),
            });
        }

        if let Some(delay) = self.speed.delay(self.base_delay) {
            self.pacer.wait(delay, self.speed);
        }
    }

    pub fn push_call(&mut self, function_name: &str, args: Vec<(String, String)>, line: usize) {
        self.live.stack.push(function_name, args, Some(line));
    }

    pub fn create_frame(
        &mut self,
        name: &str,
        args: String,
        parent: Option<FrameId>,
        depth: usize,
    ) -> FrameId {
        self.live.create_frame(name, args, parent, depth)
    }

    pub fn update(&mut self, id: FrameId, update: FrameUpdate) {
        self.live.update_frame(id, update);
    }

    pub fn complete(&mut self, id: FrameId, depth: usize) {
        self.live.complete_frame(id, depth);
    }

    pub fn log(&mut self, kind: LogKind, message: impl Into<String>) {
        self.live.log(kind, message);
    }
}
