// Playback controller: run, reset, speed and timeline seek

use crate::engine::algorithms::{Algorithm, Invocation};
use crate::engine::errors::PlaybackError;
use crate::engine::pacing::{Pacer, PlaybackConfig, Speed};
use crate::engine::recorder::Recorder;
use crate::engine::state::LiveState;
use crate::snapshot::{EventLog, LogKind, Snapshot, SnapshotManager};
use std::time::Duration;
use tracing::{debug, info};

/// Outcome of a finished run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub invocation: Invocation,
    /// Root return value as displayed, e.g. `24` or `true`
    pub result: String,
    pub steps: usize,
    pub frames: usize,
}

/// Owns the live state, the history and what is currently displayed
#[derive(Debug)]
pub struct Controller {
    live: LiveState,
    history: SnapshotManager,
    displayed: Snapshot,
    cursor: usize,
    /// Set for the duration of `run`. `run` holds `&mut self`, so the
    /// `RunInProgress` guards below only fire for a controller observed from
    /// inside a run; they stay as the documented contract.
    in_progress: bool,
    selected: Algorithm,
    speed: Speed,
    base_delay: Duration,
}

impl Controller {
    pub fn new(config: PlaybackConfig) -> Self {
        let mut log = EventLog::new();
        log.push(LogKind::System, "Recursion engine ready.");

        Controller {
            live: LiveState::new(),
            history: SnapshotManager::new(),
            displayed: Snapshot::blank(log),
            cursor: 0,
            in_progress: false,
            selected: Algorithm::default(),
            speed: config.speed,
            base_delay: config.base_delay,
        }
    }

    /// Change the selected algorithm; displayed state is kept until the next run
    pub fn select(&mut self, algorithm: Algorithm) {
        self.selected = algorithm;
    }

    /// Run `invocation` to completion, pacing each commit through `pacer`.
    /// Inputs beyond the algorithm limits are clamped first.
    pub fn run(
        &mut self,
        invocation: Invocation,
        pacer: &mut dyn Pacer,
    ) -> Result<RunSummary, PlaybackError> {
        if self.in_progress {
            debug!("run rejected: already in progress");
            return Err(PlaybackError::RunInProgress);
        }

        let invocation = invocation.clamped();
        self.clear_live();
        self.in_progress = true;
        self.selected = invocation.algorithm();
        info!(%invocation, speed = %self.speed, "run started");

        self.live
            .log(LogKind::System, format!("Prepare: {invocation}"));

        let result = {
            let mut recorder = Recorder::new(
                &mut self.live,
                &mut self.history,
                &mut self.speed,
                self.base_delay,
                self.selected,
                pacer,
            );
            invocation.run(&mut recorder)
        };

        if let Some(last) = self.history.last() {
            self.displayed = last.clone();
            self.cursor = self.history.len() - 1;
        }
        self.in_progress = false;

        let summary = RunSummary {
            invocation,
            result,
            steps: self.history.len(),
            frames: self.live.tree.len(),
        };
        info!(
            result = %summary.result,
            steps = summary.steps,
            frames = summary.frames,
            "run finished"
        );
        Ok(summary)
    }

    /// Clear the live state and history
    pub fn reset(&mut self) -> Result<(), PlaybackError> {
        if self.in_progress {
            debug!("reset rejected: run in progress");
            return Err(PlaybackError::RunInProgress);
        }

        self.clear_live();
        let mut log = std::mem::take(&mut self.displayed.log);
        log.push(LogKind::System, "Visualization reset.");
        self.displayed = Snapshot::blank(log);
        self.cursor = 0;
        debug!("visualization reset");
        Ok(())
    }

    pub fn set_speed(&mut self, speed: Speed) {
        self.speed = speed;
    }

    /// Display the snapshot at `step`; history and live state are untouched
    pub fn seek(&mut self, step: usize) -> Result<(), PlaybackError> {
        if self.in_progress {
            return Err(PlaybackError::RunInProgress);
        }
        if self.history.is_empty() {
            return Err(PlaybackError::EmptyHistory);
        }

        let snapshot = self.history.get(step).ok_or(PlaybackError::StepOutOfRange {
            step,
            total: self.history.len(),
        })?;
        self.displayed = snapshot.clone();
        self.cursor = step;
        debug!(step, "seek");
        Ok(())
    }

    pub fn step_forward(&mut self) -> Result<(), PlaybackError> {
        self.seek(self.cursor + 1)
    }

    pub fn step_backward(&mut self) -> Result<(), PlaybackError> {
        match self.cursor.checked_sub(1) {
            Some(step) => self.seek(step),
            None => Err(PlaybackError::StepOutOfRange {
                step: 0,
                total: self.history.len(),
            }),
        }
    }

    pub fn rewind_to_start(&mut self) -> Result<(), PlaybackError> {
        self.seek(0)
    }

    pub fn jump_to_end(&mut self) -> Result<(), PlaybackError> {
        self.seek(self.history.len().saturating_sub(1))
    }

    fn clear_live(&mut self) {
        self.live = LiveState::new();
        self.history.clear();
    }

    // ========== Getter methods for UI ==========

    /// The snapshot currently on screen
    pub fn displayed(&self) -> &Snapshot {
        &self.displayed
    }

    /// Index of the displayed step
    pub fn current_step(&self) -> usize {
        self.cursor
    }

    pub fn total_steps(&self) -> usize {
        self.history.len()
    }

    pub fn is_at_end(&self) -> bool {
        self.history.is_empty() || self.cursor + 1 >= self.history.len()
    }

    pub fn is_running(&self) -> bool {
        self.in_progress
    }

    pub fn selected(&self) -> Algorithm {
        self.selected
    }

    pub fn speed(&self) -> Speed {
        self.speed
    }

    pub fn base_delay(&self) -> Duration {
        self.base_delay
    }

    pub fn history(&self) -> &SnapshotManager {
        &self.history
    }

    /// The authoritative state as left by the last run
    pub fn live(&self) -> &LiveState {
        &self.live
    }

    pub fn history_memory(&self) -> usize {
        self.history.memory_usage()
    }
}

impl Default for Controller {
    fn default() -> Self {
        Self::new(PlaybackConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::pacing::{NoPacing, Progress};

    /// Records every delay asked for and can bump the speed mid-run
    #[derive(Default)]
    struct ScriptedPacer {
        presented: usize,
        waits: Vec<Duration>,
        switch_to_instant_after: Option<usize>,
    }

    impl Pacer for ScriptedPacer {
        fn present(&mut self, progress: &Progress<'_>) {
            assert_eq!(progress.total, progress.step + 1);
            self.presented += 1;
        }

        fn wait(&mut self, delay: Duration, speed: &mut Speed) {
            self.waits.push(delay);
            if self.switch_to_instant_after == Some(self.waits.len()) {
                *speed = Speed::INSTANT;
            }
        }
    }

    #[test]
    fn instant_speed_presents_without_waiting() {
        let mut controller = Controller::new(PlaybackConfig {
            base_delay: Duration::from_millis(500),
            speed: Speed::INSTANT,
        });
        let mut pacer = ScriptedPacer::default();
        let summary = controller.run(Invocation::Factorial(3), &mut pacer).unwrap();

        assert_eq!(pacer.presented, summary.steps);
        assert!(pacer.waits.is_empty());
    }

    #[test]
    fn delay_follows_speed_and_can_change_mid_run() {
        let mut controller = Controller::new(PlaybackConfig {
            base_delay: Duration::from_millis(500),
            speed: Speed::FAST,
        });
        let mut pacer = ScriptedPacer {
            switch_to_instant_after: Some(3),
            ..ScriptedPacer::default()
        };
        let summary = controller.run(Invocation::Fibonacci(3), &mut pacer).unwrap();

        assert_eq!(pacer.waits, vec![Duration::from_millis(250); 3]);
        assert_eq!(pacer.presented, summary.steps);
        assert_eq!(controller.speed(), Speed::INSTANT);
    }

    #[test]
    fn seek_is_rejected_before_any_run() {
        let mut controller = Controller::default();
        assert_eq!(controller.seek(0), Err(PlaybackError::EmptyHistory));
    }

    #[test]
    fn seek_out_of_range_leaves_display_alone() {
        let mut controller = Controller::default();
        controller.set_speed(Speed::INSTANT);
        let summary = controller.run(Invocation::Power(2), &mut NoPacing).unwrap();
        let before = controller.displayed().clone();

        assert_eq!(
            controller.seek(summary.steps),
            Err(PlaybackError::StepOutOfRange {
                step: summary.steps,
                total: summary.steps
            })
        );
        assert_eq!(controller.displayed(), &before);
        assert_eq!(controller.current_step(), summary.steps - 1);
    }

    #[test]
    fn reset_clears_history_and_appends_notice() {
        let mut controller = Controller::default();
        controller.set_speed(Speed::INSTANT);
        controller.run(Invocation::Factorial(2), &mut NoPacing).unwrap();

        controller.reset().unwrap();
        assert_eq!(controller.total_steps(), 0);
        assert!(controller.displayed().tree.is_empty());
        assert!(controller.live().tree.is_empty());
        assert_eq!(
            controller.displayed().log.last().map(|e| e.message.as_str()),
            Some("Visualization reset.")
        );
    }

    #[test]
    fn step_backward_stops_at_zero() {
        let mut controller = Controller::default();
        controller.set_speed(Speed::INSTANT);
        controller.run(Invocation::Factorial(1), &mut NoPacing).unwrap();

        controller.rewind_to_start().unwrap();
        assert!(controller.step_backward().is_err());
        assert_eq!(controller.current_step(), 0);
        controller.step_forward().unwrap();
        assert_eq!(controller.current_step(), 1);
        controller.jump_to_end().unwrap();
        assert!(controller.is_at_end());
    }

    #[test]
    fn operations_are_rejected_while_a_run_is_in_progress() {
        let mut controller = Controller::default();
        controller.set_speed(Speed::INSTANT);
        controller.run(Invocation::Factorial(3), &mut NoPacing).unwrap();
        controller.rewind_to_start().unwrap();

        let displayed = controller.displayed().clone();
        let steps = controller.total_steps();
        controller.in_progress = true;

        assert!(controller.is_running());
        assert_eq!(
            controller.run(Invocation::Fibonacci(2), &mut NoPacing),
            Err(PlaybackError::RunInProgress)
        );
        assert_eq!(controller.reset(), Err(PlaybackError::RunInProgress));
        assert_eq!(controller.seek(2), Err(PlaybackError::RunInProgress));
        assert_eq!(controller.step_forward(), Err(PlaybackError::RunInProgress));

        assert_eq!(controller.displayed(), &displayed);
        assert_eq!(controller.total_steps(), steps);
        assert_eq!(controller.current_step(), 0);
        assert_eq!(controller.selected(), Algorithm::Factorial);
    }

    #[test]
    fn history_memory_tracks_recorded_snapshots() {
        let mut controller = Controller::default();
        controller.set_speed(Speed::INSTANT);
        assert_eq!(controller.history_memory(), 0);

        controller.run(Invocation::Factorial(2), &mut NoPacing).unwrap();
        let small = controller.history_memory();
        assert!(small > 0);

        controller.run(Invocation::Fibonacci(5), &mut NoPacing).unwrap();
        assert!(controller.history_memory() > small);

        controller.reset().unwrap();
        assert_eq!(controller.history_memory(), 0);
    }
}
