//! Main TUI application state and logic
//!
//! [`App`] owns the [`Controller`] and the purely visual [`ViewState`]. While
//! a run is executing the controller is borrowed by the run, so frames are
//! drawn by [`TuiPacer`] from the snapshot each commit hands it.

use crate::engine::{Algorithm, Controller, Pacer, PlaybackError, Progress, Speed};
use crate::engine::algorithms::InputKind;
use crate::snapshot::Snapshot;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout},
    Frame, Terminal,
};
use std::io;
use std::time::{Duration, Instant};
use tracing::debug;

/// Which pane is currently focused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusedPane {
    Tree,
    Memory,
    Stack,
    Log,
}

impl FocusedPane {
    /// Move focus to the next pane (tree -> stack -> memory -> log)
    pub fn next(self) -> Self {
        match self {
            FocusedPane::Tree => FocusedPane::Stack,
            FocusedPane::Stack => FocusedPane::Memory,
            FocusedPane::Memory => FocusedPane::Log,
            FocusedPane::Log => FocusedPane::Tree,
        }
    }
}

/// Everything on screen that is not engine state
pub struct ViewState {
    pub focused_pane: FocusedPane,

    /// Per-pane scroll offsets
    pub tree_scroll: usize,
    pub memory_scroll: usize,
    pub stack_scroll: usize,
    pub log_scroll: usize,

    /// Raw numeric input (factorial, Fibonacci, power)
    pub number_input: String,

    /// Raw text input (palindrome)
    pub text_input: String,

    /// Buffer of the input field while it is being edited
    pub editing: Option<String>,

    /// Status message to display
    pub status_message: String,

    /// Whether the app should quit
    pub should_quit: bool,
}

impl ViewState {
    pub fn new(number_input: String, text_input: String) -> Self {
        ViewState {
            focused_pane: FocusedPane::Tree,
            tree_scroll: 0,
            memory_scroll: 0,
            stack_scroll: 0,
            log_scroll: usize::MAX,
            number_input,
            text_input,
            editing: None,
            status_message: String::from("Ready!"),
            should_quit: false,
        }
    }

    fn input_for(&self, algorithm: Algorithm) -> &str {
        match algorithm.input_kind() {
            InputKind::Number => &self.number_input,
            InputKind::Text => &self.text_input,
        }
    }

    fn scroll_mut(&mut self) -> &mut usize {
        match self.focused_pane {
            FocusedPane::Tree => &mut self.tree_scroll,
            FocusedPane::Memory => &mut self.memory_scroll,
            FocusedPane::Stack => &mut self.stack_scroll,
            FocusedPane::Log => &mut self.log_scroll,
        }
    }

    /// Keep the newest log entries and the innermost call in view
    fn follow_latest(&mut self) {
        self.log_scroll = usize::MAX;
        self.stack_scroll = usize::MAX;
    }
}

/// Engine-side data for one frame
pub struct Screen<'a> {
    pub snapshot: &'a Snapshot,
    pub algorithm: Algorithm,
    pub step: usize,
    pub total: usize,
    pub speed: Speed,
    pub running: bool,
    pub playing: bool,
    pub history_bytes: usize,
}

/// Draw the whole UI
pub fn render(frame: &mut Frame, view: &mut ViewState, screen: &Screen<'_>) {
    let size = frame.area();

    // Control bar, panes, status bar
    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(size);

    // Left: source over stack. Right: tree over memory | log
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(main_chunks[1]);

    let left_rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(columns[0]);

    let right_rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(columns[1]);

    let bottom_right = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(right_rows[1]);

    let input = view.input_for(screen.algorithm).to_string();
    super::panes::render_control_bar(
        frame,
        main_chunks[0],
        &super::panes::ControlBarData {
            algorithm: screen.algorithm,
            input: &input,
            editing: view.editing.as_deref(),
            speed: screen.speed,
        },
    );

    super::panes::render_source_pane(
        frame,
        left_rows[0],
        screen.algorithm.source(),
        screen.snapshot.active_line,
    );

    super::panes::render_stack_pane(
        frame,
        left_rows[1],
        &screen.snapshot.stack,
        view.focused_pane == FocusedPane::Stack,
        &mut view.stack_scroll,
    );

    super::panes::render_tree_pane(
        frame,
        right_rows[0],
        &screen.snapshot.tree,
        view.focused_pane == FocusedPane::Tree,
        &mut view.tree_scroll,
    );

    super::panes::render_memory_pane(
        frame,
        bottom_right[0],
        &screen.snapshot.memory,
        &screen.snapshot.tree,
        view.focused_pane == FocusedPane::Memory,
        &mut view.memory_scroll,
    );

    super::panes::render_log_pane(
        frame,
        bottom_right[1],
        &screen.snapshot.log,
        view.focused_pane == FocusedPane::Log,
        &mut view.log_scroll,
    );

    super::panes::render_status_bar(
        frame,
        main_chunks[2],
        &super::panes::StatusRenderData {
            message: &view.status_message,
            current_step: screen.step,
            total_steps: screen.total,
            is_running: screen.running,
            is_playing: screen.playing,
            is_editing: view.editing.is_some(),
            history_bytes: screen.history_bytes,
        },
    );
}

/// Draws every live commit and waits between them while handling keys
pub struct TuiPacer<'a, B: Backend> {
    terminal: &'a mut Terminal<B>,
    view: &'a mut ViewState,
    /// First terminal error hit during the run; the run itself cannot fail
    error: Option<io::Error>,
}

impl<'a, B: Backend> TuiPacer<'a, B> {
    pub fn new(terminal: &'a mut Terminal<B>, view: &'a mut ViewState) -> Self {
        TuiPacer {
            terminal,
            view,
            error: None,
        }
    }

    pub fn into_error(self) -> Option<io::Error> {
        self.error
    }

    fn handle_key(&mut self, key: KeyEvent, speed: &mut Speed) {
        match key.code {
            KeyCode::Char('+') | KeyCode::Char('=') => {
                *speed = speed.faster();
                self.view.status_message = format!("Speed {}", speed);
            }
            KeyCode::Char('-') => {
                *speed = speed.slower();
                self.view.status_message = format!("Speed {}", speed);
            }
            KeyCode::Char('q') | KeyCode::Char('Q') => {
                // No cancellation: finish instantly, then quit
                *speed = Speed::INSTANT;
                self.view.should_quit = true;
                self.view.status_message = "Finishing run before quitting...".to_string();
            }
            KeyCode::Char('r') | KeyCode::Char('x') | KeyCode::Left | KeyCode::Right => {
                self.view.status_message = PlaybackError::RunInProgress.to_string();
            }
            _ => {}
        }
    }

    fn poll_until(&mut self, deadline: Instant, speed: &mut Speed) -> io::Result<()> {
        loop {
            let now = Instant::now();
            if now >= deadline || speed.is_instant() {
                return Ok(());
            }
            let timeout = (deadline - now).min(Duration::from_millis(50));
            if event::poll(timeout)? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key, speed);
                    }
                }
            }
        }
    }
}

impl<B: Backend> Pacer for TuiPacer<'_, B> {
    fn present(&mut self, progress: &Progress<'_>) {
        if self.error.is_some() {
            return;
        }
        self.view.follow_latest();
        let screen = Screen {
            snapshot: progress.snapshot,
            algorithm: progress.algorithm,
            step: progress.step,
            total: progress.total,
            speed: progress.speed,
            running: true,
            playing: false,
            history_bytes: progress.history_bytes,
        };
        let view = &mut *self.view;
        if let Err(e) = self.terminal.draw(|f| render(f, view, &screen)) {
            self.error = Some(e);
        }
    }

    fn wait(&mut self, delay: Duration, speed: &mut Speed) {
        if self.error.is_some() {
            return;
        }
        let deadline = Instant::now() + delay;
        if let Err(e) = self.poll_until(deadline, speed) {
            self.error = Some(e);
        }
    }
}

/// The main application state
pub struct App {
    /// The playback controller
    pub controller: Controller,

    pub view: ViewState,

    /// Whether auto-play through the history is active
    pub is_playing: bool,

    /// Last time a step was taken in play mode
    pub last_play_time: Instant,

    /// Last time space was pressed (for debouncing)
    pub last_space_press: Instant,
}

impl App {
    /// Create a new app around `controller` with prefilled inputs
    pub fn new(controller: Controller, number_input: String, text_input: String) -> Self {
        App {
            controller,
            view: ViewState::new(number_input, text_input),
            is_playing: false,
            last_play_time: Instant::now(),
            last_space_press: Instant::now()
                .checked_sub(Duration::from_secs(1))
                .unwrap_or(Instant::now()),
        }
    }

    /// Run the TUI application
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            let screen = Screen {
                snapshot: self.controller.displayed(),
                algorithm: self.controller.selected(),
                step: self.controller.current_step(),
                total: self.controller.total_steps(),
                speed: self.controller.speed(),
                running: self.controller.is_running(),
                playing: self.is_playing,
                history_bytes: self.controller.history_memory(),
            };
            let view = &mut self.view;
            terminal.draw(|f| render(f, view, &screen))?;

            if self.view.should_quit {
                break;
            }

            if self.is_playing {
                self.advance_playback();
            }

            // Use poll with timeout to allow auto-play to work
            if event::poll(Duration::from_millis(50))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key_event(key, terminal)?;
                    }
                }
            }
        }

        Ok(())
    }

    /// Step auto-play forward once its delay has elapsed
    fn advance_playback(&mut self) {
        let delay = self
            .controller
            .speed()
            .delay(self.controller.base_delay())
            .unwrap_or(Duration::ZERO);
        if self.last_play_time.elapsed() < delay {
            return;
        }

        if self.controller.speed().is_instant() {
            let _ = self.controller.jump_to_end();
        }
        if self.controller.step_forward().is_ok() {
            self.view.status_message = "Playing...".to_string();
            self.view.follow_latest();
        } else {
            self.is_playing = false;
            self.view.status_message = "Playback complete".to_string();
        }
        self.last_play_time = Instant::now();
    }

    /// Handle keyboard events
    fn handle_key_event<B: Backend>(
        &mut self,
        key: KeyEvent,
        terminal: &mut Terminal<B>,
    ) -> io::Result<()> {
        if self.view.editing.is_some() {
            self.handle_edit_key(key);
            return Ok(());
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') => {
                self.view.should_quit = true;
            }
            KeyCode::Char('a') => {
                self.is_playing = false;
                let next = self.controller.selected().next();
                self.controller.select(next);
                self.view.status_message = format!("Selected {}", next);
            }
            KeyCode::Char('i') => {
                self.is_playing = false;
                let current = self.view.input_for(self.controller.selected()).to_string();
                self.view.editing = Some(current);
            }
            KeyCode::Char('r') => {
                self.is_playing = false;
                self.start_run(terminal)?;
            }
            KeyCode::Char('x') => {
                self.is_playing = false;
                match self.controller.reset() {
                    Ok(()) => self.view.status_message = "Reset".to_string(),
                    Err(e) => self.view.status_message = e.to_string(),
                }
                self.view.follow_latest();
            }
            KeyCode::Char('+') | KeyCode::Char('=') => {
                let speed = self.controller.speed().faster();
                self.controller.set_speed(speed);
                self.view.status_message = format!("Speed {}", speed);
            }
            KeyCode::Char('-') => {
                let speed = self.controller.speed().slower();
                self.controller.set_speed(speed);
                self.view.status_message = format!("Speed {}", speed);
            }
            KeyCode::Tab => {
                self.view.focused_pane = self.view.focused_pane.next();
            }
            KeyCode::Left => {
                self.is_playing = false;
                let result = self.controller.step_backward();
                self.report_seek("Stepped backward", result);
            }
            KeyCode::Right => {
                self.is_playing = false;
                let result = self.controller.step_forward();
                self.report_seek("Stepped forward", result);
            }
            KeyCode::Up => {
                let scroll = self.view.scroll_mut();
                *scroll = scroll.saturating_sub(1);
            }
            KeyCode::Down => {
                let scroll = self.view.scroll_mut();
                *scroll = scroll.saturating_add(1);
            }
            KeyCode::Char(' ') => {
                // Toggle auto-play mode (with 200ms debounce to prevent key repeat spam)
                if self.last_space_press.elapsed() >= Duration::from_millis(200) {
                    self.last_space_press = Instant::now();
                    self.toggle_playback();
                }
            }
            KeyCode::Enter => {
                self.is_playing = false;
                let result = self.controller.jump_to_end();
                self.report_seek("Jumped to end", result);
            }
            KeyCode::Backspace => {
                self.is_playing = false;
                let result = self.controller.rewind_to_start();
                self.report_seek("Jumped to start", result);
            }
            _ => {}
        }

        Ok(())
    }

    fn handle_edit_key(&mut self, key: KeyEvent) {
        let Some(buffer) = self.view.editing.as_mut() else {
            return;
        };

        match key.code {
            KeyCode::Char(c) => buffer.push(c),
            KeyCode::Backspace => {
                buffer.pop();
            }
            KeyCode::Enter => {
                let value = buffer.clone();
                match self.controller.selected().input_kind() {
                    InputKind::Number => self.view.number_input = value,
                    InputKind::Text => self.view.text_input = value,
                }
                self.view.editing = None;
                self.view.status_message = "Input updated".to_string();
            }
            KeyCode::Esc => {
                self.view.editing = None;
                self.view.status_message = "Edit cancelled".to_string();
            }
            _ => {}
        }
    }

    fn toggle_playback(&mut self) {
        if self.controller.total_steps() == 0 {
            self.view.status_message = PlaybackError::EmptyHistory.to_string();
            return;
        }

        self.is_playing = !self.is_playing;
        if self.is_playing {
            if self.controller.is_at_end() {
                let _ = self.controller.rewind_to_start();
            }
            self.last_play_time = Instant::now()
                .checked_sub(Duration::from_secs(1))
                .unwrap_or(Instant::now());
            self.view.status_message = "Playing...".to_string();
        } else {
            self.view.status_message = "Paused".to_string();
        }
    }

    fn report_seek(&mut self, success: &str, result: Result<(), PlaybackError>) {
        match result {
            Ok(()) => {
                self.view.status_message = success.to_string();
                self.view.follow_latest();
            }
            Err(e) => {
                debug!(error = %e, "seek rejected");
                self.view.status_message = format!("Cannot move: {}", e);
            }
        }
    }

    /// Run the selected algorithm live, drawing every commit
    fn start_run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        let algorithm = self.controller.selected();
        let invocation = algorithm.invocation(&self.view.number_input, &self.view.text_input);

        let mut pacer = TuiPacer::new(terminal, &mut self.view);
        let result = self.controller.run(invocation, &mut pacer);
        if let Some(e) = pacer.into_error() {
            return Err(e);
        }

        self.view.status_message = match result {
            Ok(summary) => format!(
                "{} = {} ({} steps, {} frames)",
                summary.invocation, summary.result, summary.steps, summary.frames
            ),
            Err(e) => e.to_string(),
        };
        self.view.follow_latest();
        Ok(())
    }
}
