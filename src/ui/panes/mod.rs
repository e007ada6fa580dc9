//! TUI pane rendering modules
//!
//! Each pane renders one part of the displayed snapshot.
//!
//! # Pane Modules
//!
//! - [`source`]: Algorithm listing with the active line highlighted
//! - [`tree`]: Call tree with frame status, notes and return values
//! - [`memory`]: Simulated stack memory slots
//! - [`stack`]: Call stack of in-flight calls
//! - [`log`]: Event log
//! - [`status`]: Control bar and status bar
//!
//! # Architecture
//!
//! Each pane module exports a primary `render_*` function taking the frame,
//! its area and the data it shows. Scrollable panes also take their scroll
//! offset, which they clamp in place.

pub mod log;
pub mod memory;
pub mod source;
pub mod stack;
pub mod status;
pub mod tree;

pub use log::render_log_pane;
pub use memory::render_memory_pane;
pub use source::render_source_pane;
pub use stack::render_stack_pane;
pub use status::{render_control_bar, render_status_bar, ControlBarData, StatusRenderData};
pub use tree::render_tree_pane;

use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    style::{Modifier, Style},
    widgets::{Block, Borders},
};

/// Bordered block with the focus-dependent border style
fn pane_block(title: &str, is_focused: bool) -> Block<'_> {
    let border_style = if is_focused {
        Style::default()
            .fg(DEFAULT_THEME.border_focused)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(DEFAULT_THEME.border_normal)
    };

    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(border_style)
}

/// Clamp a scroll offset so the last page stays full
fn clamp_scroll(offset: &mut usize, total_items: usize, visible_height: usize) {
    if total_items > visible_height {
        *offset = (*offset).min(total_items - visible_height);
    } else {
        *offset = 0;
    }
}
