//! Simulated stack memory pane
//!
//! One row per slot: address, owning depth and the occupant's label. Rows
//! past the deepest slot used in this snapshot are collapsed into a single
//! summary line, so a 64-slot region stays readable in a small pane.

use super::{clamp_scroll, pane_block};
use crate::memory::StackMemory;
use crate::tree::CallTree;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem},
    Frame,
};

/// Minimum number of slots always listed
const MIN_VISIBLE_SLOTS: usize = 8;

/// Render the memory pane
pub fn render_memory_pane(
    frame: &mut Frame,
    area: Rect,
    memory: &StackMemory,
    tree: &CallTree,
    is_focused: bool,
    scroll_offset: &mut usize,
) {
    let title = format!(
        " Stack Memory ({}/{}) ",
        memory.occupied_count(),
        memory.capacity()
    );
    let block = pane_block(&title, is_focused);

    let shown = memory
        .occupied_indices()
        .last()
        .map_or(0, |idx| idx + 1)
        .max(MIN_VISIBLE_SLOTS)
        .min(memory.capacity());

    let mut all_items: Vec<ListItem> = memory
        .slots()
        .iter()
        .take(shown)
        .enumerate()
        .map(|(idx, slot)| {
            let address = Span::styled(
                format!("{:>6} ", slot.address),
                Style::default().fg(DEFAULT_THEME.comment),
            );

            let line = match (&slot.occupant, slot.frame_id().and_then(|id| tree.get(id))) {
                (Some(occupant), owner) => {
                    let args = owner.map(|f| f.args.as_str()).unwrap_or("?");
                    Line::from(vec![
                        address,
                        Span::styled(
                            format!("d{:<3}", occupant.depth),
                            Style::default().fg(DEFAULT_THEME.secondary),
                        ),
                        Span::styled(
                            format!("{}({})", occupant.value, args),
                            Style::default()
                                .fg(DEFAULT_THEME.function)
                                .add_modifier(Modifier::BOLD),
                        ),
                    ])
                }
                (None, _) => Line::from(vec![
                    address,
                    Span::styled(
                        format!("[{idx:02}] free"),
                        Style::default().fg(DEFAULT_THEME.comment),
                    ),
                ]),
            };
            ListItem::new(line)
        })
        .collect();

    let hidden = memory.capacity() - shown;
    if hidden > 0 {
        all_items.push(
            ListItem::new(format!("  … {hidden} more free slots"))
                .style(Style::default().fg(DEFAULT_THEME.comment)),
        );
    }

    let visible_height = area.height.saturating_sub(2).max(1) as usize;
    clamp_scroll(scroll_offset, all_items.len(), visible_height);

    let visible_items: Vec<ListItem> = all_items
        .into_iter()
        .skip(*scroll_offset)
        .take(visible_height)
        .collect();

    frame.render_widget(List::new(visible_items).block(block), area);
}
