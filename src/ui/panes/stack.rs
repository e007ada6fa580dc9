//! Call stack pane
//!
//! Lists in-flight calls from the outermost down to the innermost, which is
//! highlighted. Each entry shows its arguments and the source line it was
//! entered at; an entry whose frame has not been created yet is marked.

use super::{clamp_scroll, pane_block};
use crate::memory::CallStack;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem},
    Frame,
};

/// Render the stack pane
pub fn render_stack_pane(
    frame: &mut Frame,
    area: Rect,
    stack: &CallStack,
    is_focused: bool,
    scroll_offset: &mut usize,
) {
    let title = format!(" Call Stack ({}) ", stack.depth());
    let block = pane_block(&title, is_focused);

    let mut all_items = Vec::new();

    if stack.is_empty() {
        all_items.push(ListItem::new("(empty)").style(Style::default().fg(DEFAULT_THEME.comment)));
    } else {
        for (depth, entry) in stack.entries().iter().enumerate() {
            let (marker, name_color) = if entry.highlight {
                ("▸ ", DEFAULT_THEME.function)
            } else {
                ("  ", DEFAULT_THEME.muted_function)
            };

            let mut spans = vec![
                Span::styled(marker, Style::default().fg(DEFAULT_THEME.secondary)),
                Span::styled(
                    format!("Frame {} ", depth),
                    Style::default().fg(DEFAULT_THEME.comment),
                ),
                Span::styled("│ ", Style::default().fg(DEFAULT_THEME.comment)),
                Span::styled(
                    entry.signature(),
                    Style::default()
                        .fg(name_color)
                        .add_modifier(Modifier::BOLD),
                ),
            ];

            if let Some(line) = entry.line {
                spans.push(Span::styled(
                    format!("  @ line {}", line + 1),
                    Style::default().fg(DEFAULT_THEME.comment),
                ));
            }
            if entry.frame.is_none() {
                spans.push(Span::styled(
                    "  (entering)",
                    Style::default().fg(DEFAULT_THEME.secondary),
                ));
            }

            all_items.push(ListItem::new(Line::from(spans)));
        }
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
