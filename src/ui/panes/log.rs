//! Event log pane

use super::{clamp_scroll, pane_block};
use crate::snapshot::EventLog;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{List, ListItem, Padding, Paragraph},
    Frame,
};

/// Render the event log pane
pub fn render_log_pane(
    frame: &mut Frame,
    area: Rect,
    log: &EventLog,
    is_focused: bool,
    scroll_offset: &mut usize,
) {
    let block = pane_block(" Log ", is_focused);

    if log.is_empty() {
        let paragraph = Paragraph::new("(no entries)")
            .block(block)
            .style(Style::default().fg(DEFAULT_THEME.comment));
        frame.render_widget(paragraph, area);
        return;
    }

    let block = block.padding(Padding::new(1, 0, 0, 0));
    let all_items: Vec<ListItem> = log
        .entries()
        .iter()
        .map(|entry| {
            ListItem::new(Line::from(vec![
                Span::styled(
                    format!("{} ", entry.timestamp),
                    Style::default().fg(DEFAULT_THEME.comment),
                ),
                Span::styled(
                    entry.message.clone(),
                    Style::default().fg(DEFAULT_THEME.log_color(entry.kind)),
                ),
            ]))
        })
        .collect();

    let visible_height = area.height.saturating_sub(2).max(1) as usize;
    clamp_scroll(scroll_offset, all_items.len(), visible_height);

    let visible_items: Vec<ListItem> = all_items
        .into_iter()
        .skip(*scroll_offset)
        .take(visible_height)
        .collect();

    frame.render_widget(List::new(visible_items).block(block), area);
}
