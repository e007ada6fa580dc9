//! Call tree pane
//!
//! Frames are listed in pre-order with box-drawing guides, so a parent is
//! always above its children and siblings keep call order.

use super::{clamp_scroll, pane_block};
use crate::tree::{CallTree, Frame as CallFrame, FrameStatus};
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem, Paragraph},
    Frame,
};

/// Guide prefix for each row: `│  ` for open ancestors, `├─`/`└─` for the node
fn guides(tree: &CallTree) -> Vec<String> {
    let walk = tree.walk();
    let mut prefixes = Vec::with_capacity(walk.len());
    // Whether each ancestor level still has siblings below
    let mut open: Vec<bool> = Vec::new();

    for (level, frame) in &walk {
        open.truncate(*level);
        let is_last = match frame_parent(tree, frame) {
            Some(parent) => parent.children.last() == Some(&frame.id),
            None => true,
        };

        let mut prefix = String::new();
        if *level > 0 {
            for ancestor_open in open.iter().skip(1) {
                prefix.push_str(if *ancestor_open { "│  " } else { "   " });
            }
            prefix.push_str(if is_last { "└─ " } else { "├─ " });
        }
        prefixes.push(prefix);
        open.push(!is_last);
    }

    prefixes
}

fn frame_parent<'a>(tree: &'a CallTree, frame: &CallFrame) -> Option<&'a CallFrame> {
    tree.frames().iter().find(|f| f.children.contains(&frame.id))
}

fn frame_line(prefix: String, frame: &CallFrame) -> Line<'static> {
    let status_color = DEFAULT_THEME.status_color(frame.status);
    let name_style = match frame.status {
        FrameStatus::Active => Style::default()
            .fg(status_color)
            .add_modifier(Modifier::BOLD),
        _ => Style::default().fg(status_color),
    };

    let mut spans = vec![
        Span::styled(prefix, Style::default().fg(DEFAULT_THEME.comment)),
        Span::styled(format!("{}({})", frame.name, frame.args), name_style),
        Span::styled(
            format!(" [{}]", frame.status.label()),
            Style::default().fg(DEFAULT_THEME.comment),
        ),
    ];

    if let Some(note) = &frame.note {
        spans.push(Span::styled(
            format!(" {note}"),
            Style::default().fg(DEFAULT_THEME.note),
        ));
    }
    if let Some(value) = &frame.return_value {
        spans.push(Span::styled(
            format!(" ⇒ {value}"),
            Style::default()
                .fg(DEFAULT_THEME.return_value)
                .add_modifier(Modifier::BOLD),
        ));
    }

    Line::from(spans)
}

/// Pane title with the completed/total frame count
fn tree_title(tree: &CallTree) -> String {
    if tree.is_empty() {
        " Call Tree ".to_string()
    } else {
        format!(
            " Call Tree ({}/{} done) ",
            tree.count_with_status(FrameStatus::Completed),
            tree.len()
        )
    }
}

/// Render the call tree pane
pub fn render_tree_pane(
    frame: &mut Frame,
    area: Rect,
    tree: &CallTree,
    is_focused: bool,
    scroll_offset: &mut usize,
) {
    let title = tree_title(tree);
    let block = pane_block(&title, is_focused);

    if tree.is_empty() {
        let paragraph = Paragraph::new("(no calls yet, press r to run)")
            .block(block)
            .style(Style::default().fg(DEFAULT_THEME.comment));
        frame.render_widget(paragraph, area);
        return;
    }

    let prefixes = guides(tree);
    let all_items: Vec<ListItem> = tree
        .walk()
        .into_iter()
        .zip(prefixes)
        .map(|((_, call), prefix)| ListItem::new(frame_line(prefix, call)))
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn guides_draw_branches() {
        let mut tree = CallTree::new();
        let root = tree.create_frame("fib", "n=3", None, 1);
        let left = tree.create_frame("fib", "n=2", Some(root), 2);
        tree.create_frame("fib", "n=1", Some(left), 3);
        tree.create_frame("fib", "n=0", Some(left), 3);
        tree.create_frame("fib", "n=1", Some(root), 2);

        assert_eq!(
            guides(&tree),
            vec!["", "├─ ", "│  ├─ ", "│  └─ ", "└─ "]
        );
    }

    #[test]
    fn title_counts_completed_frames() {
        let mut tree = CallTree::new();
        assert_eq!(tree_title(&tree), " Call Tree ");

        let root = tree.create_frame("fact", "n=2", None, 1);
        let child = tree.create_frame("fact", "n=1", Some(root), 2);
        tree.update_frame(
            child,
            crate::tree::FrameUpdate::new().status(FrameStatus::Completed),
        );
        assert_eq!(tree_title(&tree), " Call Tree (1/2 done) ");
    }
}
