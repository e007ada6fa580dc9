//! Control bar and status bar rendering

use crate::engine::{Algorithm, Speed};
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// What the top control bar shows
pub struct ControlBarData<'a> {
    pub algorithm: Algorithm,
    /// Input currently configured for the algorithm
    pub input: &'a str,
    /// Text being typed, when the input field is in edit mode
    pub editing: Option<&'a str>,
    pub speed: Speed,
}

/// Render the control bar at the top: algorithm, input and speed
pub fn render_control_bar(frame: &mut Frame, area: Rect, data: &ControlBarData<'_>) {
    let bar = Style::default().bg(DEFAULT_THEME.current_line_bg);
    let label = bar.fg(DEFAULT_THEME.comment);

    let mut spans = vec![
        Span::styled(
            format!(" {} ", data.algorithm),
            Style::default()
                .bg(DEFAULT_THEME.primary)
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled("  input ", label),
    ];

    match data.editing {
        Some(buffer) => spans.push(Span::styled(
            format!("{buffer}▏"),
            Style::default()
                .bg(DEFAULT_THEME.secondary)
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
        )),
        None => spans.push(Span::styled(
            data.input.to_string(),
            bar.fg(DEFAULT_THEME.fg).add_modifier(Modifier::BOLD),
        )),
    }

    spans.push(Span::styled("  speed ", label));
    for preset in Speed::PRESETS {
        let style = if preset == data.speed {
            Style::default()
                .bg(DEFAULT_THEME.secondary)
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD)
        } else {
            bar.fg(DEFAULT_THEME.comment)
        };
        spans.push(Span::styled(format!(" {preset} "), style));
    }
    if !Speed::PRESETS.contains(&data.speed) {
        spans.push(Span::styled(
            format!(" {} ", data.speed),
            Style::default().bg(DEFAULT_THEME.secondary).fg(Color::Black),
        ));
    }

    let paragraph = Paragraph::new(Line::from(spans))
        .style(bar)
        .alignment(Alignment::Left);
    frame.render_widget(paragraph, area);
}

/// What the bottom status bar shows
pub struct StatusRenderData<'a> {
    pub message: &'a str,
    pub current_step: usize,
    pub total_steps: usize,
    pub is_running: bool,
    pub is_playing: bool,
    pub is_editing: bool,
    /// Estimated memory held by the snapshot history
    pub history_bytes: usize,
}

/// Human-readable byte count, e.g. `512 B`, `12.4 KB`, `3.1 MB`
fn format_bytes(bytes: usize) -> String {
    const KB: f64 = 1024.0;
    const MB: f64 = KB * 1024.0;

    let value = bytes as f64;
    if value >= MB {
        format!("{:.1} MB", value / MB)
    } else if value >= KB {
        format!("{:.1} KB", value / KB)
    } else {
        format!("{bytes} B")
    }
}

/// Render the status bar at the bottom
pub fn render_status_bar(frame: &mut Frame, area: Rect, data: &StatusRenderData<'_>) {
    // Split status bar into left and right
    let layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(area);

    let step_text = if data.total_steps == 0 {
        " Step 0/0 ".to_string()
    } else {
        format!(
            " Step {}/{} · {} ",
            data.current_step + 1,
            data.total_steps,
            format_bytes(data.history_bytes)
        )
    };

    let left_spans = vec![
        Span::styled(
            step_text,
            Style::default()
                .bg(if data.is_running {
                    DEFAULT_THEME.secondary
                } else {
                    DEFAULT_THEME.primary
                })
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            " | ",
            Style::default()
                .bg(DEFAULT_THEME.current_line_bg)
                .fg(DEFAULT_THEME.comment),
        ),
        Span::styled(
            format!(" {} ", data.message),
            Style::default()
                .bg(DEFAULT_THEME.current_line_bg)
                .fg(DEFAULT_THEME.fg),
        ),
    ];

    let left_paragraph = Paragraph::new(Line::from(left_spans))
        .style(Style::default().bg(DEFAULT_THEME.current_line_bg))
        .alignment(Alignment::Left);

    frame.render_widget(left_paragraph, layout[0]);

    // Right side: Keybinds with visual grouping
    let key_style = Style::default().bg(DEFAULT_THEME.comment).fg(Color::Black);
    let desc_style = Style::default()
        .bg(DEFAULT_THEME.current_line_bg)
        .fg(DEFAULT_THEME.fg);
    let sep_style = Style::default()
        .bg(DEFAULT_THEME.current_line_bg)
        .fg(DEFAULT_THEME.comment);

    let bindings: &[(&str, &str)] = if data.is_editing {
        &[(" ↵ ", " confirm "), (" esc ", " cancel ")]
    } else if data.is_running {
        &[(" +/- ", " speed "), (" q ", " quit after run ")]
    } else {
        &[
            (" a ", " algo "),
            (" i ", " input "),
            (" r ", " run "),
            (" x ", " reset "),
            (" ←/→ ", " step "),
            (" ⎵ ", " play "),
            (" +/- ", " speed "),
            (" q ", " quit "),
        ]
    };

    let mut right_spans = Vec::new();
    for (idx, (key, desc)) in bindings.iter().enumerate() {
        if idx > 0 {
            right_spans.push(Span::styled("│", sep_style));
        }
        right_spans.push(Span::styled(*key, key_style));
        right_spans.push(Span::styled(*desc, desc_style));
    }

    // Show status indicators based on position and state
    let is_at_start = data.current_step == 0;
    let is_at_end = data.current_step + 1 >= data.total_steps;
    let indicator = if data.is_running {
        Some((" ● RUNNING ", DEFAULT_THEME.secondary))
    } else if data.is_playing {
        Some((" ▶ PLAYING ", DEFAULT_THEME.secondary))
    } else if data.total_steps == 0 {
        None
    } else if is_at_end {
        Some((" END ", DEFAULT_THEME.error))
    } else if is_at_start {
        Some((" START ", DEFAULT_THEME.success))
    } else {
        None
    };

    if let Some((text, color)) = indicator {
        right_spans.push(Span::styled("│", sep_style));
        right_spans.push(Span::styled(
            text,
            Style::default()
                .bg(color)
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
        ));
    }

    let right_paragraph = Paragraph::new(Line::from(right_spans))
        .style(Style::default().bg(DEFAULT_THEME.current_line_bg))
        .alignment(Alignment::Right);

    frame.render_widget(right_paragraph, layout[1]);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bytes_use_the_largest_fitting_unit() {
        assert_eq!(format_bytes(0), "0 B");
        assert_eq!(format_bytes(1023), "1023 B");
        assert_eq!(format_bytes(1536), "1.5 KB");
        assert_eq!(format_bytes(3 * 1024 * 1024), "3.0 MB");
    }
}
