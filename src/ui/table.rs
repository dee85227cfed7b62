use ratatui::Frame;
use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::Span;
use ratatui::widgets::{Block, BorderType, Borders, Row, Table, TableState};

use crate::format::{format_bytes, truncate_unicode};
use crate::monitor::ProcessRecord;
use crate::ui::theme::Theme;

/// Process table, already sorted by the core (descending working set).
pub fn render(
    frame: &mut Frame,
    area: Rect,
    processes: &[ProcessRecord],
    state: &mut TableState,
    theme: &Theme,
) {
    let name_width = area.width.saturating_sub(24).max(12) as usize;

    let header = Row::new(["Process", "PID", "Memory"]).style(
        Style::default()
            .fg(theme.table_header_fg)
            .add_modifier(Modifier::BOLD),
    );

    let rows: Vec<Row> = processes
        .iter()
        .map(|p| {
            Row::new(vec![
                truncate_unicode(&p.name, name_width),
                p.pid.to_string(),
                format_bytes(p.working_set_bytes),
            ])
        })
        .collect();

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.overlay_border))
        .title(Span::styled(
            format!(" Processes ({}) ", processes.len()),
            Style::default()
                .fg(theme.text_secondary)
                .add_modifier(Modifier::BOLD),
        ));

    let table = Table::new(
        rows,
        [
            Constraint::Min(12),
            Constraint::Length(8),
            Constraint::Length(10),
        ],
    )
    .header(header)
    .block(block)
    .style(Style::default().fg(theme.text_primary))
    .row_highlight_style(Style::default().bg(theme.row_highlight_bg));

    frame.render_stateful_widget(table, area, state);
}
