use ratatui::Frame;
use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Clear, Row, Table};

use crate::ui::theme::Theme;

/// Modal keybind reference, centered over whatever is underneath.
pub fn render(frame: &mut Frame, area: Rect, entries: &[(String, &str)], theme: &Theme) {
    let overlay = overlay_rect(area, entries.len() as u16);
    frame.render_widget(Clear, overlay);

    let rows: Vec<Row> = entries
        .iter()
        .map(|(key, desc)| {
            Row::new(vec![
                Span::styled(
                    key.clone(),
                    Style::default()
                        .fg(theme.table_header_fg)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw(*desc),
            ])
        })
        .collect();

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.overlay_border))
        .title(Span::styled(
            " Help ",
            Style::default()
                .fg(theme.table_header_fg)
                .add_modifier(Modifier::BOLD),
        ))
        .title_bottom(
            Line::from(Span::styled(
                " Esc closes ",
                Style::default().fg(theme.text_secondary),
            ))
            .right_aligned(),
        );

    let table = Table::new(rows, [Constraint::Length(8), Constraint::Min(20)])
        .column_spacing(2)
        .block(block)
        .style(Style::default().fg(theme.text_primary).bg(theme.surface_bg));

    frame.render_widget(table, overlay);
}

/// Centers a box tall enough for one row per entry, clamped to the frame.
fn overlay_rect(area: Rect, entry_count: u16) -> Rect {
    let width = 42u16.min(area.width.saturating_sub(2));
    let height = (entry_count + 2).min(area.height.saturating_sub(2));
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect::new(x, y, width, height)
}
