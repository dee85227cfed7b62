use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Gauge, Paragraph};

use crate::format::format_bytes;
use crate::monitor::MemorySample;
use crate::ui::theme::Theme;

pub fn render(
    frame: &mut Frame,
    area: Rect,
    cpu_pct: f64,
    memory: Option<&MemorySample>,
    process_count: usize,
    paused: bool,
    theme: &Theme,
) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(40),
            Constraint::Percentage(25),
            Constraint::Percentage(35),
        ])
        .split(area);

    render_branding(frame, chunks[0], process_count, paused, theme);
    render_cpu(frame, chunks[1], cpu_pct, theme);
    render_ram_gauge(frame, chunks[2], memory, theme);
}

fn render_branding(
    frame: &mut Frame,
    area: Rect,
    process_count: usize,
    paused: bool,
    theme: &Theme,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.overlay_border));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut spans = vec![Span::styled(
        " pulsetop ",
        Style::default()
            .fg(theme.header_accent_fg)
            .bg(theme.header_accent_bg)
            .add_modifier(Modifier::BOLD),
    )];

    spans.push(Span::raw("  "));
    spans.push(Span::styled(
        format!("Procs: {process_count}"),
        Style::default().fg(theme.text_secondary),
    ));

    if paused {
        spans.push(Span::raw("  "));
        spans.push(Span::styled(
            "PAUSED",
            Style::default()
                .fg(theme.status_err)
                .add_modifier(Modifier::BOLD),
        ));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), inner);
}

fn render_cpu(frame: &mut Frame, area: Rect, cpu_pct: f64, theme: &Theme) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.overlay_border))
        .title(Span::styled(
            " CPU ",
            Style::default()
                .fg(theme.text_secondary)
                .add_modifier(Modifier::BOLD),
        ));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let line = Line::from(Span::styled(
        format!("{cpu_pct:.1}%"),
        Style::default()
            .fg(theme.cpu_line)
            .add_modifier(Modifier::BOLD),
    ));
    frame.render_widget(Paragraph::new(line), inner);
}

fn render_ram_gauge(frame: &mut Frame, area: Rect, memory: Option<&MemorySample>, theme: &Theme) {
    let (ratio, label) = match memory {
        Some(mem) if mem.total_bytes > 0 => (
            (mem.used_pct() / 100.0).clamp(0.0, 1.0),
            format!(
                "{}/{} ({:.0}%)",
                format_bytes(mem.used_bytes()),
                format_bytes(mem.total_bytes),
                mem.used_pct()
            ),
        ),
        _ => (0.0, "sampling\u{2026}".to_string()),
    };

    let ram_block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.overlay_border))
        .title(Span::styled(
            " RAM ",
            Style::default()
                .fg(theme.text_secondary)
                .add_modifier(Modifier::BOLD),
        ));

    let gauge = Gauge::default()
        .block(ram_block)
        .gauge_style(
            Style::default()
                .fg(theme.gauge_filled)
                .bg(theme.gauge_unfilled),
        )
        .ratio(ratio)
        .label(label);

    frame.render_widget(gauge, area);
}
