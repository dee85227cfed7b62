use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::symbols::Marker;
use ratatui::text::Span;
use ratatui::widgets::{Axis, Block, BorderType, Borders, Chart, Dataset, GraphType};

use crate::monitor::SeriesPoint;
use crate::ui::theme::Theme;

/// Rolling dual-line chart: CPU and RAM percent over the last
/// `capacity` samples. The x window scrolls once the buffer is full.
pub fn render(
    frame: &mut Frame,
    area: Rect,
    series: &[SeriesPoint],
    capacity: usize,
    period_secs: f64,
    theme: &Theme,
) {
    let cpu_data: Vec<(f64, f64)> = series.iter().map(|p| (p.t_secs, p.cpu_pct)).collect();
    let mem_data: Vec<(f64, f64)> = series.iter().map(|p| (p.t_secs, p.mem_pct)).collect();

    let window_secs = capacity as f64 * period_secs;
    let (x_min, x_max) = match series.last() {
        Some(last) if last.t_secs > window_secs => (last.t_secs - window_secs, last.t_secs),
        _ => (0.0, window_secs),
    };

    let datasets = vec![
        Dataset::default()
            .name("CPU %")
            .marker(Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(theme.cpu_line))
            .data(&cpu_data),
        Dataset::default()
            .name("RAM %")
            .marker(Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(theme.mem_line))
            .data(&mem_data),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.overlay_border))
        .title(Span::styled(
            " History ",
            Style::default()
                .fg(theme.text_secondary)
                .add_modifier(Modifier::BOLD),
        ));

    let x_axis = Axis::default()
        .style(Style::default().fg(theme.text_secondary))
        .bounds([x_min, x_max])
        .labels(vec![
            Span::raw(format!("{x_min:.0}s")),
            Span::raw(format!("{x_max:.0}s")),
        ]);

    let y_axis = Axis::default()
        .style(Style::default().fg(theme.text_secondary))
        .bounds([0.0, 100.0])
        .labels(vec![Span::raw("0"), Span::raw("50"), Span::raw("100")]);

    let chart = Chart::new(datasets).block(block).x_axis(x_axis).y_axis(y_axis);
    frame.render_widget(chart, area);
}
