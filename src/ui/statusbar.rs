use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::app::ResolvedKeybinds;
use crate::config::key_label;
use crate::ui::theme::Theme;

pub fn render(
    frame: &mut Frame,
    area: Rect,
    keybinds: &ResolvedKeybinds,
    status_message: Option<&(String, std::time::Instant)>,
    paused: bool,
    theme: &Theme,
) {
    let bg_style = Style::default().bg(theme.surface_bg);

    // Status message takes priority
    if let Some((msg, _)) = status_message {
        let color = if msg.contains("failed") {
            theme.status_err
        } else {
            theme.status_ok
        };
        let line = Line::from(Span::styled(
            format!(" {msg}"),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ));
        frame.render_widget(Paragraph::new(line).style(bg_style), area);
        return;
    }

    let mut spans = Vec::new();
    spans.extend(pill_spans(&key_label(keybinds.quit), "Quit", theme));
    spans.extend(pill_spans(&key_label(keybinds.refresh), "Refresh", theme));
    spans.extend(pill_spans(&key_label(keybinds.clear), "Clear", theme));
    spans.extend(pill_spans(
        &key_label(keybinds.pause),
        if paused { "Resume" } else { "Pause" },
        theme,
    ));
    spans.extend(pill_spans(&key_label(keybinds.help), "Help", theme));
    spans.extend(pill_spans("\u{2191}\u{2193}", "Select", theme));

    frame.render_widget(Paragraph::new(Line::from(spans)).style(bg_style), area);
}

fn pill_spans(key: &str, desc: &str, theme: &Theme) -> Vec<Span<'static>> {
    vec![
        Span::raw(" "),
        Span::styled(
            format!(" {key} "),
            Style::default()
                .fg(theme.pill_key_fg)
                .bg(theme.pill_key_bg)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!(" {desc}"),
            Style::default().fg(theme.pill_desc_fg).bg(theme.surface_bg),
        ),
    ]
}
