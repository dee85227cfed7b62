pub mod chart;
pub mod header;
pub mod help;
pub mod statusbar;
pub mod table;
pub mod theme;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout};

use crate::app::App;

pub fn draw(frame: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),
            Constraint::Min(10),
            Constraint::Length(12),
            Constraint::Length(1),
        ])
        .split(frame.area());

    header::render(
        frame,
        chunks[0],
        app.view.cpu_pct,
        app.view.memory.as_ref(),
        app.view.processes.len(),
        app.is_paused(),
        &app.theme,
    );

    chart::render(
        frame,
        chunks[1],
        &app.view.series,
        app.scheduler.series_capacity(),
        app.scheduler.period().as_secs_f64(),
        &app.theme,
    );

    table::render(
        frame,
        chunks[2],
        &app.view.processes,
        &mut app.table,
        &app.theme,
    );

    statusbar::render(
        frame,
        chunks[3],
        &app.keybinds,
        app.status_message.as_ref(),
        app.is_paused(),
        &app.theme,
    );

    if app.show_help() {
        let entries = app.help_entries();
        help::render(frame, frame.area(), &entries, &app.theme);
    }
}
