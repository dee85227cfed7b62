use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::widgets::TableState;

use crate::action::{Action, Direction};
use crate::config::{Config, ConfigError, key_label, parse_key};
use crate::monitor::{
    DisplaySink, MemorySample, ProcessRecord, Scheduler, SeriesPoint, SystemProbe,
};
use crate::ui::theme::Theme;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Help,
}

#[derive(Debug, Clone)]
pub struct ResolvedKeybinds {
    pub quit: KeyCode,
    pub refresh: KeyCode,
    pub clear: KeyCode,
    pub pause: KeyCode,
    pub help: KeyCode,
}

impl ResolvedKeybinds {
    pub fn from_config(kb: &crate::config::KeybindsConfig) -> Self {
        Self {
            quit: parse_key(&kb.quit).unwrap_or(KeyCode::Char('q')),
            refresh: parse_key(&kb.refresh).unwrap_or(KeyCode::Char('r')),
            clear: parse_key(&kb.clear).unwrap_or(KeyCode::Char('c')),
            pause: parse_key(&kb.pause).unwrap_or(KeyCode::Char('p')),
            help: parse_key(&kb.help).unwrap_or(KeyCode::Char('?')),
        }
    }

    /// Returns (key_label, description) pairs for all configurable keybinds.
    pub fn help_entries(&self) -> Vec<(String, &'static str)> {
        let mut entries = vec![
            (key_label(self.quit), "Quit"),
            (key_label(self.refresh), "Refresh process list"),
            (key_label(self.clear), "Clear chart"),
            (key_label(self.pause), "Pause/resume sampling"),
            (key_label(self.help), "Toggle help"),
        ];
        entries.push(("↑↓".to_string(), "Select process row"));
        entries.push(("Ctrl+C".to_string(), "Quit (always)"));
        entries
    }
}

/// Latest data handed over by the sampling core; what the widgets render.
#[derive(Debug, Default)]
pub struct ViewState {
    pub series: Vec<SeriesPoint>,
    pub cpu_pct: f64,
    pub memory: Option<MemorySample>,
    pub processes: Vec<ProcessRecord>,
}

impl DisplaySink for ViewState {
    fn on_tick(&mut self, series: &[SeriesPoint], cpu_pct: f64, memory: MemorySample) {
        self.series = series.to_vec();
        self.cpu_pct = cpu_pct;
        self.memory = Some(memory);
    }

    fn on_process_list(&mut self, processes: Vec<ProcessRecord>) {
        self.processes = processes;
    }
}

pub struct App {
    pub running: bool,
    pub scheduler: Scheduler<SystemProbe>,
    pub view: ViewState,
    pub input_mode: InputMode,
    pub table: TableState,
    pub status_message: Option<(String, Instant)>,
    pub keybinds: ResolvedKeybinds,
    pub theme: Theme,
}

impl App {
    pub fn new(config: Config) -> Result<Self, ConfigError> {
        let settings = config.sampler_settings()?;
        let keybinds = ResolvedKeybinds::from_config(&config.keybinds);
        let theme = Theme::from_config(&config.colors);

        let mut scheduler = Scheduler::new(SystemProbe::new(), settings);
        let mut view = ViewState::default();

        // Initial table population; afterwards refreshes are user-triggered.
        match scheduler.refresh_processes(&mut view) {
            Ok(_) => {}
            Err(err) => tracing::warn!(%err, "initial process refresh failed"),
        }
        scheduler.start();

        Ok(App {
            running: true,
            scheduler,
            view,
            input_mode: InputMode::Normal,
            table: TableState::default(),
            status_message: None,
            keybinds,
            theme,
        })
    }

    /// One scheduler tick, driven by the event loop's interval.
    pub fn on_tick(&mut self) {
        if self.scheduler.is_running() {
            self.scheduler.tick_once(&mut self.view);
        }

        // Clear expired status messages (older than 3 seconds)
        if let Some((_, created)) = &self.status_message
            && created.elapsed().as_secs() >= 3
        {
            self.status_message = None;
        }
    }

    pub fn map_key(&self, key: KeyEvent) -> Action {
        // Ctrl+C always quits (hardwired safety)
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return Action::Quit;
        }

        match self.input_mode {
            InputMode::Normal => self.map_key_normal(key),
            InputMode::Help => self.map_key_help(key),
        }
    }

    fn map_key_normal(&self, key: KeyEvent) -> Action {
        let code = key.code;
        let kb = &self.keybinds;

        // Arrow keys are hardwired (not configurable)
        if let KeyCode::Up = code {
            return Action::Navigate(Direction::Up);
        }
        if let KeyCode::Down = code {
            return Action::Navigate(Direction::Down);
        }

        if code == kb.quit {
            return Action::Quit;
        }
        if code == kb.refresh {
            return Action::RefreshProcesses;
        }
        if code == kb.clear {
            return Action::ClearChart;
        }
        if code == kb.pause {
            return Action::TogglePause;
        }
        if code == kb.help {
            return Action::ToggleHelp;
        }

        Action::None
    }

    fn map_key_help(&self, key: KeyEvent) -> Action {
        let code = key.code;
        // In help mode, only the help key and Esc dismiss, everything else is ignored
        if code == self.keybinds.help || code == KeyCode::Esc {
            return Action::ToggleHelp;
        }
        Action::None
    }

    pub fn dispatch(&mut self, action: Action) {
        match action {
            Action::Quit => self.running = false,
            Action::Navigate(dir) => self.navigate(dir),
            Action::RefreshProcesses => {
                match self.scheduler.refresh_processes(&mut self.view) {
                    Ok(0) => {
                        self.set_status(format!("{} processes", self.view.processes.len()));
                    }
                    Ok(omitted) => {
                        self.set_status(format!(
                            "{} processes ({omitted} not inspectable)",
                            self.view.processes.len()
                        ));
                    }
                    Err(err) => self.set_status(format!("Process refresh failed: {err}")),
                }
                self.clamp_selection();
            }
            Action::ClearChart => {
                self.scheduler.clear_series();
                self.view.series.clear();
                self.set_status("Chart cleared".to_string());
            }
            Action::TogglePause => {
                if self.scheduler.is_running() {
                    self.scheduler.stop();
                    self.set_status("Sampling paused".to_string());
                } else {
                    self.scheduler.start();
                    self.set_status("Sampling resumed".to_string());
                }
            }
            Action::ToggleHelp => {
                self.input_mode = if self.input_mode == InputMode::Help {
                    InputMode::Normal
                } else {
                    InputMode::Help
                };
            }
            Action::None => {}
        }
    }

    fn navigate(&mut self, direction: Direction) {
        if self.view.processes.is_empty() {
            self.table.select(None);
            return;
        }
        let last = self.view.processes.len() - 1;
        let next = match (self.table.selected(), direction) {
            (None, _) => 0,
            (Some(i), Direction::Up) => i.saturating_sub(1),
            (Some(i), Direction::Down) => (i + 1).min(last),
        };
        self.table.select(Some(next));
    }

    fn clamp_selection(&mut self) {
        match self.table.selected() {
            Some(_) if self.view.processes.is_empty() => self.table.select(None),
            Some(i) if i >= self.view.processes.len() => {
                self.table.select(Some(self.view.processes.len() - 1));
            }
            _ => {}
        }
    }

    pub fn show_help(&self) -> bool {
        self.input_mode == InputMode::Help
    }

    pub fn help_entries(&self) -> Vec<(String, &'static str)> {
        self.keybinds.help_entries()
    }

    pub fn is_paused(&self) -> bool {
        !self.scheduler.is_running()
    }

    fn set_status(&mut self, msg: String) {
        self.status_message = Some((msg, Instant::now()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_app() -> App {
        App::new(Config::default()).expect("default config should validate")
    }

    #[test]
    fn default_keybinds_map_to_actions() {
        let app = test_app();

        let key = KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE);
        assert_eq!(app.map_key(key), Action::Quit);

        let key = KeyEvent::new(KeyCode::Char('r'), KeyModifiers::NONE);
        assert_eq!(app.map_key(key), Action::RefreshProcesses);

        let key = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::NONE);
        assert_eq!(app.map_key(key), Action::ClearChart);

        let key = KeyEvent::new(KeyCode::Char('p'), KeyModifiers::NONE);
        assert_eq!(app.map_key(key), Action::TogglePause);

        // Ctrl+C always quits
        let key = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(app.map_key(key), Action::Quit);

        // Arrow keys stay hardwired
        let key = KeyEvent::new(KeyCode::Up, KeyModifiers::NONE);
        assert_eq!(app.map_key(key), Action::Navigate(Direction::Up));
    }

    #[test]
    fn custom_keybind_remap_works() {
        let mut app = test_app();
        app.keybinds.quit = KeyCode::Char('x');

        let key = KeyEvent::new(KeyCode::Char('x'), KeyModifiers::NONE);
        assert_eq!(app.map_key(key), Action::Quit);

        // 'q' should now do nothing
        let key = KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE);
        assert_eq!(app.map_key(key), Action::None);
    }

    #[test]
    fn help_mode_blocks_other_keys() {
        let mut app = test_app();

        app.dispatch(Action::ToggleHelp);
        assert_eq!(app.input_mode, InputMode::Help);
        assert!(app.show_help());

        let key = KeyEvent::new(KeyCode::Char('r'), KeyModifiers::NONE);
        assert_eq!(app.map_key(key), Action::None);

        // But help key dismisses
        let key = KeyEvent::new(KeyCode::Char('?'), KeyModifiers::NONE);
        assert_eq!(app.map_key(key), Action::ToggleHelp);

        // Esc also dismisses
        let key = KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE);
        assert_eq!(app.map_key(key), Action::ToggleHelp);

        // Ctrl+C still works (safety)
        let key = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(app.map_key(key), Action::Quit);

        app.dispatch(Action::ToggleHelp);
        assert_eq!(app.input_mode, InputMode::Normal);
    }

    #[test]
    fn pause_toggles_scheduler() {
        let mut app = test_app();
        assert!(!app.is_paused());

        app.dispatch(Action::TogglePause);
        assert!(app.is_paused());
        assert!(app.status_message.is_some());

        app.dispatch(Action::TogglePause);
        assert!(!app.is_paused());
    }

    #[test]
    fn clear_chart_empties_view_series() {
        let mut app = test_app();
        app.on_tick();
        app.dispatch(Action::ClearChart);
        assert!(app.view.series.is_empty());
        assert!(app.scheduler.series().is_empty());
    }

    #[test]
    fn navigation_clamps_to_table_bounds() {
        let mut app = test_app();
        app.view.processes = vec![
            ProcessRecord {
                name: "a".to_string(),
                pid: 1,
                working_set_bytes: 10,
            },
            ProcessRecord {
                name: "b".to_string(),
                pid: 2,
                working_set_bytes: 5,
            },
        ];
        app.table.select(None);

        app.dispatch(Action::Navigate(Direction::Down));
        assert_eq!(app.table.selected(), Some(0));
        app.dispatch(Action::Navigate(Direction::Down));
        app.dispatch(Action::Navigate(Direction::Down));
        assert_eq!(app.table.selected(), Some(1));
        app.dispatch(Action::Navigate(Direction::Up));
        app.dispatch(Action::Navigate(Direction::Up));
        assert_eq!(app.table.selected(), Some(0));
    }
}
