#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    Navigate(Direction),
    RefreshProcesses,
    ClearChart,
    TogglePause,
    ToggleHelp,
    None,
}
