use std::path::PathBuf;

use clap::Parser;
use color_eyre::Result;
use color_eyre::eyre::WrapErr;
use tracing_subscriber::EnvFilter;

use pulsetop::app::App;
use pulsetop::config::{self, Config};
use pulsetop::event::{Event, EventHandler};
use pulsetop::ui;

#[derive(Parser)]
#[command(
    name = "pulsetop",
    about = "Terminal host monitor with a rolling CPU/memory chart and process table"
)]
struct Cli {
    /// Path to config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Sampling period in milliseconds
    #[arg(long)]
    period_ms: Option<u64>,

    /// Number of points kept in the rolling chart
    #[arg(long)]
    series_capacity: Option<usize>,

    /// Maximum rows in the process table
    #[arg(long)]
    process_limit: Option<u32>,

    /// Write tracing output to this file (stdout belongs to the TUI)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    init_tracing(cli.log_file.as_deref())?;

    let config = load_config_for_cli(&cli);
    let app = App::new(config).wrap_err("invalid configuration")?;

    let mut terminal = ratatui::init();

    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        ratatui::restore();
        original_hook(panic_info);
    }));

    let result = run(&mut terminal, app).await;

    ratatui::restore();

    result
}

async fn run(terminal: &mut ratatui::DefaultTerminal, mut app: App) -> Result<()> {
    let mut events = EventHandler::new(app.scheduler.period());

    terminal.draw(|frame| ui::draw(frame, &mut app))?;

    while app.running {
        if let Some(event) = events.next().await {
            let mut should_draw = false;
            match event {
                Event::Key(key) => {
                    if key.kind == crossterm::event::KeyEventKind::Press {
                        let action = app.map_key(key);
                        app.dispatch(action);
                        should_draw = true;
                    }
                }
                Event::Tick => {
                    app.on_tick();
                    should_draw = true;
                }
                Event::Resize => {
                    should_draw = true;
                }
            }
            if should_draw {
                terminal.draw(|frame| ui::draw(frame, &mut app))?;
            }
        }
    }

    Ok(())
}

fn load_config_for_cli(cli: &Cli) -> Config {
    let mut config = match &cli.config {
        Some(path) => config::load_config_from_path(path),
        None => config::load_config(),
    };

    if let Some(period) = cli.period_ms {
        config.general.period_ms = period;
    }
    if let Some(capacity) = cli.series_capacity {
        config.general.series_capacity = capacity;
    }
    if let Some(limit) = cli.process_limit {
        config.general.process_limit = Some(limit);
    }

    config
}

fn init_tracing(log_file: Option<&std::path::Path>) -> Result<()> {
    let Some(path) = log_file else {
        return Ok(());
    };
    let file = std::fs::File::create(path)
        .wrap_err_with(|| format!("cannot open log file {}", path.display()))?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::sync::Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}
