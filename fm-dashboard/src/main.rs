//! Terminal dashboard built on the fm-webui router.

mod app;
mod model;
mod views;

use clap::Parser;
use fm_webui::{Application, ApplicationConfig};
use std::fs::File;
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(name = "fm-dashboard", version, about = "Browse metrics in the terminal")]
struct Cli {
    /// Fragment opened on start, e.g. `path=metrics&filter=http`
    #[arg(short, long, default_value = app::START_FRAGMENT)]
    start: String,

    /// Write logs to this file (the terminal is taken by the UI)
    #[arg(long, env = "FM_DASHBOARD_LOG")]
    log_file: Option<PathBuf>,

    /// Log filter, e.g. `info` or `fm_webui=debug`
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Input poll interval in milliseconds
    #[arg(long, default_value_t = 100)]
    tick_ms: u64,

    /// Disable mouse capture
    #[arg(long)]
    no_mouse: bool,
}

fn init_logging(cli: &Cli) -> anyhow::Result<()> {
    let Some(path) = &cli.log_file else {
        return Ok(());
    };
    let file = File::create(path)?;
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(&cli.log_level))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(&cli)?;

    let config = ApplicationConfig {
        tick_rate: Duration::from_millis(cli.tick_ms),
        mouse_capture: !cli.no_mouse,
        ..ApplicationConfig::default()
    };

    Application::with_config(config).run(move |router| {
        app::install(router);
        router.navigate(&cli.start, true);
        Ok(())
    })
}
