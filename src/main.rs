use std::{fs::OpenOptions, io, panic, process::exit, sync::Mutex};

pub use utils::{Pos, Size};
mod utils;

pub use error::{Error, Result};
mod error;

pub use world::{Cell, Grid};
pub mod world;

pub use seeds::Pattern;
pub mod seeds;

pub use sim::Sim;
mod sim;

pub use config::{Config, LogFormat};
mod config;

pub use view::{Canvas, Event, KeyReader, Keys, Screen};
mod view;

pub use session::Session;
mod session;

/// Log events go to a file, the terminal belongs to the grid.
fn init_tracing(config: &Config) -> io::Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&config.log_file)?;
    let filter = tracing_subscriber::EnvFilter::try_new(&config.log_filter)
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false);
    match config.log_format {
        LogFormat::Json => builder.json().with_current_span(true).init(),
        LogFormat::Compact => builder.compact().init(),
    }

    let default_hook = panic::take_hook();
    panic::set_hook(Box::new(move |info| {
        let backtrace = std::backtrace::Backtrace::capture();
        tracing::error!(%info, ?backtrace, "panic");
        // hooks run before unwinding drops the canvas
        view::restore_screen();
        default_hook(info);
    }));
    Ok(())
}

fn run() -> Result<()> {
    let canvas = Canvas::open()?;
    let keys = KeyReader::spawn()?;
    Session::new(canvas, keys).run()
}

pub fn main() {
    let config = Config::from_env();
    if let Err(error) = init_tracing(&config) {
        eprintln!("[warning] logging disabled, cannot open {}: {error}", config.log_file.display());
    }

    // the canvas is dropped inside `run`, so the terminal is restored before reporting
    if let Err(error) = run() {
        tracing::error!(%error, "session aborted");
        eprintln!("[error] {error}");
        exit(1);
    }
}
