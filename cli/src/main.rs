//! Line-oriented terminal front end.
//!
//! Input lines are read on a helper thread and handed to the single control loop, which also
//! ticks the session at a fixed cadence so challenge deadlines fire without input.

use anyhow::{Context, Result};
use clap::Parser;
use clap_verbosity_flag::{Verbosity, WarnLevel};
use popquest_core::{CellCount, Coord, Instant, Session};
use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use tracing_subscriber::filter::LevelFilter;

mod app;
mod command;
mod config;
mod render;

use app::{App, Flow};
use config::FileConfig;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: Verbosity<WarnLevel>,

    /// TOML file with a [game] table and an optional word list
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Word list file, one word per line
    #[arg(short, long)]
    words: Option<PathBuf>,

    #[arg(long)]
    rows: Option<Coord>,

    #[arg(long)]
    cols: Option<Coord>,

    #[arg(long)]
    mines: Option<CellCount>,

    /// Seconds to unscramble a word after hitting a mine
    #[arg(long)]
    time_limit: Option<u32>,

    /// Force a seed instead of random
    #[arg(short, long)]
    seed: Option<u64>,

    /// Milliseconds between challenge clock checks
    #[arg(long, default_value_t = 100)]
    tick_ms: u64,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(&args.verbose);

    let file = match &args.config {
        Some(path) => FileConfig::load(path)?,
        None => FileConfig::default(),
    };
    let mut game = file.game;
    game.rows = args.rows.unwrap_or(game.rows);
    game.cols = args.cols.unwrap_or(game.cols);
    game.mines = args.mines.unwrap_or(game.mines);
    game.time_limit_secs = args.time_limit.unwrap_or(game.time_limit_secs);

    let words = config::resolve_words(args.words.as_deref(), &file)?;
    let seed = args.seed.unwrap_or_else(clock_seed);
    log::debug!("seed: {}", seed);

    let session = Session::new(game, words, seed).context("invalid game setup")?;
    let mut app = App::new(session, std::io::stdout().lock());
    app.greet(Instant::now())?;

    let lines = spawn_line_reader();
    let tick = Duration::from_millis(args.tick_ms.max(1));
    loop {
        match lines.recv_timeout(tick) {
            Ok(line) => {
                if app.handle_line(&line, Instant::now())? == Flow::Quit {
                    break;
                }
            }
            Err(RecvTimeoutError::Timeout) => app.tick(Instant::now())?,
            Err(RecvTimeoutError::Disconnected) => break,
        }
    }

    log::debug!("Leaving in phase {:?}", app.session().phase());
    Ok(())
}

fn init_logging(verbose: &Verbosity<WarnLevel>) {
    let level = match verbose.log_level_filter() {
        log::LevelFilter::Off => LevelFilter::OFF,
        log::LevelFilter::Error => LevelFilter::ERROR,
        log::LevelFilter::Warn => LevelFilter::WARN,
        log::LevelFilter::Info => LevelFilter::INFO,
        log::LevelFilter::Debug => LevelFilter::DEBUG,
        log::LevelFilter::Trace => LevelFilter::TRACE,
    };

    // the fmt subscriber also forwards `log` records from the engine
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_nanos() as u64)
        .unwrap_or_default()
}

/// Stdin lines on a channel, the channel closes at end of input.
fn spawn_line_reader() -> Receiver<String> {
    let (sender, receiver) = mpsc::channel();
    std::thread::spawn(move || {
        for line in std::io::stdin().lines() {
            let Ok(line) = line else { break };
            if sender.send(line).is_err() {
                break;
            }
        }
    });
    receiver
}
