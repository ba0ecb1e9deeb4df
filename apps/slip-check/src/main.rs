//! # slip-check
//!
//! Validates JSON-line slips against configured game profiles.
//!
//! ## Usage
//! ```text
//! slip-check [--config PATH] [--game NAME] [INPUT]
//!
//!   INPUT      file of JSON lines, or "-" for stdin (default)
//!   stdout     one JSON report per slip
//!   stderr     logs
//!   exit code  0 all accepted, 1 any rejected, 2 run failed
//! ```

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, reload, EnvFilter};

use slip_check::{Checker, CheckerConfig};

#[derive(Debug, Parser)]
#[command(name = "slip-check", version, about = "Validate wagering slips against game rules")]
struct Args {
    /// TOML file with game profiles
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Game for slips that do not name one
    #[arg(long, value_name = "NAME")]
    game: Option<String>,

    /// JSON-lines input, "-" for stdin
    #[arg(default_value = "-")]
    input: String,
}

fn main() -> ExitCode {
    match run(Args::parse()) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("slip-check: {:#}", e);
            ExitCode::from(2)
        }
    }
}

fn run(args: Args) -> anyhow::Result<ExitCode> {
    // Initialize tracing at RUST_LOG or "info" until the config names a level
    let from_env = EnvFilter::try_from_default_env().ok();
    let env_filter_set = from_env.is_some();
    let (filter, filter_handle) =
        reload::Layer::new(from_env.unwrap_or_else(|| EnvFilter::new("info")));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(io::stderr).with_target(false))
        .init();

    // Load configuration
    let config = CheckerConfig::load(args.config.clone()).context("loading configuration")?;

    // RUST_LOG wins over the configured level
    if !env_filter_set {
        filter_handle
            .reload(EnvFilter::new(&config.log.level))
            .context("applying configured log level")?;
    }

    info!(
        games = ?config.game_names(),
        default_game = ?config.default_game,
        "Configuration loaded"
    );

    if let Some(ref game) = args.game {
        config.game(game)?;
    }

    let input: Box<dyn BufRead> = if args.input == "-" {
        Box::new(io::stdin().lock())
    } else {
        let file = File::open(&args.input).with_context(|| format!("opening {}", args.input))?;
        Box::new(BufReader::new(file))
    };

    let checker = Checker::new(&config, args.game);
    let summary = checker.run(input, io::stdout().lock())?;

    info!(
        total = summary.total(),
        accepted = summary.accepted,
        rejected = summary.rejected,
        "Run complete"
    );

    if summary.rejected > 0 {
        Ok(ExitCode::from(1))
    } else {
        Ok(ExitCode::SUCCESS)
    }
}
