use std::{path::PathBuf, process::ExitCode};

use arqlog::{export, require_names, Pipeline};
use arqlog_core::{config::Config, ArqlogError, ChartContext};
use clap::Parser;

#[derive(Parser)]
#[command(
    name = "arqlog",
    about = "Validate ARQ benchmark logs and chart per-packet delay"
)]
struct Cli {
    /// Log set names; each reads <logs-dir>/server_<NAME> and <logs-dir>/client_<NAME>.
    names: Vec<String>,

    /// Directory holding the log files (overrides the config file).
    #[arg(long, value_name = "DIR")]
    logs_dir: Option<PathBuf>,

    /// Config file to layer over the defaults instead of ~/.config/arqlog/config.toml.
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Print per-series summaries instead of opening the chart.
    #[arg(long)]
    headless: bool,

    /// Write all delay series to FILE as JSON.
    #[arg(long, value_name = "FILE")]
    export: Option<PathBuf>,

    /// Print every extracted (sequence number, timestamp) pair.
    #[arg(long)]
    print_entries: bool,

    /// Chart theme: default or gruvbox.
    #[arg(long, default_value = "default")]
    theme: String,

    /// Write debug logs to /tmp/arqlog-debug.log (tail -f to inspect).
    #[arg(long)]
    debug: bool,
}

const EXIT_FAILURE: u8 = 1;
const EXIT_NO_INPUT: u8 = 2;
const EXIT_VALIDATION: u8 = 3;

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("arqlog: {err:#}");
            ExitCode::from(exit_code(&err))
        }
    }
}

fn exit_code(err: &anyhow::Error) -> u8 {
    match err.downcast_ref::<ArqlogError>() {
        Some(ArqlogError::MissingInput) => EXIT_NO_INPUT,
        Some(ArqlogError::Validation { .. }) => EXIT_VALIDATION,
        _ => EXIT_FAILURE,
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    // Checked before any config or log file is touched.
    require_names(&cli.names)?;

    init_tracing(cli.debug)?;

    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(dir) = cli.logs_dir {
        config.logs.dir = dir;
    }

    let pipeline = Pipeline::new(&config)?;
    let mut chart = ChartContext::from_config(&config.chart);
    let print_entries = cli.print_entries;

    pipeline.run(&cli.names, &mut chart, |set| {
        if print_entries {
            for (side, series) in [("server", &set.server), ("client", &set.client)] {
                println!("# {} {side}", set.name);
                for entry in series {
                    println!("{entry}");
                }
            }
        }
    })?;

    if let Some(path) = &cli.export {
        export::write_json_file(&chart, path)?;
    }

    if cli.headless {
        for line in export::summary_lines(&chart) {
            println!("{line}");
        }
        return Ok(());
    }

    arqlog_tui::run(chart, arqlog_tui::Theme::by_name(&cli.theme))
}

fn init_tracing(debug: bool) -> anyhow::Result<()> {
    if debug {
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open("/tmp/arqlog-debug.log")?;
        tracing_subscriber::fmt()
            .with_writer(std::sync::Mutex::new(file))
            .with_ansi(false)
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_env("RUST_LOG")
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug")),
            )
            .init();
        tracing::info!("arqlog debug log started; tail -f /tmp/arqlog-debug.log");
    } else {
        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_target(false)
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_env("RUST_LOG")
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
            )
            .init();
    }
    Ok(())
}
