use std::path::PathBuf;
use std::process;

use anyhow::Result;
use clap::{ArgAction, Parser};
use tracing_subscriber::EnvFilter;

use loxbench::config::{Config, Settings};
use loxbench::report::Reporter;
use loxbench::runner::Runner;
use loxbench::suite;
use loxbench::types::{ColorMode, OutputFormat};

#[derive(Parser)]
#[command(name = "loxbench", version, about = "Run Lox benchmarks")]
struct Cli {
    /// Path to the Lox interpreter binary
    #[arg(value_name = "LOX_PATH")]
    lox_path: PathBuf,

    /// Directory holding the benchmark programs [default: tests/benchmarks/lox]
    #[arg(long)]
    benchmark_dir: Option<PathBuf>,

    /// Source file extension of benchmark programs [default: lox]
    #[arg(long)]
    extension: Option<String>,

    /// Runs per benchmark; the best one is reported [default: 5]
    #[arg(long)]
    runs: Option<usize>,

    /// Pause between runs of the same benchmark, in milliseconds [default: 2000]
    #[arg(long)]
    cooldown_ms: Option<u64>,

    /// Settings file (TOML)
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long, default_value = "text")]
    format: OutputFormat,

    #[arg(long, default_value = "auto")]
    color: ColorMode,

    /// Log progress to stderr (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "loxbench=warn",
        1 => "loxbench=info",
        _ => "loxbench=debug",
    };
    let filter = EnvFilter::try_from_env("LOXBENCH_LOG").unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let overrides = Settings {
        benchmark_dir: cli.benchmark_dir,
        extension: cli.extension,
        runs: cli.runs,
        cooldown_ms: cli.cooldown_ms,
    };
    let settings = Settings::locate(cli.config.as_deref())?.merge(overrides);
    let config = Config::resolve(&cli.lox_path, settings)?;

    let runner = Runner::from_config(&config);
    let mut reporter = Reporter::new(std::io::stdout().lock(), cli.format, cli.color);

    suite::run_suite(&config, &runner, &mut reporter)?;

    Ok(())
}

fn main() {
    if let Err(err) = run() {
        eprintln!("{}", err);
        process::exit(1);
    }
}
