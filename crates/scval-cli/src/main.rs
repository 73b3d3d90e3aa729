use anyhow::Result;
use clap::Parser;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

mod args;
mod cmd;
mod io;
mod output;

fn main() {
    let cli = args::Cli::parse();
    init_tracing(cli.verbose);
    output::init(cli.json);

    if let Err(e) = run(cli) {
        output::error_line(&format!("error: {e:#}"));
        std::process::exit(1);
    }
}

fn run(cli: args::Cli) -> Result<()> {
    cmd::dispatch(cli)
}

/// Logs go to stderr so stdout stays machine-readable. `RUST_LOG` wins over `--verbose`.
fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
