#[macro_use]
extern crate tracing;

use std::env;
use std::io::{self, Write as _};
use std::path::PathBuf;

use anyhow::{anyhow, Context as _};
use clap::Parser;
use column_block::cli::{self, Cli};
use column_block::layout::Options;
use column_block::utils::{default_config_path, expand_home};
use column_block_config::Config;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    let directives =
        env::var("RUST_LOG").unwrap_or_else(|_| "column_block=debug,info".to_owned());
    let env_filter = EnvFilter::builder().parse_lossy(directives);
    tracing_subscriber::fmt()
        .compact()
        .with_env_filter(env_filter)
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let _client = tracy_client::Client::start();

    let config = load_config(cli.config.clone())?;
    let options = Options::from_config(&config);

    let mut store = cli::build_store(&cli.columns)?;
    let output = cli::run(&mut store, options, &cli.subcommand, cli.json)?;

    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{}", output.trim_end()).context("error writing output")?;

    Ok(())
}

fn load_config(explicit: Option<PathBuf>) -> anyhow::Result<Config> {
    let explicit = explicit.or_else(|| env::var_os("COLUMN_BLOCK_CONFIG").map(PathBuf::from));

    let path = match explicit {
        Some(path) => expand_home(&path)?.unwrap_or(path),
        None => match default_config_path() {
            Some(path) if path.exists() => path,
            _ => {
                debug!("no config file found, using the defaults");
                return Ok(Config::default());
            }
        },
    };

    // miette reports don't convert into anyhow errors, format them instead.
    Config::load(&path).map_err(|err| anyhow!("{err:?}"))
}
