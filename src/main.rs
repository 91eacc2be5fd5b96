use clap::Parser;
use routemount::cli::{run_cli, Cli};
use routemount::logging;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init_logging(&cli.log_level)?;
    run_cli(cli)
}
