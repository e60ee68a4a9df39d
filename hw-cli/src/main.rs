//! HW CLI - Command line tool for detecting heat waves in land-surface temperature series.

use clap::Parser;

#[derive(Parser)]
#[command(
    name = "hw-cli",
    version,
    about = "Heat-wave detection toolkit for regional land-surface temperature"
)]
struct Cli {
    #[command(subcommand)]
    command: hw_cmd::Command,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    hw_cmd::run(cli.command)
}
