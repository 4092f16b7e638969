mod cli;
mod commands;

use clap::Parser;
use cli::Cli;

fn main() -> miette::Result<()> {
    let cli = Cli::parse();
    sprout::logger::init_logger(cli.verbose);
    commands::generate::run(cli)
}
