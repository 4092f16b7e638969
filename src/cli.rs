use std::path::PathBuf;

use clap::Parser;

#[derive(Parser)]
#[command(
    name = "sprout",
    about = "Scaffold a new project from a template tree",
    version
)]
pub struct Cli {
    /// Template directory to instantiate (default: user config, then the bundled template)
    #[arg(short, long)]
    pub template: Option<PathBuf>,

    /// Directory in which the project folder is created (default: current directory)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Set answer values (can be repeated: -d key=value)
    #[arg(short, long = "data", value_name = "KEY=VALUE")]
    pub data: Vec<String>,

    /// Use default values without prompting
    #[arg(long)]
    pub defaults: bool,

    /// Show planned files without writing anything
    #[arg(long)]
    pub dry_run: bool,

    /// Print debug logging
    #[arg(short, long)]
    pub verbose: bool,
}
