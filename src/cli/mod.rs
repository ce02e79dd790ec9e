pub mod build;
pub mod completions;

use clap::Parser;
use clap_complete::Shell;

/// stitch - Cross-stitch chart compiler
#[derive(Parser, Debug)]
#[command(name = "stitch")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub build: build::BuildArgs,

    /// Log parser and renderer activity to stderr
    #[arg(long, short)]
    pub verbose: bool,

    /// Print shell completions and exit
    #[arg(long, value_enum, value_name = "SHELL")]
    pub completions: Option<Shell>,
}
