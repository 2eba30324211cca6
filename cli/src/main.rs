use anyhow::Result;
use clap::Parser;

mod cli;
mod format;

use self::cli::Cli;

fn main() -> Result<()> {
    Cli::parse().run()
}
