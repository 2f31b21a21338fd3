// src/main.rs
use color_eyre::eyre::Result;

use review_scrape::cli;

fn main() -> Result<()> {
    color_eyre::install()?;
    let params = cli::parse_cli()?;
    cli::run(params)
}
