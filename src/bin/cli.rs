use clap::Parser;
use slope_status::cli;

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    cli::run(cli::Args::parse()).await?;
    Ok(())
}
