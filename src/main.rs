use clap::Parser;
use miette::Result;
use stitch::cli::Cli;
use tracing::Level;

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(if cli.verbose { Level::DEBUG } else { Level::WARN })
        .with_writer(std::io::stderr)
        .init();

    if let Some(shell) = cli.completions {
        stitch::cli::completions::run(shell)?;
        return Ok(());
    }

    if let Err(err) = stitch::cli::build::run(cli.build) {
        for line in err.backtrace() {
            eprintln!("{}", line);
        }
        return Err(err.into());
    }

    Ok(())
}
