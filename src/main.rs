use clap::Parser;
use tracing_subscriber::EnvFilter;

use company_lookup::cli;

fn main() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();

    // Initialize logging based on verbosity flag
    let filter = if cli.verbose {
        EnvFilter::new("company_lookup=debug,info")
    } else {
        EnvFilter::new("company_lookup=warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();

    let config = cli.config.as_deref();
    match cli.command {
        cli::Commands::Lookup(args) => {
            cli::lookup::run(args, cli.format, config, cli.verbose)?;
        }
        cli::Commands::Batch(args) => {
            cli::batch::run(args, cli.format, config, cli.verbose)?;
        }
        cli::Commands::Stats(args) => {
            cli::catalog::run_stats(args, cli.format, config, cli.verbose)?;
        }
        cli::Commands::Convert(args) => {
            cli::catalog::run_convert(args, cli.verbose)?;
        }
    }

    Ok(())
}
