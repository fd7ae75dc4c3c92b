mod cli;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::{Cli, Commands};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tf_docs=info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    let cli = Cli::parse();
    let config = cli.config.as_ref();

    match cli.command {
        Commands::Scan {
            path,
            format,
            lenient,
            max_depth,
            include_hidden,
            sequential,
        } => {
            cli::scan(
                &path,
                config,
                format,
                lenient,
                max_depth,
                include_hidden,
                sequential,
            )?;
        }
        Commands::Modules {
            path,
            max_depth,
            include_hidden,
        } => {
            cli::list_modules(&path, config, max_depth, include_hidden)?;
        }
        Commands::Files { dir } => {
            cli::list_files(&dir, config)?;
        }
    }

    Ok(())
}
