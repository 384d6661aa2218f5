use std::process::ExitCode;

use clap::Parser;
use owo_colors::OwoColorize;
use pgmodel_rustgen::RenderOptions;
use tracing_subscriber::EnvFilter;

mod args;
mod config;

use args::{Args, LogLevel};
use config::{Config, ConfigError};

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Introspect(#[from] pgmodel::Error),

    #[error("failed to write {path}: {source}")]
    Write {
        path: camino::Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let _ = dotenvy::dotenv();
    let args = Args::parse();

    init_logging(args.log_level.unwrap_or_default());

    match run(&args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{} {}", "error:".red().bold(), err);
            ExitCode::FAILURE
        }
    }
}

/// Logs go to stderr; stdout may carry the generated code.
fn init_logging(level: LogLevel) {
    let filter = EnvFilter::new(level.as_filter_str());
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .init();
}

async fn run(args: &Args) -> Result<(), CliError> {
    let config = Config::from_args(args)?;
    tracing::info!(addr = %config.target, "connecting");

    let client = pgmodel::connect(&config.pg).await?;
    let entities = pgmodel::introspect(&client, &config.scope).await?;

    if entities.is_empty() {
        eprintln!(
            "{} no tables or views matched in {}",
            "warning:".yellow().bold(),
            config.target
        );
    }

    let options = RenderOptions {
        module: config.module.clone(),
        database: config.dbname().map(str::to_string),
    };
    let generated = pgmodel_rustgen::generate(&entities, &options);

    // nothing is written unless the whole pass succeeded
    match &config.output {
        Some(path) => {
            std::fs::write(path, &generated.code).map_err(|source| CliError::Write {
                path: path.clone(),
                source,
            })?;
            eprintln!(
                "{} {} structs to {}",
                "wrote".green().bold(),
                entities.len(),
                path
            );
        }
        None => print!("{}", generated.code),
    }

    if !generated.manual_review.is_empty() {
        eprintln!(
            "{} {} column(s) need a manually chosen type:",
            "warning:".yellow().bold(),
            generated.manual_review.len()
        );
        for review in &generated.manual_review {
            eprintln!("  {} ({})", review.column, review.sql_type.dimmed());
        }
    }

    Ok(())
}
