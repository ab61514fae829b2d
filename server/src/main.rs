mod commands;
mod config;
mod persistence;

use anyhow::Context;
use clap::Parser;
use commands::Command;
use persistence::sqlite::{Database, SqlitePersonRepository};
use persistence::{CsvPersonRepository, PersonRepositoryFactory};
use std::sync::Arc;

/// Person records backed by a CSV file or a SQLite database.
#[derive(Parser)]
#[command(name = "person-server", version)]
struct Cli {
    /// Backend to use (`csv` or `database`). Overrides PERSON_DATA_SOURCE.
    #[arg(long, global = true)]
    source: Option<String>,

    /// Import the CSV file into the database before running the command.
    /// Overrides PERSON_IMPORT_ON_STARTUP.
    #[arg(long, global = true)]
    import: bool,

    #[command(subcommand)]
    command: Command,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing with span durations; stdout is reserved for output
    use tracing_subscriber::fmt::format::FmtSpan;
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_span_events(FmtSpan::CLOSE)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let data_dir = config::get_data_dir();
    let defaults_dir = config::get_defaults_dir();
    tracing::info!("Using data directory: {}", data_dir.display());

    let color_path = config::get_color_mapping_path();
    let colors = config::load_color_table(&color_path)?.map(Arc::new);

    let csv = CsvPersonRepository::new(config::get_csv_path(&data_dir), colors)
        .with_context(|| format!("Cannot use color mapping {}", color_path.display()))?;
    csv.seed_from(&defaults_dir.join("sample-input.csv"))?;
    let csv = Arc::new(csv);

    let database = Database::open(
        &config::get_database_path(&data_dir),
        config::get_database_max_connections(),
    )
    .await?;
    let factory = PersonRepositoryFactory::new(
        Arc::clone(&csv),
        SqlitePersonRepository::new(database.pool().clone()),
    );

    let source = match cli.source {
        Some(source) => source,
        None => config::get_data_source()?,
    };
    let import = cli.import || config::get_import_on_startup();
    let repo = commands::open_backend(&factory, &source, import).await?;
    tracing::info!(source = %repo.source(), "Person repository ready");

    match commands::execute(cli.command, &repo, &factory).await {
        Ok(output) => {
            println!("{output}");
            Ok(())
        }
        Err(e @ commands::CommandError::NotFound(_)) | Err(e @ commands::CommandError::MissingName) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
        Err(e) => Err(e.into()),
    }
}
