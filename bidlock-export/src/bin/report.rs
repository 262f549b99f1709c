use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use bidlock_core::{ProposalRepository, ProposalStatus};
use bidlock_db_sqlite::SqliteProposalRepository;
use clap::{Parser, ValueEnum};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ReportFormat {
    Csv,
    Html,
}

/// Export sent and accepted proposals to a CSV or HTML report.
#[derive(Parser, Debug)]
#[command(name = "bidlock-report")]
#[command(version, about, long_about = None)]
struct Args {
    /// SQLite database URL (e.g. sqlite:bidlock.db)
    #[arg(short, long, default_value = "sqlite:bidlock.db")]
    database: String,

    /// Path of the report file to write
    #[arg(short, long)]
    output: PathBuf,

    /// Report format
    #[arg(short, long, value_enum, default_value_t = ReportFormat::Csv)]
    format: ReportFormat,

    /// Only include proposals with this status (sent or accepted)
    #[arg(short, long)]
    status: Option<String>,

    /// Run database migrations before reading
    #[arg(short, long, default_value_t = false)]
    migrate: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();

    let status = args
        .status
        .as_deref()
        .map(|s| {
            ProposalStatus::parse(s)
                .with_context(|| format!("Unknown status filter: {s}"))
        })
        .transpose()?;

    let repo = SqliteProposalRepository::new(&args.database)
        .await
        .with_context(|| format!("Failed to connect to database: {}", args.database))?;

    if args.migrate {
        repo.run_migrations()
            .await
            .context("Failed to run migrations")?;
    }

    let proposals = repo
        .list_proposals(status)
        .await
        .context("Failed to list proposals")?;
    info!(count = proposals.len(), "loaded proposals");

    match args.format {
        ReportFormat::Csv => {
            let file = fs::File::create(&args.output)
                .with_context(|| format!("Failed to create: {}", args.output.display()))?;
            let written = bidlock_export::write_csv(file, &proposals)
                .context("Failed to write CSV report")?;
            info!(rows = written, output = %args.output.display(), "CSV report written");
        }
        ReportFormat::Html => {
            let html =
                bidlock_export::render_html(&proposals).context("Failed to render HTML report")?;
            fs::write(&args.output, html)
                .with_context(|| format!("Failed to write: {}", args.output.display()))?;
            info!(output = %args.output.display(), "HTML report written");
        }
    }

    Ok(())
}
