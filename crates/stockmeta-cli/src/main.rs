//! Stockmeta CLI: generate stock-site metadata for local photo and video files.
//!
//! Limits and the simulated delay come from the environment (see `Config`).

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use std::path::PathBuf;
use std::process::ExitCode;

use stockmeta_cli::{
    file_handle_from_path, format_file_size, init_tracing, log_error, truncate_string, ErrorReport,
};
use stockmeta_core::models::{ExportFormat, ExportOptions, ExportRecord, MediaKind};
use stockmeta_core::{Config, ValidationKind};
use stockmeta_processing::{
    classifier, content_type_for_filename, Processor, Session, ValidationBackend,
    ValidationSimulator,
};

#[derive(Parser)]
#[command(name = "stockmeta", about = "Stock photo and video metadata generator")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate metadata for a single file name without touching the disk
    Classify {
        /// File name, e.g. sunset_beach.jpg
        name: String,
        /// Media kind: image or video (inferred from the extension by default)
        #[arg(long)]
        kind: Option<String>,
    },
    /// Queue files, process them and print export records
    Generate {
        /// Files to process
        #[arg(required = true)]
        files: Vec<PathBuf>,
        /// Run compliance and legal checks before exporting
        #[arg(long)]
        validate: bool,
        /// Leave original file names out of the records
        #[arg(long)]
        no_filename: bool,
        /// Target export format: xmp, csv, json or xlsx
        #[arg(long, default_value = "xmp")]
        export_format: String,
        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
        output: OutputFormat,
    },
    /// Print the compliance and legal findings
    Validate {
        /// Only run one check: compliance or legal
        #[arg(long)]
        kind: Option<String>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Json,
    Table,
}

fn print_json(value: &impl Serialize) -> anyhow::Result<()> {
    let out = serde_json::to_string_pretty(value).context("Serialize output")?;
    println!("{}", out);
    Ok(())
}

fn print_records_table(records: &[ExportRecord]) {
    println!("{:<30} {:<50} {:>8}", "FILE", "TITLE", "KEYWORDS");
    for record in records {
        println!(
            "{:<30} {:<50} {:>8}",
            truncate_string(record.filename.as_deref().unwrap_or("-"), 30),
            truncate_string(&record.title, 50),
            record.keywords.len()
        );
    }
}

async fn generate(
    config: Config,
    files: Vec<PathBuf>,
    validate: bool,
    options: ExportOptions,
    output: OutputFormat,
) -> anyhow::Result<()> {
    let handles = files
        .iter()
        .map(|path| file_handle_from_path(path))
        .collect::<anyhow::Result<Vec<_>>>()?;

    let processor = Processor::from_config(&config);
    let mut session = Session::new(config);

    let intake = session.add_files(handles);
    if let Some(message) = intake.error_message() {
        eprintln!("{}", message);
    }
    if intake.added.is_empty() {
        anyhow::bail!("No acceptable files to process");
    }

    tracing::info!(
        files = session.queue().len(),
        total_size = %format_file_size(session.queue().total_size()),
        "Queued files"
    );

    let job = session.begin_processing()?;
    let run_id = job.run_id;
    let handle = processor.spawn(job);
    let token = handle.cancellation_token();
    let interrupt = tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            token.cancel();
        }
    });
    let result = handle.wait().await;
    interrupt.abort();
    session.complete_processing(run_id, result)?;

    if validate {
        session.run_compliance_check().await?;
        session.run_legal_validation().await?;
    }

    let records = session.export_metadata(&options);
    match output {
        OutputFormat::Json => print_json(&records)?,
        OutputFormat::Table => print_records_table(&records),
    }
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let is_production = Config::from_env()
                .map(|config| config.is_production())
                .unwrap_or(true);
            log_error(&err);
            eprintln!("{}", ErrorReport::from_error(&err, is_production).render());
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = Config::from_env().context("Invalid configuration")?;

    match cli.command {
        Commands::Classify { name, kind } => {
            let kind = match kind {
                Some(kind) => kind.parse::<MediaKind>()?,
                None => MediaKind::from_content_type(content_type_for_filename(&name)),
            };
            print_json(&classifier::generate(&name, kind))?;
        }
        Commands::Generate {
            files,
            validate,
            no_filename,
            export_format,
            output,
        } => {
            let options = ExportOptions {
                format: export_format.parse::<ExportFormat>()?,
                include_original_filename: !no_filename,
                include_validation: validate,
            };
            generate(config, files, validate, options, output).await?;
        }
        Commands::Validate { kind } => {
            let simulator = ValidationSimulator::new();
            let kinds = match kind {
                Some(kind) => vec![kind.parse::<ValidationKind>()?],
                None => vec![ValidationKind::Compliance, ValidationKind::Legal],
            };
            let mut results = Vec::with_capacity(kinds.len());
            for kind in kinds {
                results.push(simulator.run(kind).await?);
            }
            print_json(&results)?;
        }
    }

    Ok(())
}
