//! CLI entry point for the ecograph catalog client.

use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::{fmt, EnvFilter};

use ecograph_core::{config, OntologyConfig, Registry, SubmittedRecord, UpdateStatement};
use ecograph_sparql::{validate, Assembler, RecordService, StoreClient};

#[derive(Parser)]
#[command(name = "ecograph")]
#[command(about = "Browse and extend the eco-tourism knowledge graph")]
struct Cli {
    /// Config file prefix (default: ecograph).
    #[arg(short, long, default_value = "ecograph", global = true)]
    config: String,

    /// Log output format.
    #[arg(long, value_enum, default_value_t = LogFormat::Json, global = true)]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Clone, Copy, ValueEnum)]
enum LogFormat {
    Json,
    Pretty,
}

#[derive(Subcommand)]
enum Command {
    /// List registered entity types and their fields.
    Types,

    /// Print the INSERT DATA statement for a record without sending it.
    Preview {
        /// Entity type key, e.g. certifications.
        #[arg(short = 't', long = "type")]
        entity_type: String,

        /// Field value as name=value. Repeatable.
        #[arg(short, long = "set", value_parser = parse_assignment)]
        set: Vec<(String, String)>,
    },

    /// Create a record in the store.
    Create {
        #[arg(short = 't', long = "type")]
        entity_type: String,

        #[arg(short, long = "set", value_parser = parse_assignment)]
        set: Vec<(String, String)>,
    },

    /// List stored records of an entity type as JSON.
    List {
        #[arg(short = 't', long = "type")]
        entity_type: String,

        /// Maximum number of rows.
        #[arg(short, long)]
        limit: Option<usize>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_format);

    let cfg = config::load(&cli.config)?;
    tracing::debug!(config = %cli.config, "Configuration resolved");

    match cli.command {
        Command::Types => print_types(&Registry::builtin()),
        Command::Preview { entity_type, set } => {
            let statement = preview(cfg.ontology, &build_record(entity_type, set))?;
            println!("{statement}");
        }
        Command::Create { entity_type, set } => {
            let svc = RecordService::new(StoreClient::new(&cfg.store)?, cfg.ontology);
            let id = svc.create(&build_record(entity_type, set)).await?;
            println!("{id}");
        }
        Command::List { entity_type, limit } => {
            let svc = RecordService::new(StoreClient::new(&cfg.store)?, cfg.ontology);
            let collection = svc.list(&entity_type, limit).await?;
            println!("{}", serde_json::to_string_pretty(&collection)?);
        }
    }

    Ok(())
}

fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    // stdout carries command output; logs go to stderr.
    let builder = fmt().with_env_filter(filter).with_writer(std::io::stderr);
    match format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Pretty => builder.pretty().init(),
    }
}

fn parse_assignment(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((name, value)) if !name.trim().is_empty() => {
            Ok((name.trim().to_string(), value.to_string()))
        }
        _ => Err(format!("Invalid field assignment: {s}. Expected name=value")),
    }
}

fn build_record(entity_type: String, set: Vec<(String, String)>) -> SubmittedRecord {
    SubmittedRecord {
        entity_type_key: entity_type,
        values: set.into_iter().collect(),
    }
}

/// Validate and assemble offline; the store is never contacted.
fn preview(
    ontology: OntologyConfig,
    record: &SubmittedRecord,
) -> ecograph_core::Result<UpdateStatement> {
    let registry = Registry::builtin();
    validate(&registry, record)?;
    Assembler::new(registry, ontology).assemble_record(record)
}

fn print_types(registry: &Registry) {
    for descriptor in registry.iter() {
        println!(
            "{} ({}) - {}",
            descriptor.key, descriptor.class_uri, descriptor.display.title
        );
        for field in descriptor.fields {
            let predicate = field.predicate_uri.unwrap_or(descriptor.fallback_predicate);
            let marker = if field.required { "*" } else { " " };
            println!("  {marker} {:<16} {:<24} {}", field.name, predicate, field.label);
        }
    }
}
