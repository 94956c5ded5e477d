use anyhow::Context;
use clap::{Parser, Subcommand};
use concept_mapper::utils::SUMMARY_FILE_NAME;
use concept_mapper::{server, AppConfig, ConceptMapService};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "concept-mapper", version, about = "Bloom's taxonomy concept maps from free text", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    #[arg(long, default_value = "info", global = true)]
    log_level: String,
    #[command(flatten)]
    config: AppConfig,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the landing page, the generation endpoint and rendered images.
    Serve {
        #[arg(long, env = "CONCEPT_MAPPER_HOST", default_value = "127.0.0.1")]
        host: String,
        #[arg(long, env = "CONCEPT_MAPPER_PORT", default_value_t = 5000)]
        port: u16,
    },
    /// Run the pipeline once on a text file and print the result as JSON.
    Generate {
        #[arg(long)]
        file: PathBuf,
    },
    /// Print the taxonomy levels the model reports.
    Levels,
}

fn init_tracing(level: &str) {
    let filter = EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_tracing(&cli.log_level);

    // The blocking HTTP client inside the service must be dropped outside the
    // async runtime, so `main` keeps the last reference.
    let service = Arc::new(ConceptMapService::from_config(&cli.config)?);

    match cli.command {
        Commands::Serve { host, port } => {
            let runtime = tokio::runtime::Builder::new_multi_thread()
                .enable_all()
                .build()
                .context("unable to start the async runtime")?;
            let addr = format!("{}:{}", host, port);
            runtime.block_on(server::serve(service.clone(), &addr))?;
        }
        Commands::Generate { file } => {
            let text = std::fs::read_to_string(&file)
                .with_context(|| format!("unable to read {:?}", file))?;
            let outcome = service.generate(&text)?;
            println!("{}", serde_json::to_string_pretty(&outcome)?);
            info!(summary_file = %service.output_dir().join(SUMMARY_FILE_NAME).display());
        }
        Commands::Levels => {
            for level in service.taxonomy_levels().iter() {
                println!("{}", level);
            }
        }
    }

    Ok(())
}
