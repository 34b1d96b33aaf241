use clap::Parser;
use contacts_rs::config::Config;
use contacts_rs::enrichment::{MemoryDomainCache, MockClassifier, OllamaClassifier, TextClassifier};
use contacts_rs::pipeline::ContactPipeline;
use contacts_rs::MessageMeta;
use std::sync::Arc;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser)]
#[command(name = "contacts-rs", about = "Build an enriched contact graph from message metadata")]
struct Args {
    /// Path to a TOML config file.
    #[arg(long, default_value = "config.toml")]
    config: String,

    /// Path to a JSON array of message-metadata records.
    #[arg(long)]
    messages: String,

    /// Account owner address. Falls back to the config value.
    #[arg(long)]
    owner: Option<String>,

    /// Use the deterministic mock classifier instead of Ollama.
    #[arg(long)]
    mock_classifier: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let subscriber = FmtSubscriber::builder().with_max_level(Level::INFO).pretty().finish();
    tracing::subscriber::set_global_default(subscriber)
        .expect("Failed to set tracing subscriber");

    let args = Args::parse();

    let config = if std::path::Path::new(&args.config).exists() {
        Config::from_file(&args.config)?
    } else {
        info!("No config file found, using defaults");
        Config::default()
    };

    let owner = match args.owner.or_else(|| {
        let configured = config.ingest.owner_email.clone();
        if configured.is_empty() {
            None
        } else {
            Some(configured)
        }
    }) {
        Some(owner) => owner,
        None => anyhow::bail!("no owner address given (--owner or ingest.owner_email)"),
    };

    let raw = std::fs::read_to_string(&args.messages)?;
    let messages: Vec<MessageMeta> = serde_json::from_str(&raw)?;
    info!("Loaded {} messages from {}", messages.len(), args.messages);

    let classifier: Arc<dyn TextClassifier> = if args.mock_classifier {
        Arc::new(MockClassifier::new())
    } else {
        Arc::new(
            OllamaClassifier::new(config.enrichment.classifier_model.clone())
                .with_base_url(config.enrichment.classifier_url.clone()),
        )
    };
    let cache = Arc::new(MemoryDomainCache::new());

    let pipeline = ContactPipeline::new(config, classifier, cache);
    let output = pipeline.run(&owner, &messages, &owner).await?;

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
