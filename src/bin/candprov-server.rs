//! Candidate provider HTTP server binary

use anyhow::Context;
use candprov::{
    server, CandidateDispatcher, CandidateEntry, CandidateProvider, Config, ProviderRegistry,
    StaticProvider,
};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .with_level(true)
        .init();

    println!("candprov candidate server");
    println!("   Version: {}", env!("CARGO_PKG_VERSION"));
    println!();

    let config = Config::from_env().context("Failed to read configuration")?;

    // --demo serves a fixed in-memory provider instead of the configured backend
    let demo = std::env::args().any(|arg| arg == "--demo");

    let provider: Box<dyn CandidateProvider> = if demo {
        println!("✓ Mode: DEMO candidates");
        Box::new(create_demo_provider())
    } else {
        println!("✓ Mode: {}", config.cand_type);
        if let Some(ref path) = config.qrels_path {
            println!("✓ Qrels file: {}", path.display());
        }
        ProviderRegistry::with_defaults()
            .create(config.cand_type, &config.provider_config())
            .with_context(|| format!("Failed to create '{}' provider", config.cand_type))?
    };

    let dispatcher = CandidateDispatcher::new(provider);
    println!("✓ Provider '{}' ready", dispatcher.provider_name());
    println!("✓ Starting HTTP server on {}...", config.bind_addr());
    println!();

    server::run_server(dispatcher, &config.bind_addr()).await?;

    Ok(())
}

/// Small fixed candidate lists for trying the HTTP surface
fn create_demo_provider() -> StaticProvider {
    StaticProvider::new("demo")
        .with_query(
            "1",
            vec![
                CandidateEntry::new("doc_borrow_checker", 12.4),
                CandidateEntry::new("doc_lifetimes", 10.9),
                CandidateEntry::new("doc_ownership", 14.1),
                CandidateEntry::new("doc_traits", 3.2),
            ],
        )
        .with_query(
            "2",
            vec![
                CandidateEntry::new("doc_tokio_runtime", 8.7),
                CandidateEntry::new("doc_async_await", 9.5),
                CandidateEntry::new("doc_futures", 8.7),
            ],
        )
}
