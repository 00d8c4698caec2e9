//! wfa-cli - Content maintenance tool
//!
//! Operator-side commands against the hosted content store: enumerate
//! document slugs, export raw documents, and audit guides for broken
//! review references or missing affiliate links.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::info;
use wfa_common::config::SiteConfig;
use wfa_common::content::ContentClient;

#[derive(Parser, Debug)]
#[command(name = "wfa-cli")]
#[command(about = "Content maintenance tool for the Workflow Automation site")]
#[command(version)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List all slugs of a document type
    List {
        /// Document type (post, softwareReview, guide, category, author)
        #[arg(short, long, default_value = "post")]
        doc_type: String,
    },
    /// Export all documents of a type as pretty-printed JSON
    Export {
        /// Document type to export
        #[arg(short, long, default_value = "post")]
        doc_type: String,
        /// Output file (stdout when omitted)
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
    /// Audit guides for broken review references and missing affiliate links
    Audit,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .init();

    let args = Args::parse();

    let config = SiteConfig::load().context("Failed to load configuration")?;
    let client =
        ContentClient::new(&config.content_store).context("Failed to build content client")?;

    match args.command {
        Command::List { doc_type } => list(&client, &doc_type).await,
        Command::Export { doc_type, out } => export(&client, &doc_type, out).await,
        Command::Audit => audit(&client).await,
    }
}

async fn list(client: &ContentClient, doc_type: &str) -> Result<()> {
    let slugs = client
        .all_slugs(doc_type)
        .await
        .with_context(|| format!("Failed to list {} documents", doc_type))?;

    for slug in &slugs {
        println!("{}", slug);
    }
    info!(count = slugs.len(), doc_type, "Listed documents");
    Ok(())
}

async fn export(client: &ContentClient, doc_type: &str, out: Option<PathBuf>) -> Result<()> {
    let documents = client
        .all_documents(doc_type)
        .await
        .with_context(|| format!("Failed to export {} documents", doc_type))?;

    let json = serde_json::to_string_pretty(&documents)?;
    match out {
        Some(path) => {
            std::fs::write(&path, json)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            println!("Exported {} documents to {}", documents.len(), path.display());
        }
        None => println!("{}", json),
    }
    Ok(())
}

async fn audit(client: &ContentClient) -> Result<()> {
    let guides = client.all_guides().await.context("Failed to load guides")?;

    let mut findings = 0usize;
    for guide in &guides {
        for item in &guide.items {
            if item.review.is_none() && item.custom_title.is_none() {
                println!(
                    "{}: rank {} has a broken review reference",
                    guide.slug.current, item.rank
                );
                findings += 1;
            }
            if item.affiliate_link().is_none() {
                println!(
                    "{}: rank {} ({}) has no affiliate link",
                    guide.slug.current,
                    item.rank,
                    item.title()
                );
                findings += 1;
            }
        }
    }

    if findings == 0 {
        println!("Audited {} guides: no findings", guides.len());
    } else {
        println!("Audited {} guides: {} findings", guides.len(), findings);
    }
    Ok(())
}
