//! Command handlers for newsmem CLI.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use chrono::DateTime;
use newsmem::article::{identify, identity_key, Article};
use newsmem::collection::{SqliteCollection, VectorCollection};
use newsmem::config::Config;
use newsmem::memory::{open_collections, MemoryStore};
use newsmem::source::{ArticleSource, JsonFileSource};
use newsmem::Error;

use crate::output::*;

/// Commands supported by newsmem CLI.
#[derive(clap::Subcommand)]
pub enum Commands {
    /// Ingest a JSON array of articles into the recent collection
    Ingest {
        /// Path to the articles file
        file: PathBuf,

        /// Skip the expiry sweep that runs before ingestion
        #[arg(long)]
        no_cleanup: bool,
    },
    /// Similarity search over a collection
    Search {
        /// Search query text
        query: String,

        /// Search the important collection instead of recent
        #[arg(long)]
        important: bool,

        /// Maximum number of results (default: configured top_k)
        #[arg(short = 'l', long)]
        limit: Option<usize>,
    },
    /// Copy a record from recent to important
    Promote {
        /// Record ID
        id: String,
    },
    /// Delete expired records from the recent collection
    Cleanup {
        /// Retention window in days (default: configured retention_days)
        #[arg(long)]
        days: Option<u32>,
    },
    /// Print one record
    Get {
        /// Record ID
        id: String,

        /// Read from the important collection
        #[arg(long)]
        important: bool,
    },
    /// List ids and titles of a collection
    List {
        /// List the important collection
        #[arg(long)]
        important: bool,
    },
    /// Print the id an article would be stored under
    Id {
        #[arg(long)]
        title: String,

        #[arg(long)]
        url: String,

        /// Publication date (RFC 3339)
        #[arg(long)]
        published_at: Option<String>,
    },
    Version,
}

/// Execute a CLI command.
///
/// Only commands that embed text load the model; the rest open the
/// collections directly.
pub fn execute(command: &Commands, config: &Config, json: bool) -> Result<ExitCode, Error> {
    match command {
        Commands::Ingest { file, no_cleanup } => handle_ingest(config, file, *no_cleanup, json),
        Commands::Search {
            query,
            important,
            limit,
        } => handle_search(config, query, *important, limit.unwrap_or(config.top_k), json),
        Commands::Promote { id } => handle_promote(config, id, json),
        Commands::Cleanup { days } => {
            handle_cleanup(config, days.unwrap_or(config.retention_days), json)
        }
        Commands::Get { id, important } => handle_get(config, id, *important, json),
        Commands::List { important } => handle_list(config, *important, json),
        Commands::Id {
            title,
            url,
            published_at,
        } => handle_id(title, url, published_at.as_deref(), json),
        Commands::Version => handle_version(json),
    }
}

/// Embedder for operations that never embed.
fn no_embedder(_: &str) -> Result<Vec<f32>, Error> {
    Err(Error::InvalidInput(
        "this command does not load an embedding model".to_string(),
    ))
}

fn pick(collections: (SqliteCollection, SqliteCollection), important: bool) -> SqliteCollection {
    let (recent, important_collection) = collections;
    if important {
        important_collection
    } else {
        recent
    }
}

fn handle_ingest(
    config: &Config,
    file: &Path,
    no_cleanup: bool,
    json: bool,
) -> Result<ExitCode, Error> {
    let articles = JsonFileSource::new(file).fetch()?;
    let mut store = MemoryStore::open(config)?;

    let expired = if no_cleanup {
        None
    } else {
        Some(store.cleanup_expired(config.retention_days)?)
    };
    let report = store.add_articles(&articles)?;

    if json {
        print_json(&IngestResponse {
            status: "ingested".to_string(),
            inserted: report.inserted,
            skipped_empty: report.skipped_empty,
            skipped_duplicate: report.skipped_duplicate,
            expired,
            ids: report.ids,
        });
    } else {
        if let Some(expired) = expired {
            println!("Expired: {}", expired);
        }
        println!("Inserted: {}", report.inserted);
        println!("Skipped (no summary): {}", report.skipped_empty);
        println!("Skipped (already stored): {}", report.skipped_duplicate);
    }
    Ok(ExitCode::SUCCESS)
}

fn handle_search(
    config: &Config,
    query: &str,
    important: bool,
    limit: usize,
    json: bool,
) -> Result<ExitCode, Error> {
    let mut store = MemoryStore::open(config)?;
    let (collection, results) = if important {
        (
            store.important().name().to_string(),
            store.query_important(query, limit)?,
        )
    } else {
        (
            store.recent().name().to_string(),
            store.query_recent(query, limit)?,
        )
    };

    if json {
        print_json(&SearchResponse {
            collection,
            results: results.into_iter().map(SearchResultItem::from).collect(),
        });
    } else {
        for scored in results {
            let meta = &scored.record.metadata;
            println!("{} [score: {:.2}]", meta.title, scored.similarity);
            println!("  Source: {}", meta.source);
            println!("  URL: {}", meta.url);
            println!("  Published: {}\n", meta.published_at);
        }
    }
    Ok(ExitCode::SUCCESS)
}

fn handle_promote(config: &Config, id: &str, json: bool) -> Result<ExitCode, Error> {
    let (recent, important) = open_collections(config)?;
    let mut store = MemoryStore::new(recent, important, no_embedder);

    if !store.mark_as_important(id)? {
        return Err(Error::NotFound(format!("{} (not in recent collection)", id)));
    }

    if json {
        print_json(&PromoteResponse {
            status: "promoted".to_string(),
            id: id.to_string(),
        });
    } else {
        println!("Promoted: {}", id);
    }
    Ok(ExitCode::SUCCESS)
}

fn handle_cleanup(config: &Config, days: u32, json: bool) -> Result<ExitCode, Error> {
    let (recent, important) = open_collections(config)?;
    let mut store = MemoryStore::new(recent, important, no_embedder);
    let deleted = store.cleanup_expired(days)?;

    if json {
        print_json(&CleanupResponse {
            status: "cleaned".to_string(),
            days,
            deleted,
        });
    } else {
        println!("Deleted {} record(s) older than {} day(s)", deleted, days);
    }
    Ok(ExitCode::SUCCESS)
}

fn handle_get(config: &Config, id: &str, important: bool, json: bool) -> Result<ExitCode, Error> {
    let collection = pick(open_collections(config)?, important);
    let record = collection
        .get(&[id.to_string()])?
        .into_iter()
        .next()
        .ok_or_else(|| Error::NotFound(id.to_string()))?;

    if json {
        print_json(&GetResponse::new(collection.name(), record));
    } else {
        println!("ID: {}", record.id);
        println!("Title: {}", record.metadata.title);
        println!("Source: {}", record.metadata.source);
        println!("URL: {}", record.metadata.url);
        println!("Published: {}", record.metadata.published_at);
        if let Some(added) = &record.metadata.timestamp_added {
            println!("Added: {}", added);
        }
        println!("Summary: {}", record.document);
    }
    Ok(ExitCode::SUCCESS)
}

fn handle_list(config: &Config, important: bool, json: bool) -> Result<ExitCode, Error> {
    let collection = pick(open_collections(config)?, important);
    let records = collection.get_all()?;

    if json {
        let items: Vec<ListItem> = records
            .into_iter()
            .map(|r| ListItem {
                id: r.id,
                title: r.metadata.title,
                timestamp_added: r.metadata.timestamp_added,
            })
            .collect();
        print_json(&ListResponse {
            collection: collection.name().to_string(),
            records: items,
        });
    } else {
        for record in records {
            println!("{}: {}", record.id, record.metadata.title);
        }
    }
    Ok(ExitCode::SUCCESS)
}

fn handle_id(
    title: &str,
    url: &str,
    published_at: Option<&str>,
    json: bool,
) -> Result<ExitCode, Error> {
    let published_at = published_at
        .map(|raw| {
            DateTime::parse_from_rfc3339(raw)
                .map_err(|e| Error::InvalidInput(format!("published-at '{}': {}", raw, e)))
        })
        .transpose()?;

    let article = Article {
        title: title.to_string(),
        summary: None,
        url: url.to_string(),
        source: String::new(),
        published_at,
    };
    let id = identify(&article);

    if json {
        print_json(&IdResponse {
            id,
            key: identity_key(&article),
        });
    } else {
        println!("{}", id);
    }
    Ok(ExitCode::SUCCESS)
}

fn handle_version(json: bool) -> Result<ExitCode, Error> {
    if json {
        print_json(&serde_json::json!({
            "version": env!("CARGO_PKG_VERSION"),
            "name": env!("CARGO_PKG_NAME")
        }));
    } else {
        println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
    }
    Ok(ExitCode::SUCCESS)
}
