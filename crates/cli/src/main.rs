use clap::{Parser, Subcommand};
use serde::Serialize;

use novel_sources_core::config::{config_path, load_config, load_config_from, save_config, AppConfig};
use novel_sources_core::model::{BookResult, PagedList};
use novel_sources_core::response::Response;
use novel_sources_core::sources::{CatalogSource, SourceInfo, SourceInterface, SourceRegistry};

type CliResult = Result<(), Box<dyn std::error::Error + Send + Sync>>;

#[derive(Parser)]
#[command(name = "novel-sources")]
#[command(about = "Browse novel catalogs through source adapters")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Source id (see `sources`)
    #[arg(long, global = true, default_value = "flask_novel_reader")]
    source: String,
}

#[derive(Subcommand)]
enum Commands {
    /// List registered sources
    Sources,

    /// Show the latest releases of a source
    Catalog {
        /// Zero-based page index
        #[arg(long, default_value = "0")]
        page: usize,
    },

    /// Search a source's catalog
    Search {
        /// Search text
        #[arg(required = true)]
        query: String,

        /// Zero-based page index
        #[arg(long, default_value = "0")]
        page: usize,
    },

    /// Show a book's cover image url
    Cover {
        /// Book url
        #[arg(required = true)]
        book_url: String,
    },

    /// Show a book's description
    Description {
        /// Book url
        #[arg(required = true)]
        book_url: String,
    },

    /// List a book's chapters
    Chapters {
        /// Book url
        #[arg(required = true)]
        book_url: String,
    },

    /// Configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Write default config file
    Init,
    /// Show current configuration
    Show,
    /// Print the config file path
    Path,
    /// Set a configuration value
    Set {
        /// Key (dot-separated path)
        key: String,
        /// Value
        value: String,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let result = match &cli.command {
        Commands::Config { action } => run_config(action, cli.json),
        command => run_source_command(command, &cli.source, cli.json).await,
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run_source_command(command: &Commands, source_id: &str, json: bool) -> CliResult {
    let config = load_config().apply_env();
    let registry = SourceRegistry::with_defaults(&config)?;

    if let Commands::Sources = command {
        return run_sources(&registry, json);
    }

    let source = registry.require(source_id)?;
    tracing::debug!("Using source {}", source.id());
    match command {
        Commands::Catalog { page } => print_page(source.get_catalog_list(*page).await, json),
        Commands::Search { query, page } => print_page(source.get_catalog_search(*page, query).await, json),
        Commands::Cover { book_url } => print_optional(source.get_book_cover_image_url(book_url).await, json),
        Commands::Description { book_url } => print_optional(source.get_book_description(book_url).await, json),
        Commands::Chapters { book_url } => run_chapters(&*source, book_url, json).await,
        Commands::Sources | Commands::Config { .. } => Ok(()),
    }
}

fn run_sources(registry: &SourceRegistry, json: bool) -> CliResult {
    let infos: Vec<SourceInfo> = registry.iter().map(|s| SourceInfo::of(&**s)).collect();
    if json {
        println!("{}", serde_json::to_string_pretty(&infos)?);
    } else {
        for info in &infos {
            let language = info.language.map(|l| l.iso639_1()).unwrap_or("-");
            println!("{}\t{}\t{}\t{}", info.id, info.name, language, info.base_url);
        }
    }
    Ok(())
}

async fn run_chapters(source: &dyn CatalogSource, book_url: &str, json: bool) -> CliResult {
    let chapters = source.get_chapter_list(book_url).await.into_result()?;
    if json {
        println!("{}", serde_json::to_string_pretty(&chapters)?);
    } else {
        for (i, chapter) in chapters.iter().enumerate() {
            println!("{:>4}. {}  {}", i + 1, chapter.title, chapter.url);
        }
    }
    Ok(())
}

fn print_page(response: Response<PagedList<BookResult>>, json: bool) -> CliResult {
    let page = response.into_result()?;
    if json {
        println!("{}", serde_json::to_string_pretty(&page)?);
        return Ok(());
    }
    if page.is_empty() {
        println!("No results on page {}", page.index);
    }
    for book in &page.list {
        println!("{}\n  {}", book.title, book.url);
        if let Some(cover) = &book.cover_image_url {
            println!("  cover: {}", cover);
        }
    }
    if page.is_last_page {
        println!("(end of results)");
    } else {
        println!("(more results on page {})", page.index + 1);
    }
    Ok(())
}

fn print_optional<T: Serialize + std::fmt::Display>(response: Response<Option<T>>, json: bool) -> CliResult {
    let value = response.into_result()?;
    if json {
        println!("{}", serde_json::to_string_pretty(&value)?);
    } else {
        match value {
            Some(v) => println!("{}", v),
            None => println!("(none)"),
        }
    }
    Ok(())
}

fn run_config(action: &ConfigAction, json: bool) -> CliResult {
    match action {
        ConfigAction::Init => {
            let path = config_path().ok_or("Could not determine config directory")?;
            save_config(&AppConfig::default(), &path)?;
            println!("Wrote default config to {}", path.display());
        }
        ConfigAction::Show => {
            let cfg = load_config().apply_env();
            if json {
                println!("{}", serde_json::to_string_pretty(&cfg)?);
            } else {
                println!("{}", cfg.to_toml()?);
            }
        }
        ConfigAction::Path => {
            let path = config_path().ok_or("Could not determine config directory")?;
            println!("{}", path.display());
        }
        ConfigAction::Set { key, value } => {
            let path = config_path().ok_or("Could not determine config directory")?;
            let mut cfg = if path.exists() {
                load_config_from(&path)?
            } else {
                AppConfig::default()
            };
            cfg.set_key(key, value)?;
            save_config(&cfg, &path)?;
            if !json {
                println!("Updated {}", key);
            }
        }
    }
    Ok(())
}
