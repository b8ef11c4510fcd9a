// src/main.rs
// =============================================================================
// This is the entry point of the sitemap-resolver CLI.
//
// What happens here:
// 1. Set up logging (RUST_LOG controls it, logs go to stderr)
// 2. Parse command-line arguments using clap
// 3. Dispatch to the subcommand handler, which calls into the library
// 4. Print results and exit with a proper code
//    (0 = success, 1 = sitemap could not be resolved, 2 = usage/config error)
// =============================================================================

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use std::fs;
use std::path::Path;
use std::time::Duration;
use tracing::error;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands, FetchArgs};
use sitemap_resolver::fetch::{HttpFetcher, RetryFetcher};
use sitemap_resolver::{Resolver, ResolverConfig, Sitemap, SitemapIndex};

#[tokio::main]
async fn main() {
    init_logging();

    let exit_code = match run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("sitemap_resolver=info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

// Returns:
//   Ok(0) = printed a sitemap or index
//   Ok(1) = fetching/parsing/resolving failed
//   Err   = bad arguments, unreadable file or config
async fn run() -> Result<i32> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Get { url, fetch, json } => handle_get(&url, &fetch, json).await,
        Commands::Parse { file, json } => {
            let data = read_file(&file)?;
            report(sitemap_resolver::parse(&data), |sitemap| print_sitemap(sitemap, json))
        }
        Commands::ParseIndex { file, json } => {
            let data = read_file(&file)?;
            report(sitemap_resolver::parse_index(&data), |index| print_index(index, json))
        }
    }
}

async fn handle_get(url: &str, args: &FetchArgs, json: bool) -> Result<i32> {
    let config = load_config(args)?;
    let http = HttpFetcher::new(&config).context("failed to build HTTP client")?;

    let resolver = if args.attempts > 1 {
        Resolver::with_fetcher(RetryFetcher::new(http, args.attempts), config)
    } else {
        Resolver::with_fetcher(http, config)
    };

    eprintln!("🔍 Resolving sitemap: {}", url);
    report(resolver.get(url).await, |sitemap| print_sitemap(sitemap, json))
}

// Library errors are an expected outcome (exit 1), printing failures are not
fn report<T>(
    result: sitemap_resolver::Result<T>,
    print: impl FnOnce(&T) -> Result<()>,
) -> Result<i32> {
    match result {
        Ok(value) => {
            print(&value)?;
            Ok(0)
        }
        Err(e) => {
            error!(stage = e.stage(), "{}", e);
            eprintln!("❌ {} failed: {}", e.stage(), e);
            Ok(1)
        }
    }
}

// Layers: defaults < config file < command-line flags
fn load_config(args: &FetchArgs) -> Result<ResolverConfig> {
    let mut config = match &args.config {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("failed to read config file {}", path.display()))?;
            ResolverConfig::from_json(&text)
                .with_context(|| format!("invalid config file {}", path.display()))?
        }
        None => ResolverConfig::default(),
    };

    if let Some(ms) = args.interval_ms {
        config.interval = Duration::from_millis(ms);
    }
    if let Some(ms) = args.timeout_ms {
        config.timeout = Duration::from_millis(ms);
    }
    if let Some(depth) = args.max_depth {
        config.max_depth = depth;
    }

    Ok(config)
}

fn read_file(path: &Path) -> Result<Vec<u8>> {
    fs::read(path).with_context(|| format!("failed to read {}", path.display()))
}

fn print_sitemap(sitemap: &Sitemap, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(sitemap)?);
        return Ok(());
    }

    println!("{:<60} {:<26} {:<10} {:<8}", "LOCATION", "LASTMOD", "CHANGEFREQ", "PRIORITY");
    println!("{}", "=".repeat(107));

    for entry in sitemap.iter() {
        let priority = entry.priority.map(|p| format!("{:.1}", p)).unwrap_or_default();
        println!(
            "{:<60} {:<26} {:<10} {:<8}",
            truncate(&entry.location, 57),
            entry.last_modified.as_deref().unwrap_or(""),
            entry.change_frequency.as_deref().unwrap_or(""),
            priority
        );
    }

    println!();
    println!("📊 Summary:");
    println!("   📋 URLs: {}", sitemap.len());
    Ok(())
}

fn print_index(index: &SitemapIndex, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(index)?);
        return Ok(());
    }

    println!("{:<80} {:<26}", "SITEMAP", "LASTMOD");
    println!("{}", "=".repeat(107));

    for child in &index.children {
        println!(
            "{:<80} {:<26}",
            truncate(&child.location, 77),
            child.last_modified.as_deref().unwrap_or("")
        );
    }

    println!();
    println!("📊 Summary:");
    println!("   🗂️  Child sitemaps: {}", index.len());
    Ok(())
}

// Shortens long URLs for the table, on a char boundary
fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() > max {
        format!("{}...", text.chars().take(max).collect::<String>())
    } else {
        text.to_string()
    }
}
