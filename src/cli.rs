// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// Subcommands:
// - get: fetch a sitemap (or index) URL and print every page URL
// - parse: parse a local <urlset> file
// - parse-index: parse a local <sitemapindex> file without fetching children
// =============================================================================

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "sitemap-resolver",
    version,
    about = "Fetch XML sitemaps and flatten sitemap indexes into one URL list",
    long_about = "sitemap-resolver downloads a sitemap or sitemap index. Indexes are followed \
                  recursively, with a pause between child fetches, and every page URL is printed."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fetch a sitemap or sitemap index and list every page URL
    ///
    /// Example: sitemap-resolver get https://example.com/sitemap.xml --interval-ms 500
    Get {
        /// Sitemap or sitemap index URL
        url: String,

        #[command(flatten)]
        fetch: FetchArgs,

        /// Output results in JSON format instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Parse a local sitemap file (<urlset>)
    Parse {
        /// Path to the XML file
        file: PathBuf,

        /// Output results in JSON format instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Parse a local sitemap index file (<sitemapindex>) without fetching children
    ParseIndex {
        /// Path to the XML file
        file: PathBuf,

        /// Output results in JSON format instead of a table
        #[arg(long)]
        json: bool,
    },
}

/// Settings for the `get` subcommand. Flags override the config file.
#[derive(Args, Debug, Default)]
pub struct FetchArgs {
    /// JSON config file (interval_ms, timeout_ms, user_agent, max_depth)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Pause between child sitemap fetches, in milliseconds
    #[arg(long)]
    pub interval_ms: Option<u64>,

    /// Per-request timeout, in milliseconds
    #[arg(long)]
    pub timeout_ms: Option<u64>,

    /// Maximum sitemap index nesting
    #[arg(long)]
    pub max_depth: Option<usize>,

    /// Total attempts per document for transient failures (1 = no retry)
    #[arg(long, default_value_t = 1)]
    pub attempts: usize,
}
