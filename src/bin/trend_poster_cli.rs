//! trend-poster CLI: 按类别分析趋势并生成海报的命令行工具
//!
//! Usage:
//!   trend-poster-cli categories                          List default categories
//!   trend-poster-cli analyze <category>                  Fetch posts and print suggestions
//!   trend-poster-cli poster <category> [--out <file>]    Generate a poster document

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context};
use tracing_subscriber::EnvFilter;
use trend_poster::config::PipelineConfig;
use trend_poster::store::InMemoryTrendStore;
use trend_poster::{TrendPipeline, DEFAULT_CATEGORIES};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        print_usage();
        std::process::exit(1);
    }

    match args[1].as_str() {
        "categories" => cmd_categories(),
        "analyze" => cmd_analyze(&args[2..]).await?,
        "poster" => cmd_poster(&args[2..]).await?,
        "version" | "--version" | "-V" => cmd_version(),
        "help" | "--help" | "-h" => print_usage(),
        other => {
            eprintln!("Unknown command: {other}");
            eprintln!();
            print_usage();
            std::process::exit(1);
        }
    }
    Ok(())
}

fn print_usage() {
    println!(
        r#"trend-poster-cli: 零售趋势海报命令行工具

USAGE:
    trend-poster-cli <COMMAND> [OPTIONS]

COMMANDS:
    categories                      List the default retail categories
    analyze <category>              Fetch posts and print product suggestions
    poster <category> [--out <f>]   Generate a poster (stdout unless --out is given)
    version                         Show version information
    help                            Show this help message

OPTIONS:
    --config <file>                 YAML configuration file

ENVIRONMENT:
    TREND_CONFIG                    YAML configuration file (if --config is absent)
    GEMINI_API_KEY                  Generation service key (keyring entry trend-poster/gemini wins)
    RUST_LOG                        Log filter, default "info""#
    );
}

fn cmd_version() {
    println!("trend-poster-cli {}", env!("CARGO_PKG_VERSION"));
}

fn cmd_categories() {
    for category in DEFAULT_CATEGORIES {
        println!("{category}");
    }
}

fn flag_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.iter()
        .position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .map(String::as_str)
}

/// First argument that is neither a flag nor a flag's value.
fn positional(args: &[String]) -> Option<&str> {
    let mut skip_next = false;
    for arg in args {
        if skip_next {
            skip_next = false;
            continue;
        }
        if arg.starts_with("--") {
            skip_next = true;
            continue;
        }
        return Some(arg);
    }
    None
}

fn build_pipeline(args: &[String]) -> anyhow::Result<TrendPipeline> {
    let config_path = flag_value(args, "--config")
        .map(PathBuf::from)
        .or_else(|| std::env::var("TREND_CONFIG").ok().map(PathBuf::from));
    let config = PipelineConfig::load(config_path.as_deref()).context("loading configuration")?;
    let pipeline = TrendPipeline::from_config(&config, Arc::new(InMemoryTrendStore::new()))
        .context("building pipeline")?;
    Ok(pipeline)
}

async fn cmd_analyze(args: &[String]) -> anyhow::Result<()> {
    let Some(category) = positional(args) else {
        bail!("analyze requires a <category>");
    };
    let pipeline = build_pipeline(args)?;
    let report = pipeline
        .refresh_category(category)
        .await
        .with_context(|| format!("refreshing {category}"))?;

    println!("Category: {}", report.category);
    println!("Posts fetched: {}", report.posts_fetched);
    println!();
    if report.analysis.suggestions.is_empty() {
        println!("{}", report.analysis.narrative_text);
        return Ok(());
    }
    for (i, s) in report.analysis.suggestions.iter().enumerate() {
        println!("{}. {} ({} upvotes)", i + 1, s.product, s.upvotes);
        println!("   from: {}", s.post_title);
    }
    Ok(())
}

async fn cmd_poster(args: &[String]) -> anyhow::Result<()> {
    let Some(category) = positional(args) else {
        bail!("poster requires a <category>");
    };
    let pipeline = build_pipeline(args)?;
    let poster = pipeline
        .publish_poster(category)
        .await
        .with_context(|| format!("publishing poster for {category}"))?;

    match flag_value(args, "--out") {
        Some(path) => {
            std::fs::write(path, &poster.html).with_context(|| format!("writing {path}"))?;
            eprintln!("Wrote {} poster to {}", poster.origin, path);
        }
        None => println!("{}", poster.html),
    }
    Ok(())
}
