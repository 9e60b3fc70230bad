use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use env_logger::Env;
use log::debug;

use yays::config::Config;
use yays::file::loader::load_yaml_file;
use yays::file::saver::{save_yaml_file, serialize_document};
use yays::sort::{apply_all, SortMode};

/// yays - Yet Another YAML Sorter
#[derive(Parser)]
#[command(name = "yays")]
#[command(version)]
#[command(about = "Yet Another Yaml Sorter", long_about = None)]
struct Cli {
    /// Input YAML file path (`.gz` files are decompressed)
    #[arg(short, long, value_name = "FILE")]
    file: PathBuf,

    /// YAML path(s) in dot notation. Bracket selectors [*] and [N] can appear at the
    /// end or mid-path to loop over sequences or mappings with [*], or index
    /// sequences with [N] (e.g. 'items[*].meta', 'servers[0].roles'). At the target,
    /// mappings have their keys sorted and sequences are sorted by the first field
    /// of each element. Repeat -p to process several paths in order.
    #[arg(short = 'p', long = "yaml-path", value_name = "PATH", required = true)]
    yaml_paths: Vec<String>,

    /// Write changes back to the input file instead of printing to stdout
    #[arg(short, long)]
    write: bool,

    /// Sort type for mapping keys: 'alphanumeric' (default) or 'human' (common keys
    /// first, then the rest alphanumeric)
    #[arg(short = 't', long = "sort", value_enum)]
    sort: Option<SortMode>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "info" } else { "warn" };
    env_logger::Builder::from_env(Env::default().default_filter_or(default_filter)).init();

    // CLI flags override config values
    let config = Config::load();
    let mode = cli.sort.unwrap_or(config.sort);
    debug!("sorting {} with mode {}", cli.file.display(), mode);

    let loaded = load_yaml_file(&cli.file)
        .with_context(|| format!("Failed to load {}", cli.file.display()))?;
    let indent = config.effective_indent(loaded.indent);
    let mut document = loaded.document;

    let requests: Vec<(&str, SortMode)> = cli
        .yaml_paths
        .iter()
        .map(|path| (path.as_str(), mode))
        .collect();
    apply_all(&mut document, &requests)?;

    if cli.verbose || !cli.write {
        let yaml = serialize_document(&document, indent);
        let mut stdout = io::stdout().lock();
        stdout
            .write_all(yaml.as_bytes())
            .and_then(|_| stdout.flush())
            .context("Failed to write to stdout")?;
    }

    if cli.write {
        save_yaml_file(&cli.file, &document, indent, &config)
            .with_context(|| format!("Failed to write {}", cli.file.display()))?;
    }

    Ok(())
}
