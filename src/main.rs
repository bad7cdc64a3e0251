use asset_manifest::source::DiskSource;
use asset_manifest::{config, document, output, scan};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// `CARGO_PKG_VERSION` on a release tag, `dev@<hash>` otherwise.
fn version_string() -> &'static str {
    if env!("ON_RELEASE_TAG") == "true" {
        return env!("CARGO_PKG_VERSION");
    }
    match env!("GIT_HASH") {
        "" => "dev@unknown",
        // Leaked once, clap keeps it for the life of the process.
        hash => Box::leak(format!("dev@{hash}").into_boxed_str()),
    }
}

/// Reject filters `EnvFilter` cannot parse instead of silently logging at a
/// different level.
fn parse_log_filter(s: &str) -> Result<String, String> {
    EnvFilter::try_new(s)
        .map(|_| s.to_string())
        .map_err(|e| format!("invalid log filter: {e}"))
}

#[derive(Parser)]
#[command(name = "asset-manifest")]
#[command(about = "Generate manifest.json for a portfolio asset repository")]
#[command(long_about = "\
Generate manifest.json for a portfolio asset repository

Every configured category directory is scanned for slug directories, and
every slug for asset-type directories. Files are listed when their extension
belongs to the directory they are in.

Asset structure:

  <root>/
  ├── assets.toml                  # Optional config (categories, asset types)
  ├── manifest.json                # Generated
  └── projects/                    # Category
      ├── quick_care/              # Slug
      │   ├── logo.png             # Optional logo
      │   ├── screenshots/         # png jpg jpeg gif webp
      │   ├── videos/              # mp4 mkv avi mov webm
      │   ├── pdfs/                # pdf
      │   └── installers/          # apk exe dmg msi deb rpm
      └── empty_proj/              # No assets = not in the manifest

The manifest is only rewritten when its contents change.

Run 'asset-manifest gen-config' to print a documented assets.toml.")]
#[command(version = version_string())]
struct Cli {
    /// Asset root containing the category directories
    #[arg(long, default_value = ".", global = true)]
    root: PathBuf,

    /// Manifest path [default: <root>/manifest.json]
    #[arg(long, global = true)]
    output: Option<PathBuf>,

    /// Config file [default: <root>/assets.toml if present]
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log filter for diagnostics on stderr (e.g. "debug", "asset_manifest=trace")
    #[arg(long, default_value = "warn", global = true, value_parser = parse_log_filter)]
    log_level: String,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Clone, Copy)]
enum Command {
    /// Scan the asset root and write the manifest if it changed (default)
    Generate,
    /// Scan and compare with the manifest on disk; exit 1 if it is stale
    Check,
    /// Print a stock assets.toml with all options documented
    GenConfig,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = EnvFilter::new(&cli.log_level);
    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    match run(&cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<ExitCode, Box<dyn std::error::Error>> {
    let output_path = cli
        .output
        .clone()
        .unwrap_or_else(|| cli.root.join(document::MANIFEST_FILENAME));

    match cli.command.unwrap_or(Command::Generate) {
        Command::Generate => {
            let manifest = scan_root(cli)?;
            let doc = document::serialize(&manifest)?;
            let changed = document::write_if_changed(&output_path, &doc)?;
            output::print_generate_output(&manifest, &output_path, changed);
        }
        Command::Check => {
            let manifest = scan_root(cli)?;
            let doc = document::serialize(&manifest)?;
            let up_to_date = document::is_up_to_date(&output_path, &doc)?;
            let previous = if up_to_date {
                None
            } else {
                load_previous(&output_path)
            };
            output::print_check_output(previous.as_ref(), &manifest, &output_path, up_to_date);
            if !up_to_date {
                return Ok(ExitCode::FAILURE);
            }
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn scan_root(cli: &Cli) -> Result<asset_manifest::types::Manifest, Box<dyn std::error::Error>> {
    let config = config::load_config(&cli.root, cli.config.as_deref())?;
    debug!(
        "scanning {} ({} categories, {} asset types)",
        cli.root.display(),
        config.categories.len(),
        config.asset_types.len()
    );
    if !cli.root.is_dir() {
        warn!("asset root {} is not a directory", cli.root.display());
    }
    Ok(scan::build_manifest(&DiskSource, &config, &cli.root)?)
}

/// The manifest currently on disk, if it exists and parses.
fn load_previous(path: &Path) -> Option<asset_manifest::types::Manifest> {
    let bytes = document::read_existing(path).ok()??;
    match document::parse(&bytes) {
        Ok(manifest) => Some(manifest),
        Err(e) => {
            warn!("existing {} does not parse: {}", path.display(), e);
            None
        }
    }
}
