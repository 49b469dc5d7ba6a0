use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use taps_tools::batch::{self, BatchOptions, Operation};
use taps_tools::locale::{decide, LocaleConfig};

/// Asset directory of the website, relative to the project root
const DEFAULT_ASSET_DIR: &str = "public/lottie";

#[derive(Parser)]
#[command(name = "taps-tools")]
#[command(version, about = "Lottie asset cleanup and locale routing checks")]
#[command(long_about = "Lottie asset cleanup and locale routing checks\n\n\
    Rewrites every lottie-*.json file of the asset directory in place:\n  \
    taps-tools clean [DIR]    remove text layers and embedded fonts\n  \
    taps-tools whiten [DIR]   turn every fill and stroke opaque white\n\n\
    Shows what the locale middleware does with request paths:\n  \
    taps-tools route /about /ar/contact")]
struct Cli {
    /// Verbose output for debugging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Remove text layers and chars/fonts tables from every lottie-*.json file
    Clean(AssetArgs),

    /// Replace every fill and stroke color with opaque white in every lottie-*.json file
    Whiten(AssetArgs),

    /// Print the routing decision for request paths
    Route {
        /// Request paths, e.g. /about
        #[arg(required = true)]
        paths: Vec<String>,

        /// JSON file with {"locales": [...], "defaultLocale": "..."}
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Supported locale (repeatable), overrides the config file
        #[arg(short, long = "locale")]
        locales: Vec<String>,

        /// Locale used for redirects, overrides the config file
        #[arg(short, long)]
        default_locale: Option<String>,
    },
}

#[derive(Args)]
struct AssetArgs {
    /// Directory holding the lottie-*.json files
    #[arg(default_value = DEFAULT_ASSET_DIR)]
    dir: PathBuf,

    /// Pretty-print the rewritten JSON (default is compact)
    #[arg(long)]
    pretty: bool,

    /// Transform every file without writing anything back
    #[arg(long)]
    dry_run: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "taps_tools=debug" } else { "taps_tools=warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Clean(args) => run_batch(args, Operation::Clean),
        Commands::Whiten(args) => run_batch(args, Operation::Whiten),
        Commands::Route {
            paths,
            config,
            locales,
            default_locale,
        } => {
            let config = load_locale_config(config, locales, default_locale)?;
            for path in paths {
                println!("{} -> {}", path, decide(&path, &config));
            }
            Ok(())
        }
    }
}

/// Process one asset directory; only an unreadable directory is an error
fn run_batch(args: AssetArgs, operation: Operation) -> Result<()> {
    let options = BatchOptions {
        pretty: args.pretty,
        dry_run: args.dry_run,
    };

    let report = batch::run(&args.dir, operation, &options)
        .with_context(|| format!("Failed to process assets in {}", args.dir.display()))?;

    for outcome in &report.outcomes {
        let line = outcome.message(report.operation);
        if outcome.result.is_ok() {
            println!("{}", line);
        } else {
            eprintln!("{}", line);
        }
    }

    Ok(())
}

fn load_locale_config(
    file: Option<PathBuf>,
    locales: Vec<String>,
    default_locale: Option<String>,
) -> Result<LocaleConfig> {
    let config = match file {
        Some(path) => LocaleConfig::from_file(&path)
            .with_context(|| format!("Failed to load locale config: {}", path.display()))?,
        None => LocaleConfig::default(),
    }
    .with_overrides(locales, default_locale);

    config.validate().context("Invalid locale settings")?;
    Ok(config)
}
