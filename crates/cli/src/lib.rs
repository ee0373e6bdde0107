use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use doctrace_catalog::{CatalogBuilder, CatalogConfig, DirectorySource, SourceCatalog};
use doctrace_navigator::Signal;
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::sync::Arc;

mod config;
mod report;

pub use config::{AppConfig, DEFAULT_CONFIG_FILE};
pub use report::{align_report, resolve_report, split_blocks, AlignReport, ResolveReport, StepReport};

fn print_stdout(text: &str) -> Result<()> {
    use std::io::Write;

    let mut stdout = io::stdout().lock();
    if let Err(err) = stdout
        .write_all(text.as_bytes())
        .and_then(|_| stdout.write_all(b"\n"))
        .and_then(|_| stdout.flush())
    {
        if err.kind() == io::ErrorKind::BrokenPipe {
            return Ok(());
        }
        return Err(err.into());
    }
    Ok(())
}

#[derive(Parser)]
#[command(name = "doctrace")]
#[command(about = "Resolve stack traces against documentation source listings", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Quiet mode: log only warnings/errors (stdout is reserved for JSON)
    #[arg(long, global = true)]
    quiet: bool,

    /// Config file (defaults to ./doctrace.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Catalog the functions listed on a static documentation site
    Catalog(CatalogArgs),

    /// Resolve a trace against a site and step through its frames
    Resolve(ResolveArgs),

    /// Align annotation excerpts with source listings
    Align(AlignArgs),
}

#[derive(Args)]
struct CatalogArgs {
    /// Root directory of the generated site
    #[arg(long)]
    site: PathBuf,
}

#[derive(Args)]
struct ResolveArgs {
    /// Root directory of the generated site
    #[arg(long)]
    site: PathBuf,

    /// Trace file (reads stdin when omitted)
    #[arg(long)]
    trace: Option<PathBuf>,

    /// Navigation signals to replay after opening, comma separated
    #[arg(long, value_enum, value_delimiter = ',')]
    steps: Vec<StepArg>,
}

#[derive(Args)]
struct AlignArgs {
    /// Source listing files, in panel order
    #[arg(long = "source", required = true, num_args = 1..)]
    sources: Vec<PathBuf>,

    /// Annotation file; blank lines separate excerpts
    #[arg(long)]
    excerpts: PathBuf,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum StepArg {
    Next,
    Previous,
}

impl From<StepArg> for Signal {
    fn from(step: StepArg) -> Self {
        match step {
            StepArg::Next => Signal::Next,
            StepArg::Previous => Signal::Previous,
        }
    }
}

pub async fn main_entry() -> Result<()> {
    let cli = Cli::parse();

    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if cli.quiet {
        builder.filter_level(log::LevelFilter::Warn);
    } else if cli.verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.target(env_logger::Target::Stderr).init();

    let config = AppConfig::load(cli.config.as_deref())?;

    let output = match cli.command {
        Commands::Catalog(args) => run_catalog(args, &config).await?,
        Commands::Resolve(args) => run_resolve(args, &config).await?,
        Commands::Align(args) => run_align(args)?,
    };
    print_stdout(&output)
}

async fn load_catalog(site: &Path, config: &CatalogConfig) -> Result<SourceCatalog> {
    if !site.is_dir() {
        bail!("Site directory not found: {}", site.display());
    }
    let builder = CatalogBuilder::new(config.clone())?;
    builder
        .build(&DirectorySource::new(site))
        .await
        .with_context(|| format!("Failed to catalog {}", site.display()))
}

async fn run_catalog(args: CatalogArgs, config: &AppConfig) -> Result<String> {
    let catalog = load_catalog(&args.site, &config.catalog).await?;
    Ok(serde_json::to_string_pretty(&catalog)?)
}

async fn run_resolve(args: ResolveArgs, config: &AppConfig) -> Result<String> {
    let trace = match &args.trace {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("Failed to read trace {}", path.display()))?,
        None => {
            let mut text = String::new();
            io::stdin()
                .read_to_string(&mut text)
                .context("Failed to read trace from stdin")?;
            text
        }
    };

    let catalog = Arc::new(load_catalog(&args.site, &config.catalog).await?);
    let signals: Vec<Signal> = args.steps.into_iter().map(Signal::from).collect();
    let report = resolve_report(&trace, catalog, &config.overlay, &signals)?;
    if report.steps.is_empty() {
        log::warn!("No frame of the trace matched a catalogued function");
    }
    Ok(serde_json::to_string_pretty(&report)?)
}

fn run_align(args: AlignArgs) -> Result<String> {
    let sources = args
        .sources
        .iter()
        .map(|path| {
            fs::read_to_string(path)
                .with_context(|| format!("Failed to read source {}", path.display()))
        })
        .collect::<Result<Vec<_>>>()?;
    let annotations = fs::read_to_string(&args.excerpts)
        .with_context(|| format!("Failed to read excerpts {}", args.excerpts.display()))?;

    let report = align_report(&split_blocks(&annotations), &sources);
    Ok(serde_json::to_string_pretty(&report)?)
}
