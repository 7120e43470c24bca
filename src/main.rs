use clap::Parser;
use colored::Colorize;
use miette::Result;
use std::path::PathBuf;
use tracing::{info, warn};

mod config;
mod corelist;
mod discovery;
mod extract;
mod manifest;
mod module_name;
mod reconcile;
mod report;

use config::{Config, Style};
use corelist::CoreBaseline;
use discovery::FileFinder;
use manifest::{Manifest, ManifestError};
use report::{ReportFormat, Reporter};

/// depaudit - audit a Perl project's META.yml against actual module usage
#[derive(Parser, Debug)]
#[command(name = "depaudit")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the project directory to audit
    #[arg(default_value = ".")]
    path: PathBuf,

    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Extraction style (DEPAUDIT_STYLE overrides this)
    #[arg(short, long, value_enum)]
    style: Option<Style>,

    /// Namespace prefixes to leave out of reconciliation
    /// (can be specified multiple times)
    #[arg(short, long)]
    exclude: Vec<String>,

    /// Runtime root directories, relative to the project
    /// (can be specified multiple times; default: lib, bin)
    #[arg(long, value_name = "DIR")]
    lib_root: Vec<String>,

    /// Build/test root directories (default: t)
    #[arg(long, value_name = "DIR")]
    test_root: Vec<String>,

    /// Perl release whose bundled modules need no declaration
    #[arg(long, value_name = "RELEASE")]
    baseline_perl: Option<String>,

    /// Interpreter command for the heavy strategy
    #[arg(long, value_name = "CMD")]
    perl: Option<String>,

    /// Output format (default: terminal, or the config file's setting)
    #[arg(short, long, value_enum)]
    format: Option<ReportFormat>,

    /// Output file (for json format)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// List passing modules too, not only failures
    #[arg(long)]
    show_passes: bool,

    /// Extract from files in parallel
    #[arg(long)]
    parallel: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Quiet mode - only output results
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose, cli.quiet);

    info!("depaudit v{}", env!("CARGO_PKG_VERSION"));

    let config = load_config(&cli)?;
    let verdicts = run_audit(&config, &cli)?;

    if verdicts.iter().any(|v| v.is_fail()) {
        std::process::exit(1);
    }
    Ok(())
}

fn init_logging(verbose: bool, quiet: bool) {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = if quiet {
        EnvFilter::new("error")
    } else if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(cli: &Cli) -> Result<Config> {
    let mut config = if let Some(config_path) = &cli.config {
        Config::from_file(config_path)?
    } else {
        Config::from_default_locations(&cli.path)?
    };

    // Override with CLI arguments
    if let Some(style) = cli.style {
        config.style = style.as_str().to_string();
    }
    if !cli.exclude.is_empty() {
        config.exclude.extend(cli.exclude.clone());
    }
    if !cli.lib_root.is_empty() {
        config.runtime_roots = cli.lib_root.clone();
    }
    if !cli.test_root.is_empty() {
        config.build_roots = cli.test_root.clone();
    }
    if let Some(baseline) = &cli.baseline_perl {
        config.baseline = baseline.clone();
    }
    if let Some(perl) = &cli.perl {
        config.perl_command = perl.clone();
    }

    Ok(config)
}

fn run_audit(config: &Config, cli: &Cli) -> Result<Vec<reconcile::Verdict>> {
    use std::time::Instant;

    let start_time = Instant::now();

    // Configuration validation is fatal before any scanning happens
    let exclusions = config.exclusion_spec().map_err(|e| miette::miette!("{e}"))?;
    let baseline = CoreBaseline::new(
        config
            .baseline_release()
            .map_err(|e| miette::miette!("{e}"))?,
    );
    let style = config.resolved_style();
    info!("Extraction style: {}", style.as_str());

    // Step 1: Discover files under the conventional roots
    let finder = FileFinder::new(config);
    let files = finder.discover(&cli.path);
    info!("Found {} files to analyze", files.len());

    // Step 2: Extract module usage per role
    let extractor = extract::extractor_for(style, config);
    let (used_runtime, used_build) =
        extract::collect_usage(extractor.as_ref(), &files, cli.parallel, !cli.quiet)
            .map_err(|e| miette::miette!("{e}"))?;

    info!(
        "Extracted {} runtime / {} build-only modules",
        used_runtime.len(),
        used_build.len()
    );

    // Step 3: Load the declared manifest; its absence flows into the
    // engine as a distinguished state, not an empty manifest
    let manifest = match Manifest::load(&cli.path) {
        Ok(manifest) => Some(manifest),
        Err(ManifestError::NotFound) => None,
        Err(e) => {
            warn!("{e}");
            None
        }
    };

    // Step 4: Reconcile
    let verdicts = reconcile::reconcile(
        &used_runtime,
        &used_build,
        manifest.as_ref(),
        &exclusions,
        &baseline,
    );

    // Step 5: Report
    let format = cli.format.clone().unwrap_or_else(|| {
        ReportFormat::from_name(&config.report.format).unwrap_or_default()
    });
    let reporter = Reporter::new(format, cli.output.clone())
        .with_passes(cli.show_passes || config.report.show_passes);
    reporter.report(&verdicts)?;

    let elapsed = start_time.elapsed();
    if !cli.quiet {
        eprintln!(
            "{}",
            format!(
                "Audited {} files in {:.2}s",
                files.len(),
                elapsed.as_secs_f64()
            )
            .dimmed()
        );
    }

    Ok(verdicts)
}
