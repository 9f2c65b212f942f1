use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing_subscriber::EnvFilter;

use eldeps::core::{build_graph, missing_dependencies, DependencyMap, PackageScanner};
use eldeps::formatters::{DotFormatter, JsonFormatter, TextFormatter};
use eldeps::metadata::config::load_metadata;
use eldeps::metadata::Metadata;
use eldeps::render::{DotSourceRenderer, GraphRenderer, GraphvizRenderer, ImageFormat};

#[derive(Debug, Clone, Parser)]
#[command(
    name = "eldeps",
    version,
    about = "Analyze Emacs package dependencies from a repository directory"
)]
struct Cli {
    /// TOML file overriding descriptions, categories, builtins or the title
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Clone, Subcommand)]
enum Command {
    /// Print the dependencies declared by each package
    Deps {
        #[command(flatten)]
        scan: ScanArgs,

        /// Output format for the dependencies
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        output_format: OutputFormat,
    },
    /// Render the dependencies as a categorized Graphviz diagram
    Graph {
        #[command(flatten)]
        scan: ScanArgs,

        /// Graph source file; the image is written next to it with the format's extension
        #[arg(short, long, value_name = "FILE", default_value = "emacs-package-dependencies")]
        output: PathBuf,

        /// Emacs version whose builtin packages are shaded
        #[arg(long, value_name = "VERSION")]
        emacs_version: Option<String>,

        /// Add package descriptions to node labels
        #[arg(long)]
        show_descriptions: bool,

        /// Image format produced by Graphviz
        #[arg(long, value_enum, default_value_t = ImageFormat::Png)]
        image_format: ImageFormat,

        /// Only write the DOT source, do not run Graphviz
        #[arg(long)]
        dot_only: bool,
    },
    /// List dependencies that are neither scanned packages nor builtins
    Missing {
        #[command(flatten)]
        scan: ScanArgs,

        /// Emacs version whose builtin packages count as installed
        #[arg(long, value_name = "VERSION")]
        emacs_version: Option<String>,
    },
}

#[derive(Debug, Clone, Args)]
struct ScanArgs {
    /// Path to the Emacs package repository directory
    #[arg(long, value_name = "PATH")]
    repo_path: PathBuf,

    /// Search every .el file instead of only each package's main file
    #[arg(long)]
    all_files: bool,
}

impl ScanArgs {
    fn scan(&self) -> Result<DependencyMap> {
        let start = Instant::now();
        let scanner = PackageScanner::new().with_main_file_only(!self.all_files);
        let deps = scanner
            .scan(&self.repo_path)
            .with_context(|| format!("Failed to scan {}", self.repo_path.display()))?;
        tracing::info!(
            "Scanned {} packages in {:.2}s",
            deps.len(),
            start.elapsed().as_secs_f64()
        );
        Ok(deps)
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, ValueEnum)]
#[value(rename_all = "kebab-case")]
enum OutputFormat {
    Text,
    Json,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    run(cli)
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let Cli {
        config, command, ..
    } = cli;

    let metadata = load_metadata(config.as_deref(), Path::new("."))
        .context("Failed to load metadata configuration")?;

    match command {
        Command::Deps {
            scan,
            output_format,
        } => {
            let deps = scan.scan()?;
            match output_format {
                OutputFormat::Text => print!("{}", TextFormatter::new().format(&deps)),
                OutputFormat::Json => println!("{}", JsonFormatter::new().format(&deps)?),
            }
        }
        Command::Graph {
            scan,
            output,
            emacs_version,
            show_descriptions,
            image_format,
            dot_only,
        } => {
            // Reject an unknown version before touching the repository.
            let builtins = select_builtins(&metadata, emacs_version.as_deref())?;
            let deps = scan.scan()?;

            let title = metadata
                .title
                .render_today(&scan.repo_path.display().to_string());
            let graph = build_graph(
                &deps,
                &metadata.catalog,
                &builtins,
                show_descriptions,
                title,
            );
            let dot = DotFormatter::new().format(&graph);

            let renderer: Box<dyn GraphRenderer> = if dot_only {
                Box::new(DotSourceRenderer)
            } else {
                Box::new(GraphvizRenderer::new(image_format))
            };
            let written = renderer
                .render(&dot, &output)
                .context("Failed to render dependency graph")?;
            println!("Graph written to {}", written.display());
        }
        Command::Missing {
            scan,
            emacs_version,
        } => {
            let builtins = select_builtins(&metadata, emacs_version.as_deref())?;
            let deps = scan.scan()?;
            let missing = missing_dependencies(&deps, &builtins);
            print!("{}", TextFormatter::new().format_missing(&missing));
        }
    }

    Ok(())
}

fn select_builtins(
    metadata: &Metadata,
    requested: Option<&str>,
) -> Result<std::collections::BTreeSet<String>> {
    let version = match requested {
        Some(version) => version,
        None => metadata
            .builtins
            .latest_version()
            .context("No Emacs versions are configured in the builtin registry")?,
    };
    let builtins = metadata.builtins.validate_version(version)?;
    tracing::debug!(version, builtins = builtins.len(), "selected builtin set");
    Ok(builtins.clone())
}
