use clap::Parser;
use colored::Colorize;
use miette::{IntoDiagnostic, Result};
use std::path::PathBuf;
use tracing::info;

use searchlabels::{
    ComponentCatalog, Config, FileFinder, LabelEditor, LabelUpdate, MergeSession, QueryFilter,
    Reporter, SharedFileIndex,
};

/// searchlabels - index, query and edit localized UI labels across components
#[derive(Parser, Debug)]
#[command(name = "searchlabels")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the project directory holding the component catalog
    #[arg(default_value = ".")]
    path: PathBuf,

    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Only include labels owned by this component
    #[arg(long)]
    component: Option<String>,

    /// Only include labels defined in this resource file
    #[arg(long)]
    file_name: Option<String>,

    /// Label key to inspect
    #[arg(short, long)]
    key: Option<String>,

    /// Locale tag to inspect (dash-separated, e.g. en-US)
    #[arg(short, long)]
    locale: Option<String>,

    /// Suppress keys on the known-unused exception list
    #[arg(long)]
    only_unused: bool,

    /// Set a locale's value for --key in --file-name (repeatable)
    #[arg(long, value_name = "LOCALE=VALUE")]
    set: Vec<String>,

    /// Key-level comment applied together with --set
    #[arg(long)]
    key_comment: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "terminal")]
    format: OutputFormat,

    /// Output file (for json format)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Quiet mode - only output results
    #[arg(short, long)]
    quiet: bool,
}

#[derive(clap::ValueEnum, Clone, Debug, Default)]
enum OutputFormat {
    #[default]
    Terminal,
    Json,
}

impl From<OutputFormat> for searchlabels::ReportFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Terminal => searchlabels::ReportFormat::Terminal,
            OutputFormat::Json => searchlabels::ReportFormat::Json,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    init_logging(cli.verbose, cli.quiet);

    info!("searchlabels v{}", env!("CARGO_PKG_VERSION"));

    // Load configuration
    let config = load_config(&cli)?;

    let filter = QueryFilter {
        component: cli.component.clone(),
        file_name: cli.file_name.clone(),
        key: cli.key.clone(),
        locale: cli.locale.clone(),
        only_unused: cli.only_unused,
    };
    if filter.is_unbounded() {
        miette::bail!(
            "pass at least one of --component, --file-name, --key or --locale; \
             an unparameterized query would load every label file"
        );
    }

    // Build the shared file index and run the query in a fresh session
    let catalog = ComponentCatalog::from_config(&config);
    let finder = FileFinder::new(&config);
    let shared = SharedFileIndex::new();
    let index = shared.get_or_build(&finder, &catalog).into_diagnostic()?;
    info!("Indexed {} label resource files", index.len());

    let mut session = MergeSession::new(index);
    session.query(&filter).into_diagnostic()?;

    // Apply edits, if any
    if !cli.set.is_empty() {
        let update = build_update(&cli)?;
        let written = LabelEditor::new(&mut session).upsert(&update);
        println!(
            "{}",
            format!("{} locale value(s) written", written).green()
        );
    }

    let reporter = Reporter::new(cli.format.clone().into(), cli.output.clone());
    reporter.report(&session, &filter)?;

    Ok(())
}

fn load_config(cli: &Cli) -> Result<Config> {
    match &cli.config {
        Some(path) => Config::from_file(path),
        None => Config::from_default_locations(&cli.path),
    }
}

fn build_update(cli: &Cli) -> Result<LabelUpdate> {
    let key = cli
        .key
        .clone()
        .ok_or_else(|| miette::miette!("--set requires --key"))?;
    let file_name = cli
        .file_name
        .clone()
        .ok_or_else(|| miette::miette!("--set requires --file-name"))?;

    let mut locale_names = Vec::new();
    let mut locale_values = Vec::new();
    for arg in &cli.set {
        let (locale, value) = arg
            .split_once('=')
            .ok_or_else(|| miette::miette!("invalid --set '{arg}': expected LOCALE=VALUE"))?;
        locale_names.push(locale.to_string());
        locale_values.push(value.to_string());
    }

    Ok(LabelUpdate {
        locale_names,
        locale_values,
        locale_comments: None,
        key,
        key_comment: cli.key_comment.clone().unwrap_or_default(),
        file_name,
    })
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

    fmt().with_env_filter(filter).with_target(false).init();
}
