//! CLI command handling for flatten-imports

use crate::discovery::SourceDiscovery;
use crate::store::FsSourceStore;
use anyhow::Context;
use clap::Parser;
use flatten_config::{ConfigOverrides, FlattenConfig};
use flatten_foundation::planning::RewriteReport;
use flatten_lang_typescript::TypeScriptImportSyntax;
use flatten_rewrite::Rewriter;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::warn;

/// Exit status when the configuration is unusable
pub const EXIT_CONFIG_ERROR: u8 = 1;
/// Exit status when at least one file could not be processed
pub const EXIT_FILE_ERRORS: u8 = 2;
/// Exit status when the report could not be written out
pub const EXIT_OUTPUT_ERROR: u8 = 3;

const DRY_RUN_PREFIX: &str = "[Dry Run] ";

/// The main CLI struct.
#[derive(Parser, Debug)]
#[command(name = "flatten-imports")]
#[command(about = "Codemod to replace named imports from barrel files with direct imports")]
#[command(version)]
pub struct Cli {
    /// Comma-separated list of barrel directories (e.g. src/components,src/hooks) [default: src/components]
    #[arg(short, long)]
    pub paths: Option<String>,

    /// Import alias used in code (e.g. @/, ~/) [default: @/]
    #[arg(short, long)]
    pub alias: Option<String>,

    /// Do a dry run without writing changes
    #[arg(long)]
    pub dry: bool,

    /// Project root that include patterns are relative to
    #[arg(long)]
    pub root: Option<PathBuf>,

    /// Glob selecting source files (repeatable) [default: src/**/*.{ts,tsx,js,jsx}]
    #[arg(long = "include")]
    pub include: Vec<String>,

    /// Glob excluding source files (repeatable)
    #[arg(long = "exclude")]
    pub exclude: Vec<String>,

    /// Configuration file (defaults to flatten.toml in the root, if present)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Output format (pretty or json)
    #[arg(long, default_value = "pretty", value_parser = ["pretty", "json"])]
    pub format: String,
}

impl Cli {
    /// Command-line values as configuration overrides
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            paths: self.paths.clone(),
            alias: self.alias.clone(),
            dry_run: self.dry,
            root: self.root.clone(),
            include: self.include.clone(),
            exclude: self.exclude.clone(),
            config_file: self.config.clone(),
            log_level: self.log_level.clone(),
        }
    }
}

/// Main CLI entry point
pub fn run() -> ExitCode {
    execute(Cli::parse())
}

/// Run with already-parsed arguments
pub fn execute(cli: Cli) -> ExitCode {
    let (config, files) = match prepare(&cli) {
        Ok(prepared) => prepared,
        Err(e) => {
            eprintln!("❌ Error: {e:#}");
            return ExitCode::from(EXIT_CONFIG_ERROR);
        }
    };

    if files.is_empty() {
        warn!(root = %config.root.display(), "No source files matched the include patterns");
    }

    let syntax = TypeScriptImportSyntax::new();
    let report = Rewriter::new(&config, &syntax).run(files, &FsSourceStore);
    ExitCode::from(finish(&report, &cli.format))
}

/// Print the report and failures, returning the exit status
fn finish(report: &RewriteReport, format: &str) -> u8 {
    match render_report(report, format) {
        Ok(output) => print!("{output}"),
        Err(e) => {
            eprintln!("❌ Error: {e:#}");
            return EXIT_OUTPUT_ERROR;
        }
    }

    let prefix = dry_prefix(report);
    for failure in &report.failures {
        eprintln!("{prefix}✖ Failed: {}: {}", failure.path.display(), failure.error);
    }

    if report.has_failures() {
        EXIT_FILE_ERRORS
    } else {
        0
    }
}

/// Load configuration, start logging and find the files to process
fn prepare(cli: &Cli) -> anyhow::Result<(FlattenConfig, Vec<PathBuf>)> {
    let config = FlattenConfig::load(&cli.overrides()).context("Invalid configuration")?;
    flatten_config::logging::initialize(&config.logging);

    let discovery = SourceDiscovery::new(&config).context("Invalid file patterns")?;
    let files = discovery.discover();
    Ok((config, files))
}

fn dry_prefix(report: &RewriteReport) -> &'static str {
    if report.dry_run {
        DRY_RUN_PREFIX
    } else {
        ""
    }
}

/// Render the report for stdout
pub fn render_report(report: &RewriteReport, format: &str) -> anyhow::Result<String> {
    if format == "json" {
        let json = serde_json::to_string_pretty(report).context("Failed to serialize report")?;
        return Ok(format!("{json}\n"));
    }

    let prefix = dry_prefix(report);
    let mut output = String::new();
    for file in report.changed_files() {
        output.push_str(&format!("{prefix}✔ Updated: {}\n", file.path.display()));
    }
    output.push_str(&format!(
        "\n{prefix}Done. {} file(s) updated.\n",
        report.touched_files
    ));
    Ok(output)
}
