use std::path::PathBuf;

use anyhow::Result;
use clap::{ArgAction, Parser, ValueEnum};
use log::{debug, LevelFilter};
use markdown_toc::{default_sort_key, write_output, ExitCode, TableOfContents, TocError};
use markdown_toc_config::{Config, LoadOptions, TocConfig};
use simple_logger::SimpleLogger;

/// Entry point for CLI execution. Returns the desired exit code.
pub fn run() -> Result<i32> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut load = LoadOptions::default();
    if let Some(path) = &cli.config {
        load = load.with_override_path(path);
    }
    let config = Config::load(load)?;
    debug!("configuration layers: {:?}", config.sources.layers);

    match execute(&cli, &config) {
        Ok(()) => Ok(ExitCode::Success as i32),
        Err(Failure::Toc(err)) => {
            eprintln!("markdown-toc error: {err}");
            Ok(err.exit_code() as i32)
        }
        Err(Failure::Other(err)) => Err(err),
    }
}

enum Failure {
    Toc(TocError),
    Other(anyhow::Error),
}

impl From<TocError> for Failure {
    fn from(err: TocError) -> Self {
        Failure::Toc(err)
    }
}

impl From<serde_json::Error> for Failure {
    fn from(err: serde_json::Error) -> Self {
        Failure::Other(err.into())
    }
}

fn execute(cli: &Cli, config: &Config) -> Result<(), Failure> {
    let toc_config = resolve_toc_config(cli, &config.toc);

    let toc = if cli.files.is_empty() {
        let pattern = cli
            .pattern
            .as_deref()
            .unwrap_or_else(|| config.discovery.pattern.original());
        TableOfContents::discover(
            &config.sources.working_directory,
            pattern,
            toc_config,
            default_sort_key,
        )?
    } else {
        TableOfContents::new(cli.files.clone(), toc_config)
            .with_base(&config.sources.working_directory)
    };

    let destination = cli.output.clone().or_else(|| config.discovery.output.clone());

    match (cli.format, destination) {
        (OutputFormat::Markdown, Some(path)) => toc.save_to(path)?,
        (OutputFormat::Markdown, None) => emit(&toc.render()?),
        (OutputFormat::Json, destination) => {
            let payload = serde_json::to_string_pretty(&toc.entries()?)?;
            match destination {
                Some(path) => write_output(&path, &payload)?,
                None => emit(&payload),
            }
        }
    }

    Ok(())
}

fn resolve_toc_config(cli: &Cli, base: &TocConfig) -> TocConfig {
    TocConfig {
        title: cli.title.clone().unwrap_or_else(|| base.title.clone()),
        max_depth: cli.max_depth.map_or(base.max_depth, |depth| depth as usize),
        indent_width: cli
            .indent_width
            .map_or(base.indent_width, |width| width as usize),
    }
}

fn emit(content: &str) {
    print!("{}", content);
    if !content.ends_with('\n') {
        println!();
    }
}

fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    };
    let _ = SimpleLogger::new().with_level(level).init();
}

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Generate a linked table of contents from markdown headings"
)]
struct Cli {
    /// Markdown files in the order they should appear (default: discover)
    #[arg(value_name = "FILE")]
    files: Vec<PathBuf>,
    /// Glob used to discover files when none are given
    #[arg(long, value_name = "GLOB")]
    pattern: Option<String>,
    /// Title of the generated list
    #[arg(long)]
    title: Option<String>,
    /// Deepest heading level to include
    #[arg(long = "max-depth", value_parser = clap::value_parser!(u64).range(1..))]
    max_depth: Option<u64>,
    /// Spaces of indentation per nesting level
    #[arg(long = "indent-width", value_parser = clap::value_parser!(u64).range(1..))]
    indent_width: Option<u64>,
    /// Use this config file on top of discovered ones
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Write the result to a file instead of stdout
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,
    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Markdown)]
    format: OutputFormat,
    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Markdown,
    Json,
}
