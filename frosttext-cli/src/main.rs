//! Frosttext CLI - localized forecast text from numeric risk indicators

#![deny(warnings)]

// Global invariants enforced:
// - Deterministic output ordering
// - Identical input yields byte-for-byte identical output

use anyhow::{anyhow, Context};
use clap::{Parser, Subcommand};
use frosttext_core::config;
use frosttext_core::dictionary::{self, InMemoryDictionary};
use frosttext_core::{generate_report, render_json, render_text, sort_reports, AreaInput, StoryKind};
use indicatif::ProgressBar;
use rayon::prelude::*;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "frosttext")]
#[command(about = "Generate localized weather-risk forecast text from numeric indicators")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate forecast text for a batch of areas
    Generate {
        /// Path to a JSON file with one entry per area
        input: PathBuf,

        /// Which story to generate
        #[arg(long, default_value = "overview")]
        story: StoryArg,

        /// Output language
        #[arg(long, default_value = "fi")]
        lang: String,

        /// Output format
        #[arg(long, default_value = "text")]
        format: OutputFormat,

        /// Path to config file (default: auto-discover)
        #[arg(long)]
        config: Option<PathBuf>,

        /// SQLite phrase bank to use instead of the built-in dictionaries
        #[arg(long)]
        phrase_bank: Option<PathBuf>,
    },
    /// Validate or inspect the configuration
    #[command(name = "config")]
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Validate a config file without generating anything
    Validate {
        /// Path to config file (default: auto-discover from current directory)
        #[arg(long)]
        path: Option<PathBuf>,
    },
    /// Show the resolved configuration (merged defaults + config file)
    Show {
        /// Path to config file (default: auto-discover from current directory)
        #[arg(long)]
        path: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum StoryArg {
    Overview,
    OneNight,
    Probability,
}

impl From<StoryArg> for StoryKind {
    fn from(arg: StoryArg) -> Self {
        match arg {
            StoryArg::Overview => StoryKind::Overview,
            StoryArg::OneNight => StoryKind::OneNight,
            StoryArg::Probability => StoryKind::Probability,
        }
    }
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Generate {
            input,
            story,
            lang,
            format,
            config: config_path,
            phrase_bank,
        } => run_generate(
            &input,
            story.into(),
            &lang,
            format,
            config_path.as_deref(),
            phrase_bank.as_deref(),
        ),
        Commands::Config { action } => match action {
            ConfigAction::Validate { path } => run_config_validate(path.as_deref()),
            ConfigAction::Show { path } => run_config_show(path.as_deref()),
        },
    }
}

fn load_dictionary(lang: &str, phrase_bank: Option<&Path>) -> anyhow::Result<InMemoryDictionary> {
    match phrase_bank {
        Some(path) => dictionary::load_sqlite(path, lang),
        None => dictionary::builtin(lang)
            .ok_or_else(|| anyhow!("no built-in dictionary for language '{}'", lang)),
    }
}

fn run_generate(
    input_path: &Path,
    story: StoryKind,
    lang: &str,
    format: OutputFormat,
    config_path: Option<&Path>,
    phrase_bank: Option<&Path>,
) -> anyhow::Result<()> {
    let cwd = std::env::current_dir().context("failed to resolve working directory")?;
    let resolved = config::load_and_resolve(&cwd, config_path)?;

    let content = std::fs::read_to_string(input_path)
        .with_context(|| format!("failed to read input file: {}", input_path.display()))?;
    let inputs: Vec<AreaInput> = serde_json::from_str(&content)
        .with_context(|| format!("failed to parse input file: {}", input_path.display()))?;

    let dict = load_dictionary(lang, phrase_bank)?;

    let bar = ProgressBar::new(inputs.len() as u64);
    let reports: anyhow::Result<Vec<_>> = inputs
        .par_iter()
        .map(|area| {
            let report = generate_report(area, story, &resolved, &dict);
            bar.inc(1);
            report
        })
        .collect();
    bar.finish_and_clear();

    let reports = sort_reports(reports?);

    match format {
        OutputFormat::Text => print!("{}", render_text(&reports)),
        OutputFormat::Json => println!("{}", render_json(&reports)),
    }

    Ok(())
}

fn run_config_validate(path: Option<&Path>) -> anyhow::Result<()> {
    let cwd = std::env::current_dir().context("failed to resolve working directory")?;
    let resolved = config::load_and_resolve(&cwd, path)?;
    match resolved.config_path {
        Some(source) => println!("Config valid: {}", source.display()),
        None => println!("No config file found; defaults are in effect"),
    }
    Ok(())
}

fn run_config_show(path: Option<&Path>) -> anyhow::Result<()> {
    let cwd = std::env::current_dir().context("failed to resolve working directory")?;
    let resolved = config::load_and_resolve(&cwd, path)?;
    println!("{:#?}", resolved);
    Ok(())
}
