//! Assetrules CLI
//!
//! Inspect rules, resolve settings for a path, and preprocess asset folders.

use anyhow::{Context, Result, bail};
use clap::Parser;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use assetrules::{
    Config, Preprocessor, ProcessOutcome, Resolver, SettingsMerger, SidecarBackend, Watcher,
    expand_path, watcher::collect_files,
};

#[derive(Parser, Debug)]
#[command(name = "assetrules")]
#[command(author, version, about = "Rule-based asset import configuration")]
struct Cli {
    /// Path to config file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::ValueEnum, Debug, Clone, Copy, Default)]
enum Format {
    #[default]
    Toml,
    Json,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// List all rules in precedence order
    List,

    /// Validate config file
    Check,

    /// Show which rules match a path and the settings they produce
    Resolve {
        /// Asset path, e.g. Assets/UI/icon.png
        path: String,

        /// Output format for the effective settings
        #[arg(short, long, value_enum, default_value_t)]
        format: Format,
    },

    /// Preprocess new assets in a folder (dry-run by default)
    Run {
        /// Actually write import settings (not just dry-run)
        #[arg(long)]
        apply: bool,

        /// Target directory to process
        #[arg(short, long)]
        dir: Option<PathBuf>,
    },

    /// Watch configured folders and preprocess assets as they appear
    Watch,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load(cli.config.as_deref())?;

    // Initialize logging
    let log_level = if cli.verbose {
        "debug"
    } else {
        config.general.log_level.as_str()
    };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("ASSETRULES_LOG").unwrap_or_else(|_| log_level.to_string()),
        ))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    match cli.command {
        Commands::List => list(&config),
        Commands::Check => match config.validate() {
            Ok(()) => {
                println!("✓ Config is valid");
                println!("  {} watch paths", config.watches.len());
                println!("  {} rules", config.rules.len());
            }
            Err(e) => {
                eprintln!("✗ Config error: {:#}", e);
                std::process::exit(1);
            }
        },
        Commands::Resolve { path, format } => resolve(&config, &path, format)?,
        Commands::Run { apply, dir } => run(&config, apply, dir)?,
        Commands::Watch => watch(config).await?,
    }

    Ok(())
}

fn list(config: &Config) {
    println!("Rules:");
    for (i, rule) in config.rules.iter().enumerate() {
        let predicates: Vec<String> = rule.predicates.iter().map(ToString::to_string).collect();
        let filter = if predicates.is_empty() {
            "any asset".to_string()
        } else {
            predicates.join(" and ")
        };

        let settings = &rule.settings;
        let groups: Vec<&str> = [
            ("texture", settings.texture.enabled),
            ("model", settings.model.enabled),
            ("audio", settings.audio.enabled),
        ]
        .into_iter()
        .filter_map(|(name, enabled)| enabled.then_some(name))
        .collect();

        println!("  [{}] {}: {} -> {}", i + 1, rule.name, filter, groups.join(", "));
    }
}

fn resolve(config: &Config, path: &str, format: Format) -> Result<()> {
    let report = render_resolution(config, path, format)?;

    // JSON output stays parseable on stdout; the rule listing goes to stderr
    match format {
        Format::Toml => print!("{}", report.summary),
        Format::Json => eprint!("{}", report.summary),
    }
    if let Some(settings) = report.settings {
        println!("{}", settings);
    }
    Ok(())
}

/// Human-readable match listing plus the rendered effective settings
struct ResolutionReport {
    summary: String,
    settings: Option<String>,
}

fn render_resolution(config: &Config, path: &str, format: Format) -> Result<ResolutionReport> {
    let rules = config.rule_set();
    let resolution = Resolver::resolve_report(&rules, path);

    let mut summary = String::new();
    for (index, error) in &resolution.rejected {
        summary.push_str(&format!("  skipped rule #{}: {}\n", index + 1, error));
    }
    summary.push_str("Matched rules:\n");
    for &index in &resolution.matched {
        if let Some(rule) = rules.get(index) {
            summary.push_str(&format!("  [{}] {}\n", index + 1, rule.name));
        }
    }

    let effective = SettingsMerger::merge(&rules, &resolution.matched);
    let settings = match format {
        Format::Toml if effective.is_empty() => {
            summary.push_str("No settings overridden\n");
            None
        }
        Format::Toml => {
            Some(toml::to_string_pretty(&effective).context("Failed to render settings")?)
        }
        Format::Json => {
            Some(serde_json::to_string_pretty(&effective).context("Failed to render settings")?)
        }
    };

    Ok(ResolutionReport { summary, settings })
}

fn preprocessor(config: &Config) -> Preprocessor<SidecarBackend> {
    let preprocessor = Preprocessor::new(config.rule_set(), SidecarBackend::new());
    match &config.general.asset_root {
        Some(root) => preprocessor.with_root(expand_path(root)),
        None => preprocessor,
    }
}

fn run(config: &Config, apply: bool, dir: Option<PathBuf>) -> Result<()> {
    let dirs: Vec<(PathBuf, bool)> = match dir {
        Some(d) => vec![(d, true)],
        None => config
            .watches
            .iter()
            .map(|w| (expand_path(&w.path), w.recursive))
            .collect(),
    };
    if dirs.is_empty() {
        bail!("No directory given and no watch folders configured");
    }

    let mut preprocessor = preprocessor(config);
    for (dir, recursive) in dirs {
        println!("Processing: {}", dir.display());
        for path in collect_files(&dir, recursive)? {
            if apply {
                if let ProcessOutcome::Resolved {
                    category,
                    matched,
                    applied: true,
                } = preprocessor.process(&path)?
                {
                    println!(
                        "  Applied {} settings: {} ({})",
                        category,
                        path.display(),
                        matched.join(", ")
                    );
                }
            } else {
                dry_run(&preprocessor, &path);
            }
        }
    }

    Ok(())
}

fn dry_run(preprocessor: &Preprocessor<SidecarBackend>, path: &Path) {
    if let ProcessOutcome::Resolved {
        category,
        matched,
        applied: true,
    } = preprocessor.plan(path)
    {
        println!(
            "  [dry-run] {} settings: {} ({})",
            category,
            path.display(),
            matched.join(", ")
        );
    }
}

async fn watch(config: Config) -> Result<()> {
    if config.watches.is_empty() {
        bail!("No watch folders configured");
    }
    if let Err(e) = config.validate() {
        tracing::warn!("{:#}", e);
    }

    let mut watcher = Watcher::new(
        preprocessor(&config),
        config.general.polling_interval_secs,
        config.general.debounce_seconds,
    )?;
    for watch in &config.watches {
        watcher.watch(&expand_path(&watch.path), watch.recursive)?;
    }

    info!("Watching {} folder(s). Press Ctrl+C to stop.", config.watches.len());

    let mut tick = tokio::time::interval(Duration::from_millis(500));
    loop {
        tokio::select! {
            _ = tick.tick() => {
                watcher.process_events();
            }
            _ = tokio::signal::ctrl_c() => break,
        }
    }

    info!(
        "Shutting down, {} asset(s) preprocessed",
        watcher.files_processed()
    );
    Ok(())
}
