//! deckwright CLI - slide deck build tool

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use deckwright::config::stringify;
use deckwright::render::{render_directory, to_text};
use deckwright::{
    load_config, load_deck, BlockSpec, BuildStats, ConfigTree, Deckwright, GraphvizRenderer,
    OutputFormat, SinkOptions,
};

#[derive(Parser)]
#[command(name = "deckwright")]
#[command(version)]
#[command(about = "Build config-bound slide decks", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a deck into a JSON layout or a text outline
    Build {
        /// Deck description (JSON)
        #[arg(value_name = "DECK")]
        deck: PathBuf,

        /// Runtime configuration (JSON)
        #[arg(short, long, value_name = "FILE", env = "DECKWRIGHT_CONFIG")]
        config: Option<PathBuf>,

        /// Output file (stdout outline if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output format (inferred from the output extension by default)
        #[arg(short, long, value_enum)]
        format: Option<Format>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,

        /// Render every *.dot in this directory with Graphviz first
        #[arg(long, value_name = "DIR")]
        diagrams: Option<PathBuf>,

        /// Do not fail on missing diagram images
        #[arg(long)]
        no_verify: bool,
    },

    /// Print the value at a dotted config path
    Resolve {
        /// Runtime configuration (JSON)
        #[arg(value_name = "FILE")]
        config: PathBuf,

        /// Dotted path (e.g. "association.method")
        #[arg(value_name = "PATH")]
        path: String,

        /// Printed when the path does not resolve
        #[arg(long, default_value = "n/a")]
        fallback: String,
    },

    /// Show deck information
    Info {
        /// Deck description (JSON)
        #[arg(value_name = "DECK")]
        deck: PathBuf,
    },

    /// Show version information
    Version,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum Format {
    /// Serialized layout
    Json,
    /// Human-readable outline
    Text,
}

impl From<Format> for OutputFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Json => OutputFormat::Json,
            Format::Text => OutputFormat::Text,
        }
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Build {
            deck,
            config,
            output,
            format,
            compact,
            diagrams,
            no_verify,
        }) => cmd_build(
            &deck,
            config.as_deref(),
            output.as_deref(),
            format,
            compact,
            diagrams.as_deref(),
            no_verify,
        )
        .map(|_| ()),
        Some(Commands::Resolve {
            config,
            path,
            fallback,
        }) => cmd_resolve(&config, &path, &fallback),
        Some(Commands::Info { deck }) => cmd_info(&deck),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => {
            println!("{}", "Usage: deckwright build <DECK> [-c CONFIG] [-o OUTPUT]".yellow());
            println!("       deckwright --help for more information");
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn cmd_build(
    deck_path: &Path,
    config: Option<&Path>,
    output: Option<&Path>,
    format: Option<Format>,
    compact: bool,
    diagrams: Option<&Path>,
    no_verify: bool,
) -> Result<BuildStats, Box<dyn std::error::Error>> {
    let pb = ProgressBar::new(4);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {msg}")?
            .progress_chars("#>-"),
    );

    pb.set_message("Loading deck...");
    let deck = load_deck(deck_path)?;
    let config = match config {
        Some(path) => load_config(path)?,
        None => ConfigTree::empty(),
    };
    pb.inc(1);

    pb.set_message("Rendering diagrams...");
    if let Some(dir) = diagrams {
        let images = render_directory(dir, &GraphvizRenderer::new())?;
        log::info!("Rendered {} diagram(s)", images.len());
    }
    pb.inc(1);

    let mut builder = Deckwright::new()
        .verify_images(!no_verify)
        .with_renderer(GraphvizRenderer::new());
    if let Some(dir) = deck_path.parent() {
        builder = builder.with_base_dir(dir);
    }

    let stats = match output {
        Some(path) => {
            pb.set_message("Laying out and writing...");
            let mut sink = SinkOptions::new().with_output(path);
            if let Some(format) = format {
                sink = sink.with_format(format.into());
            }
            if compact {
                sink = sink.compact();
            }
            let stats = builder.build(&deck, &config, &sink)?;
            pb.inc(2);
            pb.finish_with_message("Done!");
            println!("{} {}", "Saved to".green(), path.display());
            stats
        }
        None => {
            pb.set_message("Laying out...");
            let (doc, stats) = builder.layout(&deck, &config)?;
            pb.inc(2);
            pb.finish_and_clear();
            match format {
                Some(Format::Json) => {
                    let json_format = if compact {
                        deckwright::JsonFormat::Compact
                    } else {
                        deckwright::JsonFormat::Pretty
                    };
                    println!("{}", deckwright::render::to_json(&doc, json_format)?);
                }
                _ => println!("{}", to_text(&doc)?),
            }
            stats
        }
    };

    print_stats(&stats);
    Ok(stats)
}

fn print_stats(stats: &BuildStats) {
    eprintln!();
    eprintln!("{}", "Build Statistics".cyan().bold());
    eprintln!("{}", "─".repeat(40).dimmed());
    eprintln!("{}: {}", "Pages".bold(), stats.page_count);
    eprintln!("{}: {}", "Blocks".bold(), stats.block_count());
    eprintln!("{}: {}", "Tables".bold(), stats.table_count);
    eprintln!("{}: {}", "Diagrams".bold(), stats.diagram_count);
    eprintln!("{}: {}", "Bindings".bold(), stats.bindings_resolved);
    if stats.fallbacks_used > 0 {
        eprintln!(
            "{}: {}",
            "Fallbacks".bold(),
            stats.fallbacks_used.to_string().yellow()
        );
    }
}

fn cmd_resolve(config: &Path, path: &str, fallback: &str) -> Result<(), Box<dyn std::error::Error>> {
    let tree = load_config(config)?;
    match tree.lookup(path) {
        Some(value) if value.is_object() || value.is_array() => {
            println!("{}", serde_json::to_string_pretty(value)?);
        }
        Some(value) => println!("{}", stringify(value)),
        None => {
            eprintln!("{} {}", "Not found:".yellow(), path);
            println!("{}", fallback);
        }
    }
    Ok(())
}

fn cmd_info(deck_path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let deck = load_deck(deck_path)?;

    println!("{}", "Deck Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "File".bold(), deck_path.display());
    println!("{}: {}", "Pages".bold(), deck.page_count());
    if let Some(ref title) = deck.metadata.title {
        println!("{}: {}", "Title".bold(), title);
    }
    if let Some(ref author) = deck.metadata.author {
        println!("{}: {}", "Author".bold(), author);
    }
    let canvas = deck.canvas.unwrap_or_default();
    println!("{}: {:.0} x {:.0} pt", "Canvas".bold(), canvas.width, canvas.height);
    println!(
        "{}: {}",
        "Theme".bold(),
        if deck.theme.is_some() { "custom" } else { "default" }
    );
    println!("{}: {}", "Fallback".bold(), deck.default_fallback);

    println!();
    println!("{}", "Pages".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    for (index, page) in deck.pages.iter().enumerate() {
        let kinds: Vec<&str> = page.blocks.iter().map(block_label).collect();
        println!(
            "{:>3}. {} {}",
            index + 1,
            page.title.as_deref().unwrap_or("(untitled)").bold(),
            format!("[{}]", kinds.join(", ")).dimmed()
        );
    }

    Ok(())
}

fn block_label(block: &BlockSpec) -> &'static str {
    match block {
        BlockSpec::Title { .. } => "title",
        BlockSpec::Subtitle { .. } => "subtitle",
        BlockSpec::Bullets { .. } => "bullets",
        BlockSpec::Code { .. } => "code",
        BlockSpec::Table { .. } => "table",
        BlockSpec::Diagram { .. } => "diagram",
    }
}

fn cmd_version() {
    println!("{} {}", "deckwright".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Config-bound slide deck builder");
    println!();
    println!("License: MIT");
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_deck(dir: &Path) -> PathBuf {
        let deck = dir.join("deck.json");
        std::fs::write(
            &deck,
            r#"{"pages": [{"title": "Tracker", "blocks": [
                {"type": "bullets", "items": ["Method: {{association.method|?}}"]}
            ]}]}"#,
        )
        .unwrap();
        deck
    }

    #[test]
    fn test_cmd_build_text() {
        let dir = tempfile::tempdir().unwrap();
        let deck = write_deck(dir.path());
        let config = dir.path().join("config.json");
        std::fs::write(&config, r#"{"association": {"method": "GNN"}}"#).unwrap();
        let output = dir.path().join("deck.txt");

        let stats = cmd_build(
            &deck,
            Some(config.as_path()),
            Some(output.as_path()),
            None,
            false,
            None,
            false,
        )
        .unwrap();
        assert_eq!(stats.page_count, 1);
        assert!(std::fs::read_to_string(&output).unwrap().contains("Method: GNN"));
    }

    #[test]
    fn test_cmd_build_failure_leaves_no_output() {
        let dir = tempfile::tempdir().unwrap();
        let deck = dir.path().join("deck.json");
        std::fs::write(
            &deck,
            r#"{"pages": [{"blocks": [
                {"type": "table", "headers": ["A", "B"], "rows": [["1", "2"], ["3", "4", "5"]]}
            ]}]}"#,
        )
        .unwrap();
        let output = dir.path().join("deck.json.out");

        let result = cmd_build(
            &deck,
            None,
            Some(output.as_path()),
            Some(Format::Json),
            false,
            None,
            false,
        );
        assert!(result.is_err());
        assert!(!output.exists());
    }

    #[test]
    fn test_block_label() {
        let block = BlockSpec::Code {
            code: "ls".to_string(),
            kind: Default::default(),
            offset: None,
        };
        assert_eq!(block_label(&block), "code");
    }
}
