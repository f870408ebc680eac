//! `listkit` - render list outlines on the terminal.
//!
//! ```text
//! listkit render outline.yaml --catalog kinds.yaml --output term-debug
//! listkit kinds
//! listkit number Roman 1 4 1999
//! ```

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use console::Style;
use listkit::util::pad_right;
use listkit::{
    output, parse_outline, Catalog, KindRegistry, ListConfig, OutputMode, RenderContext,
    TextRenderer, Theme, Transform,
};
use serde_json::json;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

const DEFAULT_WIDTH: usize = 80;

/// Render itemized, enumerated and description lists from YAML outlines.
#[derive(Parser, Debug)]
#[command(name = "listkit")]
#[command(version)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render an outline file
    Render {
        /// YAML outline: a sequence of paragraphs and lists
        file: PathBuf,

        /// Spacing, nesting and numbering settings
        #[arg(long)]
        config: Option<PathBuf>,

        /// Additional list kinds
        #[arg(long)]
        catalog: Option<PathBuf>,

        /// Marker styles
        #[arg(long)]
        theme: Option<PathBuf>,

        /// auto, term, text, term-debug, json or yaml
        #[arg(short, long, default_value = "auto")]
        output: OutputMode,

        /// Wrap width; defaults to the terminal width
        #[arg(short, long)]
        width: Option<usize>,
    },

    /// List the registered list kinds
    Kinds {
        /// Additional list kinds
        #[arg(long)]
        catalog: Option<PathBuf>,

        /// Print the table as JSON
        #[arg(long)]
        json: bool,
    },

    /// Apply a numbering transform to ordinals
    Number {
        /// arabic, alpha, Alpha, roman or Roman
        transform: String,

        #[arg(required = true, allow_negative_numbers = true)]
        ordinals: Vec<i64>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let output = run(cli.command)?;
    if !output.is_empty() {
        println!("{}", output);
    }
    Ok(())
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(command: Command) -> Result<String> {
    match command {
        Command::Render {
            file,
            config,
            catalog,
            theme,
            output,
            width,
        } => {
            let width = width.unwrap_or_else(terminal_width);
            render(&file, config.as_deref(), catalog.as_deref(), theme.as_deref(), output, width)
        }
        Command::Kinds { catalog, json } => kinds(catalog.as_deref(), json),
        Command::Number {
            transform,
            ordinals,
        } => number(&transform, &ordinals),
    }
}

fn terminal_width() -> usize {
    terminal_size::terminal_size()
        .map(|(terminal_size::Width(w), _)| w as usize)
        .unwrap_or(DEFAULT_WIDTH)
}

fn load_registry(catalog: Option<&Path>) -> Result<KindRegistry> {
    let mut registry = KindRegistry::standard();
    if let Some(path) = catalog {
        let catalog = Catalog::from_file(path)?;
        catalog.register_into(&mut registry)?;
        info!(path = %path.display(), kinds = catalog.len(), "loaded catalog");
    }
    Ok(registry)
}

fn render(
    file: &Path,
    config: Option<&Path>,
    catalog: Option<&Path>,
    theme: Option<&Path>,
    mode: OutputMode,
    width: usize,
) -> Result<String> {
    let source = std::fs::read_to_string(file)
        .with_context(|| format!("failed to read {}", file.display()))?;
    let outline =
        parse_outline(&source).with_context(|| format!("invalid outline {}", file.display()))?;

    let config = match config {
        Some(path) => ListConfig::from_file(path)?,
        None => ListConfig::default(),
    };
    let mut ctx = RenderContext::new(load_registry(catalog)?, config)?;
    let blocks = ctx.render_document(&outline)?;
    debug!(blocks = blocks.len(), mode = %mode, "rendered outline");

    if let Some(serialized) = output::serialize(&blocks, mode) {
        return Ok(serialized?);
    }

    let theme = match theme {
        Some(path) => Theme::standard().merge(Theme::from_file(path)?),
        None => Theme::standard(),
    };
    Ok(TextRenderer::new(theme)
        .with_width(Some(width))
        .with_mode(mode)
        .render_blocks(&blocks))
}

fn kinds(catalog: Option<&Path>, as_json: bool) -> Result<String> {
    let registry = load_registry(catalog)?;
    let mut rows = Vec::new();
    for name in registry.names() {
        let kind = registry.resolve(name)?;
        let layout = kind.layout();
        let shown = if kind.transform().ignores_ordinal() { 1 } else { 3 };
        let markers: Vec<String> = (1..=shown)
            .map(|n| match kind.transform().apply(n) {
                Ok(token) => layout.suffix.apply(&token),
                Err(_) => "?".to_string(),
            })
            .collect();
        rows.push((
            name.to_string(),
            layout.builtin_name().unwrap_or("custom").to_string(),
            kind.transform().name().to_string(),
            markers,
        ));
    }

    if as_json {
        let value: Vec<_> = rows
            .iter()
            .map(|(name, layout, transform, markers)| {
                json!({
                    "name": name,
                    "layout": layout,
                    "transform": transform,
                    "markers": markers,
                })
            })
            .collect();
        return Ok(serde_json::to_string_pretty(&value)?);
    }

    let name_width = rows.iter().map(|row| row.0.len()).max().unwrap_or(0) + 2;
    let header = Style::new().bold();
    let mut lines = vec![header
        .apply_to(format!(
            "{}{}{}MARKERS",
            pad_right("KIND", name_width),
            pad_right("LAYOUT", 26),
            pad_right("TRANSFORM", 11)
        ))
        .to_string()];
    for (name, layout, transform, markers) in rows {
        lines.push(format!(
            "{}{}{}{}",
            pad_right(&name, name_width),
            pad_right(&layout, 26),
            pad_right(&transform, 11),
            markers.join(" ")
        ));
    }
    Ok(lines.join("\n"))
}

fn number(transform: &str, ordinals: &[i64]) -> Result<String> {
    let Some(transform) = Transform::from_name(transform) else {
        bail!(
            "unknown transform '{}' (expected arabic, alpha, Alpha, roman or Roman)",
            transform
        );
    };
    let tokens = ordinals
        .iter()
        .map(|&n| transform.apply(n))
        .collect::<listkit::Result<Vec<_>>>()?;
    Ok(tokens.join("\n"))
}
