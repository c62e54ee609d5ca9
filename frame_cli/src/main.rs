//! # Framecraft CLI
//!
//! Quotes a framing configuration from flags, a TOML file, a saved
//! `.frame` file or a share-link query string, and prints the breakdown
//! followed by the full quote as JSON.
//!
//! Logging goes to stderr and is controlled by `FRAMECRAFT_LOG`
//! (default `warn`); `--verbose` raises it to `debug`.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use frame_core::catalog::{default_catalog, Catalog};
use frame_core::checkout::CartLineItem;
use frame_core::configuration::{FrameConfiguration, Hardware, MatType, ServiceType};
use frame_core::dimensions::{format_dimension, format_inches, parse_dimension};
use frame_core::engine::{compute, Quote};
use frame_core::file_io::{load_catalog, load_configuration, save_configuration, save_quote};
use frame_core::layouts::LayoutSpec;
use frame_core::nameplate::NameplateConfig;
use frame_core::notices::Notice;
use frame_core::preview::{project, PreviewContainer};
use frame_core::share_link;

#[derive(Parser)]
#[command(name = "framecraft", version, about = "Framing layout and pricing engine")]
struct Cli {
    /// Log at debug level
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Price a configuration
    Quote(QuoteArgs),
    /// List every layout id
    Layouts,
    /// Parse a dimension like "16 1/2" and print it back
    Parse { value: String },
    /// Print the share-link query string for a configuration
    Link(ConfigArgs),
}

#[derive(Args)]
struct QuoteArgs {
    #[command(flatten)]
    config: ConfigArgs,

    /// Catalog JSON file instead of the bundled one
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// Also project a preview into a WxH pixel container
    #[arg(long, value_name = "WxH")]
    preview: Option<String>,

    /// Print only JSON
    #[arg(long)]
    json: bool,

    /// Print the cart line item when the quote is orderable
    #[arg(long)]
    cart: bool,

    /// Save the configuration as a .frame file
    #[arg(long, value_name = "PATH")]
    save: Option<PathBuf>,

    /// Write the quote JSON to a file
    #[arg(long, value_name = "PATH")]
    out: Option<PathBuf>,
}

#[derive(Args)]
struct ConfigArgs {
    /// Configuration file (.toml, or .frame as written by --save)
    #[arg(long, conflicts_with = "link")]
    config: Option<PathBuf>,

    /// Share-link query string
    #[arg(long)]
    link: Option<String>,

    /// Artwork width, e.g. "16 1/2"
    #[arg(long)]
    width: Option<String>,

    /// Artwork height
    #[arg(long)]
    height: Option<String>,

    /// Frame style id
    #[arg(long)]
    style: Option<String>,

    /// none, single or double
    #[arg(long)]
    mat: Option<String>,

    /// Mat border width
    #[arg(long)]
    border: Option<String>,

    /// Inner mat reveal for a double mat
    #[arg(long)]
    reveal: Option<String>,

    #[arg(long)]
    mat_color: Option<String>,

    #[arg(long)]
    inner_color: Option<String>,

    /// Glazing id
    #[arg(long)]
    glazing: Option<String>,

    /// Layout id, see `framecraft layouts`
    #[arg(long)]
    layout: Option<String>,

    /// Size variant for the layout (photo, secondary or board size)
    #[arg(long, requires = "layout")]
    size: Option<String>,

    #[arg(long)]
    bottom_weighted: bool,

    /// Security hardware
    #[arg(long)]
    security: bool,

    /// Print the artwork as well as framing it, from this image
    #[arg(long, value_name = "URL")]
    print: Option<String>,

    /// Nameplate line; repeat for up to three lines
    #[arg(long, value_name = "TEXT", num_args = 1)]
    nameplate: Vec<String>,
}

impl ConfigArgs {
    fn build(&self) -> Result<(FrameConfiguration, Vec<Notice>)> {
        let (mut config, notices) = match (&self.config, &self.link) {
            (Some(path), _) => (read_config_file(path)?, Vec::new()),
            (None, Some(query)) => share_link::decode(query).context("Failed to read share link")?,
            (None, None) => (FrameConfiguration::default(), Vec::new()),
        };

        if let Some(width) = &self.width {
            config.artwork_width_in = dimension("width", width)?;
        }
        if let Some(height) = &self.height {
            config.artwork_height_in = dimension("height", height)?;
        }
        if let Some(style) = &self.style {
            config.frame_style_id = style.clone();
        }
        if let Some(mat) = &self.mat {
            config.mat_type = match MatType::from_id(mat) {
                Some(mat_type) => mat_type,
                None => bail!("Unknown mat type '{}': expected none, single or double", mat),
            };
        }
        if let Some(border) = &self.border {
            config.mat_border_in = measurement("border", border)?;
        }
        if let Some(reveal) = &self.reveal {
            config.mat_reveal_in = measurement("reveal", reveal)?;
        }
        if let Some(color) = &self.mat_color {
            config.mat_color_id = Some(color.clone());
        }
        if let Some(color) = &self.inner_color {
            config.mat_inner_color_id = Some(color.clone());
        }
        if let Some(glazing) = &self.glazing {
            config.glazing_id = glazing.clone();
        }
        if let Some(layout) = &self.layout {
            config.layout = LayoutSpec::from_layout_id(layout, self.size.as_deref())?;
        }
        if self.bottom_weighted {
            config.bottom_weighted = true;
        }
        if self.security {
            config.hardware = Hardware::Security;
        }
        if let Some(url) = &self.print {
            config.service_type = ServiceType::PrintAndFrame;
            config.image_url = Some(url.clone());
        }
        if !self.nameplate.is_empty() {
            if self.nameplate.len() > 3 {
                bail!("A nameplate has at most three lines");
            }
            let mut lines = self.nameplate.iter().cloned();
            config.nameplate = Some(NameplateConfig {
                enabled: true,
                line1: lines.next().unwrap_or_default(),
                line2: lines.next().unwrap_or_default(),
                line3: lines.next().unwrap_or_default(),
                ..config.nameplate.take().unwrap_or_default()
            });
        }

        Ok((config.normalized(), notices))
    }
}

fn read_config_file(path: &Path) -> Result<FrameConfiguration> {
    if path.extension().is_some_and(|e| e == "frame") {
        return Ok(load_configuration(path)?);
    }
    let text = fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
    toml::from_str(&text).with_context(|| format!("Invalid configuration in {}", path.display()))
}

/// Positive dimension; the parser reports garbage as zero.
fn dimension(field: &str, value: &str) -> Result<f64> {
    match parse_dimension(value) {
        v if v > 0.0 => Ok(v),
        _ => bail!("Invalid {}: '{}'", field, value),
    }
}

/// Like [`dimension`] but a literal zero is allowed.
fn measurement(field: &str, value: &str) -> Result<f64> {
    let parsed = parse_dimension(value);
    if parsed > 0.0 || value.trim().parse::<f64>() == Ok(0.0) {
        Ok(parsed)
    } else {
        bail!("Invalid {}: '{}'", field, value)
    }
}

fn parse_container(value: &str) -> Result<PreviewContainer> {
    let Some((w, h)) = value.split_once(['x', 'X']) else {
        bail!("Preview size must look like 800x600, got '{}'", value);
    };
    let width: f64 = w.trim().parse().with_context(|| format!("Invalid preview width '{}'", w))?;
    let height: f64 = h.trim().parse().with_context(|| format!("Invalid preview height '{}'", h))?;
    Ok(PreviewContainer::new(width, height))
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_env("FRAMECRAFT_LOG").unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Command::Quote(args) => run_quote(&args),
        Command::Layouts => {
            for id in LayoutSpec::all_layout_ids() {
                println!("{}", id);
            }
            Ok(())
        }
        Command::Parse { value } => {
            let inches = parse_dimension(&value);
            if inches <= 0.0 {
                bail!("'{}' is not a valid dimension", value);
            }
            println!("{} = {} ({})", value, inches, format_dimension(inches));
            Ok(())
        }
        Command::Link(args) => {
            let (config, notices) = args.build()?;
            print_notices(&notices);
            println!("{}", share_link::encode(&config));
            Ok(())
        }
    }
}

fn run_quote(args: &QuoteArgs) -> Result<()> {
    let (config, link_notices) = args.config.build()?;

    let loaded;
    let catalog: &Catalog = match &args.catalog {
        Some(path) => {
            let (catalog, dropped) = load_catalog(path)?;
            if !dropped.is_empty() {
                eprintln!("Warning: {} catalog record(s) dropped", dropped.len());
            }
            loaded = catalog;
            &loaded
        }
        None => default_catalog()?,
    };
    debug!(frame_style = %config.frame_style_id, layout = %config.layout.layout_id(), "quoting");

    let quote = compute(&config, catalog)?;

    if let Some(path) = &args.save {
        save_configuration(&config, path)?;
    }
    if let Some(path) = &args.out {
        save_quote(&quote, path)?;
    }

    let preview = match &args.preview {
        Some(size) => Some(project(&quote.geometry, &parse_container(size)?)),
        None => None,
    };
    let cart = if args.cart && quote.is_orderable() {
        Some(CartLineItem::from_quote(&quote, &config, catalog)?)
    } else {
        None
    };

    if !args.json {
        print_notices(&link_notices);
        print_summary(&quote);
        if let Some(preview) = &preview {
            println!("Preview: {:.2} px/in, frame {:.0} x {:.0} px", preview.scale, preview.frame.width, preview.frame.height);
            println!();
        }
        println!("JSON Output:");
    }

    let output = serde_json::json!({
        "quote": quote,
        "preview": preview,
        "cart": cart,
    });
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn print_summary(quote: &Quote) {
    let geometry = &quote.geometry;
    let borders = &geometry.borders;

    println!("═══════════════════════════════════════");
    println!("  FRAME QUOTE: {}", geometry.layout.layout_id);
    println!("═══════════════════════════════════════");
    println!();
    println!("Geometry:");
    println!(
        "  Frame:    {} x {}",
        format_inches(geometry.frame_width_in),
        format_inches(geometry.frame_height_in)
    );
    println!(
        "  Envelope: {} x {}",
        format_inches(geometry.layout.envelope_width_in),
        format_inches(geometry.layout.envelope_height_in)
    );
    println!(
        "  Borders:  top {} / right {} / bottom {} / left {}",
        format_inches(borders.top_in),
        format_inches(borders.right_in),
        format_inches(borders.bottom_in),
        format_inches(borders.left_in)
    );
    if geometry.plaque_extension_in > 0.0 {
        println!("  Plaque extension: {}", format_inches(geometry.plaque_extension_in));
    }
    println!();

    println!("Pricing:");
    for line in &quote.pricing.lines {
        if line.included {
            println!("  {:<22} included", line.label);
        } else {
            println!("  {:<22} {:>10}", line.label, line.amount.to_string());
        }
    }
    println!("  {:<22} {:>10}", "Total", quote.pricing.total.to_string());
    println!();

    print_notices(&quote.notices);
    for problem in &quote.validation {
        println!("  ✗ {}: {}", problem.field, problem.message);
    }

    println!("═══════════════════════════════════════");
    println!("  RESULT: {}", if quote.is_orderable() { "ORDERABLE" } else { "NOT ORDERABLE" });
    println!("═══════════════════════════════════════");
    println!();
}

fn print_notices(notices: &[Notice]) {
    for notice in notices {
        println!("  ! {}: {}", notice.field, notice.message);
    }
}
