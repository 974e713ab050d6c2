//! Wren Browser CLI
//!
//! A headless front end for loading a page and inspecting each stage of the
//! pipeline: the decoded source, the token stream, the plain text, and the
//! laid-out display list.
//!
//! Set `RUST_LOG=debug` to see each fetch hop.

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use owo_colors::OwoColorize;
use wren_browser::{FontdueFontMetrics, LoadedDocument, load_document, parse_html_string};
use wren_common::{ClientConfig, HttpClient};
use wren_layout::{ApproximateFontMetrics, DisplayList, FontMetrics, LayoutConfig, TextStyle};

/// Wren - a toy browser core for fetching, tokenizing, and laying out pages
#[derive(Parser, Debug)]
#[command(name = "wren")]
#[command(author, version, about, long_about = None)]
#[command(after_help = r#"EXAMPLES:
    # Print the text of a page
    wren example.org

    # Show the raw HTML
    wren --source http://example.org/

    # Lay out inline markup in a narrow viewport
    wren --layout --width 200 --html '<p>Some <b>bold</b> text</p>'

    # Display list as JSON, measured with a real font
    wren --layout --json --font ./DejaVuSans.ttf https://example.org/
"#)]
struct Cli {
    /// Address to load; `http://` is assumed when no scheme is given
    #[arg(value_name = "URL", required_unless_present = "html", conflicts_with = "html")]
    address: Option<String>,

    /// Use this markup instead of fetching
    #[arg(long, value_name = "HTML")]
    html: Option<String>,

    /// Print the decoded HTML source
    #[arg(long, conflicts_with_all = ["tokens", "layout"])]
    source: bool,

    /// Print the token stream
    #[arg(long, conflicts_with = "layout")]
    tokens: bool,

    /// Print the display list
    #[arg(long)]
    layout: bool,

    /// Print tokens or the display list as JSON
    #[arg(long)]
    json: bool,

    /// Viewport width in pixels
    #[arg(long, default_value_t = 800)]
    width: i32,

    /// TrueType/OpenType font used to measure text
    #[arg(long, value_name = "FILE")]
    font: Option<PathBuf>,

    /// Font size in pixels
    #[arg(long, default_value_t = 16.0)]
    font_size: f32,

    /// Redirects to follow before giving up
    #[arg(long, default_value_t = 10)]
    max_redirects: usize,

    /// Connect and read timeout in seconds
    #[arg(long, default_value_t = 10)]
    timeout: u64,

    /// Log every redirect hop at info level
    #[arg(long)]
    trace_redirects: bool,
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("{} {error:#}", "Error:".red().bold());
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    let document = load_doc(cli)?;

    if cli.source {
        print!("{}", document.source());
    } else if cli.tokens {
        print_tokens(&document, cli.json)?;
    } else if cli.layout {
        let metrics = font_metrics(cli)?;
        let display_list = document.layout(metrics.as_ref(), &LayoutConfig::new(cli.width));
        print_layout(&display_list, cli.json)?;
    } else {
        println!("{}", document.text);
    }

    Ok(())
}

/// Load the document named on the command line.
fn load_doc(cli: &Cli) -> Result<LoadedDocument> {
    if let Some(ref html) = cli.html {
        return Ok(parse_html_string(html));
    }
    let address = cli.address.as_deref().unwrap_or_default();

    let config = ClientConfig::default()
        .with_timeout(Duration::from_secs(cli.timeout))
        .with_max_redirects(cli.max_redirects)
        .with_trace_redirects(cli.trace_redirects);
    let document = load_document(address, &HttpClient::new(config))
        .with_context(|| format!("failed to load {address}"))?;

    if let (Some(status), Some(url)) = (document.status, &document.final_url) {
        eprintln!("{} {}", status.bold(), url.dimmed());
    }
    Ok(document)
}

fn font_metrics(cli: &Cli) -> Result<Box<dyn FontMetrics>> {
    match cli.font {
        Some(ref path) => Ok(Box::new(FontdueFontMetrics::from_file(path, cli.font_size)?)),
        None => {
            log::debug!("no --font given; using approximate metrics");
            Ok(Box::new(ApproximateFontMetrics::new(cli.font_size)))
        }
    }
}

fn print_tokens(document: &LoadedDocument, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(&document.tokens)?);
        return Ok(());
    }
    for token in &document.tokens {
        match token.as_text() {
            Some(text) => println!("{text:?}"),
            None => println!("{}", token.cyan()),
        }
    }
    Ok(())
}

fn print_layout(display_list: &DisplayList, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(display_list)?);
        return Ok(());
    }
    for item in display_list {
        println!(
            "{:>6} {:>6} {:<2} {}",
            item.x,
            item.y,
            style_marker(item.style).dimmed(),
            item.text
        );
    }
    Ok(())
}

/// Two-letter style column: `b` for bold, `i` for italic.
const fn style_marker(style: TextStyle) -> &'static str {
    match (style.bold, style.italic) {
        (true, true) => "bi",
        (true, false) => "b",
        (false, true) => "i",
        (false, false) => "-",
    }
}
