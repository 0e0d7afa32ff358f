//! BlobView CLI - render a hosted repository file as an HTML page

use blobview::{Document, Viewer};
use clap::{Parser, ValueEnum};
use std::io::{self, Write};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Output format
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
enum OutputFormat {
    /// Standalone HTML viewer page
    #[default]
    Html,
    /// JSON element descriptors
    Json,
}

/// BlobView - view a GitHub or Gitee file without downloading the repository
#[derive(Parser, Debug)]
#[command(name = "blobview")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Blob URL (https://github.com/<owner>/<repo>/blob/<branch>/<path>)
    /// or a viewer location carrying one after `/#` or `/?`
    location: String,

    /// Output format
    #[arg(long, short, default_value = "html")]
    output: OutputFormat,

    /// Write to this file instead of stdout
    #[arg(long)]
    out: Option<PathBuf>,

    /// Custom User-Agent
    #[arg(long)]
    user_agent: Option<String>,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let mut builder = Viewer::builder();
    if let Some(ua) = cli.user_agent {
        builder = builder.user_agent(ua);
    }
    let viewer = builder.build();

    let mut document = Document::new();
    if let Err(e) = viewer.load(&cli.location, &mut document).await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    let rendered = match format_document(&document, cli.output) {
        Ok(rendered) => rendered,
        Err(e) => {
            eprintln!("Error serializing document: {}", e);
            std::process::exit(1);
        }
    };

    match cli.out {
        Some(path) => {
            if let Err(e) = std::fs::write(&path, rendered) {
                eprintln!("Error writing {}: {}", path.display(), e);
                std::process::exit(1);
            }
        }
        None => writeln_safe(&rendered),
    }
}

fn format_document(document: &Document, output: OutputFormat) -> serde_json::Result<String> {
    match output {
        OutputFormat::Html => Ok(document.to_html()),
        OutputFormat::Json => serde_json::to_string_pretty(document.elements()),
    }
}

/// Write to stdout, exit silently on broken pipe
fn writeln_safe(s: &str) {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    if let Err(e) = writeln!(handle, "{}", s) {
        if e.kind() == io::ErrorKind::BrokenPipe {
            std::process::exit(0);
        }
        eprintln!("Error writing to stdout: {}", e);
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use blobview::{Element, RenderSink};

    fn sample_document() -> Document {
        let mut document = Document::new();
        document.append(Element::Image {
            src: "https://cdn.jsdelivr.net/gh/o/r@main/a.png".to_string(),
        });
        document
    }

    #[test]
    fn test_format_html() {
        let html = format_document(&sample_document(), OutputFormat::Html).unwrap();
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<img src=\"https://cdn.jsdelivr.net/gh/o/r@main/a.png\">"));
    }

    #[test]
    fn test_format_json() {
        let json = format_document(&sample_document(), OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value[0]["kind"], "image");
        assert_eq!(value[0]["src"], "https://cdn.jsdelivr.net/gh/o/r@main/a.png");
    }

    #[test]
    fn test_cli_parse() {
        let cli = Cli::try_parse_from([
            "blobview",
            "https://github.com/o/r/blob/main/a.png",
            "--output",
            "json",
            "--user-agent",
            "UA/1.0",
        ])
        .unwrap();
        assert_eq!(cli.location, "https://github.com/o/r/blob/main/a.png");
        assert!(matches!(cli.output, OutputFormat::Json));
        assert_eq!(cli.user_agent.as_deref(), Some("UA/1.0"));
        assert!(cli.out.is_none());
    }
}
