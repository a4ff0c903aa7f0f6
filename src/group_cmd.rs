//! CLI entry points: `cite group` and `cite summary`.

use anyhow::{bail, Result};

use citegroup_core::group::group_by_document;
use citegroup_core::summary::summarize;

use crate::config::Config;
use crate::payload::{parse_payload, ParsedCitations};
use crate::render::{build_view, render_json, render_text};
use crate::source::{load_payload, PayloadSource};

/// Output format for `cite group`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            other => bail!("Unknown output format: {}. Use text or json.", other),
        }
    }
}

async fn read_citations(config: &Config, source: &str) -> Result<ParsedCitations> {
    let source = PayloadSource::parse(source);
    let text = load_payload(&source, &config.api).await?;
    let parsed = parse_payload(&text)?;
    if parsed.skipped > 0 {
        tracing::warn!(
            "{}: skipped {} malformed citation entries",
            source,
            parsed.skipped
        );
    }
    Ok(parsed)
}

/// Group a payload's citations and print them.
pub async fn run_group(
    config: &Config,
    source: &str,
    format: OutputFormat,
    page: usize,
    page_size: Option<usize>,
) -> Result<()> {
    if page_size == Some(0) {
        bail!("--page-size must be > 0");
    }

    let parsed = read_citations(config, source).await?;
    let view = build_view(&parsed.chunks, config, page, page_size);

    match format {
        OutputFormat::Text => print!("{}", render_text(&view)),
        OutputFormat::Json => println!("{}", render_json(&view)?),
    }

    Ok(())
}

/// Print only the one-line summary for a payload.
pub async fn run_summary(config: &Config, source: &str) -> Result<()> {
    let parsed = read_citations(config, source).await?;
    println!("{}", summarize(&group_by_document(&parsed.chunks)));
    Ok(())
}
