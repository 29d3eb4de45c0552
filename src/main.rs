//! calibre-callouts: merge a Calibre annotation export into its markdown
//! highlights file and emit styled HTML.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use calibre_callouts::{io, render, Config};

#[derive(Parser)]
#[command(name = "calibre-callouts")]
#[command(author, version, about = "Turn Calibre highlights into styled HTML callouts")]
struct Cli {
    /// Annotation export: a JSON file path or the JSON itself
    annotations: String,

    /// Markdown highlights: a file path or the markdown itself
    document: String,

    /// Write the result here instead of stdout (extension forced to html)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "calibre_callouts=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    dotenvy::dotenv().ok();

    let config = Config::from_env().context("Invalid configuration")?;
    let cli = Cli::parse();

    let annotations = io::read_input(&cli.annotations).context("Failed to read annotations")?;
    let document = io::read_input(&cli.document).context("Failed to read document")?;

    let rendered = render(&annotations, &document, &config.render)?;
    for locator in &rendered.unresolved_locators {
        tracing::warn!("No annotation found for locator {}", locator);
    }

    match cli.output {
        Some(path) => {
            let written = io::write_output(&path, &rendered.output, &config.output.extension)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            tracing::info!("Wrote {} callouts to {}", rendered.matched_count, written.display());
        }
        None => print!("{}", rendered.output),
    }

    Ok(())
}
