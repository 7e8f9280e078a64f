mod cli;
mod config;
mod index;
mod note_ops;
mod parser;
mod selector;

use std::ffi::OsString;
use std::io::Write;
use std::process::ExitCode;

use anyhow::{bail, Result};
use clap::Parser;
use tokio::fs;
use tracing_subscriber::{fmt, EnvFilter};

use cli::Cli;
use config::NoteConfig;
use note_ops::Resolution;
use selector::Selector;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // Tracing writes to stderr (stdout reserved for --list output)
    fmt()
        .with_env_filter(
            EnvFilter::try_from_env("NOTE_LOG").unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let result = run(cli).await;
    ExitCode::from(report(result, &mut std::io::stderr()))
}

/// Exit status for a finished run; errors become one `An error occurred:` line.
fn report(result: Result<()>, err: &mut impl Write) -> u8 {
    match result {
        Ok(()) => 0,
        Err(e) => {
            let _ = writeln!(err, "An error occurred: {e:#}");
            1
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = NoteConfig::resolve(cli.notes_dir.clone())?;
    execute(&cli, &config, std::env::var_os("PATH"), &mut std::io::stdout()).await
}

async fn execute(
    cli: &Cli,
    config: &NoteConfig,
    search_path: Option<OsString>,
    out: &mut impl Write,
) -> Result<()> {
    config::ensure_notes_dir(&config.notes_dir).await?;
    let selector = Selector {
        program: config::find_selector(search_path)?,
    };

    let query = cli.query();
    if cli.list {
        for note in index::match_set(&config.notes_dir, &query).await? {
            writeln!(out, "{}", note.name)?;
        }
        return Ok(());
    }

    let path = match note_ops::resolve(&query, &config.notes_dir, &selector).await? {
        Resolution::Open(path) => path,
        Resolution::Cancelled => return Ok(()),
    };
    if query.is_empty() && !fs::try_exists(&path).await? {
        bail!("no notes found; pass a title to create one");
    }
    note_ops::open_in_editor(&config.editor, &path).await
}
