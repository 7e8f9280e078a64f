use std::path::{Path, PathBuf};
use std::process::Stdio;

use anyhow::{bail, Context, Result};
use chrono::{Local, NaiveDate};
use tokio::process::Command;
use tracing::debug;

use crate::index;
use crate::parser;
use crate::selector::{Selection, Selector};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Path to open; may not exist yet when a new note was named.
    Open(PathBuf),
    Cancelled,
}

/// Resolve `query` to exactly one note path, dated today when a new one is needed.
pub async fn resolve(query: &str, notes_dir: &Path, selector: &Selector) -> Result<Resolution> {
    resolve_on(query, notes_dir, selector, Local::now().date_naive()).await
}

pub async fn resolve_on(
    query: &str,
    notes_dir: &Path,
    selector: &Selector,
    today: NaiveDate,
) -> Result<Resolution> {
    let mut matches = index::match_set(notes_dir, query).await?;
    match matches.len() {
        0 => {
            let path = notes_dir.join(parser::new_note_name(today, query));
            debug!("no match, new note {}", path.display());
            Ok(Resolution::Open(path))
        }
        1 => Ok(Resolution::Open(matches.remove(0).path)),
        _ => match selector.select(&matches).await? {
            Selection::Chosen(path) => Ok(Resolution::Open(path)),
            Selection::Cancelled => Ok(Resolution::Cancelled),
        },
    }
}

/// Run the editor in the foreground on `path` with inherited stdio.
pub async fn open_in_editor(editor: &str, path: &Path) -> Result<()> {
    debug!("opening {} with {editor}", path.display());
    let status = Command::new(editor)
        .arg(path)
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .status()
        .await
        .with_context(|| format!("failed to open editor {editor}"))?;
    if !status.success() {
        bail!("failed to open editor {editor}: {status}");
    }
    Ok(())
}
