use std::io::ErrorKind;
use std::path::PathBuf;
use std::process::Stdio;

use anyhow::{bail, Context, Result};
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::index::NoteEntry;

/// Exit status fzf uses when the user aborts with ESC or Ctrl-C.
const CANCELLED_STATUS: i32 = 130;
const PROMPT: &str = "Select a note: ";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    Chosen(PathBuf),
    Cancelled,
}

pub struct Selector {
    /// Resolved fzf executable
    pub program: PathBuf,
}

impl Selector {
    /// Let the user pick one of `notes`. Names are fed one per line in
    /// match-set order and the selector is told not to re-sort them.
    pub async fn select(&self, notes: &[NoteEntry]) -> Result<Selection> {
        let mut child = Command::new(&self.program)
            .arg("--no-sort")
            .arg("--prompt")
            .arg(PROMPT)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .kill_on_drop(true)
            .spawn()
            .with_context(|| format!("failed to start {}", self.program.display()))?;

        let mut stdin = child
            .stdin
            .take()
            .context("failed to create selector stdin pipe")?;
        let input: String = notes.iter().map(|n| format!("{}\n", n.name)).collect();
        let writer = tokio::spawn(async move {
            // stdin is dropped at the end of the task, closing the pipe
            match stdin.write_all(input.as_bytes()).await {
                Ok(()) => {}
                // the selector may exit before reading everything
                Err(e) if e.kind() == ErrorKind::BrokenPipe => {
                    debug!("selector closed its stdin early");
                }
                Err(e) => warn!("writing to selector stdin: {e}"),
            }
        });

        let output = child
            .wait_with_output()
            .await
            .context("failed to select note")?;
        join_writer(writer).await;

        if !output.status.success() {
            if output.status.code() == Some(CANCELLED_STATUS) {
                debug!("selection cancelled");
                return Ok(Selection::Cancelled);
            }
            bail!("failed to select note: {}", output.status);
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let selected = strip_newline(&stdout);
        debug!("selected {selected:?}");
        notes
            .iter()
            .find(|n| n.name == selected)
            .map(|n| Selection::Chosen(n.path.clone()))
            .context("selected note not found")
    }
}

async fn join_writer(writer: JoinHandle<()>) {
    if let Err(e) = writer.await {
        warn!("selector stdin writer failed: {e}");
    }
}

fn strip_newline(s: &str) -> &str {
    match s.strip_suffix('\n') {
        Some(line) => line.strip_suffix('\r').unwrap_or(line),
        None => s,
    }
}
