use std::ffi::OsString;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, bail, Context, Result};
use tokio::fs;
use tracing::debug;

const SELECTOR_PROGRAM: &str = "fzf";
const DEFAULT_EDITOR: &str = "vi";

#[derive(Debug, Clone)]
pub struct NoteConfig {
    pub notes_dir: PathBuf,
    pub editor: String,
}

impl NoteConfig {
    /// Read the process environment. Resolution order for the directory:
    /// CLI flag → NOTES_DIRECTORY env → $HOME/.notes
    pub fn resolve(cli_dir: Option<PathBuf>) -> Result<Self> {
        let notes_dir = Self::notes_dir_from(
            cli_dir,
            non_empty_var("NOTES_DIRECTORY"),
            non_empty_var("HOME"),
        )?;
        let editor = Self::editor_from(non_empty_var("EDITOR"));
        Ok(NoteConfig { notes_dir, editor })
    }

    pub fn notes_dir_from(
        cli_dir: Option<PathBuf>,
        env_dir: Option<String>,
        home: Option<String>,
    ) -> Result<PathBuf> {
        if let Some(dir) = cli_dir.or_else(|| env_dir.map(PathBuf::from)) {
            return Ok(dir);
        }
        match home {
            Some(home) => Ok(PathBuf::from(home).join(".notes")),
            None => bail!("could not determine home directory; set NOTES_DIRECTORY"),
        }
    }

    pub fn editor_from(editor: Option<String>) -> String {
        editor.unwrap_or_else(|| {
            eprintln!("WARNING: $EDITOR not set, defaulting to '{DEFAULT_EDITOR}'");
            DEFAULT_EDITOR.to_string()
        })
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}

/// Create the notes directory (mode 0755, with parents) unless it already exists.
pub async fn ensure_notes_dir(dir: &Path) -> Result<()> {
    match fs::metadata(dir).await {
        Ok(meta) if meta.is_dir() => Ok(()),
        Ok(_) => bail!("{} exists but is not a directory", dir.display()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            debug!("creating notes directory {}", dir.display());
            let mut builder = fs::DirBuilder::new();
            builder.recursive(true);
            #[cfg(unix)]
            builder.mode(0o755);
            builder
                .create(dir)
                .await
                .with_context(|| format!("failed to create notes directory {}", dir.display()))
        }
        Err(e) => Err(e)
            .with_context(|| format!("failed to stat notes directory {}", dir.display())),
    }
}

/// Look up the selector in `search_path` (a PATH-style list), failing with an
/// install hint when it is not there.
pub fn find_selector(search_path: Option<OsString>) -> Result<PathBuf> {
    let cwd = std::env::current_dir().unwrap_or_default();
    let found = which::which_in(SELECTOR_PROGRAM, search_path, cwd)
        .map_err(|_| anyhow!("fzf not found in PATH. Please install fzf to enable note searching"))?;
    debug!("selector found at {}", found.display());
    Ok(found)
}
