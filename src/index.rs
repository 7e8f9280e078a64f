use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tokio::fs;
use tracing::debug;

use crate::parser;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteEntry {
    /// Base name, e.g. `07-Mar-2025 grocery list.md`
    pub name: String,
    pub path: PathBuf,
}

/// Candidate notes for `query`, newest first.
///
/// An empty query matches every note. Otherwise the query is a literal
/// substring of the name with its `.md` suffix removed, the same set the
/// shell pattern `*<query>*.md` would select.
pub async fn match_set(notes_dir: &Path, query: &str) -> Result<Vec<NoteEntry>> {
    let mut entries = fs::read_dir(notes_dir)
        .await
        .with_context(|| format!("failed to read notes directory {}", notes_dir.display()))?;

    let mut notes = Vec::new();
    while let Some(entry) = entries
        .next_entry()
        .await
        .with_context(|| format!("failed to read notes directory {}", notes_dir.display()))?
    {
        let Ok(name) = entry.file_name().into_string() else {
            continue;
        };
        let Some(stem) = parser::note_stem(&name) else {
            continue;
        };
        if !query.is_empty() && !stem.contains(query) {
            continue;
        }
        // follows symlinks, like a glob followed by open would
        let is_file = fs::metadata(entry.path())
            .await
            .map(|m| m.is_file())
            .unwrap_or(false);
        if !is_file {
            continue;
        }
        notes.push(NoteEntry {
            path: entry.path(),
            name,
        });
    }

    notes.sort_by(|a, b| parser::compare_names(&a.name, &b.name));
    debug!("query {query:?} matched {} note(s)", notes.len());
    Ok(notes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn touch(dir: &Path, name: &str) {
        std::fs::write(dir.join(name), "").unwrap();
    }

    fn names(notes: &[NoteEntry]) -> Vec<&str> {
        notes.iter().map(|n| n.name.as_str()).collect()
    }

    #[tokio::test]
    async fn test_empty_query_lists_all_newest_first() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "07-Mar-2025 alpha.md");
        touch(tmp.path(), "09-Mar-2025 alpine.md");
        touch(tmp.path(), "readme.txt");
        std::fs::create_dir(tmp.path().join("10-Mar-2025 folder.md")).unwrap();

        let notes = match_set(tmp.path(), "").await.unwrap();
        assert_eq!(names(&notes), vec!["09-Mar-2025 alpine.md", "07-Mar-2025 alpha.md"]);
        assert_eq!(notes[0].path, tmp.path().join("09-Mar-2025 alpine.md"));
    }

    #[tokio::test]
    async fn test_substring_query() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "07-Mar-2025 alpha.md");
        touch(tmp.path(), "09-Mar-2025 alpine.md");
        touch(tmp.path(), "09-Mar-2025 beta.md");

        let notes = match_set(tmp.path(), "alp").await.unwrap();
        assert_eq!(names(&notes), vec!["09-Mar-2025 alpine.md", "07-Mar-2025 alpha.md"]);

        let notes = match_set(tmp.path(), "alph").await.unwrap();
        assert_eq!(names(&notes), vec!["07-Mar-2025 alpha.md"]);

        let notes = match_set(tmp.path(), "Mar-2025 b").await.unwrap();
        assert_eq!(names(&notes), vec!["09-Mar-2025 beta.md"]);
    }

    #[tokio::test]
    async fn test_query_is_literal_and_before_suffix() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "07-Mar-2025 a*b.md");
        touch(tmp.path(), "07-Mar-2025 axb.md");

        let notes = match_set(tmp.path(), "a*b").await.unwrap();
        assert_eq!(names(&notes), vec!["07-Mar-2025 a*b.md"]);

        // the suffix itself is not searchable
        assert!(match_set(tmp.path(), ".md").await.unwrap().is_empty());
        assert!(match_set(tmp.path(), "nothing").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_missing_dir_is_error() {
        let tmp = TempDir::new().unwrap();
        let err = match_set(&tmp.path().join("nope"), "").await.unwrap_err();
        assert!(err.to_string().contains("failed to read notes directory"));
    }

    #[tokio::test]
    async fn test_listing_is_read_only() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "07-Mar-2025 alpha.md");
        let path = tmp.path().join("07-Mar-2025 alpha.md");
        let before = std::fs::metadata(&path).unwrap().modified().unwrap();

        match_set(tmp.path(), "").await.unwrap();

        let after = std::fs::metadata(&path).unwrap().modified().unwrap();
        assert_eq!(before, after);
        assert_eq!(std::fs::read_dir(tmp.path()).unwrap().count(), 1);
    }
}
