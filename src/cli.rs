use std::path::PathBuf;

use clap::Parser;

#[derive(Parser)]
#[command(
    name = "note",
    version,
    about = "Quick and easy note taking",
    long_about = "Really quick and easy note taking. Opens markdown notes in $EDITOR and uses fzf \
                  to pick between several matches.\n\n\
                  Notes live in $NOTES_DIRECTORY, defaulting to ~/.notes."
)]
pub struct Cli {
    /// Just list notes, don't open the editor
    #[arg(short, long)]
    pub list: bool,

    /// Notes directory (overrides NOTES_DIRECTORY env and ~/.notes default)
    #[arg(long)]
    pub notes_dir: Option<PathBuf>,

    /// Title words; joined with single spaces into the search query
    pub title: Vec<String>,
}

impl Cli {
    pub fn query(&self) -> String {
        self.title.join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_joins_words() {
        let cli = Cli::parse_from(["note", "grocery", "list"]);
        assert_eq!(cli.query(), "grocery list");
        assert!(!cli.list);
    }

    #[test]
    fn test_query_empty_without_words() {
        let cli = Cli::parse_from(["note", "-l"]);
        assert_eq!(cli.query(), "");
        assert!(cli.list);
    }

    #[test]
    fn test_list_flag_long_and_dir() {
        let cli = Cli::parse_from(["note", "--list", "--notes-dir", "/tmp/n", "alp"]);
        assert!(cli.list);
        assert_eq!(cli.notes_dir, Some(PathBuf::from("/tmp/n")));
        assert_eq!(cli.query(), "alp");
    }
}
