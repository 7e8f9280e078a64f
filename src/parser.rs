/// Stateless handling of note file names: `DD-Mon-YYYY <title>.md`.
use std::cmp::{Ordering, Reverse};

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;

pub const NOTE_EXT: &str = ".md";
pub const DATE_FORMAT: &str = "%d-%b-%Y";
const DATE_PREFIX_LEN: usize = 11;

static RE_DATE_PREFIX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\d{2}-(Jan|Feb|Mar|Apr|May|Jun|Jul|Aug|Sep|Oct|Nov|Dec)-\d{4}$").unwrap()
});

/// Parse the 11-character creation date at the start of a note name.
/// Short names and malformed prefixes yield None.
pub fn parse_date_prefix(name: &str) -> Option<NaiveDate> {
    let prefix = name.get(..DATE_PREFIX_LEN)?;
    if !RE_DATE_PREFIX.is_match(prefix) {
        return None;
    }
    NaiveDate::parse_from_str(prefix, DATE_FORMAT).ok()
}

/// File name without its trailing `.md`, or None when it is not a note name.
pub fn note_stem(name: &str) -> Option<&str> {
    name.strip_suffix(NOTE_EXT)
}

/// Newest-first by date prefix; ties and undated names by name ascending.
/// Undated names sort after every dated one.
pub fn compare_names(a: &str, b: &str) -> Ordering {
    let key = |name: &str| {
        let date = parse_date_prefix(name);
        (date.is_none(), Reverse(date))
    };
    key(a).cmp(&key(b)).then_with(|| a.cmp(b))
}

/// File name for a note created on `date` with the given title.
pub fn new_note_name(date: NaiveDate, title: &str) -> String {
    format!("{} {title}{NOTE_EXT}", date.format(DATE_FORMAT))
}
