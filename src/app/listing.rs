//! Directory listing tokenizer and summarizer
//!
//! NCEP exposes its archive as plain HTML directory listings. Everything the
//! resolver needs is carried by attribute values that contain a dot: the
//! top-level page links to `format.date[cycle]/` directories and each of those
//! links to individual files. The functions here are pure; every call starts
//! from the markup it is given and keeps nothing between calls.

use scraper::{ElementRef, Html};
use tracing::trace;

use crate::app::models::{FileLink, Token};
use crate::constants::listing;

/// Extract every dotted attribute pair from the start tags of `markup`
///
/// An attribute qualifies when its value contains a `.` past the first
/// character, which leaves out `../` parent links and dot-files. Document
/// order is preserved and duplicates are kept.
pub fn tokenize(markup: &str) -> Vec<Token> {
    let document = Html::parse_document(markup);

    document
        .root_element()
        .descendants()
        .filter_map(ElementRef::wrap)
        .flat_map(|element| {
            element
                .value()
                .attrs()
                .filter(|(_, value)| has_inner_dot(value))
                .map(|(name, value)| Token::new(name, value))
                .collect::<Vec<_>>()
        })
        .collect()
}

fn has_inner_dot(value: &str) -> bool {
    value.find('.').is_some_and(|index| index > 0)
}

/// True for values naming an entry of the listed directory itself
///
/// Icon sources (`/icons/folder.gif`) and links elsewhere carry a path.
fn is_local_entry(value: &str) -> bool {
    !value.trim_end_matches('/').contains('/')
}

/// Split a top-level directory token into its format and raw date parts
///
/// Returns `None` for values that are not exactly `format.date`, such as icon
/// paths or file names that also carry dots.
fn split_directory(token: &Token) -> Option<(String, String)> {
    if !is_local_entry(&token.value) {
        trace!("Skipping non-local token {}", token);
        return None;
    }
    let value = token.value.trim_end_matches('/');
    let mut parts = value.split('.');
    let (extension, date) = (parts.next()?, parts.next()?);
    if parts.next().is_some() {
        trace!("Skipping non-directory token {}", token);
        return None;
    }

    let extension = clean_extension(extension);
    let date = clean_date(date);
    if extension.is_empty() || date.is_empty() {
        return None;
    }
    Some((extension, date))
}

fn clean_extension(raw: &str) -> String {
    raw.chars().filter(|c| !matches!(c, '\'' | ' ')).collect()
}

fn clean_date(raw: &str) -> String {
    raw.chars()
        .filter(|c| !matches!(c, '/' | ')' | '\''))
        .collect()
}

fn clean_link(raw: &str) -> String {
    raw.chars()
        .filter(|c| !matches!(c, ')' | '\'' | ' '))
        .collect()
}

/// Distinct directory formats in first-seen order (e.g., "gfs", "gdas")
pub fn distinct_formats(tokens: &[Token]) -> Vec<String> {
    let mut formats: Vec<String> = Vec::new();
    for (extension, _) in tokens.iter().filter_map(split_directory) {
        if !formats.contains(&extension) {
            formats.push(extension);
        }
    }
    formats
}

/// Distinct run dates in first-seen order
///
/// Cycle-qualified directories such as `gfs.2018032218` are cut back to their
/// eight-character date before deduplication.
pub fn distinct_dates(tokens: &[Token]) -> Vec<String> {
    let mut dates: Vec<String> = Vec::new();
    for (_, date) in tokens.iter().filter_map(split_directory) {
        let date = truncate_cycle_suffix(date);
        if !dates.contains(&date) {
            dates.push(date);
        }
    }
    dates
}

fn truncate_cycle_suffix(mut date: String) -> String {
    if date.chars().count() > listing::DATE_LENGTH {
        let cut = date
            .char_indices()
            .rev()
            .nth(listing::CYCLE_SUFFIX_LENGTH - 1);
        if let Some((keep, _)) = cut {
            date.truncate(keep);
        }
    }
    date
}

/// Top-level listing indexed by format, in insertion order
///
/// Dates keep their cycle suffix and are not deduplicated, so a format lists
/// one entry per directory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirectoryIndex {
    entries: Vec<(String, Vec<String>)>,
}

impl DirectoryIndex {
    /// Build the index from a top-level listing
    pub fn from_tokens(tokens: &[Token]) -> Self {
        let mut index = Self::default();
        for (extension, date) in tokens.iter().filter_map(split_directory) {
            index.push(extension, date);
        }
        index
    }

    fn push(&mut self, extension: String, date: String) {
        match self.entries.iter_mut().find(|(ext, _)| *ext == extension) {
            Some((_, dates)) => dates.push(date),
            None => self.entries.push((extension, vec![date])),
        }
    }

    /// Dates listed under `format`, if the format exists
    pub fn dates(&self, format: &str) -> Option<&[String]> {
        self.entries
            .iter()
            .find(|(ext, _)| ext == format)
            .map(|(_, dates)| dates.as_slice())
    }

    /// First format, in listing order, whose dates include `date`
    pub fn first_format_with(&self, date: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(_, dates)| dates.iter().any(|d| d == date))
            .map(|(ext, _)| ext.as_str())
    }

    pub fn formats(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(ext, _)| ext.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries
            .iter()
            .map(|(ext, dates)| (ext.as_str(), dates.as_slice()))
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// File links from a sub-directory listing, index sidecars removed
///
/// Only entries of the directory itself count; icon sources and other
/// path-valued attributes are dropped.
pub fn extract_file_links(tokens: &[Token]) -> Vec<FileLink> {
    tokens
        .iter()
        .map(|token| clean_link(&token.value))
        .filter(|name| {
            !name.is_empty() && is_local_entry(name) && !name.ends_with(listing::INDEX_SUFFIX)
        })
        .map(FileLink::new)
        .collect()
}
