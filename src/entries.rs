//! Loading entries exported from the CMS.
//!
//! An export is the JSON result of a CMS query: either one entry object
//! (a `[0]` query) or an array of them. Both shapes are accepted.

use crate::types::Entry;
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid entry `{id}`: {reason}")]
    Invalid { id: String, reason: String },
    #[error("Entries `{first}` and `{second}` would both be written to `{stem}.html`")]
    DuplicateStem {
        stem: String,
        first: String,
        second: String,
    },
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Export {
    Many(Vec<Entry>),
    One(Box<Entry>),
}

/// Parse an export without validating it.
pub fn parse_entries(json: &str) -> Result<Vec<Entry>, LoadError> {
    let entries = match serde_json::from_str::<Export>(json) {
        Ok(Export::Many(entries)) => entries,
        Ok(Export::One(entry)) => vec![*entry],
        // Untagged errors are opaque; retry as a single entry for a useful message
        Err(_) => vec![serde_json::from_str::<Entry>(json)?],
    };
    Ok(entries)
}

/// Read, parse and validate an export file.
pub fn load_entries(path: &Path) -> Result<Vec<Entry>, LoadError> {
    let content = fs::read_to_string(path)?;
    let entries = parse_entries(&content)?;
    for entry in &entries {
        validate(entry)?;
    }
    tracing::debug!(count = entries.len(), path = %path.display(), "loaded entries");
    Ok(entries)
}

/// Check the invariants the CMS schema enforces on its side.
pub fn validate(entry: &Entry) -> Result<(), LoadError> {
    let invalid = |reason: &str| LoadError::Invalid {
        id: entry.id.clone(),
        reason: reason.to_string(),
    };
    if entry.id.trim().is_empty() {
        return Err(invalid("missing _id"));
    }
    if entry.title.trim().is_empty() {
        return Err(invalid("title is required"));
    }
    if entry.date.is_none() && !entry.pinned {
        return Err(invalid("date is required for non-pinned entries"));
    }
    Ok(())
}

/// Entries flagged for email, newest first, at most `limit` of them.
///
/// Same order as the site feed: date descending, then creation time
/// descending. Undated entries and entries without a creation time sort
/// last; remaining ties keep export order.
pub fn select_for_email(entries: &[Entry], limit: usize) -> Vec<&Entry> {
    let mut selected: Vec<&Entry> = entries.iter().filter(|e| e.publish_to_email).collect();
    selected.sort_by(|a, b| {
        b.date
            .cmp(&a.date)
            .then_with(|| b.created_at.cmp(&a.created_at))
    });
    selected.truncate(limit);
    selected
}

/// Output file stem for an entry: its id with anything outside
/// `[A-Za-z0-9._-]` replaced by `-`.
pub fn file_stem(id: &str) -> String {
    id.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '-'
            }
        })
        .collect()
}

/// Fail if two entries would be written to the same file.
pub fn check_file_stems(entries: &[&Entry]) -> Result<(), LoadError> {
    let mut seen: HashMap<String, &str> = HashMap::new();
    for entry in entries {
        let stem = file_stem(&entry.id);
        if let Some(first) = seen.get(&stem) {
            return Err(LoadError::DuplicateStem {
                stem,
                first: first.to_string(),
                second: entry.id.clone(),
            });
        }
        seen.insert(stem, &entry.id);
    }
    Ok(())
}
