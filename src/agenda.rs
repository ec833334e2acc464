//! Agenda entries and the agenda file loader
//!
//! An agenda file holds one `label,durationSeconds` entry per line. Lines that
//! do not fit that shape are dropped without complaint.

use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// One topic of the meeting plan
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgendaEntry {
    pub label: String,
    pub duration_seconds: u64,
}

impl AgendaEntry {
    pub fn new(label: impl Into<String>, duration_seconds: u64) -> Self {
        Self {
            label: label.into(),
            duration_seconds,
        }
    }
}

/// Ordered list of topics, loaded once and never mutated
pub type Agenda = Vec<AgendaEntry>;

/// Parse a single agenda line, returning `None` for anything malformed
pub fn parse_line(line: &str) -> Option<AgendaEntry> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }

    let parts: Vec<&str> = line.split(',').collect();
    if parts.len() != 2 {
        return None;
    }

    let duration = parts[1].trim().parse::<u64>().ok()?;
    Some(AgendaEntry::new(parts[0].trim(), duration))
}

/// Parse the full text of an agenda file, preserving line order
pub fn parse_agenda(contents: &str) -> Agenda {
    contents
        .lines()
        .enumerate()
        .filter_map(|(number, line)| {
            let entry = parse_line(line);
            if entry.is_none() && !line.trim().is_empty() {
                debug!("Dropping malformed agenda line {}: {:?}", number + 1, line);
            }
            entry
        })
        .collect()
}

/// Read and parse an agenda file from disk
pub async fn load_agenda_from_file(path: impl AsRef<Path>) -> anyhow::Result<Agenda> {
    let path = path.as_ref();
    let contents = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read agenda file {}", path.display()))?;

    Ok(parse_agenda(&contents))
}
