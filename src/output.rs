//! CLI output formatting.
//!
//! Each entry is shown by its position and title, with the details that
//! decide how it renders as indented context lines:
//!
//! ```text
//! 001 New EP out now → 5d0a5c1e.html
//!     Date: 3.5.24
//!     Tags: release, music
//!     Content: text, embed (bandcamp), image (medium), audio
//!     Accent: hsla(35, 70%, 45%, 0.6)
//! 002 Pinned note → 7f3e.html
//!     Pinned
//!     Content (legacy): text
//!     Accent: hsla(10, 70%, 45%, 0.6)
//!
//! Rendered 2 entries → dist/email
//! ```
//!
//! `format_*` functions are pure and return lines; `print_*` wrappers write
//! them to stdout.

use crate::accent;
use crate::entries::file_stem;
use crate::render::{embed, format_date};
use crate::types::{ContentBlock, Entry};
use std::path::Path;

fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// One-word description of a block, with the detail that picks its layout.
pub fn block_summary(block: &ContentBlock) -> String {
    match block {
        ContentBlock::Embed { target } => {
            let kind = embed::classify(target.as_deref().unwrap_or_default()).kind;
            format!("embed ({})", kind.name())
        }
        ContentBlock::Image { size, .. } => {
            format!("image ({})", size.unwrap_or_default().name())
        }
        other => other.kind().to_string(),
    }
}

/// Context lines describing one entry.
pub fn entry_details(entry: &Entry) -> Vec<String> {
    let mut lines = Vec::new();
    match entry.date {
        Some(date) => lines.push(format!("{}Date: {}", indent(1), format_date(date))),
        None if entry.pinned => lines.push(format!("{}Pinned", indent(1))),
        None => {}
    }
    if !entry.tags.is_empty() {
        lines.push(format!("{}Tags: {}", indent(1), entry.tags.join(", ")));
    }

    let blocks = entry.content_blocks();
    let label = if entry.blocks.is_empty() && !blocks.is_empty() {
        "Content (legacy)"
    } else {
        "Content"
    };
    let summary = if blocks.is_empty() {
        "none".to_string()
    } else {
        blocks.iter().map(block_summary).collect::<Vec<_>>().join(", ")
    };
    lines.push(format!("{}{label}: {summary}", indent(1)));

    lines.push(format!("{}Accent: {}", indent(1), accent::glow_color(&entry.id)));
    lines
}

/// Report for `check`: every entry with its details.
pub fn format_check_output(entries: &[&Entry]) -> Vec<String> {
    let mut lines = Vec::new();
    for (idx, entry) in entries.iter().enumerate() {
        lines.push(format!("{} {}", format_index(idx + 1), entry.title));
        lines.extend(entry_details(entry));
    }
    lines.push(String::new());
    lines.push(format!("{} valid {}", entries.len(), plural(entries.len())));
    lines
}

/// Report for `render`: like `check`, plus the file each entry went to.
pub fn format_render_output(entries: &[&Entry], output_dir: &Path) -> Vec<String> {
    let mut lines = Vec::new();
    for (idx, entry) in entries.iter().enumerate() {
        lines.push(format!(
            "{} {} → {}.html",
            format_index(idx + 1),
            entry.title,
            file_stem(&entry.id)
        ));
        lines.extend(entry_details(entry));
    }
    lines.push(String::new());
    lines.push(format!(
        "Rendered {} {} → {}",
        entries.len(),
        plural(entries.len()),
        output_dir.display()
    ));
    lines
}

fn plural(count: usize) -> &'static str {
    if count == 1 { "entry" } else { "entries" }
}

pub fn print_check_output(entries: &[&Entry]) {
    for line in format_check_output(entries) {
        println!("{}", line);
    }
}

pub fn print_render_output(entries: &[&Entry], output_dir: &Path) {
    for line in format_render_output(entries, output_dir) {
        println!("{}", line);
    }
}
