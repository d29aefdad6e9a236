//! Shared builders for unit tests.
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let mut e = dated_entry("abc", "New track", 2024, 3, 5);
//! e.blocks = vec![text_block("hello"), embed_block("https://youtu.be/abc123")];
//! ```

use chrono::NaiveDate;

use crate::types::{ContentBlock, Entry, ImageSize, LegacyFields};

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day)
        .unwrap_or_else(|| panic!("invalid test date {year}-{month}-{day}"))
}

/// An undated entry with no tags and no content.
pub fn entry(id: &str, title: &str) -> Entry {
    Entry {
        id: id.to_string(),
        date: None,
        created_at: None,
        title: title.to_string(),
        tags: Vec::new(),
        blocks: Vec::new(),
        pinned: false,
        publish_to_email: false,
        legacy: LegacyFields::default(),
    }
}

pub fn dated_entry(id: &str, title: &str, year: i32, month: u32, day: u32) -> Entry {
    Entry {
        date: Some(date(year, month, day)),
        ..entry(id, title)
    }
}

pub fn text_block(body: &str) -> ContentBlock {
    ContentBlock::Text {
        body: Some(body.to_string()),
    }
}

pub fn embed_block(target: &str) -> ContentBlock {
    ContentBlock::Embed {
        target: Some(target.to_string()),
    }
}

pub fn image_block(url: &str, size: Option<ImageSize>) -> ContentBlock {
    ContentBlock::Image {
        asset_url: Some(url.to_string()),
        size,
    }
}

pub fn audio_block(url: &str) -> ContentBlock {
    ContentBlock::Audio {
        asset_url: Some(url.to_string()),
    }
}

/// A dated release entry using every block kind.
pub fn sample_entry() -> Entry {
    let mut e = dated_entry("5d0a5c1e", "New EP out now", 2024, 3, 5);
    e.tags = vec!["release".to_string(), "music".to_string()];
    e.blocks = vec![
        text_block("Four songs.\nRecorded in the shed.\nhttps://youtu.be/abc123"),
        embed_block("https://someartist.bandcamp.com/album/shed-songs"),
        image_block("https://cdn.example/cover.jpg", Some(ImageSize::Medium)),
        audio_block("https://cdn.example/preview.mp3"),
    ];
    e
}
