//! Entry and content block types, as exported by the CMS.
//!
//! Field names on the wire follow the CMS query projection (`_id`, `_type`,
//! `imageUrl`, `publishToEmail`, ...). The CMS returns `null` for every
//! projected field a document doesn't have, so every field here tolerates
//! `null` as well as absence.

use chrono::{DateTime, FixedOffset, NaiveDate};
use serde::de::{self, Deserializer};
use serde::Deserialize;

/// One published log entry.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Entry {
    #[serde(rename = "_id")]
    pub id: String,
    /// Publication date. Pinned entries may have none.
    #[serde(default, deserialize_with = "deserialize_date")]
    pub date: Option<NaiveDate>,
    /// CMS creation timestamp; orders entries sharing a date.
    #[serde(default, rename = "_createdAt")]
    pub created_at: Option<DateTime<FixedOffset>>,
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tags: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub blocks: Vec<ContentBlock>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub pinned: bool,
    #[serde(default, rename = "publishToEmail", deserialize_with = "null_as_default")]
    pub publish_to_email: bool,
    /// Pre-blocks fields, only rendered when `blocks` is empty.
    #[serde(flatten)]
    pub legacy: LegacyFields,
}

impl Entry {
    /// Whether the entry carries the `release` tag.
    pub fn is_release(&self) -> bool {
        self.tags.iter().any(|t| t == "release")
    }

    /// The block sequence to render: the entry's own blocks, or the legacy
    /// fields when there are none. Never a mix of both.
    pub fn content_blocks(&self) -> Vec<ContentBlock> {
        if self.blocks.is_empty() {
            self.legacy.as_blocks()
        } else {
            self.blocks.clone()
        }
    }
}

/// A typed unit of content.
///
/// Unknown `_type` tags deserialize to [`ContentBlock::Unsupported`] so a new
/// block kind in the CMS never breaks rendering of existing ones.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "_type")]
pub enum ContentBlock {
    #[serde(rename = "textBlock")]
    Text {
        #[serde(rename = "text")]
        body: Option<String>,
    },
    #[serde(rename = "embedBlock")]
    Embed {
        #[serde(rename = "url")]
        target: Option<String>,
    },
    #[serde(rename = "imageBlock")]
    Image {
        #[serde(rename = "imageUrl")]
        asset_url: Option<String>,
        size: Option<ImageSize>,
    },
    #[serde(rename = "audioBlock")]
    Audio {
        #[serde(rename = "audioUrl")]
        asset_url: Option<String>,
    },
    #[serde(other)]
    Unsupported,
}

impl ContentBlock {
    /// Short lowercase name of the block kind, for reports and logs.
    pub fn kind(&self) -> &'static str {
        match self {
            ContentBlock::Text { .. } => "text",
            ContentBlock::Embed { .. } => "embed",
            ContentBlock::Image { .. } => "image",
            ContentBlock::Audio { .. } => "audio",
            ContentBlock::Unsupported => "unsupported",
        }
    }
}

/// Display width of an image block.
///
/// Any value the CMS sends that isn't one of the four known sizes is treated
/// as [`ImageSize::Full`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum ImageSize {
    Small,
    Medium,
    Large,
    #[default]
    Full,
}

impl ImageSize {
    pub fn from_name(name: &str) -> Self {
        match name {
            "small" => ImageSize::Small,
            "medium" => ImageSize::Medium,
            "large" => ImageSize::Large,
            _ => ImageSize::Full,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ImageSize::Small => "small",
            ImageSize::Medium => "medium",
            ImageSize::Large => "large",
            ImageSize::Full => "full",
        }
    }

    /// CSS `max-width` for the image.
    pub fn max_width(self) -> &'static str {
        match self {
            ImageSize::Small => "200px",
            ImageSize::Medium => "400px",
            ImageSize::Large => "600px",
            ImageSize::Full => "100%",
        }
    }
}

impl From<String> for ImageSize {
    fn from(name: String) -> Self {
        ImageSize::from_name(&name)
    }
}

/// Flat single-slot fields from before entries had a block sequence.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct LegacyFields {
    #[serde(default, rename = "imageUrl")]
    pub image_url: Option<String>,
    #[serde(default, rename = "embedUrl")]
    pub embed_url: Option<String>,
    /// Free-text notes (markdown).
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default, rename = "audioUrl")]
    pub audio_url: Option<String>,
}

impl LegacyFields {
    /// Present fields as blocks, in the fixed order image, embed, text, audio.
    pub fn as_blocks(&self) -> Vec<ContentBlock> {
        let mut blocks = Vec::new();
        if let Some(url) = present(&self.image_url) {
            blocks.push(ContentBlock::Image {
                asset_url: Some(url.to_string()),
                size: Some(ImageSize::Full),
            });
        }
        if let Some(target) = present(&self.embed_url) {
            blocks.push(ContentBlock::Embed {
                target: Some(target.to_string()),
            });
        }
        if let Some(body) = present(&self.content) {
            blocks.push(ContentBlock::Text {
                body: Some(body.to_string()),
            });
        }
        if let Some(url) = present(&self.audio_url) {
            blocks.push(ContentBlock::Audio {
                asset_url: Some(url.to_string()),
            });
        }
        blocks
    }

    pub fn is_empty(&self) -> bool {
        self.as_blocks().is_empty()
    }
}

/// `Some` non-empty string, otherwise `None`.
fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

/// Parse a CMS date: a plain `YYYY-MM-DD` date, or an RFC 3339 timestamp
/// whose calendar date (in its own offset) is taken.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.date_naive()))
}

fn deserialize_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    raw.map(|s| parse_date(&s).ok_or_else(|| de::Error::custom(format!("invalid date `{s}`"))))
        .transpose()
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
