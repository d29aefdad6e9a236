//! Entry → email-safe HTML.
//!
//! Everything here is a pure function of the entry and the site config: no
//! I/O, no shared state, identical output for identical input. Missing or
//! malformed content never fails a render; it is left out of the document.
//!
//! ## Document Layout
//!
//! ```text
//! header   date (M.D.YY) · title (highlighted for `release`) · tag chips
//! body     blocks in order, or legacy fields (image, embed, text, audio)
//! footer   "View on {site name}" → {site url}/#{entry id}
//! ```
//!
//! All markup is inline-styled; see [`style`].

pub mod embed;
pub mod media;
pub mod style;
pub mod text;

use crate::accent;
use crate::config::SiteConfig;
use crate::types::{ContentBlock, Entry};
use chrono::{Datelike, NaiveDate};
use maud::{DOCTYPE, Markup, html};

/// Render a single block, or `None` if it has nothing to show.
pub fn render_block(block: &ContentBlock, glow: &str) -> Option<Markup> {
    let rendered = match block {
        ContentBlock::Text { body } => text::render_text(body.as_deref().unwrap_or_default()),
        ContentBlock::Embed { target } => {
            embed::render_embed(target.as_deref().unwrap_or_default(), glow)
        }
        ContentBlock::Image { asset_url, size } => media::render_image(
            asset_url.as_deref().unwrap_or_default(),
            size.unwrap_or_default(),
        ),
        ContentBlock::Audio { asset_url } => {
            media::render_audio(asset_url.as_deref().unwrap_or_default())
        }
        ContentBlock::Unsupported => None,
    };
    if rendered.is_none() {
        tracing::debug!(kind = block.kind(), "block has no content, skipped");
    }
    rendered
}

/// Render the entry's content (blocks, or legacy fields when there are none),
/// one fragment per non-empty block, joined by newlines.
pub fn render_body(entry: &Entry, glow: &str) -> Markup {
    let fragments: Vec<Markup> = entry
        .content_blocks()
        .iter()
        .filter_map(|block| render_block(block, glow))
        .collect();
    html! {
        @for (idx, fragment) in fragments.iter().enumerate() {
            @if idx > 0 { "\n" }
            (fragment)
        }
    }
}

/// Site date format: month.day.two-digit-year, no padding on month or day.
pub fn format_date(date: NaiveDate) -> String {
    format!(
        "{}.{}.{:02}",
        date.month(),
        date.day(),
        date.year().rem_euclid(100)
    )
}

/// Date, title and tag chips.
pub fn render_header(entry: &Entry, config: &SiteConfig) -> Markup {
    let title_style = if entry.is_release() {
        format!(
            "font-size: 15px; font-weight: 400; background: {}; display: inline-block; padding: 0 4px;",
            config.theme.highlight
        )
    } else {
        "font-size: 15px; font-weight: 400;".to_string()
    };
    html! {
        div style="margin-bottom: 24px; border-bottom: 1px solid #000000; padding-bottom: 16px;" {
            @if let Some(date) = entry.date {
                div style="font-size: 12px; opacity: 0.6; margin-bottom: 4px;" { (format_date(date)) }
            }
            div style=(title_style) { (entry.title) }
            @if !entry.tags.is_empty() {
                div style="margin-top: 8px;" {
                    @for tag in &entry.tags {
                        span style={ "display: inline-block; padding: 2px 6px; border: 1px solid #000000; font-size: 12px; margin-right: 6px; font-family: " (style::MONO) ";" } { (tag) }
                    }
                }
            }
        }
    }
}

/// Link back to the entry on the site.
pub fn render_footer(entry: &Entry, config: &SiteConfig) -> Markup {
    html! {
        div style="margin-top: 32px; padding-top: 16px; border-top: 1px solid #000000; font-size: 12px;" {
            a href=(config.site.permalink(&entry.id)) style="color: #000000;" { "View on " (config.site.name) }
        }
    }
}

/// Wrap header, body and footer in a complete HTML document.
pub fn document(config: &SiteConfig, header: Markup, body: Markup, footer: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                link href=(config.theme.font_stylesheet) rel="stylesheet";
            }
            body style={ "margin: 0; padding: 0; background: #ffffff; color: #000000; font-family: " (style::MONO) "; font-size: 14px; line-height: 1.5;" } {
                div style="max-width: 640px; margin: 0 auto; padding: 32px 16px;" {
                    (header)
                    (body)
                    (footer)
                }
            }
        }
    }
}

/// Render an entry as a self-contained HTML document.
pub fn render_entry(entry: &Entry, config: &SiteConfig) -> Markup {
    let glow = accent::glow_color(&entry.id);
    document(
        config,
        render_header(entry, config),
        render_body(entry, &glow),
        render_footer(entry, config),
    )
}

/// [`render_entry`] as a string, ready to send or wrap in a feed item.
pub fn render_entry_html(entry: &Entry, config: &SiteConfig) -> String {
    render_entry(entry, config).into_string()
}
