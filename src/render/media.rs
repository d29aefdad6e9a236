//! Image and audio blocks.

use super::style;
use crate::types::ImageSize;
use maud::{Markup, html};

/// Centered responsive image capped at the size's max width.
pub fn render_image(asset_url: &str, size: ImageSize) -> Option<Markup> {
    if asset_url.is_empty() {
        return None;
    }
    Some(html! {
        div style=(style::CENTERED) {
            img src=(asset_url) alt="" style={ "max-width: " (size.max_width()) "; height: auto; display: block; margin: 0 auto;" };
        }
    })
}

/// Audio files become a download/play link; email can't embed a player.
pub fn render_audio(asset_url: &str) -> Option<Markup> {
    if asset_url.is_empty() {
        return None;
    }
    Some(html! {
        div style=(style::CENTERED) {
            a href=(asset_url) style=(style::BUTTON) { (style::PLAY) " Listen / Download Audio" }
        }
    })
}
