//! Inline styles shared by the block renderers.
//!
//! Email clients strip `<style>` blocks and ignore CSS variables, so every
//! element carries its own `style` attribute.

use maud::PreEscaped;

pub const MONO: &str = "'IBM Plex Mono', 'Courier New', monospace";

/// Centered block wrapper used by every media block.
pub const CENTERED: &str = "text-align: center; margin: 16px 0;";

/// Bordered call-to-action link. Embeds append a glow.
pub const BUTTON: &str = "display: inline-block; padding: 12px 20px; border: 1px solid #000000; text-decoration: none; color: #000000; font-family: 'IBM Plex Mono', 'Courier New', monospace; font-size: 13px;";

pub const CAPTION_LINK: &str =
    "color: #000000; font-size: 13px; font-family: 'IBM Plex Mono', 'Courier New', monospace;";

pub const TEXT_BLOCK: &str = "line-height: 1.6; margin-bottom: 16px;";

/// ▶
pub const PLAY: PreEscaped<&str> = PreEscaped("&#9654;");
