//! # cabbages
//!
//! Renders cabbages.info log entries as email-safe HTML.
//!
//! Entries live in a hosted CMS. Each one is either an ordered list of
//! content blocks (text, embed, image, audio) or, for entries written before
//! blocks existed, a handful of flat fields. This crate turns one entry into
//! one self-contained HTML document that can be sent as an email body or
//! dropped into a feed item's `content:encoded`.
//!
//! ```text
//! CMS export (JSON)  →  entries::load_entries  →  render::render_entry  →  {id}.html
//! ```
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`types`] | `Entry`, `ContentBlock` and friends, deserialized from the CMS export |
//! | [`entries`] | Export loading, entry validation, email selection |
//! | [`render`] | Entry → HTML document; one submodule per block kind |
//! | [`accent`] | Deterministic per-entry glow colour |
//! | [`config`] | `config.toml` loading and validation |
//! | [`output`] | CLI report formatting |
//!
//! # Design Decisions
//!
//! ## Email First
//!
//! Email clients drop iframes, `<style>` blocks and CSS variables. Every
//! element is inline-styled, and embeds become links: a thumbnail for
//! YouTube, a glowing button for SoundCloud and Bandcamp, a plain link for
//! everything else.
//!
//! ## Best-Effort Rendering
//!
//! Rendering never fails. An image without a URL, an unknown block kind or
//! an unparseable Bandcamp link is left out or degraded, never reported as an
//! error. Validation happens once, when an export is loaded.
//!
//! ## Maud for Markup
//!
//! HTML is built with [Maud](https://maud.lambda.xyz/): every interpolated
//! title, tag, URL and label is escaped by construction, so there is no
//! separate escaping step to forget.

pub mod accent;
pub mod config;
pub mod entries;
pub mod output;
pub mod render;
pub mod types;

pub use render::{render_entry, render_entry_html};

#[cfg(test)]
pub(crate) mod test_helpers;
