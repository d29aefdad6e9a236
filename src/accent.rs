//! Per-entry accent colour.
//!
//! Embed call-to-action elements carry a soft glow whose hue is picked from a
//! fixed three-colour palette by hashing the entry id. The hash is the classic
//! `h * 31 + c` rolling hash over UTF-16 code units in wrapping `i32`
//! arithmetic, so the same id lands on the same colour on the site, in email,
//! and in the feed.

/// Palette hues in degrees: rust, gold, blue.
pub const HUES: [u16; 3] = [10, 35, 200];

/// Rolling 32-bit hash of `id` over its UTF-16 code units.
pub fn hash_id(id: &str) -> i32 {
    id.encode_utf16()
        .fold(0i32, |hash, unit| hash.wrapping_mul(31).wrapping_add(i32::from(unit)))
}

/// Hue picked from [`HUES`] for `id`.
pub fn hue_for(id: &str) -> u16 {
    // unsigned_abs keeps i32::MIN at 2^31 instead of overflowing
    let index = hash_id(id).unsigned_abs() % HUES.len() as u32;
    HUES[index as usize]
}

/// Accent colour for an entry as a CSS `hsla()` string.
pub fn glow_color(id: &str) -> String {
    format!("hsla({}, 70%, 45%, 0.6)", hue_for(id))
}
