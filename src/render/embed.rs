//! Embed blocks: pasted media URLs or embed snippets.
//!
//! Email clients don't run iframes, so each embed becomes something
//! clickable instead: a thumbnail for YouTube, a call-to-action button for
//! SoundCloud and Bandcamp, and a plain link for anything else.

use super::style;
use maud::{Markup, html};
use regex::Regex;
use std::sync::LazyLock;
use url::Url;

static SRC_ATTR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"src=["']([^"']+)["']"#).expect("src pattern is valid"));

static YOUTUBE_ID: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:youtube\.com/watch\?v=|youtu\.be/|youtube\.com/embed/)([^&\s?]+)")
        .expect("youtube pattern is valid")
});

static SCHEME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"https?://").expect("scheme pattern is valid"));

/// What an embed target points at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmbedKind {
    YouTube { video_id: String },
    SoundCloud,
    Bandcamp { label: String },
    Link,
}

impl EmbedKind {
    pub fn name(&self) -> &'static str {
        match self {
            EmbedKind::YouTube { .. } => "youtube",
            EmbedKind::SoundCloud => "soundcloud",
            EmbedKind::Bandcamp { .. } => "bandcamp",
            EmbedKind::Link => "link",
        }
    }
}

/// A normalized embed target and its classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Embed {
    pub url: String,
    pub kind: EmbedKind,
}

/// Reduce pasted input to a URL.
///
/// Embed markup (anything containing `<`) yields its first `src` attribute;
/// markup without one, and bare URLs, come back trimmed.
pub fn normalize_target(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.contains('<') {
        if let Some(src) = SRC_ATTR.captures(trimmed).and_then(|c| c.get(1)) {
            return src.as_str().to_string();
        }
    }
    trimmed.to_string()
}

/// Video id from a `watch?v=`, `youtu.be/` or `embed/` URL.
pub fn extract_youtube_id(url: &str) -> Option<&str> {
    YOUTUBE_ID
        .captures(url)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
}

pub fn youtube_thumbnail_url(video_id: &str) -> String {
    format!("https://img.youtube.com/vi/{video_id}/hqdefault.jpg")
}

pub fn youtube_watch_url(video_id: &str) -> String {
    format!("https://www.youtube.com/watch?v={video_id}")
}

/// Display label for a Bandcamp link: `artist — release name`.
///
/// The artist is the subdomain, the release name the second path segment
/// with dashes as spaces. Unparseable input loses its scheme and is used
/// as-is.
pub fn bandcamp_label(url: &str) -> String {
    let parsed = match Url::parse(url) {
        Ok(parsed) => parsed,
        Err(err) => {
            tracing::debug!(url, %err, "bandcamp url not parseable, using raw label");
            return SCHEME.replace(url, "").into_owned();
        }
    };
    let artist = parsed
        .host_str()
        .unwrap_or_default()
        .replacen(".bandcamp.com", "", 1);
    let slug = parsed
        .path_segments()
        .and_then(|segments| segments.filter(|s| !s.is_empty()).nth(1));
    match slug {
        Some(slug) => format!("{artist} \u{2014} {}", slug.replace('-', " ")),
        None => artist,
    }
}

/// Normalize and classify an embed target.
///
/// YouTube URLs without a recognizable video id fall through to the later
/// checks rather than failing.
pub fn classify(raw: &str) -> Embed {
    let url = normalize_target(raw);
    let kind = if let Some(video_id) = youtube_id_for(&url) {
        EmbedKind::YouTube {
            video_id: video_id.to_string(),
        }
    } else if url.contains("soundcloud.com") {
        EmbedKind::SoundCloud
    } else if url.contains("bandcamp.com") {
        EmbedKind::Bandcamp {
            label: bandcamp_label(&url),
        }
    } else {
        EmbedKind::Link
    };
    Embed { url, kind }
}

fn youtube_id_for(url: &str) -> Option<&str> {
    if url.contains("youtube.com") || url.contains("youtu.be") {
        extract_youtube_id(url)
    } else {
        None
    }
}

/// Render an embed block. Empty targets render nothing.
pub fn render_embed(raw: &str, glow: &str) -> Option<Markup> {
    let embed = classify(raw);
    if embed.url.is_empty() {
        return None;
    }
    let glow_style = format!("{} box-shadow: 0 0 20px 4px {glow};", style::BUTTON);

    let markup = match &embed.kind {
        EmbedKind::YouTube { video_id } => {
            let watch_url = youtube_watch_url(video_id);
            html! {
                div style=(style::CENTERED) {
                    a href=(watch_url) style={ "display: inline-block; text-decoration: none; box-shadow: 0 0 20px 4px " (glow) ";" } {
                        img src=(youtube_thumbnail_url(video_id)) alt="YouTube video" style="display: block; max-width: 480px; width: 100%; height: auto;";
                    }
                    div style="margin-top: 8px;" {
                        a href=(watch_url) style=(style::CAPTION_LINK) { (style::PLAY) " Watch on YouTube" }
                    }
                }
            }
        }
        EmbedKind::SoundCloud => html! {
            div style=(style::CENTERED) {
                a href=(embed.url) style=(glow_style) { (style::PLAY) " Listen on SoundCloud" }
            }
        },
        EmbedKind::Bandcamp { label } => html! {
            div style=(style::CENTERED) {
                a href=(embed.url) style=(glow_style) { (style::PLAY) " " (label) }
            }
        },
        EmbedKind::Link => html! {
            div style=(style::CENTERED) {
                a href=(embed.url) style={ (style::CAPTION_LINK) " text-decoration: underline;" } { (embed.url) }
            }
        },
    };
    Some(markup)
}

#[cfg(test)]
mod tests {
    use super::*;

    const GLOW: &str = "hsla(35, 70%, 45%, 0.6)";

    #[test]
    fn normalize_trims_bare_urls() {
        assert_eq!(
            normalize_target("  https://youtu.be/abc123 \n"),
            "https://youtu.be/abc123"
        );
    }

    #[test]
    fn normalize_extracts_src_from_markup() {
        let iframe = r#"<iframe width="560" src="https://www.youtube.com/embed/dQw4w9WgXcQ?si=x" frameborder="0"></iframe>"#;
        assert_eq!(
            normalize_target(iframe),
            "https://www.youtube.com/embed/dQw4w9WgXcQ?si=x"
        );
    }

    #[test]
    fn normalize_accepts_single_quoted_src() {
        let iframe = "<iframe src='https://w.soundcloud.com/player/?url=x'></iframe>";
        assert_eq!(
            normalize_target(iframe),
            "https://w.soundcloud.com/player/?url=x"
        );
    }

    #[test]
    fn normalize_keeps_markup_without_src() {
        assert_eq!(normalize_target("<b>hi</b>"), "<b>hi</b>");
    }

    #[test]
    fn youtube_id_from_all_url_shapes() {
        assert_eq!(extract_youtube_id("https://youtu.be/abc123"), Some("abc123"));
        assert_eq!(
            extract_youtube_id("https://www.youtube.com/watch?v=abc123&t=10s"),
            Some("abc123")
        );
        assert_eq!(
            extract_youtube_id("https://www.youtube.com/embed/abc123?si=q"),
            Some("abc123")
        );
        assert_eq!(extract_youtube_id("https://www.youtube.com/@channel"), None);
    }

    #[test]
    fn classify_youtube_short_link() {
        let embed = classify("https://youtu.be/abc123");
        assert_eq!(
            embed.kind,
            EmbedKind::YouTube {
                video_id: "abc123".into()
            }
        );
    }

    #[test]
    fn youtube_without_id_falls_through_to_link() {
        let embed = classify("https://www.youtube.com/@someone");
        assert_eq!(embed.kind, EmbedKind::Link);
    }

    #[test]
    fn classify_soundcloud_and_bandcamp() {
        assert_eq!(
            classify("https://soundcloud.com/artist/track").kind,
            EmbedKind::SoundCloud
        );
        assert_eq!(
            classify("https://someartist.bandcamp.com/track/cool-song").kind,
            EmbedKind::Bandcamp {
                label: "someartist \u{2014} cool song".into()
            }
        );
    }

    #[test]
    fn bandcamp_label_without_release_is_artist() {
        assert_eq!(bandcamp_label("https://someartist.bandcamp.com/"), "someartist");
        assert_eq!(bandcamp_label("https://someartist.bandcamp.com/music"), "someartist");
    }

    #[test]
    fn bandcamp_label_unparseable_strips_scheme() {
        assert_eq!(
            bandcamp_label("someartist.bandcamp.com/album/x"),
            "someartist.bandcamp.com/album/x"
        );
        assert_eq!(bandcamp_label("see https://[bad.bandcamp.com"), "see [bad.bandcamp.com");
    }

    #[test]
    fn render_youtube_thumbnail_and_watch_link() {
        let html = render_embed("https://youtu.be/abc123", GLOW)
            .unwrap()
            .into_string();
        assert!(html.contains(r#"src="https://img.youtube.com/vi/abc123/hqdefault.jpg""#));
        assert!(html.contains(r#"href="https://www.youtube.com/watch?v=abc123""#));
        assert!(html.contains("Watch on YouTube"));
        assert!(html.contains(GLOW));
    }

    #[test]
    fn render_soundcloud_button_has_glow() {
        let html = render_embed("https://soundcloud.com/a/b", GLOW)
            .unwrap()
            .into_string();
        assert!(html.contains("Listen on SoundCloud"));
        assert!(html.contains(&format!("box-shadow: 0 0 20px 4px {GLOW}")));
        assert!(html.contains("border: 1px solid #000000"));
    }

    #[test]
    fn render_bandcamp_label() {
        let html = render_embed("https://someartist.bandcamp.com/track/cool-song", GLOW)
            .unwrap()
            .into_string();
        assert!(html.contains("someartist \u{2014} cool song"));
    }

    #[test]
    fn render_generic_link_is_escaped() {
        let html = render_embed(r#"https://example.com/?a=1&b="2""#, GLOW)
            .unwrap()
            .into_string();
        assert!(html.contains("https://example.com/?a=1&amp;b=&quot;2&quot;"));
        assert!(!html.contains(r#"b="2""#));
        assert!(html.contains("text-decoration: underline"));
        assert!(!html.contains("box-shadow"));
    }

    #[test]
    fn render_empty_target_is_omitted() {
        assert!(render_embed("", GLOW).is_none());
        assert!(render_embed("   \n", GLOW).is_none());
    }
}
