//! Markdown text blocks.
//!
//! A line holding nothing but a YouTube, SoundCloud or Bandcamp URL is
//! turned into a markdown link first (a thumbnail image-link for YouTube), so
//! pasted media survives in email as something clickable. The result is then
//! rendered as CommonMark where every newline is a line break, and any
//! remaining bare `http(s)` URL in prose becomes a link.

use super::embed::{extract_youtube_id, youtube_thumbnail_url};
use super::style;
use maud::{Markup, PreEscaped, html};
use pulldown_cmark::{
    CowStr, Event, LinkType, Options, Parser, Tag, TagEnd, TextMergeStream, html as md_html,
};
use regex::Regex;
use std::sync::LazyLock;

static MEDIA_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^https?://(?:www\.)?(?:youtube\.com/watch\S+|youtu\.be/\S+|soundcloud\.com/\S+|[A-Za-z0-9_-]+\.bandcamp\.com/\S+)$",
    )
    .expect("media line pattern is valid")
});

static BARE_URL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"https?://[^\s<>]+").expect("bare url pattern is valid"));

/// Rewrite bare media-URL lines as markdown links.
pub fn link_media_lines(text: &str) -> String {
    text.split('\n')
        .map(|line| {
            let bare = line.strip_suffix('\r').unwrap_or(line);
            if MEDIA_LINE.is_match(bare) {
                media_line_markdown(bare)
            } else {
                line.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn media_line_markdown(url: &str) -> String {
    let is_youtube = url.contains("youtube.com") || url.contains("youtu.be");
    match extract_youtube_id(url).filter(|_| is_youtube) {
        Some(video_id) => format!("[![YouTube]({})]({url})", youtube_thumbnail_url(video_id)),
        None => format!("[{url}]({url})"),
    }
}

/// Trim trailing punctuation off an autolink candidate, keeping a closing
/// paren only when it balances one inside the URL.
fn autolink_end(candidate: &str) -> &str {
    let mut url = candidate;
    loop {
        let Some(last) = url.chars().last() else {
            return url;
        };
        let trim = match last {
            '.' | ',' | ':' | ';' | '!' | '?' | '\'' | '"' | '*' | '_' | '~' => true,
            ')' => url.matches(')').count() > url.matches('(').count(),
            _ => false,
        };
        if !trim {
            return url;
        }
        url = &url[..url.len() - last.len_utf8()];
    }
}

/// Split a text event so bare URLs become autolinks.
fn autolink_text(text: CowStr<'_>) -> Vec<Event<'_>> {
    let mut events = Vec::new();
    let mut rest = 0;
    for found in BARE_URL.find_iter(&text) {
        let url = autolink_end(found.as_str());
        if url.len() <= "https://".len() {
            continue;
        }
        if found.start() > rest {
            events.push(Event::Text(text[rest..found.start()].to_string().into()));
        }
        events.push(Event::Start(Tag::Link {
            link_type: LinkType::Autolink,
            dest_url: url.to_string().into(),
            title: CowStr::Borrowed(""),
            id: CowStr::Borrowed(""),
        }));
        events.push(Event::Text(url.to_string().into()));
        events.push(Event::End(TagEnd::Link));
        rest = found.start() + url.len();
    }
    if rest == 0 {
        events.push(Event::Text(text));
    } else if rest < text.len() {
        events.push(Event::Text(text[rest..].to_string().into()));
    }
    events
}

/// CommonMark to HTML with soft breaks rendered as `<br />` and bare URLs
/// linked. Text already inside a link, image or code block is left alone.
pub fn markdown_to_html(source: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);

    let mut nested = 0usize;
    let parser = TextMergeStream::new(Parser::new_ext(source, options)).flat_map(|event| {
        match event {
            Event::Start(Tag::Link { .. } | Tag::Image { .. } | Tag::CodeBlock(_)) => {
                nested += 1;
                vec![event]
            }
            Event::End(TagEnd::Link | TagEnd::Image | TagEnd::CodeBlock) => {
                nested = nested.saturating_sub(1);
                vec![event]
            }
            Event::Text(text) if nested == 0 => autolink_text(text),
            Event::SoftBreak => vec![Event::HardBreak],
            other => vec![other],
        }
    });
    let mut html = String::new();
    md_html::push_html(&mut html, parser);
    html
}

/// Render a text block. Blank text renders nothing.
pub fn render_text(body: &str) -> Option<Markup> {
    if body.trim().is_empty() {
        return None;
    }
    let html = markdown_to_html(&link_media_lines(body));
    Some(html! {
        div style=(style::TEXT_BLOCK) { (PreEscaped(html)) }
    })
}
