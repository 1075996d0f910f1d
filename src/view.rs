//! Declarative views for each message variant. Pure construction — no
//! network or state side effects.

use leptos::*;

use crate::message::{FileKind, Message};

/// A slice of message text: either plain text or a URL rendered as a link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Plain(String),
    Link(String),
}

/// Splits message text on URL-shaped substrings (`http`/`https` scheme, up
/// to the next whitespace), preserving the original order.
pub fn split_segments(text: &str) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut rest = text;

    loop {
        let hit = match (rest.find("http://"), rest.find("https://")) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (Some(a), None) => Some(a),
            (None, Some(b)) => Some(b),
            (None, None) => None,
        };
        let Some(start) = hit else {
            if !rest.is_empty() {
                segments.push(Segment::Plain(rest.to_string()));
            }
            break;
        };

        if start > 0 {
            segments.push(Segment::Plain(rest[..start].to_string()));
        }
        let tail = &rest[start..];
        let end = tail.find(char::is_whitespace).unwrap_or(tail.len());
        segments.push(Segment::Link(tail[..end].to_string()));
        rest = &tail[end..];
    }

    segments
}

/// Coordinates display as the bracketed pair the backend echoed.
pub fn format_coords(latitude: f64, longitude: f64) -> String {
    format!("[{}, {}]", latitude, longitude)
}

fn data_uri(kind: FileKind, content: &str) -> String {
    format!("data:{};base64,{}", kind.as_str(), content)
}

/// A text block with URL-shaped substrings rendered as clickable anchors
/// opening in a new context.
#[component]
pub fn TextBlock(value: String) -> impl IntoView {
    let parts = split_segments(&value)
        .into_iter()
        .map(|segment| match segment {
            Segment::Plain(text) => view! { <span>{text}</span> }.into_view(),
            Segment::Link(url) => {
                let href = url.clone();
                view! {
                    <a href=href target="_blank" class="text-blue-600 underline break-all">{url}</a>
                }
                .into_view()
            }
        })
        .collect_view();

    view! {
        <div class="bg-white px-4 py-2 rounded-xl shadow max-w-md break-words">{parts}</div>
    }
}

/// One playback/display element for stored file content, wrapped in its
/// container block. The `src` is always a data URI synthesized from the
/// base64 content.
#[component]
pub fn FileContent(kind: FileKind, content: String) -> impl IntoView {
    let src = data_uri(kind, &content);
    let media = match kind {
        FileKind::Audio => view! { <audio controls=true src=src class="w-64"></audio> }.into_view(),
        FileKind::Video => {
            view! { <video controls=true src=src class="max-w-xs rounded-lg"></video> }.into_view()
        }
        FileKind::Image => view! { <img src=src class="max-w-xs rounded-lg"/> }.into_view(),
    };

    view! {
        <div class="bg-white px-4 py-3 rounded-xl shadow max-w-md">{media}</div>
    }
}

/// Renders one history entry with the block matching its variant.
#[component]
pub fn MessageView(message: Message) -> impl IntoView {
    match message {
        Message::Text { value } => view! { <TextBlock value/> }.into_view(),
        Message::Audio { value } => {
            view! { <FileContent kind=FileKind::Audio content=value/> }.into_view()
        }
        Message::Video { value } => {
            view! { <FileContent kind=FileKind::Video content=value/> }.into_view()
        }
        Message::Image { value } => {
            view! { <FileContent kind=FileKind::Image content=value/> }.into_view()
        }
        Message::Coords { latitude, longitude } => view! {
            <div class="bg-white px-4 py-2 rounded-xl shadow max-w-md">
                {format_coords(latitude, longitude)}
            </div>
        }
        .into_view(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text_stays_one_segment() {
        assert_eq!(
            split_segments("hello there"),
            vec![Segment::Plain("hello there".into())]
        );
    }

    #[test]
    fn urls_become_link_segments_in_order() {
        let segments = split_segments("see https://example.com and http://a.b then");
        assert_eq!(
            segments,
            vec![
                Segment::Plain("see ".into()),
                Segment::Link("https://example.com".into()),
                Segment::Plain(" and ".into()),
                Segment::Link("http://a.b".into()),
                Segment::Plain(" then".into()),
            ]
        );
    }

    #[test]
    fn message_may_start_or_end_with_a_url() {
        assert_eq!(
            split_segments("https://example.com"),
            vec![Segment::Link("https://example.com".into())]
        );
        assert_eq!(
            split_segments("go to http://x.y").last(),
            Some(&Segment::Link("http://x.y".into()))
        );
    }

    #[test]
    fn empty_text_yields_no_segments() {
        assert!(split_segments("").is_empty());
    }

    #[test]
    fn coords_render_as_a_bracketed_pair() {
        assert_eq!(format_coords(45.07, 7.69), "[45.07, 7.69]");
        assert_eq!(format_coords(1.5, 2.0), "[1.5, 2]");
    }

    #[test]
    fn data_uri_prefixes_the_kind_marker() {
        assert_eq!(data_uri(FileKind::Audio, "QUJD"), "data:audio;base64,QUJD");
        assert_eq!(data_uri(FileKind::Image, ""), "data:image;base64,");
    }
}
