use serde::{Deserialize, Serialize};

/// One persisted chat entry, in the exact shape the backend stores and
/// returns it: `{ "type": ..., "value"?, "latitude"?, "longitude"? }`.
///
/// Entries are created by a user action, never mutated, and removed only by
/// the global delete-all operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Message {
    Text { value: String },
    Audio { value: String },
    Video { value: String },
    Image { value: String },
    Coords { latitude: f64, longitude: f64 },
}

impl Message {
    /// Wraps base64 file content in the variant matching its kind.
    pub fn file(kind: FileKind, value: String) -> Self {
        match kind {
            FileKind::Audio => Message::Audio { value },
            FileKind::Video => Message::Video { value },
            FileKind::Image => Message::Image { value },
        }
    }
}

/// Coarse media category used for upload payloads and playback elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileKind {
    Audio,
    Video,
    Image,
}

impl FileKind {
    /// Derives the kind from a declared MIME type's major component.
    /// Anything that is not `audio/*` or `video/*` is displayed as an image.
    pub fn from_mime(mime: &str) -> Self {
        match mime.split('/').next() {
            Some("audio") => FileKind::Audio,
            Some("video") => FileKind::Video,
            _ => FileKind::Image,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            FileKind::Audio => "audio",
            FileKind::Video => "video",
            FileKind::Image => "image",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{self as json, Value};

    #[test]
    fn history_entries_deserialize_by_type_tag() {
        let history: Vec<Message> = json::from_str(
            r#"[
                {"type":"text","value":"hi"},
                {"type":"audio","value":"QUJD"},
                {"type":"coords","latitude":45.07,"longitude":7.69}
            ]"#,
        )
        .expect("deserialize");

        assert_eq!(
            history,
            vec![
                Message::Text { value: "hi".into() },
                Message::Audio { value: "QUJD".into() },
                Message::Coords { latitude: 45.07, longitude: 7.69 },
            ]
        );
    }

    #[test]
    fn message_serializes_with_type_tag() {
        let v: Value = json::to_value(Message::Image { value: "QUJD".into() }).expect("serialize");
        assert_eq!(v["type"], "image");
        assert_eq!(v["value"], "QUJD");
    }

    #[test]
    fn file_kind_comes_from_the_mime_major_type() {
        assert_eq!(FileKind::from_mime("image/png"), FileKind::Image);
        assert_eq!(FileKind::from_mime("audio/webm"), FileKind::Audio);
        assert_eq!(FileKind::from_mime("video/mp4"), FileKind::Video);
        // unrecognized types are displayed as images
        assert_eq!(FileKind::from_mime("application/pdf"), FileKind::Image);
        assert_eq!(FileKind::from_mime(""), FileKind::Image);
    }

    #[test]
    fn file_messages_wrap_the_matching_variant() {
        assert_eq!(
            Message::file(FileKind::Audio, "a".into()),
            Message::Audio { value: "a".into() }
        );
        assert_eq!(
            Message::file(FileKind::Image, "i".into()),
            Message::Image { value: "i".into() }
        );
    }
}
