//! Capture-device plumbing for the record controls: one [`Recording`] per
//! active session, released when the recorder's stop event fires.

use std::cell::RefCell;
use std::rc::Rc;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use js_sys::{Array, Uint8Array};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{
    Blob, BlobEvent, BlobPropertyBag, MediaRecorder, MediaStream, MediaStreamConstraints,
    MediaStreamTrack, RecordingState,
};

use crate::message::FileKind;

/// Which capture pipeline a record control drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureKind {
    Audio,
    Video,
}

impl CaptureKind {
    pub fn file_kind(self) -> FileKind {
        match self {
            CaptureKind::Audio => FileKind::Audio,
            CaptureKind::Video => FileKind::Video,
        }
    }

    /// Container type for the assembled clip.
    fn mime(self) -> &'static str {
        match self {
            CaptureKind::Audio => "audio/webm",
            CaptureKind::Video => "video/webm",
        }
    }

    fn constraints(self) -> MediaStreamConstraints {
        let constraints = MediaStreamConstraints::new();
        match self {
            CaptureKind::Audio => {
                constraints.set_audio(&JsValue::TRUE);
            }
            CaptureKind::Video => {
                constraints.set_audio(&JsValue::TRUE);
                constraints.set_video(&JsValue::TRUE);
            }
        }
        constraints
    }
}

/// One in-progress recording: the recorder, its source stream, and the
/// chunk buffer its `dataavailable` callback appends to.
pub struct Recording {
    kind: CaptureKind,
    recorder: MediaRecorder,
    stream: MediaStream,
}

impl Recording {
    /// Requests a capture stream, starts the recorder and begins buffering
    /// emitted chunks. `on_clip` receives the assembled clip once the stop
    /// event has drained a non-empty buffer; the buffer is cleared after
    /// every stop either way, and the stream's tracks are released.
    pub async fn start(
        kind: CaptureKind,
        on_clip: impl Fn(FileKind, Blob) + 'static,
    ) -> Result<Recording, JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let devices = window.navigator().media_devices()?;
        let promise = devices.get_user_media_with_constraints(&kind.constraints())?;
        let stream: MediaStream = JsFuture::from(promise).await?.dyn_into()?;
        let recorder = MediaRecorder::new_with_media_stream(&stream)?;

        let chunks: Rc<RefCell<Vec<Blob>>> = Rc::new(RefCell::new(Vec::new()));

        let sink = Rc::clone(&chunks);
        let on_data = Closure::wrap(Box::new(move |event: BlobEvent| {
            if let Some(chunk) = event.data() {
                sink.borrow_mut().push(chunk);
            }
        }) as Box<dyn FnMut(BlobEvent)>);
        recorder.set_ondataavailable(Some(on_data.as_ref().unchecked_ref()));
        on_data.forget();

        let buffered = Rc::clone(&chunks);
        let captured = stream.clone();
        let on_stop = Closure::wrap(Box::new(move |_: web_sys::Event| {
            let drained = buffered.borrow_mut().split_off(0);
            if !drained.is_empty() {
                match assemble(&drained, kind.mime()) {
                    Ok(clip) => on_clip(kind.file_kind(), clip),
                    Err(err) => log::error!(
                        "Failed to assemble {} clip: {:?}",
                        kind.file_kind().as_str(),
                        err
                    ),
                }
            }
            release_tracks(&captured);
        }) as Box<dyn FnMut(web_sys::Event)>);
        recorder.set_onstop(Some(on_stop.as_ref().unchecked_ref()));
        on_stop.forget();

        recorder.start()?;
        Ok(Recording { kind, recorder, stream })
    }

    /// Stops the recorder; the stop event drains the buffer and releases
    /// the stream.
    pub fn stop(&self) {
        if self.recorder.state() != RecordingState::Recording {
            return;
        }
        if let Err(err) = self.recorder.stop() {
            log::error!(
                "Failed to stop {} recorder: {:?}",
                self.kind.file_kind().as_str(),
                err
            );
            release_tracks(&self.stream);
        }
    }
}

fn assemble(chunks: &[Blob], mime: &str) -> Result<Blob, JsValue> {
    let parts = Array::new();
    for chunk in chunks {
        parts.push(chunk);
    }
    let options = BlobPropertyBag::new();
    options.set_type(mime);
    Blob::new_with_blob_sequence_and_options(&parts, &options)
}

fn release_tracks(stream: &MediaStream) {
    for track in stream.get_tracks().iter() {
        if let Ok(track) = track.dyn_into::<MediaStreamTrack>() {
            track.stop();
        }
    }
}

/// Reads a blob's bytes and base64-encodes them — the canonical content
/// representation for every file path, uploads and recordings alike.
pub async fn blob_base64(blob: &Blob) -> Result<String, JsValue> {
    let buffer = JsFuture::from(blob.array_buffer()).await?;
    let bytes = Uint8Array::new(&buffer).to_vec();
    Ok(STANDARD.encode(bytes))
}
