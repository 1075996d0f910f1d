//! The interactive widget: wires every control to the request client and
//! renders results into the message area.

use leptos::*;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{File, Position, PositionError, PositionOptions};

use crate::api::{self, RequestPayload};
use crate::media::{self, CaptureKind, Recording};
use crate::message::{FileKind, Message};
use crate::view::MessageView;

/// The chat surface: header controls, the message area (also the drop
/// target), and the input row.
#[component]
pub fn ChatWidget() -> impl IntoView {
    // Server-ordered history; handlers only append, delete clears wholesale.
    let messages = create_rw_signal(Vec::<Message>::new());
    let (draft, set_draft) = create_signal(String::new());

    let audio_recording = create_rw_signal(None::<Recording>);
    let video_recording = create_rw_signal(None::<Recording>);

    let file_input = create_node_ref::<html::Input>();

    // Replay the persisted history once, in server order.
    spawn_local(async move {
        if let Some(history) = api::fetch_history().await {
            if !history.is_empty() {
                messages.set(history);
            }
        }
    });

    // --- Text ---

    let send_text = move || {
        let value = draft.get_untracked();
        if value.is_empty() {
            return;
        }
        set_draft.set(String::new());
        spawn_local(async move {
            if let Some(resp) = api::post(&RequestPayload::text(value)).await {
                if let Some(text) = resp.response_message {
                    messages.update(|list| list.push(Message::Text { value: text }));
                }
            }
        });
    };

    let on_send_click = move |_| send_text();
    let on_draft_keydown = move |ev: ev::KeyboardEvent| {
        if ev.key() == "Enter" {
            send_text();
        }
    };

    // --- Files: picker and drop converge here ---

    let send_file = move |file: File| {
        let kind = FileKind::from_mime(&file.type_());
        spawn_local(async move {
            let content = match media::blob_base64(&file).await {
                Ok(content) => content,
                Err(err) => {
                    log::error!("Failed to read file: {:?}", err);
                    return;
                }
            };
            if let Some(resp) = api::post(&RequestPayload::file(content, kind)).await {
                if let Some(stored) = resp.response_message {
                    messages.update(|list| list.push(Message::file(kind, stored)));
                }
            }
        });
    };

    let on_upload_click = move |_| {
        if let Some(input) = file_input.get_untracked() {
            input.click();
        }
    };

    let on_file_change = move |_| {
        let Some(input) = file_input.get_untracked() else {
            return;
        };
        let Some(file) = input.files().and_then(|files| files.get(0)) else {
            return;
        };
        send_file(file);
        // reset so picking the same file again fires another change event
        input.set_value("");
    };

    let on_dragover = move |ev: ev::DragEvent| ev.prevent_default();
    let on_drop = move |ev: ev::DragEvent| {
        ev.prevent_default();
        let file = ev
            .data_transfer()
            .and_then(|transfer| transfer.files())
            .and_then(|files| files.get(0));
        if let Some(file) = file {
            send_file(file);
        }
    };

    // --- Geolocation ---

    let on_geo_click = move |_| {
        let Some(window) = web_sys::window() else {
            return;
        };
        let geolocation = match window.navigator().geolocation() {
            Ok(geolocation) => geolocation,
            Err(err) => {
                log::error!("Geolocation unsupported: {:?}", err);
                return;
            }
        };

        let on_position = Closure::wrap(Box::new(move |position: Position| {
            let coords = position.coords();
            let (latitude, longitude) = (coords.latitude(), coords.longitude());
            spawn_local(async move {
                if let Some(resp) = api::post(&RequestPayload::geo(latitude, longitude)).await {
                    if let (Some(latitude), Some(longitude)) =
                        (resp.response_latitude, resp.response_longitude)
                    {
                        messages.update(|list| list.push(Message::Coords { latitude, longitude }));
                    }
                }
            });
        }) as Box<dyn FnMut(Position)>);

        let on_error = Closure::wrap(Box::new(move |err: PositionError| {
            log::error!("Geolocation error: {} {}", err.code(), err.message());
        }) as Box<dyn FnMut(PositionError)>);

        let options = PositionOptions::new();
        options.set_enable_high_accuracy(true);
        if let Err(err) = geolocation.get_current_position_with_error_callback_and_options(
            on_position.as_ref().unchecked_ref(),
            Some(on_error.as_ref().unchecked_ref()),
            &options,
        ) {
            log::error!("Geolocation request failed: {:?}", err);
        }
        on_position.forget();
        on_error.forget();
    };

    // --- Recording: idle -> recording -> idle per media kind ---

    let toggle_recording = move |kind: CaptureKind, slot: RwSignal<Option<Recording>>| {
        let active = slot.with_untracked(|recording| recording.is_some());
        if active {
            slot.update(|recording| {
                if let Some(recording) = recording.take() {
                    recording.stop();
                }
            });
            return;
        }

        spawn_local(async move {
            let on_clip = move |kind: FileKind, clip: web_sys::Blob| {
                spawn_local(async move {
                    let content = match media::blob_base64(&clip).await {
                        Ok(content) => content,
                        Err(err) => {
                            log::error!("Failed to read {} clip: {:?}", kind.as_str(), err);
                            return;
                        }
                    };
                    if let Some(resp) = api::post(&RequestPayload::file(content, kind)).await {
                        if let Some(stored) = resp.response_message {
                            messages.update(|list| list.push(Message::file(kind, stored)));
                        }
                    }
                });
            };
            match Recording::start(kind, on_clip).await {
                Ok(recording) => slot.set(Some(recording)),
                Err(err) => log::error!("Error accessing media devices: {:?}", err),
            }
        });
    };

    let on_record_audio = move |_| toggle_recording(CaptureKind::Audio, audio_recording);
    let on_record_video = move |_| toggle_recording(CaptureKind::Video, video_recording);

    // --- Delete all ---

    let on_delete_click = move |_| {
        spawn_local(async move {
            if let Some(resp) = api::post(&RequestPayload::delete()).await {
                if resp.is_success() {
                    messages.update(|list| list.clear());
                } else {
                    log::error!("Error deleting messages");
                }
            }
        });
    };

    // --- Render ---

    view! {
        <div class="flex flex-col h-screen max-w-2xl mx-auto bg-gray-100 shadow-xl">
            // --- Header (controls) ---
            <header class="flex items-center justify-between px-4 py-3 bg-white shadow">
                <h1 class="text-lg font-bold text-gray-800">"EchoChat"</h1>
                <div class="flex space-x-2">
                    <button
                        class="px-3 py-2 rounded-lg text-gray-600 hover:bg-gray-100"
                        title="Share location"
                        on:click=on_geo_click
                    >
                        "📍"
                    </button>
                    <button
                        class="px-3 py-2 rounded-lg text-gray-600 hover:bg-gray-100"
                        class:record-active=move || audio_recording.with(|r| r.is_some())
                        title="Record audio"
                        on:click=on_record_audio
                    >
                        "🎤"
                    </button>
                    <button
                        class="px-3 py-2 rounded-lg text-gray-600 hover:bg-gray-100"
                        class:record-active=move || video_recording.with(|r| r.is_some())
                        title="Record video"
                        on:click=on_record_video
                    >
                        "🎥"
                    </button>
                    <button
                        class="px-3 py-2 rounded-lg text-red-500 hover:bg-red-50"
                        title="Delete all messages"
                        on:click=on_delete_click
                    >
                        "🗑"
                    </button>
                </div>
            </header>

            // --- Message area (drop target) ---
            <div
                id="chat-window"
                class="flex-1 p-4 overflow-y-auto space-y-3"
                on:dragover=on_dragover
                on:drop=on_drop
            >
                <For
                    each=move || messages.get().into_iter().enumerate()
                    key=|(index, _)| *index
                    children=move |(_, message)| view! { <MessageView message/> }
                />
            </div>

            // --- Input row ---
            <footer class="flex items-center space-x-3 p-4 bg-white shadow-md">
                <button
                    class="px-3 py-2 rounded-lg text-gray-600 hover:bg-gray-100"
                    title="Upload file"
                    on:click=on_upload_click
                >
                    "📎"
                </button>
                <input type="file" class="hidden" node_ref=file_input on:change=on_file_change/>
                <input
                    class="flex-1 shadow-sm border rounded-lg py-2 px-4 text-gray-700 focus:outline-none focus:ring-2 focus:ring-blue-500"
                    type="text"
                    placeholder="Type a message..."
                    on:input=move |ev| set_draft.set(event_target_value(&ev))
                    on:keydown=on_draft_keydown
                    prop:value=draft
                />
                <button
                    class="bg-blue-600 hover:bg-blue-700 text-white font-bold py-2 px-5 rounded-lg"
                    on:click=on_send_click
                >
                    "Send"
                </button>
            </footer>
        </div>
    }
}
