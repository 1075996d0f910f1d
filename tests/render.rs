//! Browser-side rendering checks for the message views.

#![cfg(target_arch = "wasm32")]

use echochat::message::{FileKind, Message};
use echochat::view::{FileContent, MessageView};
use leptos::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

fn mount_probe<N: IntoView>(render: impl FnOnce() -> N + 'static) -> web_sys::Element {
    let document = web_sys::window().unwrap().document().unwrap();
    let host = document.create_element("div").unwrap();
    document.body().unwrap().append_child(&host).unwrap();
    leptos::mount_to(host.clone().unchecked_into(), render);
    host
}

#[wasm_bindgen_test]
fn image_content_renders_an_img_with_a_data_uri() {
    let host = mount_probe(|| {
        view! { <FileContent kind=FileKind::Image content="QUJD".to_string()/> }
    });

    let img = host.query_selector("img").unwrap().expect("img element");
    assert_eq!(img.get_attribute("src").unwrap(), "data:image;base64,QUJD");
}

#[wasm_bindgen_test]
fn playable_kinds_render_with_controls() {
    let host = mount_probe(|| {
        view! {
            <FileContent kind=FileKind::Audio content="QUJD".to_string()/>
            <FileContent kind=FileKind::Video content="QUJD".to_string()/>
        }
    });

    let audio = host.query_selector("audio").unwrap().expect("audio element");
    assert!(audio.has_attribute("controls"));
    assert_eq!(audio.get_attribute("src").unwrap(), "data:audio;base64,QUJD");

    let video = host.query_selector("video").unwrap().expect("video element");
    assert!(video.has_attribute("controls"));
}

#[wasm_bindgen_test]
fn text_urls_render_as_anchors_opening_elsewhere() {
    let message = Message::Text { value: "see https://example.com now".to_string() };
    let host = mount_probe(move || view! { <MessageView message/> });

    let anchor = host.query_selector("a").unwrap().expect("anchor element");
    assert_eq!(anchor.get_attribute("href").unwrap(), "https://example.com");
    assert_eq!(anchor.text_content().unwrap(), "https://example.com");
    assert_eq!(anchor.get_attribute("target").unwrap(), "_blank");

    let block = host.first_element_child().expect("message block");
    assert_eq!(block.text_content().unwrap(), "see https://example.com now");
}

#[wasm_bindgen_test]
fn history_renders_one_block_per_entry_in_order() {
    let entries = vec![
        Message::Text { value: "hello".into() },
        Message::Coords { latitude: 1.5, longitude: 2.0 },
        Message::Image { value: "QUJD".into() },
    ];

    let host = mount_probe(move || {
        entries
            .into_iter()
            .map(|message| view! { <MessageView message/> })
            .collect_view()
    });

    assert_eq!(host.child_element_count(), 3);

    let blocks = host.children();
    assert_eq!(blocks.item(0).unwrap().text_content().unwrap(), "hello");
    assert_eq!(blocks.item(1).unwrap().text_content().unwrap(), "[1.5, 2]");
    assert!(blocks.item(2).unwrap().query_selector("img").unwrap().is_some());
}
