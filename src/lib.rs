pub mod api;
pub mod chat;
pub mod media;
pub mod message;
pub mod view;

use leptos::*;
use leptos_meta::*;

use chat::ChatWidget;

/// The root component of the application
#[component]
pub fn App() -> impl IntoView {
    // Provides contexts for meta tags (like <Title>)
    provide_meta_context();

    view! {
        <Title text="EchoChat"/>
        <ChatWidget/>
    }
}
