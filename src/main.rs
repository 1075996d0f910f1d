use echochat::App;
use leptos::*;

fn main() {
    // Setup logging
    _ = console_log::init_with_level(log::Level::Debug);
    console_error_panic_hook::set_once();

    log::info!("EchoChat app started");

    // Mount the <App> component to the <body>
    mount_to_body(App);
}
