use std::rc::Rc;

use yew::prelude::*;

mod config;
mod components {
    pub mod carousel;
    pub mod contact;
    pub mod counter;
    pub mod nav;
    pub mod reveal;
}
mod pages {
    pub mod landing;
}
mod utils {
    pub mod motion;
    pub mod scroll;
    pub mod viewport;
}

use pages::landing::Landing;
use utils::viewport::{TriggerHandle, ViewportTrigger};

#[function_component]
fn App() -> Html {
    let trigger = use_memo(|_| ViewportTrigger::new(), ());
    let handle = TriggerHandle(Rc::clone(&trigger));

    html! {
        <ContextProvider<TriggerHandle> context={handle}>
            <Landing />
        </ContextProvider<TriggerHandle>>
    }
}

/// Tells the stylesheet that scripting is on, so reveal styles may hide content.
fn mark_script_enabled() {
    let Some(root) = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.document_element())
    else {
        return;
    };
    if let Err(e) = root.class_list().add_1("js") {
        gloo_console::warn!(format!("Could not mark document as scripted: {:?}", e));
    }
}

fn main() {
    wasm_logger::init(wasm_logger::Config::default());
    mark_script_enabled();
    log::info!("Booting landing page");
    yew::Renderer::<App>::new().render();
}
