use wasm_bindgen::prelude::Closure;
use wasm_bindgen::JsCast;
use web_sys::KeyboardEvent;
use yew::prelude::*;

use crate::utils::scroll::scroll_to_anchor;

/// Open/closed state of the mobile menu.
///
/// The toggle's `aria-expanded` and the panel's `hidden` flag are both
/// derived from the one field, so they cannot disagree.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MenuState {
    open: bool,
}

impl MenuState {
    #[cfg(test)]
    pub fn is_open(self) -> bool {
        self.open
    }

    pub fn toggled(self) -> Self {
        Self { open: !self.open }
    }

    pub fn closed() -> Self {
        Self { open: false }
    }

    pub fn aria_expanded(self) -> &'static str {
        if self.open {
            "true"
        } else {
            "false"
        }
    }

    pub fn panel_hidden(self) -> bool {
        !self.open
    }
}

pub const NAV_LINKS: &[(&str, &str)] = &[
    ("#services", "Services"),
    ("#results", "Results"),
    ("#reviews", "Reviews"),
    ("#contact", "Contact"),
];

/// Click handler for in-page links: smooth scroll when the target exists,
/// otherwise the browser follows the link as usual.
pub fn anchor_click(href: &'static str) -> Callback<MouseEvent> {
    Callback::from(move |e: MouseEvent| {
        if scroll_to_anchor(href) {
            e.prevent_default();
        }
    })
}

#[function_component]
pub fn Nav() -> Html {
    let menu = use_state(MenuState::default);

    // Escape closes the menu from anywhere in the document.
    {
        let menu = menu.clone();
        use_effect_with_deps(
            move |_| {
                let destructor: Box<dyn FnOnce()> = if let Some(window) = web_sys::window() {
                    let callback = Closure::<dyn Fn(KeyboardEvent)>::new(move |e: KeyboardEvent| {
                        if e.key() == "Escape" {
                            menu.set(MenuState::closed());
                        }
                    });
                    match window.add_event_listener_with_callback("keydown", callback.as_ref().unchecked_ref()) {
                        Ok(()) => Box::new(move || {
                            if let Some(win) = web_sys::window() {
                                let _ = win.remove_event_listener_with_callback(
                                    "keydown",
                                    callback.as_ref().unchecked_ref(),
                                );
                            }
                        }),
                        Err(e) => {
                            log::warn!("Failed to listen for Escape: {:?}", e);
                            Box::new(|| ())
                        }
                    }
                } else {
                    Box::new(|| ())
                };
                move || {
                    destructor();
                }
            },
            (),
        );
    }

    let on_toggle = {
        let menu = menu.clone();
        Callback::from(move |_: MouseEvent| menu.set(menu.toggled()))
    };

    html! {
        <header class="nav">
            <div class="nav__inner">
                <a class="nav__brand" href="#top" onclick={anchor_click("#top")}>{"SSD HOLDING"}</a>
                <nav class="nav__links">
                    { for NAV_LINKS.iter().map(|(href, label)| html! {
                        <a href={*href} onclick={anchor_click(*href)}>{ *label }</a>
                    }) }
                </nav>
                <button
                    type="button"
                    class="nav__menuBtn"
                    aria-label="Open menu"
                    aria-controls="mobileNav"
                    aria-expanded={menu.aria_expanded()}
                    onclick={on_toggle}
                >
                    <span></span><span></span><span></span>
                </button>
            </div>
            <div id="mobileNav" class="nav__mobile" hidden={menu.panel_hidden()}>
                { for NAV_LINKS.iter().map(|(href, label)| {
                    let menu = menu.clone();
                    let scroll = anchor_click(*href);
                    let onclick = Callback::from(move |e: MouseEvent| {
                        menu.set(MenuState::closed());
                        scroll.emit(e);
                    });
                    html! { <a href={*href} {onclick}>{ *label }</a> }
                }) }
            </div>
        </header>
    }
}
