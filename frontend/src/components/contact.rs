use once_cell::sync::Lazy;
use regex::Regex;
use web_sys::{HtmlInputElement, HtmlTextAreaElement};
use yew::prelude::*;

use crate::config::CONTACT_ENDPOINT;

static EMAIL_SHAPE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\S+@\S+\.\S+$").expect("email shape pattern is valid"));

pub const SENDING_STATUS: &str = "Sending…";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeadRejection {
    MissingFields,
    InvalidEmail,
}

impl LeadRejection {
    pub fn status(self) -> &'static str {
        match self {
            LeadRejection::MissingFields => "Please fill in name, email, and message.",
            LeadRejection::InvalidEmail => "Please enter a valid email address.",
        }
    }
}

/// Client-side gate in front of the native form POST.
///
/// Only checks presence and rough shape; the server validates again.
pub fn check_lead(name: &str, email: &str, message: &str) -> Result<(), LeadRejection> {
    let (name, email, message) = (name.trim(), email.trim(), message.trim());
    if name.is_empty() || email.is_empty() || message.is_empty() {
        return Err(LeadRejection::MissingFields);
    }
    if !EMAIL_SHAPE.is_match(email) {
        return Err(LeadRejection::InvalidEmail);
    }
    Ok(())
}

#[function_component]
pub fn LeadForm() -> Html {
    let name = use_node_ref();
    let email = use_node_ref();
    let message = use_node_ref();
    let status = use_state(String::new);

    let onsubmit = {
        let name = name.clone();
        let email = email.clone();
        let message = message.clone();
        let status = status.clone();
        Callback::from(move |e: SubmitEvent| {
            let name = name.cast::<HtmlInputElement>().map(|i| i.value()).unwrap_or_default();
            let email = email.cast::<HtmlInputElement>().map(|i| i.value()).unwrap_or_default();
            let message = message
                .cast::<HtmlTextAreaElement>()
                .map(|t| t.value())
                .unwrap_or_default();
            match check_lead(&name, &email, &message) {
                Ok(()) => status.set(SENDING_STATUS.to_string()),
                Err(rejection) => {
                    // Keep the visitor on the page with the form intact.
                    e.prevent_default();
                    status.set(rejection.status().to_string());
                }
            }
        })
    };

    html! {
        <form id="leadForm" class="leadForm" action={CONTACT_ENDPOINT} method="post" novalidate=true {onsubmit}>
            <div class="field">
                <label for="name">{"Name"}</label>
                <input ref={name} id="name" name="name" type="text" autocomplete="name" required=true />
            </div>
            <div class="field">
                <label for="email">{"Email"}</label>
                <input ref={email} id="email" name="email" type="email" autocomplete="email" required=true />
            </div>
            <div class="field">
                <label for="company">{"Company (optional)"}</label>
                <input id="company" name="company" type="text" autocomplete="organization" />
            </div>
            <div class="field">
                <label for="msg">{"Message"}</label>
                <textarea ref={message} id="msg" name="message" rows="5" required=true></textarea>
            </div>
            <button type="submit" class="btn btn--primary">{"Send message"}</button>
            <p id="formStatus" class="formStatus" role="status" aria-live="polite">{ (*status).clone() }</p>
        </form>
    }
}
