use web_sys::Element;
use yew::prelude::*;

use crate::config::REVEAL_THRESHOLD;
use crate::utils::motion::prefers_reduced_motion;
use crate::utils::viewport::{Arrival, TriggerHandle};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealState {
    Hidden,
    /// Shown via the `is-in` transition.
    Revealed,
    /// Shown without any transition (reduced motion).
    Static,
}

impl RevealState {
    /// Hidden elements become revealed; nothing ever goes back to hidden.
    pub fn reveal(self) -> Self {
        match self {
            RevealState::Hidden => RevealState::Revealed,
            shown => shown,
        }
    }

    /// Settles a hidden element once its trigger fires. Without an observer
    /// there is no scroll to animate against, so it is shown statically.
    pub fn arrive(self, arrival: Arrival) -> Self {
        match (self, arrival) {
            (RevealState::Hidden, Arrival::Immediate) => RevealState::Static,
            (state, _) => state.reveal(),
        }
    }

    pub fn class(self) -> Classes {
        match self {
            RevealState::Revealed => classes!("reveal", "is-in"),
            _ => classes!("reveal"),
        }
    }

    pub fn style(self) -> Option<&'static str> {
        match self {
            RevealState::Static => Some("opacity: 1; transform: none;"),
            _ => None,
        }
    }
}

#[derive(Properties, PartialEq)]
pub struct RevealProps {
    #[prop_or_default]
    pub class: Classes,
    #[prop_or_default]
    pub id: Option<AttrValue>,
    pub children: Children,
}

#[function_component]
pub fn Reveal(props: &RevealProps) -> Html {
    let node = use_node_ref();
    let state = use_state(|| RevealState::Hidden);
    let trigger = use_context::<TriggerHandle>();

    {
        let node = node.clone();
        let state = state.clone();
        use_effect_with_deps(
            move |_| {
                let mut registration = None;
                if prefers_reduced_motion() {
                    state.set(RevealState::Static);
                } else if let Some(element) = node.cast::<Element>() {
                    let on_visible = {
                        let state = state.clone();
                        move |arrival: Arrival| state.set(state.arrive(arrival))
                    };
                    match &trigger {
                        Some(TriggerHandle(trigger)) => {
                            registration = trigger
                                .observe(&element, REVEAL_THRESHOLD, on_visible)
                                .map(|id| (trigger.clone(), id));
                        }
                        None => on_visible(Arrival::Immediate),
                    }
                }
                move || {
                    if let Some((trigger, id)) = registration {
                        trigger.release(id);
                    }
                }
            },
            (),
        );
    }

    html! {
        <div
            ref={node}
            id={props.id.clone()}
            class={classes!(state.class(), props.class.clone())}
            style={state.style()}
        >
            { for props.children.iter() }
        </div>
    }
}
