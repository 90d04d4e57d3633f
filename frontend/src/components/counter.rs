use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wasm_bindgen::prelude::Closure;
use wasm_bindgen::JsCast;
use web_sys::{window, Element};
use yew::prelude::*;

use crate::config::{COUNTER_DURATION_MS, COUNTER_THRESHOLD};
use crate::utils::motion::{now_ms, prefers_reduced_motion};
use crate::utils::viewport::{Arrival, TriggerHandle};

/// Parses a counter's literal target. Anything unusable counts as 0.
pub fn parse_count_target(raw: &str) -> i64 {
    match raw.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => value.round() as i64,
        _ => 0,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CountFrame {
    pub value: i64,
    pub done: bool,
}

/// Time-boxed interpolation from 0 to `target`.
#[derive(Debug, Clone, Copy)]
pub struct CountUp {
    target: i64,
    started_at: f64,
    duration_ms: f64,
}

impl CountUp {
    pub fn new(target: i64, started_at: f64) -> Self {
        Self {
            target,
            started_at,
            duration_ms: COUNTER_DURATION_MS,
        }
    }

    pub fn progress(&self, now: f64) -> f64 {
        ((now - self.started_at) / self.duration_ms).clamp(0.0, 1.0)
    }

    pub fn frame(&self, now: f64) -> CountFrame {
        let p = self.progress(now);
        if p >= 1.0 {
            return CountFrame {
                value: self.target,
                done: true,
            };
        }
        CountFrame {
            value: (self.target as f64 * p).round() as i64,
            done: false,
        }
    }
}

/// What a counter does once its trigger fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountStart {
    /// Display the value as-is, with no animation frames.
    Show(i64),
    Animate,
}

/// Only a counter that genuinely scrolled into view, with motion allowed, counts up.
pub fn count_start(reduced: bool, arrival: Arrival, target: i64) -> CountStart {
    match arrival {
        Arrival::InView if !reduced => CountStart::Animate,
        _ => CountStart::Show(target),
    }
}

type FrameCallback = Closure<dyn FnMut(f64)>;

/// Drives `count` on animation frames until done or until `cancelled` is set.
fn run_count_up(count: CountUp, cancelled: Rc<Cell<bool>>, show: impl Fn(i64) + 'static) {
    let Some(window) = window() else {
        show(count.target);
        return;
    };
    let show = Rc::new(show);
    let slot: Rc<RefCell<Option<FrameCallback>>> = Rc::new(RefCell::new(None));
    let schedule = move |callback: &FrameCallback| match window.request_animation_frame(callback.as_ref().unchecked_ref()) {
        Ok(_) => true,
        Err(e) => {
            log::warn!("requestAnimationFrame failed: {:?}", e);
            false
        }
    };

    let tick = {
        let slot = slot.clone();
        let show = show.clone();
        let schedule = schedule.clone();
        Closure::<dyn FnMut(f64)>::new(move |now: f64| {
            if cancelled.get() {
                slot.borrow_mut().take();
                return;
            }
            let frame = count.frame(now);
            show(frame.value);
            let scheduled = !frame.done
                && slot
                    .borrow()
                    .as_ref()
                    .map(|callback| schedule(callback))
                    .unwrap_or(false);
            if !scheduled {
                if !frame.done {
                    show(count.target);
                }
                // Breaks the closure's reference to itself.
                slot.borrow_mut().take();
            }
        })
    };
    if schedule(&tick) {
        *slot.borrow_mut() = Some(tick);
    } else {
        show(count.target);
    }
}

#[derive(Properties, PartialEq)]
pub struct CounterProps {
    /// Literal target, as written in the markup.
    pub count: AttrValue,
    #[prop_or_default]
    pub class: Classes,
}

/// A number that counts up from 0 once it is mostly on screen.
#[function_component]
pub fn Counter(props: &CounterProps) -> Html {
    let node = use_node_ref();
    let target = parse_count_target(&props.count);
    let reduced = use_memo(|_| prefers_reduced_motion(), ());
    let trigger = use_context::<TriggerHandle>();
    let shown = {
        let reduced = *reduced;
        use_state(move || if reduced { target } else { 0 })
    };

    {
        let node = node.clone();
        let shown = shown.clone();
        let reduced = *reduced;
        use_effect_with_deps(
            move |_| {
                let cancelled = Rc::new(Cell::new(false));
                let mut registration = None;
                let start = {
                    let cancelled = cancelled.clone();
                    let shown = shown.clone();
                    move |arrival: Arrival| match count_start(reduced, arrival, target) {
                        CountStart::Show(value) => shown.set(value),
                        CountStart::Animate => {
                            run_count_up(CountUp::new(target, now_ms()), cancelled, move |value| shown.set(value))
                        }
                    }
                };
                if reduced {
                    start(Arrival::Immediate);
                } else if let Some(element) = node.cast::<Element>() {
                    match &trigger {
                        Some(TriggerHandle(trigger)) => {
                            registration = trigger
                                .observe(&element, COUNTER_THRESHOLD, start)
                                .map(|id| (trigger.clone(), id));
                        }
                        None => start(Arrival::Immediate),
                    }
                }
                move || {
                    cancelled.set(true);
                    if let Some((trigger, id)) = registration {
                        trigger.release(id);
                    }
                }
            },
            target,
        );
    }

    html! {
        <span ref={node} class={props.class.clone()} data-count={props.count.clone()}>
            { shown.to_string() }
        </span>
    }
}
