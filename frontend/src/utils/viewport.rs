use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Element, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit};

use super::motion::has_intersection_observer;

// Browsers may report a ratio a hair under the threshold at the crossing.
const RATIO_TOLERANCE: f64 = 0.001;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TriggerId(u64);

/// How a visibility callback came to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arrival {
    /// The element scrolled into view past its threshold.
    InView,
    /// No observer is available, so the callback ran straight away.
    Immediate,
}

struct Registration<T> {
    id: TriggerId,
    target: T,
    threshold: f64,
    on_visible: Box<dyn FnOnce()>,
}

/// One-shot visibility callbacks keyed by target.
///
/// Callbacks are handed back to the caller rather than run in place, so the
/// owner can release its borrow before running them.
pub struct TriggerRegistry<T> {
    next_id: u64,
    registrations: Vec<Registration<T>>,
}

impl<T: PartialEq> TriggerRegistry<T> {
    pub fn new() -> Self {
        Self {
            next_id: 0,
            registrations: Vec::new(),
        }
    }

    pub fn register(&mut self, target: T, threshold: f64, on_visible: Box<dyn FnOnce()>) -> TriggerId {
        let id = TriggerId(self.next_id);
        self.next_id += 1;
        self.registrations.push(Registration {
            id,
            target,
            threshold,
            on_visible,
        });
        id
    }

    /// Removes and returns every callback on `target` satisfied by `ratio`.
    pub fn take_visible(&mut self, target: &T, ratio: f64) -> Vec<Box<dyn FnOnce()>> {
        let (ready, waiting): (Vec<_>, Vec<_>) = self
            .registrations
            .drain(..)
            .partition(|r| r.target == *target && ratio + RATIO_TOLERANCE >= r.threshold);
        self.registrations = waiting;
        ready.into_iter().map(|r| r.on_visible).collect()
    }

    /// Drops a registration without firing it. Returns its target if it was pending.
    pub fn release(&mut self, id: TriggerId) -> Option<T> {
        let pos = self.registrations.iter().position(|r| r.id == id)?;
        Some(self.registrations.remove(pos).target)
    }

    pub fn is_watching(&self, target: &T) -> bool {
        self.registrations.iter().any(|r| r.target == *target)
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.registrations.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.registrations.is_empty()
    }
}

impl<T: PartialEq> Default for TriggerRegistry<T> {
    fn default() -> Self {
        Self::new()
    }
}

type EntryCallback = Closure<dyn FnMut(js_sys::Array, IntersectionObserver)>;

struct ThresholdObserver {
    threshold: f64,
    observer: IntersectionObserver,
    _callback: EntryCallback,
}

/// Page-wide visibility trigger backed by `IntersectionObserver`.
///
/// One observer is created per distinct threshold. Without observer support
/// callbacks run immediately with [`Arrival::Immediate`], so content is shown
/// rather than left hidden.
pub struct ViewportTrigger {
    registry: Rc<RefCell<TriggerRegistry<Element>>>,
    observers: RefCell<Vec<ThresholdObserver>>,
    supported: bool,
}

impl ViewportTrigger {
    pub fn new() -> Self {
        Self {
            registry: Rc::new(RefCell::new(TriggerRegistry::new())),
            observers: RefCell::new(Vec::new()),
            supported: has_intersection_observer(),
        }
    }

    /// Runs `on_visible` once, the first time `element` is at least
    /// `threshold` visible. Returns `None` when the callback already ran.
    pub fn observe(
        &self,
        element: &Element,
        threshold: f64,
        on_visible: impl FnOnce(Arrival) + 'static,
    ) -> Option<TriggerId> {
        if !self.supported {
            on_visible(Arrival::Immediate);
            return None;
        }
        let observer = match self.observer_for(threshold) {
            Some(observer) => observer,
            None => {
                on_visible(Arrival::Immediate);
                return None;
            }
        };
        let id = self.registry.borrow_mut().register(
            element.clone(),
            threshold,
            Box::new(move || on_visible(Arrival::InView)),
        );
        observer.observe(element);
        Some(id)
    }

    /// Forgets a pending registration, e.g. when its component unmounts.
    pub fn release(&self, id: TriggerId) {
        let released = self.registry.borrow_mut().release(id);
        if let Some(element) = released {
            if !self.registry.borrow().is_watching(&element) {
                for entry in self.observers.borrow().iter() {
                    entry.observer.unobserve(&element);
                }
            }
        }
    }

    fn observer_for(&self, threshold: f64) -> Option<IntersectionObserver> {
        if let Some(existing) = self
            .observers
            .borrow()
            .iter()
            .find(|o| (o.threshold - threshold).abs() < f64::EPSILON)
        {
            return Some(existing.observer.clone());
        }

        let registry = self.registry.clone();
        let callback = Closure::<dyn FnMut(js_sys::Array, IntersectionObserver)>::new(
            move |entries: js_sys::Array, observer: IntersectionObserver| {
                for entry in entries.iter() {
                    let entry: IntersectionObserverEntry = entry.unchecked_into();
                    if !entry.is_intersecting() {
                        continue;
                    }
                    let target = entry.target();
                    let ready = registry
                        .borrow_mut()
                        .take_visible(&target, entry.intersection_ratio());
                    if ready.is_empty() {
                        continue;
                    }
                    if !registry.borrow().is_watching(&target) {
                        observer.unobserve(&target);
                    }
                    for on_visible in ready {
                        on_visible();
                    }
                }
            },
        );

        let init = IntersectionObserverInit::new();
        init.set_threshold(&JsValue::from_f64(threshold));
        let observer = match IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init) {
            Ok(observer) => observer,
            Err(e) => {
                log::warn!("IntersectionObserver unavailable ({:?}), showing content immediately", e);
                return None;
            }
        };
        self.observers.borrow_mut().push(ThresholdObserver {
            threshold,
            observer: observer.clone(),
            _callback: callback,
        });
        Some(observer)
    }
}

impl Default for ViewportTrigger {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for ViewportTrigger {
    fn drop(&mut self) {
        for entry in self.observers.borrow().iter() {
            entry.observer.disconnect();
        }
    }
}

/// Context handle so components can share one trigger.
#[derive(Clone)]
pub struct TriggerHandle(pub Rc<ViewportTrigger>);

impl PartialEq for TriggerHandle {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn counter() -> (Rc<Cell<u32>>, impl Fn() -> Box<dyn FnOnce()>) {
        let hits = Rc::new(Cell::new(0));
        let make = {
            let hits = hits.clone();
            move || {
                let hits = hits.clone();
                Box::new(move || hits.set(hits.get() + 1)) as Box<dyn FnOnce()>
            }
        };
        (hits, make)
    }

    fn run(callbacks: Vec<Box<dyn FnOnce()>>) {
        for cb in callbacks {
            cb();
        }
    }

    #[test]
    fn fires_once_when_threshold_reached() {
        let (hits, make) = counter();
        let mut registry = TriggerRegistry::new();
        registry.register("hero", 0.15, make());

        run(registry.take_visible(&"hero", 0.05));
        assert_eq!(hits.get(), 0);
        run(registry.take_visible(&"hero", 0.15));
        assert_eq!(hits.get(), 1);
        run(registry.take_visible(&"hero", 1.0));
        assert_eq!(hits.get(), 1);
        assert!(registry.is_empty());
    }

    #[test]
    fn only_matching_target_fires() {
        let (hits, make) = counter();
        let mut registry = TriggerRegistry::new();
        registry.register("a", 0.6, make());
        registry.register("b", 0.6, make());

        run(registry.take_visible(&"a", 0.9));
        assert_eq!(hits.get(), 1);
        assert!(registry.is_watching(&"b"));
        assert!(!registry.is_watching(&"a"));
    }

    #[test]
    fn each_registration_keeps_its_own_threshold() {
        let (hits, make) = counter();
        let mut registry = TriggerRegistry::new();
        registry.register("stats", 0.15, make());
        registry.register("stats", 0.6, make());

        run(registry.take_visible(&"stats", 0.3));
        assert_eq!(hits.get(), 1);
        assert_eq!(registry.len(), 1);
        run(registry.take_visible(&"stats", 0.6));
        assert_eq!(hits.get(), 2);
    }

    #[test]
    fn tolerates_ratio_rounding_at_crossing() {
        let (hits, make) = counter();
        let mut registry = TriggerRegistry::new();
        registry.register("x", 0.6, make());
        run(registry.take_visible(&"x", 0.5999));
        assert_eq!(hits.get(), 1);
    }

    #[test]
    fn released_registration_never_fires() {
        let (hits, make) = counter();
        let mut registry = TriggerRegistry::new();
        let id = registry.register("card", 0.15, make());

        assert_eq!(registry.release(id), Some("card"));
        assert_eq!(registry.release(id), None);
        run(registry.take_visible(&"card", 1.0));
        assert_eq!(hits.get(), 0);
    }
}
