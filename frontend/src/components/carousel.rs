use std::rc::Rc;

use gloo_timers::callback::Interval;
use yew::prelude::*;

use crate::config::SLIDE_INTERVAL_MS;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlideAction {
    Prev,
    Next,
    Jump(usize),
}

/// Rotation state over a fixed number of slides.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Carousel {
    index: usize,
    total: usize,
}

impl Carousel {
    /// `total` is clamped to at least one slide so the modular arithmetic holds.
    pub fn new(total: usize) -> Self {
        Self {
            index: 0,
            total: total.max(1),
        }
    }

    #[cfg(test)]
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn prev(&mut self) {
        self.index = (self.index + self.total - 1) % self.total;
    }

    pub fn next(&mut self) {
        self.index = (self.index + 1) % self.total;
    }

    /// Moves straight to `index`. Out-of-range indices are ignored.
    pub fn jump_to(&mut self, index: usize) -> bool {
        if index >= self.total {
            log::debug!("Ignoring jump to slide {} of {}", index, self.total);
            return false;
        }
        self.index = index;
        true
    }

    /// Horizontal track offset, in percent of the track width.
    pub fn offset_percent(&self) -> f64 {
        -(self.index as f64) * (100.0 / self.total as f64)
    }

    pub fn track_transform(&self) -> String {
        format!("transform: translateX({}%);", self.offset_percent())
    }

    pub fn is_active(&self, dot: usize) -> bool {
        dot == self.index
    }
}

impl Reducible for Carousel {
    type Action = SlideAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = *self;
        match action {
            SlideAction::Prev => next.prev(),
            SlideAction::Next => next.next(),
            SlideAction::Jump(index) => {
                next.jump_to(index);
            }
        }
        Rc::new(next)
    }
}

/// Owns the automatic-advance timer handle.
///
/// Pausing drops the handle; resuming creates a fresh one, so the period
/// restarts from the moment of resuming.
pub struct AutoRotate<H> {
    period_ms: u32,
    handle: Option<H>,
}

impl<H> AutoRotate<H> {
    pub fn new(period_ms: u32) -> Self {
        Self {
            period_ms,
            handle: None,
        }
    }

    pub fn start(&mut self, spawn: impl FnOnce(u32) -> H) {
        self.handle = None;
        self.handle = Some(spawn(self.period_ms));
    }

    pub fn stop(&mut self) {
        self.handle = None;
    }

    #[cfg(test)]
    pub fn is_running(&self) -> bool {
        self.handle.is_some()
    }
}

#[derive(Clone, PartialEq)]
pub struct Testimonial {
    pub quote: AttrValue,
    pub author: AttrValue,
    pub role: AttrValue,
}

#[derive(Properties, PartialEq)]
pub struct TestimonialSliderProps {
    pub slides: Vec<Testimonial>,
}

#[function_component]
pub fn TestimonialSlider(props: &TestimonialSliderProps) -> Html {
    let total = props.slides.len();
    let carousel = use_reducer(move || Carousel::new(total));
    let rotate = use_mut_ref(|| AutoRotate::<Interval>::new(SLIDE_INTERVAL_MS));

    let resume = {
        let carousel = carousel.dispatcher();
        let rotate = rotate.clone();
        Callback::from(move |_: ()| {
            let carousel = carousel.clone();
            rotate
                .borrow_mut()
                .start(|period| Interval::new(period, move || carousel.dispatch(SlideAction::Next)));
        })
    };

    {
        let resume = resume.clone();
        let rotate = rotate.clone();
        use_effect_with_deps(
            move |total| {
                if *total > 0 {
                    resume.emit(());
                }
                move || {
                    rotate.borrow_mut().stop();
                }
            },
            total,
        );
    }

    if total == 0 {
        return html! {};
    }

    let onmouseenter = {
        let rotate = rotate.clone();
        Callback::from(move |_: MouseEvent| {
            rotate.borrow_mut().stop();
        })
    };
    let onmouseleave = resume.reform(|_: MouseEvent| ());
    let on_prev = {
        let carousel = carousel.clone();
        Callback::from(move |_: MouseEvent| carousel.dispatch(SlideAction::Prev))
    };
    let on_next = {
        let carousel = carousel.clone();
        Callback::from(move |_: MouseEvent| carousel.dispatch(SlideAction::Next))
    };

    html! {
        <div class="reviewSlider" {onmouseenter} {onmouseleave}>
            <div class="reviewViewport">
                <div class="reviewTrack" style={carousel.track_transform()}>
                    { for props.slides.iter().map(|slide| html! {
                        <figure class="review">
                            <blockquote>{ slide.quote.clone() }</blockquote>
                            <figcaption>
                                <strong>{ slide.author.clone() }</strong>
                                <span>{ slide.role.clone() }</span>
                            </figcaption>
                        </figure>
                    }) }
                </div>
            </div>
            <div class="reviewControls">
                <button type="button" class="slideBtn" data-slide="prev" aria-label="Previous testimonial" onclick={on_prev}>{"‹"}</button>
                <div class="dots">
                    { for (0..total).map(|dot| {
                        let active = carousel.is_active(dot).then_some("is-active");
                        let carousel = carousel.clone();
                        let onclick = Callback::from(move |_: MouseEvent| carousel.dispatch(SlideAction::Jump(dot)));
                        html! {
                            <button
                                type="button"
                                class={classes!("dotBtn", active)}
                                data-dot={dot.to_string()}
                                aria-label={format!("Show testimonial {}", dot + 1)}
                                {onclick}
                            />
                        }
                    }) }
                </div>
                <button type="button" class="slideBtn" data-slide="next" aria-label="Next testimonial" onclick={on_next}>{"›"}</button>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[test]
    fn next_and_prev_wrap() {
        let mut carousel = Carousel::new(3);
        carousel.prev();
        assert_eq!(carousel.index(), 2);
        carousel.next();
        assert_eq!(carousel.index(), 0);
        carousel.next();
        carousel.next();
        assert_eq!(carousel.index(), 2);
        carousel.next();
        assert_eq!(carousel.index(), 0);
    }

    #[test]
    fn index_stays_in_range_for_any_sequence() {
        let mut carousel = Carousel::new(3);
        // Deterministic mix of moves.
        for step in 0..200u32 {
            if step % 3 == 0 || step % 7 == 0 {
                carousel.prev();
            } else {
                carousel.next();
            }
            assert!(carousel.index() < 3);
        }
    }

    #[test]
    fn jump_sets_track_and_single_active_dot() {
        let mut carousel = Carousel::new(3);
        assert!(carousel.jump_to(1));
        assert!((carousel.offset_percent() + 100.0 / 3.0).abs() < 1e-9);
        assert!(carousel.track_transform().starts_with("transform: translateX(-33.33"));
        let active: Vec<usize> = (0..3).filter(|d| carousel.is_active(*d)).collect();
        assert_eq!(active, vec![1]);
    }

    #[test]
    fn out_of_range_jump_is_ignored() {
        let mut carousel = Carousel::new(3);
        carousel.next();
        assert!(!carousel.jump_to(3));
        assert_eq!(carousel.index(), 1);
    }

    #[test]
    fn reducer_applies_actions() {
        let carousel = Rc::new(Carousel::new(3));
        let carousel = carousel.reduce(SlideAction::Jump(2));
        let carousel = carousel.reduce(SlideAction::Next);
        assert_eq!(carousel.index(), 0);
        let carousel = carousel.reduce(SlideAction::Prev);
        assert_eq!(carousel.index(), 2);
    }

    #[test]
    fn empty_slide_set_does_not_divide_by_zero() {
        let mut carousel = Carousel::new(0);
        carousel.next();
        carousel.prev();
        assert_eq!(carousel.index(), 0);
    }

    /// Stand-in for a recurring timer: fires every `period` ms after `started_at`.
    struct FakeInterval {
        started_at: u32,
        period: u32,
    }

    impl FakeInterval {
        fn fires_at(&self, now: u32) -> bool {
            now > self.started_at && (now - self.started_at) % self.period == 0
        }
    }

    fn advance(rotate: &AutoRotate<FakeInterval>, carousel: &mut Carousel, from: u32, to: u32) {
        for now in from..=to {
            if rotate.handle.as_ref().map_or(false, |timer| timer.fires_at(now)) {
                carousel.next();
            }
        }
    }

    #[test]
    fn hover_pauses_and_leave_restarts_phase() {
        let mut carousel = Carousel::new(3);
        let mut rotate = AutoRotate::new(SLIDE_INTERVAL_MS);
        rotate.start(|period| FakeInterval { started_at: 0, period });

        advance(&rotate, &mut carousel, 0, 4_500);
        assert_eq!(carousel.index(), 1);

        // Pointer enters at 6000: nothing advances while hovered.
        advance(&rotate, &mut carousel, 4_501, 6_000);
        rotate.stop();
        assert!(!rotate.is_running());
        advance(&rotate, &mut carousel, 6_001, 12_000);
        assert_eq!(carousel.index(), 1);

        // Leaves at 12000: next advance is a full period later, not on the old schedule.
        rotate.start(|period| FakeInterval { started_at: 12_000, period });
        advance(&rotate, &mut carousel, 12_001, 16_499);
        assert_eq!(carousel.index(), 1);
        advance(&rotate, &mut carousel, 16_500, 16_500);
        assert_eq!(carousel.index(), 2);
    }

    #[test]
    fn start_replaces_running_timer() {
        let dropped = Rc::new(RefCell::new(0));
        struct Handle(Rc<RefCell<u32>>);
        impl Drop for Handle {
            fn drop(&mut self) {
                *self.0.borrow_mut() += 1;
            }
        }

        let mut rotate = AutoRotate::new(4_500);
        rotate.start(|_| Handle(dropped.clone()));
        rotate.start(|_| Handle(dropped.clone()));
        assert_eq!(*dropped.borrow(), 1);
        rotate.stop();
        assert_eq!(*dropped.borrow(), 2);
    }
}
