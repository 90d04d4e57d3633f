use yew::prelude::*;

use crate::components::carousel::{Testimonial, TestimonialSlider};
use crate::components::contact::LeadForm;
use crate::components::counter::Counter;
use crate::components::nav::{anchor_click, Nav};
use crate::components::reveal::Reveal;

fn testimonials() -> Vec<Testimonial> {
    vec![
        Testimonial {
            quote: "SSD HOLDING restructured our portfolio in a quarter. Reporting is finally something the board reads.".into(),
            author: "Amira K.".into(),
            role: "CFO, regional logistics group".into(),
        },
        Testimonial {
            quote: "Clear numbers, fast answers, no surprises. Exactly what we needed going into the acquisition.".into(),
            author: "Daniel R.".into(),
            role: "Founder, manufacturing SME".into(),
        },
        Testimonial {
            quote: "They treated our capital like their own. Two years in, we've never looked back.".into(),
            author: "Leila M.".into(),
            role: "Managing partner, family office".into(),
        },
    ]
}

#[function_component]
fn Year() -> Html {
    let year = use_memo(|_| js_sys::Date::new_0().get_full_year(), ());
    html! { <span id="year">{ year.to_string() }</span> }
}

#[function_component]
pub fn Landing() -> Html {
    // Reveal transitions only apply once the boot sequence has marked <html> with `js`.
    let page_css = r#"
        html.js .reveal { opacity: 0; transform: translateY(18px); transition: opacity .6s ease, transform .6s ease; }
        html.js .reveal.is-in { opacity: 1 !important; transform: none !important; }
        .nav__mobile[hidden] { display: none; }
        .reviewSlider { overflow: hidden; }
        .reviewTrack { display: flex; width: 300%; transition: transform .5s ease; }
        .reviewTrack .review { flex: 0 0 33.3333%; margin: 0; }
        .dotBtn.is-active { opacity: 1; }
        @media (prefers-reduced-motion: reduce) {
            .reviewTrack { transition: none; }
        }
    "#;

    html! {
        <div class="landing-page" id="top">
            <style>{page_css}</style>
            <Nav />
            <main>
                <section class="hero">
                    <Reveal class="hero__content">
                        <h1 class="hero__title">{"Capital, structured for growth."}</h1>
                        <p class="hero__subtitle">
                            {"SSD HOLDING partners with owner-led companies on acquisitions, restructuring and long-term investment."}
                        </p>
                        <a class="btn btn--primary" href="#contact" onclick={anchor_click("#contact")}>{"Talk to us"}</a>
                    </Reveal>
                </section>

                <section id="services" class="services">
                    <Reveal class="section__intro">
                        <h2>{"What we do"}</h2>
                    </Reveal>
                    <div class="cards">
                        <Reveal class="card">
                            <h3>{"Acquisitions"}</h3>
                            <p>{"Deal sourcing, due diligence and integration planning."}</p>
                        </Reveal>
                        <Reveal class="card">
                            <h3>{"Restructuring"}</h3>
                            <p>{"Operational and financial turnarounds with measurable milestones."}</p>
                        </Reveal>
                        <Reveal class="card">
                            <h3>{"Holding management"}</h3>
                            <p>{"Consolidated reporting, governance and treasury across entities."}</p>
                        </Reveal>
                    </div>
                </section>

                <section id="results" class="stats">
                    <Reveal class="stat">
                        <Counter class="stat__value" count="250" />
                        <span class="stat__label">{"M€ under management"}</span>
                    </Reveal>
                    <Reveal class="stat">
                        <Counter class="stat__value" count="38" />
                        <span class="stat__label">{"portfolio companies"}</span>
                    </Reveal>
                    <Reveal class="stat">
                        <Counter class="stat__value" count="15" />
                        <span class="stat__label">{"years in the market"}</span>
                    </Reveal>
                </section>

                <section id="reviews" class="reviews">
                    <Reveal class="section__intro">
                        <h2>{"What partners say"}</h2>
                    </Reveal>
                    <TestimonialSlider slides={testimonials()} />
                </section>

                <section id="contact" class="contact">
                    <Reveal class="section__intro">
                        <h2>{"Start a conversation"}</h2>
                        <p>{"Tell us about your company. We reply within two business days."}</p>
                    </Reveal>
                    <LeadForm />
                </section>
            </main>
            <footer class="footer">
                <p>{"© "}<Year />{" SSD HOLDING. All rights reserved."}</p>
            </footer>
        </div>
    }
}
