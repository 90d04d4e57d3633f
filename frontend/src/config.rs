/// Form action for the contact relay served by the backend.
pub const CONTACT_ENDPOINT: &str = "/api/contact";

/// Fixed header height subtracted when scrolling to an in-page anchor.
pub const HEADER_OFFSET_PX: f64 = 90.0;

pub const REVEAL_THRESHOLD: f64 = 0.15;
// Counters should be mostly on screen before they start.
pub const COUNTER_THRESHOLD: f64 = 0.6;
pub const COUNTER_DURATION_MS: f64 = 900.0;

pub const SLIDE_INTERVAL_MS: u32 = 4_500;
