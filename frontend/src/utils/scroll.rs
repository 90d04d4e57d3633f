use web_sys::{window, ScrollBehavior, ScrollToOptions};

use crate::config::HEADER_OFFSET_PX;

/// Document offset that puts an element just below the fixed header.
pub fn anchor_scroll_top(rect_top: f64, scroll_y: f64) -> f64 {
    rect_top + scroll_y - HEADER_OFFSET_PX
}

/// Smooth-scrolls to the element named by an in-page `href` such as `#contact`.
///
/// Returns `false` when the anchor doesn't resolve, so the caller can let the
/// browser handle the link.
pub fn scroll_to_anchor(href: &str) -> bool {
    let Some(id) = href.strip_prefix('#').filter(|id| !id.is_empty()) else {
        return false;
    };
    let Some(window) = window() else {
        return false;
    };
    let Some(target) = window.document().and_then(|d| d.get_element_by_id(id)) else {
        return false;
    };
    let scroll_y = window.scroll_y().unwrap_or(0.0);
    let options = ScrollToOptions::new();
    options.set_top(anchor_scroll_top(target.get_bounding_client_rect().top(), scroll_y));
    options.set_behavior(ScrollBehavior::Smooth);
    window.scroll_to_with_scroll_to_options(&options);
    true
}
