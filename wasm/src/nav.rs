//! Tour tabs, the mobile navigation menu, in-page anchor scrolling and
//! section reveal on scroll.

use js_sys::Array;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    Document, HtmlElement, IntersectionObserver, IntersectionObserverEntry,
    IntersectionObserverInit, Node, ScrollBehavior, ScrollToOptions,
};

use crate::dom;

const ACTIVE: &str = "active";

/// Marks the `index`-th tour frame and tab active and clears the rest.
pub fn switch_tour(document: &Document, index: usize) -> Result<(), JsValue> {
    for selector in [".tour-frame", ".tour-tab"] {
        for (i, el) in dom::elements(document, selector)?.iter().enumerate() {
            el.class_list().toggle_with_force(ACTIVE, i == index)?;
        }
    }
    Ok(())
}

pub fn bind_tour_tabs(document: &Document) -> Result<(), JsValue> {
    for (index, tab) in dom::elements(document, ".tour-tab")?.into_iter().enumerate() {
        let document = document.clone();
        dom::listen(&tab, "click", move |_| {
            if let Err(e) = switch_tour(&document, index) {
                web_sys::console::error_1(&e);
            }
        })?;
    }
    Ok(())
}

/// Hamburger toggle. The menu closes again on a link click or on any
/// click outside both the button and the menu.
pub fn bind_menu(document: &Document) -> Result<(), JsValue> {
    let (Some(hamburger), Some(links)) = (
        document.get_element_by_id("hamburger"),
        document.get_element_by_id("navLinks"),
    ) else {
        return Ok(());
    };

    let set_open = {
        let hamburger = hamburger.clone();
        let links = links.clone();
        move |open: Option<bool>| {
            for el in [&hamburger, &links] {
                let classes = el.class_list();
                let toggled = match open {
                    Some(force) => classes.toggle_with_force(ACTIVE, force),
                    None => classes.toggle(ACTIVE),
                };
                if let Err(e) = toggled {
                    web_sys::console::error_1(&e);
                }
            }
        }
    };

    let toggle = set_open.clone();
    dom::listen(&hamburger, "click", move |_| toggle(None))?;

    for link in dom::elements(document, ".nav-link")? {
        let close = set_open.clone();
        dom::listen(&link, "click", move |_| close(Some(false)))?;
    }

    let outside = set_open;
    dom::listen(document, "click", move |event| {
        let target = event.target().and_then(|t| t.dyn_into::<Node>().ok());
        let inside = target
            .as_ref()
            .map(|t| hamburger.contains(Some(t)) || links.contains(Some(t)))
            .unwrap_or(false);
        if !inside {
            outside(Some(false));
        }
    })?;

    Ok(())
}

pub const REVEAL_SELECTOR: &str =
    ".analyze-section, .proof-section, .examples-section, .intelligence-section";
const REVEAL_THRESHOLD: f64 = 0.1;
const REVEAL_ROOT_MARGIN: &str = "0px 0px -100px 0px";
const REVEAL_TRANSITION: &str =
    "opacity 0.6s cubic-bezier(0.16, 1, 0.3, 1), transform 0.6s cubic-bezier(0.16, 1, 0.3, 1)";

/// Gap left between the sticky nav and a scrolled-to section.
const ANCHOR_GAP: f64 = 20.0;

/// Hides the major sections and fades each one in the first time it
/// enters the viewport. The observer is owned by its callback.
pub fn reveal_sections(document: &Document) -> Result<(), JsValue> {
    let sections = dom::elements(document, REVEAL_SELECTOR)?;
    if sections.is_empty() {
        return Ok(());
    }

    let callback = Closure::<dyn FnMut(Array, IntersectionObserver)>::new(
        |entries: Array, _observer: IntersectionObserver| {
            for entry in entries.iter() {
                let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                    continue;
                };
                if !entry.is_intersecting() {
                    continue;
                }
                if let Ok(el) = entry.target().dyn_into::<HtmlElement>() {
                    if let Err(e) = set_revealed(&el, true) {
                        web_sys::console::error_1(&e);
                    }
                }
            }
        },
    );

    let options = IntersectionObserverInit::new();
    options.set_threshold(&JsValue::from_f64(REVEAL_THRESHOLD));
    options.set_root_margin(REVEAL_ROOT_MARGIN);
    let observer =
        IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options)?;
    callback.forget();

    for section in sections {
        if let Ok(el) = section.dyn_into::<HtmlElement>() {
            set_revealed(&el, false)?;
            el.style().set_property("transition", REVEAL_TRANSITION)?;
            observer.observe(&el);
        }
    }
    Ok(())
}

fn set_revealed(el: &HtmlElement, shown: bool) -> Result<(), JsValue> {
    let style = el.style();
    if shown {
        style.set_property("opacity", "1")?;
        style.set_property("transform", "translateY(0)")?;
    } else {
        style.set_property("opacity", "0")?;
        style.set_property("transform", "translateY(40px)")?;
    }
    Ok(())
}

/// Selector for an in-page link, or `None` for a bare `#`.
pub fn anchor_target(href: &str) -> Option<&str> {
    if href.starts_with('#') && href.len() > 1 {
        Some(href)
    } else {
        None
    }
}

/// Scroll offset that puts a section just below the nav bar.
pub fn anchor_scroll_top(target_offset: i32, nav_height: i32) -> f64 {
    f64::from(target_offset) - f64::from(nav_height) - ANCHOR_GAP
}

/// Smooth-scrolls `#section` links so the section clears the nav bar.
pub fn bind_anchor_scroll(document: &Document) -> Result<(), JsValue> {
    for link in dom::elements(document, "a[href^=\"#\"]")? {
        let document = document.clone();
        let href = link.get_attribute("href").unwrap_or_default();
        let Some(selector) = anchor_target(&href).map(str::to_string) else {
            continue;
        };
        dom::listen(&link, "click", move |event| {
            if let Err(e) = scroll_to_section(&document, &selector, &event) {
                web_sys::console::error_1(&e);
            }
        })?;
    }
    Ok(())
}

fn scroll_to_section(
    document: &Document,
    selector: &str,
    event: &web_sys::Event,
) -> Result<(), JsValue> {
    event.prevent_default();

    let Some(target) = document.query_selector(selector)? else {
        return Ok(());
    };
    let target = target.dyn_into::<HtmlElement>()?;
    let nav_height = document
        .query_selector(".nav")?
        .and_then(|nav| nav.dyn_into::<HtmlElement>().ok())
        .map(|nav| nav.offset_height())
        .unwrap_or(0);

    let options = ScrollToOptions::new();
    options.set_top(anchor_scroll_top(target.offset_top(), nav_height));
    options.set_behavior(ScrollBehavior::Smooth);
    if let Some(window) = web_sys::window() {
        window.scroll_to_with_scroll_to_options(&options);
    }
    Ok(())
}
