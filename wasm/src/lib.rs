//! Browser controller for the tour analyzer section of the site.

pub mod api;
pub mod clipboard;
pub mod controller;
pub mod dom;
pub mod nav;

use std::cell::RefCell;
use std::rc::Rc;

use gloo_timers::future::TimeoutFuture;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlElement, KeyboardEvent};

use crate::controller::{
    alert_message, copyable, loading_slots, result_slots, Controller, Slot, COPY_FAILED_MESSAGE,
    RESULT_DELAY_MS,
};

const URL_INPUT_ID: &str = "tourUrl";
const ANALYZE_BUTTON_ID: &str = "analyzeBtn";
const RESULTS_ID: &str = "analysisResults";

/// Wires the page once the module loads. The controller lives inside the
/// event handlers and is dropped with the page.
#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();

    let document = dom::document()?;
    let controller = Rc::new(RefCell::new(Controller::new()));

    if let Some(button) = document.get_element_by_id(ANALYZE_BUTTON_ID) {
        let controller = controller.clone();
        dom::listen(&button, "click", move |_| {
            spawn_local(run_analysis(controller.clone()));
        })?;
    }

    if let Some(input) = document.get_element_by_id(URL_INPUT_ID) {
        let controller = controller.clone();
        dom::listen(&input, "keypress", move |event| {
            let is_enter = event
                .dyn_ref::<KeyboardEvent>()
                .map(|k| k.key() == "Enter")
                .unwrap_or(false);
            if is_enter {
                spawn_local(run_analysis(controller.clone()));
            }
        })?;
    }

    if let Some(button) = document.query_selector(".copy-btn")? {
        dom::listen(&button, "click", move |_| spawn_local(copy_content()))?;
    }

    nav::bind_tour_tabs(&document)?;
    nav::bind_menu(&document)?;
    nav::bind_anchor_scroll(&document)?;
    nav::reveal_sections(&document)?;
    Ok(())
}

async fn run_analysis(controller: Rc<RefCell<Controller>>) {
    if let Err(e) = analyze(&controller).await {
        web_sys::console::error_1(&e);
    }
}

async fn analyze(controller: &RefCell<Controller>) -> Result<(), JsValue> {
    let document = dom::document()?;
    let raw = dom::input_value(&document, URL_INPUT_ID)?;

    let submitted = controller.borrow_mut().submit(&raw);
    let url = match submitted {
        Ok(url) => url,
        Err(e) => {
            dom::alert(alert_message(e));
            return Ok(());
        }
    };

    dom::reveal(&dom::by_id(&document, RESULTS_ID)?)?;
    dom::render(&document, &loading_slots())?;

    let outcome = api::fetch_analysis(&url).await;
    if let Err(e) = &outcome {
        dom::log_error(&format!("Analysis error: {e}"));
    }

    TimeoutFuture::new(RESULT_DELAY_MS).await;

    let shown = controller.borrow_mut().resolve(outcome);
    dom::render(&document, &result_slots(&shown))
}

async fn copy_content() {
    if let Err(e) = copy().await {
        web_sys::console::error_1(&e);
    }
}

async fn copy() -> Result<(), JsValue> {
    let document = dom::document()?;
    let content = dom::by_id(&document, Slot::GeneratedCopy.element_id())?
        .text_content()
        .unwrap_or_default();
    let Some(text) = copyable(&content) else {
        return Ok(());
    };

    if let Err(e) = clipboard::write_text(text).await {
        dom::log_error(&format!("Copy failed: {:?}", e));
        dom::alert(COPY_FAILED_MESSAGE);
        return Ok(());
    }

    if let Some(button) = document.query_selector(".copy-btn")? {
        let button = button.dyn_into::<HtmlElement>()?;
        clipboard::flash_copied(&button).await?;
    }
    Ok(())
}
