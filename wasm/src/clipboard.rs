use gloo_timers::future::TimeoutFuture;
use js_sys::{Function, Promise, Reflect};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::HtmlElement;

use crate::controller::COPY_FEEDBACK_MS;

const FEEDBACK_STYLES: [(&str, &str); 3] = [
    ("background", "var(--color-success)"),
    ("border-color", "var(--color-success)"),
    ("color", "var(--color-bg)"),
];

/// `navigator.clipboard.writeText`, looked up dynamically so pages served
/// without a secure context fail with an error instead of a trap.
pub async fn write_text(text: &str) -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let clipboard = Reflect::get(&window.navigator(), &JsValue::from_str("clipboard"))?;
    if clipboard.is_undefined() || clipboard.is_null() {
        return Err(JsValue::from_str("clipboard API unavailable"));
    }
    let write = Reflect::get(&clipboard, &JsValue::from_str("writeText"))?
        .dyn_into::<Function>()?;
    let promise = write
        .call1(&clipboard, &JsValue::from_str(text))?
        .dyn_into::<Promise>()?;
    JsFuture::from(promise).await?;
    Ok(())
}

/// Shows "Copied!" on the button, then puts the label and styles back.
pub async fn flash_copied(button: &HtmlElement) -> Result<(), JsValue> {
    let original = button.text_content();
    let style = button.style();

    button.set_text_content(Some("Copied!"));
    for (name, value) in FEEDBACK_STYLES {
        style.set_property(name, value)?;
    }

    TimeoutFuture::new(COPY_FEEDBACK_MS).await;

    button.set_text_content(original.as_deref());
    for (name, _) in FEEDBACK_STYLES {
        style.remove_property(name)?;
    }
    Ok(())
}
