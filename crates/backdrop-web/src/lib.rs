#![cfg(target_arch = "wasm32")]
//! WASM front-end for the holographic page backdrop.
//!
//! The host page owns the canvas and calls [`attach`]; the returned
//! [`Backdrop`] handle exposes the `scrolled` signal for chrome styling and
//! `stop()` for teardown. Everything else (copy, navigation, the card hover
//! tweens) lives outside this crate and only shares the page lifecycle.

use wasm_bindgen::prelude::*;

mod dom;
mod events;
mod frame;
mod render;
mod session;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("backdrop-web loaded");
    Ok(())
}

/// JS-facing handle around one running visualization session.
#[wasm_bindgen]
pub struct Backdrop {
    inner: session::Session,
}

#[wasm_bindgen]
impl Backdrop {
    /// Whether the page has scrolled past the chrome-switch threshold.
    #[wasm_bindgen(getter)]
    pub fn scrolled(&self) -> bool {
        self.inner.scrolled()
    }

    #[wasm_bindgen(getter)]
    pub fn running(&self) -> bool {
        self.inner.is_running()
    }

    /// Stop the render schedule and release all GPU resources. Safe to call
    /// more than once; only the first call has an effect.
    pub fn stop(&mut self) {
        self.inner.stop();
    }
}

/// Mount the backdrop onto the canvas with the given element id.
///
/// Rejects when WebGPU is unavailable (e.g. hardware acceleration disabled);
/// the page should catch this and keep its static gradient background.
#[wasm_bindgen]
pub async fn attach(canvas_id: String) -> Result<Backdrop, JsValue> {
    let document =
        dom::window_document().ok_or_else(|| JsValue::from_str("no window/document"))?;
    let canvas = dom::canvas_by_id(&document, &canvas_id)
        .map_err(|e| JsValue::from_str(&format!("{e:#}")))?;
    let inner = session::Session::start(canvas)
        .await
        .map_err(|e| JsValue::from_str(&format!("backdrop init failed: {e:#}")))?;
    Ok(Backdrop { inner })
}
