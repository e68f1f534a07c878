use wasm_bindgen::JsCast;
use web_sys as web;

use backdrop_core::MAX_PIXEL_RATIO;

#[inline]
pub fn window_document() -> Option<web::Document> {
    web::window().and_then(|w| w.document())
}

pub fn canvas_by_id(
    document: &web::Document,
    canvas_id: &str,
) -> anyhow::Result<web::HtmlCanvasElement> {
    document
        .get_element_by_id(canvas_id)
        .ok_or_else(|| anyhow::anyhow!("missing #{canvas_id}"))?
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|el| anyhow::anyhow!("#{canvas_id} is not a canvas: {el:?}"))
}

/// Keep the canvas backing store at CSS size times the device pixel ratio,
/// with the ratio capped to bound GPU cost on high-density displays.
/// Returns the resulting backing size in device pixels.
pub fn sync_canvas_backing_size(canvas: &web::HtmlCanvasElement) -> (u32, u32) {
    let Some(window) = web::window() else {
        return (canvas.width(), canvas.height());
    };
    let dpr = window.device_pixel_ratio().min(MAX_PIXEL_RATIO);
    let rect = canvas.get_bounding_client_rect();
    let w_px = ((rect.width() * dpr) as u32).max(1);
    let h_px = ((rect.height() * dpr) as u32).max(1);
    if w_px != canvas.width() {
        canvas.set_width(w_px);
    }
    if h_px != canvas.height() {
        canvas.set_height(h_px);
    }
    (w_px, h_px)
}

/// Current vertical page offset; missing/failed reads count as the top.
pub fn scroll_offset(window: &web::Window) -> f32 {
    window.scroll_y().unwrap_or(0.0).max(0.0) as f32
}

/// Mirror the `scrolled` signal onto `<body>` so page chrome can switch
/// styling from CSS alone.
pub fn set_scrolled_flag(document: &web::Document, scrolled: bool) {
    if let Some(body) = document.body() {
        let classes = body.class_list();
        let _ = if scrolled {
            classes.add_1("backdrop-scrolled")
        } else {
            classes.remove_1("backdrop-scrolled")
        };
    }
}
