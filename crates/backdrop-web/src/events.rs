//! Resize and scroll wiring. Handlers are fallible functions whose errors are
//! caught and logged at the listener boundary, leaving the last valid
//! transform in place rather than crashing the host page.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

use crate::dom;
use crate::frame::FrameContext;

/// A window event listener that can be detached again at teardown, unlike a
/// `Closure::forget` which would keep firing for the page lifetime.
pub struct ListenerHandle {
    target: web::EventTarget,
    event: &'static str,
    closure: Closure<dyn FnMut()>,
}

impl ListenerHandle {
    pub fn bind(
        target: &web::EventTarget,
        event: &'static str,
        handler: impl FnMut() + 'static,
    ) -> Self {
        let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut()>);
        let _ = target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref());
        Self {
            target: target.clone(),
            event,
            closure,
        }
    }

    pub fn unbind(&self) {
        let _ = self
            .target
            .remove_event_listener_with_callback(self.event, self.closure.as_ref().unchecked_ref());
    }
}

pub fn wire_resize(ctx: &Rc<RefCell<FrameContext>>, window: &web::Window) -> ListenerHandle {
    let ctx = ctx.clone();
    ListenerHandle::bind(window.as_ref(), "resize", move || {
        if let Err(err) = handle_resize(&ctx) {
            log::warn!("resize handler error: {err:?}");
        }
    })
}

pub fn wire_scroll(ctx: &Rc<RefCell<FrameContext>>, window: &web::Window) -> ListenerHandle {
    let ctx = ctx.clone();
    ListenerHandle::bind(window.as_ref(), "scroll", move || {
        if let Err(err) = handle_scroll(&ctx) {
            log::warn!("scroll handler error: {err:?}");
        }
    })
}

/// Apply the scroll position already present at mount, so a reload mid-page
/// starts with the right tilt and chrome state.
pub fn apply_current_scroll(ctx: &Rc<RefCell<FrameContext>>) {
    if let Err(err) = handle_scroll(ctx) {
        log::warn!("initial scroll sync error: {err:?}");
    }
}

fn handle_resize(ctx: &Rc<RefCell<FrameContext>>) -> anyhow::Result<()> {
    let mut ctx = ctx.borrow_mut();
    let (width, height) = dom::sync_canvas_backing_size(&ctx.canvas);
    ctx.state.on_resize(width, height);
    if let Some(gpu) = ctx.gpu.as_mut() {
        gpu.resize_if_needed(width, height);
    }
    Ok(())
}

fn handle_scroll(ctx: &Rc<RefCell<FrameContext>>) -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let offset = dom::scroll_offset(&window);
    let mut ctx = ctx.borrow_mut();
    ctx.state.on_scroll(offset);
    if ctx.state.is_running() {
        let document = window
            .document()
            .ok_or_else(|| anyhow::anyhow!("no document"))?;
        dom::set_scrolled_flag(&document, ctx.state.scrolled);
    }
    Ok(())
}
