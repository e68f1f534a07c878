//! The continuous render schedule, driven by `requestAnimationFrame`.
//!
//! Each tick advances the per-frame spins and draws. The loop re-arms itself
//! until the running flag goes false; teardown additionally cancels the
//! pending callback and drops the closure, so no tick can fire against a
//! disposed renderer.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

use backdrop_core::{SceneGeometry, SceneState};

use crate::render;

pub struct FrameContext {
    pub state: SceneState,
    pub gpu: Option<render::GpuState>,
    pub canvas: web::HtmlCanvasElement,
}

impl FrameContext {
    pub fn frame(&mut self) {
        self.state.advance_frame();
        let Some(gpu) = self.gpu.as_mut() else {
            return;
        };
        // pick up backing-size changes that raced the resize handler
        gpu.resize_if_needed(self.canvas.width(), self.canvas.height());
        if let Err(e) = gpu.render(&self.state) {
            // best-effort per frame; the next tick retries
            log::error!("render error: {e:?}");
        }
    }
}

pub async fn init_gpu(
    canvas: &web::HtmlCanvasElement,
    geometry: &SceneGeometry,
) -> anyhow::Result<render::GpuState> {
    match render::GpuState::new(canvas, geometry).await {
        Ok(gpu) => Ok(gpu),
        Err(e) => {
            log::error!("WebGPU init error: {e:?}");
            Err(e)
        }
    }
}

/// Handle on the frame schedule. Dropping it without calling [`stop`] leaves
/// the loop running; the owning session is responsible for stopping first.
///
/// [`stop`]: RenderLoop::stop
pub struct RenderLoop {
    running: Rc<Cell<bool>>,
    raf_id: Rc<Cell<i32>>,
    tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>>,
}

impl RenderLoop {
    pub fn start(ctx: Rc<RefCell<FrameContext>>) -> Self {
        let running = Rc::new(Cell::new(true));
        let raf_id = Rc::new(Cell::new(0));
        let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));

        let running_tick = running.clone();
        let raf_arm = raf_id.clone();
        let tick_arm = tick.clone();
        *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
            if !running_tick.get() {
                // stopped between scheduling and firing
                return;
            }
            ctx.borrow_mut().frame();
            if let Some(w) = web::window() {
                if let Ok(id) = w.request_animation_frame(
                    tick_arm.borrow().as_ref().unwrap().as_ref().unchecked_ref(),
                ) {
                    raf_arm.set(id);
                }
            }
        }) as Box<dyn FnMut()>));

        if let Some(w) = web::window() {
            if let Ok(id) = w
                .request_animation_frame(tick.borrow().as_ref().unwrap().as_ref().unchecked_ref())
            {
                raf_id.set(id);
            }
        }
        Self {
            running,
            raf_id,
            tick,
        }
    }

    /// Halt the schedule: clear the flag, cancel the pending callback and
    /// drop the closure. No further tick executes after this returns.
    pub fn stop(&self) {
        self.running.set(false);
        if let Some(w) = web::window() {
            let _ = w.cancel_animation_frame(self.raf_id.get());
        }
        self.tick.borrow_mut().take();
    }
}
