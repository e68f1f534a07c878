//! The owning lifecycle controller. One session per mount; two phases only:
//! Running (frames scheduled, handlers bound) and Stopped (terminal,
//! resources released).

use std::cell::RefCell;
use std::rc::Rc;

use web_sys as web;

use backdrop_core::{SceneGeometry, SceneState};

use crate::{dom, events, frame};

pub struct Session {
    ctx: Rc<RefCell<frame::FrameContext>>,
    listeners: Vec<events::ListenerHandle>,
    render_loop: Option<frame::RenderLoop>,
}

impl Session {
    /// Assemble the scene on the given canvas and bring the system to the
    /// Running phase.
    ///
    /// Fails explicitly when the canvas cannot yield a WebGPU context; the
    /// caller keeps its static background in that case.
    pub async fn start(canvas: web::HtmlCanvasElement) -> anyhow::Result<Self> {
        let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
        dom::sync_canvas_backing_size(&canvas);

        let geometry = SceneGeometry::from_entropy();
        geometry.validate()?;
        let gpu = frame::init_gpu(&canvas, &geometry).await?;
        let state = SceneState::new(canvas.width(), canvas.height());

        let ctx = Rc::new(RefCell::new(frame::FrameContext {
            state,
            gpu: Some(gpu),
            canvas,
        }));

        // the page may already be scrolled at mount (e.g. a reload mid-page)
        events::apply_current_scroll(&ctx);

        let listeners = vec![
            events::wire_resize(&ctx, &window),
            events::wire_scroll(&ctx, &window),
        ];
        let render_loop = frame::RenderLoop::start(ctx.clone());

        log::info!("backdrop session running");
        Ok(Self {
            ctx,
            listeners,
            render_loop: Some(render_loop),
        })
    }

    pub fn is_running(&self) -> bool {
        self.render_loop.is_some()
    }

    pub fn scrolled(&self) -> bool {
        self.ctx.borrow().state.scrolled
    }

    /// Tear everything down. The first call halts the schedule, unbinds both
    /// handlers, freezes the scene state and releases the GPU resources;
    /// later calls are no-ops.
    pub fn stop(&mut self) {
        let Some(render_loop) = self.render_loop.take() else {
            return;
        };
        render_loop.stop();
        for listener in self.listeners.drain(..) {
            listener.unbind();
        }
        let mut ctx = self.ctx.borrow_mut();
        ctx.state.stop();
        // dropping the GPU state releases buffers, pipelines and the surface
        ctx.gpu = None;
        log::info!("backdrop session stopped");
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        self.stop();
    }
}
