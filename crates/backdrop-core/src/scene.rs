//! Mutable scene state shared between the event handlers and the frame loop.
//!
//! The scene graph itself is fixed after construction; the only fields that
//! change over a session's lifetime are the three node rotations, the camera
//! aspect ratio and the `scrolled` flag. All mutation happens on one thread
//! of control, interleaved between frame ticks.

use glam::{Mat4, Vec3};

use crate::constants::{
    CAMERA_FAR, CAMERA_FOV_DEGREES, CAMERA_NEAR, CAMERA_Z, CONNECTION_SPIN_PER_FRAME,
    CONNECTION_TILT_PER_PIXEL, PARTICLE_SPIN_PER_FRAME, SCROLLED_THRESHOLD_PX,
    SPHERE_SPIN_PER_FRAME, SPHERE_TILT_PER_PIXEL,
};

/// Simple right-handed camera description with perspective projection.
#[derive(Clone, Debug, PartialEq)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub aspect: f32,
    pub fovy_radians: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Camera {
    pub fn new(aspect: f32) -> Self {
        Self {
            eye: Vec3::new(0.0, 0.0, CAMERA_Z),
            target: Vec3::ZERO,
            up: Vec3::Y,
            aspect,
            fovy_radians: CAMERA_FOV_DEGREES.to_radians(),
            znear: CAMERA_NEAR,
            zfar: CAMERA_FAR,
        }
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, self.aspect, self.znear, self.zfar)
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    pub fn view_proj(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }
}

/// Rotation of one scene node. `spin` (about Y) accumulates per frame; `tilt`
/// (about X) is recomputed from the absolute scroll offset.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct NodeRotation {
    pub tilt: f32,
    pub spin: f32,
}

impl NodeRotation {
    pub fn matrix(&self) -> Mat4 {
        Mat4::from_rotation_x(self.tilt) * Mat4::from_rotation_y(self.spin)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Phase {
    Running,
    Stopped,
}

/// All mutable state of the visualization.
#[derive(Clone, Debug, PartialEq)]
pub struct SceneState {
    pub camera: Camera,
    pub sphere: NodeRotation,
    pub connections: NodeRotation,
    pub particles: NodeRotation,
    pub scrolled: bool,
    phase: Phase,
}

impl SceneState {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            camera: Camera::new(aspect_ratio(width, height)),
            sphere: NodeRotation::default(),
            connections: NodeRotation::default(),
            particles: NodeRotation::default(),
            scrolled: false,
            phase: Phase::Running,
        }
    }

    pub fn is_running(&self) -> bool {
        self.phase == Phase::Running
    }

    /// One frame tick: advance the three spins by their fixed increments.
    pub fn advance_frame(&mut self) {
        if !self.is_running() {
            return;
        }
        self.sphere.spin += SPHERE_SPIN_PER_FRAME;
        self.connections.spin += CONNECTION_SPIN_PER_FRAME;
        self.particles.spin += PARTICLE_SPIN_PER_FRAME;
    }

    /// Recompute the scroll-derived state from the current vertical offset.
    ///
    /// Pure in `offset`: repeated calls with the same value are idempotent.
    /// The particle field has no scroll tilt.
    pub fn on_scroll(&mut self, offset: f32) {
        if !self.is_running() {
            return;
        }
        let offset = offset.max(0.0);
        self.scrolled = offset > SCROLLED_THRESHOLD_PX;
        self.sphere.tilt = offset * SPHERE_TILT_PER_PIXEL;
        self.connections.tilt = offset * CONNECTION_TILT_PER_PIXEL;
    }

    /// Track the drawing surface: camera aspect follows width / height.
    /// Zero dimensions (minimized surface) are ignored.
    pub fn on_resize(&mut self, width: u32, height: u32) {
        if !self.is_running() {
            return;
        }
        if width == 0 || height == 0 {
            return;
        }
        self.camera.aspect = aspect_ratio(width, height);
    }

    /// Enter the terminal `Stopped` phase. Every mutating operation becomes a
    /// no-op afterwards; there is no way back to `Running`.
    pub fn stop(&mut self) {
        self.phase = Phase::Stopped;
    }
}

#[inline]
fn aspect_ratio(width: u32, height: u32) -> f32 {
    width as f32 / height.max(1) as f32
}
