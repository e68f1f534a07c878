//! Platform-neutral model of the holographic page backdrop: the procedural
//! scene population, the fixed camera/light rig, and the mutable rotation and
//! scroll state driven by the web frontend.

pub mod constants;
pub mod geometry;
pub mod lights;
pub mod scene;

pub static SCENE_WGSL: &str = include_str!("../shaders/scene.wgsl");

pub use constants::*;
pub use geometry::*;
pub use lights::*;
pub use scene::*;
