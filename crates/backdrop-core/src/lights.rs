use glam::Vec3;

use crate::constants::{
    AMBIENT_COLOR, AMBIENT_INTENSITY, DIRECTIONAL_COLOR, DIRECTIONAL_DIRECTION,
    DIRECTIONAL_INTENSITY, POINT_COLOR, POINT_INTENSITY, POINT_POSITION,
};

#[derive(Clone, Copy, Debug)]
pub struct AmbientLight {
    pub color: [f32; 3],
    pub intensity: f32,
}

#[derive(Clone, Copy, Debug)]
pub struct DirectionalLight {
    pub color: [f32; 3],
    pub intensity: f32,
    /// Direction the light arrives *from*, looking at the origin.
    pub direction: Vec3,
}

#[derive(Clone, Copy, Debug)]
pub struct PointLight {
    pub color: [f32; 3],
    pub intensity: f32,
    pub position: Vec3,
}

/// The fixed three-light rig: a low ambient fill, a primary directional
/// source, and a secondary accent point light. Immutable after construction.
#[derive(Clone, Copy, Debug)]
pub struct LightRig {
    pub ambient: AmbientLight,
    pub directional: DirectionalLight,
    pub point: PointLight,
}

impl LightRig {
    pub fn fixed() -> Self {
        Self {
            ambient: AmbientLight {
                color: AMBIENT_COLOR,
                intensity: AMBIENT_INTENSITY,
            },
            directional: DirectionalLight {
                color: DIRECTIONAL_COLOR,
                intensity: DIRECTIONAL_INTENSITY,
                direction: DIRECTIONAL_DIRECTION,
            },
            point: PointLight {
                color: POINT_COLOR,
                intensity: POINT_INTENSITY,
                position: POINT_POSITION,
            },
        }
    }
}

impl Default for LightRig {
    fn default() -> Self {
        Self::fixed()
    }
}
