//! Procedural geometry for the backdrop scene.
//!
//! Everything here is generated exactly once per session. The generator is
//! generic over [`rand::Rng`] so production code can draw real entropy while
//! tests pin a seed and assert the count/bound invariants deterministically.

use glam::Vec3;
use rand::prelude::*;
use thiserror::Error;

use crate::constants::{
    CONNECTION_COUNT, CONNECTION_HALF_EXTENT, CONNECTION_OPACITY_MAX, CONNECTION_OPACITY_MIN,
    PARTICLE_COUNT, PARTICLE_HALF_EXTENT, SPHERE_RADIUS, SPHERE_RINGS, SPHERE_SEGMENTS,
};

/// A generated population that does not match the configured constants. This
/// is a programming error in the generator, not a runtime condition.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("connection count mismatch: expected {expected}, got {actual}")]
    ConnectionCount { expected: usize, actual: usize },
    #[error("particle count mismatch: expected {expected}, got {actual}")]
    ParticleCount { expected: usize, actual: usize },
}

/// One "neural connection": a line segment with its own translucency.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Connection {
    pub start: Vec3,
    pub end: Vec3,
    pub opacity: f32,
}

/// All vertex data for the scene, ready for upload.
///
/// `sphere_wireframe` is a line list (consecutive pairs form segments) tracing
/// the latitude/longitude grid of the sphere shell.
#[derive(Clone, Debug)]
pub struct SceneGeometry {
    pub sphere_wireframe: Vec<Vec3>,
    pub connections: Vec<Connection>,
    pub particles: Vec<Vec3>,
}

impl SceneGeometry {
    pub fn generate<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let sphere_wireframe = sphere_wireframe(SPHERE_RADIUS, SPHERE_SEGMENTS, SPHERE_RINGS);
        let connections = (0..CONNECTION_COUNT)
            .map(|_| Connection {
                start: random_in_cube(rng, CONNECTION_HALF_EXTENT),
                end: random_in_cube(rng, CONNECTION_HALF_EXTENT),
                opacity: CONNECTION_OPACITY_MIN
                    + rng.gen::<f32>() * (CONNECTION_OPACITY_MAX - CONNECTION_OPACITY_MIN),
            })
            .collect();
        let particles = (0..PARTICLE_COUNT)
            .map(|_| random_in_cube(rng, PARTICLE_HALF_EXTENT))
            .collect();
        Self {
            sphere_wireframe,
            connections,
            particles,
        }
    }

    /// Deterministic variant used by tests and reproductions.
    pub fn from_seed(seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        Self::generate(&mut rng)
    }

    /// Production entry point: a fresh arrangement on every page load.
    pub fn from_entropy() -> Self {
        let mut rng = StdRng::from_entropy();
        let geometry = Self::generate(&mut rng);
        log::debug!(
            "generated backdrop geometry: {} wireframe vertices, {} connections, {} particles",
            geometry.sphere_wireframe.len(),
            geometry.connections.len(),
            geometry.particles.len()
        );
        geometry
    }

    /// Fail-fast check that the generated counts match the configured
    /// constants.
    pub fn validate(&self) -> Result<(), GeometryError> {
        if self.connections.len() != CONNECTION_COUNT {
            return Err(GeometryError::ConnectionCount {
                expected: CONNECTION_COUNT,
                actual: self.connections.len(),
            });
        }
        if self.particles.len() != PARTICLE_COUNT {
            return Err(GeometryError::ParticleCount {
                expected: PARTICLE_COUNT,
                actual: self.particles.len(),
            });
        }
        Ok(())
    }
}

/// Uniform sample from the origin-centered cube with the given half-extent.
#[inline]
fn random_in_cube<R: Rng + ?Sized>(rng: &mut R, half_extent: f32) -> Vec3 {
    let span = half_extent * 2.0;
    Vec3::new(
        (rng.gen::<f32>() - 0.5) * span,
        (rng.gen::<f32>() - 0.5) * span,
        (rng.gen::<f32>() - 0.5) * span,
    )
}

/// Latitude/longitude wireframe of a sphere as a line list.
///
/// Latitude circles skip the poles (degenerate rings); meridians run pole to
/// pole. Every returned vertex lies on the `radius` shell.
fn sphere_wireframe(radius: f32, segments: u32, rings: u32) -> Vec<Vec3> {
    let seg = segments.max(3);
    let rings = rings.max(2);
    let point = |x: u32, y: u32| -> Vec3 {
        let theta = x as f32 / seg as f32 * std::f32::consts::TAU;
        let phi = y as f32 / rings as f32 * std::f32::consts::PI;
        Vec3::new(
            theta.cos() * phi.sin(),
            phi.cos(),
            theta.sin() * phi.sin(),
        ) * radius
    };
    let line_count = (rings - 1) * seg + seg * rings;
    let mut lines = Vec::with_capacity(line_count as usize * 2);
    for y in 1..rings {
        for x in 0..seg {
            lines.push(point(x, y));
            lines.push(point(x + 1, y));
        }
    }
    for x in 0..seg {
        for y in 0..rings {
            lines.push(point(x, y));
            lines.push(point(x, y + 1));
        }
    }
    lines
}
