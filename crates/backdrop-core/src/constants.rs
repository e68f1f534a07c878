use glam::Vec3;

// Scene population. Fixed at construction; motion comes only from rotation,
// never from resampling positions.

pub const CONNECTION_COUNT: usize = 50;
pub const PARTICLE_COUNT: usize = 500;

// Sampling cubes are centered on the origin, so the half-extent is the bound
// on every coordinate.
pub const CONNECTION_HALF_EXTENT: f32 = 1.5;
pub const PARTICLE_HALF_EXTENT: f32 = 2.5;

pub const CONNECTION_OPACITY_MIN: f32 = 0.5;
pub const CONNECTION_OPACITY_MAX: f32 = 1.0;

// Sphere mesh
pub const SPHERE_RADIUS: f32 = 1.5;
pub const SPHERE_SEGMENTS: u32 = 32;
pub const SPHERE_RINGS: u32 = 32;

// Camera
pub const CAMERA_FOV_DEGREES: f32 = 75.0;
pub const CAMERA_NEAR: f32 = 0.1;
pub const CAMERA_FAR: f32 = 1000.0;
pub const CAMERA_Z: f32 = 5.0;

// Per-frame spin increments (radians). The three layers rotate at different
// rates, the particle field against the others, for a parallax-like depth cue.
pub const SPHERE_SPIN_PER_FRAME: f32 = 0.005;
pub const CONNECTION_SPIN_PER_FRAME: f32 = 0.002;
pub const PARTICLE_SPIN_PER_FRAME: f32 = -0.001;

// Scroll mapping. Tilt is recomputed from the absolute offset on every scroll
// notification; the connection layer follows the sphere at half sensitivity.
pub const SPHERE_TILT_PER_PIXEL: f32 = 0.001;
pub const CONNECTION_TILT_PER_PIXEL: f32 = 0.0005;
pub const SCROLLED_THRESHOLD_PX: f32 = 50.0;

// Renderer tuning
pub const MAX_PIXEL_RATIO: f64 = 2.0; // bound GPU cost on high-density displays
pub const MSAA_SAMPLES: u32 = 4;
pub const PARTICLE_SIZE: f32 = 0.02; // world-space point diameter

// Page palette (sRGB)
pub const SPHERE_COLOR: [f32; 3] = [0.494, 0.412, 0.671]; // #7e69ab
pub const SPHERE_EMISSIVE: [f32; 3] = [0.608, 0.529, 0.961]; // #9b87f5
pub const SPHERE_EMISSIVE_INTENSITY: f32 = 0.2;
pub const SPHERE_OPACITY: f32 = 0.9;

pub const CONNECTION_COLOR: [f32; 3] = [0.118, 0.682, 0.859]; // #1eaedb

pub const PARTICLE_COLOR: [f32; 3] = [0.839, 0.737, 0.980]; // #d6bcfa
pub const PARTICLE_OPACITY: f32 = 0.8;

// Light rig
pub const AMBIENT_COLOR: [f32; 3] = [0.251, 0.251, 0.251]; // #404040
pub const AMBIENT_INTENSITY: f32 = 2.0;

pub const DIRECTIONAL_COLOR: [f32; 3] = [0.608, 0.529, 0.961]; // #9b87f5
pub const DIRECTIONAL_INTENSITY: f32 = 2.0;
pub const DIRECTIONAL_DIRECTION: Vec3 = Vec3::new(1.0, 1.0, 1.0);

pub const POINT_COLOR: [f32; 3] = [0.055, 0.647, 0.914]; // #0ea5e9
pub const POINT_INTENSITY: f32 = 2.0;
pub const POINT_POSITION: Vec3 = Vec3::new(-1.0, -1.0, 2.0);
