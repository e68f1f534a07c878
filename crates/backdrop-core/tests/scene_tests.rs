// Host-side tests for the mutable scene state: aspect tracking, scroll
// mapping, per-frame spin accumulation and the terminal stopped phase.

use backdrop_core::{
    SceneState, CONNECTION_SPIN_PER_FRAME, PARTICLE_SPIN_PER_FRAME, SPHERE_SPIN_PER_FRAME,
};

const EPS: f32 = 1e-5;

fn assert_close(actual: f32, expected: f32, what: &str) {
    assert!(
        (actual - expected).abs() < EPS,
        "{what}: expected {expected}, got {actual}"
    );
}

#[test]
fn resize_sets_expected_aspect() {
    let mut s = SceneState::new(1920, 1080);
    assert_close(s.camera.aspect, 1920.0 / 1080.0, "aspect at construction");
    s.on_resize(800, 600);
    assert_close(s.camera.aspect, 800.0 / 600.0, "aspect after resize");
}

#[test]
fn resize_is_idempotent_and_ignores_zero_dimensions() {
    let mut s = SceneState::new(1280, 720);
    s.on_resize(800, 600);
    let snapshot = s.clone();
    s.on_resize(800, 600);
    assert_eq!(s, snapshot);
    s.on_resize(0, 600);
    s.on_resize(800, 0);
    assert_eq!(s, snapshot);
}

#[test]
fn scroll_threshold_is_strict() {
    let mut s = SceneState::new(1280, 720);
    s.on_scroll(0.0);
    assert!(!s.scrolled);
    assert_close(s.sphere.tilt, 0.0, "sphere tilt at offset 0");
    assert_close(s.connections.tilt, 0.0, "connection tilt at offset 0");

    s.on_scroll(50.0);
    assert!(!s.scrolled, "threshold must be strict");

    s.on_scroll(51.0);
    assert!(s.scrolled);
}

#[test]
fn scroll_tilt_is_proportional_to_the_offset() {
    let mut s = SceneState::new(1280, 720);
    s.on_scroll(100.0);
    assert!(s.scrolled);
    assert_close(s.sphere.tilt, 0.1, "sphere tilt at offset 100");
    assert_close(s.connections.tilt, 0.05, "connection tilt at offset 100");
    assert_close(s.particles.tilt, 0.0, "particles never tilt");
}

#[test]
fn scroll_is_a_pure_function_of_the_offset() {
    let mut s = SceneState::new(1280, 720);
    s.on_scroll(120.0);
    let snapshot = s.clone();
    s.on_scroll(120.0);
    s.on_scroll(120.0);
    assert_eq!(s, snapshot, "repeated identical offsets must not accumulate");

    // scrolling back recomputes rather than adds
    s.on_scroll(30.0);
    assert!(!s.scrolled);
    assert_close(s.sphere.tilt, 0.03, "sphere tilt after scrolling back");
}

#[test]
fn negative_offsets_clamp_to_zero() {
    let mut s = SceneState::new(1280, 720);
    s.on_scroll(100.0);
    s.on_scroll(-5.0);
    assert!(!s.scrolled);
    assert_close(s.sphere.tilt, 0.0, "sphere tilt for negative offset");
}

#[test]
fn spins_accumulate_linearly_and_independently() {
    let mut s = SceneState::new(1280, 720);
    let n = 240;
    for _ in 0..n {
        s.advance_frame();
    }
    // summing n rounded increments drifts a little from the exact product
    let accum_eps = 1e-3;
    let check = |actual: f32, expected: f32, what: &str| {
        assert!(
            (actual - expected).abs() < accum_eps,
            "{what}: expected about {expected}, got {actual}"
        );
    };
    check(s.sphere.spin, SPHERE_SPIN_PER_FRAME * n as f32, "sphere spin");
    check(
        s.connections.spin,
        CONNECTION_SPIN_PER_FRAME * n as f32,
        "connection spin",
    );
    check(
        s.particles.spin,
        PARTICLE_SPIN_PER_FRAME * n as f32,
        "particle spin",
    );
    assert!(s.particles.spin < 0.0, "particles spin the other way");
    // frame ticks never touch the scroll-driven components
    assert_close(s.sphere.tilt, 0.0, "tilt untouched by frames");
}

#[test]
fn spin_and_tilt_do_not_interfere() {
    let mut s = SceneState::new(1280, 720);
    for _ in 0..10 {
        s.advance_frame();
    }
    s.on_scroll(200.0);
    assert_close(s.sphere.spin, SPHERE_SPIN_PER_FRAME * 10.0, "spin after scroll");
    assert_close(s.sphere.tilt, 0.2, "tilt after frames");
}

#[test]
fn stopped_state_is_inert() {
    let mut s = SceneState::new(1280, 720);
    s.on_scroll(100.0);
    s.advance_frame();
    s.stop();
    assert!(!s.is_running());
    let snapshot = s.clone();

    s.advance_frame();
    s.on_scroll(400.0);
    s.on_resize(64, 64);
    assert_eq!(s, snapshot, "no mutation may happen after stop");
}
