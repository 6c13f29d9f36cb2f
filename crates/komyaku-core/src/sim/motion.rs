//! Force accumulation and integration for a single blob
//!
//! Forces are applied straight to velocity without dividing by mass, and the
//! step is scaled to a 60 steps/second tuning baseline.

use glam::Vec3;
use rand::Rng;

use super::entity::Blob;
use komyaku_params::MotionConfig;

/// Constant push along the blob's own drift direction
pub fn drift_force(blob: &Blob, config: &MotionConfig) -> Vec3 {
    blob.drift_direction * config.drift_strength
}

/// Uniform per-axis jitter in [-jitter/2, +jitter/2]
pub fn jitter_force<R: Rng + ?Sized>(config: &MotionConfig, rng: &mut R) -> Vec3 {
    let x = (rng.gen::<f32>() - 0.5) * config.jitter;
    let y = (rng.gen::<f32>() - 0.5) * config.jitter;
    let z = (rng.gen::<f32>() - 0.5) * config.jitter;
    Vec3::new(x, y, z)
}

/// Slow per-axis wobble, phase-shifted by the blob id
pub fn float_force(blob: &Blob, elapsed: f32, config: &MotionConfig) -> Vec3 {
    let phase = blob.id as f32;
    let [ax, ay, az] = config.float_amplitude;
    let [fx, fy, fz] = config.float_frequency;
    Vec3::new(
        (elapsed * fx + phase).sin() * ax,
        (elapsed * fy + phase).cos() * ay,
        (elapsed * fz + phase).sin() * az,
    )
}

/// Apply forces, damp, move, and bounce off the walls
pub fn integrate<R: Rng + ?Sized>(
    blob: &mut Blob,
    delta: f32,
    elapsed: f32,
    bounds: [f32; 3],
    config: &MotionConfig,
    rng: &mut R,
) {
    blob.velocity += drift_force(blob, config);
    blob.velocity += jitter_force(config, rng);
    blob.velocity += float_force(blob, elapsed, config);

    blob.velocity *= config.damping;

    let dt = delta.min(config.max_dt);
    blob.position += blob.velocity * (dt * config.reference_fps);

    reflect(blob, bounds, config.restitution);
}

/// Keep the sphere inside the box, reversing and damping the normal velocity
pub fn reflect(blob: &mut Blob, bounds: [f32; 3], restitution: f32) {
    for axis in 0..3 {
        let limit = bounds[axis];
        if blob.position[axis] + blob.radius > limit {
            blob.position[axis] = limit - blob.radius;
            blob.velocity[axis] *= -restitution;
        } else if blob.position[axis] - blob.radius < -limit {
            blob.position[axis] = -limit + blob.radius;
            blob.velocity[axis] *= -restitution;
        }
    }
}
