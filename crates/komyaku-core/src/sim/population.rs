//! Initial seeding and the population cap

use glam::Vec3;
use rand::Rng;

use super::entity::{clamp_into_bounds, random_phase, random_unit_vector, Blob};
use super::ids::IdAllocator;
use super::palette::BlobColor;
use komyaku_params::SimulationConfig;

/// Full width of the spawn region on each axis
const SPAWN_EXTENT: [f32; 3] = [8.0, 4.0, 3.0];
/// Full width of the initial per-axis velocity range
const SPAWN_SPEED: f32 = 0.015;
const SPAWN_RADIUS_MIN: f32 = 0.6;
const SPAWN_RADIUS_SPAN: f32 = 0.5;

fn centred<R: Rng + ?Sized>(rng: &mut R, width: f32) -> f32 {
    (rng.gen::<f32>() - 0.5) * width
}

/// Seed `count` blobs in the normal lifecycle state, scattered around the
/// centre of the box with small random velocities
pub fn create_initial_population<R: Rng + ?Sized>(
    count: usize,
    ids: &mut IdAllocator,
    config: &SimulationConfig,
    rng: &mut R,
) -> Vec<Blob> {
    let mut blobs = Vec::with_capacity(count);

    for _ in 0..count {
        let position = Vec3::new(
            centred(rng, SPAWN_EXTENT[0]),
            centred(rng, SPAWN_EXTENT[1]),
            centred(rng, SPAWN_EXTENT[2]),
        );
        let velocity = Vec3::new(
            centred(rng, SPAWN_SPEED),
            centred(rng, SPAWN_SPEED),
            centred(rng, SPAWN_SPEED),
        );
        let radius = SPAWN_RADIUS_MIN + rng.gen::<f32>() * SPAWN_RADIUS_SPAN;
        let color = BlobColor::random(rng);
        let drift = random_unit_vector(rng);
        let phase = random_phase(rng);

        blobs.push(Blob::new(
            ids.allocate(),
            clamp_into_bounds(position, radius, config.world.bounds),
            velocity,
            radius,
            color,
            drift,
            phase,
            config.lifecycle.split_radius_threshold,
        ));
    }

    log::debug!("seeded {} blobs", blobs.len());
    blobs
}

/// Drop everything past the first `max` blobs. Returns how many were cut.
pub fn enforce_cap(blobs: &mut Vec<Blob>, max: usize) -> usize {
    let excess = blobs.len().saturating_sub(max);
    if excess > 0 {
        blobs.truncate(max);
        log::debug!("population cap {} cut {} blobs", max, excess);
    }
    excess
}
