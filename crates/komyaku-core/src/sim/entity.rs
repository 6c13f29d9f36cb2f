use glam::Vec3;
use rand::Rng;
use std::f32::consts::TAU;

use super::ids::BlobId;
use super::palette::BlobColor;

/// One soft blob in the simulated volume
#[derive(Debug, Clone, PartialEq)]
pub struct Blob {
    pub id: BlobId,
    pub position: Vec3,
    pub velocity: Vec3,
    pub radius: f32,
    pub original_radius: f32, // Birth radius, fixed after creation
    pub color: BlobColor,
    pub mass: f32,
    pub drift_direction: Vec3, // Unit vector
    pub eye_phase: f32,
    pub age: f32,              // Seconds since creation
    pub can_split: bool,
    pub is_splitting: bool,
    pub split_progress: f32,
    pub split_direction: Vec3,
    pub is_dying: bool,
    pub death_progress: f32,
    pub opacity: f32,
    pub child_offsets: [Vec3; 2], // Staged positions of the two children, relative to the blob
}

impl Blob {
    /// Fresh blob in the normal lifecycle state. `split_threshold` decides
    /// once and for all whether it may ever divide.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: BlobId,
        position: Vec3,
        velocity: Vec3,
        radius: f32,
        color: BlobColor,
        drift_direction: Vec3,
        eye_phase: f32,
        split_threshold: f32,
    ) -> Self {
        Self {
            id,
            position,
            velocity,
            radius,
            original_radius: radius,
            color,
            mass: radius,
            drift_direction,
            eye_phase,
            age: 0.0,
            can_split: radius > split_threshold,
            is_splitting: false,
            split_progress: 0.0,
            split_direction: Vec3::ZERO,
            is_dying: false,
            death_progress: 0.0,
            opacity: 1.0,
            child_offsets: [Vec3::ZERO; 2],
        }
    }

    pub fn speed(&self) -> f32 {
        self.velocity.length()
    }

    /// Position and velocity are free of NaN and infinity
    pub fn is_finite(&self) -> bool {
        self.position.is_finite() && self.velocity.is_finite()
    }

    /// Neither dying nor splitting
    pub fn is_steady(&self) -> bool {
        !self.is_dying && !self.is_splitting
    }
}

/// Uniform sample of a cube in [-1, 1]^3, normalised. A zero sample maps to +X.
pub fn random_unit_vector<R: Rng + ?Sized>(rng: &mut R) -> Vec3 {
    let x = (rng.gen::<f32>() - 0.5) * 2.0;
    let y = (rng.gen::<f32>() - 0.5) * 2.0;
    let z = (rng.gen::<f32>() - 0.5) * 2.0;
    Vec3::new(x, y, z).try_normalize().unwrap_or(Vec3::X)
}

/// Eye phase in [0, TAU)
pub fn random_phase<R: Rng + ?Sized>(rng: &mut R) -> f32 {
    rng.gen::<f32>() * TAU
}

/// Clamp a centre so a sphere of `radius` stays inside the box
pub fn clamp_into_bounds(position: Vec3, radius: f32, bounds: [f32; 3]) -> Vec3 {
    let limit = (Vec3::from_array(bounds) - Vec3::splat(radius)).max(Vec3::ZERO);
    position.clamp(-limit, limit)
}
