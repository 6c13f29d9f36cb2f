//! Read-only per-frame view handed to renderers

use bytemuck::{Pod, Zeroable};
use glam::Vec3;

use super::entity::Blob;

/// Eye ring speed in rad/s
const EYE_SPEED: f32 = 0.8;
/// How far the pupil trails the white of the eye, in radians
const PUPIL_LAG: f32 = 0.5;

/// One blob laid out for instanced GPU drawing
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct BlobInstance {
    pub position: [f32; 3],
    pub radius: f32,
    pub color: [f32; 4],        // sRGB + body opacity
    pub child_offset_a: [f32; 3],
    pub scale: f32,             // Body shrink while fading out
    pub child_offset_b: [f32; 3],
    pub split_progress: f32,    // Child sphere scale and opacity
    pub id: [u32; 2],           // Low and high halves of the blob id
    pub eye_phase: f32,
    pub _pad: f32,
}

impl BlobInstance {
    pub fn from_blob(blob: &Blob) -> Self {
        let [r, g, b] = blob.color.rgb();
        let split_progress = if blob.is_splitting { blob.split_progress.min(1.0) } else { 0.0 };
        Self {
            position: blob.position.to_array(),
            radius: blob.radius,
            color: [r, g, b, body_opacity(blob)],
            child_offset_a: blob.child_offsets[0].to_array(),
            scale: body_scale(blob),
            child_offset_b: blob.child_offsets[1].to_array(),
            split_progress,
            id: [blob.id as u32, (blob.id >> 32) as u32],
            eye_phase: blob.eye_phase,
            _pad: 0.0,
        }
    }
}

/// Main body opacity: fades out while splitting or dying
pub fn body_opacity(blob: &Blob) -> f32 {
    let opacity = if blob.is_splitting {
        1.0 - blob.split_progress
    } else if blob.is_dying {
        1.0 - blob.death_progress
    } else {
        blob.opacity
    };
    opacity.clamp(0.0, 1.0)
}

/// Main body scale: shrinks only while dying
pub fn body_scale(blob: &Blob) -> f32 {
    if blob.is_dying {
        (1.0 - blob.death_progress).clamp(0.0, 1.0)
    } else {
        1.0
    }
}

/// Eye placement relative to the blob centre, facing the camera along +Z
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EyePose {
    pub white: Vec3,
    pub pupil: Vec3,
}

impl EyePose {
    pub fn at(blob: &Blob, elapsed: f32) -> Self {
        let r = blob.radius;
        let angle = elapsed * EYE_SPEED + blob.eye_phase;

        let ring = r * 0.3;
        let white = Vec3::new(angle.cos() * ring, r * 0.2 + angle.sin() * ring * 0.5, r + 0.01);

        let pupil_angle = angle - PUPIL_LAG;
        let pupil_ring = r * 0.15;
        let pupil = Vec3::new(
            white.x + pupil_angle.cos() * pupil_ring,
            white.y + pupil_angle.sin() * pupil_ring * 0.3,
            r + 0.02,
        );

        Self { white, pupil }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::palette::BlobColor;

    fn blob() -> Blob {
        Blob::new(7, Vec3::new(1.0, 2.0, 0.5), Vec3::ZERO, 1.0, BlobColor::Blue, Vec3::X, 0.0, 0.3)
    }

    #[test]
    fn instance_layout_has_no_padding() {
        assert_eq!(std::mem::size_of::<BlobInstance>(), 80);
    }

    #[test]
    fn steady_blob_is_opaque_and_full_size() {
        let inst = BlobInstance::from_blob(&blob());
        assert_eq!(inst.color[3], 1.0);
        assert_eq!(inst.scale, 1.0);
        assert_eq!(inst.position, [1.0, 2.0, 0.5]);
        assert_eq!(inst.id, [7, 0]);
    }

    #[test]
    fn dying_blob_fades_and_shrinks() {
        let mut b = blob();
        b.is_dying = true;
        b.death_progress = 0.25;
        let inst = BlobInstance::from_blob(&b);
        assert_eq!(inst.color[3], 0.75);
        assert_eq!(inst.scale, 0.75);
    }

    #[test]
    fn splitting_blob_fades_but_keeps_size() {
        let mut b = blob();
        b.is_splitting = true;
        b.split_progress = 0.5;
        let inst = BlobInstance::from_blob(&b);
        assert_eq!(inst.color[3], 0.5);
        assert_eq!(inst.scale, 1.0);
        assert_eq!(inst.split_progress, 0.5);
    }

    #[test]
    fn eyes_sit_on_the_front_surface() {
        let pose = EyePose::at(&blob(), 0.0);
        assert!((pose.white - Vec3::new(0.3, 0.2, 1.01)).length() < 1e-5);
        assert!((pose.pupil.z - 1.02).abs() < 1e-6);
    }
}
