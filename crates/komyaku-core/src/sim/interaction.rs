//! Soft pairwise repulsion
//!
//! All pairs are checked each step; populations are capped small enough that
//! the quadratic sweep stays cheap. Only velocities change here.

use super::entity::Blob;
use komyaku_params::InteractionConfig;

/// Blobs are close enough to push each other apart
pub fn is_colliding(a: &Blob, b: &Blob, config: &InteractionConfig) -> bool {
    a.position.distance(b.position) < (a.radius + b.radius) * config.collision_margin
}

/// Blobs are close enough to be drawn as one merged metaball group
pub fn is_nearby(a: &Blob, b: &Blob, config: &InteractionConfig) -> bool {
    a.position.distance(b.position) < (a.radius + b.radius) * config.proximity_margin
}

/// Equal and opposite velocity kick along the line between the centres,
/// falling off with the squared distance. Coincident centres are skipped.
pub fn apply_repulsion(a: &mut Blob, b: &mut Blob, config: &InteractionConfig) {
    let offset = b.position - a.position;
    let distance = offset.length();
    if distance == 0.0 {
        return;
    }

    let direction = offset / distance;
    let force = config.repulsion_strength / (distance * distance);

    a.velocity -= direction * force;
    b.velocity += direction * force;
}

/// Run repulsion over every unordered pair, in collection order.
/// Returns the number of pairs found in contact.
pub fn resolve(blobs: &mut [Blob], config: &InteractionConfig) -> usize {
    let mut contacts = 0;
    for i in 0..blobs.len() {
        let (head, tail) = blobs.split_at_mut(i + 1);
        let a = &mut head[i];
        for b in tail.iter_mut() {
            if is_colliding(a, b, config) {
                apply_repulsion(a, b, config);
                contacts += 1;
            }
        }
    }
    contacts
}

/// Indices of every pair currently within metaball range
pub fn nearby_pairs(blobs: &[Blob], config: &InteractionConfig) -> Vec<(usize, usize)> {
    let mut pairs = Vec::new();
    for i in 0..blobs.len() {
        for j in (i + 1)..blobs.len() {
            if is_nearby(&blobs[i], &blobs[j], config) {
                pairs.push((i, j));
            }
        }
    }
    pairs
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::palette::BlobColor;
    use glam::Vec3;

    fn blob_at(id: u64, position: Vec3, radius: f32) -> Blob {
        Blob::new(id, position, Vec3::ZERO, radius, BlobColor::Magenta, Vec3::X, 0.0, 0.3)
    }

    #[test]
    fn collision_uses_twenty_percent_margin() {
        let config = InteractionConfig::default();
        let a = blob_at(0, Vec3::ZERO, 0.5);
        assert!(is_colliding(&a, &blob_at(1, Vec3::X * 1.1, 0.5), &config));
        assert!(!is_colliding(&a, &blob_at(1, Vec3::X * 1.3, 0.5), &config));
    }

    #[test]
    fn repulsion_is_symmetric() {
        let config = InteractionConfig::default();
        let mut a = blob_at(0, Vec3::ZERO, 0.5);
        let mut b = blob_at(1, Vec3::X * 0.5, 0.5);
        apply_repulsion(&mut a, &mut b, &config);

        let expected = 0.00005 / 0.25;
        assert!((a.velocity.x + expected).abs() < 1e-9);
        assert!((b.velocity.x - expected).abs() < 1e-9);
        assert_eq!(a.velocity + b.velocity, Vec3::ZERO);
    }

    #[test]
    fn coincident_blobs_are_left_alone() {
        let config = InteractionConfig::default();
        let mut blobs = vec![
            blob_at(0, Vec3::new(1.0, 1.0, 1.0), 0.5),
            blob_at(1, Vec3::new(1.0, 1.0, 1.0), 0.5),
        ];
        blobs[0].velocity = Vec3::new(0.001, 0.0, 0.0);
        let before: Vec<Vec3> = blobs.iter().map(|b| b.velocity).collect();

        assert_eq!(resolve(&mut blobs, &config), 1);
        let after: Vec<Vec3> = blobs.iter().map(|b| b.velocity).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn distant_blobs_do_not_interact() {
        let config = InteractionConfig::default();
        let mut blobs = vec![blob_at(0, Vec3::ZERO, 0.5), blob_at(1, Vec3::X * 4.0, 0.5)];
        assert_eq!(resolve(&mut blobs, &config), 0);
        assert_eq!(blobs[0].velocity, Vec3::ZERO);
    }

    #[test]
    fn nearby_is_wider_than_collision() {
        let config = InteractionConfig::default();
        let blobs = vec![blob_at(0, Vec3::ZERO, 0.5), blob_at(1, Vec3::X * 1.5, 0.5)];
        assert!(!is_colliding(&blobs[0], &blobs[1], &config));
        assert_eq!(nearby_pairs(&blobs, &config), vec![(0, 1)]);
    }
}
