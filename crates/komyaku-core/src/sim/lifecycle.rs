//! Split and death state machine
//!
//! Each step a blob ages, may start fading out (only once the population is
//! crowded), may start dividing (only when old and large enough), and moves
//! any running animation forward. A finished death removes the blob; a
//! finished split replaces it with two smaller children.

use glam::Vec3;
use rand::Rng;

use super::entity::{clamp_into_bounds, random_phase, random_unit_vector, Blob};
use super::ids::IdAllocator;
use super::palette::BlobColor;
use komyaku_params::LifecycleConfig;

/// What happens to a blob after its lifecycle update
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fate {
    /// Stays in the collection and is integrated this step
    Continue,
    /// Death animation finished; the blob is dropped
    Died,
    /// Split animation finished; the blob is replaced by its children
    Split,
}

/// Advance one blob's lifecycle by `delta` seconds.
///
/// `death_allowed` is decided once per step from the population size at the
/// start of the step. Random draws only happen when every other trigger
/// condition already holds.
pub fn advance<R: Rng + ?Sized>(
    blob: &mut Blob,
    delta: f32,
    death_allowed: bool,
    config: &LifecycleConfig,
    rng: &mut R,
) -> Fate {
    blob.age += delta;

    if !blob.is_dying
        && !blob.is_splitting
        && death_allowed
        && rng.gen::<f32>() < config.death_chance
    {
        blob.is_dying = true;
        blob.death_progress = 0.0;
        log::debug!("blob {} started fading at age {:.2}", blob.id, blob.age);
    }

    if blob.is_dying {
        blob.death_progress += delta * config.death_rate;
        if blob.death_progress >= 1.0 {
            return Fate::Died;
        }
    }

    if !blob.is_splitting
        && !blob.is_dying
        && blob.can_split
        && blob.age > config.split_min_age
        && rng.gen::<f32>() < config.split_chance
    {
        blob.is_splitting = true;
        blob.split_progress = 0.0;
        blob.split_direction = random_unit_vector(rng);
        blob.child_offsets = [Vec3::ZERO; 2];
        log::debug!("blob {} started splitting along {:?}", blob.id, blob.split_direction);
    }

    if blob.is_splitting {
        blob.split_progress += delta * config.split_rate;
        if blob.split_progress >= 1.0 {
            // Children land where the last rendered frame staged them
            return Fate::Split;
        }
        let separation = blob.split_progress * blob.original_radius * config.split_separation;
        blob.child_offsets = [
            blob.split_direction * separation,
            blob.split_direction * -separation,
        ];
    }

    Fate::Continue
}

/// Build the two children of a blob whose split has completed.
///
/// The first child keeps the parent's colour; the second draws its own.
/// Drift and eye phase are fresh for both.
pub fn spawn_children<R: Rng + ?Sized>(
    parent: &Blob,
    ids: &mut IdAllocator,
    config: &LifecycleConfig,
    bounds: [f32; 3],
    rng: &mut R,
) -> [Blob; 2] {
    let radius = parent.original_radius * config.child_radius_factor;
    let kick = parent.split_direction * config.child_impulse;

    let first = {
        let position = clamp_into_bounds(parent.position + parent.child_offsets[0], radius, bounds);
        let drift = random_unit_vector(rng);
        let phase = random_phase(rng);
        Blob::new(
            ids.allocate(),
            position,
            parent.velocity + kick,
            radius,
            parent.color,
            drift,
            phase,
            config.split_radius_threshold,
        )
    };

    let second = {
        let position = clamp_into_bounds(parent.position + parent.child_offsets[1], radius, bounds);
        let color = BlobColor::random(rng);
        let drift = random_unit_vector(rng);
        let phase = random_phase(rng);
        Blob::new(
            ids.allocate(),
            position,
            parent.velocity - kick,
            radius,
            color,
            drift,
            phase,
            config.split_radius_threshold,
        )
    };

    log::debug!(
        "blob {} split into {} and {} (radius {:.3})",
        parent.id,
        first.id,
        second.id,
        radius
    );

    [first, second]
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::mock::StepRng;

    const BOUNDS: [f32; 3] = [7.0, 3.5, 2.5];

    fn always() -> StepRng {
        StepRng::new(0, 0)
    }

    fn never() -> StepRng {
        StepRng::new(u64::MAX, 0)
    }

    fn blob(radius: f32, age: f32) -> Blob {
        let mut b = Blob::new(1, Vec3::ZERO, Vec3::ZERO, radius, BlobColor::Red, Vec3::Y, 0.0, 0.3);
        b.age = age;
        b
    }

    #[test]
    fn ages_by_delta() {
        let mut b = blob(0.8, 0.0);
        let fate = advance(&mut b, 0.25, false, &LifecycleConfig::default(), &mut never());
        assert_eq!(fate, Fate::Continue);
        assert_eq!(b.age, 0.25);
    }

    #[test]
    fn death_needs_crowding() {
        let config = LifecycleConfig::default();
        let mut b = blob(0.8, 0.0);
        advance(&mut b, 0.1, false, &config, &mut always());
        assert!(!b.is_dying);

        advance(&mut b, 0.1, true, &config, &mut always());
        assert!(b.is_dying);
        assert!((b.death_progress - 0.08).abs() < 1e-6);
    }

    #[test]
    fn dying_blob_is_removed_once_progress_reaches_one() {
        let config = LifecycleConfig::default();
        let mut b = blob(0.8, 0.0);
        b.is_dying = true;
        b.death_progress = 0.5;
        assert_eq!(advance(&mut b, 0.625, false, &config, &mut never()), Fate::Died);
    }

    #[test]
    fn dying_blob_never_starts_splitting() {
        let config = LifecycleConfig::default();
        let mut b = blob(0.8, 10.0);
        b.is_dying = true;
        advance(&mut b, 0.01, false, &config, &mut always());
        assert!(!b.is_splitting);
    }

    #[test]
    fn splitting_blob_never_starts_dying() {
        let config = LifecycleConfig::default();
        let mut b = blob(0.8, 10.0);
        b.is_splitting = true;
        b.split_direction = Vec3::X;
        advance(&mut b, 0.01, true, &config, &mut always());
        assert!(!b.is_dying);
    }

    #[test]
    fn young_or_small_blobs_do_not_split() {
        let config = LifecycleConfig::default();
        let mut young = blob(0.8, 1.0);
        advance(&mut young, 0.1, false, &config, &mut always());
        assert!(!young.is_splitting);

        let mut small = blob(0.25, 10.0);
        advance(&mut small, 0.1, false, &config, &mut always());
        assert!(!small.is_splitting);
    }

    #[test]
    fn split_stages_children_along_direction() {
        let config = LifecycleConfig::default();
        let mut b = blob(1.0, 10.0);
        assert_eq!(advance(&mut b, 0.5, false, &config, &mut always()), Fate::Continue);
        assert!(b.is_splitting);
        assert!((b.split_direction.length() - 1.0).abs() < 1e-5);

        let expected = b.split_direction * (0.4 * 1.5);
        assert!((b.child_offsets[0] - expected).length() < 1e-5);
        assert!((b.child_offsets[1] + expected).length() < 1e-5);
    }

    #[test]
    fn completed_split_keeps_last_staged_offsets() {
        let config = LifecycleConfig::default();
        let mut b = blob(1.0, 10.0);
        b.is_splitting = true;
        b.split_progress = 0.9;
        b.split_direction = Vec3::X;
        b.child_offsets = [Vec3::X * 1.35, Vec3::X * -1.35];
        assert_eq!(advance(&mut b, 0.5, false, &config, &mut never()), Fate::Split);
        assert_eq!(b.child_offsets[0], Vec3::X * 1.35);
    }

    #[test]
    fn children_inherit_from_parent() {
        let config = LifecycleConfig::default();
        let mut parent = blob(1.0, 10.0);
        parent.velocity = Vec3::new(0.01, 0.0, 0.0);
        parent.split_direction = Vec3::Y;
        parent.child_offsets = [Vec3::Y, -Vec3::Y];

        let mut ids = IdAllocator::starting_at(50);
        let [a, b] = spawn_children(&parent, &mut ids, &config, BOUNDS, &mut always());

        assert_eq!((a.id, b.id), (50, 51));
        assert!((a.original_radius - 0.7).abs() < 1e-6);
        assert_eq!(a.radius, b.radius);
        assert_eq!(a.mass, a.radius);
        assert_eq!(a.color, parent.color);
        assert_eq!(a.position, Vec3::Y);
        assert_eq!(b.position, -Vec3::Y);
        assert!((a.velocity - Vec3::new(0.01, 0.02, 0.0)).length() < 1e-6);
        assert!((b.velocity - Vec3::new(0.01, -0.02, 0.0)).length() < 1e-6);
        assert!(a.can_split && b.can_split);
        for child in [&a, &b] {
            assert_eq!(child.age, 0.0);
            assert!(child.is_steady());
            assert_eq!(child.child_offsets, [Vec3::ZERO; 2]);
        }
    }

    #[test]
    fn grandchildren_below_threshold_cannot_split() {
        let config = LifecycleConfig::default();
        let mut parent = blob(0.4, 10.0);
        parent.split_direction = Vec3::X;
        let [a, b] = spawn_children(&parent, &mut IdAllocator::new(), &config, BOUNDS, &mut always());
        assert!(!a.can_split);
        assert!(!b.can_split);
    }

    #[test]
    fn children_are_kept_inside_the_box() {
        let config = LifecycleConfig::default();
        let mut parent = blob(1.0, 10.0);
        parent.position = Vec3::new(5.9, 0.0, 0.0);
        parent.split_direction = Vec3::X;
        parent.child_offsets = [Vec3::X * 1.5, Vec3::X * -1.5];
        let [a, _] = spawn_children(&parent, &mut IdAllocator::new(), &config, BOUNDS, &mut always());
        assert!(a.position.x + a.radius <= 7.0 + 1e-5);
    }
}
