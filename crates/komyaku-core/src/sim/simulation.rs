use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use super::entity::Blob;
use super::ids::{BlobId, IdAllocator};
use super::interaction;
use super::lifecycle::{self, Fate};
use super::motion;
use super::population;
use super::snapshot::BlobInstance;
use super::stats::PopulationStats;
use komyaku_params::SimulationConfig;

/// Random source used for reproducible runs
pub type SimRng = ChaCha8Rng;

/// Deterministic random source for a run seed
pub fn seeded_rng(seed: u64) -> SimRng {
    ChaCha8Rng::seed_from_u64(seed)
}

/// What changed during one step
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepReport {
    pub deaths_started: usize,
    pub splits_started: usize,
    pub deaths: usize,
    pub splits: usize,
    pub contacts: usize,
    pub truncated: usize,
    pub dropped_non_finite: usize,
}

/// Owns the blob collection and the id allocator for one independent run
pub struct Simulation {
    config: SimulationConfig,
    blobs: Vec<Blob>,
    ids: IdAllocator,
    pub stats: PopulationStats,
    total_births: u64,
    total_deaths: u64,
}

impl Simulation {
    /// Empty simulation
    pub fn new(config: SimulationConfig) -> Self {
        Self {
            config,
            blobs: Vec::new(),
            ids: IdAllocator::new(),
            stats: PopulationStats::default(),
            total_births: 0,
            total_deaths: 0,
        }
    }

    /// Simulation seeded with `config.population.initial` blobs
    pub fn with_population<R: Rng + ?Sized>(config: SimulationConfig, rng: &mut R) -> Self {
        let mut sim = Self::new(config);
        sim.blobs = population::create_initial_population(
            sim.config.population.initial,
            &mut sim.ids,
            &sim.config,
            rng,
        );
        sim.update_stats();
        sim
    }

    /// Simulation over an existing collection. New ids continue past the
    /// largest id already present.
    pub fn from_blobs(config: SimulationConfig, blobs: Vec<Blob>) -> Self {
        let next = blobs.iter().map(|b| b.id + 1).max().unwrap_or(0);
        let mut sim = Self::new(config);
        sim.blobs = blobs;
        sim.ids = IdAllocator::starting_at(next);
        sim.update_stats();
        sim
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn blobs(&self) -> &[Blob] {
        &self.blobs
    }

    pub fn len(&self) -> usize {
        self.blobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blobs.is_empty()
    }

    pub fn get(&self, id: BlobId) -> Option<&Blob> {
        self.blobs.iter().find(|b| b.id == id)
    }

    /// Advance the whole population by one frame.
    ///
    /// Order within the step: lifecycle and integration per blob, then
    /// pairwise repulsion over the survivors, then the population cap.
    /// `delta` is seconds since the previous frame, `elapsed` seconds since
    /// the run began.
    pub fn step<R: Rng + ?Sized>(&mut self, delta: f32, elapsed: f32, rng: &mut R) -> StepReport {
        let delta = if delta.is_finite() && delta >= 0.0 {
            delta
        } else {
            log::warn!("invalid frame delta {}, treating as 0", delta);
            0.0
        };
        let elapsed = if elapsed.is_finite() {
            elapsed
        } else {
            log::warn!("invalid elapsed time {}, treating as 0", elapsed);
            0.0
        };

        let config = &self.config;
        let death_allowed = self.blobs.len() >= config.population.death_trigger_count();
        let mut report = StepReport::default();
        let mut next = Vec::with_capacity(self.blobs.len() + 2);

        for mut blob in std::mem::take(&mut self.blobs) {
            let was_dying = blob.is_dying;
            let was_splitting = blob.is_splitting;

            let fate = lifecycle::advance(&mut blob, delta, death_allowed, &config.lifecycle, rng);

            if blob.is_dying && !was_dying {
                report.deaths_started += 1;
            }
            if blob.is_splitting && !was_splitting {
                report.splits_started += 1;
            }

            match fate {
                Fate::Died => {
                    log::debug!("blob {} faded out", blob.id);
                    report.deaths += 1;
                }
                Fate::Split => {
                    let children = lifecycle::spawn_children(
                        &blob,
                        &mut self.ids,
                        &config.lifecycle,
                        config.world.bounds,
                        rng,
                    );
                    next.extend(children);
                    report.splits += 1;
                }
                Fate::Continue => {
                    motion::integrate(
                        &mut blob,
                        delta,
                        elapsed,
                        config.world.bounds,
                        &config.motion,
                        rng,
                    );
                    if blob.is_finite() {
                        next.push(blob);
                    } else {
                        log::warn!("dropping blob {} with non-finite state", blob.id);
                        report.dropped_non_finite += 1;
                    }
                }
            }
        }

        report.contacts = interaction::resolve(&mut next, &config.interaction);

        let before = next.len();
        next.retain(Blob::is_finite);
        if next.len() < before {
            log::warn!("dropping {} blobs with non-finite velocity after repulsion", before - next.len());
            report.dropped_non_finite += before - next.len();
        }

        report.truncated = population::enforce_cap(&mut next, config.population.max);

        self.total_births += 2 * report.splits as u64;
        self.total_deaths += report.deaths as u64;
        self.blobs = next;

        report
    }

    /// Refresh `stats` from the live collection
    pub fn update_stats(&mut self) {
        self.stats = PopulationStats::collect(&self.blobs, self.total_births, self.total_deaths);
    }

    /// Detached render view of the current population
    pub fn snapshot(&self) -> Vec<BlobInstance> {
        self.blobs.iter().map(BlobInstance::from_blob).collect()
    }

    /// Pairs of blob indices close enough to merge visually
    pub fn nearby_pairs(&self) -> Vec<(usize, usize)> {
        interaction::nearby_pairs(&self.blobs, &self.config.interaction)
    }
}
