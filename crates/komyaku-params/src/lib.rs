//! Shared tuning parameters for the Komyaku blob simulation
//!
//! This crate holds every constant the step function is tuned with, so the
//! core engine and the headless runner read one source of truth.

use thiserror::Error;

/// Errors raised when a configuration cannot drive a simulation
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("{field} must be finite, got {value}")]
    NotFinite { field: &'static str, value: f32 },

    #[error("{field} must be positive, got {value}")]
    NotPositive { field: &'static str, value: f32 },

    #[error("{field} must lie in [0, 1], got {value}")]
    OutOfUnitRange { field: &'static str, value: f32 },

    #[error("population limits invalid: {0}")]
    Population(String),
}

/// World volume and run parameters
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct WorldConfig {
    pub bounds: [f32; 3], // Half-extent of the box on x, y, z
    pub steps: u32,       // Steps for headless runs
    pub dt: f32,          // Fixed delta for headless runs (seconds)
    pub seed: u64,
}

/// Population size limits
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PopulationConfig {
    pub initial: usize,
    pub max: usize,
    pub death_trigger_margin: usize, // Deaths only start once count >= initial + margin
}

impl PopulationConfig {
    /// Population size at which blobs may start fading out
    pub fn death_trigger_count(&self) -> usize {
        self.initial + self.death_trigger_margin
    }
}

/// Split and death state machine parameters
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LifecycleConfig {
    pub death_chance: f32,           // Per-step probability of starting to die
    pub split_chance: f32,           // Per-step probability of starting to split
    pub death_rate: f32,             // Death progress per second
    pub split_rate: f32,             // Split progress per second
    pub split_min_age: f32,          // Seconds before a blob may split
    pub split_radius_threshold: f32, // Blobs at or below this radius never split
    pub child_radius_factor: f32,
    pub child_impulse: f32,          // Velocity kick along the split axis
    pub split_separation: f32,       // Child offset at full progress, in original radii
}

/// Force and integration parameters
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct MotionConfig {
    pub drift_strength: f32,
    pub jitter: f32,                // Full width of the uniform per-axis noise
    pub float_amplitude: [f32; 3],
    pub float_frequency: [f32; 3],  // rad/s per axis
    pub damping: f32,
    pub max_dt: f32,                // Integration delta is clamped to this
    pub reference_fps: f32,
    pub restitution: f32,           // Velocity kept after a wall bounce
}

/// Pairwise interaction parameters
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct InteractionConfig {
    pub collision_margin: f32,  // Repulsion starts below (ra + rb) * margin
    pub proximity_margin: f32,  // Metaball grouping distance factor
    pub repulsion_strength: f32,
}

/// Complete simulation configuration
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SimulationConfig {
    pub world: WorldConfig,
    pub population: PopulationConfig,
    pub lifecycle: LifecycleConfig,
    pub motion: MotionConfig,
    pub interaction: InteractionConfig,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            bounds: [7.0, 3.5, 2.5],
            steps: 1000,
            dt: 1.0 / 60.0,
            seed: 1337,
        }
    }
}

impl Default for PopulationConfig {
    fn default() -> Self {
        Self {
            initial: 6,
            max: 15,
            death_trigger_margin: 5,
        }
    }
}

impl Default for LifecycleConfig {
    fn default() -> Self {
        Self {
            death_chance: 0.002,
            split_chance: 0.001,
            death_rate: 0.8,
            split_rate: 0.8,
            split_min_age: 5.0,
            split_radius_threshold: 0.3,
            child_radius_factor: 0.7,
            child_impulse: 0.02,
            split_separation: 1.5,
        }
    }
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            drift_strength: 0.00002,
            jitter: 0.00003,
            float_amplitude: [0.00001, 0.00001, 0.000005],
            float_frequency: [0.2, 0.15, 0.25],
            damping: 0.998,
            max_dt: 1.0 / 30.0,
            reference_fps: 60.0,
            restitution: 0.7,
        }
    }
}

impl Default for InteractionConfig {
    fn default() -> Self {
        Self {
            collision_margin: 1.2,
            proximity_margin: 1.8,
            repulsion_strength: 0.00005,
        }
    }
}

fn finite(field: &'static str, value: f32) -> Result<f32, ConfigError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ConfigError::NotFinite { field, value })
    }
}

fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if finite(field, value)? > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NotPositive { field, value })
    }
}

fn unit(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&finite(field, value)?) {
        Ok(())
    } else {
        Err(ConfigError::OutOfUnitRange { field, value })
    }
}

impl SimulationConfig {
    /// Check that every parameter can drive a stable step
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in ["world.bounds.x", "world.bounds.y", "world.bounds.z"]
            .into_iter()
            .zip(self.world.bounds)
        {
            positive(field, value)?;
        }
        positive("world.dt", self.world.dt)?;

        let pop = &self.population;
        if pop.max == 0 {
            return Err(ConfigError::Population("max must be at least 1".into()));
        }
        if pop.initial > pop.max {
            return Err(ConfigError::Population(format!(
                "initial ({}) exceeds max ({})",
                pop.initial, pop.max
            )));
        }

        let life = &self.lifecycle;
        unit("lifecycle.death_chance", life.death_chance)?;
        unit("lifecycle.split_chance", life.split_chance)?;
        positive("lifecycle.death_rate", life.death_rate)?;
        positive("lifecycle.split_rate", life.split_rate)?;
        finite("lifecycle.split_min_age", life.split_min_age)?;
        finite("lifecycle.split_radius_threshold", life.split_radius_threshold)?;
        positive("lifecycle.child_radius_factor", life.child_radius_factor)?;
        finite("lifecycle.child_impulse", life.child_impulse)?;
        finite("lifecycle.split_separation", life.split_separation)?;

        let motion = &self.motion;
        finite("motion.drift_strength", motion.drift_strength)?;
        finite("motion.jitter", motion.jitter)?;
        for value in motion.float_amplitude.iter().chain(&motion.float_frequency) {
            finite("motion.float", *value)?;
        }
        unit("motion.damping", motion.damping)?;
        positive("motion.max_dt", motion.max_dt)?;
        positive("motion.reference_fps", motion.reference_fps)?;
        unit("motion.restitution", motion.restitution)?;

        let inter = &self.interaction;
        positive("interaction.collision_margin", inter.collision_margin)?;
        positive("interaction.proximity_margin", inter.proximity_margin)?;
        finite("interaction.repulsion_strength", inter.repulsion_strength)?;

        Ok(())
    }
}

/// Log the active tuning so runs can be compared from their logs
pub fn log_parameters(config: &SimulationConfig) {
    log::info!("World bounds: {:?}", config.world.bounds);
    log::info!(
        "Population: initial={} max={} death trigger at {}",
        config.population.initial,
        config.population.max,
        config.population.death_trigger_count()
    );
    log::info!("Lifecycle: {:?}", config.lifecycle);
    log::info!("Motion: {:?}", config.motion);
    log::info!("Interaction: {:?}", config.interaction);
}
