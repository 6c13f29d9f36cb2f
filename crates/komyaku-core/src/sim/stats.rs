use super::entity::Blob;

/// Population statistics for metrics collection
#[derive(Debug, Clone, PartialEq)]
pub struct PopulationStats {
    pub alive_count: u32,
    pub dying_count: u32,
    pub splitting_count: u32,
    pub mean_radius: f32,
    pub mean_speed: f32,
    pub total_births: u64,
    pub total_deaths: u64,
}

impl Default for PopulationStats {
    fn default() -> Self {
        Self {
            alive_count: 0,
            dying_count: 0,
            splitting_count: 0,
            mean_radius: 0.0,
            mean_speed: 0.0,
            total_births: 0,
            total_deaths: 0,
        }
    }
}

impl PopulationStats {
    /// Summarise the live collection. Lifetime counters are passed through.
    pub fn collect(blobs: &[Blob], total_births: u64, total_deaths: u64) -> Self {
        if blobs.is_empty() {
            return Self {
                total_births,
                total_deaths,
                ..Self::default()
            };
        }

        let alive_count = blobs.len() as u32;
        let dying_count = blobs.iter().filter(|b| b.is_dying).count() as u32;
        let splitting_count = blobs.iter().filter(|b| b.is_splitting).count() as u32;
        let mean_radius = blobs.iter().map(|b| b.radius).sum::<f32>() / alive_count as f32;
        let mean_speed = blobs.iter().map(Blob::speed).sum::<f32>() / alive_count as f32;

        Self {
            alive_count,
            dying_count,
            splitting_count,
            mean_radius,
            mean_speed,
            total_births,
            total_deaths,
        }
    }
}
