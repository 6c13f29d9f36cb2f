use csv::Writer;
use komyaku_core::PopulationStats;
use std::fs::File;
use std::path::Path;
use std::time::Duration;

/// Metrics writer for CSV output and performance logging
pub struct MetricsWriter {
    csv_writer: Writer<File>,
    step_count: u32,
    population_history: Vec<u32>, // Track blob counts for churn detection
}

impl MetricsWriter {
    /// Create a new metrics writer
    pub fn new(output_dir: &Path) -> Result<Self, anyhow::Error> {
        let csv_path = output_dir.join("metrics.csv");
        let file = File::create(&csv_path)?;

        let mut csv_writer = Writer::from_writer(file);

        csv_writer.write_record([
            "step",
            "alive_count", "dying_count", "splitting_count",
            "mean_radius", "mean_speed",
            "total_births", "total_deaths",
            "churn",
            "wall_time_ms",
        ])?;

        Ok(Self {
            csv_writer,
            step_count: 0,
            population_history: Vec::new(),
        })
    }

    /// Mean absolute change in population between recorded rows, over the recent window
    fn compute_churn(&self) -> f32 {
        let window = &self.population_history[self.population_history.len().saturating_sub(20)..];
        if window.len() < 2 {
            return 0.0;
        }
        let total: u32 = window.windows(2).map(|w| w[0].abs_diff(w[1])).sum();
        total as f32 / (window.len() - 1) as f32
    }

    /// Write metrics for a single simulation step
    pub fn write_step(
        &mut self,
        step: u32,
        stats: &PopulationStats,
        step_time: Duration,
    ) -> Result<(), anyhow::Error> {
        self.population_history.push(stats.alive_count);
        if self.population_history.len() > 200 {
            self.population_history.remove(0);
        }

        let wall_time_ms = step_time.as_secs_f64() * 1000.0;
        let churn = self.compute_churn();

        self.csv_writer.write_record(&[
            step.to_string(),
            stats.alive_count.to_string(),
            stats.dying_count.to_string(),
            stats.splitting_count.to_string(),
            stats.mean_radius.to_string(),
            stats.mean_speed.to_string(),
            stats.total_births.to_string(),
            stats.total_deaths.to_string(),
            churn.to_string(),
            wall_time_ms.to_string(),
        ])?;

        self.csv_writer.flush()?;
        self.step_count += 1;

        Ok(())
    }

    /// Get the number of rows written
    #[allow(dead_code)]
    pub fn step_count(&self) -> u32 {
        self.step_count
    }
}
