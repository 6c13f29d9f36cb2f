use anyhow::Result;
use csv::Writer;
use komyaku_core::{body_opacity, body_scale, Simulation};
use std::fs::File;
use std::path::{Path, PathBuf};

/// Snapshot writer for per-blob state dumps
pub struct SnapshotWriter {
    output_dir: PathBuf,
}

impl SnapshotWriter {
    /// Create a new snapshot writer
    pub fn new(output_dir: &Path) -> Result<Self> {
        Ok(Self {
            output_dir: output_dir.to_path_buf(),
        })
    }

    /// Write blob positions and lifecycle states to CSV
    pub fn write_blobs_snapshot(&self, step: u32, sim: &Simulation) -> Result<PathBuf> {
        let filename = format!("entities_{:04}.csv", step);
        let filepath = self.output_dir.join(&filename);

        let file = File::create(&filepath)?;
        let mut csv_writer = Writer::from_writer(file);

        csv_writer.write_record([
            "id", "x", "y", "z", "vx", "vy", "vz", "radius", "color", "age",
            "splitting", "split_progress", "dying", "death_progress", "opacity", "scale",
        ])?;

        for blob in sim.blobs() {
            csv_writer.write_record(&[
                blob.id.to_string(),
                blob.position.x.to_string(),
                blob.position.y.to_string(),
                blob.position.z.to_string(),
                blob.velocity.x.to_string(),
                blob.velocity.y.to_string(),
                blob.velocity.z.to_string(),
                blob.radius.to_string(),
                blob.color.hex().to_string(),
                blob.age.to_string(),
                blob.is_splitting.to_string(),
                blob.split_progress.to_string(),
                blob.is_dying.to_string(),
                blob.death_progress.to_string(),
                body_opacity(blob).to_string(),
                body_scale(blob).to_string(),
            ])?;
        }

        csv_writer.flush()?;

        Ok(filepath)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use komyaku_core::{seeded_rng, SimulationConfig};

    #[test]
    fn snapshot_has_one_row_per_blob() {
        let dir = std::env::temp_dir().join(format!("komyaku-snap-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();

        let mut rng = seeded_rng(1);
        let sim = Simulation::with_population(SimulationConfig::default(), &mut rng);
        let path = SnapshotWriter::new(&dir).unwrap().write_blobs_snapshot(0, &sim).unwrap();

        assert!(path.ends_with("entities_0000.csv"));
        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written.lines().count(), 1 + sim.len());
        std::fs::remove_dir_all(&dir).ok();
    }
}
