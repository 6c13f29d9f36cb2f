pub mod entity;
pub mod ids;
pub mod interaction;
pub mod lifecycle;
pub mod motion;
pub mod palette;
pub mod population;
pub mod simulation;
pub mod snapshot;
pub mod stats;

pub use entity::*;
pub use ids::*;
pub use palette::*;
pub use simulation::*;
pub use snapshot::*;
pub use stats::*;
