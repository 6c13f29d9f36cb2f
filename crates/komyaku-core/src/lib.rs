//! Komyaku Core Engine
//!
//! Per-frame simulation of soft, eye-bearing blobs: drift and jitter forces,
//! wall bounces, soft pairwise repulsion and the split/death lifecycle.

pub mod sim;

// Re-export main types
pub use sim::*;

// Re-export params from komyaku-params
pub use komyaku_params::*;
