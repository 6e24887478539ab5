// Core algorithm exports
pub mod analyzer;
pub mod export;
pub mod grid;
pub mod ranking;
pub mod scoring;
pub mod stats;

pub use analyzer::{MatrixResult, ReefAnalyzer};
pub use export::{render_health_map, render_priority_csv};
pub use grid::{bin_and_synthesize, bin_species, GRID_CELLS, GRID_DIMENSION};
pub use ranking::{rank_ascending, ROADMAP_SIZE};
pub use scoring::health_score;
pub use stats::{grid_stats, neighborhood_averages, GridStats, HealthBand};
