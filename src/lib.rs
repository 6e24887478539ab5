//! Reef Index - reef health grid service
//!
//! This library bins marine species occurrence records for a bounding box into
//! a 10x10 grid of sectors, synthesizes environmental readings per sector,
//! scores sector health and ranks sectors for restoration.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use core::{bin_and_synthesize, health_score, rank_ascending, ReefAnalyzer, GRID_DIMENSION};
pub use models::{BoundingBox, OccurrencePoint, OceanGrid, RestorationRoadmap, Sector};
