// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{BoundingBox, OccurrencePoint, OceanGrid, RestorationRoadmap, Sector};
pub use requests::BoundsQuery;
pub use responses::{ErrorResponse, HealthResponse, MatrixResponse, StatsResponse};
