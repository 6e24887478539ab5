use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::models::domain::BoundingBox;

/// Query parameters shared by every reef endpoint
///
/// `?min_lat=-18.5&max_lat=-16&min_lon=146&max_lon=148.2[&seed=42]`
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[validate(schema(function = "validate_finite_bounds"))]
pub struct BoundsQuery {
    #[validate(range(min = -90.0, max = 90.0))]
    pub min_lat: f64,
    #[validate(range(min = -90.0, max = 90.0))]
    pub max_lat: f64,
    #[validate(range(min = -180.0, max = 180.0))]
    pub min_lon: f64,
    #[validate(range(min = -180.0, max = 180.0))]
    pub max_lon: f64,
    /// Makes the synthesized readings reproducible
    #[serde(default)]
    pub seed: Option<u64>,
}

impl BoundsQuery {
    pub fn bounds(&self) -> BoundingBox {
        BoundingBox::new(self.min_lat, self.max_lat, self.min_lon, self.max_lon)
    }
}

// NaN slips through range checks, so reject non-finite values explicitly
fn validate_finite_bounds(query: &BoundsQuery) -> Result<(), ValidationError> {
    let all_finite = [query.min_lat, query.max_lat, query.min_lon, query.max_lon]
        .iter()
        .all(|v| v.is_finite());

    if all_finite {
        Ok(())
    } else {
        Err(ValidationError::new("non_finite_bounds"))
    }
}
