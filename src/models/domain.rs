use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

use crate::core::grid::{GRID_CELLS, GRID_DIMENSION};

/// Geospatial bounding box of a reef query, in degrees
///
/// `min < max` is expected on both axes but never enforced: the grid binner
/// degrades gracefully on inverted or zero-span boxes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lon: f64,
    pub max_lon: f64,
}

impl BoundingBox {
    pub fn new(min_lat: f64, max_lat: f64, min_lon: f64, max_lon: f64) -> Self {
        Self {
            min_lat,
            max_lat,
            min_lon,
            max_lon,
        }
    }

    #[inline]
    pub fn lat_span(&self) -> f64 {
        self.max_lat - self.min_lat
    }

    #[inline]
    pub fn lon_span(&self) -> f64 {
        self.max_lon - self.min_lon
    }

    pub fn is_inverted(&self) -> bool {
        self.min_lat > self.max_lat || self.min_lon > self.max_lon
    }

    /// Closed WKT polygon ring, longitude first, as OBIS expects it
    pub fn to_wkt_polygon(&self) -> String {
        format!(
            "POLYGON(({min_lon} {min_lat}, {max_lon} {min_lat}, {max_lon} {max_lat}, {min_lon} {max_lat}, {min_lon} {min_lat}))",
            min_lat = self.min_lat,
            max_lat = self.max_lat,
            min_lon = self.min_lon,
            max_lon = self.max_lon,
        )
    }
}

/// Single species occurrence record from the upstream provider
///
/// Only the coordinates are interpreted; every other upstream field is kept
/// as-is in `attributes`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OccurrencePoint {
    #[serde(
        rename = "decimalLatitude",
        default,
        deserialize_with = "lenient_coordinate",
        skip_serializing_if = "Option::is_none"
    )]
    pub decimal_latitude: Option<f64>,
    #[serde(
        rename = "decimalLongitude",
        default,
        deserialize_with = "lenient_coordinate",
        skip_serializing_if = "Option::is_none"
    )]
    pub decimal_longitude: Option<f64>,
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

impl OccurrencePoint {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            decimal_latitude: Some(latitude),
            decimal_longitude: Some(longitude),
            attributes: Map::new(),
        }
    }

    /// `(lat, lon)` when both coordinates are present
    #[inline]
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        match (self.decimal_latitude, self.decimal_longitude) {
            (Some(lat), Some(lon)) => Some((lat, lon)),
            _ => None,
        }
    }
}

/// Accepts any JSON value; anything other than a finite number is treated as absent
fn lenient_coordinate<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| v.as_f64()).filter(|v| v.is_finite()))
}

/// One cell of the reef grid, with synthesized environmental readings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sector {
    pub id: String,
    pub coordinates: [usize; 2],
    pub species_count: u32,
    pub water_temp_c: f64,
    pub coral_coverage_pct: f64,
    pub health_score: u8,
}

impl Sector {
    pub fn new(
        row: usize,
        col: usize,
        species_count: u32,
        water_temp_c: f64,
        coral_coverage_pct: f64,
        health_score: u8,
    ) -> Self {
        Self {
            id: format!("Sector-{}-{}", row, col),
            coordinates: [row, col],
            species_count,
            water_temp_c,
            coral_coverage_pct,
            health_score,
        }
    }

    #[inline]
    pub fn row(&self) -> usize {
        self.coordinates[0]
    }

    #[inline]
    pub fn col(&self) -> usize {
        self.coordinates[1]
    }
}

/// Fixed 10x10 matrix of sectors, stored row-major
///
/// Serializes as a nested array of rows.
#[derive(Debug, Clone, PartialEq)]
pub struct OceanGrid {
    sectors: Vec<Sector>,
}

impl OceanGrid {
    /// Wrap row-major sectors; `None` unless exactly one sector per cell is given
    pub fn from_sectors(sectors: Vec<Sector>) -> Option<Self> {
        (sectors.len() == GRID_CELLS).then_some(Self { sectors })
    }

    pub(crate) fn from_full_matrix(sectors: Vec<Sector>) -> Self {
        debug_assert_eq!(sectors.len(), GRID_CELLS);
        Self { sectors }
    }

    pub fn get(&self, row: usize, col: usize) -> Option<&Sector> {
        if row >= GRID_DIMENSION || col >= GRID_DIMENSION {
            return None;
        }
        self.sectors.get(row * GRID_DIMENSION + col)
    }

    /// Sectors in row-major order
    pub fn sectors(&self) -> &[Sector] {
        &self.sectors
    }

    pub fn rows(&self) -> std::slice::Chunks<'_, Sector> {
        self.sectors.chunks(GRID_DIMENSION)
    }

    /// Health scores as a nested row matrix
    pub fn health_matrix(&self) -> Vec<Vec<u8>> {
        self.rows()
            .map(|row| row.iter().map(|s| s.health_score).collect())
            .collect()
    }

    pub fn total_species(&self) -> u64 {
        self.sectors.iter().map(|s| s.species_count as u64).sum()
    }
}

impl Serialize for OceanGrid {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.rows())
    }
}

/// Restoration priorities derived from an ascending ranking
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RestorationRoadmap {
    pub urgent_restoration_needed: Vec<Sector>,
    pub healthy_sectors: Vec<Sector>,
}
