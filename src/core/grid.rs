use rand::Rng;

use crate::core::scoring::health_score;
use crate::models::{BoundingBox, OccurrencePoint, OceanGrid, Sector};

/// Number of sectors along each axis of the reef grid
pub const GRID_DIMENSION: usize = 10;

/// Total number of sectors in a grid
pub const GRID_CELLS: usize = GRID_DIMENSION * GRID_DIMENSION;

/// Baseline coral coverage range before the biodiversity bonus
const CORAL_BASE_RANGE: std::ops::Range<f64> = 5.0..30.0;
const CORAL_PER_SPECIES: f64 = 2.0;
const MAX_CORAL_PCT: f64 = 90.0;

/// Simulated water temperature range
const WATER_TEMP_RANGE: std::ops::Range<f64> = 26.0..33.0;

/// Per-sector occurrence counts, indexed `[row][col]`
pub type SpeciesCounts = [[u32; GRID_DIMENSION]; GRID_DIMENSION];

/// Count occurrence points per sector
///
/// Points lacking either coordinate are dropped. Points outside the box are
/// clamped into the nearest edge sector.
pub fn bin_species(points: &[OccurrencePoint], bounds: &BoundingBox) -> SpeciesCounts {
    let mut counts = [[0u32; GRID_DIMENSION]; GRID_DIMENSION];

    let lat_step = bounds.lat_span() / GRID_DIMENSION as f64;
    let lon_step = bounds.lon_span() / GRID_DIMENSION as f64;

    for (lat, lon) in points.iter().filter_map(OccurrencePoint::coordinates) {
        let row = sector_index(lat, bounds.min_lat, lat_step);
        let col = sector_index(lon, bounds.min_lon, lon_step);
        counts[row][col] = counts[row][col].saturating_add(1);
    }

    counts
}

/// Bin points into the grid and synthesize environmental readings per sector
///
/// Every sector gets a reading, including empty ones. Coral coverage grows
/// with the species count; water temperature is independent of it.
pub fn bin_and_synthesize<R>(
    points: &[OccurrencePoint],
    bounds: &BoundingBox,
    rng: &mut R,
) -> OceanGrid
where
    R: Rng + ?Sized,
{
    let counts = bin_species(points, bounds);

    let mut sectors = Vec::with_capacity(GRID_CELLS);
    for (row, row_counts) in counts.iter().enumerate() {
        for (col, &species_count) in row_counts.iter().enumerate() {
            sectors.push(synthesize_sector(row, col, species_count, rng));
        }
    }

    OceanGrid::from_full_matrix(sectors)
}

fn synthesize_sector<R>(row: usize, col: usize, species_count: u32, rng: &mut R) -> Sector
where
    R: Rng + ?Sized,
{
    let coral_pct = (rng.gen_range(CORAL_BASE_RANGE) + species_count as f64 * CORAL_PER_SPECIES)
        .min(MAX_CORAL_PCT);
    let temp_c = rng.gen_range(WATER_TEMP_RANGE);

    // Scored on the unrounded readings
    let score = health_score(temp_c, coral_pct, species_count);

    Sector::new(
        row,
        col,
        species_count,
        round_one_decimal(temp_c),
        round_one_decimal(coral_pct),
        score,
    )
}

/// Map a coordinate onto a sector index in `[0, GRID_DIMENSION)`
///
/// A zero-span axis collapses every point onto index 0.
#[inline]
fn sector_index(value: f64, min: f64, step: f64) -> usize {
    if step == 0.0 {
        return 0;
    }

    // Saturating cast: NaN -> 0, +inf -> i64::MAX
    let index = ((value - min) / step).floor() as i64;
    index.clamp(0, GRID_DIMENSION as i64 - 1) as usize
}

#[inline]
fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round_ties_even() / 10.0
}
