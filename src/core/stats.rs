use serde::Serialize;

use crate::core::grid::GRID_DIMENSION;
use crate::models::OceanGrid;

/// Coarse health classification used by dashboards
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthBand {
    Critical,
    Warning,
    Moderate,
    Healthy,
    Pristine,
}

impl HealthBand {
    pub fn classify(score: u8) -> Self {
        match score {
            0..=20 => HealthBand::Critical,
            21..=40 => HealthBand::Warning,
            41..=60 => HealthBand::Moderate,
            61..=80 => HealthBand::Healthy,
            _ => HealthBand::Pristine,
        }
    }
}

/// Sector count per health band
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct HealthDistribution {
    pub critical: usize,
    pub warning: usize,
    pub moderate: usize,
    pub healthy: usize,
    pub pristine: usize,
}

impl HealthDistribution {
    fn record(&mut self, band: HealthBand) {
        match band {
            HealthBand::Critical => self.critical += 1,
            HealthBand::Warning => self.warning += 1,
            HealthBand::Moderate => self.moderate += 1,
            HealthBand::Healthy => self.healthy += 1,
            HealthBand::Pristine => self.pristine += 1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CriticalSector {
    pub row: usize,
    pub col: usize,
    pub value: u8,
}

/// Grid-wide health summary
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GridStats {
    pub average_health: u8,
    pub most_critical: CriticalSector,
    pub distribution: HealthDistribution,
}

/// Summarise the health scores of a grid
///
/// `most_critical` is the first sector in row-major order holding the lowest score.
pub fn grid_stats(grid: &OceanGrid) -> GridStats {
    let sectors = grid.sectors();

    let total: u64 = sectors.iter().map(|s| s.health_score as u64).sum();
    let average_health = (total as f64 / sectors.len() as f64).round() as u8;

    let mut most_critical = CriticalSector { row: 0, col: 0, value: u8::MAX };
    let mut distribution = HealthDistribution::default();

    for sector in sectors {
        if sector.health_score < most_critical.value {
            most_critical = CriticalSector {
                row: sector.row(),
                col: sector.col(),
                value: sector.health_score,
            };
        }
        distribution.record(HealthBand::classify(sector.health_score));
    }

    GridStats {
        average_health,
        most_critical,
        distribution,
    }
}

/// Mean health of each sector and its in-grid neighbours (3x3 window), rounded
pub fn neighborhood_averages(grid: &OceanGrid) -> Vec<Vec<u8>> {
    let scores = grid.health_matrix();
    let last = GRID_DIMENSION - 1;

    (0..GRID_DIMENSION)
        .map(|row| {
            (0..GRID_DIMENSION)
                .map(|col| {
                    let mut sum = 0u32;
                    let mut count = 0u32;
                    for r in row.saturating_sub(1)..=(row + 1).min(last) {
                        for c in col.saturating_sub(1)..=(col + 1).min(last) {
                            sum += scores[r][c] as u32;
                            count += 1;
                        }
                    }
                    (sum as f64 / count as f64).round() as u8
                })
                .collect()
        })
        .collect()
}
