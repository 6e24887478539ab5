use crate::models::{OceanGrid, RestorationRoadmap, Sector};

/// Number of sectors in each half of a restoration roadmap
pub const ROADMAP_SIZE: usize = 10;

/// Flatten the grid row-major and sort sectors by health score, lowest first
///
/// The sort is stable: equal scores keep their row-major order. The grid
/// itself is left untouched.
pub fn rank_ascending(grid: &OceanGrid) -> Vec<Sector> {
    let mut ranked = grid.sectors().to_vec();
    ranked.sort_by_key(|sector| sector.health_score);
    ranked
}

impl RestorationRoadmap {
    /// Split an ascending ranking into its weakest and strongest sectors
    ///
    /// Both lists stay in ascending order.
    pub fn from_ranking(ranked: &[Sector]) -> Self {
        let urgent_end = ranked.len().min(ROADMAP_SIZE);
        let healthy_start = ranked.len().saturating_sub(ROADMAP_SIZE);

        Self {
            urgent_restoration_needed: ranked[..urgent_end].to_vec(),
            healthy_sectors: ranked[healthy_start..].to_vec(),
        }
    }
}
