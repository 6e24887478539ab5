use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::core::{grid::bin_and_synthesize, ranking::rank_ascending};
use crate::models::{BoundingBox, OccurrencePoint, OceanGrid, RestorationRoadmap};

/// Result of gridding one query
#[derive(Debug)]
pub struct MatrixResult {
    pub grid: OceanGrid,
    /// Records returned upstream, including those without coordinates
    pub raw_point_count: usize,
}

/// Reef analysis orchestrator
///
/// # Pipeline Stages
/// 1. Bin occurrence points into the 10x10 sector grid
/// 2. Synthesize water temperature and coral coverage per sector
/// 3. Score every sector
/// 4. (roadmap only) Rank sectors by health
///
/// Each call draws from its own `StdRng`, so concurrent requests never share
/// random state. The seed comes from the request, else the configured seed,
/// else OS entropy.
#[derive(Debug, Clone, Default)]
pub struct ReefAnalyzer {
    seed: Option<u64>,
}

impl ReefAnalyzer {
    pub fn new(seed: Option<u64>) -> Self {
        Self { seed }
    }

    /// Analyzer whose readings differ on every call
    pub fn with_entropy() -> Self {
        Self { seed: None }
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    fn rng(&self, request_seed: Option<u64>) -> StdRng {
        match request_seed.or(self.seed) {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }

    /// Grid the points and synthesize every sector
    pub fn build_matrix(
        &self,
        points: &[OccurrencePoint],
        bounds: &BoundingBox,
        request_seed: Option<u64>,
    ) -> MatrixResult {
        let mut rng = self.rng(request_seed);
        let grid = bin_and_synthesize(points, bounds, &mut rng);

        tracing::debug!(
            "Binned {} of {} points into grid (seed: {:?})",
            grid.total_species(),
            points.len(),
            request_seed.or(self.seed)
        );

        MatrixResult {
            grid,
            raw_point_count: points.len(),
        }
    }

    /// Grid the points, then pick the weakest and strongest sectors
    pub fn build_roadmap(
        &self,
        points: &[OccurrencePoint],
        bounds: &BoundingBox,
        request_seed: Option<u64>,
    ) -> RestorationRoadmap {
        let matrix = self.build_matrix(points, bounds, request_seed);
        let ranked = rank_ascending(&matrix.grid);
        RestorationRoadmap::from_ranking(&ranked)
    }
}
