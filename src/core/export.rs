use std::fmt::Write;

use crate::models::{OceanGrid, Sector};

const HEALTH_MAP_TITLE: &str = "Reef Health Map";
const PRIORITY_CSV_HEADER: &str = "Rank,Row,Col,Health Score";

/// Plain-text health map: one line per grid row, scores right-aligned in width 4
pub fn render_health_map(grid: &OceanGrid) -> String {
    let mut out = String::new();
    out.push_str(HEALTH_MAP_TITLE);
    out.push('\n');
    out.push_str(&"=".repeat(40));
    out.push_str("\n\n");

    for row in grid.rows() {
        for sector in row {
            // Writing into a String cannot fail
            let _ = write!(out, "{:>4}", sector.health_score);
        }
        out.push('\n');
    }

    out
}

/// Restoration priority list as CSV, ranked from 1 in the given order
pub fn render_priority_csv(sectors: &[Sector]) -> String {
    let mut out = String::from(PRIORITY_CSV_HEADER);
    out.push('\n');

    for (rank, sector) in sectors.iter().enumerate() {
        let _ = writeln!(
            out,
            "{},{},{},{}",
            rank + 1,
            sector.row(),
            sector.col(),
            sector.health_score
        );
    }

    out
}
