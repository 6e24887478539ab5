/// Water temperature above which coral stress starts costing points
pub const IDEAL_TEMP_CEILING_C: f64 = 27.0;

/// Points lost per degree above the ideal ceiling
pub const TEMP_PENALTY_PER_DEGREE: f64 = 5.0;

pub const CORAL_WEIGHT: f64 = 0.6;
pub const SPECIES_WEIGHT: f64 = 1.5;
pub const MAX_HEALTH_SCORE: u8 = 100;

/// Calculate a reef health score (0-100) for one sector
///
/// Scoring formula:
/// score = (
///     coral_pct * 0.6 +                 # Living coral cover
///     species_count * 1.5 -             # Observed biodiversity
///     max(0, (temp_c - 27) * 5)         # Thermal stress above 27°C
/// )
///
/// The raw value is truncated toward zero and then clamped to [0, 100].
/// Total over every input. A NaN temperature carries no penalty, a NaN raw
/// value collapses to 0, and infinities clamp.
pub fn health_score(temp_c: f64, coral_pct: f64, species_count: u32) -> u8 {
    let temp_penalty = calculate_temp_penalty(temp_c);
    let raw = coral_pct * CORAL_WEIGHT + species_count as f64 * SPECIES_WEIGHT - temp_penalty;

    // `as` saturates and maps NaN to 0
    raw.trunc().clamp(0.0, MAX_HEALTH_SCORE as f64) as u8
}

/// Linear penalty above the ideal ceiling, zero at or below it
#[inline]
fn calculate_temp_penalty(temp_c: f64) -> f64 {
    ((temp_c - IDEAL_TEMP_CEILING_C) * TEMP_PENALTY_PER_DEGREE).max(0.0)
}
