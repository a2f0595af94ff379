//! Region admission: is a sub-region's number reportable at all?

use crate::measurement::Measurement;
use tracing::debug;

/// Admission test for one sub-region.
///
/// A region is admitted iff the seasonal-onset coverage has reached
/// `min_season` AND the existing-event coverage is still below
/// `max_existing`. Missing season coverage fails the test (onset cannot
/// be established); missing existing-event coverage passes it (no
/// evidence of an ongoing event).
///
/// The test is monotone: raising season coverage can only admit, raising
/// existing-event coverage can only exclude.
pub fn admit(
    season_coverage: &Measurement,
    existing_event_coverage: &Measurement,
    min_season: f64,
    max_existing: f64,
) -> bool {
    let season_ok = matches!(season_coverage.value, Some(v) if v >= min_season);
    let existing_ok = match existing_event_coverage.value {
        Some(v) => v < max_existing,
        None => true,
    };
    debug!(
        season = ?season_coverage.value,
        existing = ?existing_event_coverage.value,
        min_season,
        max_existing,
        admitted = season_ok && existing_ok,
        "region gate"
    );
    season_ok && existing_ok
}
