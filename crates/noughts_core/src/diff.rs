//! Move-diff validation between two board snapshots.

use crate::error::ValidationError;
use crate::types::{Coord, Grid};
use tracing::{instrument, warn};

/// Coordinates whose marks differ between `before` and `after`, row-major.
pub fn changed_cells(before: &Grid, after: &Grid) -> Vec<Coord> {
    before
        .coords()
        .filter(|coord| before.get(*coord) != after.get(*coord))
        .collect()
}

/// Checks that exactly one cell differs between `before` and `after`.
///
/// # Errors
///
/// Returns [`ValidationError::InvalidDiff`] when zero or several cells differ.
#[instrument(skip(before, after))]
pub fn validate_single_cell_diff(before: &Grid, after: &Grid) -> Result<(), ValidationError> {
    let changed = changed_cells(before, after).len();
    if changed != 1 {
        warn!(changed, "Submitted grid is not a single move");
        return Err(ValidationError::InvalidDiff { changed });
    }
    Ok(())
}
