//! Same-day overlap validation.
//!
//! # Invariants
//! - Validation is pure: no mutation, no side effects.
//! - Positions in a conflict refer to the sequence passed in, counting excluded
//!   entries, so they line up with day-bucket indices.

use crate::model::time_range::TimeRange;

/// First existing range that a candidate overlaps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OverlapConflict {
    /// Position of the conflicting range in the validated sequence.
    pub position: usize,
    pub existing: TimeRange,
}

/// Accepts `candidate` when it overlaps none of `existing`.
pub fn validate<'a, I>(candidate: &TimeRange, existing: I) -> Result<(), OverlapConflict>
where
    I: IntoIterator<Item = &'a TimeRange>,
{
    first_conflict(candidate, existing, None)
}

/// Same as [`validate`], skipping the entry at `exclude`.
///
/// Edit paths pass the edited entry's position so that an event never
/// conflicts with its own prior version.
pub fn validate_excluding<'a, I>(
    candidate: &TimeRange,
    existing: I,
    exclude: usize,
) -> Result<(), OverlapConflict>
where
    I: IntoIterator<Item = &'a TimeRange>,
{
    first_conflict(candidate, existing, Some(exclude))
}

fn first_conflict<'a, I>(
    candidate: &TimeRange,
    existing: I,
    exclude: Option<usize>,
) -> Result<(), OverlapConflict>
where
    I: IntoIterator<Item = &'a TimeRange>,
{
    let found = existing
        .into_iter()
        .enumerate()
        .filter(|(position, _)| Some(*position) != exclude)
        .find(|(_, range)| candidate.overlaps(range));

    match found {
        Some((position, range)) => Err(OverlapConflict {
            position,
            existing: *range,
        }),
        None => Ok(()),
    }
}
