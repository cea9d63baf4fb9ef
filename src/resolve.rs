//! Target resolution: reduce a scan to at most one coordinate.
//!
//! The protocols are applied as a fixed cascade, whatever order the
//! caller listed them in:
//!
//! 1. Range: contacts beyond [`MAX_RANGE`] are dropped.
//! 2. Exclusion: `avoid-mech`, then `avoid-crossfire`. Hard cuts that may
//!    leave nothing to shoot at.
//! 3. Preference: `prioritize-mech`, then `assist-allies`. Soft cuts that
//!    are skipped when they would leave nothing.
//! 4. Ordering: `closest-enemies` or `furthest-enemies`, stable.
//! 5. Selection: the first surviving contact.
//!
//! Ties keep input order: the first contact the caller listed wins.

use std::cmp::Ordering;

use log::debug;

use crate::model::{Coordinates, Protocol, ProtocolSet, ScanEntry};

/// Contacts further than this from the radar are out of range.
pub const MAX_RANGE: f64 = 100.0;

/// Resolve a scan to a single target.
///
/// Returns `None` when no contact survives the range and exclusion filters.
/// This is a valid outcome, not an error.
pub fn resolve(protocols: &ProtocolSet, scan: &[ScanEntry]) -> Option<Coordinates> {
    let mut candidates: Vec<&ScanEntry> = scan
        .iter()
        .filter(|entry| entry.coordinates.distance() <= MAX_RANGE)
        .collect();
    debug!("{} of {} contacts in range", candidates.len(), scan.len());
    if candidates.is_empty() {
        return None;
    }

    if protocols.contains(Protocol::AvoidMech) {
        candidates.retain(|entry| !entry.is_mech());
    }
    if protocols.contains(Protocol::AvoidCrossfire) {
        candidates.retain(|entry| !entry.has_allies());
    }
    debug!("{} contacts after exclusions", candidates.len());
    if candidates.is_empty() {
        return None;
    }

    if protocols.contains(Protocol::PrioritizeMech) {
        candidates = narrow_if_non_empty(candidates, |entry| entry.is_mech());
    }
    if protocols.contains(Protocol::AssistAllies) {
        candidates = narrow_if_non_empty(candidates, |entry| entry.has_allies());
    }
    debug!("{} contacts after preferences", candidates.len());

    if protocols.contains(Protocol::ClosestEnemies) {
        candidates.sort_by(|a, b| by_distance(a, b));
    } else if protocols.contains(Protocol::FurthestEnemies) {
        candidates.sort_by(|a, b| by_distance(b, a));
    }

    candidates.first().map(|entry| entry.coordinates)
}

/// Keep only the candidates matching `predicate`, unless none do.
///
/// A preference never leaves the caller without a target: when nothing
/// matches, the candidates come back unchanged.
pub fn narrow_if_non_empty<'a>(
    candidates: Vec<&'a ScanEntry>,
    predicate: impl Fn(&ScanEntry) -> bool,
) -> Vec<&'a ScanEntry> {
    let narrowed: Vec<&ScanEntry> = candidates
        .iter()
        .copied()
        .filter(|&entry| predicate(entry))
        .collect();
    if narrowed.is_empty() {
        candidates
    } else {
        narrowed
    }
}

fn by_distance(a: &ScanEntry, b: &ScanEntry) -> Ordering {
    a.coordinates.distance().total_cmp(&b.coordinates.distance())
}
