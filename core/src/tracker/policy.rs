//! Progress and newest-spot selection rules
//!
//! Pure functions over tracker state. The tracker calls these once per tick;
//! keeping them free of the host makes the rules easy to test on their own.

use crate::host::{Handle, Tick};

use super::{CachedDeparture, TrackedSpot};

/// Fraction of the expected lifetime that has passed, clamped to `[0.0, 1.0]`.
/// 0.0 = just appeared, 1.0 = at (or past) the maximum expected duration.
pub fn progress_fraction(elapsed: Tick, max_ticks: Tick) -> f64 {
    if max_ticks == 0 {
        return 1.0;
    }
    (f64::from(elapsed) / f64::from(max_ticks)).min(1.0)
}

/// Spawn tick for a spot first observed at `now`.
///
/// A cached departure on the same tile resumes its original timer if the spot
/// could still be the same one, i.e. no more than `max_ticks` have passed
/// since it originally spawned.
pub fn resumed_spawn_tick(cached: Option<CachedDeparture>, now: Tick, max_ticks: Tick) -> Tick {
    match cached {
        Some(entry) if now.saturating_sub(entry.spawn_tick) <= max_ticks => entry.spawn_tick,
        _ => now,
    }
}

/// The most recently (re)spawned non-static spot, with its spawn tick.
///
/// Ties on elapsed time go to the lowest handle so the choice is stable
/// regardless of map iteration order.
pub fn newest_candidate<'a, I>(spots: I, now: Tick) -> Option<(Handle, Tick)>
where
    I: IntoIterator<Item = (Handle, &'a TrackedSpot)>,
{
    spots
        .into_iter()
        .filter(|(_, spot)| !spot.kind.is_static())
        .min_by_key(|(handle, spot)| (spot.elapsed(now), *handle))
        .map(|(handle, spot)| (handle, spot.spawn_tick))
}

/// Sticky newest pick.
///
/// `current` must already be validated (still tracked, same entity, not
/// static). The pick only moves
/// to a candidate that is strictly newer, so spots sharing a spawn tick do not
/// make the badge bounce between them.
pub fn next_newest_pick(
    current: Option<(Handle, Tick)>,
    candidate: Option<(Handle, Tick)>,
) -> Option<Handle> {
    match (current, candidate) {
        (None, candidate) => candidate.map(|(handle, _)| handle),
        (Some((handle, _)), None) => Some(handle),
        (Some((handle, spawn_tick)), Some((candidate, candidate_spawn))) => {
            if candidate_spawn > spawn_tick {
                Some(candidate)
            } else {
                Some(handle)
            }
        }
    }
}
