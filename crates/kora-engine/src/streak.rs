//! Consecutive-day streak computation over action dates.

use std::collections::BTreeSet;

use chrono::NaiveDate;

/// Length of the consecutive-calendar-day run ending at the most recent
/// date in `dates`.
///
/// The walk starts at the newest date and stops at the first gap larger
/// than one day. Returns 0 for an empty set and 1 for a single date.
///
/// The streak is anchored to the most recent **action** date, not to
/// "today": a subject inactive for a week still reports the length of
/// their last run. Callers wanting a today-anchored streak must check the
/// newest date themselves.
pub fn consecutive_days(dates: &BTreeSet<NaiveDate>) -> u32 {
    let mut iter = dates.iter().rev();
    let Some(mut prev) = iter.next().copied() else {
        return 0;
    };
    let mut streak = 1;
    for &date in iter {
        if prev.signed_duration_since(date).num_days() == 1 {
            streak += 1;
            prev = date;
        } else {
            break;
        }
    }
    streak
}
