use std::collections::HashSet;

use chrono::NaiveDate;

use crate::errors::HabitError;
use crate::models::{Cadence, Habit};

/// Whole cadence units between `from` and `to`.
///
/// Days for a daily habit, whole weeks (floor of days / 7) for a weekly one.
fn units_between(cadence: Cadence, from: NaiveDate, to: NaiveDate) -> i64 {
    (to - from).num_days().div_euclid(cadence.days_interval())
}

/// Calculates the current streak of a habit, counted back from `today` in
/// cadence units.
///
/// The walk starts at the most recent completion and allows one unit of
/// slack per step: a completion keeps the streak alive while
/// `units_between(date, today) - counted` is 0 or 1. A habit last done one
/// unit ago therefore still starts a streak of 1, while a two-unit gap
/// breaks it.
///
/// # Returns
/// - `0` if the habit has no completions or the streak is broken.
/// - The number of consecutive cadence units otherwise.
pub fn current_streak(habit: &Habit, today: NaiveDate) -> u32 {
    if habit.completions.is_empty() {
        return 0;
    }

    let mut dates = habit.completions.clone();
    dates.sort();

    let mut streak: u32 = 0;
    for date in dates.iter().rev() {
        let gap = units_between(habit.cadence, *date, today) - i64::from(streak);
        if gap == 0 || gap == 1 {
            streak += 1;
        } else {
            break;
        }
    }
    streak
}

/// Calculates the share of cadence units in the inclusive range
/// `[start, end]` that have at least one completion, as a percentage.
///
/// Daily habits count one unit per completed date. Weekly habits count
/// distinct weeks anchored at `start` (floor of days-from-start / 7), so
/// several completions within the same week count once.
///
/// # Returns
/// - `Err(HabitError::InvalidRange)` if `start` is after `end`.
/// - `Ok(0.0)` if the habit has no completions.
/// - A value in `[0, 100]` otherwise.
pub fn completion_percentage(
    habit: &Habit,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<f64, HabitError> {
    if start > end {
        return Err(HabitError::InvalidRange);
    }
    if habit.completions.is_empty() {
        return Ok(0.0);
    }

    let in_range: Vec<NaiveDate> = habit
        .completions
        .iter()
        .copied()
        .filter(|d| *d >= start && *d <= end)
        .collect();

    let total_units = units_between(habit.cadence, start, end) + 1;
    let completed_units = match habit.cadence {
        Cadence::Daily => in_range.len() as i64,
        Cadence::Weekly => {
            let weeks: HashSet<i64> = in_range
                .iter()
                .map(|d| units_between(Cadence::Weekly, start, *d))
                .collect();
            weeks.len() as i64
        }
    };

    if total_units == 0 {
        return Ok(0.0);
    }

    Ok(completed_units as f64 / total_units as f64 * 100.0)
}
