use chrono::{Duration, NaiveDate};
use habitust::errors::HabitError;
use habitust::models::{Cadence, Habit};
use habitust::progress::{completion_percentage, current_streak};

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn habit(cadence: Cadence, dates: &[NaiveDate]) -> Habit {
    let mut habit = Habit::new("user-1", "Test", "", cadence);
    for d in dates {
        habit.mark_completed(*d);
    }
    habit
}

#[test]
fn test_streak_empty() {
    let today = day(2025, 6, 15);
    assert_eq!(current_streak(&habit(Cadence::Daily, &[]), today), 0);
    assert_eq!(current_streak(&habit(Cadence::Weekly, &[]), today), 0);
}

#[test]
fn test_streak_daily_today_and_yesterday() {
    let today = day(2025, 6, 15);
    let h = habit(Cadence::Daily, &[today, today - Duration::days(1)]);
    assert_eq!(current_streak(&h, today), 2);
}

#[test]
fn test_streak_daily_yesterday_only() {
    // One unit of slack: not done today, but yesterday still starts a streak
    let today = day(2025, 6, 15);
    let h = habit(Cadence::Daily, &[today - Duration::days(1)]);
    assert_eq!(current_streak(&h, today), 1);
}

#[test]
fn test_streak_daily_two_days_ago_is_broken() {
    let today = day(2025, 6, 15);
    let h = habit(Cadence::Daily, &[today - Duration::days(2)]);
    assert_eq!(current_streak(&h, today), 0);
}

#[test]
fn test_streak_daily_chain_with_slack_start() {
    let today = day(2025, 6, 15);
    let h = habit(
        Cadence::Daily,
        &[
            today - Duration::days(1),
            today - Duration::days(2),
            today - Duration::days(3),
        ],
    );
    assert_eq!(current_streak(&h, today), 3);
}

#[test]
fn test_streak_daily_single_gap_survives() {
    // The slack applies per step, so a one-day hole does not break the chain
    let today = day(2025, 6, 15);
    let h = habit(Cadence::Daily, &[today, today - Duration::days(2)]);
    assert_eq!(current_streak(&h, today), 2);
}

#[test]
fn test_streak_daily_two_day_hole_breaks() {
    let today = day(2025, 6, 15);
    let h = habit(Cadence::Daily, &[today, today - Duration::days(3)]);
    assert_eq!(current_streak(&h, today), 1);
}

#[test]
fn test_streak_daily_unsorted_insertion_order() {
    // The calculator sorts internally; recording order must not matter
    let today = day(2025, 6, 15);
    let h = habit(
        Cadence::Daily,
        &[today - Duration::days(2), today, today - Duration::days(1)],
    );
    assert_eq!(current_streak(&h, today), 3);
}

#[test]
fn test_streak_weekly_this_and_last_week() {
    let today = day(2025, 6, 15);
    let h = habit(Cadence::Weekly, &[today, today - Duration::weeks(1)]);
    assert_eq!(current_streak(&h, today), 2);
}

#[test]
fn test_streak_weekly_last_week_only() {
    let today = day(2025, 6, 15);
    let h = habit(Cadence::Weekly, &[today - Duration::weeks(1)]);
    assert_eq!(current_streak(&h, today), 1);
}

#[test]
fn test_streak_weekly_two_week_gap_is_broken() {
    let today = day(2025, 6, 15);
    let h = habit(Cadence::Weekly, &[today - Duration::weeks(2)]);
    assert_eq!(current_streak(&h, today), 0);
}

#[test]
fn test_streak_future_completion_does_not_count() {
    let today = day(2025, 6, 15);
    let h = habit(Cadence::Daily, &[today + Duration::days(1)]);
    assert_eq!(current_streak(&h, today), 0);
}

#[test]
fn test_percentage_empty_habit_is_zero() {
    let h = habit(Cadence::Daily, &[]);
    let pct = completion_percentage(&h, day(2025, 6, 1), day(2025, 6, 30)).unwrap();
    assert_eq!(pct, 0.0);
}

#[test]
fn test_percentage_daily_two_of_eight_days() {
    let end = day(2025, 6, 30);
    let h = habit(
        Cadence::Daily,
        &[end - Duration::days(3), end - Duration::days(2)],
    );
    let pct = completion_percentage(&h, end - Duration::days(7), end).unwrap();
    assert_eq!(pct, 25.0);
}

#[test]
fn test_percentage_daily_full_range() {
    let h = habit(Cadence::Daily, &[day(2025, 6, 1), day(2025, 6, 2)]);
    let pct = completion_percentage(&h, day(2025, 6, 1), day(2025, 6, 2)).unwrap();
    assert_eq!(pct, 100.0);
}

#[test]
fn test_percentage_single_day_range() {
    let h = habit(Cadence::Daily, &[day(2025, 6, 1)]);
    let pct = completion_percentage(&h, day(2025, 6, 1), day(2025, 6, 1)).unwrap();
    assert_eq!(pct, 100.0);
}

#[test]
fn test_percentage_ignores_out_of_range_completions() {
    let h = habit(
        Cadence::Daily,
        &[day(2025, 5, 31), day(2025, 6, 1), day(2025, 6, 11)],
    );
    // Only June 1st falls inside the ten-day window
    let pct = completion_percentage(&h, day(2025, 6, 1), day(2025, 6, 10)).unwrap();
    assert_eq!(pct, 10.0);
}

#[test]
fn test_percentage_invalid_range() {
    let filled = habit(Cadence::Daily, &[day(2025, 6, 1)]);
    let empty = habit(Cadence::Daily, &[]);
    assert_eq!(
        completion_percentage(&filled, day(2025, 6, 2), day(2025, 6, 1)),
        Err(HabitError::InvalidRange)
    );
    // The range is checked before any habit state
    assert_eq!(
        completion_percentage(&empty, day(2025, 6, 2), day(2025, 6, 1)),
        Err(HabitError::InvalidRange)
    );
}

#[test]
fn test_percentage_weekly_same_week_counts_once() {
    let start = day(2025, 6, 1);
    // Both completions land in week 0 from start; the range spans two weeks
    let h = habit(Cadence::Weekly, &[day(2025, 6, 2), day(2025, 6, 3)]);
    let pct = completion_percentage(&h, start, day(2025, 6, 14)).unwrap();
    assert_eq!(pct, 50.0);
}

#[test]
fn test_percentage_weekly_distinct_weeks() {
    let start = day(2025, 6, 1);
    let h = habit(Cadence::Weekly, &[day(2025, 6, 1), day(2025, 6, 8)]);
    let pct = completion_percentage(&h, start, day(2025, 6, 14)).unwrap();
    assert_eq!(pct, 100.0);
}

#[test]
fn test_percentage_monotonic_and_bounded() {
    let start = day(2025, 6, 1);
    let end = day(2025, 6, 10);
    let mut h = habit(Cadence::Daily, &[]);
    let mut previous = 0.0;
    for offset in 0..10 {
        h.mark_completed(start + Duration::days(offset));
        let pct = completion_percentage(&h, start, end).unwrap();
        assert!(pct >= previous);
        assert!((0.0..=100.0).contains(&pct));
        previous = pct;
    }
    assert_eq!(previous, 100.0);
}

#[test]
fn test_recording_same_date_twice_is_idempotent() {
    let mut h = habit(Cadence::Daily, &[]);
    h.mark_completed(day(2025, 6, 1));
    h.mark_completed(day(2025, 6, 1));
    assert_eq!(h.completions.len(), 1);

    let pct = completion_percentage(&h, day(2025, 6, 1), day(2025, 6, 2)).unwrap();
    assert_eq!(pct, 50.0);
}
