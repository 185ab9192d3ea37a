use chrono::NaiveDate;
use habitust::errors::{AccountError, HabitError};
use habitust::models::Cadence;
use habitust::store::{HabitStore, MemoryHabits, MemoryUsers, UserStore};

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn test_register_and_login() {
    let mut users = MemoryUsers::new();
    let user = users.register("Alice", "alice@example.com", "secret").unwrap();

    assert_eq!(users.login("alice@example.com", "secret"), Some(user.clone()));
    assert_eq!(users.login("alice@example.com", "wrong"), None);
    assert_eq!(users.login("bob@example.com", "secret"), None);
    assert_eq!(users.user(&user.id).map(|u| u.name.as_str()), Some("Alice"));
}

#[test]
fn test_register_duplicate_email() {
    let mut users = MemoryUsers::new();
    users.register("Alice", "alice@example.com", "secret").unwrap();
    assert_eq!(
        users.register("Other", "alice@example.com", "hunter2"),
        Err(AccountError::EmailTaken)
    );
}

#[test]
fn test_update_profile() {
    let mut users = MemoryUsers::new();
    let user = users.register("Alice", "alice@example.com", "secret").unwrap();

    let updated = users
        .update_profile(&user.id, "Alicia", "alicia@example.com", "newpass")
        .unwrap();
    assert_eq!(updated.name, "Alicia");
    assert_eq!(users.login("alicia@example.com", "newpass"), Some(updated));

    assert_eq!(
        users.update_profile("missing", "X", "x@example.com", "p"),
        Err(AccountError::NotFound)
    );
}

#[test]
fn test_delete_account() {
    let mut users = MemoryUsers::new();
    let user = users.register("Alice", "alice@example.com", "secret").unwrap();
    assert!(users.delete_account(&user.id));
    assert!(!users.delete_account(&user.id));
    assert!(users.user(&user.id).is_none());
}

#[test]
fn test_create_and_lookup_habit() {
    let mut habits = MemoryHabits::new();
    let habit = habits.create("user-1", "Run", "5km", Cadence::Daily);

    let found = habits.habit(&habit.id).unwrap();
    assert_eq!(found.title, "Run");
    assert_eq!(found.description, "5km");
    assert_eq!(found.cadence, Cadence::Daily);
    assert_eq!(found.user_id, "user-1");
    assert!(habits.habit("missing").is_none());
}

#[test]
fn test_update_habit() {
    let mut habits = MemoryHabits::new();
    let habit = habits.create("user-1", "Run", "", Cadence::Daily);

    let updated = habits
        .update(&habit.id, "Long run", "10km", Cadence::Weekly)
        .unwrap();
    assert_eq!(updated.title, "Long run");
    assert_eq!(updated.cadence, Cadence::Weekly);

    assert_eq!(
        habits.update("missing", "X", "", Cadence::Daily),
        Err(HabitError::NotFound)
    );
}

#[test]
fn test_delete_habit_updates_owner_index() {
    let mut habits = MemoryHabits::new();
    let first = habits.create("user-1", "Run", "", Cadence::Daily);
    habits.create("user-1", "Read", "", Cadence::Daily);

    assert!(habits.delete(&first.id));
    assert!(!habits.delete(&first.id));

    let remaining = habits.by_user("user-1");
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].title, "Read");
}

#[test]
fn test_by_user_filters_by_owner() {
    let mut habits = MemoryHabits::new();
    habits.create("user-1", "Run", "", Cadence::Daily);
    habits.create("user-2", "Read", "", Cadence::Weekly);

    let mine = habits.by_user("user-1");
    assert_eq!(mine.len(), 1);
    assert_eq!(mine[0].title, "Run");
    assert!(habits.by_user("user-3").is_empty());
    assert_eq!(habits.all().len(), 2);
}

#[test]
fn test_record_completion_is_idempotent() {
    let mut habits = MemoryHabits::new();
    let habit = habits.create("user-1", "Run", "", Cadence::Daily);
    let date = day(2025, 6, 1);

    habits.record_completion(&habit.id, date).unwrap();
    habits.record_completion(&habit.id, date).unwrap();

    assert_eq!(habits.completion_dates(&habit.id).unwrap(), vec![date]);
    assert_eq!(
        habits.record_completion("missing", date),
        Err(HabitError::NotFound)
    );
}

#[test]
fn test_progress_queries_report_not_found() {
    let habits = MemoryHabits::new();
    assert_eq!(
        habits.current_streak("missing", day(2025, 6, 1)),
        Err(HabitError::NotFound)
    );
    assert_eq!(
        habits.completion_percentage("missing", day(2025, 6, 1), day(2025, 6, 2)),
        Err(HabitError::NotFound)
    );
    assert_eq!(
        habits.completion_dates("missing"),
        Err(HabitError::NotFound)
    );
}

#[test]
fn test_invalid_range_takes_precedence_over_not_found() {
    let habits = MemoryHabits::new();
    assert_eq!(
        habits.completion_percentage("missing", day(2025, 6, 2), day(2025, 6, 1)),
        Err(HabitError::InvalidRange)
    );
}

#[test]
fn test_streak_through_store() {
    let mut habits = MemoryHabits::new();
    let habit = habits.create("user-1", "Run", "", Cadence::Daily);
    let today = day(2025, 6, 15);

    habits.record_completion(&habit.id, today).unwrap();
    habits
        .record_completion(&habit.id, day(2025, 6, 14))
        .unwrap();

    assert_eq!(habits.current_streak(&habit.id, today), Ok(2));
}

#[test]
fn test_delete_for_user_cascade() {
    let mut habits = MemoryHabits::new();
    habits.create("user-1", "Run", "", Cadence::Daily);
    habits.create("user-1", "Read", "", Cadence::Weekly);
    habits.create("user-2", "Write", "", Cadence::Daily);

    assert_eq!(habits.delete_for_user("user-1"), 2);
    assert_eq!(habits.delete_for_user("user-1"), 0);
    assert!(habits.by_user("user-1").is_empty());
    assert_eq!(habits.all().len(), 1);
}
