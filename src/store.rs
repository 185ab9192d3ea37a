use std::collections::HashMap;

use chrono::NaiveDate;

use crate::errors::{AccountError, HabitError};
use crate::models::{Cadence, Habit, User};
use crate::progress;

/// CRUD interface for user records.
pub trait UserStore {
    /// Registers a new user. Fails with `EmailTaken` if the email is in use.
    fn register(&mut self, name: &str, email: &str, password: &str)
        -> Result<User, AccountError>;

    /// Checks credentials and returns the matching user, if any.
    fn login(&self, email: &str, password: &str) -> Option<User>;

    /// Looks up a user by id.
    fn user(&self, user_id: &str) -> Option<&User>;

    /// Replaces name, email and password of an existing user.
    fn update_profile(
        &mut self,
        user_id: &str,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<User, AccountError>;

    /// Removes a user. Returns `false` when the id is unknown.
    fn delete_account(&mut self, user_id: &str) -> bool;
}

/// CRUD and progress interface for habit records.
pub trait HabitStore {
    /// Creates a habit owned by `user_id` and returns it.
    fn create(&mut self, user_id: &str, title: &str, description: &str, cadence: Cadence)
        -> Habit;

    /// Looks up a habit by id.
    fn habit(&self, habit_id: &str) -> Option<&Habit>;

    /// Replaces title, description and cadence of an existing habit.
    fn update(
        &mut self,
        habit_id: &str,
        title: &str,
        description: &str,
        cadence: Cadence,
    ) -> Result<Habit, HabitError>;

    /// Removes a habit. Returns `false` when the id is unknown.
    fn delete(&mut self, habit_id: &str) -> bool;

    /// All habits owned by `user_id`, in creation order.
    fn by_user(&self, user_id: &str) -> Vec<Habit>;

    /// All habits in the store.
    fn all(&self) -> Vec<Habit>;

    /// Dates a habit was completed on.
    fn completion_dates(&self, habit_id: &str) -> Result<Vec<NaiveDate>, HabitError>;

    /// Records a completion. Recording the same date twice is a no-op.
    fn record_completion(&mut self, habit_id: &str, date: NaiveDate) -> Result<(), HabitError>;

    /// Current streak in cadence units, counted back from `today`.
    fn current_streak(&self, habit_id: &str, today: NaiveDate) -> Result<u32, HabitError>;

    /// Completion percentage over the inclusive range `[start, end]`.
    fn completion_percentage(
        &self,
        habit_id: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<f64, HabitError>;
}

/// Id-keyed in-memory user store.
#[derive(Debug, Default)]
pub struct MemoryUsers {
    users: HashMap<String, User>,
}

impl MemoryUsers {
    pub fn new() -> MemoryUsers {
        MemoryUsers::default()
    }

    /// Rebuilds the store from a flat list, e.g. one loaded from disk.
    pub fn from_vec(users: Vec<User>) -> MemoryUsers {
        MemoryUsers {
            users: users.into_iter().map(|u| (u.id.clone(), u)).collect(),
        }
    }

    /// Flattens the store for serialization, ordered by id so saved files
    /// stay stable across runs.
    pub fn to_vec(&self) -> Vec<User> {
        let mut users: Vec<User> = self.users.values().cloned().collect();
        users.sort_by(|a, b| a.id.cmp(&b.id));
        users
    }
}

impl UserStore for MemoryUsers {
    fn register(
        &mut self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<User, AccountError> {
        if self.users.values().any(|u| u.email == email) {
            return Err(AccountError::EmailTaken);
        }
        let user = User::new(name, email, password);
        self.users.insert(user.id.clone(), user.clone());
        Ok(user)
    }

    fn login(&self, email: &str, password: &str) -> Option<User> {
        self.users
            .values()
            .find(|u| u.email == email && u.password == password)
            .cloned()
    }

    fn user(&self, user_id: &str) -> Option<&User> {
        self.users.get(user_id)
    }

    fn update_profile(
        &mut self,
        user_id: &str,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<User, AccountError> {
        let user = self.users.get_mut(user_id).ok_or(AccountError::NotFound)?;
        user.name = name.to_string();
        user.email = email.to_string();
        user.password = password.to_string();
        Ok(user.clone())
    }

    fn delete_account(&mut self, user_id: &str) -> bool {
        self.users.remove(user_id).is_some()
    }
}

/// Id-keyed in-memory habit store with a per-owner index.
#[derive(Debug, Default)]
pub struct MemoryHabits {
    habits: HashMap<String, Habit>,
    by_owner: HashMap<String, Vec<String>>,
}

impl MemoryHabits {
    pub fn new() -> MemoryHabits {
        MemoryHabits::default()
    }

    /// Rebuilds the store and its owner index from a flat list.
    pub fn from_vec(habits: Vec<Habit>) -> MemoryHabits {
        let mut store = MemoryHabits::default();
        for habit in habits {
            store
                .by_owner
                .entry(habit.user_id.clone())
                .or_default()
                .push(habit.id.clone());
            store.habits.insert(habit.id.clone(), habit);
        }
        store
    }

    /// Flattens the store for serialization, ordered by id so saved files
    /// stay stable across runs.
    pub fn to_vec(&self) -> Vec<Habit> {
        let mut habits: Vec<Habit> = self.habits.values().cloned().collect();
        habits.sort_by(|a, b| a.id.cmp(&b.id));
        habits
    }

    /// Removes every habit owned by `user_id`, returning how many were
    /// dropped. Used when an account is deleted.
    pub fn delete_for_user(&mut self, user_id: &str) -> usize {
        let ids = self.by_owner.remove(user_id).unwrap_or_default();
        for id in &ids {
            self.habits.remove(id);
        }
        ids.len()
    }
}

impl HabitStore for MemoryHabits {
    fn create(
        &mut self,
        user_id: &str,
        title: &str,
        description: &str,
        cadence: Cadence,
    ) -> Habit {
        let habit = Habit::new(user_id, title, description, cadence);
        self.by_owner
            .entry(user_id.to_string())
            .or_default()
            .push(habit.id.clone());
        self.habits.insert(habit.id.clone(), habit.clone());
        habit
    }

    fn habit(&self, habit_id: &str) -> Option<&Habit> {
        self.habits.get(habit_id)
    }

    fn update(
        &mut self,
        habit_id: &str,
        title: &str,
        description: &str,
        cadence: Cadence,
    ) -> Result<Habit, HabitError> {
        let habit = self.habits.get_mut(habit_id).ok_or(HabitError::NotFound)?;
        habit.title = title.to_string();
        habit.description = description.to_string();
        habit.cadence = cadence;
        Ok(habit.clone())
    }

    fn delete(&mut self, habit_id: &str) -> bool {
        match self.habits.remove(habit_id) {
            Some(removed) => {
                if let Some(ids) = self.by_owner.get_mut(&removed.user_id) {
                    ids.retain(|id| id != habit_id);
                    if ids.is_empty() {
                        self.by_owner.remove(&removed.user_id);
                    }
                }
                true
            }
            None => false,
        }
    }

    fn by_user(&self, user_id: &str) -> Vec<Habit> {
        match self.by_owner.get(user_id) {
            Some(ids) => ids
                .iter()
                .filter_map(|id| self.habits.get(id).cloned())
                .collect(),
            None => Vec::new(),
        }
    }

    fn all(&self) -> Vec<Habit> {
        self.to_vec()
    }

    fn completion_dates(&self, habit_id: &str) -> Result<Vec<NaiveDate>, HabitError> {
        let habit = self.habit(habit_id).ok_or(HabitError::NotFound)?;
        Ok(habit.completions.clone())
    }

    fn record_completion(&mut self, habit_id: &str, date: NaiveDate) -> Result<(), HabitError> {
        let habit = self.habits.get_mut(habit_id).ok_or(HabitError::NotFound)?;
        habit.mark_completed(date);
        Ok(())
    }

    fn current_streak(&self, habit_id: &str, today: NaiveDate) -> Result<u32, HabitError> {
        let habit = self.habit(habit_id).ok_or(HabitError::NotFound)?;
        Ok(progress::current_streak(habit, today))
    }

    fn completion_percentage(
        &self,
        habit_id: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<f64, HabitError> {
        // Range check first: a bad range is rejected for any habit state.
        if start > end {
            return Err(HabitError::InvalidRange);
        }
        let habit = self.habit(habit_id).ok_or(HabitError::NotFound)?;
        progress::completion_percentage(habit, start, end)
    }
}
