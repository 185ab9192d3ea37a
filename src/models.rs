use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Represents a registered user of the tracker.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct User {
    /// Unique identifier for the user.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Email address; doubles as the login name.
    pub email: String,
    /// Password, stored as entered.
    pub password: String,
}

impl User {
    /// Creates a user with a freshly generated id.
    pub fn new(name: &str, email: &str, password: &str) -> User {
        User {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            email: email.to_string(),
            password: password.to_string(),
        }
    }
}

/// How often a habit is meant to be performed.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cadence {
    Daily,
    Weekly,
}

impl Cadence {
    /// Days between repetitions for this cadence.
    pub fn days_interval(&self) -> i64 {
        match self {
            Cadence::Daily => 1,
            Cadence::Weekly => 7,
        }
    }

    /// Unit name for streak output, e.g. "Current streak: 3 day(s)".
    pub fn unit_name(&self) -> &'static str {
        match self {
            Cadence::Daily => "day(s)",
            Cadence::Weekly => "week(s)",
        }
    }
}

impl std::fmt::Display for Cadence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Cadence::Daily => write!(f, "daily"),
            Cadence::Weekly => write!(f, "weekly"),
        }
    }
}

impl std::str::FromStr for Cadence {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "daily" => Ok(Cadence::Daily),
            "weekly" => Ok(Cadence::Weekly),
            other => Err(format!(
                "Unknown cadence '{}'. Supported: daily, weekly.",
                other
            )),
        }
    }
}

/// Represents a single tracked habit.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Habit {
    /// Unique identifier for the habit.
    pub id: String,
    /// Identifier of the owning user.
    pub user_id: String,
    /// Short title of the habit.
    pub title: String,
    /// Free-form description.
    pub description: String,
    /// How often the habit is meant to be performed.
    pub cadence: Cadence,
    /// Dates the habit was performed on. Never contains duplicates.
    #[serde(default)]
    pub completions: Vec<NaiveDate>,
}

impl Habit {
    /// Creates a habit with a freshly generated id and no completions.
    pub fn new(user_id: &str, title: &str, description: &str, cadence: Cadence) -> Habit {
        Habit {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            title: title.to_string(),
            description: description.to_string(),
            cadence,
            completions: Vec::new(),
        }
    }

    /// Records a completion on `date`.
    ///
    /// Recording the same date twice is a no-op, so the completion list
    /// stays duplicate-free.
    pub fn mark_completed(&mut self, date: NaiveDate) {
        if !self.completions.contains(&date) {
            self.completions.push(date);
        }
    }

    /// Most recent completion date, if any.
    pub fn last_completed(&self) -> Option<NaiveDate> {
        self.completions.iter().copied().max()
    }
}
