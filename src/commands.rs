use std::io::{self, Write};

use chrono::{Duration, Local, NaiveDate};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, Color, ContentArrangement, Table};

use crate::models::{Cadence, Habit, User};
use crate::progress::{completion_percentage, current_streak};
use crate::storage::{
    clear_session, delete_database, load_habits, load_session, load_users, save_habits,
    save_session, save_users,
};
use crate::store::{HabitStore, MemoryHabits, MemoryUsers, UserStore};

/// Parses a `YYYY-MM-DD` date argument, reporting a failure on stderr.
fn parse_date(input: &str, what: &str, silent: bool) -> Option<NaiveDate> {
    match NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        Ok(d) => Some(d),
        Err(e) => {
            if !silent {
                eprintln!("Invalid {} '{}': {}. Use YYYY-MM-DD.", what, input, e);
            }
            None
        }
    }
}

/// Parses a cadence argument, reporting a failure on stderr.
fn parse_cadence(input: &str, silent: bool) -> Option<Cadence> {
    match input.parse::<Cadence>() {
        Ok(c) => Some(c),
        Err(e) => {
            if !silent {
                eprintln!("{}", e);
            }
            None
        }
    }
}

/// Resolves the logged-in user from the session file.
///
/// A stale session (pointing at a deleted account) counts as logged out.
fn session_user(users: &MemoryUsers, silent: bool) -> Option<User> {
    let user = load_session().and_then(|id| users.user(&id).cloned());
    if user.is_none() && !silent {
        eprintln!("Not logged in. Use `habitust login` first.");
    }
    user
}

/// Looks up a habit and verifies it belongs to `user`.
fn owned_habit(habits: &MemoryHabits, habit_id: &str, user: &User, silent: bool) -> Option<Habit> {
    match habits.habit(habit_id) {
        Some(h) if h.user_id == user.id => Some(h.clone()),
        _ => {
            if !silent {
                eprintln!("Habit {} not found or not owned by you.", habit_id);
            }
            None
        }
    }
}

/// Registers a new user account.
pub fn cmd_register(name: String, email: String, password: String, silent: bool) {
    let mut users = MemoryUsers::from_vec(load_users());
    match users.register(&name, &email, &password) {
        Ok(user) => {
            if let Err(e) = save_users(&users.to_vec()) {
                if !silent { eprintln!("Failed to save users: {}", e); }
            } else {
                if !silent { println!("Created user '{}'. Log in with `habitust login`.", user.name); }
            }
        }
        Err(e) => {
            if !silent { eprintln!("Error: {}", e); }
        }
    }
}

/// Logs a user in and persists the session.
pub fn cmd_login(email: String, password: String, silent: bool) {
    let users = MemoryUsers::from_vec(load_users());
    match users.login(&email, &password) {
        Some(user) => {
            if let Err(e) = save_session(&user.id) {
                if !silent { eprintln!("Failed to save session: {}", e); }
            } else {
                if !silent { println!("Logged in as {}.", user.name); }
            }
        }
        None => {
            if !silent { eprintln!("Invalid email or password."); }
        }
    }
}

/// Clears the current session.
pub fn cmd_logout(silent: bool) {
    if let Err(e) = clear_session() {
        if !silent { eprintln!("Failed to clear session: {}", e); }
    } else {
        if !silent { println!("Logged out."); }
    }
}

/// Updates the logged-in user's profile. Omitted fields keep their value.
pub fn cmd_account_update(
    name: Option<String>,
    email: Option<String>,
    password: Option<String>,
    silent: bool,
) {
    let mut users = MemoryUsers::from_vec(load_users());
    let current = match session_user(&users, silent) {
        Some(u) => u,
        None => return,
    };

    let name = name.unwrap_or(current.name);
    let email = email.unwrap_or(current.email);
    let password = password.unwrap_or(current.password);

    match users.update_profile(&current.id, &name, &email, &password) {
        Ok(user) => {
            if let Err(e) = save_users(&users.to_vec()) {
                if !silent { eprintln!("Failed to save users: {}", e); }
            } else {
                if !silent { println!("Profile updated for {}.", user.name); }
            }
        }
        Err(e) => {
            if !silent { eprintln!("Error: {}", e); }
        }
    }
}

/// Deletes the logged-in user's account together with all of their habits.
pub fn cmd_account_delete(force: bool, silent: bool) {
    let mut users = MemoryUsers::from_vec(load_users());
    let current = match session_user(&users, silent) {
        Some(u) => u,
        None => return,
    };

    if !force {
        print!("Are you sure you want to delete your account and all its habits? [y/N] ");
        io::stdout().flush().unwrap();
        let mut input = String::new();
        io::stdin().read_line(&mut input).unwrap();
        if input.trim().to_lowercase() != "y" {
            println!("Aborted.");
            return;
        }
    }

    let mut habits = MemoryHabits::from_vec(load_habits());
    let dropped = habits.delete_for_user(&current.id);

    if !users.delete_account(&current.id) {
        if !silent { eprintln!("Failed to delete account."); }
        return;
    }

    if let Err(e) = save_users(&users.to_vec()).and(save_habits(&habits.to_vec())) {
        if !silent { eprintln!("Failed to save database: {}", e); }
        return;
    }
    let _ = clear_session();
    if !silent {
        println!("Account deleted ({} habit(s) removed).", dropped);
    }
}

/// Creates a new habit for the logged-in user.
pub fn cmd_add(title: String, description: Option<String>, cadence: String, silent: bool) {
    let users = MemoryUsers::from_vec(load_users());
    let user = match session_user(&users, silent) {
        Some(u) => u,
        None => return,
    };
    let cadence = match parse_cadence(&cadence, silent) {
        Some(c) => c,
        None => return,
    };

    let mut habits = MemoryHabits::from_vec(load_habits());
    let habit = habits.create(&user.id, &title, &description.unwrap_or_default(), cadence);
    if let Err(e) = save_habits(&habits.to_vec()) {
        if !silent { eprintln!("Failed to save habits: {}", e); }
    } else {
        if !silent { println!("Habit added (id = {})", habit.id); }
    }
}

/// Lists the logged-in user's habits in a formatted table.
///
/// Shows the completion count, last completion, the completion percentage
/// over the last 30 days, and the current streak per habit.
pub fn cmd_list() {
    let users = MemoryUsers::from_vec(load_users());
    let user = match session_user(&users, false) {
        Some(u) => u,
        None => return,
    };

    let habits = MemoryHabits::from_vec(load_habits());
    let owned = habits.by_user(&user.id);
    if owned.is_empty() {
        println!("No habits found.");
        return;
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("ID").add_attribute(Attribute::Bold),
            Cell::new("Title").add_attribute(Attribute::Bold),
            Cell::new("Cadence").add_attribute(Attribute::Bold),
            Cell::new("Done").add_attribute(Attribute::Bold),
            Cell::new("Last").add_attribute(Attribute::Bold),
            Cell::new("30d %").add_attribute(Attribute::Bold),
            Cell::new("Streak").add_attribute(Attribute::Bold),
        ]);

    let today = Local::now().date_naive();
    let month_ago = today - Duration::days(29);

    for h in owned {
        let streak = current_streak(&h, today);
        let recent = completion_percentage(&h, month_ago, today).unwrap_or(0.0);
        let last = h
            .last_completed()
            .map(|d| d.to_string())
            .unwrap_or_else(|| "-".to_string());

        let streak_color = if streak == 0 {
            Color::Red
        } else if streak < 4 {
            Color::Yellow
        } else {
            Color::Green
        };

        table.add_row(vec![
            Cell::new(&h.id),
            Cell::new(&h.title),
            Cell::new(h.cadence),
            Cell::new(h.completions.len()),
            Cell::new(last),
            Cell::new(format!("{:.1}", recent)),
            Cell::new(streak).fg(streak_color),
        ]);
    }

    println!("{table}");
}

/// Edits an existing habit's details. Omitted fields keep their value.
pub fn cmd_edit(
    id: String,
    title: Option<String>,
    description: Option<String>,
    cadence: Option<String>,
    silent: bool,
) {
    let users = MemoryUsers::from_vec(load_users());
    let user = match session_user(&users, silent) {
        Some(u) => u,
        None => return,
    };

    let mut habits = MemoryHabits::from_vec(load_habits());
    let habit = match owned_habit(&habits, &id, &user, silent) {
        Some(h) => h,
        None => return,
    };

    let cadence = match cadence {
        Some(c) => match parse_cadence(&c, silent) {
            Some(c) => c,
            None => return,
        },
        None => habit.cadence,
    };
    let title = title.unwrap_or(habit.title);
    let description = description.unwrap_or(habit.description);

    match habits.update(&id, &title, &description, cadence) {
        Ok(_) => {
            if let Err(e) = save_habits(&habits.to_vec()) {
                if !silent { eprintln!("Failed to save habits: {}", e); }
            } else {
                if !silent { println!("Habit {} updated.", id); }
            }
        }
        Err(e) => {
            if !silent { eprintln!("Error: {}", e); }
        }
    }
}

/// Removes a habit owned by the logged-in user.
pub fn cmd_remove(id: String, silent: bool) {
    let users = MemoryUsers::from_vec(load_users());
    let user = match session_user(&users, silent) {
        Some(u) => u,
        None => return,
    };

    let mut habits = MemoryHabits::from_vec(load_habits());
    if owned_habit(&habits, &id, &user, silent).is_none() {
        return;
    }
    if !habits.delete(&id) {
        if !silent { eprintln!("Habit {} not found.", id); }
        return;
    }
    if let Err(e) = save_habits(&habits.to_vec()) {
        if !silent { eprintln!("Failed to save habits: {}", e); }
    } else {
        if !silent { println!("Habit {} removed.", id); }
    }
}

/// Marks a habit as completed on the given date (today by default).
///
/// Marking the same date twice is a no-op.
pub fn cmd_done(id: String, date: Option<String>, silent: bool) {
    let users = MemoryUsers::from_vec(load_users());
    let user = match session_user(&users, silent) {
        Some(u) => u,
        None => return,
    };

    let date = match date {
        Some(d) => match parse_date(&d, "date", silent) {
            Some(d) => d,
            None => return,
        },
        None => Local::now().date_naive(),
    };

    let mut habits = MemoryHabits::from_vec(load_habits());
    let habit = match owned_habit(&habits, &id, &user, silent) {
        Some(h) => h,
        None => return,
    };

    match habits.record_completion(&id, date) {
        Ok(()) => {
            if let Err(e) = save_habits(&habits.to_vec()) {
                if !silent { eprintln!("Failed to save habits: {}", e); }
            } else {
                if !silent { println!("Habit '{}' marked as completed on {}.", habit.title, date); }
            }
        }
        Err(e) => {
            if !silent { eprintln!("Error: {}", e); }
        }
    }
}

/// Prints the completion dates of a habit, oldest first.
pub fn cmd_history(id: String, silent: bool) {
    let users = MemoryUsers::from_vec(load_users());
    let user = match session_user(&users, silent) {
        Some(u) => u,
        None => return,
    };

    let habits = MemoryHabits::from_vec(load_habits());
    let habit = match owned_habit(&habits, &id, &user, silent) {
        Some(h) => h,
        None => return,
    };

    if habit.completions.is_empty() {
        if !silent { println!("No completions recorded for '{}'.", habit.title); }
        return;
    }

    let mut dates = habit.completions.clone();
    dates.sort();
    if !silent {
        println!("Completions for '{}':", habit.title);
        for date in dates {
            println!("  {}", date);
        }
    }
}

/// Prints the completion percentage over a date range plus the current
/// streak for a habit.
pub fn cmd_stats(id: String, from: String, to: String, silent: bool) {
    let users = MemoryUsers::from_vec(load_users());
    let user = match session_user(&users, silent) {
        Some(u) => u,
        None => return,
    };

    let start = match parse_date(&from, "start date", silent) {
        Some(d) => d,
        None => return,
    };
    let end = match parse_date(&to, "end date", silent) {
        Some(d) => d,
        None => return,
    };

    let habits = MemoryHabits::from_vec(load_habits());
    let habit = match owned_habit(&habits, &id, &user, silent) {
        Some(h) => h,
        None => return,
    };

    let today = Local::now().date_naive();
    match habits.completion_percentage(&id, start, end) {
        Ok(percentage) => {
            let streak = habits.current_streak(&id, today).unwrap_or(0);
            if !silent {
                println!("Completion for {} - {}: {:.2}%", start, end, percentage);
                println!("Current streak: {} {}", streak, habit.cadence.unit_name());
            }
        }
        Err(e) => {
            if !silent { eprintln!("Error: {}", e); }
        }
    }
}

/// Resets the database by deleting all users, habits and the session.
pub fn cmd_reset(force: bool) {
    if !force {
        print!("Are you sure you want to delete all users and habits? This cannot be undone. [y/N] ");
        io::stdout().flush().unwrap();
        let mut input = String::new();
        io::stdin().read_line(&mut input).unwrap();
        if input.trim().to_lowercase() != "y" {
            println!("Aborted.");
            return;
        }
    }

    if let Err(e) = delete_database() {
        eprintln!("Failed to reset database: {}", e);
    } else {
        println!("Database reset successfully.");
    }
}
