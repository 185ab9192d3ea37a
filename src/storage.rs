use std::fs::{self, OpenOptions};
use std::io::{Read, Write};
use std::path::PathBuf;

use crate::models::{Habit, User};

/// Returns the path to the habits database file (`habits.json`).
///
/// The path is determined in the following order:
/// 1. `HABITS_DB` environment variable.
/// 2. `~/.local/share/habitust/habits.json` (on Linux).
/// 3. `./habits.json` (fallback).
fn db_path() -> PathBuf {
    std::env::var("HABITS_DB").map(PathBuf::from).unwrap_or_else(|_| {
        let mut p = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
        p.push("habitust");
        if !p.exists() {
            let _ = fs::create_dir_all(&p);
        }
        p.push("habits.json");
        p
    })
}

/// Returns the path to the users database file (`users.json`).
///
/// Located in the same directory as the habits database.
fn users_path() -> PathBuf {
    let mut p = db_path();
    p.pop();
    p.push("users.json");
    p
}

/// Returns the path to the session file (`session.json`).
///
/// Holds the id of the currently logged-in user, so successive CLI
/// invocations act as that user.
fn session_path() -> PathBuf {
    let mut p = db_path();
    p.pop();
    p.push("session.json");
    p
}

/// Loads all habits from the storage file.
///
/// Returns an empty vector if the file does not exist or cannot be read.
pub fn load_habits() -> Vec<Habit> {
    let path = db_path();
    if !path.exists() {
        return Vec::new();
    }
    let mut f = match OpenOptions::new().read(true).open(&path) {
        Ok(f) => f,
        Err(_) => return Vec::new(),
    };
    let mut s = String::new();
    if f.read_to_string(&mut s).is_err() {
        return Vec::new();
    }
    serde_json::from_str(&s).unwrap_or_else(|_| Vec::new())
}

/// Saves the given list of habits to the storage file.
///
/// Overwrites the existing file.
pub fn save_habits(habits: &Vec<Habit>) -> std::io::Result<()> {
    let path = db_path();
    let s = serde_json::to_string_pretty(habits).unwrap();
    let mut f = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(&path)?;
    f.write_all(s.as_bytes())?;
    Ok(())
}

/// Loads all users from the storage file.
pub fn load_users() -> Vec<User> {
    let path = users_path();
    if !path.exists() {
        return Vec::new();
    }
    let mut f = match OpenOptions::new().read(true).open(&path) {
        Ok(f) => f,
        Err(_) => return Vec::new(),
    };
    let mut s = String::new();
    if f.read_to_string(&mut s).is_err() {
        return Vec::new();
    }
    serde_json::from_str(&s).unwrap_or_else(|_| Vec::new())
}

/// Saves the given list of users to the storage file.
pub fn save_users(users: &Vec<User>) -> std::io::Result<()> {
    let path = users_path();
    let s = serde_json::to_string_pretty(users).unwrap();
    let mut f = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(&path)?;
    f.write_all(s.as_bytes())?;
    Ok(())
}

/// Loads the id of the currently logged-in user, if any.
pub fn load_session() -> Option<String> {
    let path = session_path();
    if !path.exists() {
        return None;
    }
    let mut f = OpenOptions::new().read(true).open(&path).ok()?;
    let mut s = String::new();
    f.read_to_string(&mut s).ok()?;
    serde_json::from_str(&s).ok()
}

/// Saves the id of the currently logged-in user.
pub fn save_session(user_id: &str) -> std::io::Result<()> {
    let path = session_path();
    let s = serde_json::to_string(user_id).unwrap();
    let mut f = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(&path)?;
    f.write_all(s.as_bytes())?;
    Ok(())
}

/// Removes the session file, logging the current user out.
pub fn clear_session() -> std::io::Result<()> {
    let path = session_path();
    if path.exists() {
        fs::remove_file(path)?;
    }
    Ok(())
}

/// Deletes the habits, users and session database files.
pub fn delete_database() -> std::io::Result<()> {
    let h_path = db_path();
    if h_path.exists() {
        fs::remove_file(h_path)?;
    }
    let u_path = users_path();
    if u_path.exists() {
        fs::remove_file(u_path)?;
    }
    clear_session()
}
