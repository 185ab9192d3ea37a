//! # Habitust
//!
//! A terminal habit tracker written in Rust. Habitust combines a fast CLI for quick entry with a TUI (Terminal User Interface) for interactive management.
//!
//! ## Features
//!
//! *   **Streaks**: Every habit shows its current streak, counted in days or weeks depending on cadence. The count is forgiving: being one unit behind does not break the chain.
//! *   **Completion Percentage**: Ask for any date range and get the share of days (or weeks) the habit was actually done.
//! *   **Dual Interface**:
//!     *   **CLI**: Scriptable and quick for single commands.
//!     *   **TUI**: Interactive dashboard to manage habits visually.
//! *   **Accounts**: Multiple users share one database; each sees only their own habits.
//! *   **Data Persistence**: Habits are stored in standard XDG data directories (JSON format).
//!
//! ## Installation
//!
//! ```bash
//! cargo install --path .
//! ```
//!
//! ## Usage
//!
//! ### Accounts
//!
//! ```bash
//! habitust register "Alice" --email alice@example.com --password secret
//! habitust login alice@example.com --password secret
//! habitust logout
//! ```
//!
//! The login is remembered between invocations; all habit commands act as
//! the logged-in user.
//!
//! ### Interactive Mode (TUI)
//!
//! Simply run the command without arguments to launch the interactive UI:
//!
//! ```bash
//! habitust
//! # or explicitly
//! habitust ui
//! ```
//!
//! #### TUI Key Bindings
//!
//! **Global**
//! *   `q`: Quit
//!
//! **Habit View**
//! *   `a`: Add new habit
//! *   `Space`: Mark selected habit as done today
//! *   `m`: Mark done on a specific date
//! *   `n`: Edit title
//! *   `e`: Edit description
//! *   `c`: Edit cadence
//! *   `d`: Delete selected habit
//!
//! ### Command Line Interface (CLI)
//!
//! ```bash
//! # Create habits
//! habitust add "Morning run" --desc "5km before work" --cadence daily
//! habitust add "Weekly review" --cadence weekly
//!
//! # List habits with streak and 30-day completion rate
//! habitust list
//!
//! # Record completions (today, or an explicit date)
//! habitust done <ID>
//! habitust done <ID> --date 2025-11-03
//!
//! # Inspect progress
//! habitust history <ID>
//! habitust stats <ID> --from 2025-10-01 --to 2025-10-31
//! ```
//!
//! ## Data Storage
//!
//! Habits are saved in your local data directory:
//! *   Linux: `~/.local/share/habitust/habits.json`
//! *   macOS: `~/Library/Application Support/habitust/habits.json`
//! *   Windows: `%APPDATA%\habitust\habits.json`
//!
//! Users and the current session live in `users.json` and `session.json`
//! next to it. You can override the location by setting the `HABITS_DB`
//! environment variable.
//!
//! ## Streak Calculation
//!
//! The streak walks completions backward from today in cadence units (days
//! for daily habits, weeks for weekly ones). The most recent completion may
//! be up to one unit back and still count, and each older completion gets
//! the same one unit of slack relative to the chain counted so far.

pub mod commands;
pub mod errors;
pub mod models;
pub mod progress;
pub mod storage;
pub mod store;
pub mod tui;
