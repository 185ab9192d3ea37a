use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use std::io;

use habitust::commands::*;
use habitust::tui::run_tui;

#[derive(Parser)]
#[command(name = "habitust")]
#[command(about = "Simple terminal habit tracker", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Register a new user account
    Register {
        /// Display name (quoted if it has spaces)
        name: String,
        /// Email address, used to log in
        #[arg(short, long)]
        email: String,
        /// Password
        #[arg(short, long)]
        password: String,
    },
    /// Log in and remember the session
    Login {
        /// Email address
        email: String,
        /// Password
        #[arg(short, long)]
        password: String,
    },
    /// Log out of the current session
    Logout,
    /// Manage the logged-in account
    Account {
        #[command(subcommand)]
        command: AccountCommands,
    },
    /// Add a new habit
    Add {
        /// Habit title (quoted if it has spaces)
        title: String,
        /// Longer description
        #[arg(short, long)]
        desc: Option<String>,
        /// Cadence (daily, weekly)
        #[arg(short, long)]
        cadence: String,
    },
    /// List your habits with streaks
    List,
    /// Edit a habit
    Edit {
        id: String,
        /// New title
        #[arg(short, long)]
        title: Option<String>,
        /// New description
        #[arg(short, long)]
        desc: Option<String>,
        /// New cadence (daily, weekly)
        #[arg(short, long)]
        cadence: Option<String>,
    },
    /// Remove a habit
    Remove {
        id: String,
    },
    /// Mark a habit as completed
    Done {
        id: String,
        /// Completion date in YYYY-MM-DD (defaults to today)
        #[arg(short, long)]
        date: Option<String>,
    },
    /// Show the completion dates of a habit
    History {
        id: String,
    },
    /// Show completion percentage and streak for a habit
    Stats {
        id: String,
        /// Range start in YYYY-MM-DD
        #[arg(short, long)]
        from: String,
        /// Range end in YYYY-MM-DD
        #[arg(short, long)]
        to: String,
    },
    /// Reset the database (delete all users and habits)
    Reset {
        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },
    /// Generate shell completions
    Completions {
        /// Shell to generate completions for (bash, zsh, fish, powershell, elvish)
        shell: String,
    },
    /// Open interactive TUI
    Ui,
}

#[derive(Subcommand)]
enum AccountCommands {
    /// Update name, email or password
    Update {
        /// New display name
        #[arg(short, long)]
        name: Option<String>,
        /// New email address
        #[arg(short, long)]
        email: Option<String>,
        /// New password
        #[arg(short, long)]
        password: Option<String>,
    },
    /// Delete the account and all its habits
    Delete {
        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },
}

fn main() {
    let cli = Cli::parse();
    match cli.command {
        Some(Commands::Register { name, email, password }) => cmd_register(name, email, password, false),
        Some(Commands::Login { email, password }) => cmd_login(email, password, false),
        Some(Commands::Logout) => cmd_logout(false),
        Some(Commands::Account { command }) => match command {
            AccountCommands::Update { name, email, password } => cmd_account_update(name, email, password, false),
            AccountCommands::Delete { force } => cmd_account_delete(force, false),
        },
        Some(Commands::Add { title, desc, cadence }) => cmd_add(title, desc, cadence, false),
        Some(Commands::List) => cmd_list(),
        Some(Commands::Edit { id, title, desc, cadence }) => cmd_edit(id, title, desc, cadence, false),
        Some(Commands::Remove { id }) => cmd_remove(id, false),
        Some(Commands::Done { id, date }) => cmd_done(id, date, false),
        Some(Commands::History { id }) => cmd_history(id, false),
        Some(Commands::Stats { id, from, to }) => cmd_stats(id, from, to, false),
        Some(Commands::Reset { force }) => cmd_reset(force),
        Some(Commands::Completions { shell }) => {
            let shell_enum = match shell.as_str() {
                "bash" => Shell::Bash,
                "zsh" => Shell::Zsh,
                "fish" => Shell::Fish,
                "powershell" => Shell::PowerShell,
                "elvish" => Shell::Elvish,
                _ => {
                    eprintln!("Unsupported shell: {}", shell);
                    return;
                }
            };
            let mut cmd = Cli::command();
            generate(shell_enum, &mut cmd, "habitust", &mut io::stdout());
        }
        Some(Commands::Ui) | None => {
            if let Err(e) = run_tui() {
                eprintln!("Error running TUI: {}", e);
            }
        }
    }
}
