use chrono::{Duration, Local};
use ratatui::widgets::TableState;

use crate::commands::{cmd_add, cmd_done, cmd_edit, cmd_remove};
use crate::models::{Cadence, Habit, User};
use crate::progress::{completion_percentage, current_streak};
use crate::storage::load_habits;
use crate::store::{HabitStore, MemoryHabits};

#[derive(PartialEq)]
pub enum InputMode {
    Normal,
    Editing,
    Adding,
}

pub enum InputField {
    None,
    Title,
    Description,
    Cadence,
    DoneDate,
}

/// A habit together with its precomputed display stats.
pub struct HabitRow {
    pub habit: Habit,
    pub streak: u32,
    /// Completion percentage over the last 30 days.
    pub recent: f64,
}

pub struct App {
    pub user: User,
    pub rows: Vec<HabitRow>,
    pub state: TableState,
    pub input_mode: InputMode,
    pub input_field: InputField,
    pub input_buffer: String,
    pub target_id: Option<String>,
    // For adding habits, we need to store partial data
    pub add_state: AddState,
}

/// State for the multi-step "Add Habit" wizard.
#[derive(Default)]
pub struct AddState {
    pub title: String,
    pub description: String,
    pub step: usize, // 0: Title, 1: Description, 2: Cadence
}

impl App {
    /// Creates a new App instance for `user` and loads initial data.
    pub fn new(user: User) -> App {
        let mut app = App {
            user,
            rows: Vec::new(),
            state: TableState::default(),
            input_mode: InputMode::Normal,
            input_field: InputField::None,
            input_buffer: String::new(),
            target_id: None,
            add_state: AddState::default(),
        };
        app.reload();
        app
    }

    /// Reloads the user's habits from storage and refreshes the stats.
    ///
    /// Habits with the weakest streak sort first so they get attention.
    pub fn reload(&mut self) {
        let today = Local::now().date_naive();
        let month_ago = today - Duration::days(29);

        let habits = MemoryHabits::from_vec(load_habits());
        let mut rows: Vec<HabitRow> = habits
            .by_user(&self.user.id)
            .into_iter()
            .map(|h| {
                let streak = current_streak(&h, today);
                let recent = completion_percentage(&h, month_ago, today).unwrap_or(0.0);
                HabitRow { habit: h, streak, recent }
            })
            .collect();
        rows.sort_by(|a, b| {
            a.streak
                .cmp(&b.streak)
                .then_with(|| a.habit.title.cmp(&b.habit.title))
        });
        self.rows = rows;

        if self.rows.is_empty() {
            self.state.select(None);
        } else if let Some(i) = self.state.selected() {
            if i >= self.rows.len() {
                self.state.select(Some(self.rows.len() - 1));
            }
        } else {
            self.state.select(Some(0));
        }
    }

    /// Selects the next habit in the list.
    pub fn next(&mut self) {
        if self.rows.is_empty() {
            return;
        }
        let i = match self.state.selected() {
            Some(i) => {
                if i >= self.rows.len() - 1 {
                    0
                } else {
                    i + 1
                }
            }
            None => 0,
        };
        self.state.select(Some(i));
    }

    /// Selects the previous habit in the list.
    pub fn previous(&mut self) {
        if self.rows.is_empty() {
            return;
        }
        let i = match self.state.selected() {
            Some(i) => {
                if i == 0 {
                    self.rows.len() - 1
                } else {
                    i - 1
                }
            }
            None => 0,
        };
        self.state.select(Some(i));
    }

    fn selected_id(&self) -> Option<String> {
        self.state
            .selected()
            .and_then(|i| self.rows.get(i))
            .map(|row| row.habit.id.clone())
    }

    /// Marks the currently selected habit as done today.
    pub fn complete_selected(&mut self) {
        if let Some(id) = self.selected_id() {
            cmd_done(id, None, true);
            self.reload();
        }
    }

    /// Deletes the currently selected habit.
    pub fn delete_selected(&mut self) {
        if let Some(id) = self.selected_id() {
            cmd_remove(id, true);
            self.reload();
        }
    }

    /// Initiates the "Add Habit" wizard.
    pub fn start_add(&mut self) {
        self.input_mode = InputMode::Adding;
        self.add_state = AddState::default();
        self.input_buffer.clear();
    }

    /// Initiates editing of a specific field for the selected habit.
    pub fn start_edit(&mut self, field: InputField) {
        if let Some(i) = self.state.selected() {
            if let Some(row) = self.rows.get(i) {
                self.target_id = Some(row.habit.id.clone());
                self.input_mode = InputMode::Editing;
                self.input_buffer.clear();

                // Pre-fill buffer for editing
                match field {
                    InputField::Title => self.input_buffer = row.habit.title.clone(),
                    InputField::Description => self.input_buffer = row.habit.description.clone(),
                    InputField::Cadence => self.input_buffer = row.habit.cadence.to_string(),
                    InputField::DoneDate => self.input_buffer = String::new(),
                    InputField::None => {}
                }
                self.input_field = field;
            }
        }
    }

    /// Handles text input based on the current mode.
    pub fn handle_input(&mut self) {
        match self.input_mode {
            InputMode::Adding => self.handle_adding_input(),
            InputMode::Editing => self.handle_editing_input(),
            _ => {}
        }
    }

    /// Handles input for the "Add Habit" wizard.
    fn handle_adding_input(&mut self) {
        match self.add_state.step {
            0 => {
                // Title
                if !self.input_buffer.is_empty() {
                    self.add_state.title = self.input_buffer.clone();
                    self.add_state.step += 1;
                    self.input_buffer.clear();
                }
            }
            1 => {
                // Description (optional)
                self.add_state.description = self.input_buffer.clone();
                self.add_state.step += 1;
                self.input_buffer.clear();
            }
            2 => {
                // Cadence; empty input defaults to daily
                let cadence = if self.input_buffer.is_empty() {
                    "daily".to_string()
                } else if self.input_buffer.parse::<Cadence>().is_ok() {
                    self.input_buffer.clone()
                } else {
                    return;
                };
                cmd_add(
                    self.add_state.title.clone(),
                    Some(self.add_state.description.clone()),
                    cadence,
                    true,
                );
                self.input_mode = InputMode::Normal;
                self.input_buffer.clear();
                self.reload();
            }
            _ => {}
        }
    }

    /// Handles input for the "Edit Habit" mode.
    fn handle_editing_input(&mut self) {
        if let Some(id) = self.target_id.clone() {
            match self.input_field {
                InputField::Title => {
                    cmd_edit(id, Some(self.input_buffer.clone()), None, None, true)
                }
                InputField::Description => {
                    cmd_edit(id, None, Some(self.input_buffer.clone()), None, true)
                }
                InputField::Cadence => {
                    if self.input_buffer.parse::<Cadence>().is_ok() {
                        cmd_edit(id, None, None, Some(self.input_buffer.clone()), true);
                    }
                }
                InputField::DoneDate => {
                    cmd_done(id, Some(self.input_buffer.clone()), true);
                }
                InputField::None => {}
            }
            self.input_mode = InputMode::Normal;
            self.input_buffer.clear();
            self.reload();
        }
    }
}
