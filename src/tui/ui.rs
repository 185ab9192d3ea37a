use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table},
    Frame,
};
use super::app::{App, InputField, InputMode};

pub fn ui(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),    // Table
            Constraint::Length(3)  // Help
        ].as_ref())
        .split(f.area());

    let rows: Vec<Row> = app
        .rows
        .iter()
        .map(|r| {
            let last = r
                .habit
                .last_completed()
                .map(|d| d.to_string())
                .unwrap_or_else(|| "-".to_string());

            let style = if r.streak == 0 {
                Style::default().fg(Color::Red)
            } else if r.streak < 4 {
                Style::default().fg(Color::Yellow)
            } else {
                Style::default().fg(Color::Green)
            };

            Row::new(vec![
                Cell::from(r.habit.title.clone()),
                Cell::from(r.habit.description.clone()),
                Cell::from(r.habit.cadence.to_string()),
                Cell::from(r.habit.completions.len().to_string()),
                Cell::from(last),
                Cell::from(format!("{:.1}", r.recent)),
                Cell::from(r.streak.to_string()),
            ]).style(style)
        })
        .collect();

    let widths = [
        Constraint::Min(20),
        Constraint::Min(20),
        Constraint::Length(8),
        Constraint::Length(6),
        Constraint::Length(12),
        Constraint::Length(7),
        Constraint::Length(7),
    ];

    let title = format!("Habitust - {}'s habits", app.user.name);
    let table = Table::new(rows, widths)
        .header(Row::new(vec!["Title", "Description", "Cadence", "Done", "Last", "30d %", "Streak"])
            .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
            .bottom_margin(1))
        .block(Block::default().borders(Borders::ALL).title(title))
        .row_highlight_style(Style::default().add_modifier(Modifier::BOLD).bg(Color::DarkGray))
        .highlight_symbol(">> ");

    f.render_stateful_widget(table, chunks[0], &mut app.state);

    let help_text = match app.input_mode {
        InputMode::Normal => "q: Quit | a: Add | Space: Done Today | m: Done On Date | n: Title | e: Desc | c: Cadence | d: Del",
        InputMode::Editing => "Enter: Save | Esc: Cancel",
        InputMode::Adding => "Enter: Next Step | Esc: Cancel",
    };

    let help = Paragraph::new(help_text)
        .style(Style::default().fg(Color::Gray))
        .block(Block::default().borders(Borders::ALL));

    f.render_widget(help, chunks[1]);

    // Render Input Box if needed
    match app.input_mode {
        InputMode::Editing | InputMode::Adding => {
            let area = centered_rect(60, 3, f.area()); // Fixed height of 3 (border + 1 line)
            f.render_widget(Clear, area); // Clear the area first

            let title = match app.input_mode {
                InputMode::Adding => match app.add_state.step {
                    0 => "Add Habit: Enter Title",
                    1 => "Add Habit: Enter Description (Optional)",
                    2 => "Add Habit: Enter Cadence (daily/weekly, empty = daily)",
                    _ => "Add Habit",
                },
                InputMode::Editing => match app.input_field {
                    InputField::Title => "Edit Title",
                    InputField::Description => "Edit Description",
                    InputField::Cadence => "Edit Cadence (daily/weekly)",
                    InputField::DoneDate => "Mark Done On (YYYY-MM-DD)",
                    _ => "Edit",
                },
                _ => "",
            };

            let input = Paragraph::new(app.input_buffer.as_str())
                .style(Style::default().fg(Color::Yellow))
                .block(Block::default().borders(Borders::ALL).title(title));

            f.render_widget(input, area);
        }
        _ => {}
    }
}

fn centered_rect(percent_x: u16, height: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length((r.height - height) / 2),
            Constraint::Length(height),
            Constraint::Length((r.height - height) / 2),
        ].as_ref())
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ].as_ref())
        .split(popup_layout[1])[1]
}
