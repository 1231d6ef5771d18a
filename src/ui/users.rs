//! Listing screen rendering: the mirror table with loading, failure and
//! empty indicators, in-row editing, and a details pane.

use ratatui::Frame;
use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table, Wrap};

use crate::app::{AppState, LoadState};
use crate::form::Field;

const COLUMNS: [Field; 5] = Field::ALL;

pub fn render_users_table(f: &mut Frame, area: Rect, app: &mut AppState) {
    let block = Block::default()
        .title("👥 Registered Users")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.border));

    let message = match app.listing.load_state {
        LoadState::Idle | LoadState::Pending => Some("⏳ Loading users..."),
        LoadState::Failed => Some("Could not load users. Press r to retry."),
        LoadState::Loaded if app.listing.records.is_empty() => {
            Some("📭 No users registered yet")
        }
        LoadState::Loaded => None,
    };
    if let Some(message) = message {
        let p = Paragraph::new(message)
            .style(Style::default().fg(app.theme.text))
            .block(block);
        f.render_widget(p, area);
        return;
    }

    let body_height = area.height.saturating_sub(3) as usize;
    if body_height > 0 {
        app.rows_per_page = body_height;
    }

    let start = (app.listing.selected / app.rows_per_page) * app.rows_per_page;
    let end = (start + app.rows_per_page).min(app.listing.records.len());
    let slice = &app.listing.records[start..end];

    let rows = slice.iter().enumerate().map(|(i, record)| {
        let absolute_index = start + i;
        let editing = app
            .listing
            .editing
            .as_ref()
            .filter(|edit| edit.id == record.id);
        let style = if editing.is_some() {
            Style::default()
                .fg(app.theme.title)
                .add_modifier(Modifier::BOLD)
        } else if absolute_index == app.listing.selected {
            Style::default()
                .fg(app.theme.highlight_fg)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(app.theme.text)
        };
        let cells = COLUMNS.iter().map(|&column| {
            // The row under edit shows its draft buffer, not the mirror.
            let text = match editing {
                Some(edit) => {
                    let value = edit.draft.field(column);
                    if edit.focus == column {
                        format!("▶{value}")
                    } else {
                        value.to_string()
                    }
                }
                None => display_value(field_of(&record.fields, column)),
            };
            Cell::from(text)
        });
        Row::new(cells.collect::<Vec<_>>()).style(style)
    });

    let widths = [
        Constraint::Percentage(20),
        Constraint::Percentage(25),
        Constraint::Percentage(15),
        Constraint::Percentage(25),
        Constraint::Percentage(15),
    ];
    let header = Row::new(vec!["Name", "Email", "Phone", "Address", "Profession"]).style(
        Style::default()
            .fg(app.theme.title)
            .add_modifier(Modifier::BOLD),
    );

    let table = Table::new(rows.collect::<Vec<_>>(), widths)
        .header(header)
        .block(block)
        .column_spacing(1);

    f.render_widget(table, area);
}

fn field_of(fields: &crate::store::UserFields, column: Field) -> &str {
    match column {
        Field::FullName => &fields.full_name,
        Field::Email => &fields.email,
        Field::Phone => &fields.phone,
        Field::Address => &fields.address,
        Field::Profession => &fields.profession,
    }
}

fn display_value(value: &str) -> String {
    if value.is_empty() {
        "N/A".to_string()
    } else {
        value.to_string()
    }
}

pub fn render_user_details(f: &mut Frame, area: Rect, app: &AppState) {
    let text = match app.selected_record() {
        Some(record) => {
            let registered = record
                .created_at
                .map(|t| t.format("%Y-%m-%d %H:%M UTC").to_string())
                .unwrap_or_else(|| "unknown".to_string());
            format!(
                "Name: {}\nEmail: {}\nPhone: {}\nAddress: {}\nProfession: {}\nRegistered: {registered}",
                record.fields.full_name,
                record.fields.email,
                record.fields.phone,
                record.fields.address,
                display_value(&record.fields.profession),
            )
        }
        None => String::new(),
    };
    let p = Paragraph::new(text)
        .wrap(Wrap { trim: false })
        .style(Style::default().fg(app.theme.text))
        .block(
            Block::default()
                .title("Details")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(app.theme.border)),
        );
    f.render_widget(p, area);
}
