//! Shared UI components (status bar, modal dialogs).

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use crate::app::{ActiveScreen, AppState, InputMode, ModalState};

/// Render the bottom status bar with the mode, counts and key hints.
pub fn render_status_bar(f: &mut Frame, area: Rect, app: &AppState) {
    let mode = match app.input_mode {
        InputMode::Normal => "NORMAL",
        InputMode::EditRow => {
            if app.listing.editing.as_ref().is_some_and(|e| e.saving) {
                "SAVING"
            } else {
                "EDIT"
            }
        }
        InputMode::Modal => "MODAL",
    };
    let hints = match (app.screen, app.input_mode) {
        (_, InputMode::Modal) => "Enter/Esc: close",
        (_, InputMode::EditRow) => "←/→: column  type: edit  Enter: save  Esc: cancel",
        (ActiveScreen::Register, _) => "↑/↓: field  type: edit  Enter: register  Tab: users  Esc: quit",
        (ActiveScreen::Users, _) => "j/k: select  e: edit  d: delete  r: reload  Tab: form  q: quit",
    };
    let msg = format!(
        "mode: {mode}  users:{}  {hints}",
        app.listing.records.len()
    );
    let p = Paragraph::new(msg).style(
        Style::default()
            .fg(app.theme.status_fg)
            .bg(app.theme.status_bg),
    );
    f.render_widget(p, area);
}

/// Compute a rectangle centered within `area` with a maximum size.
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect {
        x,
        y,
        width: width.min(area.width),
        height: height.min(area.height),
    }
}

/// Render the success/failure notice for a completed operation.
pub fn render_notice_modal(f: &mut Frame, area: Rect, app: &AppState, state: &ModalState) {
    if let ModalState::Notice { message } = state {
        let max_w = area.width.saturating_sub(6).max(30);
        let width = 44u16.min(max_w);
        let approx_lines = (message.chars().count() as u16 / width.saturating_sub(4).max(10)).max(1);
        let max_h = area.height.saturating_sub(6).max(5);
        let height = (approx_lines + 4).min(max_h).max(5);
        let rect = centered_rect(width, height, area);

        let accent = if message.starts_with('✓') {
            app.theme.success
        } else {
            app.theme.error
        };
        let p = Paragraph::new(message.clone())
            .wrap(Wrap { trim: false })
            .style(Style::default().fg(app.theme.text))
            .block(
                Block::default()
                    .title("Info")
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(accent)),
            );
        f.render_widget(Clear, rect);
        f.render_widget(p, rect);
    }
}

/// Render the yes/no confirmation shown before a delete.
pub fn render_delete_confirm_modal(f: &mut Frame, area: Rect, app: &AppState, state: &ModalState) {
    if let ModalState::DeleteConfirm { selected } = state {
        let rect = centered_rect(52, 8, area);
        let (name, email) = match app.selected_record() {
            Some(record) => (record.fields.full_name.clone(), record.fields.email.clone()),
            None => (String::new(), String::new()),
        };
        let yes = if *selected == 0 { "[Yes]" } else { " Yes " };
        let no = if *selected == 1 { "[No]" } else { " No  " };
        let body = format!(
            "Are you sure you want to delete this user?\n\n  {name} <{email}>\n\n    {yes}    {no}"
        );
        let p = Paragraph::new(body)
            .wrap(Wrap { trim: false })
            .style(Style::default().fg(app.theme.text))
            .block(
                Block::default()
                    .title("Confirm delete")
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(app.theme.error)),
            );
        f.render_widget(Clear, rect);
        f.render_widget(p, rect);
    }
}
