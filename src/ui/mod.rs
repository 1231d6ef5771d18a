pub mod components;
pub mod register;
pub mod users;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::Style;
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::app::{ActiveScreen, AppState, ModalState};

pub fn render(f: &mut Frame, app: &mut AppState) {
    let root = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(5), Constraint::Length(1)].as_ref())
        .split(f.area());

    let tabs = match app.screen {
        ActiveScreen::Register => "[Register]  Users",
        ActiveScreen::Users => "Register  [Users]",
    };
    let header = Paragraph::new(format!(
        "userreg-manager  {tabs}  records:{}  — Tab: switch screen",
        app.listing.records.len()
    ))
    .block(
        Block::default()
            .title("userreg-manager")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(app.theme.border)),
    )
    .style(
        Style::default()
            .fg(app.theme.header_fg)
            .bg(app.theme.header_bg),
    );
    f.render_widget(header, root[0]);

    match app.screen {
        ActiveScreen::Register => register::render_register_form(f, root[1], app),
        ActiveScreen::Users => {
            let body = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Percentage(62), Constraint::Percentage(38)].as_ref())
                .split(root[1]);
            users::render_users_table(f, body[0], app);
            users::render_user_details(f, body[1], app);
        }
    }

    components::render_status_bar(f, root[2], app);

    if app.modal.is_some() {
        render_modal(f, f.area(), app);
    }
}

fn render_modal(f: &mut Frame, area: Rect, app: &mut AppState) {
    if let Some(state) = app.modal.clone() {
        match state {
            ModalState::Notice { .. } => components::render_notice_modal(f, area, app, &state),
            ModalState::DeleteConfirm { .. } => {
                components::render_delete_confirm_modal(f, area, app, &state);
            }
        }
    }
}
