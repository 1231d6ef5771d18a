//! Event loop and state transitions.
//!
//! Every remote operation lives here as a function that runs the store
//! call and applies its local side effects on the success path only. A
//! failed call leaves the mirror and drafts exactly as they were and
//! raises an error notice instead.

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use std::time::Duration;

use crate::app::{ActiveScreen, AppState, InputMode, ListingState, LoadState, ModalState, RowEdit};
use crate::form::{self, Field, UserDraft};
use crate::ui;

pub fn run_app(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    app: &mut AppState,
) -> Result<()> {
    loop {
        terminal.draw(|f| {
            ui::render(f, app);
        })?;

        if event::poll(Duration::from_millis(100))?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
            && handle_key(app, key)
        {
            break;
        }
    }

    Ok(())
}

/// Dispatch one key press. Returns `true` when the application should
/// exit.
pub fn handle_key(app: &mut AppState, key: KeyEvent) -> bool {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return true;
    }
    match app.input_mode {
        InputMode::Modal => {
            handle_modal_key(app, key.code);
            false
        }
        InputMode::EditRow => {
            handle_edit_key(app, key.code);
            false
        }
        InputMode::Normal => match app.screen {
            ActiveScreen::Register => handle_register_key(app, key.code),
            ActiveScreen::Users => handle_users_key(app, key.code),
        },
    }
}

fn handle_register_key(app: &mut AppState, code: KeyCode) -> bool {
    match code {
        KeyCode::Esc => return true,
        KeyCode::Tab => activate_users_screen(app),
        KeyCode::Up => app.register.focus = app.register.focus.prev(),
        KeyCode::Down => app.register.focus = app.register.focus.next(),
        KeyCode::Enter => {
            // The flag gates re-entry, not the key itself.
            if !app.register.submitting {
                submit_registration(app);
            }
        }
        KeyCode::Backspace => {
            let focus = app.register.focus;
            app.register.draft.field_mut(focus).pop();
            app.register.errors.clear(focus);
        }
        KeyCode::Char(c) => {
            let focus = app.register.focus;
            app.register.draft.field_mut(focus).push(c);
            app.register.errors.clear(focus);
        }
        _ => {}
    }
    false
}

fn handle_users_key(app: &mut AppState, code: KeyCode) -> bool {
    let len = app.listing.records.len();
    match code {
        KeyCode::Char('q') => return true,
        KeyCode::Tab => activate_register_screen(app),
        KeyCode::Up | KeyCode::Char('k') => {
            if app.listing.selected > 0 {
                app.listing.selected -= 1;
            }
        }
        KeyCode::Down | KeyCode::Char('j') => {
            if app.listing.selected + 1 < len {
                app.listing.selected += 1;
            }
        }
        KeyCode::PageUp => {
            let step = app.rows_per_page.max(1);
            app.listing.selected = app.listing.selected.saturating_sub(step);
        }
        KeyCode::PageDown => {
            let step = app.rows_per_page.max(1);
            app.listing.selected = (app.listing.selected + step).min(len.saturating_sub(1));
        }
        KeyCode::Enter | KeyCode::Char('e') => begin_edit(app),
        KeyCode::Char('d') | KeyCode::Delete => request_delete(app),
        KeyCode::Char('r') => load_users(app),
        _ => {}
    }
    false
}

fn handle_edit_key(app: &mut AppState, code: KeyCode) {
    match code {
        KeyCode::Esc => cancel_edit(app),
        KeyCode::Enter => save_edit(app),
        other => {
            if let Some(edit) = app.listing.editing.as_mut() {
                match other {
                    KeyCode::Left | KeyCode::BackTab => edit.focus = edit.focus.prev(),
                    KeyCode::Right | KeyCode::Tab => edit.focus = edit.focus.next(),
                    KeyCode::Backspace => {
                        edit.draft.field_mut(edit.focus).pop();
                    }
                    KeyCode::Char(c) => edit.draft.field_mut(edit.focus).push(c),
                    _ => {}
                }
            }
        }
    }
}

fn handle_modal_key(app: &mut AppState, code: KeyCode) {
    match app.modal.clone() {
        Some(ModalState::Notice { .. }) => match code {
            KeyCode::Esc | KeyCode::Enter => close_modal(app),
            _ => {}
        },
        Some(ModalState::DeleteConfirm { selected }) => match code {
            KeyCode::Esc => resolve_delete(app, false),
            KeyCode::Left | KeyCode::Right => {
                app.modal = Some(ModalState::DeleteConfirm {
                    selected: if selected == 0 { 1 } else { 0 },
                });
            }
            KeyCode::Enter => resolve_delete(app, selected == 0),
            _ => {}
        },
        None => close_modal(app),
    }
}

/// Close any modal and return key handling to whatever was underneath:
/// the row editor if one is open, the screen otherwise.
pub fn close_modal(app: &mut AppState) {
    app.modal = None;
    app.input_mode = if app.screen == ActiveScreen::Users && app.listing.editing.is_some() {
        InputMode::EditRow
    } else {
        InputMode::Normal
    };
}

fn notice(app: &mut AppState, message: String) {
    app.modal = Some(ModalState::Notice { message });
    app.input_mode = InputMode::Modal;
}

/// Validate the draft and, if clean, submit exactly one creation request.
/// On success the draft is cleared for the next entry; on failure it is
/// kept so the user can retry.
pub fn submit_registration(app: &mut AppState) {
    let errors = form::validate(&app.register.draft);
    if !errors.is_empty() {
        app.register.errors = errors;
        return;
    }
    app.register.errors = errors;
    app.register.submitting = true;
    let fields = app.register.draft.to_fields();
    let res = app.store.create(&fields);
    app.register.submitting = false;
    match res {
        Ok(id) => {
            tracing::info!(id = %id, "registered user");
            app.register.draft.clear();
            app.register.focus = Field::FullName;
            notice(app, "✓ User Registered Successfully!".to_string());
        }
        Err(e) => {
            tracing::warn!(error = %e, "registration failed");
            notice(app, format!("❌ Error registering user: {e}"));
        }
    }
}

/// Switch to the listing screen and load the mirror afresh.
pub fn activate_users_screen(app: &mut AppState) {
    app.screen = ActiveScreen::Users;
    app.input_mode = InputMode::Normal;
    load_users(app);
}

/// Switch back to the registration form. The mirror has no life of its
/// own and is discarded with the screen.
pub fn activate_register_screen(app: &mut AppState) {
    app.screen = ActiveScreen::Register;
    app.input_mode = InputMode::Normal;
    app.listing = ListingState::default();
}

/// One read-all against the store. The mirror is emptied up front and
/// repopulated only on the success edge.
pub fn load_users(app: &mut AppState) {
    app.listing.records.clear();
    app.listing.editing = None;
    app.listing.selected = 0;
    app.listing.load_state = LoadState::Pending;
    let res = app.store.list_all();
    match res {
        Ok(records) => {
            tracing::info!(count = records.len(), "loaded user records");
            app.listing.records = records;
            app.listing.load_state = LoadState::Loaded;
        }
        Err(e) => {
            tracing::warn!(error = %e, "loading users failed");
            app.listing.load_state = LoadState::Failed;
            notice(app, format!("❌ Error fetching users: {e}"));
        }
    }
}

/// Snapshot the selected row into a draft buffer and enter edit mode.
/// Only one row is editable at a time.
pub fn begin_edit(app: &mut AppState) {
    let edit = app.selected_record().map(|record| RowEdit {
        id: record.id.clone(),
        draft: UserDraft::from_record(record),
        focus: Field::FullName,
        saving: false,
    });
    if let Some(edit) = edit {
        app.listing.editing = Some(edit);
        app.input_mode = InputMode::EditRow;
    }
}

/// Discard the draft buffer and leave edit mode. No remote call is made.
pub fn cancel_edit(app: &mut AppState) {
    app.listing.editing = None;
    app.input_mode = InputMode::Normal;
}

/// Issue one update for the row under edit. On success the mirror takes
/// the buffer's values (id and creation timestamp untouched) and edit
/// mode ends; on failure edit mode is retained so the edits survive.
pub fn save_edit(app: &mut AppState) {
    let (id, fields) = match app.listing.editing.as_mut() {
        Some(edit) => {
            edit.saving = true;
            (edit.id.clone(), edit.draft.to_fields())
        }
        None => return,
    };
    let res = app.store.update(&id, &fields);
    if let Some(edit) = app.listing.editing.as_mut() {
        edit.saving = false;
    }
    match res {
        Ok(()) => {
            tracing::info!(id = %id, "updated user");
            if let Some(record) = app.listing.records.iter_mut().find(|r| r.id == id) {
                record.fields = fields;
            }
            app.listing.editing = None;
            notice(app, "✓ User updated successfully!".to_string());
        }
        Err(e) => {
            tracing::warn!(id = %id, error = %e, "update failed");
            notice(app, format!("❌ Error updating user: {e}"));
        }
    }
}

/// Open the yes/no confirmation for the selected row. Nothing is sent to
/// the store until the user confirms.
pub fn request_delete(app: &mut AppState) {
    if app.selected_record().is_some() {
        app.modal = Some(ModalState::DeleteConfirm { selected: 1 });
        app.input_mode = InputMode::Modal;
    }
}

/// Resolve the delete confirmation. Declining makes no remote call. On a
/// confirmed delete the record leaves the mirror only after the store
/// accepted the removal.
pub fn resolve_delete(app: &mut AppState, confirmed: bool) {
    close_modal(app);
    if !confirmed {
        return;
    }
    let id = match app.selected_record() {
        Some(record) => record.id.clone(),
        None => return,
    };
    let res = app.store.delete(&id);
    match res {
        Ok(()) => {
            tracing::info!(id = %id, "deleted user");
            app.listing.records.retain(|r| r.id != id);
            if app.listing.selected >= app.listing.records.len() {
                app.listing.selected = app.listing.records.len().saturating_sub(1);
            }
            notice(app, "✓ User deleted successfully!".to_string());
        }
        Err(e) => {
            tracing::warn!(id = %id, error = %e, "delete failed");
            notice(app, format!("❌ Error deleting user: {e}"));
        }
    }
}
