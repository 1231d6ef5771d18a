// Integration tests for userreg-manager

mod common;

use common::{Call, RecordingStore, app_with, record};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{Terminal, backend::TestBackend};
use userreg_manager::app::{AppState, LoadState, update};
use userreg_manager::ui::render;

// 1) Store config roundtrip and init
#[test]
fn store_config_roundtrip_and_init() {
    use std::{
        fs,
        path::PathBuf,
        time::{SystemTime, UNIX_EPOCH},
    };
    use userreg_manager::store::StoreConfig;

    // Unique temp path
    let mut path = std::env::temp_dir();
    let nonce = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    path.push(format!("urm_store_{}_{}.conf", std::process::id(), nonce));
    let path_str = path.to_string_lossy().to_string();

    // Roundtrip write/read
    let config = StoreConfig {
        endpoint: "https://docs.example.net/v1".to_string(),
        collection: "people".to_string(),
        api_key: Some("token-123".to_string()),
    };
    config.write_file(&path_str).expect("write store config");
    let read_back = StoreConfig::from_file(&path_str).expect("read store config");
    assert_eq!(read_back, config);

    // load_or_init creates a template if missing
    let mut p2 = PathBuf::from(&path_str);
    p2.set_file_name(format!(
        "{}_init.conf",
        p2.file_stem().unwrap().to_string_lossy()
    ));
    let p2_str = p2.to_string_lossy().to_string();
    let _ = fs::remove_file(&p2_str);
    let created = StoreConfig::load_or_init(&p2_str);
    assert!(PathBuf::from(&p2_str).exists());
    assert_eq!(created, StoreConfig::default());

    // Cleanup best-effort
    let _ = fs::remove_file(&path_str);
    let _ = fs::remove_file(&p2_str);
}

// 2) Theme config roundtrip
#[test]
fn theme_roundtrip_and_init() {
    use std::time::{SystemTime, UNIX_EPOCH};
    use userreg_manager::app::Theme;

    let mut path = std::env::temp_dir();
    let nonce = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    path.push(format!("urm_theme_{}_{}.conf", std::process::id(), nonce));
    let path_str = path.to_string_lossy().to_string();

    let t = Theme::mocha();
    t.write_file(&path_str).expect("write theme");
    let t2 = Theme::from_file(&path_str).expect("read theme");
    assert_eq!(format!("{:?}", t.text), format!("{:?}", t2.text));
    assert_eq!(format!("{:?}", t.error), format!("{:?}", t2.error));
    assert_eq!(format!("{:?}", t.success), format!("{:?}", t2.success));

    let _ = std::fs::remove_file(&path_str);
}

// Collect a TestBackend frame into a plain string for content checks.
fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
    let buffer = terminal.backend().buffer();
    let width = buffer.area.width as usize;
    let mut out = String::new();
    for (i, cell) in buffer.content().iter().enumerate() {
        out.push_str(cell.symbol());
        if (i + 1) % width == 0 {
            out.push('\n');
        }
    }
    out
}

fn draw(app: &mut AppState) -> String {
    let backend = TestBackend::new(120, 30);
    let mut terminal = Terminal::new(backend).expect("create terminal");
    terminal
        .draw(|f| {
            render(f, app);
        })
        .expect("render frame");
    buffer_text(&terminal)
}

fn type_str(app: &mut AppState, text: &str) {
    for c in text.chars() {
        update::handle_key(app, KeyEvent::from(KeyCode::Char(c)));
    }
}

// 3) Listing indicators: loading, failure, empty, populated
#[test]
fn listing_renders_one_indicator_per_load_state() {
    let store = RecordingStore::empty();
    let mut app = app_with(&store);
    update::activate_users_screen(&mut app);

    // Completed load with zero documents
    assert_eq!(app.listing.load_state, LoadState::Loaded);
    let text = draw(&mut app);
    assert!(text.contains("No users registered yet"));

    // Pending state shows the loading hint instead
    app.listing.load_state = LoadState::Pending;
    let text = draw(&mut app);
    assert!(text.contains("Loading users..."));
    assert!(!text.contains("No users registered yet"));

    // A failed load shows neither
    app.listing.load_state = LoadState::Failed;
    let text = draw(&mut app);
    assert!(text.contains("Could not load users"));
    assert!(!text.contains("No users registered yet"));
}

#[test]
fn listing_renders_every_record_with_its_fields() {
    let store = RecordingStore::with_records(vec![
        record("u1", "Ada Lovelace", "ada@b.co"),
        record("u2", "Bob Harris", "bob@b.co"),
    ]);
    let mut app = app_with(&store);
    update::activate_users_screen(&mut app);

    let text = draw(&mut app);
    assert!(text.contains("Ada Lovelace"));
    assert!(text.contains("Bob Harris"));
    assert!(text.contains("ada@b.co"));
    assert!(text.contains("bob@b.co"));
    assert!(text.contains("012345678"));
    // Empty professions display as N/A
    assert!(text.contains("N/A"));
    // Details pane shows the selected record with its creation time
    assert!(text.contains("Registered: 2025-12-24"));
}

// 4) Row edit rendering uses the draft buffer
#[test]
fn editing_row_renders_draft_values_not_the_mirror() {
    let store = RecordingStore::with_records(vec![record("u1", "Ada", "ada@b.co")]);
    let mut app = app_with(&store);
    update::activate_users_screen(&mut app);
    update::begin_edit(&mut app);
    type_str(&mut app, "X");

    let text = draw(&mut app);
    // Focused column carries the marker and the appended character.
    assert!(text.contains("▶AdaX"));
    assert_eq!(app.listing.records[0].fields.full_name, "Ada");
}

// 5) Registration form rendering: errors inline, submit label
#[test]
fn register_form_shows_inline_errors_after_a_blocked_submit() {
    let store = RecordingStore::empty();
    let mut app = app_with(&store);

    update::handle_key(&mut app, KeyEvent::from(KeyCode::Enter));
    assert!(store.calls().is_empty());

    let text = draw(&mut app);
    assert!(text.contains("Full Name is required"));
    assert!(text.contains("Invalid email"));
    assert!(text.contains("Phone must be at least 10 digits"));
    assert!(text.contains("Address is required"));
    assert!(text.contains("Register Now"));

    app.register.submitting = true;
    let text = draw(&mut app);
    assert!(text.contains("Registering..."));
    assert!(!text.contains("Register Now"));
}

// 6) Full registration flow driven through the key handler
#[test]
fn registration_flow_reaches_the_listing_screen() {
    let store = RecordingStore::empty();
    let mut app = app_with(&store);

    type_str(&mut app, "Ada Lovelace");
    update::handle_key(&mut app, KeyEvent::from(KeyCode::Down));
    type_str(&mut app, "ada@example.com");
    update::handle_key(&mut app, KeyEvent::from(KeyCode::Down));
    type_str(&mut app, "0123456789");
    update::handle_key(&mut app, KeyEvent::from(KeyCode::Down));
    type_str(&mut app, "12 Analytical Row");
    update::handle_key(&mut app, KeyEvent::from(KeyCode::Down));
    type_str(&mut app, "Mathematician");

    update::handle_key(&mut app, KeyEvent::from(KeyCode::Enter));
    assert_eq!(store.calls().len(), 1);
    match &store.calls()[0] {
        Call::Create(fields) => {
            assert_eq!(fields.full_name, "Ada Lovelace");
            assert_eq!(fields.profession, "Mathematician");
        }
        other => panic!("expected create, got {other:?}"),
    }

    let text = draw(&mut app);
    assert!(text.contains("User Registered Successfully!"));

    // Close the notice, switch screens; the new record is loaded and shown.
    update::handle_key(&mut app, KeyEvent::from(KeyCode::Enter));
    update::handle_key(&mut app, KeyEvent::from(KeyCode::Tab));

    let text = draw(&mut app);
    assert!(text.contains("Ada Lovelace"));
    assert!(text.contains("ada@example.com"));
    assert!(text.contains("Mathematician"));
}
