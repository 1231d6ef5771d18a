//! Application state types and entry glue.
//!
//! Defines the enums and structs that model the TUI state, the color
//! theme, and the `AppState` that owns the injected store handle. The
//! event loop itself lives in [`update`] (re-exported as `run`).

pub mod update;

use ratatui::style::Color;

use crate::form::{Field, FieldErrors, UserDraft};
use crate::store::{UserRecord, UserStore};

/// Which screen is active.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ActiveScreen {
    Register,
    Users,
}

/// Current input mode for key handling. On the Register screen `Normal`
/// means keys type into the focused form field.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    EditRow,
    Modal,
}

/// Modal dialog states.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ModalState {
    /// Success or failure notice for a completed operation.
    Notice { message: String },
    /// Yes/No confirmation before deleting the selected record.
    /// `selected` is 0 for Yes, 1 for No.
    DeleteConfirm { selected: usize },
}

/// Phases of the listing screen's one load per activation. The mirror is
/// populated only on the `Pending -> Loaded` edge.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum LoadState {
    #[default]
    Idle,
    Pending,
    Loaded,
    Failed,
}

/// State of the registration form.
#[derive(Debug, Default)]
pub struct RegisterForm {
    pub draft: UserDraft,
    pub errors: FieldErrors,
    pub focus: Field,
    pub submitting: bool,
}

/// An in-progress row edit: the id under edit and its draft buffer,
/// separate from the mirror until a save succeeds.
#[derive(Debug)]
pub struct RowEdit {
    pub id: String,
    pub draft: UserDraft,
    pub focus: Field,
    pub saving: bool,
}

/// State of the listing screen: the local mirror of the remote collection
/// plus selection and edit bookkeeping.
#[derive(Debug, Default)]
pub struct ListingState {
    pub records: Vec<UserRecord>,
    pub load_state: LoadState,
    pub selected: usize,
    pub editing: Option<RowEdit>,
}

/// Color palette for theming the TUI.
#[derive(Clone, Copy, Debug)]
pub struct Theme {
    pub text: Color,
    pub title: Color,
    pub border: Color,
    pub header_bg: Color,
    pub header_fg: Color,
    pub status_bg: Color,
    pub status_fg: Color,
    pub highlight_fg: Color,
    pub error: Color,
    pub success: Color,
}

impl Theme {
    /// Catppuccin Mocha defaults.
    pub fn mocha() -> Self {
        Self {
            text: Color::Rgb(0xcd, 0xd6, 0xf4),
            title: Color::Rgb(0xcb, 0xa6, 0xf7),
            border: Color::Rgb(0x58, 0x5b, 0x70),
            header_bg: Color::Rgb(0x31, 0x32, 0x44),
            header_fg: Color::Rgb(0xb4, 0xbe, 0xfe),
            status_bg: Color::Rgb(0x45, 0x47, 0x5a),
            status_fg: Color::Rgb(0xcd, 0xd6, 0xf4),
            highlight_fg: Color::Rgb(0xf9, 0xe2, 0xaf),
            error: Color::Rgb(0xf3, 0x8b, 0xa8),
            success: Color::Rgb(0xa6, 0xe3, 0xa1),
        }
    }

    /// Plain terminal-color theme.
    #[allow(dead_code)]
    pub fn dark() -> Self {
        Self {
            text: Color::Gray,
            title: Color::Cyan,
            border: Color::Gray,
            header_bg: Color::Black,
            header_fg: Color::Cyan,
            status_bg: Color::DarkGray,
            status_fg: Color::Black,
            highlight_fg: Color::Yellow,
            error: Color::Red,
            success: Color::Green,
        }
    }

    /// Load theme from a key=value file. Unknown or missing keys fall back
    /// to `mocha`.
    pub fn from_file(path: &str) -> Option<Self> {
        let contents = std::fs::read_to_string(path).ok()?;
        let mut theme = Self::mocha();

        for raw_line in contents.lines() {
            let line = raw_line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let mut parts = line.splitn(2, '=');
            let key = parts.next().map(|s| s.trim()).unwrap_or("");
            let val = parts.next().map(|s| s.trim()).unwrap_or("");
            if key.is_empty() || val.is_empty() {
                continue;
            }
            if let Some(color) = Self::parse_color(val) {
                match key {
                    "text" => theme.text = color,
                    "title" => theme.title = color,
                    "border" => theme.border = color,
                    "header_bg" => theme.header_bg = color,
                    "header_fg" => theme.header_fg = color,
                    "status_bg" => theme.status_bg = color,
                    "status_fg" => theme.status_fg = color,
                    "highlight_fg" => theme.highlight_fg = color,
                    "error" => theme.error = color,
                    "success" => theme.success = color,
                    _ => {}
                }
            }
        }

        Some(theme)
    }

    /// Parse hex ("#RRGGBB" or "RRGGBB") or the special name "reset".
    fn parse_color(s: &str) -> Option<Color> {
        let lower = s.trim().to_ascii_lowercase();
        if lower == "reset" {
            return Some(Color::Reset);
        }
        let hex = lower.strip_prefix('#').unwrap_or(lower.as_str());
        if hex.len() == 6 {
            if let (Ok(r), Ok(g), Ok(b)) = (
                u8::from_str_radix(&hex[0..2], 16),
                u8::from_str_radix(&hex[2..4], 16),
                u8::from_str_radix(&hex[4..6], 16),
            ) {
                return Some(Color::Rgb(r, g, b));
            }
        }
        None
    }

    /// Persist the theme in key=value format. Only RGB and reset values
    /// are emitted; the built-in themes use nothing else.
    pub fn write_file(&self, path: &str) -> std::io::Result<()> {
        use std::fmt::Write as _;

        fn color_to_str(c: Color) -> String {
            match c {
                Color::Rgb(r, g, b) => format!("#{:02X}{:02X}{:02X}", r, g, b),
                _ => "reset".to_string(),
            }
        }

        let mut buf = String::new();
        buf.push_str("# userreg-manager theme configuration\n");
        buf.push_str("# Colors: hex as #RRGGBB or RRGGBB, or 'reset'\n\n");

        let mut kv = |k: &str, v: Color| {
            let _ = writeln!(&mut buf, "{} = {}", k, color_to_str(v));
        };
        kv("text", self.text);
        kv("title", self.title);
        kv("border", self.border);
        kv("header_bg", self.header_bg);
        kv("header_fg", self.header_fg);
        kv("status_bg", self.status_bg);
        kv("status_fg", self.status_fg);
        kv("highlight_fg", self.highlight_fg);
        kv("error", self.error);
        kv("success", self.success);

        std::fs::write(path, buf)
    }

    /// Ensure a config file exists; if missing, write the default theme
    /// and return it. On parse errors, return `mocha`.
    pub fn load_or_init(path: &str) -> Self {
        let p = std::path::Path::new(path);
        if p.exists() {
            return Self::from_file(path).unwrap_or_else(Self::mocha);
        }
        let t = Self::mocha();
        let _ = t.write_file(path);
        t
    }
}

pub struct AppState {
    pub store: Box<dyn UserStore>,
    pub screen: ActiveScreen,
    pub input_mode: InputMode,
    pub register: RegisterForm,
    pub listing: ListingState,
    pub modal: Option<ModalState>,
    pub rows_per_page: usize,
    pub theme: Theme,
}

impl AppState {
    /// Create the initial state around an injected store handle. The
    /// application starts on the registration screen; the listing screen
    /// loads its mirror when first activated.
    pub fn new(store: Box<dyn UserStore>, theme: Theme) -> Self {
        Self {
            store,
            screen: ActiveScreen::Register,
            input_mode: InputMode::Normal,
            register: RegisterForm::default(),
            listing: ListingState::default(),
            modal: None,
            rows_per_page: 10,
            theme,
        }
    }

    /// The record the listing selection points at, if any.
    pub fn selected_record(&self) -> Option<&UserRecord> {
        self.listing.records.get(self.listing.selected)
    }
}

/// Re-export the application event loop entry function.
pub use update::run_app as run;
