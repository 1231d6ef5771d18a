//! Registration form rendering: one input per field, inline validation
//! messages, and a submit line that reflects the submitting flag.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use crate::app::AppState;
use crate::form::Field;

pub fn render_register_form(f: &mut Frame, area: Rect, app: &AppState) {
    let mut lines: Vec<Line> = Vec::new();
    lines.push(Line::raw("Create your account in minutes"));
    lines.push(Line::raw(""));

    for field in Field::ALL {
        let focused = app.register.focus == field;
        let marker = if focused { "▶ " } else { "  " };
        let star = if field.required() { " *" } else { "" };
        let label_style = if focused {
            Style::default()
                .fg(app.theme.highlight_fg)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(app.theme.text)
        };
        let value = app.register.draft.field(field);
        let value_span = if value.is_empty() && !focused {
            Span::styled(
                format!("<{}>", field.label().to_lowercase()),
                Style::default().fg(app.theme.border),
            )
        } else {
            Span::styled(value.to_string(), Style::default().fg(app.theme.text))
        };
        lines.push(Line::from(vec![
            Span::styled(format!("{marker}{}{star}: ", field.label()), label_style),
            value_span,
        ]));
        if let Some(msg) = app.register.errors.get(field) {
            lines.push(Line::from(Span::styled(
                format!("      ⚠ {msg}"),
                Style::default().fg(app.theme.error),
            )));
        }
        lines.push(Line::raw(""));
    }

    let submit = if app.register.submitting {
        Span::styled(
            "⏳ Registering...",
            Style::default().fg(app.theme.border),
        )
    } else {
        Span::styled(
            "✓ Register Now  (Enter)",
            Style::default()
                .fg(app.theme.success)
                .add_modifier(Modifier::BOLD),
        )
    };
    lines.push(Line::from(submit));
    lines.push(Line::from(Span::styled(
        "👥 View All Users  (Tab)",
        Style::default().fg(app.theme.title),
    )));

    let p = Paragraph::new(lines).wrap(Wrap { trim: false }).block(
        Block::default()
            .title("📝 User Registration")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(app.theme.border)),
    );
    f.render_widget(p, area);
}
