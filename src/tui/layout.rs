//! Form layout with preview modal overlay.
//!
//! ```text
//! ┌───────────────────────────────────────────────┐
//! │ GenCircular                     [^T Dark Mode] │
//! ├─ Generate Official Circular ──────────────────┤
//! │ ▶ Subject*           Annual Day                │
//! │   Department*        ‹ Civil Engineering ›     │
//! │   Description        ...                       │
//! │                      12 / 400                  │
//! │   ...                                          │
//! ├───────────────────────────────────────────────┤
//! │ status                                         │
//! │ Tab/↑↓ move  ^P preview  ^S generate  ...      │
//! └───────────────────────────────────────────────┘
//! ```
//!
//! Text reaches the terminal as plain spans; nothing here is parsed as
//! markup.

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Frame;

use crate::form::registry::{fields, FieldDefinition, FieldKind, ADDITIONAL_INFO, RECIPIENT_EMAIL};
use crate::session::UiMode;

use super::app::{FormApp, StatusLine};

/// Label column width.
const LABEL_WIDTH: usize = 22;

/// Colours for one UI mode.
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    pub bg: Color,
    pub fg: Color,
    pub accent: Color,
    pub muted: Color,
    pub error: Color,
    pub ok: Color,
}

impl Palette {
    pub fn for_mode(mode: UiMode) -> Self {
        match mode {
            UiMode::Light => Self {
                bg: Color::White,
                fg: Color::Black,
                accent: Color::Blue,
                muted: Color::DarkGray,
                error: Color::Red,
                ok: Color::Green,
            },
            UiMode::Dark => Self {
                bg: Color::Black,
                fg: Color::White,
                accent: Color::Cyan,
                muted: Color::Gray,
                error: Color::LightRed,
                ok: Color::LightGreen,
            },
        }
    }

    fn base(&self) -> Style {
        Style::default().fg(self.fg).bg(self.bg)
    }
}

/// Draw the full TUI layout.
pub fn draw(f: &mut Frame, app: &FormApp) {
    let palette = Palette::for_mode(app.session.theme().current());
    let area = f.area();
    f.render_widget(Block::default().style(palette.base()), area);

    let outer = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // header
            Constraint::Min(5),    // form
            Constraint::Length(1), // status
            Constraint::Length(1), // key hints
        ])
        .split(area);

    draw_header(f, app, &palette, outer[0]);
    draw_form(f, app, &palette, outer[1]);
    draw_status(f, app, &palette, outer[2]);
    draw_hints(f, &palette, outer[3]);

    if app.session.modal().is_open() {
        draw_preview(f, app, &palette, area);
    }
}

fn draw_header(f: &mut Frame, app: &FormApp, palette: &Palette, area: Rect) {
    let toggle = format!("[^T {}]", app.session.theme().toggle_label());
    let title = " GenCircular";
    let pad = (area.width as usize).saturating_sub(title.len() + toggle.chars().count() + 1);
    let line = Line::from(vec![
        Span::styled(title, palette.base().add_modifier(Modifier::BOLD)),
        Span::raw(" ".repeat(pad)),
        Span::styled(toggle, palette.base().fg(palette.muted)),
    ]);
    f.render_widget(Paragraph::new(line).style(palette.base()), area);
}

fn draw_form(f: &mut Frame, app: &FormApp, palette: &Palette, area: Rect) {
    let block = Block::default()
        .title(" Generate Official Circular ")
        .borders(Borders::ALL)
        .border_style(palette.base().fg(palette.accent))
        .style(palette.base());

    let mut lines = Vec::new();
    for (i, def) in fields().iter().enumerate() {
        let focused = i == app.focus;
        lines.push(field_line(app, def, focused, palette));

        let indent = " ".repeat(LABEL_WIDTH + 4);
        if def.name == ADDITIONAL_INFO {
            lines.push(Line::from(Span::styled(
                format!("{indent}{}", app.session.info_counter_label()),
                palette.base().fg(palette.muted),
            )));
        }
        if def.name == RECIPIENT_EMAIL {
            lines.push(Line::from(Span::styled(
                format!("{indent}{}", app.session.email_counter_label()),
                palette.base().fg(palette.muted),
            )));
            if !app.invalid_emails.is_empty() {
                lines.push(Line::from(Span::styled(
                    format!("{indent}Invalid: {}", app.invalid_emails.join(", ")),
                    palette.base().fg(palette.error),
                )));
            }
        }
    }

    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false });
    f.render_widget(paragraph, area);
}

fn field_line<'a>(app: &'a FormApp, def: &FieldDefinition, focused: bool, palette: &Palette) -> Line<'a> {
    let marker = if focused { "▶ " } else { "  " };
    let label = format!(
        "{marker}{:<width$}",
        format!("{}{}", def.label, if def.required { "*" } else { "" }),
        width = LABEL_WIDTH
    );
    let label_style = if focused {
        palette.base().fg(palette.accent).add_modifier(Modifier::BOLD)
    } else {
        palette.base()
    };

    let value = app.value_of(def);
    let muted = palette.base().fg(palette.muted);
    let value_span = match def.kind {
        FieldKind::Select if value.is_empty() => Span::styled("— choose one —", muted),
        FieldKind::Select => Span::styled(format!("‹ {value} ›"), palette.base()),
        FieldKind::DateReadOnly if value.is_empty() && focused => Span::styled(
            "←/→ day, PgUp/PgDn month, t today",
            muted,
        ),
        FieldKind::DateReadOnly if value.is_empty() => Span::styled("(not set)", muted),
        FieldKind::TextArea => Span::styled(value.replace('\n', " ⏎ "), palette.base()),
        _ => Span::styled(value, palette.base()),
    };

    let mut spans = vec![Span::styled(label, label_style), value_span];
    if focused && matches!(def.kind, FieldKind::Text | FieldKind::TextArea) {
        spans.push(Span::styled("▏", palette.base().fg(palette.accent)));
    }
    Line::from(spans)
}

fn draw_status(f: &mut Frame, app: &FormApp, palette: &Palette, area: Rect) {
    let span = match &app.status {
        StatusLine::Ready if app.endpoint.is_empty() => Span::styled(" Ready", palette.base().fg(palette.muted)),
        StatusLine::Ready => Span::styled(
            format!(" Ready · submits to {}", app.endpoint),
            palette.base().fg(palette.muted),
        ),
        StatusLine::Info(msg) => Span::styled(format!(" {msg}"), palette.base().fg(palette.ok)),
        StatusLine::Error(msg) => Span::styled(
            format!(" {msg}"),
            palette.base().fg(palette.error).add_modifier(Modifier::BOLD),
        ),
    };
    f.render_widget(Paragraph::new(Line::from(span)).style(palette.base()), area);
}

fn draw_hints(f: &mut Frame, palette: &Palette, area: Rect) {
    let hints = " Tab/↑↓ move  ^P preview  ^S generate  ^T theme  ^U clear  Esc quit";
    f.render_widget(
        Paragraph::new(hints).style(palette.base().fg(palette.muted)),
        area,
    );
}

fn draw_preview(f: &mut Frame, app: &FormApp, palette: &Palette, area: Rect) {
    let Some(doc) = app.session.modal().document() else {
        return;
    };
    let popup = centered_rect(80, 70, area);
    f.render_widget(Clear, popup);

    let block = Block::default()
        .title(" Circular Preview ")
        .title_bottom(" Enter/Esc close ")
        .borders(Borders::ALL)
        .border_style(palette.base().fg(palette.accent))
        .style(palette.base());

    let mut lines = vec![
        Line::from(Span::styled(
            doc.subject.as_str(),
            palette.base().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];
    for (label, value) in doc.labeled_rows() {
        lines.push(Line::from(vec![
            Span::styled(format!("{label}: "), palette.base().add_modifier(Modifier::BOLD)),
            Span::styled(value, palette.base()),
        ]));
    }
    lines.push(Line::from(Span::styled(
        "─".repeat(popup.width.saturating_sub(2) as usize),
        palette.base().fg(palette.muted),
    )));
    for text in doc.additional_info.lines() {
        lines.push(Line::from(Span::styled(text, palette.base())));
    }

    f.render_widget(
        Paragraph::new(lines).block(block).wrap(Wrap { trim: false }),
        popup,
    );
}

/// A rect of `percent_x` × `percent_y` centred in `area`.
fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::registry::SUBJECT;
    use chrono::NaiveDate;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn app() -> FormApp {
        FormApp::with_today(UiMode::Light, NaiveDate::from_ymd_opt(2025, 3, 14).unwrap())
    }

    fn render(app: &FormApp) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|f| draw(f, app)).unwrap();
        let buffer = terminal.backend().buffer();
        buffer.content.iter().map(|c| c.symbol()).collect()
    }

    #[test]
    fn renders_every_field_label() {
        let text = render(&app());
        assert!(text.contains("Generate Official Circular"));
        for def in fields() {
            assert!(text.contains(def.label), "missing label {}", def.label);
        }
    }

    #[test]
    fn renders_counters_and_unselected_selects() {
        let text = render(&app());
        assert!(text.contains("0 / 400"));
        assert!(text.contains("0 emails entered"));
        assert!(text.contains("choose one"));
    }

    #[test]
    fn header_shows_toggle_label_for_mode() {
        let mut app = app();
        assert!(render(&app).contains("Dark Mode"));
        app.toggle_theme();
        assert!(render(&app).contains("Light Mode"));
    }

    #[test]
    fn preview_overlay_shows_snapshot() {
        let mut app = app();
        app.session.set_field(SUBJECT, "<b>Sports Day</b>").unwrap();
        app.open_preview();
        let text = render(&app);
        assert!(text.contains("Circular Preview"));
        // Shown literally; the terminal is not a markup surface.
        assert!(text.contains("<b>Sports Day</b>"));
    }

    #[test]
    fn invalid_emails_listed_under_field() {
        let mut app = app();
        app.invalid_emails = vec!["nope".into()];
        assert!(render(&app).contains("Invalid: nope"));
    }

    #[test]
    fn centered_rect_is_inside_area() {
        let area = Rect::new(0, 0, 100, 50);
        let r = centered_rect(80, 70, area);
        assert!(r.x >= area.x && r.right() <= area.right());
        assert!(r.y >= area.y && r.bottom() <= area.bottom());
        assert_eq!(r.width, 80);
    }
}
