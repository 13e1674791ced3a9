//! Key binding dispatch for the TUI.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::form::registry::FieldKind;

use super::app::FormApp;

/// Handle a key event, mutating app state.
pub fn handle_key(app: &mut FormApp, key: KeyEvent) {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    if ctrl && key.code == KeyCode::Char('c') {
        app.should_quit = true;
        return;
    }

    // Preview modal swallows everything except its close keys.
    if app.session.modal().is_open() {
        if matches!(key.code, KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q')) {
            app.close_preview();
        }
        return;
    }

    // Global bindings
    if ctrl {
        match key.code {
            KeyCode::Char('p') => app.open_preview(),
            KeyCode::Char('s') => app.request_submit(),
            KeyCode::Char('t') => app.toggle_theme(),
            KeyCode::Char('u') => app.clear_field(),
            _ => {}
        }
        return;
    }
    match key.code {
        KeyCode::Esc => {
            app.should_quit = true;
            return;
        }
        KeyCode::Tab | KeyCode::Down => {
            app.focus_next();
            return;
        }
        KeyCode::BackTab | KeyCode::Up => {
            app.focus_prev();
            return;
        }
        _ => {}
    }

    // Field-specific bindings
    match app.focused_field().kind {
        FieldKind::Text => match key.code {
            KeyCode::Char(c) => app.type_char(c),
            KeyCode::Backspace => app.backspace(),
            KeyCode::Enter => app.focus_next(),
            _ => {}
        },
        FieldKind::TextArea => match key.code {
            KeyCode::Char(c) => app.type_char(c),
            KeyCode::Backspace => app.backspace(),
            KeyCode::Enter => app.type_char('\n'),
            _ => {}
        },
        FieldKind::Select => match key.code {
            KeyCode::Right | KeyCode::Char(' ') => app.cycle_select(true),
            KeyCode::Left => app.cycle_select(false),
            KeyCode::Enter => app.focus_next(),
            _ => {}
        },
        FieldKind::DateReadOnly => match key.code {
            KeyCode::Right => app.shift_date(1),
            KeyCode::Left => app.shift_date(-1),
            KeyCode::PageUp | KeyCode::Char(']') => app.shift_month(1),
            KeyCode::PageDown | KeyCode::Char('[') => app.shift_month(-1),
            KeyCode::Char('t') => app.pick_today(),
            KeyCode::Enter => app.publish_date(),
            _ => {}
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::registry::{fields, DATE, RECIPIENT_EMAIL, SUBJECT, URGENCY};
    use crate::session::UiMode;
    use crate::tui::app::StatusLine;
    use chrono::NaiveDate;

    fn app() -> FormApp {
        FormApp::with_today(UiMode::Light, NaiveDate::from_ymd_opt(2025, 1, 31).unwrap())
    }

    fn press(app: &mut FormApp, code: KeyCode) {
        handle_key(app, KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn ctrl(app: &mut FormApp, c: char) {
        handle_key(app, KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL));
    }

    fn focus_on(app: &mut FormApp, name: &str) {
        app.focus = fields().iter().position(|f| f.name == name).unwrap();
    }

    #[test]
    fn quit_on_ctrl_c_and_esc() {
        let mut a = app();
        ctrl(&mut a, 'c');
        assert!(a.should_quit);

        let mut b = app();
        press(&mut b, KeyCode::Esc);
        assert!(b.should_quit);
    }

    #[test]
    fn tab_and_arrows_move_focus() {
        let mut app = app();
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Down);
        assert_eq!(app.focus, 2);
        press(&mut app, KeyCode::Up);
        press(&mut app, KeyCode::BackTab);
        assert_eq!(app.focus, 0);
    }

    #[test]
    fn typing_into_subject() {
        let mut app = app();
        for c in "Hi!".chars() {
            press(&mut app, KeyCode::Char(c));
        }
        press(&mut app, KeyCode::Backspace);
        assert_eq!(app.session.state().get_field(SUBJECT).unwrap(), "Hi");
    }

    #[test]
    fn select_cycles_with_arrows() {
        let mut app = app();
        focus_on(&mut app, URGENCY);
        press(&mut app, KeyCode::Right);
        press(&mut app, KeyCode::Right);
        assert_eq!(app.session.state().get_field(URGENCY).unwrap(), "Urgent");
        press(&mut app, KeyCode::Left);
        press(&mut app, KeyCode::Left);
        assert_eq!(app.session.state().get_field(URGENCY).unwrap(), "");
    }

    #[test]
    fn date_keys_drive_picker() {
        let mut app = app();
        focus_on(&mut app, DATE);
        press(&mut app, KeyCode::Char('t'));
        assert_eq!(app.session.state().get_field(DATE).unwrap(), "31-01-2025");
        press(&mut app, KeyCode::PageUp);
        assert_eq!(app.session.state().get_field(DATE).unwrap(), "28-02-2025");
        press(&mut app, KeyCode::Right);
        assert_eq!(app.session.state().get_field(DATE).unwrap(), "01-03-2025");
        // Digits do nothing on the read-only date.
        press(&mut app, KeyCode::Char('9'));
        assert_eq!(app.session.state().get_field(DATE).unwrap(), "01-03-2025");
    }

    #[test]
    fn ctrl_p_opens_preview_and_modal_swallows_keys() {
        let mut app = app();
        press(&mut app, KeyCode::Char('A'));
        ctrl(&mut app, 'p');
        assert!(app.session.modal().is_open());

        press(&mut app, KeyCode::Char('B'));
        assert_eq!(app.session.state().get_field(SUBJECT).unwrap(), "A");

        press(&mut app, KeyCode::Esc);
        assert!(!app.session.modal().is_open());
        assert!(!app.should_quit, "Esc closes the modal, not the app");
    }

    #[test]
    fn ctrl_t_toggles_theme() {
        let mut app = app();
        ctrl(&mut app, 't');
        assert_eq!(app.session.theme().current(), UiMode::Dark);
    }

    #[test]
    fn ctrl_u_clears_field() {
        let mut app = app();
        focus_on(&mut app, RECIPIENT_EMAIL);
        press(&mut app, KeyCode::Char('x'));
        ctrl(&mut app, 'u');
        assert_eq!(app.session.state().get_field(RECIPIENT_EMAIL).unwrap(), "");
        assert_eq!(app.session.counters().email_count, 0);
    }

    #[test]
    fn ctrl_s_on_empty_form_reports_missing() {
        let mut app = app();
        ctrl(&mut app, 's');
        assert!(app.pending_submit.is_none());
        assert!(matches!(app.status, StatusLine::Error(_)));
    }
}
