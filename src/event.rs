use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::time::Duration;

use crate::app::{ActiveModal, App};
use genpad::buffer::TAB_STOP;
use genpad::generate::QuickAction;

/// Poll for input events and process them against app state.
/// Returns true if the app should continue running.
pub fn handle_events(app: &mut App) -> anyhow::Result<bool> {
    if event::poll(Duration::from_millis(100))? {
        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press {
                handle_key(app, key);
                app.show_waiting_response();
            }
        }
    }
    Ok(app.running)
}

pub fn handle_key(app: &mut App, key: KeyEvent) {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    // Quit works everywhere
    if ctrl && matches!(key.code, KeyCode::Char('q') | KeyCode::Char('c')) {
        app.running = false;
        return;
    }

    // If a modal is open, route to modal handler
    if app.modal != ActiveModal::None {
        handle_modal_input(app, key);
        return;
    }

    // Global keys
    match key.code {
        KeyCode::F(1) => app.modal = ActiveModal::Help,
        KeyCode::Char('a') if ctrl => app.open_assistant(),
        KeyCode::F(2) => app.open_quick(QuickAction::Quote),
        KeyCode::F(3) => app.open_quick(QuickAction::Blog),
        KeyCode::F(4) => app.open_quick(QuickAction::Code),
        KeyCode::Char('e') if ctrl => app.open_quick(QuickAction::Explain),
        _ => handle_editor_input(app, key),
    }
}

fn handle_editor_input(app: &mut App, key: KeyEvent) {
    let shift = key.modifiers.contains(KeyModifiers::SHIFT);
    let buf = &mut app.buffer;
    match key.code {
        KeyCode::Char(c)
            if !key
                .modifiers
                .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
        {
            buf.insert_char(c)
        }
        KeyCode::Enter => buf.insert_char('\n'),
        KeyCode::Tab => buf.insert_str(TAB_STOP),
        KeyCode::Backspace => buf.backspace(),
        KeyCode::Delete => buf.delete(),
        KeyCode::Left => buf.move_left(shift),
        KeyCode::Right => buf.move_right(shift),
        KeyCode::Up => buf.move_up(shift),
        KeyCode::Down => buf.move_down(shift),
        KeyCode::Home => buf.move_home(shift),
        KeyCode::End => buf.move_end(shift),
        KeyCode::Esc => buf.clear_selection(),
        _ => {}
    }
}

fn handle_modal_input(app: &mut App, key: KeyEvent) {
    match app.modal.clone() {
        ActiveModal::Assistant => match key.code {
            KeyCode::Enter => app.submit_assistant_prompt(),
            KeyCode::Esc => app.modal = ActiveModal::None,
            _ => handle_text_input(app, key),
        },
        ActiveModal::QuickInput(action) => match key.code {
            KeyCode::Enter => app.submit_quick_input(action),
            KeyCode::Esc => app.modal = ActiveModal::None,
            _ => handle_text_input(app, key),
        },
        ActiveModal::ConfirmInsert => match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => app.confirm_insert(true),
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => app.confirm_insert(false),
            _ => {}
        },
        ActiveModal::Explanation(_) | ActiveModal::Help => app.modal = ActiveModal::None,
        ActiveModal::None => {}
    }
}

/// Single-line editing of `app.input_buffer`.
fn handle_text_input(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char(c)
            if !key
                .modifiers
                .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
        {
            app.input_buffer.insert(app.input_cursor, c);
            app.input_cursor += c.len_utf8();
        }
        KeyCode::Backspace => {
            if let Some((prev, _)) = app.input_buffer[..app.input_cursor].char_indices().next_back() {
                app.input_buffer.remove(prev);
                app.input_cursor = prev;
            }
        }
        KeyCode::Delete => {
            if app.input_cursor < app.input_buffer.len() {
                app.input_buffer.remove(app.input_cursor);
            }
        }
        KeyCode::Left => {
            if let Some((prev, _)) = app.input_buffer[..app.input_cursor].char_indices().next_back() {
                app.input_cursor = prev;
            }
        }
        KeyCode::Right => {
            if let Some(c) = app.input_buffer[app.input_cursor..].chars().next() {
                app.input_cursor += c.len_utf8();
            }
        }
        KeyCode::Home => app.input_cursor = 0,
        KeyCode::End => app.input_cursor = app.input_buffer.len(),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use genpad::buffer::TextBuffer;
    use genpad::config::AppConfig;

    fn press(app: &mut App, code: KeyCode) {
        handle_key(app, KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn ctrl(app: &mut App, c: char) {
        handle_key(app, KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL));
    }

    #[test]
    fn typing_goes_to_the_document() {
        let mut app = App::new(&AppConfig::default());
        app.buffer = TextBuffer::new("");
        for c in "hi".chars() {
            press(&mut app, KeyCode::Char(c));
        }
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.buffer.text(), "hi\n");
    }

    #[test]
    fn assistant_prompt_round_trip_through_keys() {
        let mut app = App::new(&AppConfig::default());
        ctrl(&mut app, 'a');
        assert_eq!(app.modal, ActiveModal::Assistant);
        for c in "héy".chars() {
            press(&mut app, KeyCode::Char(c));
        }
        press(&mut app, KeyCode::Left);
        press(&mut app, KeyCode::Backspace);
        assert_eq!(app.input_buffer, "hy");
        press(&mut app, KeyCode::Enter);
        let (_, prompt) = app.pending_generation.take().unwrap();
        assert_eq!(prompt.as_str(), "hy");
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.modal, ActiveModal::None);
    }

    #[test]
    fn closing_a_modal_reveals_waiting_response() {
        let mut app = App::new(&AppConfig::default());
        press(&mut app, KeyCode::F(3));
        app.handle_bg_event(crate::app::BgEvent::Generated {
            generation: crate::app::Generation::Assistant,
            text: "done".into(),
        });
        press(&mut app, KeyCode::Esc);
        app.show_waiting_response();
        assert_eq!(app.modal, ActiveModal::ConfirmInsert);
        press(&mut app, KeyCode::Char('y'));
        assert!(app.buffer.text().contains("\ndone\n"));
    }

    #[test]
    fn ctrl_q_quits_from_a_modal() {
        let mut app = App::new(&AppConfig::default());
        press(&mut app, KeyCode::F(1));
        assert_eq!(app.modal, ActiveModal::Help);
        ctrl(&mut app, 'q');
        assert!(!app.running);
    }
}
