use ratatui::prelude::*;
use ratatui::widgets::*;
use ratatui::Frame;

use crate::app::{ActiveModal, App};

use super::editor::render_editor;
use super::help::render_help;
use super::modals::render_modal;
use super::status_bar::render_status_bar;

pub fn render(frame: &mut Frame, app: &mut App) {
    let size = frame.area();

    // Main layout: [title bar] [editor] [status bar]
    let outer = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // title bar
            Constraint::Min(3),    // editor
            Constraint::Length(1), // status bar
        ])
        .split(size);

    let title = format!(" genpad | Free Local AI ({}) ", app.invoker.program());
    let title_bar =
        Paragraph::new(title).style(Style::default().bg(Color::Green).fg(Color::White).bold());
    frame.render_widget(title_bar, outer[0]);

    render_editor(frame, app, outer[1]);
    render_status_bar(frame, app, outer[2]);

    // Render modal overlay if active
    if app.modal != ActiveModal::None {
        render_modal(frame, app);
    }

    // Render help overlay
    if app.modal == ActiveModal::Help {
        render_help(frame);
    }
}
