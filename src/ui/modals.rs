use ratatui::prelude::*;
use ratatui::widgets::*;
use ratatui::Frame;

use crate::app::{ActiveModal, App};
use genpad::generate::QuickAction;

pub fn render_modal(frame: &mut Frame, app: &mut App) {
    match &app.modal.clone() {
        ActiveModal::Assistant | ActiveModal::ConfirmInsert => render_assistant(frame, app),
        ActiveModal::QuickInput(action) => render_quick_input(frame, app, *action),
        ActiveModal::Explanation(text) => render_explanation(frame, text),
        ActiveModal::Help | ActiveModal::None => {}
    }
}

pub(super) fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
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
        .split(popup_layout[1])[1]
}

/// Column of the input cursor, counted in chars.
fn input_cursor_col(app: &App) -> u16 {
    app.input_buffer[..app.input_cursor].chars().count() as u16
}

fn render_assistant(frame: &mut Frame, app: &App) {
    let area = centered_rect(75, 85, frame.area());
    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(" AI Assistant (local, free) ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Green));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4), // suggestions
            Constraint::Length(1), // prompt label
            Constraint::Length(3), // prompt input
            Constraint::Length(1), // response label
            Constraint::Min(3),    // response
            Constraint::Length(1), // hint
        ])
        .margin(1)
        .split(inner);

    let suggestions = Paragraph::new(vec![
        Line::from(Span::styled("Try asking:", Style::default().fg(Color::Cyan).bold())),
        Line::from("  * Write a motivational quote"),
        Line::from("  * Create a Python function to reverse a string"),
        Line::from("  * Explain machine learning in simple terms"),
    ]);
    frame.render_widget(suggestions, layout[0]);

    frame.render_widget(
        Paragraph::new("Your prompt:").style(Style::default().fg(Color::White)),
        layout[1],
    );

    let input_border = if app.modal == ActiveModal::Assistant {
        Color::Yellow
    } else {
        Color::DarkGray
    };
    let input = Paragraph::new(app.input_buffer.as_str())
        .style(Style::default().fg(Color::White))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(input_border)),
        );
    frame.render_widget(input, layout[2]);

    frame.render_widget(
        Paragraph::new("AI Response:").style(Style::default().fg(Color::White)),
        layout[3],
    );

    let response_text = if app.generating {
        "Generating... (may take 15-30 seconds)".to_string()
    } else if app.modal == ActiveModal::ConfirmInsert && app.assistant_response.is_empty() {
        "(empty response)".to_string()
    } else {
        app.assistant_response.clone()
    };
    let response = Paragraph::new(response_text)
        .style(Style::default().fg(Color::White))
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray)),
        );
    frame.render_widget(response, layout[4]);

    let hint = if app.modal == ActiveModal::ConfirmInsert {
        Paragraph::new(Line::from(vec![
            Span::styled("Insert into editor? ", Style::default().fg(Color::Yellow).bold()),
            Span::styled("y = Insert | n = Cancel", Style::default().fg(Color::DarkGray)),
        ]))
    } else {
        Paragraph::new("Enter to generate | Esc to close").style(Style::default().fg(Color::DarkGray))
    };
    frame.render_widget(hint, layout[5]);

    if app.modal == ActiveModal::Assistant {
        let cursor_x = layout[2].x + input_cursor_col(app) + 1;
        let cursor_y = layout[2].y + 1;
        frame.set_cursor_position((cursor_x, cursor_y));
    }
}

fn render_quick_input(frame: &mut Frame, app: &App, action: QuickAction) {
    let area = centered_rect(50, 20, frame.area());
    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(format!(" Quick: {} ", action.title()))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .margin(1)
        .split(inner);

    let label = Paragraph::new(action.input_label().unwrap_or(""))
        .style(Style::default().fg(Color::White));
    frame.render_widget(label, layout[0]);

    let input = Paragraph::new(app.input_buffer.as_str())
        .style(Style::default().fg(Color::White))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Yellow)),
        );
    frame.render_widget(input, layout[1]);

    let hint = Paragraph::new(format!(
        "Enter to generate (may take {}) | Esc to cancel",
        action.wait_hint()
    ))
    .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(hint, layout[2]);

    let cursor_x = layout[1].x + input_cursor_col(app) + 1;
    let cursor_y = layout[1].y + 1;
    frame.set_cursor_position((cursor_x, cursor_y));
}

fn render_explanation(frame: &mut Frame, text: &str) {
    let area = centered_rect(60, 50, frame.area());
    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(" AI Explanation (press any key to close) ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Green));

    let body = if text.is_empty() { "(empty response)" } else { text };
    let paragraph = Paragraph::new(body)
        .style(Style::default().fg(Color::White))
        .wrap(Wrap { trim: false })
        .block(block);
    frame.render_widget(paragraph, area);
}
