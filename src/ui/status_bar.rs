use ratatui::prelude::*;
use ratatui::widgets::*;
use ratatui::Frame;

use crate::app::App;

pub fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let style = if app.status_is_error {
        Style::default().bg(Color::Red).fg(Color::White)
    } else {
        Style::default().bg(Color::DarkGray).fg(Color::White)
    };

    // Tool failures carry a remediation hint on a second line.
    let message = app.status_message.replace('\n', " ");
    let left = Span::styled(format!(" {} ", message), style);

    let (row, col) = app.buffer.cursor_position();
    let right_text = if app.generating {
        format!("Generating | Ln {}, Col {}", row + 1, col + 1)
    } else {
        format!("Ln {}, Col {}", row + 1, col + 1)
    };
    let right = Span::styled(
        format!(" {} | F1 Help ", right_text),
        Style::default().bg(Color::DarkGray).fg(Color::Gray),
    );

    let bar = Line::from(vec![
        left,
        Span::styled(
            " ".repeat(
                area.width
                    .saturating_sub(message.chars().count() as u16 + right_text.len() as u16 + 12)
                    as usize,
            ),
            Style::default().bg(Color::DarkGray),
        ),
        right,
    ]);

    frame.render_widget(Paragraph::new(bar), area);
}
