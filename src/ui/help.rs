use ratatui::prelude::*;
use ratatui::widgets::*;
use ratatui::Frame;

use super::modals::centered_rect;

pub fn render_help(frame: &mut Frame) {
    let area = centered_rect(60, 70, frame.area());
    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(" Keyboard Shortcuts (press any key to close) ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let help_text = vec![
        Line::from(""),
        Line::from(vec![Span::styled(
            "  Editing",
            Style::default().fg(Color::Cyan).bold(),
        )]),
        Line::from("  Arrows         Move cursor"),
        Line::from("  Shift+Arrows   Select text"),
        Line::from("  Home/End       Start/End of line"),
        Line::from("  Esc            Clear selection"),
        Line::from(""),
        Line::from(vec![Span::styled(
            "  AI",
            Style::default().fg(Color::Cyan).bold(),
        )]),
        Line::from("  Ctrl+A         AI Assistant"),
        Line::from("  F2             Quick: Quote"),
        Line::from("  F3             Quick: Blog"),
        Line::from("  F4             Quick: Code"),
        Line::from("  Ctrl+E         Explain selection"),
        Line::from(Span::styled(
            "                 (one generation at a time)",
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(""),
        Line::from(vec![Span::styled(
            "  General",
            Style::default().fg(Color::Cyan).bold(),
        )]),
        Line::from("  F1             Show this help"),
        Line::from("  Ctrl+Q/Ctrl+C  Quit"),
        Line::from(""),
    ];

    let paragraph = Paragraph::new(help_text).block(block);
    frame.render_widget(paragraph, area);
}
