use std::ops::Range;

use ratatui::prelude::*;
use ratatui::widgets::*;
use ratatui::Frame;

use crate::app::{ActiveModal, App};

pub fn render_editor(frame: &mut Frame, app: &mut App, area: Rect) {
    let block = Block::default()
        .title(" Document ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);

    let (row, col) = app.buffer.cursor_position();
    let (top, left) = scroll_to_cursor(
        app.editor_scroll,
        (row, col),
        (inner.height as usize, inner.width as usize),
    );
    app.editor_scroll = (top, left);

    let lines = styled_lines(app.buffer.text(), app.buffer.selection());
    let paragraph = Paragraph::new(lines)
        .block(block)
        .scroll((top as u16, left as u16));
    frame.render_widget(paragraph, area);

    if app.modal == ActiveModal::None {
        frame.set_cursor_position((
            inner.x + (col - left) as u16,
            inner.y + (row - top) as u16,
        ));
    }
}

/// Smallest scroll change that keeps the cursor inside a `view` of
/// (height, width) cells.
fn scroll_to_cursor(
    (mut top, mut left): (usize, usize),
    (row, col): (usize, usize),
    (height, width): (usize, usize),
) -> (usize, usize) {
    if row < top {
        top = row;
    } else if height > 0 && row >= top + height {
        top = row + 1 - height;
    }
    if col < left {
        left = col;
    } else if width > 0 && col >= left + width {
        left = col + 1 - width;
    }
    (top, left)
}

fn styled_lines(text: &str, selection: Option<Range<usize>>) -> Vec<Line<'_>> {
    let highlight = Style::default().bg(Color::Blue).fg(Color::White);
    let mut offset = 0;
    text.split('\n')
        .map(|line| {
            let start = offset;
            let end = start + line.len();
            offset = end + 1;

            let Some(sel) = selection.as_ref() else {
                return Line::from(line);
            };
            let lo = sel.start.clamp(start, end);
            let hi = sel.end.clamp(start, end);
            if lo == hi {
                return Line::from(line);
            }
            Line::from(vec![
                Span::raw(&line[..lo - start]),
                Span::styled(&line[lo - start..hi - start], highlight),
                Span::raw(&line[hi - start..]),
            ])
        })
        .collect()
}
