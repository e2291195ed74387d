mod import;
mod quiz;
mod result;

use ratatui::{prelude::*, widgets::{Block, Paragraph, Wrap}};

use crate::app::{App, Notice};
use crate::models::AppState;

pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();
    frame.render_widget(Block::default().bg(Color::Reset), area);

    match app.state {
        AppState::Importing => import::render(frame, area, app),
        AppState::Answering => quiz::render(frame, area, app),
        AppState::Graded => result::render(frame, area, app),
    }
}

/// Letter shown in front of an option: A, B, C, ...
pub(crate) fn option_label(index: usize) -> char {
    u8::try_from(index)
        .ok()
        .filter(|i| *i < 26)
        .map_or('?', |i| char::from(b'A' + i))
}

fn render_notice(frame: &mut Frame, area: Rect, notice: Option<&Notice>) {
    let Some(notice) = notice else {
        return;
    };
    let color = match notice {
        Notice::Info(_) => Color::Green,
        Notice::Error(_) => Color::Red,
    };
    let widget = Paragraph::new(notice.message())
        .wrap(Wrap { trim: true })
        .fg(color);
    frame.render_widget(widget, area);
}

fn render_controls(frame: &mut Frame, area: Rect, text: &str) {
    let widget = Paragraph::new(text)
        .alignment(Alignment::Center)
        .fg(Color::DarkGray);
    frame.render_widget(widget, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_option_labels() {
        assert_eq!(option_label(0), 'A');
        assert_eq!(option_label(4), 'E');
        assert_eq!(option_label(25), 'Z');
        assert_eq!(option_label(26), '?');
    }
}
